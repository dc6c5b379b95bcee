//! Capability objects injected into the application
//!
//! Everything the frame orchestrator calls besides the ECS lives behind a
//! trait object in [`Services`]. Services are handed over on load and handed
//! back on detach, so state and capabilities can be swapped independently.

use std::collections::HashMap;

use crate::render::{GraphicsDevice, HeadlessDevice};
use crate::ui::{HeadlessUi, Ui};

/// Named per-frame counters
pub trait Stats {
    /// Start a new sampling frame
    fn new_frame(&mut self);

    /// Set a counter's value for this frame
    fn set_counter(&mut self, name: &str, value: f64);

    /// Last value written to a counter
    fn counter(&self, name: &str) -> Option<f64>;
}

/// [`Stats`] backed by a map
#[derive(Debug, Default)]
pub struct CounterStats {
    counters: HashMap<String, f64>,
    frame: u64,
}

impl CounterStats {
    /// Create an empty counter set
    pub fn new() -> Self {
        Self::default()
    }

    /// Frames started
    pub const fn frame(&self) -> u64 {
        self.frame
    }
}

impl Stats for CounterStats {
    fn new_frame(&mut self) {
        self.frame += 1;
    }

    fn set_counter(&mut self, name: &str, value: f64) {
        match self.counters.get_mut(name) {
            Some(counter) => *counter = value,
            None => {
                self.counters.insert(name.to_owned(), value);
            }
        }
    }

    fn counter(&self, name: &str) -> Option<f64> {
        self.counters.get(name).copied()
    }
}

/// Which debug tool windows are open
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DebugToolsState {
    /// Live allocation list
    pub show_memory_allocations: bool,
    /// Frame profiler
    pub show_profiling: bool,
    /// Counter graphs
    pub show_stats: bool,
    /// Log viewer
    pub show_logging: bool,
}

/// Debug tool windows driven by [`DebugToolsState`]
pub trait DebugTools {
    /// Declare the windows enabled in `state`; closing one clears its flag
    fn show_windows(&mut self, state: &mut DebugToolsState);
}

/// [`DebugTools`] that shows nothing
#[derive(Debug, Default, Clone, Copy)]
pub struct NullDebugTools;

impl DebugTools for NullDebugTools {
    fn show_windows(&mut self, _state: &mut DebugToolsState) {}
}

/// Capabilities owned by a running application
pub struct Services {
    /// Rendering backend
    pub device: Box<dyn GraphicsDevice>,
    /// Immediate-mode UI
    pub ui: Box<dyn Ui>,
    /// Debug tool windows
    pub debug: Box<dyn DebugTools>,
    /// Per-frame counters
    pub stats: Box<dyn Stats>,
}

impl Services {
    /// Bundle capability objects
    pub fn new(
        device: Box<dyn GraphicsDevice>,
        ui: Box<dyn Ui>,
        debug: Box<dyn DebugTools>,
        stats: Box<dyn Stats>,
    ) -> Self {
        Self {
            device,
            ui,
            debug,
            stats,
        }
    }

    /// Headless device and UI with map-backed stats and no debug tools
    pub fn headless(width: f32, height: f32) -> Self {
        Self::new(
            Box::new(HeadlessDevice::new(width, height)),
            Box::new(HeadlessUi::new()),
            Box::new(NullDebugTools),
            Box::new(CounterStats::new()),
        )
    }

    /// The device as a [`HeadlessDevice`], if it is one
    pub fn headless_device(&self) -> Option<&HeadlessDevice> {
        self.device.as_any().downcast_ref::<HeadlessDevice>()
    }

    /// Mutable access to the device as a [`HeadlessDevice`], if it is one
    pub fn headless_device_mut(&mut self) -> Option<&mut HeadlessDevice> {
        self.device.as_any_mut().downcast_mut::<HeadlessDevice>()
    }
}

impl std::fmt::Debug for Services {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Services").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters_overwrite() {
        let mut stats = CounterStats::new();
        stats.new_frame();
        assert_eq!(stats.counter("framerate"), None);

        stats.set_counter("framerate", 60.0);
        stats.set_counter("framerate", 59.5);
        assert_eq!(stats.counter("framerate"), Some(59.5));
        assert_eq!(stats.frame(), 1);
    }

    #[test]
    fn test_headless_services_downcast() {
        let mut services = Services::headless(640.0, 480.0);
        assert!(services.headless_device().is_some());
        services.headless_device_mut().unwrap().skip_next_frames(1);
        assert!(!services.device.begin_frame().unwrap());
    }

    #[test]
    fn test_null_debug_tools_keep_state() {
        let mut state = DebugToolsState {
            show_stats: true,
            ..Default::default()
        };
        NullDebugTools.show_windows(&mut state);
        assert!(state.show_stats);
    }
}
