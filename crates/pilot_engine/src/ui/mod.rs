//! Immediate-mode UI abstraction
//!
//! Widgets are declared every frame between [`Ui::new_frame`] and
//! [`Ui::render`]. The UI paints into its own draw lists, which the frame
//! orchestrator hands to the graphics device after the application's list.

use crate::foundation::math::Vec2;
use crate::render::DrawList;

/// When a window placement request applies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UiCond {
    /// Every frame
    #[default]
    Always,
    /// Only the first time the window appears
    Once,
}

/// How a layout row sizes its columns
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutRowType {
    /// Column widths are ratios of the available width
    Dynamic,
    /// Column widths are in pixels
    Static,
}

/// Immediate-mode UI used by the frame orchestrator
pub trait Ui {
    /// Start declaring widgets for a new frame
    fn new_frame(&mut self);

    /// Position the next window that begins
    fn set_next_window_pos(&mut self, pos: Vec2, cond: UiCond);

    /// Begin a window; widgets may only be added when this returns true,
    /// in which case [`Ui::end_window`] must follow
    fn begin_window(&mut self, name: &str, open: Option<&mut bool>, auto_size: bool) -> bool;

    /// Start a row of `ratios.len()` columns
    fn layout_row(&mut self, row_type: LayoutRowType, height: f32, ratios: &[f32]);

    /// Collapsible section; [`Ui::end_collapsing_header`] follows when true
    fn collapsing_header(&mut self, name: &str) -> bool;

    /// Close a section opened by [`Ui::collapsing_header`]
    fn end_collapsing_header(&mut self);

    /// Toggle `value`; returns true when it changed this frame
    fn checkbox(&mut self, label: &str, value: &mut bool) -> bool;

    /// Close the current window
    fn end_window(&mut self);

    /// Built-in widget showcase window
    fn show_demo(&mut self, open: &mut bool);

    /// Built-in style editor window
    fn show_style(&mut self, open: &mut bool);

    /// Built-in UI introspection window
    fn show_debug(&mut self, open: &mut bool);

    /// Whether the UI consumes mouse input this frame
    fn want_capture_mouse(&self) -> bool;

    /// Finish the frame and fill the draw lists
    fn render(&mut self);

    /// Main UI draw list
    fn draw_list(&self) -> &DrawList;

    /// Overlay draw list for UI debugging
    fn debug_draw_list(&self) -> &DrawList;
}

/// UI that lays nothing out and never takes input
///
/// Windows always open and headers always stay collapsed. Every declared
/// window and widget is recorded by label for the current frame.
#[derive(Debug, Default)]
pub struct HeadlessUi {
    draw_list: DrawList,
    debug_draw_list: DrawList,
    next_window_pos: Option<(Vec2, UiCond)>,
    placed_once: Vec<String>,
    window_depth: usize,
    widgets: Vec<String>,
    frames: u64,
}

impl HeadlessUi {
    /// Create a headless UI
    pub fn new() -> Self {
        Self::default()
    }

    /// Labels declared since the last [`Ui::new_frame`]
    pub fn widgets(&self) -> &[String] {
        &self.widgets
    }

    /// Frames rendered
    pub const fn frames(&self) -> u64 {
        self.frames
    }
}

impl Ui for HeadlessUi {
    fn new_frame(&mut self) {
        self.widgets.clear();
        self.draw_list.reset();
        self.debug_draw_list.reset();
        if self.window_depth != 0 {
            log::warn!("{} UI windows were not ended last frame", self.window_depth);
            self.window_depth = 0;
        }
    }

    fn set_next_window_pos(&mut self, pos: Vec2, cond: UiCond) {
        self.next_window_pos = Some((pos, cond));
    }

    fn begin_window(&mut self, name: &str, _open: Option<&mut bool>, _auto_size: bool) -> bool {
        if let Some((pos, cond)) = self.next_window_pos.take() {
            let first_time = !self.placed_once.iter().any(|placed| placed == name);
            if cond == UiCond::Always || first_time {
                log::trace!("Placed window '{}' at ({}, {})", name, pos.x, pos.y);
            }
            if first_time {
                self.placed_once.push(name.to_owned());
            }
        }
        self.window_depth += 1;
        self.widgets.push(format!("window:{name}"));
        true
    }

    fn layout_row(&mut self, _row_type: LayoutRowType, _height: f32, _ratios: &[f32]) {}

    fn collapsing_header(&mut self, name: &str) -> bool {
        self.widgets.push(format!("header:{name}"));
        false
    }

    fn end_collapsing_header(&mut self) {}

    fn checkbox(&mut self, label: &str, _value: &mut bool) -> bool {
        self.widgets.push(format!("checkbox:{label}"));
        false
    }

    fn end_window(&mut self) {
        self.window_depth = self.window_depth.saturating_sub(1);
    }

    fn show_demo(&mut self, _open: &mut bool) {
        self.widgets.push("window:UI Demo".to_owned());
    }

    fn show_style(&mut self, _open: &mut bool) {
        self.widgets.push("window:UI Style".to_owned());
    }

    fn show_debug(&mut self, _open: &mut bool) {
        self.widgets.push("window:UI Debug".to_owned());
    }

    fn want_capture_mouse(&self) -> bool {
        false
    }

    fn render(&mut self) {
        self.frames += 1;
    }

    fn draw_list(&self) -> &DrawList {
        &self.draw_list
    }

    fn debug_draw_list(&self) -> &DrawList {
        &self.debug_draw_list
    }
}
