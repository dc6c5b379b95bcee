//! Rendering collaborators
//!
//! The orchestrator never talks to a graphics API directly. It records work
//! into draw lists and hands them to a [`GraphicsDevice`]. The crate ships a
//! [`HeadlessDevice`] that validates and records every call, which is what the
//! demo binary and the tests run against.

pub mod device;
pub mod draw_list;
pub mod gpu_types;
pub mod headless;
pub mod state;

pub use device::{BufferHandle, Draw, DrawArea, GraphicsDevice};
pub use draw_list::{DrawCommand, DrawLayer, DrawList, DrawList3d, LayerId, Line3d, Triangle3d};
pub use gpu_types::{GlobalInfo, MaterialInfo, ObjectInfo};
pub use headless::{BufferKind, DeviceBuffer, DeviceCall, HeadlessDevice};
pub use state::{GraphicsState, PipelineFlags};

use thiserror::Error;

/// High-level rendering error types
///
/// A device that is not ready to render is not an error; see
/// [`GraphicsDevice::begin_frame`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    /// A recording or submission call failed
    #[error("Rendering failed: {0}")]
    RenderingFailed(String),

    /// Buffer or other resource creation failed
    ///
    /// Occurs when resources cannot be created, typically because the
    /// supplied data is empty or malformed.
    #[error("Resource creation failed: {0}")]
    ResourceCreationFailed(String),

    /// Backend-specific error occurred
    #[error("Backend error: {0}")]
    BackendError(String),
}

/// Result type for rendering operations
pub type RenderResult<T> = Result<T, RenderError>;
