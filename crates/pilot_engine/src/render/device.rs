//! Graphics device abstraction
//!
//! Defines the trait a rendering backend implements for the frame
//! orchestrator, plus the small value types passed across it.

use super::{DrawList, DrawList3d, GlobalInfo, MaterialInfo, PipelineFlags, RenderResult};
use crate::ecs::components::MeshBuffers;
use crate::foundation::math::Mat4;

slotmap::new_key_type! {
    /// Handle to a buffer owned by a graphics device
    pub struct BufferHandle;
}

/// One static mesh draw
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Draw {
    /// Buffers to bind and their element counts
    pub mesh: MeshBuffers,
    /// Constants of the submesh's material
    pub material: MaterialInfo,
}

/// A contiguous range of [`Draw`]s rendered into one area
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DrawArea {
    /// First draw in the range
    pub draw_offset: u32,
    /// Number of draws in the range
    pub draw_count: u32,
}

/// Rendering backend used by the frame orchestrator
///
/// Calls arrive in a fixed order each frame: `begin_frame`, `begin_recording`,
/// `set_global_info`, draw list submission, `draw_areas`, `draw_lists`,
/// `end_recording`, `end_frame`. A frame that fails part way is closed with
/// `abort_frame` instead. Implementations do not need to be `Send`.
pub trait GraphicsDevice {
    /// Start a frame
    ///
    /// Returns `Ok(false)` when the device cannot render this frame (for
    /// example while the surface is being recreated); the caller must then
    /// skip the rest of the frame.
    fn begin_frame(&mut self) -> RenderResult<bool>;

    /// Present the frame
    fn end_frame(&mut self) -> RenderResult<()>;

    /// Discard whatever was recorded and close the current frame
    ///
    /// Safe to call when no frame is open.
    fn abort_frame(&mut self);

    /// Begin recording commands for the current frame
    fn begin_recording(&mut self) -> RenderResult<()>;

    /// Finish recording commands for the current frame
    fn end_recording(&mut self) -> RenderResult<()>;

    /// Recreate size-dependent resources after a viewport change
    fn resize(&mut self, width: f32, height: f32) -> RenderResult<()>;

    /// Create an immutable vertex buffer from raw bytes
    fn create_vertex_buffer(&mut self, data: &[u8], stride: u32, name: &str) -> RenderResult<BufferHandle>;

    /// Create an immutable index buffer
    fn create_index_buffer(&mut self, indices: &[u32], name: &str) -> RenderResult<BufferHandle>;

    /// Upload the per-frame scene constants
    fn set_global_info(&mut self, info: &GlobalInfo) -> RenderResult<()>;

    /// Prepare a 2D draw list for use with this device
    fn register_drawlist(&mut self, list: &mut DrawList) -> RenderResult<()>;

    /// Prepare a 3D draw list for use with this device
    fn register_3d_drawlist(&mut self, list: &mut DrawList3d) -> RenderResult<()>;

    /// Render and clear a 3D draw list
    fn submit_3d_drawlist(
        &mut self,
        list: &mut DrawList3d,
        width: f32,
        height: f32,
        mvp: &Mat4,
        flags: PipelineFlags,
    ) -> RenderResult<()>;

    /// Render static meshes, one area per range of `draws`
    fn draw_areas(&mut self, areas: &[DrawArea], draws: &[Draw]) -> RenderResult<()>;

    /// Render submitted 2D draw lists in order
    fn draw_lists(&mut self, lists: &[&DrawList]) -> RenderResult<()>;

    /// Release every device resource
    fn cleanup(&mut self);

    /// Downcast to the concrete device type
    fn as_any(&self) -> &dyn std::any::Any;

    /// Mutable downcast to the concrete device type
    fn as_any_mut(&mut self) -> &mut dyn std::any::Any;
}
