//! Headless graphics device
//!
//! Keeps buffers in memory, validates every handle it is given and records
//! the calls of the current frame so its structure can be inspected after
//! the fact. A zero-sized viewport makes the device report "not ready" until
//! it is resized again.

use slotmap::SlotMap;

use super::{
    BufferHandle, Draw, DrawArea, DrawCommand, DrawList, DrawList3d, GlobalInfo, GraphicsDevice, PipelineFlags,
    RenderError, RenderResult,
};
use crate::foundation::math::Mat4;

/// What a device buffer holds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BufferKind {
    /// Interleaved vertex data
    Vertex,
    /// `u32` triangle indices
    Index,
}

/// Buffer stored by the headless device
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceBuffer {
    /// Debug name
    pub name: String,
    /// Contents
    pub kind: BufferKind,
    /// Bytes per element
    pub stride: u32,
    /// Raw contents
    pub data: Vec<u8>,
}

impl DeviceBuffer {
    /// Number of whole elements in the buffer
    pub fn element_count(&self) -> u32 {
        if self.stride == 0 {
            return 0;
        }
        u32::try_from(self.data.len() / self.stride as usize).unwrap_or(u32::MAX)
    }
}

/// One recorded device call
#[derive(Debug, Clone, PartialEq)]
pub enum DeviceCall {
    /// `begin_frame`, with whether the frame went ahead
    BeginFrame {
        /// Whether the device reported ready
        ready: bool,
    },
    /// `end_frame`
    EndFrame,
    /// `abort_frame` on an open frame
    AbortFrame,
    /// `begin_recording`
    BeginRecording,
    /// `end_recording`
    EndRecording,
    /// `resize`
    Resize {
        /// New width
        width: f32,
        /// New height
        height: f32,
    },
    /// `create_vertex_buffer` or `create_index_buffer`
    CreateBuffer {
        /// Buffer kind
        kind: BufferKind,
        /// Debug name
        name: String,
    },
    /// `set_global_info`
    SetGlobalInfo,
    /// `register_drawlist`
    RegisterDrawList,
    /// `register_3d_drawlist`
    Register3dDrawList,
    /// `submit_3d_drawlist`
    Submit3dDrawList {
        /// Line count at submission
        lines: usize,
        /// Triangle count at submission
        triangles: usize,
        /// Model-view-projection used
        mvp: Mat4,
        /// Pipeline state used
        flags: PipelineFlags,
    },
    /// `draw_areas`
    DrawAreas {
        /// Number of areas
        areas: usize,
        /// Number of static draws
        draws: usize,
    },
    /// `draw_lists`, with the commands of every list in order
    DrawLists {
        /// Concatenated commands
        commands: Vec<DrawCommand>,
    },
    /// `cleanup`
    Cleanup,
}

/// In-memory [`GraphicsDevice`]
#[derive(Debug, Default)]
pub struct HeadlessDevice {
    buffers: SlotMap<BufferHandle, DeviceBuffer>,
    calls: Vec<DeviceCall>,
    keep_history: bool,
    global_info: GlobalInfo,
    not_ready_frames: u32,
    frame_open: bool,
    recording: bool,
    frames_rendered: u64,
    submissions: u64,
    width: f32,
    height: f32,
}

impl HeadlessDevice {
    /// Create a device with a viewport of the given size
    pub fn new(width: f32, height: f32) -> Self {
        log::info!("Created headless graphics device ({}x{})", width, height);
        Self {
            width,
            height,
            ..Default::default()
        }
    }

    /// Report "not ready" from the next `count` calls to `begin_frame`
    pub fn skip_next_frames(&mut self, count: u32) {
        self.not_ready_frames = count;
    }

    /// Calls since the start of the last `begin_frame`
    ///
    /// Earlier frames are dropped unless [`HeadlessDevice::keep_history`] is
    /// on. Calls made before the first frame stay until it begins.
    pub fn calls(&self) -> &[DeviceCall] {
        &self.calls
    }

    /// Keep calls of every frame instead of only the current one
    pub fn keep_history(&mut self, keep: bool) {
        self.keep_history = keep;
    }

    /// Forget recorded calls
    pub fn clear_calls(&mut self) {
        self.calls.clear();
    }

    /// Look up a live buffer
    pub fn buffer(&self, handle: BufferHandle) -> Option<&DeviceBuffer> {
        self.buffers.get(handle)
    }

    /// Number of live buffers
    pub fn buffer_count(&self) -> usize {
        self.buffers.len()
    }

    /// Frames that reached `end_frame`
    pub const fn frames_rendered(&self) -> u64 {
        self.frames_rendered
    }

    /// Draw submissions (3D lists, areas and 2D lists) so far
    pub const fn submissions(&self) -> u64 {
        self.submissions
    }

    /// Current viewport size
    pub const fn viewport(&self) -> (f32, f32) {
        (self.width, self.height)
    }

    /// Whether the viewport has no area (a minimized window)
    pub fn is_minimized(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// Scene constants from the last `set_global_info`
    pub const fn global_info(&self) -> &GlobalInfo {
        &self.global_info
    }

    fn require_recording(&self, operation: &str) -> RenderResult<()> {
        if self.recording {
            Ok(())
        } else {
            Err(RenderError::RenderingFailed(format!("{operation} called outside of recording")))
        }
    }

    fn create_buffer(&mut self, kind: BufferKind, data: Vec<u8>, stride: u32, name: &str) -> RenderResult<BufferHandle> {
        if data.is_empty() {
            return Err(RenderError::ResourceCreationFailed(format!("buffer '{name}' is empty")));
        }
        if stride == 0 || data.len() % stride as usize != 0 {
            return Err(RenderError::ResourceCreationFailed(format!(
                "buffer '{name}' size {} is not a multiple of stride {stride}",
                data.len()
            )));
        }

        let handle = self.buffers.insert(DeviceBuffer {
            name: name.to_owned(),
            kind,
            stride,
            data,
        });
        self.calls.push(DeviceCall::CreateBuffer {
            kind,
            name: name.to_owned(),
        });
        log::debug!("Created {:?} buffer '{}'", kind, name);
        Ok(handle)
    }

    fn validate_draw(&self, draw: &Draw) -> RenderResult<()> {
        let handles = [
            (draw.mesh.vertex_buffer, BufferKind::Vertex, draw.mesh.vertex_count),
            (draw.mesh.index_buffer, BufferKind::Index, draw.mesh.index_count),
        ];

        for (handle, kind, count) in handles {
            let buffer = handle
                .and_then(|handle| self.buffers.get(handle))
                .ok_or_else(|| RenderError::RenderingFailed(format!("draw references a missing {kind:?} buffer")))?;
            if buffer.kind != kind {
                return Err(RenderError::RenderingFailed(format!(
                    "buffer '{}' bound as {kind:?}",
                    buffer.name
                )));
            }
            if count > buffer.element_count() {
                return Err(RenderError::RenderingFailed(format!(
                    "draw reads {count} elements from '{}' which holds {}",
                    buffer.name,
                    buffer.element_count()
                )));
            }
        }
        Ok(())
    }
}

impl GraphicsDevice for HeadlessDevice {
    fn begin_frame(&mut self) -> RenderResult<bool> {
        if self.frame_open {
            return Err(RenderError::RenderingFailed("begin_frame called twice".to_owned()));
        }

        if !self.keep_history {
            self.calls.clear();
        }

        let ready = if self.not_ready_frames > 0 {
            self.not_ready_frames -= 1;
            false
        } else {
            !self.is_minimized()
        };

        self.frame_open = ready;
        self.calls.push(DeviceCall::BeginFrame { ready });
        Ok(ready)
    }

    fn end_frame(&mut self) -> RenderResult<()> {
        if !self.frame_open || self.recording {
            return Err(RenderError::RenderingFailed("end_frame without an open frame".to_owned()));
        }
        self.frame_open = false;
        self.frames_rendered += 1;
        self.calls.push(DeviceCall::EndFrame);
        Ok(())
    }

    fn abort_frame(&mut self) {
        if !self.frame_open {
            return;
        }
        self.frame_open = false;
        self.recording = false;
        self.calls.push(DeviceCall::AbortFrame);
        log::warn!("Aborted frame {}", self.frames_rendered + 1);
    }

    fn begin_recording(&mut self) -> RenderResult<()> {
        if !self.frame_open || self.recording {
            return Err(RenderError::RenderingFailed("begin_recording without an open frame".to_owned()));
        }
        self.recording = true;
        self.calls.push(DeviceCall::BeginRecording);
        Ok(())
    }

    fn end_recording(&mut self) -> RenderResult<()> {
        self.require_recording("end_recording")?;
        self.recording = false;
        self.calls.push(DeviceCall::EndRecording);
        Ok(())
    }

    fn resize(&mut self, width: f32, height: f32) -> RenderResult<()> {
        if width.is_nan() || height.is_nan() || width < 0.0 || height < 0.0 {
            return Err(RenderError::BackendError(format!("invalid viewport {width}x{height}")));
        }
        self.width = width;
        self.height = height;
        self.calls.push(DeviceCall::Resize { width, height });
        if self.is_minimized() {
            log::debug!("Headless device minimized, frames will be skipped");
        } else {
            log::debug!("Resized headless device to {}x{}", width, height);
        }
        Ok(())
    }

    fn create_vertex_buffer(&mut self, data: &[u8], stride: u32, name: &str) -> RenderResult<BufferHandle> {
        self.create_buffer(BufferKind::Vertex, data.to_vec(), stride, name)
    }

    fn create_index_buffer(&mut self, indices: &[u32], name: &str) -> RenderResult<BufferHandle> {
        let stride = std::mem::size_of::<u32>() as u32;
        self.create_buffer(BufferKind::Index, bytemuck::cast_slice(indices).to_vec(), stride, name)
    }

    fn set_global_info(&mut self, info: &GlobalInfo) -> RenderResult<()> {
        self.require_recording("set_global_info")?;
        self.global_info = *info;
        self.calls.push(DeviceCall::SetGlobalInfo);
        Ok(())
    }

    fn register_drawlist(&mut self, _list: &mut DrawList) -> RenderResult<()> {
        self.calls.push(DeviceCall::RegisterDrawList);
        Ok(())
    }

    fn register_3d_drawlist(&mut self, list: &mut DrawList3d) -> RenderResult<()> {
        list.clear();
        self.calls.push(DeviceCall::Register3dDrawList);
        Ok(())
    }

    fn submit_3d_drawlist(
        &mut self,
        list: &mut DrawList3d,
        width: f32,
        height: f32,
        mvp: &Mat4,
        flags: PipelineFlags,
    ) -> RenderResult<()> {
        self.require_recording("submit_3d_drawlist")?;
        if width <= 0.0 || height <= 0.0 {
            return Err(RenderError::RenderingFailed(format!("invalid target {width}x{height}")));
        }

        self.calls.push(DeviceCall::Submit3dDrawList {
            lines: list.lines.len(),
            triangles: list.triangles.len(),
            mvp: *mvp,
            flags,
        });
        self.submissions += 1;
        list.clear();
        Ok(())
    }

    fn draw_areas(&mut self, areas: &[DrawArea], draws: &[Draw]) -> RenderResult<()> {
        self.require_recording("draw_areas")?;

        for area in areas {
            let start = area.draw_offset as usize;
            let end = start + area.draw_count as usize;
            let range = draws.get(start..end).ok_or_else(|| {
                RenderError::RenderingFailed(format!("area {start}..{end} exceeds {} draws", draws.len()))
            })?;
            for draw in range {
                self.validate_draw(draw)?;
            }
        }

        self.calls.push(DeviceCall::DrawAreas {
            areas: areas.len(),
            draws: draws.len(),
        });
        self.submissions += 1;
        Ok(())
    }

    fn draw_lists(&mut self, lists: &[&DrawList]) -> RenderResult<()> {
        self.require_recording("draw_lists")?;

        let commands = lists.iter().flat_map(|list| list.commands().iter().copied()).collect();
        self.calls.push(DeviceCall::DrawLists { commands });
        self.submissions += 1;
        Ok(())
    }

    fn cleanup(&mut self) {
        let released = self.buffers.len();
        self.buffers.clear();
        self.frame_open = false;
        self.recording = false;
        self.calls.push(DeviceCall::Cleanup);
        log::info!("Headless device released {} buffers", released);
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn std::any::Any {
        self
    }
}
