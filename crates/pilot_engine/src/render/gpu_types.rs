//! Plain data records uploaded to GPU buffers
//!
//! All records are `#[repr(C)]` and padded to 16-byte multiples so they can be
//! copied into uniform/storage buffers with `bytemuck::bytes_of`.

use bytemuck::{Pod, Zeroable};

use crate::foundation::math::{Mat4, Vec3, Vec4};

/// Per-frame scene constants
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct GlobalInfo {
    /// Ambient light color
    pub ambient_color: [f32; 4],
    /// Camera world position (w unused)
    pub camera_pos: [f32; 4],
    /// Camera view matrix, column-major
    pub camera_view: [[f32; 4]; 4],
    /// Camera projection * view, column-major
    pub camera_view_proj: [[f32; 4]; 4],
    /// Seconds since start
    pub time: f32,
    _unused: [i32; 3],
}

impl GlobalInfo {
    /// Build from camera state
    pub fn new(ambient_color: Vec4, camera_pos: Vec3, view: &Mat4, view_proj: &Mat4, time: f32) -> Self {
        Self {
            ambient_color: ambient_color.into(),
            camera_pos: [camera_pos.x, camera_pos.y, camera_pos.z, 0.0],
            camera_view: (*view).into(),
            camera_view_proj: (*view_proj).into(),
            time,
            _unused: [0; 3],
        }
    }
}

/// Per-material constants
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct MaterialInfo {
    /// Base color
    pub albedo: [f32; 4],
}

/// Per-object constants
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct ObjectInfo {
    /// Model matrix, column-major
    pub model: [[f32; 4]; 4],
    /// Offset of the object's first vertex in the shared vertex storage
    pub vertex_offset: u32,
    _unused: [i32; 3],
}

impl ObjectInfo {
    /// Build from a model matrix
    pub fn new(model: &Mat4, vertex_offset: u32) -> Self {
        Self {
            model: (*model).into(),
            vertex_offset,
            _unused: [0; 3],
        }
    }

    /// Model matrix as a nalgebra matrix
    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from(self.model)
    }

    /// Replace the model matrix
    pub fn set_model(&mut self, model: &Mat4) {
        self.model = (*model).into();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_sizes_are_16_byte_multiples() {
        assert_eq!(std::mem::size_of::<GlobalInfo>(), 176);
        assert_eq!(std::mem::size_of::<MaterialInfo>(), 16);
        assert_eq!(std::mem::size_of::<ObjectInfo>(), 80);
    }

    #[test]
    fn test_object_info_matrix_roundtrip() {
        let model = Mat4::new_translation(&Vec3::new(1.0, 2.0, 3.0));
        let info = ObjectInfo::new(&model, 12);

        assert_eq!(info.model_matrix(), model);
        assert_eq!(info.model[3], [1.0, 2.0, 3.0, 1.0]);
        assert_eq!(bytemuck::bytes_of(&info).len(), 80);
    }
}
