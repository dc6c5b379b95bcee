//! Transform component
//!
//! Scale / rotation / translation plus the matrices derived from them. The
//! rotation is stored as an `(x, y, z, w)` quaternion vector so a zeroed
//! record is plain data; it is normalised when matrices are rebuilt.

use crate::ecs::{Component, ComponentType};
use crate::foundation::math::{compose_trs, Mat4, Quat, Vec3, Vec4};
use crate::render::ObjectInfo;

/// ECS Transform component
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransformComponent {
    /// Scale factors
    pub scale: Vec3,

    /// Rotation quaternion as `(x, y, z, w)`
    pub rotation: Vec4,

    /// Translation
    pub translation: Vec3,

    /// Local matrix built from scale / rotation / translation
    pub world: Mat4,

    /// `world` combined with every ancestor's transform
    pub final_transform: Mat4,

    /// Renderer bind group handle for per-object data
    pub bind_group_2: u64,

    /// Offset into the renderer's object buffer
    pub buffer_offset: u32,

    /// Per-object GPU record
    pub info: ObjectInfo,
}

impl Component for TransformComponent {
    const TYPE: ComponentType = ComponentType::Transform;
}

impl TransformComponent {
    /// Unit scale, identity rotation, no translation, identity matrices
    pub fn identity() -> Self {
        let identity = Mat4::identity();
        Self {
            scale: Vec3::new(1.0, 1.0, 1.0),
            rotation: Vec4::new(0.0, 0.0, 0.0, 1.0),
            translation: Vec3::zeros(),
            world: identity,
            final_transform: identity,
            info: ObjectInfo::new(&identity, 0),
            ..Default::default()
        }
    }

    /// Builder pattern: Set translation
    pub fn with_translation(mut self, translation: Vec3) -> Self {
        self.translation = translation;
        self
    }

    /// Builder pattern: Set rotation
    pub fn with_rotation(mut self, rotation: Quat) -> Self {
        self.set_rotation(rotation);
        self
    }

    /// Builder pattern: Set scale
    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    /// Store a unit quaternion into the `(x, y, z, w)` slot
    pub fn set_rotation(&mut self, rotation: Quat) {
        let q = rotation.quaternion();
        self.rotation = Vec4::new(q.i, q.j, q.k, q.w);
    }

    /// Rebuild `world` as `T * R * S` and return it
    pub fn update_world_matrix(&mut self) -> Mat4 {
        self.world = compose_trs(&self.scale, &self.rotation, &self.translation);
        self.world
    }

    /// Store the hierarchy-resolved matrix and mirror it into the GPU record
    pub fn set_final_transform(&mut self, matrix: Mat4) {
        self.final_transform = matrix;
        self.info.set_model(&matrix);
    }
}
