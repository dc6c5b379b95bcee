//! Material component

use crate::ecs::{Component, ComponentType};
use crate::foundation::math::Vec4;
use crate::render::{GraphicsState, MaterialInfo};

/// Shader family a material is rendered with
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ShaderType {
    /// Physically based lighting
    #[default]
    Pbr,
    /// Flat color / texture, no lighting
    Unlit,
    /// Application-supplied shader
    Custom,
}

/// ECS Material component
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MaterialComponent {
    /// Shader family
    pub shader_type: ShaderType,

    /// Base color
    pub albedo: Vec4,
    /// Fragments with alpha below this are discarded
    pub alpha_cutoff: f32,
    /// Render back faces too
    pub double_sided: bool,
    /// Draw a selection outline around this material's meshes
    pub outline: bool,

    /// Albedo texture slot
    pub albedo_map: u32,
    /// Normal texture slot
    pub normal_map: u32,
    /// Emissive texture slot
    pub emissive_map: u32,

    /// Shader identifier
    pub shader: u32,
    /// Shader variant identifier
    pub shader_variant: u32,
    /// Render state bits
    pub graphics_state: GraphicsState,
    /// Renderer bind group handle for material data
    pub bind_group_1: u64,
    /// Texture feature bits passed to the shader
    pub shader_texture_flags: u64,

    /// Offset into the renderer's material buffer
    pub buffer_offset: u32,
}

impl Component for MaterialComponent {
    const TYPE: ComponentType = ComponentType::Material;
}

impl MaterialComponent {
    /// Opaque white PBR material with a 0.1 alpha cutoff
    pub fn new() -> Self {
        Self {
            albedo: Vec4::new(1.0, 1.0, 1.0, 1.0),
            alpha_cutoff: 0.1,
            graphics_state: GraphicsState::DEPTH_TEST | GraphicsState::DEPTH_WRITE,
            ..Default::default()
        }
    }

    /// GPU record for this material
    pub fn info(&self) -> MaterialInfo {
        MaterialInfo {
            albedo: self.albedo.into(),
        }
    }

    /// Recompute state bits that mirror the material's flags
    pub fn sync_graphics_state(&mut self) {
        self.graphics_state.set(GraphicsState::DOUBLE_SIDED, self.double_sided);
        self.graphics_state.set(GraphicsState::STENCIL_OUTLINE, self.outline);
        self.graphics_state.set(GraphicsState::ALPHA_TEST, self.alpha_cutoff > 0.0);
        self.graphics_state.set(GraphicsState::HAS_ALBEDO_MAP, self.albedo_map != 0);
        self.graphics_state.set(GraphicsState::HAS_NORMAL_MAP, self.normal_map != 0);
        self.graphics_state.set(GraphicsState::HAS_EMISSIVE_MAP, self.emissive_map != 0);
    }
}
