//! Object component: joins a mesh with a transform

use crate::ecs::{Component, ComponentType, Entity};

/// Renderable object record
///
/// Holds references only; the mesh and transform data live in their own
/// managers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ObjectComponent {
    /// Entity carrying the mesh component
    pub mesh: Entity,
    /// Entity carrying the transform component
    pub transform: Entity,
}

impl Component for ObjectComponent {
    const TYPE: ComponentType = ComponentType::Object;
}
