//! Hierarchy component: parent reference
//!
//! An entity without one is a scene root.

use crate::ecs::{Component, ComponentType, Entity};

/// Parent link in the scene forest
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HierarchyComponent {
    /// Parent entity
    pub parent: Entity,
}

impl Component for HierarchyComponent {
    const TYPE: ComponentType = ComponentType::Hierarchy;
}
