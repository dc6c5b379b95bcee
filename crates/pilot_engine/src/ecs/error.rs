//! ECS error types

use super::{ComponentType, Entity};
use thiserror::Error;

/// Errors raised by component storage and scene systems
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EcsError {
    /// The entity has no component of the requested kind
    #[error("entity {entity} has no {component} component")]
    NotFound {
        /// Entity that was looked up
        entity: Entity,
        /// Kind of the manager that was searched
        component: ComponentType,
    },

    /// The entity already has a component of this kind
    #[error("entity {entity} already has a {component} component")]
    DuplicateComponent {
        /// Entity that was inserted twice
        entity: Entity,
        /// Kind of the manager that rejected it
        component: ComponentType,
    },

    /// Walking the parent chain revisited an entity
    #[error("hierarchy cycle detected at entity {entity}")]
    HierarchyCycle {
        /// Entity whose ancestry loops
        entity: Entity,
    },
}

/// Result type for ECS operations
pub type EcsResult<T> = Result<T, EcsError>;
