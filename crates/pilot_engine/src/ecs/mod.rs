//! Entity-Component-System implementation
//!
//! Sparse entity handles, dense per-kind component storage, and the
//! component library that ties every kind together for one scene.

pub mod component;
pub mod components;
pub mod entity;
pub mod error;
pub mod library;
pub mod manager;
pub mod system;
pub mod systems;

#[cfg(test)]
mod tests;

pub use component::{Component, ComponentType};
pub use entity::{Entity, EntityAllocator};
pub use error::{EcsError, EcsResult};
pub use library::ComponentLibrary;
pub use manager::ComponentManager;
pub use system::System;
pub use systems::TransformSystem;
