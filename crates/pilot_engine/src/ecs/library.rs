//! Component library and ECS operations
//!
//! The library owns one [`ComponentManager`] per component kind plus the
//! entity allocator. Every component is created through it. It is a plain
//! owned value: moving it (for instance across a module reload) never
//! invalidates anything, because entities are indices rather than addresses.

use super::components::{
    CameraComponent, HierarchyComponent, MaterialComponent, MeshComponent, ObjectComponent, TagComponent,
    TransformComponent,
};
use super::{ComponentManager, EcsResult, Entity, EntityAllocator};
use crate::foundation::math::Vec3;
use crate::render::GraphicsState;

/// Aggregate of every component manager for one scene
#[derive(Debug, Clone, Default)]
pub struct ComponentLibrary {
    allocator: EntityAllocator,
    tags: ComponentManager<TagComponent>,
    transforms: ComponentManager<TransformComponent>,
    meshes: ComponentManager<MeshComponent>,
    materials: ComponentManager<MaterialComponent>,
    objects: ComponentManager<ObjectComponent>,
    cameras: ComponentManager<CameraComponent>,
    hierarchies: ComponentManager<HierarchyComponent>,
}

impl ComponentLibrary {
    /// Create an empty library
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a new entity; values are never reused
    pub fn create_entity(&mut self) -> Entity {
        self.allocator.allocate()
    }

    /// Number of entities issued so far
    pub const fn entity_count(&self) -> u32 {
        self.allocator.issued()
    }

    fn create_tagged(&mut self, name: &str) -> EcsResult<Entity> {
        let entity = self.create_entity();
        self.tags.create(entity)?.set_name(name);
        Ok(entity)
    }

    /// Create a named entity with an empty mesh component
    pub fn create_mesh(&mut self, name: &str) -> EcsResult<Entity> {
        let entity = self.create_tagged(name)?;
        self.meshes.create(entity)?;
        log::debug!("Created mesh entity {} '{}'", entity, name);
        Ok(entity)
    }

    /// Create a named entity with a default material component
    pub fn create_material(&mut self, name: &str) -> EcsResult<Entity> {
        let entity = self.create_tagged(name)?;
        *self.materials.create(entity)? = MaterialComponent::new();
        log::debug!("Created material entity {} '{}'", entity, name);
        Ok(entity)
    }

    /// Create a named entity with an identity transform component
    pub fn create_transform(&mut self, name: &str) -> EcsResult<Entity> {
        let entity = self.create_tagged(name)?;
        *self.transforms.create(entity)? = TransformComponent::identity();
        log::debug!("Created transform entity {} '{}'", entity, name);
        Ok(entity)
    }

    /// Create a named renderable object
    ///
    /// The entity carries its own mesh and transform components, and its
    /// object record points at itself for both.
    pub fn create_object(&mut self, name: &str) -> EcsResult<Entity> {
        let entity = self.create_tagged(name)?;
        self.meshes.create(entity)?;
        *self.transforms.create(entity)? = TransformComponent::identity();
        *self.objects.create(entity)? = ObjectComponent {
            mesh: entity,
            transform: entity,
        };
        log::debug!("Created object entity {} '{}'", entity, name);
        Ok(entity)
    }

    /// Create a named perspective camera with up-to-date matrices
    pub fn create_camera(
        &mut self,
        name: &str,
        position: Vec3,
        fov_y: f32,
        aspect: f32,
        near: f32,
        far: f32,
    ) -> EcsResult<Entity> {
        let entity = self.create_tagged(name)?;
        self.cameras.create(entity)?.configure(position, fov_y, aspect, near, far);
        log::debug!("Created camera entity {} '{}'", entity, name);
        Ok(entity)
    }

    /// Make `parent` the parent of `entity`, replacing any previous parent
    ///
    /// Does not check for cycles.
    pub fn attach_component(&mut self, entity: Entity, parent: Entity) -> EcsResult<()> {
        if self.hierarchies.has(entity) {
            self.hierarchies.get_mut(entity)?.parent = parent;
        } else {
            self.hierarchies.create(entity)?.parent = parent;
        }
        log::trace!("Attached {} to parent {}", entity, parent);
        Ok(())
    }

    /// Detach `entity` from its parent, making it a root
    pub fn deattach_component(&mut self, entity: Entity) {
        if self.hierarchies.remove(entity).is_ok() {
            log::trace!("Detached {}", entity);
        }
    }

    /// Turn on the outline flag of the entity's material
    ///
    /// Only the outline bit of the graphics state changes.
    pub fn material_outline(&mut self, entity: Entity) -> EcsResult<()> {
        let material = self.materials.get_mut(entity)?;
        material.outline = true;
        material.graphics_state.insert(GraphicsState::STENCIL_OUTLINE);
        Ok(())
    }

    /// Display name of an entity
    pub fn name_of(&self, entity: Entity) -> EcsResult<&str> {
        self.tags.get(entity).map(TagComponent::name)
    }

    /// Parent of an entity, or `None` for a root
    pub fn parent_of(&self, entity: Entity) -> Option<Entity> {
        self.hierarchies.get(entity).ok().map(|h| h.parent)
    }

    /// Tag manager
    pub const fn tags(&self) -> &ComponentManager<TagComponent> {
        &self.tags
    }

    /// Transform manager
    pub const fn transforms(&self) -> &ComponentManager<TransformComponent> {
        &self.transforms
    }

    /// Mutable transform manager
    pub fn transforms_mut(&mut self) -> &mut ComponentManager<TransformComponent> {
        &mut self.transforms
    }

    /// Mesh manager
    pub const fn meshes(&self) -> &ComponentManager<MeshComponent> {
        &self.meshes
    }

    /// Mutable mesh manager
    pub fn meshes_mut(&mut self) -> &mut ComponentManager<MeshComponent> {
        &mut self.meshes
    }

    /// Material manager
    pub const fn materials(&self) -> &ComponentManager<MaterialComponent> {
        &self.materials
    }

    /// Mutable material manager
    pub fn materials_mut(&mut self) -> &mut ComponentManager<MaterialComponent> {
        &mut self.materials
    }

    /// Object manager
    pub const fn objects(&self) -> &ComponentManager<ObjectComponent> {
        &self.objects
    }

    /// Mutable object manager
    pub fn objects_mut(&mut self) -> &mut ComponentManager<ObjectComponent> {
        &mut self.objects
    }

    /// Camera manager
    pub const fn cameras(&self) -> &ComponentManager<CameraComponent> {
        &self.cameras
    }

    /// Mutable camera manager
    pub fn cameras_mut(&mut self) -> &mut ComponentManager<CameraComponent> {
        &mut self.cameras
    }

    /// Hierarchy manager
    pub const fn hierarchies(&self) -> &ComponentManager<HierarchyComponent> {
        &self.hierarchies
    }
}
