//! Dense component storage
//!
//! A [`ComponentManager`] keeps two parallel vectors, entities and components,
//! with the same length and the same order. An entity's position in one is
//! its component's position in the other, so iteration walks packed memory.
//! A side table maps entity to dense index for O(1) lookup.

use std::collections::HashMap;

use super::{Component, ComponentType, EcsError, EcsResult, Entity};

/// Typed parallel-array store for one component kind
#[derive(Debug, Clone)]
pub struct ComponentManager<T: Component> {
    entities: Vec<Entity>,
    components: Vec<T>,
    sparse: HashMap<Entity, usize>,
}

impl<T: Component> ComponentManager<T> {
    /// Create an empty manager
    pub fn new() -> Self {
        Self {
            entities: Vec::new(),
            components: Vec::new(),
            sparse: HashMap::new(),
        }
    }

    /// Kind tag of the stored component
    pub const fn component_type(&self) -> ComponentType {
        T::TYPE
    }

    /// Whether the entity has a component here
    pub fn has(&self, entity: Entity) -> bool {
        self.sparse.contains_key(&entity)
    }

    /// Dense index of the entity's component
    pub fn index_of(&self, entity: Entity) -> EcsResult<usize> {
        self.sparse.get(&entity).copied().ok_or(EcsError::NotFound {
            entity,
            component: T::TYPE,
        })
    }

    /// Borrow the entity's component
    pub fn get(&self, entity: Entity) -> EcsResult<&T> {
        let index = self.index_of(entity)?;
        Ok(&self.components[index])
    }

    /// Mutably borrow the entity's component
    pub fn get_mut(&mut self, entity: Entity) -> EcsResult<&mut T> {
        let index = self.index_of(entity)?;
        Ok(&mut self.components[index])
    }

    /// Append a default component for the entity and return it
    ///
    /// Fails with [`EcsError::DuplicateComponent`] if the entity already has
    /// one; the existing record is left untouched.
    pub fn create(&mut self, entity: Entity) -> EcsResult<&mut T> {
        if self.has(entity) {
            return Err(EcsError::DuplicateComponent {
                entity,
                component: T::TYPE,
            });
        }

        let index = self.entities.len();
        self.entities.push(entity);
        self.components.push(T::default());
        self.sparse.insert(entity, index);

        log::trace!("Created {} component for entity {} at slot {}", T::TYPE, entity, index);
        Ok(&mut self.components[index])
    }

    /// Remove the entity's component and return it
    ///
    /// The last record moves into the vacated slot so storage stays packed.
    pub fn remove(&mut self, entity: Entity) -> EcsResult<T> {
        let index = self.sparse.remove(&entity).ok_or(EcsError::NotFound {
            entity,
            component: T::TYPE,
        })?;

        self.entities.swap_remove(index);
        let component = self.components.swap_remove(index);

        if let Some(&moved) = self.entities.get(index) {
            self.sparse.insert(moved, index);
        }

        Ok(component)
    }

    /// Number of stored components
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Whether the manager is empty
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Entities in dense order
    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    /// Components in dense order
    pub fn components(&self) -> &[T] {
        &self.components
    }

    /// Mutable components in dense order
    pub fn components_mut(&mut self) -> &mut [T] {
        &mut self.components
    }

    /// Iterate `(entity, component)` pairs in dense order
    pub fn iter(&self) -> impl Iterator<Item = (Entity, &T)> {
        self.entities.iter().copied().zip(self.components.iter())
    }

    /// Iterate `(entity, component)` pairs mutably in dense order
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (Entity, &mut T)> {
        self.entities.iter().copied().zip(self.components.iter_mut())
    }
}

impl<T: Component> Default for ComponentManager<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::EntityAllocator;

    #[derive(Debug, Default, Clone, PartialEq)]
    struct Counter {
        value: u32,
    }

    impl Component for Counter {
        const TYPE: ComponentType = ComponentType::Tag;
    }

    fn assert_dense(manager: &ComponentManager<Counter>) {
        assert_eq!(manager.entities().len(), manager.components().len());
        for (slot, &entity) in manager.entities().iter().enumerate() {
            assert_eq!(manager.index_of(entity).unwrap(), slot);
            assert!(std::ptr::eq(manager.get(entity).unwrap(), &manager.components()[slot]));
        }
    }

    #[test]
    fn test_create_appends_default_at_tail() {
        let mut allocator = EntityAllocator::new();
        let mut manager = ComponentManager::<Counter>::new();

        let first = allocator.allocate();
        let second = allocator.allocate();

        assert_eq!(*manager.create(first).unwrap(), Counter::default());
        manager.create(second).unwrap().value = 9;

        assert_eq!(manager.index_of(first).unwrap(), 0);
        assert_eq!(manager.index_of(second).unwrap(), 1);
        assert_eq!(manager.get(second).unwrap().value, 9);
        assert_dense(&manager);
    }

    #[test]
    fn test_duplicate_create_does_not_overwrite() {
        let mut allocator = EntityAllocator::new();
        let mut manager = ComponentManager::<Counter>::new();
        let entity = allocator.allocate();

        manager.create(entity).unwrap().value = 5;
        let result = manager.create(entity);

        assert_eq!(
            result.unwrap_err(),
            EcsError::DuplicateComponent {
                entity,
                component: ComponentType::Tag
            }
        );
        assert_eq!(manager.get(entity).unwrap().value, 5);
        assert_eq!(manager.len(), 1);
    }

    #[test]
    fn test_missing_entity_is_not_found() {
        let mut allocator = EntityAllocator::new();
        let mut manager = ComponentManager::<Counter>::new();
        let present = allocator.allocate();
        let absent = allocator.allocate();
        manager.create(present).unwrap();

        assert!(!manager.has(absent));
        assert!(matches!(manager.index_of(absent), Err(EcsError::NotFound { .. })));
        assert!(matches!(manager.get(absent), Err(EcsError::NotFound { .. })));
        assert!(matches!(manager.get_mut(absent), Err(EcsError::NotFound { .. })));
        assert!(matches!(manager.get(Entity::INVALID), Err(EcsError::NotFound { .. })));
    }

    #[test]
    fn test_remove_keeps_arrays_packed() {
        let mut allocator = EntityAllocator::new();
        let mut manager = ComponentManager::<Counter>::new();
        let entities: Vec<Entity> = (0..5).map(|_| allocator.allocate()).collect();

        for (i, &entity) in entities.iter().enumerate() {
            manager.create(entity).unwrap().value = u32::try_from(i).unwrap();
        }

        let removed = manager.remove(entities[1]).unwrap();
        assert_eq!(removed.value, 1);
        assert!(!manager.has(entities[1]));
        assert_eq!(manager.len(), 4);

        // The former tail now occupies slot 1
        assert_eq!(manager.index_of(entities[4]).unwrap(), 1);
        assert_eq!(manager.get(entities[4]).unwrap().value, 4);
        assert_dense(&manager);

        manager.remove(entities[4]).unwrap();
        manager.remove(entities[3]).unwrap();
        assert_dense(&manager);
        assert!(matches!(manager.remove(entities[3]), Err(EcsError::NotFound { .. })));
    }

    #[test]
    fn test_many_creates_stay_consistent() {
        let mut allocator = EntityAllocator::new();
        let mut manager = ComponentManager::<Counter>::new();

        for _ in 0..257 {
            manager.create(allocator.allocate()).unwrap();
        }

        assert_eq!(manager.len(), 257);
        assert_dense(&manager);
        assert_eq!(manager.iter().count(), 257);
    }
}
