//! Transform propagation
//!
//! Rebuilds each transform's local matrix, then resolves the scene hierarchy
//! so that `final_transform = ancestors... * world`. An ancestor without a
//! transform component contributes identity but its own parent is still
//! followed.
//!
//! Attaching never checks for cycles, so the walk does: a parent chain longer
//! than the number of hierarchy links must revisit an entity, and the system
//! reports [`EcsError::HierarchyCycle`] instead of looping.

use crate::ecs::{ComponentLibrary, EcsError, EcsResult, Entity, System};
use crate::foundation::math::Mat4;

/// Computes world and final matrices for every transform
#[derive(Debug, Clone, Default)]
pub struct TransformSystem {
    finals: Vec<Mat4>,
}

impl TransformSystem {
    /// Create the system
    pub fn new() -> Self {
        Self::default()
    }

    fn resolve(library: &ComponentLibrary, entity: Entity, local: Mat4) -> EcsResult<Mat4> {
        let transforms = library.transforms();
        let max_depth = library.hierarchies().len();

        let mut matrix = local;
        let mut depth = 0;
        let mut current = library.parent_of(entity);

        while let Some(parent) = current {
            depth += 1;
            if depth > max_depth {
                return Err(EcsError::HierarchyCycle { entity });
            }
            if let Ok(transform) = transforms.get(parent) {
                matrix = transform.world * matrix;
            }
            current = library.parent_of(parent);
        }

        Ok(matrix)
    }
}

impl System for TransformSystem {
    fn run(&mut self, library: &mut ComponentLibrary) -> EcsResult<()> {
        for transform in library.transforms_mut().components_mut() {
            transform.update_world_matrix();
        }

        self.finals.clear();
        for (entity, transform) in library.transforms().iter() {
            self.finals.push(Self::resolve(library, entity, transform.world)?);
        }

        for (transform, matrix) in library.transforms_mut().components_mut().iter_mut().zip(&self.finals) {
            transform.set_final_transform(*matrix);
        }

        log::trace!("Propagated {} transforms", self.finals.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::{Vec3, Vec4};
    use approx::assert_relative_eq;

    fn translation_column(library: &ComponentLibrary, entity: Entity) -> Vec4 {
        library.transforms().get(entity).unwrap().final_transform.column(3).into_owned()
    }

    #[test]
    fn test_root_final_equals_world() {
        let mut library = ComponentLibrary::new();
        let root = library.create_transform("root").unwrap();
        library.transforms_mut().get_mut(root).unwrap().translation = Vec3::new(2.0, 0.0, 0.0);

        TransformSystem::new().run(&mut library).unwrap();

        let transform = library.transforms().get(root).unwrap();
        assert_eq!(transform.final_transform, transform.world);
        assert_relative_eq!(translation_column(&library, root), Vec4::new(2.0, 0.0, 0.0, 1.0));
        assert_eq!(transform.info.model_matrix(), transform.final_transform);
    }

    #[test]
    fn test_child_inherits_parent_chain() {
        let mut library = ComponentLibrary::new();
        let grandparent = library.create_transform("grandparent").unwrap();
        let parent = library.create_transform("parent").unwrap();
        let child = library.create_transform("child").unwrap();

        library.transforms_mut().get_mut(grandparent).unwrap().translation = Vec3::new(1.0, 0.0, 0.0);
        library.transforms_mut().get_mut(parent).unwrap().translation = Vec3::new(0.0, 2.0, 0.0);
        library.transforms_mut().get_mut(child).unwrap().translation = Vec3::new(0.0, 0.0, 3.0);

        // Attach out of creation order to make sure dense order doesn't matter
        library.attach_component(child, parent).unwrap();
        library.attach_component(parent, grandparent).unwrap();

        TransformSystem::new().run(&mut library).unwrap();

        assert_relative_eq!(translation_column(&library, child), Vec4::new(1.0, 2.0, 3.0, 1.0));
        assert_relative_eq!(translation_column(&library, parent), Vec4::new(1.0, 2.0, 0.0, 1.0));
    }

    #[test]
    fn test_parent_without_transform_is_skipped() {
        let mut library = ComponentLibrary::new();
        let root = library.create_transform("root").unwrap();
        let group = library.create_mesh("group without transform").unwrap();
        let leaf = library.create_transform("leaf").unwrap();

        library.transforms_mut().get_mut(root).unwrap().translation = Vec3::new(5.0, 0.0, 0.0);
        library.attach_component(leaf, group).unwrap();
        library.attach_component(group, root).unwrap();

        TransformSystem::new().run(&mut library).unwrap();

        assert_relative_eq!(translation_column(&library, leaf), Vec4::new(5.0, 0.0, 0.0, 1.0));
    }

    #[test]
    fn test_cycle_is_reported() {
        let mut library = ComponentLibrary::new();
        let a = library.create_transform("a").unwrap();
        let b = library.create_transform("b").unwrap();

        library.attach_component(a, b).unwrap();
        library.attach_component(b, a).unwrap();

        let result = TransformSystem::new().run(&mut library);
        assert!(matches!(result, Err(EcsError::HierarchyCycle { .. })));

        library.deattach_component(b);
        assert!(TransformSystem::new().run(&mut library).is_ok());
    }

    #[test]
    fn test_self_parent_is_a_cycle() {
        let mut library = ComponentLibrary::new();
        let a = library.create_transform("a").unwrap();
        library.attach_component(a, a).unwrap();

        assert_eq!(
            TransformSystem::new().run(&mut library).unwrap_err(),
            EcsError::HierarchyCycle { entity: a }
        );
    }
}
