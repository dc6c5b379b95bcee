//! ECS Components module
//!
//! One file per component kind stored by the component library.

pub mod camera;
pub mod hierarchy;
pub mod material;
pub mod mesh;
pub mod object;
pub mod tag;
pub mod transform;

pub use camera::{CameraComponent, PITCH_LIMIT};
pub use hierarchy::HierarchyComponent;
pub use material::{MaterialComponent, ShaderType};
pub use mesh::{MeshBuffers, MeshComponent, MeshError, SubMesh};
pub use object::ObjectComponent;
pub use tag::{TagComponent, MAX_NAME_LENGTH};
pub use transform::TransformComponent;
