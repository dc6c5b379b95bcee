//! Component trait and component kinds

use std::fmt;

/// Kind tag carried by every component manager
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentType {
    /// No component
    None,
    /// Display name
    Tag,
    /// Scale / rotation / translation and cached matrices
    Transform,
    /// Submesh geometry
    Mesh,
    /// Surface description
    Material,
    /// Perspective camera
    Camera,
    /// Mesh + transform join record
    Object,
    /// Parent reference
    Hierarchy,
}

impl fmt::Display for ComponentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::None => "none",
            Self::Tag => "tag",
            Self::Transform => "transform",
            Self::Mesh => "mesh",
            Self::Material => "material",
            Self::Camera => "camera",
            Self::Object => "object",
            Self::Hierarchy => "hierarchy",
        };
        f.write_str(name)
    }
}

/// Marker trait for components
///
/// `Default` supplies the zero-initialised record a manager appends on
/// creation.
pub trait Component: Default + 'static {
    /// Kind tag of the manager that stores this component
    const TYPE: ComponentType;
}
