//! System trait

use super::{ComponentLibrary, EcsResult};

/// System trait for processing the components of a library
pub trait System {
    /// Run the system once
    fn run(&mut self, library: &mut ComponentLibrary) -> EcsResult<()>;
}
