//! Tag component: a bounded display name

use crate::ecs::{Component, ComponentType};

/// Longest name a tag keeps, in bytes
pub const MAX_NAME_LENGTH: usize = 1024;

/// Display name attached to every entity made by the typed constructors
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagComponent {
    name: String,
}

impl Component for TagComponent {
    const TYPE: ComponentType = ComponentType::Tag;
}

impl TagComponent {
    /// Create a tag, truncating the name to [`MAX_NAME_LENGTH`] bytes
    pub fn new(name: &str) -> Self {
        let mut tag = Self::default();
        tag.set_name(name);
        tag
    }

    /// The stored name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Replace the name, truncating on a character boundary
    pub fn set_name(&mut self, name: &str) {
        let mut end = name.len().min(MAX_NAME_LENGTH);
        while !name.is_char_boundary(end) {
            end -= 1;
        }
        if end < name.len() {
            log::warn!("Tag name truncated from {} to {} bytes", name.len(), end);
        }
        self.name.clear();
        self.name.push_str(&name[..end]);
    }
}
