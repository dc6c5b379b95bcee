//! Entity handle with generational index
//!
//! Entities are plain 64-bit keys into component managers. They own nothing.
//!
//! Format: `[32-bit generation | 32-bit index]`. Index 0 is reserved, so the
//! all-zero handle is [`Entity::INVALID`].

use serde::{Deserialize, Serialize};
use std::fmt;

/// Entity identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(from = "u64", into = "u64")]
pub struct Entity {
    index: u32,
    generation: u32,
}

impl Entity {
    /// The reserved "no entity" handle
    pub const INVALID: Self = Self { index: 0, generation: 0 };

    pub(crate) const fn new(index: u32, generation: u32) -> Self {
        Self { index, generation }
    }

    /// Slot index of this entity
    pub const fn index(self) -> u32 {
        self.index
    }

    /// Generation of the slot when this handle was issued
    pub const fn generation(self) -> u32 {
        self.generation
    }

    /// Whether this is anything other than [`Entity::INVALID`]
    pub const fn is_valid(self) -> bool {
        self.index != 0
    }

    /// Pack into a 64-bit value
    pub const fn to_bits(self) -> u64 {
        ((self.generation as u64) << 32) | (self.index as u64)
    }

    /// Unpack from a 64-bit value
    #[allow(clippy::cast_possible_truncation)]
    pub const fn from_bits(bits: u64) -> Self {
        Self {
            index: bits as u32,
            generation: (bits >> 32) as u32,
        }
    }
}

impl From<u64> for Entity {
    fn from(bits: u64) -> Self {
        Self::from_bits(bits)
    }
}

impl From<Entity> for u64 {
    fn from(entity: Entity) -> Self {
        entity.to_bits()
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}v{}", self.index, self.generation)
    }
}

/// Issues entity handles for one component library
///
/// Indices start at 1 and only ever increase; nothing is recycled.
#[derive(Debug, Clone)]
pub struct EntityAllocator {
    next_index: u32,
}

impl EntityAllocator {
    /// Create an allocator whose first handle has index 1
    pub const fn new() -> Self {
        Self { next_index: 1 }
    }

    /// Issue the next entity handle
    ///
    /// # Panics
    /// Panics if the 32-bit index space is exhausted.
    pub fn allocate(&mut self) -> Entity {
        let index = self.next_index;
        self.next_index = index
            .checked_add(1)
            .unwrap_or_else(|| panic!("entity index space exhausted"));
        Entity::new(index, 0)
    }

    /// Number of entities issued so far
    pub const fn issued(&self) -> u32 {
        self.next_index - 1
    }
}

impl Default for EntityAllocator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_is_zero() {
        assert_eq!(Entity::INVALID.to_bits(), 0);
        assert!(!Entity::INVALID.is_valid());
        assert_eq!(Entity::default(), Entity::INVALID);
    }

    #[test]
    fn test_bits_roundtrip() {
        let entity = Entity::new(42, 7);
        assert_eq!(entity.to_bits(), (7u64 << 32) | 42);
        assert_eq!(Entity::from_bits(entity.to_bits()), entity);
    }

    #[test]
    fn test_allocator_is_monotonic_and_never_invalid() {
        let mut allocator = EntityAllocator::new();
        let mut previous = Entity::INVALID;

        for _ in 0..1000 {
            let entity = allocator.allocate();
            assert!(entity.is_valid());
            assert!(entity > previous);
            previous = entity;
        }

        assert_eq!(allocator.issued(), 1000);
    }
}
