//! Entity identification for card instances.
//!
//! Every card that exists in a game (in a deck, hand, bench, lane or
//! discard) has a unique `EntityId`. Templates are identified separately
//! by `CardId`; many instances may share one template.
//!
//! IDs are allocated by `GameState::alloc_entity` in increasing order,
//! so allocation order is deterministic for a given build sequence.
//!
//! ```
//! use tarot_ccg::core::EntityId;
//!
//! let a = EntityId::new(1);
//! let b = EntityId::new(2);
//! assert!(a < b);
//! assert_eq!(format!("{}", a), "Entity(1)");
//! ```

use serde::{Deserialize, Serialize};

/// Unique identifier for a card instance.
///
/// Ordered so that collections keyed by entity iterate deterministically.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EntityId(pub u32);

impl EntityId {
    /// Create an entity ID from a raw value.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Entity({})", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_ordering() {
        let mut ids = vec![EntityId(7), EntityId(2), EntityId(5)];
        ids.sort();
        assert_eq!(ids, vec![EntityId(2), EntityId(5), EntityId(7)]);
    }

    #[test]
    fn test_entity_raw() {
        assert_eq!(EntityId::new(42).raw(), 42);
    }

    #[test]
    fn test_entity_serialization() {
        let id = EntityId(9);
        let json = serde_json::to_string(&id).unwrap();
        let back: EntityId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, back);
    }
}
