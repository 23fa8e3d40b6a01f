//! Card catalog.
//!
//! The engine reads templates through the `CardCatalog` trait so that any
//! content source can back it. `CardRegistry` is the in-memory
//! implementation; it validates templates on registration, so a unit it
//! hands out always has a cost, a non-negative attack and positive health.

use rustc_hash::FxHashMap;
use thiserror::Error;

use super::definition::{CardDefinition, CardId};

/// Template lookup used by the rules.
pub trait CardCatalog {
    /// Get a card template by ID.
    fn get_card(&self, id: CardId) -> Option<&CardDefinition>;
}

/// Rejected catalog content.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("{0} is already registered")]
    DuplicateId(CardId),
    #[error("unit {id} has invalid stats: attack {attack}, health {health}")]
    InvalidUnitStats { id: CardId, attack: i32, health: i32 },
    #[error("{0} is not in the catalog")]
    UnknownCard(CardId),
}

/// In-memory registry of card templates.
///
/// ## Example
///
/// ```
/// use tarot_ccg::cards::{CardCatalog, CardDefinition, CardId, CardRegistry};
///
/// let mut registry = CardRegistry::new();
/// registry
///     .register(CardDefinition::unit(CardId::new(1), "The Hermit", 2, 1, 4))
///     .unwrap();
///
/// let found = registry.get_card(CardId::new(1)).unwrap();
/// assert_eq!(found.name, "The Hermit");
/// ```
#[derive(Clone, Debug, Default)]
pub struct CardRegistry {
    cards: FxHashMap<CardId, CardDefinition>,
}

impl CardRegistry {
    /// Create a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a card template after validating it.
    pub fn register(&mut self, card: CardDefinition) -> Result<(), CatalogError> {
        if self.cards.contains_key(&card.id) {
            return Err(CatalogError::DuplicateId(card.id));
        }
        if card.is_unit() && (card.attack < 0 || card.health <= 0) {
            return Err(CatalogError::InvalidUnitStats {
                id: card.id,
                attack: card.attack,
                health: card.health,
            });
        }
        self.cards.insert(card.id, card);
        Ok(())
    }

    /// Register many templates, stopping at the first invalid one.
    pub fn register_all(
        &mut self,
        cards: impl IntoIterator<Item = CardDefinition>,
    ) -> Result<(), CatalogError> {
        cards.into_iter().try_for_each(|card| self.register(card))
    }

    /// Get a template, reporting unknown IDs as an error.
    pub fn require(&self, id: CardId) -> Result<&CardDefinition, CatalogError> {
        self.cards.get(&id).ok_or(CatalogError::UnknownCard(id))
    }

    #[must_use]
    pub fn contains(&self, id: CardId) -> bool {
        self.cards.contains_key(&id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Iterate over all templates (unordered).
    pub fn iter(&self) -> impl Iterator<Item = &CardDefinition> {
        self.cards.values()
    }

    /// Find templates matching a predicate.
    pub fn find<F>(&self, predicate: F) -> impl Iterator<Item = &CardDefinition>
    where
        F: Fn(&CardDefinition) -> bool,
    {
        self.cards.values().filter(move |c| predicate(c))
    }
}

impl CardCatalog for CardRegistry {
    fn get_card(&self, id: CardId) -> Option<&CardDefinition> {
        self.cards.get(&id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_and_get() {
        let mut registry = CardRegistry::new();
        registry
            .register(CardDefinition::unit(CardId::new(1), "The Empress", 3, 2, 5))
            .unwrap();

        assert_eq!(registry.get_card(CardId::new(1)).unwrap().name, "The Empress");
        assert!(registry.get_card(CardId::new(99)).is_none());
        assert_eq!(
            registry.require(CardId::new(99)).unwrap_err(),
            CatalogError::UnknownCard(CardId::new(99))
        );
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let mut registry = CardRegistry::new();
        registry
            .register(CardDefinition::unit(CardId::new(1), "A", 1, 1, 1))
            .unwrap();

        let err = registry
            .register(CardDefinition::unit(CardId::new(1), "B", 1, 1, 1))
            .unwrap_err();
        assert_eq!(err, CatalogError::DuplicateId(CardId::new(1)));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_unit_without_health_rejected() {
        let mut registry = CardRegistry::new();
        let err = registry
            .register(CardDefinition::unit(CardId::new(1), "Husk", 1, 2, 0))
            .unwrap_err();
        assert!(matches!(err, CatalogError::InvalidUnitStats { health: 0, .. }));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_spells_skip_stat_check() {
        let mut registry = CardRegistry::new();
        registry
            .register(CardDefinition::spell(CardId::new(5), "Judgement", 4))
            .unwrap();
        assert!(registry.contains(CardId::new(5)));
    }

    #[test]
    fn test_register_all_and_find() {
        let mut registry = CardRegistry::new();
        registry
            .register_all(vec![
                CardDefinition::unit(CardId::new(1), "Cheap", 1, 1, 1),
                CardDefinition::unit(CardId::new(2), "Expensive", 6, 5, 5),
            ])
            .unwrap();

        let cheap: Vec<_> = registry.find(|c| c.cost <= 2).collect();
        assert_eq!(cheap.len(), 1);
        assert_eq!(cheap[0].name, "Cheap");
        assert_eq!(registry.iter().count(), 2);
    }
}
