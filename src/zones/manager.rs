//! Zone manager for card locations and movement.
//!
//! The `ZoneManager` is the single source of truth for where a card
//! instance is. Each instance has exactly one location record, so moving a
//! card between zones can never leave a copy behind.
//!
//! Every zone keeps its cards in order. Order matters for decks (draw from
//! the front) and hands; benches and discards keep arrival order so that
//! iteration is deterministic.

use im::{OrdMap, Vector};
use serde::{Deserialize, Serialize};

use crate::core::entity::EntityId;
use crate::core::player::PlayerId;
use crate::core::rng::GameRng;

/// Kind of zone. Every player has one of each, plus one slot per lane.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ZoneKind {
    Deck,
    Hand,
    Bench,
    /// A lane slot: the owner's attacker or defender in that lane.
    Lane(u8),
    Discard,
}

/// A specific player's zone.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ZoneId {
    pub owner: PlayerId,
    pub kind: ZoneKind,
}

impl ZoneId {
    #[must_use]
    pub const fn new(owner: PlayerId, kind: ZoneKind) -> Self {
        Self { owner, kind }
    }

    #[must_use]
    pub const fn deck(owner: PlayerId) -> Self {
        Self::new(owner, ZoneKind::Deck)
    }

    #[must_use]
    pub const fn hand(owner: PlayerId) -> Self {
        Self::new(owner, ZoneKind::Hand)
    }

    #[must_use]
    pub const fn bench(owner: PlayerId) -> Self {
        Self::new(owner, ZoneKind::Bench)
    }

    #[must_use]
    pub const fn lane(owner: PlayerId, lane: u8) -> Self {
        Self::new(owner, ZoneKind::Lane(lane))
    }

    #[must_use]
    pub const fn discard(owner: PlayerId) -> Self {
        Self::new(owner, ZoneKind::Discard)
    }
}

/// Position for inserting a card into a zone.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ZonePosition {
    /// Front of the zone (top of a deck; drawn next).
    Front,
    /// Back of the zone.
    Back,
    /// Insert at a specific index, clamped to the zone length.
    Index(usize),
}

/// Manages card locations across zones.
///
/// ```
/// use tarot_ccg::core::{EntityId, PlayerId};
/// use tarot_ccg::zones::{ZoneId, ZoneManager, ZonePosition};
///
/// let mut zones = ZoneManager::new();
/// let deck = ZoneId::deck(PlayerId::ONE);
///
/// zones.add_to_zone(EntityId(10), deck, ZonePosition::Back);
/// zones.add_to_zone(EntityId(11), deck, ZonePosition::Back);
///
/// assert_eq!(zones.front(deck), Some(EntityId(10)));
/// assert_eq!(zones.zone_size(deck), 2);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneManager {
    /// Card locations: entity_id -> zone_id
    locations: OrdMap<EntityId, ZoneId>,

    /// Ordered card lists per zone.
    zone_order: OrdMap<ZoneId, Vector<EntityId>>,
}

impl ZoneManager {
    /// Create a new empty zone manager.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a new card to a zone.
    ///
    /// Panics if the entity is already tracked: an instance may only ever
    /// be in one zone.
    pub fn add_to_zone(&mut self, entity: EntityId, zone: ZoneId, position: ZonePosition) {
        if self.locations.contains_key(&entity) {
            panic!("Entity {:?} already exists in zone manager", entity);
        }

        self.locations.insert(entity, zone);
        self.insert_ordered(entity, zone, position);
    }

    /// Move a card from its current zone to another.
    ///
    /// Returns the old zone, or `None` if the card isn't tracked.
    pub fn move_to_zone(
        &mut self,
        entity: EntityId,
        new_zone: ZoneId,
        position: ZonePosition,
    ) -> Option<ZoneId> {
        let old_zone = self.locations.get(&entity).copied()?;

        if old_zone == new_zone {
            return Some(old_zone);
        }

        self.remove_ordered(entity, old_zone);
        self.locations.insert(entity, new_zone);
        self.insert_ordered(entity, new_zone, position);

        Some(old_zone)
    }

    /// Get the zone a card is in.
    #[must_use]
    pub fn get_zone(&self, entity: EntityId) -> Option<ZoneId> {
        self.locations.get(&entity).copied()
    }

    #[must_use]
    pub fn is_in_zone(&self, entity: EntityId, zone: ZoneId) -> bool {
        self.locations.get(&entity) == Some(&zone)
    }

    /// Cards in a zone, in order.
    #[must_use]
    pub fn cards_in_zone(&self, zone: ZoneId) -> Vec<EntityId> {
        self.zone_order
            .get(&zone)
            .map(|order| order.iter().copied().collect())
            .unwrap_or_default()
    }

    #[must_use]
    pub fn zone_size(&self, zone: ZoneId) -> usize {
        self.zone_order.get(&zone).map_or(0, Vector::len)
    }

    /// The card that would be drawn next.
    #[must_use]
    pub fn front(&self, zone: ZoneId) -> Option<EntityId> {
        self.zone_order.get(&zone)?.front().copied()
    }

    /// Shuffle a zone's order.
    pub fn shuffle_zone(&mut self, zone: ZoneId, rng: &mut GameRng) {
        if let Some(order) = self.zone_order.get_mut(&zone) {
            let mut cards: Vec<EntityId> = order.iter().copied().collect();
            rng.shuffle(&mut cards);
            *order = cards.into_iter().collect();
        }
    }

    #[must_use]
    pub fn total_cards(&self) -> usize {
        self.locations.len()
    }

    fn insert_ordered(&mut self, entity: EntityId, zone: ZoneId, position: ZonePosition) {
        let order = self.zone_order.entry(zone).or_default();
        match position {
            ZonePosition::Front => order.push_front(entity),
            ZonePosition::Back => order.push_back(entity),
            ZonePosition::Index(i) => {
                let idx = i.min(order.len());
                order.insert(idx, entity);
            }
        }
    }

    fn remove_ordered(&mut self, entity: EntityId, zone: ZoneId) {
        if let Some(order) = self.zone_order.get_mut(&zone) {
            order.retain(|&e| e != entity);
        }
    }
}
