//! Game state: the root aggregate every operation transforms.
//!
//! ## GameState
//!
//! - Round/turn counters, phase, active and attacking player
//! - Both players' economy (`Player`)
//! - Lane slots for the current combat step
//! - Zone manager (card locations) and card instances
//! - Deterministic RNG and the committed action history
//!
//! Rules operations never mutate a caller's state in place: they clone it,
//! apply the transition to the clone and hand the clone back on success.
//! The card table, zones and history use `im` persistent collections so
//! that clone is cheap.

use im::{OrdMap, Vector};
use serde::{Deserialize, Serialize};

use super::action::ActionRecord;
use super::config::RulesConfig;
use super::entity::EntityId;
use super::phase::Phase;
use super::player::{Player, PlayerId, PlayerMap};
use super::rng::GameRng;
use crate::cards::CardInstance;
use crate::rules::GameResult;
use crate::zones::{ZoneId, ZoneKind, ZoneManager, ZonePosition};

/// One combat lane. Empty outside the combat sequence.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Lane {
    pub attacker: Option<EntityId>,
    pub defender: Option<EntityId>,
}

impl Lane {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.attacker.is_none() && self.defender.is_none()
    }
}

/// What happened to a single draw.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DrawOutcome {
    /// The card went to hand.
    Drawn(EntityId),
    /// The hand was full; the card went to discard.
    Burned(EntityId),
    /// The deck was empty.
    Empty,
}

/// Complete game state.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    /// Round number (starts at 1, incremented at upkeep).
    pub round: u32,

    /// Turn number (starts at 1, incremented at upkeep).
    pub turn: u32,

    pub phase: Phase,

    /// The player whose round it is.
    pub active_player: PlayerId,

    /// Set from attacker declaration until combat ends.
    pub attacking_player: Option<PlayerId>,

    pub players: PlayerMap<Player>,

    pub lanes: Vec<Lane>,

    /// True once the resolver ran for the current combat step.
    pub combat_resolved: bool,

    /// Cleared by `LockPositions` effects; reset at upkeep.
    pub can_rearrange_cards: bool,

    /// Recorded once the game is decided.
    pub outcome: Option<GameResult>,

    pub zones: ZoneManager,

    /// Card instances by entity ID.
    cards: OrdMap<EntityId, CardInstance>,

    /// Deterministic RNG.
    pub rng: GameRng,

    /// Next entity ID to allocate.
    next_entity_id: u32,

    /// Committed actions in order.
    pub action_history: Vector<ActionRecord>,
}

impl GameState {
    /// Create an empty state for the given rules: full nexus health, empty
    /// zones, player one active and holding the attack token.
    #[must_use]
    pub fn new(config: &RulesConfig, seed: u64) -> Self {
        let mut players = PlayerMap::new(|id| Player::new(id, config.starting_health));
        players[PlayerId::ONE].has_attack_token = true;

        Self {
            round: 1,
            turn: 1,
            phase: Phase::Mulligan,
            active_player: PlayerId::ONE,
            attacking_player: None,
            players,
            lanes: vec![Lane::default(); config.lane_count],
            combat_resolved: false,
            can_rearrange_cards: true,
            outcome: None,
            zones: ZoneManager::new(),
            cards: OrdMap::new(),
            rng: GameRng::new(seed),
            next_entity_id: 0,
            action_history: Vector::new(),
        }
    }

    #[must_use]
    pub fn player(&self, id: PlayerId) -> &Player {
        &self.players[id]
    }

    pub fn player_mut(&mut self, id: PlayerId) -> &mut Player {
        &mut self.players[id]
    }

    /// The player defending this combat, or the inactive player outside it.
    #[must_use]
    pub fn defending_player(&self) -> PlayerId {
        self.attacking_player
            .unwrap_or(self.active_player)
            .opponent()
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.outcome.is_some()
    }

    // === Entity Management ===

    /// Allocate a new entity ID.
    pub fn alloc_entity(&mut self) -> EntityId {
        let id = EntityId(self.next_entity_id);
        self.next_entity_id += 1;
        id
    }

    /// Track a card instance in a zone.
    pub fn add_card(&mut self, card: CardInstance, zone: ZoneId) {
        self.zones
            .add_to_zone(card.entity_id, zone, ZonePosition::Back);
        self.cards.insert(card.entity_id, card);
    }

    #[must_use]
    pub fn get_card(&self, entity_id: EntityId) -> Option<&CardInstance> {
        self.cards.get(&entity_id)
    }

    pub fn get_card_mut(&mut self, entity_id: EntityId) -> Option<&mut CardInstance> {
        self.cards.get_mut(&entity_id)
    }

    /// All card instances in entity order.
    pub fn cards(&self) -> impl Iterator<Item = &CardInstance> {
        self.cards.values()
    }

    /// Move a card and keep its lane position in step with the zone.
    pub fn move_card(&mut self, entity: EntityId, zone: ZoneId, position: ZonePosition) {
        self.zones.move_to_zone(entity, zone, position);
        if let Some(card) = self.cards.get_mut(&entity) {
            card.position = match zone.kind {
                ZoneKind::Lane(lane) => Some(lane),
                _ => None,
            };
        }
    }

    // === Zones ===

    #[must_use]
    pub fn hand(&self, player: PlayerId) -> Vec<EntityId> {
        self.zones.cards_in_zone(ZoneId::hand(player))
    }

    #[must_use]
    pub fn deck(&self, player: PlayerId) -> Vec<EntityId> {
        self.zones.cards_in_zone(ZoneId::deck(player))
    }

    #[must_use]
    pub fn bench(&self, player: PlayerId) -> Vec<EntityId> {
        self.zones.cards_in_zone(ZoneId::bench(player))
    }

    #[must_use]
    pub fn discard(&self, player: PlayerId) -> Vec<EntityId> {
        self.zones.cards_in_zone(ZoneId::discard(player))
    }

    #[must_use]
    pub fn hand_size(&self, player: PlayerId) -> usize {
        self.zones.zone_size(ZoneId::hand(player))
    }

    #[must_use]
    pub fn deck_size(&self, player: PlayerId) -> usize {
        self.zones.zone_size(ZoneId::deck(player))
    }

    #[must_use]
    pub fn bench_size(&self, player: PlayerId) -> usize {
        self.zones.zone_size(ZoneId::bench(player))
    }

    /// Units a player has on the bench or in a lane, bench first.
    #[must_use]
    pub fn units_in_play(&self, player: PlayerId) -> Vec<EntityId> {
        let mut units = self.bench(player);
        units.extend(self.lane_units(player));
        units
    }

    /// A player's units currently placed in lanes, in lane order.
    #[must_use]
    pub fn lane_units(&self, player: PlayerId) -> Vec<EntityId> {
        (0..self.lanes.len())
            .filter_map(|lane| self.zones.front(ZoneId::lane(player, lane as u8)))
            .collect()
    }

    #[must_use]
    pub fn is_in_hand(&self, entity: EntityId, player: PlayerId) -> bool {
        self.zones.is_in_zone(entity, ZoneId::hand(player))
    }

    #[must_use]
    pub fn is_on_bench(&self, entity: EntityId, player: PlayerId) -> bool {
        self.zones.is_in_zone(entity, ZoneId::bench(player))
    }

    /// Draw the front card of a player's deck.
    ///
    /// A draw into a full hand burns the card to discard. Drawing from an
    /// empty deck marks the player as decked out.
    pub fn draw_card(&mut self, player: PlayerId, max_hand_size: usize) -> DrawOutcome {
        let Some(card) = self.zones.front(ZoneId::deck(player)) else {
            self.players[player].decked_out = true;
            return DrawOutcome::Empty;
        };

        if self.hand_size(player) >= max_hand_size {
            self.move_card(card, ZoneId::discard(player), ZonePosition::Back);
            DrawOutcome::Burned(card)
        } else {
            self.move_card(card, ZoneId::hand(player), ZonePosition::Back);
            DrawOutcome::Drawn(card)
        }
    }

    /// Shuffle a player's deck.
    pub fn shuffle_deck(&mut self, player: PlayerId) {
        self.zones.shuffle_zone(ZoneId::deck(player), &mut self.rng);
    }

    // === Lanes ===

    /// Put a unit into a lane slot. The slot belongs to the unit's owner,
    /// so the caller decides whether it is the attacker or defender side.
    pub fn place_in_lane(&mut self, entity: EntityId, lane: usize, attacker: bool) {
        let Some(owner) = self.get_card(entity).map(|c| c.owner) else {
            return;
        };
        self.move_card(entity, ZoneId::lane(owner, lane as u8), ZonePosition::Back);
        let slot = &mut self.lanes[lane];
        if attacker {
            slot.attacker = Some(entity);
        } else {
            slot.defender = Some(entity);
        }
    }

    /// Clear every lane and send surviving combatants back to their bench.
    pub fn return_lanes_to_bench(&mut self) {
        let lanes = std::mem::take(&mut self.lanes);
        for lane in &lanes {
            for entity in [lane.attacker, lane.defender].into_iter().flatten() {
                // Dead combatants were already swept to discard.
                if let Some(zone) = self.zones.get_zone(entity) {
                    if matches!(zone.kind, ZoneKind::Lane(_)) {
                        self.move_card(entity, ZoneId::bench(zone.owner), ZonePosition::Back);
                    }
                }
            }
        }
        self.lanes = vec![Lane::default(); lanes.len()];
    }

    /// Lane index holding this unit as attacker or defender.
    #[must_use]
    pub fn lane_of(&self, entity: EntityId) -> Option<usize> {
        self.lanes
            .iter()
            .position(|l| l.attacker == Some(entity) || l.defender == Some(entity))
    }

    // === History ===

    /// Append a committed action to the history.
    pub fn record_action(&mut self, player: PlayerId, action: crate::core::Action) {
        let sequence = self.action_history.len() as u32;
        self.action_history
            .push_back(ActionRecord::new(player, action, self.round, sequence));
    }

    // === Fingerprint ===

    /// Serialized form of the whole state, for determinism checks.
    pub fn snapshot_bytes(&self) -> bincode::Result<Vec<u8>> {
        bincode::serialize(self)
    }

    /// Compact hash of `snapshot_bytes`.
    pub fn fingerprint(&self) -> bincode::Result<u64> {
        use std::hash::Hasher;

        let bytes = self.snapshot_bytes()?;
        let mut hasher = rustc_hash::FxHasher::default();
        hasher.write(&bytes);
        Ok(hasher.finish())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{CardDefinition, CardId};

    fn state_with_deck(cards: u32) -> GameState {
        let config = RulesConfig::default();
        let mut state = GameState::new(&config, 42);
        let def = CardDefinition::unit(CardId::new(1), "Page of Cups", 1, 1, 1);
        for _ in 0..cards {
            let id = state.alloc_entity();
            state.add_card(
                CardInstance::from_definition(id, &def, PlayerId::ONE),
                ZoneId::deck(PlayerId::ONE),
            );
        }
        state
    }

    #[test]
    fn test_new_state() {
        let state = GameState::new(&RulesConfig::default(), 7);
        assert_eq!(state.round, 1);
        assert_eq!(state.phase, Phase::Mulligan);
        assert_eq!(state.lanes.len(), 7);
        assert!(state.player(PlayerId::ONE).has_attack_token);
        assert!(!state.player(PlayerId::TWO).has_attack_token);
        assert_eq!(state.player(PlayerId::TWO).health, 20);
    }

    #[test]
    fn test_alloc_entity() {
        let mut state = GameState::new(&RulesConfig::default(), 7);
        assert_eq!(state.alloc_entity(), EntityId(0));
        assert_eq!(state.alloc_entity(), EntityId(1));
    }

    #[test]
    fn test_draw_card() {
        let mut state = state_with_deck(2);

        assert_eq!(state.draw_card(PlayerId::ONE, 10), DrawOutcome::Drawn(EntityId(0)));
        assert_eq!(state.hand(PlayerId::ONE), vec![EntityId(0)]);
        assert_eq!(state.deck_size(PlayerId::ONE), 1);
    }

    #[test]
    fn test_draw_into_full_hand_burns() {
        let mut state = state_with_deck(2);
        state.draw_card(PlayerId::ONE, 1);

        assert_eq!(state.draw_card(PlayerId::ONE, 1), DrawOutcome::Burned(EntityId(1)));
        assert_eq!(state.hand_size(PlayerId::ONE), 1);
        assert_eq!(state.discard(PlayerId::ONE), vec![EntityId(1)]);
    }

    #[test]
    fn test_draw_from_empty_deck() {
        let mut state = state_with_deck(0);
        assert_eq!(state.draw_card(PlayerId::ONE, 10), DrawOutcome::Empty);
        assert!(state.player(PlayerId::ONE).decked_out);
    }

    #[test]
    fn test_lanes_round_trip() {
        let mut state = state_with_deck(1);
        state.move_card(EntityId(0), ZoneId::bench(PlayerId::ONE), ZonePosition::Back);

        state.place_in_lane(EntityId(0), 2, true);
        assert_eq!(state.lanes[2].attacker, Some(EntityId(0)));
        assert_eq!(state.get_card(EntityId(0)).unwrap().position, Some(2));
        assert_eq!(state.lane_of(EntityId(0)), Some(2));
        assert_eq!(state.units_in_play(PlayerId::ONE), vec![EntityId(0)]);

        state.return_lanes_to_bench();
        assert!(state.lanes.iter().all(Lane::is_empty));
        assert!(state.is_on_bench(EntityId(0), PlayerId::ONE));
        assert_eq!(state.get_card(EntityId(0)).unwrap().position, None);
    }

    #[test]
    fn test_clone_is_independent() {
        let mut state = state_with_deck(3);
        let snapshot = state.clone();

        state.draw_card(PlayerId::ONE, 10);
        assert_ne!(state, snapshot);
        assert_eq!(snapshot.deck_size(PlayerId::ONE), 3);
    }

    #[test]
    fn test_fingerprint_is_stable() {
        let a = state_with_deck(5);
        let b = state_with_deck(5);
        assert_eq!(a.fingerprint().unwrap(), b.fingerprint().unwrap());

        let mut c = state_with_deck(5);
        c.draw_card(PlayerId::ONE, 10);
        assert_ne!(a.fingerprint().unwrap(), c.fingerprint().unwrap());
    }
}
