//! Player identification and per-player data.
//!
//! ## PlayerId
//!
//! The game is strictly two-player: `PlayerId::ONE` and `PlayerId::TWO`.
//!
//! ## PlayerMap
//!
//! Fixed two-slot storage indexed by `PlayerId`.
//!
//! ## Player
//!
//! Nexus health, mana economy and turn flags. The cards a player owns live
//! in the `ZoneManager`, not here.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// Player identifier. Index 0 is player one, index 1 is player two.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl PlayerId {
    /// The first player (acts first in round 1).
    pub const ONE: PlayerId = PlayerId(0);
    /// The second player.
    pub const TWO: PlayerId = PlayerId(1);

    /// Create a player ID. Only 0 and 1 are valid.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        assert!(id < 2, "Only two players are supported");
        Self(id)
    }

    /// Get the raw player index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// The other player.
    #[must_use]
    pub const fn opponent(self) -> Self {
        Self(1 - self.0)
    }

    /// Both players, in seat order.
    pub fn all() -> impl Iterator<Item = PlayerId> {
        [PlayerId::ONE, PlayerId::TWO].into_iter()
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0 + 1)
    }
}

/// Per-player data storage with O(1) access.
///
/// ```
/// use tarot_ccg::core::{PlayerId, PlayerMap};
///
/// let mut life: PlayerMap<i32> = PlayerMap::with_value(20);
/// life[PlayerId::TWO] -= 3;
/// assert_eq!(life[PlayerId::ONE], 20);
/// assert_eq!(life[PlayerId::TWO], 17);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerMap<T> {
    data: [T; 2],
}

impl<T> PlayerMap<T> {
    /// Create a map with values from a factory function.
    pub fn new(factory: impl Fn(PlayerId) -> T) -> Self {
        Self {
            data: [factory(PlayerId::ONE), factory(PlayerId::TWO)],
        }
    }

    /// Create a map with both entries set to the same value.
    pub fn with_value(value: T) -> Self
    where
        T: Clone,
    {
        Self::new(|_| value.clone())
    }

    /// Create a map with default values.
    pub fn with_default() -> Self
    where
        T: Default,
    {
        Self::new(|_| T::default())
    }

    /// Get a reference to a player's data.
    #[must_use]
    pub fn get(&self, player: PlayerId) -> &T {
        &self.data[player.index()]
    }

    /// Get a mutable reference to a player's data.
    pub fn get_mut(&mut self, player: PlayerId) -> &mut T {
        &mut self.data[player.index()]
    }

    /// Iterate over (PlayerId, &T) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, &T)> {
        self.data
            .iter()
            .enumerate()
            .map(|(i, v)| (PlayerId(i as u8), v))
    }

    /// Iterate over (PlayerId, &mut T) pairs.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (PlayerId, &mut T)> {
        self.data
            .iter_mut()
            .enumerate()
            .map(|(i, v)| (PlayerId(i as u8), v))
    }
}

impl<T> Index<PlayerId> for PlayerMap<T> {
    type Output = T;

    fn index(&self, player: PlayerId) -> &Self::Output {
        self.get(player)
    }
}

impl<T> IndexMut<PlayerId> for PlayerMap<T> {
    fn index_mut(&mut self, player: PlayerId) -> &mut Self::Output {
        self.get_mut(player)
    }
}

/// Per-player economy and turn flags.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,

    /// Nexus health. The player loses at or below zero.
    pub health: i32,

    /// Mana available this round.
    pub mana: u32,

    /// Mana refilled at upkeep. Grows by one per round up to the cap.
    pub max_mana: u32,

    /// Unused mana banked from previous rounds.
    pub spell_mana: u32,

    /// Only the holder may start an attack.
    pub has_attack_token: bool,

    /// Set once the player has taken their mulligan.
    pub mulligan_done: bool,

    /// Set when the player had to draw from an empty deck.
    pub decked_out: bool,
}

impl Player {
    /// Create a player with full nexus health and no mana.
    #[must_use]
    pub fn new(id: PlayerId, health: i32) -> Self {
        Self {
            id,
            health,
            mana: 0,
            max_mana: 0,
            spell_mana: 0,
            has_attack_token: false,
            mulligan_done: false,
            decked_out: false,
        }
    }

    /// Mana that can pay for a card right now.
    #[must_use]
    pub fn available_mana(&self) -> u32 {
        self.mana + self.spell_mana
    }

    /// True once nexus health has dropped to zero or below.
    #[must_use]
    pub fn is_defeated(&self) -> bool {
        self.health <= 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_id_basics() {
        assert_eq!(PlayerId::ONE.index(), 0);
        assert_eq!(PlayerId::TWO.index(), 1);
        assert_eq!(PlayerId::ONE.opponent(), PlayerId::TWO);
        assert_eq!(PlayerId::TWO.opponent(), PlayerId::ONE);
        assert_eq!(format!("{}", PlayerId::ONE), "Player 1");
    }

    #[test]
    fn test_player_id_all() {
        let players: Vec<_> = PlayerId::all().collect();
        assert_eq!(players, vec![PlayerId::ONE, PlayerId::TWO]);
    }

    #[test]
    #[should_panic(expected = "Only two players")]
    fn test_player_id_out_of_range() {
        let _ = PlayerId::new(2);
    }

    #[test]
    fn test_player_map_new() {
        let map: PlayerMap<usize> = PlayerMap::new(|p| p.index() * 10);
        assert_eq!(map[PlayerId::ONE], 0);
        assert_eq!(map[PlayerId::TWO], 10);
    }

    #[test]
    fn test_player_map_iter_mut() {
        let mut map: PlayerMap<i32> = PlayerMap::with_default();
        for (player, value) in map.iter_mut() {
            *value = player.index() as i32 + 1;
        }
        let pairs: Vec<_> = map.iter().collect();
        assert_eq!(pairs, vec![(PlayerId::ONE, &1), (PlayerId::TWO, &2)]);
    }

    #[test]
    fn test_player_map_serialization() {
        let map: PlayerMap<i32> = PlayerMap::new(|p| p.index() as i32 + 1);
        let json = serde_json::to_string(&map).unwrap();
        let deserialized: PlayerMap<i32> = serde_json::from_str(&json).unwrap();
        assert_eq!(map, deserialized);
    }

    #[test]
    fn test_player_mana() {
        let mut player = Player::new(PlayerId::ONE, 20);
        player.mana = 3;
        player.spell_mana = 2;
        assert_eq!(player.available_mana(), 5);
        assert!(!player.is_defeated());

        player.health = 0;
        assert!(player.is_defeated());
    }
}
