//! Match setup.

use log::info;
use thiserror::Error;

use super::game::TarotGame;
use crate::cards::{CardCatalog, CardId, CardInstance, CatalogError};
use crate::core::{ConfigError, GameState, Phase, PlayerId, PlayerMap, RulesConfig};
use crate::services::{SynergyService, WinConditionService};
use crate::zones::ZoneId;

/// Why a match could not be set up.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SetupError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

/// Builder for a `TarotGame` and its opening state.
///
/// ```
/// use tarot_ccg::cards::{CardDefinition, CardId, CardRegistry};
/// use tarot_ccg::core::{Phase, PlayerId};
/// use tarot_ccg::games::tarot::TarotGameBuilder;
///
/// let mut registry = CardRegistry::new();
/// registry.register(CardDefinition::unit(CardId::new(1), "The Fool", 1, 1, 1)).unwrap();
///
/// let (_game, state) = TarotGameBuilder::new(registry)
///     .deck(PlayerId::ONE, vec![CardId::new(1); 10])
///     .deck(PlayerId::TWO, vec![CardId::new(1); 10])
///     .build(7)
///     .unwrap();
///
/// assert_eq!(state.phase, Phase::Mulligan);
/// assert_eq!(state.hand_size(PlayerId::ONE), 4);
/// ```
pub struct TarotGameBuilder {
    catalog: Box<dyn CardCatalog>,
    config: RulesConfig,
    decks: PlayerMap<Vec<CardId>>,
    synergy: Option<Box<dyn SynergyService>>,
    victory: Option<Box<dyn WinConditionService>>,
    shuffle: bool,
    skip_mulligan: bool,
}

impl TarotGameBuilder {
    pub fn new(catalog: impl CardCatalog + 'static) -> Self {
        Self {
            catalog: Box::new(catalog),
            config: RulesConfig::default(),
            decks: PlayerMap::with_default(),
            synergy: None,
            victory: None,
            shuffle: true,
            skip_mulligan: false,
        }
    }

    pub fn config(mut self, config: RulesConfig) -> Self {
        self.config = config;
        self
    }

    /// Deck list for one seat, top card first.
    pub fn deck(mut self, player: PlayerId, cards: Vec<CardId>) -> Self {
        self.decks[player] = cards;
        self
    }

    pub fn synergy(mut self, synergy: impl SynergyService + 'static) -> Self {
        self.synergy = Some(Box::new(synergy));
        self
    }

    pub fn win_conditions(mut self, victory: impl WinConditionService + 'static) -> Self {
        self.victory = Some(Box::new(victory));
        self
    }

    /// Keep deck lists in the given order instead of shuffling.
    pub fn keep_deck_order(mut self) -> Self {
        self.shuffle = false;
        self
    }

    /// Mark both mulligans as taken and open on the first main phase.
    pub fn skip_mulligan(mut self) -> Self {
        self.skip_mulligan = true;
        self
    }

    /// Build the game and the opening state.
    pub fn build(self, seed: u64) -> Result<(TarotGame, GameState), SetupError> {
        self.config.validate()?;

        let mut state = GameState::new(&self.config, seed);
        for (player, list) in self.decks.iter() {
            for &card_id in list {
                let definition = self
                    .catalog
                    .get_card(card_id)
                    .ok_or(CatalogError::UnknownCard(card_id))?;
                let entity = state.alloc_entity();
                let card = CardInstance::from_definition(entity, definition, player);
                state.add_card(card, ZoneId::deck(player));
            }
        }

        for player in PlayerId::all() {
            if self.shuffle {
                state.shuffle_deck(player);
            }
            for _ in 0..self.config.starting_hand_size {
                state.draw_card(player, self.config.max_hand_size);
            }
            let p = state.player_mut(player);
            p.max_mana = 1;
            p.mana = 1;
            p.mulligan_done = self.skip_mulligan;
        }
        state.phase = if self.skip_mulligan {
            Phase::Main
        } else {
            Phase::Mulligan
        };

        info!(
            "match set up: seed {}, decks {}/{}",
            seed,
            state.deck_size(PlayerId::ONE) + state.hand_size(PlayerId::ONE),
            state.deck_size(PlayerId::TWO) + state.hand_size(PlayerId::TWO),
        );

        let mut game = TarotGame::from_boxed(self.config, self.catalog);
        if let Some(synergy) = self.synergy {
            game.synergy = synergy;
        }
        if let Some(victory) = self.victory {
            game.victory = victory;
        }
        Ok((game, state))
    }
}
