//! Match driver.
//!
//! `Match` owns the current state and is the only thing that replaces it.
//! Actions from the UI and from AI seats are applied strictly in the order
//! they are submitted; each committed transition's events are published to
//! the bus after the state has been replaced.

use log::{debug, info};

use crate::ai::AiPlayer;
use crate::core::{Action, GameState, PlayerId, PlayerMap, RuleResult};
use crate::events::{EventBus, EventSubscriber, GameEvent, SubscriberId};
use crate::games::tarot::TarotGame;
use crate::rules::{GameResult, RulesEngine};

/// Upper bound on AI actions in one `run_ai` call.
pub const MAX_AI_STEPS: usize = 10_000;

/// A running match.
pub struct Match {
    game: TarotGame,
    state: GameState,
    bus: EventBus,
    seats: PlayerMap<Option<AiPlayer>>,
}

impl Match {
    /// Start a match with two human seats.
    pub fn new(game: TarotGame, state: GameState) -> Self {
        Self {
            game,
            state,
            bus: EventBus::new(),
            seats: PlayerMap::new(|_| None),
        }
    }

    /// Put an AI in its seat.
    #[must_use]
    pub fn with_ai(mut self, ai: AiPlayer) -> Self {
        let seat = ai.player();
        self.seats[seat] = Some(ai);
        self
    }

    #[must_use]
    pub fn game(&self) -> &TarotGame {
        &self.game
    }

    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    #[must_use]
    pub fn is_ai(&self, player: PlayerId) -> bool {
        self.seats[player].is_some()
    }

    #[must_use]
    pub fn outcome(&self) -> Option<GameResult> {
        self.state.outcome
    }

    pub fn subscribe(&mut self, subscriber: impl EventSubscriber + 'static) -> SubscriberId {
        self.bus.subscribe(subscriber)
    }

    pub fn bus_mut(&mut self) -> &mut EventBus {
        &mut self.bus
    }

    /// Apply an action for a player. On error nothing changes and nothing
    /// is published.
    pub fn submit(&mut self, player: PlayerId, action: Action) -> RuleResult<Vec<GameEvent>> {
        let transition = self.game.apply_action(&self.state, player, &action)?;
        self.state = transition.state;
        debug!("{} committed {}", player, action.name());

        for event in &transition.events {
            if let GameEvent::GameEnded { result } = event {
                info!("match over after round {}: {:?}", self.state.round, result);
            }
        }
        self.bus.publish(&transition.events);
        Ok(transition.events)
    }

    /// Let the first AI seat with something to do act once. Returns whether
    /// an action was committed.
    pub fn step_ai(&mut self) -> RuleResult<bool> {
        let proposal = PlayerId::all().find_map(|player| {
            let ai = self.seats[player].as_ref()?;
            ai.propose(&self.game, &self.state).map(|action| (player, action))
        });

        match proposal {
            Some((player, action)) => {
                self.submit(player, action)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Run AI seats until a human must act or the game is over. Returns
    /// the number of AI actions committed.
    pub fn run_ai(&mut self) -> RuleResult<usize> {
        let mut steps = 0;
        while steps < MAX_AI_STEPS && !self.state.is_over() && self.step_ai()? {
            steps += 1;
        }
        Ok(steps)
    }
}

impl std::fmt::Debug for Match {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Match")
            .field("round", &self.state.round)
            .field("phase", &self.state.phase)
            .field("outcome", &self.state.outcome)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::AiConfig;
    use crate::cards::{CardDefinition, CardId, CardRegistry};
    use crate::core::{Phase, RuleError};
    use crate::events::{EventKind, EventLog};
    use crate::games::tarot::TarotGameBuilder;

    fn new_match(seed: u64) -> Match {
        let mut registry = CardRegistry::new();
        registry
            .register_all([
                CardDefinition::unit(CardId::new(1), "The Lovers", 1, 2, 1),
                CardDefinition::unit(CardId::new(2), "The Hierophant", 2, 2, 3),
                CardDefinition::unit(CardId::new(3), "Justice", 4, 4, 4),
            ])
            .unwrap();
        let deck: Vec<_> = (1..=3).cycle().take(18).map(CardId::new).collect();
        let (game, state) = TarotGameBuilder::new(registry)
            .deck(PlayerId::ONE, deck.clone())
            .deck(PlayerId::TWO, deck)
            .build(seed)
            .unwrap();
        Match::new(game, state)
    }

    #[test]
    fn test_ai_waits_for_human() {
        let mut m = new_match(1).with_ai(AiPlayer::new(PlayerId::TWO, AiConfig::default()));

        assert_eq!(m.run_ai().unwrap(), 1);
        assert!(m.state().player(PlayerId::TWO).mulligan_done);
        assert_eq!(m.state().phase, Phase::Mulligan);

        m.submit(PlayerId::ONE, Action::Mulligan { discard: vec![] }).unwrap();
        assert_eq!(m.state().phase, Phase::Main);
        // Player one is active; the AI has nothing to do.
        assert_eq!(m.run_ai().unwrap(), 0);
    }

    #[test]
    fn test_rejected_submit_publishes_nothing() {
        let mut m = new_match(2);
        let log = EventLog::new();
        m.subscribe(log.clone());

        let before = m.state().clone();
        let err = m.submit(PlayerId::ONE, Action::Pass).unwrap_err();

        assert!(matches!(err, RuleError::PhaseViolation { .. }));
        assert_eq!(m.state(), &before);
        assert!(log.is_empty());
    }

    #[test]
    fn test_events_reach_subscribers() {
        let mut m = new_match(3);
        let log = EventLog::new();
        m.subscribe(log.clone());
        let mulligans = EventLog::new();
        m.bus_mut().subscribe_to(&[EventKind::MulliganTaken], mulligans.clone());

        let events = m.submit(PlayerId::ONE, Action::Mulligan { discard: vec![] }).unwrap();

        assert_eq!(log.events(), events);
        assert_eq!(mulligans.len(), 1);
    }

    #[test]
    fn test_ai_vs_ai_completes() {
        let mut m = new_match(4)
            .with_ai(AiPlayer::new(PlayerId::ONE, AiConfig::default().with_seed(1)))
            .with_ai(AiPlayer::new(PlayerId::TWO, AiConfig::default().with_seed(2)));

        let steps = m.run_ai().unwrap();

        assert!(steps > 0);
        assert!(m.outcome().is_some(), "stalled after {steps} steps: {m:?}");
        assert!(m.state().is_over());
    }
}
