//! The tarot card game: every operation as a pure state transition.

use log::{debug, info};

use crate::cards::{CardCatalog, CardType};
use crate::core::{
    Action, DefenderAssignment, Destination, EntityId, GameState, Phase, PlayerId, RuleResult,
    RulesConfig,
};
use crate::effects::{AbilityTrigger, EffectContext, EffectResolver};
use crate::events::GameEvent;
use crate::rules::combat::{enter_combat, CombatReport, CombatResolver};
use crate::rules::validator::{self, RepositionPlan};
use crate::rules::{mana, phase, GameResult, RulesEngine, Transition};
use crate::services::{NoSynergy, StandardVictory, SynergyService, WinConditionService};
use crate::zones::{ZoneId, ZonePosition};

/// The game rules with their injected collaborators.
///
/// `TarotGame` holds no per-match state; every method takes a `&GameState`
/// and returns a new one, so one game value can drive any number of
/// matches.
pub struct TarotGame {
    config: RulesConfig,
    catalog: Box<dyn CardCatalog>,
    pub(super) synergy: Box<dyn SynergyService>,
    pub(super) victory: Box<dyn WinConditionService>,
}

impl TarotGame {
    /// Create a game with no synergy bonuses and the standard win rules.
    pub fn new(config: RulesConfig, catalog: impl CardCatalog + 'static) -> Self {
        Self::from_boxed(config, Box::new(catalog))
    }

    pub(super) fn from_boxed(config: RulesConfig, catalog: Box<dyn CardCatalog>) -> Self {
        let victory = StandardVictory::from_config(&config);
        Self {
            config,
            catalog,
            synergy: Box::new(NoSynergy),
            victory: Box::new(victory),
        }
    }

    #[must_use]
    pub fn with_synergy(mut self, synergy: impl SynergyService + 'static) -> Self {
        self.synergy = Box::new(synergy);
        self
    }

    #[must_use]
    pub fn with_win_conditions(mut self, victory: impl WinConditionService + 'static) -> Self {
        self.victory = Box::new(victory);
        self
    }

    #[must_use]
    pub fn catalog(&self) -> &dyn CardCatalog {
        self.catalog.as_ref()
    }

    #[must_use]
    pub fn synergy(&self) -> &dyn SynergyService {
        self.synergy.as_ref()
    }

    fn effect_context(&self) -> EffectContext<'_> {
        EffectContext::new(self.catalog.as_ref(), &self.config)
    }

    // === Operations ===

    pub fn mulligan(
        &self,
        state: &GameState,
        player: PlayerId,
        discard: &[EntityId],
    ) -> RuleResult<Transition> {
        self.apply_action(
            state,
            player,
            &Action::Mulligan {
                discard: discard.to_vec(),
            },
        )
    }

    pub fn play_card(
        &self,
        state: &GameState,
        player: PlayerId,
        card: EntityId,
        destination: Destination,
    ) -> RuleResult<Transition> {
        self.apply_action(state, player, &Action::PlayCard { card, destination })
    }

    pub fn start_attack(&self, state: &GameState, player: PlayerId) -> RuleResult<Transition> {
        self.apply_action(state, player, &Action::StartAttack)
    }

    pub fn pass(&self, state: &GameState, player: PlayerId) -> RuleResult<Transition> {
        self.apply_action(state, player, &Action::Pass)
    }

    pub fn declare_attackers(
        &self,
        state: &GameState,
        player: PlayerId,
        attackers: &[EntityId],
    ) -> RuleResult<Transition> {
        self.apply_action(state, player, &Action::declare_attackers(attackers))
    }

    pub fn declare_defenders(
        &self,
        state: &GameState,
        player: PlayerId,
        assignments: &[DefenderAssignment],
    ) -> RuleResult<Transition> {
        self.apply_action(
            state,
            player,
            &Action::DeclareDefenders {
                assignments: assignments.to_vec(),
            },
        )
    }

    pub fn reposition(
        &self,
        state: &GameState,
        player: PlayerId,
        card: EntityId,
        lane: usize,
    ) -> RuleResult<Transition> {
        self.apply_action(state, player, &Action::Reposition { card, lane })
    }

    pub fn confirm_positions(&self, state: &GameState, player: PlayerId) -> RuleResult<Transition> {
        self.apply_action(state, player, &Action::ConfirmPositions)
    }

    pub fn commit_combat(&self, state: &GameState, player: PlayerId) -> RuleResult<Transition> {
        self.apply_action(state, player, &Action::CommitCombat)
    }

    /// Resolve combat. Calling it again once resolved returns the state
    /// unchanged with no events.
    pub fn resolve_combat(&self, state: &GameState, player: PlayerId) -> RuleResult<Transition> {
        self.apply_action(state, player, &Action::ResolveCombat)
    }

    /// Resolve combat and also return the resolver's report. The report is
    /// `None` when combat had already been resolved.
    pub fn resolve_combat_with_report(
        &self,
        state: &GameState,
        player: PlayerId,
    ) -> RuleResult<(Transition, Option<CombatReport>)> {
        self.commit(state, player, &Action::ResolveCombat)
    }

    pub fn end_combat(&self, state: &GameState, player: PlayerId) -> RuleResult<Transition> {
        self.apply_action(state, player, &Action::EndCombat)
    }

    /// Run upkeep and begin the next round.
    pub fn start_round(&self, state: &GameState, player: PlayerId) -> RuleResult<Transition> {
        self.apply_action(state, player, &Action::StartRound)
    }

    // === Transition machinery ===

    /// Validate, apply to a clone, record and poll win conditions.
    fn commit(
        &self,
        state: &GameState,
        player: PlayerId,
        action: &Action,
    ) -> RuleResult<(Transition, Option<CombatReport>)> {
        validator::validate(state, &self.config, player, action)?;

        if matches!(action, Action::ResolveCombat) && state.combat_resolved {
            return Ok((Transition::new(state.clone(), Vec::new()), None));
        }

        let mut next = state.clone();
        let mut events = Vec::new();
        let report = self.execute(&mut next, player, action, &mut events)?;

        next.record_action(player, action.clone());
        self.check_victory(&mut next, &mut events);

        debug!("{} applied {} ({} events)", player, action.name(), events.len());
        Ok((Transition::new(next, events), report))
    }

    fn execute(
        &self,
        state: &mut GameState,
        player: PlayerId,
        action: &Action,
        events: &mut Vec<GameEvent>,
    ) -> RuleResult<Option<CombatReport>> {
        match action {
            Action::Mulligan { discard } => self.execute_mulligan(state, player, discard, events),
            Action::PlayCard { card, destination } => {
                self.execute_play(state, player, *card, *destination, events)?;
            }
            Action::StartAttack => phase::set_phase(state, Phase::DeclareAttackers, events),
            Action::Pass => phase::set_phase(state, Phase::End, events),
            Action::DeclareAttackers { attackers } => {
                for (lane, &attacker) in attackers.iter().enumerate() {
                    state.place_in_lane(attacker, lane, true);
                    if let Some(card) = state.get_card_mut(attacker) {
                        enter_combat(card, true);
                    }
                }
                state.attacking_player = Some(player);
                events.push(GameEvent::AttackDeclared {
                    player,
                    attackers: attackers.to_vec(),
                });
                phase::set_phase(state, Phase::DeclareDefenders, events);
            }
            Action::DeclareDefenders { assignments } => {
                for assignment in assignments {
                    state.place_in_lane(assignment.defender, assignment.attacker_lane, false);
                    if let Some(card) = state.get_card_mut(assignment.defender) {
                        enter_combat(card, false);
                    }
                }
                events.push(GameEvent::DefendersAssigned {
                    player,
                    assignments: assignments.clone(),
                });
                phase::set_phase(state, Phase::PositionAttackers, events);
            }
            Action::Reposition { card, lane } => {
                let plan = validator::validate_reposition(state, player, *card, *lane)?;
                Self::apply_reposition(state, plan);
            }
            Action::ConfirmPositions => {
                let to = if state.phase == Phase::PositionAttackers {
                    Phase::PositionDefenders
                } else {
                    Phase::CommitCombat
                };
                phase::set_phase(state, to, events);
            }
            Action::CommitCombat => {
                state.combat_resolved = false;
                phase::set_phase(state, Phase::Combat, events);
            }
            Action::ResolveCombat => {
                let ctx = self.effect_context();
                let report = CombatResolver::resolve(state, &ctx, self.synergy.as_ref(), events);
                return Ok(Some(report));
            }
            Action::EndCombat => {
                state.attacking_player = None;
                state.combat_resolved = false;
                phase::set_phase(state, Phase::End, events);
            }
            Action::StartRound => phase::run_upkeep(state, &self.config, events),
        }
        Ok(None)
    }

    /// Draw replacements first, then shuffle the discarded cards back in.
    /// On a short deck the shortfall is drawn after the reshuffle.
    fn execute_mulligan(
        &self,
        state: &mut GameState,
        player: PlayerId,
        discard: &[EntityId],
        events: &mut Vec<GameEvent>,
    ) {
        let deck = ZoneId::deck(player);
        let hand = ZoneId::hand(player);

        let mut drawn = 0;
        while drawn < discard.len() {
            let Some(card) = state.zones.front(deck) else {
                break;
            };
            state.move_card(card, hand, ZonePosition::Back);
            events.push(GameEvent::CardDrawn { player, card });
            drawn += 1;
        }
        for &card in discard {
            state.move_card(card, deck, ZonePosition::Back);
        }
        if !discard.is_empty() {
            state.shuffle_deck(player);
        }
        for _ in drawn..discard.len() {
            let Some(card) = state.zones.front(deck) else {
                break;
            };
            state.move_card(card, hand, ZonePosition::Back);
            events.push(GameEvent::CardDrawn { player, card });
        }

        state.player_mut(player).mulligan_done = true;
        events.push(GameEvent::MulliganTaken {
            player,
            replaced: discard.len(),
        });

        if PlayerId::all().all(|p| state.player(p).mulligan_done) {
            info!("mulligans complete, round {} begins", state.round);
            phase::set_phase(state, Phase::Main, events);
            events.push(GameEvent::TurnStarted {
                player: state.active_player,
                round: state.round,
            });
        }
    }

    fn execute_play(
        &self,
        state: &mut GameState,
        player: PlayerId,
        card: EntityId,
        destination: Destination,
        events: &mut Vec<GameEvent>,
    ) -> RuleResult<()> {
        let Some((cost, card_id)) = state.get_card(card).map(|c| (c.cost, c.card_id)) else {
            return Ok(());
        };
        mana::pay(state.player_mut(player), cost)?;

        let zone = match destination {
            Destination::Bench => ZoneId::bench(player),
            Destination::Resolve => ZoneId::discard(player),
        };
        state.move_card(card, zone, ZonePosition::Back);
        events.push(GameEvent::CardPlayed {
            player,
            card,
            card_id,
        });

        let ctx = self.effect_context();
        EffectResolver::resolve_triggers(state, &ctx, card, AbilityTrigger::OnPlay, events);
        EffectResolver::settle_deaths(state, &ctx, events);
        Ok(())
    }

    fn apply_reposition(state: &mut GameState, plan: RepositionPlan) {
        if plan.from == plan.to {
            return;
        }

        state.place_in_lane(plan.card, plan.to, plan.attacker_side);
        match plan.swap_with {
            Some(other) => state.place_in_lane(other, plan.from, plan.attacker_side),
            None => {
                let origin = &mut state.lanes[plan.from];
                if plan.attacker_side {
                    origin.attacker = None;
                } else {
                    origin.defender = None;
                }
            }
        }
    }

    fn check_victory(&self, state: &mut GameState, events: &mut Vec<GameEvent>) {
        if state.outcome.is_some() {
            return;
        }
        if let Some(result) = self.victory.check_conditions(state).result() {
            info!("game over after round {}: {:?}", state.round, result);
            state.outcome = Some(result);
            events.push(GameEvent::GameEnded { result });
        }
    }

    fn candidate_actions(&self, state: &GameState, player: PlayerId) -> Vec<Action> {
        let mut candidates = Vec::new();

        match state.phase {
            Phase::Mulligan => {
                let hand = state.hand(player);
                candidates.push(Action::Mulligan { discard: Vec::new() });
                for &card in &hand {
                    candidates.push(Action::Mulligan { discard: vec![card] });
                }
                if hand.len() > 1 {
                    candidates.push(Action::Mulligan { discard: hand });
                }
            }
            Phase::Main => {
                for card in state.hand(player) {
                    let destination = match state.get_card(card).map(|c| c.card_type) {
                        Some(CardType::Spell) => Destination::Resolve,
                        _ => Destination::Bench,
                    };
                    candidates.push(Action::PlayCard { card, destination });
                }
                candidates.push(Action::StartAttack);
                candidates.push(Action::Pass);
            }
            Phase::DeclareAttackers => {
                let mut eligible = validator::eligible_attackers(state, player);
                for &unit in &eligible {
                    candidates.push(Action::declare_attackers(&[unit]));
                }
                if eligible.len() > 1 {
                    eligible.truncate(state.lanes.len());
                    candidates.push(Action::declare_attackers(&eligible));
                }
            }
            Phase::DeclareDefenders => {
                candidates.push(Action::DeclareDefenders {
                    assignments: Vec::new(),
                });
                for (lane, slot) in state.lanes.iter().enumerate() {
                    let Some(attacker) = slot.attacker else {
                        continue;
                    };
                    for defender in validator::eligible_blockers(state, player, attacker) {
                        candidates.push(Action::DeclareDefenders {
                            assignments: vec![DefenderAssignment::new(lane, defender)],
                        });
                    }
                }
            }
            Phase::PositionAttackers | Phase::PositionDefenders => {
                candidates.push(Action::ConfirmPositions);
                for card in state.lane_units(player) {
                    let current = state.lane_of(card);
                    for lane in (0..state.lanes.len()).filter(|&l| Some(l) != current) {
                        candidates.push(Action::Reposition { card, lane });
                    }
                }
            }
            Phase::CommitCombat => candidates.push(Action::CommitCombat),
            Phase::Combat => {
                if !state.combat_resolved {
                    candidates.push(Action::ResolveCombat);
                }
                candidates.push(Action::EndCombat);
            }
            Phase::End => candidates.push(Action::StartRound),
        }

        candidates
    }
}

impl RulesEngine for TarotGame {
    fn config(&self) -> &RulesConfig {
        &self.config
    }

    fn validate(&self, state: &GameState, player: PlayerId, action: &Action) -> RuleResult<()> {
        validator::validate(state, &self.config, player, action)
    }

    fn legal_actions(&self, state: &GameState, player: PlayerId) -> Vec<Action> {
        let mut actions = self.candidate_actions(state, player);
        actions.retain(|action| self.is_legal(state, player, action));
        actions
    }

    fn apply_action(
        &self,
        state: &GameState,
        player: PlayerId,
        action: &Action,
    ) -> RuleResult<Transition> {
        self.commit(state, player, action).map(|(transition, _)| transition)
    }

    fn is_terminal(&self, state: &GameState) -> Option<GameResult> {
        state
            .outcome
            .or_else(|| self.victory.check_conditions(state).result())
    }
}

impl std::fmt::Debug for TarotGame {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TarotGame")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
