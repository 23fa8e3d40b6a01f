//! Combat resolution tests.
//!
//! These drive full attack sequences through `TarotGame` and check the
//! resulting board: nexus damage, deaths, exhaustion and the combat
//! report's damage accounting.

use tarot_ccg::cards::{CardDefinition, CardId, CardRegistry, Keyword};
use tarot_ccg::core::{
    Action, DefenderAssignment, Destination, EntityId, GameState, Phase, PlayerId,
};
use tarot_ccg::games::tarot::{TarotGame, TarotGameBuilder};
use tarot_ccg::rules::RulesEngine;
use tarot_ccg::services::{StatModifier, SynergyService};
use tarot_ccg::zones::{ZoneId, ZonePosition};

const ONE: PlayerId = PlayerId::ONE;
const TWO: PlayerId = PlayerId::TWO;

const RAIDER: CardId = CardId::new(1);
const GLASS_CANNON: CardId = CardId::new(2);
const WARDEN: CardId = CardId::new(3);
const DUELIST: CardId = CardId::new(4);

/// Extra health for the defending seat only.
struct Bulwark(i32);

impl SynergyService for Bulwark {
    fn compute_bonuses(&self, _state: &GameState, player: PlayerId) -> StatModifier {
        if player == TWO {
            StatModifier::new(0, self.0)
        } else {
            StatModifier::NONE
        }
    }
}

fn registry() -> CardRegistry {
    let mut registry = CardRegistry::new();
    registry
        .register_all([
            CardDefinition::unit(RAIDER, "The Chariot", 1, 3, 2),
            CardDefinition::unit(GLASS_CANNON, "The Tower", 1, 4, 1),
            CardDefinition::unit(WARDEN, "Temperance", 1, 2, 3),
            CardDefinition::unit(DUELIST, "Judgement", 1, 2, 2).with_keyword(Keyword::QuickAttack),
        ])
        .unwrap();
    registry
}

fn builder(hand: &[CardId]) -> TarotGameBuilder {
    let mut deck = hand.to_vec();
    deck.resize(12, RAIDER);
    TarotGameBuilder::new(registry())
        .deck(ONE, deck.clone())
        .deck(TWO, deck)
        .keep_deck_order()
        .skip_mulligan()
}

fn find(state: &GameState, player: PlayerId, card_id: CardId) -> EntityId {
    state
        .hand(player)
        .into_iter()
        .find(|&e| state.get_card(e).unwrap().card_id == card_id)
        .unwrap()
}

/// Summon a unit for player one through the rules.
fn summon(game: &TarotGame, state: &GameState, card_id: CardId) -> (GameState, EntityId) {
    let card = find(state, ONE, card_id);
    let mut state = state.clone();
    state.player_mut(ONE).mana = 10;
    let next = game
        .play_card(&state, ONE, card, Destination::Bench)
        .unwrap()
        .state;
    (next, card)
}

/// Put a unit straight onto player two's bench.
fn station(state: &mut GameState, card_id: CardId) -> EntityId {
    let card = find(state, TWO, card_id);
    state.move_card(card, ZoneId::bench(TWO), ZonePosition::Back);
    card
}

/// Attack with `attackers`, block with `blocks`, and stop right before
/// resolution.
fn to_combat(
    game: &TarotGame,
    state: &GameState,
    attackers: &[EntityId],
    blocks: &[DefenderAssignment],
) -> GameState {
    let mut state = state.clone();
    for (player, action) in [
        (ONE, Action::StartAttack),
        (ONE, Action::declare_attackers(attackers)),
        (TWO, Action::DeclareDefenders { assignments: blocks.to_vec() }),
        (ONE, Action::ConfirmPositions),
        (TWO, Action::ConfirmPositions),
        (ONE, Action::CommitCombat),
    ] {
        state = game.apply_action(&state, player, &action).unwrap().state;
    }
    assert_eq!(state.phase, Phase::Combat);
    state
}

/// A lone 3/2 attacker with no blockers hits the nexus for 3.
#[test]
fn test_unblocked_attacker_hits_nexus() {
    let (game, state) = builder(&[RAIDER]).build(1).unwrap();
    let (state, raider) = summon(&game, &state, RAIDER);
    let state = to_combat(&game, &state, &[raider], &[]);

    let t = game.resolve_combat(&state, ONE).unwrap();

    assert_eq!(t.state.player(TWO).health, 17);
    assert!(t.state.combat_resolved);
    let card = t.state.get_card(raider).unwrap();
    assert!(card.exhausted);
    assert!(card.is_alive());
    assert!(t.state.is_on_bench(raider, ONE));
}

/// A 4/1 attacker into a 2/3 defender holding 2 bonus health: the
/// attacker dies, the defender is left at 1 and the nexus is untouched.
#[test]
fn test_blocked_attacker_dies() {
    let (game, state) = builder(&[GLASS_CANNON, WARDEN])
        .synergy(Bulwark(2))
        .build(2)
        .unwrap();
    let (mut state, cannon) = summon(&game, &state, GLASS_CANNON);
    let warden = station(&mut state, WARDEN);
    let state = to_combat(&game, &state, &[cannon], &[DefenderAssignment::new(0, warden)]);

    let (t, report) = game.resolve_combat_with_report(&state, ONE).unwrap();
    let report = report.unwrap();

    assert!(t.state.discard(ONE).contains(&cannon));
    assert_eq!(t.state.get_card(warden).unwrap().current_health, 1);
    assert!(t.state.is_on_bench(warden, TWO));
    assert_eq!(t.state.player(TWO).health, 20);
    assert_eq!(report.lanes[0].nexus_damage, 0);
    assert_eq!(report.deaths, vec![cannon]);
}

/// Without bonuses both sides of a 4/1 versus 2/3 lane die together.
#[test]
fn test_blocked_trade_without_bonus() {
    let (game, state) = builder(&[GLASS_CANNON, WARDEN]).build(2).unwrap();
    let (mut state, cannon) = summon(&game, &state, GLASS_CANNON);
    let warden = station(&mut state, WARDEN);
    let state = to_combat(&game, &state, &[cannon], &[DefenderAssignment::new(0, warden)]);

    let t = game.resolve_combat(&state, ONE).unwrap();

    assert!(t.state.discard(ONE).contains(&cannon));
    assert!(t.state.discard(TWO).contains(&warden));
    assert_eq!(t.state.player(TWO).health, 20);
}

/// A quick attacker that kills its blocker takes no damage back.
#[test]
fn test_quick_attack_kill_prevents_strike_back() {
    let (game, state) = builder(&[DUELIST, RAIDER]).build(3).unwrap();
    let (mut state, duelist) = summon(&game, &state, DUELIST);
    // A second Chariot from player two's hand; 3 attack would kill the
    // duelist in a simultaneous exchange.
    let blocker = station(&mut state, RAIDER);
    let state = to_combat(&game, &state, &[duelist], &[DefenderAssignment::new(0, blocker)]);

    let (t, report) = game.resolve_combat_with_report(&state, ONE).unwrap();
    let report = report.unwrap();

    assert!(report.lanes[0].quick_strike_kill);
    assert_eq!(t.state.get_card(duelist).unwrap().current_health, 2);
    assert!(t.state.discard(TWO).contains(&blocker));
}

/// Resolving a second time changes nothing.
#[test]
fn test_resolve_combat_is_idempotent() {
    let (game, state) = builder(&[RAIDER]).build(4).unwrap();
    let (state, raider) = summon(&game, &state, RAIDER);
    let state = to_combat(&game, &state, &[raider], &[]);

    let once = game.resolve_combat(&state, ONE).unwrap().state;
    let twice = game.resolve_combat(&once, ONE).unwrap().state;

    assert_eq!(once, twice);
    assert_eq!(
        once.fingerprint().unwrap(),
        twice.fingerprint().unwrap()
    );
}

/// Attacker damage to units and the nexus adds up to total attack.
#[test]
fn test_damage_conservation() {
    let (game, state) = builder(&[RAIDER, GLASS_CANNON, RAIDER, WARDEN])
        .synergy(Bulwark(1))
        .build(5)
        .unwrap();
    let (state, first) = summon(&game, &state, RAIDER);
    let (state, cannon) = summon(&game, &state, GLASS_CANNON);
    let (mut state, second) = summon(&game, &state, RAIDER);
    let warden = station(&mut state, WARDEN);
    let state = to_combat(
        &game,
        &state,
        &[first, cannon, second],
        &[DefenderAssignment::new(1, warden)],
    );

    let (t, report) = game.resolve_combat_with_report(&state, ONE).unwrap();
    let report = report.unwrap();

    assert_eq!(report.attack_total, 3 + 4 + 3);
    assert_eq!(report.attacker_damage_total(), report.attack_total);
    assert_eq!(report.nexus_damage, 6);
    assert_eq!(t.state.player(TWO).health, 14);
}
