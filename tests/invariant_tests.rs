//! Property tests over random legal play.
//!
//! Each case plays a random sequence of legal actions from a random seed
//! and checks board invariants after every step.

use proptest::prelude::*;

use tarot_ccg::cards::{CardDefinition, CardId, CardRegistry, Keyword};
use tarot_ccg::core::{GameState, Phase, PlayerId, RulesConfig};
use tarot_ccg::effects::{Ability, Effect, EffectTarget};
use tarot_ccg::games::tarot::{TarotGame, TarotGameBuilder};
use tarot_ccg::rules::{responsible_player, RulesEngine};

const DECK_SIZE: usize = 20;

fn setup(seed: u64) -> (TarotGame, GameState) {
    let mut registry = CardRegistry::new();
    registry
        .register_all([
            CardDefinition::unit(CardId::new(1), "Ace of Wands", 1, 1, 1),
            CardDefinition::unit(CardId::new(2), "Knight of Cups", 2, 2, 3)
                .with_keyword(Keyword::Elusive),
            CardDefinition::unit(CardId::new(3), "Queen of Swords", 3, 3, 2)
                .with_keyword(Keyword::QuickAttack),
            CardDefinition::unit(CardId::new(4), "King of Pentacles", 1, 1, 4)
                .with_keyword(Keyword::CantBlock),
            CardDefinition::spell(CardId::new(5), "The Star", 0)
                .with_ability(Ability::on_play(Effect::DrawCards(3), EffectTarget::Controller)),
            CardDefinition::spell(CardId::new(6), "Judgement", 1)
                .with_ability(Ability::on_play(Effect::DamageUnit(2), EffectTarget::EnemyUnits)),
        ])
        .unwrap();
    let deck: Vec<_> = (1..=6).cycle().take(DECK_SIZE).map(CardId::new).collect();
    TarotGameBuilder::new(registry)
        .deck(PlayerId::ONE, deck.clone())
        .deck(PlayerId::TWO, deck)
        .build(seed)
        .unwrap()
}

fn check_invariants(state: &GameState, config: &RulesConfig) {
    for player in PlayerId::all() {
        let p = state.player(player);
        assert!(state.bench_size(player) <= config.max_bench_size);
        assert!(state.hand_size(player) <= config.max_hand_size);
        assert!(p.mana <= p.max_mana);
        assert!(p.max_mana <= config.max_mana);
        assert!(p.spell_mana <= config.spell_mana_cap);
        for unit in state.units_in_play(player) {
            assert!(state.get_card(unit).unwrap().is_alive());
        }
    }
    assert_eq!(state.zones.total_cards(), DECK_SIZE * 2);
    assert_eq!(state.lanes.len(), config.lane_count);
    let in_combat = matches!(
        state.phase,
        Phase::DeclareDefenders
            | Phase::PositionAttackers
            | Phase::PositionDefenders
            | Phase::CommitCombat
            | Phase::Combat
    );
    if !in_combat {
        assert!(state.lanes.iter().all(|l| l.is_empty()));
        assert_eq!(state.attacking_player, None, "attacker left over in {}", state.phase);
    }
    assert!(
        state.phase == Phase::Combat || !state.combat_resolved,
        "combat_resolved set in {}",
        state.phase
    );
}

proptest! {
    /// Invariant: limits hold in every state reachable by legal play.
    #[test]
    fn limits_hold_under_random_play(
        seed in any::<u64>(),
        choices in prop::collection::vec(any::<usize>(), 1..300),
    ) {
        let (game, mut state) = setup(seed);
        let config = game.config().clone();

        for choice in choices {
            let Some(player) = responsible_player(&state) else {
                break;
            };
            let actions = game.legal_actions(&state, player);
            prop_assert!(!actions.is_empty(), "no legal action in {:?}", state.phase);

            let action = &actions[choice % actions.len()];
            state = game.apply_action(&state, player, action).unwrap().state;
            check_invariants(&state, &config);
        }
    }

    /// Invariant: everything `legal_actions` offers applies cleanly, and
    /// nothing is offered to the seat that is not expected to act.
    #[test]
    fn legal_actions_apply(seed in any::<u64>(), steps in 0usize..80) {
        let (game, mut state) = setup(seed);

        for step in 0..steps {
            let Some(player) = responsible_player(&state) else {
                break;
            };
            let actions = game.legal_actions(&state, player);
            for action in &actions {
                prop_assert!(game.apply_action(&state, player, action).is_ok());
            }
            if matches!(state.phase, Phase::Main | Phase::DeclareAttackers | Phase::DeclareDefenders) {
                prop_assert!(game.legal_actions(&state, player.opponent()).is_empty());
            }
            state = game
                .apply_action(&state, player, &actions[step % actions.len()])
                .unwrap()
                .state;
        }
    }
}
