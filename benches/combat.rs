use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tarot_ccg::ai::{AiConfig, AiPlayer};
use tarot_ccg::cards::{CardDefinition, CardId, CardRegistry};
use tarot_ccg::core::{Action, DefenderAssignment, GameState, PlayerId};
use tarot_ccg::games::tarot::{TarotGame, TarotGameBuilder};
use tarot_ccg::rules::RulesEngine;
use tarot_ccg::services::ElementalSynergy;
use tarot_ccg::session::Match;
use tarot_ccg::zones::{ZoneId, ZonePosition};

fn registry() -> CardRegistry {
    let mut registry = CardRegistry::new();
    registry
        .register_all([
            CardDefinition::unit(CardId::new(1), "Page of Wands", 1, 2, 2),
            CardDefinition::unit(CardId::new(2), "Knight of Swords", 2, 3, 3),
            CardDefinition::unit(CardId::new(3), "Queen of Cups", 3, 2, 5),
        ])
        .unwrap();
    registry
}

fn builder(seed: u64) -> (TarotGame, GameState) {
    let deck: Vec<_> = (1..=3).cycle().take(30).map(CardId::new).collect();
    TarotGameBuilder::new(registry())
        .deck(PlayerId::ONE, deck.clone())
        .deck(PlayerId::TWO, deck)
        .synergy(ElementalSynergy::default())
        .config(tarot_ccg::core::RulesConfig::default().with_starting_hand_size(10))
        .skip_mulligan()
        .build(seed)
        .unwrap()
}

/// Six attackers against six blockers, committed and ready to resolve.
fn full_board() -> (TarotGame, GameState) {
    let (game, mut state) = builder(7);
    for player in PlayerId::all() {
        for card in state.hand(player).into_iter().take(6) {
            state.move_card(card, ZoneId::bench(player), ZonePosition::Back);
        }
    }

    let attackers = state.bench(PlayerId::ONE);
    let blocks: Vec<_> = state
        .bench(PlayerId::TWO)
        .into_iter()
        .enumerate()
        .map(|(lane, defender)| DefenderAssignment::new(lane, defender))
        .collect();
    for (player, action) in [
        (PlayerId::ONE, Action::StartAttack),
        (PlayerId::ONE, Action::declare_attackers(&attackers)),
        (PlayerId::TWO, Action::DeclareDefenders { assignments: blocks }),
        (PlayerId::ONE, Action::ConfirmPositions),
        (PlayerId::TWO, Action::ConfirmPositions),
        (PlayerId::ONE, Action::CommitCombat),
    ] {
        state = game.apply_action(&state, player, &action).unwrap().state;
    }
    (game, state)
}

fn bench_resolve_combat(c: &mut Criterion) {
    let (game, state) = full_board();

    c.bench_function("resolve_combat_6_lanes", |b| {
        b.iter(|| game.resolve_combat(black_box(&state), PlayerId::ONE).unwrap())
    });
}

fn bench_legal_actions(c: &mut Criterion) {
    let (game, state) = builder(3);

    c.bench_function("legal_actions_main", |b| {
        b.iter(|| game.legal_actions(black_box(&state), PlayerId::ONE))
    });
}

fn bench_ai_match(c: &mut Criterion) {
    c.bench_function("ai_vs_ai_match", |b| {
        b.iter(|| {
            let (game, state) = builder(11);
            let mut m = Match::new(game, state)
                .with_ai(AiPlayer::new(PlayerId::ONE, AiConfig::default()))
                .with_ai(AiPlayer::new(PlayerId::TWO, AiConfig::default()));
            m.run_ai().unwrap()
        })
    });
}

criterion_group!(benches, bench_resolve_combat, bench_legal_actions, bench_ai_match);
criterion_main!(benches);
