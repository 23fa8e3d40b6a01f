//! Effect resolution - executing abilities on game state.
//!
//! The `EffectResolver` applies abilities to a working copy of the state
//! and appends the events they produce. Deaths are never handled inline:
//! effects only deal damage, and `settle_deaths` sweeps dead units and
//! resolves their `OnDeath` abilities afterwards, repeating until the
//! board is stable.

use log::debug;

use super::effect::{Ability, AbilityTrigger, Effect, EffectTarget};
use crate::cards::CardCatalog;
use crate::core::{EntityId, GameState, PlayerId, RulesConfig};
use crate::events::{DamageTarget, GameEvent};
use crate::zones::{ZoneId, ZoneKind, ZonePosition};

/// Collaborators an effect needs while resolving.
#[derive(Clone, Copy)]
pub struct EffectContext<'a> {
    pub catalog: &'a dyn CardCatalog,
    pub config: &'a RulesConfig,
}

impl<'a> EffectContext<'a> {
    #[must_use]
    pub fn new(catalog: &'a dyn CardCatalog, config: &'a RulesConfig) -> Self {
        Self { catalog, config }
    }
}

/// Resolves abilities on game state.
pub struct EffectResolver;

impl EffectResolver {
    /// Resolve every ability of `source`'s template with the given trigger.
    pub fn resolve_triggers(
        state: &mut GameState,
        ctx: &EffectContext<'_>,
        source: EntityId,
        trigger: AbilityTrigger,
        events: &mut Vec<GameEvent>,
    ) {
        let Some((card_id, controller)) = state.get_card(source).map(|c| (c.card_id, c.owner))
        else {
            return;
        };
        let Some(definition) = ctx.catalog.get_card(card_id) else {
            return;
        };

        for ability in definition.abilities_for(trigger) {
            Self::resolve_ability(state, ctx, source, controller, ability, events);
        }
    }

    /// Resolve a single ability.
    pub fn resolve_ability(
        state: &mut GameState,
        ctx: &EffectContext<'_>,
        source: EntityId,
        controller: PlayerId,
        ability: &Ability,
        events: &mut Vec<GameEvent>,
    ) {
        debug!("{} resolves {:?} on {:?}", source, ability.effect, ability.target);

        if ability.effect.targets_units() {
            for unit in Self::unit_targets(state, source, controller, ability.target) {
                Self::apply_to_unit(state, source, unit, &ability.effect, events);
            }
            return;
        }

        let player = if ability.target.is_friendly() {
            controller
        } else {
            controller.opponent()
        };

        match ability.effect {
            Effect::DamageNexus(amount) => {
                let amount = amount.max(0);
                state.player_mut(player).health -= amount;
                events.push(GameEvent::DamageDealt {
                    source,
                    target: DamageTarget::Nexus(player),
                    amount,
                });
            }
            Effect::HealNexus(amount) => {
                let cap = ctx.config.starting_health;
                let nexus = state.player_mut(player);
                let healed = (nexus.health + amount.max(0)).min(cap) - nexus.health;
                if healed > 0 {
                    nexus.health += healed;
                    events.push(GameEvent::NexusHealed { player, amount: healed });
                }
            }
            Effect::DrawCards(count) => {
                for _ in 0..count {
                    let outcome = state.draw_card(player, ctx.config.max_hand_size);
                    events.extend(GameEvent::from_draw(player, outcome));
                }
            }
            Effect::GainSpellMana(amount) => {
                let cap = ctx.config.spell_mana_cap;
                let nexus = state.player_mut(player);
                nexus.spell_mana = (nexus.spell_mana + amount).min(cap);
            }
            Effect::LockPositions => {
                state.can_rearrange_cards = false;
            }
            Effect::DamageUnit(_) | Effect::Buff { .. } | Effect::Stun | Effect::GrantKeyword(_) => {}
        }
    }

    /// Units an ability applies to, in entity order.
    #[must_use]
    pub fn unit_targets(
        state: &GameState,
        source: EntityId,
        controller: PlayerId,
        target: EffectTarget,
    ) -> Vec<EntityId> {
        let opponent = controller.opponent();
        match target {
            EffectTarget::ThisUnit => {
                if Self::is_in_play(state, source) {
                    vec![source]
                } else {
                    Vec::new()
                }
            }
            EffectTarget::Controller | EffectTarget::AlliedUnits => {
                Self::sorted(state.units_in_play(controller))
            }
            EffectTarget::Opponent | EffectTarget::EnemyUnits => {
                Self::sorted(state.units_in_play(opponent))
            }
            EffectTarget::StrongestEnemy => Self::sorted(state.units_in_play(opponent))
                .into_iter()
                .filter_map(|e| state.get_card(e).map(|c| (c.attack, e)))
                // Highest attack, then lowest entity.
                .max_by(|a, b| a.0.cmp(&b.0).then(b.1.cmp(&a.1)))
                .map(|(_, e)| vec![e])
                .unwrap_or_default(),
        }
    }

    /// Sweep dead units to discard and resolve their `OnDeath` abilities,
    /// repeating while those abilities kill more units.
    ///
    /// Returns the units that died, in the order they were swept.
    pub fn settle_deaths(
        state: &mut GameState,
        ctx: &EffectContext<'_>,
        events: &mut Vec<GameEvent>,
    ) -> Vec<EntityId> {
        let mut all_dead = Vec::new();

        loop {
            let dead: Vec<(EntityId, PlayerId)> = state
                .cards()
                .filter(|c| c.is_unit() && !c.is_alive())
                .map(|c| (c.entity_id, c.owner))
                .filter(|&(e, _)| Self::is_in_play(state, e))
                .collect();

            if dead.is_empty() {
                break;
            }

            for &(unit, owner) in &dead {
                state.move_card(unit, ZoneId::discard(owner), ZonePosition::Back);
                events.push(GameEvent::UnitDied { card: unit, owner });
                debug!("{} died", unit);
            }

            for &(unit, _) in &dead {
                Self::resolve_triggers(state, ctx, unit, AbilityTrigger::OnDeath, events);
            }

            all_dead.extend(dead.into_iter().map(|(e, _)| e));
        }

        all_dead
    }

    fn apply_to_unit(
        state: &mut GameState,
        source: EntityId,
        unit: EntityId,
        effect: &Effect,
        events: &mut Vec<GameEvent>,
    ) {
        let Some(card) = state.get_card_mut(unit) else {
            return;
        };

        match *effect {
            Effect::DamageUnit(amount) => {
                let amount = amount.max(0);
                card.take_damage(amount);
                events.push(GameEvent::DamageDealt {
                    source,
                    target: DamageTarget::Unit(unit),
                    amount,
                });
            }
            Effect::Buff { attack, health } => card.buff(attack, health),
            Effect::Stun => card.add_status(crate::cards::StatusEffect::Stunned),
            Effect::GrantKeyword(keyword) => card.grant_keyword(keyword),
            _ => {}
        }
    }

    fn is_in_play(state: &GameState, entity: EntityId) -> bool {
        state
            .zones
            .get_zone(entity)
            .is_some_and(|z| matches!(z.kind, ZoneKind::Bench | ZoneKind::Lane(_)))
    }

    fn sorted(mut units: Vec<EntityId>) -> Vec<EntityId> {
        units.sort_unstable();
        units
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{CardDefinition, CardId, CardInstance, CardRegistry, StatusEffect};

    struct Fixture {
        registry: CardRegistry,
        config: RulesConfig,
        state: GameState,
    }

    impl Fixture {
        fn new() -> Self {
            let config = RulesConfig::default();
            let state = GameState::new(&config, 1);
            Self {
                registry: CardRegistry::new(),
                config,
                state,
            }
        }

        fn register(&mut self, def: CardDefinition) {
            self.registry.register(def).unwrap();
        }

        fn summon(&mut self, card: u32, owner: PlayerId) -> EntityId {
            let def = self.registry.require(CardId::new(card)).unwrap().clone();
            let id = self.state.alloc_entity();
            self.state.add_card(
                CardInstance::from_definition(id, &def, owner),
                ZoneId::bench(owner),
            );
            id
        }
    }

    #[test]
    fn test_damage_strongest_enemy() {
        let mut fx = Fixture::new();
        fx.register(CardDefinition::unit(CardId::new(1), "Small", 1, 1, 3));
        fx.register(CardDefinition::unit(CardId::new(2), "Big", 4, 4, 3));
        let spell = CardDefinition::spell(CardId::new(3), "The Tower", 3);
        fx.register(spell);

        let small = fx.summon(1, PlayerId::TWO);
        let big = fx.summon(2, PlayerId::TWO);

        let ctx = EffectContext::new(&fx.registry, &fx.config);
        let mut events = Vec::new();
        let ability = Ability::on_play(Effect::DamageUnit(2), EffectTarget::StrongestEnemy);
        EffectResolver::resolve_ability(&mut fx.state, &ctx, EntityId(99), PlayerId::ONE, &ability, &mut events);

        assert_eq!(fx.state.get_card(big).unwrap().current_health, 1);
        assert_eq!(fx.state.get_card(small).unwrap().current_health, 3);
        assert_eq!(events.len(), 1);
    }

    #[test]
    fn test_nexus_effects() {
        let fx = Fixture::new();
        let mut state = fx.state.clone();
        let ctx = EffectContext::new(&fx.registry, &fx.config);
        let mut events = Vec::new();

        let hit = Ability::on_play(Effect::DamageNexus(5), EffectTarget::Opponent);
        EffectResolver::resolve_ability(&mut state, &ctx, EntityId(0), PlayerId::ONE, &hit, &mut events);
        assert_eq!(state.player(PlayerId::TWO).health, 15);

        let heal = Ability::on_play(Effect::HealNexus(10), EffectTarget::Controller);
        EffectResolver::resolve_ability(&mut state, &ctx, EntityId(0), PlayerId::TWO, &heal, &mut events);
        assert_eq!(state.player(PlayerId::TWO).health, 20);
        assert_eq!(
            events.last(),
            Some(&GameEvent::NexusHealed { player: PlayerId::TWO, amount: 5 })
        );
    }

    #[test]
    fn test_spell_mana_capped_and_lock() {
        let fx = Fixture::new();
        let mut state = fx.state.clone();
        let ctx = EffectContext::new(&fx.registry, &fx.config);
        let mut events = Vec::new();

        let gain = Ability::on_play(Effect::GainSpellMana(10), EffectTarget::Controller);
        EffectResolver::resolve_ability(&mut state, &ctx, EntityId(0), PlayerId::ONE, &gain, &mut events);
        assert_eq!(state.player(PlayerId::ONE).spell_mana, 3);

        let lock = Ability::on_play(Effect::LockPositions, EffectTarget::Opponent);
        EffectResolver::resolve_ability(&mut state, &ctx, EntityId(0), PlayerId::ONE, &lock, &mut events);
        assert!(!state.can_rearrange_cards);
    }

    #[test]
    fn test_this_unit_and_stun() {
        let mut fx = Fixture::new();
        fx.register(CardDefinition::unit(CardId::new(1), "Knight", 2, 2, 2));
        let knight = fx.summon(1, PlayerId::ONE);
        let enemy = fx.summon(1, PlayerId::TWO);

        let ctx = EffectContext::new(&fx.registry, &fx.config);
        let mut events = Vec::new();
        let buff = Ability::on_play(Effect::Buff { attack: 1, health: 1 }, EffectTarget::ThisUnit);
        EffectResolver::resolve_ability(&mut fx.state, &ctx, knight, PlayerId::ONE, &buff, &mut events);
        let stun = Ability::on_play(Effect::Stun, EffectTarget::EnemyUnits);
        EffectResolver::resolve_ability(&mut fx.state, &ctx, knight, PlayerId::ONE, &stun, &mut events);

        assert_eq!(fx.state.get_card(knight).unwrap().attack, 3);
        assert!(fx.state.get_card(enemy).unwrap().has_status(StatusEffect::Stunned));
        assert!(!fx.state.get_card(knight).unwrap().has_status(StatusEffect::Stunned));
    }

    #[test]
    fn test_settle_deaths_chains_on_death() {
        let mut fx = Fixture::new();
        // Death of the bomb damages every enemy unit for 1.
        fx.register(
            CardDefinition::unit(CardId::new(1), "Bomb", 1, 1, 1)
                .with_ability(Ability::on_death(Effect::DamageUnit(1), EffectTarget::EnemyUnits)),
        );
        fx.register(CardDefinition::unit(CardId::new(2), "Frail", 1, 1, 1));

        let bomb = fx.summon(1, PlayerId::ONE);
        let frail = fx.summon(2, PlayerId::TWO);
        fx.state.get_card_mut(bomb).unwrap().take_damage(5);

        let ctx = EffectContext::new(&fx.registry, &fx.config);
        let mut events = Vec::new();
        let dead = EffectResolver::settle_deaths(&mut fx.state, &ctx, &mut events);

        assert_eq!(dead, vec![bomb, frail]);
        assert_eq!(fx.state.discard(PlayerId::ONE), vec![bomb]);
        assert_eq!(fx.state.discard(PlayerId::TWO), vec![frail]);
        assert!(events.contains(&GameEvent::UnitDied { card: frail, owner: PlayerId::TWO }));
    }
}
