//! Mana economy.
//!
//! Cards are paid from regular mana first, then from banked spell mana.
//! At upkeep unused mana is banked as spell mana (at the configured ratio,
//! up to the cap), `max_mana` grows by one up to its cap and mana refills.

use crate::core::{Player, RuleError, RuleResult, RulesConfig};

/// How a cost was split between the two pools.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ManaPayment {
    pub from_mana: u32,
    pub from_spell_mana: u32,
}

impl ManaPayment {
    #[must_use]
    pub fn total(&self) -> u32 {
        self.from_mana + self.from_spell_mana
    }
}

#[must_use]
pub fn can_afford(player: &Player, cost: u32) -> bool {
    cost <= player.available_mana()
}

/// Work out the split for a cost without spending it.
pub fn plan_payment(player: &Player, cost: u32) -> RuleResult<ManaPayment> {
    if !can_afford(player, cost) {
        return Err(RuleError::InsufficientMana {
            cost,
            available: player.available_mana(),
        });
    }

    let from_mana = cost.min(player.mana);
    Ok(ManaPayment {
        from_mana,
        from_spell_mana: cost - from_mana,
    })
}

/// Spend a cost. Nothing changes on error.
pub fn pay(player: &mut Player, cost: u32) -> RuleResult<ManaPayment> {
    let payment = plan_payment(player, cost)?;
    player.mana -= payment.from_mana;
    player.spell_mana -= payment.from_spell_mana;
    Ok(payment)
}

/// Bank unused mana as spell mana. Returns the amount banked.
pub fn bank_unused(player: &mut Player, config: &RulesConfig) -> u32 {
    let ratio = config.unused_mana_per_spell_mana.max(1);
    let before = player.spell_mana;
    player.spell_mana = (player.spell_mana + player.mana / ratio).min(config.spell_mana_cap);
    player.mana = 0;
    player.spell_mana.saturating_sub(before)
}

/// Grow `max_mana` by one (up to the cap) and refill.
pub fn grow_and_refill(player: &mut Player, config: &RulesConfig) {
    player.max_mana = (player.max_mana + 1).min(config.max_mana);
    player.mana = player.max_mana;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::PlayerId;

    fn player(mana: u32, spell_mana: u32) -> Player {
        let mut p = Player::new(PlayerId::ONE, 20);
        p.mana = mana;
        p.max_mana = mana;
        p.spell_mana = spell_mana;
        p
    }

    #[test]
    fn test_pay_mana_first() {
        let mut p = player(3, 2);
        let payment = pay(&mut p, 4).unwrap();

        assert_eq!(payment, ManaPayment { from_mana: 3, from_spell_mana: 1 });
        assert_eq!(payment.total(), 4);
        assert_eq!(p.mana, 0);
        assert_eq!(p.spell_mana, 1);
    }

    #[test]
    fn test_insufficient_mana_changes_nothing() {
        let mut p = player(1, 1);
        let err = pay(&mut p, 3).unwrap_err();

        assert_eq!(err, RuleError::InsufficientMana { cost: 3, available: 2 });
        assert_eq!(p.mana, 1);
        assert_eq!(p.spell_mana, 1);
    }

    #[test]
    fn test_bank_unused_capped() {
        let config = RulesConfig::default();
        let mut p = player(5, 1);

        assert_eq!(bank_unused(&mut p, &config), 2);
        assert_eq!(p.spell_mana, 3);
        assert_eq!(p.mana, 0);
    }

    #[test]
    fn test_bank_ratio() {
        let config = RulesConfig::default().with_spell_mana_ratio(2);
        let mut p = player(5, 0);

        assert_eq!(bank_unused(&mut p, &config), 2);
    }

    #[test]
    fn test_grow_and_refill() {
        let config = RulesConfig::default().with_max_mana(3);
        let mut p = player(0, 0);
        p.max_mana = 2;

        grow_and_refill(&mut p, &config);
        assert_eq!((p.max_mana, p.mana), (3, 3));

        grow_and_refill(&mut p, &config);
        assert_eq!((p.max_mana, p.mana), (3, 3));
    }
}
