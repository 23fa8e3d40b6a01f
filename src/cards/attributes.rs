//! Typed card attributes.
//!
//! - `CardType`: unit or spell
//! - `ZodiacClass`: the twelve signs, used by synergy bonuses
//! - `Element`: fire, water, air, earth, used by synergy bonuses
//! - `Rarity`: catalog metadata, ignored by the rules
//! - `Keyword`: combat and blocking modifiers the rules interpret
//! - `StatusEffect`: runtime conditions on a card instance

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Whether a card stays on the board or resolves once.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardType {
    Unit,
    Spell,
}

/// Zodiac class of a card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ZodiacClass {
    Aries,
    Taurus,
    Gemini,
    Cancer,
    Leo,
    Virgo,
    Libra,
    Scorpio,
    Sagittarius,
    Capricorn,
    Aquarius,
    Pisces,
}

impl ZodiacClass {
    /// The element traditionally associated with the sign.
    #[must_use]
    pub const fn element(self) -> Element {
        match self {
            ZodiacClass::Aries | ZodiacClass::Leo | ZodiacClass::Sagittarius => Element::Fire,
            ZodiacClass::Taurus | ZodiacClass::Virgo | ZodiacClass::Capricorn => Element::Earth,
            ZodiacClass::Gemini | ZodiacClass::Libra | ZodiacClass::Aquarius => Element::Air,
            ZodiacClass::Cancer | ZodiacClass::Scorpio | ZodiacClass::Pisces => Element::Water,
        }
    }
}

/// Elemental affinity of a card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Element {
    Fire,
    Water,
    Air,
    Earth,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Rarity {
    #[default]
    Common,
    Uncommon,
    Rare,
    Epic,
    Legendary,
}

/// Keywords interpreted by the combat resolver and the validator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Keyword {
    /// Strikes before the simultaneous damage step. If it kills its
    /// opponent, it takes no damage back.
    QuickAttack,
    /// Damage this unit deals heals its owner's nexus.
    Lifesteal,
    /// Can only be blocked by other `Elusive` units.
    Elusive,
    /// Cannot be assigned as a defender.
    CantBlock,
}

/// Keyword list stored inline for the common case of a few keywords.
pub type Keywords = SmallVec<[Keyword; 4]>;

/// Runtime conditions on a card instance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatusEffect {
    /// Placed in a lane as an attacker. Cleared when combat resolves.
    Attacking,
    /// Placed in a lane as a defender. Cleared when combat resolves.
    Blocking,
    /// Cannot attack or block until the next upkeep.
    Stunned,
}

impl StatusEffect {
    /// Statuses removed when the combat step that set them resolves.
    #[must_use]
    pub const fn is_combat_scoped(self) -> bool {
        matches!(self, StatusEffect::Attacking | StatusEffect::Blocking)
    }
}
