//! Card definitions - immutable card templates.
//!
//! `CardDefinition` holds what every copy of a card shares: cost, base
//! stats, type, zodiac class, element, keywords and abilities. Runtime
//! data (current health, statuses, lane position) lives on
//! `CardInstance`.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::attributes::{CardType, Element, Keyword, Keywords, Rarity, ZodiacClass};
use crate::effects::{Ability, AbilityTrigger};

/// Identifier of a card template.
///
/// This identifies the kind of card ("The Tower"), not a copy in a game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CardId(pub u32);

impl CardId {
    /// Create a new card ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

/// Static card template.
///
/// ## Example
///
/// ```
/// use tarot_ccg::cards::{CardDefinition, CardId, Element, Keyword, ZodiacClass};
///
/// let chariot = CardDefinition::unit(CardId::new(7), "The Chariot", 3, 3, 2)
///     .with_zodiac(ZodiacClass::Cancer)
///     .with_element(Element::Water)
///     .with_keyword(Keyword::QuickAttack);
///
/// assert!(chariot.is_unit());
/// assert!(chariot.has_keyword(Keyword::QuickAttack));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardDefinition {
    pub id: CardId,
    pub name: String,
    pub cost: u32,

    /// Base attack. Zero for spells.
    pub attack: i32,

    /// Base health. Zero for spells.
    pub health: i32,

    pub card_type: CardType,
    pub zodiac_class: ZodiacClass,
    pub element: Element,
    pub rarity: Rarity,
    pub keywords: Keywords,
    pub abilities: Vec<Ability>,
}

impl CardDefinition {
    /// Create a unit template. Zodiac defaults to Aries, element follows
    /// the zodiac.
    #[must_use]
    pub fn unit(id: CardId, name: impl Into<String>, cost: u32, attack: i32, health: i32) -> Self {
        Self {
            id,
            name: name.into(),
            cost,
            attack,
            health,
            card_type: CardType::Unit,
            zodiac_class: ZodiacClass::Aries,
            element: ZodiacClass::Aries.element(),
            rarity: Rarity::default(),
            keywords: SmallVec::new(),
            abilities: Vec::new(),
        }
    }

    /// Create a spell template. Spells resolve their `OnPlay` abilities and
    /// go to discard.
    #[must_use]
    pub fn spell(id: CardId, name: impl Into<String>, cost: u32) -> Self {
        Self {
            card_type: CardType::Spell,
            ..Self::unit(id, name, cost, 0, 0)
        }
    }

    /// Set the zodiac class and the matching element.
    #[must_use]
    pub fn with_zodiac(mut self, zodiac: ZodiacClass) -> Self {
        self.zodiac_class = zodiac;
        self.element = zodiac.element();
        self
    }

    /// Override the element.
    #[must_use]
    pub fn with_element(mut self, element: Element) -> Self {
        self.element = element;
        self
    }

    #[must_use]
    pub fn with_rarity(mut self, rarity: Rarity) -> Self {
        self.rarity = rarity;
        self
    }

    #[must_use]
    pub fn with_keyword(mut self, keyword: Keyword) -> Self {
        if !self.keywords.contains(&keyword) {
            self.keywords.push(keyword);
        }
        self
    }

    #[must_use]
    pub fn with_ability(mut self, ability: Ability) -> Self {
        self.abilities.push(ability);
        self
    }

    #[must_use]
    pub fn is_unit(&self) -> bool {
        self.card_type == CardType::Unit
    }

    #[must_use]
    pub fn is_spell(&self) -> bool {
        self.card_type == CardType::Spell
    }

    #[must_use]
    pub fn has_keyword(&self, keyword: Keyword) -> bool {
        self.keywords.contains(&keyword)
    }

    /// Abilities fired by the given trigger, in definition order.
    pub fn abilities_for(&self, trigger: AbilityTrigger) -> impl Iterator<Item = &Ability> {
        self.abilities.iter().filter(move |a| a.trigger == trigger)
    }
}
