//! Card abilities and their resolution.
//!
//! - `Ability`: Trigger + effect + target, carried by card templates
//! - `Effect`: The atomic things an ability can do
//! - `EffectResolver`: Applies abilities and settles deaths
//!
//! Effects deal damage but never remove units themselves; removal and
//! `OnDeath` abilities go through `EffectResolver::settle_deaths`.

mod effect;
mod resolver;

pub use effect::{Ability, AbilityTrigger, Effect, EffectTarget};
pub use resolver::{EffectContext, EffectResolver};
