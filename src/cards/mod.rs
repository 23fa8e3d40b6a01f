//! Card system: templates, instances and the catalog.
//!
//! ## Key Types
//!
//! - `CardId`: Identifier for card templates
//! - `CardDefinition`: Immutable template (cost, stats, keywords, abilities)
//! - `CardInstance`: Runtime copy (current health, statuses, position)
//! - `CardCatalog`: Template lookup trait consumed by the rules
//! - `CardRegistry`: Validating in-memory catalog

pub mod attributes;
pub mod definition;
pub mod instance;
pub mod registry;

pub use attributes::{CardType, Element, Keyword, Keywords, Rarity, StatusEffect, ZodiacClass};
pub use definition::{CardDefinition, CardId};
pub use instance::CardInstance;
pub use registry::{CardCatalog, CardRegistry, CatalogError};
