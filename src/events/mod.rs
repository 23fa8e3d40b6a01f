//! Game events and their delivery.
//!
//! ## Key Types
//!
//! - `GameEvent`: Something that happened, returned with each transition
//! - `EventKind`: Event discriminant for filtering
//! - `EventBus`: Best-effort publish/subscribe
//! - `EventLog`: Subscriber that records what it receives

pub mod bus;
pub mod event;

pub use bus::{EventBus, EventLog, EventSubscriber, SubscriberId};
pub use event::{DamageTarget, EventKind, GameEvent};
