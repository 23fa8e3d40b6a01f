//! Publish/subscribe delivery of game events.
//!
//! Delivery is best-effort: a subscriber that panics is logged, disabled
//! and skipped, and the remaining subscribers still receive the event.
//! Nothing a subscriber does can affect the game state.

use std::cell::RefCell;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::rc::Rc;

use log::warn;

use super::event::{EventKind, GameEvent};

/// Receives published events.
pub trait EventSubscriber {
    fn on_event(&mut self, event: &GameEvent);
}

impl<F> EventSubscriber for F
where
    F: FnMut(&GameEvent),
{
    fn on_event(&mut self, event: &GameEvent) {
        self(event)
    }
}

/// Handle returned by `subscribe`, used to unsubscribe.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriberId(u32);

struct Subscription {
    id: SubscriberId,
    filter: Option<Vec<EventKind>>,
    subscriber: Box<dyn EventSubscriber>,
    enabled: bool,
}

impl Subscription {
    fn wants(&self, event: &GameEvent) -> bool {
        self.enabled
            && self
                .filter
                .as_ref()
                .map_or(true, |kinds| kinds.contains(&event.kind()))
    }
}

/// Event bus.
///
/// ```
/// use std::cell::RefCell;
/// use std::rc::Rc;
/// use tarot_ccg::core::PlayerId;
/// use tarot_ccg::events::{EventBus, GameEvent};
///
/// let seen = Rc::new(RefCell::new(0));
/// let counter = Rc::clone(&seen);
///
/// let mut bus = EventBus::new();
/// bus.subscribe(move |_: &GameEvent| *counter.borrow_mut() += 1);
/// bus.publish(&[GameEvent::TurnStarted { player: PlayerId::ONE, round: 1 }]);
///
/// assert_eq!(*seen.borrow(), 1);
/// ```
#[derive(Default)]
pub struct EventBus {
    subscriptions: Vec<Subscription>,
    next_id: u32,
}

impl EventBus {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Receive every event.
    pub fn subscribe(&mut self, subscriber: impl EventSubscriber + 'static) -> SubscriberId {
        self.add(None, Box::new(subscriber))
    }

    /// Receive only events of the listed kinds.
    pub fn subscribe_to(
        &mut self,
        kinds: &[EventKind],
        subscriber: impl EventSubscriber + 'static,
    ) -> SubscriberId {
        self.add(Some(kinds.to_vec()), Box::new(subscriber))
    }

    /// Remove a subscriber. Returns false if the ID was unknown.
    pub fn unsubscribe(&mut self, id: SubscriberId) -> bool {
        let before = self.subscriptions.len();
        self.subscriptions.retain(|s| s.id != id);
        self.subscriptions.len() != before
    }

    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.subscriptions.iter().filter(|s| s.enabled).count()
    }

    /// Deliver events in order. Returns the number of successful deliveries.
    pub fn publish(&mut self, events: &[GameEvent]) -> usize {
        let mut delivered = 0;

        for event in events {
            for subscription in &mut self.subscriptions {
                if !subscription.wants(event) {
                    continue;
                }

                let subscriber = &mut subscription.subscriber;
                let result = catch_unwind(AssertUnwindSafe(|| subscriber.on_event(event)));
                match result {
                    Ok(()) => delivered += 1,
                    Err(_) => {
                        warn!(
                            "event subscriber {:?} panicked on {:?}; disabling it",
                            subscription.id,
                            event.kind()
                        );
                        subscription.enabled = false;
                    }
                }
            }
        }

        delivered
    }

    fn add(
        &mut self,
        filter: Option<Vec<EventKind>>,
        subscriber: Box<dyn EventSubscriber>,
    ) -> SubscriberId {
        let id = SubscriberId(self.next_id);
        self.next_id += 1;
        self.subscriptions.push(Subscription {
            id,
            filter,
            subscriber,
            enabled: true,
        });
        id
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "EventBus({} subscribers)", self.subscriptions.len())
    }
}

/// Subscriber that records every event it receives.
///
/// Clones share the same buffer, so one clone can be handed to the bus
/// while another is kept for reading.
#[derive(Clone, Debug, Default)]
pub struct EventLog {
    events: Rc<RefCell<Vec<GameEvent>>>,
}

impl EventLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn events(&self) -> Vec<GameEvent> {
        self.events.borrow().clone()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.events.borrow().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.borrow().is_empty()
    }

    pub fn clear(&self) {
        self.events.borrow_mut().clear();
    }
}

impl EventSubscriber for EventLog {
    fn on_event(&mut self, event: &GameEvent) {
        self.events.borrow_mut().push(event.clone());
    }
}
