#![forbid(unsafe_code)]

//! Hot, stateless event sequences.
//!
//! A [`Subject<T>`] multicasts each emitted event to the subscribers alive
//! at that instant. There is no current value and no replay: a subscriber
//! attached after an emission never sees it. This is the right shape for
//! discrete events (the submit trigger, login outcomes) where "latest
//! value" has no meaning.
//!
//! # Invariants
//!
//! 1. Subscribers are notified in registration order.
//! 2. An event reaches exactly the subscribers that were attached when
//!    `emit` was called.

use std::cell::RefCell;
use std::rc::Rc;

use super::subscribers::SubscriberList;
use super::subscription::Subscription;

/// A hot event sequence with multicast delivery.
pub struct Subject<T> {
    subscribers: Rc<RefCell<SubscriberList<T>>>,
}

impl<T> Clone for Subject<T> {
    fn clone(&self) -> Self {
        Self {
            subscribers: Rc::clone(&self.subscribers),
        }
    }
}

impl<T> std::fmt::Debug for Subject<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subject")
            .field("subscribers", &self.subscribers.borrow().live_count())
            .finish()
    }
}

impl<T> Default for Subject<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Subject<T> {
    /// Create a subject with no subscribers.
    #[must_use]
    pub fn new() -> Self {
        Self {
            subscribers: Rc::new(RefCell::new(SubscriberList::new())),
        }
    }

    /// Deliver an event to every live subscriber, in registration order.
    pub fn emit(&self, event: T) {
        let callbacks = self.subscribers.borrow_mut().snapshot();
        for callback in callbacks {
            callback(&event);
        }
    }

    /// Register an event callback.
    ///
    /// The callback stays attached as long as the returned [`Subscription`]
    /// is alive.
    #[must_use]
    pub fn subscribe(&self, callback: impl Fn(&T) + 'static) -> Subscription {
        self.subscribers.borrow_mut().push(callback)
    }

    /// Number of live subscribers.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.borrow().live_count()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
