#![forbid(unsafe_code)]

//! Shared subscriber storage for [`Observable`] and [`Subject`].
//!
//! Callbacks are held as `Weak` references; the matching strong reference
//! lives inside the [`Subscription`] returned to the caller. Dropping the
//! subscription therefore detaches the callback, and dead entries are pruned
//! lazily on the next notification.
//!
//! [`Observable`]: super::observable::Observable
//! [`Subject`]: super::subject::Subject

use std::rc::{Rc, Weak};

use super::subscription::Subscription;

/// Boxed-callback type shared by every reactive source.
pub(super) type SubscriberFn<T> = dyn Fn(&T);

/// An ordered list of weakly-held subscriber callbacks.
pub(super) struct SubscriberList<T> {
    entries: Vec<Weak<SubscriberFn<T>>>,
}

impl<T> SubscriberList<T> {
    pub(super) fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Register a callback, returning the guard that keeps it alive.
    pub(super) fn push(&mut self, callback: impl Fn(&T) + 'static) -> Subscription {
        let strong = Rc::new(callback);
        let weak: Weak<SubscriberFn<T>> = {
            let coerced: Rc<SubscriberFn<T>> = strong.clone();
            Rc::downgrade(&coerced)
        };
        self.entries.push(weak);
        Subscription::new(strong)
    }

    /// Prune dead entries and return strong references to the live ones,
    /// in registration order.
    ///
    /// The caller invokes the returned callbacks *after* releasing its
    /// borrow, so subscribers may subscribe, unsubscribe, or mutate other
    /// sources without re-entering this list.
    pub(super) fn snapshot(&mut self) -> Vec<Rc<SubscriberFn<T>>> {
        self.entries.retain(|weak| weak.strong_count() > 0);
        self.entries.iter().filter_map(Weak::upgrade).collect()
    }

    /// Number of live subscribers.
    pub(super) fn live_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|weak| weak.strong_count() > 0)
            .count()
    }
}
