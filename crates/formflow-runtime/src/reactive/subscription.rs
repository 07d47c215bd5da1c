#![forbid(unsafe_code)]

//! Subscription guards: RAII handles for reactive pipeline lifetime.
//!
//! A [`Subscription`] keeps exactly one subscriber callback alive; dropping
//! it detaches the callback before the next notification cycle. A
//! [`SubscriptionSet`] is the explicit scope object a pipeline owner (the
//! controller, or a UI layer) uses to tie many subscriptions to one
//! lifetime.
//!
//! # Invariants
//!
//! 1. A callback is invoked only while its `Subscription` (or a bundle
//!    containing it) is alive.
//! 2. `SubscriptionSet::clear` detaches every registered callback at once.

use std::any::Any;
use std::rc::Rc;

/// RAII guard for a single subscriber callback.
///
/// The guard holds the only strong reference to the callback; sources hold
/// `Weak` references. Dropping the guard therefore unsubscribes.
pub struct Subscription {
    _keep_alive: Rc<dyn Any>,
}

impl Subscription {
    pub(super) fn new(keep_alive: Rc<dyn Any>) -> Self {
        Self {
            _keep_alive: keep_alive,
        }
    }

    /// Bundle several subscriptions into one guard with a shared lifetime.
    ///
    /// Used by combinators that subscribe to more than one source but hand
    /// back a single handle.
    #[must_use]
    pub fn bundle(subscriptions: Vec<Subscription>) -> Self {
        Self {
            _keep_alive: Rc::new(subscriptions),
        }
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription").finish_non_exhaustive()
    }
}

/// An explicit scope owning a group of subscriptions.
///
/// Dropping the set (or calling [`clear`](SubscriptionSet::clear)) detaches
/// every pipeline registered into it.
#[derive(Debug, Default)]
pub struct SubscriptionSet {
    subscriptions: Vec<Subscription>,
}

impl SubscriptionSet {
    /// Create an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Tie a subscription's lifetime to this set.
    pub fn insert(&mut self, subscription: Subscription) {
        self.subscriptions.push(subscription);
    }

    /// Detach every subscription in the set.
    pub fn clear(&mut self) {
        self.subscriptions.clear();
    }

    /// Number of subscriptions currently held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.subscriptions.len()
    }

    /// Whether the set holds no subscriptions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.subscriptions.is_empty()
    }
}

impl Extend<Subscription> for SubscriptionSet {
    fn extend<I: IntoIterator<Item = Subscription>>(&mut self, iter: I) {
        self.subscriptions.extend(iter);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
