#![forbid(unsafe_code)]

//! Shared, version-tracked value cells with change notification.
//!
//! # Design
//!
//! [`Observable<T>`] wraps a current value in shared, reference-counted
//! storage. Writers call [`set`](Observable::set); readers either pull the
//! current value ([`get`](Observable::get), [`with`](Observable::with)) or
//! register a callback ([`subscribe`](Observable::subscribe)) that fires on
//! every change. Cloning an `Observable` creates a new handle to the
//! **same** inner state.
//!
//! # Invariants
//!
//! 1. Version increments exactly once per mutation that changes the value.
//! 2. Subscribers are notified in registration order.
//! 3. Setting a value equal to the current value is a no-op (no version
//!    bump, no notifications).
//! 4. By the time `set` returns, every subscriber has observed the new
//!    value.
//!
//! # Failure Modes
//!
//! - **Subscriber panics**: remaining subscribers in that cycle are not
//!   invoked; the value and version updates have already been applied.
//! - **Reentrant `set` on the same cell from a subscriber**: unsupported
//!   (see the module-level reentrancy rule).

use std::cell::RefCell;
use std::rc::Rc;

use super::subscribers::SubscriberList;
use super::subscription::Subscription;

/// Shared interior for [`Observable<T>`].
struct ObservableInner<T> {
    /// Current value.
    value: T,
    /// Monotonically increasing version, bumped on each accepted mutation.
    version: u64,
    /// Registered change callbacks.
    subscribers: SubscriberList<T>,
}

/// A shared, version-tracked value cell with change notification.
pub struct Observable<T> {
    inner: Rc<RefCell<ObservableInner<T>>>,
}

impl<T> Clone for Observable<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for Observable<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("Observable")
            .field("value", &inner.value)
            .field("version", &inner.version)
            .finish()
    }
}

impl<T: Clone + PartialEq + 'static> Observable<T> {
    /// Create a cell holding `initial`.
    #[must_use]
    pub fn new(initial: T) -> Self {
        Self {
            inner: Rc::new(RefCell::new(ObservableInner {
                value: initial,
                version: 0,
                subscribers: SubscriberList::new(),
            })),
        }
    }

    /// The current value, cloned.
    #[must_use]
    pub fn get(&self) -> T {
        self.inner.borrow().value.clone()
    }

    /// Access the current value by reference without cloning.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.inner.borrow().value)
    }

    /// Replace the value, notifying subscribers if it changed.
    ///
    /// Equal values are a no-op: no version bump, no notifications.
    pub fn set(&self, value: T) {
        {
            let mut inner = self.inner.borrow_mut();
            if inner.value == value {
                return;
            }
            inner.value = value;
            inner.version += 1;
        }
        self.notify();
    }

    /// Register a change callback, invoked with the new value after every
    /// accepted mutation.
    ///
    /// The callback stays attached as long as the returned [`Subscription`]
    /// is alive.
    #[must_use]
    pub fn subscribe(&self, callback: impl Fn(&T) + 'static) -> Subscription {
        self.inner.borrow_mut().subscribers.push(callback)
    }

    /// Current version number. Increments by 1 on each accepted mutation.
    #[must_use]
    pub fn version(&self) -> u64 {
        self.inner.borrow().version
    }

    /// Number of live subscribers.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.inner.borrow().subscribers.live_count()
    }

    fn notify(&self) {
        // Snapshot callbacks and value, then release the borrow: subscribers
        // may subscribe, drop guards, or mutate other cells while running.
        let callbacks = self.inner.borrow_mut().subscribers.snapshot();
        let value = self.inner.borrow().value.clone();
        for callback in callbacks {
            callback(&value);
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
