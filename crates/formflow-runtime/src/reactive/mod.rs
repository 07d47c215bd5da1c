#![forbid(unsafe_code)]

//! Reactive pipeline primitives for the login form.
//!
//! This module provides the building blocks the controller composes:
//!
//! - [`Observable`]: a shared, version-tracked value cell with change
//!   notification via subscriber callbacks. Models stateful signals (field
//!   text, validity, enablement, loading).
//! - [`Subject`]: a hot, stateless event sequence. Models discrete events
//!   (the submit trigger, login outcomes).
//! - [`Subscription`]: RAII guard that automatically unsubscribes on drop.
//! - [`SubscriptionSet`]: an explicit scope object owning a group of
//!   subscriptions; releasing it tears down every pipeline registered into
//!   it.
//! - Combinators: [`derive`], [`combine_latest`], [`with_latest_from`], and
//!   [`SwitchLatest`]: each an explicit, individually testable operator
//!   rather than part of an opaque reactive runtime.
//!
//! # Architecture
//!
//! Everything here uses `Rc<RefCell<..>>` for single-threaded shared
//! ownership. Subscribers are stored as `Weak` function pointers and cleaned
//! up lazily during notification. Derived values update eagerly: by the time
//! a `set` call returns, every downstream signal reflects the new input.
//!
//! # Invariants
//!
//! 1. Version increments exactly once per mutation that changes the value.
//! 2. Subscribers are notified in registration order.
//! 3. Setting a value equal to the current value is a no-op (no version
//!    bump, no notifications).
//! 4. Dropping a [`Subscription`] removes the callback before the next
//!    notification cycle.
//! 5. A derived signal is never stale relative to its sources once the
//!    mutating call returns.
//!
//! # Reentrancy
//!
//! A subscriber must not mutate the observable it is observing. Mutating
//! *other* observables from inside a notification is supported; it is how
//! the pipeline propagates.

pub mod combine;
pub mod observable;
pub mod subject;
pub mod subscription;
pub mod switch;

mod subscribers;

pub use combine::{combine_latest, derive, with_latest_from};
pub use observable::Observable;
pub use subject::Subject;
pub use subscription::{Subscription, SubscriptionSet};
pub use switch::{SwitchLatest, SwitchToken};
