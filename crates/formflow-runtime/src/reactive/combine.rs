#![forbid(unsafe_code)]

//! Join combinators over reactive sources.
//!
//! Each combinator returns its output together with the [`Subscription`]
//! that keeps the wiring alive. The caller decides the pipeline's lifetime
//! by where it stores the guard, typically a
//! [`SubscriptionSet`](super::SubscriptionSet) owned by the pipeline's
//! owner.
//!
//! # Invariants
//!
//! 1. `derive` output reflects `map(source)` before the source's `set` call
//!    returns.
//! 2. `combine_latest` output reflects both latest inputs after either input
//!    changes; both inputs carry a value from construction, so the first
//!    output exists immediately.
//! 3. `with_latest_from` emits once per trigger event, snapshotting the
//!    latest source values at that instant.

use std::rc::Rc;

use super::observable::Observable;
use super::subject::Subject;
use super::subscription::Subscription;

/// Map a stateful signal through a pure function.
///
/// The output cell updates synchronously on every accepted source change;
/// equal mapped values collapse into no-ops downstream.
#[must_use]
pub fn derive<S, T>(
    source: &Observable<S>,
    map: impl Fn(&S) -> T + 'static,
) -> (Observable<T>, Subscription)
where
    S: Clone + PartialEq + 'static,
    T: Clone + PartialEq + 'static,
{
    let out = Observable::new(source.with(&map));
    let out_for_sub = out.clone();
    let guard = source.subscribe(move |value| out_for_sub.set(map(value)));
    (out, guard)
}

/// Join two stateful signals, re-combining whenever either changes.
///
/// The classic combine-latest: the output always holds
/// `combine(latest_a, latest_b)`.
#[must_use]
pub fn combine_latest<A, B, T>(
    a: &Observable<A>,
    b: &Observable<B>,
    combine: impl Fn(&A, &B) -> T + 'static,
) -> (Observable<T>, Subscription)
where
    A: Clone + PartialEq + 'static,
    B: Clone + PartialEq + 'static,
    T: Clone + PartialEq + 'static,
{
    let combine = Rc::new(combine);
    let out = Observable::new(a.with(|av| b.with(|bv| combine(av, bv))));

    let guard_a = {
        let out = out.clone();
        let b = b.clone();
        let combine = Rc::clone(&combine);
        a.subscribe(move |av| out.set(b.with(|bv| combine(av, bv))))
    };
    let guard_b = {
        let out = out.clone();
        let a = a.clone();
        let combine = Rc::clone(&combine);
        b.subscribe(move |bv| out.set(a.with(|av| combine(av, bv))))
    };

    (out, Subscription::bundle(vec![guard_a, guard_b]))
}

/// Snapshot two stateful signals at each trigger event.
///
/// Emits `(trigger, latest_a, latest_b)` once per trigger. The sources are
/// value cells, so a latest value exists from construction onward.
#[must_use]
pub fn with_latest_from<T, A, B>(
    trigger: &Subject<T>,
    a: &Observable<A>,
    b: &Observable<B>,
) -> (Subject<(T, A, B)>, Subscription)
where
    T: Clone + 'static,
    A: Clone + PartialEq + 'static,
    B: Clone + PartialEq + 'static,
{
    let out = Subject::new();
    let out_for_sub = out.clone();
    let a = a.clone();
    let b = b.clone();
    let guard = trigger.subscribe(move |event: &T| {
        out_for_sub.emit((event.clone(), a.get(), b.get()));
    });
    (out, guard)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
