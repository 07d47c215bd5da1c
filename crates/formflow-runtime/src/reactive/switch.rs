#![forbid(unsafe_code)]

//! Switch-latest delivery tracking.
//!
//! [`SwitchLatest`] decides which of several overlapping asynchronous
//! attempts is allowed to deliver its result: only the most recently begun
//! one. Beginning a new attempt supersedes every earlier token; a completion
//! holding a stale token checks [`is_current`](SwitchLatest::is_current) and
//! drops its result.
//!
//! Supersession is interest-withdrawal, not cancellation: the superseded
//! operation keeps running, its result is simply never delivered.
//!
//! # Invariants
//!
//! 1. At most one token is current at any time.
//! 2. `begin` makes every previously issued token stale, permanently.
//! 3. A token never becomes current again once stale.

use std::cell::Cell;

/// Proof that a particular attempt was begun.
///
/// Compare against the issuing tracker with
/// [`SwitchLatest::is_current`] before delivering the attempt's result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwitchToken(u64);

/// Generation tracker for switch-latest delivery.
#[derive(Debug, Default)]
pub struct SwitchLatest {
    generation: Cell<u64>,
}

impl SwitchLatest {
    /// Create a tracker with no attempt begun.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin a new attempt, superseding all earlier ones.
    #[must_use]
    pub fn begin(&self) -> SwitchToken {
        let next = self.generation.get() + 1;
        self.generation.set(next);
        SwitchToken(next)
    }

    /// Whether `token` belongs to the most recently begun attempt.
    #[must_use]
    pub fn is_current(&self, token: SwitchToken) -> bool {
        self.generation.get() == token.0
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
