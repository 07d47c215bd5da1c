#![forbid(unsafe_code)]

//! The login service boundary and its canned implementations.
//!
//! [`LoginActions`] is the seam between the form pipeline and whatever
//! actually performs authentication. The controller depends only on this
//! trait; the stubs here resolve on an explicitly supplied [`Scheduler`]
//! after a fixed delay, standing in for a real network call.

use std::time::Duration;

use formflow_core::login::{AuthToken, LoginError, LoginOutcome};

use crate::scheduler::Scheduler;

/// One-shot completion for a login call.
pub type LoginCompletion = Box<dyn FnOnce(LoginOutcome)>;

/// The external authentication collaborator.
///
/// Implementations receive already-validated credentials; the controller
/// applies the validation gate before calling. `done` must be invoked
/// exactly once, at any later point in time.
pub trait LoginActions {
    /// Start a login attempt, delivering its outcome through `done`.
    fn login(&self, email: &str, password: &str, done: LoginCompletion);
}

/// Default delay before a stub service settles.
pub const STUB_DELAY: Duration = Duration::from_secs(1);

/// Token issued by [`StubLoginService`] unless overridden.
const STUB_TOKEN: &str = "token123";

/// A login service that always succeeds after a fixed delay.
pub struct StubLoginService {
    scheduler: Scheduler,
    delay: Duration,
    token: String,
}

impl StubLoginService {
    /// Create a stub resolving on `scheduler` after [`STUB_DELAY`].
    #[must_use]
    pub fn new(scheduler: Scheduler) -> Self {
        Self {
            scheduler,
            delay: STUB_DELAY,
            token: STUB_TOKEN.to_string(),
        }
    }

    /// Set the settle delay.
    #[must_use]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Set the issued token.
    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = token.into();
        self
    }
}

impl LoginActions for StubLoginService {
    fn login(&self, _email: &str, _password: &str, done: LoginCompletion) {
        let token = AuthToken::new(self.token.clone());
        self.scheduler
            .schedule_after(self.delay, move || done(Ok(token)));
    }
}

/// A login service that always fails after a fixed delay.
///
/// Exercises the opaque service-error path: the controller forwards the
/// failure without interpreting it.
pub struct FailingLoginService {
    scheduler: Scheduler,
    delay: Duration,
    reason: String,
}

impl FailingLoginService {
    /// Create a failing stub resolving on `scheduler` after [`STUB_DELAY`].
    #[must_use]
    pub fn new(scheduler: Scheduler, reason: impl Into<String>) -> Self {
        Self {
            scheduler,
            delay: STUB_DELAY,
            reason: reason.into(),
        }
    }

    /// Set the settle delay.
    #[must_use]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

impl LoginActions for FailingLoginService {
    fn login(&self, _email: &str, _password: &str, done: LoginCompletion) {
        let error = LoginError::service(self.reason.clone());
        self.scheduler
            .schedule_after(self.delay, move || done(Err(error)));
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
