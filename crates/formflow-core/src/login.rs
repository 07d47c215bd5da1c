#![forbid(unsafe_code)]

//! Login domain types: tokens, errors, and the credential gate.
//!
//! # Invariants
//!
//! 1. `check_credentials` succeeds iff both validation predicates pass.
//! 2. A [`LoginOutcome`] is immutable once produced; each submit attempt
//!    produces a fresh one.
//!
//! # Failure Modes
//!
//! - [`LoginError::WrongCredentials`]: client-side validation failed; no
//!   service call was attempted.
//! - [`LoginError::Service`]: the login service itself failed. The reason is
//!   carried verbatim and never interpreted here.

use thiserror::Error;

use crate::validator::{is_valid_email, is_valid_password};

/// Opaque session token returned by a successful login.
///
/// The contents are meaningful only to the service that issued them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthToken(String);

impl AuthToken {
    /// Wrap a raw token string.
    #[must_use]
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// The raw token string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Terminal failure of one submit attempt.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoginError {
    /// Client-side validation rejected the credentials.
    #[error("wrong credentials")]
    WrongCredentials,

    /// The login service failed; the reason is propagated opaquely.
    #[error("login service failed: {reason}")]
    Service { reason: String },
}

impl LoginError {
    /// Construct a service failure from any displayable reason.
    #[must_use]
    pub fn service(reason: impl Into<String>) -> Self {
        Self::Service {
            reason: reason.into(),
        }
    }
}

/// Terminal result of one submit attempt.
pub type LoginOutcome = Result<AuthToken, LoginError>;

/// The validation gate applied before any service call.
///
/// On success the validated field text is returned, so callers never have to
/// re-unwrap the optional inputs.
///
/// # Errors
///
/// Returns [`LoginError::WrongCredentials`] if either field fails its
/// predicate.
pub fn check_credentials<'a>(
    email: Option<&'a str>,
    password: Option<&'a str>,
) -> Result<(&'a str, &'a str), LoginError> {
    match (email, password) {
        (Some(e), Some(p)) if is_valid_email(Some(e)) && is_valid_password(Some(p)) => Ok((e, p)),
        _ => Err(LoginError::WrongCredentials),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
