#![forbid(unsafe_code)]

//! Stateless validation predicates over optional field text.
//!
//! Both predicates are total functions: absent, empty, and non-empty input
//! are three distinct states, and none of them can fail.
//!
//! # Invariants
//!
//! 1. `is_valid_email(x)` is true iff `x` is present and contains `'@'`.
//! 2. `is_valid_password(x)` is true iff `x` is present and non-empty.
//! 3. Neither predicate has side effects.

/// Current text content of a form field.
///
/// `None` means the field has never held text, which is distinct from
/// `Some(String::new())` (present but empty).
pub type FieldValue = Option<String>;

/// True iff `text` is present and contains the character `'@'`.
#[must_use]
pub fn is_valid_email(text: Option<&str>) -> bool {
    text.is_some_and(|t| t.contains('@'))
}

/// True iff `text` is present and non-empty.
#[must_use]
pub fn is_valid_password(text: Option<&str>) -> bool {
    text.is_some_and(|t| !t.is_empty())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
