#![forbid(unsafe_code)]

//! Core: field values, validation predicates, and login domain types.

pub mod login;
pub mod validator;

pub use login::{AuthToken, LoginError, LoginOutcome, check_credentials};
pub use validator::{FieldValue, is_valid_email, is_valid_password};
