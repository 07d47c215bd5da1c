#![forbid(unsafe_code)]

//! Formflow public facade crate.
//!
//! This crate provides the stable, ergonomic surface area for users.

pub mod prelude {
    pub use formflow_core as core;
    pub use formflow_runtime as runtime;

    pub use formflow_core::login::{AuthToken, LoginError, LoginOutcome};
    pub use formflow_core::validator::FieldValue;
    pub use formflow_runtime::controller::LoginForm;
    pub use formflow_runtime::scheduler::Scheduler;
    pub use formflow_runtime::service::{LoginActions, StubLoginService};
}
