#![forbid(unsafe_code)]

//! Runtime: reactive pipeline primitives, cooperative scheduling, the login
//! service boundary, and the login form controller.

pub mod controller;
pub mod reactive;
pub mod scheduler;
pub mod service;

pub use controller::LoginForm;
pub use scheduler::Scheduler;
pub use service::{FailingLoginService, LoginActions, LoginCompletion, StubLoginService};
