//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Route registration (method(s), pattern(s), action)
//!     → routes.rs (normalize one/many, forward each pair in order)
//!     → dispatcher.rs (latch check, method check, match)
//!     → pattern.rs (literal fast path or compiled matcher)
//!     → action.rs (handler call, or delegate back-reference binding)
//!     → controller.rs (resolve controller, invoke method)
//!     → Return: Routed, or a no-match variant that lets the next route try
//! ```
//!
//! # Design Decisions
//! - Routes evaluate as they are registered; there is no route table in memory
//! - First match wins; the routed latch turns later registrations into no-ops
//! - Unresolvable delegates fall through instead of failing the request
//! - All per-request state lives in `RequestContext`

pub mod action;
pub mod application;
pub mod controller;
pub mod dispatcher;
pub mod pattern;
pub mod routes;

pub use action::{Action, Delegate};
pub use application::Application;
pub use controller::{Controller, ControllerRegistry, MethodTable};
pub use dispatcher::Dispatch;
pub use pattern::{Pattern, PatternError};
pub use routes::Routes;
