//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! routing (route matched / rejected / unresolved events)
//! http (request spans, request IDs)
//!     → logging.rs (tracing subscriber, env filter)
//!     → stdout
//! ```
//!
//! # Design Decisions
//! - Structured `tracing` fields rather than formatted messages
//! - Request ID flows through every request span

pub mod logging;
