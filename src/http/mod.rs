//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware)
//!     → request.rs (request ID, RequestInfo extraction)
//!     → routing (Application::handle on a fresh RequestContext)
//!     → response.rs (200 with body, or 404)
//!     → Send to client
//! ```

pub mod request;
pub mod response;
pub mod server;

pub use request::{request_info, MakeRequestUuidV4, X_REQUEST_ID};
pub use server::HttpServer;
