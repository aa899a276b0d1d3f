//! First-match-wins URL router.
//!
//! Routes are evaluated as they are registered: the first registration whose method and pattern
//! match the current request runs its action, and every later registration becomes a no-op.

pub mod config;
pub mod context;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod routing;

pub use config::WaymarkConfig;
pub use context::{RequestContext, RequestInfo};
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use routing::{
    Action, Application, Controller, ControllerRegistry, Delegate, Dispatch, MethodTable, Pattern,
    PatternError, Routes,
};
