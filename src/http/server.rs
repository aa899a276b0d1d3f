//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum router that hands every request to the application
//! - Wire up middleware (request ID, tracing, timeout)
//! - Convert HTTP requests into routing contexts and back into responses
//! - Bind server to listener and shut down gracefully

use axum::{
    body::Body,
    extract::State,
    http::Request,
    response::Response,
    routing::any,
    Router,
};
use std::future::Future;
use std::time::Duration;
use tokio::net::TcpListener;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::{ListenerConfig, WaymarkConfig};
use crate::http::request::{request_info, MakeRequestUuidV4, X_REQUEST_ID};
use crate::http::response::into_response;
use crate::routing::Application;

/// State injected into the handler.
#[derive(Clone)]
pub struct AppState {
    pub application: Application,
    pub script_name: String,
    pub listener: ListenerConfig,
}

/// HTTP host for a routing application.
pub struct HttpServer {
    router: Router,
    config: WaymarkConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: WaymarkConfig, application: Application) -> Self {
        let state = AppState {
            application,
            script_name: config.routing.script_name.clone(),
            listener: config.listener.clone(),
        };

        let router = Self::build_router(&config, state);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &WaymarkConfig, state: AppState) -> Router {
        Router::new()
            .route("/{*path}", any(route_handler))
            .route("/", any(route_handler))
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(TraceLayer::new_for_http())
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV4))
    }

    /// The Axum router, for embedding or in-process testing.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server until `shutdown` completes.
    pub async fn run<F>(self, listener: TcpListener, shutdown: F) -> Result<(), std::io::Error>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            script_name = %self.config.routing.script_name,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown)
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &WaymarkConfig {
        &self.config
    }
}

/// Routes a request through the application.
async fn route_handler(State(state): State<AppState>, request: Request<Body>) -> Response {
    let request_id = request
        .headers()
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
        .to_string();

    let info = request_info(&request, &state.script_name, &state.listener);
    let ctx = state.application.handle(&info);

    if ctx.is_routed() {
        tracing::debug!(
            request_id = %request_id,
            method = %ctx.method(),
            uri = %ctx.uri(),
            "Request routed"
        );
    } else {
        tracing::warn!(
            request_id = %request_id,
            method = %ctx.method(),
            uri = %ctx.uri(),
            secure = ctx.is_secure(),
            "No route matched"
        );
    }

    into_response(ctx)
}
