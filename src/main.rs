//! waymark demo server
//!
//! Serves a small application over HTTP using the first-match router.
//!
//! # Architecture Overview
//!
//! ```text
//!                 ┌───────────────────────────────────────────────────────────┐
//!                 │                         WAYMARK                           │
//!                 │                                                           │
//!  Client Request │  ┌─────────┐   ┌──────────────┐   ┌────────────────────┐  │
//!  ───────────────┼─▶│  http   │──▶│   context    │──▶│ routing (in order) │  │
//!                 │  │ server  │   │ uri, method, │   │ get/post/.../      │  │
//!                 │  └─────────┘   │ base url     │   │ controller         │  │
//!                 │                └──────────────┘   └─────────┬──────────┘  │
//!                 │                                             │ first match │
//!                 │                                             ▼             │
//!  Client Response│  ┌─────────┐                      ┌────────────────────┐  │
//!  ◀──────────────┼──│response │◀─────────────────────│ handler / delegate │  │
//!                 │  │200 / 404│                      │ (controller call)  │  │
//!                 │  └─────────┘                      └────────────────────┘  │
//!                 └───────────────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use waymark::config::{load_config, WaymarkConfig};
use waymark::lifecycle::shutdown;
use waymark::observability::logging;
use waymark::{Action, Application, Controller, ControllerRegistry, HttpServer, Routes};

#[derive(Parser)]
#[command(name = "waymark")]
#[command(about = "First-match-wins URL router demo server", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the listener bind address
    #[arg(short, long)]
    bind: Option<String>,
}

/// Demo controller, loaded from `controllers/admin/users` on first use.
struct UsersController;

impl Controller for UsersController {
    fn call(&mut self, method: &str, params: &[String]) -> Option<String> {
        match method {
            "index" => Some("users: alice, bob\n".to_string()),
            "show" => Some(format!("user {}\n", first_param(params))),
            "delete" => Some(format!("deleted user {}\n", first_param(params))),
            _ => None,
        }
    }
}

fn first_param(params: &[String]) -> &str {
    params.first().map_or("?", String::as_str)
}

fn routes(routes: &mut Routes<'_>) {
    routes
        .get("/", Action::handler(|_| "waymark is running\n".to_string()))
        .get(
            ["hello", "hello/(:any)"],
            Action::handler(|params| {
                let name = params.first().map_or("stranger", String::as_str);
                format!("Hello, {name}!\n")
            }),
        )
        .secure("GET", "account", Action::handler(|_| "account settings\n".to_string()))
        .controller("admin.users");
}

fn application(config: &WaymarkConfig) -> Application {
    let locations = config.routing.controller_locations.clone();
    let mut controllers = ControllerRegistry::with_locations(locations);
    controllers.provide("controllers/admin/users", "users", || UsersController);
    Application::new(controllers, routes)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => WaymarkConfig::default(),
    };
    if let Some(bind) = cli.bind {
        config.listener.bind_address = bind;
    }

    logging::init(&config.observability.log_level);
    tracing::info!("waymark v{} starting", env!("CARGO_PKG_VERSION"));

    tracing::info!(
        bind_address = %config.listener.bind_address,
        script_name = %config.routing.script_name,
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let server = HttpServer::new(config.clone(), application(&config));
    server.run(listener, shutdown::ctrl_c()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
