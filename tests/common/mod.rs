//! Shared utilities for integration tests.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use tokio::net::TcpListener;
use waymark::{
    Action, Application, ControllerRegistry, HttpServer, MethodTable, RequestContext, RequestInfo,
    Routes, Shutdown, WaymarkConfig,
};

/// Calls recorded by test controllers and handlers, in order.
#[allow(dead_code)]
pub type CallLog = Arc<Mutex<Vec<String>>>;

#[allow(dead_code)]
pub fn call_log() -> CallLog {
    Arc::new(Mutex::new(Vec::new()))
}

/// A controller table whose methods record `name.method(args)` and echo it back.
#[allow(dead_code)]
pub fn recording_controller(
    name: &'static str,
    methods: &[&'static str],
    log: &CallLog,
) -> MethodTable {
    methods.iter().fold(MethodTable::new(), |table, &method| {
        let log = log.clone();
        table.method(method, move |params| {
            let call = format!("{name}.{method}({})", params.join(","));
            log.lock().unwrap().push(call.clone());
            call
        })
    })
}

/// A handler that records `label(args)` and echoes it back.
#[allow(dead_code)]
pub fn recording_handler(label: &'static str, log: &CallLog) -> Action {
    let log = log.clone();
    Action::handler(move |params| {
        let call = format!("{label}({})", params.join(","));
        log.lock().unwrap().push(call.clone());
        call
    })
}

/// Route a single request through `routes` and return the finished context.
#[allow(dead_code)]
pub fn dispatch<F>(info: RequestInfo, controllers: &ControllerRegistry, routes: F) -> RequestContext
where
    F: FnOnce(&mut Routes<'_>),
{
    let mut ctx = RequestContext::new(&info);
    routes(&mut Routes::new(&mut ctx, controllers));
    ctx
}

/// Application used by the HTTP tests.
#[allow(dead_code)]
pub fn test_application() -> Application {
    let mut controllers = ControllerRegistry::new();
    controllers.provide("controllers/admin/users", "users", || {
        MethodTable::new()
            .method("index", |_| "users index".to_string())
            .method("delete", |p| format!("deleted {}", p.join(",")))
    });

    Application::new(controllers, |routes| {
        routes
            .get("/", Action::handler(|_| "home".to_string()))
            .get("users/(:num)", Action::handler(|p| format!("user {}", p[0])))
            .post("users", Action::handler(|_| "created".to_string()))
            .secure("GET", "account", Action::handler(|_| "account".to_string()))
            .controller("admin.users");
    })
}

/// Start a server for `application` on an ephemeral port.
#[allow(dead_code)]
pub async fn start_server(application: Application) -> (SocketAddr, Shutdown) {
    let mut config = WaymarkConfig::default();
    config.listener.bind_address = "127.0.0.1:0".into();

    let listener = TcpListener::bind(&config.listener.bind_address).await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server = HttpServer::new(config, application);
    let stop = shutdown.wait();
    tokio::spawn(async move {
        let _ = server.run(listener, stop).await;
    });

    (addr, shutdown)
}
