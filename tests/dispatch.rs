//! End-to-end routing behaviour against a single request context.

use waymark::{Action, ControllerRegistry, RequestInfo};

mod common;

use common::{call_log, dispatch, recording_controller, recording_handler};

#[test]
fn test_literal_pattern_matches_only_itself() {
    let controllers = ControllerRegistry::new();
    let log = call_log();

    for uri in ["/about/team", "about/team/", "/about/team?tab=1"] {
        let ctx = dispatch(RequestInfo::new("GET", uri), &controllers, |routes| {
            routes.get("/about/team", recording_handler("team", &log));
        });
        assert!(ctx.is_routed(), "{uri} should match");
    }

    for uri in ["/about", "/about/team/lead", "/about/teams"] {
        let ctx = dispatch(RequestInfo::new("GET", uri), &controllers, |routes| {
            routes.get("/about/team", recording_handler("team", &log));
        });
        assert!(!ctx.is_routed(), "{uri} should not match");
    }

    assert_eq!(*log.lock().unwrap(), vec!["team()"; 3]);
}

#[test]
fn test_numeric_parameter() {
    let controllers = ControllerRegistry::new();
    let log = call_log();

    let ctx = dispatch(RequestInfo::new("GET", "/users/42"), &controllers, |routes| {
        routes.get("/users/(:num)", recording_handler("user", &log));
    });
    assert_eq!(ctx.output(), Some("user(42)"));

    let ctx = dispatch(RequestInfo::new("GET", "/users/abc"), &controllers, |routes| {
        routes.get("/users/(:num)", recording_handler("user", &log));
    });
    assert!(!ctx.is_routed());
}

#[test]
fn test_optional_numeric_parameter() {
    let controllers = ControllerRegistry::new();
    let log = call_log();

    for uri in ["/users", "/users/7"] {
        dispatch(RequestInfo::new("GET", uri), &controllers, |routes| {
            routes.get("/users/(:num?)", recording_handler("users", &log));
        });
    }

    assert_eq!(*log.lock().unwrap(), vec!["users()", "users(7)"]);
}

#[test]
fn test_only_first_match_executes() {
    let controllers = ControllerRegistry::new();
    let log = call_log();

    let ctx = dispatch(RequestInfo::new("GET", "/shop/cart"), &controllers, |routes| {
        routes
            .get("shop/(:any)", recording_handler("a", &log))
            .get("shop/cart", recording_handler("b", &log))
            .any("(:all)", recording_handler("c", &log));
        // Repeated registrations after the match stay no-ops
        for _ in 0..3 {
            routes.get("shop/cart", recording_handler("b", &log));
        }
    });

    assert_eq!(ctx.output(), Some("a(cart)"));
    assert_eq!(*log.lock().unwrap(), vec!["a(cart)"]);
}

#[test]
fn test_back_reference_selects_controller_method() {
    let log = call_log();
    let mut controllers = ControllerRegistry::new();
    controllers.register("Users", {
        let log = log.clone();
        move || recording_controller("Users", &["index", "show"], &log)
    });

    let ctx = dispatch(RequestInfo::new("GET", "/users/show/9"), &controllers, |routes| {
        routes.get("users/(:any)/(:num)", "Users@(:1)");
    });

    assert_eq!(ctx.output(), Some("Users.show(9)"));
    assert_eq!(*log.lock().unwrap(), vec!["Users.show(9)"]);
}

#[test]
fn test_empty_delegate_method_defaults_to_index() {
    let log = call_log();
    let mut controllers = ControllerRegistry::new();
    controllers.register("Users", {
        let log = log.clone();
        move || recording_controller("Users", &["index"], &log)
    });

    let ctx = dispatch(RequestInfo::new("GET", "/users"), &controllers, |routes| {
        routes.get("users", "Users@");
    });

    assert_eq!(ctx.output(), Some("Users.index()"));
}

#[test]
fn test_secure_route_ignored_over_http() {
    let controllers = ControllerRegistry::new();
    let log = call_log();

    let ctx = dispatch(RequestInfo::new("GET", "/billing"), &controllers, |routes| {
        routes.secure("GET", "billing", recording_handler("billing", &log));
    });
    assert!(!ctx.is_routed());
    assert!(log.lock().unwrap().is_empty());

    let ctx = dispatch(RequestInfo::new("GET", "/billing").secure(true), &controllers, |routes| {
        routes.secure("GET", "billing", recording_handler("billing", &log));
    });
    assert_eq!(ctx.output(), Some("billing()"));
}

#[test]
fn test_controller_convention() {
    let log = call_log();
    let mut controllers = ControllerRegistry::new();
    controllers.provide("controllers/admin/users", "users", {
        let log = log.clone();
        move || recording_controller("admin/users", &["index", "delete"], &log)
    });

    let ctx = dispatch(RequestInfo::new("POST", "/admin/users/delete/9"), &controllers, |routes| {
        routes.controller(["blog", "admin.users"]);
    });
    assert_eq!(ctx.output(), Some("admin/users.delete(9)"));

    // No method segment: the default method runs
    let ctx = dispatch(RequestInfo::new("GET", "/admin/users"), &controllers, |routes| {
        routes.controller("admin.users");
    });
    assert_eq!(ctx.output(), Some("admin/users.index()"));

    assert_eq!(
        *log.lock().unwrap(),
        vec!["admin/users.delete(9)", "admin/users.index()"]
    );
}

#[test]
fn test_controller_custom_default_method() {
    let log = call_log();
    let mut controllers = ControllerRegistry::new();
    controllers.register("reports", {
        let log = log.clone();
        move || recording_controller("reports", &["index", "summary"], &log)
    });

    let ctx = dispatch(RequestInfo::new("GET", "/reports"), &controllers, |routes| {
        routes.controller_with_default("reports", "summary");
    });
    assert_eq!(ctx.output(), Some("reports.summary()"));
}

#[test]
fn test_unresolved_delegate_falls_through() {
    let log = call_log();
    let mut controllers = ControllerRegistry::new();
    controllers.register("Pages", {
        let log = log.clone();
        move || recording_controller("Pages", &["show"], &log)
    });

    let ctx = dispatch(RequestInfo::new("GET", "/pages/faq"), &controllers, |routes| {
        routes
            .get("pages/(:any)", "Missing@show")
            .get("pages/(:any)", "not a delegate")
            .get("pages/(:any)", "Pages@edit")
            .get("pages/(:any)", "Pages@show");
    });

    assert_eq!(ctx.output(), Some("Pages.show(faq)"));
}

#[test]
fn test_method_sets_and_pattern_sets() {
    let controllers = ControllerRegistry::new();

    let ctx = dispatch(RequestInfo::new("delete", "/posts/3"), &controllers, |routes| {
        routes.register(
            ["PUT", "DELETE"],
            ["posts/(:num)", "articles/(:num)"],
            Action::handler(|p| format!("changed {}", p[0])),
        );
    });
    assert_eq!(ctx.output(), Some("changed 3"));
}

#[test]
fn test_uri_normalization() {
    let controllers = ControllerRegistry::new();

    for uri in ["/foo/", "foo", "/foo"] {
        let ctx = dispatch(RequestInfo::new("GET", uri), &controllers, |_| {});
        assert_eq!(ctx.uri(), "foo");
    }

    let ctx = dispatch(RequestInfo::new("GET", ""), &controllers, |routes| {
        routes.get("/", Action::handler(|_| "root".to_string()));
    });
    assert_eq!(ctx.uri(), "/");
    assert_eq!(ctx.output(), Some("root"));
}
