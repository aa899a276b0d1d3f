//! First-match dispatch.
//!
//! # Responsibilities
//! - Evaluate one registration against the request context
//! - Invoke the matched action and latch the context as routed
//!
//! # Design Decisions
//! - A routed context short-circuits before any method or pattern check
//! - Every failure is a `Dispatch` value, never an error: later routes get their chance
//! - The latch is set only when an action actually produced output

use crate::context::{normalize_path, RequestContext};
use crate::routing::action::Action;
use crate::routing::controller::ControllerRegistry;
use crate::routing::pattern::Pattern;

/// Wildcard method accepted by every request.
pub const ANY_METHOD: &str = "*";

/// Outcome of evaluating a single registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    /// An earlier registration already routed this request.
    Skipped,
    /// The request method differs.
    MethodMismatch,
    /// The path does not match the pattern.
    NoMatch,
    /// The delegate's controller or controller method could not be found.
    Unresolved,
    /// The action is not a usable delegate.
    Malformed,
    /// The action executed.
    Routed,
}

impl Dispatch {
    pub fn is_routed(self) -> bool {
        self == Dispatch::Routed
    }
}

/// Evaluate a route registration and execute its action on match.
pub fn route(
    ctx: &mut RequestContext,
    controllers: &ControllerRegistry,
    method: &str,
    pattern: &str,
    action: &Action,
) -> Dispatch {
    // 1. Only route once
    if ctx.is_routed() {
        return Dispatch::Skipped;
    }

    // 2. Request method
    if method != ANY_METHOD && method.to_uppercase() != ctx.method() {
        return Dispatch::MethodMismatch;
    }

    // 3. Literal fast path, then the compiled matcher
    let normalized = normalize_path(pattern);
    let params = if normalized == ctx.uri() {
        Vec::new()
    } else {
        let compiled = match Pattern::compile(&normalized) {
            Ok(compiled) => compiled,
            Err(e) => {
                tracing::warn!(
                    pattern = %pattern,
                    error = %e,
                    "Skipping route with invalid pattern"
                );
                return Dispatch::NoMatch;
            }
        };

        match compiled.captures(ctx.uri()) {
            Some(params) => params,
            None => {
                tracing::trace!(pattern = %normalized, uri = %ctx.uri(), "Route did not match");
                return Dispatch::NoMatch;
            }
        }
    };

    // 4. Execute
    let outcome = invoke(ctx, controllers, action, params);
    if outcome.is_routed() {
        tracing::debug!(
            method = %ctx.method(),
            uri = %ctx.uri(),
            pattern = %normalized,
            action = ?action,
            "Route matched"
        );
    }
    outcome
}

fn invoke(
    ctx: &mut RequestContext,
    controllers: &ControllerRegistry,
    action: &Action,
    params: Vec<String>,
) -> Dispatch {
    match action {
        Action::Handler(handler) => {
            let body = handler(&params);
            ctx.complete(body);
            Dispatch::Routed
        }
        Action::Delegate(delegate) => {
            let bound = delegate.bind(params);

            let Some(mut controller) = controllers.instantiate(&bound.controller) else {
                tracing::debug!(
                    controller = %bound.controller,
                    "Controller not found, trying next route"
                );
                return Dispatch::Unresolved;
            };

            match controller.call(&bound.method, &bound.params) {
                Some(body) => {
                    ctx.complete(body);
                    Dispatch::Routed
                }
                None => {
                    tracing::debug!(
                        controller = %bound.controller,
                        method = %bound.method,
                        "Controller method not found, trying next route"
                    );
                    Dispatch::Unresolved
                }
            }
        }
        Action::Malformed(raw) => {
            tracing::debug!(action = %raw, "Ignoring malformed action");
            Dispatch::Malformed
        }
    }
}
