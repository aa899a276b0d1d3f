//! Response mapping.
//!
//! # Responsibilities
//! - Turn a routed context into a `200 OK` with the action's body
//! - Turn an unrouted context into `404 Not Found`

use axum::{
    body::Body,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};

use crate::context::RequestContext;

const TEXT_PLAIN: &str = "text/plain; charset=utf-8";

/// Body sent when no route matched.
pub const NOT_FOUND_BODY: &str = "No matching route found";

/// Build the HTTP response for a routed (or unrouted) request.
pub fn into_response(mut ctx: RequestContext) -> Response {
    if !ctx.is_routed() {
        return (StatusCode::NOT_FOUND, NOT_FOUND_BODY).into_response();
    }

    let body = ctx.take_output().unwrap_or_default();
    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, TEXT_PLAIN)
        .body(Body::from(body))
        .unwrap_or_else(|_| StatusCode::INTERNAL_SERVER_ERROR.into_response())
}
