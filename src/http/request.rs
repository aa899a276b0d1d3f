//! Request handling.
//!
//! # Responsibilities
//! - Generate unique request IDs (UUID v4)
//! - Extract routing-relevant information (method, target, host, TLS) from HTTP requests
//!
//! # Design Decisions
//! - Request ID added as early as possible for tracing
//! - TLS is detected from the listener setting or the URI scheme
//! - `X-Forwarded-Proto` is client-controlled, so it only counts behind a trusted proxy

use axum::http::{header, HeaderValue, Request};
use tower_http::request_id::{MakeRequestId, RequestId};
use uuid::Uuid;

use crate::config::ListenerConfig;
use crate::context::RequestInfo;

/// Header carrying the request ID.
pub const X_REQUEST_ID: &str = "x-request-id";

const X_FORWARDED_PROTO: &str = "x-forwarded-proto";

/// Generates a UUID v4 for every request without an `x-request-id` header.
#[derive(Debug, Clone, Copy, Default)]
pub struct MakeRequestUuidV4;

impl MakeRequestId for MakeRequestUuidV4 {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        HeaderValue::from_str(&Uuid::new_v4().to_string())
            .ok()
            .map(RequestId::new)
    }
}

/// Build routing input from an HTTP request.
pub fn request_info<B>(
    request: &Request<B>,
    script_name: &str,
    listener: &ListenerConfig,
) -> RequestInfo {
    let headers = request.headers();

    let host = headers
        .get(header::HOST)
        .and_then(|h| h.to_str().ok())
        .map(str::to_string)
        .or_else(|| request.uri().authority().map(|a| a.to_string()));

    let forwarded_https = listener.trust_forwarded_proto
        && headers
            .get(X_FORWARDED_PROTO)
            .and_then(|h| h.to_str().ok())
            .is_some_and(|proto| proto.eq_ignore_ascii_case("https"));
    let secure = listener.tls_terminated
        || forwarded_https
        || request.uri().scheme_str() == Some("https");

    let target = request
        .uri()
        .path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or("/");

    let mut info = RequestInfo::new(request.method().as_str(), target).secure(secure);
    if !script_name.is_empty() {
        info = info.with_script_name(script_name);
    }
    if let Some(host) = host {
        info = info.with_host(host);
    }
    info
}
