//! Per-request routing context.
//!
//! # Data Flow
//! ```text
//! Host environment (HTTP adapter, tests)
//!     → RequestInfo (method, request URI, script name, host, TLS)
//!     → RequestContext (normalized URI, uppercase method, base URL)
//!     → passed by &mut into every route registration
//!     → routed latch + output body read back by the host
//! ```
//!
//! # Design Decisions
//! - One context per request; nothing is shared between requests
//! - Request-derived strings are computed once, at construction
//! - The routed latch is monotonic: it can be set, never cleared

pub mod uri;

pub use uri::normalize_path;

/// Raw request information supplied by the host environment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestInfo {
    /// HTTP method as received (any case).
    pub method: String,

    /// Request target including the query string (e.g. `/index.php/users?page=2`).
    pub request_uri: Option<String>,

    /// Path of the front-controller script, stripped from the request URI.
    pub script_name: Option<String>,

    /// Path info, used when no request URI is available.
    pub path_info: Option<String>,

    /// Host header value.
    pub host: Option<String>,

    /// Whether the request arrived over TLS.
    pub secure: bool,
}

impl RequestInfo {
    /// Create request information from a method and request target.
    pub fn new(method: impl Into<String>, request_uri: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            request_uri: Some(request_uri.into()),
            ..Self::default()
        }
    }

    pub fn with_script_name(mut self, script_name: impl Into<String>) -> Self {
        self.script_name = Some(script_name.into());
        self
    }

    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }

    pub fn secure(mut self, secure: bool) -> Self {
        self.secure = secure;
        self
    }
}

/// Routing state for a single request.
#[derive(Debug, Clone)]
pub struct RequestContext {
    uri: String,
    method: String,
    secure: bool,
    base_url: String,
    routed: bool,
    output: Option<String>,
}

impl RequestContext {
    /// Derive the routing context from raw request information.
    pub fn new(info: &RequestInfo) -> Self {
        Self {
            uri: uri::derive_uri(info),
            method: info.method.to_uppercase(),
            secure: info.secure,
            base_url: uri::derive_base_url(info),
            routed: false,
            output: None,
        }
    }

    /// Normalized request path (no query string, no surrounding slashes, `/` when empty).
    pub fn uri(&self) -> &str {
        &self.uri
    }

    /// Uppercase request method.
    pub fn method(&self) -> &str {
        &self.method
    }

    pub fn is_secure(&self) -> bool {
        self.secure
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Base URL with `path` appended.
    pub fn base(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// True once an action has executed for this request.
    pub fn is_routed(&self) -> bool {
        self.routed
    }

    /// Body produced by the executed action, if any.
    pub fn output(&self) -> Option<&str> {
        self.output.as_deref()
    }

    pub fn take_output(&mut self) -> Option<String> {
        self.output.take()
    }

    /// Record the action's output and latch the context as routed.
    pub(crate) fn complete(&mut self, body: String) {
        self.output = Some(body);
        self.routed = true;
    }
}
