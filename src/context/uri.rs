//! URI and base URL derivation.
//!
//! # Responsibilities
//! - Normalize paths and patterns (trim slashes, empty becomes `/`)
//! - Strip the front-controller script prefix and query string from request URIs
//! - Derive the base URL echoed back to applications
//!
//! # Design Decisions
//! - Pure functions over `RequestInfo`, no global state
//! - Script prefixes are only stripped on a path boundary

use super::RequestInfo;

/// Trim leading and trailing slashes. The empty path becomes `/`.
pub fn normalize_path(path: &str) -> String {
    let trimmed = path.trim_matches('/');
    if trimmed.is_empty() {
        "/".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Derive the normalized routing URI for a request.
///
/// Detection order: the request URI (minus script prefix and query string), then path info.
pub fn derive_uri(info: &RequestInfo) -> String {
    let raw = match (&info.request_uri, &info.path_info) {
        (Some(request_uri), _) => {
            let without_script = match info.script_name.as_deref() {
                Some(script) => strip_script(request_uri, script),
                None => request_uri.as_str(),
            };
            strip_query(without_script)
        }
        (None, Some(path_info)) => path_info.as_str(),
        (None, None) => "",
    };

    normalize_path(raw)
}

/// Derive the base URL (`scheme://host/script-dir/`) for a request.
pub fn derive_base_url(info: &RequestInfo) -> String {
    let Some(host) = info.host.as_deref() else {
        return "http://localhost/".to_string();
    };

    let scheme = if info.secure { "https" } else { "http" };
    let directory = match info.script_name.as_deref() {
        Some(script) if !script.is_empty() => {
            let basename = script.rsplit('/').next().unwrap_or_default();
            script.strip_suffix(basename).unwrap_or(script)
        }
        _ => "/",
    };

    format!("{scheme}://{host}{directory}")
}

fn strip_script<'a>(request_uri: &'a str, script: &str) -> &'a str {
    if script.is_empty() {
        return request_uri;
    }

    for prefix in [script, dirname(script)] {
        if let Some(rest) = request_uri.strip_prefix(prefix) {
            if prefix.ends_with('/') || rest.is_empty() || rest.starts_with(['/', '?']) {
                return rest;
            }
        }
    }

    request_uri
}

fn strip_query(uri: &str) -> &str {
    match uri.find('?') {
        Some(pos) => &uri[..pos],
        None => uri,
    }
}

fn dirname(path: &str) -> &str {
    match path.rfind('/') {
        Some(0) => "/",
        Some(pos) => &path[..pos],
        None => ".",
    }
}
