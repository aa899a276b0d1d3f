//! Route actions.
//!
//! An action is either a handler closure or a `"Controller@method"` delegate. Delegate method
//! names may contain back-references (`(:1)`, `(:2)`, ...) to captured parameters; substituted
//! parameters are consumed and not passed on to the controller method.

use std::fmt;
use std::sync::{Arc, LazyLock};

use regex::Regex;

/// Method invoked when a delegate does not name one.
pub const DEFAULT_METHOD: &str = "index";

static BACK_REFERENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(:[0-9]+\)").expect("back-reference expression is valid"));

/// Handler closure: receives the positional parameters, returns the response body.
pub type HandlerFn = dyn Fn(&[String]) -> String + Send + Sync;

/// What a matched route executes.
#[derive(Clone)]
pub enum Action {
    /// A closure invoked with the captured parameters.
    Handler(Arc<HandlerFn>),
    /// A controller method resolved through the controller registry.
    Delegate(Delegate),
    /// A string that is not a `"Controller@method"` delegate. Never executes.
    Malformed(String),
}

impl Action {
    /// Wrap a closure as a handler action.
    pub fn handler<F>(f: F) -> Self
    where
        F: Fn(&[String]) -> String + Send + Sync + 'static,
    {
        Action::Handler(Arc::new(f))
    }

    /// Parse a `"Controller@method"` string.
    pub fn delegate(spec: &str) -> Self {
        match Delegate::parse(spec) {
            Some(delegate) => Action::Delegate(delegate),
            None => Action::Malformed(spec.to_string()),
        }
    }
}

impl fmt::Debug for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Handler(_) => f.write_str("Handler(..)"),
            Action::Delegate(d) => f.debug_tuple("Delegate").field(d).finish(),
            Action::Malformed(raw) => f.debug_tuple("Malformed").field(raw).finish(),
        }
    }
}

impl From<&str> for Action {
    fn from(spec: &str) -> Self {
        Action::delegate(spec)
    }
}

impl From<String> for Action {
    fn from(spec: String) -> Self {
        Action::delegate(&spec)
    }
}

impl From<Delegate> for Action {
    fn from(delegate: Delegate) -> Self {
        Action::Delegate(delegate)
    }
}

/// A `"Controller@method"` delegate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delegate {
    controller: String,
    method: String,
    default_method: String,
}

/// A delegate with back-references resolved against a parameter list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundDelegate {
    pub controller: String,
    pub method: String,
    pub params: Vec<String>,
}

impl Delegate {
    pub fn new(controller: impl Into<String>, method: impl Into<String>) -> Self {
        Self {
            controller: controller.into(),
            method: method.into(),
            default_method: DEFAULT_METHOD.to_string(),
        }
    }

    /// Parse `"Controller@method"`. The controller part must be non-empty; the method part may be
    /// empty. Anything after a second `@` is ignored.
    pub fn parse(spec: &str) -> Option<Self> {
        let (controller, rest) = spec.split_once('@')?;
        if controller.is_empty() {
            return None;
        }
        let method = rest.split('@').next().unwrap_or_default();
        Some(Self::new(controller, method))
    }

    /// Method used when the resolved method name is empty.
    pub fn with_default_method(mut self, method: impl Into<String>) -> Self {
        self.default_method = method.into();
        self
    }

    /// Controller path, e.g. `admin/users`.
    pub fn controller(&self) -> &str {
        &self.controller
    }

    /// Method template, possibly containing back-references.
    pub fn method(&self) -> &str {
        &self.method
    }

    /// Resolve back-references against `params`.
    ///
    /// Every `(:N)` is replaced with the Nth parameter (1-based) and that parameter is removed
    /// from the list. Back-references to missing parameters are dropped. An empty result falls
    /// back to the default method.
    pub fn bind(&self, params: Vec<String>) -> BoundDelegate {
        let mut method = self.method.clone();
        let mut params = params;

        if method.contains("(:") {
            let mut remaining = Vec::with_capacity(params.len());
            for (index, value) in params.into_iter().enumerate() {
                let reference = format!("(:{})", index + 1);
                if method.contains(&reference) {
                    method = method.replace(&reference, &value);
                } else {
                    remaining.push(value);
                }
            }
            params = remaining;
            method = BACK_REFERENCE.replace_all(&method, "").into_owned();
        }

        if method.is_empty() {
            method = self.default_method.clone();
        }

        BoundDelegate {
            controller: self.controller.clone(),
            method,
            params,
        }
    }
}

impl fmt::Display for Delegate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.controller, self.method)
    }
}
