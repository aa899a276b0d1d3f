//! Route registration facade.
//!
//! Registration calls evaluate immediately against the current request, in call order. The first
//! matching registration executes; everything registered after it is a no-op.
//!
//! ```
//! use waymark::{Action, ControllerRegistry, RequestContext, RequestInfo, Routes};
//!
//! let controllers = ControllerRegistry::new();
//! let mut ctx = RequestContext::new(&RequestInfo::new("GET", "/users/42"));
//!
//! Routes::new(&mut ctx, &controllers)
//!     .get("users/(:num)", Action::handler(|p| format!("user {}", p[0])))
//!     .get("users/(:any)", Action::handler(|_| "never".to_string()));
//!
//! assert_eq!(ctx.output(), Some("user 42"));
//! ```

use crate::context::RequestContext;
use crate::routing::action::{Action, Delegate, DEFAULT_METHOD};
use crate::routing::controller::ControllerRegistry;
use crate::routing::dispatcher::{self, ANY_METHOD};

/// Number of optional segments appended to controller routes.
pub const CONTROLLER_SEGMENTS: usize = 6;

/// One or many strings: patterns, methods or controller names.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OneOrMany(Vec<String>);

pub type Patterns = OneOrMany;
pub type Methods = OneOrMany;
pub type Controllers = OneOrMany;

impl OneOrMany {
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl From<&str> for OneOrMany {
    fn from(value: &str) -> Self {
        Self(vec![value.to_string()])
    }
}

impl From<String> for OneOrMany {
    fn from(value: String) -> Self {
        Self(vec![value])
    }
}

impl From<&[&str]> for OneOrMany {
    fn from(values: &[&str]) -> Self {
        Self(values.iter().map(|v| v.to_string()).collect())
    }
}

impl<const N: usize> From<[&str; N]> for OneOrMany {
    fn from(values: [&str; N]) -> Self {
        Self(values.iter().map(|v| v.to_string()).collect())
    }
}

impl From<Vec<&str>> for OneOrMany {
    fn from(values: Vec<&str>) -> Self {
        Self(values.into_iter().map(str::to_string).collect())
    }
}

impl From<Vec<String>> for OneOrMany {
    fn from(values: Vec<String>) -> Self {
        Self(values)
    }
}

/// Registers routes against one request.
pub struct Routes<'a> {
    ctx: &'a mut RequestContext,
    controllers: &'a ControllerRegistry,
}

impl<'a> Routes<'a> {
    pub fn new(ctx: &'a mut RequestContext, controllers: &'a ControllerRegistry) -> Self {
        Self { ctx, controllers }
    }

    /// Register a GET route.
    pub fn get(&mut self, patterns: impl Into<Patterns>, action: impl Into<Action>) -> &mut Self {
        self.register("GET", patterns, action)
    }

    /// Register a POST route.
    pub fn post(&mut self, patterns: impl Into<Patterns>, action: impl Into<Action>) -> &mut Self {
        self.register("POST", patterns, action)
    }

    /// Register a PUT route.
    pub fn put(&mut self, patterns: impl Into<Patterns>, action: impl Into<Action>) -> &mut Self {
        self.register("PUT", patterns, action)
    }

    /// Register a DELETE route.
    pub fn delete(
        &mut self,
        patterns: impl Into<Patterns>,
        action: impl Into<Action>,
    ) -> &mut Self {
        self.register("DELETE", patterns, action)
    }

    /// Register a route for every request method.
    pub fn any(&mut self, patterns: impl Into<Patterns>, action: impl Into<Action>) -> &mut Self {
        self.register(ANY_METHOD, patterns, action)
    }

    /// Register a route that only exists for HTTPS requests.
    pub fn secure(
        &mut self,
        methods: impl Into<Methods>,
        patterns: impl Into<Patterns>,
        action: impl Into<Action>,
    ) -> &mut Self {
        if !self.ctx.is_secure() {
            return self;
        }
        self.register(methods, patterns, action)
    }

    /// Register `action` under every combination of `methods` and `patterns`, methods first.
    pub fn register(
        &mut self,
        methods: impl Into<Methods>,
        patterns: impl Into<Patterns>,
        action: impl Into<Action>,
    ) -> &mut Self {
        let methods = methods.into();
        let patterns = patterns.into();
        let action = action.into();

        for method in methods.iter() {
            for pattern in patterns.iter() {
                dispatcher::route(self.ctx, self.controllers, method, pattern, &action);
            }
        }
        self
    }

    /// Register conventional controller routes, defaulting to the `index` method.
    pub fn controller(&mut self, controllers: impl Into<Controllers>) -> &mut Self {
        self.controller_with_default(controllers, DEFAULT_METHOD)
    }

    /// Register conventional controller routes.
    ///
    /// `admin.users` serves `admin/users/<method>/<arg>...` with up to six segments after the
    /// controller path: the first selects the method (`default_method` when absent), the rest
    /// are passed as parameters.
    pub fn controller_with_default(
        &mut self,
        controllers: impl Into<Controllers>,
        default_method: &str,
    ) -> &mut Self {
        for name in controllers.into().iter() {
            let path = name.replace('.', "/");

            // Skip controllers that cannot match before compiling anything
            if !self.ctx.uri().to_lowercase().starts_with(&path.to_lowercase()) {
                continue;
            }

            let pattern = format!("{}{}", path, "/(:any?)".repeat(CONTROLLER_SEGMENTS));
            let action = Delegate::new(path.as_str(), "(:1)").with_default_method(default_method);
            dispatcher::route(self.ctx, self.controllers, ANY_METHOD, &pattern, &action.into());
        }
        self
    }

    /// True once a registration has executed.
    pub fn is_routed(&self) -> bool {
        self.ctx.is_routed()
    }

    /// The request being routed.
    pub fn context(&self) -> &RequestContext {
        self.ctx
    }
}
