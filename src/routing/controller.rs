//! Controller registry and late-bound controller resolution.
//!
//! # Responsibilities
//! - Map controller type names to factories
//! - Hold deferred controller sources keyed by location, loaded on first use
//! - Resolve a delegate's controller path to a fresh controller instance
//!
//! # Design Decisions
//! - Types are looked up by base name (`admin/users` resolves type `users`)
//! - Candidate locations are tried in order; only the first existing source is loaded
//! - Loading is idempotent: a type already defined is never replaced by a source
//! - Controllers select methods by matching on the name, no reflection

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

/// Placeholder substituted with the controller path in location templates.
pub const CONTROLLER_PLACEHOLDER: &str = "{controller}";

/// Default candidate source locations, tried in order.
pub const DEFAULT_LOCATIONS: [&str; 2] = ["{controller}", "controllers/{controller}"];

/// A routable controller.
pub trait Controller: Send {
    /// Invoke the method named `method`.
    ///
    /// Returns the response body, or `None` when the controller has no such method.
    fn call(&mut self, method: &str, params: &[String]) -> Option<String>;
}

/// Creates controller instances.
pub type ControllerFactory = Arc<dyn Fn() -> Box<dyn Controller> + Send + Sync>;

type MethodFn = Arc<dyn Fn(&[String]) -> String + Send + Sync>;

/// A controller assembled from named closures.
#[derive(Clone, Default)]
pub struct MethodTable {
    methods: HashMap<String, MethodFn>,
}

impl MethodTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a method.
    pub fn method<F>(mut self, name: impl Into<String>, f: F) -> Self
    where
        F: Fn(&[String]) -> String + Send + Sync + 'static,
    {
        self.methods.insert(name.into(), Arc::new(f));
        self
    }
}

impl Controller for MethodTable {
    fn call(&mut self, method: &str, params: &[String]) -> Option<String> {
        self.methods.get(method).map(|f| f(params))
    }
}

impl fmt::Debug for MethodTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MethodTable")
            .field("methods", &self.methods.keys().collect::<Vec<_>>())
            .finish()
    }
}

#[derive(Clone)]
struct Source {
    name: String,
    factory: ControllerFactory,
}

/// Registry of controller types and deferred controller sources.
pub struct ControllerRegistry {
    defined: RwLock<HashMap<String, ControllerFactory>>,
    sources: HashMap<String, Source>,
    locations: Vec<String>,
}

impl ControllerRegistry {
    /// Create an empty registry using the default candidate locations.
    pub fn new() -> Self {
        Self::with_locations(DEFAULT_LOCATIONS.iter().map(|l| l.to_string()).collect())
    }

    /// Create an empty registry with custom location templates.
    pub fn with_locations(locations: Vec<String>) -> Self {
        Self {
            defined: RwLock::new(HashMap::new()),
            sources: HashMap::new(),
            locations,
        }
    }

    /// Define a controller type immediately.
    pub fn register<F, C>(&mut self, name: impl Into<String>, make: F) -> &mut Self
    where
        F: Fn() -> C + Send + Sync + 'static,
        C: Controller + 'static,
    {
        let factory: ControllerFactory =
            Arc::new(move || -> Box<dyn Controller> { Box::new(make()) });
        self.defined
            .get_mut()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(name.into(), factory);
        self
    }

    /// Provide a source at `location` that defines controller type `name` when loaded.
    pub fn provide<F, C>(
        &mut self,
        location: impl Into<String>,
        name: impl Into<String>,
        make: F,
    ) -> &mut Self
    where
        F: Fn() -> C + Send + Sync + 'static,
        C: Controller + 'static,
    {
        let factory: ControllerFactory =
            Arc::new(move || -> Box<dyn Controller> { Box::new(make()) });
        self.sources.insert(
            location.into(),
            Source {
                name: name.into(),
                factory,
            },
        );
        self
    }

    /// Candidate location templates, in lookup order.
    pub fn locations(&self) -> &[String] {
        &self.locations
    }

    /// True if controller type `name` is currently defined.
    pub fn is_defined(&self, name: &str) -> bool {
        self.defined
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(name)
    }

    /// True if a source exists at `location`.
    pub fn exists(&self, location: &str) -> bool {
        self.sources.contains_key(location)
    }

    /// Load the source at `location`, defining its type. Returns false when nothing is there.
    pub fn load(&self, location: &str) -> bool {
        let Some(source) = self.sources.get(location) else {
            return false;
        };

        let mut defined = self.defined.write().unwrap_or_else(PoisonError::into_inner);
        if !defined.contains_key(&source.name) {
            tracing::debug!(location, controller = %source.name, "Loaded controller source");
            defined.insert(source.name.clone(), source.factory.clone());
        }
        true
    }

    /// Resolve a controller path to its factory, loading a source if needed.
    pub fn resolve(&self, controller: &str) -> Option<ControllerFactory> {
        let name = type_name(controller);

        if !self.is_defined(name) {
            for template in &self.locations {
                let location = template.replace(CONTROLLER_PLACEHOLDER, controller);
                if self.exists(&location) {
                    self.load(&location);
                    break;
                }
            }
        }

        self.defined
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .cloned()
    }

    /// Resolve and instantiate a controller.
    pub fn instantiate(&self, controller: &str) -> Option<Box<dyn Controller>> {
        self.resolve(controller).map(|factory| factory())
    }
}

impl Default for ControllerRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ControllerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let defined = self.defined.read().unwrap_or_else(PoisonError::into_inner);
        f.debug_struct("ControllerRegistry")
            .field("defined", &defined.keys().collect::<Vec<_>>())
            .field("sources", &self.sources.keys().collect::<Vec<_>>())
            .field("locations", &self.locations)
            .finish()
    }
}

/// Type name of a controller path: its last `/` segment.
pub fn type_name(controller: &str) -> &str {
    controller.rsplit('/').next().unwrap_or(controller)
}
