//! Application route tables.

use std::fmt;
use std::sync::Arc;

use crate::context::{RequestContext, RequestInfo};
use crate::routing::controller::ControllerRegistry;
use crate::routing::routes::Routes;

/// Registration function run once per request.
pub type RouteTable = dyn Fn(&mut Routes<'_>) + Send + Sync;

/// A route table together with the controllers its delegates refer to.
///
/// Cheap to clone; shared by every request the host serves.
#[derive(Clone)]
pub struct Application {
    routes: Arc<RouteTable>,
    controllers: Arc<ControllerRegistry>,
}

impl Application {
    pub fn new<F>(controllers: ControllerRegistry, routes: F) -> Self
    where
        F: Fn(&mut Routes<'_>) + Send + Sync + 'static,
    {
        Self {
            routes: Arc::new(routes),
            controllers: Arc::new(controllers),
        }
    }

    /// Controllers available to delegates in the route table.
    pub fn controllers(&self) -> &ControllerRegistry {
        &self.controllers
    }

    /// Route one request. The returned context tells whether anything matched.
    pub fn handle(&self, info: &RequestInfo) -> RequestContext {
        let mut ctx = RequestContext::new(info);
        let mut routes = Routes::new(&mut ctx, &self.controllers);
        (self.routes)(&mut routes);
        ctx
    }
}

impl fmt::Debug for Application {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Application")
            .field("controllers", &self.controllers)
            .finish_non_exhaustive()
    }
}
