use crate::dependencies::{Dependencies, DependencySource};
use crate::error::DispatcherError;
use crate::handler::NotFoundHandler;
use crate::registry::HandlerRegistry;
use crate::request::Request;
use crate::response::Response;
use crate::router::Router;
use arc_swap::ArcSwap;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Identifier used for the not-found handler in errors and logs
const NOT_FOUND_HANDLER: &str = "not_found";

/// Matches requests and invokes the handler the matched route names
pub struct Dispatcher {
    router: Arc<ArcSwap<Router>>,
    registry: HandlerRegistry,
    not_found: NotFoundHandler,
    dependencies: DependencySource,
}

impl Dispatcher {
    /// Create a dispatcher with the default not-found handler
    #[must_use]
    pub fn new(router: Router, registry: HandlerRegistry, dependencies: DependencySource) -> Self {
        info!(
            routes_count = router.len(),
            handlers_count = registry.len(),
            dependencies_count = dependencies.len(),
            "Dispatcher created"
        );
        Self {
            router: Arc::new(ArcSwap::from_pointee(router)),
            registry,
            not_found: NotFoundHandler::default(),
            dependencies,
        }
    }

    /// Create a dispatcher whose dependency source comes from configuration
    ///
    /// Objects resolve by name, arrays bind positionally and `null` means no
    /// dependencies.
    ///
    /// # Errors
    ///
    /// [`DispatcherError::InvalidDependencySource`] for any other JSON shape.
    pub fn from_value(
        router: Router,
        registry: HandlerRegistry,
        dependencies: Value,
    ) -> Result<Self, DispatcherError> {
        let source = DependencySource::try_from(dependencies)?;
        Ok(Self::new(router, registry, source))
    }

    /// Replace the not-found handler
    #[must_use]
    pub fn with_not_found(mut self, not_found: NotFoundHandler) -> Self {
        self.not_found = not_found;
        self
    }

    /// Current routing table snapshot
    #[must_use]
    pub fn router(&self) -> Arc<Router> {
        self.router.load_full()
    }

    /// Shared swap cell holding the routing table, for hot reload
    #[must_use]
    pub fn router_handle(&self) -> Arc<ArcSwap<Router>> {
        Arc::clone(&self.router)
    }

    /// Atomically replace the routing table
    pub fn replace_router(&self, router: Router) {
        info!(routes_count = router.len(), "Routing table replaced");
        self.router.store(Arc::new(router));
    }

    #[must_use]
    pub fn registry(&self) -> &HandlerRegistry {
        &self.registry
    }

    #[must_use]
    pub fn dependencies(&self) -> &DependencySource {
        &self.dependencies
    }

    #[must_use]
    pub fn not_found(&self) -> &NotFoundHandler {
        &self.not_found
    }

    /// Check the whole configuration without dispatching a request
    ///
    /// Every route's handler must be registered, and every handler's declared
    /// dependencies (the not-found handler's included) must resolve against
    /// the dependency source.
    ///
    /// # Errors
    ///
    /// The first problem found, in route order.
    pub fn validate(&self) -> Result<(), DispatcherError> {
        let router = self.router.load();
        for (_, route) in router.iter() {
            let entry =
                self.registry
                    .get(route.handler())
                    .ok_or_else(|| DispatcherError::UnknownHandler {
                        handler: route.handler().to_string(),
                    })?;
            self.dependencies
                .resolve(route.handler(), entry.dependencies())?;
        }
        self.not_found_dependencies()?;
        debug!(routes_count = router.len(), "Dispatcher configuration valid");
        Ok(())
    }

    /// Dispatch one request
    ///
    /// # Errors
    ///
    /// - [`DispatcherError::UnknownHandler`] when the matched route names an
    ///   unregistered handler
    /// - [`DispatcherError::UnknownAction`] when the handler has no such action
    /// - dependency resolution, type and arity errors as reported by
    ///   [`DependencySource::resolve`], the handler and its action
    pub fn dispatch(&self, request: &Request) -> Result<Response, DispatcherError> {
        let router = self.router.load();
        let Some(route_match) = router.match_request(request) else {
            info!(
                method = %request.method,
                path = %request.path,
                "No route matched, using not-found handler"
            );
            let dependencies = self.not_found_dependencies()?;
            return Ok(self.not_found.handle(request, &dependencies));
        };

        let route = &route_match.route;
        let handler = route.handler();
        let entry = self
            .registry
            .get(handler)
            .ok_or_else(|| DispatcherError::UnknownHandler {
                handler: handler.to_string(),
            })?;
        let dependencies = self.resolve(handler, entry.dependencies())?;
        let controller = entry.construct(request, &dependencies)?;

        debug!(
            handler = %handler,
            action = %route.action(),
            params = ?route_match.params,
            "Invoking handler"
        );
        controller
            .call_action(route.action(), &route_match.params)
            .unwrap_or_else(|| {
                Err(DispatcherError::UnknownAction {
                    handler: handler.to_string(),
                    action: route.action().to_string(),
                })
            })
    }

    /// A not-found handler without declared dependencies skips the source
    fn not_found_dependencies(&self) -> Result<Dependencies, DispatcherError> {
        match self.not_found.dependencies() {
            Some(names) => self.resolve(NOT_FOUND_HANDLER, names),
            None => Ok(Dependencies::default()),
        }
    }

    fn resolve(&self, handler: &str, names: &[String]) -> Result<Dependencies, DispatcherError> {
        self.dependencies.resolve(handler, names).inspect_err(|err| {
            warn!(
                handler = %handler,
                error = %err,
                "Dependency resolution failed"
            );
        })
    }
}

impl fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatcher")
            .field("routes", &self.router.load().len())
            .field("registry", &self.registry)
            .field("not_found", &self.not_found)
            .field("dependencies", &self.dependencies)
            .finish()
    }
}
