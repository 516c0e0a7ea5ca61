//! Router core module - ordered first-match selection.

use crate::config::RouteCollection;
use crate::error::DispatcherError;
use crate::request::Request;
use crate::route::Route;
use serde::ser::{Serialize, SerializeMap, Serializer};
use smallvec::SmallVec;
use std::io::{self, Write};
use std::sync::Arc;
use tracing::{debug, info};

/// Maximum number of path parameters before heap allocation.
/// Most routes have ≤4 placeholders (e.g., /users/{id}/posts/{post_id}).
pub const MAX_INLINE_PARAMS: usize = 8;

/// Stack-allocated parameter storage.
///
/// Param names use `Arc<str>` because they come from the compiled route and
/// are shared by every match of that route; values are per-request.
pub type ParamVec = SmallVec<[(Arc<str>, String); MAX_INLINE_PARAMS]>;

/// Path parameters extracted from a matched request, in template order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathParams(ParamVec);

impl PathParams {
    #[must_use]
    pub fn new() -> Self {
        Self(ParamVec::new())
    }

    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self(ParamVec::with_capacity(capacity))
    }

    pub fn push(&mut self, name: impl Into<Arc<str>>, value: impl Into<String>) {
        self.0.push((name.into(), value.into()));
    }

    /// Get a parameter by name
    #[inline]
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k.as_ref() == name)
            .map(|(_, v)| v.as_str())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// `(name, value)` pairs in template order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_ref(), v.as_str()))
    }

    /// Values in template order, i.e. the positional action arguments
    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(_, v)| v.as_str())
    }

    /// Bind the values positionally to exactly `N` action arguments
    ///
    /// # Errors
    ///
    /// [`DispatcherError::ActionArity`] when the route supplied a different
    /// number of parameters.
    ///
    /// ```rust
    /// use routedispatch::router::PathParams;
    ///
    /// let mut params = PathParams::new();
    /// params.push("name", "felix");
    /// params.push("surname", "carmona");
    /// let [name, surname] = params.positional::<2>("action").unwrap();
    /// assert_eq!((name, surname), ("felix", "carmona"));
    /// assert!(params.positional::<1>("action").is_err());
    /// ```
    pub fn positional<const N: usize>(&self, action: &str) -> Result<[&str; N], DispatcherError> {
        let values: Vec<&str> = self.values().collect();
        <[&str; N]>::try_from(values).map_err(|values| DispatcherError::ActionArity {
            action: action.to_string(),
            expected: N,
            provided: values.len(),
        })
    }
}

impl Serialize for PathParams {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (k, v) in &self.0 {
            map.serialize_entry(k.as_ref(), v)?;
        }
        map.end()
    }
}

/// Result of successfully matching a request to a route
#[derive(Debug, Clone)]
pub struct RouteMatch {
    /// The matched route (Arc to avoid cloning compiled regexes)
    pub route: Arc<Route>,
    /// Name the route was registered under, if any
    pub name: Option<Arc<str>>,
    /// Path parameters extracted from the request path
    pub params: PathParams,
}

#[derive(Debug, Clone)]
struct RouteEntry {
    name: Option<Arc<str>>,
    route: Arc<Route>,
}

/// Ordered route set performing first-match selection
///
/// Registration order is match priority: the router is not a longest-match
/// router, so more specific routes must be registered before more general
/// ones.
#[derive(Debug, Clone, Default)]
pub struct Router {
    routes: Vec<RouteEntry>,
}

impl Router {
    /// Create a router from unnamed routes, keeping their order
    #[must_use]
    pub fn new<I>(routes: I) -> Self
    where
        I: IntoIterator<Item = Route>,
    {
        let routes: Vec<RouteEntry> = routes
            .into_iter()
            .map(|route| RouteEntry {
                name: None,
                route: Arc::new(route),
            })
            .collect();
        let router = Self { routes };
        router.log_loaded();
        router
    }

    /// Create a router from a named collection, keeping its order
    #[must_use]
    pub fn from_collection(collection: RouteCollection) -> Self {
        let routes: Vec<RouteEntry> = collection
            .into_iter()
            .map(|(name, route)| RouteEntry {
                name: Some(Arc::from(name)),
                route: Arc::new(route),
            })
            .collect();
        let router = Self { routes };
        router.log_loaded();
        router
    }

    fn log_loaded(&self) {
        let routes_summary: Vec<String> = self
            .routes
            .iter()
            .take(10)
            .map(|entry| entry.route.to_string())
            .collect();
        info!(
            routes_count = self.routes.len(),
            routes_summary = ?routes_summary,
            "Routing table loaded"
        );
    }

    /// Append a route at the lowest priority
    pub fn push(&mut self, name: Option<&str>, route: Route) {
        self.routes.push(RouteEntry {
            name: name.map(Arc::from),
            route: Arc::new(route),
        });
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Routes with their names, in match order
    pub fn iter(&self) -> impl Iterator<Item = (Option<&str>, &Route)> {
        self.routes
            .iter()
            .map(|entry| (entry.name.as_deref(), entry.route.as_ref()))
    }

    /// Write all registered routes to `out`, in match order
    ///
    /// Useful for debugging and verifying that routes are loaded correctly.
    pub fn dump_routes<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "[routes] count={}", self.routes.len())?;
        for (i, entry) in self.routes.iter().enumerate() {
            writeln!(
                out,
                "[route] #{i} {} {}",
                entry.name.as_deref().unwrap_or("-"),
                entry.route
            )?;
        }
        Ok(())
    }

    /// Match a request against the routing table
    ///
    /// Routes are tried in registration order. A route wins only when the
    /// method, protocol, host and whole path all match; the first winner is
    /// returned.
    ///
    /// # Returns
    ///
    /// * `Some(RouteMatch)` - the winning route and its path parameters
    /// * `None` - no route matched (not an error)
    #[must_use]
    pub fn match_request(&self, request: &Request) -> Option<RouteMatch> {
        debug!(
            method = %request.method,
            path = %request.path,
            protocol = %request.protocol,
            host = %request.host,
            "Route match attempt"
        );

        for entry in &self.routes {
            let route = &entry.route;
            if !route.matches_method(&request.method)
                || !route.matches_protocol(&request.protocol)
                || !route.matches_host(&request.host)
            {
                continue;
            }
            let Some(params) = route.match_path(&request.path) else {
                continue;
            };

            debug!(
                method = %request.method,
                path = %request.path,
                route_name = entry.name.as_deref().unwrap_or("-"),
                route_pattern = %route.path(),
                handler = %route.handler(),
                path_params = ?params,
                "Route matched"
            );
            return Some(RouteMatch {
                route: Arc::clone(route),
                name: entry.name.clone(),
                params,
            });
        }

        debug!(
            method = %request.method,
            path = %request.path,
            "No route matched"
        );
        None
    }
}
