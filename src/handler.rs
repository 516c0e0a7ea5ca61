//! # Handlers
//!
//! Application code plugs into the dispatcher through [`Controller`]: a type
//! that declares the dependencies its constructor needs, can be constructed
//! from a request plus those dependencies, and exposes named actions taking
//! the route's path parameters.
//!
//! ```rust
//! use routedispatch::dependencies::Dependencies;
//! use routedispatch::error::DispatcherError;
//! use routedispatch::handler::Controller;
//! use routedispatch::request::Request;
//! use routedispatch::response::Response;
//! use routedispatch::router::PathParams;
//!
//! struct HelloController {
//!     greeting: String,
//! }
//!
//! impl Controller for HelloController {
//!     fn dependencies() -> &'static [&'static str] {
//!         &["greeting"]
//!     }
//!
//!     fn construct(_request: &Request, deps: &Dependencies) -> Result<Self, DispatcherError> {
//!         Ok(Self { greeting: deps.get::<String>("greeting")?.clone() })
//!     }
//!
//!     fn call_action(
//!         &self,
//!         action: &str,
//!         params: &PathParams,
//!     ) -> Option<Result<Response, DispatcherError>> {
//!         match action {
//!             "action" => Some(params.positional::<1>(action).map(|[name]| {
//!                 Response::ok(format!("{} {name}", self.greeting))
//!             })),
//!             _ => None,
//!         }
//!     }
//! }
//! ```

use crate::dependencies::Dependencies;
use crate::error::DispatcherError;
use crate::request::Request;
use crate::response::Response;
use crate::router::PathParams;
use std::fmt;
use std::sync::Arc;

/// A request handler type with declared constructor dependencies
///
/// The request is always passed to [`Controller::construct`] and is not part
/// of the declared dependency list.
pub trait Controller: 'static {
    /// Names of the constructor dependencies, in declaration order
    ///
    /// Positional dependency sources bind in this order.
    fn dependencies() -> &'static [&'static str]
    where
        Self: Sized,
    {
        &[]
    }

    /// Build a controller for one request
    ///
    /// # Errors
    ///
    /// Usually a [`DispatcherError::DependencyType`] from
    /// [`Dependencies::get`] when a dependency has an unexpected type.
    fn construct(request: &Request, dependencies: &Dependencies) -> Result<Self, DispatcherError>
    where
        Self: Sized;

    /// Invoke the action named `action` with the route's path parameters
    ///
    /// Returns `None` when the controller has no such action.
    fn call_action(
        &self,
        action: &str,
        params: &PathParams,
    ) -> Option<Result<Response, DispatcherError>>;
}

type NotFoundFn = dyn Fn(&Request, &Dependencies) -> Response + Send + Sync;

/// Fallback invoked when no route matches
///
/// The handler picks the response status; by convention it is 404. Until
/// [`NotFoundHandler::with_dependencies`] is called the handler requests
/// nothing and the dependency source is never consulted for it.
#[derive(Clone)]
pub struct NotFoundHandler {
    dependencies: Option<Vec<String>>,
    handler: Arc<NotFoundFn>,
}

impl NotFoundHandler {
    pub fn new<F>(handler: F) -> Self
    where
        F: Fn(&Request, &Dependencies) -> Response + Send + Sync + 'static,
    {
        Self {
            dependencies: None,
            handler: Arc::new(handler),
        }
    }

    /// Declare the dependencies the handler needs, in declaration order
    #[must_use]
    pub fn with_dependencies<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.dependencies = Some(names.into_iter().map(Into::into).collect());
        self
    }

    /// Declared dependency names, `None` when the handler requests none
    #[must_use]
    pub fn dependencies(&self) -> Option<&[String]> {
        self.dependencies.as_deref()
    }

    #[must_use]
    pub fn handle(&self, request: &Request, dependencies: &Dependencies) -> Response {
        (self.handler)(request, dependencies)
    }
}

impl Default for NotFoundHandler {
    /// Plain `404 Not Found` without dependencies
    fn default() -> Self {
        Self::new(|_request, _deps| Response::new("Not Found", 404))
    }
}

impl fmt::Debug for NotFoundHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NotFoundHandler")
            .field("dependencies", &self.dependencies)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dependencies::DependencySource;

    #[test]
    fn test_default_not_found() {
        let handler = NotFoundHandler::default();
        assert!(handler.dependencies().is_none());
        let response = handler.handle(&Request::new("GET", "/missing"), &Dependencies::default());
        assert_eq!(response.status_code(), 404);
        assert_eq!(response.content(), "Not Found");
    }

    #[test]
    fn test_explicit_empty_dependencies() {
        let handler = NotFoundHandler::default().with_dependencies(Vec::<String>::new());
        assert_eq!(handler.dependencies(), Some(&[][..]));
    }

    #[test]
    fn test_not_found_with_dependencies() {
        let handler = NotFoundHandler::new(|req, deps| {
            let prefix = deps.get::<String>("prefix").map(String::as_str).unwrap_or("?");
            Response::new(format!("{prefix} {}", req.path), 404)
        })
        .with_dependencies(["prefix"]);
        assert_eq!(handler.dependencies(), Some(&["prefix".to_string()][..]));

        let source = DependencySource::positional([crate::dependencies::Dependency::new(
            "missing:".to_string(),
        )]);
        let deps = source
            .resolve(handler_name(), handler.dependencies().unwrap_or_default())
            .unwrap();
        let response = handler.handle(&Request::new("GET", "/x"), &deps);
        assert_eq!(response.content(), "missing: /x");
    }

    fn handler_name() -> &'static str {
        "not_found"
    }
}
