//! Error types for route configuration and request dispatch.
//!
//! Two families, raised at different points of the lifecycle:
//!
//! - [`ConfigurationError`] - malformed routes or route configuration. Raised
//!   while building routes or loading a route table, never while matching.
//! - [`DispatcherError`] - dependency-source and handler problems. Source shape
//!   errors surface when a [`crate::dispatcher::Dispatcher`] is constructed;
//!   name, arity and type mismatches surface at dispatch (or
//!   [`crate::dispatcher::Dispatcher::validate`]).

use thiserror::Error;

/// Route or route-configuration error
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    /// Method token outside the allowed set
    #[error("invalid HTTP method '{method}'; allowed: GET, POST, PUT, PATCH, DELETE, HEAD, OPTIONS")]
    InvalidMethod {
        /// The rejected token, as given
        method: String,
    },

    /// A route must accept at least one method
    #[error("route '{path}' declares an empty method list")]
    EmptyMethods { path: String },

    /// A route must accept at least one protocol
    #[error("route '{path}' declares an empty protocol list")]
    EmptyProtocols { path: String },

    #[error("route '{path}' declares an empty action name")]
    EmptyAction { path: String },

    /// Requirement or host pattern that does not compile
    #[error("invalid pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },

    /// Requirement for a placeholder the path template does not contain
    #[error("requirement '{name}' does not match any placeholder in '{path}'")]
    UnknownRequirement { name: String, path: String },

    #[error("placeholder '{{{name}}}' appears more than once in '{path}'")]
    DuplicatePlaceholder { name: String, path: String },

    /// Route record lacks a mandatory key
    #[error("route '{route}' is missing required key '{key}'")]
    MissingKey { route: String, key: &'static str },

    /// Configuration value of the wrong shape
    #[error("malformed route configuration for '{route}': {reason}")]
    Malformed { route: String, reason: String },

    /// A route record was well-formed but its route failed to build
    #[error("route '{route}': {source}")]
    Route {
        route: String,
        #[source]
        source: Box<ConfigurationError>,
    },
}

impl ConfigurationError {
    pub(crate) fn in_route(self, route: &str) -> Self {
        match self {
            err @ (ConfigurationError::MissingKey { .. }
            | ConfigurationError::Malformed { .. }
            | ConfigurationError::Route { .. }) => err,
            other => ConfigurationError::Route {
                route: route.to_string(),
                source: Box::new(other),
            },
        }
    }
}

/// Dependency and handler errors raised by the dispatcher
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DispatcherError {
    /// Dependency source is neither a mapping, a sequence nor absent
    #[error("invalid dependency source: expected a mapping, a sequence or null, found {found}")]
    InvalidDependencySource { found: String },

    /// Named source lacks a dependency the handler declares
    #[error("handler '{handler}' requires dependency '{name}' which is not configured")]
    UnresolvedDependency { handler: String, name: String },

    /// Positional (or absent) source does not line up with the declaration
    #[error("handler '{handler}' declares {expected} dependencies but {provided} were provided")]
    DependencyCountMismatch {
        handler: String,
        expected: usize,
        provided: usize,
    },

    /// Dependency exists but holds a different type
    #[error("dependency '{name}' is not of type {expected}")]
    DependencyType { name: String, expected: &'static str },

    #[error("no handler registered under '{handler}'")]
    UnknownHandler { handler: String },

    #[error("handler '{handler}' has no action '{action}'")]
    UnknownAction { handler: String, action: String },

    /// Action called with the wrong number of path parameters
    #[error("action '{action}' takes {expected} path parameters but the route supplied {provided}")]
    ActionArity {
        action: String,
        expected: usize,
        provided: usize,
    },
}
