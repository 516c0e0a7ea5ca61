//! # Route Module
//!
//! A [`Route`] is one endpoint definition: a path template with `{name}`
//! placeholders, the methods, protocols and host it accepts, per-placeholder
//! requirements, and the handler identifier plus action it is bound to.
//!
//! Routes are immutable values. They are produced by [`RouteBuilder`], which
//! validates everything eagerly, so a built route can always be matched and
//! can be shared between threads without locking.
//!
//! ## Compilation
//!
//! At build time the path template is compiled into a single anchored regex:
//!
//! ```text
//! /foo/{name}/{id}   requirements: id => \d+
//! ^/foo/(?P<p0>[^/]+)/(?P<p1>(?:\d+))$
//! ```
//!
//! Literal template text is regex-escaped. Placeholders without a requirement
//! match one or more non-`/` characters. The whole path must match; there is
//! no trailing-slash leniency.
//!
//! ## Example
//!
//! ```rust
//! use routedispatch::route::Route;
//!
//! let route = Route::builder("/users/{id}", "users.UserController")
//!     .methods(["get", "head"])
//!     .requirement("id", r"\d+")
//!     .action("show")
//!     .build()
//!     .unwrap();
//!
//! assert!(route.matches_method("GET"));
//! let params = route.match_path("/users/42").unwrap();
//! assert_eq!(params.get("id"), Some("42"));
//! assert!(route.match_path("/users/bob").is_none());
//! ```

mod builder;
mod compile;

pub use builder::RouteBuilder;

use crate::error::ConfigurationError;
use crate::router::PathParams;
use http::Method;
use regex::Regex;
use std::fmt;
use std::sync::Arc;

/// Methods a route may accept, in default order
pub const ALLOWED_METHODS: [Method; 7] = [
    Method::GET,
    Method::POST,
    Method::PUT,
    Method::PATCH,
    Method::DELETE,
    Method::HEAD,
    Method::OPTIONS,
];

pub const DEFAULT_PROTOCOLS: [&str; 2] = ["http", "https"];

/// Host pattern that accepts any host
pub const DEFAULT_HOST: &str = ".*";

pub const DEFAULT_ACTION: &str = "action";

/// Pattern used for placeholders without a requirement
pub const DEFAULT_PARAM_PATTERN: &str = "[^/]+";

/// Constraint restricting what one placeholder may match
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Requirement {
    name: String,
    pattern: String,
}

impl Requirement {
    pub(crate) fn new(name: impl Into<String>, pattern: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            pattern: pattern.into(),
        }
    }

    /// Placeholder this requirement applies to
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Source pattern, as configured
    #[must_use]
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// The pattern wrapped as one group, ready to substitute into the
    /// compiled path pattern.
    #[must_use]
    pub fn wrapped(&self) -> String {
        format!("(?:{})", self.pattern)
    }
}

/// An immutable, compiled endpoint definition
#[derive(Debug, Clone)]
pub struct Route {
    path: String,
    handler: String,
    action: String,
    methods: Vec<Method>,
    requirements: Vec<Requirement>,
    protocols: Vec<String>,
    host: String,
    host_regex: Regex,
    compiled: Regex,
    /// Placeholder names in template order; index i is capture group `p{i}`
    placeholders: Vec<Arc<str>>,
}

impl Route {
    /// Start building a route for `path` bound to `handler`
    pub fn builder(path: impl Into<String>, handler: impl Into<String>) -> RouteBuilder {
        RouteBuilder::new(path, handler)
    }

    /// Route with every optional setting at its default
    ///
    /// # Errors
    ///
    /// Fails only when the template itself is invalid, e.g. a placeholder
    /// that appears twice.
    pub fn new(
        path: impl Into<String>,
        handler: impl Into<String>,
    ) -> Result<Self, ConfigurationError> {
        RouteBuilder::new(path, handler).build()
    }

    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Identifier of the handler this route dispatches to
    #[must_use]
    pub fn handler(&self) -> &str {
        &self.handler
    }

    #[must_use]
    pub fn action(&self) -> &str {
        &self.action
    }

    /// Accepted methods, uppercase and deduplicated
    #[must_use]
    pub fn methods(&self) -> &[Method] {
        &self.methods
    }

    #[must_use]
    pub fn requirements(&self) -> &[Requirement] {
        &self.requirements
    }

    #[must_use]
    pub fn requirement(&self, name: &str) -> Option<&Requirement> {
        self.requirements.iter().find(|r| r.name == name)
    }

    #[must_use]
    pub fn protocols(&self) -> &[String] {
        &self.protocols
    }

    /// Host pattern source
    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    /// The anchored regex the request path must fully match
    #[must_use]
    pub fn compiled_pattern(&self) -> &Regex {
        &self.compiled
    }

    /// Placeholder names in the order they appear in the template
    pub fn placeholders(&self) -> impl Iterator<Item = &str> {
        self.placeholders.iter().map(|p| p.as_ref())
    }

    #[must_use]
    pub fn matches_method(&self, method: &str) -> bool {
        self.methods
            .iter()
            .any(|m| m.as_str().eq_ignore_ascii_case(method))
    }

    #[must_use]
    pub fn matches_protocol(&self, protocol: &str) -> bool {
        self.protocols
            .iter()
            .any(|p| p.eq_ignore_ascii_case(protocol))
    }

    /// Whole-host match against the host pattern
    #[must_use]
    pub fn matches_host(&self, host: &str) -> bool {
        self.host_regex.is_match(host)
    }

    /// Match `path` against the compiled template
    ///
    /// Returns the placeholder values in template order, or `None` if the
    /// path does not match completely.
    #[must_use]
    pub fn match_path(&self, path: &str) -> Option<PathParams> {
        let captures = self.compiled.captures(path)?;
        let mut params = PathParams::with_capacity(self.placeholders.len());
        for (i, name) in self.placeholders.iter().enumerate() {
            let slot = compile::slot_name(i);
            if let Some(value) = captures.name(&slot) {
                params.push(Arc::clone(name), value.as_str().to_string());
            }
        }
        Some(params)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let methods: Vec<&str> = self.methods.iter().map(Method::as_str).collect();
        write!(
            f,
            "{} {} -> {}::{}",
            methods.join("|"),
            self.path,
            self.handler,
            self.action
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let route = Route::new("foo", "hello").unwrap();
        assert_eq!(route.action(), "action");
        assert_eq!(route.methods(), &ALLOWED_METHODS[..]);
        assert!(route.requirements().is_empty());
        assert_eq!(route.protocols(), &["http".to_string(), "https".to_string()]);
        assert_eq!(route.host(), ".*");
        assert!(route.matches_host("anything.example.org"));
        assert!(route.matches_host(""));
    }

    #[test]
    fn test_path() {
        let route = Route::new("/", "bar").unwrap();
        assert_eq!(route.path(), "/");
        assert!(route.match_path("/").is_some());
        assert!(route.match_path("").is_none());
    }

    #[test]
    fn test_protocol_compare_is_case_insensitive() {
        let route = Route::builder("foo", "bar")
            .protocols(["HTTP", "HTTPS"])
            .build()
            .unwrap();
        assert!(route.matches_protocol("http"));
        assert!(route.matches_protocol("Https"));
        assert!(!route.matches_protocol("ftp"));
    }

    #[test]
    fn test_host_is_full_match() {
        let route = Route::builder("foo", "bar")
            .host("example.com")
            .build()
            .unwrap();
        assert!(route.matches_host("example.com"));
        assert!(!route.matches_host("www.example.com"));
        assert!(!route.matches_host("example.com.evil"));
    }

    #[test]
    fn test_match_path_extracts_in_template_order() {
        let route = Route::new("/foo/{name}/{surname}", "bar").unwrap();
        let params = route.match_path("/foo/felix/carmona").unwrap();
        let pairs: Vec<(&str, &str)> = params.iter().collect();
        assert_eq!(pairs, vec![("name", "felix"), ("surname", "carmona")]);
    }

    #[test]
    fn test_match_path_no_trailing_slash_leniency() {
        let route = Route::new("/foo/{name}", "bar").unwrap();
        assert!(route.match_path("/foo/felix").is_some());
        assert!(route.match_path("/foo/felix/").is_none());
        assert!(route.match_path("/foo/").is_none());
        assert!(route.match_path("/prefix/foo/felix").is_none());
    }

    #[test]
    fn test_display() {
        let route = Route::builder("/a/{b}", "ctl")
            .methods(["get", "post"])
            .action("show")
            .build()
            .unwrap();
        assert_eq!(route.to_string(), "GET|POST /a/{b} -> ctl::show");
    }

    #[test]
    fn test_requirement_wrapped() {
        let route = Route::builder("foo/{hello}", "bar")
            .requirement("hello", r"\d+")
            .build()
            .unwrap();
        let req = route.requirement("hello").unwrap();
        assert_eq!(req.pattern(), r"\d+");
        assert_eq!(req.wrapped(), r"(?:\d+)");
    }
}
