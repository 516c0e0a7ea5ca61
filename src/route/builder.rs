use super::compile::{anchored, compile_path, placeholder_names};
use super::{
    Requirement, Route, ALLOWED_METHODS, DEFAULT_ACTION, DEFAULT_HOST, DEFAULT_PROTOCOLS,
};
use crate::error::ConfigurationError;
use http::Method;

/// Builder for creating a [`Route`] with a fluent API
///
/// Setters only record values; all validation happens in [`RouteBuilder::build`],
/// which either returns a fully compiled route or the first problem found.
///
/// # Example
///
/// ```rust
/// use routedispatch::route::Route;
///
/// let route = Route::builder("/foo/world/{name}/{number}", "app.WorldController")
///     .methods(["GET", "POST"])
///     .requirement("name", r"\w+")
///     .requirement("number", r"\d+")
///     .protocols(["HTTP", "HTTPS"])
///     .host("foo.com")
///     .action("world_action")
///     .build()
///     .expect("valid route");
/// assert_eq!(route.action(), "world_action");
/// ```
#[derive(Debug, Clone)]
#[must_use]
pub struct RouteBuilder {
    path: String,
    handler: String,
    action: String,
    methods: Option<Vec<String>>,
    requirements: Vec<Requirement>,
    protocols: Option<Vec<String>>,
    host: String,
}

impl RouteBuilder {
    /// Create a builder with defaults
    ///
    /// Default configuration:
    /// - Methods: every allowed method (GET, POST, PUT, PATCH, DELETE, HEAD, OPTIONS)
    /// - Requirements: none, placeholders match `[^/]+`
    /// - Protocols: `http`, `https`
    /// - Host: `.*`
    /// - Action: `action`
    pub fn new(path: impl Into<String>, handler: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            handler: handler.into(),
            action: DEFAULT_ACTION.to_string(),
            methods: None,
            requirements: Vec::new(),
            protocols: None,
            host: DEFAULT_HOST.to_string(),
        }
    }

    /// Set accepted methods (case-insensitive tokens)
    pub fn methods<I, S>(mut self, methods: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.methods = Some(methods.into_iter().map(|m| m.as_ref().to_string()).collect());
        self
    }

    /// Add one accepted method
    ///
    /// The first call replaces the default method set.
    pub fn method(mut self, method: impl AsRef<str>) -> Self {
        self.methods
            .get_or_insert_with(Vec::new)
            .push(method.as_ref().to_string());
        self
    }

    /// Constrain placeholder `name` to `pattern`
    ///
    /// Setting the same name twice keeps the last pattern.
    pub fn requirement(mut self, name: impl Into<String>, pattern: impl Into<String>) -> Self {
        let req = Requirement::new(name, pattern);
        self.requirements.retain(|r| r.name() != req.name());
        self.requirements.push(req);
        self
    }

    /// Replace all requirements
    pub fn requirements<I, K, V>(mut self, requirements: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.requirements.clear();
        for (name, pattern) in requirements {
            self = self.requirement(name, pattern);
        }
        self
    }

    pub fn protocols<I, S>(mut self, protocols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.protocols = Some(protocols.into_iter().map(Into::into).collect());
        self
    }

    /// Set the host pattern (full match)
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    pub fn action(mut self, action: impl Into<String>) -> Self {
        self.action = action.into();
        self
    }

    /// Validate the configuration and compile the route
    ///
    /// # Errors
    ///
    /// - [`ConfigurationError::InvalidMethod`] for a token outside the allowed set
    /// - [`ConfigurationError::EmptyMethods`] / [`ConfigurationError::EmptyProtocols`]
    /// - [`ConfigurationError::EmptyAction`]
    /// - [`ConfigurationError::UnknownRequirement`] for a requirement whose name
    ///   is not a placeholder of the path
    /// - [`ConfigurationError::InvalidPattern`] for a requirement or host that
    ///   does not compile
    /// - [`ConfigurationError::DuplicatePlaceholder`]
    pub fn build(self) -> Result<Route, ConfigurationError> {
        let methods = match &self.methods {
            Some(tokens) => normalize_methods(tokens, &self.path)?,
            None => ALLOWED_METHODS.to_vec(),
        };

        let protocols = match self.protocols {
            Some(protocols) if protocols.is_empty() => {
                return Err(ConfigurationError::EmptyProtocols { path: self.path })
            }
            Some(protocols) => protocols,
            None => DEFAULT_PROTOCOLS.iter().map(|p| p.to_string()).collect(),
        };

        if self.action.trim().is_empty() {
            return Err(ConfigurationError::EmptyAction { path: self.path });
        }

        let names = placeholder_names(&self.path);
        for req in &self.requirements {
            if !names.contains(&req.name()) {
                return Err(ConfigurationError::UnknownRequirement {
                    name: req.name().to_string(),
                    path: self.path.clone(),
                });
            }
            anchored(req.pattern())?;
        }

        let host_regex = anchored(&self.host)?;
        let compiled = compile_path(&self.path, &self.requirements)?;

        Ok(Route {
            path: self.path,
            handler: self.handler,
            action: self.action,
            methods,
            requirements: self.requirements,
            protocols,
            host: self.host,
            host_regex,
            compiled: compiled.regex,
            placeholders: compiled.placeholders,
        })
    }
}

/// Uppercase, deduplicate (first occurrence wins) and check against
/// [`ALLOWED_METHODS`].
fn normalize_methods<S: AsRef<str>>(
    tokens: &[S],
    path: &str,
) -> Result<Vec<Method>, ConfigurationError> {
    let mut methods: Vec<Method> = Vec::with_capacity(tokens.len());
    for token in tokens {
        let token = token.as_ref();
        let upper = token.trim().to_ascii_uppercase();
        let method = ALLOWED_METHODS
            .into_iter()
            .find(|m| m.as_str() == upper)
            .ok_or_else(|| ConfigurationError::InvalidMethod {
                method: token.to_string(),
            })?;
        if !methods.contains(&method) {
            methods.push(method);
        }
    }
    if methods.is_empty() {
        return Err(ConfigurationError::EmptyMethods {
            path: path.to_string(),
        });
    }
    Ok(methods)
}
