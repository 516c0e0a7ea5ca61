use super::types::{RouteCollection, RouteConfig};
use crate::error::ConfigurationError;
use crate::route::Route;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

impl RouteConfig {
    /// Build the [`Route`] described by this record
    ///
    /// # Errors
    ///
    /// [`ConfigurationError::MissingKey`] when `path` or `controller` is absent,
    /// otherwise any route validation error, wrapped with the route name.
    pub fn into_route(self, name: &str) -> Result<Route, ConfigurationError> {
        let path = self.path.ok_or_else(|| ConfigurationError::MissingKey {
            route: name.to_string(),
            key: "path",
        })?;
        let controller = self
            .controller
            .ok_or_else(|| ConfigurationError::MissingKey {
                route: name.to_string(),
                key: "controller",
            })?;

        let mut builder = Route::builder(path, controller);
        if let Some(methods) = self.methods {
            builder = builder.methods(methods.into_vec());
        }
        if let Some(action) = self.action {
            builder = builder.action(action);
        }
        if let Some(requirements) = self.requirements {
            builder = builder.requirements(requirements);
        }
        if let Some(protocols) = self.protocols {
            builder = builder.protocols(protocols.into_vec());
        }
        if let Some(host) = self.host {
            builder = builder.host(host);
        }
        builder.build().map_err(|e| e.in_route(name))
    }
}

/// Build an ordered route collection from typed records
///
/// # Errors
///
/// The first record that fails to build, annotated with its name.
pub fn generate_routes_from<I, K>(records: I) -> Result<RouteCollection, ConfigurationError>
where
    I: IntoIterator<Item = (K, RouteConfig)>,
    K: Into<String>,
{
    let mut collection = RouteCollection::new();
    for (name, record) in records {
        let name = name.into();
        let route = record.into_route(&name)?;
        debug!(route_name = %name, route = %route, "Route generated");
        collection.insert(name, route);
    }
    Ok(collection)
}

/// Build an ordered route collection from a configuration mapping
///
/// `config` is a mapping route name → record (see [`RouteConfig`]); it is
/// usually the parsed contents of a route file, but any format that
/// deserializes into `serde_json::Value` works. Mapping order is preserved.
///
/// # Errors
///
/// - [`ConfigurationError::Malformed`] if `config` is not a mapping or a
///   record has the wrong shape (e.g. `requirements` given as a list)
/// - [`ConfigurationError::MissingKey`] if a record lacks `path` or `controller`
/// - any route validation error, wrapped in [`ConfigurationError::Route`]
///
/// # Example
///
/// ```rust
/// use routedispatch::config::generate_routes;
/// use serde_json::json;
///
/// let routes = generate_routes(&json!({
///     "hello": {
///         "path": "/foo/hello/{name}/{surname}",
///         "method": ["GET"],
///         "controller": "app.HelloController"
///     }
/// }))
/// .unwrap();
/// assert_eq!(routes.len(), 1);
/// ```
pub fn generate_routes(config: &Value) -> Result<RouteCollection, ConfigurationError> {
    let Value::Object(map) = config else {
        return Err(ConfigurationError::Malformed {
            route: "<root>".to_string(),
            reason: format!("expected a mapping of route names, found {}", kind(config)),
        });
    };

    let mut records = Vec::with_capacity(map.len());
    for (name, record) in map {
        if !record.is_object() {
            return Err(ConfigurationError::Malformed {
                route: name.clone(),
                reason: format!("expected a mapping, found {}", kind(record)),
            });
        }
        let record = RouteConfig::deserialize(record).map_err(|e| ConfigurationError::Malformed {
            route: name.clone(),
            reason: e.to_string(),
        })?;
        records.push((name.clone(), record));
    }
    generate_routes_from(records)
}

pub(crate) fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a sequence",
        Value::Object(_) => "a mapping",
    }
}
