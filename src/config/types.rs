use crate::route::Route;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A single string or a list of strings
///
/// Lets configuration say `methods: GET` as well as `methods: [GET, POST]`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

impl OneOrMany {
    #[must_use]
    pub fn into_vec(self) -> Vec<String> {
        match self {
            OneOrMany::One(s) => vec![s],
            OneOrMany::Many(v) => v,
        }
    }
}

/// Declarative route record, as found in a route table
///
/// `path` and `controller` (alias `handler`) are required; they are optional
/// here so a missing key can be reported as
/// [`ConfigurationError::MissingKey`](crate::error::ConfigurationError::MissingKey)
/// with the route name attached.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct RouteConfig {
    pub path: Option<String>,
    #[serde(alias = "handler")]
    pub controller: Option<String>,
    #[serde(alias = "method")]
    pub methods: Option<OneOrMany>,
    pub action: Option<String>,
    pub requirements: Option<BTreeMap<String, String>>,
    pub protocols: Option<OneOrMany>,
    pub host: Option<String>,
}

/// Ordered mapping route name → [`Route`]
///
/// Order is the order of the source configuration and becomes match
/// priority once the collection is turned into a
/// [`Router`](crate::router::Router).
#[derive(Debug, Clone, Default)]
pub struct RouteCollection {
    routes: Vec<(String, Route)>,
}

impl RouteCollection {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a route; an existing name keeps its position and gets the new route
    pub fn insert(&mut self, name: impl Into<String>, route: Route) {
        let name = name.into();
        match self.routes.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = route,
            None => self.routes.push((name, route)),
        }
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Route> {
        self.routes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, r)| r)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.routes.iter().map(|(n, _)| n.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Route)> {
        self.routes.iter().map(|(n, r)| (n.as_str(), r))
    }
}

impl IntoIterator for RouteCollection {
    type Item = (String, Route);
    type IntoIter = std::vec::IntoIter<(String, Route)>;

    fn into_iter(self) -> Self::IntoIter {
        self.routes.into_iter()
    }
}

impl<S: Into<String>> FromIterator<(S, Route)> for RouteCollection {
    fn from_iter<I: IntoIterator<Item = (S, Route)>>(iter: I) -> Self {
        let mut collection = RouteCollection::new();
        for (name, route) in iter {
            collection.insert(name, route);
        }
        collection
    }
}
