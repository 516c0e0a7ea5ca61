//! # Dependency Resolution
//!
//! Handlers declare the names of the dependencies their constructor needs
//! (see [`Controller::dependencies`](crate::handler::Controller::dependencies)).
//! The dispatcher owns one [`DependencySource`] and resolves those names
//! against it for every handler it constructs.
//!
//! ## Source shapes
//!
//! | Source        | Resolution                                             |
//! |---------------|--------------------------------------------------------|
//! | `ByName`      | each declared name is looked up; missing → error       |
//! | `Positional`  | values bound in declaration order; length must match   |
//! | `None`        | only handlers declaring no dependencies can be built   |
//!
//! The shape is decided once, when the source is created. Sources read from
//! configuration go through `TryFrom<serde_json::Value>`, which rejects
//! scalars up front so a misconfigured dispatcher fails at construction
//! rather than on its first request.
//!
//! ```rust
//! use routedispatch::dependencies::{Dependency, DependencySource};
//!
//! let source = DependencySource::by_name([
//!     ("dependency_a", Dependency::new(12345_i64)),
//!     ("dependency_b", Dependency::new(String::from("two"))),
//! ]);
//! let deps = source.resolve("hello", &["dependency_a", "dependency_b"]).unwrap();
//! assert_eq!(*deps.get::<i64>("dependency_a").unwrap(), 12345);
//! assert_eq!(deps.get::<String>("dependency_b").unwrap(), "two");
//! ```

use crate::config::kind;
use crate::error::DispatcherError;
use serde_json::Value;
use std::any::{type_name, Any};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// A shareable, type-erased dependency value
#[derive(Clone)]
pub struct Dependency {
    value: Arc<dyn Any + Send + Sync>,
    type_name: &'static str,
}

impl Dependency {
    pub fn new<T: Any + Send + Sync>(value: T) -> Self {
        Self {
            value: Arc::new(value),
            type_name: type_name::<T>(),
        }
    }

    /// Convert a configuration value into a native dependency
    ///
    /// Integers become `i64` (or `u64` when too large), other numbers `f64`,
    /// strings `String`, booleans `bool`. Arrays, objects and null are kept
    /// as `serde_json::Value`.
    #[must_use]
    pub fn from_json(value: Value) -> Self {
        match value {
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Self::new(i)
                } else if let Some(u) = n.as_u64() {
                    Self::new(u)
                } else {
                    Self::new(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            Value::String(s) => Self::new(s),
            Value::Bool(b) => Self::new(b),
            other => Self::new(other),
        }
    }

    #[must_use]
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.value.downcast_ref::<T>()
    }

    /// Name of the stored type, for diagnostics
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }
}

impl fmt::Debug for Dependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Dependency<{}>", self.type_name)
    }
}

/// Where handler dependencies come from
#[derive(Debug, Clone, Default)]
pub enum DependencySource {
    /// Handlers only receive the request
    #[default]
    None,
    /// Resolved by declared parameter name
    ByName(HashMap<String, Dependency>),
    /// Bound in declaration order
    Positional(Vec<Dependency>),
}

impl DependencySource {
    pub fn by_name<I, K>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, Dependency)>,
        K: Into<String>,
    {
        DependencySource::ByName(entries.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    pub fn positional<I>(values: I) -> Self
    where
        I: IntoIterator<Item = Dependency>,
    {
        DependencySource::Positional(values.into_iter().collect())
    }

    /// Number of configured values
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            DependencySource::None => 0,
            DependencySource::ByName(map) => map.len(),
            DependencySource::Positional(values) => values.len(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Resolve the dependency names declared by `handler`
    ///
    /// # Errors
    ///
    /// - [`DispatcherError::UnresolvedDependency`] when a named source lacks a name
    /// - [`DispatcherError::DependencyCountMismatch`] when a positional source
    ///   has a different length, or there is no source but names are declared
    pub fn resolve<S: AsRef<str>>(
        &self,
        handler: &str,
        names: &[S],
    ) -> Result<Dependencies, DispatcherError> {
        let mut entries = Vec::with_capacity(names.len());
        match self {
            DependencySource::ByName(map) => {
                for name in names {
                    let name = name.as_ref();
                    let dep = map
                        .get(name)
                        .ok_or_else(|| DispatcherError::UnresolvedDependency {
                            handler: handler.to_string(),
                            name: name.to_string(),
                        })?;
                    entries.push((name.to_string(), dep.clone()));
                }
            }
            DependencySource::Positional(values) => {
                if values.len() != names.len() {
                    return Err(DispatcherError::DependencyCountMismatch {
                        handler: handler.to_string(),
                        expected: names.len(),
                        provided: values.len(),
                    });
                }
                for (name, dep) in names.iter().zip(values) {
                    entries.push((name.as_ref().to_string(), dep.clone()));
                }
            }
            DependencySource::None => {
                if !names.is_empty() {
                    return Err(DispatcherError::DependencyCountMismatch {
                        handler: handler.to_string(),
                        expected: names.len(),
                        provided: 0,
                    });
                }
            }
        }
        Ok(Dependencies {
            handler: handler.to_string(),
            entries,
        })
    }
}

impl TryFrom<Value> for DependencySource {
    type Error = DispatcherError;

    /// Objects become `ByName`, arrays `Positional`, null `None`; scalars are
    /// rejected with [`DispatcherError::InvalidDependencySource`].
    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Null => Ok(DependencySource::None),
            Value::Object(map) => Ok(DependencySource::ByName(
                map.into_iter()
                    .map(|(k, v)| (k, Dependency::from_json(v)))
                    .collect(),
            )),
            Value::Array(values) => Ok(DependencySource::Positional(
                values.into_iter().map(Dependency::from_json).collect(),
            )),
            scalar => Err(DispatcherError::InvalidDependencySource {
                found: kind(&scalar).to_string(),
            }),
        }
    }
}

/// Dependencies resolved for one handler, keyed by declared name
#[derive(Debug, Clone, Default)]
pub struct Dependencies {
    handler: String,
    entries: Vec<(String, Dependency)>,
}

impl Dependencies {
    /// Typed access to a resolved dependency
    ///
    /// # Errors
    ///
    /// - [`DispatcherError::UnresolvedDependency`] if `name` was not declared
    /// - [`DispatcherError::DependencyType`] if the value is not a `T`
    pub fn get<T: Any>(&self, name: &str) -> Result<&T, DispatcherError> {
        let dep = self
            .get_raw(name)
            .ok_or_else(|| DispatcherError::UnresolvedDependency {
                handler: self.handler.clone(),
                name: name.to_string(),
            })?;
        dep.downcast_ref::<T>()
            .ok_or_else(|| DispatcherError::DependencyType {
                name: name.to_string(),
                expected: type_name::<T>(),
            })
    }

    #[must_use]
    pub fn get_raw(&self, name: &str) -> Option<&Dependency> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, d)| d)
    }

    /// Handler these dependencies were resolved for
    #[must_use]
    pub fn handler(&self) -> &str {
        &self.handler
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// `(name, value)` pairs in declaration order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Dependency)> {
        self.entries.iter().map(|(n, d)| (n.as_str(), d))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const NAMES: [&str; 2] = ["dependency_a", "dependency_b"];

    #[test]
    fn test_by_name_resolution() {
        let source = DependencySource::try_from(json!({
            "dependency_b": "two",
            "dependency_a": 12345,
            "unused": true
        }))
        .unwrap();
        let deps = source.resolve("hello", &NAMES).unwrap();
        assert_eq!(deps.len(), 2);
        assert_eq!(*deps.get::<i64>("dependency_a").unwrap(), 12345);
        assert_eq!(deps.get::<String>("dependency_b").unwrap(), "two");
        let names: Vec<&str> = deps.iter().map(|(n, _)| n).collect();
        assert_eq!(names, NAMES.to_vec());
    }

    #[test]
    fn test_by_name_missing() {
        let source = DependencySource::by_name([("dependency_a", Dependency::new(1_i64))]);
        let err = source.resolve("hello", &NAMES).unwrap_err();
        assert_eq!(
            err,
            DispatcherError::UnresolvedDependency {
                handler: "hello".to_string(),
                name: "dependency_b".to_string()
            }
        );
    }

    #[test]
    fn test_positional_resolution() {
        let source = DependencySource::try_from(json!([12345, "two"])).unwrap();
        let deps = source.resolve("hello", &NAMES).unwrap();
        assert_eq!(*deps.get::<i64>("dependency_a").unwrap(), 12345);
        assert_eq!(deps.get::<String>("dependency_b").unwrap(), "two");
    }

    #[test]
    fn test_positional_length_mismatch() {
        let source = DependencySource::positional([Dependency::new(1_i64)]);
        let err = source.resolve("hello", &NAMES).unwrap_err();
        assert_eq!(
            err,
            DispatcherError::DependencyCountMismatch {
                handler: "hello".to_string(),
                expected: 2,
                provided: 1
            }
        );
        let err = source.resolve::<&str>("nodeps", &[]).unwrap_err();
        assert!(matches!(err, DispatcherError::DependencyCountMismatch { .. }));
    }

    #[test]
    fn test_none_source() {
        let source = DependencySource::None;
        assert!(source.resolve::<&str>("nodeps", &[]).unwrap().is_empty());
        let err = source.resolve("hello", &NAMES).unwrap_err();
        assert!(matches!(
            err,
            DispatcherError::DependencyCountMismatch { provided: 0, .. }
        ));
        assert!(DependencySource::try_from(Value::Null).unwrap().is_empty());
    }

    #[test]
    fn test_scalar_source_rejected() {
        for scalar in [json!(5), json!("deps"), json!(true)] {
            let err = DependencySource::try_from(scalar).unwrap_err();
            assert!(matches!(err, DispatcherError::InvalidDependencySource { .. }));
        }
    }

    #[test]
    fn test_type_mismatch() {
        let source = DependencySource::positional([Dependency::new(1_i64), Dependency::new(2_i64)]);
        let deps = source.resolve("hello", &NAMES).unwrap();
        let err = deps.get::<String>("dependency_b").unwrap_err();
        assert!(matches!(err, DispatcherError::DependencyType { .. }));
        let err = deps.get::<i64>("nope").unwrap_err();
        assert!(matches!(err, DispatcherError::UnresolvedDependency { .. }));
    }

    #[test]
    fn test_from_json_kinds() {
        assert_eq!(Dependency::from_json(json!(1.5)).downcast_ref::<f64>(), Some(&1.5));
        assert_eq!(
            Dependency::from_json(json!(u64::MAX)).downcast_ref::<u64>(),
            Some(&u64::MAX)
        );
        assert_eq!(Dependency::from_json(json!(false)).downcast_ref::<bool>(), Some(&false));
        assert_eq!(
            Dependency::from_json(json!({"a": 1})).downcast_ref::<Value>(),
            Some(&json!({"a": 1}))
        );
        assert_eq!(
            format!("{:?}", Dependency::new(1_i64)),
            "Dependency<i64>"
        );
    }

    #[test]
    fn test_clones_share_the_value() {
        let dep = Dependency::new(vec![1, 2, 3]);
        let clone = dep.clone();
        let a = dep.downcast_ref::<Vec<i32>>().unwrap();
        let b = clone.downcast_ref::<Vec<i32>>().unwrap();
        assert!(std::ptr::eq(a, b));
    }
}
