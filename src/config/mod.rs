//! # Route Configuration
//!
//! Builds ordered route collections from declarative configuration.
//!
//! A route table is a mapping from route name to a record:
//!
//! ```yaml
//! hello:
//!   path: /foo/hello/{name}/{surname}
//!   method: [GET]                  # or `methods`, a string or a list
//!   controller: app.HelloController # or `handler`
//! world:
//!   path: /foo/world/{name}/{number}
//!   methods: [GET, POST]
//!   controller: app.WorldController
//!   action: world_action
//!   requirements: { name: '\w+', number: '\d+' }
//!   protocols: [HTTP, HTTPS]
//!   host: foo.com
//! ```
//!
//! [`generate_routes`] works on any `serde_json::Value`, so the core is not
//! tied to a file format; [`load_routes`] reads YAML, JSON or TOML files.
//! In every case the mapping order is kept and becomes match priority.

mod build;
mod load;
mod types;

pub use build::{generate_routes, generate_routes_from};
pub(crate) use build::kind;
pub use load::{load_routes, parse_routes, parse_value, RoutesFormat};
pub use types::{OneOrMany, RouteCollection, RouteConfig};
