//! # routedispatch
//!
//! **routedispatch** is a request-routing and dispatch layer: it matches an
//! inbound request (method, path, protocol, host) against an ordered set of
//! route definitions, extracts named path parameters, and invokes the
//! handler the winning route names, constructing that handler with
//! dependencies injected from a configured source.
//!
//! ## Architecture
//!
//! - **[`route`]** - Route definitions: path templates compiled to anchored
//!   regular expressions, plus method, protocol and host constraints
//! - **[`router`]** - Ordered, first-match route selection
//! - **[`config`]** - Route tables from YAML, JSON or TOML configuration
//! - **[`dependencies`]** - Dependency sources and per-handler resolution
//! - **[`handler`]** / **[`registry`]** - The `Controller` trait and the
//!   identifier → constructor registry
//! - **[`dispatcher`]** - Match → resolve → construct → invoke, with a
//!   not-found fallback
//! - **[`hot_reload`]** - Swap in a rebuilt routing table when its file changes
//! - **[`logging`]** / **[`runtime_config`]** - Environment driven setup
//!
//! ### Request Flow
//!
//! ```mermaid
//! sequenceDiagram
//!     participant Host as Host application
//!     participant Disp as Dispatcher
//!     participant Router
//!     participant Reg as HandlerRegistry
//!     participant Deps as DependencySource
//!     participant Ctl as Controller
//!
//!     Host->>Disp: dispatch(&Request)
//!     Disp->>Router: match_request(&Request)
//!     alt route matched
//!         Router-->>Disp: RouteMatch { route, params }
//!         Disp->>Reg: get(route.handler())
//!         Disp->>Deps: resolve(declared names)
//!         Disp->>Ctl: construct(&Request, &Dependencies)
//!         Disp->>Ctl: call_action(route.action(), &params)
//!         Ctl-->>Host: Response
//!     else no match
//!         Disp->>Deps: resolve(not-found names)
//!         Disp-->>Host: NotFoundHandler response
//!     end
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use routedispatch::dependencies::Dependencies;
//! use routedispatch::dispatcher::Dispatcher;
//! use routedispatch::error::DispatcherError;
//! use routedispatch::handler::Controller;
//! use routedispatch::registry::HandlerRegistry;
//! use routedispatch::request::Request;
//! use routedispatch::response::Response;
//! use routedispatch::route::Route;
//! use routedispatch::router::{PathParams, Router};
//! use serde_json::json;
//!
//! struct Hello {
//!     suffix: i64,
//! }
//!
//! impl Controller for Hello {
//!     fn dependencies() -> &'static [&'static str] {
//!         &["suffix"]
//!     }
//!
//!     fn construct(_req: &Request, deps: &Dependencies) -> Result<Self, DispatcherError> {
//!         Ok(Self { suffix: *deps.get::<i64>("suffix")? })
//!     }
//!
//!     fn call_action(
//!         &self,
//!         action: &str,
//!         params: &PathParams,
//!     ) -> Option<Result<Response, DispatcherError>> {
//!         match action {
//!             "action" => Some(params.positional::<1>(action).map(|[name]| {
//!                 Response::ok(format!("{name} {}", self.suffix))
//!             })),
//!             _ => None,
//!         }
//!     }
//! }
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let router = Router::new([Route::new("/hello/{name}", "app.Hello")?]);
//! let mut registry = HandlerRegistry::new();
//! registry.register::<Hello>("app.Hello");
//!
//! let dispatcher = Dispatcher::from_value(router, registry, json!({"suffix": 7}))?;
//! let response = dispatcher.dispatch(&Request::new("GET", "/hello/felix"))?;
//! assert_eq!(response.content(), "felix 7");
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod config;
pub mod dependencies;
pub mod dispatcher;
pub mod error;
pub mod handler;
pub mod hot_reload;
pub mod logging;
pub mod registry;
pub mod request;
pub mod response;
pub mod route;
pub mod router;
pub mod runtime_config;

pub use config::{generate_routes, load_routes, RouteCollection};
pub use dependencies::{Dependencies, Dependency, DependencySource};
pub use dispatcher::Dispatcher;
pub use error::{ConfigurationError, DispatcherError};
pub use handler::{Controller, NotFoundHandler};
pub use registry::HandlerRegistry;
pub use request::Request;
pub use response::Response;
pub use route::{Route, RouteBuilder};
pub use router::{PathParams, RouteMatch, Router};
