//! # Dispatcher Module
//!
//! The dispatcher ties routing and handlers together: it matches a request,
//! resolves the matched handler's declared dependencies, constructs the
//! handler and invokes the configured action with the route's path
//! parameters.
//!
//! ## Request Flow
//!
//! 1. Router matches the incoming request → route plus path parameters
//! 2. Dispatcher looks the route's handler identifier up in the
//!    [`HandlerRegistry`](crate::registry::HandlerRegistry)
//! 3. The handler's declared dependencies are resolved from the
//!    [`DependencySource`](crate::dependencies::DependencySource)
//! 4. The handler is constructed with the request and its dependencies, and
//!    the route's action is called with the path parameters in template order
//! 5. Requests no route matches go to the
//!    [`NotFoundHandler`](crate::handler::NotFoundHandler), which receives its
//!    own resolved dependencies and chooses the response status
//!
//! ## Usage
//!
//! ```rust,ignore
//! use routedispatch::config::load_routes;
//! use routedispatch::dispatcher::Dispatcher;
//! use routedispatch::registry::HandlerRegistry;
//! use routedispatch::request::Request;
//! use routedispatch::router::Router;
//! use serde_json::json;
//!
//! let router = Router::from_collection(load_routes("routes.yaml")?);
//! let mut registry = HandlerRegistry::new();
//! registry.register::<HelloController>("app.HelloController");
//!
//! let dispatcher = Dispatcher::from_value(
//!     router,
//!     registry,
//!     json!({"dependency_a": 12345, "dependency_b": "two"}),
//! )?;
//! let response = dispatcher.dispatch(&Request::new("GET", "/foo/hello/felix/carmona"))?;
//! ```
//!
//! ## Error Handling
//!
//! Unmatched requests are not errors. Unknown handler identifiers, unknown
//! actions and dependency mismatches come back as
//! [`DispatcherError`](crate::error::DispatcherError) unchanged; the
//! dispatcher never turns them into responses.
//!
//! ## Concurrency
//!
//! A [`Dispatcher`] is `Send + Sync` and keeps no per-request state, so one
//! instance can serve any number of threads. The routing table sits behind an
//! `ArcSwap` and can be replaced while requests are in flight.

mod core;

pub use core::Dispatcher;
