//! # Router Module
//!
//! Ordered first-match selection of a [`Route`](crate::route::Route) for an
//! incoming [`Request`](crate::request::Request).
//!
//! ## Overview
//!
//! The router is responsible for:
//! - Holding routes in registration order (which is also match priority)
//! - Checking method, protocol, host and path for each route in turn
//! - Extracting path parameters from the winning route
//!
//! Matching is read-only: it never mutates routes or the router, so a single
//! router can be shared by many threads.
//!
//! ## Example
//!
//! ```rust
//! use routedispatch::request::Request;
//! use routedispatch::route::Route;
//! use routedispatch::router::Router;
//!
//! let router = Router::new([
//!     Route::builder("/pets/{id}", "pets").methods(["GET"]).build().unwrap(),
//!     Route::builder("/pets", "pets").action("list").build().unwrap(),
//! ]);
//!
//! let m = router.match_request(&Request::new("GET", "/pets/42")).unwrap();
//! assert_eq!(m.params.get("id"), Some("42"));
//! assert!(router.match_request(&Request::new("GET", "/cats")).is_none());
//! ```

mod core;

pub use core::{ParamVec, PathParams, RouteMatch, Router, MAX_INLINE_PARAMS};
