//! # CLI Module
//!
//! Command-line tooling for inspecting route tables.
//!
//! ## Commands
//!
//! ### `routes`
//!
//! Print the routing table in match order:
//!
//! ```bash
//! routedispatch routes --config routes.yaml
//! routedispatch routes --config routes.yaml --watch
//! ```
//!
//! With `--watch` (or `ROUTEDISPATCH_WATCH=true`) the command keeps running
//! and prints the table again after every successful reload of the file.
//!
//! ### `match`
//!
//! Show which route a request would hit and the parameters it extracts:
//!
//! ```bash
//! routedispatch match --config routes.yaml --method GET --path /foo/hello/felix/carmona
//! routedispatch match --config routes.yaml --method POST --path /foo/world/x/1 \
//!     --protocol https --host foo.com --json
//! ```
//!
//! Exits with status 2 when no route matches.
//!
//! ### `check`
//!
//! Load the table and report how many routes it defines; any configuration
//! error is printed and the process exits with status 1.
//!
//! Global options `--log-level` and `--log-format` override
//! `ROUTEDISPATCH_LOG_LEVEL` / `ROUTEDISPATCH_LOG_FORMAT`. `--config` falls
//! back to `ROUTEDISPATCH_ROUTES` through
//! [`RuntimeConfig`](crate::runtime_config::RuntimeConfig).

mod commands;

pub use commands::{run, run_cli, Cli, Commands, Outcome};

#[cfg(test)]
mod tests;
