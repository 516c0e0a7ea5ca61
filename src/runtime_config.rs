//! # Runtime Configuration Module
//!
//! Environment variable based configuration for the `routedispatch` binary
//! and for host applications that want the same conventions.
//!
//! ## Environment Variables
//!
//! - `ROUTEDISPATCH_ROUTES` - path of the route table file (YAML, JSON or TOML)
//! - `ROUTEDISPATCH_WATCH` - `true`/`1`/`yes`/`on` to reload the route file
//!   when it changes
//! - logging variables, see [`crate::logging`]
//!
//! ## Usage
//!
//! ```rust
//! use routedispatch::runtime_config::RuntimeConfig;
//!
//! let config = RuntimeConfig::from_env();
//! if let Some(path) = &config.routes_path {
//!     println!("routes from {}", path.display());
//! }
//! ```

use crate::logging::LogConfig;
use std::env;
use std::path::PathBuf;

/// Runtime configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RuntimeConfig {
    /// Route table file, if configured
    pub routes_path: Option<PathBuf>,
    /// Reload the route table when the file changes
    pub watch: bool,
    pub log: LogConfig,
}

impl RuntimeConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`RuntimeConfig::from_env`] but reading through `lookup`
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let routes_path = lookup("ROUTEDISPATCH_ROUTES")
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from);
        let watch = lookup("ROUTEDISPATCH_WATCH")
            .map(|v| parse_flag(&v))
            .unwrap_or(false);
        RuntimeConfig {
            routes_path,
            watch,
            log: LogConfig::from_lookup(&lookup),
        }
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
