use super::build::generate_routes;
use super::types::RouteCollection;
use anyhow::{anyhow, Context};
use serde_json::Value;
use std::path::Path;

/// Serialization format of a route file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoutesFormat {
    Yaml,
    Json,
    Toml,
}

impl RoutesFormat {
    /// Pick the format from a file extension (`.yaml`/`.yml`, `.json`, `.toml`)
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "yaml" | "yml" => Some(RoutesFormat::Yaml),
            "json" => Some(RoutesFormat::Json),
            "toml" => Some(RoutesFormat::Toml),
            _ => None,
        }
    }
}

/// Parse route-table text into an order-preserving JSON value
pub fn parse_value(content: &str, format: RoutesFormat) -> anyhow::Result<Value> {
    let value = match format {
        RoutesFormat::Yaml => serde_yaml::from_str(content).context("invalid YAML route table")?,
        RoutesFormat::Json => serde_json::from_str(content).context("invalid JSON route table")?,
        RoutesFormat::Toml => toml::from_str(content).context("invalid TOML route table")?,
    };
    Ok(value)
}

/// Parse route-table text and generate its routes
pub fn parse_routes(content: &str, format: RoutesFormat) -> anyhow::Result<RouteCollection> {
    let value = parse_value(content, format)?;
    Ok(generate_routes(&value)?)
}

/// Load a route table from a YAML, JSON or TOML file
///
/// The format is chosen by file extension. Route order in the file is
/// preserved and becomes match priority.
pub fn load_routes(path: impl AsRef<Path>) -> anyhow::Result<RouteCollection> {
    let path = path.as_ref();
    let format = RoutesFormat::from_path(path)
        .ok_or_else(|| anyhow!("unsupported route file extension: {}", path.display()))?;
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read route file {}", path.display()))?;
    parse_routes(&content, format).with_context(|| format!("failed to load {}", path.display()))
}
