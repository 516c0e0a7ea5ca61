//! # Hot Reload Module
//!
//! Live reloading of a route table file without restarting the host process.
//!
//! The file is watched with `notify`. On every modify/create event the file is
//! loaded again, a fresh [`Router`] is built and swapped into the shared
//! `ArcSwap`. Readers holding the previous table keep it until they drop it;
//! new requests see the new table.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use routedispatch::hot_reload::watch_routes;
//!
//! let dispatcher = Dispatcher::new(router, registry, source);
//! let watcher = watch_routes("routes.yaml", dispatcher.router_handle(), |router| {
//!     println!("reloaded {} routes", router.len());
//! })?;
//! // the watcher stops when dropped
//! ```
//!
//! ## Debouncing
//!
//! Editors usually emit several modify events for one save. The text of the
//! last applied file is kept, and an event that finds the same text again
//! is ignored, so one save swaps the table and calls `on_reload` once.
//!
//! ## Error Handling
//!
//! If the new file fails to parse or a route fails to build, the error is
//! logged and the previous table stays active.
//!
//! The parent directory is watched rather than the file itself, so editors
//! that save by renaming a temporary file over the original keep working.

use crate::config::{parse_routes, RoutesFormat};
use crate::router::Router;
use anyhow::{anyhow, Context};
use arc_swap::ArcSwap;
use notify::{Config, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Watch a route file and swap a rebuilt [`Router`] into `router` when it changes.
///
/// `on_reload` runs after each successful swap with the new table. The
/// returned watcher must be kept alive for reloading to continue.
pub fn watch_routes<P, F>(
    routes_path: P,
    router: Arc<ArcSwap<Router>>,
    mut on_reload: F,
) -> notify::Result<RecommendedWatcher>
where
    P: AsRef<Path>,
    F: FnMut(&Router) + Send + 'static,
{
    let path: PathBuf = routes_path.as_ref().to_path_buf();
    let file_name: Option<OsString> = path.file_name().map(|n| n.to_os_string());
    let watch_dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    let reload_path = path.clone();
    let mut last_applied: Option<String> = None;

    let mut watcher = RecommendedWatcher::new(
        move |res: Result<Event, notify::Error>| match res {
            Ok(event) => {
                if !matches!(event.kind, EventKind::Modify(_) | EventKind::Create(_)) {
                    return;
                }
                let touches_file = event
                    .paths
                    .iter()
                    .any(|p| p.file_name().map(|n| n.to_os_string()) == file_name);
                if !touches_file {
                    return;
                }
                match reload(&reload_path, &mut last_applied) {
                    Ok(None) => {
                        debug!(
                            path = %reload_path.display(),
                            "Route file unchanged, skipping reload"
                        );
                    }
                    Ok(Some(new_router)) => {
                        let new_router = Arc::new(new_router);
                        router.store(Arc::clone(&new_router));
                        info!(
                            path = %reload_path.display(),
                            routes_count = new_router.len(),
                            "Hot reload applied"
                        );
                        on_reload(&new_router);
                    }
                    Err(err) => {
                        warn!(
                            path = %reload_path.display(),
                            error = %format!("{err:#}"),
                            "Hot reload failed, keeping previous routing table"
                        );
                    }
                }
            }
            Err(e) => warn!(error = %e, "Route file watch error"),
        },
        Config::default(),
    )?;

    watcher.watch(&watch_dir, RecursiveMode::NonRecursive)?;
    info!(path = %path.display(), "Watching route file");
    Ok(watcher)
}

/// Build a router from the file unless its text equals `last_applied`
fn reload(path: &Path, last_applied: &mut Option<String>) -> anyhow::Result<Option<Router>> {
    let format = RoutesFormat::from_path(path)
        .ok_or_else(|| anyhow!("unsupported route file extension: {}", path.display()))?;
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read route file {}", path.display()))?;
    if last_applied.as_deref() == Some(content.as_str()) {
        return Ok(None);
    }
    let routes = parse_routes(&content, format)
        .with_context(|| format!("failed to load {}", path.display()))?;
    *last_applied = Some(content);
    Ok(Some(Router::from_collection(routes)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn yaml_file(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(".yaml")
            .tempfile()
            .unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_reload_skips_unchanged_content() {
        let file = yaml_file("a:\n  path: /a\n  controller: A\n");
        let mut last = None;
        let router = reload(file.path(), &mut last).unwrap().unwrap();
        assert_eq!(router.len(), 1);
        assert!(reload(file.path(), &mut last).unwrap().is_none());

        std::fs::write(
            file.path(),
            "a:\n  path: /a\n  controller: A\nb:\n  path: /b\n  controller: B\n",
        )
        .unwrap();
        assert_eq!(reload(file.path(), &mut last).unwrap().unwrap().len(), 2);
    }

    #[test]
    fn test_failed_reload_keeps_last_applied() {
        let file = yaml_file("a:\n  path: /a\n  controller: A\n");
        let mut last = None;
        reload(file.path(), &mut last).unwrap();
        let applied = last.clone();

        std::fs::write(file.path(), "a:\n  path: /a\n").unwrap();
        assert!(reload(file.path(), &mut last).is_err());
        assert_eq!(last, applied);
    }
}
