//! Handler registry: handler identifier → constructor.
//!
//! Route definitions name their handler with an opaque identifier string
//! (for example `app.HelloController`). The host application populates a
//! [`HandlerRegistry`] at startup, and the dispatcher looks the identifier up
//! for every matched request.

use crate::dependencies::Dependencies;
use crate::error::DispatcherError;
use crate::handler::Controller;
use crate::request::Request;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

type ConstructFn =
    dyn Fn(&Request, &Dependencies) -> Result<Box<dyn Controller>, DispatcherError> + Send + Sync;

/// Registered constructor plus its declared dependency names
#[derive(Clone)]
pub struct HandlerEntry {
    dependencies: Vec<String>,
    construct: Arc<ConstructFn>,
}

impl HandlerEntry {
    /// Declared dependency names, in declaration order
    #[must_use]
    pub fn dependencies(&self) -> &[String] {
        &self.dependencies
    }

    /// Construct a controller for `request`
    ///
    /// # Errors
    ///
    /// Whatever the controller's constructor reports.
    pub fn construct(
        &self,
        request: &Request,
        dependencies: &Dependencies,
    ) -> Result<Box<dyn Controller>, DispatcherError> {
        (self.construct)(request, dependencies)
    }
}

impl fmt::Debug for HandlerEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandlerEntry")
            .field("dependencies", &self.dependencies)
            .finish_non_exhaustive()
    }
}

/// Name → constructor lookup used by the dispatcher
#[derive(Clone, Debug, Default)]
pub struct HandlerRegistry {
    handlers: HashMap<String, HandlerEntry>,
}

impl HandlerRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register controller type `C` under `identifier`
    ///
    /// Registering the same identifier again replaces the earlier entry.
    pub fn register<C: Controller>(&mut self, identifier: impl Into<String>) -> &mut Self {
        let dependencies = C::dependencies().iter().map(|d| d.to_string()).collect();
        self.insert(
            identifier.into(),
            dependencies,
            Arc::new(
                |request: &Request,
                 deps: &Dependencies|
                 -> Result<Box<dyn Controller>, DispatcherError> {
                    Ok(Box::new(C::construct(request, deps)?))
                },
            ),
        );
        self
    }

    /// Register a constructor closure with an explicit dependency list
    pub fn register_fn<F, I, S>(
        &mut self,
        identifier: impl Into<String>,
        dependencies: I,
        construct: F,
    ) -> &mut Self
    where
        F: Fn(&Request, &Dependencies) -> Result<Box<dyn Controller>, DispatcherError>
            + Send
            + Sync
            + 'static,
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.insert(
            identifier.into(),
            dependencies.into_iter().map(Into::into).collect(),
            Arc::new(construct),
        );
        self
    }

    fn insert(&mut self, identifier: String, dependencies: Vec<String>, construct: Arc<ConstructFn>) {
        debug!(
            handler = %identifier,
            dependencies = ?dependencies,
            "Handler registered"
        );
        self.handlers.insert(
            identifier,
            HandlerEntry {
                dependencies,
                construct,
            },
        );
    }

    #[must_use]
    pub fn get(&self, identifier: &str) -> Option<&HandlerEntry> {
        self.handlers.get(identifier)
    }

    #[must_use]
    pub fn contains(&self, identifier: &str) -> bool {
        self.handlers.contains_key(identifier)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Registered identifiers, sorted
    #[must_use]
    pub fn identifiers(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.handlers.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }
}
