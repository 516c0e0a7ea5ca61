use serde::{Deserialize, Serialize};

/// Inbound request as seen by the router.
///
/// The transport layer parses the wire request; the router only needs the
/// method, path, protocol (scheme) and host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Request {
    /// HTTP method token (GET, POST, etc.)
    pub method: String,
    /// Request path without query string
    pub path: String,
    /// Protocol identifier, usually `http` or `https`
    pub protocol: String,
    /// Host the request was addressed to
    pub host: String,
}

impl Request {
    /// Create a request with protocol `http` and host `localhost`
    pub fn new(method: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            path: path.into(),
            protocol: "http".to_string(),
            host: "localhost".to_string(),
        }
    }

    #[must_use]
    pub fn with_protocol(mut self, protocol: impl Into<String>) -> Self {
        self.protocol = protocol.into();
        self
    }

    #[must_use]
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }
}
