use serde::Serialize;

/// Response produced by a handler (or the not-found handler).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Response {
    content: String,
    status_code: u16,
}

impl Response {
    #[must_use]
    pub fn new(content: impl Into<String>, status_code: u16) -> Self {
        Self {
            content: content.into(),
            status_code,
        }
    }

    /// 200 response with the given body
    #[must_use]
    pub fn ok(content: impl Into<String>) -> Self {
        Self::new(content, 200)
    }

    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    #[must_use]
    pub fn status_code(&self) -> u16 {
        self.status_code
    }
}

impl Default for Response {
    fn default() -> Self {
        Self::ok(String::new())
    }
}
