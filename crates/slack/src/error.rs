use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("slack {method} request failed: {source}")]
    Http {
        method: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("slack {method} returned HTTP {status}: {body}")]
    Status {
        method: &'static str,
        status: reqwest::StatusCode,
        body: String,
    },

    /// Slack answered `{"ok": false, "error": "<code>"}`.
    #[error("slack {method} failed: {code}")]
    Api { method: &'static str, code: String },

    #[error("invalid slack {method} response: {source}")]
    Decode {
        method: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to build slack http client: {0}")]
    Client(#[source] reqwest::Error),
}

impl Error {
    /// The Slack error code for `ok: false` responses (`channel_not_found`, ...).
    #[must_use]
    pub fn api_code(&self) -> Option<&str> {
        match self {
            Self::Api { code, .. } => Some(code),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
