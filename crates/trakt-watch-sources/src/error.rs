use thiserror::Error;

/// Failures talking to the tracking service. Passed through to the user unchanged.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("{context}: HTTP {status} - {body}")]
    Status {
        context: String,
        status: u16,
        body: String,
    },

    #[error("unexpected response shape: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("malformed record: {0}")]
    MalformedRecord(String),

    #[error("not authenticated: {0}")]
    NotAuthenticated(String),
}

impl SourceError {
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedRecord(message.into())
    }
}
