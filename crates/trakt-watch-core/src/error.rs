use std::io;
use thiserror::Error;
use trakt_watch_models::ModelError;
use trakt_watch_sources::SourceError;

/// Ways turning user intent into a media reference, or acting on one, can fail.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// Unparseable URL, bad season/episode numbers, or a remote record missing required fields
    #[error("malformed reference: {0}")]
    MalformedReference(String),

    #[error("No results found")]
    NoResults,

    #[error("no next episode for {0}")]
    NoProgress(String),

    #[error("cancelled by user")]
    UserCancelled,

    #[error(transparent)]
    Remote(SourceError),

    #[error("terminal I/O failed: {0}")]
    Terminal(#[from] io::Error),
}

impl From<SourceError> for ResolveError {
    fn from(err: SourceError) -> Self {
        match err {
            SourceError::MalformedRecord(message) => Self::MalformedReference(message),
            other => Self::Remote(other),
        }
    }
}

impl From<ModelError> for ResolveError {
    fn from(err: ModelError) -> Self {
        Self::MalformedReference(err.to_string())
    }
}
