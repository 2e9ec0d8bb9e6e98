use thiserror::Error;

/// Construction failures for the typed identifiers in this crate.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelError {
    #[error("identifier must not be empty")]
    EmptyId,

    #[error("identifier '{0}' must not contain '/'")]
    InvalidId(String),

    #[error("episode numbers start at 1")]
    ZeroEpisode,

    #[error("rating must be between 1 and 10, got {0}")]
    RatingOutOfRange(u8),

    #[error("unknown companion policy '{0}', expected always, prompt or never")]
    UnknownPolicy(String),
}
