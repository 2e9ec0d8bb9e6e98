use crate::error::ModelError;
use serde::Serialize;
use std::fmt;

/// Host every canonical media URL is expected to live on
pub const TRAKT_HOST: &str = "trakt.tv";
pub const TRAKT_WEB_BASE: &str = "https://trakt.tv";

fn validate_id(id: &str) -> Result<String, ModelError> {
    let id = id.trim();
    if id.is_empty() {
        return Err(ModelError::EmptyId);
    }
    if id.contains('/') {
        return Err(ModelError::InvalidId(id.to_string()));
    }
    Ok(id.to_string())
}

/// A movie addressed by its slug or numeric Trakt id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct MovieRef {
    id: String,
}

impl MovieRef {
    pub fn new(id: &str) -> Result<Self, ModelError> {
        Ok(Self { id: validate_id(id)? })
    }

    pub fn id(&self) -> &str {
        &self.id
    }
}

/// A show addressed by its slug or numeric Trakt id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ShowRef {
    id: String,
}

impl ShowRef {
    pub fn new(id: &str) -> Result<Self, ModelError> {
        Ok(Self { id: validate_id(id)? })
    }

    pub fn id(&self) -> &str {
        &self.id
    }
}

/// A single episode within a show. Season 0 holds specials, episodes start at 1.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct EpisodeRef {
    show_id: String,
    season: u32,
    episode: u32,
}

impl EpisodeRef {
    pub fn new(show_id: &str, season: u32, episode: u32) -> Result<Self, ModelError> {
        if episode == 0 {
            return Err(ModelError::ZeroEpisode);
        }
        Ok(Self {
            show_id: validate_id(show_id)?,
            season,
            episode,
        })
    }

    pub fn show_id(&self) -> &str {
        &self.show_id
    }

    pub fn season(&self) -> u32 {
        self.season
    }

    pub fn episode(&self) -> u32 {
        self.episode
    }

    /// The show this episode belongs to
    pub fn show(&self) -> ShowRef {
        ShowRef {
            id: self.show_id.clone(),
        }
    }
}

/// Typed, immutable identifier for a piece of media, independent of any fetched data.
///
/// Resolving a reference to a full record is a separate fetch owned by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MediaReference {
    Movie(MovieRef),
    Episode(EpisodeRef),
    Show(ShowRef),
}

impl MediaReference {
    pub fn movie(id: &str) -> Result<Self, ModelError> {
        MovieRef::new(id).map(Self::Movie)
    }

    pub fn show(id: &str) -> Result<Self, ModelError> {
        ShowRef::new(id).map(Self::Show)
    }

    pub fn episode(show_id: &str, season: u32, episode: u32) -> Result<Self, ModelError> {
        EpisodeRef::new(show_id, season, episode).map(Self::Episode)
    }

    /// Path of this reference on the tracking site, without a leading slash
    pub fn web_path(&self) -> String {
        match self {
            Self::Movie(movie) => format!("movies/{}", movie.id),
            Self::Episode(ep) => format!(
                "shows/{}/seasons/{}/episodes/{}",
                ep.show_id, ep.season, ep.episode
            ),
            Self::Show(show) => format!("shows/{}", show.id),
        }
    }

    pub fn web_url(&self) -> String {
        format!("{}/{}", TRAKT_WEB_BASE, self.web_path())
    }
}

impl From<MovieRef> for MediaReference {
    fn from(value: MovieRef) -> Self {
        Self::Movie(value)
    }
}

impl From<EpisodeRef> for MediaReference {
    fn from(value: EpisodeRef) -> Self {
        Self::Episode(value)
    }
}

impl From<ShowRef> for MediaReference {
    fn from(value: ShowRef) -> Self {
        Self::Show(value)
    }
}

impl fmt::Display for MediaReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Movie(movie) => write!(f, "movie {}", movie.id),
            Self::Episode(ep) => write!(f, "{} S{}E{}", ep.show_id, ep.season, ep.episode),
            Self::Show(show) => write!(f, "show {}", show.id),
        }
    }
}
