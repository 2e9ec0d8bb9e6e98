use crate::media_ids::MediaIds;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// How a play ended up in the history
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HistoryAction {
    Watch,
    Scrobble,
    Checkin,
    Other,
}

impl HistoryAction {
    pub fn from_api(action: &str) -> Self {
        match action {
            "watch" => Self::Watch,
            "scrobble" => Self::Scrobble,
            "checkin" => Self::Checkin,
            _ => Self::Other,
        }
    }
}

/// History filter used by the `users/{user}/history/{kind}` endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryKind {
    Movies,
    Episodes,
}

impl HistoryKind {
    pub fn as_path_segment(&self) -> &'static str {
        match self {
            Self::Movies => "movies",
            Self::Episodes => "episodes",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShowIds {
    pub trakt_id: u64,
    pub trakt_slug: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShowData {
    pub title: String,
    pub year: Option<u32>,
    pub ids: ShowIds,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MovieData {
    pub title: String,
    pub year: Option<u32>,
    pub ids: MediaIds,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EpisodeData {
    pub title: Option<String>,
    pub season: u32,
    pub episode: u32,
    pub ids: MediaIds,
    pub show: ShowData,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "media_type", content = "media_data", rename_all = "lowercase")]
pub enum HistoryMedia {
    Movie(MovieData),
    Episode(EpisodeData),
}

/// One play from a page of the user's watch history.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoryEntry {
    pub history_id: u64,
    pub watched_at: DateTime<Utc>,
    pub action: HistoryAction,
    pub media: HistoryMedia,
}

impl HistoryEntry {
    /// Show id for episode plays, `None` for movies
    pub fn show_id(&self) -> Option<u64> {
        match &self.media {
            HistoryMedia::Episode(ep) => Some(ep.show.ids.trakt_id),
            HistoryMedia::Movie(_) => None,
        }
    }

    pub fn is_episode_watch(&self) -> bool {
        self.action == HistoryAction::Watch && matches!(self.media, HistoryMedia::Episode(_))
    }

    /// Site path of the played item, when the service gave us a slug for it
    pub fn web_path(&self) -> Option<String> {
        match &self.media {
            HistoryMedia::Movie(movie) => movie
                .ids
                .slug
                .as_ref()
                .map(|slug| format!("movies/{}", slug)),
            HistoryMedia::Episode(ep) => ep.show.ids.trakt_slug.as_ref().map(|slug| {
                format!("shows/{}/seasons/{}/episodes/{}", slug, ep.season, ep.episode)
            }),
        }
    }
}
