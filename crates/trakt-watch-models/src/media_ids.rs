use serde::{Deserialize, Serialize};

/// Identifiers the tracking service attaches to every movie, show and episode.
///
/// Field names follow the service's `ids` object so the struct deserializes
/// straight out of API responses.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct MediaIds {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trakt: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub imdb: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tmdb: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tvdb: Option<u32>,
}

impl MediaIds {
    /// The identifier used in web paths: the slug when present, else the numeric id
    pub fn path_id(&self) -> Option<String> {
        self.slug
            .as_ref()
            .filter(|slug| !slug.trim().is_empty())
            .cloned()
            .or_else(|| self.trakt.map(|id| id.to_string()))
    }
}
