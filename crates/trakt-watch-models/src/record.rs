use crate::media_ids::MediaIds;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum MediaKind {
    Movie,
    Show,
    Episode,
}

/// Full media object fetched for a resolved reference.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MediaRecord {
    pub kind: MediaKind,
    pub title: String,
    pub year: Option<u32>,
    pub ids: MediaIds,
    /// Owning show title, only set for episodes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_title: Option<String>,
}

impl MediaRecord {
    pub fn display_name(&self) -> String {
        match (self.kind, &self.show_title, self.year) {
            (MediaKind::Episode, Some(show), _) => format!("{}: {}", show, self.title),
            (_, _, Some(year)) => format!("{} ({})", self.title, year),
            _ => self.title.clone(),
        }
    }
}
