pub mod companion;
pub mod error;
pub mod history;
pub mod media_ids;
pub mod progress;
pub mod rating;
pub mod record;
pub mod reference;
pub mod search;
pub mod watched_at;

pub use companion::CompanionPolicy;
pub use error::ModelError;
pub use history::{EpisodeData, HistoryAction, HistoryEntry, HistoryKind, HistoryMedia, MovieData, ShowData, ShowIds};
pub use media_ids::MediaIds;
pub use progress::{NextEpisode, ShowProgress};
pub use rating::Rating;
pub use record::{MediaKind, MediaRecord};
pub use reference::{EpisodeRef, MediaReference, MovieRef, ShowRef, TRAKT_HOST, TRAKT_WEB_BASE};
pub use search::{SearchEpisode, SearchMedia, SearchPerson, SearchResult, SearchType};
pub use watched_at::WatchedAt;
