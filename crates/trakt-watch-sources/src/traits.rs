use crate::error::SourceError;
use async_trait::async_trait;
use serde_json::Value;
use trakt_watch_models::{
    HistoryEntry, HistoryKind, MediaRecord, MediaReference, Rating, SearchResult, SearchType,
    ShowProgress, WatchedAt,
};

/// The operations the resolution engine needs from the remote tracking service.
///
/// Every call is a single request/response round trip. Mutating calls return
/// the server's structured response untouched so it can be shown to the user.
#[async_trait]
pub trait TraktApi: Send + Sync {
    /// Free-text search, scoped to one media type or across all of them when `scope` is `None`
    async fn search(
        &self,
        term: &str,
        scope: Option<SearchType>,
    ) -> Result<Vec<SearchResult>, SourceError>;

    /// Re-fetch the full record behind a search hit
    async fn fetch_search_result(&self, result: &SearchResult) -> Result<SearchResult, SourceError>;

    async fn fetch(&self, reference: &MediaReference) -> Result<MediaRecord, SourceError>;

    async fn history_page(
        &self,
        username: &str,
        kind: Option<HistoryKind>,
        page: u32,
        limit: u32,
    ) -> Result<Vec<HistoryEntry>, SourceError>;

    async fn show_progress(
        &self,
        show_id: u64,
        include_specials: bool,
    ) -> Result<ShowProgress, SourceError>;

    async fn mark_seen(
        &self,
        reference: &MediaReference,
        watched_at: WatchedAt,
    ) -> Result<Value, SourceError>;

    async fn rate(&self, reference: &MediaReference, rating: Rating) -> Result<Value, SourceError>;

    async fn remove_history(&self, history_id: u64) -> Result<Value, SourceError>;

    /// Slug of the user the access token belongs to
    async fn current_username(&self) -> Result<String, SourceError>;
}
