use crate::error::SourceError;
use crate::traits::TraktApi;
use crate::trakt::{api, auth};
use async_trait::async_trait;
use chrono::{Duration, Utc};
use reqwest::Client;
use serde_json::Value;
use std::path::PathBuf;
use trakt_watch_config::CredentialStore;
use trakt_watch_models::{
    HistoryEntry, HistoryKind, MediaRecord, MediaReference, Rating, SearchResult, SearchType,
    ShowProgress, WatchedAt,
};
use tracing::info;

/// Tokens expiring sooner than this are refreshed before use
const REFRESH_WINDOW_MINUTES: i64 = 5;

#[derive(Clone)]
pub struct TraktClient {
    client: Client,
    access_token: Option<String>,
    client_id: String,
    client_secret: String,
}

impl TraktClient {
    pub fn new(client_id: String, client_secret: String) -> Self {
        Self {
            client: auth::create_trakt_client(),
            access_token: None,
            client_id,
            client_secret,
        }
    }

    pub fn http(&self) -> &Client {
        &self.client
    }

    /// Load the saved token, refreshing it when it is about to expire.
    ///
    /// A missing or unrefreshable token is reported as `NotAuthenticated`; the
    /// interactive authorization lives in `trakt-watch config trakt`.
    pub async fn authenticate(&mut self, credentials_file: PathBuf) -> Result<(), SourceError> {
        let mut cred_store = CredentialStore::new(credentials_file);
        cred_store
            .load()
            .map_err(|e| SourceError::NotAuthenticated(format!("could not read credentials: {}", e)))?;

        if let Some(saved_token) = cred_store.get_trakt_access_token() {
            let fresh = cred_store
                .get_trakt_token_expires()
                .map(|expires_at| expires_at > Utc::now() + Duration::minutes(REFRESH_WINDOW_MINUTES))
                .unwrap_or(true);
            if fresh {
                self.access_token = Some(saved_token.clone());
                return Ok(());
            }
            info!("Trakt access token expired or expiring soon, refreshing");
        }

        let refresh_token = cred_store.get_trakt_refresh_token().cloned().ok_or_else(|| {
            SourceError::NotAuthenticated("no saved token, run `trakt-watch config trakt`".to_string())
        })?;

        let token_info =
            auth::refresh_access_token(&self.client, &self.client_id, &self.client_secret, &refresh_token).await?;

        cred_store.set_trakt_access_token(token_info.access_token.clone());
        cred_store.set_trakt_refresh_token(token_info.refresh_token);
        cred_store.set_trakt_token_expires(token_info.expires_at);
        cred_store
            .save()
            .map_err(|e| SourceError::NotAuthenticated(format!("could not save refreshed token: {}", e)))?;

        self.access_token = Some(token_info.access_token);
        info!("Authenticated to Trakt");
        Ok(())
    }

    pub fn is_authenticated(&self) -> bool {
        self.access_token.is_some()
    }

    fn access_token(&self) -> Result<&str, SourceError> {
        self.access_token
            .as_deref()
            .ok_or_else(|| SourceError::NotAuthenticated("Not authenticated".to_string()))
    }
}

#[async_trait]
impl TraktApi for TraktClient {
    async fn search(&self, term: &str, scope: Option<SearchType>) -> Result<Vec<SearchResult>, SourceError> {
        api::search(&self.client, self.access_token()?, &self.client_id, term, scope).await
    }

    async fn fetch_search_result(&self, result: &SearchResult) -> Result<SearchResult, SourceError> {
        api::refresh_search_result(&self.client, self.access_token()?, &self.client_id, result).await
    }

    async fn fetch(&self, reference: &MediaReference) -> Result<MediaRecord, SourceError> {
        api::fetch_record(&self.client, self.access_token()?, &self.client_id, reference).await
    }

    async fn history_page(
        &self,
        username: &str,
        kind: Option<HistoryKind>,
        page: u32,
        limit: u32,
    ) -> Result<Vec<HistoryEntry>, SourceError> {
        api::get_history_page(&self.client, self.access_token()?, &self.client_id, username, kind, page, limit).await
    }

    async fn show_progress(&self, show_id: u64, include_specials: bool) -> Result<ShowProgress, SourceError> {
        api::get_show_progress(&self.client, self.access_token()?, &self.client_id, show_id, include_specials).await
    }

    async fn mark_seen(&self, reference: &MediaReference, watched_at: WatchedAt) -> Result<Value, SourceError> {
        api::add_to_history(&self.client, self.access_token()?, &self.client_id, reference, watched_at).await
    }

    async fn rate(&self, reference: &MediaReference, rating: Rating) -> Result<Value, SourceError> {
        api::add_rating(&self.client, self.access_token()?, &self.client_id, reference, rating).await
    }

    async fn remove_history(&self, history_id: u64) -> Result<Value, SourceError> {
        api::remove_from_history(&self.client, self.access_token()?, &self.client_id, history_id).await
    }

    async fn current_username(&self) -> Result<String, SourceError> {
        api::get_username(&self.client, self.access_token()?, &self.client_id).await
    }
}
