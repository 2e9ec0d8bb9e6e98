//! Scripted terminal and in-memory service used by the unit tests.

use crate::prompter::Prompter;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::{json, Value};
use std::collections::{HashMap, VecDeque};
use std::io;
use std::sync::Mutex;
use trakt_watch_models::{
    EpisodeData, HistoryAction, HistoryEntry, HistoryKind, HistoryMedia, MediaIds, MediaKind,
    MediaRecord, MediaReference, MovieData, Rating, SearchResult, SearchType, ShowData, ShowIds,
    ShowProgress, WatchedAt,
};
use trakt_watch_sources::{SourceError, TraktApi};

fn exhausted(what: &str) -> io::Error {
    io::Error::new(io::ErrorKind::UnexpectedEof, format!("script has no more {}", what))
}

#[derive(Default)]
pub struct ScriptedPrompter {
    lines: VecDeque<String>,
    chars: VecDeque<char>,
    confirms: VecDeque<bool>,
    pub displayed: Vec<String>,
    pub errors: Vec<String>,
    pub prompts: Vec<String>,
}

impl ScriptedPrompter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines<I, S>(mut self, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.lines.extend(lines.into_iter().map(Into::into));
        self
    }

    pub fn chars(mut self, chars: &str) -> Self {
        self.chars.extend(chars.chars());
        self
    }

    pub fn confirms(mut self, answers: &[bool]) -> Self {
        self.confirms.extend(answers.iter().copied());
        self
    }
}

impl Prompter for ScriptedPrompter {
    fn display(&mut self, line: &str) {
        self.displayed.push(line.to_string());
    }

    fn report_error(&mut self, message: &str) {
        self.errors.push(message.to_string());
    }

    fn read_line(&mut self, prompt: &str, default: Option<&str>) -> io::Result<String> {
        self.prompts.push(prompt.to_string());
        let line = self.lines.pop_front().ok_or_else(|| exhausted("lines"))?;
        match default {
            Some(default) if line.trim().is_empty() => Ok(default.to_string()),
            _ => Ok(line),
        }
    }

    fn read_char(&mut self, prompt: &str) -> io::Result<char> {
        self.prompts.push(prompt.to_string());
        self.chars.pop_front().ok_or_else(|| exhausted("key presses"))
    }

    fn confirm(&mut self, prompt: &str, _default: bool) -> io::Result<bool> {
        self.prompts.push(prompt.to_string());
        self.confirms.pop_front().ok_or_else(|| exhausted("confirmations"))
    }
}

/// In-memory service recording every call, mutating ones included.
#[derive(Default)]
pub struct FakeApi {
    pub search_results: Vec<SearchResult>,
    pub records: HashMap<String, MediaRecord>,
    pub history: Vec<HistoryEntry>,
    pub progress: HashMap<u64, ShowProgress>,
    pub calls: Mutex<Vec<String>>,
}

impl FakeApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_record(mut self, reference: &MediaReference, record: MediaRecord) -> Self {
        self.records.insert(reference.web_path(), record);
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record_call(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl TraktApi for FakeApi {
    async fn search(&self, term: &str, scope: Option<SearchType>) -> Result<Vec<SearchResult>, SourceError> {
        let scope = scope.map(|s| s.as_str()).unwrap_or("all");
        self.record_call(format!("search {} {}", scope, term));
        Ok(self.search_results.clone())
    }

    async fn fetch_search_result(&self, result: &SearchResult) -> Result<SearchResult, SourceError> {
        self.record_call(format!("refresh {}", result.canonical_path().unwrap_or_default()));
        Ok(result.clone())
    }

    async fn fetch(&self, reference: &MediaReference) -> Result<MediaRecord, SourceError> {
        self.record_call(format!("fetch {}", reference));
        self.records.get(&reference.web_path()).cloned().ok_or(SourceError::Status {
            context: "Failed to fetch".to_string(),
            status: 404,
            body: String::new(),
        })
    }

    async fn history_page(
        &self,
        username: &str,
        kind: Option<HistoryKind>,
        page: u32,
        limit: u32,
    ) -> Result<Vec<HistoryEntry>, SourceError> {
        let kind = kind.map(|k| k.as_path_segment()).unwrap_or("all");
        self.record_call(format!("history {} {} {} {}", username, kind, page, limit));
        Ok(self.history.iter().take(limit as usize).cloned().collect())
    }

    async fn show_progress(&self, show_id: u64, include_specials: bool) -> Result<ShowProgress, SourceError> {
        self.record_call(format!("progress {} {}", show_id, include_specials));
        Ok(self.progress.get(&show_id).cloned().unwrap_or_default())
    }

    async fn mark_seen(&self, reference: &MediaReference, watched_at: WatchedAt) -> Result<Value, SourceError> {
        let at = watched_at.payload_value().unwrap_or_else(|| "now".to_string());
        self.record_call(format!("seen {} at {}", reference, at));
        Ok(json!({"added": {"movies": 1, "episodes": 0}, "not_found": {"movies": []}}))
    }

    async fn rate(&self, reference: &MediaReference, rating: Rating) -> Result<Value, SourceError> {
        self.record_call(format!("rate {} {}", reference, rating));
        Ok(json!({"added": {"movies": 1, "shows": 0, "seasons": 0, "episodes": 0}, "not_found": {}}))
    }

    async fn remove_history(&self, history_id: u64) -> Result<Value, SourceError> {
        self.record_call(format!("remove {}", history_id));
        Ok(json!({"deleted": {"movies": 0, "episodes": 1}, "not_found": {"ids": []}}))
    }

    async fn current_username(&self) -> Result<String, SourceError> {
        Ok("sean".to_string())
    }
}

pub fn at(timestamp: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(timestamp).unwrap().with_timezone(&Utc)
}

pub fn episode_watch(history_id: u64, show_id: u64, slug: &str, season: u32, episode: u32, watched_at: &str) -> HistoryEntry {
    HistoryEntry {
        history_id,
        watched_at: at(watched_at),
        action: HistoryAction::Watch,
        media: HistoryMedia::Episode(EpisodeData {
            title: Some(format!("Episode {}", episode)),
            season,
            episode,
            ids: MediaIds::default(),
            show: ShowData {
                title: format!("Show {}", show_id),
                year: Some(2008),
                ids: ShowIds {
                    trakt_id: show_id,
                    trakt_slug: Some(slug.to_string()),
                },
            },
        }),
    }
}

pub fn movie_watch(history_id: u64, slug: &str, watched_at: &str) -> HistoryEntry {
    HistoryEntry {
        history_id,
        watched_at: at(watched_at),
        action: HistoryAction::Watch,
        media: HistoryMedia::Movie(MovieData {
            title: "Inception".to_string(),
            year: Some(2010),
            ids: MediaIds {
                slug: Some(slug.to_string()),
                ..MediaIds::default()
            },
        }),
    }
}

pub fn movie_record(title: &str, tmdb: Option<u32>) -> MediaRecord {
    MediaRecord {
        kind: MediaKind::Movie,
        title: title.to_string(),
        year: Some(2010),
        ids: MediaIds {
            tmdb,
            ..MediaIds::default()
        },
        show_title: None,
    }
}
