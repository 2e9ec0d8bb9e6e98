use crate::display::history_line;
use crate::error::ResolveError;
use crate::picker::pick;
use crate::prompter::Prompter;
use std::collections::HashMap;
use tracing::debug;
use trakt_watch_models::{EpisodeRef, HistoryEntry, HistoryMedia, NextEpisode, ShowRef};
use trakt_watch_sources::TraktApi;

/// Most recent episode watch per show id, built from one history page.
///
/// For equal `watched_at` values the entry seen later in the page wins.
#[derive(Debug, Default)]
pub struct ProgressState<'a> {
    latest: HashMap<u64, (usize, &'a HistoryEntry)>,
}

impl<'a> ProgressState<'a> {
    pub fn get(&self, show_id: u64) -> Option<&'a HistoryEntry> {
        self.latest.get(&show_id).map(|(_, entry)| *entry)
    }

    pub fn len(&self) -> usize {
        self.latest.len()
    }

    pub fn is_empty(&self) -> bool {
        self.latest.is_empty()
    }

    /// Most recently watched show first; equal timestamps keep page order
    pub fn into_ordered(self) -> Vec<&'a HistoryEntry> {
        let mut retained: Vec<(usize, &HistoryEntry)> = self.latest.into_values().collect();
        retained.sort_by(|(pos_a, a), (pos_b, b)| {
            b.watched_at.cmp(&a.watched_at).then(pos_a.cmp(pos_b))
        });
        retained.into_iter().map(|(_, entry)| entry).collect()
    }
}

/// Fold `history` down to the latest `watch` of an episode for each show
pub fn latest_per_show(history: &[HistoryEntry]) -> ProgressState<'_> {
    let mut state = ProgressState::default();
    for (position, entry) in history.iter().enumerate() {
        if !entry.is_episode_watch() {
            continue;
        }
        let Some(show_id) = entry.show_id() else {
            continue;
        };
        match state.latest.get(&show_id) {
            Some((_, kept)) if kept.watched_at > entry.watched_at => {}
            _ => {
                state.latest.insert(show_id, (position, entry));
            }
        }
    }
    debug!(
        "Reduced {} history entries to {} shows in progress",
        history.len(),
        state.len()
    );
    state
}

/// The episode to mark watched next, and the show it belongs to
#[derive(Debug, Clone, PartialEq)]
pub struct NextUp {
    pub show: ShowRef,
    pub show_title: String,
    pub episode: EpisodeRef,
    pub episode_title: Option<String>,
}

impl NextUp {
    pub fn describe(&self) -> String {
        format!(
            "{} S{}E{} - {}",
            self.show_title,
            self.episode.season(),
            self.episode.episode(),
            self.episode_title.as_deref().unwrap_or("TBA")
        )
    }
}

fn episode_number(value: Option<i64>, field: &str, show_title: &str) -> Result<u32, ResolveError> {
    value
        .and_then(|number| u32::try_from(number).ok())
        .ok_or_else(|| {
            ResolveError::MalformedReference(format!(
                "progress for '{}' has no valid next episode {}",
                show_title, field
            ))
        })
}

fn next_episode_ref(show_id: &str, next: &NextEpisode, show_title: &str) -> Result<EpisodeRef, ResolveError> {
    let season = episode_number(next.season, "season", show_title)?;
    let number = episode_number(next.number, "number", show_title)?;
    Ok(EpisodeRef::new(show_id, season, number)?)
}

/// Pick a show in progress from `history` and compute its next unwatched episode.
///
/// Returns `Ok(None)` when the user declines the final confirmation, which
/// callers treat as a clean exit with nothing changed.
pub async fn next_unwatched<A, P>(
    api: &A,
    prompter: &mut P,
    history: &[HistoryEntry],
    include_specials: bool,
    skip_confirmation: bool,
) -> Result<Option<NextUp>, ResolveError>
where
    A: TraktApi + ?Sized,
    P: Prompter + ?Sized,
{
    let candidates = latest_per_show(history).into_ordered();
    if candidates.is_empty() {
        return Err(ResolveError::NoProgress(
            "any show: no episode watches in recent history".to_string(),
        ));
    }

    let label = format!(
        "Pick show - enter 1-{}, or q to quit, u to show URLs",
        candidates.len()
    );
    let chosen = pick(
        &candidates,
        |show_urls, items, p: &mut P| {
            p.display("Shows in progress:");
            for (i, entry) in items.iter().enumerate() {
                p.display(&format!("{}: {}", i + 1, history_line(entry, false, show_urls)));
            }
        },
        &label,
        false,
        prompter,
    )?;

    let HistoryMedia::Episode(last) = &chosen.item.media else {
        return Err(ResolveError::MalformedReference(
            "picked history entry is not an episode".to_string(),
        ));
    };
    let show = &last.show;

    let progress = api.show_progress(show.ids.trakt_id, include_specials).await?;
    let next = progress
        .next_episode
        .ok_or_else(|| ResolveError::NoProgress(show.title.clone()))?;

    let show_id = show
        .ids
        .trakt_slug
        .clone()
        .filter(|slug| !slug.trim().is_empty())
        .unwrap_or_else(|| show.ids.trakt_id.to_string());
    let episode = next_episode_ref(&show_id, &next, &show.title)?;

    let next_up = NextUp {
        show: episode.show(),
        show_title: show.title.clone(),
        episode,
        episode_title: next.title,
    };

    if !skip_confirmation {
        let question = format!("Mark {} as watched?", next_up.describe());
        if !prompter.confirm(&question, true)? {
            return Ok(None);
        }
    }
    Ok(Some(next_up))
}
