use super::prompts::TerminalPrompter;
use super::AppContext;
use crate::output::Output;
use color_eyre::Result;
use trakt_watch_core::{mark_watched, next_unwatched, recent_history, WatchOptions};
use trakt_watch_models::{HistoryKind, MediaReference, WatchedAt};

/// Pick a show from recent episode history and mark its next episode watched.
pub async fn run_progress(
    limit: Option<u32>,
    include_specials: bool,
    yes: bool,
    at: Option<WatchedAt>,
    ctx: &AppContext,
    output: &Output,
) -> Result<()> {
    let client = ctx.connect().await?;
    let session = ctx.session(&client).await?;
    let mut prompter = TerminalPrompter::new();

    let limit = ctx.history_limit(limit);
    let history = recent_history(&client, &session, Some(HistoryKind::Episodes), limit).await?;
    let include_specials = include_specials || ctx.config.include_specials;

    let Some(next) = next_unwatched(&client, &mut prompter, &history, include_specials, yes).await? else {
        output.println("Nothing marked as watched");
        return Ok(());
    };

    let reference = MediaReference::Episode(next.episode.clone());
    let options = WatchOptions {
        watched_at: at.unwrap_or_default(),
        rating: None,
        prompt_rating: false,
    };
    let outcome = mark_watched(&client, &mut prompter, &reference, options).await?;
    if let Some(seen) = &outcome.seen {
        output.response(seen, false);
    }
    output.success(format!("Marked {} as watched", next.describe()));

    let history = recent_history(&client, &session, None, limit).await?;
    output.history(&history, false, false);
    Ok(())
}
