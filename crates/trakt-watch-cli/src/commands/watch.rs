use super::prompts::TerminalPrompter;
use super::{open_companion, AppContext};
use crate::output::Output;
use color_eyre::Result;
use trakt_watch_core::{mark_watched, recent_history, resolve_input, WatchOptions};
use trakt_watch_models::{CompanionPolicy, Rating, WatchedAt};

/// Entries shown after marking something watched
const HISTORY_AFTER_WATCH: u32 = 10;

pub async fn run_watch(
    url: Option<String>,
    at: Option<WatchedAt>,
    rating: Option<Rating>,
    letterboxd: Option<CompanionPolicy>,
    ctx: &AppContext,
    output: &Output,
) -> Result<()> {
    let client = ctx.connect().await?;
    let session = ctx.session(&client).await?;
    let mut prompter = TerminalPrompter::new();

    let reference = resolve_input(&client, &mut prompter, url.as_deref()).await?;
    tracing::debug!("Resolved {}", reference);

    let options = WatchOptions {
        watched_at: at.unwrap_or_default(),
        rating,
        prompt_rating: ctx.config.prompt_rating,
    };
    let outcome = mark_watched(&client, &mut prompter, &reference, options).await?;
    if let Some(seen) = &outcome.seen {
        output.response(seen, false);
    }
    if let Some(rated) = &outcome.rating {
        output.response(rated, true);
    }

    let policy = letterboxd.unwrap_or(ctx.config.companion);
    open_companion(policy, &outcome.record, &mut prompter, output)?;

    let history = recent_history(&client, &session, None, HISTORY_AFTER_WATCH).await?;
    output.history(&history, false, false);
    Ok(())
}
