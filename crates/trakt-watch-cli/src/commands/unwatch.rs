use super::prompts::TerminalPrompter;
use super::AppContext;
use crate::output::Output;
use color_eyre::Result;
use trakt_watch_core::{recent_history, unwatch, UnwatchOptions};

pub async fn run_unwatch(
    limit: Option<u32>,
    interactive: bool,
    yes: bool,
    ctx: &AppContext,
    output: &Output,
) -> Result<()> {
    let client = ctx.connect().await?;
    let session = ctx.session(&client).await?;
    let mut prompter = TerminalPrompter::new();

    let options = UnwatchOptions {
        limit: ctx.history_limit(limit),
        interactive,
        assume_yes: yes,
    };
    let outcome = unwatch(&client, &mut prompter, &session, options).await?;
    tracing::info!("Removed history entry {}", outcome.removed.history_id);
    output.response(&outcome.response, false);

    let history = recent_history(&client, &session, None, options.limit).await?;
    output.history(&history, true, false);
    Ok(())
}
