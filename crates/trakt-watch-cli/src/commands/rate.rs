use super::prompts::TerminalPrompter;
use super::{open_companion, AppContext};
use crate::output::Output;
use color_eyre::Result;
use trakt_watch_core::{rate, resolve_input};
use trakt_watch_models::{CompanionPolicy, Rating};

pub async fn run_rate(
    url: Option<String>,
    rating: Option<Rating>,
    letterboxd: Option<CompanionPolicy>,
    ctx: &AppContext,
    output: &Output,
) -> Result<()> {
    let client = ctx.connect().await?;
    let mut prompter = TerminalPrompter::new();

    let reference = resolve_input(&client, &mut prompter, url.as_deref()).await?;
    let (record, response) = rate(&client, &mut prompter, &reference, rating).await?;
    output.response(&response, true);

    let policy = letterboxd.unwrap_or(ctx.config.companion);
    open_companion(policy, &record, &mut prompter, output)
}
