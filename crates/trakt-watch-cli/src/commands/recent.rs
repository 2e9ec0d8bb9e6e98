use super::AppContext;
use crate::output::Output;
use clap::ValueEnum;
use color_eyre::Result;
use trakt_watch_core::recent_history;
use trakt_watch_models::HistoryKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum HistoryType {
    Movies,
    Episodes,
}

impl From<HistoryType> for HistoryKind {
    fn from(value: HistoryType) -> Self {
        match value {
            HistoryType::Movies => HistoryKind::Movies,
            HistoryType::Episodes => HistoryKind::Episodes,
        }
    }
}

pub async fn run_recent(
    limit: Option<u32>,
    history_type: Option<HistoryType>,
    urls: bool,
    ctx: &AppContext,
    output: &Output,
) -> Result<()> {
    let client = ctx.connect().await?;
    let session = ctx.session(&client).await?;

    let history = recent_history(
        &client,
        &session,
        history_type.map(HistoryKind::from),
        ctx.history_limit(limit),
    )
    .await?;
    output.history(&history, false, urls);
    Ok(())
}
