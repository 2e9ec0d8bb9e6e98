use crate::display::{history_line, history_lines};
use crate::error::ResolveError;
use crate::picker::pick;
use crate::prompter::Prompter;
use crate::session::Session;
use serde_json::Value;
use tracing::debug;
use trakt_watch_models::{HistoryEntry, HistoryKind};
use trakt_watch_sources::TraktApi;

/// First page of the session user's history, newest first
pub async fn recent_history<A>(
    api: &A,
    session: &Session,
    kind: Option<HistoryKind>,
    limit: u32,
) -> Result<Vec<HistoryEntry>, ResolveError>
where
    A: TraktApi + ?Sized,
{
    let entries = api.history_page(session.username(), kind, 1, limit).await?;
    debug!("Fetched {} history entries for {}", entries.len(), session.username());
    Ok(entries)
}

#[derive(Debug, Clone, Copy)]
pub struct UnwatchOptions {
    pub limit: u32,
    pub interactive: bool,
    pub assume_yes: bool,
}

#[derive(Debug)]
pub struct UnwatchOutcome {
    pub removed: HistoryEntry,
    pub response: Value,
}

/// Remove one recent play from the history, picked interactively or the newest.
pub async fn unwatch<A, P>(
    api: &A,
    prompter: &mut P,
    session: &Session,
    options: UnwatchOptions,
) -> Result<UnwatchOutcome, ResolveError>
where
    A: TraktApi + ?Sized,
    P: Prompter + ?Sized,
{
    let entries = recent_history(api, session, None, options.limit).await?;
    let newest = entries.first().ok_or(ResolveError::NoResults)?;

    let (picked, show_urls) = if options.interactive {
        let label = "Pick item to remove, q to quit, u to show URLs";
        let chosen = pick(
            &entries,
            |show_urls, items, p: &mut P| {
                p.display("Recent history:");
                let numbered = history_lines(items, true, show_urls);
                for line in &numbered {
                    p.display(line);
                }
            },
            label,
            false,
            prompter,
        )?;
        (chosen.item, chosen.show_details)
    } else {
        (newest, false)
    };

    prompter.display(&format!("Removing {}...", history_line(picked, true, show_urls)));
    if !options.assume_yes && !prompter.confirm("Remove from history?", true)? {
        return Err(ResolveError::UserCancelled);
    }

    let response = api.remove_history(picked.history_id).await?;
    Ok(UnwatchOutcome {
        removed: picked.clone(),
        response,
    })
}
