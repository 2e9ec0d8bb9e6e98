use crate::error::ResolveError;
use crate::prompter::Prompter;
use trakt_watch_models::{CompanionPolicy, MediaRecord};

const LETTERBOXD_TMDB_BASE: &str = "https://letterboxd.com/tmdb";

/// Letterboxd page for a record, derivable only from its TMDB id
pub fn letterboxd_url(record: &MediaRecord) -> Option<String> {
    record
        .ids
        .tmdb
        .map(|tmdb| format!("{}/{}/", LETTERBOXD_TMDB_BASE, tmdb))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompanionAction {
    Open(String),
    Skip,
    /// The policy asked for a link but the record has no TMDB id
    Unavailable,
}

/// Apply the companion-site policy to a fetched record, asking first under `Prompt`
pub fn companion_action<P: Prompter + ?Sized>(
    policy: CompanionPolicy,
    record: &MediaRecord,
    prompter: &mut P,
) -> Result<CompanionAction, ResolveError> {
    if policy == CompanionPolicy::Never {
        return Ok(CompanionAction::Skip);
    }
    let Some(url) = letterboxd_url(record) else {
        return Ok(CompanionAction::Unavailable);
    };
    match policy {
        CompanionPolicy::Always => Ok(CompanionAction::Open(url)),
        CompanionPolicy::Prompt if prompter.confirm(&format!("Open {}?", url), true)? => {
            Ok(CompanionAction::Open(url))
        }
        _ => Ok(CompanionAction::Skip),
    }
}
