use crate::error::ResolveError;
use crate::prompter::{read_rating, Prompter};
use crate::search::resolve_by_search;
use crate::url_resolver;
use serde_json::Value;
use tracing::debug;
use trakt_watch_models::{MediaRecord, MediaReference, Rating, WatchedAt};
use trakt_watch_sources::TraktApi;

/// Resolve from `--url` when given, interactively otherwise
pub async fn resolve_input<A, P>(api: &A, prompter: &mut P, url: Option<&str>) -> Result<MediaReference, ResolveError>
where
    A: TraktApi + ?Sized,
    P: Prompter + ?Sized,
{
    match url {
        Some(url) => url_resolver::resolve(url),
        None => resolve_by_search(api, prompter).await,
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct WatchOptions {
    pub watched_at: WatchedAt,
    pub rating: Option<Rating>,
    /// Offer to rate a movie when no rating was given
    pub prompt_rating: bool,
}

#[derive(Debug)]
pub struct WatchOutcome {
    pub record: MediaRecord,
    /// `None` when the user declined to mark a whole show
    pub seen: Option<Value>,
    pub rating: Option<Value>,
}

/// Mark a reference watched, then rate it when asked to.
///
/// The history call always precedes the rating call.
pub async fn mark_watched<A, P>(
    api: &A,
    prompter: &mut P,
    reference: &MediaReference,
    options: WatchOptions,
) -> Result<WatchOutcome, ResolveError>
where
    A: TraktApi + ?Sized,
    P: Prompter + ?Sized,
{
    let record = api.fetch(reference).await?;
    debug!("Marking {} ({}) as watched", record.display_name(), reference);

    let (seen, rating) = match reference {
        MediaReference::Movie(_) => {
            let seen = api.mark_seen(reference, options.watched_at).await?;
            let rating = match options.rating {
                Some(rating) => Some(rating),
                None if options.prompt_rating && prompter.confirm("Set rating?", true)? => {
                    Some(read_rating(prompter)?)
                }
                None => None,
            };
            (Some(seen), rating)
        }
        MediaReference::Episode(_) => {
            let seen = api.mark_seen(reference, options.watched_at).await?;
            (Some(seen), options.rating)
        }
        MediaReference::Show(_) => {
            let seen = if prompter.confirm("Really mark entire show as watched?", false)? {
                Some(api.mark_seen(reference, options.watched_at).await?)
            } else {
                None
            };
            (seen, options.rating)
        }
    };

    let rating = match rating {
        Some(rating) => Some(api.rate(reference, rating).await?),
        None => None,
    };
    Ok(WatchOutcome {
        record,
        seen,
        rating,
    })
}

/// Rate a reference, asking for the number when none was given
pub async fn rate<A, P>(
    api: &A,
    prompter: &mut P,
    reference: &MediaReference,
    rating: Option<Rating>,
) -> Result<(MediaRecord, Value), ResolveError>
where
    A: TraktApi + ?Sized,
    P: Prompter + ?Sized,
{
    let record = api.fetch(reference).await?;
    let rating = match rating {
        Some(rating) => rating,
        None => read_rating(prompter)?,
    };
    let response = api.rate(reference, rating).await?;
    Ok((record, response))
}

pub async fn remove_from_history<A>(api: &A, history_id: u64) -> Result<Value, ResolveError>
where
    A: TraktApi + ?Sized,
{
    Ok(api.remove_history(history_id).await?)
}
