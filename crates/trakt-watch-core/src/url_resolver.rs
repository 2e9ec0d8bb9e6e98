use crate::error::ResolveError;
use tracing::warn;
use trakt_watch_models::{MediaReference, TRAKT_HOST};
use url::Url;

/// Parse a tracking-site URL into a typed reference.
///
/// Recognized paths, first match wins:
/// `movies/<id>/..`, `shows/<id>/seasons/<n>/episodes/<n>/..`, `shows/<id>/..`.
/// A foreign or missing host is only warned about.
pub fn resolve(input: &str) -> Result<MediaReference, ResolveError> {
    let input = input.trim();
    let path = match Url::parse(input) {
        Ok(url) => {
            let host = url.host_str().unwrap_or_default();
            if host != TRAKT_HOST {
                warn!("Invalid URL host: '{}', expected {}", host, TRAKT_HOST);
            }
            url.path().to_string()
        }
        Err(url::ParseError::RelativeUrlWithoutBase) => {
            warn!("URL '{}' has no host, expected {}", input, TRAKT_HOST);
            input.split(['?', '#']).next().unwrap_or_default().to_string()
        }
        Err(e) => {
            return Err(ResolveError::MalformedReference(format!("{}: {}", input, e)));
        }
    };

    let segments: Vec<&str> = path
        .split('/')
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .collect();

    let reference = match segments.as_slice() {
        ["movies", id, ..] => MediaReference::movie(id)?,
        ["shows", id, "seasons", season, "episodes", episode, ..] => {
            MediaReference::episode(id, parse_number(season)?, parse_number(episode)?)?
        }
        ["shows", _, "seasons", ..] => {
            return Err(ResolveError::MalformedReference(format!(
                "season URL without an episode: {:?}",
                segments
            )));
        }
        ["shows", id, ..] => MediaReference::show(id)?,
        _ => {
            return Err(ResolveError::MalformedReference(format!(
                "Invalid URL parts: {:?}",
                segments
            )));
        }
    };
    Ok(reference)
}

fn parse_number(token: &str) -> Result<u32, ResolveError> {
    token
        .parse()
        .map_err(|_| ResolveError::MalformedReference(format!("'{}' is not a season/episode number", token)))
}
