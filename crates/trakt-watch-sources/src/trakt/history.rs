use crate::error::SourceError;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;
use trakt_watch_models::{
    EpisodeData, HistoryAction, HistoryEntry, HistoryMedia, MediaIds, MovieData, ShowData, ShowIds,
};

#[derive(Debug, Deserialize)]
struct RawMovie {
    title: Option<String>,
    year: Option<u32>,
    #[serde(default)]
    ids: MediaIds,
}

#[derive(Debug, Deserialize)]
struct RawEpisode {
    title: Option<String>,
    season: Option<u32>,
    number: Option<u32>,
    #[serde(default)]
    ids: MediaIds,
}

#[derive(Debug, Deserialize)]
struct RawHistoryItem {
    id: u64,
    watched_at: String,
    #[serde(default)]
    action: Option<String>,
    #[serde(rename = "type", default)]
    item_type: Option<String>,
    movie: Option<RawMovie>,
    show: Option<RawMovie>,
    episode: Option<RawEpisode>,
}

fn parse_item(item: RawHistoryItem) -> Result<HistoryEntry, SourceError> {
    let watched_at = DateTime::parse_from_rfc3339(&item.watched_at)
        .map_err(|e| SourceError::malformed(format!("history {}: bad watched_at: {}", item.id, e)))?
        .with_timezone(&Utc);

    let media = match item.item_type.as_deref().unwrap_or_default() {
        "movie" => {
            let movie = item
                .movie
                .ok_or_else(|| SourceError::malformed(format!("history {}: missing movie data", item.id)))?;
            HistoryMedia::Movie(MovieData {
                title: movie.title.unwrap_or_default(),
                year: movie.year,
                ids: movie.ids,
            })
        }
        "episode" => {
            let episode = item
                .episode
                .ok_or_else(|| SourceError::malformed(format!("history {}: missing episode data", item.id)))?;
            let show = item
                .show
                .ok_or_else(|| SourceError::malformed(format!("history {}: missing show data", item.id)))?;
            let trakt_id = show
                .ids
                .trakt
                .ok_or_else(|| SourceError::malformed(format!("history {}: show has no trakt id", item.id)))?;
            let season = episode
                .season
                .ok_or_else(|| SourceError::malformed(format!("history {}: episode has no season", item.id)))?;
            let number = episode
                .number
                .ok_or_else(|| SourceError::malformed(format!("history {}: episode has no number", item.id)))?;
            HistoryMedia::Episode(EpisodeData {
                title: episode.title,
                season,
                episode: number,
                ids: episode.ids,
                show: ShowData {
                    title: show.title.unwrap_or_default(),
                    year: show.year,
                    ids: ShowIds {
                        trakt_id,
                        trakt_slug: show.ids.slug,
                    },
                },
            })
        }
        "" => {
            return Err(SourceError::malformed(format!(
                "history {}: record has no media_type",
                item.id
            )))
        }
        other => {
            return Err(SourceError::malformed(format!(
                "history {}: unrecognized media_type '{}'",
                item.id, other
            )))
        }
    };

    Ok(HistoryEntry {
        history_id: item.id,
        watched_at,
        action: HistoryAction::from_api(item.action.as_deref().unwrap_or("watch")),
        media,
    })
}

/// Parse one page of raw history JSON, preserving the page's order
pub fn parse_history(raw: &Value) -> Result<Vec<HistoryEntry>, SourceError> {
    let items: Vec<RawHistoryItem> = serde_json::from_value(raw.clone())?;
    let entries = items
        .into_iter()
        .map(parse_item)
        .collect::<Result<Vec<_>, _>>()?;
    debug!("Parsed {} history entries", entries.len());
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn episode_item(id: u64, watched_at: &str, show_id: u64) -> Value {
        json!({
            "id": id,
            "watched_at": watched_at,
            "action": "watch",
            "type": "episode",
            "episode": { "season": 1, "number": 2, "title": "Cat's in the Bag...", "ids": { "trakt": 73483 } },
            "show": { "title": "Breaking Bad", "year": 2008, "ids": { "trakt": show_id, "slug": "breaking-bad" } }
        })
    }

    #[test]
    fn test_parse_episode_and_movie() {
        let raw = json!([
            episode_item(1, "2023-02-01T00:00:00.000Z", 42),
            {
                "id": 2,
                "watched_at": "2023-01-01T00:00:00.000Z",
                "action": "scrobble",
                "type": "movie",
                "movie": { "title": "Inception", "year": 2010, "ids": { "trakt": 16662, "slug": "inception-2010", "tmdb": 27205 } }
            }
        ]);

        let entries = parse_history(&raw).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].show_id(), Some(42));
        assert!(entries[0].is_episode_watch());
        assert_eq!(
            entries[0].web_path().as_deref(),
            Some("shows/breaking-bad/seasons/1/episodes/2")
        );
        assert_eq!(entries[1].action, HistoryAction::Scrobble);
        assert_eq!(entries[1].show_id(), None);
        assert!(!entries[1].is_episode_watch());
        assert_eq!(entries[1].web_path().as_deref(), Some("movies/inception-2010"));
    }

    #[test]
    fn test_unknown_media_type_is_malformed() {
        let raw = json!([{
            "id": 3,
            "watched_at": "2023-01-01T00:00:00Z",
            "action": "watch",
            "type": "season"
        }]);
        match parse_history(&raw) {
            Err(SourceError::MalformedRecord(message)) => assert!(message.contains("season")),
            other => panic!("expected malformed record, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_media_type_is_malformed() {
        let raw = json!([{
            "id": 3,
            "watched_at": "2023-01-01T00:00:00Z",
            "action": "watch"
        }]);
        match parse_history(&raw) {
            Err(SourceError::MalformedRecord(message)) => assert!(message.contains("no media_type")),
            other => panic!("expected malformed record, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_page() {
        assert!(parse_history(&json!([])).unwrap().is_empty());
    }
}
