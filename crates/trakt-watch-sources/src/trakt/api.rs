use crate::error::SourceError;
use crate::trakt::history::parse_history;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Map, Value};
use tracing::debug;
use trakt_watch_models::{
    HistoryEntry, HistoryKind, MediaIds, MediaKind, MediaRecord, MediaReference, Rating,
    SearchEpisode, SearchMedia, SearchPerson, SearchResult, SearchType, ShowProgress, WatchedAt,
};

pub const API_BASE: &str = "https://api.trakt.tv";

#[derive(Debug, Deserialize)]
pub(crate) struct TraktMedia {
    title: Option<String>,
    year: Option<u32>,
    #[serde(default)]
    ids: MediaIds,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TraktEpisode {
    title: Option<String>,
    season: Option<u32>,
    number: Option<u32>,
    #[serde(default)]
    ids: MediaIds,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TraktPerson {
    name: String,
    #[serde(default)]
    ids: MediaIds,
}

#[derive(Debug, Deserialize)]
struct TraktSearchItem {
    #[serde(rename = "type")]
    item_type: String,
    movie: Option<TraktMedia>,
    show: Option<TraktMedia>,
    episode: Option<TraktEpisode>,
    person: Option<TraktPerson>,
}

impl TraktMedia {
    fn into_search_media(self) -> SearchMedia {
        SearchMedia {
            title: self.title.unwrap_or_default(),
            year: self.year,
            ids: self.ids,
        }
    }
}

fn episode_result(show: TraktMedia, episode: TraktEpisode) -> Result<SearchResult, SourceError> {
    let season = episode
        .season
        .ok_or_else(|| SourceError::malformed("episode without a season number"))?;
    let number = episode
        .number
        .ok_or_else(|| SourceError::malformed("episode without an episode number"))?;
    Ok(SearchResult::Episode(SearchEpisode {
        show: show.into_search_media(),
        season,
        number,
        title: episode.title,
        ids: episode.ids,
    }))
}

/// Convert one raw search hit, `None` for types this tool does not handle (lists)
fn search_item_to_result(item: TraktSearchItem) -> Result<Option<SearchResult>, SourceError> {
    let result = match item.item_type.as_str() {
        "movie" => {
            let movie = item.movie.ok_or_else(|| SourceError::malformed("Missing movie data"))?;
            SearchResult::Movie(movie.into_search_media())
        }
        "show" => {
            let show = item.show.ok_or_else(|| SourceError::malformed("Missing show data"))?;
            SearchResult::Show(show.into_search_media())
        }
        "episode" => {
            let episode = item
                .episode
                .ok_or_else(|| SourceError::malformed("Missing episode data"))?;
            let show = item
                .show
                .ok_or_else(|| SourceError::malformed("Missing show data for episode"))?;
            episode_result(show, episode)?
        }
        "person" => {
            let person = item
                .person
                .ok_or_else(|| SourceError::malformed("Missing person data"))?;
            SearchResult::Person(SearchPerson {
                name: person.name,
                ids: person.ids,
            })
        }
        other => {
            debug!("Skipping search result of type {}", other);
            return Ok(None);
        }
    };
    Ok(Some(result))
}

fn authorized(builder: RequestBuilder, access_token: &str, client_id: &str) -> RequestBuilder {
    builder
        .header("Authorization", format!("Bearer {}", access_token))
        .header("trakt-api-version", "2")
        .header("trakt-api-key", client_id)
        .header("Accept", "application/json")
        .header("Content-Type", "application/json")
}

async fn read_json<T: DeserializeOwned>(response: Response, context: &str) -> Result<T, SourceError> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(SourceError::Status {
            context: context.to_string(),
            status: status.as_u16(),
            body,
        });
    }
    let text = response.text().await?;
    Ok(serde_json::from_str(&text)?)
}

async fn get_json<T: DeserializeOwned>(
    client: &Client,
    access_token: &str,
    client_id: &str,
    path: &str,
    context: &str,
) -> Result<T, SourceError> {
    let url = format!("{}/{}", API_BASE, path);
    debug!("GET {}", url);
    let response = authorized(client.get(&url), access_token, client_id)
        .send()
        .await?;
    read_json(response, context).await
}

async fn post_json(
    client: &Client,
    access_token: &str,
    client_id: &str,
    path: &str,
    payload: &Value,
    context: &str,
) -> Result<Value, SourceError> {
    let url = format!("{}/{}", API_BASE, path);
    debug!("POST {} {}", url, payload);
    let response = authorized(client.post(&url), access_token, client_id)
        .json(payload)
        .send()
        .await?;
    read_json(response, context).await
}

/// Get the slug of the authenticated user
pub async fn get_username(client: &Client, access_token: &str, client_id: &str) -> Result<String, SourceError> {
    let json: Value = get_json(client, access_token, client_id, "users/me", "Failed to get user info").await?;
    json["ids"]["slug"]
        .as_str()
        .map(|slug| slug.to_string())
        .ok_or_else(|| SourceError::malformed("Missing username slug"))
}

pub async fn search(
    client: &Client,
    access_token: &str,
    client_id: &str,
    term: &str,
    scope: Option<SearchType>,
) -> Result<Vec<SearchResult>, SourceError> {
    let types = match scope {
        Some(search_type) => search_type.as_str().to_string(),
        None => "movie,show,episode,person".to_string(),
    };
    let path = format!(
        "search/{}?query={}&extended=full",
        types,
        urlencoding::encode(term.trim())
    );
    let items: Vec<TraktSearchItem> = get_json(client, access_token, client_id, &path, "Search failed").await?;

    let mut results = Vec::with_capacity(items.len());
    for item in items {
        if let Some(result) = search_item_to_result(item)? {
            results.push(result);
        }
    }
    debug!("Search for '{}' returned {} result(s)", term, results.len());
    Ok(results)
}

pub(crate) async fn get_movie(client: &Client, access_token: &str, client_id: &str, id: &str) -> Result<TraktMedia, SourceError> {
    let path = format!("movies/{}?extended=full", urlencoding::encode(id));
    get_json(client, access_token, client_id, &path, "Failed to fetch movie").await
}

pub(crate) async fn get_show(client: &Client, access_token: &str, client_id: &str, id: &str) -> Result<TraktMedia, SourceError> {
    let path = format!("shows/{}?extended=full", urlencoding::encode(id));
    get_json(client, access_token, client_id, &path, "Failed to fetch show").await
}

pub(crate) async fn get_episode(
    client: &Client,
    access_token: &str,
    client_id: &str,
    show_id: &str,
    season: u32,
    number: u32,
) -> Result<TraktEpisode, SourceError> {
    let path = format!(
        "shows/{}/seasons/{}/episodes/{}?extended=full",
        urlencoding::encode(show_id),
        season,
        number
    );
    get_json(client, access_token, client_id, &path, "Failed to fetch episode").await
}

pub(crate) async fn get_person(client: &Client, access_token: &str, client_id: &str, id: &str) -> Result<TraktPerson, SourceError> {
    let path = format!("people/{}", urlencoding::encode(id));
    get_json(client, access_token, client_id, &path, "Failed to fetch person").await
}

/// Re-fetch the record behind a search hit so its ids are complete
pub async fn refresh_search_result(
    client: &Client,
    access_token: &str,
    client_id: &str,
    result: &SearchResult,
) -> Result<SearchResult, SourceError> {
    let missing = || SourceError::malformed("search result carries no usable id");
    match result {
        SearchResult::Movie(movie) => {
            let id = movie.ids.path_id().ok_or_else(missing)?;
            let full = get_movie(client, access_token, client_id, &id).await?;
            Ok(SearchResult::Movie(full.into_search_media()))
        }
        SearchResult::Show(show) => {
            let id = show.ids.path_id().ok_or_else(missing)?;
            let full = get_show(client, access_token, client_id, &id).await?;
            Ok(SearchResult::Show(full.into_search_media()))
        }
        SearchResult::Episode(ep) => {
            let show_id = ep.show.ids.path_id().ok_or_else(missing)?;
            let show = get_show(client, access_token, client_id, &show_id).await?;
            let episode = get_episode(client, access_token, client_id, &show_id, ep.season, ep.number).await?;
            episode_result(show, episode)
        }
        SearchResult::Person(person) => {
            let id = person.ids.path_id().ok_or_else(missing)?;
            let full = get_person(client, access_token, client_id, &id).await?;
            Ok(SearchResult::Person(SearchPerson {
                name: full.name,
                ids: full.ids,
            }))
        }
    }
}

pub async fn fetch_record(
    client: &Client,
    access_token: &str,
    client_id: &str,
    reference: &MediaReference,
) -> Result<MediaRecord, SourceError> {
    match reference {
        MediaReference::Movie(movie) => {
            let full = get_movie(client, access_token, client_id, movie.id()).await?;
            Ok(MediaRecord {
                kind: MediaKind::Movie,
                title: full.title.unwrap_or_else(|| movie.id().to_string()),
                year: full.year,
                ids: full.ids,
                show_title: None,
            })
        }
        MediaReference::Show(show) => {
            let full = get_show(client, access_token, client_id, show.id()).await?;
            Ok(MediaRecord {
                kind: MediaKind::Show,
                title: full.title.unwrap_or_else(|| show.id().to_string()),
                year: full.year,
                ids: full.ids,
                show_title: None,
            })
        }
        MediaReference::Episode(ep) => {
            let show = get_show(client, access_token, client_id, ep.show_id()).await?;
            let episode = get_episode(client, access_token, client_id, ep.show_id(), ep.season(), ep.episode()).await?;
            Ok(MediaRecord {
                kind: MediaKind::Episode,
                title: episode
                    .title
                    .unwrap_or_else(|| format!("S{}E{}", ep.season(), ep.episode())),
                year: show.year,
                ids: episode.ids,
                show_title: show.title,
            })
        }
    }
}

pub async fn get_history_page(
    client: &Client,
    access_token: &str,
    client_id: &str,
    username: &str,
    kind: Option<HistoryKind>,
    page: u32,
    limit: u32,
) -> Result<Vec<HistoryEntry>, SourceError> {
    let mut path = format!("users/{}/history", urlencoding::encode(username));
    if let Some(kind) = kind {
        path.push('/');
        path.push_str(kind.as_path_segment());
    }
    path.push_str(&format!("?page={}&limit={}", page, limit));

    let raw: Value = get_json(client, access_token, client_id, &path, "Failed to fetch watch history").await?;
    parse_history(&raw)
}

pub async fn get_show_progress(
    client: &Client,
    access_token: &str,
    client_id: &str,
    show_id: u64,
    include_specials: bool,
) -> Result<ShowProgress, SourceError> {
    let path = format!(
        "shows/{}/progress/watched?hidden=false&specials={}&count_specials={}",
        show_id, include_specials, include_specials
    );
    get_json(client, access_token, client_id, &path, "Failed to fetch show progress").await
}

/// Numeric references go out as `trakt` ids, everything else as a slug
fn ids_object(id: &str) -> Value {
    match id.parse::<u64>() {
        Ok(trakt) => json!({ "trakt": trakt }),
        Err(_) => json!({ "slug": id }),
    }
}

/// Build a sync payload addressing `reference`, with `fields` attached to the
/// innermost object (the movie, the show, or the episode).
pub fn reference_payload(reference: &MediaReference, fields: Map<String, Value>) -> Value {
    match reference {
        MediaReference::Movie(movie) => {
            let mut item = Map::new();
            item.insert("ids".to_string(), ids_object(movie.id()));
            item.extend(fields);
            json!({ "movies": [item] })
        }
        MediaReference::Show(show) => {
            let mut item = Map::new();
            item.insert("ids".to_string(), ids_object(show.id()));
            item.extend(fields);
            json!({ "shows": [item] })
        }
        MediaReference::Episode(ep) => {
            let mut episode = Map::new();
            episode.insert("number".to_string(), json!(ep.episode()));
            episode.extend(fields);
            json!({
                "shows": [{
                    "ids": ids_object(ep.show_id()),
                    "seasons": [{
                        "number": ep.season(),
                        "episodes": [episode]
                    }]
                }]
            })
        }
    }
}

pub async fn add_to_history(
    client: &Client,
    access_token: &str,
    client_id: &str,
    reference: &MediaReference,
    watched_at: WatchedAt,
) -> Result<Value, SourceError> {
    let mut fields = Map::new();
    if let Some(at) = watched_at.payload_value() {
        fields.insert("watched_at".to_string(), Value::String(at));
    }
    let payload = reference_payload(reference, fields);
    post_json(client, access_token, client_id, "sync/history", &payload, "Failed to add watch history").await
}

pub async fn add_rating(
    client: &Client,
    access_token: &str,
    client_id: &str,
    reference: &MediaReference,
    rating: Rating,
) -> Result<Value, SourceError> {
    let mut fields = Map::new();
    fields.insert("rating".to_string(), json!(rating.value()));
    let payload = reference_payload(reference, fields);
    post_json(client, access_token, client_id, "sync/ratings", &payload, "Failed to set rating").await
}

pub async fn remove_from_history(
    client: &Client,
    access_token: &str,
    client_id: &str,
    history_id: u64,
) -> Result<Value, SourceError> {
    let payload = json!({
        "movies": [],
        "episodes": [],
        "ids": [history_id]
    });
    post_json(client, access_token, client_id, "sync/history/remove", &payload, "Failed to remove history").await
}
