use chrono::{Local, TimeZone};
use std::fmt::Display;
use trakt_watch_models::{HistoryEntry, HistoryMedia, SearchResult, TRAKT_WEB_BASE};

fn with_year(title: &str, year: Option<u32>) -> String {
    match year {
        Some(year) => format!("{} ({})", title, year),
        None => title.to_string(),
    }
}

/// One search candidate, with its deep link appended in detail mode
pub fn search_line(result: &SearchResult, show_details: bool) -> String {
    let mut line = match result {
        SearchResult::Movie(movie) => format!("Movie:\t{}", with_year(&movie.title, movie.year)),
        SearchResult::Show(show) => format!("Show:\t{}", with_year(&show.title, show.year)),
        SearchResult::Episode(ep) => format!(
            "Episode:\t{} S{}E{} - {}",
            ep.show.title,
            ep.season,
            ep.number,
            ep.title.as_deref().unwrap_or("TBA")
        ),
        SearchResult::Person(person) => format!("Person:\t{}", person.name),
    };
    if show_details {
        if let Some(path) = result.canonical_path() {
            line.push_str(&format!(" | {}/{}", TRAKT_WEB_BASE, path));
        }
    }
    line
}

/// History line in the local timezone
pub fn history_line(entry: &HistoryEntry, include_id: bool, show_url: bool) -> String {
    history_line_in(entry, &Local, include_id, show_url)
}

pub fn history_line_in<Tz>(entry: &HistoryEntry, tz: &Tz, include_id: bool, show_url: bool) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let watched_at = entry.watched_at.with_timezone(tz).format("%Y-%m-%d %H:%M:%S");
    let mut line = match &entry.media {
        HistoryMedia::Movie(movie) => format!("{} {}", watched_at, movie.title),
        HistoryMedia::Episode(ep) => format!(
            "{} {} S{}E{} - {}",
            watched_at,
            ep.show.title,
            ep.season,
            ep.episode,
            ep.title.as_deref().unwrap_or("TBA")
        ),
    };
    if show_url {
        if let Some(path) = entry.web_path() {
            line.push_str(&format!(" | {}/{}", TRAKT_WEB_BASE, path));
        }
    }
    if include_id {
        line.push_str(&format!(" ({})", entry.history_id));
    }
    line
}

/// Numbered history block as printed after every mutation
pub fn history_lines(entries: &[HistoryEntry], include_id: bool, show_url: bool) -> Vec<String> {
    entries
        .iter()
        .enumerate()
        .map(|(i, entry)| format!("{}: {}", i + 1, history_line(entry, include_id, show_url)))
        .collect()
}
