use crate::media_ids::MediaIds;

/// Scope of a remote text search
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchType {
    Movie,
    Show,
    Episode,
    Person,
}

impl SearchType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Movie => "movie",
            Self::Show => "show",
            Self::Episode => "episode",
            Self::Person => "person",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SearchMedia {
    pub title: String,
    pub year: Option<u32>,
    pub ids: MediaIds,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SearchEpisode {
    pub show: SearchMedia,
    pub season: u32,
    pub number: u32,
    pub title: Option<String>,
    pub ids: MediaIds,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SearchPerson {
    pub name: String,
    pub ids: MediaIds,
}

/// One candidate from a remote search. Lives only for the duration of a pick.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchResult {
    Movie(SearchMedia),
    Show(SearchMedia),
    Episode(SearchEpisode),
    Person(SearchPerson),
}

impl SearchResult {
    /// Site path fragment for this result, e.g. `shows/severance/seasons/1/episodes/2`
    pub fn canonical_path(&self) -> Option<String> {
        match self {
            Self::Movie(movie) => movie.ids.path_id().map(|id| format!("movies/{}", id)),
            Self::Show(show) => show.ids.path_id().map(|id| format!("shows/{}", id)),
            Self::Episode(ep) => ep.show.ids.path_id().map(|id| {
                format!("shows/{}/seasons/{}/episodes/{}", id, ep.season, ep.number)
            }),
            Self::Person(person) => person.ids.path_id().map(|id| format!("people/{}", id)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(slug: &str) -> MediaIds {
        MediaIds {
            slug: Some(slug.to_string()),
            ..MediaIds::default()
        }
    }

    #[test]
    fn test_canonical_paths() {
        let show = SearchMedia {
            title: "Breaking Bad".to_string(),
            year: Some(2008),
            ids: ids("breaking-bad"),
        };
        let episode = SearchResult::Episode(SearchEpisode {
            show: show.clone(),
            season: 1,
            number: 2,
            title: Some("Cat's in the Bag...".to_string()),
            ids: MediaIds::default(),
        });
        assert_eq!(
            episode.canonical_path().as_deref(),
            Some("shows/breaking-bad/seasons/1/episodes/2")
        );
        assert_eq!(
            SearchResult::Show(show).canonical_path().as_deref(),
            Some("shows/breaking-bad")
        );
        let person = SearchResult::Person(SearchPerson {
            name: "Bryan Cranston".to_string(),
            ids: ids("bryan-cranston"),
        });
        assert_eq!(person.canonical_path().as_deref(), Some("people/bryan-cranston"));
    }

    #[test]
    fn test_canonical_path_missing_ids() {
        let movie = SearchResult::Movie(SearchMedia {
            title: "Untitled".to_string(),
            year: None,
            ids: MediaIds::default(),
        });
        assert_eq!(movie.canonical_path(), None);
    }
}
