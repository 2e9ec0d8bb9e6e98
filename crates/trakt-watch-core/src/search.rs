use crate::display::search_line;
use crate::error::ResolveError;
use crate::picker::pick;
use crate::prompter::{read_number, read_text, Prompter};
use crate::url_resolver;
use tracing::debug;
use trakt_watch_models::{MediaReference, SearchType, TRAKT_WEB_BASE};
use trakt_watch_sources::TraktApi;

const MENU: [&str; 6] = [
    "[M]ovie",
    "[S]how",
    "[E]pisode name",
    "Ep[I]sode - Show w/ Season/Episode num",
    "[U]rl",
    "[A]ll",
];
const ALLOWED_KEYS: &str = "M, S, I, E, A, U";

/// What the user wants to search for, chosen by a single key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchKind {
    Movie,
    Show,
    EpisodeByName,
    /// Search shows, then ask for season and episode numbers
    EpisodeByNumbers,
    Url,
    All,
}

impl SearchKind {
    pub fn from_key(key: char) -> Option<Self> {
        match key.to_ascii_uppercase() {
            'M' => Some(Self::Movie),
            'S' => Some(Self::Show),
            'E' => Some(Self::EpisodeByName),
            'I' => Some(Self::EpisodeByNumbers),
            'U' => Some(Self::Url),
            'A' => Some(Self::All),
            _ => None,
        }
    }

    /// Remote search scope, `None` searching every type
    pub fn scope(self) -> Option<SearchType> {
        match self {
            Self::Movie => Some(SearchType::Movie),
            Self::Show | Self::EpisodeByNumbers => Some(SearchType::Show),
            Self::EpisodeByName => Some(SearchType::Episode),
            Self::Url | Self::All => None,
        }
    }

    fn label(self) -> &'static str {
        self.scope().map(|scope| scope.as_str()).unwrap_or("all")
    }
}

/// Show the kind menu until a recognized key is pressed
pub fn choose_kind<P: Prompter + ?Sized>(prompter: &mut P) -> Result<SearchKind, ResolveError> {
    loop {
        for line in MENU {
            prompter.display(line);
        }
        let key = prompter.read_char("What type of media do you want to search for? ")?;
        if key.is_whitespace() {
            prompter.report_error("No input");
            continue;
        }
        match SearchKind::from_key(key) {
            Some(kind) => return Ok(kind),
            None => prompter.report_error(&format!(
                "'{}', should be one of ({})",
                key.to_ascii_uppercase(),
                ALLOWED_KEYS
            )),
        }
    }
}

/// Resolve a reference interactively: pick a kind, search, pick a result.
pub async fn resolve_by_search<A, P>(api: &A, prompter: &mut P) -> Result<MediaReference, ResolveError>
where
    A: TraktApi + ?Sized,
    P: Prompter + ?Sized,
{
    let kind = choose_kind(prompter)?;
    if kind == SearchKind::Url {
        let url = read_text(prompter, "Url")?;
        return url_resolver::resolve(&url);
    }

    let term = read_text(prompter, &format!("Search for {}", kind.label()))?;
    let results = api.search(&term, kind.scope()).await?;
    debug!("Search for '{}' returned {} results", term, results.len());
    if results.is_empty() {
        return Err(ResolveError::NoResults);
    }

    let label = format!(
        "Pick result - enter 1-{}, or q to quit, u to show URLs",
        results.len()
    );
    let chosen = pick(
        &results,
        |show_urls, items, p: &mut P| {
            p.display("Results:");
            for (i, result) in items.iter().enumerate() {
                p.display(&format!("{}: {}", i + 1, search_line(result, show_urls)));
            }
        },
        &label,
        false,
        prompter,
    )?;

    let full = api.fetch_search_result(chosen.item).await?;
    let path = full.canonical_path().ok_or_else(|| {
        ResolveError::MalformedReference("picked result has no canonical path".to_string())
    })?;
    let reference = url_resolver::resolve(&format!("{}/{}", TRAKT_WEB_BASE, path))?;

    if kind != SearchKind::EpisodeByNumbers {
        return Ok(reference);
    }
    let MediaReference::Show(show) = &reference else {
        return Err(ResolveError::MalformedReference(format!(
            "expected a show, got {}",
            reference
        )));
    };
    let season = read_number(prompter, "Season")?;
    let episode = read_number(prompter, "Episode")?;
    Ok(MediaReference::episode(show.id(), season, episode)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FakeApi, ScriptedPrompter};
    use trakt_watch_models::{MediaIds, SearchMedia, SearchPerson, SearchResult};

    fn show(title: &str, slug: &str) -> SearchResult {
        SearchResult::Show(SearchMedia {
            title: title.to_string(),
            year: Some(2008),
            ids: MediaIds {
                slug: Some(slug.to_string()),
                trakt: Some(1388),
                ..MediaIds::default()
            },
        })
    }

    fn api_with(results: Vec<SearchResult>) -> FakeApi {
        FakeApi {
            search_results: results,
            ..FakeApi::new()
        }
    }

    #[test]
    fn test_kind_keys() {
        assert_eq!(SearchKind::from_key('m'), Some(SearchKind::Movie));
        assert_eq!(SearchKind::from_key('I'), Some(SearchKind::EpisodeByNumbers));
        assert_eq!(SearchKind::from_key('x'), None);
        assert_eq!(SearchKind::EpisodeByNumbers.scope(), Some(SearchType::Show));
        assert_eq!(SearchKind::All.scope(), None);
    }

    #[test]
    fn test_menu_reprompts_on_bad_keys() {
        let mut prompter = ScriptedPrompter::new().chars(" zs");
        assert_eq!(choose_kind(&mut prompter).unwrap(), SearchKind::Show);
        assert_eq!(
            prompter.errors,
            vec!["No input".to_string(), "'Z', should be one of (M, S, I, E, A, U)".to_string()]
        );
    }

    #[tokio::test]
    async fn test_url_choice_skips_search() {
        let api = FakeApi::new();
        let mut prompter = ScriptedPrompter::new()
            .chars("u")
            .lines(["https://trakt.tv/movies/heat-1995"]);
        let reference = resolve_by_search(&api, &mut prompter).await.unwrap();
        assert_eq!(reference, MediaReference::movie("heat-1995").unwrap());
        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn test_show_search_resolves_pick() {
        let api = api_with(vec![show("The Wire", "the-wire"), show("Breaking Bad", "breaking-bad")]);
        let mut prompter = ScriptedPrompter::new().chars("s").lines(["breaking", "2"]);
        let reference = resolve_by_search(&api, &mut prompter).await.unwrap();
        assert_eq!(reference, MediaReference::show("breaking-bad").unwrap());
        assert_eq!(
            api.calls(),
            vec!["search show breaking".to_string(), "refresh shows/breaking-bad".to_string()]
        );
        assert!(prompter.prompts.contains(&"Search for show".to_string()));
    }

    #[tokio::test]
    async fn test_episode_by_numbers_rebuilds_reference() {
        let api = api_with(vec![show("Breaking Bad", "breaking-bad")]);
        let mut prompter = ScriptedPrompter::new()
            .chars("i")
            .lines(["breaking bad", "", "1", "2"]);
        let reference = resolve_by_search(&api, &mut prompter).await.unwrap();
        assert_eq!(reference, MediaReference::episode("breaking-bad", 1, 2).unwrap());
    }

    #[tokio::test]
    async fn test_empty_search_is_no_results() {
        let api = FakeApi::new();
        let mut prompter = ScriptedPrompter::new().chars("a").lines(["nothing matches"]);
        let result = resolve_by_search(&api, &mut prompter).await;
        assert!(matches!(result, Err(ResolveError::NoResults)));
        assert_eq!(api.calls(), vec!["search all nothing matches".to_string()]);
    }

    #[tokio::test]
    async fn test_quit_from_picker_cancels() {
        let api = api_with(vec![show("The Wire", "the-wire")]);
        let mut prompter = ScriptedPrompter::new().chars("s").lines(["wire", "n"]);
        let result = resolve_by_search(&api, &mut prompter).await;
        assert!(matches!(result, Err(ResolveError::UserCancelled)));
    }

    #[tokio::test]
    async fn test_person_pick_is_malformed() {
        let person = SearchResult::Person(SearchPerson {
            name: "Bryan Cranston".to_string(),
            ids: MediaIds {
                slug: Some("bryan-cranston".to_string()),
                ..MediaIds::default()
            },
        });
        let api = api_with(vec![person]);
        let mut prompter = ScriptedPrompter::new().chars("a").lines(["cranston", "1"]);
        let result = resolve_by_search(&api, &mut prompter).await;
        assert!(matches!(result, Err(ResolveError::MalformedReference(_))));
    }
}
