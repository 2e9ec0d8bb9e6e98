use serde::{Deserialize, Deserializer, Serialize};

/// Watched progress for one show, as reported by the service.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ShowProgress {
    #[serde(default)]
    pub aired: Option<u32>,
    #[serde(default)]
    pub completed: Option<u32>,
    /// `None` when the show is fully watched or has no tracked progress
    #[serde(default)]
    pub next_episode: Option<NextEpisode>,
}

/// Season/episode numbers are kept loose here: the reconciler decides whether
/// a missing or non-integer value is acceptable.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct NextEpisode {
    #[serde(default, deserialize_with = "lenient_int")]
    pub season: Option<i64>,
    #[serde(default, deserialize_with = "lenient_int")]
    pub number: Option<i64>,
    #[serde(default)]
    pub title: Option<String>,
}

fn lenient_int<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| v.as_i64()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_next_episode() {
        let progress: ShowProgress =
            serde_json::from_str(r#"{"aired": 62, "completed": 62, "next_episode": null}"#).unwrap();
        assert_eq!(progress.next_episode, None);
        assert_eq!(progress.completed, Some(62));
    }

    #[test]
    fn test_non_integer_numbers_become_none() {
        let progress: ShowProgress = serde_json::from_str(
            r#"{"next_episode": {"season": "two", "number": 3.5, "title": "Pilot"}}"#,
        )
        .unwrap();
        let next = progress.next_episode.unwrap();
        assert_eq!(next.season, None);
        assert_eq!(next.number, None);
        assert_eq!(next.title.as_deref(), Some("Pilot"));
    }

    #[test]
    fn test_missing_field_is_none() {
        let progress: ShowProgress = serde_json::from_str("{}").unwrap();
        assert_eq!(progress, ShowProgress::default());
    }
}
