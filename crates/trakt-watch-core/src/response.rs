use serde_json::Value;

const COUNTED: [(&str, &str); 4] = [
    ("movies", "Movies"),
    ("shows", "Shows"),
    ("seasons", "Seasons"),
    ("episodes", "Episodes"),
];

/// Human summary of a mutation response (`sync/history`, `sync/ratings`, `sync/history/remove`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseSummary {
    /// `Added`, `Removed`, `Added rating`... `None` when nothing changed
    pub heading: Option<String>,
    pub counts: Vec<(String, u64)>,
    pub not_found: Vec<String>,
}

/// Summarize a mutation response, `None` if it does not have the expected shape.
///
/// Callers fall back to dumping the raw JSON in that case.
pub fn summarize_response(value: &Value, rating: bool) -> Option<ResponseSummary> {
    let object = value.as_object()?;
    let (key, verb) = if object.contains_key("added") {
        ("added", "Added")
    } else if object.contains_key("deleted") {
        ("deleted", "Removed")
    } else {
        return None;
    };
    let changed = object.get(key)?.as_object()?;

    // movies and episodes are always reported; shows and seasons only for ratings
    let movies = changed.get("movies")?.as_u64()?;
    let episodes = changed.get("episodes")?.as_u64()?;
    let mut counts = Vec::new();
    for (field, label) in COUNTED {
        let count = match field {
            "movies" => movies,
            "episodes" => episodes,
            _ => changed.get(field).and_then(Value::as_u64).unwrap_or(0),
        };
        if count > 0 {
            counts.push((label.to_string(), count));
        }
    }

    let heading = if counts.is_empty() {
        None
    } else if rating {
        Some(format!("{} rating", verb))
    } else {
        Some(verb.to_string())
    };

    let mut not_found = Vec::new();
    for (kind, items) in object.get("not_found")?.as_object()? {
        for item in items.as_array()? {
            not_found.push(format!("{}: {}", kind, item));
        }
    }

    Some(ResponseSummary {
        heading,
        counts,
        not_found,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_added_summary() {
        let response = json!({
            "added": {"movies": 1, "episodes": 0},
            "not_found": {"movies": [], "shows": [], "episodes": []}
        });
        let summary = summarize_response(&response, false).unwrap();
        assert_eq!(summary.heading.as_deref(), Some("Added"));
        assert_eq!(summary.counts, vec![("Movies".to_string(), 1)]);
        assert!(summary.not_found.is_empty());
    }

    #[test]
    fn test_rating_and_removed_headings() {
        let rated = json!({
            "added": {"movies": 0, "shows": 1, "seasons": 0, "episodes": 0},
            "not_found": {}
        });
        let summary = summarize_response(&rated, true).unwrap();
        assert_eq!(summary.heading.as_deref(), Some("Added rating"));
        assert_eq!(summary.counts, vec![("Shows".to_string(), 1)]);

        let removed = json!({"deleted": {"movies": 0, "episodes": 2}, "not_found": {"ids": []}});
        assert_eq!(
            summarize_response(&removed, false).unwrap().heading.as_deref(),
            Some("Removed")
        );
    }

    #[test]
    fn test_not_found_lines() {
        let response = json!({
            "added": {"movies": 0, "episodes": 0},
            "not_found": {"ids": [123456], "movies": [{"ids": {"slug": "nope"}}]}
        });
        let summary = summarize_response(&response, false).unwrap();
        assert_eq!(summary.heading, None);
        assert_eq!(
            summary.not_found,
            vec![
                "ids: 123456".to_string(),
                r#"movies: {"ids":{"slug":"nope"}}"#.to_string()
            ]
        );
    }

    #[test]
    fn test_unexpected_shapes_fall_back() {
        assert_eq!(summarize_response(&json!([1, 2]), false), None);
        assert_eq!(summarize_response(&json!({"updated": {}}), false), None);
        assert_eq!(
            summarize_response(&json!({"added": {"movies": 1}, "not_found": {}}), false),
            None
        );
        assert_eq!(
            summarize_response(
                &json!({"added": {"movies": 1, "episodes": 0}, "not_found": {"movies": "x"}}),
                false
            ),
            None
        );
        assert_eq!(
            summarize_response(&json!({"added": {"movies": 1, "episodes": 0}}), false),
            None
        );
    }
}
