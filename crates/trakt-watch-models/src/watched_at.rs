use chrono::{DateTime, SecondsFormat, Utc};

/// When a mark-as-seen call should record the play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WatchedAt {
    /// Omit the field and let the service use the current time
    #[default]
    Now,
    /// Use the media's release date
    Released,
    At(DateTime<Utc>),
}

impl WatchedAt {
    /// Value for the `watched_at` request field, `None` when it should be omitted
    pub fn payload_value(&self) -> Option<String> {
        match self {
            Self::Now => None,
            Self::Released => Some("released".to_string()),
            Self::At(at) => Some(at.to_rfc3339_opts(SecondsFormat::Secs, true)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_payload_value() {
        assert_eq!(WatchedAt::Now.payload_value(), None);
        assert_eq!(WatchedAt::Released.payload_value().as_deref(), Some("released"));
        let at = Utc.with_ymd_and_hms(2023, 2, 1, 20, 30, 0).unwrap();
        assert_eq!(
            WatchedAt::At(at).payload_value().as_deref(),
            Some("2023-02-01T20:30:00Z")
        );
    }
}
