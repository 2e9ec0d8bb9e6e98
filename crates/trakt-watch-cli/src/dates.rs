use chrono::{DateTime, Duration, Local, LocalResult, NaiveDate, NaiveDateTime, TimeDelta, TimeZone, Utc};
use trakt_watch_models::WatchedAt;

/// Parse the `--at` option.
///
/// Accepts `released`, `now`, `today`, `yesterday`, RFC 3339, `YYYY-MM-DD`,
/// `YYYY-MM-DD HH:MM[:SS]` in local time and `N minutes|hours|days|weeks ago`.
pub fn parse_watched_at(value: &str) -> Result<WatchedAt, String> {
    parse_watched_at_from(value, Local::now())
}

pub fn parse_watched_at_from(value: &str, now: DateTime<Local>) -> Result<WatchedAt, String> {
    let trimmed = value.trim();
    let input = trimmed.to_lowercase();
    let parsed = match input.as_str() {
        "released" => return Ok(WatchedAt::Released),
        "now" => now,
        "today" => local_midnight(now.date_naive())?,
        "yesterday" => local_midnight(now.date_naive() - Duration::days(1))?,
        _ => parse_absolute(trimmed)
            .or_else(|| parse_relative(&input, now))
            .ok_or_else(|| format!("Could not parse '{}' into a date", trimmed))?,
    };
    Ok(WatchedAt::At(parsed.with_timezone(&Utc)))
}

fn local_midnight(date: NaiveDate) -> Result<DateTime<Local>, String> {
    let midnight = date
        .and_hms_opt(0, 0, 0)
        .ok_or_else(|| format!("no midnight on {}", date))?;
    from_local(midnight).ok_or_else(|| format!("{} does not exist in the local timezone", midnight))
}

fn from_local(naive: NaiveDateTime) -> Option<DateTime<Local>> {
    match Local.from_local_datetime(&naive) {
        LocalResult::Single(dt) => Some(dt),
        LocalResult::Ambiguous(earliest, _) => Some(earliest),
        LocalResult::None => None,
    }
}

fn parse_absolute(input: &str) -> Option<DateTime<Local>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Some(dt.with_timezone(&Local));
    }
    for format in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(input, format) {
            return from_local(naive);
        }
    }
    let date = NaiveDate::parse_from_str(input, "%Y-%m-%d").ok()?;
    local_midnight(date).ok()
}

fn parse_relative(input: &str, now: DateTime<Local>) -> Option<DateTime<Local>> {
    let rest = input.strip_suffix("ago")?.trim();
    let (amount, unit) = rest.split_once(char::is_whitespace)?;
    let amount: i64 = amount.parse().ok()?;
    let span = match unit.trim().trim_end_matches('s') {
        "minute" | "min" => TimeDelta::try_minutes(amount),
        "hour" | "hr" => TimeDelta::try_hours(amount),
        "day" => TimeDelta::try_days(amount),
        "week" => TimeDelta::try_weeks(amount),
        _ => None,
    }?;
    now.checked_sub_signed(span)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn now() -> DateTime<Local> {
        Local.with_ymd_and_hms(2023, 6, 15, 14, 30, 0).unwrap()
    }

    fn utc(value: &str) -> DateTime<Utc> {
        match parse_watched_at_from(value, now()).unwrap() {
            WatchedAt::At(at) => at,
            other => panic!("expected a timestamp, got {:?}", other),
        }
    }

    #[test]
    fn test_keywords() {
        assert_eq!(parse_watched_at_from("released", now()), Ok(WatchedAt::Released));
        assert_eq!(utc("now"), now().with_timezone(&Utc));
        assert_eq!(
            utc("today"),
            Local.with_ymd_and_hms(2023, 6, 15, 0, 0, 0).unwrap().with_timezone(&Utc)
        );
        assert_eq!(
            utc(" Yesterday "),
            Local.with_ymd_and_hms(2023, 6, 14, 0, 0, 0).unwrap().with_timezone(&Utc)
        );
    }

    #[test]
    fn test_absolute_formats() {
        assert_eq!(utc("2023-02-01T20:30:00Z"), Utc.with_ymd_and_hms(2023, 2, 1, 20, 30, 0).unwrap());
        assert_eq!(
            utc("2023-02-01 20:30"),
            Local.with_ymd_and_hms(2023, 2, 1, 20, 30, 0).unwrap().with_timezone(&Utc)
        );
        assert_eq!(
            utc("2023-02-01 20:30:15"),
            Local.with_ymd_and_hms(2023, 2, 1, 20, 30, 15).unwrap().with_timezone(&Utc)
        );
        assert_eq!(
            utc("2023-02-01"),
            Local.with_ymd_and_hms(2023, 2, 1, 0, 0, 0).unwrap().with_timezone(&Utc)
        );
    }

    #[test]
    fn test_relative() {
        assert_eq!(utc("2 hours ago"), (now() - Duration::hours(2)).with_timezone(&Utc));
        assert_eq!(utc("1 week ago"), (now() - Duration::weeks(1)).with_timezone(&Utc));
        assert_eq!(utc("30 minutes ago"), (now() - Duration::minutes(30)).with_timezone(&Utc));
    }

    #[test]
    fn test_garbage_is_rejected() {
        for value in ["last tuesday", "2023-13-01", "ago", "two days ago", ""] {
            assert!(parse_watched_at_from(value, now()).is_err(), "{} should fail", value);
        }
    }

    #[test]
    fn test_out_of_range_relative_is_rejected() {
        for value in ["99999999999999 weeks ago", "9223372036854775807 minutes ago", "999999999999 days ago"] {
            let result = parse_watched_at_from(value, now());
            assert_eq!(result, Err(format!("Could not parse '{}' into a date", value)));
        }
    }
}
