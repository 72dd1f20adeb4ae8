use std::time::{SystemTime, UNIX_EPOCH};

use chrono::{DateTime, Utc};

/// Wall-clock milliseconds since the UNIX epoch.
pub fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}

/// Human-readable date used for publish, submission and comment dates
/// (e.g. `16 October 2026`).
pub fn display_date(at: DateTime<Utc>) -> String {
    at.format("%-d %B %Y").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn display_date_has_no_leading_zero() {
        let at = Utc.with_ymd_and_hms(2025, 7, 4, 12, 0, 0).unwrap();
        assert_eq!(display_date(at), "4 July 2025");
    }

    #[test]
    fn now_ms_is_after_2020() {
        assert!(now_ms() > 1_577_836_800_000);
    }
}
