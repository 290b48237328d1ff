//! Timestamp value object for immutable points in time.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Display format handed to the agent as the current time.
pub const AGENT_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Immutable point in time, always UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Creates a timestamp for the current moment.
    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// Creates a timestamp from a DateTime<Utc>.
    pub fn from_datetime(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }

    /// Returns the inner DateTime.
    pub fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }

    /// Checks if this timestamp is before another.
    pub fn is_before(&self, other: &Timestamp) -> bool {
        self.0 < other.0
    }

    /// Creates a new timestamp by adding the specified number of seconds.
    pub fn plus_secs(&self, secs: i64) -> Self {
        Self(self.0 + Duration::seconds(secs))
    }

    /// Calendar date (UTC) of this instant.
    pub fn date(&self) -> NaiveDate {
        self.0.date_naive()
    }

    /// Formats as `YYYY-MM-DD HH:MM:SS`.
    pub fn format_for_agent(&self) -> String {
        self.0.format(AGENT_TIME_FORMAT).to_string()
    }
}

impl Default for Timestamp {
    fn default() -> Self {
        Self::now()
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn fixed() -> Timestamp {
        Timestamp::from_datetime(Utc.with_ymd_and_hms(2024, 3, 9, 14, 5, 7).unwrap())
    }

    #[test]
    fn timestamp_now_creates_current_time() {
        let before = Utc::now();
        let ts = Timestamp::now();
        let after = Utc::now();

        assert!(ts.as_datetime() >= &before);
        assert!(ts.as_datetime() <= &after);
    }

    #[test]
    fn format_for_agent_uses_second_precision() {
        assert_eq!(fixed().format_for_agent(), "2024-03-09 14:05:07");
    }

    #[test]
    fn plus_secs_orders_after_original() {
        let ts = fixed();
        let later = ts.plus_secs(1);
        assert!(ts.is_before(&later));
    }

    #[test]
    fn date_is_utc_calendar_day() {
        assert_eq!(fixed().date(), NaiveDate::from_ymd_opt(2024, 3, 9).unwrap());
    }

    #[test]
    fn timestamp_serializes_transparently() {
        let json = serde_json::to_string(&fixed()).unwrap();
        assert_eq!(json, "\"2024-03-09T14:05:07Z\"");
    }
}
