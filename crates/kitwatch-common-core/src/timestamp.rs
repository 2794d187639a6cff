//! Timestamp utilities.
//!
//! Log file names and ledger dates are rendered in local time, matching what
//! a user sees on the wall clock when they read their notes.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A local wall-clock timestamp.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(DateTime<Local>);

impl Timestamp {
    /// Current time.
    pub fn now() -> Self {
        Self(Local::now())
    }

    /// From a DateTime.
    pub fn from_datetime(dt: DateTime<Local>) -> Self {
        Self(dt)
    }

    /// Get the inner DateTime.
    pub fn as_datetime(&self) -> DateTime<Local> {
        self.0
    }

    /// Second-granularity stamp used in log file names: `YYYYMMDD_HHMMSS`.
    pub fn log_stamp(&self) -> String {
        self.0.format("%Y%m%d_%H%M%S").to_string()
    }

    /// Calendar day used in ledger rows: `YYYY-MM-DD`.
    pub fn calendar_date(&self) -> String {
        self.0.format("%Y-%m-%d").to_string()
    }

    /// RFC 3339 string.
    pub fn to_rfc3339(&self) -> String {
        self.0.to_rfc3339()
    }
}

impl Default for Timestamp {
    fn default() -> Self {
        Self::now()
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_rfc3339())
    }
}

impl fmt::Debug for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Timestamp({})", self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn fixed() -> Timestamp {
        let dt = Local.with_ymd_and_hms(2024, 3, 7, 9, 5, 2).single().unwrap();
        Timestamp::from_datetime(dt)
    }

    #[test]
    fn test_log_stamp_is_zero_padded() {
        assert_eq!(fixed().log_stamp(), "20240307_090502");
    }

    #[test]
    fn test_calendar_date() {
        assert_eq!(fixed().calendar_date(), "2024-03-07");
    }

    #[test]
    fn test_timestamp_ordering() {
        let ts1 = Timestamp::now();
        std::thread::sleep(std::time::Duration::from_millis(1));
        let ts2 = Timestamp::now();
        assert!(ts1 < ts2);
    }

    proptest::proptest! {
        #[test]
        fn test_log_stamp_shape(secs in 0i64..4_000_000_000i64) {
            let dt = Local.timestamp_opt(secs, 0).single();
            if let Some(dt) = dt {
                let stamp = Timestamp::from_datetime(dt).log_stamp();
                proptest::prop_assert_eq!(stamp.len(), 15);
                proptest::prop_assert_eq!(&stamp[8..9], "_");
                proptest::prop_assert!(stamp.chars().filter(|c| *c != '_').all(|c| c.is_ascii_digit()));
            }
        }
    }
}
