//! Inclusive calendar date ranges for metric queries.

use crate::OuraError;
use chrono::{Duration, NaiveDate, Utc};

/// Number of days (inclusive of today) covered when a caller supplies no
/// bounds at all.
pub const DEFAULT_WINDOW_DAYS: i64 = 7;

/// An inclusive pair of calendar dates with `start <= end`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, OuraError> {
        if start > end {
            return Err(OuraError::Validation(format!(
                "start_date {start} is after end_date {end}"
            )));
        }
        Ok(Self { start, end })
    }

    /// The last `days` calendar days ending today.
    pub fn last_days(days: i64) -> Self {
        let end = Utc::now().date_naive();
        let start = end - Duration::days(days.saturating_sub(1).max(0));
        Self { start, end }
    }

    /// Resolve optional ISO `YYYY-MM-DD` bounds. With neither bound given the
    /// range defaults to the last [`DEFAULT_WINDOW_DAYS`] days; a missing end
    /// defaults to today and a missing start to `end - (window - 1)`.
    pub fn from_optional(start: Option<&str>, end: Option<&str>) -> Result<Self, OuraError> {
        match (start, end) {
            (None, None) => Ok(Self::last_days(DEFAULT_WINDOW_DAYS)),
            (s, e) => {
                let end = match e {
                    Some(raw) => parse_date(raw)?,
                    None => Utc::now().date_naive(),
                };
                let start = match s {
                    Some(raw) => parse_date(raw)?,
                    None => end - Duration::days(DEFAULT_WINDOW_DAYS - 1),
                };
                Self::new(start, end)
            }
        }
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }
}

impl std::fmt::Display for DateRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} to {}", self.start, self.end)
    }
}

fn parse_date(raw: &str) -> Result<NaiveDate, OuraError> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| {
        OuraError::Validation(format!("invalid date {raw:?}, expected YYYY-MM-DD"))
    })
}
