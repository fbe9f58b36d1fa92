//! Optional calendar date range filter.

use chrono::{NaiveDate, Utc};

use crate::error::{Result, ValidationError};

/// Wire format for range bounds.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// An inclusive `(start, end)` pair of calendar dates.
///
/// Construction enforces `start <= end` and `end <= today`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    /// Build a range validated against the current UTC date.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        Self::new_as_of(start, end, Utc::now().date_naive())
    }

    /// Build a range validated against an explicit `today`.
    pub fn new_as_of(start: NaiveDate, end: NaiveDate, today: NaiveDate) -> Result<Self> {
        if start > end {
            return Err(ValidationError::StartAfterEnd { start, end });
        }
        if end > today {
            return Err(ValidationError::EndInFuture { end, today });
        }
        Ok(Self { start, end })
    }

    /// Parse `YYYY-MM-DD` bounds.
    pub fn parse(start: &str, end: &str) -> Result<Self> {
        Self::new(parse_date(start)?, parse_date(end)?)
    }

    #[must_use]
    pub const fn start(&self) -> NaiveDate {
        self.start
    }

    #[must_use]
    pub const fn end(&self) -> NaiveDate {
        self.end
    }

    /// `(startDate, endDate)` as sent on the wire.
    #[must_use]
    pub fn wire_bounds(&self) -> (String, String) {
        (
            self.start.format(DATE_FORMAT).to_string(),
            self.end.format(DATE_FORMAT).to_string(),
        )
    }
}

/// Parse a single `YYYY-MM-DD` date.
pub fn parse_date(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT)
        .map_err(|_| ValidationError::InvalidDate(value.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn accepts_ordered_past_range() {
        let range = DateRange::new_as_of(date(2020, 1, 1), date(2020, 1, 31), date(2024, 5, 1))
            .unwrap();
        assert_eq!(
            range.wire_bounds(),
            ("2020-01-01".to_string(), "2020-01-31".to_string())
        );
    }

    #[test]
    fn single_day_range_is_valid() {
        let today = date(2024, 5, 1);
        assert!(DateRange::new_as_of(today, today, today).is_ok());
    }

    #[test]
    fn rejects_start_after_end() {
        let err = DateRange::new_as_of(date(2020, 2, 1), date(2020, 1, 1), date(2024, 5, 1))
            .unwrap_err();
        assert!(matches!(err, ValidationError::StartAfterEnd { .. }));
    }

    #[test]
    fn rejects_end_after_today() {
        let err = DateRange::new_as_of(date(2024, 4, 1), date(2024, 5, 2), date(2024, 5, 1))
            .unwrap_err();
        assert!(matches!(err, ValidationError::EndInFuture { .. }));
    }

    #[test]
    fn parse_rejects_other_formats() {
        assert!(parse_date("01/02/2020").is_err());
        assert_eq!(parse_date(" 2020-01-02 ").unwrap(), date(2020, 1, 2));
    }
}
