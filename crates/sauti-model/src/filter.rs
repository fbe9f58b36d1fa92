//! The filter selection store.
//!
//! [`FilterState`] is the single source of truth for what the grid is
//! filtered by. It is only changed through the named setters below; the
//! session reducer maps its actions onto them.

use crate::currency::Currency;
use crate::date_range::DateRange;
use crate::dimension::Dimension;
use crate::error::Result;

/// Input accepted by [`FilterState::set_dimension`].
///
/// A scalar is normalised into a one-element list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterValues {
    One(String),
    Many(Vec<String>),
}

impl FilterValues {
    fn into_list(self) -> Vec<String> {
        let raw = match self {
            Self::One(value) => vec![value],
            Self::Many(values) => values,
        };
        let mut list: Vec<String> = Vec::with_capacity(raw.len());
        for value in raw {
            let value = value.trim();
            if value.is_empty() || list.iter().any(|seen| seen == value) {
                continue;
            }
            list.push(value.to_string());
        }
        list
    }
}

impl From<String> for FilterValues {
    fn from(value: String) -> Self {
        Self::One(value)
    }
}

impl From<&str> for FilterValues {
    fn from(value: &str) -> Self {
        Self::One(value.to_string())
    }
}

impl From<Vec<String>> for FilterValues {
    fn from(values: Vec<String>) -> Self {
        Self::Many(values)
    }
}

impl From<Vec<&str>> for FilterValues {
    fn from(values: Vec<&str>) -> Self {
        Self::Many(values.into_iter().map(str::to_string).collect())
    }
}

impl From<&[&str]> for FilterValues {
    fn from(values: &[&str]) -> Self {
        Self::Many(values.iter().map(|v| (*v).to_string()).collect())
    }
}

/// Current selections for every filter dimension.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    dimensions: [Vec<String>; 6],
    currency: Currency,
    date_range: Option<DateRange>,
}

impl FilterState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace one dimension's selection.
    ///
    /// Values are trimmed, blanks dropped and duplicates removed, keeping
    /// first-seen order.
    pub fn set_dimension(&mut self, dimension: Dimension, values: impl Into<FilterValues>) {
        self.dimensions[dimension.slot()] = values.into().into_list();
    }

    /// Selected codes for one dimension.
    #[must_use]
    pub fn values(&self, dimension: Dimension) -> &[String] {
        &self.dimensions[dimension.slot()]
    }

    pub fn set_currency(&mut self, currency: Currency) {
        self.currency = currency;
    }

    #[must_use]
    pub const fn currency(&self) -> &Currency {
        &self.currency
    }

    /// Set or clear the date range.
    ///
    /// The range is re-checked against today, so a range restored from an
    /// older session cannot carry a future end date in.
    pub fn set_date_range(&mut self, range: Option<DateRange>) -> Result<()> {
        self.date_range = match range {
            Some(range) => Some(DateRange::new(range.start(), range.end())?),
            None => None,
        };
        Ok(())
    }

    #[must_use]
    pub const fn date_range(&self) -> Option<&DateRange> {
        self.date_range.as_ref()
    }

    /// True when no dimension has a selection and no date range is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.dimensions.iter().all(Vec::is_empty) && self.date_range.is_none()
    }

    /// All dimensions empty, currency back to USD, no date range.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn scalar_input_becomes_list() {
        let mut state = FilterState::new();
        state.set_dimension(Dimension::Countries, "KEN");
        assert_eq!(state.values(Dimension::Countries), ["KEN"]);
    }

    #[test]
    fn duplicates_and_blanks_are_dropped() {
        let mut state = FilterState::new();
        state.set_dimension(Dimension::Products, vec!["Maize", " ", "Beans", "Maize"]);
        assert_eq!(state.values(Dimension::Products), ["Maize", "Beans"]);
    }

    #[test]
    fn dimensions_are_independent() {
        let mut state = FilterState::new();
        state.set_dimension(Dimension::Markets, vec!["Busia", "Kisumu"]);
        state.set_dimension(Dimension::Sources, "EAGC-RATIN");
        state.set_dimension(Dimension::Markets, Vec::<String>::new());
        assert!(state.values(Dimension::Markets).is_empty());
        assert_eq!(state.values(Dimension::Sources), ["EAGC-RATIN"]);
    }

    #[test]
    fn reset_restores_defaults() {
        let mut state = FilterState::new();
        state.set_dimension(Dimension::Countries, "UGA");
        state.set_currency(Currency::new("UGX").unwrap());
        let start = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2020, 1, 31).unwrap();
        state
            .set_date_range(Some(DateRange::new(start, end).unwrap()))
            .unwrap();

        state.reset();

        assert_eq!(state, FilterState::default());
        assert_eq!(state.currency().as_str(), "USD");
    }

    #[test]
    fn clearing_date_range() {
        let mut state = FilterState::new();
        let day = NaiveDate::from_ymd_opt(2021, 6, 1).unwrap();
        state
            .set_date_range(Some(DateRange::new(day, day).unwrap()))
            .unwrap();
        state.set_date_range(None).unwrap();
        assert!(state.date_range().is_none());
    }
}
