//! Filter records by date range and sender.
//!
//! [`FilterConfig`] narrows a parsed chat before analysis. Filters combine
//! with AND logic; an inactive filter passes everything through.
//!
//! # Example
//!
//! ```
//! use chatlens::filter::{FilterConfig, apply_filters};
//! use chatlens::parser::parse;
//!
//! # fn main() -> chatlens::Result<()> {
//! let chat = parse(
//!     "1/1/24, 9:00 AM - Alice: Old\n15/6/24, 9:00 AM - Alice: New\n16/6/24, 9:00 AM - Bob: Hi",
//! );
//!
//! let config = FilterConfig::new()
//!     .with_date_from("2024-06-01")?
//!     .with_sender("Alice");
//!
//! let filtered = apply_filters(chat.into_records(), &config);
//! assert_eq!(filtered.len(), 1);
//! assert_eq!(filtered[0].body(), "New");
//! # Ok(())
//! # }
//! ```

use chrono::NaiveDate;

use crate::error::{ChatlensError, Result};
use crate::record::MessageRecord;

/// Date range and sender criteria.
///
/// Date bounds are inclusive calendar dates. Sender matching is exact, the
/// same identity rule used everywhere else: byte-equal trimmed names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterConfig {
    /// Include only records on or after this date.
    pub after: Option<NaiveDate>,

    /// Include only records on or before this date.
    pub before: Option<NaiveDate>,

    /// Include only records from this sender.
    pub sender: Option<String>,
}

impl FilterConfig {
    /// Creates a filter with no active criteria.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the inclusive start date from a `YYYY-MM-DD` string.
    ///
    /// # Errors
    ///
    /// Returns [`ChatlensError::InvalidDate`] if the format is invalid.
    pub fn with_date_from(mut self, date_str: &str) -> Result<Self> {
        self.after = Some(parse_date(date_str)?);
        Ok(self)
    }

    /// Sets the inclusive end date from a `YYYY-MM-DD` string.
    ///
    /// # Errors
    ///
    /// Returns [`ChatlensError::InvalidDate`] if the format is invalid.
    pub fn with_date_to(mut self, date_str: &str) -> Result<Self> {
        self.before = Some(parse_date(date_str)?);
        Ok(self)
    }

    #[must_use]
    pub fn with_after(mut self, date: NaiveDate) -> Self {
        self.after = Some(date);
        self
    }

    #[must_use]
    pub fn with_before(mut self, date: NaiveDate) -> Self {
        self.before = Some(date);
        self
    }

    /// Keeps only records from `sender` (trimmed, then compared exactly).
    #[must_use]
    pub fn with_sender(mut self, sender: impl AsRef<str>) -> Self {
        self.sender = Some(sender.as_ref().trim().to_string());
        self
    }

    /// Returns `true` if any filter is active.
    pub fn is_active(&self) -> bool {
        self.after.is_some() || self.before.is_some() || self.sender.is_some()
    }

    /// Returns `true` if a date bound is set.
    pub fn has_date_filter(&self) -> bool {
        self.after.is_some() || self.before.is_some()
    }

    /// Whether a single record passes every active filter.
    pub fn matches(&self, record: &MessageRecord) -> bool {
        if self.sender.as_deref().is_some_and(|s| record.sender() != s) {
            return false;
        }
        let date = record.date();
        if self.after.is_some_and(|after| date < after) {
            return false;
        }
        if self.before.is_some_and(|before| date > before) {
            return false;
        }
        true
    }
}

fn parse_date(date_str: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(date_str.trim(), "%Y-%m-%d")
        .map_err(|_| ChatlensError::invalid_date(date_str))
}

/// Keeps the records that match all active filters, in order.
pub fn apply_filters(records: Vec<MessageRecord>, config: &FilterConfig) -> Vec<MessageRecord> {
    if !config.is_active() {
        return records;
    }

    let before = records.len();
    let kept: Vec<MessageRecord> = records.into_iter().filter(|r| config.matches(r)).collect();
    tracing::debug!(before, after = kept.len(), "applied record filters");
    kept
}
