//! Typed chat records.
//!
//! A [`MessageRecord`] is one successfully parsed chat line. Besides the raw
//! `timestamp`, `sender` and `body`, it carries temporal fields derived once at
//! construction time, so aggregates never recompute them.
//!
//! # Example
//!
//! ```
//! use chatlens::record::{DayOfWeek, MessageRecord};
//! use chrono::NaiveDate;
//!
//! let ts = NaiveDate::from_ymd_opt(2023, 2, 1)
//!     .unwrap()
//!     .and_hms_opt(10, 30, 0)
//!     .unwrap();
//! let record = MessageRecord::new(ts, "  Alice ", "Hello there").unwrap();
//!
//! assert_eq!(record.sender(), "Alice");
//! assert_eq!(record.day_of_week, DayOfWeek::Wednesday);
//! assert_eq!(record.month_name, "February");
//! assert_eq!(record.hour, 10);
//! ```

use std::fmt;

use chrono::{Datelike, Month, NaiveDate, NaiveDateTime, Timelike, Weekday};
use serde::{Deserialize, Serialize};

/// Day of the week, ordered Monday first.
///
/// The declaration order is the fixed presentation order used by every
/// day-based distribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum DayOfWeek {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl DayOfWeek {
    /// All seven days in fixed Monday-first order.
    pub const ALL: [DayOfWeek; 7] = [
        DayOfWeek::Monday,
        DayOfWeek::Tuesday,
        DayOfWeek::Wednesday,
        DayOfWeek::Thursday,
        DayOfWeek::Friday,
        DayOfWeek::Saturday,
        DayOfWeek::Sunday,
    ];

    /// Zero-based position in the Monday-first order.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Full English day name.
    pub fn name(self) -> &'static str {
        match self {
            DayOfWeek::Monday => "Monday",
            DayOfWeek::Tuesday => "Tuesday",
            DayOfWeek::Wednesday => "Wednesday",
            DayOfWeek::Thursday => "Thursday",
            DayOfWeek::Friday => "Friday",
            DayOfWeek::Saturday => "Saturday",
            DayOfWeek::Sunday => "Sunday",
        }
    }
}

impl From<Weekday> for DayOfWeek {
    fn from(day: Weekday) -> Self {
        DayOfWeek::ALL[day.num_days_from_monday() as usize]
    }
}

impl fmt::Display for DayOfWeek {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One structured chat entry.
///
/// Two records belong to the same user iff their `sender` strings are
/// byte-equal; `sender` is always trimmed and never empty.
///
/// # Fields
///
/// | Field | Description |
/// |-------|-------------|
/// | `timestamp` | Timezone-naive date and time from the export |
/// | `sender` | Trimmed display name |
/// | `body` | Message text, may span several lines |
/// | `year`, `month`, `month_name` | Derived calendar fields |
/// | `day_of_week`, `hour`, `minute` | Derived clock fields |
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageRecord {
    /// When the message was sent, in the exporter's local time.
    pub timestamp: NaiveDateTime,

    /// Display name of the author.
    pub sender: String,

    /// Raw message text.
    ///
    /// Media placeholders such as `<Media omitted>` are kept verbatim.
    pub body: String,

    pub year: i32,

    /// Month number, 1-12.
    pub month: u32,

    pub month_name: String,

    pub day_of_week: DayOfWeek,

    /// Hour of day, 0-23.
    pub hour: u32,

    /// Minute, 0-59.
    pub minute: u32,
}

impl MessageRecord {
    /// Creates a record and derives its temporal fields.
    ///
    /// Returns `None` when `sender` is empty after trimming; such lines are
    /// excluded from a chat entirely.
    pub fn new(
        timestamp: NaiveDateTime,
        sender: impl AsRef<str>,
        body: impl Into<String>,
    ) -> Option<Self> {
        let sender = sender.as_ref().trim();
        if sender.is_empty() {
            return None;
        }

        let month = timestamp.month();
        let month_name = Month::try_from(month as u8)
            .map(|m| m.name().to_string())
            .unwrap_or_default();

        Some(Self {
            timestamp,
            sender: sender.to_string(),
            body: body.into(),
            year: timestamp.year(),
            month,
            month_name,
            day_of_week: timestamp.weekday().into(),
            hour: timestamp.hour(),
            minute: timestamp.minute(),
        })
    }

    /// Returns the sender name.
    pub fn sender(&self) -> &str {
        &self.sender
    }

    /// Returns the message text.
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Calendar date of the message.
    pub fn date(&self) -> NaiveDate {
        self.timestamp.date()
    }

    /// Returns `true` if the body contains the given media sentinel.
    pub fn is_media(&self, sentinel: &str) -> bool {
        self.body.contains(sentinel)
    }

    /// Returns `true` if the body is nothing but the media sentinel.
    ///
    /// Surrounding whitespace and left-to-right marks are ignored.
    pub fn is_media_only(&self, sentinel: &str) -> bool {
        self.body
            .trim_matches(|c: char| c.is_whitespace() || c == '\u{200e}')
            == sentinel
    }

    /// Appends a continuation line to the body.
    pub(crate) fn push_continuation(&mut self, line: &str) {
        self.body.push('\n');
        self.body.push_str(line);
    }
}
