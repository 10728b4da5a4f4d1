//! Line grammar for WhatsApp text exports.
//!
//! An exported chat line looks like one of:
//!
//! ```text
//! 1/2/23, 10:30 AM - Alice: Hello there      (12-hour)
//! 01/02/2023, 22:30 - Alice: Hello there     (24-hour)
//! ```
//!
//! The date is always day-first with `/` separators and a 2- or 4-digit year.
//! The sender runs up to the first colon; the body is the rest of the line.
//!
//! Patterns are anchored at line start and compiled once. The `regex` crate
//! matches in linear time, so hostile input cannot trigger backtracking blowups.

use chrono::NaiveDateTime;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};

/// Timestamp encoding used throughout one export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimeFormat {
    /// `H:MM AM/PM`, meridiem case-insensitive
    /// Example: 1/2/23, 10:30 AM - Alice: Hi
    TwelveHour,
    /// `HH:MM`
    /// Example: 01/02/2023, 22:30 - Alice: Hi
    TwentyFourHour,
}

impl TimeFormat {
    /// Formats in detection priority order.
    pub fn all() -> &'static [TimeFormat] {
        &[TimeFormat::TwelveHour, TimeFormat::TwentyFourHour]
    }

    /// Returns the regex pattern for a full message line in this format.
    ///
    /// Capture groups: date, clock, meridiem (12-hour only), sender, body.
    pub fn pattern(self) -> &'static str {
        match self {
            // 1/2/23, 10:30 AM - Sender: Message
            TimeFormat::TwelveHour => {
                r"^(\d{1,2}/\d{1,2}/\d{2,4}), (\d{1,2}:\d{2})[ \x{202F}\x{00A0}]?([AaPp][Mm]) - ([^:]+): (.+)$"
            }
            // 01/02/2023, 22:30 - Sender: Message
            TimeFormat::TwentyFourHour => {
                r"^(\d{1,2}/\d{1,2}/\d{2,4}), (\d{2}:\d{2})() - ([^:]+): (.+)$"
            }
        }
    }

    /// Day-first chrono formats, tried in order.
    ///
    /// `%y` comes before `%Y` so that `23` reads as 2023, not year 23.
    pub fn day_first_formats(self) -> &'static [&'static str] {
        match self {
            TimeFormat::TwelveHour => &["%d/%m/%y %I:%M %p", "%d/%m/%Y %I:%M %p"],
            TimeFormat::TwentyFourHour => &["%d/%m/%y %H:%M", "%d/%m/%Y %H:%M"],
        }
    }

    /// Month-first fallback formats. Only the 12-hour grammar has them.
    pub fn month_first_formats(self) -> &'static [&'static str] {
        match self {
            TimeFormat::TwelveHour => &["%m/%d/%y %I:%M %p", "%m/%d/%Y %I:%M %p"],
            TimeFormat::TwentyFourHour => &[],
        }
    }
}

impl std::fmt::Display for TimeFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TimeFormat::TwelveHour => write!(f, "12-hour"),
            TimeFormat::TwentyFourHour => write!(f, "24-hour"),
        }
    }
}

static TWELVE_HOUR: Lazy<Regex> = Lazy::new(|| compile(TimeFormat::TwelveHour.pattern()));
static TWENTY_FOUR_HOUR: Lazy<Regex> =
    Lazy::new(|| compile(TimeFormat::TwentyFourHour.pattern()));

/// Timestamp prefix without a `sender: body` part, e.g. `Alice joined`.
static HEADER_ONLY: Lazy<Regex> = Lazy::new(|| {
    compile(r"^\d{1,2}/\d{1,2}/\d{2,4}, \d{1,2}:\d{2}(?:[ \x{202F}\x{00A0}]?[AaPp][Mm])? - ")
});

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("built-in line pattern must compile")
}

/// The pieces of one matched header line, borrowed from the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineMatch<'a> {
    pub date: &'a str,
    pub clock: &'a str,
    /// `AM`/`PM` as written, empty for 24-hour lines.
    pub meridiem: &'a str,
    /// Sender exactly as captured, not yet trimmed.
    pub sender: &'a str,
    pub body: &'a str,
}

/// Compiled grammar for one [`TimeFormat`].
#[derive(Debug, Clone, Copy)]
pub struct LineGrammar {
    format: TimeFormat,
    regex: &'static Regex,
    month_first_fallback: bool,
}

impl LineGrammar {
    pub fn new(format: TimeFormat) -> Self {
        let regex: &'static Regex = match format {
            TimeFormat::TwelveHour => &*TWELVE_HOUR,
            TimeFormat::TwentyFourHour => &*TWENTY_FOUR_HOUR,
        };
        Self {
            format,
            regex,
            month_first_fallback: true,
        }
    }

    /// Enables or disables the month-first retry for ambiguous dates.
    #[must_use]
    pub fn with_month_first_fallback(mut self, enabled: bool) -> Self {
        self.month_first_fallback = enabled;
        self
    }

    pub fn format(&self) -> TimeFormat {
        self.format
    }

    pub fn matches(&self, line: &str) -> bool {
        self.regex.is_match(line)
    }

    /// Splits a header line into its parts, or `None` if it does not match.
    pub fn match_line<'a>(&self, line: &'a str) -> Option<LineMatch<'a>> {
        self.regex.captures(line).map(|caps| split_captures(&caps))
    }

    /// Parses the date and clock of a matched line.
    ///
    /// Day-first is tried first; the 12-hour grammar then retries
    /// month-first when enabled. Returns `None` for impossible dates.
    pub fn parse_timestamp(&self, m: &LineMatch<'_>) -> Option<NaiveDateTime> {
        let datetime_str = if m.meridiem.is_empty() {
            format!("{} {}", m.date, m.clock)
        } else {
            format!("{} {} {}", m.date, m.clock, m.meridiem.to_ascii_uppercase())
        };

        let fallback: &[&str] = if self.month_first_fallback {
            self.format.month_first_formats()
        } else {
            &[]
        };

        self.format
            .day_first_formats()
            .iter()
            .chain(fallback)
            .find_map(|fmt| NaiveDateTime::parse_from_str(&datetime_str, fmt).ok())
    }
}

fn split_captures<'a>(caps: &Captures<'a>) -> LineMatch<'a> {
    let group = |i: usize| caps.get(i).map_or("", |m| m.as_str());
    LineMatch {
        date: group(1),
        clock: group(2),
        meridiem: group(3),
        sender: group(4),
        body: group(5),
    }
}

/// Returns `true` if the line starts with a timestamp header, whether or not
/// a sender follows.
pub fn has_timestamp_header(line: &str) -> bool {
    HEADER_ONLY.is_match(line)
}

/// Detects the timestamp encoding of a whole document.
///
/// Any 12-hour match wins for the entire document; 24-hour is used only if
/// no line matches the 12-hour grammar. Returns `None` if nothing matches.
pub fn detect_time_format<'a, I>(lines: I) -> Option<TimeFormat>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut seen_24h = false;

    for line in lines {
        if TWELVE_HOUR.is_match(line) {
            return Some(TimeFormat::TwelveHour);
        }
        if !seen_24h && TWENTY_FOUR_HOUR.is_match(line) {
            seen_24h = true;
        }
    }

    seen_24h.then_some(TimeFormat::TwentyFourHour)
}
