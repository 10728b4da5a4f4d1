//! Chat log parser.
//!
//! Parsing is a two-phase scan over the whole text:
//!
//! 1. **Format detection** - the document is classified as 12-hour or 24-hour
//!   once, up front (see [`detect_time_format`]). Every record in the output
//!   uses that single interpretation.
//! 2. **Per-line parse-or-discard** - each line either starts a record, extends
//!   the previous record's body, or is discarded with a [`DiscardReason`].
//!
//! Parsing never fails. An input with no recognizable lines yields an empty
//! [`ParsedChat`], which callers should treat as "no data". Every discard is
//! counted in the [`ParseReport`] and logged at `debug` level.
//!
//! # Example
//!
//! ```rust
//! use chatlens::parser::parse;
//!
//! let chat = parse("1/2/23, 10:30 AM - Alice: Hello there\n1/2/23, 10:31 AM - Bob: Hi!");
//! assert_eq!(chat.len(), 2);
//! assert_eq!(chat.records()[0].sender(), "Alice");
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::config::ParserConfig;
use crate::error::{ChatlensError, Result};
use crate::grammar::{LineGrammar, TimeFormat, detect_time_format, has_timestamp_header};
use crate::record::MessageRecord;

/// Why a line did not become (part of) a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiscardReason {
    /// Header matched but the sender was blank after trimming.
    EmptySender,
    /// Header matched but the date/time is impossible (e.g. month 13).
    InvalidTimestamp,
    /// Timestamp header without a `sender: body` part (joins, encryption notice).
    SystemNotice,
    /// Line uses the other timestamp encoding than the one detected.
    MixedFormat,
    /// Non-header line with no open record to attach to.
    Orphan,
    /// Non-header line while continuation joining is disabled.
    Continuation,
    /// Line exceeds the configured maximum length.
    Oversized,
}

impl fmt::Display for DiscardReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            DiscardReason::EmptySender => "empty sender",
            DiscardReason::InvalidTimestamp => "invalid timestamp",
            DiscardReason::SystemNotice => "system notice",
            DiscardReason::MixedFormat => "mixed timestamp format",
            DiscardReason::Orphan => "orphan line",
            DiscardReason::Continuation => "continuation line",
            DiscardReason::Oversized => "oversized line",
        };
        f.write_str(s)
    }
}

/// Bookkeeping for one parse run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseReport {
    /// Detected timestamp encoding, `None` if nothing matched.
    pub format: Option<TimeFormat>,
    /// Total lines in the input.
    pub lines: usize,
    /// Records produced.
    pub records: usize,
    /// Lines appended to a previous record's body, including blank lines
    /// between two lines of the same message.
    pub continuation_lines: usize,
    /// Empty or whitespace-only lines not kept in any body.
    pub blank_lines: usize,
    /// Discarded lines by reason.
    pub discarded: BTreeMap<DiscardReason, usize>,
}

impl ParseReport {
    /// Total number of discarded lines.
    pub fn total_discarded(&self) -> usize {
        self.discarded.values().sum()
    }

    /// Number of lines discarded for the given reason.
    pub fn discarded_for(&self, reason: DiscardReason) -> usize {
        self.discarded.get(&reason).copied().unwrap_or(0)
    }

    fn discard(&mut self, line_no: usize, reason: DiscardReason) {
        tracing::debug!(line = line_no, %reason, "discarded chat line");
        *self.discarded.entry(reason).or_insert(0) += 1;
    }
}

/// The ordered records parsed from one input text.
///
/// Records keep source line order; no re-sorting is done.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedChat {
    records: Vec<MessageRecord>,
    report: ParseReport,
}

impl ParsedChat {
    /// Wraps already-built records, e.g. for tests or re-analysis.
    pub fn from_records(records: Vec<MessageRecord>) -> Self {
        let report = ParseReport {
            records: records.len(),
            ..ParseReport::default()
        };
        Self { records, report }
    }

    pub fn records(&self) -> &[MessageRecord] {
        &self.records
    }

    pub fn into_records(self) -> Vec<MessageRecord> {
        self.records
    }

    pub fn report(&self) -> &ParseReport {
        &self.report
    }

    /// Timestamp encoding the document was parsed with.
    pub fn format(&self) -> Option<TimeFormat> {
        self.report.format
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// `true` when no line was recognized.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, MessageRecord> {
        self.records.iter()
    }

    /// Distinct senders, sorted.
    pub fn senders(&self) -> Vec<&str> {
        let mut senders: Vec<&str> = self.records.iter().map(MessageRecord::sender).collect();
        senders.sort_unstable();
        senders.dedup();
        senders
    }
}

impl<'a> IntoIterator for &'a ParsedChat {
    type Item = &'a MessageRecord;
    type IntoIter = std::slice::Iter<'a, MessageRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

impl IntoIterator for ParsedChat {
    type Item = MessageRecord;
    type IntoIter = std::vec::IntoIter<MessageRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}

/// Parser for WhatsApp TXT exports.
///
/// # Example
///
/// ```rust
/// use chatlens::config::ParserConfig;
/// use chatlens::parser::ChatParser;
///
/// let parser = ChatParser::with_config(ParserConfig::new().with_join_continuations(false));
/// let chat = parser.parse_str("15/01/2024, 10:30 - Alice: Hi\nsecond line");
/// assert_eq!(chat.records()[0].body(), "Hi");
/// ```
#[derive(Debug, Clone, Default)]
pub struct ChatParser {
    config: ParserConfig,
}

impl ChatParser {
    /// Creates a new parser with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a parser with custom configuration.
    pub fn with_config(config: ParserConfig) -> Self {
        Self { config }
    }

    /// Returns the current configuration.
    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Reads, decodes and parses an export file.
    ///
    /// # Errors
    ///
    /// Fails on I/O errors, files larger than
    /// [`max_input_bytes`](ParserConfig::max_input_bytes), or invalid UTF-8.
    /// The content itself never causes an error.
    pub fn parse_file(&self, path: &Path) -> Result<ParsedChat> {
        let size = fs::metadata(path)?.len() as usize;
        if size > self.config.max_input_bytes {
            return Err(ChatlensError::input_too_large(
                self.config.max_input_bytes,
                size,
                Some(path.to_path_buf()),
            ));
        }

        let bytes = fs::read(path)?;
        let text = String::from_utf8(bytes)
            .map_err(|e| ChatlensError::utf8(path.display().to_string(), e))?;
        Ok(self.parse_str(&text))
    }

    /// Parses already-decoded export text.
    pub fn parse_str(&self, content: &str) -> ParsedChat {
        let content = content.strip_prefix('\u{feff}').unwrap_or(content);
        let lines: Vec<&str> = content.lines().map(strip_direction_marks).collect();

        let mut report = ParseReport {
            lines: lines.len(),
            ..ParseReport::default()
        };

        // Step 1: whole-document format detection
        let Some(format) = detect_time_format(lines.iter().copied()) else {
            tracing::info!(lines = report.lines, "no recognizable chat lines");
            return ParsedChat {
                records: Vec::new(),
                report,
            };
        };
        report.format = Some(format);

        let grammar = LineGrammar::new(format)
            .with_month_first_fallback(self.config.month_first_fallback);
        let other = TimeFormat::all()
            .iter()
            .copied()
            .find(|f| *f != format)
            .map(LineGrammar::new);

        // Step 2: parse or discard each line
        let mut records: Vec<MessageRecord> = Vec::new();
        // Whether the last header line produced a record that may take continuations
        let mut open = false;
        // Blank lines inside an open record, kept only if more body text follows
        let mut pending_blanks: Vec<&str> = Vec::new();

        for (idx, line) in lines.iter().enumerate() {
            let line_no = idx + 1;

            if line.trim().is_empty() {
                if open && self.config.join_continuations {
                    pending_blanks.push(*line);
                } else {
                    report.blank_lines += 1;
                }
                continue;
            }

            let held = std::mem::take(&mut pending_blanks);

            if line.len() > self.config.max_line_len {
                report.blank_lines += held.len();
                report.discard(line_no, DiscardReason::Oversized);
                continue;
            }

            if let Some(m) = grammar.match_line(line) {
                if let Some(timestamp) = grammar.parse_timestamp(&m) {
                    if let Some(record) = MessageRecord::new(timestamp, m.sender, m.body) {
                        records.push(record);
                        open = true;
                    } else {
                        report.discard(line_no, DiscardReason::EmptySender);
                        open = false;
                    }
                } else {
                    report.discard(line_no, DiscardReason::InvalidTimestamp);
                    open = false;
                }
            } else if other.is_some_and(|g| g.matches(line)) {
                report.discard(line_no, DiscardReason::MixedFormat);
                open = false;
            } else if has_timestamp_header(line) {
                report.discard(line_no, DiscardReason::SystemNotice);
                open = false;
            } else if !self.config.join_continuations {
                report.discard(line_no, DiscardReason::Continuation);
            } else if let Some(last) = records.last_mut().filter(|_| open) {
                for blank in &held {
                    last.push_continuation(blank);
                }
                last.push_continuation(line);
                report.continuation_lines += held.len() + 1;
                continue;
            } else {
                report.discard(line_no, DiscardReason::Orphan);
            }

            // Blank lines followed by anything but body text are not part of a message
            report.blank_lines += held.len();
        }

        report.blank_lines += pending_blanks.len();
        report.records = records.len();
        tracing::info!(
            %format,
            records = report.records,
            discarded = report.total_discarded(),
            continuations = report.continuation_lines,
            "parsed chat export"
        );

        ParsedChat { records, report }
    }
}

/// Parses export text with the default configuration.
///
/// Total over any input: an empty result means no line was recognized.
pub fn parse(text: &str) -> ParsedChat {
    ChatParser::new().parse_str(text)
}

/// iOS exports prefix some lines with a left-to-right mark.
fn strip_direction_marks(line: &str) -> &str {
    line.trim_start_matches('\u{200e}')
}
