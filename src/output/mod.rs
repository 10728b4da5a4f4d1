//! Report writers.
//!
//! - [`write_json`] / [`to_json`] - aggregate report as pretty JSON, requires `json-output`
//! - [`write_records_csv`] / [`to_records_csv`] - parsed records with derived
//!   fields, `;`-delimited, requires `csv-output`
//! - [`render_text`] - plain-text summary for terminals
//!
//! # Example
//!
//! ```rust
//! # #[cfg(all(feature = "csv-output", feature = "json-output"))]
//! # fn main() -> chatlens::Result<()> {
//! use chatlens::analysis::{Scope, analyze};
//! use chatlens::output::{Report, to_json, to_records_csv};
//! use chatlens::parser::parse;
//!
//! let chat = parse("1/2/23, 10:30 AM - Alice: Hello there");
//! let stats = analyze(&chat, &Scope::Overall);
//!
//! let json = to_json(&Report::new(chat.report(), &stats))?;
//! assert!(json.contains("\"total_messages\": 1"));
//!
//! let csv = to_records_csv(chat.records())?;
//! assert!(csv.starts_with("Timestamp;Sender;Body"));
//! # Ok(())
//! # }
//! # #[cfg(not(all(feature = "csv-output", feature = "json-output")))]
//! # fn main() {}
//! ```

#[cfg(feature = "csv-output")]
mod csv_writer;
#[cfg(feature = "json-output")]
mod json_writer;
mod text;

#[cfg(feature = "csv-output")]
pub use csv_writer::{to_records_csv, write_records_csv};
#[cfg(feature = "json-output")]
pub use json_writer::{to_json, write_json};
pub use text::render_text;

use serde::Serialize;

use crate::analysis::AggregateStatistics;
use crate::parser::ParseReport;

/// Everything written to a JSON report: parse bookkeeping plus statistics.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Report<'a> {
    pub parse: &'a ParseReport,
    pub statistics: &'a AggregateStatistics,
}

impl<'a> Report<'a> {
    pub fn new(parse: &'a ParseReport, statistics: &'a AggregateStatistics) -> Self {
        Self { parse, statistics }
    }
}
