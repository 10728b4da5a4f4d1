//! # Chatlens
//!
//! A Rust library for turning exported WhatsApp chat logs into typed records
//! and conversation statistics.
//!
//! ## Overview
//!
//! A WhatsApp "Export chat" text file has one header line per message:
//!
//! ```text
//! 1/2/23, 10:30 AM - Alice: Hello there
//! 15/01/2024, 22:05 - Bob: a message
//! that continues here
//! ```
//!
//! Chatlens detects the timestamp encoding (12-hour or 24-hour) once per
//! document, parses each line into a [`MessageRecord`] or discards it with a
//! counted reason, and computes [`AggregateStatistics`]: message, word, media
//! and link counts, top users, sentiment, spam/toxicity, day and hour
//! activity, reply times, conversation starters and emoji usage.
//!
//! Parsing and analysis never fail on bad data: unparsable lines are dropped
//! and empty inputs produce empty results.
//!
//! ## Quick Start
//!
//! ```rust
//! use chatlens::prelude::*;
//!
//! let chat = parse("1/2/23, 10:30 AM - Alice: Hello there\n1/2/23, 10:35 AM - Bob: Hi!");
//! assert_eq!(chat.len(), 2);
//!
//! let stats = analyze(&chat, &Scope::Overall);
//! assert_eq!(stats.total_messages, 2);
//! assert_eq!(stats.top_users[0].label, "Alice");
//! ```
//!
//! ## Module Structure
//!
//! - [`grammar`] - timestamp header grammars and format detection
//! - [`parser`] - [`ChatParser`], [`parse`], [`ParsedChat`], [`ParseReport`]
//! - [`record`] - [`MessageRecord`], [`DayOfWeek`]
//! - [`analysis`] - aggregate functions, [`Analyzer`], [`Scope`]
//! - [`filter`] - [`FilterConfig`], [`apply_filters`]
//! - [`config`] - [`ParserConfig`], [`AnalysisConfig`], [`KeywordLists`]
//! - [`output`] - JSON report, records CSV and text summary writers
//! - [`cli`] - CLI argument types (`cli` feature)
//! - [`error`] - [`ChatlensError`], [`Result`]
//! - [`prelude`] - convenient re-exports
//!
//! [`ChatParser`]: parser::ChatParser
//! [`parse`]: parser::parse
//! [`ParsedChat`]: parser::ParsedChat
//! [`ParseReport`]: parser::ParseReport
//! [`DayOfWeek`]: record::DayOfWeek
//! [`AggregateStatistics`]: analysis::AggregateStatistics
//! [`Analyzer`]: analysis::Analyzer
//! [`Scope`]: analysis::Scope
//! [`FilterConfig`]: filter::FilterConfig
//! [`apply_filters`]: filter::apply_filters
//! [`ParserConfig`]: config::ParserConfig
//! [`AnalysisConfig`]: config::AnalysisConfig
//! [`KeywordLists`]: config::KeywordLists

pub mod analysis;
#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod error;
pub mod filter;
pub mod grammar;
pub mod output;
pub mod parser;
pub mod record;

pub use error::{ChatlensError, Result};
pub use record::MessageRecord;

/// Convenient re-exports for common usage.
///
/// ```rust
/// use chatlens::prelude::*;
/// ```
pub mod prelude {
    pub use crate::MessageRecord;
    pub use crate::error::{ChatlensError, Result};

    pub use crate::grammar::TimeFormat;
    pub use crate::parser::{ChatParser, DiscardReason, ParseReport, ParsedChat, parse};
    pub use crate::record::DayOfWeek;

    pub use crate::config::{AnalysisConfig, KeywordLists, ParserConfig};

    pub use crate::analysis::{
        AggregateStatistics, Analyzer, Classification, Count, ReplyTimes, Scope, Sentiment,
        analyze, format_date_or_na,
    };

    pub use crate::filter::{FilterConfig, apply_filters};

    #[cfg(feature = "csv-output")]
    pub use crate::output::{to_records_csv, write_records_csv};
    #[cfg(feature = "json-output")]
    pub use crate::output::{to_json, write_json};
    pub use crate::output::{Report, render_text};
}
