//! Aggregate statistics over parsed chats.
//!
//! Every aggregate is a pure function over a record slice and is total: an
//! empty slice yields zero counts, `None` dates and empty rankings. The
//! submodules expose those functions individually; [`Analyzer`] bundles them
//! into one [`AggregateStatistics`] value per [`Scope`].
//!
//! # Example
//!
//! ```rust
//! use chatlens::analysis::{Analyzer, Scope};
//! use chatlens::config::AnalysisConfig;
//! use chatlens::parser::parse;
//!
//! # fn main() -> chatlens::Result<()> {
//! let chat = parse("1/2/23, 10:30 AM - Alice: great news\n1/2/23, 10:35 AM - Bob: <Media omitted>");
//! let analyzer = Analyzer::new(AnalysisConfig::new().with_top_users(3))?;
//!
//! let stats = analyzer.analyze(&chat, &Scope::Overall);
//! assert_eq!(stats.total_messages, 2);
//! assert_eq!(stats.media_count, 1);
//!
//! let alice = analyzer.analyze(&chat, &Scope::sender("Alice"));
//! assert_eq!(alice.total_messages, 1);
//! // conversation-scoped: still covers both senders
//! assert_eq!(alice.top_users.len(), 2);
//! # Ok(())
//! # }
//! ```

pub mod activity;
pub mod emoji;
pub mod moderation;
pub mod reply;
pub mod sentiment;
pub mod text;

use std::collections::HashMap;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::config::AnalysisConfig;
use crate::error::Result;
use crate::parser::ParsedChat;
use crate::record::MessageRecord;

pub use activity::{
    ActivityHeatmap, DateCount, DayActivity, MonthCount, active_days, activity_heatmap,
    conversation_starters, daily_timeline, monthly_timeline, top_users,
};
pub use emoji::emoji_frequency;
pub use moderation::{Classification, ModerationReport, Moderator};
pub use reply::{ReplyStat, ReplyTimes, reply_time_analysis};
pub use sentiment::{Sentiment, SentimentDistribution};
pub use text::{LinkMatcher, format_date_or_na};

/// A label with an occurrence count, used by every ranked mapping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Count {
    pub label: String,
    pub count: usize,
}

impl Count {
    pub fn new(label: impl Into<String>, count: usize) -> Self {
        Self {
            label: label.into(),
            count,
        }
    }
}

/// Insertion-ordered counter.
///
/// Ranking sorts by count with a stable sort, so equal counts keep
/// first-encountered order.
#[derive(Debug, Default)]
pub(crate) struct Tally<'a> {
    index: HashMap<&'a str, usize>,
    entries: Vec<(&'a str, usize)>,
}

impl<'a> Tally<'a> {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn add(&mut self, key: &'a str) {
        self.add_n(key, 1);
    }

    pub(crate) fn add_n(&mut self, key: &'a str, n: usize) {
        if let Some(&i) = self.index.get(key) {
            self.entries[i].1 += n;
        } else {
            self.index.insert(key, self.entries.len());
            self.entries.push((key, n));
        }
    }

    pub(crate) fn distinct(&self) -> usize {
        self.entries.len()
    }

    /// Descending by count, truncated to `limit` entries when given.
    pub(crate) fn into_ranked(self, limit: Option<usize>) -> Vec<Count> {
        let mut entries = self.entries;
        entries.sort_by(|a, b| b.1.cmp(&a.1));
        entries
            .into_iter()
            .take(limit.unwrap_or(usize::MAX))
            .map(|(label, count)| Count::new(label, count))
            .collect()
    }
}

/// Which records an analysis covers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scope {
    /// Every record in the chat.
    #[default]
    Overall,
    /// Only records whose sender is byte-equal to the name.
    Sender(String),
}

impl Scope {
    /// Shorthand for [`Scope::Sender`].
    pub fn sender(name: impl Into<String>) -> Self {
        Scope::Sender(name.into())
    }

    pub fn includes(&self, record: &MessageRecord) -> bool {
        match self {
            Scope::Overall => true,
            Scope::Sender(name) => record.sender() == name,
        }
    }

    /// Human-readable label, `"Overall"` or the sender name.
    pub fn label(&self) -> &str {
        match self {
            Scope::Overall => "Overall",
            Scope::Sender(name) => name,
        }
    }
}

/// Derived statistics for one scope of a chat.
///
/// `first_message_date`, `last_message_date`, `top_users` and
/// `conversation_starters` describe the whole conversation even for a
/// [`Scope::Sender`] analysis. Everything else covers the scoped records only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateStatistics {
    pub scope: Scope,
    pub total_messages: usize,
    pub word_count: usize,
    pub media_count: usize,
    pub link_count: usize,
    pub first_message_date: Option<NaiveDateTime>,
    pub last_message_date: Option<NaiveDateTime>,
    pub longest_message: Option<String>,
    pub sentiment: SentimentDistribution,
    pub moderation: ModerationReport,
    pub offensive_words: Vec<Count>,
    pub top_users: Vec<Count>,
    pub conversation_starters: Vec<Count>,
    pub active_days: Vec<DayActivity>,
    pub activity_heatmap: ActivityHeatmap,
    pub monthly_timeline: Vec<MonthCount>,
    pub daily_timeline: Vec<DateCount>,
    pub reply_times: ReplyTimes,
    pub emojis: Vec<Count>,
}

impl AggregateStatistics {
    /// `true` when the scope matched no records.
    pub fn is_empty(&self) -> bool {
        self.total_messages == 0
    }
}

/// Computes [`AggregateStatistics`] with a validated configuration.
///
/// Construction is the only fallible step; every analysis afterwards is total.
#[derive(Debug, Clone)]
pub struct Analyzer {
    config: AnalysisConfig,
    links: LinkMatcher,
    moderator: Moderator,
}

impl Default for Analyzer {
    fn default() -> Self {
        let config = AnalysisConfig::default();
        Self {
            links: LinkMatcher::new(&config.link_tlds),
            moderator: Moderator::new(&config.keywords),
            config,
        }
    }
}

impl Analyzer {
    /// Validates `config` and prepares the keyword and link matchers.
    ///
    /// # Errors
    ///
    /// Returns [`ChatlensError::InvalidConfig`](crate::ChatlensError::InvalidConfig)
    /// when [`AnalysisConfig::validate`] fails.
    pub fn new(config: AnalysisConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            links: LinkMatcher::new(&config.link_tlds),
            moderator: Moderator::new(&config.keywords),
            config,
        })
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    pub fn links(&self) -> &LinkMatcher {
        &self.links
    }

    pub fn moderator(&self) -> &Moderator {
        &self.moderator
    }

    /// Analyzes a parsed chat for the given scope.
    pub fn analyze(&self, chat: &ParsedChat, scope: &Scope) -> AggregateStatistics {
        self.analyze_records(chat.records(), scope)
    }

    /// Analyzes a record slice, e.g. the output of [`apply_filters`](crate::filter::apply_filters).
    pub fn analyze_records(&self, records: &[MessageRecord], scope: &Scope) -> AggregateStatistics {
        let scoped: Vec<MessageRecord> = match scope {
            Scope::Overall => Vec::new(),
            Scope::Sender(_) => records.iter().filter(|r| scope.includes(r)).cloned().collect(),
        };
        let subset: &[MessageRecord] = match scope {
            Scope::Overall => records,
            Scope::Sender(_) => &scoped,
        };

        tracing::info!(
            scope = scope.label(),
            records = subset.len(),
            conversation = records.len(),
            "computing aggregate statistics"
        );

        let sentinel = self.config.media_sentinel.as_str();

        AggregateStatistics {
            scope: scope.clone(),
            total_messages: subset.len(),
            word_count: text::word_count(subset),
            media_count: text::media_count(subset, sentinel),
            link_count: text::link_count(subset, &self.links),
            first_message_date: text::first_message_date(records),
            last_message_date: text::last_message_date(records),
            longest_message: text::longest_message(subset).map(|r| r.body.clone()),
            sentiment: sentiment::sentiment_distribution(
                subset,
                sentinel,
                self.config.sentiment_dead_zone,
            ),
            moderation: moderation::moderation_report(subset, &self.moderator, sentinel),
            offensive_words: moderation::offensive_words(subset, &self.moderator, sentinel),
            top_users: top_users(records, self.config.top_users),
            conversation_starters: conversation_starters(records),
            active_days: active_days(subset),
            activity_heatmap: activity_heatmap(subset),
            monthly_timeline: monthly_timeline(subset),
            daily_timeline: daily_timeline(subset),
            reply_times: reply_time_analysis(subset, self.config.reply_top_users),
            emojis: emoji_frequency(subset, self.config.top_emojis),
        }
    }
}

/// Analyzes a chat with the default configuration.
pub fn analyze(chat: &ParsedChat, scope: &Scope) -> AggregateStatistics {
    Analyzer::default().analyze(chat, scope)
}
