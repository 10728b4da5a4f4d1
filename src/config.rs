//! Configuration types for parsing and analysis.
//!
//! All knobs are static data supplied by the caller, never inferred from the
//! chat itself:
//!
//! - [`ParserConfig`] - line handling and size guards
//! - [`AnalysisConfig`] - top-N limits, keyword lists, link TLDs, sentiment
//!   threshold
//!
//! # Example
//!
//! ```rust
//! use chatlens::config::{AnalysisConfig, KeywordLists};
//!
//! let config = AnalysisConfig::new()
//!     .with_top_users(10)
//!     .with_keywords(KeywordLists::new(vec!["buy now".into()], vec!["idiot".into()]));
//!
//! assert!(config.validate().is_ok());
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{ChatlensError, Result};

/// Sentinel WhatsApp writes in place of attachments in "without media" exports.
pub const MEDIA_OMITTED: &str = "<Media omitted>";

/// Configuration for chat log parsing.
///
/// # Example
///
/// ```rust
/// use chatlens::config::ParserConfig;
///
/// let config = ParserConfig::new()
///     .with_join_continuations(false)
///     .with_max_line_len(4096);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParserConfig {
    /// Append non-header lines to the previous record's body (default: true).
    ///
    /// Blank lines between two lines of one message are kept in the body.
    /// When disabled, such lines are discarded.
    pub join_continuations: bool,

    /// Retry month-first date order when day-first fails, for the 12-hour
    /// grammar only (default: true)
    pub month_first_fallback: bool,

    /// Lines longer than this many bytes are discarded (default: 64KB)
    pub max_line_len: usize,

    /// Maximum export size accepted when reading from a file (default: 256MB)
    pub max_input_bytes: usize,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            join_continuations: true,
            month_first_fallback: true,
            max_line_len: 64 * 1024,           // 64KB
            max_input_bytes: 256 * 1024 * 1024, // 256MB
        }
    }
}

impl ParserConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enables or disables continuation-line joining.
    #[must_use]
    pub fn with_join_continuations(mut self, join: bool) -> Self {
        self.join_continuations = join;
        self
    }

    /// Enables or disables the month-first date fallback.
    #[must_use]
    pub fn with_month_first_fallback(mut self, enabled: bool) -> Self {
        self.month_first_fallback = enabled;
        self
    }

    /// Sets the maximum accepted line length in bytes.
    #[must_use]
    pub fn with_max_line_len(mut self, len: usize) -> Self {
        self.max_line_len = len;
        self
    }

    /// Sets the maximum accepted file size in bytes.
    #[must_use]
    pub fn with_max_input_bytes(mut self, size: usize) -> Self {
        self.max_input_bytes = size;
        self
    }
}

/// Keyword lists for spam / toxicity classification.
///
/// Entries are matched case-insensitively. A single-word entry matches a whole
/// token (surrounding punctuation ignored); an entry containing whitespace
/// matches as a phrase anywhere in the message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordLists {
    /// Phrases signalling spam intent.
    pub spam: Vec<String>,

    /// Rude or offensive words and phrases.
    pub toxic: Vec<String>,
}

impl KeywordLists {
    /// Creates keyword lists from explicit spam and toxic entries.
    pub fn new(spam: Vec<String>, toxic: Vec<String>) -> Self {
        Self { spam, toxic }
    }
}

impl Default for KeywordLists {
    fn default() -> Self {
        Self {
            spam: DEFAULT_SPAM_KEYWORDS.iter().map(|s| (*s).to_string()).collect(),
            toxic: DEFAULT_TOXIC_KEYWORDS.iter().map(|s| (*s).to_string()).collect(),
        }
    }
}

const DEFAULT_SPAM_KEYWORDS: &[&str] = &[
    "free money",
    "click here",
    "click the link",
    "buy now",
    "limited offer",
    "limited time offer",
    "win a prize",
    "you have won",
    "you won",
    "claim your",
    "lottery",
    "jackpot",
    "earn money",
    "earn from home",
    "work from home",
    "double your money",
    "investment opportunity",
    "crypto giveaway",
    "100% free",
    "act now",
    "subscribe now",
    "forward this message",
];

const DEFAULT_TOXIC_KEYWORDS: &[&str] = &[
    "nude",
    "sex",
    "fuck",
    "bitch",
    "asshole",
    "porn",
    "fool",
    "dick",
    "boobs",
    "slut",
    "madharchod",
    "nigger",
    "nigga",
    "cunt",
    "pussy",
    "lund",
    "lora",
    "chode",
    "mc",
    "ma ka bhosda",
    "gandmara",
    "fuckyou",
    "fuck you",
    "laude",
];

/// Configuration for aggregate statistics.
///
/// # Example
///
/// ```rust
/// use chatlens::config::AnalysisConfig;
///
/// let config = AnalysisConfig::new()
///     .with_top_users(5)
///     .with_sentiment_dead_zone(0.1);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Number of senders in the "top users" ranking (default: 5)
    pub top_users: usize,

    /// Number of most active senders considered for reply times (default: 10)
    pub reply_top_users: usize,

    /// Number of emojis kept in the frequency table; `None` keeps all (default: None)
    pub top_emojis: Option<usize>,

    /// Polarity magnitude treated as neutral (default: 0.0, strict sign)
    pub sentiment_dead_zone: f64,

    /// Substring marking a media-only message (default: `<Media omitted>`)
    pub media_sentinel: String,

    /// Top-level domains recognized in bare-domain links
    pub link_tlds: Vec<String>,

    /// Spam / toxic keyword lists
    pub keywords: KeywordLists,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            top_users: 5,
            reply_top_users: 10,
            top_emojis: None,
            sentiment_dead_zone: 0.0,
            media_sentinel: MEDIA_OMITTED.to_string(),
            link_tlds: ["com", "org", "net", "in", "gov", "edu", "info"]
                .iter()
                .map(|s| (*s).to_string())
                .collect(),
            keywords: KeywordLists::default(),
        }
    }
}

impl AnalysisConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the size of the top-users ranking.
    #[must_use]
    pub fn with_top_users(mut self, n: usize) -> Self {
        self.top_users = n;
        self
    }

    /// Sets how many of the most active senders get reply-time averages.
    #[must_use]
    pub fn with_reply_top_users(mut self, n: usize) -> Self {
        self.reply_top_users = n;
        self
    }

    /// Limits the emoji frequency table to the `n` most used emojis.
    #[must_use]
    pub fn with_top_emojis(mut self, n: usize) -> Self {
        self.top_emojis = Some(n);
        self
    }

    /// Sets the neutral band around zero polarity.
    #[must_use]
    pub fn with_sentiment_dead_zone(mut self, dead_zone: f64) -> Self {
        self.sentiment_dead_zone = dead_zone;
        self
    }

    /// Sets the media placeholder text.
    #[must_use]
    pub fn with_media_sentinel(mut self, sentinel: impl Into<String>) -> Self {
        self.media_sentinel = sentinel.into();
        self
    }

    /// Replaces the recognized link TLDs.
    #[must_use]
    pub fn with_link_tlds(mut self, tlds: Vec<String>) -> Self {
        self.link_tlds = tlds;
        self
    }

    /// Replaces the spam / toxic keyword lists.
    #[must_use]
    pub fn with_keywords(mut self, keywords: KeywordLists) -> Self {
        self.keywords = keywords;
        self
    }

    /// Checks the configuration for programmer errors.
    ///
    /// # Errors
    ///
    /// Returns [`ChatlensError::InvalidConfig`] naming the first bad field.
    pub fn validate(&self) -> Result<()> {
        if self.top_users == 0 {
            return Err(ChatlensError::invalid_config(
                "top_users",
                "must be at least 1",
            ));
        }
        if self.reply_top_users == 0 {
            return Err(ChatlensError::invalid_config(
                "reply_top_users",
                "must be at least 1",
            ));
        }
        if !self.sentiment_dead_zone.is_finite() || !(0.0..1.0).contains(&self.sentiment_dead_zone)
        {
            return Err(ChatlensError::invalid_config(
                "sentiment_dead_zone",
                format!("expected a value in [0, 1), got {}", self.sentiment_dead_zone),
            ));
        }
        if self.media_sentinel.is_empty() {
            return Err(ChatlensError::invalid_config(
                "media_sentinel",
                "must not be empty",
            ));
        }
        if self.link_tlds.is_empty() || self.link_tlds.iter().any(|t| !is_valid_tld(t)) {
            return Err(ChatlensError::invalid_config(
                "link_tlds",
                "must be a non-empty list of alphanumeric TLDs",
            ));
        }
        if !has_entries(&self.keywords.spam) {
            return Err(ChatlensError::invalid_config(
                "keywords.spam",
                "list must contain at least one non-blank entry",
            ));
        }
        if !has_entries(&self.keywords.toxic) {
            return Err(ChatlensError::invalid_config(
                "keywords.toxic",
                "list must contain at least one non-blank entry",
            ));
        }
        Ok(())
    }
}

fn has_entries(list: &[String]) -> bool {
    list.iter().any(|k| !k.trim().is_empty())
}

fn is_valid_tld(tld: &str) -> bool {
    !tld.is_empty() && tld.chars().all(|c| c.is_ascii_alphanumeric())
}
