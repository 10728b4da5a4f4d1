//! Lexicon-based sentiment scoring.
//!
//! Each token is looked up in an embedded AFINN-style table of word scores
//! (-5 to +5). A negation word flips the sign of the next scored word. The
//! message polarity is the mean score scaled to [-1, 1].

use std::collections::HashMap;
use std::fmt;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::record::MessageRecord;

const LEXICON_SOURCE: &str = include_str!("afinn.tsv");

static LEXICON: Lazy<HashMap<&'static str, i8>> = Lazy::new(|| {
    LEXICON_SOURCE
        .lines()
        .filter_map(|line| {
            let (word, score) = line.split_once('\t')?;
            Some((word.trim(), score.trim().parse::<i8>().ok()?))
        })
        .collect()
});

const NEGATIONS: &[&str] = &[
    "not", "no", "never", "don't", "dont", "doesn't", "doesnt", "didn't", "didnt", "isn't",
    "isnt", "wasn't", "wasnt", "aren't", "arent", "can't", "cant", "won't", "wont", "nothing",
    "hardly",
];

const MAX_SCORE: f64 = 5.0;

/// Three-way sentiment class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sentiment {
    Positive,
    Neutral,
    Negative,
}

impl Sentiment {
    /// Classifies a polarity; values within `dead_zone` of zero are neutral.
    pub fn from_polarity(polarity: f64, dead_zone: f64) -> Self {
        if polarity > dead_zone {
            Sentiment::Positive
        } else if polarity < -dead_zone {
            Sentiment::Negative
        } else {
            Sentiment::Neutral
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Sentiment::Positive => "Positive",
            Sentiment::Neutral => "Neutral",
            Sentiment::Negative => "Negative",
        };
        f.write_str(s)
    }
}

/// Counts per sentiment class. All three keys are always present.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentimentDistribution {
    pub positive: usize,
    pub neutral: usize,
    pub negative: usize,
}

impl SentimentDistribution {
    pub fn get(&self, sentiment: Sentiment) -> usize {
        match sentiment {
            Sentiment::Positive => self.positive,
            Sentiment::Neutral => self.neutral,
            Sentiment::Negative => self.negative,
        }
    }

    pub fn total(&self) -> usize {
        self.positive + self.neutral + self.negative
    }

    fn record(&mut self, sentiment: Sentiment) {
        match sentiment {
            Sentiment::Positive => self.positive += 1,
            Sentiment::Neutral => self.neutral += 1,
            Sentiment::Negative => self.negative += 1,
        }
    }
}

/// Lowercased word tokens with curly apostrophes normalized.
fn tokens(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| !(c.is_alphanumeric() || c == '\'' || c == '\u{2019}'))
        .map(|t| t.trim_matches(|c| c == '\'' || c == '\u{2019}'))
        .filter(|t| !t.is_empty())
        .map(|t| t.to_lowercase().replace('\u{2019}', "'"))
}

/// Polarity of a text in [-1, 1]; `0.0` when no word is in the lexicon.
pub fn polarity(text: &str) -> f64 {
    let mut sum = 0i32;
    let mut scored = 0u32;
    let mut negate = false;

    for token in tokens(text) {
        if NEGATIONS.contains(&token.as_str()) {
            negate = true;
            continue;
        }
        if let Some(&score) = LEXICON.get(token.as_str()) {
            let score = i32::from(score);
            sum += if negate { -score } else { score };
            scored += 1;
            negate = false;
        }
    }

    if scored == 0 {
        return 0.0;
    }
    (f64::from(sum) / (MAX_SCORE * f64::from(scored))).clamp(-1.0, 1.0)
}

/// Sentiment class of a single text.
pub fn classify(text: &str, dead_zone: f64) -> Sentiment {
    Sentiment::from_polarity(polarity(text), dead_zone)
}

/// Tallies sentiment over records, skipping media-only messages.
pub fn sentiment_distribution(
    records: &[MessageRecord],
    sentinel: &str,
    dead_zone: f64,
) -> SentimentDistribution {
    let mut distribution = SentimentDistribution::default();
    for record in records.iter().filter(|r| !r.is_media_only(sentinel)) {
        distribution.record(classify(&record.body, dead_zone));
    }
    distribution
}
