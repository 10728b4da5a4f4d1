//! Keyword-based spam / toxicity classification.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::{Count, Tally};
use crate::config::KeywordLists;
use crate::record::MessageRecord;

/// Moderation class of one message. Toxic wins over spam.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Classification {
    Toxic,
    Spam,
    Clean,
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Classification::Toxic => "Toxic",
            Classification::Spam => "Spam",
            Classification::Clean => "Clean",
        };
        f.write_str(s)
    }
}

/// Counts per moderation class.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModerationReport {
    pub toxic: usize,
    pub spam: usize,
    pub clean: usize,
}

impl ModerationReport {
    pub fn get(&self, class: Classification) -> usize {
        match class {
            Classification::Toxic => self.toxic,
            Classification::Spam => self.spam,
            Classification::Clean => self.clean,
        }
    }

    pub fn total(&self) -> usize {
        self.toxic + self.spam + self.clean
    }
}

/// Lowercased keyword list split into whole-token words and phrases.
#[derive(Debug, Clone, Default)]
struct KeywordSet {
    words: HashSet<String>,
    phrases: Vec<String>,
}

impl KeywordSet {
    fn from_list(list: &[String]) -> Self {
        let mut set = Self::default();
        for entry in list {
            let entry = entry.trim().to_lowercase();
            if entry.is_empty() {
                continue;
            }
            if entry.contains(char::is_whitespace) {
                if !set.phrases.contains(&entry) {
                    set.phrases.push(entry);
                }
            } else {
                set.words.insert(entry);
            }
        }
        set
    }

    fn matches(&self, message: &Normalized<'_>) -> bool {
        message.tokens.iter().any(|t| self.words.contains(*t))
            || self.phrases.iter().any(|p| message.lower.contains(p.as_str()))
    }
}

/// A message body lowercased once and split into punctuation-trimmed tokens.
struct Normalized<'a> {
    lower: &'a str,
    tokens: Vec<&'a str>,
}

impl<'a> Normalized<'a> {
    fn new(lower: &'a str) -> Self {
        let tokens = lower
            .split_whitespace()
            .map(|t| t.trim_matches(|c: char| !c.is_alphanumeric()))
            .filter(|t| !t.is_empty())
            .collect();
        Self { lower, tokens }
    }
}

/// Classifies messages against spam and toxic keyword lists.
///
/// # Example
///
/// ```rust
/// use chatlens::analysis::{Classification, Moderator};
/// use chatlens::config::KeywordLists;
///
/// let moderator = Moderator::new(&KeywordLists::new(
///     vec!["buy now".into()],
///     vec!["idiot".into()],
/// ));
/// assert_eq!(moderator.classify("BUY NOW!!"), Classification::Spam);
/// assert_eq!(moderator.classify("buy now, idiot"), Classification::Toxic);
/// assert_eq!(moderator.classify("hello"), Classification::Clean);
/// ```
#[derive(Debug, Clone)]
pub struct Moderator {
    toxic: KeywordSet,
    spam: KeywordSet,
}

impl Moderator {
    pub fn new(keywords: &KeywordLists) -> Self {
        Self {
            toxic: KeywordSet::from_list(&keywords.toxic),
            spam: KeywordSet::from_list(&keywords.spam),
        }
    }

    pub fn classify(&self, body: &str) -> Classification {
        let lower = body.to_lowercase();
        let message = Normalized::new(&lower);
        if self.toxic.matches(&message) {
            Classification::Toxic
        } else if self.spam.matches(&message) {
            Classification::Spam
        } else {
            Classification::Clean
        }
    }

    /// Calls `hit` once per toxic keyword occurrence in `body`.
    fn toxic_hits<'s>(&'s self, body: &str, mut hit: impl FnMut(&'s str)) {
        let lower = body.to_lowercase();
        let message = Normalized::new(&lower);
        for token in &message.tokens {
            if let Some(word) = self.toxic.words.get(*token) {
                hit(word.as_str());
            }
        }
        for phrase in &self.toxic.phrases {
            for _ in lower.matches(phrase.as_str()) {
                hit(phrase.as_str());
            }
        }
    }
}

/// Classification counts, skipping media-only messages.
pub fn moderation_report(
    records: &[MessageRecord],
    moderator: &Moderator,
    sentinel: &str,
) -> ModerationReport {
    let mut report = ModerationReport::default();
    for record in records.iter().filter(|r| !r.is_media_only(sentinel)) {
        match moderator.classify(&record.body) {
            Classification::Toxic => report.toxic += 1,
            Classification::Spam => report.spam += 1,
            Classification::Clean => report.clean += 1,
        }
    }
    report
}

/// Occurrences of each toxic keyword, descending. Media-only messages are skipped.
pub fn offensive_words(
    records: &[MessageRecord],
    moderator: &Moderator,
    sentinel: &str,
) -> Vec<Count> {
    let mut tally = Tally::new();
    for record in records.iter().filter(|r| !r.is_media_only(sentinel)) {
        moderator.toxic_hits(&record.body, |word| tally.add(word));
    }
    tally.into_ranked(None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn record(body: &str) -> MessageRecord {
        let ts = NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        MessageRecord::new(ts, "Alice", body).unwrap()
    }

    fn moderator() -> Moderator {
        Moderator::new(&KeywordLists::new(
            vec!["click here".into(), "lottery".into()],
            vec!["idiot".into(), "shut up".into()],
        ))
    }

    #[test]
    fn test_classify() {
        let m = moderator();
        assert_eq!(m.classify("You won the LOTTERY."), Classification::Spam);
        assert_eq!(m.classify("please Click Here"), Classification::Spam);
        assert_eq!(m.classify("you idiot!"), Classification::Toxic);
        assert_eq!(m.classify("just chatting"), Classification::Clean);
        assert_eq!(m.classify(""), Classification::Clean);
    }

    #[test]
    fn test_toxic_takes_precedence() {
        assert_eq!(
            moderator().classify("click here idiot"),
            Classification::Toxic
        );
    }

    #[test]
    fn test_single_words_match_whole_tokens() {
        let m = moderator();
        assert_eq!(m.classify("idiotic plan"), Classification::Clean);
        assert_eq!(m.classify("lotteryticket"), Classification::Clean);
    }

    #[test]
    fn test_default_lists_short_words_not_substrings() {
        let m = Moderator::new(&KeywordLists::default());
        // "mc" is a keyword, "mcdonalds" is not
        assert_eq!(m.classify("lunch at mcdonalds"), Classification::Clean);
        assert_eq!(m.classify("CLICK HERE to claim"), Classification::Spam);
    }

    #[test]
    fn test_report_skips_media() {
        let records = vec![
            record("idiot"),
            record("<Media omitted>"),
            record("lottery time"),
            record("hi"),
        ];
        let report = moderation_report(&records, &moderator(), "<Media omitted>");
        assert_eq!(report.toxic, 1);
        assert_eq!(report.spam, 1);
        assert_eq!(report.clean, 1);
        assert_eq!(report.total(), 3);
        assert_eq!(report.get(Classification::Clean), 1);
    }

    #[test]
    fn test_offensive_words_counts_occurrences() {
        let records = vec![
            record("shut up, idiot"),
            record("Idiot! idiot"),
            record("SHUT UP"),
            record("<Media omitted>"),
        ];
        let words = offensive_words(&records, &moderator(), "<Media omitted>");
        assert_eq!(words, vec![Count::new("idiot", 3), Count::new("shut up", 2)]);
    }

    #[test]
    fn test_captioned_media_is_classified() {
        let records = vec![
            record("<Media omitted> idiot"),
            record("<Media omitted>\nlottery time"),
            record("  <Media omitted>  "),
        ];
        let report = moderation_report(&records, &moderator(), "<Media omitted>");
        assert_eq!(report.toxic, 1);
        assert_eq!(report.spam, 1);
        assert_eq!(report.total(), 2);

        let words = offensive_words(&records, &moderator(), "<Media omitted>");
        assert_eq!(words, vec![Count::new("idiot", 1)]);
    }

    #[test]
    fn test_offensive_words_empty() {
        assert!(offensive_words(&[], &moderator(), "<Media omitted>").is_empty());
    }
}
