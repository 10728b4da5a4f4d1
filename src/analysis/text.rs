//! Message-level counters: words, media, links, extremes.

use std::collections::HashSet;

use chrono::NaiveDateTime;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::record::MessageRecord;

static SCHEME_OR_WWW: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)https?://\S+|www\.\S+").expect("valid link pattern"));

static BARE_DOMAIN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b[a-zA-Z0-9.-]+\.[a-zA-Z0-9]+\b").expect("valid domain pattern"));

/// Recognizes URLs in message bodies.
///
/// A body contains a link when it has a scheme-prefixed URL, a `www.` host,
/// or a bare dotted token whose label after some dot is an allowed TLD
/// (`example.com`, `docs.rs.in`).
#[derive(Debug, Clone)]
pub struct LinkMatcher {
    tlds: HashSet<String>,
}

impl LinkMatcher {
    pub fn new<S: AsRef<str>>(tlds: &[S]) -> Self {
        Self {
            tlds: tlds.iter().map(|t| t.as_ref().to_lowercase()).collect(),
        }
    }

    pub fn is_match(&self, body: &str) -> bool {
        if SCHEME_OR_WWW.is_match(body) {
            return true;
        }
        BARE_DOMAIN.find_iter(body).any(|m| {
            m.as_str()
                .split('.')
                .skip(1)
                .any(|label| self.tlds.contains(&label.to_lowercase()))
        })
    }
}

/// Whitespace-delimited tokens across all bodies.
///
/// Media placeholders count like any other text.
pub fn word_count(records: &[MessageRecord]) -> usize {
    records.iter().map(|r| r.body.split_whitespace().count()).sum()
}

/// Records whose body contains `sentinel`.
pub fn media_count(records: &[MessageRecord], sentinel: &str) -> usize {
    records.iter().filter(|r| r.is_media(sentinel)).count()
}

/// Records containing at least one link.
pub fn link_count(records: &[MessageRecord], links: &LinkMatcher) -> usize {
    records.iter().filter(|r| links.is_match(&r.body)).count()
}

/// Record with the most characters; the earliest wins ties.
pub fn longest_message(records: &[MessageRecord]) -> Option<&MessageRecord> {
    let mut best: Option<(&MessageRecord, usize)> = None;
    for record in records {
        let len = record.body.chars().count();
        if best.is_none_or(|(_, best_len)| len > best_len) {
            best = Some((record, len));
        }
    }
    best.map(|(record, _)| record)
}

/// Timestamp of the first record in document order.
pub fn first_message_date(records: &[MessageRecord]) -> Option<NaiveDateTime> {
    records.first().map(|r| r.timestamp)
}

/// Timestamp of the last record in document order.
pub fn last_message_date(records: &[MessageRecord]) -> Option<NaiveDateTime> {
    records.last().map(|r| r.timestamp)
}

/// Formats an optional date for display, `"N/A"` when absent.
pub fn format_date_or_na(date: Option<NaiveDateTime>) -> String {
    date.map_or_else(
        || "N/A".to_string(),
        |d| d.format("%Y-%m-%d %H:%M").to_string(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn record(minute: u32, body: &str) -> MessageRecord {
        let ts = NaiveDate::from_ymd_opt(2024, 3, 10)
            .unwrap()
            .and_hms_opt(12, minute, 0)
            .unwrap();
        MessageRecord::new(ts, "Alice", body).unwrap()
    }

    fn default_links() -> LinkMatcher {
        LinkMatcher::new(&["com", "org", "net", "in", "gov", "edu", "info"])
    }

    #[test]
    fn test_word_count() {
        let records = vec![record(0, "hello  world"), record(1, "one\ntwo three")];
        assert_eq!(word_count(&records), 5);
        assert_eq!(word_count(&[]), 0);
    }

    #[test]
    fn test_media_count() {
        let records = vec![record(0, "<Media omitted>"), record(1, "text")];
        assert_eq!(media_count(&records, "<Media omitted>"), 1);
    }

    #[test]
    fn test_link_detection() {
        let links = default_links();
        assert!(links.is_match("see https://rust-lang.org/learn"));
        assert!(links.is_match("HTTP://EXAMPLE.TEST"));
        assert!(links.is_match("www.something.xyz"));
        assert!(links.is_match("go to example.com now"));
        assert!(links.is_match("mirror.gov.in"));
        assert!(!links.is_match("file.txt and version 1.2.3"));
        assert!(!links.is_match("no links here."));
    }

    #[test]
    fn test_link_count_counts_records() {
        let records = vec![
            record(0, "a.com b.org"),
            record(1, "plain"),
            record(2, "https://x.io"),
        ];
        assert_eq!(link_count(&records, &default_links()), 2);
    }

    #[test]
    fn test_custom_tlds() {
        let links = LinkMatcher::new(&["io"]);
        assert!(links.is_match("crates.io"));
        assert!(!links.is_match("example.com"));
    }

    #[test]
    fn test_longest_message_first_on_ties() {
        let records = vec![record(0, "abc"), record(1, "xyz"), record(2, "ab")];
        assert_eq!(longest_message(&records).unwrap().minute, 0);
        assert!(longest_message(&[]).is_none());
    }

    #[test]
    fn test_longest_message_counts_chars() {
        let records = vec![record(0, "ééé"), record(1, "abcd")];
        assert_eq!(longest_message(&records).unwrap().body, "abcd");
    }

    #[test]
    fn test_first_last_document_order() {
        let records = vec![record(30, "late"), record(5, "early")];
        assert_eq!(first_message_date(&records).unwrap().format("%M").to_string(), "30");
        assert_eq!(last_message_date(&records).unwrap().format("%M").to_string(), "05");
    }

    #[test]
    fn test_format_date_or_na() {
        assert_eq!(format_date_or_na(None), "N/A");
        let r = record(7, "x");
        assert_eq!(format_date_or_na(Some(r.timestamp)), "2024-03-10 12:07");
    }
}
