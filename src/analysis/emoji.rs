//! Emoji usage.
//!
//! Bodies are split into extended grapheme clusters, so a ZWJ family, a flag
//! or a skin-toned hand counts as one glyph. Each cluster is looked up in the
//! Unicode emoji database and counted under its canonical form.

use unicode_segmentation::UnicodeSegmentation;

use super::{Count, Tally};
use crate::record::MessageRecord;

/// Canonical emoji for a grapheme cluster, if it is one.
pub fn as_emoji(grapheme: &str) -> Option<&'static str> {
    emojis::get(grapheme).map(emojis::Emoji::as_str)
}

/// Emojis in `text`, in order of appearance.
pub fn emojis_in(text: &str) -> impl Iterator<Item = &'static str> + '_ {
    text.graphemes(true).filter_map(as_emoji)
}

/// Emoji counts, descending, truncated to `limit` when given.
pub fn emoji_frequency(records: &[MessageRecord], limit: Option<usize>) -> Vec<Count> {
    let mut tally = Tally::new();
    for record in records {
        for emoji in emojis_in(&record.body) {
            tally.add(emoji);
        }
    }
    tally.into_ranked(limit)
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

    #[test]
    fn test_detects_emojis() {
        let found: Vec<&str> = emojis_in("Hello 😀 world 🎉!").collect();
        assert_eq!(found, vec!["😀", "🎉"]);
        assert_eq!(emojis_in("plain text").count(), 0);
    }

    #[test]
    fn test_multi_codepoint_glyphs_count_once() {
        let found: Vec<&str> = emojis_in("🇮🇳👨‍👩‍👧").collect();
        assert_eq!(found, vec!["🇮🇳", "👨‍👩‍👧"]);
    }

    #[test]
    fn test_frequency_descending() {
        let records = vec![record("😀😀 👍"), record("👍 😀"), record("🎉")];
        let freq = emoji_frequency(&records, None);
        assert_eq!(
            freq,
            vec![Count::new("😀", 3), Count::new("👍", 2), Count::new("🎉", 1)]
        );
    }

    #[test]
    fn test_frequency_limit() {
        let records = vec![record("😀😀 👍 🎉")];
        assert_eq!(emoji_frequency(&records, Some(1)), vec![Count::new("😀", 2)]);
        assert!(emoji_frequency(&[], None).is_empty());
    }
}
