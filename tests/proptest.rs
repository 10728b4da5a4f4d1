//! Property-based tests for chatlens.
//!
//! These tests generate random exports to find edge cases.

use proptest::prelude::*;

use chatlens::analysis::{active_days, activity_heatmap, conversation_starters, top_users};
use chatlens::prelude::*;

/// One header line in either clock, built from fast `select` strategies.
fn arb_line(twelve_hour: bool) -> impl Strategy<Value = String> {
    (
        1u32..=28,
        1u32..=12,
        prop::sample::select(vec!["23", "24", "2023"]),
        0u32..24,
        0u32..60,
        prop::sample::select(vec![
            "Alice",
            "  Bob  ",
            "Иван",
            "+91 98765 43210",
            "🔥User",
            "   ",
        ]),
        prop::sample::select(vec![
            "Hello",
            "Good morning",
            "this is terrible",
            "<Media omitted>",
            "check https://example.com",
            "CLICK HERE now",
            "you fool",
            "time: 10:30",
            "🎉🔥 party",
            "Привет мир",
        ]),
    )
        .prop_map(move |(day, month, year, hour, minute, sender, body)| {
            if twelve_hour {
                let (h12, meridiem) = match hour {
                    0 => (12, "AM"),
                    1..=11 => (hour, "AM"),
                    12 => (12, "PM"),
                    _ => (hour - 12, "PM"),
                };
                format!("{day}/{month}/{year}, {h12}:{minute:02} {meridiem} - {sender}: {body}")
            } else {
                format!("{day:02}/{month:02}/{year}, {hour:02}:{minute:02} - {sender}: {body}")
            }
        })
}

/// A document of header lines mixed with continuation and junk lines.
fn arb_export(twelve_hour: bool) -> impl Strategy<Value = String> {
    let line = prop_oneof![
        6 => arb_line(twelve_hour),
        1 => prop::sample::select(vec![
            String::new(),
            "continued text".to_string(),
            "1/2/23, 10:00 AM - Alice joined".to_string(),
            "garbage ::: line".to_string(),
        ]),
    ];
    prop::collection::vec(line, 0..40).prop_map(|lines| lines.join("\n"))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // ============================================
    // PARSER PROPERTIES
    // ============================================

    /// Parsing arbitrary text never panics
    #[test]
    fn parse_never_panics(input in "\\PC{0,200}") {
        let chat = parse(&input);
        let _ = analyze(&chat, &Scope::Overall);
    }

    /// Parsing the same text twice yields the same records
    #[test]
    fn parse_is_idempotent(text in arb_export(true)) {
        prop_assert_eq!(parse(&text), parse(&text));
    }

    /// Every sender is trimmed and non-empty
    #[test]
    fn senders_trimmed_and_non_empty(text in arb_export(true)) {
        for record in &parse(&text) {
            prop_assert!(!record.sender().is_empty());
            prop_assert_eq!(record.sender(), record.sender().trim());
        }
    }

    /// Derived fields agree with the timestamp
    #[test]
    fn derived_fields_match_timestamp(text in arb_export(false)) {
        use chrono::{Datelike, Timelike};
        for record in &parse(&text) {
            prop_assert_eq!(record.hour, record.timestamp.hour());
            prop_assert_eq!(record.minute, record.timestamp.minute());
            prop_assert_eq!(record.year, record.timestamp.year());
            prop_assert_eq!(record.month, record.timestamp.month());
        }
    }

    /// A single 12-hour line switches the whole document to 12-hour
    #[test]
    fn twelve_hour_line_decides_format(
        text in arb_export(false),
        extra in arb_line(true),
    ) {
        let doc = format!("{text}\n{extra}");
        prop_assert_eq!(parse(&doc).format(), Some(TimeFormat::TwelveHour));
    }

    /// Every line is accounted for exactly once
    #[test]
    fn report_accounts_for_every_line(text in arb_export(true)) {
        let chat = parse(&text);
        let report = chat.report();
        if report.format.is_some() {
            prop_assert_eq!(
                report.records + report.continuation_lines + report.blank_lines + report.total_discarded(),
                report.lines
            );
        }
    }

    // ============================================
    // AGGREGATE PROPERTIES
    // ============================================

    /// Day distribution always has seven entries summing to the record count
    #[test]
    fn active_days_zero_filled(text in arb_export(true)) {
        let chat = parse(&text);
        let days = active_days(chat.records());
        prop_assert_eq!(days.len(), 7);
        prop_assert_eq!(days.iter().map(|d| d.count).sum::<usize>(), chat.len());
    }

    /// Heatmap has 168 cells summing to the record count
    #[test]
    fn heatmap_zero_filled(text in arb_export(false)) {
        let chat = parse(&text);
        let heatmap = activity_heatmap(chat.records());
        prop_assert_eq!(heatmap.rows().iter().flatten().count(), 168);
        prop_assert_eq!(heatmap.total(), chat.len());
    }

    /// Top users are sorted descending and bounded by n
    #[test]
    fn top_users_sorted_and_bounded(text in arb_export(true), n in 1usize..5) {
        let chat = parse(&text);
        let ranked = top_users(chat.records(), n);
        prop_assert!(ranked.len() <= n);
        prop_assert!(ranked.windows(2).all(|w| w[0].count >= w[1].count));
    }

    /// Starters count each calendar day once
    #[test]
    fn starters_sum_to_distinct_days(text in arb_export(true)) {
        let chat = parse(&text);
        let mut dates: Vec<_> = chat.iter().map(MessageRecord::date).collect();
        dates.sort_unstable();
        dates.dedup();
        let total: usize = conversation_starters(chat.records()).iter().map(|c| c.count).sum();
        prop_assert_eq!(total, dates.len());
    }

    /// Sentiment and moderation cover every record except media-only ones
    #[test]
    fn classifications_cover_non_media(text in arb_export(true)) {
        let chat = parse(&text);
        let stats = analyze(&chat, &Scope::Overall);
        let media_only = chat.iter().filter(|r| r.is_media_only("<Media omitted>")).count();
        prop_assert!(media_only <= stats.media_count);
        let non_media = stats.total_messages - media_only;
        prop_assert_eq!(stats.sentiment.total(), non_media);
        prop_assert_eq!(stats.moderation.total(), non_media);
    }

    // ============================================
    // FILTER PROPERTIES
    // ============================================

    /// Filtering never increases record count
    #[test]
    fn filter_never_increases(text in arb_export(true), sender in prop::sample::select(vec!["Alice", "Bob", "Nobody"])) {
        let chat = parse(&text);
        let len = chat.len();
        let filtered = apply_filters(chat.into_records(), &FilterConfig::new().with_sender(sender));
        prop_assert!(filtered.len() <= len);
        prop_assert!(filtered.iter().all(|r| r.sender() == sender));
    }

    /// Scoped analysis counts match a sender filter
    #[test]
    fn scope_matches_filter(text in arb_export(false)) {
        let chat = parse(&text);
        let scoped = analyze(&chat, &Scope::sender("Alice"));
        let filtered = apply_filters(chat.records().to_vec(), &FilterConfig::new().with_sender("Alice"));
        prop_assert_eq!(scoped.total_messages, filtered.len());
    }
}
