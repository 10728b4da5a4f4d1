//! Plain-text summary.

use std::fmt::Write;

use crate::analysis::{AggregateStatistics, ReplyTimes, format_date_or_na};

const RULE: &str = "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━";

/// Renders statistics as a human-readable summary.
pub fn render_text(stats: &AggregateStatistics) -> String {
    let mut out = String::new();
    // Writing to a String cannot fail
    let _ = write_summary(&mut out, stats);
    out
}

fn write_summary(out: &mut String, stats: &AggregateStatistics) -> std::fmt::Result {
    writeln!(out, "📊 Chat statistics: {}", stats.scope.label())?;
    writeln!(out, "{RULE}")?;
    writeln!(out, "💬 Messages:  {}", stats.total_messages)?;
    writeln!(out, "📝 Words:     {}", stats.word_count)?;
    writeln!(out, "🖼️  Media:     {}", stats.media_count)?;
    writeln!(out, "🔗 Links:     {}", stats.link_count)?;
    writeln!(out, "📅 First:     {}", format_date_or_na(stats.first_message_date))?;
    writeln!(out, "📅 Last:      {}", format_date_or_na(stats.last_message_date))?;
    if let Some(longest) = &stats.longest_message {
        writeln!(out, "📏 Longest:   {} chars", longest.chars().count())?;
    }

    writeln!(out)?;
    writeln!(out, "👥 Top users:")?;
    for user in &stats.top_users {
        writeln!(out, "   {:<20} {}", user.label, user.count)?;
    }

    writeln!(out)?;
    writeln!(
        out,
        "🙂 Sentiment: {} positive, {} neutral, {} negative",
        stats.sentiment.positive, stats.sentiment.neutral, stats.sentiment.negative
    )?;
    writeln!(
        out,
        "🛡️  Moderation: {} toxic, {} spam, {} clean",
        stats.moderation.toxic, stats.moderation.spam, stats.moderation.clean
    )?;

    writeln!(out)?;
    writeln!(out, "📆 Active days:")?;
    for day in &stats.active_days {
        writeln!(
            out,
            "   {:<10} {:>6} ({:.2}%)",
            day.day.name(),
            day.count,
            day.percentage
        )?;
    }
    if let Some((day, hour, count)) = stats.activity_heatmap.peak() {
        writeln!(out, "   Busiest hour: {day} {hour:02}:00 ({count} messages)")?;
    }

    if !stats.conversation_starters.is_empty() {
        writeln!(out)?;
        writeln!(out, "🚀 Conversation starters:")?;
        for starter in &stats.conversation_starters {
            writeln!(out, "   {:<20} {}", starter.label, starter.count)?;
        }
    }

    writeln!(out)?;
    match &stats.reply_times {
        ReplyTimes::NotApplicable => writeln!(out, "⏱️  Reply times: N/A")?,
        ReplyTimes::Computed(replies) => {
            writeln!(out, "⏱️  Reply times:")?;
            for reply in replies {
                match reply.average_minutes() {
                    Some(minutes) => writeln!(out, "   {:<20} {minutes:.1} min", reply.sender)?,
                    None => writeln!(out, "   {:<20} N/A", reply.sender)?,
                }
            }
        }
    }

    if !stats.emojis.is_empty() {
        writeln!(out)?;
        let emojis: Vec<String> = stats
            .emojis
            .iter()
            .map(|e| format!("{} {}", e.label, e.count))
            .collect();
        writeln!(out, "😀 Emojis: {}", emojis.join(", "))?;
    }

    if !stats.offensive_words.is_empty() {
        let words: Vec<String> = stats
            .offensive_words
            .iter()
            .map(|w| format!("{} {}", w.label, w.count))
            .collect();
        writeln!(out, "🤬 Offensive words: {}", words.join(", "))?;
    }

    Ok(())
}
