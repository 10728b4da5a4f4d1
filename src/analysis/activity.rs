//! Who talks, when.
//!
//! Distributions over the fixed day set and the 7x24 heatmap are zero-filled:
//! every day and every (day, hour) cell is present regardless of the data.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{Count, Tally};
use crate::record::{DayOfWeek, MessageRecord};

/// Message count and share for one day of the week.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DayActivity {
    pub day: DayOfWeek,
    pub count: usize,
    /// Share of all messages in percent, rounded to 2 decimals.
    pub percentage: f64,
}

/// Messages per (day of week, hour of day).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityHeatmap {
    cells: [[usize; 24]; 7],
}

impl Default for ActivityHeatmap {
    fn default() -> Self {
        Self {
            cells: [[0; 24]; 7],
        }
    }
}

impl ActivityHeatmap {
    /// Count for one cell. Hours outside 0-23 read as zero.
    pub fn get(&self, day: DayOfWeek, hour: u32) -> usize {
        self.cells[day.index()]
            .get(hour as usize)
            .copied()
            .unwrap_or(0)
    }

    /// The 24 hourly counts of one day.
    pub fn row(&self, day: DayOfWeek) -> &[usize; 24] {
        &self.cells[day.index()]
    }

    /// All rows, Monday first.
    pub fn rows(&self) -> &[[usize; 24]; 7] {
        &self.cells
    }

    pub fn total(&self) -> usize {
        self.cells.iter().flatten().sum()
    }

    /// Busiest cell; the earliest day and hour win ties. `None` when empty.
    pub fn peak(&self) -> Option<(DayOfWeek, u32, usize)> {
        let mut peak: Option<(DayOfWeek, u32, usize)> = None;
        for day in DayOfWeek::ALL {
            for (hour, &count) in self.row(day).iter().enumerate() {
                if count > 0 && peak.is_none_or(|(_, _, best)| count > best) {
                    peak = Some((day, hour as u32, count));
                }
            }
        }
        peak
    }
}

/// Messages in one calendar month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthCount {
    pub year: i32,
    pub month: u32,
    pub month_name: String,
    pub count: usize,
}

impl MonthCount {
    /// `"February-2023"` style label.
    pub fn label(&self) -> String {
        format!("{}-{}", self.month_name, self.year)
    }
}

/// Messages on one calendar date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateCount {
    pub date: NaiveDate,
    pub count: usize,
}

/// Senders ranked by message count, truncated to `n`.
pub fn top_users(records: &[MessageRecord], n: usize) -> Vec<Count> {
    let mut tally = Tally::new();
    for record in records {
        tally.add(record.sender());
    }
    tally.into_ranked(Some(n))
}

/// How often each sender opened a calendar day.
///
/// The opener of a date is the sender of its earliest-timestamp record, the
/// first in document order on equal timestamps.
pub fn conversation_starters(records: &[MessageRecord]) -> Vec<Count> {
    let mut openers: BTreeMap<NaiveDate, &MessageRecord> = BTreeMap::new();
    for record in records {
        openers
            .entry(record.date())
            .and_modify(|first| {
                if record.timestamp < first.timestamp {
                    *first = record;
                }
            })
            .or_insert(record);
    }

    let mut tally = Tally::new();
    for record in openers.values() {
        tally.add(record.sender());
    }
    tally.into_ranked(None)
}

/// Per-day counts, Monday to Sunday, with percentages.
pub fn active_days(records: &[MessageRecord]) -> Vec<DayActivity> {
    let mut counts = [0usize; 7];
    for record in records {
        counts[record.day_of_week.index()] += 1;
    }

    let total = records.len();
    DayOfWeek::ALL
        .iter()
        .map(|&day| {
            let count = counts[day.index()];
            let percentage = if total == 0 {
                0.0
            } else {
                round2(count as f64 * 100.0 / total as f64)
            };
            DayActivity {
                day,
                count,
                percentage,
            }
        })
        .collect()
}

pub fn activity_heatmap(records: &[MessageRecord]) -> ActivityHeatmap {
    let mut heatmap = ActivityHeatmap::default();
    for record in records {
        if let Some(cell) = heatmap.cells[record.day_of_week.index()].get_mut(record.hour as usize) {
            *cell += 1;
        }
    }
    heatmap
}

/// Messages per month, chronological.
pub fn monthly_timeline(records: &[MessageRecord]) -> Vec<MonthCount> {
    let mut months: BTreeMap<(i32, u32), (&str, usize)> = BTreeMap::new();
    for record in records {
        months
            .entry((record.year, record.month))
            .or_insert((record.month_name.as_str(), 0))
            .1 += 1;
    }
    months
        .into_iter()
        .map(|((year, month), (name, count))| MonthCount {
            year,
            month,
            month_name: name.to_string(),
            count,
        })
        .collect()
}

/// Messages per calendar date, chronological.
pub fn daily_timeline(records: &[MessageRecord]) -> Vec<DateCount> {
    let mut days: BTreeMap<NaiveDate, usize> = BTreeMap::new();
    for record in records {
        *days.entry(record.date()).or_insert(0) += 1;
    }
    days.into_iter()
        .map(|(date, count)| DateCount { date, count })
        .collect()
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;

    fn ts(d: u32, h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, d)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    fn record(sender: &str, at: NaiveDateTime) -> MessageRecord {
        MessageRecord::new(at, sender, "msg").unwrap()
    }

    // ============================================================================
    // top_users
    // ============================================================================

    #[test]
    fn test_top_users_ranked_and_truncated() {
        let records = vec![
            record("Carol", ts(1, 9, 0)),
            record("Bob", ts(1, 9, 1)),
            record("Bob", ts(1, 9, 2)),
            record("Alice", ts(1, 9, 3)),
            record("Alice", ts(1, 9, 4)),
        ];
        assert_eq!(
            top_users(&records, 2),
            vec![Count::new("Bob", 2), Count::new("Alice", 2)]
        );
        assert_eq!(top_users(&records, 10).len(), 3);
        assert!(top_users(&[], 5).is_empty());
    }

    // ============================================================================
    // conversation_starters
    // ============================================================================

    #[test]
    fn test_starters_same_opener_twice() {
        let records = vec![
            record("X", ts(1, 8, 0)),
            record("Y", ts(1, 9, 0)),
            record("X", ts(2, 7, 0)),
            record("Y", ts(2, 7, 30)),
        ];
        assert_eq!(conversation_starters(&records), vec![Count::new("X", 2)]);
    }

    #[test]
    fn test_starters_use_earliest_timestamp_not_document_order() {
        let records = vec![
            record("Late", ts(1, 10, 0)),
            record("Early", ts(1, 6, 0)),
            record("Other", ts(2, 6, 0)),
        ];
        assert_eq!(
            conversation_starters(&records),
            vec![Count::new("Early", 1), Count::new("Other", 1)]
        );
    }

    #[test]
    fn test_starters_tie_keeps_first_record() {
        let records = vec![record("A", ts(1, 6, 0)), record("B", ts(1, 6, 0))];
        assert_eq!(conversation_starters(&records), vec![Count::new("A", 1)]);
    }

    // ============================================================================
    // active_days / heatmap
    // ============================================================================

    #[test]
    fn test_active_days_zero_filled() {
        // 2024-01-01 is a Monday
        let records = vec![
            record("A", ts(1, 9, 0)),
            record("A", ts(1, 10, 0)),
            record("A", ts(3, 9, 0)),
        ];
        let days = active_days(&records);
        assert_eq!(days.len(), 7);
        assert_eq!(days[0].day, DayOfWeek::Monday);
        assert_eq!(days[0].count, 2);
        assert!((days[0].percentage - 66.67).abs() < 1e-9);
        assert_eq!(days[2].count, 1);
        assert!((days[2].percentage - 33.33).abs() < 1e-9);
        assert_eq!(days[6].day, DayOfWeek::Sunday);
        assert_eq!(days[6].count, 0);
    }

    #[test]
    fn test_active_days_empty() {
        let days = active_days(&[]);
        assert_eq!(days.len(), 7);
        assert!(days.iter().all(|d| d.count == 0 && d.percentage == 0.0));
    }

    #[test]
    fn test_heatmap() {
        let records = vec![
            record("A", ts(1, 23, 0)),
            record("A", ts(1, 23, 59)),
            record("A", ts(7, 0, 0)),
        ];
        let heatmap = activity_heatmap(&records);
        assert_eq!(heatmap.get(DayOfWeek::Monday, 23), 2);
        assert_eq!(heatmap.get(DayOfWeek::Sunday, 0), 1);
        assert_eq!(heatmap.get(DayOfWeek::Friday, 12), 0);
        assert_eq!(heatmap.get(DayOfWeek::Friday, 99), 0);
        assert_eq!(heatmap.total(), 3);
        assert_eq!(heatmap.rows().len(), 7);
        assert_eq!(heatmap.row(DayOfWeek::Monday).len(), 24);
        assert_eq!(heatmap.peak(), Some((DayOfWeek::Monday, 23, 2)));
    }

    #[test]
    fn test_heatmap_empty() {
        let heatmap = activity_heatmap(&[]);
        assert_eq!(heatmap.total(), 0);
        assert_eq!(heatmap.peak(), None);
    }

    // ============================================================================
    // timelines
    // ============================================================================

    #[test]
    fn test_monthly_timeline_chronological() {
        let feb = NaiveDate::from_ymd_opt(2023, 2, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        let records = vec![
            record("A", ts(5, 0, 0)),
            record("A", feb),
            record("A", ts(6, 0, 0)),
        ];
        let months = monthly_timeline(&records);
        assert_eq!(months.len(), 2);
        assert_eq!(months[0].label(), "February-2023");
        assert_eq!(months[0].count, 1);
        assert_eq!(months[1].label(), "January-2024");
        assert_eq!(months[1].count, 2);
    }

    #[test]
    fn test_daily_timeline() {
        let records = vec![
            record("A", ts(2, 0, 0)),
            record("A", ts(1, 0, 0)),
            record("A", ts(2, 5, 0)),
        ];
        let days = daily_timeline(&records);
        assert_eq!(days.len(), 2);
        assert_eq!(days[0].date, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        assert_eq!(days[1].count, 2);
    }
}
