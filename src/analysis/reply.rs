//! Reply latency between senders.
//!
//! A *transition* is a pair of adjacent records whose senders differ. It is
//! credited to the replying sender (the later record) with the elapsed time
//! since the previous record. Only the most active senders are considered:
//! records from everyone else are removed before adjacency is evaluated.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use super::activity::top_users;
use crate::record::MessageRecord;

/// Reply statistics for one sender.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplyStat {
    pub sender: String,
    /// Number of transitions credited to this sender.
    pub transitions: usize,
    /// Mean reply time in seconds; `None` when the sender never replied.
    pub average_seconds: Option<f64>,
}

impl ReplyStat {
    pub fn average_minutes(&self) -> Option<f64> {
        self.average_seconds.map(|s| s / 60.0)
    }
}

/// Result of [`reply_time_analysis`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", content = "senders", rename_all = "snake_case")]
pub enum ReplyTimes {
    /// Fewer than two distinct senders or fewer than two transitions.
    #[default]
    NotApplicable,
    /// One entry per top sender, in activity order.
    Computed(Vec<ReplyStat>),
}

impl ReplyTimes {
    pub fn is_applicable(&self) -> bool {
        matches!(self, ReplyTimes::Computed(_))
    }

    /// Average reply time of `sender` in seconds, if computed.
    pub fn average_for(&self, sender: &str) -> Option<f64> {
        match self {
            ReplyTimes::NotApplicable => None,
            ReplyTimes::Computed(stats) => stats
                .iter()
                .find(|s| s.sender == sender)
                .and_then(|s| s.average_seconds),
        }
    }
}

/// Average reply time per sender among the `top_n` most active senders.
pub fn reply_time_analysis(records: &[MessageRecord], top_n: usize) -> ReplyTimes {
    let top: Vec<String> = top_users(records, top_n)
        .into_iter()
        .map(|c| c.label)
        .collect();
    if top.len() < 2 {
        return ReplyTimes::NotApplicable;
    }
    let included: HashSet<&str> = top.iter().map(String::as_str).collect();

    let mut totals: HashMap<&str, (i64, usize)> = HashMap::new();
    let mut transitions = 0usize;
    let mut previous: Option<&MessageRecord> = None;

    for record in records.iter().filter(|r| included.contains(r.sender())) {
        if let Some(prev) = previous.filter(|p| p.sender() != record.sender()) {
            let delta = (record.timestamp - prev.timestamp).num_seconds();
            let entry = totals.entry(record.sender()).or_insert((0, 0));
            entry.0 += delta;
            entry.1 += 1;
            transitions += 1;
        }
        previous = Some(record);
    }

    if transitions < 2 {
        return ReplyTimes::NotApplicable;
    }

    let stats = top
        .iter()
        .map(|sender| {
            let (sum, count) = totals.get(sender.as_str()).copied().unwrap_or((0, 0));
            ReplyStat {
                sender: sender.clone(),
                transitions: count,
                average_seconds: (count > 0).then(|| sum as f64 / count as f64),
            }
        })
        .collect();

    ReplyTimes::Computed(stats)
}
