use chrono::{DateTime, Duration, FixedOffset, Offset, Utc};
use std::cmp::Reverse;

use crate::models::{InsightsRecord, InsightsReport, JournalEntry, Mood, MoodAggregate};
use crate::services::{mood_scorer, pattern_detector, signal_miner, weekly_chart};

/// Length of the "this week" window.
pub const RECENCY_DAYS: i64 = 7;
pub const TOP_MOODS: usize = 3;

/// Derives the weekly insights report from a user's journal history.
#[derive(Debug, Clone, Copy)]
pub struct InsightsAggregator {
    offset: FixedOffset,
}

impl Default for InsightsAggregator {
    fn default() -> Self {
        Self {
            offset: Utc.fix(),
        }
    }
}

impl InsightsAggregator {
    /// `offset` decides which calendar day and hour an entry belongs to.
    pub fn new(offset: FixedOffset) -> Self {
        Self { offset }
    }

    pub fn offset(&self) -> FixedOffset {
        self.offset
    }

    pub fn generate(
        &self,
        entries: &[JournalEntry],
        mood_aggregate: &MoodAggregate,
        now: DateTime<Utc>,
    ) -> InsightsReport {
        let history = newest_first(entries);
        let window = recent_window(&history, now);

        let patterns = pattern_detector::detect(&window, self.offset)
            .into_iter()
            .map(|p| p.to_string())
            .collect();

        let insights = InsightsRecord {
            top_moods: top_moods(&window),
            patterns,
            // Mined over the whole history, not just this week
            triggers: signal_miner::triggers(&history),
            boosters: signal_miner::boosters(&history),
            total_entries: window.len(),
            average_mood_score: mood_scorer::average(&window),
        };

        let today = now.with_timezone(&self.offset).date_naive();
        let week = weekly_chart::build(&window, today, self.offset);

        tracing::debug!(
            history = history.len(),
            recent = insights.total_entries,
            aggregate_moods = mood_aggregate.total(),
            patterns = insights.patterns.len(),
            "Generated insights"
        );

        InsightsReport {
            insights,
            week,
            generated_at: now,
        }
    }
}

/// Copy of the history ordered newest first, which is the order ties are
/// resolved in. Entries without a timestamp sort last.
fn newest_first(entries: &[JournalEntry]) -> Vec<JournalEntry> {
    let mut sorted = entries.to_vec();
    sorted.sort_by_key(|e| Reverse(e.created_at));
    sorted
}

/// Entries created at or after `now - 7 days`. Entries dated after `now`
/// are kept; entries without a timestamp are not.
pub fn recent_window(entries: &[JournalEntry], now: DateTime<Utc>) -> Vec<JournalEntry> {
    let since = now - Duration::days(RECENCY_DAYS);
    entries
        .iter()
        .filter(|e| e.created_at.is_some_and(|ts| ts >= since))
        .cloned()
        .collect()
}

pub fn top_moods(entries: &[JournalEntry]) -> Vec<(Mood, usize)> {
    let mut ranked = signal_miner::rank_by_frequency(entries.iter().filter_map(|e| e.mood_tag));
    ranked.truncate(TOP_MOODS);
    ranked
}
