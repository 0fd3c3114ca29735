use chrono::{FixedOffset, Timelike};
use serde::Serialize;
use std::fmt;

use crate::models::JournalEntry;

/// Entries needed before the window counts as a consistent writing streak.
pub const STREAK_MIN_ENTRIES: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeOfDay {
    Night,
    Morning,
    Afternoon,
    Evening,
}

impl TimeOfDay {
    /// Canonical order, also used to break ties between buckets.
    pub const ALL: [TimeOfDay; 4] = [
        TimeOfDay::Night,
        TimeOfDay::Morning,
        TimeOfDay::Afternoon,
        TimeOfDay::Evening,
    ];

    pub fn from_hour(hour: u32) -> Self {
        match hour {
            0..=5 => TimeOfDay::Night,
            6..=11 => TimeOfDay::Morning,
            12..=17 => TimeOfDay::Afternoon,
            _ => TimeOfDay::Evening,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TimeOfDay::Night => "night",
            TimeOfDay::Morning => "morning",
            TimeOfDay::Afternoon => "afternoon",
            TimeOfDay::Evening => "evening",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pattern {
    /// Part of the day the user writes in most.
    PeakTimeOfDay(TimeOfDay),
    /// Number of entries in the window, reported once it reaches the streak minimum.
    Consistency(usize),
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Pattern::PeakTimeOfDay(bucket) => {
                write!(f, "Most reflective during {}", bucket.as_str())
            }
            Pattern::Consistency(count) => {
                write!(f, "{} entries this week - great consistency!", count)
            }
        }
    }
}

/// Busiest time-of-day bucket; equal counts resolve to the earlier bucket in
/// `TimeOfDay::ALL`. Entries without a timestamp are not counted.
pub fn peak_time_of_day(entries: &[JournalEntry], offset: FixedOffset) -> Option<TimeOfDay> {
    let mut counts = [0usize; 4];
    for ts in entries.iter().filter_map(|e| e.local_created_at(offset)) {
        counts[TimeOfDay::from_hour(ts.hour()).index()] += 1;
    }

    let mut best: Option<(TimeOfDay, usize)> = None;
    for bucket in TimeOfDay::ALL {
        let count = counts[bucket.index()];
        if count == 0 {
            continue;
        }
        match best {
            Some((_, best_count)) if best_count >= count => {}
            _ => best = Some((bucket, count)),
        }
    }
    best.map(|(bucket, _)| bucket)
}

/// Patterns in emission order: time of day first, then the streak signal.
pub fn detect(entries: &[JournalEntry], offset: FixedOffset) -> Vec<Pattern> {
    let mut patterns = Vec::new();

    if let Some(bucket) = peak_time_of_day(entries, offset) {
        patterns.push(Pattern::PeakTimeOfDay(bucket));
    }

    if entries.len() >= STREAK_MIN_ENTRIES {
        patterns.push(Pattern::Consistency(entries.len()));
    }

    patterns
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn utc() -> FixedOffset {
        FixedOffset::east_opt(0).unwrap()
    }

    fn at_hour(id: i64, hour: u32) -> JournalEntry {
        JournalEntry::new(id, "entry", None, Utc.with_ymd_and_hms(2026, 2, 10, hour, 15, 0).unwrap())
    }

    #[test]
    fn test_bucket_boundaries() {
        assert_eq!(TimeOfDay::from_hour(0), TimeOfDay::Night);
        assert_eq!(TimeOfDay::from_hour(5), TimeOfDay::Night);
        assert_eq!(TimeOfDay::from_hour(6), TimeOfDay::Morning);
        assert_eq!(TimeOfDay::from_hour(11), TimeOfDay::Morning);
        assert_eq!(TimeOfDay::from_hour(12), TimeOfDay::Afternoon);
        assert_eq!(TimeOfDay::from_hour(17), TimeOfDay::Afternoon);
        assert_eq!(TimeOfDay::from_hour(18), TimeOfDay::Evening);
        assert_eq!(TimeOfDay::from_hour(23), TimeOfDay::Evening);
    }

    #[test]
    fn test_three_morning_entries() {
        let entries = vec![at_hour(1, 7), at_hour(2, 9), at_hour(3, 11)];
        let patterns = detect(&entries, utc());
        assert_eq!(
            patterns,
            vec![Pattern::PeakTimeOfDay(TimeOfDay::Morning), Pattern::Consistency(3)]
        );
        assert_eq!(patterns[0].to_string(), "Most reflective during morning");
        assert_eq!(patterns[1].to_string(), "3 entries this week - great consistency!");
    }

    #[test]
    fn test_no_entries_no_patterns() {
        assert!(detect(&[], utc()).is_empty());
    }

    #[test]
    fn test_streak_needs_three_entries() {
        let entries = vec![at_hour(1, 20), at_hour(2, 21)];
        assert_eq!(detect(&entries, utc()), vec![Pattern::PeakTimeOfDay(TimeOfDay::Evening)]);
    }

    #[test]
    fn test_ties_resolve_in_canonical_order() {
        // Evening seen first in entry order, but night precedes it canonically
        let entries = vec![at_hour(1, 20), at_hour(2, 2), at_hour(3, 14), at_hour(4, 3), at_hour(5, 19)];
        assert_eq!(peak_time_of_day(&entries, utc()), Some(TimeOfDay::Night));

        let entries = vec![at_hour(1, 15), at_hour(2, 8)];
        assert_eq!(peak_time_of_day(&entries, utc()), Some(TimeOfDay::Morning));
    }

    #[test]
    fn test_hours_are_read_in_viewer_offset() {
        // 04:00 UTC is 10:00 at +06:00
        let entries = vec![at_hour(1, 4)];
        let plus_six = FixedOffset::east_opt(6 * 3600).unwrap();
        assert_eq!(peak_time_of_day(&entries, utc()), Some(TimeOfDay::Night));
        assert_eq!(peak_time_of_day(&entries, plus_six), Some(TimeOfDay::Morning));
    }

    #[test]
    fn test_entries_without_timestamp_are_not_bucketed() {
        let mut entry = at_hour(1, 9);
        entry.created_at = None;
        assert_eq!(peak_time_of_day(&[entry], utc()), None);
    }
}
