use chrono::{DateTime, Duration, FixedOffset, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::journal_entry::JournalEntry;

/// Days of history folded into an aggregate built from raw entries.
pub const AGGREGATE_WINDOW_DAYS: i64 = 30;

/// Snapshot of mood activity: one label per day plus label frequencies.
///
/// Labels are kept as the raw strings the store produced, so counts for
/// labels this build does not know still contribute to totals.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MoodAggregate {
    #[serde(default)]
    pub daily_moods: BTreeMap<NaiveDate, String>,
    #[serde(default)]
    pub mood_insights: BTreeMap<String, u32>,
}

impl MoodAggregate {
    /// Folds the last 30 days of tagged entries into an aggregate. The
    /// label recorded for a day is the one from that day's latest entry.
    pub fn from_entries(entries: &[JournalEntry], now: DateTime<Utc>, offset: FixedOffset) -> Self {
        let labels = entries
            .iter()
            .filter_map(|e| Some((e.created_at?, e.mood_tag?.as_str())));
        Self::from_labels(labels, now, offset)
    }

    /// Same folding over `(created_at, label)` pairs as stored, without
    /// interpreting the labels. Unknown or oddly cased labels are counted
    /// verbatim.
    pub fn from_labels<'a, I>(labels: I, now: DateTime<Utc>, offset: FixedOffset) -> Self
    where
        I: IntoIterator<Item = (DateTime<Utc>, &'a str)>,
    {
        let since = now - Duration::days(AGGREGATE_WINDOW_DAYS);
        let mut latest: BTreeMap<NaiveDate, (DateTime<Utc>, String)> = BTreeMap::new();
        let mut mood_insights: BTreeMap<String, u32> = BTreeMap::new();

        for (created_at, label) in labels {
            if created_at < since {
                continue;
            }

            *mood_insights.entry(label.to_string()).or_insert(0) += 1;

            let date = created_at.with_timezone(&offset).date_naive();
            let newer = latest
                .get(&date)
                .map_or(true, |(seen_at, _)| created_at > *seen_at);
            if newer {
                latest.insert(date, (created_at, label.to_string()));
            }
        }

        Self {
            daily_moods: latest
                .into_iter()
                .map(|(date, (_, label))| (date, label))
                .collect(),
            mood_insights,
        }
    }

    pub fn total(&self) -> u64 {
        self.mood_insights.values().map(|&c| c as u64).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.daily_moods.is_empty() && self.mood_insights.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::mood::Mood;
    use chrono::TimeZone;

    fn utc() -> FixedOffset {
        FixedOffset::east_opt(0).unwrap()
    }

    #[test]
    fn test_from_entries_counts_tagged_entries_in_window() {
        let now = Utc.with_ymd_and_hms(2026, 3, 31, 12, 0, 0).unwrap();
        let entries = vec![
            JournalEntry::new(1, "a", Some(Mood::Happy), now - Duration::days(1)),
            JournalEntry::new(2, "b", Some(Mood::Happy), now - Duration::days(2)),
            JournalEntry::new(3, "c", Some(Mood::Sad), now - Duration::days(3)),
            JournalEntry::new(4, "d", None, now - Duration::days(3)),
            JournalEntry::new(5, "e", Some(Mood::Sad), now - Duration::days(45)),
        ];

        let aggregate = MoodAggregate::from_entries(&entries, now, utc());
        assert_eq!(aggregate.mood_insights.get("happy"), Some(&2));
        assert_eq!(aggregate.mood_insights.get("sad"), Some(&1));
        assert_eq!(aggregate.total(), 3);
        assert_eq!(aggregate.daily_moods.len(), 3);
    }

    #[test]
    fn test_daily_mood_is_latest_entry_of_the_day() {
        let now = Utc.with_ymd_and_hms(2026, 3, 31, 20, 0, 0).unwrap();
        let morning = Utc.with_ymd_and_hms(2026, 3, 31, 8, 0, 0).unwrap();
        let evening = Utc.with_ymd_and_hms(2026, 3, 31, 19, 0, 0).unwrap();
        // Evening entry listed first to make sure order of input does not matter
        let entries = vec![
            JournalEntry::new(2, "later", Some(Mood::Calm), evening),
            JournalEntry::new(1, "earlier", Some(Mood::Anxious), morning),
        ];

        let aggregate = MoodAggregate::from_entries(&entries, now, utc());
        let day = NaiveDate::from_ymd_opt(2026, 3, 31).unwrap();
        assert_eq!(aggregate.daily_moods.get(&day).map(String::as_str), Some("calm"));
    }

    #[test]
    fn test_from_labels_keeps_raw_labels() {
        let now = Utc.with_ymd_and_hms(2026, 3, 31, 12, 0, 0).unwrap();
        let labels = vec![
            (now - Duration::hours(1), "happy"),
            (now - Duration::hours(2), "Happy"),
            (now - Duration::hours(3), "meh"),
            (now - Duration::days(40), "meh"),
        ];

        let aggregate = MoodAggregate::from_labels(labels, now, utc());
        assert_eq!(aggregate.mood_insights.get("happy"), Some(&1));
        assert_eq!(aggregate.mood_insights.get("Happy"), Some(&1));
        assert_eq!(aggregate.mood_insights.get("meh"), Some(&1));
        assert_eq!(aggregate.total(), 3);
    }

    #[test]
    fn test_empty_input_gives_empty_aggregate() {
        let now = Utc.with_ymd_and_hms(2026, 3, 31, 20, 0, 0).unwrap();
        let aggregate = MoodAggregate::from_entries(&[], now, utc());
        assert!(aggregate.is_empty());
        assert_eq!(aggregate.total(), 0);
    }

    #[test]
    fn test_aggregate_json_shape() {
        let json = r#"{"daily_moods":{"2026-01-01":"happy"},"mood_insights":{"happy":5,"sad":2}}"#;
        let aggregate: MoodAggregate = serde_json::from_str(json).unwrap();
        assert_eq!(aggregate.total(), 7);
        let day = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
        assert_eq!(aggregate.daily_moods.get(&day).map(String::as_str), Some("happy"));

        let missing: MoodAggregate = serde_json::from_str("{}").unwrap();
        assert!(missing.is_empty());
    }
}
