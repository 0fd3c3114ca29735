use chrono::{Duration, FixedOffset, NaiveDate};

use crate::models::{JournalEntry, WeekDayPoint};
use crate::services::mood_scorer;

pub const CHART_DAYS: i64 = 7;

/// Seven daily points, oldest first, the last one being `reference_date`.
/// Days are matched on the entry's calendar date in `offset`.
pub fn build(entries: &[JournalEntry], reference_date: NaiveDate, offset: FixedOffset) -> Vec<WeekDayPoint> {
    (0..CHART_DAYS)
        .rev()
        .map(|days_back| {
            let date = reference_date - Duration::days(days_back);
            let on_day: Vec<&JournalEntry> = entries
                .iter()
                .filter(|e| e.local_date(offset) == Some(date))
                .collect();

            WeekDayPoint {
                date,
                day_label: date.format("%a").to_string(),
                entry_count: on_day.len(),
                average_mood: mood_scorer::average(on_day),
            }
        })
        .collect()
}
