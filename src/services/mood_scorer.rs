use crate::models::{JournalEntry, Mood, NEUTRAL_MOOD_SCORE};

pub fn score(mood: Mood) -> u8 {
    mood.valence()
}

/// Mean valence of the tagged entries; untagged entries are skipped and an
/// empty selection scores neutral.
pub fn average<'a, I>(entries: I) -> f64
where
    I: IntoIterator<Item = &'a JournalEntry>,
{
    let (sum, count) = entries
        .into_iter()
        .filter_map(|e| e.mood_tag)
        .fold((0u64, 0u64), |(sum, count), mood| {
            (sum + score(mood) as u64, count + 1)
        });

    if count == 0 {
        NEUTRAL_MOOD_SCORE
    } else {
        sum as f64 / count as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn entry(id: i64, mood: Option<Mood>) -> JournalEntry {
        JournalEntry::new(id, "text", mood, Utc.with_ymd_and_hms(2026, 2, 10, 9, 0, 0).unwrap())
    }

    #[test]
    fn test_empty_is_neutral() {
        assert_eq!(average(&[] as &[JournalEntry]), 3.0);
    }

    #[test]
    fn test_untagged_entries_are_skipped() {
        let entries = vec![entry(1, None), entry(2, None)];
        assert_eq!(average(&entries), 3.0);

        let entries = vec![entry(1, None), entry(2, Some(Mood::Sad))];
        assert_eq!(average(&entries), 1.0);
    }

    #[test]
    fn test_single_entry_returns_table_value() {
        for mood in Mood::ALL {
            let entries = vec![entry(1, Some(mood))];
            assert_eq!(average(&entries), mood.valence() as f64);
        }
    }

    #[test]
    fn test_average_is_order_independent() {
        let mut entries = vec![
            entry(1, Some(Mood::Happy)),
            entry(2, Some(Mood::Tired)),
            entry(3, Some(Mood::Peaceful)),
            entry(4, Some(Mood::Angry)),
        ];
        let forward = average(&entries);
        entries.reverse();
        assert_eq!(average(&entries), forward);
        assert_eq!(forward, 3.0); // (5 + 2 + 4 + 1) / 4
    }
}
