use std::collections::HashMap;
use std::hash::Hash;

use crate::models::{JournalEntry, Mood};

/// Words must be longer than this to count as a signal.
pub const MIN_WORD_CHARS: usize = 4;
/// Words seen fewer times than this are noise.
pub const MIN_OCCURRENCES: usize = 2;
pub const MAX_SIGNALS: usize = 3;

/// Counts items and orders them by count, most frequent first. Equal counts
/// keep the order in which the items were first seen.
pub fn rank_by_frequency<K, I>(items: I) -> Vec<(K, usize)>
where
    K: Eq + Hash + Clone,
    I: IntoIterator<Item = K>,
{
    let mut position: HashMap<K, usize> = HashMap::new();
    let mut counts: Vec<(K, usize)> = Vec::new();

    for item in items {
        match position.get(&item) {
            Some(&idx) => counts[idx].1 += 1,
            None => {
                position.insert(item.clone(), counts.len());
                counts.push((item, 1));
            }
        }
    }

    // `sort_by` is stable, so first-seen order survives for equal counts.
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}

fn signal_words(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split_whitespace()
        .map(str::to_lowercase)
        .filter(|word| word.chars().count() > MIN_WORD_CHARS)
}

/// Most frequent long words across entries whose mood satisfies `selects`.
///
/// Purely lexical: no stemming and punctuation stays attached to words.
pub fn mine<F>(entries: &[JournalEntry], selects: F) -> Vec<String>
where
    F: Fn(Mood) -> bool,
{
    let words = entries
        .iter()
        .filter(|e| e.mood_tag.is_some_and(&selects))
        .flat_map(|e| signal_words(&e.text));

    rank_by_frequency(words)
        .into_iter()
        .filter(|(_, count)| *count >= MIN_OCCURRENCES)
        .take(MAX_SIGNALS)
        .map(|(word, _)| word)
        .collect()
}

/// Words recurring in entries tagged with a negative mood.
pub fn triggers(entries: &[JournalEntry]) -> Vec<String> {
    mine(entries, Mood::is_trigger)
}

/// Words recurring in entries tagged with a positive mood.
pub fn boosters(entries: &[JournalEntry]) -> Vec<String> {
    mine(entries, Mood::is_booster)
}
