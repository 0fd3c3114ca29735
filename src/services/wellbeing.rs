//! Maps the mood distribution of an aggregate onto a coarse wellbeing state.
//!
//! The classifier is memoryless: it looks only at the counts it is given, so
//! ratios sitting on a threshold can alternate between neighbouring states
//! from one refresh to the next.

use chrono::{DateTime, Utc};
use std::collections::BTreeMap;

use crate::models::{Mood, MoodAggregate, WellbeingReading, WellbeingState};

/// Lower bounds of the positivity ratio, checked from the top down.
const THRESHOLDS: [(f64, WellbeingState); 4] = [
    (0.70, WellbeingState::Thriving),
    (0.50, WellbeingState::Happy),
    (0.30, WellbeingState::Neutral),
    (0.15, WellbeingState::Concerned),
];

/// Share of counted moods that are positive, or `None` when nothing was
/// counted. Labels are matched exactly as stored; anything that is not a
/// canonical label counts toward the total only.
pub fn positivity_ratio(mood_insights: &BTreeMap<String, u32>) -> Option<f64> {
    let (positive, total) = mood_insights
        .iter()
        .fold((0u64, 0u64), |(positive, total), (label, &count)| {
            let uplifting = Mood::from_label(label).is_some_and(Mood::is_uplifting);
            let count = count as u64;
            (positive + if uplifting { count } else { 0 }, total + count)
        });

    if total == 0 {
        None
    } else {
        Some(positive as f64 / total as f64)
    }
}

pub fn state_for_ratio(ratio: f64) -> WellbeingState {
    THRESHOLDS
        .iter()
        .find(|(floor, _)| ratio >= *floor)
        .map(|&(_, state)| state)
        .unwrap_or(WellbeingState::Struggling)
}

pub fn classify(mood_insights: &BTreeMap<String, u32>) -> WellbeingState {
    positivity_ratio(mood_insights)
        .map(state_for_ratio)
        .unwrap_or(WellbeingState::Neutral)
}

/// Classifies an aggregate and keeps the inputs alongside the state.
pub fn evaluate(aggregate: &MoodAggregate, now: DateTime<Utc>) -> WellbeingReading {
    let positivity_ratio = positivity_ratio(&aggregate.mood_insights);
    WellbeingReading {
        state: positivity_ratio
            .map(state_for_ratio)
            .unwrap_or(WellbeingState::Neutral),
        positivity_ratio,
        total_moods: aggregate.total(),
        evaluated_at: now,
    }
}
