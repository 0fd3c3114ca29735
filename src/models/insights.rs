use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::mood::Mood;

/// Neutral mood score used whenever there is nothing to average.
pub const NEUTRAL_MOOD_SCORE: f64 = 3.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsightsRecord {
    /// Up to three `(mood, count)` pairs, most frequent first.
    pub top_moods: Vec<(Mood, usize)>,
    pub patterns: Vec<String>,
    pub triggers: Vec<String>,
    pub boosters: Vec<String>,
    pub total_entries: usize,
    pub average_mood_score: f64,
}

impl Default for InsightsRecord {
    fn default() -> Self {
        Self {
            top_moods: Vec::new(),
            patterns: Vec::new(),
            triggers: Vec::new(),
            boosters: Vec::new(),
            total_entries: 0,
            average_mood_score: NEUTRAL_MOOD_SCORE,
        }
    }
}

/// One bar of the seven-day chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeekDayPoint {
    pub date: NaiveDate,
    pub day_label: String,
    pub entry_count: usize,
    pub average_mood: f64,
}

/// Insights record plus the chart series rendered next to it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsightsReport {
    pub insights: InsightsRecord,
    pub week: Vec<WeekDayPoint>,
    pub generated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WellbeingState {
    Thriving,
    Happy,
    #[default]
    Neutral,
    Concerned,
    Struggling,
}

impl WellbeingState {
    pub fn as_str(self) -> &'static str {
        match self {
            WellbeingState::Thriving => "thriving",
            WellbeingState::Happy => "happy",
            WellbeingState::Neutral => "neutral",
            WellbeingState::Concerned => "concerned",
            WellbeingState::Struggling => "struggling",
        }
    }
}

/// A classified state together with the numbers it was derived from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WellbeingReading {
    pub state: WellbeingState,
    /// `None` when there were no mood counts to divide by.
    pub positivity_ratio: Option<f64>,
    pub total_moods: u64,
    pub evaluated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_record_is_neutral_and_empty() {
        let record = InsightsRecord::default();
        assert_eq!(record.total_entries, 0);
        assert_eq!(record.average_mood_score, 3.0);
        assert!(record.top_moods.is_empty());
        assert!(record.patterns.is_empty());
        assert!(record.triggers.is_empty());
        assert!(record.boosters.is_empty());
    }

    #[test]
    fn test_top_moods_serialize_as_pairs() {
        let record = InsightsRecord {
            top_moods: vec![(Mood::Happy, 3), (Mood::Tired, 1)],
            ..InsightsRecord::default()
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["top_moods"][0][0], "happy");
        assert_eq!(json["top_moods"][0][1], 3);
        assert_eq!(json["top_moods"][1][0], "tired");
    }

    #[test]
    fn test_wellbeing_state_serializes_lowercase() {
        let json = serde_json::to_string(&WellbeingState::Concerned).unwrap();
        assert_eq!(json, "\"concerned\"");
        assert_eq!(WellbeingState::default(), WellbeingState::Neutral);
        assert_eq!(WellbeingState::Thriving.as_str(), "thriving");
    }
}
