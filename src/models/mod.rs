pub mod insights;
pub mod journal_entry;
pub mod mood;
pub mod mood_aggregate;

pub use insights::{
    InsightsRecord, InsightsReport, WeekDayPoint, WellbeingReading, WellbeingState,
    NEUTRAL_MOOD_SCORE,
};
pub use journal_entry::JournalEntry;
pub use mood::Mood;
pub use mood_aggregate::MoodAggregate;
