//! Read-only access to journal history and mood aggregates.

use std::future::Future;

use crate::error::AppResult;
use crate::models::{JournalEntry, MoodAggregate};

pub mod memory;
pub mod postgres;

pub use memory::MemoryJournalSource;
pub use postgres::PgJournalSource;

pub trait JournalSource: Send + Sync + 'static {
    /// Full entry history, in no particular order.
    fn fetch_entries(&self) -> impl Future<Output = AppResult<Vec<JournalEntry>>> + Send;

    fn fetch_mood_aggregate(&self) -> impl Future<Output = AppResult<MoodAggregate>> + Send;
}

/// Entries from `source`, or an empty history if the source fails.
pub async fn entries_or_empty<S: JournalSource>(source: &S) -> Vec<JournalEntry> {
    match source.fetch_entries().await {
        Ok(entries) => entries,
        Err(e) => {
            tracing::warn!(error = %e, "Journal entries unavailable, using empty history");
            Vec::new()
        }
    }
}

/// Aggregate from `source`, or an empty aggregate if the source fails.
pub async fn aggregate_or_empty<S: JournalSource>(source: &S) -> MoodAggregate {
    match source.fetch_mood_aggregate().await {
        Ok(aggregate) => aggregate,
        Err(e) => {
            tracing::warn!(error = %e, "Mood aggregate unavailable, using empty aggregate");
            MoodAggregate::default()
        }
    }
}
