use chrono::{FixedOffset, Offset, Utc};
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::RwLock;

use super::JournalSource;
use crate::error::{AppError, AppResult};
use crate::models::{JournalEntry, MoodAggregate};

/// In-process journal snapshot. The aggregate is derived from the entries
/// unless one has been set explicitly.
pub struct MemoryJournalSource {
    entries: RwLock<Vec<JournalEntry>>,
    aggregate: RwLock<Option<MoodAggregate>>,
    offset: FixedOffset,
    unavailable: AtomicBool,
}

impl Default for MemoryJournalSource {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl MemoryJournalSource {
    pub fn new(entries: Vec<JournalEntry>) -> Self {
        Self {
            entries: RwLock::new(entries),
            aggregate: RwLock::new(None),
            offset: Utc.fix(),
            unavailable: AtomicBool::new(false),
        }
    }

    pub async fn replace_entries(&self, entries: Vec<JournalEntry>) {
        *self.entries.write().await = entries;
    }

    pub async fn set_aggregate(&self, aggregate: MoodAggregate) {
        *self.aggregate.write().await = Some(aggregate);
    }

    /// While set, every fetch fails as an unreachable store would.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    fn check_available(&self) -> AppResult<()> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(AppError::NotReady("journal store unreachable".into()));
        }
        Ok(())
    }
}

impl JournalSource for MemoryJournalSource {
    async fn fetch_entries(&self) -> AppResult<Vec<JournalEntry>> {
        self.check_available()?;
        Ok(self.entries.read().await.clone())
    }

    async fn fetch_mood_aggregate(&self) -> AppResult<MoodAggregate> {
        self.check_available()?;
        if let Some(aggregate) = self.aggregate.read().await.as_ref() {
            return Ok(aggregate.clone());
        }
        let entries = self.entries.read().await;
        Ok(MoodAggregate::from_entries(&entries, Utc::now(), self.offset))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Mood;
    use crate::sources::{aggregate_or_empty, entries_or_empty};
    use chrono::Duration;

    #[tokio::test]
    async fn test_aggregate_is_derived_from_entries() {
        let now = Utc::now();
        let source = MemoryJournalSource::new(vec![
            JournalEntry::new(1, "a", Some(Mood::Happy), now - Duration::hours(1)),
            JournalEntry::new(2, "b", Some(Mood::Sad), now - Duration::hours(2)),
        ]);

        let aggregate = source.fetch_mood_aggregate().await.unwrap();
        assert_eq!(aggregate.total(), 2);

        let explicit = MoodAggregate::default();
        source.set_aggregate(explicit.clone()).await;
        assert_eq!(source.fetch_mood_aggregate().await.unwrap(), explicit);
    }

    #[tokio::test]
    async fn test_outage_degrades_to_empty() {
        let source = MemoryJournalSource::new(vec![JournalEntry::new(
            1,
            "a",
            Some(Mood::Happy),
            Utc::now(),
        )]);
        source.set_unavailable(true);

        assert!(source.fetch_entries().await.is_err());
        assert!(entries_or_empty(&source).await.is_empty());
        assert!(aggregate_or_empty(&source).await.is_empty());

        source.set_unavailable(false);
        assert_eq!(entries_or_empty(&source).await.len(), 1);
    }
}
