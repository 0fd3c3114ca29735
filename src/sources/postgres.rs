use chrono::{DateTime, Duration, FixedOffset, NaiveDateTime, TimeZone, Utc};
use sqlx::{FromRow, PgPool};

use super::JournalSource;
use crate::error::AppResult;
use crate::models::mood_aggregate::AGGREGATE_WINDOW_DAYS;
use crate::models::{JournalEntry, Mood, MoodAggregate};

/// Reads a single user's entries from the `journal_entries` table.
#[derive(Clone)]
pub struct PgJournalSource {
    db: PgPool,
    user_id: i64,
    offset: FixedOffset,
}

#[derive(Debug, FromRow)]
struct JournalRow {
    id: i32,
    text: String,
    mood_tag: Option<String>,
    category: Option<String>,
    created_at: Option<NaiveDateTime>,
}

impl From<JournalRow> for JournalEntry {
    fn from(row: JournalRow) -> Self {
        JournalEntry {
            id: row.id as i64,
            text: row.text,
            mood_tag: row.mood_tag.as_deref().and_then(Mood::parse),
            // Stored timestamps are naive UTC
            created_at: row.created_at.map(|ts| Utc.from_utc_datetime(&ts)),
            category: row.category.unwrap_or_else(|| "general".into()),
        }
    }
}

/// Folds rows into an aggregate from their stored labels, so labels that do
/// not parse as a `Mood` still count.
fn aggregate_from_rows(rows: &[JournalRow], now: DateTime<Utc>, offset: FixedOffset) -> MoodAggregate {
    let labels = rows.iter().filter_map(|row| {
        let created_at = Utc.from_utc_datetime(&row.created_at?);
        Some((created_at, row.mood_tag.as_deref()?))
    });
    MoodAggregate::from_labels(labels, now, offset)
}

impl PgJournalSource {
    pub fn new(db: PgPool, user_id: i64, offset: FixedOffset) -> Self {
        Self {
            db,
            user_id,
            offset,
        }
    }
}

impl JournalSource for PgJournalSource {
    async fn fetch_entries(&self) -> AppResult<Vec<JournalEntry>> {
        let rows = sqlx::query_as::<_, JournalRow>(
            r#"
            SELECT id, text, mood_tag, category, created_at
            FROM journal_entries
            WHERE user_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(self.user_id)
        .fetch_all(&self.db)
        .await?;

        tracing::debug!(user_id = self.user_id, count = rows.len(), "Fetched journal entries");

        Ok(rows.into_iter().map(JournalEntry::from).collect())
    }

    async fn fetch_mood_aggregate(&self) -> AppResult<MoodAggregate> {
        let now = Utc::now();
        let since = (now - Duration::days(AGGREGATE_WINDOW_DAYS)).naive_utc();

        let rows = sqlx::query_as::<_, JournalRow>(
            r#"
            SELECT id, text, mood_tag, category, created_at
            FROM journal_entries
            WHERE user_id = $1 AND created_at >= $2 AND mood_tag IS NOT NULL
            "#,
        )
        .bind(self.user_id)
        .bind(since)
        .fetch_all(&self.db)
        .await?;

        Ok(aggregate_from_rows(&rows, now, self.offset))
    }
}
