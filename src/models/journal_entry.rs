use chrono::{DateTime, FixedOffset, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use super::mood::Mood;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JournalEntry {
    pub id: i64,
    pub text: String,
    #[serde(default, deserialize_with = "deserialize_mood_tag")]
    pub mood_tag: Option<Mood>,
    /// `None` when the stored timestamp is missing or unreadable.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default = "default_category")]
    pub category: String,
}

fn default_category() -> String {
    "general".into()
}

/// Unknown labels are dropped instead of failing the whole entry.
fn deserialize_mood_tag<'de, D>(deserializer: D) -> Result<Option<Mood>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(Mood::parse))
}

impl JournalEntry {
    pub fn new(id: i64, text: impl Into<String>, mood_tag: Option<Mood>, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            text: text.into(),
            mood_tag,
            created_at: Some(created_at),
            category: default_category(),
        }
    }

    /// Creation time shifted into the viewer's offset.
    pub fn local_created_at(&self, offset: FixedOffset) -> Option<DateTime<FixedOffset>> {
        self.created_at.map(|ts| ts.with_timezone(&offset))
    }

    /// Calendar date the entry falls on in the viewer's offset.
    pub fn local_date(&self, offset: FixedOffset) -> Option<NaiveDate> {
        self.local_created_at(offset).map(|ts| ts.date_naive())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_deserialize_full_entry() {
        let json = r#"{
            "id": 7,
            "text": "Went hiking today",
            "mood_tag": "happy",
            "created_at": "2026-02-10T08:30:00Z",
            "category": "general"
        }"#;
        let entry: JournalEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.id, 7);
        assert_eq!(entry.mood_tag, Some(Mood::Happy));
        assert_eq!(
            entry.created_at,
            Some(Utc.with_ymd_and_hms(2026, 2, 10, 8, 30, 0).unwrap())
        );
    }

    #[test]
    fn test_unknown_mood_tag_is_ignored() {
        let json = r#"{"id":1,"text":"hmm","mood_tag":"bewildered","created_at":"2026-02-10T08:30:00Z"}"#;
        let entry: JournalEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.mood_tag, None);
        assert_eq!(entry.category, "general");
    }

    #[test]
    fn test_missing_timestamp_deserializes_as_none() {
        let json = r#"{"id":2,"text":"no time","mood_tag":null}"#;
        let entry: JournalEntry = serde_json::from_str(json).unwrap();
        assert!(entry.created_at.is_none());
        assert!(entry.local_date(FixedOffset::east_opt(0).unwrap()).is_none());
    }

    #[test]
    fn test_local_date_respects_offset() {
        let entry = JournalEntry::new(
            3,
            "late night",
            None,
            Utc.with_ymd_and_hms(2026, 2, 10, 23, 30, 0).unwrap(),
        );
        let utc = FixedOffset::east_opt(0).unwrap();
        let plus_two = FixedOffset::east_opt(2 * 3600).unwrap();
        assert_eq!(entry.local_date(utc), NaiveDate::from_ymd_opt(2026, 2, 10));
        assert_eq!(entry.local_date(plus_two), NaiveDate::from_ymd_opt(2026, 2, 11));
    }
}
