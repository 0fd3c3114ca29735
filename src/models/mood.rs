use serde::{Deserialize, Serialize};
use std::fmt;

/// Mood labels a journal entry can be tagged with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    Happy,
    Sad,
    Anxious,
    Excited,
    Calm,
    Frustrated,
    Grateful,
    Lonely,
    Confident,
    Overwhelmed,
    Peaceful,
    Angry,
    Hopeful,
    Tired,
    Energetic,
    Content,
}

impl Mood {
    pub const ALL: [Mood; 16] = [
        Mood::Happy,
        Mood::Sad,
        Mood::Anxious,
        Mood::Excited,
        Mood::Calm,
        Mood::Frustrated,
        Mood::Grateful,
        Mood::Lonely,
        Mood::Confident,
        Mood::Overwhelmed,
        Mood::Peaceful,
        Mood::Angry,
        Mood::Hopeful,
        Mood::Tired,
        Mood::Energetic,
        Mood::Content,
    ];

    /// Parses a stored label. Unknown labels yield `None`.
    pub fn parse(label: &str) -> Option<Self> {
        let label = label.trim();
        Self::ALL
            .into_iter()
            .find(|m| m.as_str().eq_ignore_ascii_case(label))
    }

    /// Exact, case-sensitive match against the canonical label.
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.as_str() == label)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Mood::Happy => "happy",
            Mood::Sad => "sad",
            Mood::Anxious => "anxious",
            Mood::Excited => "excited",
            Mood::Calm => "calm",
            Mood::Frustrated => "frustrated",
            Mood::Grateful => "grateful",
            Mood::Lonely => "lonely",
            Mood::Confident => "confident",
            Mood::Overwhelmed => "overwhelmed",
            Mood::Peaceful => "peaceful",
            Mood::Angry => "angry",
            Mood::Hopeful => "hopeful",
            Mood::Tired => "tired",
            Mood::Energetic => "energetic",
            Mood::Content => "content",
        }
    }

    /// Valence score on a 1-5 scale.
    pub fn valence(self) -> u8 {
        match self {
            Mood::Happy | Mood::Excited | Mood::Grateful | Mood::Confident => 5,
            Mood::Peaceful | Mood::Hopeful | Mood::Content | Mood::Energetic => 4,
            Mood::Calm => 3,
            Mood::Tired | Mood::Lonely => 2,
            Mood::Sad | Mood::Anxious | Mood::Frustrated | Mood::Angry | Mood::Overwhelmed => 1,
        }
    }

    /// Negative moods whose entries are mined for trigger words.
    pub fn is_trigger(self) -> bool {
        matches!(
            self,
            Mood::Sad
                | Mood::Anxious
                | Mood::Frustrated
                | Mood::Angry
                | Mood::Overwhelmed
                | Mood::Lonely
        )
    }

    /// Positive moods whose entries are mined for booster words.
    pub fn is_booster(self) -> bool {
        matches!(
            self,
            Mood::Happy
                | Mood::Excited
                | Mood::Grateful
                | Mood::Confident
                | Mood::Peaceful
                | Mood::Hopeful
                | Mood::Content
        )
    }

    /// Moods counted as positive by the wellbeing classifier. Unlike
    /// `is_booster`, this includes `Energetic`.
    pub fn is_uplifting(self) -> bool {
        self.is_booster() || self == Mood::Energetic
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
