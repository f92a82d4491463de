use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

use super::lenient;
use super::validation::{require_text, ValidationError};

/// Mood scale used by the journal, 0 through 5.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum MoodLevel {
    Angry = 0,
    Sad = 1,
    Neutral = 2,
    #[default]
    Happy = 3,
    Excited = 4,
    Surprised = 5,
}

impl MoodLevel {
    pub const ALL: [MoodLevel; 6] = [
        MoodLevel::Angry,
        MoodLevel::Sad,
        MoodLevel::Neutral,
        MoodLevel::Happy,
        MoodLevel::Excited,
        MoodLevel::Surprised,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            MoodLevel::Angry => "Angry",
            MoodLevel::Sad => "Sad",
            MoodLevel::Neutral => "Neutral",
            MoodLevel::Happy => "Happy",
            MoodLevel::Excited => "Excited",
            MoodLevel::Surprised => "Surprised",
        }
    }

    /// Parse either the numeric level or the label (case-insensitive)
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        if let Ok(n) = s.parse::<u8>() {
            return Self::try_from(n).ok();
        }
        Self::ALL
            .iter()
            .copied()
            .find(|m| m.label().eq_ignore_ascii_case(s))
    }
}

impl TryFrom<u8> for MoodLevel {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::ALL
            .get(value as usize)
            .copied()
            .ok_or_else(|| format!("mood level {} is outside 0..=5", value))
    }
}

impl From<MoodLevel> for u8 {
    fn from(level: MoodLevel) -> Self {
        level as u8
    }
}

/// Read a stored mood level; anything that is not a whole number in range is absent.
fn lenient_level<'de, D>(deserializer: D) -> Result<Option<MoodLevel>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = lenient::number(deserializer)?;
    Ok(value
        .filter(|n| n.fract() == 0.0 && (0.0..=f64::from(u8::MAX)).contains(n))
        .and_then(|n| MoodLevel::try_from(n as u8).ok()))
}

impl std::fmt::Display for MoodLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A journal entry. Older entries use `journal` instead of `journalEntry`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoodEntry {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient_level")]
    pub mood: Option<MoodLevel>,
    #[serde(rename = "journalEntry", alias = "journal", default)]
    pub journal_entry: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
}

impl MoodEntry {
    pub fn journal_display(&self) -> &str {
        match self.journal_entry.as_deref() {
            Some(text) if !text.trim().is_empty() => text,
            _ => "No journal available",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct NewMoodEntry {
    pub mood: MoodLevel,
    #[serde(rename = "journalEntry")]
    pub journal_entry: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
}

impl NewMoodEntry {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text("journal entry", &self.journal_entry)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LogMoodResponse {
    pub entry: MoodEntry,
}
