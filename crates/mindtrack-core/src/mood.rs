//! Daily mood check-ins.

use crate::error::{MindTrackError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A selectable mood level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoodOption {
    pub value: u8,
    pub label: &'static str,
}

const fn option(value: u8, label: &'static str) -> MoodOption {
    MoodOption { value, label }
}

/// Mood levels from best to worst.
pub const MOOD_OPTIONS: [MoodOption; 5] = [
    option(5, "Great"),
    option(4, "Good"),
    option(3, "Okay"),
    option(2, "Low"),
    option(1, "Very Low"),
];

/// Looks up the option for `value`.
pub fn mood_option(value: u8) -> Option<MoodOption> {
    MOOD_OPTIONS.iter().copied().find(|o| o.value == value)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoodEntry {
    pub value: u8,
    pub recorded_at: DateTime<Utc>,
}

impl MoodEntry {
    pub fn label(&self) -> &'static str {
        mood_option(self.value).map_or("Unknown", |o| o.label)
    }
}

/// Session-scoped mood log. Nothing is persisted.
#[derive(Debug, Clone, Default)]
pub struct MoodLog {
    entries: Vec<MoodEntry>,
}

impl MoodLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a mood of 1..=5.
    pub fn record(&mut self, value: u8) -> Result<MoodEntry> {
        if mood_option(value).is_none() {
            return Err(MindTrackError::invalid_input(format!(
                "mood must be between 1 and 5, got {value}"
            )));
        }
        let entry = MoodEntry {
            value,
            recorded_at: Utc::now(),
        };
        self.entries.push(entry.clone());
        Ok(entry)
    }

    pub fn entries(&self) -> &[MoodEntry] {
        &self.entries
    }

    pub fn latest(&self) -> Option<&MoodEntry> {
        self.entries.last()
    }

    pub fn average(&self) -> Option<f64> {
        if self.entries.is_empty() {
            return None;
        }
        let sum: u32 = self.entries.iter().map(|e| u32::from(e.value)).sum();
        Some(f64::from(sum) / self.entries.len() as f64)
    }
}
