//! Focus session preferences.

use crate::error::{MindTrackError, Result};
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

pub const FOCUS_MINUTES_RANGE: RangeInclusive<u32> = 5..=60;
pub const FOCUS_MINUTES_STEP: u32 = 5;
pub const BREAK_MINUTES_RANGE: RangeInclusive<u32> = 1..=30;

/// Focus timer preferences, persisted as
/// `{ "focusTime": 25, "breakTime": 5, "enableNotifications": true }`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FocusSettings {
    /// Focus phase length in minutes.
    pub focus_time: u32,
    /// Break phase length in minutes.
    pub break_time: u32,
    pub enable_notifications: bool,
}

impl Default for FocusSettings {
    fn default() -> Self {
        Self {
            focus_time: 25,
            break_time: 5,
            enable_notifications: true,
        }
    }
}

impl FocusSettings {
    /// Checks the slider ranges: focus 5..=60 in steps of 5, break 1..=30.
    pub fn validate(&self) -> Result<()> {
        if !FOCUS_MINUTES_RANGE.contains(&self.focus_time)
            || self.focus_time % FOCUS_MINUTES_STEP != 0
        {
            return Err(MindTrackError::invalid_input(format!(
                "focus time must be 5-60 minutes in steps of 5, got {}",
                self.focus_time
            )));
        }
        if !BREAK_MINUTES_RANGE.contains(&self.break_time) {
            return Err(MindTrackError::invalid_input(format!(
                "break time must be 1-30 minutes, got {}",
                self.break_time
            )));
        }
        Ok(())
    }

    pub fn focus_seconds(&self) -> u32 {
        self.focus_time.saturating_mul(60)
    }

    pub fn break_seconds(&self) -> u32 {
        self.break_time.saturating_mul(60)
    }
}

/// Persistence for [`FocusSettings`].
pub trait FocusSettingsRepository: Send + Sync {
    /// Returns the saved settings, or defaults when nothing is saved.
    fn load(&self) -> Result<FocusSettings>;

    /// Validates and saves the settings.
    fn save(&self, settings: &FocusSettings) -> Result<()>;
}
