//! Pomodoro-style focus timer.
//!
//! The timer is driven by one-second [`FocusTimer::tick`] calls from the
//! caller's clock; it holds no clock of its own.

use super::settings::FocusSettings;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FocusPhase {
    Focus,
    Break,
}

impl FocusPhase {
    pub fn label(&self) -> &'static str {
        match self {
            FocusPhase::Focus => "Focus session",
            FocusPhase::Break => "Break time",
        }
    }

    fn next(&self) -> Self {
        match self {
            FocusPhase::Focus => FocusPhase::Break,
            FocusPhase::Break => FocusPhase::Focus,
        }
    }
}

/// Toast shown when a phase ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerNotification {
    pub title: &'static str,
    pub description: &'static str,
}

const FOCUS_DONE: TimerNotification = TimerNotification {
    title: "Focus session complete! Time for a break.",
    description: "Take a short break to refresh your mind.",
};

const BREAK_DONE: TimerNotification = TimerNotification {
    title: "Break time over!",
    description: "Ready to focus again?",
};

/// Emitted by [`FocusTimer::tick`] when a phase reaches zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhaseCompleted {
    pub finished: FocusPhase,
    pub next: FocusPhase,
    /// `None` when notifications are disabled.
    pub notification: Option<TimerNotification>,
}

#[derive(Debug, Clone)]
pub struct FocusTimer {
    settings: FocusSettings,
    phase: FocusPhase,
    time_left: u32,
    total: u32,
    running: bool,
}

impl FocusTimer {
    pub fn new(settings: FocusSettings) -> Self {
        let total = settings.focus_seconds();
        Self {
            settings,
            phase: FocusPhase::Focus,
            time_left: total,
            total,
            running: false,
        }
    }

    pub fn phase(&self) -> FocusPhase {
        self.phase
    }

    pub fn time_left(&self) -> u32 {
        self.time_left
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Start/pause toggle.
    pub fn toggle(&mut self) {
        self.running = !self.running;
    }

    /// Stops the timer and refills the current phase.
    pub fn reset(&mut self) {
        self.running = false;
        self.time_left = self.phase_seconds(self.phase);
        self.total = self.time_left;
    }

    /// Advances one second while running.
    pub fn tick(&mut self) -> Option<PhaseCompleted> {
        if !self.running {
            return None;
        }
        self.time_left = self.time_left.saturating_sub(1);
        if self.time_left > 0 {
            return None;
        }

        let finished = self.phase;
        let next = finished.next();
        self.phase = next;
        self.time_left = self.phase_seconds(next);
        self.total = self.time_left;

        let notification = self.settings.enable_notifications.then_some(match finished {
            FocusPhase::Focus => FOCUS_DONE,
            FocusPhase::Break => BREAK_DONE,
        });

        Some(PhaseCompleted {
            finished,
            next,
            notification,
        })
    }

    /// Elapsed share of the current phase, 0..=100.
    pub fn progress(&self) -> u8 {
        if self.total == 0 {
            return 100;
        }
        let elapsed = 1.0 - f64::from(self.time_left) / f64::from(self.total);
        (elapsed * 100.0).round().clamp(0.0, 100.0) as u8
    }

    /// `MM:SS` of the time left.
    pub fn display(&self) -> String {
        format_time(self.time_left)
    }

    fn phase_seconds(&self, phase: FocusPhase) -> u32 {
        match phase {
            FocusPhase::Focus => self.settings.focus_seconds(),
            FocusPhase::Break => self.settings.break_seconds(),
        }
    }
}

/// Formats seconds as zero-padded `MM:SS`.
pub fn format_time(seconds: u32) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}
