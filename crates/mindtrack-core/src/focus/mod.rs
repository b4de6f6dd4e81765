//! Focus settings and the focus timer.

mod settings;
mod timer;

pub use settings::{
    BREAK_MINUTES_RANGE, FOCUS_MINUTES_RANGE, FOCUS_MINUTES_STEP, FocusSettings,
    FocusSettingsRepository,
};
pub use timer::{FocusPhase, FocusTimer, PhaseCompleted, TimerNotification, format_time};
