use anyhow::Result;
use mindtrack_core::focus::{FocusSettings, FocusSettingsRepository};

/// Field overrides from the command line. `None` keeps the saved value.
#[derive(Debug, Default, Clone, Copy)]
pub struct FocusUpdate {
    pub focus_time: Option<u32>,
    pub break_time: Option<u32>,
    pub notifications: Option<bool>,
}

impl FocusUpdate {
    fn apply(self, settings: FocusSettings) -> FocusSettings {
        FocusSettings {
            focus_time: self.focus_time.unwrap_or(settings.focus_time),
            break_time: self.break_time.unwrap_or(settings.break_time),
            enable_notifications: self.notifications.unwrap_or(settings.enable_notifications),
        }
    }
}

pub fn show(repo: &dyn FocusSettingsRepository) -> Result<()> {
    print_settings(&repo.load()?);
    Ok(())
}

pub fn set(repo: &dyn FocusSettingsRepository, update: FocusUpdate) -> Result<()> {
    let settings = update.apply(repo.load()?);
    repo.save(&settings)?;
    println!("✅ Focus settings saved");
    print_settings(&settings);
    Ok(())
}

fn print_settings(settings: &FocusSettings) {
    println!("Focus time:    {} minutes", settings.focus_time);
    println!("Break time:    {} minutes", settings.break_time);
    println!(
        "Notifications: {}",
        if settings.enable_notifications { "on" } else { "off" }
    );
}
