use std::io::Write;
use std::time::Duration;

use anyhow::Result;
use mindtrack_core::focus::{FocusSettings, FocusTimer, PhaseCompleted};

/// Runs the focus timer in the terminal until Ctrl-C, or until `phases`
/// phases have completed.
pub async fn run(settings: FocusSettings, phases: Option<u32>) -> Result<()> {
    let mut timer = FocusTimer::new(settings);
    timer.toggle();
    println!(
        "⏱️  {} minutes focus / {} minutes break. Ctrl-C to stop.",
        settings.focus_time, settings.break_time
    );

    let mut interval = tokio::time::interval(Duration::from_secs(1));
    interval.tick().await;
    let mut completed = 0u32;

    loop {
        print_status(&timer)?;
        tokio::select! {
            _ = interval.tick() => {}
            _ = tokio::signal::ctrl_c() => {
                println!();
                println!("Timer stopped at {} ({})", timer.display(), timer.phase().label());
                return Ok(());
            }
        }

        if let Some(event) = timer.tick() {
            println!();
            announce(&event);
            completed += 1;
            if phases.is_some_and(|limit| completed >= limit) {
                return Ok(());
            }
        }
    }
}

fn print_status(timer: &FocusTimer) -> Result<()> {
    let mut stdout = std::io::stdout();
    write!(
        stdout,
        "\r{:<14} {}  {:>3}%",
        timer.phase().label(),
        timer.display(),
        timer.progress()
    )?;
    stdout.flush()?;
    Ok(())
}

fn announce(event: &PhaseCompleted) {
    tracing::info!("Focus timer phase finished: {:?} -> {:?}", event.finished, event.next);
    match event.notification {
        Some(notification) => {
            println!("🔔 {}", notification.title);
            println!("   {}", notification.description);
        }
        None => println!("{} started", event.next.label()),
    }
}
