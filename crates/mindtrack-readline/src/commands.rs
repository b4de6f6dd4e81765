//! Parsing of REPL input lines.

use mindtrack_core::chat::{MOOD_CHIPS, TranscriptFormat, UserInput};

/// Slash commands offered for completion, in help order.
pub const COMMANDS: [&str; 7] = ["/mood", "/save", "/share", "/clear", "/key", "/help", "/quit"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Send a chat turn.
    Send(UserInput),
    /// Show mood options and the session log, or record a mood.
    Mood(Option<String>),
    Save(TranscriptFormat),
    Share,
    Clear,
    /// Show the credential status, set a new one, or `clear` it.
    Key(Option<String>),
    Help,
    Quit,
    /// Nothing to do (blank line).
    Skip,
    /// Bad command or argument, with the notice to show.
    Invalid(String),
}

/// Interprets one line of input.
///
/// While the mood chips are visible, a bare chip number (`1`-`5`) selects
/// that chip.
pub fn parse(line: &str, chips_visible: bool) -> Command {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Command::Skip;
    }
    if trimmed == "quit" || trimmed == "exit" {
        return Command::Quit;
    }

    if chips_visible {
        if let Some(chip) = chip_by_number(trimmed) {
            return Command::Send(UserInput::Chip(chip.to_string()));
        }
    }

    let Some(rest) = trimmed.strip_prefix('/') else {
        return Command::Send(UserInput::Typed(line.to_string()));
    };

    let (name, arg) = match rest.split_once(char::is_whitespace) {
        Some((name, arg)) => (name, Some(arg.trim().to_string()).filter(|a| !a.is_empty())),
        None => (rest, None),
    };

    match name {
        "mood" => Command::Mood(arg),
        "save" => match arg.as_deref().map(str::parse::<TranscriptFormat>) {
            None => Command::Save(TranscriptFormat::default()),
            Some(Ok(format)) => Command::Save(format),
            Some(Err(e)) => Command::Invalid(e.to_string()),
        },
        "share" => Command::Share,
        "clear" => Command::Clear,
        "key" => Command::Key(arg),
        "help" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => Command::Invalid(format!("Unknown command '/{other}'. Type /help for a list.")),
    }
}

fn chip_by_number(input: &str) -> Option<&'static str> {
    let index: usize = input.parse().ok()?;
    MOOD_CHIPS.get(index.checked_sub(1)?).copied()
}
