//! Terminal rendering of chat turns and notices.

use colored::Colorize;
use mindtrack_core::chat::{ChatTurn, MOOD_CHIPS, Sender};

pub fn print_turn(turn: &ChatTurn) {
    let time = turn.timestamp.with_timezone(&chrono::Local).format("%H:%M");
    match turn.sender {
        Sender::User => {
            println!(
                "{} {}",
                turn.sender.display_name().magenta().bold(),
                time.to_string().bright_black()
            );
            for line in turn.content.lines() {
                println!("  {}", line.magenta());
            }
        }
        Sender::Ai => {
            println!(
                "{} {}",
                turn.sender.display_name().bright_blue().bold(),
                time.to_string().bright_black()
            );
            for line in turn.content.lines() {
                println!("  {}", line.bright_blue());
            }
        }
    }
    println!();
}

pub fn print_thinking() {
    println!("{}", "  Thinking... (Ctrl-C to cancel)".bright_black().italic());
}

pub fn print_mood_chips() {
    let chips: Vec<String> = MOOD_CHIPS
        .iter()
        .enumerate()
        .map(|(i, chip)| format!("[{}] {}", i + 1, chip))
        .collect();
    println!("{}", "How are you feeling today?".bright_black());
    println!("  {}", chips.join("  ").cyan());
    println!();
}

pub fn notice(message: impl AsRef<str>) {
    println!("{}", format!("! {}", message.as_ref()).yellow());
}

pub fn success(message: impl AsRef<str>) {
    println!("{}", message.as_ref().bright_green());
}

pub fn print_help() {
    let rows = [
        ("<text>", "Talk to the assistant"),
        ("1-5", "Pick a mood chip (while shown)"),
        ("/mood [1-5]", "Show or record today's mood"),
        ("/save [text|json]", "Save the conversation to a file"),
        ("/share", "Copy the conversation to the clipboard"),
        ("/clear", "Start over"),
        ("/key [KEY|clear]", "Show, set or remove the OpenAI API key"),
        ("/help", "Show this list"),
        ("quit", "Exit"),
    ];
    for (command, description) in rows {
        println!("  {} {}", format!("{command:<20}").bright_cyan(), description.bright_black());
    }
    println!();
}
