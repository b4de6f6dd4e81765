mod commands;
mod helper;
mod render;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use colored::Colorize;
use rustyline::Editor;
use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;

use mindtrack_core::chat::{GenerationMode, TranscriptFormat, UserInput};
use mindtrack_core::config::AppConfig;
use mindtrack_core::mood::{MOOD_OPTIONS, MoodLog};
use mindtrack_core::secret::CredentialStore;
use mindtrack_infrastructure::{
    ConfigService, LocalCredentialStore, LocalStore, MindTrackPaths, SystemClipboard, init_logging,
    save_transcript, share_transcript,
};
use mindtrack_interaction::{ChatAssistant, ReplyOutcome};

use commands::Command;
use helper::ChatHelper;

const OFFLINE_NOTICE: &str = "No API key set. Replies come from built-in suggestions. \
     Use /key <your key> to enable AI replies.";
const CREDENTIAL_NOTICE: &str =
    "The AI service rejected your API key. Update it with /key <your key>.";

/// Everything one REPL run works with.
struct ChatSession {
    assistant: Arc<ChatAssistant>,
    credentials: LocalCredentialStore,
    moods: MoodLog,
    export_dir: Option<PathBuf>,
}

impl ChatSession {
    async fn send(&self, input: UserInput) {
        let assistant = Arc::clone(&self.assistant);
        render::print_thinking();

        let send = assistant.send(input);
        tokio::pin!(send);
        let result = tokio::select! {
            result = &mut send => result,
            _ = tokio::signal::ctrl_c() => {
                self.assistant.cancel_pending();
                send.await
            }
        };

        match result {
            Ok(outcome) => match &outcome.reply {
                ReplyOutcome::Fulfilled(turn) => render::print_turn(turn),
                ReplyOutcome::Rejected { turn, .. } => {
                    render::print_turn(turn);
                    if outcome.needs_credential() {
                        render::notice(CREDENTIAL_NOTICE);
                    }
                }
                ReplyOutcome::Cancelled => render::notice("Request cancelled."),
            },
            Err(e) => render::notice(format!("Cannot send: {}", e)),
        }
    }

    fn mood(&mut self, arg: Option<String>) {
        let Some(arg) = arg else {
            for option in MOOD_OPTIONS {
                println!("  {} {}", option.value.to_string().cyan(), option.label);
            }
            match self.moods.latest() {
                Some(latest) => println!(
                    "{}",
                    format!(
                        "Latest: {} ({} entries, average {:.1})",
                        latest.label(),
                        self.moods.entries().len(),
                        self.moods.average().unwrap_or_default()
                    )
                    .bright_black()
                ),
                None => println!("{}", "No mood recorded yet. Use /mood <1-5>.".bright_black()),
            }
            println!();
            return;
        };

        match arg.parse::<u8>().map_err(|_| arg.clone()) {
            Ok(value) => match self.moods.record(value) {
                Ok(entry) => render::success(format!("Mood recorded: {}", entry.label())),
                Err(e) => render::notice(e.to_string()),
            },
            Err(raw) => render::notice(format!("'{}' is not a mood between 1 and 5.", raw)),
        }
    }

    fn save(&self, format: TranscriptFormat) {
        let directory = match &self.export_dir {
            Some(dir) => dir.clone(),
            None => match std::env::current_dir() {
                Ok(dir) => dir,
                Err(e) => {
                    return render::notice(format!("Cannot determine current directory: {}", e));
                }
            },
        };
        match save_transcript(&self.assistant.turns(), format, &directory) {
            Ok(path) => render::success(format!("Conversation saved to {}", path.display())),
            Err(e) => render::notice(e.to_string()),
        }
    }

    fn share(&self) {
        let result = SystemClipboard::new()
            .and_then(|mut clipboard| share_transcript(&self.assistant.turns(), &mut clipboard));
        match result {
            Ok(()) => render::success("Conversation copied to clipboard."),
            Err(e) => render::notice(e.to_string()),
        }
    }

    fn clear(&self) {
        self.assistant.clear();
        render::success("Conversation cleared.");
        self.print_conversation();
    }

    fn key(&self, arg: Option<String>) {
        match arg.as_deref() {
            None => match self.credentials.credential() {
                Some(credential) => println!("API key: {}", credential.masked()),
                None => render::notice(OFFLINE_NOTICE),
            },
            Some("clear") => match self.credentials.clear() {
                Ok(()) => {
                    self.assistant.set_credential(None);
                    render::success("API key removed. Using built-in suggestions.");
                }
                Err(e) => render::notice(e.to_string()),
            },
            Some(value) => match self.credentials.set(value) {
                Ok(credential) => {
                    self.assistant.set_credential(Some(credential));
                    render::success("API key saved successfully.");
                }
                Err(e) => render::notice(e.to_string()),
            },
        }
    }

    fn print_conversation(&self) {
        for turn in self.assistant.turns() {
            render::print_turn(&turn);
        }
        if self.assistant.shows_mood_chips() {
            render::print_mood_chips();
        }
    }
}

fn load_config(paths: &MindTrackPaths) -> AppConfig {
    let loaded = ConfigService::new(None).and_then(|service| service.load());
    match loaded {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!("Using default config: {}", e);
            if let Ok(path) = paths.config_file() {
                render::notice(format!("Ignoring {}: {}", path.display(), e));
            }
            AppConfig::default()
        }
    }
}

/// Entry point of the MindTrack chat REPL.
///
/// Loads config and the stored credential, starts a [`ChatAssistant`] in
/// online or offline mode, and reads lines until `quit` or Ctrl-D. Ctrl-C
/// while a reply is pending cancels that reply.
#[tokio::main]
async fn main() -> Result<()> {
    let paths = MindTrackPaths::default();
    let _log_guard = init_logging(&paths)?;

    let config = load_config(&paths);
    let credentials = LocalCredentialStore::new(LocalStore::open_default()?);
    let assistant = Arc::new(ChatAssistant::new(
        config.assistant.clone(),
        credentials.credential(),
    ));

    let mut session = ChatSession {
        assistant,
        credentials,
        moods: MoodLog::new(),
        export_dir: config.export.directory.clone(),
    };

    // ===== REPL Setup =====
    let mut rl: Editor<ChatHelper, DefaultHistory> = Editor::new()?;
    rl.set_helper(Some(ChatHelper::new()));

    println!("{}", "=== MindTrack Assistant ===".bright_magenta().bold());
    println!(
        "{}",
        "AI-powered support for your academic journey. Type /help for commands.".bright_black()
    );
    println!();
    if session.assistant.mode() == GenerationMode::Offline {
        render::notice(OFFLINE_NOTICE);
        println!();
    }
    session.print_conversation();

    // ===== Main REPL Loop =====
    loop {
        match rl.readline(">> ") {
            Ok(line) => {
                let command = commands::parse(&line, session.assistant.shows_mood_chips());
                if !matches!(command, Command::Skip) {
                    let _ = rl.add_history_entry(line.as_str());
                }

                match command {
                    Command::Skip => continue,
                    Command::Quit => {
                        println!("{}", "Goodbye!".bright_green());
                        break;
                    }
                    Command::Send(input) => {
                        println!();
                        session.send(input).await;
                        if session.assistant.shows_mood_chips() {
                            render::print_mood_chips();
                        }
                    }
                    Command::Mood(arg) => session.mood(arg),
                    Command::Save(format) => session.save(format),
                    Command::Share => session.share(),
                    Command::Clear => session.clear(),
                    Command::Key(arg) => session.key(arg),
                    Command::Help => render::print_help(),
                    Command::Invalid(message) => render::notice(message),
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("{}", "CTRL-C detected. Type 'quit' to exit.".yellow());
            }
            Err(ReadlineError::Eof) => {
                println!("{}", "CTRL-D detected. Exiting...".bright_green());
                break;
            }
            Err(err) => {
                eprintln!("{}", format!("Error: {:?}", err).red());
                break;
            }
        }
    }

    session.assistant.close();
    tracing::info!("Chat session ended");
    Ok(())
}
