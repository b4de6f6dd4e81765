use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use mindtrack_core::focus::FocusSettingsRepository;
use mindtrack_infrastructure::{
    LocalAccountService, LocalCredentialStore, LocalFocusSettingsRepository, LocalStore,
    MindTrackPaths, init_logging,
};

mod commands;

use commands::focus::FocusUpdate;
use commands::insights::Range;

#[derive(Parser)]
#[command(name = "mindtrack")]
#[command(
    about = "MindTrack CLI - mood tracking and study support for students",
    long_about = None
)]
struct Cli {
    /// Use this directory instead of the platform config directory
    #[arg(long, global = true, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage the OpenAI API key used by the chat assistant
    Key {
        #[command(subcommand)]
        action: KeyAction,
    },
    /// Show or change focus timer settings
    Focus {
        #[command(subcommand)]
        action: FocusAction,
    },
    /// Local account (no real authentication)
    Account {
        #[command(subcommand)]
        action: AccountAction,
    },
    /// Print mood and performance insights
    Insights {
        #[command(subcommand)]
        view: InsightsView,
    },
    /// Run the focus timer
    Timer {
        /// Stop after this many completed phases
        #[arg(long)]
        phases: Option<u32>,
    },
}

#[derive(Subcommand)]
enum KeyAction {
    /// Save a new API key
    Set { key: String },
    /// Show the saved key (masked)
    Show,
    /// Remove the saved key
    Clear,
}

#[derive(Subcommand)]
enum FocusAction {
    /// Show the saved settings
    Show,
    /// Update one or more settings
    Set {
        /// Focus length in minutes (5-60, steps of 5)
        #[arg(long = "focus")]
        focus_time: Option<u32>,
        /// Break length in minutes (1-30)
        #[arg(long = "break")]
        break_time: Option<u32>,
        /// Enable or disable phase notifications
        #[arg(long)]
        notifications: Option<bool>,
    },
}

#[derive(Subcommand)]
enum AccountAction {
    /// Sign in
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Create an account and sign in
    Signup {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Sign out
    Logout,
    /// Show who is signed in
    Whoami,
}

#[derive(Subcommand)]
enum InsightsView {
    /// Personal mood and productivity dashboard
    Student {
        #[arg(long, value_enum, default_value = "daily")]
        range: Range,
    },
    /// Mood vs performance correlation
    Correlation {
        /// Only show this subject
        #[arg(long)]
        subject: Option<String>,
    },
    /// Class overview for teachers
    Class,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let paths = MindTrackPaths::new(cli.data_dir.as_deref());
    let _log_guard = init_logging(&paths)?;
    let store = LocalStore::open(cli.data_dir.as_deref())?;

    match cli.command {
        Commands::Key { action } => {
            let credentials = LocalCredentialStore::new(store);
            match action {
                KeyAction::Set { key } => commands::key::set(&credentials, &key)?,
                KeyAction::Show => commands::key::show(&credentials)?,
                KeyAction::Clear => commands::key::clear(&credentials)?,
            }
        }
        Commands::Focus { action } => {
            let repo = LocalFocusSettingsRepository::new(store);
            match action {
                FocusAction::Show => commands::focus::show(&repo)?,
                FocusAction::Set {
                    focus_time,
                    break_time,
                    notifications,
                } => commands::focus::set(
                    &repo,
                    FocusUpdate {
                        focus_time,
                        break_time,
                        notifications,
                    },
                )?,
            }
        }
        Commands::Account { action } => {
            let service = LocalAccountService::new(store);
            match action {
                AccountAction::Login { email, password } => {
                    commands::account::login(&service, &email, &password)?
                }
                AccountAction::Signup {
                    name,
                    email,
                    password,
                } => commands::account::signup(&service, &name, &email, &password)?,
                AccountAction::Logout => commands::account::logout(&service)?,
                AccountAction::Whoami => commands::account::whoami(&service)?,
            }
        }
        Commands::Insights { view } => match view {
            InsightsView::Student { range } => commands::insights::student(range)?,
            InsightsView::Correlation { subject } => {
                commands::insights::correlation(subject.as_deref())?
            }
            InsightsView::Class => commands::insights::class()?,
        },
        Commands::Timer { phases } => {
            let settings = LocalFocusSettingsRepository::new(store).load()?;
            commands::timer::run(settings, phases).await?
        }
    }

    Ok(())
}
