pub mod account_service;
pub mod config_service;
pub mod credential_store;
pub mod focus_settings_repository;
pub mod local_store;
pub mod logging;
pub mod paths;
pub mod storage;
pub mod transcript;

pub use crate::account_service::LocalAccountService;
pub use crate::config_service::ConfigService;
pub use crate::credential_store::LocalCredentialStore;
pub use crate::focus_settings_repository::LocalFocusSettingsRepository;
pub use crate::local_store::LocalStore;
pub use crate::logging::init_logging;
pub use crate::paths::MindTrackPaths;
pub use crate::transcript::{Clipboard, SystemClipboard, save_transcript, share_transcript};
