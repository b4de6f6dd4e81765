pub mod chat;
pub mod config;
pub mod error;
pub mod focus;
pub mod insights;
pub mod mood;
pub mod secret;
pub mod user;

// Re-export common error type
pub use error::MindTrackError;
