//! User domain module.
//!
//! The account is a local stub: there is no password check and no token.
//!
//! # Module Structure
//!
//! - `model`: Logged-in user record (`UserStub`)
//! - `service`: Account service trait
//!
//! # Usage
//!
//! ```ignore
//! use mindtrack_core::user::{UserStub, AccountService};
//! ```

mod model;
mod service;

// Re-export public API
pub use model::UserStub;
pub use service::AccountService;
