pub mod account;
pub mod focus;
pub mod insights;
pub mod key;
pub mod timer;
