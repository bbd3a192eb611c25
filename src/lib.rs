//! Tagbook - keyword bookkeeping with free-form tags.
//!
//! This library provides per-user keyword lists with tags, password-checked
//! accounts, CSV import and export, and a shell-like interactive interface.

pub mod cli;
pub mod config;
pub mod credentials;
pub mod crypto;
pub mod entry;
pub mod error;
pub mod logging;
pub mod manager;
pub mod session;
pub mod shell;
pub mod storage;
pub mod store;
pub mod tags;
pub mod transfer;

pub use config::{AppConfig, PasswordScheme, TagIndexMode};
pub use credentials::CredentialStore;
pub use entry::Entry;
pub use error::{Error, Result};
pub use logging::{LogConfig, init_logging};
pub use manager::Manager;
pub use session::Session;
pub use shell::Shell;
pub use store::{EntryStore, ImportSummary};
pub use tags::TagIndex;
