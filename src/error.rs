//! Error types for tagbook operations.
//!
//! Validation and authentication failures are distinct variants so the shell
//! can report them verbatim. Corrupt JSON on disk never shows up here: the
//! storage layer recovers from it by loading an empty store.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Keyword cannot be empty")]
    EmptyKeyword,

    #[error("Username and password cannot be empty")]
    BlankCredentials,

    #[error("Username '{0}' must contain at least one letter, digit, '_' or '-'")]
    InvalidUsername(String),

    #[error("Username '{username}' would share a data file with existing user '{existing}'")]
    UsernameCollision { username: String, existing: String },

    #[error("User '{0}' already exists")]
    DuplicateUser(String),

    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("CSV is missing the required '{0}' column")]
    MissingColumn(&'static str),

    #[error("Import aborted at row {row}: {source}")]
    Import {
        row: usize,
        #[source]
        source: csv::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl Error {
    /// True for failures caused by bad user input rather than the environment.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Error::EmptyKeyword
                | Error::BlankCredentials
                | Error::InvalidUsername(_)
                | Error::UsernameCollision { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, Error>;
