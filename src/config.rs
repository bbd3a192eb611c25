use anyhow::{Result, anyhow};
use std::path::{Path, PathBuf};

use crate::storage::user_file_stem;

/// How the tag index reacts when tags stop being used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TagIndexMode {
    /// Tags stay in the index until the next load, even when no entry uses them.
    #[default]
    Accumulate,
    /// The index is rebuilt after every delete or tag removal.
    Prune,
}

/// Hash format used for newly registered passwords.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PasswordScheme {
    /// Unsalted SHA-256, hex encoded.
    #[default]
    Sha256,
    /// Argon2id PHC string with a random salt.
    Argon2,
}

/// Runtime configuration shared by the manager and the shell.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub data_dir: PathBuf,
    pub tag_index_mode: TagIndexMode,
    pub password_scheme: PasswordScheme,
}

impl AppConfig {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            tag_index_mode: TagIndexMode::default(),
            password_scheme: PasswordScheme::default(),
        }
    }

    /// Config rooted at `~/.tagbook`.
    pub fn in_home_dir() -> Result<Self> {
        Ok(Self::new(default_data_dir()?))
    }

    pub fn with_tag_index_mode(mut self, mode: TagIndexMode) -> Self {
        self.tag_index_mode = mode;
        self
    }

    pub fn with_password_scheme(mut self, scheme: PasswordScheme) -> Self {
        self.password_scheme = scheme;
        self
    }

    pub fn credentials_path(&self) -> PathBuf {
        self.data_dir.join("users.json")
    }

    /// Per-user data file. The name is derived from the username with
    /// anything but ASCII alphanumerics, `_` and `-` stripped.
    pub fn user_data_path(&self, username: &str) -> PathBuf {
        self.user_data_dir()
            .join(format!("{}.json", user_file_stem(username)))
    }

    pub fn user_data_dir(&self) -> PathBuf {
        self.data_dir.join("data")
    }

    pub fn log_path(&self) -> PathBuf {
        self.data_dir.join("tagbook.log")
    }

    /// Shell history for one user, named like the data file.
    pub fn history_path(&self, username: &str) -> PathBuf {
        self.data_dir.join("history").join(user_file_stem(username))
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

pub fn default_data_dir() -> Result<PathBuf> {
    dirs_next::home_dir()
        .map(|home| home.join(".tagbook"))
        .ok_or_else(|| anyhow!("Could not determine home directory"))
}
