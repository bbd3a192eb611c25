//! Command history management.
//!
//! Handles persistent command history with configurable limits.

use anyhow::Result;
use rustyline::config::Configurer;
use rustyline::history::FileHistory;
use rustyline::{Editor, Helper};
use std::fs;
use std::path::PathBuf;

/// Configuration for command history.
#[derive(Debug, Clone)]
pub struct HistoryConfig {
    pub path: PathBuf,
    /// Maximum number of entries to keep.
    pub max_entries: usize,
    /// Skip a line identical to the previous one.
    pub ignore_dups: bool,
    /// Skip lines typed with a leading space.
    pub ignore_space: bool,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("history"),
            max_entries: 1000,
            ignore_dups: true,
            ignore_space: true,
        }
    }
}

impl HistoryConfig {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            ..Default::default()
        }
    }

    pub fn with_max_entries(mut self, max: usize) -> Self {
        self.max_entries = max;
        self
    }

    pub fn with_ignore_dups(mut self, ignore: bool) -> Self {
        self.ignore_dups = ignore;
        self
    }

    /// Configures `editor` and loads any saved history into it.
    pub fn apply<H: Helper>(&self, editor: &mut Editor<H, FileHistory>) -> Result<()> {
        editor.set_max_history_size(self.max_entries)?;
        editor.set_history_ignore_dups(self.ignore_dups)?;
        editor.set_history_ignore_space(self.ignore_space);

        if self.path.exists() {
            if let Err(e) = editor.load_history(&self.path) {
                log::warn!("Could not load history: {}", e);
            } else {
                log::debug!("Loaded history from {}", self.path.display());
            }
        }

        Ok(())
    }

    /// Writes the history of `editor` to [`HistoryConfig::path`].
    pub fn save<H: Helper>(&self, editor: &mut Editor<H, FileHistory>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        editor.save_history(&self.path)?;
        log::debug!("Saved history to {}", self.path.display());
        Ok(())
    }
}
