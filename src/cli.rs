use clap::Parser;
use log::LevelFilter;
use std::path::PathBuf;

use crate::config::{AppConfig, PasswordScheme, TagIndexMode};

#[derive(Debug, Parser)]
#[command(name = "tagbook")]
#[command(version)]
#[command(about = "Keeps keywords organised with tags", long_about = None)]
pub struct Cli {
    /// Directory holding the credential file, user data, history and log
    #[arg(long, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Account to log in as (prompted for when omitted)
    #[arg(short, long)]
    pub user: Option<String>,

    /// Create the account before logging in
    #[arg(long)]
    pub register: bool,

    /// Drop tags from the tag index once no entry uses them
    #[arg(long)]
    pub prune_tags: bool,

    /// Hash new passwords with salted Argon2id instead of plain SHA-256
    #[arg(long)]
    pub argon2: bool,

    /// Minimum level written to the log file
    #[arg(long, value_name = "LEVEL", default_value = "info")]
    pub log_level: LevelFilter,
}

impl Cli {
    /// Builds the runtime configuration from the parsed flags.
    pub fn app_config(&self) -> anyhow::Result<AppConfig> {
        let config = match &self.data_dir {
            Some(dir) => AppConfig::new(dir.clone()),
            None => AppConfig::in_home_dir()?,
        };

        let mode = if self.prune_tags {
            TagIndexMode::Prune
        } else {
            TagIndexMode::Accumulate
        };
        let scheme = if self.argon2 {
            PasswordScheme::Argon2
        } else {
            PasswordScheme::Sha256
        };

        Ok(config
            .with_tag_index_mode(mode)
            .with_password_scheme(scheme))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["tagbook", "--data-dir", "/tmp/tb"]).unwrap();
        assert!(!cli.register);
        assert_eq!(cli.log_level, LevelFilter::Info);

        let config = cli.app_config().unwrap();
        assert_eq!(config.data_dir, PathBuf::from("/tmp/tb"));
        assert_eq!(config.tag_index_mode, TagIndexMode::Accumulate);
        assert_eq!(config.password_scheme, PasswordScheme::Sha256);
    }

    #[test]
    fn test_all_flags() {
        let cli = Cli::try_parse_from([
            "tagbook",
            "--data-dir",
            "/tmp/tb",
            "-u",
            "alice",
            "--register",
            "--prune-tags",
            "--argon2",
            "--log-level",
            "debug",
        ])
        .unwrap();

        assert_eq!(cli.user.as_deref(), Some("alice"));
        assert!(cli.register);
        assert_eq!(cli.log_level, LevelFilter::Debug);

        let config = cli.app_config().unwrap();
        assert_eq!(config.tag_index_mode, TagIndexMode::Prune);
        assert_eq!(config.password_scheme, PasswordScheme::Argon2);
    }

    #[test]
    fn test_rejects_bad_log_level() {
        assert!(Cli::try_parse_from(["tagbook", "--log-level", "loud"]).is_err());
    }
}
