use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::config::PasswordScheme;
use crate::crypto;
use crate::error::{Error, Result};
use crate::storage::{self, user_file_stem};

/// Username to password-hash mapping, persisted as a single JSON object.
pub struct CredentialStore {
    path: PathBuf,
    users: BTreeMap<String, String>,
    scheme: PasswordScheme,
}

impl CredentialStore {
    /// Opens the credential file, treating a missing or corrupt file as empty.
    pub fn open(path: PathBuf, scheme: PasswordScheme) -> Result<Self> {
        let users: BTreeMap<String, String> = storage::load_json_or_default(&path)?;
        log::debug!("Loaded {} users from {}", users.len(), path.display());
        Ok(Self {
            path,
            users,
            scheme,
        })
    }

    pub fn register(&mut self, username: &str, password: &str) -> Result<()> {
        let username = username.trim();
        if username.is_empty() || password.is_empty() {
            return Err(Error::BlankCredentials);
        }
        if self.users.contains_key(username) {
            return Err(Error::DuplicateUser(username.to_string()));
        }

        let stem = user_file_stem(username);
        if stem.is_empty() {
            return Err(Error::InvalidUsername(username.to_string()));
        }
        if let Some(existing) = self.users.keys().find(|u| user_file_stem(u) == stem) {
            return Err(Error::UsernameCollision {
                username: username.to_string(),
                existing: existing.clone(),
            });
        }

        let hash = crypto::hash_password(password, self.scheme)?;
        let mut users = self.users.clone();
        users.insert(username.to_string(), hash);
        storage::save_json(&self.path, &users)?;
        self.users = users;
        log::info!("Registered user '{}'", username);
        Ok(())
    }

    pub fn authenticate(&self, username: &str, password: &str) -> Result<()> {
        let username = username.trim();
        if username.is_empty() || password.is_empty() {
            return Err(Error::BlankCredentials);
        }

        match self.users.get(username) {
            Some(stored) if crypto::verify_password(password, stored) => Ok(()),
            _ => {
                log::warn!("Failed login for '{}'", username);
                Err(Error::InvalidCredentials)
            }
        }
    }

    pub fn contains(&self, username: &str) -> bool {
        self.users.contains_key(username.trim())
    }

    pub fn usernames(&self) -> impl Iterator<Item = &str> {
        self.users.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}
