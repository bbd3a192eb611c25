use crate::config::AppConfig;
use crate::credentials::CredentialStore;
use crate::error::Result;
use crate::session::Session;
use crate::store::EntryStore;

/// Entry point for account handling: registration and login.
pub struct Manager {
    config: AppConfig,
    credentials: CredentialStore,
}

impl Manager {
    /// Loads the credential file named by `config`.
    pub fn new(config: AppConfig) -> Result<Self> {
        let credentials =
            CredentialStore::open(config.credentials_path(), config.password_scheme)?;
        Ok(Self {
            config,
            credentials,
        })
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn credentials(&self) -> &CredentialStore {
        &self.credentials
    }

    /// True when no account has been registered yet.
    pub fn is_first_run(&self) -> bool {
        self.credentials.is_empty()
    }

    pub fn register(&mut self, username: &str, password: &str) -> Result<()> {
        self.credentials.register(username, password)
    }

    /// Checks the password and opens the user's entry store.
    pub fn login(&self, username: &str, password: &str) -> Result<Session> {
        self.credentials.authenticate(username, password)?;

        let username = username.trim();
        let store = EntryStore::open(
            self.config.user_data_path(username),
            self.config.tag_index_mode,
        )?;
        log::info!("User '{}' logged in", username);
        Ok(Session::new(username, store))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use tempfile::TempDir;

    #[test]
    fn test_first_run_then_login() {
        let dir = TempDir::new().unwrap();
        let mut manager = Manager::new(AppConfig::new(dir.path())).unwrap();
        assert!(manager.is_first_run());

        manager.register("alice", "pw").unwrap();
        assert!(!manager.is_first_run());

        let session = manager.login("alice", "pw").unwrap();
        assert_eq!(session.username(), "alice");
        assert!(session.store().is_empty());
        assert_eq!(
            session.store().path(),
            dir.path().join("data").join("alice.json")
        );
    }

    #[test]
    fn test_login_rejects_wrong_password() {
        let dir = TempDir::new().unwrap();
        let mut manager = Manager::new(AppConfig::new(dir.path())).unwrap();
        manager.register("alice", "pw").unwrap();

        assert!(matches!(
            manager.login("alice", "nope"),
            Err(Error::InvalidCredentials)
        ));
    }

    #[test]
    fn test_users_have_separate_stores() {
        let dir = TempDir::new().unwrap();
        let mut manager = Manager::new(AppConfig::new(dir.path())).unwrap();
        manager.register("alice", "a").unwrap();
        manager.register("bob", "b").unwrap();

        let mut alice = manager.login("alice", "a").unwrap();
        alice.store_mut().add("ML", vec!["ai".into()]).unwrap();

        let bob = manager.login("bob", "b").unwrap();
        assert!(bob.store().is_empty());
    }
}
