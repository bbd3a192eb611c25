use crate::store::EntryStore;

/// An authenticated user together with their entry store.
///
/// Handed to every shell command explicitly; there is no global session.
pub struct Session {
    username: String,
    store: EntryStore,
}

impl Session {
    pub fn new(username: impl Into<String>, store: EntryStore) -> Self {
        Self {
            username: username.into(),
            store,
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn store(&self) -> &EntryStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut EntryStore {
        &mut self.store
    }
}

/// A session backed by a throwaway directory.
#[cfg(test)]
pub(crate) fn scratch_session() -> (Session, tempfile::TempDir) {
    use crate::config::TagIndexMode;

    let dir = tempfile::TempDir::new().unwrap();
    let store = EntryStore::open(dir.path().join("tester.json"), TagIndexMode::Accumulate).unwrap();
    (Session::new("tester", store), dir)
}
