//! Whole-file JSON persistence.
//!
//! Every store is read in full on open and rewritten in full on each change.
//! Writes land in a sibling `.tmp` file first and are renamed over the target.

use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::Result;

/// Loads JSON from `path`.
///
/// A missing, empty or malformed file (including invalid UTF-8) yields
/// `T::default()`; malformed content is logged and otherwise discarded.
/// Other IO errors propagate.
pub fn load_json_or_default<T>(path: &Path) -> Result<T>
where
    T: DeserializeOwned + Default,
{
    let content = match fs::read(path) {
        Ok(content) => content,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            log::debug!("{} does not exist yet", path.display());
            return Ok(T::default());
        }
        Err(e) => return Err(e.into()),
    };

    if content.iter().all(u8::is_ascii_whitespace) {
        return Ok(T::default());
    }

    match serde_json::from_slice(&content) {
        Ok(value) => Ok(value),
        Err(e) => {
            log::warn!(
                "Ignoring unreadable data in {}: {}",
                path.display(),
                e
            );
            Ok(T::default())
        }
    }
}

/// Serialises `value` as pretty JSON and atomically replaces `path`.
pub fn save_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let json = serde_json::to_string_pretty(value)?;
    let tmp_path = tmp_path_for(path);
    fs::write(&tmp_path, json)?;
    fs::rename(&tmp_path, path)?;
    log::debug!("Wrote {}", path.display());
    Ok(())
}

fn tmp_path_for(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

/// File stem for a user's data file.
pub fn user_file_stem(username: &str) -> String {
    username
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_' || *c == '-')
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_is_default() {
        let dir = TempDir::new().unwrap();
        let loaded: Vec<String> = load_json_or_default(&dir.path().join("absent.json")).unwrap();
        assert!(loaded.is_empty());
    }

    #[test]
    fn test_malformed_file_is_default() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("broken.json");
        fs::write(&path, "{ not json").unwrap();

        let loaded: BTreeMap<String, String> = load_json_or_default(&path).unwrap();
        assert!(loaded.is_empty());
    }

    #[test]
    fn test_invalid_utf8_file_is_default() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("binary.json");
        fs::write(&path, b"[{\"Keyword\": \"\xff\"}]").unwrap();

        let loaded: Vec<BTreeMap<String, String>> = load_json_or_default(&path).unwrap();
        assert!(loaded.is_empty());
    }

    #[test]
    fn test_save_then_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("map.json");

        let mut map = BTreeMap::new();
        map.insert("a".to_string(), "1".to_string());
        save_json(&path, &map).unwrap();

        let loaded: BTreeMap<String, String> = load_json_or_default(&path).unwrap();
        assert_eq!(loaded, map);
        assert!(!tmp_path_for(&path).exists());
    }

    #[test]
    fn test_user_file_stem() {
        assert_eq!(user_file_stem("alice"), "alice");
        assert_eq!(user_file_stem("a.l/i c\\e"), "alice");
        assert_eq!(user_file_stem("_bob-1"), "_bob-1");
        assert_eq!(user_file_stem("../.."), "");
        assert_eq!(user_file_stem("ünï"), "n");
    }
}
