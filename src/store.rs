//! Per-user entry store.
//!
//! Holds one user's entries in memory and rewrites the whole data file after
//! every change. Indices are positions in the entry list and shift on delete.

use rand::Rng;
use rand::seq::IndexedRandom;
use std::fs::File;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use crate::config::TagIndexMode;
use crate::entry::Entry;
use crate::error::{Error, Result};
use crate::storage;
use crate::tags::TagIndex;
use crate::transfer::{self, ImportRow};

/// Outcome of a CSV import.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub added: usize,
    pub updated: usize,
}

pub struct EntryStore {
    path: PathBuf,
    entries: Vec<Entry>,
    tag_index: TagIndex,
}

impl EntryStore {
    /// Loads the data file at `path`. A missing or corrupt file is an empty store.
    pub fn open(path: PathBuf, mode: TagIndexMode) -> Result<Self> {
        let mut entries: Vec<Entry> = storage::load_json_or_default(&path)?;
        for entry in &mut entries {
            entry.normalize();
        }
        let tag_index = TagIndex::from_entries(&entries, mode);
        log::info!(
            "Loaded {} entries and {} tags from {}",
            entries.len(),
            tag_index.len(),
            path.display()
        );
        Ok(Self {
            path,
            entries,
            tag_index,
        })
    }

    /// Appends a new entry and returns a copy of it.
    pub fn add(&mut self, keyword: &str, tags: Vec<String>) -> Result<Entry> {
        let keyword = keyword.trim();
        if keyword.is_empty() {
            return Err(Error::EmptyKeyword);
        }

        let entry = Entry::new(keyword, tags);
        let mut entries = self.entries.clone();
        entries.push(entry.clone());
        self.commit(entries)?;
        self.tag_index.extend(&entry.tags);

        log::info!("Added '{}'", keyword);
        Ok(entry)
    }

    /// Adds then removes tags on the entry at `index`.
    ///
    /// Out-of-range indices are ignored; the return value says whether an
    /// entry was touched.
    pub fn update(
        &mut self,
        index: usize,
        tags_to_add: &[String],
        tags_to_remove: &[String],
    ) -> Result<bool> {
        if index >= self.entries.len() {
            log::debug!("Update ignored: no entry at index {}", index);
            return Ok(false);
        }

        let mut entries = self.entries.clone();
        let entry = &mut entries[index];
        let added = entry.add_tags(tags_to_add);
        let removed = entry.remove_tags(tags_to_remove);
        let keyword = entry.keyword.clone();
        self.commit(entries)?;

        log::info!("Updated '{}': +{} -{} tags", keyword, added.len(), removed);
        self.tag_index.extend(added);
        if removed > 0 {
            self.tag_index.on_tags_dropped(&self.entries);
        }
        Ok(true)
    }

    /// Removes the entry at `index`, shifting later entries down.
    pub fn delete(&mut self, index: usize) -> Result<Option<Entry>> {
        if index >= self.entries.len() {
            log::debug!("Delete ignored: no entry at index {}", index);
            return Ok(None);
        }

        let mut entries = self.entries.clone();
        let removed = entries.remove(index);
        self.commit(entries)?;
        self.tag_index.on_tags_dropped(&self.entries);

        log::info!("Deleted '{}'", removed.keyword);
        Ok(Some(removed))
    }

    pub fn pick_random(&self) -> Option<&Entry> {
        self.pick_random_with(&mut rand::rng())
    }

    pub fn pick_random_with<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&Entry> {
        self.entries.choose(rng)
    }

    /// Imports CSV rows, merging into entries with the same keyword.
    ///
    /// Nothing is applied unless every row parses.
    pub fn import_csv<R: Read>(&mut self, reader: R) -> Result<ImportSummary> {
        let rows = transfer::read_rows(reader)?;
        self.import_rows(rows)
    }

    pub fn import_csv_file(&mut self, path: &Path) -> Result<ImportSummary> {
        let file = File::open(path)?;
        self.import_csv(file)
    }

    /// Merges already parsed rows and persists once at the end.
    ///
    /// `updated` counts distinct entries that existed before the batch and
    /// matched at least one row. Rows that match an entry added earlier in the
    /// same batch merge into it without being counted again.
    pub fn import_rows(&mut self, rows: Vec<ImportRow>) -> Result<ImportSummary> {
        let mut entries = self.entries.clone();
        let existing = entries.len();
        let mut touched = vec![false; existing];
        let mut summary = ImportSummary::default();
        let mut new_tags = Vec::new();

        for row in rows {
            match entries.iter().position(|e| e.keyword == row.keyword) {
                Some(i) => {
                    new_tags.extend(entries[i].add_tags(&row.tags));
                    if i < existing && !touched[i] {
                        touched[i] = true;
                        summary.updated += 1;
                    }
                }
                None => {
                    let entry = Entry::new(row.keyword, row.tags);
                    new_tags.extend(entry.tags.iter().cloned());
                    entries.push(entry);
                    summary.added += 1;
                }
            }
        }

        self.commit(entries)?;
        self.tag_index.extend(new_tags);

        log::info!(
            "Imported CSV: {} added, {} updated",
            summary.added,
            summary.updated
        );
        Ok(summary)
    }

    pub fn export_csv<W: Write>(&self, writer: W) -> Result<()> {
        transfer::write_entries(writer, &self.entries)?;
        log::info!("Exported {} entries", self.entries.len());
        Ok(())
    }

    pub fn export_csv_file(&self, path: &Path) -> Result<()> {
        let file = File::create(path)?;
        self.export_csv(file)
    }

    pub fn to_csv_string(&self) -> Result<String> {
        let mut out = Vec::new();
        self.export_csv(&mut out)?;
        String::from_utf8(out).map_err(|e| Error::Other(e.into()))
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn get(&self, index: usize) -> Option<&Entry> {
        self.entries.get(index)
    }

    pub fn tags(&self) -> &TagIndex {
        &self.tag_index
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Persists `entries` and only then makes them current, so a failed
    /// write leaves the store as it was.
    fn commit(&mut self, entries: Vec<Entry>) -> Result<()> {
        storage::save_json(&self.path, &entries)?;
        self.entries = entries;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::fs;
    use tempfile::TempDir;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn open_in(dir: &TempDir, mode: TagIndexMode) -> EntryStore {
        EntryStore::open(dir.path().join("alice.json"), mode).unwrap()
    }

    #[test]
    fn test_add_rejects_blank_keyword() {
        let dir = TempDir::new().unwrap();
        let mut store = open_in(&dir, TagIndexMode::Accumulate);

        assert!(matches!(store.add("   ", vec![]), Err(Error::EmptyKeyword)));
        assert!(store.is_empty());
        assert!(!store.path().exists());
    }

    #[test]
    fn test_add_persists_and_indexes() {
        let dir = TempDir::new().unwrap();
        let mut store = open_in(&dir, TagIndexMode::Accumulate);

        store.add("ML", strings(&["ai", "ai", "study"])).unwrap();
        assert_eq!(store.get(0).unwrap().tags, strings(&["ai", "study"]));
        assert!(store.tags().contains("study"));

        let reopened = open_in(&dir, TagIndexMode::Accumulate);
        assert_eq!(reopened.entries(), store.entries());
    }

    #[test]
    fn test_duplicate_keywords_allowed_on_add() {
        let dir = TempDir::new().unwrap();
        let mut store = open_in(&dir, TagIndexMode::Accumulate);
        store.add("Go", vec![]).unwrap();
        store.add("Go", strings(&["lang"])).unwrap();
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_update_add_before_remove() {
        let dir = TempDir::new().unwrap();
        let mut store = open_in(&dir, TagIndexMode::Accumulate);
        store.add("ML", strings(&["ai"])).unwrap();

        let touched = store
            .update(0, &strings(&["nlp"]), &strings(&["ai"]))
            .unwrap();
        assert!(touched);
        assert_eq!(store.get(0).unwrap(), &Entry::new("ML", strings(&["nlp"])));

        store
            .update(0, &strings(&["x"]), &strings(&["x"]))
            .unwrap();
        assert_eq!(store.get(0).unwrap().tags, strings(&["nlp"]));
        assert!(store.tags().contains("x"));
    }

    #[test]
    fn test_update_out_of_range_is_noop() {
        let dir = TempDir::new().unwrap();
        let mut store = open_in(&dir, TagIndexMode::Accumulate);
        store.add("ML", strings(&["ai"])).unwrap();

        assert!(!store.update(5, &strings(&["x"]), &[]).unwrap());
        assert!(!store.tags().contains("x"));
    }

    #[test]
    fn test_add_then_delete_restores_list_but_not_index() {
        let dir = TempDir::new().unwrap();
        let mut store = open_in(&dir, TagIndexMode::Accumulate);
        store.add("Rust", strings(&["lang"])).unwrap();
        let before = store.entries().to_vec();

        store.add("Temp", strings(&["scratch"])).unwrap();
        let removed = store.delete(1).unwrap();

        assert_eq!(removed.unwrap().keyword, "Temp");
        assert_eq!(store.entries(), before.as_slice());
        assert!(store.tags().contains("scratch"));

        // The next load starts from the entries alone.
        let reopened = open_in(&dir, TagIndexMode::Accumulate);
        assert!(!reopened.tags().contains("scratch"));
    }

    #[test]
    fn test_delete_prune_mode() {
        let dir = TempDir::new().unwrap();
        let mut store = open_in(&dir, TagIndexMode::Prune);
        store.add("Rust", strings(&["lang"])).unwrap();
        store.add("Temp", strings(&["scratch", "lang"])).unwrap();

        store.delete(1).unwrap();
        assert!(!store.tags().contains("scratch"));
        assert!(store.tags().contains("lang"));

        store.update(0, &[], &strings(&["lang"])).unwrap();
        assert!(store.tags().is_empty());
    }

    #[test]
    fn test_delete_out_of_range_is_noop() {
        let dir = TempDir::new().unwrap();
        let mut store = open_in(&dir, TagIndexMode::Accumulate);
        store.add("A", vec![]).unwrap();
        assert!(store.delete(1).unwrap().is_none());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_pick_random() {
        let dir = TempDir::new().unwrap();
        let mut store = open_in(&dir, TagIndexMode::Accumulate);
        assert!(store.pick_random().is_none());

        store.add("A", vec![]).unwrap();
        store.add("B", vec![]).unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..20 {
            let picked = store.pick_random_with(&mut rng).unwrap();
            assert!(picked.keyword == "A" || picked.keyword == "B");
        }
    }

    #[test]
    fn test_import_merges_within_batch() {
        let dir = TempDir::new().unwrap();
        let mut store = open_in(&dir, TagIndexMode::Accumulate);

        let csv = "Keyword,Tags\nX,\"a, b\"\nX,\"b, c\"\n";
        let summary = store.import_csv(csv.as_bytes()).unwrap();

        assert_eq!(summary, ImportSummary { added: 1, updated: 0 });
        assert_eq!(store.entries(), &[Entry::new("X", strings(&["a", "b", "c"]))]);
        assert_eq!(store.tags().len(), 3);
    }

    #[test]
    fn test_import_merges_into_existing() {
        let dir = TempDir::new().unwrap();
        let mut store = open_in(&dir, TagIndexMode::Accumulate);
        store.add("ML", strings(&["ai"])).unwrap();

        let csv = "Keyword,Tags\nML,\"nlp, ai\"\nGo,lang\n";
        let summary = store.import_csv(csv.as_bytes()).unwrap();

        assert_eq!(summary, ImportSummary { added: 1, updated: 1 });
        assert_eq!(store.get(0).unwrap().tags, strings(&["ai", "nlp"]));
        assert_eq!(store.get(1).unwrap().keyword, "Go");
    }

    #[test]
    fn test_import_failure_leaves_store_untouched() {
        let dir = TempDir::new().unwrap();
        let mut store = open_in(&dir, TagIndexMode::Accumulate);
        store.add("ML", strings(&["ai"])).unwrap();
        let on_disk = fs::read_to_string(store.path()).unwrap();

        let csv: &[u8] = b"Keyword,Tags\nML,new\nGo,\xff\n";
        assert!(matches!(store.import_csv(csv), Err(Error::Import { .. })));

        assert_eq!(store.get(0).unwrap().tags, strings(&["ai"]));
        assert_eq!(store.len(), 1);
        assert!(!store.tags().contains("new"));
        assert_eq!(fs::read_to_string(store.path()).unwrap(), on_disk);
    }

    #[test]
    fn test_export_round_trip() {
        let dir = TempDir::new().unwrap();
        let mut store = open_in(&dir, TagIndexMode::Accumulate);
        store.add("Machine Learning", strings(&["ai", "study"])).unwrap();
        store.add("Rust", vec![]).unwrap();

        let csv = store.to_csv_string().unwrap();

        let other_dir = TempDir::new().unwrap();
        let mut fresh = open_in(&other_dir, TagIndexMode::Accumulate);
        let summary = fresh.import_csv(csv.as_bytes()).unwrap();

        assert_eq!(summary, ImportSummary { added: 2, updated: 0 });
        assert_eq!(fresh.entries(), store.entries());
    }

    #[test]
    fn test_export_empty_store() {
        let dir = TempDir::new().unwrap();
        let store = open_in(&dir, TagIndexMode::Accumulate);
        assert_eq!(store.to_csv_string().unwrap(), "");
    }

    #[test]
    fn test_empty_export_imports_as_nothing() {
        let dir = TempDir::new().unwrap();
        let mut store = open_in(&dir, TagIndexMode::Accumulate);

        let csv = store.to_csv_string().unwrap();
        let summary = store.import_csv(csv.as_bytes()).unwrap();

        assert_eq!(summary, ImportSummary::default());
        assert!(store.is_empty());
        assert!(store.tags().is_empty());
    }

    /// A directory squatting on the data file path makes every save fail.
    fn block_saves(store: &EntryStore) -> std::path::PathBuf {
        let tmp = store.path().with_file_name("alice.json.tmp");
        fs::create_dir_all(&tmp).unwrap();
        tmp
    }

    #[test]
    fn test_failed_save_leaves_store_unchanged() {
        let dir = TempDir::new().unwrap();
        let mut store = open_in(&dir, TagIndexMode::Prune);
        store.add("ML", strings(&["ai"])).unwrap();
        let before = store.entries().to_vec();

        let blocker = block_saves(&store);
        assert!(store.add("Failed", strings(&["lost"])).is_err());
        assert!(store.update(0, &strings(&["nlp"]), &strings(&["ai"])).is_err());
        assert!(store.delete(0).is_err());

        assert_eq!(store.entries(), before.as_slice());
        assert!(store.tags().contains("ai"));
        assert!(!store.tags().contains("lost"));
        assert!(!store.tags().contains("nlp"));

        fs::remove_dir(&blocker).unwrap();
        store.add("Second", vec![]).unwrap();

        let reopened = open_in(&dir, TagIndexMode::Accumulate);
        let keywords: Vec<&str> = reopened.entries().iter().map(|e| e.keyword.as_str()).collect();
        assert_eq!(keywords, vec!["ML", "Second"]);
    }

    #[test]
    fn test_corrupt_data_file_loads_empty() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("alice.json"), "[{\"Keyword\": ").unwrap();
        let store = open_in(&dir, TagIndexMode::Accumulate);
        assert!(store.is_empty());
        assert!(store.tags().is_empty());
    }
}
