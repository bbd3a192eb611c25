//! Tag parsing and the derived tag index.

use std::collections::BTreeSet;
use std::ops::Bound;

use crate::config::TagIndexMode;
use crate::entry::Entry;

/// Splits a comma-separated tag list, trimming each tag and dropping blanks
/// and repeats. Order of first appearance is kept.
pub fn parse_tags(text: &str) -> Vec<String> {
    let mut tags = Vec::new();
    push_unique(&mut tags, text.split(','));
    tags
}

/// Appends each non-blank tag not already present in `tags`.
///
/// Returns the tags that were actually appended.
pub fn push_unique<I, S>(tags: &mut Vec<String>, incoming: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut appended = Vec::new();
    for tag in incoming {
        let tag = tag.as_ref().trim();
        if tag.is_empty() || tags.iter().any(|t| t == tag) {
            continue;
        }
        tags.push(tag.to_string());
        appended.push(tag.to_string());
    }
    appended
}

/// Sorted prefix matches from a set of names.
pub fn prefix_matches<'a>(
    names: &'a BTreeSet<String>,
    prefix: &'a str,
) -> impl Iterator<Item = &'a String> + 'a {
    names
        .range::<str, _>((Bound::Included(prefix), Bound::Unbounded))
        .take_while(move |name| name.starts_with(prefix))
}

/// Every tag in use across a user's entries.
///
/// In [`TagIndexMode::Accumulate`] the index only grows between loads, so a
/// tag stays listed after the last entry carrying it is deleted.
#[derive(Debug, Clone, Default)]
pub struct TagIndex {
    tags: BTreeSet<String>,
    mode: TagIndexMode,
}

impl TagIndex {
    pub fn new(mode: TagIndexMode) -> Self {
        Self {
            tags: BTreeSet::new(),
            mode,
        }
    }

    /// Builds the index from scratch.
    pub fn from_entries(entries: &[Entry], mode: TagIndexMode) -> Self {
        let mut index = Self::new(mode);
        index.rebuild(entries);
        index
    }

    pub fn rebuild(&mut self, entries: &[Entry]) {
        self.tags = entries
            .iter()
            .flat_map(|e| e.tags.iter().cloned())
            .collect();
    }

    pub fn extend<I, S>(&mut self, tags: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for tag in tags {
            self.tags.insert(tag.as_ref().to_string());
        }
    }

    /// Called after tags may have fallen out of use.
    pub fn on_tags_dropped(&mut self, entries: &[Entry]) {
        if self.mode == TagIndexMode::Prune {
            let before = self.tags.len();
            self.rebuild(entries);
            log::debug!("Pruned {} unused tags", before - self.tags.len());
        }
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.tags.iter().map(String::as_str)
    }

    pub fn completions(&self, prefix: &str) -> Vec<String> {
        prefix_matches(&self.tags, prefix).cloned().collect()
    }

    pub fn as_set(&self) -> &BTreeSet<String> {
        &self.tags
    }

    pub fn mode(&self) -> TagIndexMode {
        self.mode
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }
}
