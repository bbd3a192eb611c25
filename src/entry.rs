use serde::{Deserialize, Serialize};

use crate::tags::push_unique;

/// A keyword and its labels.
///
/// Field names on disk follow the `{"Keyword": .., "Tags": [..]}` layout of
/// the per-user data files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    #[serde(rename = "Keyword")]
    pub keyword: String,
    #[serde(rename = "Tags", default)]
    pub tags: Vec<String>,
}

impl Entry {
    /// Creates an entry, trimming and de-duplicating `tags`.
    pub fn new(keyword: impl Into<String>, tags: Vec<String>) -> Self {
        let mut entry = Self {
            keyword: keyword.into(),
            tags: Vec::with_capacity(tags.len()),
        };
        entry.add_tags(tags);
        entry
    }

    /// Appends tags not yet present. Returns the ones added.
    pub fn add_tags<I, S>(&mut self, tags: I) -> Vec<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        push_unique(&mut self.tags, tags)
    }

    /// Removes the given tags. Returns how many were present.
    pub fn remove_tags<I, S>(&mut self, tags: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let before = self.tags.len();
        for tag in tags {
            let tag = tag.as_ref().trim();
            self.tags.retain(|t| t != tag);
        }
        before - self.tags.len()
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// Tags as a single `", "`-joined string.
    pub fn joined_tags(&self) -> String {
        self.tags.join(", ")
    }

    /// Collapses repeated tags, keeping the first occurrence.
    pub(crate) fn normalize(&mut self) {
        let tags = std::mem::take(&mut self.tags);
        push_unique(&mut self.tags, tags);
    }
}
