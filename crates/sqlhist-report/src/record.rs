use chrono::{DateTime, FixedOffset};
use sqlhist_diff::Category;
use std::collections::{BTreeMap, BTreeSet};

/// Per-commit accumulator mapping each category to the set of files that
/// triggered it. A file may legitimately appear under several categories;
/// the sets are not a partition.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassificationResult {
    sets: BTreeMap<Category, BTreeSet<String>>,
}

impl ClassificationResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `path` under `category`. Duplicate insertions are no-ops.
    pub fn insert(&mut self, category: Category, path: &str) {
        self.sets
            .entry(category)
            .or_default()
            .insert(path.to_string());
    }

    /// The sorted file set for one category; empty when nothing was
    /// recorded.
    pub fn files(&self, category: Category) -> Vec<&str> {
        self.sets
            .get(&category)
            .map(|set| set.iter().map(String::as_str).collect())
            .unwrap_or_default()
    }

    /// Sorted file set joined with `;`, the cell format of the result
    /// table.
    pub fn joined(&self, category: Category) -> String {
        self.files(category).join(";")
    }

    pub fn is_empty(&self) -> bool {
        self.sets.values().all(|set| set.is_empty())
    }
}

/// One row of the mining result for a project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitRecord {
    pub commit: String,
    /// Committer date.
    pub commit_date: DateTime<FixedOffset>,
    /// Author date.
    pub author_date: DateTime<FixedOffset>,
    /// Count of all files changed by the commit.
    pub changed_files: usize,
    /// Count of changed `.sql` files.
    pub sql_files: usize,
    pub categories: ClassificationResult,
}
