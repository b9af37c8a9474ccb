// src/watch/state.rs

use std::collections::BTreeMap;
use std::fmt;

/// Classification of one reported path within a poll cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChangeKind {
    Added,
    Modified,
    Deleted,
}

impl fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ChangeKind::Added => "added",
            ChangeKind::Modified => "modified",
            ChangeKind::Deleted => "deleted",
        };
        f.write_str(s)
    }
}

/// Snapshot of the tracked tree: relative path -> last successfully
/// observed content hash.
///
/// Invariant: after any successful poll cycle, every key corresponds to a
/// file that was present and not excluded during that cycle. A file whose
/// read failed keeps its previous hash (if any); it is never recorded with
/// a sentinel value.
///
/// This is an explicit value passed into and returned from tracker
/// operations, so several roots (or test instances) can be tracked side by
/// side without shared hidden state. Nothing is persisted across runs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WatchState {
    hashes: BTreeMap<String, String>,
}

impl WatchState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.hashes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hashes.is_empty()
    }

    pub fn contains(&self, rel_path: &str) -> bool {
        self.hashes.contains_key(rel_path)
    }

    pub fn hash_of(&self, rel_path: &str) -> Option<&str> {
        self.hashes.get(rel_path).map(String::as_str)
    }

    pub fn insert(&mut self, rel_path: impl Into<String>, hash: impl Into<String>) {
        self.hashes.insert(rel_path.into(), hash.into());
    }

    pub fn remove(&mut self, rel_path: &str) -> Option<String> {
        self.hashes.remove(rel_path)
    }

    /// Iterate over all tracked relative paths.
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.hashes.keys().map(String::as_str)
    }
}

/// All paths reported in one poll cycle, with their classification.
///
/// Produced fresh each cycle. Iteration order is deterministic (sorted by
/// path) but not part of the contract.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeSet {
    changes: BTreeMap<String, ChangeKind>,
}

impl ChangeSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, rel_path: impl Into<String>, kind: ChangeKind) {
        self.changes.insert(rel_path.into(), kind);
    }

    pub fn len(&self) -> usize {
        self.changes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    pub fn kind_of(&self, rel_path: &str) -> Option<ChangeKind> {
        self.changes.get(rel_path).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, ChangeKind)> {
        self.changes.iter().map(|(p, k)| (p.as_str(), *k))
    }

    /// Just the reported paths, without classification.
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.changes.keys().map(String::as_str)
    }
}
