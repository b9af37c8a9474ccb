// src/watch/tracker.rs

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};
use walkdir::{DirEntry, WalkDir};

use crate::config::model::ConfigFile;
use crate::errors::{PollwatchError, Result};
use crate::types::WalkErrorBehaviour;
use crate::watch::exclude::ExclusionPolicy;
use crate::watch::hash::hash_file;
use crate::watch::state::{ChangeKind, ChangeSet, WatchState};

/// Detects filesystem changes under a root directory across successive
/// polls by re-walking the tree and comparing content hashes.
///
/// The tracker itself is immutable; all mutable state lives in the
/// [`WatchState`] value the caller passes in, so one tracker can be reused
/// and several roots can be tracked side by side.
///
/// Symbolic links are not followed (`follow_links(false)`), so a symlinked
/// directory cycle cannot hang the walk; symlinks are simply never
/// tracked. There is no snapshot isolation: a file changed concurrently
/// with the walk may be observed in either state.
#[derive(Debug, Clone)]
pub struct ChangeTracker {
    root: PathBuf,
    policy: ExclusionPolicy,
    on_walk_error: WalkErrorBehaviour,
}

/// Outcome of probing a single file during a walk.
///
/// Excluded files never reach this point; they are skipped entirely.
enum Probe {
    Hashed(String),
    Unreadable,
}

impl ChangeTracker {
    pub fn new(root: impl Into<PathBuf>, policy: ExclusionPolicy) -> Self {
        Self {
            root: root.into(),
            policy,
            on_walk_error: WalkErrorBehaviour::default(),
        }
    }

    pub fn with_walk_error_behaviour(mut self, behaviour: WalkErrorBehaviour) -> Self {
        self.on_walk_error = behaviour;
        self
    }

    /// Build a tracker straight from a validated config.
    pub fn from_config(cfg: &ConfigFile) -> Result<Self> {
        let policy = ExclusionPolicy::from_config(&cfg.exclude)?;
        Ok(Self::new(&cfg.root, policy).with_walk_error_behaviour(cfg.on_walk_error))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Perform one full recursive walk and record a hash for every
    /// non-excluded, readable file.
    ///
    /// A file that fails to hash is logged and left untracked for this
    /// cycle; once it becomes readable a later poll reports it as added.
    pub fn initialize(&self) -> Result<WatchState> {
        let mut state = WatchState::new();
        for (rel, probe) in self.scan()? {
            if let Probe::Hashed(hash) = probe {
                state.insert(rel, hash);
            }
        }
        info!(
            root = %self.root.display(),
            files = state.len(),
            "initial snapshot complete"
        );
        Ok(state)
    }

    /// Re-walk the tree and report everything that changed since the state
    /// was last updated.
    ///
    /// - unknown path -> `Added`, hash recorded
    /// - known path, differing hash -> `Modified`, hash updated
    /// - identical hash -> no report (mtime-only changes stay silent)
    /// - tracked path absent from the walk -> `Deleted`, entry removed
    ///
    /// A tracked file that currently fails to read keeps its previous hash
    /// and produces no report this cycle; in particular it is *not*
    /// reported deleted, so a transient permission flap causes no churn.
    pub fn poll(&self, state: &mut WatchState) -> Result<ChangeSet> {
        let observed = self.scan()?;
        let mut changes = ChangeSet::new();

        for (rel, probe) in &observed {
            let Probe::Hashed(hash) = probe else {
                continue;
            };
            match state.hash_of(rel) {
                None => {
                    debug!(path = %rel, "new file detected");
                    state.insert(rel.clone(), hash.clone());
                    changes.insert(rel.clone(), ChangeKind::Added);
                }
                Some(prev) if prev != hash.as_str() => {
                    debug!(path = %rel, "file modified");
                    state.insert(rel.clone(), hash.clone());
                    changes.insert(rel.clone(), ChangeKind::Modified);
                }
                Some(_) => {}
            }
        }

        let deleted: Vec<String> = state
            .paths()
            .filter(|p| !observed.contains_key(*p))
            .map(String::from)
            .collect();
        for rel in deleted {
            debug!(path = %rel, "file deleted");
            state.remove(&rel);
            changes.insert(rel, ChangeKind::Deleted);
        }

        Ok(changes)
    }

    /// Walk the tree once, returning every non-excluded file keyed by
    /// relative path.
    fn scan(&self) -> Result<BTreeMap<String, Probe>> {
        let mut observed = BTreeMap::new();

        let walker = WalkDir::new(&self.root)
            .follow_links(false)
            .into_iter()
            .filter_entry(|entry| self.keep_entry(entry));

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => match self.on_walk_error {
                    WalkErrorBehaviour::Skip => {
                        warn!(error = %err, "walk error; skipping entry");
                        continue;
                    }
                    WalkErrorBehaviour::Abort => return Err(PollwatchError::WalkError(err)),
                },
            };

            if !entry.file_type().is_file() {
                continue;
            }

            let Some(rel) = relative_str(&self.root, entry.path()) else {
                continue;
            };
            if self.policy.skips_file(&rel) {
                continue;
            }

            match hash_file(entry.path()) {
                Ok(hash) => {
                    observed.insert(rel, Probe::Hashed(hash));
                }
                Err(err) => {
                    warn!(path = %rel, error = %err, "failed to hash file; keeping previous state");
                    observed.insert(rel, Probe::Unreadable);
                }
            }
        }

        Ok(observed)
    }

    /// Predicate for `filter_entry`: returning false prunes the whole
    /// subtree, which is how excluded and hidden directories never get
    /// descended into.
    fn keep_entry(&self, entry: &DirEntry) -> bool {
        if entry.depth() == 0 {
            return true;
        }
        let name = entry.file_name().to_string_lossy();
        !self
            .policy
            .skips_entry(&name, entry.file_type().is_dir())
    }
}

/// Path relative to `root`, as a forward-slash string.
fn relative_str(root: &Path, path: &Path) -> Option<String> {
    let rel = path.strip_prefix(root).ok()?;
    Some(rel.to_string_lossy().replace('\\', "/"))
}
