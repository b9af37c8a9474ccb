// src/watch/exclude.rs

use std::collections::HashSet;
use std::fmt;
use std::path::Path;

use globset::{Glob, GlobSet, GlobSetBuilder};

use crate::config::model::ExcludeSection;
use crate::errors::{PollwatchError, Result};

/// Immutable rule set deciding which filesystem entries are ignored.
///
/// Three independent rules, evaluated per path on every walk:
/// - directory names that prune traversal (the walker never descends),
/// - file extensions (lowercase, leading dot) that are never tracked,
/// - a hidden-segment rule skipping dot-prefixed components (the walk root
///   itself is exempt).
///
/// Plus an optional compiled glob set matched against the relative path,
/// for shape-based excludes like `**/*.lock`.
#[derive(Clone)]
pub struct ExclusionPolicy {
    dirs: HashSet<String>,
    extensions: HashSet<String>,
    skip_hidden: bool,
    patterns: Option<GlobSet>,
}

impl fmt::Debug for ExclusionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExclusionPolicy")
            .field("dirs", &self.dirs)
            .field("extensions", &self.extensions)
            .field("skip_hidden", &self.skip_hidden)
            .finish_non_exhaustive()
    }
}

impl ExclusionPolicy {
    /// Policy with no rules at all: everything is tracked.
    pub fn allow_all() -> Self {
        Self {
            dirs: HashSet::new(),
            extensions: HashSet::new(),
            skip_hidden: false,
            patterns: None,
        }
    }

    pub fn new<D, E>(dirs: D, extensions: E, skip_hidden: bool) -> Self
    where
        D: IntoIterator<Item = String>,
        E: IntoIterator<Item = String>,
    {
        Self {
            dirs: dirs.into_iter().collect(),
            extensions: extensions.into_iter().map(|e| e.to_lowercase()).collect(),
            skip_hidden,
            patterns: None,
        }
    }

    /// Attach glob patterns, matched against relative paths.
    pub fn with_patterns<I, S>(mut self, patterns: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut builder = GlobSetBuilder::new();
        let mut any = false;
        for pat in patterns {
            let pat = pat.as_ref();
            let glob = Glob::new(pat).map_err(|e| {
                PollwatchError::ConfigError(format!("invalid exclude glob {pat:?}: {e}"))
            })?;
            builder.add(glob);
            any = true;
        }
        self.patterns = if any {
            Some(builder.build().map_err(|e| {
                PollwatchError::ConfigError(format!("building exclude glob set: {e}"))
            })?)
        } else {
            None
        };
        Ok(self)
    }

    /// Build a policy from the validated `[exclude]` config section.
    pub fn from_config(section: &ExcludeSection) -> Result<Self> {
        Self::new(
            section.dirs.iter().cloned(),
            section.extensions.iter().cloned(),
            section.skip_hidden,
        )
        .with_patterns(&section.patterns)
    }

    /// Should traversal descend into / consider an entry with this name?
    ///
    /// Applied to every walked component, so a hidden or excluded directory
    /// prunes its whole subtree.
    pub fn skips_entry(&self, name: &str, is_dir: bool) -> bool {
        if self.skip_hidden && is_hidden(name) {
            return true;
        }
        is_dir && self.dirs.contains(name)
    }

    /// Is a file (already past `skips_entry` for all its components)
    /// excluded by extension or glob pattern?
    pub fn skips_file(&self, rel_path: &str) -> bool {
        if let Some(ext) = extension_of(rel_path) {
            if self.extensions.contains(&ext) {
                return true;
            }
        }
        if let Some(patterns) = &self.patterns {
            if patterns.is_match(rel_path) {
                return true;
            }
        }
        false
    }
}

fn is_hidden(name: &str) -> bool {
    name.starts_with('.') && name != "." && name != ".."
}

/// Lowercase extension of a relative path, with a leading dot.
fn extension_of(rel_path: &str) -> Option<String> {
    Path::new(rel_path)
        .extension()
        .map(|e| format!(".{}", e.to_string_lossy().to_lowercase()))
}
