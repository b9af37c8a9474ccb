// src/fsutil.rs

//! Filesystem maintenance helpers.
//!
//! Small directory/file utilities that ship alongside the watcher: keeping
//! scratch directories in shape, cleaning stale files, sizing trees. None
//! of these are used by the tracker itself (it only reads).

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{bail, Context, Result};
use tracing::{debug, warn};
use walkdir::WalkDir;

/// Ensure a directory exists, creating it (and parents) if necessary.
pub fn ensure_dir(path: impl AsRef<Path>) -> Result<PathBuf> {
    let path = path.as_ref();
    fs::create_dir_all(path).with_context(|| format!("creating directory {:?}", path))?;
    Ok(path.to_path_buf())
}

/// Lowercase extension of a file name, with a leading dot.
pub fn file_extension(name: &str) -> Option<String> {
    Path::new(name)
        .extension()
        .map(|e| format!(".{}", e.to_string_lossy().to_lowercase()))
}

/// Delete a file if it exists. Returns whether anything was removed.
pub fn remove_file_if_exists(path: impl AsRef<Path>) -> Result<bool> {
    let path = path.as_ref();
    if !path.is_file() {
        return Ok(false);
    }
    fs::remove_file(path).with_context(|| format!("removing file {:?}", path))?;
    debug!(path = %path.display(), "removed file");
    Ok(true)
}

/// Criteria for [`clean_dir`]. With the default filter every direct child
/// file is removed.
#[derive(Debug, Clone, Default)]
pub struct CleanFilter {
    /// Only remove files with one of these extensions (lowercase, leading
    /// dot). `None` means any extension.
    pub extensions: Option<HashSet<String>>,

    /// Only remove files whose last modification is at least this old.
    pub older_than: Option<Duration>,
}

/// Delete direct children of `dir` matching the filter. Subdirectories are
/// left alone. Returns the number of files removed; failures on individual
/// entries are logged and skipped.
pub fn clean_dir(dir: impl AsRef<Path>, filter: &CleanFilter) -> Result<usize> {
    let dir = dir.as_ref();
    if !dir.is_dir() {
        bail!("not a directory: {:?}", dir);
    }

    let mut removed = 0;
    for entry in fs::read_dir(dir).with_context(|| format!("reading directory {:?}", dir))? {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                warn!(dir = %dir.display(), error = %err, "failed to read entry; skipping");
                continue;
            }
        };
        let path = entry.path();
        if !path.is_file() {
            continue;
        }

        if let Some(extensions) = &filter.extensions {
            let name = entry.file_name();
            let matches = file_extension(&name.to_string_lossy())
                .map(|ext| extensions.contains(&ext))
                .unwrap_or(false);
            if !matches {
                continue;
            }
        }

        if let Some(min_age) = filter.older_than {
            let old_enough = entry
                .metadata()
                .and_then(|m| m.modified())
                .ok()
                .and_then(|mtime| mtime.elapsed().ok())
                .map(|age| age >= min_age)
                .unwrap_or(false);
            if !old_enough {
                continue;
            }
        }

        match fs::remove_file(&path) {
            Ok(()) => {
                debug!(path = %path.display(), "cleaned up file");
                removed += 1;
            }
            Err(err) => {
                warn!(path = %path.display(), error = %err, "failed to remove file; skipping");
            }
        }
    }

    Ok(removed)
}

/// Total byte size of all files under a directory.
pub fn tree_size(dir: impl AsRef<Path>) -> Result<u64> {
    let dir = dir.as_ref();
    if !dir.is_dir() {
        bail!("not a directory: {:?}", dir);
    }

    let mut total = 0u64;
    for entry in WalkDir::new(dir).follow_links(false) {
        let entry = entry.with_context(|| format!("walking {:?}", dir))?;
        if entry.file_type().is_file() {
            total += entry
                .metadata()
                .with_context(|| format!("reading metadata for {:?}", entry.path()))?
                .len();
        }
    }
    Ok(total)
}
