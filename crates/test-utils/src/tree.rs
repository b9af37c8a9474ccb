use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tempfile::TempDir;

/// Temporary directory tree for watcher tests.
///
/// All paths are relative (forward slashes); parents are created on
/// demand. The tree is removed on drop.
pub struct TempTree {
    dir: TempDir,
}

impl TempTree {
    pub fn new() -> Result<Self> {
        Ok(Self {
            dir: TempDir::new().context("creating temp tree")?,
        })
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn abs(&self, rel: &str) -> PathBuf {
        self.dir.path().join(rel)
    }

    /// Write a file, creating parent directories as needed.
    pub fn write(&self, rel: &str, contents: impl AsRef<[u8]>) -> Result<PathBuf> {
        let path = self.abs(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating parents for {rel}"))?;
        }
        fs::write(&path, contents).with_context(|| format!("writing {rel}"))?;
        Ok(path)
    }

    pub fn mkdir(&self, rel: &str) -> Result<PathBuf> {
        let path = self.abs(rel);
        fs::create_dir_all(&path).with_context(|| format!("creating dir {rel}"))?;
        Ok(path)
    }

    pub fn remove_file(&self, rel: &str) -> Result<()> {
        fs::remove_file(self.abs(rel)).with_context(|| format!("removing {rel}"))
    }

    pub fn remove_dir_all(&self, rel: &str) -> Result<()> {
        fs::remove_dir_all(self.abs(rel)).with_context(|| format!("removing dir {rel}"))
    }
}
