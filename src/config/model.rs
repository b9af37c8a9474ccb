// src/config/model.rs

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use serde::Deserialize;

use crate::config::validate::{normalize_extension, validate_config};
use crate::errors::{PollwatchError, Result};
use crate::types::{HandlerErrorBehaviour, WalkErrorBehaviour};

/// Top-level configuration as read from a TOML file:
///
/// ```toml
/// [watch]
/// root = "."
/// interval_secs = 5
/// on_walk_error = "skip"
/// on_handler_error = "abort"
///
/// [exclude]
/// dirs = [".git", "target"]
/// extensions = [".o", ".tmp"]
/// patterns = ["**/*.lock"]
/// skip_hidden = true
///
/// [[handler.rule]]
/// pattern = '\.rs$'
/// note = "Rust source changed"
/// ```
///
/// All sections are optional and have reasonable defaults. This is the raw,
/// unvalidated form; [`ConfigFile`] is the validated runtime model.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct RawConfigFile {
    /// `[watch]` section.
    #[serde(default)]
    pub watch: WatchSection,

    /// `[exclude]` section.
    #[serde(default)]
    pub exclude: ExcludeSection,

    /// `[handler]` section.
    #[serde(default)]
    pub handler: HandlerSection,
}

/// `[watch]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct WatchSection {
    /// Root of the tree to watch.
    #[serde(default = "default_root")]
    pub root: String,

    /// Seconds to sleep between poll cycles.
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,

    /// `"skip"` or `"abort"`, see [`WalkErrorBehaviour`].
    #[serde(default = "default_on_walk_error")]
    pub on_walk_error: String,

    /// `"abort"` or `"continue"`, see [`HandlerErrorBehaviour`].
    #[serde(default = "default_on_handler_error")]
    pub on_handler_error: String,
}

fn default_root() -> String {
    ".".to_string()
}

fn default_interval_secs() -> u64 {
    5
}

fn default_on_walk_error() -> String {
    "skip".to_string()
}

fn default_on_handler_error() -> String {
    "abort".to_string()
}

impl Default for WatchSection {
    fn default() -> Self {
        Self {
            root: default_root(),
            interval_secs: default_interval_secs(),
            on_walk_error: default_on_walk_error(),
            on_handler_error: default_on_handler_error(),
        }
    }
}

/// `[exclude]` section.
///
/// Directory names prune traversal entirely; extensions and glob patterns
/// filter individual files; `skip_hidden` covers dot-prefixed path segments.
#[derive(Debug, Clone, Deserialize)]
pub struct ExcludeSection {
    /// Directory names whose subtrees are never descended into.
    #[serde(default = "default_exclude_dirs")]
    pub dirs: Vec<String>,

    /// File extensions that are never tracked. Normalized to lowercase with
    /// a leading dot during validation ("TMP" and ".tmp" are equivalent).
    #[serde(default = "default_exclude_extensions")]
    pub extensions: Vec<String>,

    /// Optional glob patterns (matched against the relative path).
    #[serde(default)]
    pub patterns: Vec<String>,

    /// Skip any path containing a dot-prefixed segment.
    #[serde(default = "default_skip_hidden")]
    pub skip_hidden: bool,
}

fn default_exclude_dirs() -> Vec<String> {
    [".git", ".github", "target", "node_modules", "__pycache__"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn default_exclude_extensions() -> Vec<String> {
    [".o", ".so", ".dll", ".exe", ".pyc", ".tmp", ".swp"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn default_skip_hidden() -> bool {
    true
}

impl Default for ExcludeSection {
    fn default() -> Self {
        Self {
            dirs: default_exclude_dirs(),
            extensions: default_exclude_extensions(),
            patterns: Vec::new(),
            skip_hidden: default_skip_hidden(),
        }
    }
}

/// `[handler]` section: classification rules for the default handler.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct HandlerSection {
    /// `[[handler.rule]]` entries, evaluated in order; the first match wins.
    #[serde(default, rename = "rule")]
    pub rules: Vec<RuleConfig>,
}

/// One `[[handler.rule]]` entry.
#[derive(Debug, Clone, Deserialize)]
pub struct RuleConfig {
    /// Regex matched against the relative path.
    pub pattern: String,

    /// Message logged when the pattern matches.
    pub note: String,
}

impl RuleConfig {
    pub fn new(pattern: impl Into<String>, note: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            note: note.into(),
        }
    }
}

/// Validated runtime configuration.
///
/// Produced from [`RawConfigFile`] via `TryFrom`; behaviour strings are
/// parsed into their enums, the interval becomes a `Duration` and extensions
/// are normalized.
#[derive(Debug, Clone)]
pub struct ConfigFile {
    pub root: PathBuf,
    pub interval: Duration,
    pub on_walk_error: WalkErrorBehaviour,
    pub on_handler_error: HandlerErrorBehaviour,
    pub exclude: ExcludeSection,
    pub rules: Vec<RuleConfig>,
}

impl TryFrom<RawConfigFile> for ConfigFile {
    type Error = PollwatchError;

    fn try_from(raw: RawConfigFile) -> Result<Self> {
        validate_config(&raw)?;

        let on_walk_error = WalkErrorBehaviour::from_str(&raw.watch.on_walk_error)
            .map_err(PollwatchError::ConfigError)?;
        let on_handler_error = HandlerErrorBehaviour::from_str(&raw.watch.on_handler_error)
            .map_err(PollwatchError::ConfigError)?;

        let mut exclude = raw.exclude;
        exclude.extensions = exclude
            .extensions
            .iter()
            .map(|e| normalize_extension(e))
            .collect();

        Ok(Self {
            root: PathBuf::from(raw.watch.root),
            interval: Duration::from_secs(raw.watch.interval_secs),
            on_walk_error,
            on_handler_error,
            exclude,
            rules: raw.handler.rules,
        })
    }
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            root: PathBuf::from(default_root()),
            interval: Duration::from_secs(default_interval_secs()),
            on_walk_error: WalkErrorBehaviour::default(),
            on_handler_error: HandlerErrorBehaviour::default(),
            exclude: ExcludeSection {
                extensions: default_exclude_extensions()
                    .iter()
                    .map(|e| normalize_extension(e))
                    .collect(),
                ..ExcludeSection::default()
            },
            rules: Vec::new(),
        }
    }
}
