// src/config/validate.rs

use std::str::FromStr;

use globset::Glob;
use regex::Regex;

use crate::config::model::RawConfigFile;
use crate::errors::{PollwatchError, Result};
use crate::types::{HandlerErrorBehaviour, WalkErrorBehaviour};

/// Run semantic validation against a loaded raw configuration.
///
/// This checks:
/// - `interval_secs >= 1`
/// - `on_walk_error` / `on_handler_error` parse into their enums
/// - excluded directory names are non-empty and contain no path separators
/// - excluded extensions are non-empty
/// - exclude glob patterns compile
/// - handler rule regexes compile
pub fn validate_config(raw: &RawConfigFile) -> Result<()> {
    validate_watch_section(raw)?;
    validate_exclude_section(raw)?;
    validate_handler_section(raw)?;
    Ok(())
}

fn validate_watch_section(raw: &RawConfigFile) -> Result<()> {
    if raw.watch.interval_secs == 0 {
        return Err(PollwatchError::ConfigError(
            "[watch].interval_secs must be >= 1 (got 0)".to_string(),
        ));
    }

    WalkErrorBehaviour::from_str(&raw.watch.on_walk_error)
        .map_err(PollwatchError::ConfigError)?;
    HandlerErrorBehaviour::from_str(&raw.watch.on_handler_error)
        .map_err(PollwatchError::ConfigError)?;

    Ok(())
}

fn validate_exclude_section(raw: &RawConfigFile) -> Result<()> {
    for dir in raw.exclude.dirs.iter() {
        if dir.trim().is_empty() {
            return Err(PollwatchError::ConfigError(
                "[exclude].dirs must not contain empty names".to_string(),
            ));
        }
        if dir.contains('/') || dir.contains('\\') {
            return Err(PollwatchError::ConfigError(format!(
                "[exclude].dirs entries are plain directory names, not paths (got {dir:?})"
            )));
        }
    }

    for ext in raw.exclude.extensions.iter() {
        if ext.trim_start_matches('.').is_empty() {
            return Err(PollwatchError::ConfigError(format!(
                "[exclude].extensions entry {ext:?} has no extension text"
            )));
        }
    }

    for pat in raw.exclude.patterns.iter() {
        Glob::new(pat).map_err(|e| {
            PollwatchError::ConfigError(format!("invalid [exclude].patterns glob {pat:?}: {e}"))
        })?;
    }

    Ok(())
}

fn validate_handler_section(raw: &RawConfigFile) -> Result<()> {
    for rule in raw.handler.rules.iter() {
        Regex::new(&rule.pattern).map_err(|e| {
            PollwatchError::ConfigError(format!(
                "invalid [[handler.rule]] pattern {:?}: {e}",
                rule.pattern
            ))
        })?;
    }
    Ok(())
}

/// Normalize an extension to lowercase with exactly one leading dot, so
/// "TMP", "tmp" and ".tmp" all compare equal.
pub fn normalize_extension(ext: &str) -> String {
    format!(".{}", ext.trim().trim_start_matches('.').to_lowercase())
}
