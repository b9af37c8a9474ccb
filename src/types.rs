use std::str::FromStr;

use serde::Deserialize;

/// Behaviour when directory traversal fails mid-walk (permission denied,
/// subtree vanished between listing and reading).
///
/// - `Skip`: log a warning for the offending entry and continue the walk
///   (default behaviour).
/// - `Abort`: fail the whole poll cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WalkErrorBehaviour {
    Skip,
    Abort,
}

impl Default for WalkErrorBehaviour {
    fn default() -> Self {
        WalkErrorBehaviour::Skip
    }
}

impl FromStr for WalkErrorBehaviour {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "skip" => Ok(WalkErrorBehaviour::Skip),
            "abort" => Ok(WalkErrorBehaviour::Abort),
            other => Err(format!(
                "invalid on_walk_error: {other} (expected \"skip\" or \"abort\")"
            )),
        }
    }
}

/// Behaviour when a change handler returns an error for one path.
///
/// - `Abort`: propagate the error and terminate the watch loop (default;
///   a broken handler should be noticed, not papered over).
/// - `Continue`: log the failure and keep notifying the remaining paths of
///   this cycle, then keep polling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HandlerErrorBehaviour {
    Abort,
    Continue,
}

impl Default for HandlerErrorBehaviour {
    fn default() -> Self {
        HandlerErrorBehaviour::Abort
    }
}

impl FromStr for HandlerErrorBehaviour {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "abort" => Ok(HandlerErrorBehaviour::Abort),
            "continue" => Ok(HandlerErrorBehaviour::Continue),
            other => Err(format!(
                "invalid on_handler_error: {other} (expected \"abort\" or \"continue\")"
            )),
        }
    }
}
