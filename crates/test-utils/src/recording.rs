use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use anyhow::Result;
use pollwatch::handler::ChangeHandler;
use pollwatch::watch::ChangeKind;

/// Handler that records every invocation, for asserting on notification
/// behaviour. Clones share the same log, so a clone can be moved into a
/// spawned watch loop while the test keeps inspecting the original.
///
/// Paths registered via [`fail_on`](Self::fail_on) are still recorded but
/// make `on_change` return an error, for exercising handler-error
/// policies.
#[derive(Debug, Clone, Default)]
pub struct RecordingHandler {
    seen: Arc<Mutex<Vec<(String, ChangeKind)>>>,
    fail_on: Arc<Mutex<HashSet<String>>>,
}

impl RecordingHandler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_on(self, rel_path: &str) -> Self {
        self.fail_on.lock().unwrap().insert(rel_path.to_string());
        self
    }

    /// Everything recorded so far, in invocation order.
    pub fn seen(&self) -> Vec<(String, ChangeKind)> {
        self.seen.lock().unwrap().clone()
    }

    pub fn seen_paths(&self) -> Vec<String> {
        self.seen().into_iter().map(|(p, _)| p).collect()
    }
}

impl ChangeHandler for RecordingHandler {
    fn on_change(&mut self, rel_path: &str, kind: ChangeKind) -> Result<()> {
        self.seen
            .lock()
            .unwrap()
            .push((rel_path.to_string(), kind));
        if self.fail_on.lock().unwrap().contains(rel_path) {
            anyhow::bail!("handler failure injected for {rel_path}");
        }
        Ok(())
    }
}
