// src/watch/runner.rs

use std::time::Duration;

use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::errors::Result;
use crate::handler::ChangeHandler;
use crate::types::HandlerErrorBehaviour;
use crate::watch::state::WatchState;
use crate::watch::tracker::ChangeTracker;

/// Options for [`run_loop`].
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Sleep between poll cycles.
    pub interval: Duration,

    /// Perform a single poll-and-notify pass, then return.
    pub once: bool,

    /// What to do when the handler fails for one path.
    pub on_handler_error: HandlerErrorBehaviour,
}

/// Cooperative poll loop: poll, notify the handler for every reported
/// path, sleep, repeat.
///
/// One logical worker performs the whole walk-hash-compare-notify cycle;
/// the sleep between cycles is the only suspension point, and all handler
/// invocations for a cycle complete before the next poll begins.
///
/// Shutdown is an explicit channel rather than a process signal, so the
/// loop is stoppable programmatically (`lib::run` wires Ctrl-C into it).
/// The channel is checked both between cycles and during the sleep.
pub async fn run_loop<H: ChangeHandler>(
    tracker: &ChangeTracker,
    state: &mut WatchState,
    handler: &mut H,
    options: RunOptions,
    mut shutdown_rx: mpsc::Receiver<()>,
) -> Result<()> {
    info!(
        root = %tracker.root().display(),
        interval_secs = options.interval.as_secs(),
        "watch loop started"
    );

    loop {
        if shutdown_rx.try_recv().is_ok() {
            info!("shutdown requested; stopping watch loop");
            return Ok(());
        }

        let changes = tracker.poll(state)?;
        if !changes.is_empty() {
            debug!(count = changes.len(), "changes detected this cycle");
        }

        for (path, kind) in changes.iter() {
            if let Err(err) = handler.on_change(path, kind) {
                match options.on_handler_error {
                    HandlerErrorBehaviour::Abort => {
                        return Err(err
                            .context(format!("handler failed for {path}"))
                            .into());
                    }
                    HandlerErrorBehaviour::Continue => {
                        warn!(path = %path, error = %err, "handler failed; continuing");
                    }
                }
            }
        }

        if options.once {
            info!("single pass complete");
            return Ok(());
        }

        tokio::select! {
            _ = tokio::time::sleep(options.interval) => {}
            msg = shutdown_rx.recv() => {
                // None means every sender is gone; nobody can ever stop us
                // cooperatively after that, so treat it as a shutdown too.
                match msg {
                    Some(()) => info!("shutdown requested; stopping watch loop"),
                    None => info!("shutdown channel closed; stopping watch loop"),
                }
                return Ok(());
            }
        }
    }
}
