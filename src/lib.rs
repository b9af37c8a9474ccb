// src/lib.rs

pub mod cli;
pub mod config;
pub mod errors;
pub mod fsutil;
pub mod handler;
pub mod logging;
pub mod types;
pub mod watch;

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use tokio::sync::mpsc;
use tracing::debug;

use crate::cli::CliArgs;
use crate::config::loader::{default_config_path, load_and_validate};
use crate::config::model::ConfigFile;
use crate::handler::RuleHandler;
use crate::watch::runner::{run_loop, RunOptions};
use crate::watch::tracker::ChangeTracker;

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - config loading (with CLI overrides)
/// - the change tracker and its initial snapshot
/// - the default rule handler
/// - Ctrl-C -> shutdown channel
/// - the poll loop
pub async fn run(args: CliArgs) -> Result<()> {
    let cfg = load_config(&args)?;

    if args.dry_run {
        print_dry_run(&cfg);
        return Ok(());
    }

    let tracker = ChangeTracker::from_config(&cfg)?;
    let mut handler = RuleHandler::from_config(&cfg.rules)?;
    let mut state = tracker.initialize()?;

    // Ctrl-C -> graceful shutdown.
    let (shutdown_tx, shutdown_rx) = mpsc::channel::<()>(1);
    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            eprintln!("failed to listen for Ctrl+C: {e}");
            return;
        }
        let _ = shutdown_tx.send(()).await;
    });

    let options = RunOptions {
        interval: cfg.interval,
        once: args.once,
        on_handler_error: cfg.on_handler_error,
    };

    run_loop(&tracker, &mut state, &mut handler, options, shutdown_rx).await?;
    Ok(())
}

/// Resolve the effective configuration: config file (explicit, or the
/// default path when present, or built-in defaults) plus CLI overrides.
fn load_config(args: &CliArgs) -> Result<ConfigFile> {
    let mut cfg = match &args.config {
        Some(path) => load_and_validate(path)?,
        None => {
            let path = default_config_path();
            if path.exists() {
                load_and_validate(&path)?
            } else {
                debug!(path = %path.display(), "no config file found; using defaults");
                ConfigFile::default()
            }
        }
    };

    if let Some(root) = &args.root {
        cfg.root = PathBuf::from(root);
    }
    if let Some(secs) = args.interval {
        if secs == 0 {
            anyhow::bail!("--interval must be >= 1 (got 0)");
        }
        cfg.interval = Duration::from_secs(secs);
    }

    Ok(cfg)
}

/// Simple dry-run output: print the effective configuration.
fn print_dry_run(cfg: &ConfigFile) {
    println!("pollwatch dry-run");
    println!("  root = {:?}", cfg.root);
    println!("  interval_secs = {}", cfg.interval.as_secs());
    println!("  on_walk_error = {:?}", cfg.on_walk_error);
    println!("  on_handler_error = {:?}", cfg.on_handler_error);
    println!();

    println!("exclusions:");
    println!("  dirs: {:?}", cfg.exclude.dirs);
    println!("  extensions: {:?}", cfg.exclude.extensions);
    if !cfg.exclude.patterns.is_empty() {
        println!("  patterns: {:?}", cfg.exclude.patterns);
    }
    println!("  skip_hidden: {}", cfg.exclude.skip_hidden);

    if !cfg.rules.is_empty() {
        println!();
        println!("handler rules ({}):", cfg.rules.len());
        for rule in cfg.rules.iter() {
            println!("  - {:?} -> {}", rule.pattern, rule.note);
        }
    }

    debug!("dry-run complete (no watching)");
}
