// src/watch/mod.rs

//! Polling file watching and change detection.
//!
//! This module is responsible for:
//! - Re-walking a directory tree on every poll cycle (`tracker`).
//! - Content hashing so mtime-only changes never count as modifications
//!   (`hash`).
//! - Deciding which filesystem entries are ignored entirely (`exclude`).
//! - Driving the poll/notify/sleep loop with cooperative shutdown
//!   (`runner`).
//!
//! It does **not** know what a change *means*; it only turns filesystem
//! state into per-path change reports for a handler.

pub mod exclude;
pub mod hash;
pub mod runner;
pub mod state;
pub mod tracker;

pub use exclude::ExclusionPolicy;
pub use hash::hash_file;
pub use runner::{run_loop, RunOptions};
pub use state::{ChangeKind, ChangeSet, WatchState};
pub use tracker::ChangeTracker;
