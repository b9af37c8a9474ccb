// src/config/mod.rs

//! Configuration loading and validation for pollwatch.
//!
//! Responsibilities:
//! - Define the TOML-backed data model and its validated runtime form
//!   (`model.rs`).
//! - Load a config file from disk (`loader.rs`).
//! - Validate invariants like behaviour strings, patterns and the poll
//!   interval (`validate.rs`).

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{default_config_path, load_and_validate, load_from_path};
pub use model::{
    ConfigFile, ExcludeSection, HandlerSection, RawConfigFile, RuleConfig, WatchSection,
};
pub use validate::validate_config;
