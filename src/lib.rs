//! # Chordmatch
//!
//! Command-line and interactive front ends for `chordmatch-core`.
//!
//! ## Modules
//!
//! - `commands`: REPL command registry and handlers
//! - `config`: layered TOML configuration
//! - `loader`: catalog and index files
//! - `output`: coloured tables and JSON rendering of results
//! - `repl`: the interactive session

pub mod commands;
pub mod config;
pub mod loader;
pub mod output;
pub mod repl;

pub use crate::config::Config;
pub use chordmatch_core::{Matcher, Query};
