//! Command-line interface for vibecheck.
//!
//! This module provides the `serve` command that runs the HTTP API, plus
//! one-shot `details` and `recommend` commands that exercise the same
//! services from a terminal.

mod commands;

pub use commands::{Cli, run_command};
