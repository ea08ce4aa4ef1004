//! DevAgent command-line library.
//!
//! Configuration, logging setup and the subcommand implementations used by
//! the `devagent` binary. Kept separate from main.rs so they can be tested.

pub mod commands;
pub mod config;
pub mod logging;
pub mod state;
