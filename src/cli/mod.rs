//! Command-line interface: argument parsing and subcommand dispatch.

pub mod commands;

pub use commands::{Cli, Commands, run};
