//! Subcommand implementations.

pub mod patch;
pub mod run;
