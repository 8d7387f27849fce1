//! CLI argument definitions for kubebump.
//!
//! Separated from `main.rs` so library code and tests can reference the
//! types. Every argument of the `run` subcommand also reads from a
//! `PLUGIN_*` environment variable, which is how Drone-style CI steps pass
//! their settings.

use clap::{Parser, Subcommand};

use crate::commands;

#[derive(Debug, Parser)]
#[command(name = "kubebump")]
#[command(about = "Bump container image references in Kubernetes manifests")]
#[command(version)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Show what would be done without writing files or pushing
    #[arg(long, short = 'n', global = true)]
    pub dry_run: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Clone the manifest repo, patch, commit and push (CI plugin mode)
    Run(commands::run::RunArgs),

    /// Patch manifest files under a local directory, no git involved
    Patch(commands::patch::PatchArgs),
}
