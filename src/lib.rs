//! kubebump - bump container images in Kubernetes workload manifests
//!
//! A GitOps image-bump step for CI pipelines: given a git repository
//! containing Deployment, Job, or CronJob manifests, rewrite the container
//! image reference in a list of manifest files, then commit and push the
//! change.
//!
//! The crate runs as a Drone-style plugin (all arguments readable from
//! `PLUGIN_*` environment variables) or as a plain CLI:
//!
//! - `kubebump run`: clone, patch, commit, push
//! - `kubebump patch`: patch files under a local directory, no git
//!
//! The patching core is kind-polymorphic: [`manifest::ManifestKind`]
//! classifies raw YAML, per-kind workload types locate the container list,
//! and [`manifest::set_image`] rewrites image references with optional
//! name filtering.

pub mod cli;
pub mod command_runner;
pub mod commands;
pub mod error;
pub mod manifest;
pub mod output;
pub mod repo;
pub mod update;

pub use cli::{Cli, Commands};
pub use error::ManifestError;
pub use manifest::{Manifest, ManifestKind};
