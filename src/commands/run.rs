//! The CI pipeline command: clone, patch, commit, push.

use std::sync::Arc;

use anyhow::Result;
use clap::Args;
use tracing::debug;

use crate::command_runner::RealCommandRunner;
use crate::output::Output;
use crate::repo::{GitRepo, RepoConfig};
use crate::update;

#[derive(Debug, Args)]
pub struct RunArgs {
    /// Git URL of the repository holding the manifests
    #[arg(long, env = "PLUGIN_GITHUB_REPO")]
    pub repo: String,

    /// SSH private key used to clone and push (may be \n-escaped)
    #[arg(long, env = "PLUGIN_GITHUB_SSH_KEY", hide_env_values = true)]
    pub ssh_key: Option<String>,

    /// New image reference, e.g. registry.example.com/app:1.2.3
    #[arg(long, env = "PLUGIN_IMAGE")]
    pub image: String,

    /// Manifest file to patch, relative to the repo root (repeatable,
    /// or comma-separated via the environment)
    #[arg(
        long = "file",
        env = "PLUGIN_DEPLOYMENT_FILES",
        value_delimiter = ',',
        required = true
    )]
    pub files: Vec<String>,

    /// Only patch containers with these names (default: all containers)
    #[arg(long = "container", env = "PLUGIN_CONTAINER_NAME", value_delimiter = ',')]
    pub containers: Vec<String>,

    /// Commit author name
    #[arg(long, env = "PLUGIN_COMMIT_AUTHOR", default_value = "kubebump")]
    pub commit_author: String,

    /// Commit author email
    #[arg(long, env = "PLUGIN_COMMIT_EMAIL", default_value = "kubebump@localhost")]
    pub commit_email: String,

    /// Commit message
    #[arg(long, env = "PLUGIN_COMMIT_MESSAGE", default_value = "update image")]
    pub commit_message: String,
}

pub fn run(args: RunArgs, dry_run: bool) -> Result<()> {
    debug!(
        repo = %args.repo,
        author = %args.commit_author,
        email = %args.commit_email,
        "arguments"
    );
    Output::kv("Image", &args.image);
    Output::kv("Files", args.files.join(", "));
    if !args.containers.is_empty() {
        Output::kv("Containers", args.containers.join(", "));
    }

    let repo = GitRepo::clone(
        RepoConfig {
            url: args.repo.clone(),
            committer_name: args.commit_author,
            committer_email: args.commit_email,
            ssh_key: args.ssh_key,
        },
        Arc::new(RealCommandRunner),
    )?;

    let changed = update::update_manifests(
        repo.path(),
        &args.files,
        &args.image,
        &args.containers,
        dry_run,
    )?;

    if !changed {
        Output::info("no manifest files were updated");
        return Ok(());
    }

    if dry_run {
        Output::dry_run(format!("Would commit and push to {}", args.repo));
        return Ok(());
    }

    repo.commit_and_push(&args.commit_message)?;
    Output::success("manifest file(s) updated and pushed");
    Ok(())
}
