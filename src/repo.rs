//! Git collaborator: shallow checkout of the manifest repository, then
//! commit and push after a successful patch batch.
//!
//! All git work goes through [`CommandRunner`], so the exact command
//! sequences are verified in tests without touching a real remote.

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use tempfile::{NamedTempFile, TempDir};
use tracing::debug;

use crate::command_runner::{CommandOptions, CommandRunner};
use crate::output::Output;

/// Connection and committer identity for the manifest repository.
#[derive(Debug, Clone)]
pub struct RepoConfig {
    pub url: String,
    pub committer_name: String,
    pub committer_email: String,
    /// SSH private key text; a `\n`-escaped single-line key is accepted.
    pub ssh_key: Option<String>,
}

/// A shallow checkout of the manifest repository.
///
/// The checkout lives in a temp directory owned by this struct and is
/// removed when it is dropped.
pub struct GitRepo {
    config: RepoConfig,
    checkout: TempDir,
    // Must outlive the checkout: push authenticates with it.
    ssh_key_file: Option<NamedTempFile>,
    runner: Arc<dyn CommandRunner>,
}

/// CI secret stores often flatten keys to a single line with literal `\n`.
fn normalize_ssh_key(key: &str) -> String {
    let mut key = key.replace("\\n", "\n");
    if !key.ends_with('\n') {
        key.push('\n');
    }
    key
}

impl GitRepo {
    /// Shallow-clone `config.url` into a fresh temp directory.
    pub fn clone(config: RepoConfig, runner: Arc<dyn CommandRunner>) -> Result<Self> {
        let checkout = TempDir::new().context("Failed to create checkout directory")?;
        debug!(dir = %checkout.path().display(), "checkout directory");

        // NamedTempFile is created 0600, which ssh requires for key files.
        let ssh_key_file = match &config.ssh_key {
            Some(key) => {
                let file = NamedTempFile::new().context("Failed to create ssh key file")?;
                std::fs::write(file.path(), normalize_ssh_key(key))
                    .context("Failed to write ssh key file")?;
                Some(file)
            }
            None => None,
        };

        let repo = Self {
            config,
            checkout,
            ssh_key_file,
            runner,
        };

        let target = repo
            .checkout
            .path()
            .to_str()
            .context("Checkout path is not valid UTF-8")?
            .to_string();
        Output::info(format!("Cloning {}", repo.config.url));

        let status = repo
            .runner
            .run_status(
                "git",
                &["clone", "--depth", "1", &repo.config.url, &target],
                &repo.ssh_options(CommandOptions::default()),
            )
            .context("Failed to run git clone")?;
        if !status.success() {
            bail!("git clone of {} failed", repo.config.url);
        }

        Ok(repo)
    }

    /// Local checkout directory; manifest file paths are relative to this.
    pub fn path(&self) -> &Path {
        self.checkout.path()
    }

    fn ssh_options(&self, options: CommandOptions) -> CommandOptions {
        match &self.ssh_key_file {
            Some(file) => options.env(
                "GIT_SSH_COMMAND",
                format!(
                    "ssh -i {} -o StrictHostKeyChecking=no -o UserKnownHostsFile=/dev/null",
                    file.path().display()
                ),
            ),
            None => options,
        }
    }

    /// True when the checkout has uncommitted changes.
    pub fn has_changes(&self) -> Result<bool> {
        let output = self
            .runner
            .run_output(
                "git",
                &["status", "--porcelain"],
                &CommandOptions::with_cwd(self.path()),
            )
            .context("Failed to check git status")?;
        if !output.status.success() {
            bail!("git status failed");
        }
        Ok(!output.stdout.is_empty())
    }

    /// Stage everything, commit with the configured identity, and push.
    pub fn commit_and_push(&self, message: &str) -> Result<()> {
        if !self.has_changes()? {
            Output::info("nothing to commit");
            return Ok(());
        }

        Output::info("commit and push");
        let cwd = CommandOptions::with_cwd(self.path());

        let status = self
            .runner
            .run_status("git", &["add", "-A"], &cwd)
            .context("Failed to stage changes")?;
        if !status.success() {
            bail!("git add failed");
        }

        // Identity per invocation so CI needs no global git config.
        let name = format!("user.name={}", self.config.committer_name);
        let email = format!("user.email={}", self.config.committer_email);
        let status = self
            .runner
            .run_status(
                "git",
                &["-c", &name, "-c", &email, "commit", "-m", message],
                &cwd,
            )
            .context("Failed to commit changes")?;
        if !status.success() {
            bail!("git commit failed");
        }

        let status = self
            .runner
            .run_status(
                "git",
                &["push"],
                &self.ssh_options(CommandOptions::with_cwd(self.path())),
            )
            .context("Failed to push")?;
        if !status.success() {
            bail!("git push failed");
        }

        Ok(())
    }
}
