//! Abstraction over external command execution for testability.
//!
//! Every git invocation goes through the [`CommandRunner`] trait rather
//! than [`std::process::Command`] directly, so the whole clone → commit →
//! push sequence can be exercised in-process against a recording mock
//! (see the tests in [`crate::repo`]).

use anyhow::{Context, Result};
use std::path::PathBuf;
use std::process::{Command, ExitStatus, Output, Stdio};

/// Trait for abstracting external command execution.
pub trait CommandRunner: Send + Sync {
    /// Run a command and capture its full output (stdout + stderr + status).
    ///
    /// Used where output is parsed, e.g. `git status --porcelain`.
    fn run_output(&self, program: &str, args: &[&str], options: &CommandOptions) -> Result<Output>;

    /// Run a command with inherited stdio, returning only its exit status.
    ///
    /// Used for clone/commit/push so git's own progress lands in the CI log.
    fn run_status(
        &self,
        program: &str,
        args: &[&str],
        options: &CommandOptions,
    ) -> Result<ExitStatus>;
}

/// Options for command execution.
#[derive(Debug, Default, Clone)]
pub struct CommandOptions {
    /// Working directory for the command.
    pub cwd: Option<PathBuf>,
    /// Additional environment variables (e.g. `GIT_SSH_COMMAND`).
    pub env: Vec<(String, String)>,
}

impl CommandOptions {
    /// Create options with a working directory.
    pub fn with_cwd(cwd: impl Into<PathBuf>) -> Self {
        Self {
            cwd: Some(cwd.into()),
            ..Default::default()
        }
    }

    /// Add an environment variable.
    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.push((key.into(), value.into()));
        self
    }
}

/// Production implementation that delegates to [`std::process::Command`].
pub struct RealCommandRunner;

fn build_command(program: &str, args: &[&str], options: &CommandOptions) -> Command {
    let mut cmd = Command::new(program);
    cmd.args(args);
    if let Some(cwd) = &options.cwd {
        cmd.current_dir(cwd);
    }
    for (k, v) in &options.env {
        cmd.env(k, v);
    }
    cmd
}

impl CommandRunner for RealCommandRunner {
    fn run_output(&self, program: &str, args: &[&str], options: &CommandOptions) -> Result<Output> {
        build_command(program, args, options)
            .stdin(Stdio::null())
            .output()
            .with_context(|| format!("Failed to run '{program}'"))
    }

    fn run_status(
        &self,
        program: &str,
        args: &[&str],
        options: &CommandOptions,
    ) -> Result<ExitStatus> {
        build_command(program, args, options)
            .stdin(Stdio::null())
            .status()
            .with_context(|| format!("Failed to run '{program}'"))
    }
}
