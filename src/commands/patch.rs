//! Patch manifests in a local directory without any git involvement.
//!
//! Useful for trying a bump locally or for pipelines that manage the
//! checkout themselves.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use crate::output::Output;
use crate::update;

#[derive(Debug, Args)]
pub struct PatchArgs {
    /// New image reference, e.g. registry.example.com/app:1.2.3
    #[arg(long, env = "PLUGIN_IMAGE")]
    pub image: String,

    /// Manifest file to patch, relative to --dir (repeatable,
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

    /// Directory containing the manifest files
    #[arg(long, default_value = ".")]
    pub dir: PathBuf,
}

pub fn run(args: PatchArgs, dry_run: bool) -> Result<()> {
    let changed = update::update_manifests(
        &args.dir,
        &args.files,
        &args.image,
        &args.containers,
        dry_run,
    )?;

    if changed {
        Output::success("manifest file(s) updated");
    } else {
        Output::info("no manifest files were updated");
    }
    Ok(())
}
