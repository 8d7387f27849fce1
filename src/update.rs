//! Per-file patch driver and the fail-fast batch updater.

use std::path::Path;

use anyhow::{Context, Result};
use tracing::debug;

use crate::manifest::Manifest;
use crate::output::Output;

/// Patch a single manifest file in place.
///
/// Read → detect kind → parse → patch → re-serialize + write. When nothing
/// matched the filter the file is left untouched on disk and `false` is
/// returned. Unreadable, malformed, unsupported, or container-less
/// manifests are errors.
pub fn patch_manifest_file(
    path: &Path,
    image: &str,
    filter: &[String],
    dry_run: bool,
) -> Result<bool> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read manifest {}", path.display()))?;

    let mut manifest = Manifest::parse(&raw)
        .with_context(|| format!("Failed to parse manifest {}", path.display()))?;
    debug!(kind = %manifest.kind(), path = %path.display(), "detected manifest kind");

    let changed = manifest
        .set_image(image, filter)
        .with_context(|| format!("Failed to patch manifest {}", path.display()))?;
    if !changed {
        return Ok(false);
    }

    // Full structural re-encode, not a textual substitution.
    let updated = manifest.to_yaml()?;

    if dry_run {
        Output::dry_run(format!("Would write {}", path.display()));
        return Ok(true);
    }

    std::fs::write(path, updated)
        .with_context(|| format!("Failed to write manifest {}", path.display()))?;
    Ok(true)
}

/// Patch every file in `files` (relative to `root`), in input order.
///
/// Files are independent; the first error aborts the whole batch and files
/// already rewritten stay rewritten. Returns true iff at least one file
/// changed.
pub fn update_manifests(
    root: &Path,
    files: &[String],
    image: &str,
    filter: &[String],
    dry_run: bool,
) -> Result<bool> {
    debug!("updating images");

    let mut any_changed = false;
    for file in files {
        Output::step(format!("manifest: `{file}`"));
        if patch_manifest_file(&root.join(file), image, filter, dry_run)? {
            any_changed = true;
        } else {
            Output::info(format!("no change in {file}"));
        }
    }

    Ok(any_changed)
}
