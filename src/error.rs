//! Custom error types for kubebump.

use thiserror::Error;

/// Errors from the manifest patching core.
///
/// All variants are fatal to the enclosing batch: a manifest this tool
/// cannot fully understand must never be partially rewritten.
#[derive(Error, Debug)]
pub enum ManifestError {
    #[error("malformed manifest: {source}")]
    Malformed {
        #[source]
        source: serde_yaml::Error,
    },

    #[error("manifest kind `{kind}` not supported")]
    UnsupportedKind { kind: String },

    #[error("no containers found")]
    NoContainers,

    #[error("failed to serialize manifest: {source}")]
    Serialize {
        #[source]
        source: serde_yaml::Error,
    },
}
