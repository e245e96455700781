//! Error types surfaced while loading manifests and gathering files.

use std::path::PathBuf;

use thiserror::Error;

/// Result type returned by gathering operations.
pub type GatherResult<T> = Result<T, GatherError>;

/// Failure to produce a [`Manifest`](crate::Manifest) for a path.
#[derive(Debug, Error)]
pub enum ManifestError {
    /// The manifest file could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        /// Manifest path.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
    /// The manifest file is not valid JSON or has unexpected field types.
    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        /// Manifest path.
        path: PathBuf,
        /// Underlying parse error.
        source: serde_json::Error,
    },
    /// No manifest is registered for the path.
    #[error("no manifest registered for {}", path.display())]
    Missing {
        /// Manifest path.
        path: PathBuf,
    },
}

/// Fatal errors raised by the gatherer.
#[derive(Debug, Error)]
pub enum GatherError {
    /// The project's own manifest is missing or malformed.
    #[error("manifest not found for project {}", directory.display())]
    ManifestNotFound {
        /// Project directory that was gathered.
        directory: PathBuf,
        /// Loader failure.
        #[source]
        source: ManifestError,
    },
    /// An installed dependency's manifest is missing or malformed.
    #[error("dependency {name} {version} not found at {}", path.display())]
    DependencyNotFound {
        /// Package name, e.g. `elm/core`.
        name: String,
        /// Installed version.
        version: String,
        /// Expected install directory.
        path: PathBuf,
        /// Loader failure.
        #[source]
        source: ManifestError,
    },
}
