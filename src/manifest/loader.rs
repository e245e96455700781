use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use super::Manifest;
use crate::error::ManifestError;

/// Capability used by the gatherer to read manifests.
pub trait ManifestLoader {
    /// Load the manifest stored at `path`.
    fn load(&self, path: &Path) -> Result<Manifest, ManifestError>;
}

impl<L: ManifestLoader + ?Sized> ManifestLoader for &L {
    fn load(&self, path: &Path) -> Result<Manifest, ManifestError> {
        (**self).load(path)
    }
}

/// Reads manifests as JSON files from disk.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonManifestLoader;

impl ManifestLoader for JsonManifestLoader {
    fn load(&self, path: &Path) -> Result<Manifest, ManifestError> {
        let contents = fs::read_to_string(path).map_err(|source| ManifestError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Manifest::from_json_str(&contents).map_err(|source| ManifestError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Serves manifests registered in memory, keyed by the exact manifest path.
#[derive(Debug, Clone, Default)]
pub struct InMemoryManifestLoader {
    manifests: BTreeMap<PathBuf, Manifest>,
}

impl InMemoryManifestLoader {
    /// Create an empty loader.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `manifest` for `path`, replacing any previous entry.
    pub fn insert(&mut self, path: impl Into<PathBuf>, manifest: Manifest) {
        self.manifests.insert(path.into(), manifest);
    }

    /// Builder-style variant of [`InMemoryManifestLoader::insert`].
    pub fn with_manifest(mut self, path: impl Into<PathBuf>, manifest: Manifest) -> Self {
        self.insert(path, manifest);
        self
    }
}

impl ManifestLoader for InMemoryManifestLoader {
    fn load(&self, path: &Path) -> Result<Manifest, ManifestError> {
        self.manifests
            .get(path)
            .cloned()
            .ok_or_else(|| ManifestError::Missing {
                path: path.to_path_buf(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn json_loader_reads_manifest() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("elm.json");
        fs::write(&path, r#"{"source-directories": ["lib"]}"#).unwrap();

        let manifest = JsonManifestLoader.load(&path).unwrap();
        assert_eq!(manifest.source_directories, Some(vec!["lib".to_string()]));
    }

    #[test]
    fn json_loader_reports_missing_file() {
        let dir = tempdir().unwrap();
        let err = JsonManifestLoader
            .load(&dir.path().join("elm.json"))
            .unwrap_err();
        assert!(matches!(err, ManifestError::Io { .. }));
    }

    #[test]
    fn json_loader_reports_malformed_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("elm.json");
        fs::write(&path, "{").unwrap();

        let err = JsonManifestLoader.load(&path).unwrap_err();
        assert!(matches!(err, ManifestError::Parse { .. }));
        assert!(err.to_string().starts_with("failed to parse"));
    }

    #[test]
    fn in_memory_loader_serves_registered_paths() {
        let loader = InMemoryManifestLoader::new().with_manifest("/p/elm.json", Manifest::default());

        assert!(loader.load(Path::new("/p/elm.json")).is_ok());
        assert!(matches!(
            loader.load(Path::new("/q/elm.json")),
            Err(ManifestError::Missing { .. })
        ));
    }
}
