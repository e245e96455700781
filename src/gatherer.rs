//! Entry point gathering the file set of a project.

use std::path::Path;

use tracing::info;

use crate::config::GathererConfig;
use crate::dependencies::resolve_dependency_files;
use crate::error::{GatherError, GatherResult};
use crate::manifest::{JsonManifestLoader, Manifest, ManifestLoader};
use crate::models::{DependencyFileSet, DependencyReference, ResolvedFileSet};
use crate::resolver::DirectoryResolver;

/// Gathers project and dependency files using a configurable manifest loader.
#[derive(Debug, Clone)]
pub struct FileGatherer<L = JsonManifestLoader> {
    config: GathererConfig,
    loader: L,
}

impl FileGatherer<JsonManifestLoader> {
    /// Create a gatherer reading manifests from disk.
    pub fn new(config: GathererConfig) -> Self {
        Self::with_loader(config, JsonManifestLoader)
    }
}

impl<L: ManifestLoader> FileGatherer<L> {
    /// Create a gatherer reading manifests through `loader`.
    pub fn with_loader(config: GathererConfig, loader: L) -> Self {
        Self { config, loader }
    }

    /// Conventions used by this gatherer.
    pub fn config(&self) -> &GathererConfig {
        &self.config
    }

    /// Resolve the project's own source files, relative to `directory`.
    ///
    /// Dependencies are not included; see [`FileGatherer::dependency_files`].
    pub fn gather(&self, directory: impl AsRef<Path>) -> GatherResult<ResolvedFileSet> {
        let directory = directory.as_ref();
        let manifest = self.project_manifest(directory)?;

        let source_files =
            DirectoryResolver::new(&self.config).resolve_source_files(directory, directory, &manifest);
        info!(
            "gathered {} source files from {}",
            source_files.len(),
            directory.display()
        );

        Ok(ResolvedFileSet::from_source_files(source_files))
    }

    /// Resolve the exposed module files of one installed dependency, relative to `directory`.
    pub fn dependency_files(
        &self,
        directory: impl AsRef<Path>,
        dependency: &DependencyReference,
    ) -> GatherResult<Vec<String>> {
        resolve_dependency_files(&self.config, &self.loader, directory.as_ref(), dependency)
    }

    /// Resolve the exposed module files of every dependency pinned in the project manifest.
    pub fn gather_dependencies(
        &self,
        directory: impl AsRef<Path>,
    ) -> GatherResult<Vec<DependencyFileSet>> {
        let directory = directory.as_ref();
        let manifest = self.project_manifest(directory)?;

        manifest
            .pinned_dependencies()
            .into_iter()
            .map(|dependency| -> GatherResult<DependencyFileSet> {
                let source_files = self.dependency_files(directory, &dependency)?;
                Ok(DependencyFileSet {
                    dependency,
                    source_files,
                })
            })
            .collect()
    }

    fn project_manifest(&self, directory: &Path) -> GatherResult<Manifest> {
        self.loader
            .load(&self.config.manifest_path(directory))
            .map_err(|source| GatherError::ManifestNotFound {
                directory: directory.to_path_buf(),
                source,
            })
    }
}

/// Gather `directory` with the conventions discovered in that directory.
pub fn gather(directory: impl AsRef<Path>) -> GatherResult<ResolvedFileSet> {
    let directory = directory.as_ref();
    FileGatherer::new(GathererConfig::discover(directory)).gather(directory)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manifest::InMemoryManifestLoader;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn uses_injected_loader() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("lib/App")).unwrap();
        fs::write(root.join("lib/App/Main.elm"), "").unwrap();

        let config = GathererConfig::default();
        let loader = InMemoryManifestLoader::new().with_manifest(
            config.manifest_path(root),
            Manifest::from_json_str(r#"{"source-directories": ["lib"]}"#).unwrap(),
        );

        let files = FileGatherer::with_loader(config, loader).gather(root).unwrap();
        assert_eq!(files.source_files, vec!["lib/App/Main.elm".to_string()]);
        assert!(files.interface_files.is_empty());
    }

    #[test]
    fn missing_project_manifest_is_fatal() {
        let dir = tempdir().unwrap();
        let err = FileGatherer::new(GathererConfig::default())
            .gather(dir.path())
            .unwrap_err();
        assert!(matches!(err, GatherError::ManifestNotFound { .. }));
    }

    #[test]
    fn gather_dependencies_follows_pinned_versions() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        let config = GathererConfig::default();
        let core = DependencyReference::new("elm/core", "1.0.5");
        let core_dir = config.dependency_dir(root, &core);
        fs::create_dir_all(core_dir.join("src/List")).unwrap();
        fs::write(core_dir.join("src/List.elm"), "").unwrap();
        fs::write(core_dir.join("src/List/Internal.elm"), "").unwrap();

        let loader = InMemoryManifestLoader::new()
            .with_manifest(
                config.manifest_path(root),
                Manifest::from_json_str(
                    r#"{"dependencies": {"direct": {"elm/core": "1.0.5"}, "indirect": {}}}"#,
                )
                .unwrap(),
            )
            .with_manifest(
                config.manifest_path(&core_dir),
                Manifest::from_json_str(r#"{"exposed-modules": ["List"]}"#).unwrap(),
            );

        let sets = FileGatherer::with_loader(config, loader)
            .gather_dependencies(root)
            .unwrap();
        assert_eq!(sets, vec![DependencyFileSet {
            dependency: core,
            source_files: vec!["elm-stuff/packages/elm/core/1.0.5/src/List.elm".to_string()],
        }]);
    }
}
