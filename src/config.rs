//! Gatherer configuration describing the on-disk conventions of a project.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::models::DependencyReference;

/// File name searched for in the project directory by [`GathererConfig::discover`].
pub const DEFAULT_CONFIG_FILE: &str = "gatherer.config.json";

/// Discoverable configuration describing manifest names, extensions and excluded directories.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct GathererConfig {
    /// Manifest file name looked up in project and package directories.
    pub manifest_file: String,
    /// Source file extension, without the leading dot.
    pub source_extension: String,
    /// Source directories assumed when a manifest does not declare any.
    pub default_source_directories: Vec<String>,
    /// Path, relative to the project directory, under which packages are installed.
    pub dependency_store: String,
    /// Path fragments marking build caches or third-party installs that never hold project files.
    pub excluded_markers: Vec<String>,
}

impl Default for GathererConfig {
    fn default() -> Self {
        Self {
            manifest_file: "elm.json".into(),
            source_extension: "elm".into(),
            default_source_directories: vec!["src".into()],
            dependency_store: "elm-stuff/packages".into(),
            excluded_markers: vec!["elm-stuff".into(), "node_modules".into()],
        }
    }
}

impl GathererConfig {
    /// Attempt to load configuration from the provided project directory.
    ///
    /// A missing or unparsable configuration file falls back to the default conventions.
    pub fn discover(project_dir: &Path) -> Self {
        let candidate = project_dir.join(DEFAULT_CONFIG_FILE);
        Self::from_path(&candidate).unwrap_or_default()
    }

    /// Read configuration from a specific JSON file.
    pub fn from_path(path: &Path) -> Option<Self> {
        let content = fs::read_to_string(path).ok()?;
        serde_json::from_str(&content).ok()
    }

    /// Location of the manifest inside a project or package directory.
    pub fn manifest_path(&self, package_dir: &Path) -> PathBuf {
        package_dir.join(&self.manifest_file)
    }

    /// Installed location of a dependency relative to the project directory.
    pub fn dependency_dir(&self, project_dir: &Path, dependency: &DependencyReference) -> PathBuf {
        project_dir
            .join(&self.dependency_store)
            .join(&dependency.name)
            .join(&dependency.version)
    }

    /// Suffix (including the dot) shared by every source file.
    pub fn extension_suffix(&self) -> String {
        format!(".{}", self.source_extension.trim_start_matches('.'))
    }
}
