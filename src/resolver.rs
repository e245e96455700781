//! Source file resolution for a single project or installed package.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use tracing::{debug, trace, warn};
use walkdir::WalkDir;

use crate::config::GathererConfig;
use crate::manifest::Manifest;
use crate::paths::{PathFilter, normalize, relative_path, to_slash};

/// Enumerates the module files of a package and re-expresses them relative to a reference
/// directory.
#[derive(Debug, Clone)]
pub struct DirectoryResolver<'a> {
    config: &'a GathererConfig,
    filter: PathFilter,
}

impl<'a> DirectoryResolver<'a> {
    /// Create a resolver following the conventions in `config`.
    pub fn new(config: &'a GathererConfig) -> Self {
        Self {
            config,
            filter: PathFilter::from_config(config),
        }
    }

    /// Resolve every module file under the manifest's source directories.
    ///
    /// Files are collected per source directory in declaration order, de-duplicated keeping the
    /// first occurrence, and returned relative to `reference_dir` with `/` separators.
    /// Declared directories that do not exist contribute nothing.
    pub fn resolve_source_files(
        &self,
        reference_dir: &Path,
        package_root: &Path,
        manifest: &Manifest,
    ) -> Vec<String> {
        let package_root = normalize(package_root);
        let source_dirs = manifest.source_directories_or(&self.config.default_source_directories);

        let mut seen = BTreeSet::new();
        let mut files = Vec::new();
        for declared in source_dirs {
            let source_dir = normalize(&package_root.join(declared));
            if !source_dir.exists() {
                debug!(
                    "skipping missing source directory {}",
                    source_dir.display()
                );
                continue;
            }

            for file in self.module_files(&package_root, &source_dir) {
                if seen.insert(file.clone()) {
                    files.push(file);
                }
            }
        }

        let resolved: Vec<String> = files
            .iter()
            .map(|file| relative_path(reference_dir, file))
            .collect();

        debug!(
            "resolved {} source files in {} relative to {}",
            resolved.len(),
            package_root.display(),
            reference_dir.display()
        );
        resolved
    }

    fn module_files(&self, package_root: &Path, source_dir: &Path) -> Vec<PathBuf> {
        let walker = WalkDir::new(source_dir).sort_by_file_name().into_iter();

        let mut files = Vec::new();
        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    warn!("failed to read entry under {}: {}", source_dir.display(), err);
                    continue;
                }
            };
            if !entry.file_type().is_file() {
                continue;
            }

            let path = entry.path();
            if !self.filter.has_source_extension(&path.to_string_lossy()) {
                continue;
            }
            if !self.accepts(package_root, source_dir, path) {
                trace!("rejected {}", path.display());
                continue;
            }
            files.push(path.to_path_buf());
        }
        files
    }

    fn accepts(&self, package_root: &Path, source_dir: &Path, file: &Path) -> bool {
        let within_package = match file.strip_prefix(package_root) {
            Ok(relative) => to_slash(relative),
            Err(_) => relative_path(package_root, file),
        };

        !within_package.is_empty()
            && self.filter.included_in_file_set(&within_package)
            && self.filter.is_real_module_path(source_dir, file)
    }
}
