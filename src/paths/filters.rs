use std::path::{Component, Path};
use std::sync::OnceLock;

use regex::Regex;

use crate::config::GathererConfig;

fn module_segment_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[A-Z]").expect("invalid module segment regex"))
}

/// String predicates deciding which files belong in the analysed file set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathFilter {
    extension_suffix: String,
    excluded_markers: Vec<String>,
}

impl Default for PathFilter {
    fn default() -> Self {
        Self::from_config(&GathererConfig::default())
    }
}

impl PathFilter {
    /// Build a filter from an extension suffix such as `.elm` and reserved path markers.
    pub fn new(
        extension_suffix: impl Into<String>,
        excluded_markers: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            extension_suffix: extension_suffix.into(),
            excluded_markers: excluded_markers
                .into_iter()
                .map(Into::into)
                .filter(|marker: &String| !marker.is_empty())
                .collect(),
        }
    }

    /// Filter using the extension and markers of `config`.
    pub fn from_config(config: &GathererConfig) -> Self {
        Self::new(config.extension_suffix(), config.excluded_markers.iter().cloned())
    }

    /// Returns `true` when `path` carries the source extension.
    pub fn has_source_extension(&self, path: &str) -> bool {
        path.ends_with(&self.extension_suffix)
    }

    /// Returns `true` when `path` is a source file outside of build caches and package installs.
    pub fn included_in_file_set(&self, path: &str) -> bool {
        if !self.has_source_extension(path) {
            return false;
        }

        !self
            .excluded_markers
            .iter()
            .any(|marker| path.contains(marker.as_str()))
    }

    /// See [`is_real_module_path`].
    pub fn is_real_module_path(&self, source_dir: &Path, file_path: &Path) -> bool {
        is_real_module_path(source_dir, file_path)
    }
}

fn default_filter() -> &'static PathFilter {
    static FILTER: OnceLock<PathFilter> = OnceLock::new();
    FILTER.get_or_init(PathFilter::default)
}

/// [`PathFilter::included_in_file_set`] with the default `.elm` conventions.
pub fn included_in_file_set(path: &str) -> bool {
    default_filter().included_in_file_set(path)
}

/// Returns `true` when every segment of `file_path` below `source_dir` starts with an uppercase
/// ASCII letter, i.e. the file can be named by a module identifier.
///
/// A file outside `source_dir`, or a path equal to `source_dir`, is never a module path.
pub fn is_real_module_path(source_dir: &Path, file_path: &Path) -> bool {
    let Ok(module_path) = file_path.strip_prefix(source_dir) else {
        return false;
    };

    let mut segments = 0usize;
    for component in module_path.components() {
        match component {
            Component::CurDir => {}
            Component::Normal(segment) => {
                if !module_segment_pattern().is_match(&segment.to_string_lossy()) {
                    return false;
                }
                segments += 1;
            }
            _ => return false,
        }
    }

    segments > 0
}
