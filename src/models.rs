//! Data structures produced while gathering project files.

use serde::{Deserialize, Serialize};

/// Installed package identified by name and already-selected version.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize)]
pub struct DependencyReference {
  /// Package name such as `elm/core`.
  pub name: String,
  /// Exact installed version such as `1.0.5`.
  pub version: String,
}

impl DependencyReference {
  /// Create a reference from a name and version.
  pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
    Self {
      name: name.into(),
      version: version.into(),
    }
  }
}

/// Files a downstream tool should analyse, relative to the gathered project directory.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedFileSet {
  /// Interface files. Always empty.
  pub interface_files: Vec<String>,
  /// Module source files in resolution order.
  pub source_files: Vec<String>,
}

impl ResolvedFileSet {
  /// Wrap resolved source files; interface files stay empty.
  pub fn from_source_files(source_files: Vec<String>) -> Self {
    Self {
      interface_files: Vec::new(),
      source_files,
    }
  }
}

/// Exposed module files of a single installed dependency.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DependencyFileSet {
  /// Dependency the files belong to.
  pub dependency: DependencyReference,
  /// Exposed module files, relative to the project directory.
  pub source_files: Vec<String>,
}
