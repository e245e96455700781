//! Project and package manifest model.
//!
//! Only the fields the resolver consumes are modelled; everything else in `elm.json` is ignored.
//! Application and package manifests use different shapes for `dependencies` and
//! `exposed-modules`, so both are accepted.

mod loader;

use std::collections::BTreeMap;
use std::sync::OnceLock;

use regex::Regex;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use tracing::debug;

use crate::models::DependencyReference;

pub use loader::{InMemoryManifestLoader, JsonManifestLoader, ManifestLoader};

/// Parsed manifest of a project or installed package.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Manifest {
    /// Declared source directories, relative to the manifest's directory.
    pub source_directories: Option<Vec<String>>,
    /// Publicly exposed modules of a package.
    #[serde(default, deserialize_with = "default_on_mismatch")]
    pub exposed_modules: ExposedModules,
    /// Declared dependencies.
    #[serde(default, deserialize_with = "default_on_mismatch")]
    pub dependencies: Dependencies,
}

/// `exposed-modules` as either a flat list or named groups of modules.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum ExposedModules {
    /// `["Foo", "Foo.Bar"]`
    List(Vec<String>),
    /// `{"Primitives": ["Basics"], "Collections": ["List"]}`
    Grouped(BTreeMap<String, Vec<String>>),
}

impl Default for ExposedModules {
    fn default() -> Self {
        Self::List(Vec::new())
    }
}

impl ExposedModules {
    /// Every exposed module name, groups flattened in group-name order.
    pub fn module_names(&self) -> Vec<&str> {
        match self {
            Self::List(modules) => modules.iter().map(String::as_str).collect(),
            Self::Grouped(groups) => groups
                .values()
                .flat_map(|modules| modules.iter().map(String::as_str))
                .collect(),
        }
    }
}

/// `dependencies` in application or package form.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum Dependencies {
    /// Applications pin exact versions, split into direct and indirect dependencies.
    Application(ApplicationDependencies),
    /// Packages map names to version constraints.
    Package(BTreeMap<String, String>),
}

impl Default for Dependencies {
    fn default() -> Self {
        Self::Package(BTreeMap::new())
    }
}

/// Application dependency tables.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ApplicationDependencies {
    /// Dependencies imported by the application itself.
    #[serde(default)]
    pub direct: BTreeMap<String, String>,
    /// Dependencies required transitively.
    #[serde(default)]
    pub indirect: BTreeMap<String, String>,
}

/// Deserialize `T`, substituting its default when the value has an unrecognised shape.
fn default_on_mismatch<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_else(|err| {
        debug!("ignoring unrecognised manifest field: {}", err);
        T::default()
    }))
}

fn exact_version_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^\d+\.\d+\.\d+$").expect("invalid version regex"))
}

impl Manifest {
    /// Parse a manifest from JSON text.
    pub fn from_json_str(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }

    /// Declared source directories, or `defaults` when the manifest declares none.
    pub fn source_directories_or<'a>(&'a self, defaults: &'a [String]) -> &'a [String] {
        self.source_directories.as_deref().unwrap_or(defaults)
    }

    /// Dependencies whose version is already pinned to an exact release.
    ///
    /// Application manifests list direct dependencies before indirect ones. Package manifests
    /// only declare constraint ranges, which are skipped.
    pub fn pinned_dependencies(&self) -> Vec<DependencyReference> {
        let tables: Vec<&BTreeMap<String, String>> = match &self.dependencies {
            Dependencies::Application(app) => vec![&app.direct, &app.indirect],
            Dependencies::Package(constraints) => vec![constraints],
        };

        let mut pinned: Vec<DependencyReference> = Vec::new();
        for (name, version) in tables.into_iter().flatten() {
            let version = version.trim();
            if !exact_version_pattern().is_match(version) {
                continue;
            }
            let reference = DependencyReference::new(name.as_str(), version);
            if !pinned.contains(&reference) {
                pinned.push(reference);
            }
        }
        pinned
    }
}
