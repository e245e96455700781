#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

pub mod config;
pub mod dependencies;
pub mod error;
pub mod gatherer;
pub mod manifest;
pub mod models;
pub mod paths;
pub mod resolver;

pub use config::GathererConfig;
pub use dependencies::resolve_dependency_files;
pub use error::{GatherError, GatherResult, ManifestError};
pub use gatherer::{FileGatherer, gather};
pub use manifest::{InMemoryManifestLoader, JsonManifestLoader, Manifest, ManifestLoader};
pub use models::{DependencyFileSet, DependencyReference, ResolvedFileSet};
pub use paths::{PathFilter, included_in_file_set, is_real_module_path};
pub use resolver::DirectoryResolver;
