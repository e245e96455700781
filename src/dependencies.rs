//! Resolution of an installed dependency's exposed module files.

use std::path::Path;

use tracing::debug;

use crate::config::GathererConfig;
use crate::error::{GatherError, GatherResult};
use crate::manifest::{ExposedModules, ManifestLoader};
use crate::models::DependencyReference;
use crate::resolver::DirectoryResolver;

/// Resolve the files implementing the exposed modules of `dependency`.
///
/// The dependency is expected under `<project_dir>/<dependency_store>/<name>/<version>`; its
/// files are returned relative to `project_dir`. Internal modules of the package are never
/// returned.
pub fn resolve_dependency_files<L: ManifestLoader>(
    config: &GathererConfig,
    loader: &L,
    project_dir: &Path,
    dependency: &DependencyReference,
) -> GatherResult<Vec<String>> {
    let dependency_dir = config.dependency_dir(project_dir, dependency);
    let manifest = loader
        .load(&config.manifest_path(&dependency_dir))
        .map_err(|source| GatherError::DependencyNotFound {
            name: dependency.name.clone(),
            version: dependency.version.clone(),
            path: dependency_dir.clone(),
            source,
        })?;

    let candidates = DirectoryResolver::new(config).resolve_source_files(
        project_dir,
        &dependency_dir,
        &manifest,
    );

    let suffixes = exposed_module_suffixes(&manifest.exposed_modules, &config.extension_suffix());
    let exposed: Vec<String> = candidates
        .into_iter()
        .filter(|path| suffixes.iter().any(|suffix| path.ends_with(suffix.as_str())))
        .collect();

    debug!(
        "dependency {} {} exposes {} of its source files",
        dependency.name,
        dependency.version,
        exposed.len()
    );
    Ok(exposed)
}

/// Map each exposed module name to the path suffix of the file implementing it.
///
/// `Foo.Bar` becomes `/Foo/Bar.elm`. Names are split on literal dots.
fn exposed_module_suffixes(modules: &ExposedModules, extension_suffix: &str) -> Vec<String> {
    modules
        .module_names()
        .into_iter()
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(|name| format!("/{}{}", name.split('.').collect::<Vec<_>>().join("/"), extension_suffix))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ManifestError;
    use crate::manifest::{InMemoryManifestLoader, JsonManifestLoader, Manifest};
    use std::fs;
    use tempfile::tempdir;

    fn touch(root: &Path, relative: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "").unwrap();
    }

    #[test]
    fn builds_suffixes_from_module_names() {
        let modules = ExposedModules::List(vec!["Foo.Bar".into(), "Main".into(), " ".into()]);
        assert_eq!(exposed_module_suffixes(&modules, ".elm"), vec![
            "/Foo/Bar.elm".to_string(),
            "/Main.elm".to_string(),
        ]);
    }

    #[test]
    fn dots_are_not_wildcards() {
        let modules = ExposedModules::List(vec!["Foo.Bar".into()]);
        let suffixes = exposed_module_suffixes(&modules, ".elm");
        assert!(!"src/FooXBar.elm".ends_with(suffixes[0].as_str()));
    }

    #[test]
    fn returns_only_exposed_modules() {
        let dir = tempdir().unwrap();
        let project = dir.path();
        let dependency = DependencyReference::new("author/pkg", "1.0.0");
        let config = GathererConfig::default();
        let package = config.dependency_dir(project, &dependency);
        touch(&package, "src/Foo/Bar.elm");
        touch(&package, "src/Foo/Internal.elm");

        let loader = InMemoryManifestLoader::new().with_manifest(
            config.manifest_path(&package),
            Manifest::from_json_str(r#"{"exposed-modules": ["Foo.Bar"]}"#).unwrap(),
        );

        let files = resolve_dependency_files(&config, &loader, project, &dependency).unwrap();
        assert_eq!(files, vec![
            "elm-stuff/packages/author/pkg/1.0.0/src/Foo/Bar.elm".to_string()
        ]);
    }

    #[test]
    fn missing_dependency_is_fatal() {
        let dir = tempdir().unwrap();
        let dependency = DependencyReference::new("author/missing", "2.0.0");

        let err = resolve_dependency_files(
            &GathererConfig::default(),
            &JsonManifestLoader,
            dir.path(),
            &dependency,
        )
        .unwrap_err();

        match err {
            GatherError::DependencyNotFound {
                name,
                version,
                source,
                ..
            } => {
                assert_eq!(name, "author/missing");
                assert_eq!(version, "2.0.0");
                assert!(matches!(source, ManifestError::Io { .. }));
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
