use std::path::{Component, Path, PathBuf};

/// Lexically collapse `.` and `..` segments and redundant separators.
///
/// `..` directly below the root is dropped; leading `..` of relative paths is kept. An empty
/// result becomes `.`.
pub fn normalize(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match normalized.components().next_back() {
                Some(Component::Normal(_)) => {
                    normalized.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => normalized.push(".."),
            },
            other => normalized.push(other.as_os_str()),
        }
    }

    if normalized.as_os_str().is_empty() {
        PathBuf::from(".")
    } else {
        normalized
    }
}

/// Absolute, normalised form of `path`, resolved against the current directory.
///
/// Falls back to the lexical form when the current directory is unavailable.
pub fn absolute(path: &Path) -> PathBuf {
    match std::path::absolute(path) {
        Ok(resolved) => normalize(&resolved),
        Err(_) => normalize(path),
    }
}

/// Render a path with forward slashes regardless of the host separator.
///
/// Backslashes are only separators on Windows; elsewhere they are part of a file name and kept.
pub fn to_slash(path: &Path) -> String {
    let rendered = path.to_string_lossy();
    if cfg!(windows) {
        rendered.replace('\\', "/")
    } else {
        rendered.into_owned()
    }
}

/// Express `target` relative to `reference_dir`.
///
/// Both paths are made absolute and compared segment by segment; after the common prefix, every
/// remaining segment of `reference_dir` becomes `..` and the rest of `target` is appended.
pub fn relative_path(reference_dir: &Path, target: &Path) -> String {
    let reference = absolute(reference_dir);
    let target = absolute(target);

    let reference: Vec<Component> = reference.components().collect();
    let target: Vec<Component> = target.components().collect();

    let common = reference
        .iter()
        .zip(target.iter())
        .take_while(|(left, right)| left == right)
        .count();

    let mut relative = PathBuf::new();
    for _ in common..reference.len() {
        relative.push("..");
    }
    for component in &target[common..] {
        relative.push(component.as_os_str());
    }

    to_slash(&normalize(&relative))
}
