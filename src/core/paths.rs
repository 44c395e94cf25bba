use std::path::{Path, PathBuf};

use crate::state::SETTINGS_FILE_NAME;

const DEFAULT_ANNOTATIONS_FILE: &str = "annotations.json";

fn resource_roots() -> Vec<PathBuf> {
    let mut roots = Vec::new();
    if let Ok(exe) = std::env::current_exe() {
        if let Some(parent) = exe.parent() {
            roots.push(parent.to_path_buf());
        }
    }
    let manifest_root = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    if manifest_root.exists() {
        roots.push(manifest_root);
    }
    roots
}

/// Resolve a relative path against the executable directory, then the crate root.
/// The first existing candidate wins; otherwise the path lands in the first root.
pub fn resolve_resource_path(path: &Path) -> PathBuf {
    if path.is_absolute() {
        return path.to_path_buf();
    }
    let roots = resource_roots();
    for root in &roots {
        let candidate = root.join(path);
        if candidate.exists() {
            return candidate;
        }
    }
    roots
        .first()
        .map(|root| root.join(path))
        .unwrap_or_else(|| path.to_path_buf())
}

pub fn settings_path() -> PathBuf {
    resolve_resource_path(Path::new(SETTINGS_FILE_NAME))
}

pub fn annotations_path(configured: Option<&str>) -> PathBuf {
    resolve_resource_path(Path::new(configured.unwrap_or(DEFAULT_ANNOTATIONS_FILE)))
}
