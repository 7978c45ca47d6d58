//! Lexical path helpers.
//!
//! Registry keys are compared as cleaned paths so that the same directory
//! reached through `docs/./guide` or `docs/guide/` maps to one node. Nothing
//! here touches the filesystem.

use std::path::{Component, Path, PathBuf};

/// Clean a path lexically.
///
/// Drops `.` components and trailing separators, and resolves `..` against a
/// preceding normal component. Leading `..` components are kept. An empty
/// result becomes `.`.
#[must_use]
pub fn clean_path(path: &Path) -> PathBuf {
    let mut cleaned = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match cleaned.components().next_back() {
                Some(Component::Normal(_)) => {
                    cleaned.pop();
                }
                // `..` at the root stays at the root
                Some(Component::RootDir | Component::Prefix(_)) => {}
                _ => cleaned.push(".."),
            },
            other => cleaned.push(other.as_os_str()),
        }
    }

    if cleaned.as_os_str().is_empty() {
        cleaned.push(".");
    }
    cleaned
}

/// Cleaned parent of a cleaned directory path.
///
/// Returns `None` at the filesystem root and for `.` and `..` chains whose
/// parent cleans back to the path itself.
pub(crate) fn parent_dir(dir: &Path) -> Option<PathBuf> {
    let parent = clean_path(dir.parent()?);
    (parent != dir).then_some(parent)
}

/// Path of `path` relative to `base`, both compared lexically.
///
/// Returns `None` when no relative path exists (for example a relative `path`
/// against an absolute `base`).
pub(crate) fn relative_path(path: &Path, base: &Path) -> Option<PathBuf> {
    pathdiff::diff_paths(clean_path(path), clean_path(base))
}
