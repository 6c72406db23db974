//! File-system helpers shared by the index, manifest and composite modules.
//!
//! Paths are compared lexically: [`normalize_path`] collapses `.` and `..`
//! without touching the file system, so a reference to a file that does not
//! exist yet can still be checked for containment.

use std::env;
use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

use tracing::debug;

/// Lexically normalize a path, collapsing `.` and `..` components.
///
/// `..` never climbs above the root; on a relative path, leading `..`
/// components are kept.
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::Prefix(_) | Component::RootDir => normalized.push(component.as_os_str()),
            Component::CurDir => {}
            Component::ParentDir => match normalized.components().next_back() {
                Some(Component::Normal(_)) => {
                    normalized.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => normalized.push(".."),
            },
            Component::Normal(name) => normalized.push(name),
        }
    }
    if normalized.as_os_str().is_empty() {
        normalized.push(".");
    }
    normalized
}

/// Make a path absolute against the current working directory and normalize it.
pub fn absolute_path(path: &Path) -> io::Result<PathBuf> {
    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        env::current_dir()?.join(path)
    };
    Ok(normalize_path(&joined))
}

/// Check whether `path` equals `base` or lies beneath it.
///
/// Both paths should already be absolute and normalized. The comparison is
/// component-wise, so `/courses/course10` is not inside `/courses/course1`.
pub fn is_within(path: &Path, base: &Path) -> bool {
    path.starts_with(base)
}

/// Final path component as a UTF-8 string, if there is one.
pub fn basename(path: &Path) -> Option<String> {
    path.file_name().map(|name| name.to_string_lossy().into_owned())
}

/// Recursively copy `src` into `dst`, creating `dst` and any parents.
///
/// Returns the number of files copied.
pub fn copy_dir_all(src: &Path, dst: &Path) -> io::Result<u64> {
    fs::create_dir_all(dst)?;

    let mut copied = 0;
    for entry in fs::read_dir(src)? {
        let entry = entry?;
        let from = entry.path();
        let to = dst.join(entry.file_name());
        if from.is_dir() {
            copied += copy_dir_all(&from, &to)?;
        } else {
            fs::copy(&from, &to)?;
            debug!(from = %from.display(), to = %to.display(), "Copied file");
            copied += 1;
        }
    }
    Ok(copied)
}

/// Remove a directory tree if it exists.
///
/// Returns true if something was removed.
pub fn remove_dir_if_exists(path: &Path) -> io::Result<bool> {
    if path.is_dir() {
        fs::remove_dir_all(path)?;
        Ok(true)
    } else {
        Ok(false)
    }
}

/// Immediate subdirectories of `dir`, sorted by name.
pub fn sorted_subdirectories(dir: &Path) -> io::Result<Vec<PathBuf>> {
    let mut dirs = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_dir() {
            dirs.push(path);
        }
    }
    dirs.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(dirs)
}
