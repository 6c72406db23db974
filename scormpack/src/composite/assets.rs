//! Static runtime files of the composite player shell.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::error::{CompositeError, CompositeResult};
use crate::fsutil::{copy_dir_all, remove_dir_if_exists};

/// Items copied into every composite course root.
pub const DEFAULT_ASSET_ITEMS: [&str; 4] = ["index.html", "lernmar.svg", "main.css", "js"];

/// The HTML shell, stylesheet and script bundle that run a composite course.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompositeAssets {
    source_dir: PathBuf,
    items: Vec<String>,
}

impl CompositeAssets {
    /// Assets taken from `source_dir` with the default item list.
    pub fn new(source_dir: impl Into<PathBuf>) -> Self {
        Self {
            source_dir: source_dir.into(),
            items: DEFAULT_ASSET_ITEMS.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Replace the item list.
    pub fn with_items<I, S>(mut self, items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.items = items.into_iter().map(Into::into).collect();
        self
    }

    /// Directory the assets are copied from.
    pub fn source_dir(&self) -> &Path {
        &self.source_dir
    }

    /// Names of the copied items.
    pub fn items(&self) -> &[String] {
        &self.items
    }

    /// Copy every item into `dest`.
    ///
    /// Files overwrite their counterpart; directories replace theirs
    /// wholesale.
    ///
    /// # Errors
    ///
    /// Returns [`CompositeError::MissingAsset`] for an item that is neither a
    /// file nor a directory, and copy/remove errors from the file system.
    pub fn copy_into(&self, dest: &Path) -> CompositeResult<()> {
        for item in &self.items {
            let from = self.source_dir.join(item);
            let to = dest.join(item);

            if from.is_file() {
                fs::copy(&from, &to).map_err(|e| CompositeError::CopyFailed {
                    from: from.clone(),
                    to: to.clone(),
                    source: e,
                })?;
            } else if from.is_dir() {
                remove_dir_if_exists(&to).map_err(|e| CompositeError::RemoveFailed {
                    path: to.clone(),
                    source: e,
                })?;
                copy_dir_all(&from, &to).map_err(|e| CompositeError::CopyFailed {
                    from: from.clone(),
                    to: to.clone(),
                    source: e,
                })?;
            } else {
                return Err(CompositeError::MissingAsset {
                    item: item.clone(),
                    source_dir: self.source_dir.clone(),
                });
            }
            debug!(item = %item, dest = %dest.display(), "Copied composite asset");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_asset_dir(root: &Path) -> PathBuf {
        let dir = root.join("run/composite");
        fs::create_dir_all(dir.join("js")).unwrap();
        fs::write(dir.join("index.html"), "<html>shell</html>").unwrap();
        fs::write(dir.join("lernmar.svg"), "<svg/>").unwrap();
        fs::write(dir.join("main.css"), "body {}").unwrap();
        fs::write(dir.join("js/main.js"), "run();").unwrap();
        dir
    }

    #[test]
    fn test_copies_default_items() {
        let temp = TempDir::new().unwrap();
        let source = create_asset_dir(temp.path());
        let dest = temp.path().join("composite");
        fs::create_dir_all(&dest).unwrap();

        CompositeAssets::new(&source).copy_into(&dest).unwrap();

        assert!(dest.join("index.html").is_file());
        assert!(dest.join("lernmar.svg").is_file());
        assert!(dest.join("main.css").is_file());
        assert_eq!(fs::read_to_string(dest.join("js/main.js")).unwrap(), "run();");
    }

    #[test]
    fn test_accessors() {
        let assets = CompositeAssets::new("/opt/shell");
        assert_eq!(assets.source_dir(), Path::new("/opt/shell"));
        assert_eq!(assets.items(), DEFAULT_ASSET_ITEMS);

        let assets = assets.with_items(["index.html"]);
        assert_eq!(assets.items(), ["index.html"]);
    }

    #[test]
    fn test_directory_items_replace_stale_content() {
        let temp = TempDir::new().unwrap();
        let source = create_asset_dir(temp.path());
        let dest = temp.path().join("composite");
        fs::create_dir_all(dest.join("js")).unwrap();
        fs::write(dest.join("js/old.js"), "stale").unwrap();

        CompositeAssets::new(&source).copy_into(&dest).unwrap();

        assert!(!dest.join("js/old.js").exists());
        assert!(dest.join("js/main.js").exists());
    }

    #[test]
    fn test_missing_item() {
        let temp = TempDir::new().unwrap();
        let source = create_asset_dir(temp.path());
        let dest = temp.path().join("composite");
        fs::create_dir_all(&dest).unwrap();

        let err = CompositeAssets::new(&source)
            .with_items(["index.html", "favicon.ico"])
            .copy_into(&dest)
            .unwrap_err();

        assert!(matches!(
            err,
            CompositeError::MissingAsset { ref item, .. } if item == "favicon.ico"
        ));
    }
}
