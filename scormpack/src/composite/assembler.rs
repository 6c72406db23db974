//! Merging sub-courses into a composite course.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use super::assets::CompositeAssets;
use super::error::{CompositeError, CompositeResult};
use super::COURSES_DIR;
use crate::course::CourseIndex;
use crate::fsutil::{absolute_path, basename, copy_dir_all, is_within, remove_dir_if_exists};
use crate::manifest::{ManifestBuilder, DEFAULT_ENTRY};
use crate::MANIFEST_FILENAME;

/// What an assembly run changed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssemblySummary {
    /// Index entries dropped because their directory was gone.
    pub pruned: Vec<String>,
    /// Sub-courses copied and indexed, in processing order.
    pub merged: Vec<String>,
    /// Sub-course directories skipped (no manifest, or not a valid course).
    pub skipped: Vec<PathBuf>,
    /// Number of entries in the written index.
    pub course_count: usize,
    /// Path of the composite's manifest.
    pub manifest_path: PathBuf,
}

/// Builds and updates composite courses.
///
/// A composite keeps its sub-courses under `<composite>/courses`, lists them
/// in `<composite>/courses/index.json` and carries its own manifest covering
/// every file. Sub-courses from earlier runs that are not part of the
/// current call are preserved.
#[derive(Debug, Clone)]
pub struct CompositeAssembler {
    assets: Option<CompositeAssets>,
}

impl CompositeAssembler {
    /// Assembler that installs the given runtime assets.
    pub fn new(assets: CompositeAssets) -> Self {
        Self {
            assets: Some(assets),
        }
    }

    /// Assembler that leaves the composite root's runtime files alone.
    ///
    /// The composite must then already contain its entry document.
    pub fn without_assets() -> Self {
        Self { assets: None }
    }

    /// Merge `sub_course_dirs` into the composite at `composite_path`.
    ///
    /// Steps, in order: ensure `courses/` exists, load the index, prune
    /// entries whose directory is gone, replace and index each sub-course
    /// that has a manifest, save the index, copy runtime assets, and write
    /// the composite manifest named `name` (default: the directory name).
    ///
    /// # Errors
    ///
    /// Any error aborts the run and leaves earlier steps in place.
    pub fn assemble(
        &self,
        composite_path: &Path,
        sub_course_dirs: &[PathBuf],
        name: Option<&str>,
    ) -> CompositeResult<AssemblySummary> {
        let courses_dir = composite_path.join(COURSES_DIR);
        fs::create_dir_all(&courses_dir).map_err(|e| CompositeError::CreateDirectoryFailed {
            path: courses_dir.clone(),
            source: e,
        })?;

        let mut index = CourseIndex::open(&courses_dir)?;
        let mut summary = AssemblySummary {
            pruned: prune_missing(&mut index),
            ..AssemblySummary::default()
        };

        for sub_course_dir in sub_course_dirs {
            match merge_sub_course(&mut index, &courses_dir, sub_course_dir)? {
                Some(name) => summary.merged.push(name),
                None => summary.skipped.push(sub_course_dir.clone()),
            }
        }

        index.save()?;
        summary.course_count = index.len();

        if let Some(assets) = &self.assets {
            assets.copy_into(composite_path)?;
        }

        // Without a name the builder titles the manifest after the directory.
        let mut builder = ManifestBuilder::new().with_entry(DEFAULT_ENTRY);
        if let Some(name) = name {
            builder = builder.with_name(name);
        }
        summary.manifest_path = builder.build(composite_path)?;

        info!(
            composite = %composite_path.display(),
            merged = summary.merged.len(),
            pruned = summary.pruned.len(),
            skipped = summary.skipped.len(),
            courses = summary.course_count,
            "Assembled composite course"
        );
        Ok(summary)
    }
}

/// Drop entries whose course directory no longer exists.
fn prune_missing(index: &mut CourseIndex) -> Vec<String> {
    let mut pruned = Vec::new();
    for course in index.entries() {
        if !index.dir().join(&course.name).is_dir() {
            index.remove(&course.name);
            info!(name = %course.name, "Pruned index entry for removed course");
            pruned.push(course.name);
        }
    }
    pruned
}

/// Copy one sub-course into `courses_dir` and index it.
///
/// Returns the course name when it was indexed, `None` when skipped.
fn merge_sub_course(
    index: &mut CourseIndex,
    courses_dir: &Path,
    sub_course_dir: &Path,
) -> CompositeResult<Option<String>> {
    let source = absolute_path(sub_course_dir).map_err(|e| CompositeError::CopyFailed {
        from: sub_course_dir.to_path_buf(),
        to: courses_dir.to_path_buf(),
        source: e,
    })?;
    let Some(name) = basename(&source) else {
        warn!(path = %sub_course_dir.display(), "Ignoring sub-course without a directory name");
        return Ok(None);
    };

    if !source.join(MANIFEST_FILENAME).is_file() {
        warn!("Ignoring sub-course {} without manifest", name);
        return Ok(None);
    }

    let destination = courses_dir.join(&name);
    let target = absolute_path(&destination).map_err(|e| CompositeError::CopyFailed {
        from: source.clone(),
        to: destination.clone(),
        source: e,
    })?;

    if target != source {
        // A copy into its own subtree never terminates.
        if is_within(&target, &source) {
            return Err(CompositeError::CopyFailed {
                from: source,
                to: destination,
                source: io::Error::new(
                    io::ErrorKind::InvalidInput,
                    "composite course lies inside the sub-course",
                ),
            });
        }

        // Replace wholesale so stale files from an older copy never linger.
        remove_dir_if_exists(&destination).map_err(|e| CompositeError::RemoveFailed {
            path: destination.clone(),
            source: e,
        })?;
        copy_dir_all(&source, &destination).map_err(|e| CompositeError::CopyFailed {
            from: source.clone(),
            to: destination.clone(),
            source: e,
        })?;
    }

    if index.ingest_one(&destination)? {
        info!(name = %name, "Merged sub-course");
        Ok(Some(name))
    } else {
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::course::CourseEntry;
    use crate::manifest::create_manifest;
    use crate::INDEX_FILENAME;
    use tempfile::TempDir;

    fn create_sub_course(root: &Path, name: &str, files: &[(&str, &str)]) -> PathBuf {
        let dir = root.join("sources").join(name);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("index.html"), format!("<html>{}</html>", name)).unwrap();
        for (file, content) in files {
            let path = dir.join(file);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, content).unwrap();
        }
        create_manifest(&dir, None, None).unwrap();
        dir
    }

    fn create_composite(root: &Path) -> PathBuf {
        let dir = root.join("bundle");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("index.html"), "<html>shell</html>").unwrap();
        dir
    }

    fn names(courses_dir: &Path) -> Vec<String> {
        CourseIndex::open(courses_dir)
            .unwrap()
            .entries()
            .into_iter()
            .map(|e| e.name)
            .collect()
    }

    #[test]
    fn test_assemble_new_composite() {
        let temp = TempDir::new().unwrap();
        let sub1 = create_sub_course(temp.path(), "sub1", &[]);
        let sub2 = create_sub_course(temp.path(), "sub2", &[("js/app.js", "x")]);
        let composite = create_composite(temp.path());

        let summary = CompositeAssembler::without_assets()
            .assemble(&composite, &[sub1, sub2], Some("Bundle"))
            .unwrap();

        assert_eq!(summary.merged, vec!["sub1", "sub2"]);
        assert_eq!(summary.course_count, 2);
        assert!(composite.join("courses/sub2/js/app.js").is_file());
        assert!(composite.join("courses").join(INDEX_FILENAME).is_file());

        let index = CourseIndex::open(composite.join("courses")).unwrap();
        assert_eq!(
            index.entries(),
            vec![
                CourseEntry::new("sub1", "sub1/index.html"),
                CourseEntry::new("sub2", "sub2/index.html"),
            ]
        );

        let manifest = fs::read_to_string(&summary.manifest_path).unwrap();
        assert!(manifest.contains("<title>Bundle</title>"));
        assert!(manifest.contains("<file href=\"courses/sub2/js/app.js\"/>"));
        assert!(manifest.contains("<file href=\"courses/index.json\"/>"));
    }

    #[test]
    fn test_reassemble_replaces_and_moves_to_end() {
        let temp = TempDir::new().unwrap();
        let sub1 = create_sub_course(temp.path(), "sub1", &[("old.txt", "old")]);
        let sub2 = create_sub_course(temp.path(), "sub2", &[]);
        let composite = create_composite(temp.path());
        let assembler = CompositeAssembler::without_assets();

        assembler
            .assemble(&composite, &[sub1.clone(), sub2], None)
            .unwrap();

        fs::remove_file(sub1.join("old.txt")).unwrap();
        fs::write(sub1.join("new.txt"), "new").unwrap();
        assembler.assemble(&composite, &[sub1], None).unwrap();

        assert_eq!(names(&composite.join("courses")), vec!["sub2", "sub1"]);
        assert!(!composite.join("courses/sub1/old.txt").exists());
        assert!(composite.join("courses/sub1/new.txt").exists());
    }

    #[test]
    fn test_prunes_removed_courses() {
        let temp = TempDir::new().unwrap();
        let sub1 = create_sub_course(temp.path(), "sub1", &[]);
        let sub2 = create_sub_course(temp.path(), "sub2", &[]);
        let composite = create_composite(temp.path());
        let assembler = CompositeAssembler::without_assets();

        assembler.assemble(&composite, &[sub1, sub2], None).unwrap();
        fs::remove_dir_all(composite.join("courses/sub1")).unwrap();

        let summary = assembler.assemble(&composite, &[], None).unwrap();
        assert_eq!(summary.pruned, vec!["sub1"]);
        assert_eq!(names(&composite.join("courses")), vec!["sub2"]);
    }

    #[test]
    fn test_skips_sub_course_without_manifest() {
        let temp = TempDir::new().unwrap();
        let plain = temp.path().join("sources/plain");
        fs::create_dir_all(&plain).unwrap();
        fs::write(plain.join("index.html"), "<html/>").unwrap();
        let composite = create_composite(temp.path());

        let summary = CompositeAssembler::without_assets()
            .assemble(&composite, &[plain.clone()], None)
            .unwrap();

        assert!(summary.merged.is_empty());
        assert_eq!(summary.skipped, vec![plain]);
        assert!(!composite.join("courses/plain").exists());
    }

    #[test]
    fn test_default_name_is_directory_name() {
        let temp = TempDir::new().unwrap();
        let composite = create_composite(temp.path());

        let summary = CompositeAssembler::without_assets()
            .assemble(&composite, &[], None)
            .unwrap();

        let manifest = fs::read_to_string(summary.manifest_path).unwrap();
        assert!(manifest.contains("<title>bundle</title>"));
    }

    #[test]
    fn test_given_name_is_used_as_title() {
        let temp = TempDir::new().unwrap();
        let composite = create_composite(temp.path());

        let summary = CompositeAssembler::without_assets()
            .assemble(&composite, &[], Some("Safety Bundle"))
            .unwrap();

        let manifest = fs::read_to_string(summary.manifest_path).unwrap();
        assert!(manifest.contains("<title>Safety Bundle</title>"));
        assert!(!manifest.contains("<title>bundle</title>"));
    }

    #[test]
    fn test_composite_inside_sub_course_is_rejected() {
        let temp = TempDir::new().unwrap();
        let sub1 = create_sub_course(temp.path(), "sub1", &[]);
        let composite = sub1.join("bundle");

        let err = CompositeAssembler::without_assets()
            .assemble(&composite, &[sub1.clone()], None)
            .unwrap_err();

        match err {
            CompositeError::CopyFailed { from, source, .. } => {
                assert_eq!(from, sub1);
                assert_eq!(source.kind(), io::ErrorKind::InvalidInput);
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(!composite.join("courses/sub1").exists());
    }

    #[test]
    fn test_installs_assets() {
        let temp = TempDir::new().unwrap();
        let assets_dir = temp.path().join("assets");
        fs::create_dir_all(assets_dir.join("js")).unwrap();
        fs::write(assets_dir.join("index.html"), "<html>shell</html>").unwrap();
        fs::write(assets_dir.join("js/main.js"), "run();").unwrap();
        let sub1 = create_sub_course(temp.path(), "sub1", &[]);
        let composite = temp.path().join("fresh");

        let assets = CompositeAssets::new(&assets_dir).with_items(["index.html", "js"]);
        let summary = CompositeAssembler::new(assets)
            .assemble(&composite, &[sub1], None)
            .unwrap();

        assert!(composite.join("index.html").is_file());
        assert!(composite.join("js/main.js").is_file());
        let manifest = fs::read_to_string(summary.manifest_path).unwrap();
        assert!(manifest.contains("<file href=\"js/main.js\"/>"));
    }

    #[test]
    fn test_missing_entry_aborts_after_index_written() {
        let temp = TempDir::new().unwrap();
        let sub1 = create_sub_course(temp.path(), "sub1", &[]);
        let composite = temp.path().join("no-shell");

        let err = CompositeAssembler::without_assets()
            .assemble(&composite, &[sub1], None)
            .unwrap_err();

        assert!(matches!(err, CompositeError::Manifest(_)));
        assert_eq!(names(&composite.join("courses")), vec!["sub1"]);
    }
}
