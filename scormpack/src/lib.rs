//! scormpack - SCORM course packaging and indexing
//!
//! This library discovers SCORM courses in a directory tree, maintains the
//! `index.json` course index consumed by the player, generates SCORM 2004
//! manifests and merges several courses into one composite course.
//!
//! # Modules
//!
//! - [`course`]: course entries and the name-keyed [`course::CourseIndex`]
//! - [`manifest`]: manifest href resolution, resource enumeration and
//!   manifest generation
//! - [`composite`]: merging sub-courses into a composite course
//! - [`config`]: `~/.scormpack/config.ini` handling
//! - [`logging`]: tracing subscriber setup
//! - [`fsutil`]: recursive copy/remove helpers

pub mod composite;
pub mod config;
pub mod course;
pub mod fsutil;
pub mod logging;
pub mod manifest;

/// Filename of a SCORM manifest inside a course directory.
pub const MANIFEST_FILENAME: &str = "imsmanifest.xml";

/// Filename of the course index inside a courses directory.
pub const INDEX_FILENAME: &str = "index.json";
