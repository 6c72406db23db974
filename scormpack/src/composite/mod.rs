//! Composite courses built from several SCORM sub-courses.
//!
//! # Layout
//!
//! ```text
//! composite/
//! ├── imsmanifest.xml      generated, covers every file below
//! ├── index.html           player shell (runtime asset)
//! ├── main.css, js/, ...   runtime assets
//! └── courses/
//!     ├── index.json       course index of the sub-courses
//!     ├── sub1/            copied sub-course
//!     └── sub2/
//! ```
//!
//! Running the assembly again with some of the same sub-courses refreshes
//! them in place and moves them to the end of the index; sub-courses not
//! named in the call are kept unless their directory was deleted.

mod assembler;
mod assets;
mod error;

pub use assembler::{AssemblySummary, CompositeAssembler};
pub use assets::{CompositeAssets, DEFAULT_ASSET_ITEMS};
pub use error::{CompositeError, CompositeResult};

/// Subdirectory of a composite holding its sub-courses and index.
pub const COURSES_DIR: &str = "courses";
