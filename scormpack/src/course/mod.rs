//! Course entries and the `index.json` course index.
//!
//! The index maps course directory names to the URL of each course's entry
//! document. The player reads it to list courses in order; the composite
//! assembler maintains it while merging sub-courses.
//!
//! # File Format
//!
//! ```text
//! {
//!   "courses": [
//!     { "name": "alpha", "path": "alpha/index.html" }
//!   ]
//! }
//! ```

mod entry;
mod error;
mod index;

pub use entry::CourseEntry;
pub use error::{IndexError, IndexResult};
pub use index::CourseIndex;
