//! SCORM manifest handling.
//!
//! Three pieces live here:
//!
//! - [`resolve_course`]: reads an existing `imsmanifest.xml` and turns the
//!   entry document reference of its single resource into a course index
//!   entry, rejecting absolute references and references that escape the
//!   course directory.
//! - [`ResourceTree`]: enumerates the files of a course in a deterministic
//!   order for the manifest's `<resources>` element.
//! - [`ManifestBuilder`]: writes a SCORM 2004 4th edition manifest for a
//!   single-activity course.
//!
//! # Example
//!
//! ```ignore
//! use scormpack::manifest::{resolve_course, ManifestBuilder};
//!
//! ManifestBuilder::new().with_name("Safety Basics").build("courses/safety".as_ref())?;
//! let entry = resolve_course("courses/safety".as_ref())?;
//! assert_eq!(entry.path, "safety/index.html");
//! ```

mod builder;
mod error;
mod resolver;
mod resources;

pub use builder::{create_manifest, ManifestBuilder, ManifestDescriptor};
pub use error::{ManifestError, ManifestResult, ResolveError, ResolveResult};
pub use resolver::resolve_course;
pub use resources::ResourceTree;

/// IMS Content Packaging 1.1 namespace.
pub const IMSCP_NAMESPACE: &str = "http://www.imsglobal.org/xsd/imscp_v1p1";

/// ADL content packaging extension namespace (`adlcp:`).
pub const ADLCP_NAMESPACE: &str = "http://www.adlnet.org/xsd/adlcp_v1p3";

/// ADL sequencing extension namespace (`adlseq:`).
pub const ADLSEQ_NAMESPACE: &str = "http://www.adlnet.org/xsd/adlseq_v1p3";

/// Value of the manifest `<schema>` element.
pub const SCHEMA: &str = "ADL SCORM";

/// Value of the manifest `<schemaversion>` element.
pub const SCHEMA_VERSION: &str = "2004 4th Edition";

/// Entry document used when none is given.
pub const DEFAULT_ENTRY: &str = "index.html";
