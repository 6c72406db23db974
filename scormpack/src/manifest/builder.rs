//! SCORM 2004 manifest generation for single-activity courses.

use std::fs;
use std::fmt::Display;
use std::io::Write;
use std::path::{Path, PathBuf};

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use tracing::info;
use uuid::Uuid;

use super::error::{ManifestError, ManifestResult};
use super::resources::ResourceTree;
use super::{
    ADLCP_NAMESPACE, ADLSEQ_NAMESPACE, DEFAULT_ENTRY, IMSCP_NAMESPACE, SCHEMA, SCHEMA_VERSION,
};
use crate::fsutil::{absolute_path, basename};
use crate::MANIFEST_FILENAME;

/// Identifier of the single organization item.
const ITEM_IDENTIFIER: &str = "item";

/// Identifier of the single resource, referenced by the item.
const RESOURCE_IDENTIFIER: &str = "resource";

/// Everything needed to render a manifest.
///
/// Built fresh from the course directory for every manifest; never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestDescriptor {
    /// Course title, also used as organization identifier.
    pub name: String,
    /// Posix-relative path of the entry document.
    pub entry_path: String,
    /// Posix-relative paths of every file in the course, in walk order.
    pub files: Vec<String>,
}

impl ManifestDescriptor {
    /// Render the manifest document with the given metadata identifier.
    pub fn to_xml(&self, identifier: &str) -> ManifestResult<Vec<u8>> {
        let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);

        writer
            .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
            .map_err(xml_error)?;

        start(
            &mut writer,
            "manifest",
            &[
                ("xmlns", IMSCP_NAMESPACE),
                ("xmlns:adlcp", ADLCP_NAMESPACE),
                ("xmlns:adlseq", ADLSEQ_NAMESPACE),
            ],
        )?;
        self.write_metadata(&mut writer, identifier)?;
        self.write_organizations(&mut writer)?;
        self.write_resources(&mut writer)?;
        end(&mut writer, "manifest")?;

        let mut xml = writer.into_inner();
        xml.push(b'\n');
        Ok(xml)
    }

    fn write_metadata<W: Write>(&self, writer: &mut Writer<W>, identifier: &str) -> ManifestResult<()> {
        // Random per build; consumers treat it as an opaque stamp.
        start(
            writer,
            "metadata",
            &[("identifier", identifier), ("version", "1")],
        )?;
        text_element(writer, "schema", SCHEMA)?;
        text_element(writer, "schemaversion", SCHEMA_VERSION)?;
        end(writer, "metadata")
    }

    fn write_organizations<W: Write>(&self, writer: &mut Writer<W>) -> ManifestResult<()> {
        start(writer, "organizations", &[("default", self.name.as_str())])?;
        start(
            writer,
            "organization",
            &[
                ("identifier", self.name.as_str()),
                ("adlseq:objectivesGlobalToSystem", "false"),
            ],
        )?;
        text_element(writer, "title", &self.name)?;

        start(
            writer,
            "item",
            &[
                ("identifier", ITEM_IDENTIFIER),
                ("identifierref", RESOURCE_IDENTIFIER),
            ],
        )?;
        text_element(writer, "title", &self.name)?;
        end(writer, "item")?;

        end(writer, "organization")?;
        end(writer, "organizations")
    }

    fn write_resources<W: Write>(&self, writer: &mut Writer<W>) -> ManifestResult<()> {
        start(writer, "resources", &[])?;
        start(
            writer,
            "resource",
            &[
                ("identifier", RESOURCE_IDENTIFIER),
                ("type", "webcontent"),
                ("adlcp:scormType", "sco"),
                ("href", self.entry_path.as_str()),
            ],
        )?;
        for file in &self.files {
            writer
                .write_event(Event::Empty(
                    BytesStart::new("file").with_attributes([("href", file.as_str())]),
                ))
                .map_err(xml_error)?;
        }
        end(writer, "resource")?;
        end(writer, "resources")
    }
}

/// Generates `imsmanifest.xml` for a course directory.
///
/// # Example
///
/// ```ignore
/// let path = ManifestBuilder::new()
///     .with_name("Fire Safety")
///     .with_entry("start.html")
///     .build(Path::new("courses/fire"))?;
/// ```
#[derive(Debug, Clone)]
pub struct ManifestBuilder {
    name: Option<String>,
    entry: String,
    resources: ResourceTree,
}

impl Default for ManifestBuilder {
    fn default() -> Self {
        Self {
            name: None,
            entry: DEFAULT_ENTRY.to_string(),
            resources: ResourceTree::new(),
        }
    }
}

impl ManifestBuilder {
    /// Builder with the directory name as title and `index.html` as entry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the course title.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the posix-relative entry document.
    pub fn with_entry(mut self, entry: impl Into<String>) -> Self {
        self.entry = entry.into();
        self
    }

    /// Use a custom resource walker (for extra exclusions).
    pub fn with_resources(mut self, resources: ResourceTree) -> Self {
        self.resources = resources;
        self
    }

    /// Collect the descriptor for `course_path` without writing anything.
    ///
    /// # Errors
    ///
    /// Returns [`ManifestError::CourseNotFound`] if the course is not a
    /// directory and [`ManifestError::EntryNotFound`] if the entry document
    /// does not exist.
    pub fn describe(&self, course_path: &Path) -> ManifestResult<ManifestDescriptor> {
        if !course_path.is_dir() {
            return Err(ManifestError::CourseNotFound(course_path.to_path_buf()));
        }

        let name = match &self.name {
            Some(name) => name.clone(),
            None => {
                let absolute = absolute_path(course_path).map_err(|e| ManifestError::ReadFailed {
                    path: course_path.to_path_buf(),
                    source: e,
                })?;
                basename(&absolute).unwrap_or_else(|| absolute.display().to_string())
            }
        };

        let entry_file = course_path.join(&self.entry);
        if !entry_file.is_file() {
            return Err(ManifestError::EntryNotFound(entry_file));
        }

        let files = self.resources.build(course_path)?;

        Ok(ManifestDescriptor {
            name,
            entry_path: self.entry.clone(),
            files,
        })
    }

    /// Write `<course_path>/imsmanifest.xml`, replacing any existing manifest.
    ///
    /// Returns the path of the written manifest.
    pub fn build(&self, course_path: &Path) -> ManifestResult<PathBuf> {
        let descriptor = self.describe(course_path)?;
        let identifier = Uuid::new_v4().simple().to_string();
        let xml = descriptor.to_xml(&identifier)?;

        let manifest_path = course_path.join(MANIFEST_FILENAME);
        fs::write(&manifest_path, xml).map_err(|e| ManifestError::WriteFailed {
            path: manifest_path.clone(),
            source: e,
        })?;

        info!(
            manifest = %manifest_path.display(),
            name = %descriptor.name,
            files = descriptor.files.len(),
            "Wrote manifest"
        );
        Ok(manifest_path)
    }
}

/// Write a manifest with optional title and entry document.
///
/// Shorthand for [`ManifestBuilder`] with the given overrides.
pub fn create_manifest(
    course_path: &Path,
    name: Option<&str>,
    entry: Option<&str>,
) -> ManifestResult<PathBuf> {
    let mut builder = ManifestBuilder::new();
    if let Some(name) = name {
        builder = builder.with_name(name);
    }
    if let Some(entry) = entry {
        builder = builder.with_entry(entry);
    }
    builder.build(course_path)
}

fn start<W: Write>(
    writer: &mut Writer<W>,
    name: &str,
    attributes: &[(&str, &str)],
) -> ManifestResult<()> {
    let element = BytesStart::new(name).with_attributes(attributes.iter().copied());
    writer.write_event(Event::Start(element)).map_err(xml_error)
}

fn end<W: Write>(writer: &mut Writer<W>, name: &str) -> ManifestResult<()> {
    writer
        .write_event(Event::End(BytesEnd::new(name)))
        .map_err(xml_error)
}

fn text_element<W: Write>(writer: &mut Writer<W>, name: &str, text: &str) -> ManifestResult<()> {
    start(writer, name, &[])?;
    writer
        .write_event(Event::Text(BytesText::new(text)))
        .map_err(xml_error)?;
    end(writer, name)
}

fn xml_error(e: impl Display) -> ManifestError {
    ManifestError::Xml(e.to_string())
}
