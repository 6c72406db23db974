//! Resolution of a course's entry document from its manifest.
//!
//! A course qualifies for the index when its manifest names an entry
//! document through the `href` of the first `resources/resource` element,
//! and that reference is relative, stays inside the course directory and
//! points at an existing file.

use std::fs;
use std::path::Path;

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, CONTROLS};
use quick_xml::events::{BytesStart, Event};
use quick_xml::name::{Namespace, ResolveResult as NsResolution};
use quick_xml::NsReader;
use url::Url;

use super::error::{ResolveError, ResolveResult};
use super::IMSCP_NAMESPACE;
use crate::course::CourseEntry;
use crate::fsutil::{absolute_path, basename, is_within, normalize_path};
use crate::MANIFEST_FILENAME;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Characters escaped when a course directory name becomes a URL segment.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Resolve a course directory to its index entry.
///
/// On success the entry's `name` is the directory's basename and its `path`
/// is `<name>/<href path>` with the href's query and fragment carried over,
/// relative to the course's parent directory.
///
/// # Errors
///
/// Returns a skip condition (see [`ResolveError::is_skip`]) when the course
/// does not qualify, and [`ResolveError::MalformedManifest`] or
/// [`ResolveError::ReadFailed`] when the manifest cannot be read at all.
pub fn resolve_course(course_path: &Path) -> ResolveResult<CourseEntry> {
    let manifest_path = course_path.join(MANIFEST_FILENAME);
    if !manifest_path.is_file() {
        return Err(ResolveError::NoManifest(course_path.to_path_buf()));
    }

    let content = fs::read(&manifest_path).map_err(|e| ResolveError::ReadFailed {
        path: manifest_path.clone(),
        source: e,
    })?;

    let href = match find_resource_href(&content) {
        Ok(ResourceLookup::Href(href)) => href,
        Ok(ResourceLookup::NoHref) => return Err(ResolveError::NoHref(course_path.to_path_buf())),
        Ok(ResourceLookup::NoResource) => {
            return Err(ResolveError::NoResourceElement(course_path.to_path_buf()))
        }
        Err(reason) => {
            return Err(ResolveError::MalformedManifest {
                path: manifest_path,
                reason,
            })
        }
    };

    let reference =
        EntryReference::parse(&href).ok_or_else(|| ResolveError::AbsoluteReference {
            path: course_path.to_path_buf(),
            href: href.clone(),
        })?;

    let course_dir = absolute_path(course_path).map_err(|e| ResolveError::ReadFailed {
        path: course_path.to_path_buf(),
        source: e,
    })?;

    let decoded = percent_decode_str(reference.path).decode_utf8_lossy();
    let entry_file = normalize_path(&course_dir.join(decoded.as_ref()));
    if !is_within(&entry_file, &course_dir) {
        return Err(ResolveError::PathEscapesCourse {
            path: course_path.to_path_buf(),
            href,
        });
    }
    if !entry_file.is_file() {
        return Err(ResolveError::MissingEntryFile {
            path: course_path.to_path_buf(),
            entry: entry_file,
        });
    }

    let name = basename(&course_dir).unwrap_or_else(|| course_dir.display().to_string());
    let path = reference.to_index_url(&name);
    Ok(CourseEntry::new(name, path))
}

/// Outcome of looking for the entry resource in a manifest.
#[derive(Debug, PartialEq, Eq)]
enum ResourceLookup {
    NoResource,
    NoHref,
    Href(String),
}

/// Scan a manifest for the `href` of its first `resources/resource` element.
///
/// `resources` must be a direct child of the root element and both elements
/// must be in the IMS content packaging namespace. The whole document is
/// read so that malformation after the resource is still reported.
fn find_resource_href(content: &[u8]) -> Result<ResourceLookup, String> {
    let mut reader = NsReader::from_reader(content);
    let mut buf = Vec::new();

    // One flag per open element: whether it is the root's `resources` child.
    let mut open: Vec<bool> = Vec::new();
    let mut saw_root = false;
    let mut lookup: Option<ResourceLookup> = None;

    loop {
        match reader.read_resolved_event_into(&mut buf) {
            Ok((ns, Event::Start(e))) => {
                check_single_root(saw_root, &open)?;
                let is_cp = in_content_packaging(&ns)?;
                visit_element(&e, is_cp, &open, &mut lookup)?;
                saw_root = true;
                open.push(open.len() == 1 && is_cp && e.local_name().as_ref() == b"resources");
            }
            Ok((ns, Event::Empty(e))) => {
                check_single_root(saw_root, &open)?;
                let is_cp = in_content_packaging(&ns)?;
                visit_element(&e, is_cp, &open, &mut lookup)?;
                saw_root = true;
            }
            Ok((_, Event::End(_))) => {
                if open.pop().is_none() {
                    return Err("unexpected closing tag".to_string());
                }
            }
            Ok((_, Event::Text(text))) if open.is_empty() => {
                let bytes: &[u8] = &text;
                let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
                if !bytes.iter().all(u8::is_ascii_whitespace) {
                    return Err("text outside the document element".to_string());
                }
            }
            Ok((_, Event::CData(_))) if open.is_empty() => {
                return Err("text outside the document element".to_string());
            }
            Ok((_, Event::Eof)) => break,
            Ok(_) => {}
            Err(e) => return Err(e.to_string()),
        }
        buf.clear();
    }

    if !saw_root {
        return Err("no root element".to_string());
    }
    if !open.is_empty() {
        return Err("unclosed element at end of document".to_string());
    }

    Ok(lookup.unwrap_or(ResourceLookup::NoResource))
}

/// Only one top-level element is allowed.
fn check_single_root(saw_root: bool, open: &[bool]) -> Result<(), String> {
    if saw_root && open.is_empty() {
        return Err("junk after document element".to_string());
    }
    Ok(())
}

fn in_content_packaging(ns: &NsResolution<'_>) -> Result<bool, String> {
    match ns {
        NsResolution::Bound(Namespace(uri)) => Ok(*uri == IMSCP_NAMESPACE.as_bytes()),
        NsResolution::Unbound => Ok(false),
        NsResolution::Unknown(prefix) => Err(format!(
            "unbound prefix '{}'",
            String::from_utf8_lossy(prefix)
        )),
    }
}

/// Record the href of `element` if it is the first qualifying resource.
fn visit_element(
    element: &BytesStart<'_>,
    is_cp: bool,
    open: &[bool],
    lookup: &mut Option<ResourceLookup>,
) -> Result<(), String> {
    let inside_resources = open.len() == 2 && open[1];
    if lookup.is_some()
        || !inside_resources
        || !is_cp
        || element.local_name().as_ref() != b"resource"
    {
        return Ok(());
    }

    let href = element
        .try_get_attribute("href")
        .map_err(|e| e.to_string())?;
    *lookup = Some(match href {
        Some(attr) => ResourceLookup::Href(
            attr.unescape_value()
                .map_err(|e| e.to_string())?
                .into_owned(),
        ),
        None => ResourceLookup::NoHref,
    });
    Ok(())
}

/// A relative, local reference split into its URL parts.
#[derive(Debug, PartialEq, Eq)]
struct EntryReference<'a> {
    path: &'a str,
    query: Option<&'a str>,
    fragment: Option<&'a str>,
}

impl<'a> EntryReference<'a> {
    /// Split an href, returning `None` when it has a scheme or authority.
    fn parse(href: &'a str) -> Option<Self> {
        match Url::parse(href) {
            Err(url::ParseError::RelativeUrlWithoutBase) => {}
            // Anything else parsed (or failed) as `scheme:...`.
            _ => return None,
        }
        if href.starts_with("//") {
            return None;
        }

        let (rest, fragment) = match href.split_once('#') {
            Some((rest, fragment)) => (rest, Some(fragment)),
            None => (href, None),
        };
        let (path, query) = match rest.split_once('?') {
            Some((path, query)) => (path, Some(query)),
            None => (rest, None),
        };

        Some(Self {
            path,
            query,
            fragment,
        })
    }

    /// Rebuild the reference as `<name>/<path>[?query][#fragment]`.
    fn to_index_url(&self, name: &str) -> String {
        let mut url = format!("{}/{}", utf8_percent_encode(name, PATH_SEGMENT), self.path);
        if let Some(query) = self.query.filter(|q| !q.is_empty()) {
            url.push('?');
            url.push_str(query);
        }
        if let Some(fragment) = self.fragment.filter(|f| !f.is_empty()) {
            url.push('#');
            url.push_str(fragment);
        }
        url
    }
}
