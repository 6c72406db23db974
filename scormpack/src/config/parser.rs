//! INI parsing logic for converting `Ini` → `ConfigFile`.
//!
//! This is the single place where INI key names are mapped to struct fields.

use ini::Ini;
use std::path::PathBuf;

use super::file::ConfigFileError;
use super::settings::ConfigFile;

/// Parse an `Ini` object into a `ConfigFile`.
///
/// Starts from `ConfigFile::default()` and overlays any values found in the INI.
pub(super) fn parse_ini(ini: &Ini) -> Result<ConfigFile, ConfigFileError> {
    let mut config = ConfigFile::default();

    // [index] section
    if let Some(section) = ini.section(Some("index")) {
        if let Some(v) = section.get("courses_dir") {
            let v = v.trim();
            if v.is_empty() {
                return Err(empty_value("index", "courses_dir"));
            }
            config.index.courses_dir = expand_tilde(v);
        }
    }

    // [manifest] section
    if let Some(section) = ini.section(Some("manifest")) {
        if let Some(v) = section.get("entry") {
            let v = v.trim();
            if v.is_empty() {
                return Err(empty_value("manifest", "entry"));
            }
            config.manifest.entry = v.to_string();
        }
    }

    // [composite] section
    if let Some(section) = ini.section(Some("composite")) {
        if let Some(v) = section.get("assets_dir") {
            let v = v.trim();
            if v.is_empty() {
                return Err(empty_value("composite", "assets_dir"));
            }
            config.composite.assets_dir = expand_tilde(v);
        }
        if let Some(v) = section.get("assets") {
            let items = parse_list(v);
            if let Some(bad) = items.iter().find(|item| is_unsafe_item(item)) {
                return Err(ConfigFileError::InvalidValue {
                    section: "composite".to_string(),
                    key: "assets".to_string(),
                    value: bad.clone(),
                    reason: "asset items must be plain names inside the assets directory"
                        .to_string(),
                });
            }
            config.composite.assets = items;
        }
    }

    // [logging] section
    if let Some(section) = ini.section(Some("logging")) {
        if let Some(v) = section.get("level") {
            config.logging.level = v.parse().map_err(|_| ConfigFileError::InvalidValue {
                section: "logging".to_string(),
                key: "level".to_string(),
                value: v.to_string(),
                reason: "must be one of: trace, debug, info, warn, error".to_string(),
            })?;
        }
        if let Some(v) = section.get("file") {
            let v = v.trim();
            config.logging.file = if v.is_empty() {
                None
            } else {
                Some(expand_tilde(v))
            };
        }
    }

    Ok(config)
}

fn empty_value(section: &str, key: &str) -> ConfigFileError {
    ConfigFileError::InvalidValue {
        section: section.to_string(),
        key: key.to_string(),
        value: String::new(),
        reason: "must not be empty".to_string(),
    }
}

/// Split a comma separated list, dropping blank entries.
fn parse_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn is_unsafe_item(item: &str) -> bool {
    item.starts_with('/') || item.split(['/', '\\']).any(|part| part == "..")
}

/// Expand a leading `~/` to the user's home directory.
pub(super) fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(stripped);
        }
    }
    PathBuf::from(path)
}
