//! INI serialization logic for converting `ConfigFile` → INI string.
//!
//! Produces the commented INI representation written to `config.ini`.

use std::path::Path;

use super::settings::ConfigFile;

/// Convert a `ConfigFile` to a commented INI string for saving.
pub(super) fn to_config_string(config: &ConfigFile) -> String {
    let log_file = config
        .logging
        .file
        .as_ref()
        .map(|p| path_to_string(p))
        .unwrap_or_default();

    format!(
        r#"[index]
; Directory rescanned by `scormpack index` when none is given
courses_dir = {}

[manifest]
; Entry document referenced by generated manifests
entry = {}

[composite]
; Directory holding the player shell copied into every composite
assets_dir = {}
; Comma separated files and directories copied from assets_dir
assets = {}

[logging]
; One of: trace, debug, info, warn, error (RUST_LOG takes precedence)
level = {}
; Optional file receiving a copy of every log line
file = {}
"#,
        path_to_string(&config.index.courses_dir),
        config.manifest.entry,
        path_to_string(&config.composite.assets_dir),
        config.composite.assets.join(", "),
        config.logging.level,
        log_file,
    )
}

/// Convert path to string, collapsing home dir to ~.
fn path_to_string(path: &Path) -> String {
    if let Some(home) = dirs::home_dir() {
        if let Ok(stripped) = path.strip_prefix(&home) {
            return format!("~/{}", stripped.display());
        }
    }
    path.display().to_string()
}
