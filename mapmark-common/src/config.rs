//! Configuration resolution for the MapMark service
//!
//! The service is configured entirely from the command line and the
//! environment; there is no config file. Root folder resolution follows
//! a three-tier priority order:
//! 1. Command-line argument (highest priority)
//! 2. `MAPMARK_ROOT_FOLDER` environment variable
//! 3. OS-dependent data directory (fallback)

use std::path::{Path, PathBuf};

/// Environment variable naming the root data folder
pub const ROOT_FOLDER_ENV: &str = "MAPMARK_ROOT_FOLDER";

/// File name of the SQLite database inside the root folder
pub const DATABASE_FILE: &str = "mapmark.db";

/// Map-provider credentials, injected into the served index page once at
/// startup (no global browser-side mutation).
#[derive(Debug, Clone, Default)]
pub struct MapProviderConfig {
    /// AMap JavaScript API key
    pub api_key: String,
    /// AMap security code paired with the key
    pub security_code: String,
}

/// Resolve the root data folder.
///
/// Priority: CLI argument, then environment variable, then the platform
/// data directory (`~/.local/share/mapmark` on Linux).
pub fn resolve_root_folder(cli_arg: Option<&Path>) -> PathBuf {
    if let Some(path) = cli_arg {
        return path.to_path_buf();
    }

    if let Ok(path) = std::env::var(ROOT_FOLDER_ENV) {
        if !path.is_empty() {
            return PathBuf::from(path);
        }
    }

    default_root_folder()
}

/// OS-dependent default root folder
fn default_root_folder() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join("mapmark"))
        .unwrap_or_else(|| PathBuf::from(".").join("mapmark"))
}

/// Full path of the database file inside the root folder
pub fn database_path(root_folder: &Path) -> PathBuf {
    root_folder.join(DATABASE_FILE)
}
