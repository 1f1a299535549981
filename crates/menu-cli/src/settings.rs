//! Settings file: load from disk and resolve the data directory.
//!
//! Settings live in the platform-specific config folder:
//! - macOS: ~/Library/Application Support/com.weekmenu.weekmenu/
//! - Windows: %APPDATA%/weekmenu/weekmenu/config/
//! - Linux: ~/.config/weekmenu/
//!
//! ```toml
//! [storage]
//! data_dir = "/home/me/menu"
//!
//! [display]
//! show_empty_slots = true
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

const APP_QUALIFIER: &str = "com";
const APP_ORG: &str = "weekmenu";
const APP_NAME: &str = "weekmenu";
const CONFIG_FILENAME: &str = "settings.toml";

/// Used when no platform data directory can be determined.
pub const FALLBACK_DATA_DIR: &str = "weekmenu-data";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub storage: StorageSettings,
    pub display: DisplaySettings,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    /// Directory holding `weeklyMenuData.json` and `dishCatalog.json`.
    pub data_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplaySettings {
    /// Print `-` in empty week grid cells.
    pub show_empty_slots: bool,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            show_empty_slots: true,
        }
    }
}

/// Get the path to the default settings file.
///
/// Returns `None` if the platform-specific directory cannot be determined.
pub fn settings_path() -> Option<PathBuf> {
    ProjectDirs::from(APP_QUALIFIER, APP_ORG, APP_NAME)
        .map(|dirs| dirs.config_dir().join(CONFIG_FILENAME))
}

/// Platform data directory for the menu records.
pub fn default_data_dir() -> Option<PathBuf> {
    ProjectDirs::from(APP_QUALIFIER, APP_ORG, APP_NAME).map(|dirs| dirs.data_dir().to_path_buf())
}

/// Load settings from `path`, or from the default location when `None`.
///
/// Returns default settings if:
/// - The settings file doesn't exist
/// - The settings file cannot be parsed
/// - The platform-specific directory cannot be determined
pub fn load_settings(path: Option<&Path>) -> Settings {
    match path.map(Path::to_path_buf).or_else(settings_path) {
        Some(path) => load_settings_from(&path),
        None => {
            tracing::warn!("Could not determine settings path, using defaults");
            Settings::default()
        }
    }
}

pub fn load_settings_from(path: &Path) -> Settings {
    match fs::read_to_string(path) {
        Ok(content) => match toml::from_str(&content) {
            Ok(settings) => {
                tracing::info!("Loaded settings from {:?}", path);
                settings
            }
            Err(e) => {
                tracing::warn!("Failed to parse settings file: {}, using defaults", e);
                Settings::default()
            }
        },
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No settings file found at {:?}, using defaults", path);
            Settings::default()
        }
        Err(e) => {
            tracing::warn!("Failed to read settings file: {}, using defaults", e);
            Settings::default()
        }
    }
}

/// Pick the data directory: command line flag, settings file, platform data
/// directory, then [`FALLBACK_DATA_DIR`].
pub fn resolve_data_dir(flag: Option<&Path>, settings: &Settings) -> PathBuf {
    flag.map(Path::to_path_buf)
        .or_else(|| settings.storage.data_dir.clone())
        .or_else(default_data_dir)
        .unwrap_or_else(|| PathBuf::from(FALLBACK_DATA_DIR))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings_serializable() {
        let settings = Settings::default();
        let toml = toml::to_string_pretty(&settings);
        assert!(toml.is_ok());
    }

    #[test]
    fn test_settings_round_trip() {
        let settings = Settings {
            storage: StorageSettings {
                data_dir: Some(PathBuf::from("/tmp/menu")),
            },
            display: DisplaySettings {
                show_empty_slots: false,
            },
        };
        let toml_str = toml::to_string_pretty(&settings).unwrap();
        let parsed: Settings = toml::from_str(&toml_str).unwrap();
        assert_eq!(settings, parsed);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let parsed: Settings = toml::from_str("[storage]\ndata_dir = \"menu\"\n").unwrap();
        assert_eq!(parsed.storage.data_dir, Some(PathBuf::from("menu")));
        assert!(parsed.display.show_empty_slots);
    }
}
