//! User settings persisted in the OS config directory.
//!
//! Every field carries a default, so a partial or hand-edited `settings.json`
//! stays valid: missing keys fall back silently.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

const SETTINGS_FILE: &str = "settings.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// flexi_logger spec, e.g. `info` or `warn, swimlane_board::timeline=trace`.
    pub log_level: String,
    /// Quiet period before the open board is mirrored to disk.
    pub autosave_delay_ms: u64,
    /// Days shown left of today when the board opens.
    pub lead_days: i64,
    /// Overrides the platform data directory used for autosave.
    pub data_dir: Option<PathBuf>,
    /// Reopen the last autosaved board instead of the seed board.
    pub restore_last_session: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_level: "info".into(),
            autosave_delay_ms: 500,
            lead_days: 14,
            data_dir: None,
            restore_last_session: true,
        }
    }
}

impl AppConfig {
    pub fn autosave_delay(&self) -> Duration {
        Duration::from_millis(self.autosave_delay_ms)
    }

    /// Load settings from the platform config dir, writing the defaults there
    /// on first run. Problems are returned as messages instead of logged, since
    /// this runs before the logger exists.
    pub fn load_or_init() -> (Self, Vec<String>) {
        let (config_dir, default_data_dir) = Self::platform_dirs();
        Self::load_or_init_in(&config_dir, default_data_dir)
    }

    pub fn load_or_init_in(config_dir: &Path, default_data_dir: PathBuf) -> (Self, Vec<String>) {
        let path = config_dir.join(SETTINGS_FILE);
        let mut warnings = Vec::new();
        let loaded = Self::load_from(&path).unwrap_or_else(|msg| {
            warnings.push(msg);
            None
        });
        let mut config = loaded.unwrap_or_else(|| {
            let config = Self::default();
            if path.exists() {
                // keep a broken file for the user to fix
                return config;
            }
            if let Err(err) = config.save_to(&path) {
                warnings.push(format!(
                    "could not write default settings to {}: {err}",
                    path.display()
                ));
            }
            config
        });
        if config.data_dir.is_none() {
            config.data_dir = Some(default_data_dir);
        }
        (config, warnings)
    }

    /// `Ok(None)` when the file does not exist; `Err` when it cannot be read
    /// or parsed.
    pub fn load_from(path: &Path) -> Result<Option<Self>, String> {
        let raw = match std::fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(format!("could not read settings file {}: {err}", path.display())),
        };
        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|err| format!("ignoring invalid settings file {}: {err}", path.display()))
    }

    pub fn save_to(&self, path: &Path) -> std::io::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self).map_err(std::io::Error::other)?;
        std::fs::write(path, json)
    }

    pub fn data_dir(&self) -> PathBuf {
        self.data_dir.clone().unwrap_or_else(|| Self::platform_dirs().1)
    }

    fn platform_dirs() -> (PathBuf, PathBuf) {
        if let Some(proj_dirs) = directories::ProjectDirs::from("", "", "SwimlaneBoard") {
            (
                proj_dirs.config_dir().to_path_buf(),
                proj_dirs.data_dir().to_path_buf(),
            )
        } else {
            // Fallback
            let dir = PathBuf::from(".");
            (dir.clone(), dir)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_falls_back_per_field() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(SETTINGS_FILE);
        std::fs::write(&path, r#"{ "lead_days": 3 }"#).unwrap();
        let config = AppConfig::load_from(&path).unwrap().unwrap();
        assert_eq!(config.lead_days, 3);
        assert_eq!(config.autosave_delay(), Duration::from_millis(500));
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn missing_file_is_none_and_invalid_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(SETTINGS_FILE);
        assert_eq!(AppConfig::load_from(&path), Ok(None));
        std::fs::write(&path, "lead_days = 3").unwrap();
        let err = AppConfig::load_from(&path).unwrap_err();
        assert!(err.contains("invalid settings file"), "{err}");
    }

    #[test]
    fn first_run_writes_defaults_without_warnings() {
        let dir = tempfile::tempdir().unwrap();
        let data = dir.path().join("data");
        let (config, warnings) = AppConfig::load_or_init_in(dir.path(), data.clone());
        assert!(warnings.is_empty(), "{warnings:?}");
        assert_eq!(config.data_dir, Some(data));
        assert!(dir.path().join(SETTINGS_FILE).exists());
    }

    #[test]
    fn invalid_settings_are_reported_and_left_in_place() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(SETTINGS_FILE);
        std::fs::write(&path, "{ not json").unwrap();

        let (config, warnings) = AppConfig::load_or_init_in(dir.path(), dir.path().to_path_buf());
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains(SETTINGS_FILE), "{warnings:?}");
        assert_eq!(config.lead_days, AppConfig::default().lead_days);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "{ not json");
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join(SETTINGS_FILE);
        let config = AppConfig {
            data_dir: Some(dir.path().to_path_buf()),
            restore_last_session: false,
            ..Default::default()
        };
        config.save_to(&path).unwrap();
        assert_eq!(AppConfig::load_from(&path), Ok(Some(config)));
    }
}
