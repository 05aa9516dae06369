//! Application settings loaded from `tracker.toml`.
//!
//! Every section is optional; a missing file yields the defaults.

use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::Path;
use tracing::{debug, info};

/// Default settings file, relative to the working directory
pub const DEFAULT_CONFIG_PATH: &str = "tracker.toml";

/// Largest accepted `dashboard.upcoming_window_days`
pub const MAX_UPCOMING_WINDOW_DAYS: i64 = 3_650;

/// Whole contents of `tracker.toml`
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// CSV export behaviour
    pub export: ExportConfig,
    /// Dashboard tuning
    pub dashboard: DashboardConfig,
    /// Team members inserted when the team table is empty
    pub team_members: Vec<TeamMemberSeed>,
}

/// How purchase order exports are written.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CsvMode {
    /// Plain comma join without escaping, byte-compatible with old exports
    Legacy,
    /// RFC 4180 quoting
    #[default]
    Quoted,
}

/// `[export]` section
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Escaping used for exported fields
    pub csv_mode: CsvMode,
}

/// `[dashboard]` section
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// How far ahead milestones count as upcoming
    pub upcoming_window_days: i64,
}

impl DashboardConfig {
    fn validate(&self) -> Result<()> {
        if (0..=MAX_UPCOMING_WINDOW_DAYS).contains(&self.upcoming_window_days) {
            Ok(())
        } else {
            Err(Error::Config {
                message: format!(
                    "dashboard.upcoming_window_days must be between 0 and {MAX_UPCOMING_WINDOW_DAYS}, got {}",
                    self.upcoming_window_days
                ),
            })
        }
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            upcoming_window_days: 14,
        }
    }
}

/// One `[[team_members]]` entry
#[derive(Debug, Clone, Deserialize)]
pub struct TeamMemberSeed {
    /// Full name
    pub name: String,
    /// Job role
    pub role: String,
    /// Contact email
    #[serde(default)]
    pub email: String,
    /// Department
    #[serde(default)]
    pub department: String,
}

/// Loads settings from a TOML file.
///
/// # Errors
/// Returns an error if the file cannot be read, the TOML is invalid, or a
/// value is out of range.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<AppConfig> {
    let path_ref = path.as_ref();
    debug!("Attempting to load configuration from: {:?}", path_ref);
    let contents = std::fs::read_to_string(path_ref).map_err(|e| Error::Config {
        message: format!("Failed to read config file {}: {e}", path_ref.display()),
    })?;

    let config: AppConfig = toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse {}: {e}", path_ref.display()),
    })?;
    config.dashboard.validate()?;
    Ok(config)
}

/// Loads settings from `path`, or returns defaults when the file does not exist.
pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<AppConfig> {
    if path.as_ref().exists() {
        load_config(path)
    } else {
        info!(
            "No config file at {}, using defaults.",
            path.as_ref().display()
        );
        Ok(AppConfig::default())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn test_parse_full_config() {
        let toml_str = r#"
            [export]
            csv_mode = "legacy"

            [dashboard]
            upcoming_window_days = 30

            [[team_members]]
            name = "Dana Whitfield"
            role = "Project Manager"
            email = "dana@example.com"

            [[team_members]]
            name = "Luis Ortega"
            role = "Quality Engineer"
        "#;

        let config: AppConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.export.csv_mode, CsvMode::Legacy);
        assert_eq!(config.dashboard.upcoming_window_days, 30);
        assert_eq!(config.team_members.len(), 2);
        assert_eq!(config.team_members[1].department, "");
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config.export.csv_mode, CsvMode::Quoted);
        assert_eq!(config.dashboard.upcoming_window_days, 14);
        assert!(config.team_members.is_empty());
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let config = load_or_default("does/not/exist/tracker.toml").unwrap();
        assert_eq!(config.export.csv_mode, CsvMode::Quoted);
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let dir = std::env::temp_dir().join("mfg_tracker_invalid_config.toml");
        std::fs::write(&dir, "[export\ncsv_mode = ").unwrap();
        let result = load_config(&dir);
        assert!(matches!(result, Err(Error::Config { .. })));
        std::fs::remove_file(&dir).unwrap();
    }

    #[test]
    fn test_out_of_range_window_is_config_error() {
        for window in ["-1", "1000000000"] {
            let path = std::env::temp_dir()
                .join(format!("mfg_tracker_window_{}.toml", window.replace('-', "neg")));
            std::fs::write(&path, format!("[dashboard]\nupcoming_window_days = {window}\n"))
                .unwrap();
            let result = load_config(&path);
            std::fs::remove_file(&path).unwrap();
            assert!(matches!(result, Err(Error::Config { .. })), "window {window}");
        }
    }

    #[test]
    fn test_window_at_limit_is_accepted() {
        let path = std::env::temp_dir().join("mfg_tracker_window_limit.toml");
        std::fs::write(
            &path,
            format!("[dashboard]\nupcoming_window_days = {MAX_UPCOMING_WINDOW_DAYS}\n"),
        )
        .unwrap();
        let config = load_config(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(config.dashboard.upcoming_window_days, MAX_UPCOMING_WINDOW_DAYS);
    }
}
