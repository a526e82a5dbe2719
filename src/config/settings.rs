// src/config/settings.rs
use anyhow::{Context, Result};
use serde::{Serialize, Deserialize};
use std::path::{Path, PathBuf};

pub const APP_DIR: &str = "analytics-dashboard";
pub const ENV_PREFIX: &str = "DASHBOARD";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AnalysisSettings {
    /// Value buckets kept in the column distribution
    pub distribution_buckets: usize,
    /// Rows copied into the table preview
    pub preview_rows: usize,
    /// Unique values above which a text column is reported as high-cardinality
    pub high_cardinality_threshold: usize,
    /// Share of present values that must parse as dates for time detection
    pub date_detection_ratio: f64,
    pub max_correlation_columns: usize,
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            distribution_buckets: 10,
            preview_rows: 100,
            high_cardinality_threshold: 50,
            date_detection_ratio: 0.5,
            max_correlation_columns: 20,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Settings {
    pub window_width: f32,
    pub window_height: f32,
    pub log_level: String,
    pub analysis: AnalysisSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            window_width: 1280.0,
            window_height: 860.0,
            log_level: "info".to_string(),
            analysis: AnalysisSettings::default(),
        }
    }
}

/// `<config_dir>/analytics-dashboard/settings`, extension chosen by the user.
pub fn default_settings_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR).join("settings"))
}

fn environment() -> config::Environment {
    config::Environment::with_prefix(ENV_PREFIX)
        .separator("__")
        .try_parsing(true)
}

impl Settings {
    /// Settings file (any format `config` understands) overridden by
    /// `DASHBOARD__*` environment variables. Missing file means defaults.
    pub fn load_from(path: Option<&Path>) -> Result<Self> {
        Self::load_with(path, environment())
    }

    fn load_with(path: Option<&Path>, environment: config::Environment) -> Result<Self> {
        let mut builder = config::Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(
                config::File::with_name(&path.to_string_lossy()).required(false)
            );
        }
        builder = builder.add_source(environment);

        builder.build()
            .context("Failed to read settings")?
            .try_deserialize()
            .context("Failed to parse settings")
    }

    pub fn load() -> Self {
        let path = default_settings_path();
        match Self::load_from(path.as_deref()) {
            Ok(settings) => settings,
            Err(e) => {
                // the logger is not up yet
                eprintln!("Warning: {:#}; using default settings", e);
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::load_from(Some(&dir.path().join("settings"))).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_partial_file_overrides_only_given_keys() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(file, r#"{{ "log_level": "debug", "analysis": {{ "preview_rows": 25 }} }}"#).unwrap();

        let settings = Settings::load_from(Some(file.path())).unwrap();
        assert_eq!(settings.log_level, "debug");
        assert_eq!(settings.analysis.preview_rows, 25);
        assert_eq!(settings.analysis.distribution_buckets, 10);
        assert_eq!(settings.window_width, 1280.0);
    }

    #[test]
    fn test_invalid_value_is_an_error() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(file, r#"{{ "analysis": {{ "preview_rows": "lots" }} }}"#).unwrap();
        assert!(Settings::load_from(Some(file.path())).is_err());
    }

    #[test]
    fn test_environment_overrides_file_and_defaults() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(file, r#"{{ "analysis": {{ "preview_rows": 25 }} }}"#).unwrap();

        let vars: config::Map<String, String> = [
            ("DASHBOARD__ANALYSIS__PREVIEW_ROWS".to_string(), "7".to_string()),
            ("DASHBOARD__LOG_LEVEL".to_string(), "trace".to_string()),
            ("OTHER__LOG_LEVEL".to_string(), "off".to_string()),
        ]
        .into_iter()
        .collect();

        let settings = Settings::load_with(Some(file.path()), environment().source(Some(vars))).unwrap();
        assert_eq!(settings.analysis.preview_rows, 7);
        assert_eq!(settings.log_level, "trace");
        assert_eq!(settings.analysis.distribution_buckets, 10);
    }
}
