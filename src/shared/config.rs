use std::path::{Path, PathBuf};

use schemars::JsonSchema;
use serde::Deserialize;

use super::env_var::EnvVars;

const SETTINGS_FILE: &str = "settings.json";

/// Settings for a scrape run, read from a JSON file.
#[derive(Debug, Deserialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// YouTube Data API v3 key (default: empty; can be set via YTCOMMENTS_API_KEY).
    #[serde(default)]
    pub youtube_api_key: String,

    /// Maximum number of comments and replies collected per video (default: 200).
    #[serde(default = "default_max_comments_per_video")]
    #[schemars(default = "default_max_comments_per_video")]
    pub max_comments_per_video: usize,

    /// Log level: DEBUG, INFO, WARNING, ERROR or CRITICAL (default: "INFO").
    #[serde(default = "default_log_level")]
    #[schemars(default = "default_log_level")]
    pub log_level: String,

    /// Directory the output files are written to (default: "data").
    #[serde(default = "default_output_directory")]
    #[schemars(default = "default_output_directory")]
    pub output_directory: PathBuf,

    /// Output formats: "json", "csv", "xlsx" ("xls" is an alias). Unknown entries are ignored.
    #[serde(default = "default_output_formats")]
    #[schemars(default = "default_output_formats")]
    pub output_formats: Vec<String>,

    /// Per-request timeout in seconds (default: 10).
    #[serde(default = "default_request_timeout_seconds")]
    #[schemars(default = "default_request_timeout_seconds")]
    pub request_timeout_seconds: u64,

    /// Number of videos fetched at the same time (default: 1).
    #[serde(default = "default_concurrent_requests")]
    #[schemars(default = "default_concurrent_requests")]
    pub concurrent_requests: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            youtube_api_key: String::new(),
            max_comments_per_video: default_max_comments_per_video(),
            log_level: default_log_level(),
            output_directory: default_output_directory(),
            output_formats: default_output_formats(),
            request_timeout_seconds: default_request_timeout_seconds(),
            concurrent_requests: default_concurrent_requests(),
        }
    }
}

impl Settings {
    /// Replace values with their environment overrides, if any are set.
    pub fn with_env_overrides(mut self, env: &EnvVars) -> Self {
        if let Some(key) = &env.api_key {
            self.youtube_api_key = key.clone();
        }
        self
    }
}

fn default_max_comments_per_video() -> usize {
    200
}

fn default_log_level() -> String {
    "INFO".to_string()
}

fn default_output_directory() -> PathBuf {
    PathBuf::from("data")
}

fn default_output_formats() -> Vec<String> {
    vec!["json".to_string(), "csv".to_string(), "xlsx".to_string()]
}

fn default_request_timeout_seconds() -> u64 {
    10
}

fn default_concurrent_requests() -> usize {
    1
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// An explicitly requested config file does not exist
    #[error("Config file not found at: {0}")]
    NotFound(PathBuf),

    /// Failed to read config file (permission error, etc.)
    #[error("Failed to read config file {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    /// JSON parse error
    #[error("Invalid config file {path}: {message}")]
    ParseError { path: PathBuf, message: String },
}

/// Load settings from `path`, or from ~/.config/ytcomments/settings.json when no path is given.
///
/// A missing explicit path is an error; a missing default file yields `Settings::default()`.
pub fn load_settings(path: Option<&Path>) -> anyhow::Result<Settings> {
    match path {
        Some(path) => match read_settings(path)? {
            Some(settings) => Ok(settings),
            None => Err(ConfigError::NotFound(path.to_path_buf()).into()),
        },
        None => {
            let Some(dir) = default_config_dir() else {
                return Ok(Settings::default());
            };
            load_settings_from_dir(&dir)
        }
    }
}

/// `$XDG_CONFIG_HOME/ytcomments`, or `~/.config/ytcomments` when XDG_CONFIG_HOME is unset or empty.
fn default_config_dir() -> Option<PathBuf> {
    let non_empty = |key: &str| std::env::var(key).ok().filter(|v| !v.is_empty());
    let base = non_empty("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(|| non_empty("HOME").map(|home| PathBuf::from(home).join(".config")))?;
    Some(base.join("ytcomments"))
}

/// Path of the settings file read when no explicit path is given.
pub fn default_settings_path() -> Option<PathBuf> {
    default_config_dir().map(|dir| dir.join(SETTINGS_FILE))
}

/// Load settings.json from a specific directory, falling back to defaults if it is absent.
pub fn load_settings_from_dir(dir: &Path) -> anyhow::Result<Settings> {
    Ok(read_settings(&dir.join(SETTINGS_FILE))?.unwrap_or_default())
}

/// Read and parse a settings file. Returns `Ok(None)` if it does not exist.
fn read_settings(path: &Path) -> Result<Option<Settings>, ConfigError> {
    match std::fs::read_to_string(path) {
        Ok(content) => parse_settings(&content, path).map(Some),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        }),
    }
}

/// Parse JSON content into Settings.
fn parse_settings(content: &str, path: &Path) -> Result<Settings, ConfigError> {
    serde_json::from_str(content).map_err(|e| ConfigError::ParseError {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Generate JSON Schema for the Settings struct.
pub fn generate_schema() -> schemars::Schema {
    schemars::schema_for!(Settings)
}
