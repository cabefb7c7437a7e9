//! Centralized reader for YTCOMMENTS_* environment variables.
//!
//! Environment variable names are defined as private constants here;
//! external code accesses values through the `EnvVars` struct.

const API_KEY: &str = "YTCOMMENTS_API_KEY";
const LOG_FORMAT: &str = "YTCOMMENTS_LOG_FORMAT";

/// Snapshot of all YTCOMMENTS_* environment variables at load time.
#[derive(Debug, Default)]
pub struct EnvVars {
    /// API key that takes precedence over `youtubeApiKey` in the settings file.
    pub api_key: Option<String>,

    /// Log output format: "json" or unset (human-readable).
    pub log_format: Option<String>,
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|s| !s.is_empty())
}

impl EnvVars {
    /// Read all YTCOMMENTS_* environment variables from the current process.
    pub fn load() -> Self {
        Self {
            api_key: non_empty_var(API_KEY),
            log_format: non_empty_var(LOG_FORMAT),
        }
    }

    /// True if JSON log lines were requested.
    pub fn json_logs(&self) -> bool {
        self.log_format
            .as_deref()
            .is_some_and(|format| format.eq_ignore_ascii_case("json"))
    }
}
