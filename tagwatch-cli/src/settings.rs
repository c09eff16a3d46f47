//! Settings-file loading.
//!
//! The settings file is the original tool's `settings.json`, looked up in
//! the working directory by default and kept field-compatible (camelCase):
//!
//! ```json
//! {
//!   "autoClaim": false,
//!   "monitorAvailability": true,
//!   "lookupRetryDelaySeconds": 75,
//!   "login": "user@example.com",
//!   "password": "...",
//!   "desiredGamertag": "Foo123"
//! }
//! ```
//!
//! Missing files and missing or invalid fields fall back to defaults; the
//! settings layer never produces an error.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use tagwatch_core::{MonitorConfig, DEFAULT_RETRY_DELAY_SECS};

/// User settings, field-compatible with the original `settings.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    /// Claim the gamertag automatically once it is available.
    pub auto_claim: bool,

    /// Keep polling while the gamertag is unavailable.
    pub monitor_availability: bool,

    /// Delay between lookups while monitoring, in seconds.
    pub lookup_retry_delay_seconds: u64,

    /// Microsoft account login. Prompted for when empty.
    pub login: String,

    /// Microsoft account password. Prompted for when empty.
    pub password: String,

    /// The gamertag to check. Prompted for when empty.
    pub desired_gamertag: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            auto_claim: false,
            monitor_availability: false,
            lookup_retry_delay_seconds: DEFAULT_RETRY_DELAY_SECS,
            login: String::new(),
            password: String::new(),
            desired_gamertag: String::new(),
        }
    }
}

impl Settings {
    /// Loads settings from `path`, falling back to defaults on any problem.
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => match serde_json::from_str(&content) {
                Ok(settings) => {
                    debug!(path = %path.display(), "Loaded settings file");
                    settings
                }
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "Invalid settings file, using defaults");
                    Self::default()
                }
            },
            // A missing settings file is the normal first-run case.
            Err(_) => Self::default(),
        }
    }

    /// The monitoring configuration these settings describe.
    pub fn monitor_config(&self) -> MonitorConfig {
        MonitorConfig {
            auto_claim: self.auto_claim,
            monitor_availability: self.monitor_availability,
            retry_delay_secs: self.lookup_retry_delay_seconds,
        }
        .normalized()
    }
}

/// Default settings path: `settings.json` next to where the tool runs.
pub fn default_settings_path() -> PathBuf {
    PathBuf::from("settings.json")
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_settings(json: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_original_format() {
        let file = write_settings(
            r#"{
                "autoClaim": true,
                "monitorAvailability": true,
                "lookupRetryDelaySeconds": 30,
                "login": "user@example.com",
                "password": "hunter2",
                "desiredGamertag": "Foo123"
            }"#,
        );

        let settings = Settings::load(file.path());
        assert!(settings.auto_claim);
        assert!(settings.monitor_availability);
        assert_eq!(settings.lookup_retry_delay_seconds, 30);
        assert_eq!(settings.login, "user@example.com");
        assert_eq!(settings.desired_gamertag, "Foo123");
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let file = write_settings(r#"{"desiredGamertag": "Foo123"}"#);

        let settings = Settings::load(file.path());
        assert!(!settings.auto_claim);
        assert!(!settings.monitor_availability);
        assert_eq!(settings.lookup_retry_delay_seconds, 75);
        assert_eq!(settings.desired_gamertag, "Foo123");
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let settings = Settings::load(Path::new("/nonexistent/settings.json"));
        assert_eq!(settings.lookup_retry_delay_seconds, 75);
        assert!(settings.login.is_empty());
    }

    #[test]
    fn test_invalid_json_uses_defaults() {
        let file = write_settings("{not json at all");

        let settings = Settings::load(file.path());
        assert_eq!(settings.lookup_retry_delay_seconds, 75);
    }

    #[test]
    fn test_zero_delay_normalizes_to_default() {
        let file = write_settings(r#"{"lookupRetryDelaySeconds": 0}"#);

        let settings = Settings::load(file.path());
        assert_eq!(settings.monitor_config().retry_delay_secs, 75);
    }

    #[test]
    fn test_monitor_config_mapping() {
        let file = write_settings(
            r#"{"autoClaim": true, "monitorAvailability": true, "lookupRetryDelaySeconds": 20}"#,
        );

        let config = Settings::load(file.path()).monitor_config();
        assert!(config.auto_claim);
        assert!(config.monitor_availability);
        assert_eq!(config.retry_delay_secs, 20);
    }
}
