//! Per-run monitoring configuration.

use serde::{Deserialize, Serialize};

/// Default delay between lookups while monitoring, in seconds.
pub const DEFAULT_RETRY_DELAY_SECS: u64 = 75;

/// Configuration for one monitor/claim run.
///
/// Invalid values never abort a run; [`MonitorConfig::normalized`] replaces
/// them with defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MonitorConfig {
    /// Claim the gamertag automatically once it is available.
    pub auto_claim: bool,

    /// Keep polling while the gamertag is unavailable.
    pub monitor_availability: bool,

    /// Delay between lookups while monitoring, in seconds. Must be > 0.
    pub retry_delay_secs: u64,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            auto_claim: false,
            monitor_availability: false,
            retry_delay_secs: DEFAULT_RETRY_DELAY_SECS,
        }
    }
}

impl MonitorConfig {
    /// Returns a copy with invalid fields replaced by their defaults.
    ///
    /// A zero retry delay would turn the monitor loop into a request storm,
    /// so it falls back to [`DEFAULT_RETRY_DELAY_SECS`].
    pub fn normalized(mut self) -> Self {
        if self.retry_delay_secs == 0 {
            self.retry_delay_secs = DEFAULT_RETRY_DELAY_SECS;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = MonitorConfig::default();
        assert!(!config.auto_claim);
        assert!(!config.monitor_availability);
        assert_eq!(config.retry_delay_secs, 75);
    }

    #[test]
    fn test_normalized_zero_delay() {
        let config = MonitorConfig {
            retry_delay_secs: 0,
            ..MonitorConfig::default()
        };
        assert_eq!(config.normalized().retry_delay_secs, 75);
    }

    #[test]
    fn test_normalized_keeps_valid_delay() {
        let config = MonitorConfig {
            retry_delay_secs: 30,
            ..MonitorConfig::default()
        };
        assert_eq!(config.normalized().retry_delay_secs, 30);
    }
}
