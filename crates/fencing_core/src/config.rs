//! # Remote Configuration
//!
//! Timing constants of the remote in one place. The defaults are the standard
//! scoring-machine values; hosts can load overrides from a JSON file named by
//! the `FENCING_REMOTE_CONFIG` environment variable.
//!
//! ```rust
//! use fencing_core::config::RemoteConfig;
//!
//! let config = RemoteConfig::default();
//! assert_eq!(config.bout_secs, 180);
//! ```

use std::time::Duration;
use std::{env, fs};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::state::BOUT_SECS;

pub const CONFIG_PATH_ENV: &str = "FENCING_REMOTE_CONFIG";

/// Largest bout length whose clock still renders as `M:SS` with two-digit minutes.
const MAX_BOUT_SECS: u32 = 99 * 60 + 59;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RemoteConfig {
    /// Clock value after a single SET and after a pause expires
    pub bout_secs: u32,
    /// Clock value after a double SET
    pub short_bout_secs: u32,
    /// Length of the PAUSE countdown
    pub pause_secs: u32,
    /// Two SET activations closer than this count as a double
    pub double_click_window_ms: u64,
    /// Period of both repeating timers
    pub tick_ms: u64,
    /// Seed for random priority; `None` draws a fresh seed
    pub priority_seed: Option<u64>,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            bout_secs: BOUT_SECS,
            short_bout_secs: 60,
            pause_secs: 60,
            double_click_window_ms: 500,
            tick_ms: 1000,
            priority_seed: None,
        }
    }
}

impl RemoteConfig {
    pub fn standard() -> Self {
        Self::default()
    }

    /// Standard timings with a fixed priority seed (tests, replays)
    pub fn deterministic(seed: u64) -> Self {
        Self { priority_seed: Some(seed), ..Self::default() }
    }

    pub fn tick(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }

    pub fn double_click_window(&self) -> Duration {
        Duration::from_millis(self.double_click_window_ms)
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)
            .map_err(|source| ConfigError::Io { path: path.to_string(), source })?;
        Self::from_json(&content)
    }

    /// Load from the file named by [`CONFIG_PATH_ENV`], or defaults when the
    /// variable is unset or blank.
    pub fn from_env() -> Result<Self, ConfigError> {
        let Ok(path) = env::var(CONFIG_PATH_ENV) else {
            return Ok(Self::default());
        };

        let path = path.trim();
        if path.is_empty() {
            log::warn!("{CONFIG_PATH_ENV} is set but empty, using default remote config");
            return Ok(Self::default());
        }

        let config = Self::from_file(path)?;
        log::info!("Loaded remote config from {CONFIG_PATH_ENV}='{path}'");
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        fn invalid(field: &'static str, reason: impl Into<String>) -> ConfigError {
            ConfigError::Invalid { field, reason: reason.into() }
        }

        if self.bout_secs == 0 {
            return Err(invalid("bout_secs", "must be greater than zero"));
        }
        if self.bout_secs > MAX_BOUT_SECS {
            return Err(invalid("bout_secs", format!("must be at most {MAX_BOUT_SECS}")));
        }
        if self.short_bout_secs == 0 {
            return Err(invalid("short_bout_secs", "must be greater than zero"));
        }
        if self.short_bout_secs > self.bout_secs {
            return Err(invalid(
                "short_bout_secs",
                format!("{} exceeds bout_secs {}", self.short_bout_secs, self.bout_secs),
            ));
        }
        if self.pause_secs == 0 {
            return Err(invalid("pause_secs", "must be greater than zero"));
        }
        if self.double_click_window_ms == 0 {
            return Err(invalid("double_click_window_ms", "must be greater than zero"));
        }
        if self.tick_ms == 0 {
            return Err(invalid("tick_ms", "must be greater than zero"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let cfg = RemoteConfig::default();
        assert_eq!(cfg.bout_secs, 180);
        assert_eq!(cfg.short_bout_secs, 60);
        assert_eq!(cfg.pause_secs, 60);
        assert_eq!(cfg.double_click_window(), Duration::from_millis(500));
        assert_eq!(cfg.tick(), Duration::from_secs(1));
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let cfg = RemoteConfig::from_json(r#"{"pause_secs": 30, "priority_seed": 7}"#).unwrap();
        assert_eq!(cfg.pause_secs, 30);
        assert_eq!(cfg.priority_seed, Some(7));
        assert_eq!(cfg.bout_secs, 180);
    }

    #[test]
    fn test_rejects_short_bout_longer_than_bout() {
        let err = RemoteConfig::from_json(r#"{"bout_secs": 60, "short_bout_secs": 90}"#)
            .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "short_bout_secs", .. }));
    }

    #[test]
    fn test_rejects_zero_durations() {
        for field in ["bout_secs", "pause_secs", "tick_ms", "double_click_window_ms"] {
            let json = format!(r#"{{"{field}": 0}}"#);
            let err = RemoteConfig::from_json(&json).unwrap_err();
            assert!(matches!(err, ConfigError::Invalid { .. }), "{field} should be rejected");
        }
    }

    #[test]
    fn test_rejects_malformed_json() {
        let err = RemoteConfig::from_json("{ nope").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"bout_secs": 240, "short_bout_secs": 60}}"#).unwrap();

        let cfg = RemoteConfig::from_file(file.path().to_str().unwrap()).unwrap();
        assert_eq!(cfg.bout_secs, 240);
    }

    #[test]
    fn test_from_env() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"pause_secs": 45}}"#).unwrap();

        env::set_var(CONFIG_PATH_ENV, file.path());
        let loaded = RemoteConfig::from_env();
        env::set_var(CONFIG_PATH_ENV, "  ");
        let blank = RemoteConfig::from_env();
        env::remove_var(CONFIG_PATH_ENV);

        assert_eq!(loaded.unwrap().pause_secs, 45);
        assert_eq!(blank.unwrap(), RemoteConfig::default());
        assert_eq!(RemoteConfig::from_env().unwrap(), RemoteConfig::default());
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = RemoteConfig::from_file("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_config_serialization() {
        let cfg = RemoteConfig::deterministic(42);
        let json = serde_json::to_string(&cfg).unwrap();
        let parsed: RemoteConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, cfg);
    }
}
