//! Dashboard Settings
//!
//! Where the server lives and how the dashboard polls it. Stored as JSON
//! in browser local storage; anything unreadable falls back to defaults.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::telemetry::{RacePolicy, DEFAULT_SERVER_PORT};

/// Local storage key
pub const STORAGE_KEY: &str = "telemetry_dash_settings";

/// Shortest accepted refresh period
pub const MIN_REFRESH_PERIOD_MS: u64 = 500;

/// Largest accepted backoff exponent
pub const MAX_BACKOFF_EXPONENT: u32 = 6;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardSettings {
    pub host: String,
    pub port: u16,
    pub refresh_period_ms: u64,
    pub race_policy: RacePolicy,
    /// 0 disables backoff
    pub max_backoff_exponent: u32,
}

impl Default for DashboardSettings {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: DEFAULT_SERVER_PORT,
            refresh_period_ms: 3000,
            race_policy: RacePolicy::default(),
            max_backoff_exponent: 0,
        }
    }
}

impl DashboardSettings {
    /// Telemetry endpoint URL
    pub fn endpoint(&self) -> String {
        format!("http://{}:{}/api/telemetry", self.host, self.port)
    }

    /// Full health URL
    pub fn health_url(&self) -> String {
        format!("http://{}:{}/health", self.host, self.port)
    }

    pub fn refresh_period(&self) -> Duration {
        Duration::from_millis(self.refresh_period_ms)
    }

    pub fn validate(&self) -> Result<(), String> {
        let host = self.host.trim();
        if host.is_empty() {
            return Err("Host must not be empty".to_string());
        }
        if host.contains('/') || host.contains(char::is_whitespace) {
            return Err(format!("Invalid host: {}", host));
        }
        if self.port == 0 {
            return Err("Port must be between 1 and 65535".to_string());
        }
        if self.refresh_period_ms < MIN_REFRESH_PERIOD_MS {
            return Err(format!(
                "Refresh period must be at least {} ms",
                MIN_REFRESH_PERIOD_MS
            ));
        }
        if self.max_backoff_exponent > MAX_BACKOFF_EXPONENT {
            return Err(format!(
                "Backoff cap must be at most {}",
                MAX_BACKOFF_EXPONENT
            ));
        }
        Ok(())
    }

    /// Parse stored settings, falling back to defaults
    pub fn from_json(json: &str) -> Self {
        match serde_json::from_str::<Self>(json) {
            Ok(settings) if settings.validate().is_ok() => settings,
            _ => Self::default(),
        }
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }

    /// Load from local storage or use defaults
    pub fn load() -> Self {
        if let Some(window) = web_sys::window() {
            if let Ok(Some(storage)) = window.local_storage() {
                if let Ok(Some(json)) = storage.get_item(STORAGE_KEY) {
                    return Self::from_json(&json);
                }
            }
        }
        Self::default()
    }

    /// Save to local storage
    pub fn save(&self) -> Result<(), String> {
        let storage = web_sys::window()
            .and_then(|window| window.local_storage().ok().flatten())
            .ok_or_else(|| "Local storage is not available".to_string())?;

        storage
            .set_item(STORAGE_KEY, &self.to_json())
            .map_err(|_| "Failed to write settings".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = DashboardSettings::default();
        assert_eq!(settings.endpoint(), "http://localhost:8080/api/telemetry");
        assert_eq!(settings.health_url(), "http://localhost:8080/health");
        assert_eq!(settings.refresh_period(), Duration::from_millis(3000));
        assert_eq!(settings.race_policy, RacePolicy::LastIssued);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_from_json_partial() {
        let settings = DashboardSettings::from_json(r#"{"port": 9090, "race_policy": "last_resolved"}"#);
        assert_eq!(settings.port, 9090);
        assert_eq!(settings.host, "localhost");
        assert_eq!(settings.race_policy, RacePolicy::LastResolved);
    }

    #[test]
    fn test_from_json_garbage_falls_back() {
        assert_eq!(DashboardSettings::from_json("not json"), DashboardSettings::default());
        assert_eq!(
            DashboardSettings::from_json(r#"{"refresh_period_ms": 10}"#),
            DashboardSettings::default()
        );
    }

    #[test]
    fn test_json_round_trip() {
        let settings = DashboardSettings {
            host: "telemetry.local".to_string(),
            max_backoff_exponent: 3,
            ..DashboardSettings::default()
        };
        assert_eq!(DashboardSettings::from_json(&settings.to_json()), settings);
    }

    #[test]
    fn test_validate() {
        let invalid = [
            DashboardSettings { host: " ".to_string(), ..Default::default() },
            DashboardSettings { host: "a/b".to_string(), ..Default::default() },
            DashboardSettings { port: 0, ..Default::default() },
            DashboardSettings { refresh_period_ms: 100, ..Default::default() },
            DashboardSettings { max_backoff_exponent: 7, ..Default::default() },
        ];
        for settings in invalid {
            assert!(settings.validate().is_err(), "{:?}", settings);
        }
    }
}
