//! Configuration management for the dashboard worker

use std::num::NonZeroUsize;

use crate::error::{DashboardError, Result};
use worker::Env;

/// Largest accepted `LAST_MODIFIED_OFFSET_HOURS` in either direction
const MAX_OFFSET_HOURS: i64 = 48;

/// Dashboard configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Environment (production, staging, development)
    pub environment: String,

    /// Log level
    pub log_level: String,

    /// Statistics API the poller reads from
    pub stats_api_base_url: String,
    /// Optional bearer token for the statistics API
    pub stats_api_token: Option<String>,

    /// Browser refresh cadence (cron cadence is set in wrangler.toml)
    pub refresh_interval_seconds: u64,

    /// Entities per leaderboard page
    pub page_size: NonZeroUsize,

    /// Conveyor boxes/hour target line
    pub conveyor_hourly_target: u64,

    /// Shift applied to upstream `last_modified` before display
    pub last_modified_offset_hours: i64,

    /// Gap between heatmap columns
    pub heatmap_column_gap_px: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            environment: "production".to_string(),
            log_level: "info".to_string(),
            stats_api_base_url: String::new(),
            stats_api_token: None,
            refresh_interval_seconds: 30,
            page_size: NonZeroUsize::new(10).unwrap_or(NonZeroUsize::MIN),
            conveyor_hourly_target: 600,
            last_modified_offset_hours: 1,
            heatmap_column_gap_px: 4,
        }
    }
}

impl Config {
    /// Load configuration from Cloudflare environment variables
    pub fn from_env(env: &Env) -> Result<Self> {
        let config = Self::from_lookup(|key| {
            if key == "STATS_API_TOKEN" {
                env.secret(key).ok().map(|v| v.to_string())
            } else {
                env.var(key).ok().map(|v| v.to_string())
            }
        });
        config.validate()?;
        Ok(config)
    }

    /// Build configuration from any key lookup; unparsable values fall back to defaults
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        Self {
            environment: lookup("ENVIRONMENT").unwrap_or(defaults.environment),

            log_level: lookup("LOG_LEVEL")
                .map(|v| v.to_lowercase())
                .unwrap_or(defaults.log_level),

            stats_api_base_url: lookup("STATS_API_BASE_URL")
                .map(|v| v.trim().trim_end_matches('/').to_string())
                .unwrap_or_default(),

            stats_api_token: lookup("STATS_API_TOKEN").filter(|v| !v.trim().is_empty()),

            refresh_interval_seconds: lookup("REFRESH_INTERVAL_SECONDS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.refresh_interval_seconds),

            page_size: lookup("PAGE_SIZE")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.page_size),

            conveyor_hourly_target: lookup("CONVEYOR_HOURLY_TARGET")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.conveyor_hourly_target),

            last_modified_offset_hours: lookup("LAST_MODIFIED_OFFSET_HOURS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.last_modified_offset_hours),

            heatmap_column_gap_px: lookup("HEATMAP_COLUMN_GAP_PX")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.heatmap_column_gap_px),
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.stats_api_base_url.is_empty() {
            return Err(DashboardError::Config("STATS_API_BASE_URL is required".into()));
        }
        if !self.stats_api_base_url.starts_with("http://")
            && !self.stats_api_base_url.starts_with("https://")
        {
            return Err(DashboardError::Config(
                "STATS_API_BASE_URL must be an http(s) URL".into(),
            ));
        }
        if self.refresh_interval_seconds < 5 {
            return Err(DashboardError::Config("refresh_interval_seconds must be >= 5".into()));
        }
        if !(-MAX_OFFSET_HOURS..=MAX_OFFSET_HOURS).contains(&self.last_modified_offset_hours) {
            return Err(DashboardError::Config(format!(
                "last_modified_offset_hours must be within +/-{MAX_OFFSET_HOURS}"
            )));
        }
        Ok(())
    }

    pub fn is_debug(&self) -> bool {
        self.log_level == "debug" || self.log_level == "trace"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_config_defaults() {
        let config = Config::from_lookup(lookup_from(&[("STATS_API_BASE_URL", "https://stats.example.com/")]));

        assert_eq!(config.stats_api_base_url, "https://stats.example.com");
        assert_eq!(config.page_size.get(), 10);
        assert_eq!(config.refresh_interval_seconds, 30);
        assert_eq!(config.conveyor_hourly_target, 600);
        assert_eq!(config.last_modified_offset_hours, 1);
        assert!(config.stats_api_token.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_values_fall_back() {
        let config = Config::from_lookup(lookup_from(&[
            ("STATS_API_BASE_URL", "https://stats.example.com"),
            ("PAGE_SIZE", "0"),
            ("REFRESH_INTERVAL_SECONDS", "soon"),
            ("LOG_LEVEL", "DEBUG"),
        ]));

        assert_eq!(config.page_size.get(), 10);
        assert_eq!(config.refresh_interval_seconds, 30);
        assert!(config.is_debug());
    }

    #[test]
    fn test_validate_rejects_missing_url() {
        let config = Config::from_lookup(lookup_from(&[]));
        assert!(matches!(config.validate(), Err(DashboardError::Config(_))));

        let config = Config::from_lookup(lookup_from(&[("STATS_API_BASE_URL", "ftp://stats")]));
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_bounds_offset() {
        let with_offset = |offset: &str| {
            Config::from_lookup(lookup_from(&[
                ("STATS_API_BASE_URL", "https://stats.example.com"),
                ("LAST_MODIFIED_OFFSET_HOURS", offset),
            ]))
        };

        assert!(with_offset("-48").validate().is_ok());
        assert!(with_offset("48").validate().is_ok());
        assert!(matches!(with_offset("49").validate(), Err(DashboardError::Config(_))));
        assert!(with_offset("-10000000000").validate().is_err());
    }
}
