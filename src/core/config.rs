//! # Configuration
//!
//! Build-time reminder constants plus the small amount of runtime
//! configuration the process needs (log level).
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0
//!
//! ## Changelog
//! - 1.0.0: Initial creation with intervals, keyword and catalog paths

use anyhow::{Context, Result};
use std::path::PathBuf;
use std::time::Duration;

/// Default reminder interval
pub const NORMAL_INTERVAL: Duration = Duration::from_secs(30 * 60);

/// Shorter interval used once a reminder went unanswered
pub const ELEVATED_INTERVAL: Duration = Duration::from_secs(10 * 60);

/// Keyword the user types to confirm hydration
pub const CONFIRMATION_KEYWORD: &str = "agua";

/// Newline-delimited catalog files, relative to the working directory
pub const REMINDERS_FILE_PATH: &str = "reminders.txt";
pub const ESCALATIONS_FILE_PATH: &str = "escalations.txt";
pub const CONFIRMATIONS_FILE_PATH: &str = "confirmations.txt";

/// Log level used when `LOG_LEVEL` is not set
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// The two retrigger durations the scheduler alternates between
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Intervals {
    pub normal: Duration,
    pub elevated: Duration,
}

impl Intervals {
    pub fn new(normal: Duration, elevated: Duration) -> Self {
        Intervals { normal, elevated }
    }
}

impl Default for Intervals {
    fn default() -> Self {
        Intervals::new(NORMAL_INTERVAL, ELEVATED_INTERVAL)
    }
}

/// Locations of the three message catalogs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogPaths {
    pub reminders: PathBuf,
    pub escalations: PathBuf,
    pub confirmations: PathBuf,
}

impl Default for CatalogPaths {
    fn default() -> Self {
        CatalogPaths {
            reminders: PathBuf::from(REMINDERS_FILE_PATH),
            escalations: PathBuf::from(ESCALATIONS_FILE_PATH),
            confirmations: PathBuf::from(CONFIRMATIONS_FILE_PATH),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub intervals: Intervals,
    pub confirmation_keyword: String,
    pub catalog_paths: CatalogPaths,
    pub log_level: String,
    /// Send alerts through `notify-send`; log them otherwise
    pub desktop_notifications: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            intervals: Intervals::default(),
            confirmation_keyword: CONFIRMATION_KEYWORD.to_string(),
            catalog_paths: CatalogPaths::default(),
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            desktop_notifications: true,
        }
    }
}

impl Config {
    /// Build the configuration from the environment.
    ///
    /// Only `LOG_LEVEL` and `DESKTOP_NOTIFICATIONS` are read; reminder
    /// behaviour is fixed at build time.
    pub fn from_env() -> Result<Self> {
        let log_level = read_env("LOG_LEVEL")?.unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string());
        let desktop_notifications = match read_env("DESKTOP_NOTIFICATIONS")? {
            Some(value) => parse_flag(&value).with_context(|| {
                format!("DESKTOP_NOTIFICATIONS must be true or false, got '{}'", value)
            })?,
            None => true,
        };

        Ok(Config {
            log_level,
            desktop_notifications,
            ..Config::default()
        })
    }
}

fn read_env(key: &str) -> Result<Option<String>> {
    match std::env::var(key) {
        Ok(value) => Ok(Some(value)),
        Err(std::env::VarError::NotPresent) => Ok(None),
        Err(e) => Err(e).with_context(|| format!("{} is not valid unicode", key)),
    }
}

fn parse_flag(value: &str) -> Result<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(anyhow::anyhow!("invalid boolean flag")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_intervals() {
        let intervals = Intervals::default();
        assert_eq!(intervals.normal, Duration::from_secs(1800));
        assert_eq!(intervals.elevated, Duration::from_secs(600));
        assert!(intervals.elevated < intervals.normal);
    }

    #[test]
    fn test_default_config_uses_constants() {
        let config = Config::default();
        assert_eq!(config.confirmation_keyword, "agua");
        assert_eq!(config.catalog_paths.reminders, PathBuf::from("reminders.txt"));
        assert_eq!(config.catalog_paths.escalations, PathBuf::from("escalations.txt"));
        assert_eq!(
            config.catalog_paths.confirmations,
            PathBuf::from("confirmations.txt")
        );
        assert_eq!(config.log_level, "info");
        assert!(config.desktop_notifications);
    }

    #[test]
    fn test_parse_flag() {
        assert!(parse_flag("true").unwrap());
        assert!(parse_flag(" YES ").unwrap());
        assert!(parse_flag("1").unwrap());
        assert!(!parse_flag("off").unwrap());
        assert!(!parse_flag("False").unwrap());
        assert!(parse_flag("maybe").is_err());
    }
}
