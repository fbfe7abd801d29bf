//! Configuration management
//!
//! Compatible with the web app's settings.json format:
//! ```json
//! {
//!   "trendMonths": 6,
//!   "reminderWindowDays": 7,
//!   "categories": { "expense": ["Food", ...], "income": ["Salary", ...] }
//! }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::domain::{CategoryCatalog, Error, Result};

fn default_trend_months() -> usize {
    6
}

fn default_reminder_window_days() -> i64 {
    7
}

/// Raw settings.json structure
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SettingsFile {
    #[serde(default = "default_trend_months")]
    trend_months: usize,
    #[serde(default = "default_reminder_window_days")]
    reminder_window_days: i64,
    #[serde(default)]
    categories: CategoryCatalog,
}

impl Default for SettingsFile {
    fn default() -> Self {
        Self {
            trend_months: default_trend_months(),
            reminder_window_days: default_reminder_window_days(),
            categories: CategoryCatalog::default(),
        }
    }
}

/// Engine configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// How many months the dashboard trend looks back
    pub trend_months: usize,
    /// Look-ahead window for upcoming bills, in days
    pub reminder_window_days: i64,
    /// Category lists writes are validated against
    pub categories: CategoryCatalog,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            trend_months: default_trend_months(),
            reminder_window_days: default_reminder_window_days(),
            categories: CategoryCatalog::default(),
        }
    }
}

impl Config {
    /// Load config from a data directory
    ///
    /// A missing settings.json means defaults. A malformed one also falls
    /// back to defaults rather than refusing to start. The trend window
    /// can be overridden via LASTRO_TREND_MONTHS (for CI/testing).
    pub fn load(dir: &Path) -> Result<Self> {
        let settings_path = dir.join("settings.json");

        let raw: SettingsFile = if settings_path.exists() {
            let content = std::fs::read_to_string(&settings_path)
                .map_err(|err| Error::config(format!("cannot read {:?}: {}", settings_path, err)))?;
            match serde_json::from_str(&content) {
                Ok(settings) => settings,
                Err(err) => {
                    warn!("malformed settings.json, using defaults: {}", err);
                    SettingsFile::default()
                }
            }
        } else {
            SettingsFile::default()
        };

        let mut trend_months = raw.trend_months;
        if let Ok(value) = std::env::var("LASTRO_TREND_MONTHS") {
            match value.parse::<usize>() {
                Ok(months) => trend_months = months,
                Err(_) => warn!("ignoring invalid LASTRO_TREND_MONTHS: {}", value),
            }
        }

        let config = Self {
            trend_months,
            reminder_window_days: raw.reminder_window_days,
            categories: raw.categories,
        };
        config.validate()?;
        Ok(config)
    }

    /// Save config to a data directory
    pub fn save(&self, dir: &Path) -> Result<()> {
        let settings = SettingsFile {
            trend_months: self.trend_months,
            reminder_window_days: self.reminder_window_days,
            categories: self.categories.clone(),
        };
        let content = serde_json::to_string_pretty(&settings)?;
        let settings_path = dir.join("settings.json");
        std::fs::write(&settings_path, content)
            .map_err(|err| Error::config(format!("cannot write {:?}: {}", settings_path, err)))?;
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        if self.trend_months == 0 {
            return Err(Error::config("trendMonths must be at least 1"));
        }
        if self.reminder_window_days < 0 {
            return Err(Error::config("reminderWindowDays cannot be negative"));
        }
        if self.categories.expense.is_empty() || self.categories.income.is_empty() {
            return Err(Error::config("category lists cannot be empty"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_settings_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(dir.path()).unwrap();
        assert_eq!(config.trend_months, 6);
        assert_eq!(config.reminder_window_days, 7);
        assert!(config.categories.expense.contains(&"Food".to_string()));
    }

    #[test]
    fn test_partial_settings_fill_in_defaults() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("settings.json"), r#"{"trendMonths": 12}"#).unwrap();
        let config = Config::load(dir.path()).unwrap();
        assert_eq!(config.trend_months, 12);
        assert_eq!(config.reminder_window_days, 7);
    }

    #[test]
    fn test_malformed_settings_fall_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("settings.json"), "{not json").unwrap();
        let config = Config::load(dir.path()).unwrap();
        assert_eq!(config.trend_months, 6);
    }

    #[test]
    fn test_zero_trend_window_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("settings.json"), r#"{"trendMonths": 0}"#).unwrap();
        assert!(Config::load(dir.path()).is_err());
    }

    #[test]
    fn test_save_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.trend_months = 3;
        config.save(dir.path()).unwrap();
        let loaded = Config::load(dir.path()).unwrap();
        assert_eq!(loaded.trend_months, 3);
    }
}
