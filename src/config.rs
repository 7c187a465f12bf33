//! Configuration types for tickler.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TicklerConfig {
    /// Reminder defaults and lookahead.
    pub reminders: ReminderConfig,
    /// Background dispatcher settings.
    pub dispatcher: DispatcherConfig,
    /// Task store location.
    pub store: StoreConfig,
}

/// Reminder defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReminderConfig {
    /// Hour used when a reminder is added without an explicit time (0-23).
    pub default_hour: u8,
    /// Minute used when a reminder is added without an explicit time (0-59).
    pub default_min: u8,
    /// How many days ahead `upcoming` and next-reminder searches look
    /// (1 to [`MAX_HORIZON_DAYS`](crate::agenda::MAX_HORIZON_DAYS)).
    pub horizon_days: u32,
}

impl Default for ReminderConfig {
    fn default() -> Self {
        Self {
            default_hour: 9,
            default_min: 0,
            horizon_days: 14,
        }
    }
}

/// Reminder dispatcher configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DispatcherConfig {
    /// Seconds between dispatcher ticks.
    pub tick_secs: u64,
    /// Number of delivered run keys remembered for dedupe.
    pub delivered_capacity: usize,
}

impl Default for DispatcherConfig {
    fn default() -> Self {
        Self {
            tick_secs: 30,
            delivered_capacity: 1024,
        }
    }
}

/// Task store configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Override for the task file (None = `tickler_dirs::tasks_file()`).
    pub path: Option<PathBuf>,
}

impl StoreConfig {
    /// Resolved task file path.
    #[must_use]
    pub fn resolved_path(&self) -> PathBuf {
        self.path
            .clone()
            .unwrap_or_else(crate::tickler_dirs::tasks_file)
    }
}

impl TicklerConfig {
    /// Load configuration from a TOML file, falling back to defaults for missing fields.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or holds out-of-range values.
    pub fn from_file(path: &std::path::Path) -> crate::error::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)
            .map_err(|e| crate::error::TicklerError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a TOML file, creating parent directories as needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written or the config cannot be serialized.
    pub fn save_to_file(&self, path: &std::path::Path) -> crate::error::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)
            .map_err(|e| crate::error::TicklerError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Returns the default config file path.
    pub fn default_config_path() -> PathBuf {
        crate::tickler_dirs::config_file()
    }

    /// Check value ranges that serde cannot express.
    ///
    /// # Errors
    ///
    /// Returns [`TicklerError::Config`](crate::error::TicklerError::Config) naming the bad field.
    pub fn validate(&self) -> crate::error::Result<()> {
        use crate::error::TicklerError;

        if self.reminders.default_hour > 23 {
            return Err(TicklerError::Config(
                "reminders.default_hour must be 0-23".to_owned(),
            ));
        }
        if self.reminders.default_min > 59 {
            return Err(TicklerError::Config(
                "reminders.default_min must be 0-59".to_owned(),
            ));
        }
        if self.reminders.horizon_days == 0
            || self.reminders.horizon_days > crate::agenda::MAX_HORIZON_DAYS
        {
            return Err(TicklerError::Config(format!(
                "reminders.horizon_days must be 1-{}",
                crate::agenda::MAX_HORIZON_DAYS
            )));
        }
        if self.dispatcher.tick_secs == 0 {
            return Err(TicklerError::Config(
                "dispatcher.tick_secs must be positive".to_owned(),
            ));
        }
        Ok(())
    }

    /// Default reminder time from `[reminders]`.
    #[must_use]
    pub fn default_reminder_time(&self) -> crate::model::ReminderTime {
        crate::model::ReminderTime {
            hour: self.reminders.default_hour,
            min: self.reminders.default_min,
        }
    }
}
