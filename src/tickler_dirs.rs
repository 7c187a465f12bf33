//! Centralized application directory paths for tickler.
//!
//! Uses the [`dirs`] crate for platform-appropriate directory resolution.
//!
//! | Purpose | macOS | Linux |
//! |---------|-------|-------|
//! | App data | `~/Library/Application Support/tickler/` | `~/.local/share/tickler/` |
//! | Config | `~/Library/Application Support/tickler/` | `~/.config/tickler/` |
//!
//! # Environment Overrides
//!
//! - `TICKLER_DATA_DIR` overrides [`data_dir`]
//! - `TICKLER_CONFIG_DIR` overrides [`config_dir`]

use std::path::PathBuf;

/// Application data root directory.
///
/// Holds the task store. Resolves to `dirs::data_dir()/tickler/` by default.
#[must_use]
pub fn data_dir() -> PathBuf {
    if let Some(override_dir) = std::env::var_os("TICKLER_DATA_DIR") {
        return PathBuf::from(override_dir);
    }
    dirs::data_dir()
        .map(|d| d.join("tickler"))
        .unwrap_or_else(|| PathBuf::from("/tmp/tickler-data"))
}

/// Application config directory.
///
/// Resolves to `dirs::config_dir()/tickler/` by default.
#[must_use]
pub fn config_dir() -> PathBuf {
    if let Some(override_dir) = std::env::var_os("TICKLER_CONFIG_DIR") {
        return PathBuf::from(override_dir);
    }
    dirs::config_dir()
        .map(|d| d.join("tickler"))
        .unwrap_or_else(|| PathBuf::from("/tmp/tickler-config"))
}

/// Main config file path (`config_dir()/config.toml`).
#[must_use]
pub fn config_file() -> PathBuf {
    config_dir().join("config.toml")
}

/// Task store file path (`data_dir()/tasks.json`).
#[must_use]
pub fn tasks_file() -> PathBuf {
    data_dir().join("tasks.json")
}
