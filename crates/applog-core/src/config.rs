//! Configuration types for applog.
//!
//! [`Config::load`] reads `~/.config/applog/config.toml`, creating it with
//! hardcoded defaults if it does not yet exist. [`Config::defaults`] returns
//! the same defaults without touching the filesystem (useful in tests).

use serde::Deserialize;
use std::collections::HashMap;
use std::path::PathBuf;

// ---------------------------------------------------------------------------
// Embedded defaults
// ---------------------------------------------------------------------------

const DEFAULT_CONFIG: &str = r#"
[store]
capacity = 500

[level]
key           = "LOG_LEVEL"
settings_file = "settings.json"

[console]
enabled          = true
ansi             = true
timestamp_format = "%H:%M:%S%.3f"
banner           = true
"#;

// ---------------------------------------------------------------------------
// Public config types
// ---------------------------------------------------------------------------

/// Top-level application configuration, loaded from `~/.config/applog/config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub level: LevelConfig,
    #[serde(default)]
    pub console: ConsoleConfig,
    /// Module name → colour overrides for the console theme.
    #[serde(default)]
    pub modules: HashMap<String, String>,
}

/// `[store]` section of `config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    #[serde(default = "default_capacity")]
    pub capacity: usize,
}

fn default_capacity() -> usize { crate::store::DEFAULT_CAPACITY }

impl Default for StoreConfig {
    fn default() -> Self {
        Self { capacity: default_capacity() }
    }
}

/// `[level]` section of `config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct LevelConfig {
    #[serde(default = "default_level_key")]
    pub key: String,
    /// Settings file name, relative to the config directory unless absolute.
    #[serde(default = "default_settings_file")]
    pub settings_file: PathBuf,
}

fn default_level_key() -> String { crate::level::LEVEL_KEY.to_string() }
fn default_settings_file() -> PathBuf { PathBuf::from("settings.json") }

impl Default for LevelConfig {
    fn default() -> Self {
        Self {
            key: default_level_key(),
            settings_file: default_settings_file(),
        }
    }
}

/// `[console]` section of `config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct ConsoleConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_true")]
    pub ansi: bool,
    #[serde(default = "default_timestamp_format")]
    pub timestamp_format: String,
    /// Print the operator banner when the context is installed.
    #[serde(default = "default_true")]
    pub banner: bool,
}

fn default_true() -> bool { true }
fn default_timestamp_format() -> String { crate::console::DEFAULT_TIMESTAMP_FORMAT.to_string() }

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            ansi: true,
            timestamp_format: default_timestamp_format(),
            banner: true,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::defaults()
    }
}

impl Config {
    /// Load from `~/.config/applog/config.toml`, layered on top of the built-in
    /// defaults. Creates the file with defaults if it does not exist.
    pub fn load() -> anyhow::Result<Self> {
        let path = config_path();

        if !path.exists() {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&path, DEFAULT_CONFIG.trim_start())?;
        }

        Self::load_from(&path)
    }

    /// Load a specific file on top of the built-in defaults. A missing file
    /// yields the defaults.
    pub fn load_from(path: &std::path::Path) -> anyhow::Result<Self> {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .add_source(config::File::from(path).required(false))
            .build()?
            .try_deserialize()
            .map_err(Into::into)
    }

    /// Return the built-in defaults without touching the filesystem.
    pub fn defaults() -> Self {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .build()
            .expect("built-in default config must be valid TOML")
            .try_deserialize()
            .expect("built-in default config must deserialize correctly")
    }

    /// Absolute path of the level settings file.
    pub fn settings_path(&self) -> PathBuf {
        if self.level.settings_file.is_absolute() {
            self.level.settings_file.clone()
        } else {
            config_dir().join(&self.level.settings_file)
        }
    }
}

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

/// `$XDG_CONFIG_HOME/applog`, falling back to `~/.config/applog`.
pub fn config_dir() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".to_string()))
                .join(".config")
        })
        .join("applog")
}

pub fn config_path() -> PathBuf {
    config_dir().join("config.toml")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_load() {
        let cfg = Config::defaults();
        assert_eq!(cfg.store.capacity, 500);
        assert_eq!(cfg.level.key, "LOG_LEVEL");
        assert!(cfg.console.enabled);
        assert_eq!(cfg.console.timestamp_format, "%H:%M:%S%.3f");
        assert!(cfg.modules.is_empty());
    }

    #[test]
    fn file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[store]\ncapacity = 50\n\n[console]\nansi = false\n\n[modules]\nUpdater = \"#112233\"\n",
        )
        .unwrap();
        let cfg = Config::load_from(&path).unwrap();
        assert_eq!(cfg.store.capacity, 50);
        assert!(!cfg.console.ansi);
        assert!(cfg.console.enabled);
        assert_eq!(cfg.modules.len(), 1);
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = Config::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(cfg.store.capacity, 500);
    }

    #[test]
    fn absolute_settings_file_is_kept() {
        let mut cfg = Config::defaults();
        let abs = std::env::temp_dir().join("applog-settings.json");
        cfg.level.settings_file = abs.clone();
        assert_eq!(cfg.settings_path(), abs);
    }
}
