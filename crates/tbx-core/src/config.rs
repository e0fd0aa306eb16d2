//! Configuration types for tbx.
//!
//! [`Config::load`] reads `~/.config/tbx/config.toml`, creating it with
//! hardcoded defaults if it does not yet exist. [`Config::defaults`] returns
//! the same defaults without touching the filesystem (useful in tests).

use serde::Deserialize;
use std::path::PathBuf;

// ---------------------------------------------------------------------------
// Embedded defaults
// ---------------------------------------------------------------------------

const DEFAULT_CONFIG: &str = r#"
[ui]
# Tool shown at startup: "extract" or "encrypt". Overridden by --tool.
start_tool       = "extract"
# How long transient alerts stay on screen.
alert_timeout_ms = 3000
# Directory exported files are written to. Empty = current directory.
export_dir       = ""
"#;

// ---------------------------------------------------------------------------
// Public config types
// ---------------------------------------------------------------------------

/// Top-level application configuration, loaded from `~/.config/tbx/config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub ui: UiConfig,
}

/// `[ui]` section of `config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct UiConfig {
    #[serde(default = "default_start_tool")]
    pub start_tool: String,
    #[serde(default = "default_alert_timeout_ms")]
    pub alert_timeout_ms: u64,
    #[serde(default)]
    pub export_dir: String,
}

fn default_start_tool() -> String { "extract".to_string() }
fn default_alert_timeout_ms() -> u64 { 3000 }

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            start_tool: default_start_tool(),
            alert_timeout_ms: default_alert_timeout_ms(),
            export_dir: String::new(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::defaults()
    }
}

impl Config {
    /// Load from `~/.config/tbx/config.toml`, layered on top of the built-in
    /// defaults. Creates the file with defaults if it does not exist.
    pub fn load() -> anyhow::Result<Self> {
        let path = config_path();

        if !path.exists() {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&path, DEFAULT_CONFIG.trim_start())?;
        }

        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .add_source(config::File::from(path.as_path()).required(false))
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

    /// Destination directory for exports: `export_dir` when set, otherwise
    /// the current directory.
    pub fn export_dir(&self) -> PathBuf {
        if self.ui.export_dir.is_empty() {
            PathBuf::from(".")
        } else {
            PathBuf::from(&self.ui.export_dir)
        }
    }
}

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

fn config_path() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".to_string()))
                .join(".config")
        })
        .join("tbx")
        .join("config.toml")
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
        assert_eq!(cfg.ui.start_tool, "extract");
        assert_eq!(cfg.ui.alert_timeout_ms, 3000);
        assert!(cfg.ui.export_dir.is_empty());
    }

    #[test]
    fn empty_export_dir_falls_back_to_cwd() {
        let cfg = Config::defaults();
        assert_eq!(cfg.export_dir(), PathBuf::from("."));
    }
}
