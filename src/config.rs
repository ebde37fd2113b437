//! Booth configuration.

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use serde::{Deserialize, Serialize};

use crate::capture::sequencer::Interval;
use crate::foundation::error::{SnapError, SnapResult};
use crate::strip::date::DateLocale;
use crate::strip::geometry::StripGeometry;

/// Environment variable naming a font file used for any role left unset.
pub const FONT_ENV: &str = "SNAPSTRIP_FONT";

/// Top-level configuration of a booth.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoothConfig {
    /// Title printed in the strip header.
    pub event_name: String,

    /// Countdown per photo, in seconds (5 or 10).
    pub countdown: Interval,

    /// Built-in template id.
    pub template: String,

    /// Language of the footer date.
    pub date_locale: DateLocale,

    pub geometry: StripGeometry,

    pub fonts: FontConfig,

    pub export: ExportConfig,

    pub logging: LoggingConfig,
}

/// Font files per text role. Unset roles fall back to another configured face.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FontConfig {
    /// Header title.
    pub display: Option<PathBuf>,
    /// Footer date.
    pub body: Option<PathBuf>,
    /// User text items.
    pub overlay: Option<PathBuf>,
}

/// Where finished strips go.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Directory for downloaded strips.
    pub output_dir: PathBuf,

    /// Print command and its arguments. The PNG is written to its stdin.
    pub print_command: Vec<String>,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "snapstrip=debug,warn").
    pub level: String,

    /// Whether to output structured JSON logs.
    pub json: bool,
}

impl Default for BoothConfig {
    fn default() -> Self {
        Self {
            event_name: "SUMMER PARTY".to_string(),
            countdown: Interval::Fast,
            template: "classic".to_string(),
            date_locale: DateLocale::Indonesian,
            geometry: StripGeometry::default(),
            fonts: FontConfig::default(),
            export: ExportConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            print_command: vec!["lp".to_string()],
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

impl FontConfig {
    /// Fill every unset role with `path`.
    pub fn or_fallback(mut self, path: Option<PathBuf>) -> Self {
        if let Some(path) = path {
            for slot in [&mut self.display, &mut self.body, &mut self.overlay] {
                if slot.is_none() {
                    *slot = Some(path.clone());
                }
            }
        }
        self
    }

    /// Apply the [`FONT_ENV`] fallback.
    pub fn with_env_fallback(self) -> Self {
        let from_env = std::env::var_os(FONT_ENV)
            .filter(|v| !v.is_empty())
            .map(PathBuf::from);
        self.or_fallback(from_env)
    }
}

impl BoothConfig {
    pub fn from_json(json: &str) -> SnapResult<Self> {
        let cfg: Self = serde_json::from_str(json)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Load and validate a config file.
    pub fn load(path: &Path) -> SnapResult<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("read config '{}'", path.display()))?;
        Self::from_json(&content)
    }

    /// Load config from the standard location, falling back to defaults.
    pub fn load_or_default() -> Self {
        let config_path = config_file_path();
        if config_path.exists() {
            match Self::load(&config_path) {
                Ok(config) => return config,
                Err(e) => {
                    tracing::warn!("Failed to load config at {:?}: {}", config_path, e);
                }
            }
        }
        Self::default()
    }

    /// Save config to `path`, creating parent directories.
    pub fn save(&self, path: &Path) -> SnapResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create config dir '{}'", parent.display()))?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)
            .with_context(|| format!("write config '{}'", path.display()))?;
        Ok(())
    }

    pub fn validate(&self) -> SnapResult<()> {
        self.geometry.validate()?;
        if self.export.print_command.is_empty() {
            return Err(SnapError::validation("export.print_command must not be empty"));
        }
        Ok(())
    }
}

/// Standard config file location.
pub fn config_file_path() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
            PathBuf::from(home).join(".config")
        });
    base.join("snapstrip").join("config.json")
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
