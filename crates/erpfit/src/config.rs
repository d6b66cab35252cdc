//! Configuration management for erpfit.
//!
//! This module provides configuration loading and validation using figment,
//! supporting TOML config files, environment variables, and defaults.

use std::path::PathBuf;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::error::{Error, Result};
use crate::scoring::EmptySectionPolicy;
use crate::session::{CursorLayout, LayoutMode, Session};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Default configuration directory name.
const CONFIG_DIR_NAME: &str = "erpfit";

/// Widest allowed chart bar.
const MAX_BAR_WIDTH: usize = 100;

/// Application configuration.
///
/// Configuration is loaded from (in order of precedence, highest first):
/// 1. Environment variables (prefixed with `ERPFIT_`)
/// 2. TOML config file at `~/.config/erpfit/config.toml`
/// 3. Default values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Session configuration.
    pub session: SessionConfig,
    /// Scoring configuration.
    pub scoring: ScoringConfig,
    /// Output configuration.
    pub output: OutputConfig,
}

/// Session-related configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// How the cursor is bounded.
    pub layout: LayoutMode,
    /// Allow moving past a question without answering it.
    pub allow_skip: bool,
}

/// Scoring-related configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// What to do with sections that have no answers.
    pub empty_section: EmptySectionPolicy,
}

/// Report output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// Human-readable text.
    #[default]
    Text,
    /// Pretty-printed JSON.
    Json,
}

/// Output-related configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Default report format.
    pub format: OutputFormat,
    /// Draw the WISCAR bar chart in text reports.
    pub chart: bool,
    /// Width of a 100% bar, in characters.
    pub bar_width: usize,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Text,
            chart: true,
            bar_width: 40,
        }
    }
}

impl Config {
    /// Load configuration from all sources.
    ///
    /// Configuration is loaded in this order (later sources override earlier):
    /// 1. Default values
    /// 2. TOML config file (if exists)
    /// 3. Environment variables (prefixed with `ERPFIT_`, `__` separating
    ///    nested keys, e.g. `ERPFIT_OUTPUT__BAR_WIDTH`)
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load configuration with an optional custom config path.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load_from(config_path: Option<PathBuf>) -> Result<Self> {
        let config_file = config_path.unwrap_or_else(Self::default_config_path);

        let figment = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(&config_file))
            .merge(Env::prefixed("ERPFIT_").split("__"));

        let config: Config = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default configuration file path.
    #[must_use]
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join(CONFIG_DIR_NAME)
            .join(CONFIG_FILE_NAME)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid.
    pub fn validate(&self) -> Result<()> {
        if self.output.bar_width == 0 || self.output.bar_width > MAX_BAR_WIDTH {
            return Err(Error::ConfigValidation {
                message: format!(
                    "bar_width must be between 1 and {MAX_BAR_WIDTH}, got {}",
                    self.output.bar_width
                ),
            });
        }

        Ok(())
    }

    /// Build a pristine session over `catalog` as configured.
    #[must_use]
    pub fn session(&self, catalog: Catalog) -> Session {
        let layout = CursorLayout::for_mode(self.session.layout, &catalog);
        Session::new(catalog)
            .with_layout(layout)
            .with_policy(self.scoring.empty_section)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.session.layout, LayoutMode::Fixed);
        assert!(!config.session.allow_skip);
        assert_eq!(config.scoring.empty_section, EmptySectionPolicy::Zero);
        assert_eq!(config.output.format, OutputFormat::Text);
        assert!(config.output.chart);
        assert_eq!(config.output.bar_width, 40);
    }

    #[test]
    fn test_validate_valid_config() {
        let config = Config::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_zero_bar_width() {
        let mut config = Config::default();
        config.output.bar_width = 0;

        let result = config.validate();
        assert!(result.is_err());
        let err = result.unwrap_err().to_string();
        assert!(err.contains("bar_width"));
    }

    #[test]
    fn test_validate_wide_bar_width() {
        let mut config = Config::default();
        config.output.bar_width = 101;
        assert!(config.validate().is_err());

        config.output.bar_width = 100;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_session_uses_configured_layout() {
        let mut config = Config::default();
        assert_eq!(config.session(Catalog::builtin()).layout().total(), 24);

        config.session.layout = LayoutMode::Catalog;
        assert_eq!(config.session(Catalog::builtin()).layout().total(), 28);
    }

    #[test]
    fn test_session_uses_configured_policy() {
        let mut config = Config::default();
        config.scoring.empty_section = EmptySectionPolicy::Reject;

        let mut session = config.session(Catalog::builtin());
        assert!(matches!(
            session.score(),
            Err(Error::InsufficientAnswers { .. })
        ));
    }

    #[test]
    fn test_default_config_path() {
        let path = Config::default_config_path();
        assert!(path.to_string_lossy().contains("erpfit"));
        assert!(path.to_string_lossy().contains("config.toml"));
    }

    #[test]
    fn test_load_nonexistent_config() {
        // Loading from a nonexistent path should work (uses defaults)
        let result = Config::load_from(Some(PathBuf::from("/nonexistent/config.toml")));
        assert!(result.is_ok());

        let config = result.unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_config_deserialize_partial() {
        let json = r#"{"session": {"layout": "catalog"}, "scoring": {"empty_section": "reject"}}"#;
        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.session.layout, LayoutMode::Catalog);
        assert_eq!(config.scoring.empty_section, EmptySectionPolicy::Reject);
        assert_eq!(config.output, OutputConfig::default());
    }

    #[test]
    fn test_config_serialize() {
        let json = serde_json::to_string(&Config::default()).unwrap();
        assert!(json.contains("\"layout\":\"fixed\""));
        assert!(json.contains("\"empty_section\":\"zero\""));
    }

    #[test]
    fn test_config_clone() {
        let config = Config::default();
        let cloned = config.clone();
        assert_eq!(config, cloned);
    }
}
