//! Configuration Module
//!
//! Handles application configuration loading, validation, and management.

use crate::wizard::Locale;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Wizard presentation
    #[serde(default)]
    pub wizard: WizardConfig,

    /// Where downloaded summaries go
    #[serde(default)]
    pub export: ExportConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Wizard configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WizardConfig {
    /// Language tag, read like a page `lang` attribute ("en", "ja", "ja-JP", ...)
    #[serde(default = "default_lang")]
    pub lang: String,
}

fn default_lang() -> String {
    "en".to_string()
}

impl Default for WizardConfig {
    fn default() -> Self {
        Self {
            lang: default_lang(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Directory receiving `protocol-risk-summary-*.md` files
    #[serde(default = "default_export_dir")]
    pub dir: PathBuf,
}

fn default_export_dir() -> PathBuf {
    PathBuf::from(".")
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            dir: default_export_dir(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log to file
    #[serde(default)]
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: None,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Base directory for riskcheck state: ~/.riskcheck
pub fn riskcheck_home() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".riskcheck")
}

/// Recursive table merge; scalars and arrays in `overlay` replace `base`
fn merge_tables(base: &mut toml::Table, overlay: toml::Table) {
    for (key, value) in overlay {
        match value {
            toml::Value::Table(incoming) => {
                if let Some(toml::Value::Table(existing)) = base.get_mut(&key) {
                    merge_tables(existing, incoming);
                } else {
                    base.insert(key, toml::Value::Table(incoming));
                }
            }
            value => {
                base.insert(key, value);
            }
        }
    }
}

impl Config {
    /// Load configuration from default locations
    ///
    /// Priority (lowest to highest):
    /// 1. Default values
    /// 2. System config: ~/.config/riskcheck/config.toml
    /// 3. Local config: ./riskcheck.toml
    /// 4. Environment variables
    pub fn load() -> Result<Self> {
        tracing::debug!("Loading configuration...");

        let mut config = Self::default();

        if let Some(system_config_path) = Self::system_config_path()
            && system_config_path.exists()
        {
            tracing::debug!("Loading system config from: {:?}", system_config_path);
            config = Self::merge_from_file(config, &system_config_path)?;
        }

        let local_config_path = Self::local_config_path();
        if local_config_path.exists() {
            tracing::debug!("Loading local config from: {:?}", local_config_path);
            config = Self::merge_from_file(config, &local_config_path)?;
        }

        config = Self::apply_env_overrides(config);

        tracing::debug!("Configuration loaded successfully");
        Ok(config)
    }

    /// Load configuration from a specific file path
    ///
    /// Priority (lowest to highest):
    /// 1. Default values
    /// 2. Custom config file (specified path)
    /// 3. Environment variables
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        tracing::debug!("Loading configuration from custom path: {:?}", path);

        if !path.exists() {
            anyhow::bail!("Config file not found: {:?}", path);
        }
        let config = Self::merge_from_file(Self::default(), path)?;
        Ok(Self::apply_env_overrides(config))
    }

    /// Get the system config path: ~/.config/riskcheck/config.toml
    pub fn system_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("riskcheck").join("config.toml"))
    }

    /// Get the local config path: ./riskcheck.toml
    fn local_config_path() -> PathBuf {
        PathBuf::from("./riskcheck.toml")
    }

    /// Load and merge configuration from a TOML file
    fn merge_from_file(base: Self, path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;

        let overlay: toml::Table = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {:?}", path))?;

        Self::merge(base, overlay).with_context(|| format!("Invalid config file: {:?}", path))
    }

    /// Overlay a parsed file onto `base` key by key; keys the file leaves
    /// out keep their current value
    fn merge(base: Self, overlay: toml::Table) -> Result<Self> {
        let toml::Value::Table(mut merged) =
            toml::Value::try_from(&base).context("Failed to serialize config")?
        else {
            anyhow::bail!("Config did not serialize to a table");
        };
        merge_tables(&mut merged, overlay);
        let config: Self = toml::Value::Table(merged).try_into()?;
        Ok(config)
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(mut config: Self) -> Self {
        if let Ok(lang) = std::env::var("RISKCHECK_LANG") {
            config.wizard.lang = lang;
        }

        if let Ok(dir) = std::env::var("RISKCHECK_EXPORT_DIR") {
            config.export.dir = PathBuf::from(dir);
        }

        if let Ok(log_level) = std::env::var("RISKCHECK_LOG_LEVEL") {
            config.logging.level = log_level;
        }

        if let Ok(log_file) = std::env::var("RISKCHECK_LOG_FILE") {
            config.logging.file = Some(PathBuf::from(log_file));
        }

        config
    }

    /// Override the language tag (the `--lang` flag wins over everything)
    pub fn with_lang(mut self, lang: Option<String>) -> Self {
        if let Some(lang) = lang {
            self.wizard.lang = lang;
        }
        self
    }

    /// Locale resolved from the configured language tag; never fails
    pub fn locale(&self) -> Locale {
        Locale::from_lang_attr(&self.wizard.lang)
    }

    pub fn validate(&self) -> Result<()> {
        tracing::debug!("Validating configuration...");

        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.logging.level.as_str()) {
            anyhow::bail!(
                "Invalid log level: {}. Must be one of: {:?}",
                self.logging.level,
                valid_levels
            );
        }

        if self.export.dir.as_os_str().is_empty() {
            anyhow::bail!("Export directory is empty");
        }

        if self.export.dir.is_file() {
            tracing::warn!(
                "Export path {:?} is a file; downloads will fail",
                self.export.dir
            );
        }

        tracing::debug!("Configuration validation passed");
        Ok(())
    }

    /// Save configuration to a file
    pub fn save(&self, path: &Path) -> Result<()> {
        let toml_string =
            toml::to_string_pretty(self).context("Failed to serialize config to TOML")?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory: {:?}", parent))?;
        }

        fs::write(path, toml_string)
            .with_context(|| format!("Failed to write config file: {:?}", path))?;

        tracing::info!("Configuration saved to: {:?}", path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.wizard.lang, "en");
        assert_eq!(config.export.dir, PathBuf::from("."));
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.locale(), Locale::En);
    }

    #[test]
    fn test_config_validation() {
        let config = Config::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation_invalid_log_level() {
        let mut config = Config::default();
        config.logging.level = "invalid".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_empty_export_dir() {
        let mut config = Config::default();
        config.export.dir = PathBuf::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_from_toml() {
        let toml_content = r#"
[wizard]
lang = "ja-JP"

[export]
dir = "/tmp/summaries"

[logging]
level = "debug"
        "#;

        let config: Config = toml::from_str(toml_content).unwrap();
        assert_eq!(config.wizard.lang, "ja-JP");
        assert_eq!(config.locale(), Locale::Ja);
        assert_eq!(config.export.dir, PathBuf::from("/tmp/summaries"));
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: Config = toml::from_str("[logging]\nlevel = \"warn\"\n").unwrap();
        assert_eq!(config.wizard.lang, "en");
        assert_eq!(config.export.dir, PathBuf::from("."));
    }

    #[test]
    fn test_unknown_lang_falls_back() {
        let config = Config::default().with_lang(Some("klingon".to_string()));
        assert_eq!(config.locale(), Locale::En);

        let config = Config::default().with_lang(Some("jp".to_string()));
        assert_eq!(config.locale(), Locale::Ja);

        let config = Config::default().with_lang(None);
        assert_eq!(config.wizard.lang, "en");
    }

    #[test]
    fn test_config_save_and_load() {
        let temp_file = NamedTempFile::new().unwrap();
        let mut config = Config::default();
        config.wizard.lang = "ja".to_string();

        config.save(temp_file.path()).unwrap();

        let contents = std::fs::read_to_string(temp_file.path()).unwrap();
        let loaded_config: Config = toml::from_str(&contents).unwrap();

        assert_eq!(loaded_config.wizard.lang, "ja");
        assert_eq!(loaded_config.logging.level, config.logging.level);
    }

    fn write_toml(contents: &str) -> NamedTempFile {
        let file = NamedTempFile::new().unwrap();
        std::fs::write(file.path(), contents).unwrap();
        file
    }

    #[test]
    fn test_layered_files_keep_untouched_sections() {
        let system = write_toml("[wizard]\nlang = \"ja\"\n\n[logging]\nlevel = \"warn\"\n");
        let local = write_toml("[export]\ndir = \"/tmp/out\"\n");

        let config = Config::merge_from_file(Config::default(), system.path()).unwrap();
        let config = Config::merge_from_file(config, local.path()).unwrap();

        assert_eq!(config.wizard.lang, "ja");
        assert_eq!(config.export.dir, PathBuf::from("/tmp/out"));
        assert_eq!(config.logging.level, "warn");
    }

    #[test]
    fn test_layered_files_merge_within_section() {
        let system = write_toml("[logging]\nlevel = \"debug\"\n");
        let local = write_toml("[logging]\nfile = \"/tmp/riskcheck.log\"\n");

        let config = Config::merge_from_file(Config::default(), system.path()).unwrap();
        let config = Config::merge_from_file(config, local.path()).unwrap();

        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.file, Some(PathBuf::from("/tmp/riskcheck.log")));
    }

    #[test]
    fn test_layered_file_with_wrong_type_is_rejected() {
        let bad = write_toml("[wizard]\nlang = 5\n");
        assert!(Config::merge_from_file(Config::default(), bad.path()).is_err());
    }

    #[test]
    fn test_load_from_missing_path() {
        assert!(Config::load_from_path("/definitely/not/here/riskcheck.toml").is_err());
    }

    #[test]
    fn test_system_config_path() {
        let path = Config::system_config_path();
        assert!(path.is_some());
        let path = path.unwrap();
        assert!(path.to_string_lossy().contains("riskcheck"));
        assert!(path.to_string_lossy().ends_with("config.toml"));
    }

    #[test]
    fn test_local_config_path() {
        assert_eq!(Config::local_config_path(), PathBuf::from("./riskcheck.toml"));
    }
}
