//! CLI configuration file (`dolphine.toml`).

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use dolphine_core::service::storefront::{DEFAULT_USER_AGENT, DEFAULT_VISITOR};
use dolphine_core::{QuoteSettings, StorefrontSettings};
use serde::{Deserialize, Serialize};

/// Config file picked up from the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "dolphine.toml";
pub const DEFAULT_DB_FILE: &str = "dolphine.sqlite3";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    pub store: StoreConfig,
    pub logging: LoggingConfig,
    pub quote: QuoteSettings,
    pub visitor: VisitorConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub db_path: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from(DEFAULT_DB_FILE),
        }
    }
}

/// File logging stays off unless `dir` is set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `trace|debug|info|warn|error`; the build-mode default when absent.
    pub level: Option<String>,
    /// Absolute directory for rolling log files.
    pub dir: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VisitorConfig {
    pub id: String,
    pub user_agent: String,
}

impl Default for VisitorConfig {
    fn default() -> Self {
        Self {
            id: DEFAULT_VISITOR.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

/// Values given on the command line; they win over the file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub db_path: Option<PathBuf>,
    pub log_level: Option<String>,
    pub log_dir: Option<PathBuf>,
}

impl CliConfig {
    pub fn parse(text: &str) -> Result<Self> {
        toml::from_str(text).context("Failed to parse TOML config")
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("Invalid config file: {}", path.display()))
    }

    /// Loads `explicit` when given (it must exist), otherwise `dolphine.toml`
    /// from `cwd` when present, otherwise the defaults.
    pub fn discover(explicit: Option<&Path>, cwd: &Path) -> Result<Self> {
        if let Some(path) = explicit {
            if !path.exists() {
                bail!("Config file not found: {}", path.display());
            }
            return Self::load(path);
        }

        let candidate = cwd.join(DEFAULT_CONFIG_FILE);
        if candidate.is_file() {
            return Self::load(&candidate);
        }
        Ok(Self::default())
    }

    pub fn apply_overrides(&mut self, overrides: &Overrides) {
        if let Some(db_path) = &overrides.db_path {
            self.store.db_path = db_path.clone();
        }
        if let Some(level) = &overrides.log_level {
            self.logging.level = Some(level.clone());
        }
        if let Some(dir) = &overrides.log_dir {
            self.logging.dir = Some(dir.clone());
        }
    }

    pub fn storefront_settings(&self) -> StorefrontSettings {
        StorefrontSettings {
            quote: self.quote.clone(),
            visitor: self.visitor.id.clone(),
            user_agent: self.visitor.user_agent.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{CliConfig, Overrides, DEFAULT_CONFIG_FILE, DEFAULT_DB_FILE};
    use std::path::PathBuf;

    #[test]
    fn empty_file_uses_defaults() {
        let config = CliConfig::parse("").unwrap();
        assert_eq!(config, CliConfig::default());
        assert_eq!(config.store.db_path, PathBuf::from(DEFAULT_DB_FILE));
        assert_eq!(config.quote.whatsapp_number, "1234567890");
        assert_eq!(config.visitor.id, "local");
        assert!(config.logging.dir.is_none());
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let config = CliConfig::parse(
            r#"
            [quote]
            whatsapp_number = "15550001111"

            [logging]
            level = "warn"
            "#,
        )
        .unwrap();
        assert_eq!(config.quote.whatsapp_number, "15550001111");
        assert_eq!(config.quote.business_name, "Dolphine Wood Machineries");
        assert_eq!(config.logging.level.as_deref(), Some("warn"));
        assert_eq!(config.store.db_path, PathBuf::from(DEFAULT_DB_FILE));
    }

    #[test]
    fn unknown_types_are_rejected() {
        assert!(CliConfig::parse("[store]\ndb_path = 3").is_err());
    }

    #[test]
    fn overrides_win_over_file_values() {
        let mut config = CliConfig::parse("[store]\ndb_path = \"shop.sqlite3\"").unwrap();
        config.apply_overrides(&Overrides {
            db_path: Some(PathBuf::from("other.sqlite3")),
            log_level: Some("debug".to_string()),
            log_dir: None,
        });
        assert_eq!(config.store.db_path, PathBuf::from("other.sqlite3"));
        assert_eq!(config.logging.level.as_deref(), Some("debug"));
        assert!(config.logging.dir.is_none());
    }

    #[test]
    fn discover_reads_default_file_from_cwd() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(
            CliConfig::discover(None, dir.path()).unwrap(),
            CliConfig::default()
        );

        std::fs::write(
            dir.path().join(DEFAULT_CONFIG_FILE),
            "[visitor]\nid = \"showroom\"\n",
        )
        .unwrap();
        let config = CliConfig::discover(None, dir.path()).unwrap();
        assert_eq!(config.visitor.id, "showroom");
        assert_eq!(config.storefront_settings().visitor, "showroom");
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        assert!(CliConfig::discover(Some(&missing), dir.path()).is_err());
    }
}
