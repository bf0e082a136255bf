//! Store configuration.
//!
//! Configuration can be loaded from:
//! - A TOML file (default: ~/.config/navocab/store.toml)
//! - Environment variables (`NAVOCAB_*`)
//!
//! # Example
//!
//! ```rust,no_run
//! use navocab_store::config::StoreConfig;
//!
//! // Load from default path or fall back to env vars
//! let config = StoreConfig::load().expect("Failed to load config");
//!
//! // Or build one in code
//! let config = StoreConfig::new().location("/var/lib/navocab").purge(true);
//! ```

use std::env;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use regex::Regex;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, info};

use navocab_core::defaults;

use crate::triple_store::resolve_format;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

impl From<ConfigError> for navocab_core::Error {
    fn from(e: ConfigError) -> Self {
        navocab_core::Error::Config(e.to_string())
    }
}

/// Where the triples live.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum StorageLocation {
    /// Process-local store, gone when the process exits.
    #[default]
    Memory,
    /// On-disk store that persists across invocations.
    Path(PathBuf),
}

impl StorageLocation {
    /// Interpret a storage identifier: `"default"` and `":memory:"` mean
    /// in-memory, anything else is a directory.
    pub fn parse(s: &str) -> Self {
        let s = s.trim();
        if s.is_empty() || s == defaults::STORE_LOCATION || s == defaults::MEMORY_LOCATION {
            Self::Memory
        } else {
            Self::Path(PathBuf::from(s))
        }
    }

    pub fn is_persistent(&self) -> bool {
        matches!(self, Self::Path(_))
    }
}

impl fmt::Display for StorageLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Memory => write!(f, "{}", defaults::MEMORY_LOCATION),
            Self::Path(p) => write!(f, "{}", p.display()),
        }
    }
}

/// Triple store configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Storage location.
    pub location: StorageLocation,
    /// IRI of the named graph holding the dataset.
    pub identifier: String,
    /// Clear the dataset when the store is opened.
    pub purge: bool,
    /// Source format used when a document's extension says nothing.
    pub format: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            location: StorageLocation::Memory,
            identifier: defaults::STORE_IDENTIFIER.to_string(),
            purge: false,
            format: defaults::FORMAT.to_string(),
        }
    }
}

impl StoreConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the storage location (`"default"` keeps the store in memory).
    pub fn location(mut self, location: impl AsRef<str>) -> Self {
        self.location = StorageLocation::parse(location.as_ref());
        self
    }

    /// Set the storage location to a directory.
    pub fn path(mut self, path: impl Into<PathBuf>) -> Self {
        self.location = StorageLocation::Path(path.into());
        self
    }

    /// Set the dataset identifier.
    pub fn identifier(mut self, identifier: impl Into<String>) -> Self {
        self.identifier = identifier.into();
        self
    }

    /// Clear the dataset on open.
    pub fn purge(mut self, purge: bool) -> Self {
        self.purge = purge;
        self
    }

    /// Set the default source format.
    pub fn format(mut self, format: impl Into<String>) -> Self {
        self.format = format.into();
        self
    }

    /// Get the default config file path.
    ///
    /// Returns: ~/.config/navocab/store.toml
    pub fn default_config_path() -> PathBuf {
        let mut path = dirs::config_dir().unwrap_or_else(|| PathBuf::from(".config"));
        path.push(defaults::CONFIG_DIR);
        path.push(defaults::CONFIG_FILE);
        path
    }

    /// Load configuration from the default path, falling back to environment variables.
    pub fn load() -> ConfigResult<Self> {
        let path = Self::default_config_path();

        if path.exists() {
            info!("Loading store config from: {}", path.display());
            Self::from_file(&path)
        } else {
            debug!(
                "Config file not found at {}, using environment variables",
                path.display()
            );
            let config = Self::from_env();
            config.validate()?;
            Ok(config)
        }
    }

    /// Load configuration from a TOML file with a `[store]` table.
    pub fn from_file(path: &Path) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse configuration from TOML text.
    pub fn from_toml(content: &str) -> ConfigResult<Self> {
        let content = substitute_env_vars(content);

        #[derive(Deserialize)]
        struct TomlRoot {
            store: TomlStoreConfig,
        }

        #[derive(Deserialize)]
        struct TomlStoreConfig {
            #[serde(default)]
            location: Option<String>,
            #[serde(default)]
            identifier: Option<String>,
            #[serde(default)]
            purge: Option<bool>,
            #[serde(default)]
            format: Option<String>,
        }

        let root: TomlRoot = toml::from_str(&content)?;
        let store = root.store;
        let default = Self::default();

        let config = Self {
            location: store
                .location
                .as_deref()
                .map(StorageLocation::parse)
                .unwrap_or(default.location),
            identifier: store.identifier.unwrap_or(default.identifier),
            purge: store.purge.unwrap_or(default.purge),
            format: store.format.unwrap_or(default.format),
        };

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            location: env::var(defaults::ENV_STORE)
                .map(|s| StorageLocation::parse(&s))
                .unwrap_or(default.location),
            identifier: env::var(defaults::ENV_STORE_ID).unwrap_or(default.identifier),
            purge: env::var(defaults::ENV_PURGE)
                .map(|v| v == "true" || v == "1")
                .unwrap_or(default.purge),
            format: env::var(defaults::ENV_FORMAT).unwrap_or(default.format),
        }
    }

    /// Validate the configuration.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.identifier.trim().is_empty() {
            return Err(ConfigError::Validation(
                "Store identifier cannot be empty".to_string(),
            ));
        }

        if !self.identifier.contains("://") && !self.identifier.starts_with("urn:") {
            return Err(ConfigError::Validation(format!(
                "Store identifier must be an absolute IRI, got: {}",
                self.identifier
            )));
        }

        if resolve_format(&self.format).is_err() {
            return Err(ConfigError::Validation(format!(
                "Unknown source format: {}",
                self.format
            )));
        }

        Ok(())
    }
}

/// Substitute environment variables in the format ${VAR_NAME}.
fn substitute_env_vars(content: &str) -> String {
    static VAR: OnceLock<Regex> = OnceLock::new();
    let re = VAR.get_or_init(|| {
        Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}").expect("static regex is valid")
    });
    re.replace_all(content, |caps: &regex::Captures| {
        let var_name = &caps[1];
        env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
    })
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = StoreConfig::default();
        assert_eq!(config.location, StorageLocation::Memory);
        assert_eq!(config.identifier, defaults::STORE_IDENTIFIER);
        assert!(!config.purge);
        assert_eq!(config.format, "text/turtle");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_location_parse() {
        assert_eq!(StorageLocation::parse("default"), StorageLocation::Memory);
        assert_eq!(StorageLocation::parse(":memory:"), StorageLocation::Memory);
        assert_eq!(StorageLocation::parse(""), StorageLocation::Memory);
        assert_eq!(
            StorageLocation::parse("/tmp/vocab"),
            StorageLocation::Path(PathBuf::from("/tmp/vocab"))
        );
        assert!(StorageLocation::parse("/tmp/vocab").is_persistent());
    }

    #[test]
    fn test_builder() {
        let config = StoreConfig::new()
            .location("/tmp/vocab")
            .identifier("https://example.net/dataset")
            .purge(true)
            .format("ttl");
        assert!(config.location.is_persistent());
        assert_eq!(config.identifier, "https://example.net/dataset");
        assert!(config.purge);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_relative_identifier() {
        let config = StoreConfig::new().identifier("vocabulary");
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn test_validate_rejects_empty_identifier() {
        let config = StoreConfig::new().identifier("  ");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_unknown_format() {
        let config = StoreConfig::new().format("application/x-unknown");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_from_toml() {
        let config = StoreConfig::from_toml(
            r#"
            [store]
            location = "/var/lib/navocab"
            identifier = "https://example.net/dataset"
            purge = true
            "#,
        )
        .unwrap();
        assert_eq!(
            config.location,
            StorageLocation::Path(PathBuf::from("/var/lib/navocab"))
        );
        assert_eq!(config.identifier, "https://example.net/dataset");
        assert!(config.purge);
        assert_eq!(config.format, defaults::FORMAT);
    }

    #[test]
    fn test_from_toml_defaults_missing_fields() {
        let config = StoreConfig::from_toml("[store]\n").unwrap();
        assert_eq!(config, StoreConfig::default());
    }

    #[test]
    fn test_from_toml_invalid() {
        let result = StoreConfig::from_toml("[store\nlocation = 1");
        assert!(matches!(result, Err(ConfigError::TomlParse(_))));
    }

    #[test]
    fn test_env_var_substitution_with_value() {
        env::set_var("NAVOCAB_TEST_SUBSTITUTION_DIR", "/srv/vocab");
        let result = substitute_env_vars("location = \"${NAVOCAB_TEST_SUBSTITUTION_DIR}\"");
        env::remove_var("NAVOCAB_TEST_SUBSTITUTION_DIR");
        assert_eq!(result, "location = \"/srv/vocab\"");
    }

    #[test]
    fn test_env_var_substitution_missing() {
        let content = "location = \"${NAVOCAB_NONEXISTENT_TEST_VAR_12345}\"";
        assert_eq!(substitute_env_vars(content), content);
    }

    #[test]
    fn test_config_error_into_core_error() {
        let err: navocab_core::Error = ConfigError::Validation("bad".into()).into();
        assert!(matches!(err, navocab_core::Error::Config(_)));
    }
}
