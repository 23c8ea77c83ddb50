#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]

//! Odbind Configuration
//!
//! This crate provides configuration management for Odbind.
//! It handles loading, saving, and validating configuration files that specify:
//! - The schema being bound and the namespaces generated for it
//! - Connection settings baked into the generated base adapter
//! - Type translation rules (cursor mode, per-family overrides)
//! - Code generation toggles and entity styles
//! - Logging configuration
//!
//! Configuration is stored in TOML format. Every section is optional; missing
//! keys take the defaults below. A loaded configuration is immutable for the
//! duration of a generation run.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use types::{TranslationError, TranslationOptions, TypeTranslator};

/// Errors that can occur when loading, saving or validating configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk
    #[error("Failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),
    /// Failed to parse the TOML configuration file
    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
    /// Failed to serialize configuration to TOML format
    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
    /// Configuration file was not found at the specified path
    #[error("Config file not found at: {0}")]
    NotFound(PathBuf),
    /// Could not locate the user's configuration directory
    #[error("Could not find user config directory")]
    ConfigDirUnavailable,
    /// The translation section is invalid
    #[error("Invalid translation options: {0}")]
    Translation(#[from] TranslationError),
    /// A setting holds a value that cannot be used
    #[error("Invalid setting {key}: {reason}")]
    Invalid {
        /// Offending key
        key: &'static str,
        /// What is wrong with it
        reason: String,
    },
}

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Schema and namespace settings
    pub schema: SchemaConfig,
    /// Connection settings used by the generated base adapter
    pub database: DatabaseConfig,
    /// Type translation rules
    pub translation: TranslationOptions,
    /// Code generation settings
    pub codegen: CodegenConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Schema and namespace settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchemaConfig {
    /// Schema name; defaults to the name recorded in the metadata
    pub name: Option<String>,
    /// Root namespace of all generated code
    pub base_namespace: String,
    /// Filter that restricted which objects were extracted
    pub filter: Option<String>,
    /// Whether the filter becomes part of namespaces and class names
    pub include_filter_in_naming: bool,
}

impl Default for SchemaConfig {
    fn default() -> Self {
        Self {
            name: None,
            base_namespace: "Schema".to_string(),
            filter: None,
            include_filter_in_naming: false,
        }
    }
}

/// Connection settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// TNS instance (data source)
    pub instance: String,
    /// Login
    pub login: String,
    /// Password
    pub password: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self { instance: "ORCL".to_string(), login: String::new(), password: String::new() }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error) or a full filter directive
    pub level: String,
    /// Log file path (optional)
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self { Self { level: "info".to_string(), file: None } }
}

/// Which compilation units are generated
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerateToggles {
    /// Package bindings
    pub packages: bool,
    /// Object type entities
    pub object_types: bool,
    /// Table entities
    pub tables: bool,
    /// View entities
    pub views: bool,
    /// Abstract base adapter
    pub base_adapter: bool,
    /// Abstract base entities
    pub base_entities: bool,
}

impl Default for GenerateToggles {
    fn default() -> Self {
        Self {
            packages: true,
            object_types: true,
            tables: true,
            views: true,
            base_adapter: true,
            base_entities: true,
        }
    }
}

/// Decoration of one kind of entity class
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EntityStyle {
    /// Emit `[Serializable()]`
    pub serializable: bool,
    /// Emit the class as `partial`
    pub partial: bool,
    /// Emit `[DataContract]` on the class and `[DataMember]` on members
    pub data_contract: bool,
    /// Emit `[XmlElement]` on members
    pub xml_element: bool,
    /// Ancestor class replacing the generated base entity
    pub ancestor: Option<String>,
}

impl Default for EntityStyle {
    fn default() -> Self {
        Self { serializable: true, partial: false, data_contract: false, xml_element: false, ancestor: None }
    }
}

/// Styles per entity kind
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EntityStyles {
    /// Records declared in packages
    pub package_records: EntityStyle,
    /// Object types
    pub object_types: EntityStyle,
    /// Tables
    pub tables: EntityStyle,
    /// Views
    pub views: EntityStyle,
}

/// Code generation configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodegenConfig {
    /// Where to write generated compilation units
    pub output_dir: PathBuf,
    /// Auto-implemented properties instead of explicit backing fields
    pub auto_properties: bool,
    /// Capacity reserved for associative arrays read back from the server
    pub max_associative_array_size: u32,
    /// Also emit the dynamic-mapping overload for strongly typed cursors
    pub dynamic_mapping_for_typed_cursor: bool,
    /// Emit records whose origin is outside the generated scope in every package using them
    pub duplicate_records_outside_scope: bool,
    /// Prefix of local variables in generated methods
    pub local_variable_prefix: String,
    /// Namespace of data contracts
    pub data_contract_namespace: Option<String>,
    /// Which units to generate
    pub generate: GenerateToggles,
    /// Entity styles
    pub style: EntityStyles,
}

impl Default for CodegenConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("generated"),
            auto_properties: true,
            max_associative_array_size: 1000,
            dynamic_mapping_for_typed_cursor: false,
            duplicate_records_outside_scope: false,
            local_variable_prefix: "__".to_string(),
            data_contract_namespace: None,
            generate: GenerateToggles::default(),
            style: EntityStyles::default(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file at `path`
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        let config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Load configuration from `path` if given, otherwise from the default path if
    /// a file exists there, otherwise use the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) if path.exists() => Self::from_file(path),
            Some(path) => Err(ConfigError::NotFound(path.to_path_buf())),
            None => match Self::default_path() {
                Ok(default) if default.exists() => Self::from_file(default),
                _ => Ok(Self::default()),
            },
        }
    }

    /// Save this configuration as a pretty-printed TOML file at `path`
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let contents = toml::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Returns the default config file path:
    /// `{config_dir()}/odbind/config.toml`
    pub fn default_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir().ok_or(ConfigError::ConfigDirUnavailable)?.join("odbind");
        Ok(config_dir.join("config.toml"))
    }

    /// Builds the type translator for this configuration.
    pub fn translator(&self) -> Result<TypeTranslator, ConfigError> {
        Ok(TypeTranslator::new(self.translation.clone())?)
    }

    /// Rejects settings a generation run cannot use.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.translator()?;

        let prefix = &self.codegen.local_variable_prefix;
        if prefix.is_empty() || !prefix.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
            return Err(ConfigError::Invalid {
                key: "codegen.local_variable_prefix",
                reason: format!("'{}' is not an identifier prefix", prefix),
            });
        }
        if self.codegen.max_associative_array_size == 0 {
            return Err(ConfigError::Invalid {
                key: "codegen.max_associative_array_size",
                reason: "must be at least 1".to_string(),
            });
        }
        if self.schema.base_namespace.trim().is_empty() {
            return Err(ConfigError::Invalid {
                key: "schema.base_namespace",
                reason: "must not be empty".to_string(),
            });
        }
        Ok(())
    }
}
