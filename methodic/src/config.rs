//! Namespace configuration.
//!
//! A configuration can be built in code or read from a TOML document:
//!
//! ```toml
//! name = "geometry"
//! primitive_default = true
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Configuration for a [`Namespace`](crate::Namespace).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NamespaceConfig {
    /// Name of the namespace, used in diagnostics.
    pub name: String,

    /// Let primitive receivers fall back to the universal default when their
    /// kind has no implementation. Off by default: a primitive only matches
    /// its own kind tag.
    pub primitive_default: bool,
}

impl Default for NamespaceConfig {
    fn default() -> Self {
        Self {
            name: "<unnamed>".to_string(),
            primitive_default: false,
        }
    }
}

impl NamespaceConfig {
    /// Create a configuration with default options and the given name.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Parse a configuration from TOML. Missing keys take their defaults.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(source)?)
    }

    /// Read a configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let source = fs::read_to_string(path)?;
        Self::from_toml_str(&source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = NamespaceConfig::default();
        assert_eq!(config.name, "<unnamed>");
        assert!(!config.primitive_default);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = NamespaceConfig::from_toml_str(r#"name = "geometry""#).unwrap();
        assert_eq!(config, NamespaceConfig::named("geometry"));
    }

    #[test]
    fn test_full_toml() {
        let config = NamespaceConfig::from_toml_str(
            "name = \"lenient\"\nprimitive_default = true\n",
        )
        .unwrap();
        assert_eq!(config.name, "lenient");
        assert!(config.primitive_default);
    }

    #[test]
    fn test_invalid_toml() {
        let err = NamespaceConfig::from_toml_str("primitive_default = \"yes\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "name = \"from-file\"").unwrap();

        let config = NamespaceConfig::load(file.path()).unwrap();
        assert_eq!(config.name, "from-file");
        assert!(!config.primitive_default);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = NamespaceConfig::load(dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
