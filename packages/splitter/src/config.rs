//! Configuration and shared constants for the report filters.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SplitterError};

/// Environment variable consulted by [`FilterConfig::from_env`].
pub const SOURCE_ENV_VAR: &str = "SPLITTER_SOURCE";

/// Tag appended to a record whose embedded document could not be parsed.
pub const PARSE_FAILURE_TAG: &str = "_xmlparsefailure";

/// Record field holding the list of tags.
pub const TAGS_FIELD: &str = "tags";

/// Record field holding the derived record's type.
pub const TYPE_FIELD: &str = "type";

/// Record field holding the serialized sub-tree a record was derived from.
pub const MESSAGE_FIELD: &str = "message";

/// Filter configuration.
///
/// The filters recognize exactly one option: the name of the record field
/// holding the base64-encoded XML document.
///
/// ```yaml
/// source: report
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FilterConfig {
    /// Name of the input field holding the encoded document.
    pub source: String,
}

impl FilterConfig {
    /// Create a configuration for the given source field.
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
        }
    }

    /// Parse and validate a YAML configuration.
    ///
    /// # Examples
    /// ```
    /// use report_splitter::config::FilterConfig;
    ///
    /// let config = FilterConfig::from_yaml_str("source: report").unwrap();
    /// assert_eq!(config.source, "report");
    ///
    /// assert!(FilterConfig::from_yaml_str("source: report\nfield: x").is_err());
    /// ```
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml_ng::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a YAML configuration file.
    pub fn from_yaml_file(path: &Path) -> Result<Self> {
        let yaml = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&yaml)
    }

    /// Build the configuration from the `SPLITTER_SOURCE` environment variable.
    pub fn from_env() -> Result<Self> {
        let source = std::env::var(SOURCE_ENV_VAR)
            .map_err(|_| SplitterError::InvalidConfig(format!("{SOURCE_ENV_VAR} not set")))?;
        let config = Self::new(source);
        config.validate()?;
        Ok(config)
    }

    /// Check that the source field name is usable.
    pub fn validate(&self) -> Result<()> {
        if self.source.trim().is_empty() {
            return Err(SplitterError::InvalidConfig(
                "source must name a record field".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_yaml_str() {
        let config = FilterConfig::from_yaml_str("source: xml_b64\n").unwrap();
        assert_eq!(config, FilterConfig::new("xml_b64"));
    }

    #[test]
    fn test_from_yaml_rejects_unknown_option() {
        let err = FilterConfig::from_yaml_str("source: a\ntarget: b\n").unwrap_err();
        assert!(matches!(err, SplitterError::ConfigParse(_)));
    }

    #[test]
    fn test_from_yaml_requires_source() {
        assert!(FilterConfig::from_yaml_str("{}").is_err());
    }

    #[test]
    fn test_validate_rejects_blank_source() {
        let err = FilterConfig::new("  ").validate().unwrap_err();
        assert!(matches!(err, SplitterError::InvalidConfig(_)));
    }

    #[test]
    fn test_from_yaml_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("splitter.yaml");
        std::fs::write(&path, "source: payload\n").unwrap();

        let config = FilterConfig::from_yaml_file(&path).unwrap();
        assert_eq!(config.source, "payload");
    }

    #[test]
    fn test_from_yaml_file_missing() {
        let err = FilterConfig::from_yaml_file(Path::new("/nonexistent/splitter.yaml"))
            .unwrap_err();
        assert!(matches!(err, SplitterError::Io(_)));
    }
}
