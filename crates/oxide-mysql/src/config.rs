//! Parser configuration.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use oxide_mysql_grammar::lexer::DEFAULT_CHARSETS;
use oxide_mysql_grammar::sql_mode::SqlMode;
use oxide_mysql_grammar::version::{ServerVersion, VersionFamily};

use crate::keywords;

/// Errors raised while loading a [`ParserConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The settings document is not valid JSON or has the wrong shape.
    #[error("invalid parser configuration: {0}")]
    Json(#[from] serde_json::Error),
}

/// Settings applied to both the tokenizer and the tree builder.
///
/// ```
/// use oxide_mysql::ParserConfig;
///
/// let config = ParserConfig::from_json(r#"{"version": "5.7.30"}"#).unwrap();
/// assert_eq!(config.version, "5.7.30");
/// assert!(config.charsets.iter().any(|c| c == "utf8mb4"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Server version as `"MAJOR.MINOR.PATCH"`.
    pub version: String,
    /// Active SQL modes.
    pub mode: SqlMode,
    /// Charset names accepted as `_name` introducers.
    pub charsets: Vec<String>,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            version: "8.0.0".to_string(),
            mode: SqlMode::NO_MODE,
            charsets: DEFAULT_CHARSETS.iter().map(ToString::to_string).collect(),
        }
    }
}

impl ParserConfig {
    /// Creates a configuration for the given server version with default settings otherwise.
    #[must_use]
    pub fn with_version(version: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            ..Self::default()
        }
    }

    /// Loads a configuration from a JSON document. Missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Json`] when the document cannot be deserialized.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// The numeric version handed to the grammar engine.
    ///
    /// An unreadable version string maps to `0`, which satisfies no version gate.
    #[must_use]
    pub fn server_version(&self) -> ServerVersion {
        keywords::server_version(&self.version).unwrap_or(ServerVersion(0))
    }

    /// The keyword family of the configured version, `None` when unknown.
    #[must_use]
    pub fn version_family(&self) -> Option<VersionFamily> {
        keywords::version_family(&self.version)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ParserConfig::default();
        assert_eq!(config.version, "8.0.0");
        assert_eq!(config.mode, SqlMode::NO_MODE);
        assert_eq!(config.server_version(), ServerVersion::V8_0);
        assert_eq!(config.version_family(), Some(VersionFamily::V8_0));
    }

    #[test]
    fn test_from_json_fills_missing_fields() {
        let config = ParserConfig::from_json(r#"{"version": "5.6.40", "charsets": ["latin1"]}"#)
            .unwrap();
        assert_eq!(config.server_version(), ServerVersion(50640));
        assert_eq!(config.charsets, vec!["latin1".to_string()]);
        assert_eq!(config.mode, SqlMode::NO_MODE);
    }

    #[test]
    fn test_from_json_rejects_bad_documents() {
        let err = ParserConfig::from_json("{\"version\": 8}").unwrap_err();
        assert!(err.to_string().starts_with("invalid parser configuration"));
        assert!(ParserConfig::from_json("not json").is_err());
    }

    #[test]
    fn test_round_trips_through_json() {
        let config = ParserConfig {
            mode: SqlMode::ANSI_QUOTES | SqlMode::IGNORE_SPACE,
            ..ParserConfig::with_version("5.7.22")
        };
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(ParserConfig::from_json(&json).unwrap(), config);
    }

    #[test]
    fn test_unknown_version() {
        let config = ParserConfig::with_version("next");
        assert_eq!(config.server_version(), ServerVersion(0));
        assert_eq!(config.version_family(), None);
    }
}
