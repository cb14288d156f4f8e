//! Render options, loadable from a TOML file
//!
//! ```toml
//! package_url_prefix = "https://pkg.example/"
//! extract_links = true
//!
//! [trim]
//! max_string_size = 80
//!
//! [anchors]
//! suppress_kinds = ["function"]
//! suppress_for_receivers = false
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::doc::{AnchorPolicy, TrimLimits};

/// Errors that can occur when loading render options.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("invalid value for '{0}': {1}")]
    Invalid(&'static str, &'static str),
}

/// Options controlling how a page is rendered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderOptions {
    /// Prefix of package page URLs; a package's URL is the prefix followed by
    /// its import path.
    pub package_url_prefix: String,

    /// Never link identifiers in prose and comments. URLs and RFC
    /// references are still linked.
    pub disable_hotlinking: bool,

    /// Omit the `¶` link after headings.
    pub disable_permalinks: bool,

    /// Collect the bullets under a "Links" heading instead of rendering them.
    pub extract_links: bool,

    /// Literal size thresholds for declarations.
    pub trim: TrimLimits,

    /// Which definition anchors are emitted inline.
    pub anchors: AnchorPolicy,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            package_url_prefix: "/".to_string(),
            disable_hotlinking: false,
            disable_permalinks: false,
            extract_links: false,
            trim: TrimLimits::default(),
            anchors: AnchorPolicy::default(),
        }
    }
}

impl RenderOptions {
    /// Load options from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is invalid.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parse options from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is malformed or a value is out of range.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let options: Self = toml::from_str(content)?;
        options.validate()?;
        Ok(options)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.trim.max_string_size == 0 {
            return Err(ConfigError::Invalid(
                "trim.max_string_size",
                "must be greater than zero",
            ));
        }
        if self.trim.max_elements == 0 {
            return Err(ConfigError::Invalid(
                "trim.max_elements",
                "must be greater than zero",
            ));
        }
        Ok(())
    }

    /// Serialize the options to a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::doc::AnchorKind;

    #[test]
    fn test_empty_config_is_default() {
        let options = RenderOptions::parse("").unwrap();
        assert_eq!(options, RenderOptions::default());
        assert_eq!(options.trim.max_string_size, 125);
        assert_eq!(options.trim.max_elements, 100);
    }

    #[test]
    fn test_parse_full_config() {
        let toml = r#"
package_url_prefix = "https://pkg.example/"
disable_hotlinking = true
extract_links = true

[trim]
max_string_size = 80

[anchors]
suppress_kinds = ["function"]
suppress_for_receivers = false
"#;
        let options = RenderOptions::parse(toml).unwrap();
        assert_eq!(options.package_url_prefix, "https://pkg.example/");
        assert!(options.disable_hotlinking);
        assert!(!options.disable_permalinks);
        assert!(options.extract_links);
        assert_eq!(options.trim.max_string_size, 80);
        assert_eq!(options.trim.max_elements, 100);
        assert_eq!(options.anchors.suppress_kinds, vec![AnchorKind::Function]);
        assert!(!options.anchors.suppress_for_receivers);
    }

    #[test]
    fn test_zero_threshold_is_rejected() {
        let err = RenderOptions::parse("[trim]\nmax_elements = 0\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid("trim.max_elements", _)));
    }

    #[test]
    fn test_unknown_field_is_rejected() {
        let err = RenderOptions::parse("hotlinks = false\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(..)));
    }

    #[test]
    fn test_toml_roundtrip() {
        let mut options = RenderOptions::default();
        options.disable_permalinks = true;
        options.anchors = AnchorPolicy::all();
        let text = options.to_toml_string().unwrap();
        assert_eq!(RenderOptions::parse(&text).unwrap(), options);
    }
}
