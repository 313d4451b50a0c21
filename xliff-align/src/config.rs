//! Configuration for alignment runs and XLIFF output
//!
//! Every field has a default, so a JSON config file only needs the keys it
//! wants to override:
//!
//! ```json
//! {
//!     "source_language": "en-GB",
//!     "target_language": "fr-FR",
//!     "xliff": { "extension_prefix": "src" }
//! }
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{AlignError, AlignResult};

/// Verbosity of the log output
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerbosityLevel {
    /// Errors only
    Silent = 0,
    /// Per-pair summaries and warnings (default)
    Normal = 1,
    /// Traversal detail
    Verbose = 2,
}

impl VerbosityLevel {
    /// Default `tracing` filter directive for this level
    pub fn filter_directive(&self) -> &'static str {
        match self {
            VerbosityLevel::Silent => "error",
            VerbosityLevel::Normal => "info",
            VerbosityLevel::Verbose => "debug",
        }
    }
}

impl Default for VerbosityLevel {
    fn default() -> Self {
        VerbosityLevel::Normal
    }
}

/// Settings for the custom extension attribute carrying the source path
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct XliffOptions {
    pub extension_prefix: String,
    pub extension_namespace: String,
    pub path_attribute: String,
    /// Indent with tabs; spaces otherwise
    pub indent_with_tabs: bool,
}

impl Default for XliffOptions {
    fn default() -> Self {
        Self {
            extension_prefix: "srcxml".to_string(),
            extension_namespace: "urn:custom:extension:1.0".to_string(),
            path_attribute: "originxpath".to_string(),
            indent_with_tabs: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlignConfig {
    pub source_language: String,
    pub target_language: String,
    /// File extensions picked up when scanning a source directory
    pub extensions: Vec<String>,
    pub xliff: XliffOptions,
    pub verbosity: VerbosityLevel,
}

impl Default for AlignConfig {
    fn default() -> Self {
        Self {
            source_language: "en-US".to_string(),
            target_language: String::new(),
            extensions: vec!["xml".to_string(), "html".to_string()],
            xliff: XliffOptions::default(),
            verbosity: VerbosityLevel::Normal,
        }
    }
}

impl AlignConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_source_language(&mut self, language: &str) -> &mut Self {
        self.source_language = language.to_string();
        self
    }

    pub fn with_target_language(&mut self, language: &str) -> &mut Self {
        self.target_language = language.to_string();
        self
    }

    pub fn with_verbosity(&mut self, verbosity: VerbosityLevel) -> &mut Self {
        self.verbosity = verbosity;
        self
    }

    pub fn with_xliff_options(&mut self, options: XliffOptions) -> &mut Self {
        self.xliff = options;
        self
    }

    /// Check the settings needed to write XLIFF output
    pub fn validate(&self) -> AlignResult<()> {
        validate_language(&self.source_language)?;
        validate_language(&self.target_language)?;
        if self.xliff.extension_prefix.is_empty() || self.xliff.path_attribute.is_empty() {
            return Err(AlignError::ConfigError(
                "extension prefix and path attribute must not be empty".to_string(),
            ));
        }
        if self.xliff.extension_namespace.trim().is_empty() {
            return Err(AlignError::ConfigError(
                "extension namespace must not be empty".to_string(),
            ));
        }
        if self.extensions.is_empty() {
            return Err(AlignError::ConfigError(
                "at least one document extension is required".to_string(),
            ));
        }
        Ok(())
    }
}

/// Validate that a language code is in acceptable format
///
/// Accepts BCP 47 style codes such as `fr`, `en-US`, `zh-Hans` or `de_DE`:
/// ASCII alphanumerics, hyphens and underscores only.
pub fn validate_language(language: &str) -> AlignResult<()> {
    if language.is_empty() {
        return Err(AlignError::InvalidLanguage(
            "Language code is empty".to_string(),
        ));
    }

    if !language
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(AlignError::InvalidLanguage(format!(
            "Invalid characters in language code: {}",
            language
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AlignConfig::default();
        assert_eq!(config.source_language, "en-US");
        assert_eq!(config.extensions, vec!["xml", "html"]);
        assert_eq!(config.xliff.extension_prefix, "srcxml");
        assert_eq!(config.xliff.extension_namespace, "urn:custom:extension:1.0");
        assert_eq!(config.verbosity, VerbosityLevel::Normal);
    }

    #[test]
    fn test_builder_methods() {
        let mut config = AlignConfig::new();
        config
            .with_source_language("en-GB")
            .with_target_language("de-DE")
            .with_verbosity(VerbosityLevel::Verbose);
        assert_eq!(config.source_language, "en-GB");
        assert_eq!(config.target_language, "de-DE");
        assert_eq!(config.verbosity, VerbosityLevel::Verbose);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: AlignConfig = serde_json::from_str(
            r#"{"target_language": "fr", "xliff": {"extension_prefix": "src"}}"#,
        )
        .unwrap();
        assert_eq!(config.target_language, "fr");
        assert_eq!(config.source_language, "en-US");
        assert_eq!(config.xliff.extension_prefix, "src");
        assert_eq!(config.xliff.path_attribute, "originxpath");
    }

    #[test]
    fn test_missing_target_language_is_invalid() {
        let config = AlignConfig::default();
        assert!(matches!(
            config.validate(),
            Err(AlignError::InvalidLanguage(_))
        ));
    }

    #[test]
    fn test_empty_extension_namespace_is_invalid() {
        let mut config = AlignConfig::new();
        config.with_target_language("fr");
        config.xliff.extension_namespace = String::new();
        match config.validate() {
            Err(AlignError::ConfigError(message)) => assert!(message.contains("namespace")),
            other => panic!("Expected ConfigError, got {:?}", other),
        }

        config.xliff.extension_namespace = "urn:example:loc".to_string();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_language_codes() {
        assert!(validate_language("fr").is_ok());
        assert!(validate_language("en-US").is_ok());
        assert!(validate_language("zh-Hans").is_ok());
        assert!(validate_language("de_DE").is_ok());
        assert!(validate_language("").is_err());
        assert!(validate_language("en@US").is_err());
        assert!(validate_language("fr FR").is_err());
    }

    #[test]
    fn test_verbosity_directives() {
        assert_eq!(VerbosityLevel::Silent.filter_directive(), "error");
        assert_eq!(VerbosityLevel::Normal.filter_directive(), "info");
        assert_eq!(VerbosityLevel::Verbose.filter_directive(), "debug");
        assert!(VerbosityLevel::Silent < VerbosityLevel::Verbose);
    }
}
