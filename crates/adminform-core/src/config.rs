//! Form configuration.
//!
//! ```toml
//! validate_on_blur = true
//! validate_on = "blur"
//! destroy_on_unregister = false
//! ```

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// When field errors are recomputed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidateOn {
    /// On registration, initialization and every change.
    #[default]
    Change,
    /// When a field loses focus.
    Blur,
    /// Only when the form is submitted.
    Submit,
}

/// Behaviour switches shared by a form and its inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FormConfig {
    /// Show a field error as soon as the field has been blurred, even if it
    /// was never focused through the form.
    pub validate_on_blur: bool,
    /// Validation trigger.
    pub validate_on: ValidateOn,
    /// Drop a field's value when its last input unregisters.
    pub destroy_on_unregister: bool,
}

impl FormConfig {
    /// Default config file name.
    pub const CONFIG_FILE: &'static str = "adminform.toml";

    /// Defaults: change-triggered validation, touched-only error display.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set [`FormConfig::validate_on_blur`].
    #[must_use]
    pub const fn validate_on_blur(mut self, enabled: bool) -> Self {
        self.validate_on_blur = enabled;
        self
    }

    /// Set the validation trigger.
    #[must_use]
    pub const fn validate_on(mut self, trigger: ValidateOn) -> Self {
        self.validate_on = trigger;
        self
    }

    /// Set [`FormConfig::destroy_on_unregister`].
    #[must_use]
    pub const fn destroy_on_unregister(mut self, enabled: bool) -> Self {
        self.destroy_on_unregister = enabled;
        self
    }

    /// Parse from a TOML string. Missing keys take their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] if the TOML is invalid.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml_str)?;
        log::debug!("loaded form config: {config:?}");
        Ok(config)
    }

    /// Serialize to a TOML string.
    #[must_use]
    pub fn to_toml(&self) -> String {
        toml::to_string_pretty(self).unwrap_or_default()
    }

    /// Load from a file.
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read or parsed.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml(&contents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = FormConfig::default();
        assert!(!config.validate_on_blur);
        assert_eq!(config.validate_on, ValidateOn::Change);
        assert!(!config.destroy_on_unregister);
    }

    #[test]
    fn test_from_toml_partial() {
        let config = FormConfig::from_toml("validate_on_blur = true").expect("valid");
        assert!(config.validate_on_blur);
        assert_eq!(config.validate_on, ValidateOn::Change);
    }

    #[test]
    fn test_from_toml_full() {
        let config = FormConfig::from_toml(
            r#"
validate_on_blur = false
validate_on = "submit"
destroy_on_unregister = true
"#,
        )
        .expect("valid");
        assert_eq!(
            config,
            FormConfig::new()
                .validate_on(ValidateOn::Submit)
                .destroy_on_unregister(true)
        );
    }

    #[test]
    fn test_from_toml_invalid() {
        assert!(matches!(
            FormConfig::from_toml("validate_on = \"sometimes\""),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_toml_roundtrip() {
        let original = FormConfig::new().validate_on_blur(true).validate_on(ValidateOn::Blur);
        let parsed = FormConfig::from_toml(&original.to_toml()).expect("valid");
        assert_eq!(parsed, original);
    }

    #[test]
    fn test_load_missing_file() {
        let err = FormConfig::load_from_file(Path::new("/nonexistent/adminform.toml"))
            .expect_err("missing file");
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
