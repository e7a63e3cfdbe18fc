use chrono::Duration;
use config::{Config, Environment, File, FileFormat};
use error_stack::{Report, ResultExt};
use serde::Deserialize;
use validator::Validate;

use crate::error::SignedUrlError;

pub const ENVIRONMENT_VARIABLE_PREFIX: &str = "SIGNED_URL";
pub const ENVIRONMENT_VARIABLE_SEPARATOR: &str = "__";

const DEFAULT_SETTINGS_TOML: &str = include_str!("../../../signed-url.toml");

#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct FormatterSettings {
    /// Leave query parameters out of the signed canonical form.
    #[serde(default)]
    pub skip_query: bool,
}

#[derive(Debug, Clone, Deserialize, Validate, PartialEq, Eq)]
pub struct SigningSettings {
    #[serde(default = "SigningSettings::default_ttl_secs")]
    #[validate(range(min = 1))]
    pub default_ttl_secs: i64,
}

impl SigningSettings {
    fn default_ttl_secs() -> i64 {
        3600
    }

    #[must_use]
    pub fn default_ttl(&self) -> Duration {
        Duration::seconds(self.default_ttl_secs)
    }
}

impl Default for SigningSettings {
    fn default() -> Self {
        Self {
            default_ttl_secs: Self::default_ttl_secs(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Validate, PartialEq, Eq)]
pub struct Settings {
    #[serde(default)]
    pub formatter: FormatterSettings,
    #[serde(default)]
    #[validate(nested)]
    pub signing: SigningSettings,
}

impl Settings {
    /// Loads the embedded `signed-url.toml` merged with environment overrides.
    ///
    /// # Errors
    ///
    /// Returns [`SignedUrlError::Configuration`] if the merged settings do
    /// not deserialize or fail validation.
    pub fn new() -> Result<Self, Report<SignedUrlError>> {
        Self::from_toml(DEFAULT_SETTINGS_TOML)
    }

    /// Parses settings from TOML, with `SIGNED_URL__*` environment
    /// variables taking precedence, e.g. `SIGNED_URL__FORMATTER__SKIP_QUERY`.
    ///
    /// # Errors
    ///
    /// Returns [`SignedUrlError::Configuration`] if the merged settings do
    /// not deserialize or fail validation.
    pub fn from_toml(toml_str: &str) -> Result<Self, Report<SignedUrlError>> {
        let environment = Environment::default()
            .prefix(ENVIRONMENT_VARIABLE_PREFIX)
            .separator(ENVIRONMENT_VARIABLE_SEPARATOR);

        let toml = File::from_str(toml_str, FileFormat::Toml);
        let config = Config::builder()
            .add_source(toml)
            .add_source(environment)
            .build()
            .change_context(SignedUrlError::Configuration {
                message: "Failed to build configuration sources".into(),
            })?;

        let settings: Self =
            config
                .try_deserialize()
                .change_context(SignedUrlError::Configuration {
                    message: "Failed to deserialize settings".into(),
                })?;

        settings
            .validate()
            .change_context(SignedUrlError::Configuration {
                message: "Settings validation failed".into(),
            })?;

        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::tests::crate_test_settings_str;

    const OVERRIDE_VARS: [&str; 2] = [
        "SIGNED_URL__FORMATTER__SKIP_QUERY",
        "SIGNED_URL__SIGNING__DEFAULT_TTL_SECS",
    ];

    #[test]
    fn test_settings_new() {
        temp_env::with_vars_unset(OVERRIDE_VARS, || {
            let settings = Settings::new().expect("Settings should load from embedded TOML");
            assert!(!settings.formatter.skip_query);
            assert_eq!(settings.signing.default_ttl_secs, 3600);
        });
    }

    #[test]
    fn test_settings_from_valid_toml() {
        temp_env::with_vars_unset(OVERRIDE_VARS, || {
            let settings =
                Settings::from_toml(&crate_test_settings_str()).expect("valid settings");
            assert!(settings.formatter.skip_query);
            assert_eq!(settings.signing.default_ttl_secs, 300);
            assert_eq!(settings.signing.default_ttl(), Duration::minutes(5));
        });
    }

    #[test]
    fn test_settings_empty_toml_uses_defaults() {
        temp_env::with_vars_unset(OVERRIDE_VARS, || {
            let settings = Settings::from_toml("").expect("defaults");
            assert_eq!(settings, Settings::default());
        });
    }

    #[test]
    fn test_settings_invalid_toml_syntax() {
        let err = Settings::from_toml("[formatter\nskip_query = true").expect_err("bad toml");
        assert!(matches!(
            err.current_context(),
            SignedUrlError::Configuration { .. }
        ));
    }

    #[test]
    fn test_settings_wrong_type() {
        temp_env::with_vars_unset(OVERRIDE_VARS, || {
            let err = Settings::from_toml("[signing]\ndefault_ttl_secs = \"soon\"")
                .expect_err("wrong type");
            assert!(matches!(
                err.current_context(),
                SignedUrlError::Configuration { .. }
            ));
        });
    }

    #[test]
    fn test_settings_rejects_non_positive_ttl() {
        temp_env::with_vars_unset(OVERRIDE_VARS, || {
            let err = Settings::from_toml("[signing]\ndefault_ttl_secs = 0").expect_err("zero ttl");
            assert!(matches!(
                err.current_context(),
                SignedUrlError::Configuration { .. }
            ));
            assert!(err.downcast_ref::<validator::ValidationErrors>().is_some());
        });
    }

    #[test]
    fn test_settings_environment_override() {
        temp_env::with_vars(
            [
                ("SIGNED_URL__FORMATTER__SKIP_QUERY", Some("true")),
                ("SIGNED_URL__SIGNING__DEFAULT_TTL_SECS", Some("60")),
            ],
            || {
                let settings = Settings::new().expect("settings with env overrides");
                assert!(settings.formatter.skip_query);
                assert_eq!(settings.signing.default_ttl_secs, 60);
            },
        );
    }
}
