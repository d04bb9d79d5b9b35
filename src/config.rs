//! [`Settings`]-related definitions.

use std::time::Duration;

use config::{builder::DefaultState, ConfigBuilder, ConfigError};
use serde::Deserialize;

use crate::i18n::Locale;

/// Connection loader settings
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Locale of user-facing error messages.
    pub locale: Locale,

    /// Upper bound on one store round trip, scan and iteration included.
    #[serde(with = "humantime_serde")]
    pub store_timeout: Option<Duration>,
}

impl Settings {
    /// Creates new [`Settings`] by:
    /// - loading them from the provided `path` (if any);
    /// - merging them with `CONNECTIONS_*` environment variables (if any);
    /// - using default values for missing fields.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn new(path: impl AsRef<str>) -> Result<Self, ConfigError> {
        ConfigBuilder::<DefaultState>::default()
            .add_source(config::File::with_name(path.as_ref()).required(false))
            .add_source(config::Environment::with_prefix("CONNECTIONS"))
            .build()?
            .try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::{Config, File, FileFormat};

    fn from_toml(toml: &str) -> Result<Settings, ConfigError> {
        Config::builder()
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()?
            .try_deserialize()
    }

    #[test]
    fn test_defaults() {
        let settings = from_toml("").unwrap();
        assert_eq!(settings.locale, Locale::En);
        assert_eq!(settings.store_timeout, None);
    }

    #[test]
    fn test_locale_and_timeout() {
        let toml = "locale = \"fr\"\nstore_timeout = \"1s 500ms\"";
        let settings = from_toml(toml).unwrap();
        assert_eq!(settings.locale, Locale::Fr);
        assert_eq!(settings.store_timeout, Some(Duration::from_millis(1500)));
    }

    #[test]
    fn test_unknown_locale_is_rejected() {
        assert!(from_toml("locale = \"de\"").is_err());
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let settings = Settings::new("does/not/exist").unwrap();
        assert_eq!(settings.store_timeout, None);
    }
}
