//! Configuration for unit display

use crate::error::{Error, Result};
use crate::locale::{self, DEFAULT_LOCALE};
use crate::units::{DecimalPlaces, UnitKind, CAT, TACO};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Environment variable overriding the default display locale
pub const LOCALE_ENV: &str = "TACO_UNITS_LOCALE";

/// Symbol and precision for one unit family
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitSettings {
    /// Symbol appended to displayed balances
    pub symbol: String,
    /// Decimal places between mojos and the display unit
    pub decimals: DecimalPlaces,
}

impl UnitSettings {
    pub fn native() -> Self {
        Self {
            symbol: TACO.symbol.to_string(),
            decimals: DecimalPlaces::NATIVE,
        }
    }

    pub fn cat() -> Self {
        Self {
            symbol: CAT.symbol.to_string(),
            decimals: DecimalPlaces::CAT,
        }
    }
}

/// Main configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Locale used when a caller supplies none, and the fallback for unknown tags
    pub default_locale: String,
    /// Native coin settings
    pub native: UnitSettings,
    /// CAT token settings
    pub cat: UnitSettings,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_locale: DEFAULT_LOCALE.to_string(),
            native: UnitSettings::native(),
            cat: UnitSettings::cat(),
        }
    }
}

impl Config {
    /// Load a JSON config file and validate it
    pub fn from_file(path: &Path) -> Result<Self> {
        tracing::debug!(path = %path.display(), "Loading config");
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Apply `TACO_UNITS_LOCALE` when set, then re-validate
    pub fn with_env_overrides(self) -> Result<Self> {
        let tag = std::env::var(LOCALE_ENV).ok();
        self.with_locale_override(tag.as_deref())
    }

    /// Replace the default locale with a non-blank `tag` and re-validate
    pub fn with_locale_override(mut self, tag: Option<&str>) -> Result<Self> {
        if let Some(tag) = tag.map(str::trim).filter(|tag| !tag.is_empty()) {
            self.default_locale = tag.to_string();
        }
        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> Result<()> {
        if locale::resolve(&self.default_locale).is_err() {
            return Err(Error::Config(format!(
                "default_locale '{}' is not a supported locale",
                self.default_locale
            )));
        }
        for (name, settings) in [("native", &self.native), ("cat", &self.cat)] {
            if settings.symbol.trim().is_empty() {
                return Err(Error::Config(format!("{}.symbol must not be empty", name)));
            }
        }
        Ok(())
    }

    pub fn unit(&self, kind: UnitKind) -> &UnitSettings {
        match kind {
            UnitKind::Native => &self.native,
            UnitKind::Cat => &self.cat,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn config_deserialize_defaults() {
        let parsed: Config = serde_json::from_value(serde_json::json!({})).expect("parse config");
        assert_eq!(parsed, Config::default());
        assert_eq!(parsed.native.decimals.get(), 12);
        assert_eq!(parsed.cat.decimals.get(), 3);
    }

    #[test]
    fn config_deserialize_explicit() {
        let value = serde_json::json!({
            "default_locale": "de-DE",
            "cat": { "symbol": "SBX", "decimals": 6 }
        });
        let parsed: Config = serde_json::from_value(value).expect("parse config");
        assert_eq!(parsed.default_locale, "de-DE");
        assert_eq!(parsed.cat.symbol, "SBX");
        assert_eq!(parsed.unit(UnitKind::Cat).decimals.get(), 6);
        assert_eq!(parsed.unit(UnitKind::Native).symbol, "TACO");
        assert!(parsed.validate().is_ok());
    }

    #[test]
    fn config_rejects_bad_decimals() {
        let value = serde_json::json!({ "cat": { "symbol": "CAT", "decimals": 64 } });
        assert!(serde_json::from_value::<Config>(value).is_err());
        let value = serde_json::json!({ "native": { "symbol": "TACO", "decimals": -1 } });
        assert!(serde_json::from_value::<Config>(value).is_err());
    }

    #[test]
    fn config_validate_locale_and_symbol() {
        let config = Config {
            default_locale: "xx-ZZ".to_string(),
            ..Config::default()
        };
        assert!(matches!(config.validate(), Err(Error::Config(_))));

        let mut config = Config::default();
        config.native.symbol = " ".to_string();
        assert!(matches!(config.validate(), Err(Error::Config(_))));
    }

    #[test]
    fn config_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "default_locale": "fr-FR" }}"#).unwrap();
        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(config.default_locale, "fr-FR");

        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        assert!(matches!(Config::from_file(file.path()), Err(Error::Json(_))));

        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "default_locale": "xx-ZZ" }}"#).unwrap();
        assert!(matches!(Config::from_file(file.path()), Err(Error::Config(_))));

        let missing = Path::new("/nonexistent/taco-units.json");
        assert!(matches!(Config::from_file(missing), Err(Error::Io(_))));
    }

    #[test]
    fn config_locale_override() {
        let config = Config::default().with_locale_override(Some(" de-DE ")).unwrap();
        assert_eq!(config.default_locale, "de-DE");

        let config = Config::default().with_locale_override(Some("")).unwrap();
        assert_eq!(config.default_locale, DEFAULT_LOCALE);

        assert!(matches!(
            Config::default().with_locale_override(Some("xx-ZZ")),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn config_env_override() {
        // process-wide variable: every case stays in this one test
        std::env::set_var(LOCALE_ENV, "de-DE");
        let accepted = Config::default().with_env_overrides();

        std::env::set_var(LOCALE_ENV, "xx-ZZ");
        let rejected = Config::default().with_env_overrides();

        std::env::remove_var(LOCALE_ENV);
        let unset = Config::default().with_env_overrides();

        assert_eq!(accepted.unwrap().default_locale, "de-DE");
        assert!(matches!(rejected, Err(Error::Config(_))));
        assert_eq!(unset.unwrap().default_locale, DEFAULT_LOCALE);
    }
}
