//! Wallet balance display
//!
//! The entry point for presentation code: turns a raw wallet value into
//! `"<localised amount> <symbol>"`. This layer never fails; an unconvertible
//! value is shown as-is and an unknown locale falls back to the configured
//! default.

use crate::amount::AmountInput;
use crate::config::Config;
use crate::convert::mojo_to_coin;
use crate::format::{render, FormatOptions};
use crate::locale;
use crate::units::UnitKind;

/// Formats wallet balances with configured unit settings
#[derive(Debug, Clone)]
pub struct WalletDisplay {
    config: Config,
    options: FormatOptions,
}

impl WalletDisplay {
    pub fn new(config: &Config) -> Self {
        Self {
            config: config.clone(),
            options: FormatOptions::default(),
        }
    }

    pub fn with_options(mut self, options: FormatOptions) -> Self {
        self.options = options;
        self
    }

    /// Human-readable balance
    ///
    /// * `value` - balance in mojos; `None` renders as an empty string
    /// * `unit` - symbol to append, defaulting to the configured one
    /// * `locale_tag` - defaults to the configured locale
    pub fn human_value(
        &self,
        kind: UnitKind,
        value: Option<AmountInput>,
        unit: Option<&str>,
        locale_tag: Option<&str>,
    ) -> String {
        let Some(value) = value else {
            return String::new();
        };

        let settings = self.config.unit(kind);
        let default_locale = self.config.default_locale.as_str();
        let tag = locale_tag.unwrap_or(default_locale);
        let raw = value.to_string();

        let localised = match mojo_to_coin(value, kind, Some(settings.decimals)) {
            Ok(amount) => render(
                &amount,
                &locale::resolve_or(tag, default_locale),
                &self.options,
            ),
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    value = %raw,
                    unit = %kind,
                    "Cannot convert wallet value, showing raw amount"
                );
                raw
            }
        };

        let unit = unit.unwrap_or(&settings.symbol);
        if unit.is_empty() {
            localised
        } else {
            format!("{} {}", localised, unit)
        }
    }
}

impl Default for WalletDisplay {
    fn default() -> Self {
        Self::new(&Config::default())
    }
}
