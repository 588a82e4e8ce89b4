//! Locale-aware amount formatting
//!
//! Renders a [`CoinAmount`] with a locale's grouping and separators. By
//! default up to `scale` fractional digits are shown (the unit's decimal
//! places for converted balances) with trailing zeros trimmed.
//!
//! Formatting is the display boundary: [`format_localized`] never fails and
//! falls back to the default locale for unknown tags. Use
//! [`try_format_localized`] to surface `UnknownLocale` instead.

use crate::amount::{pow10, AmountInput, CoinAmount, MAX_SCALE};
use crate::convert::mojo_to_coin;
use crate::error::Result;
use crate::locale;
use crate::units::{DecimalPlaces, UnitKind};
use alloy::primitives::U256;
use num_format::{Grouping, Locale};
use serde::{Deserialize, Serialize};

/// Fraction-digit and grouping policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormatOptions {
    /// Fractional digits always shown (zero padded)
    pub min_fraction_digits: u8,
    /// Cap on fractional digits; `None` means the amount's own scale.
    /// Values beyond the cap are rounded half away from zero.
    pub max_fraction_digits: Option<u8>,
    /// Insert group separators in the integer part
    pub grouping: bool,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            min_fraction_digits: 0,
            max_fraction_digits: None,
            grouping: true,
        }
    }
}

impl FormatOptions {
    pub fn with_max_fraction_digits(mut self, digits: u8) -> Self {
        self.max_fraction_digits = Some(digits);
        self
    }

    pub fn with_min_fraction_digits(mut self, digits: u8) -> Self {
        self.min_fraction_digits = digits;
        self
    }

    pub fn without_grouping(mut self) -> Self {
        self.grouping = false;
        self
    }
}

/// Render an amount with explicit number symbols
pub fn render(amount: &CoinAmount, locale: &Locale, options: &FormatOptions) -> String {
    let scale = amount.scale();
    let min = options.min_fraction_digits.min(MAX_SCALE);
    let max = options
        .max_fraction_digits
        .unwrap_or(scale)
        .min(MAX_SCALE)
        .max(min);

    let (raw, scale) = if max < scale {
        (round_half_up(amount.raw(), scale - max), max)
    } else {
        (amount.raw(), scale)
    };

    let divisor = pow10(scale);
    let integer = (raw / divisor).to_string();
    let fraction = format!(
        "{:0>width$}",
        (raw % divisor).to_string(),
        width = scale as usize
    );

    let mut fraction = fraction.trim_end_matches('0').to_string();
    while fraction.len() < min as usize {
        fraction.push('0');
    }

    let integer = if options.grouping {
        group_integer(&integer, locale)
    } else {
        integer
    };

    if fraction.is_empty() {
        integer
    } else {
        format!("{}{}{}", integer, locale.decimal(), fraction)
    }
}

/// Drop `digits` trailing decimal digits, rounding half away from zero
fn round_half_up(raw: U256, digits: u8) -> U256 {
    let divisor = pow10(digits);
    let quotient = raw / divisor;
    let remainder = raw % divisor;
    if remainder >= divisor - remainder {
        quotient + U256::from(1u8)
    } else {
        quotient
    }
}

/// Insert the locale's group separators into a string of ASCII digits
fn group_integer(digits: &str, locale: &Locale) -> String {
    let secondary = match locale.grouping() {
        Grouping::Standard => 3,
        Grouping::Indian => 2,
        Grouping::Posix => return digits.to_string(),
    };
    let len = digits.len();
    if len <= 3 {
        return digits.to_string();
    }

    let (head, tail) = digits.split_at(len - 3);
    let mut groups = vec![tail];
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(secondary);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();
    groups.join(locale.separator())
}

/// Format under a locale, failing with `UnknownLocale` for unsupported tags
pub fn try_format_localized(
    amount: &CoinAmount,
    locale_tag: &str,
    options: &FormatOptions,
) -> Result<String> {
    let locale = locale::resolve(locale_tag)?;
    Ok(render(amount, &locale, options))
}

/// Format under a locale with the default options; never fails
pub fn format_localized(amount: &CoinAmount, locale_tag: &str) -> String {
    format_localized_with(amount, locale_tag, &FormatOptions::default())
}

/// Format under a locale with explicit options; never fails
pub fn format_localized_with(
    amount: &CoinAmount,
    locale_tag: &str,
    options: &FormatOptions,
) -> String {
    render(amount, &locale::resolve_or_default(locale_tag), options)
}

/// Convert base units and format the result for display
pub fn mojo_to_localized_string(
    mojos: impl Into<AmountInput>,
    kind: UnitKind,
    locale_tag: &str,
    decimal_places: Option<DecimalPlaces>,
) -> Result<String> {
    let amount = mojo_to_coin(mojos, kind, decimal_places)?;
    Ok(format_localized(&amount, locale_tag))
}

pub fn mojo_to_taco_locale_string(mojos: impl Into<AmountInput>, locale_tag: &str) -> Result<String> {
    mojo_to_localized_string(mojos, UnitKind::Native, locale_tag, None)
}

pub fn mojo_to_cat_locale_string(mojos: impl Into<AmountInput>, locale_tag: &str) -> Result<String> {
    mojo_to_localized_string(mojos, UnitKind::Cat, locale_tag, None)
}
