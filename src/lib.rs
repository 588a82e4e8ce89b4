//! Taco unit conversion
//!
//! Converts between mojos (the indivisible base unit) and human-facing TACO
//! or CAT amounts, and renders amounts under a locale's digit grouping and
//! separators.
//!
//! # Guarantees
//!
//! - All arithmetic is exact 256-bit fixed point; floats are only accepted at
//!   the input boundary and are parsed through their decimal representation
//! - Display amounts convert to mojos by truncating toward zero
//! - Conversion errors are hard failures; formatting falls back to a default
//!   locale and never fails
//! - Every operation is a pure function of its arguments; the locale is
//!   always passed explicitly

pub mod amount;
pub mod config;
pub mod convert;
pub mod display;
pub mod format;
pub mod locale;
pub mod units;

mod error;

// Re-export commonly used types
pub use amount::{AmountInput, CoinAmount, Mojos};
pub use config::{Config, UnitSettings, LOCALE_ENV};
pub use convert::{
    cat_to_mojo, coin_to_mojo, coin_to_mojo_checked, coin_to_mojo_strict, convert_units,
    mojo_to_cat, mojo_to_coin, mojo_to_taco, taco_to_mojo, MojoConversion,
};
pub use display::WalletDisplay;
pub use error::{Error, Result};
pub use format::{
    format_localized, format_localized_with, mojo_to_cat_locale_string,
    mojo_to_localized_string, mojo_to_taco_locale_string, try_format_localized, FormatOptions,
};
pub use locale::DEFAULT_LOCALE;
pub use num_format::Locale;
pub use units::{DecimalPlaces, Unit, UnitKind};
