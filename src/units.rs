//! Unit registry
//!
//! Decimal-place constants and symbols for the native coin and CAT tokens.
//! A decimal-place count `D` means one display unit equals `10^D` mojos.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Mojos per TACO are `10^NATIVE_DECIMALS`
pub const NATIVE_DECIMALS: u8 = 12;

/// Default CAT precision (1 CAT = 1000 mojos)
pub const CAT_DECIMALS: u8 = 3;

/// Upper bound accepted for any decimal-place count
pub const MAX_DECIMAL_PLACES: u8 = 32;

/// Unit metadata
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnitInfo {
    /// Display symbol (e.g., "TACO", "CAT")
    pub symbol: &'static str,
    /// Number of decimals between the base unit and the display unit
    pub decimals: u8,
}

impl UnitInfo {
    pub const fn new(symbol: &'static str, decimals: u8) -> Self {
        Self { symbol, decimals }
    }
}

pub const TACO: UnitInfo = UnitInfo::new("TACO", NATIVE_DECIMALS);
pub const CAT: UnitInfo = UnitInfo::new("CAT", CAT_DECIMALS);
pub const MOJO: UnitInfo = UnitInfo::new("MOJO", 0);

/// Wallet unit family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum UnitKind {
    /// The native coin
    #[default]
    Native,
    /// Chia-style asset tokens with their own precision
    Cat,
}

impl UnitKind {
    pub fn info(&self) -> UnitInfo {
        match self {
            UnitKind::Native => TACO,
            UnitKind::Cat => CAT,
        }
    }

    pub fn default_decimal_places(&self) -> DecimalPlaces {
        DecimalPlaces(self.info().decimals)
    }

    /// Effective decimal places: the override when given, the unit default otherwise
    pub fn decimal_places(&self, decimal_places: Option<DecimalPlaces>) -> DecimalPlaces {
        decimal_places.unwrap_or_else(|| self.default_decimal_places())
    }
}

impl fmt::Display for UnitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnitKind::Native => write!(f, "native"),
            UnitKind::Cat => write!(f, "cat"),
        }
    }
}

/// Display units accepted by [`crate::convert::convert_units`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    Taco,
    Mojo,
    Cat,
}

impl Unit {
    pub fn info(&self) -> UnitInfo {
        match self {
            Unit::Taco => TACO,
            Unit::Mojo => MOJO,
            Unit::Cat => CAT,
        }
    }

    pub fn decimal_places(&self) -> DecimalPlaces {
        DecimalPlaces(self.info().decimals)
    }

    pub fn parse(name: &str) -> Result<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "taco" | "xtc" => Ok(Unit::Taco),
            "mojo" | "mojos" => Ok(Unit::Mojo),
            "cat" | "colouredcoin" | "coloredcoin" => Ok(Unit::Cat),
            other => Err(Error::Config(format!(
                "Unknown unit: {}. Use 'taco', 'mojo', or 'cat'",
                other
            ))),
        }
    }
}

/// A validated decimal-place count in `0..=MAX_DECIMAL_PLACES`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct DecimalPlaces(u8);

impl DecimalPlaces {
    pub const NATIVE: DecimalPlaces = DecimalPlaces(NATIVE_DECIMALS);
    pub const CAT: DecimalPlaces = DecimalPlaces(CAT_DECIMALS);

    pub fn new(places: i64) -> Result<Self> {
        if (0..=MAX_DECIMAL_PLACES as i64).contains(&places) {
            Ok(Self(places as u8))
        } else {
            Err(Error::InvalidDecimalPlaces(places))
        }
    }

    pub fn get(&self) -> u8 {
        self.0
    }
}

impl TryFrom<i64> for DecimalPlaces {
    type Error = Error;

    fn try_from(places: i64) -> Result<Self> {
        Self::new(places)
    }
}

impl From<DecimalPlaces> for u8 {
    fn from(places: DecimalPlaces) -> u8 {
        places.0
    }
}

impl fmt::Display for DecimalPlaces {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
