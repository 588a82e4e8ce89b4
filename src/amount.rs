//! Exact amount types
//!
//! Values arrive from an untyped boundary as integers, floats or strings.
//! Every one of them is normalised into a 256-bit integer plus a decimal
//! scale before any arithmetic happens, so no binary floating point ever
//! touches a fund amount.

use crate::error::{Error, Result};
use crate::units::DecimalPlaces;
use alloy::primitives::U256;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Largest fractional scale representable: 10^77 is the biggest power of ten below 2^256
pub const MAX_SCALE: u8 = 77;

/// Exponents beyond this are rejected before any arithmetic
const MAX_EXPONENT: i64 = 1_000;

/// 2^53: floats at or above this no longer hold every integer exactly
const MAX_EXACT_FLOAT: f64 = 9_007_199_254_740_992.0;

/// `10^exp` for `exp <= MAX_SCALE`
pub(crate) fn pow10(exp: u8) -> U256 {
    debug_assert!(exp <= MAX_SCALE);
    U256::from(10u8).pow(U256::from(exp))
}

fn checked_pow10(exp: u64) -> Option<U256> {
    U256::from(10u8).checked_pow(U256::from(exp))
}

/// A raw amount as supplied by a caller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AmountInput {
    Unsigned(u64),
    Signed(i64),
    Float(f64),
    Text(String),
}

impl AmountInput {
    /// Normalise into `(digits, scale)` meaning `digits / 10^scale`, with no
    /// trailing fractional zeros
    fn to_decimal(&self) -> Result<(U256, u8)> {
        match self {
            AmountInput::Unsigned(value) => Ok((U256::from(*value), 0)),
            AmountInput::Signed(value) => {
                if *value < 0 {
                    return Err(Error::InvalidAmount(format!("negative amount: {}", value)));
                }
                Ok((U256::from(value.unsigned_abs()), 0))
            }
            AmountInput::Float(value) => {
                if !value.is_finite() {
                    return Err(Error::InvalidAmount(format!("non-finite amount: {}", value)));
                }
                if value.is_sign_negative() && *value != 0.0 {
                    return Err(Error::InvalidAmount(format!("negative amount: {}", value)));
                }
                // JSON integers past u64 arrive here already rounded
                if value.abs() >= MAX_EXACT_FLOAT {
                    return Err(Error::InvalidAmount(format!(
                        "{} is beyond exact float range, pass it as a string",
                        value
                    )));
                }
                // Display for f64 yields the shortest round-trip form without an exponent
                parse_decimal(&format!("{}", value.abs()))
            }
            AmountInput::Text(text) => parse_decimal(text),
        }
    }
}

impl fmt::Display for AmountInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AmountInput::Unsigned(value) => write!(f, "{}", value),
            AmountInput::Signed(value) => write!(f, "{}", value),
            AmountInput::Float(value) => write!(f, "{}", value),
            AmountInput::Text(text) => write!(f, "{}", text),
        }
    }
}

macro_rules! impl_from_int {
    ($variant:ident: $($t:ty),*) => {
        $(
            impl From<$t> for AmountInput {
                fn from(value: $t) -> Self {
                    AmountInput::$variant(value.into())
                }
            }
        )*
    };
}

impl_from_int!(Unsigned: u8, u16, u32, u64);
impl_from_int!(Signed: i8, i16, i32, i64);

impl From<u128> for AmountInput {
    fn from(value: u128) -> Self {
        match u64::try_from(value) {
            Ok(value) => AmountInput::Unsigned(value),
            Err(_) => AmountInput::Text(value.to_string()),
        }
    }
}

impl From<i128> for AmountInput {
    fn from(value: i128) -> Self {
        match i64::try_from(value) {
            Ok(value) => AmountInput::Signed(value),
            Err(_) => AmountInput::Text(value.to_string()),
        }
    }
}

impl From<f64> for AmountInput {
    fn from(value: f64) -> Self {
        AmountInput::Float(value)
    }
}

impl From<&str> for AmountInput {
    fn from(value: &str) -> Self {
        AmountInput::Text(value.to_string())
    }
}

impl From<String> for AmountInput {
    fn from(value: String) -> Self {
        AmountInput::Text(value)
    }
}

impl From<U256> for AmountInput {
    fn from(value: U256) -> Self {
        AmountInput::Text(value.to_string())
    }
}

impl From<Mojos> for AmountInput {
    fn from(value: Mojos) -> Self {
        AmountInput::Text(value.to_string())
    }
}

impl From<&CoinAmount> for AmountInput {
    fn from(value: &CoinAmount) -> Self {
        AmountInput::Text(value.to_string())
    }
}

impl From<CoinAmount> for AmountInput {
    fn from(value: CoinAmount) -> Self {
        AmountInput::from(&value)
    }
}

/// Parse a non-negative decimal string, optionally in scientific notation
fn parse_decimal(text: &str) -> Result<(U256, u8)> {
    let invalid = || {
        Error::InvalidAmount(format!(
            "'{}' is not a non-negative decimal number",
            text
        ))
    };

    let trimmed = text.trim();
    if trimmed.starts_with('-') {
        return Err(Error::InvalidAmount(format!("negative amount: {}", trimmed)));
    }
    let unsigned = trimmed.strip_prefix('+').unwrap_or(trimmed);

    let (mantissa, exponent) = match unsigned.find(|c: char| c == 'e' || c == 'E') {
        Some(idx) => {
            let exponent: i64 = unsigned[idx + 1..].parse().map_err(|_| invalid())?;
            if exponent.abs() > MAX_EXPONENT {
                return Err(invalid());
            }
            (&unsigned[..idx], exponent)
        }
        None => (unsigned, 0),
    };

    let (integer, fraction) = mantissa.split_once('.').unwrap_or((mantissa, ""));
    if integer.is_empty() && fraction.is_empty() {
        return Err(invalid());
    }
    if !integer.bytes().chain(fraction.bytes()).all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    let fraction = fraction.trim_end_matches('0');

    let overflow = || Error::InvalidAmount(format!("{} exceeds the 256-bit range", trimmed));
    let ten = U256::from(10u8);
    let mut digits = U256::ZERO;
    for b in integer.bytes().chain(fraction.bytes()) {
        digits = digits
            .checked_mul(ten)
            .and_then(|d| d.checked_add(U256::from(b - b'0')))
            .ok_or_else(overflow)?;
    }

    if digits.is_zero() {
        return Ok((U256::ZERO, 0));
    }

    let scale = fraction.len() as i64 - exponent;
    if scale < 0 {
        let factor = checked_pow10(scale.unsigned_abs()).ok_or_else(overflow)?;
        let digits = digits.checked_mul(factor).ok_or_else(overflow)?;
        return Ok((digits, 0));
    }

    // Exponents can reintroduce trailing zeros ("1.50e1" -> 15.0)
    let mut digits = digits;
    let mut scale = scale;
    while scale > 0 && (digits % ten).is_zero() {
        digits /= ten;
        scale -= 1;
    }

    if scale > MAX_SCALE as i64 {
        return Err(Error::InvalidAmount(format!(
            "{} has more than {} fractional digits",
            trimmed, MAX_SCALE
        )));
    }

    Ok((digits, scale as u8))
}

/// An amount in the indivisible base unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "AmountInput", into = "String")]
pub struct Mojos(U256);

impl Mojos {
    pub const ZERO: Mojos = Mojos(U256::ZERO);

    pub fn new(value: U256) -> Self {
        Self(value)
    }

    /// Parse an integral, non-negative amount
    ///
    /// `"100.000"` is accepted as 100; `"1.5"` is rejected.
    pub fn parse(input: impl Into<AmountInput>) -> Result<Self> {
        let input = input.into();
        let (digits, scale) = input.to_decimal()?;
        if scale > 0 {
            return Err(Error::InvalidAmount(format!(
                "{} is not an integer number of mojos",
                input
            )));
        }
        Ok(Self(digits))
    }

    pub fn value(&self) -> U256 {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

impl From<u64> for Mojos {
    fn from(value: u64) -> Self {
        Self(U256::from(value))
    }
}

impl From<U256> for Mojos {
    fn from(value: U256) -> Self {
        Self(value)
    }
}

impl TryFrom<AmountInput> for Mojos {
    type Error = Error;

    fn try_from(input: AmountInput) -> Result<Self> {
        Self::parse(input)
    }
}

impl FromStr for Mojos {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl From<Mojos> for String {
    fn from(value: Mojos) -> String {
        value.to_string()
    }
}

impl fmt::Display for Mojos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An exact decimal amount: `raw / 10^scale`
///
/// The scale is kept as constructed (a converted balance keeps the unit's
/// decimal places) and drives the default number of fractional digits when
/// formatting. Comparison is by numeric value, so `1.50` equals `1.5`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(try_from = "AmountInput", into = "String")]
pub struct CoinAmount {
    raw: U256,
    scale: u8,
}

impl CoinAmount {
    pub const ZERO: CoinAmount = CoinAmount {
        raw: U256::ZERO,
        scale: 0,
    };

    /// `raw` base units at the given decimal places
    pub fn from_raw(raw: U256, decimal_places: DecimalPlaces) -> Self {
        Self {
            raw,
            scale: decimal_places.get(),
        }
    }

    /// Parse a non-negative decimal value; the scale is the number of
    /// significant fractional digits
    pub fn parse(input: impl Into<AmountInput>) -> Result<Self> {
        let (raw, scale) = input.into().to_decimal()?;
        Ok(Self { raw, scale })
    }

    pub fn raw(&self) -> U256 {
        self.raw
    }

    pub fn scale(&self) -> u8 {
        self.scale
    }

    pub fn is_zero(&self) -> bool {
        self.raw.is_zero()
    }

    /// Integer part and fractional remainder (in units of `10^-scale`)
    pub fn split(&self) -> (U256, U256) {
        let divisor = pow10(self.scale);
        (self.raw / divisor, self.raw % divisor)
    }
}

impl PartialEq for CoinAmount {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for CoinAmount {}

impl PartialOrd for CoinAmount {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CoinAmount {
    fn cmp(&self, other: &Self) -> Ordering {
        let (a_int, a_frac) = self.split();
        let (b_int, b_frac) = other.split();
        // Fractions stay below 10^MAX_SCALE after rescaling, so this cannot overflow
        let scale = self.scale.max(other.scale);
        let a_frac = a_frac * pow10(scale - self.scale);
        let b_frac = b_frac * pow10(scale - other.scale);
        a_int.cmp(&b_int).then(a_frac.cmp(&b_frac))
    }
}

impl TryFrom<AmountInput> for CoinAmount {
    type Error = Error;

    fn try_from(input: AmountInput) -> Result<Self> {
        Self::parse(input)
    }
}

impl FromStr for CoinAmount {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl From<CoinAmount> for String {
    fn from(value: CoinAmount) -> String {
        value.to_string()
    }
}

/// Plain decimal form: trailing fractional zeros trimmed, integer part always present
impl fmt::Display for CoinAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (integer, fraction) = self.split();
        if fraction.is_zero() {
            return write!(f, "{}", integer);
        }
        let fraction = format!(
            "{:0>width$}",
            fraction.to_string(),
            width = self.scale as usize
        );
        write!(f, "{}.{}", integer, fraction.trim_end_matches('0'))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_decimals() {
        let amount = CoinAmount::parse("1234.50").unwrap();
        assert_eq!(amount.raw(), U256::from(12345u64));
        assert_eq!(amount.scale(), 1);
        assert_eq!(amount.to_string(), "1234.5");

        assert_eq!(CoinAmount::parse(".5").unwrap().to_string(), "0.5");
        assert_eq!(CoinAmount::parse("5.").unwrap().to_string(), "5");
        assert_eq!(CoinAmount::parse("  +007 ").unwrap().to_string(), "7");
        assert_eq!(CoinAmount::parse("0.000").unwrap().to_string(), "0");
    }

    #[test]
    fn test_parse_scientific_notation() {
        assert_eq!(CoinAmount::parse("1.5e3").unwrap().to_string(), "1500");
        assert_eq!(CoinAmount::parse("1.50e1").unwrap().scale(), 0);
        assert_eq!(CoinAmount::parse("25E-4").unwrap().to_string(), "0.0025");
        assert!(CoinAmount::parse("1e").is_err());
        assert!(CoinAmount::parse("1e99999").is_err());
    }

    #[test]
    fn test_parse_rejects_malformed() {
        for bad in ["", ".", "abc", "1.2.3", "1,000", "0x10", "1 000", "NaN", "Infinity"] {
            assert!(
                matches!(CoinAmount::parse(bad), Err(Error::InvalidAmount(_))),
                "expected rejection of {:?}",
                bad
            );
        }
    }

    #[test]
    fn test_parse_rejects_negative() {
        assert!(matches!(CoinAmount::parse("-1"), Err(Error::InvalidAmount(_))));
        assert!(matches!(CoinAmount::parse(-1i64), Err(Error::InvalidAmount(_))));
        assert!(matches!(CoinAmount::parse(-0.5f64), Err(Error::InvalidAmount(_))));
        // negative zero is still zero
        assert!(CoinAmount::parse(-0.0f64).unwrap().is_zero());
    }

    #[test]
    fn test_parse_rejects_non_finite_float() {
        assert!(matches!(CoinAmount::parse(f64::NAN), Err(Error::InvalidAmount(_))));
        assert!(matches!(
            CoinAmount::parse(f64::INFINITY),
            Err(Error::InvalidAmount(_))
        ));
    }

    #[test]
    fn test_parse_float_uses_shortest_representation() {
        assert_eq!(CoinAmount::parse(0.1f64).unwrap().to_string(), "0.1");
        assert_eq!(CoinAmount::parse(1234.5f64).unwrap().to_string(), "1234.5");
    }

    #[test]
    fn test_parse_overflow() {
        let too_big = "1".repeat(80);
        assert!(matches!(
            CoinAmount::parse(too_big.as_str()),
            Err(Error::InvalidAmount(_))
        ));
        let too_fine = format!("0.{}1", "0".repeat(80));
        assert!(matches!(
            CoinAmount::parse(too_fine.as_str()),
            Err(Error::InvalidAmount(_))
        ));
    }

    #[test]
    fn test_mojos_must_be_integral() {
        assert_eq!(Mojos::parse("100.000").unwrap(), Mojos::from(100u64));
        assert_eq!(Mojos::parse("1e3").unwrap(), Mojos::from(1000u64));
        assert!(matches!(Mojos::parse("1.5"), Err(Error::InvalidAmount(_))));
        assert!(matches!(Mojos::parse(0.5f64), Err(Error::InvalidAmount(_))));
    }

    #[test]
    fn test_mojos_beyond_u64() {
        let big = "340282366920938463463374607431768211456"; // 2^128
        assert_eq!(Mojos::parse(big).unwrap().to_string(), big);
        assert_eq!(Mojos::parse(u128::MAX).unwrap().to_string(), u128::MAX.to_string());
    }

    #[test]
    fn test_numeric_comparison_ignores_scale() {
        let a = CoinAmount::from_raw(U256::from(150u64), DecimalPlaces::new(2).unwrap());
        let b = CoinAmount::parse("1.5").unwrap();
        assert_eq!(a, b);
        assert!(CoinAmount::parse("1.49").unwrap() < b);
        assert!(CoinAmount::parse("2").unwrap() > CoinAmount::parse("1.999999").unwrap());
    }

    #[test]
    fn test_amount_input_deserialize() {
        let input: AmountInput = serde_json::from_str("42").unwrap();
        assert_eq!(input, AmountInput::Unsigned(42));
        let input: AmountInput = serde_json::from_str("-7").unwrap();
        assert_eq!(input, AmountInput::Signed(-7));
        let input: AmountInput = serde_json::from_str("1.25").unwrap();
        assert_eq!(input, AmountInput::Float(1.25));
        let input: AmountInput = serde_json::from_str("\"1000000000000\"").unwrap();
        assert_eq!(input, AmountInput::Text("1000000000000".to_string()));
    }

    #[test]
    fn test_serde_as_string() {
        let amount = CoinAmount::parse("0.25").unwrap();
        assert_eq!(serde_json::to_string(&amount).unwrap(), "\"0.25\"");
        let mojos: Mojos = serde_json::from_str("\"250000000000\"").unwrap();
        assert_eq!(mojos, Mojos::from(250_000_000_000u64));
        assert!(serde_json::from_str::<Mojos>("-5").is_err());
    }

    #[test]
    fn test_large_json_numbers_rejected() {
        // u64::MAX + 1 can only be read as a float, which rounds it
        assert!(serde_json::from_str::<Mojos>("18446744073709551617").is_err());
        assert!(serde_json::from_str::<CoinAmount>("123456789012345678901234").is_err());
        assert!(matches!(
            Mojos::parse(9_007_199_254_740_992.0f64),
            Err(Error::InvalidAmount(_))
        ));

        // the same values as strings stay exact
        let mojos: Mojos = serde_json::from_str("\"18446744073709551617\"").unwrap();
        assert_eq!(mojos.to_string(), "18446744073709551617");
        let amount: CoinAmount = serde_json::from_str("\"123456789012345678901234\"").unwrap();
        assert_eq!(amount.to_string(), "123456789012345678901234");

        // integers inside u64 and small floats are still accepted
        let mojos: Mojos = serde_json::from_str("18446744073709551615").unwrap();
        assert_eq!(mojos, Mojos::from(u64::MAX));
        assert_eq!(Mojos::parse(9_007_199_254_740_991.0f64).unwrap().to_string(), "9007199254740991");
    }
}
