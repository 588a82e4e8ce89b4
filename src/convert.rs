//! Mojo <-> coin conversion
//!
//! `coin = mojos / 10^D` and `mojos = trunc(coin * 10^D)`. Conversion into
//! mojos always truncates toward zero so a user-entered amount can never be
//! rounded up into a larger spend.

use crate::amount::{pow10, AmountInput, CoinAmount, Mojos};
use crate::error::{Error, Result};
use crate::units::{DecimalPlaces, Unit, UnitKind};

/// Result of scaling a decimal amount into base units
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MojoConversion {
    pub mojos: Mojos,
    /// Non-zero digits below one mojo were discarded
    pub truncated: bool,
}

fn scale_to_mojos(amount: &CoinAmount, decimal_places: DecimalPlaces) -> Result<MojoConversion> {
    let target = decimal_places.get();
    let scale = amount.scale();

    if scale <= target {
        let raw = amount
            .raw()
            .checked_mul(pow10(target - scale))
            .ok_or_else(|| {
                Error::InvalidAmount(format!(
                    "{} exceeds the 256-bit range at {} decimal places",
                    amount, target
                ))
            })?;
        return Ok(MojoConversion {
            mojos: Mojos::new(raw),
            truncated: false,
        });
    }

    let divisor = pow10(scale - target);
    Ok(MojoConversion {
        mojos: Mojos::new(amount.raw() / divisor),
        truncated: !(amount.raw() % divisor).is_zero(),
    })
}

/// Convert a base-unit amount into display units
///
/// The result keeps `D` decimal places so formatting can show up to `D`
/// fractional digits.
pub fn mojo_to_coin(
    mojos: impl Into<AmountInput>,
    kind: UnitKind,
    decimal_places: Option<DecimalPlaces>,
) -> Result<CoinAmount> {
    let mojos = Mojos::parse(mojos)?;
    Ok(CoinAmount::from_raw(
        mojos.value(),
        kind.decimal_places(decimal_places),
    ))
}

/// Convert a display amount into base units, truncating toward zero
pub fn coin_to_mojo(
    amount: impl Into<AmountInput>,
    kind: UnitKind,
    decimal_places: Option<DecimalPlaces>,
) -> Result<Mojos> {
    let conversion = coin_to_mojo_checked(amount, kind, decimal_places)?;
    Ok(conversion.mojos)
}

/// Like [`coin_to_mojo`], but reports whether sub-mojo digits were dropped
pub fn coin_to_mojo_checked(
    amount: impl Into<AmountInput>,
    kind: UnitKind,
    decimal_places: Option<DecimalPlaces>,
) -> Result<MojoConversion> {
    let amount = CoinAmount::parse(amount)?;
    let places = kind.decimal_places(decimal_places);
    let conversion = scale_to_mojos(&amount, places)?;

    if conversion.truncated {
        tracing::debug!(
            amount = %amount,
            decimals = places.get(),
            mojos = %conversion.mojos,
            unit = %kind,
            "Truncated sub-mojo digits toward zero"
        );
    }

    Ok(conversion)
}

/// Convert a display amount into base units, refusing to drop digits
pub fn coin_to_mojo_strict(
    amount: impl Into<AmountInput>,
    kind: UnitKind,
    decimal_places: Option<DecimalPlaces>,
) -> Result<Mojos> {
    let amount = CoinAmount::parse(amount)?;
    let places = kind.decimal_places(decimal_places);
    let conversion = scale_to_mojos(&amount, places)?;

    if conversion.truncated {
        return Err(Error::PrecisionLoss {
            amount: amount.to_string(),
            decimals: places.get(),
        });
    }

    Ok(conversion.mojos)
}

pub fn mojo_to_taco(mojos: impl Into<AmountInput>) -> Result<CoinAmount> {
    mojo_to_coin(mojos, UnitKind::Native, None)
}

pub fn mojo_to_cat(mojos: impl Into<AmountInput>) -> Result<CoinAmount> {
    mojo_to_coin(mojos, UnitKind::Cat, None)
}

pub fn taco_to_mojo(amount: impl Into<AmountInput>) -> Result<Mojos> {
    coin_to_mojo(amount, UnitKind::Native, None)
}

pub fn cat_to_mojo(amount: impl Into<AmountInput>) -> Result<Mojos> {
    coin_to_mojo(amount, UnitKind::Cat, None)
}

/// Re-express an amount given in one display unit in another
///
/// The amount is first brought to whole mojos (truncating toward zero for
/// TACO/CAT input finer than one mojo), then scaled into the target unit,
/// which is always exact.
pub fn convert_units(amount: impl Into<AmountInput>, from: Unit, to: Unit) -> Result<CoinAmount> {
    let amount = CoinAmount::parse(amount)?;
    let conversion = scale_to_mojos(&amount, from.decimal_places())?;

    if conversion.truncated {
        if from == Unit::Mojo {
            return Err(Error::InvalidAmount(format!(
                "{} is not an integer number of mojos",
                amount
            )));
        }
        tracing::debug!(
            amount = %amount,
            from = ?from,
            to = ?to,
            "Truncated sub-mojo digits toward zero"
        );
    }

    Ok(CoinAmount::from_raw(
        conversion.mojos.value(),
        to.decimal_places(),
    ))
}
