//! Error types for unit conversion and formatting

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Invalid decimal places: {0} (expected 0..={})", crate::units::MAX_DECIMAL_PLACES)]
    InvalidDecimalPlaces(i64),

    #[error("Unknown locale: {0}")]
    UnknownLocale(String),

    #[error("Precision loss: {amount} has more than {decimals} fractional digits")]
    PrecisionLoss { amount: String, decimals: u8 },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
