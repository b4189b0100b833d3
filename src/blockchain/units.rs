//! Native-currency unit conversions at 18 decimals.
//!
//! Formatting trims trailing zeros but always keeps one fractional digit,
//! so `1 ether` renders as `1.0` and `1.5 ether` as `1.5`.

use alloy::primitives::utils::{format_units, parse_units};
use alloy::primitives::U256;
use thiserror::Error;

/// Decimals of every native currency handled here.
pub const ETHER_DECIMALS: u8 = 18;

/// Errors from parsing a decimal amount.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UnitsError {
    #[error("empty amount")]
    Empty,

    #[error("invalid amount '{0}': expected digits with an optional decimal point")]
    Invalid(String),

    #[error("amount '{0}' has more than 18 fractional digits")]
    TooPrecise(String),

    #[error("amount '{0}' does not fit in 256 bits")]
    Overflow(String),
}

/// Format a wei amount as a decimal ether string.
pub fn format_ether(wei: U256) -> String {
    // 18 is a valid unit, formatting cannot fail
    let padded = format_units(wei, ETHER_DECIMALS).unwrap_or_else(|_| wei.to_string());
    trim_fraction(&padded)
}

/// Parse a decimal ether string into wei.
pub fn parse_ether(ether: &str) -> Result<U256, UnitsError> {
    let amount = ether.trim();
    if amount.is_empty() {
        return Err(UnitsError::Empty);
    }

    let (whole, fraction) = amount.split_once('.').unwrap_or((amount, ""));
    let digits_only = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    if (whole.is_empty() && fraction.is_empty()) || !digits_only(whole) || !digits_only(fraction) {
        return Err(UnitsError::Invalid(amount.to_string()));
    }
    if fraction.len() > ETHER_DECIMALS as usize {
        return Err(UnitsError::TooPrecise(amount.to_string()));
    }

    let normalized = format!(
        "{}.{}",
        if whole.is_empty() { "0" } else { whole },
        if fraction.is_empty() { "0" } else { fraction }
    );
    parse_units(&normalized, ETHER_DECIMALS)
        .map(|parsed| parsed.get_absolute())
        .map_err(|_| UnitsError::Overflow(amount.to_string()))
}

/// Conversion surface attached to every connection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EtherUnits;

impl EtherUnits {
    pub fn decimals(&self) -> u8 {
        ETHER_DECIMALS
    }

    pub fn format_ether(&self, wei: U256) -> String {
        format_ether(wei)
    }

    pub fn parse_ether(&self, ether: &str) -> Result<U256, UnitsError> {
        parse_ether(ether)
    }
}

fn trim_fraction(padded: &str) -> String {
    match padded.split_once('.') {
        Some((whole, fraction)) => {
            let fraction = fraction.trim_end_matches('0');
            let fraction = if fraction.is_empty() { "0" } else { fraction };
            format!("{whole}.{fraction}")
        }
        None => format!("{padded}.0"),
    }
}
