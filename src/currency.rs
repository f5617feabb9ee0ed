//! Conversion between minor currency units and decimal display values
//!
//! The server stores every amount as an integer number of minor units (cents).
//! The command line accepts and prints decimals with two fractional digits.

use anyhow::{anyhow, Result};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

/// Number of fractional digits between minor units and the display value
const MINOR_UNIT_SCALE: u32 = 2;

/// Convert minor units to a decimal display value (exact, scale 2)
#[must_use]
pub fn to_display(minor_units: i64) -> Decimal {
    Decimal::new(minor_units, MINOR_UNIT_SCALE)
}

/// Convert a decimal display value to minor units
///
/// Rounds to the nearest minor unit, ties away from zero, so `0.005`
/// becomes `1` and `-0.005` becomes `-1`.
///
/// # Errors
/// Returns an error if the value does not fit into an `i64` amount of minor units
pub fn from_display(value: Decimal) -> Result<i64> {
    value
        .checked_mul(Decimal::ONE_HUNDRED)
        .map(|scaled| scaled.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero))
        .and_then(|rounded| rounded.to_i64())
        .ok_or_else(|| anyhow!("Amount {value} is out of range"))
}

/// Format minor units for display, followed by the currency symbol
#[must_use]
pub fn format_money(minor_units: i64, symbol: &str) -> String {
    format!("{:.2}{symbol}", to_display(minor_units))
}
