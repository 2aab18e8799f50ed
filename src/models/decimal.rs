//! Fixed-point bounds for market numerics.
//!
//! Every price-like field carries a declared (precision, scale). Values
//! are rounded to the declared scale; a value whose integer digits do not
//! fit is rejected instead of silently truncated.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy)]
pub struct FixedSpec {
    pub precision: u32,
    pub scale: u32,
}

pub const CRYPTO_PRICE: FixedSpec = FixedSpec { precision: 18, scale: 8 };
pub const STOCK_PRICE: FixedSpec = FixedSpec { precision: 18, scale: 4 };
pub const MARKET_CAP: FixedSpec = FixedSpec { precision: 20, scale: 2 };
pub const PERCENT: FixedSpec = FixedSpec { precision: 10, scale: 4 };
pub const FOREX_RATE: FixedSpec = FixedSpec { precision: 18, scale: 8 };
pub const ALERT_TARGET: FixedSpec = FixedSpec { precision: 18, scale: 8 };

/// Round `value` to the declared scale, rejecting magnitudes whose
/// integer digits do not fit the declared precision.
pub fn fit(value: Decimal, spec: FixedSpec) -> Result<Decimal> {
    let rounded = value.round_dp_with_strategy(spec.scale, RoundingStrategy::MidpointAwayFromZero);

    let integer_part = rounded.abs().trunc();
    let integer_digits = if integer_part.is_zero() {
        0
    } else {
        integer_part.normalize().to_string().len() as u32
    };

    if integer_digits > spec.precision - spec.scale {
        return Err(Error::Precision(format!(
            "{value} does not fit ({}, {})",
            spec.precision, spec.scale
        )));
    }

    Ok(rounded)
}
