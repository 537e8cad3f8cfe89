// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! General purpose utilities.

use color::Color;

pub mod color;

/// Basis points in one whole unit of gas price.
const BASIS_POINTS: u128 = 10_000;

/// Pretty-prints a gas amount.
pub fn format_gas(gas: u128) -> String {
    let text = format!("{gas} gas");
    if gas <= 3_000_000 {
        text.mint()
    } else if gas <= 7_000_000 {
        text.yellow()
    } else {
        text.pink()
    }
}

/// Scales a suggested gas price by `1 + bonus`.
///
/// The bonus is applied in basis points so the arithmetic stays in integers. Callers are expected
/// to have validated `bonus` with [`check_gas_price_bonus`].
pub fn apply_gas_price_bonus(gas_price: u128, bonus: f64) -> u128 {
    let factor = ((1.0 + bonus) * BASIS_POINTS as f64).round() as u128;
    gas_price.saturating_mul(factor) / BASIS_POINTS
}

pub fn check_gas_price_bonus(bonus: f64) -> Result<f64, InvalidBonus> {
    if bonus.is_finite() && bonus >= 0.0 {
        Ok(bonus)
    } else {
        Err(InvalidBonus(bonus))
    }
}

#[derive(Debug, thiserror::Error)]
#[error("gas price bonus must be finite and non-negative (got {0})")]
pub struct InvalidBonus(pub f64);

pub fn decode0x(text: impl AsRef<str>) -> Result<Vec<u8>, hex::FromHexError> {
    let text = text.as_ref();
    let text = text.trim();
    let text = text.strip_prefix("0x").unwrap_or(text);
    hex::decode(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gas_price_bonus() {
        assert_eq!(apply_gas_price_bonus(100, 0.0), 100);
        assert_eq!(apply_gas_price_bonus(100, 0.85), 185);
        assert_eq!(apply_gas_price_bonus(20_000_000_000, 0.85), 37_000_000_000);
        assert_eq!(apply_gas_price_bonus(u128::MAX, 1.0), u128::MAX / BASIS_POINTS);
    }

    #[test]
    fn rejects_bad_bonus() {
        assert!(check_gas_price_bonus(0.85).is_ok());
        assert!(check_gas_price_bonus(-0.1).is_err());
        assert!(check_gas_price_bonus(f64::NAN).is_err());
        assert!(check_gas_price_bonus(f64::INFINITY).is_err());
    }

    #[test]
    fn decodes_hex_with_prefix() {
        assert_eq!(decode0x(" 0x0a0b\n").unwrap(), vec![0x0a, 0x0b]);
        assert_eq!(decode0x("ff").unwrap(), vec![0xff]);
        assert!(decode0x("0xzz").is_err());
    }
}
