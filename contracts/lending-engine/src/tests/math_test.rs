//! Fixed-point arithmetic tests: scaled multiply/divide, integer powers,
//! basis-points application and price conversions.

use crate::errors::ProtocolError;
use crate::math::{
    convert_at_prices, div_scaled, mul_bps, mul_scaled, pow_scaled, value_at_price, ONE,
    PRICE_SCALE, SCALE,
};

#[test]
fn test_mul_scaled_basic() {
    assert_eq!(mul_scaled(2 * ONE, 3 * ONE).unwrap(), 6 * ONE);
    assert_eq!(mul_scaled(ONE / 2, ONE / 2).unwrap(), ONE / 4);
    assert_eq!(mul_scaled(0, 5 * ONE).unwrap(), 0);
}

#[test]
fn test_mul_scaled_truncates_toward_zero() {
    // 1 * (1/SCALE) scaled = 1/SCALE, truncates to 0.
    assert_eq!(mul_scaled(1, 1).unwrap(), 0);
}

#[test]
fn test_mul_scaled_overflow() {
    assert_eq!(mul_scaled(i128::MAX, 2 * ONE), Err(ProtocolError::Overflow));
}

#[test]
fn test_div_scaled_basic() {
    assert_eq!(div_scaled(6 * ONE, 3 * ONE).unwrap(), 2 * ONE);
    assert_eq!(div_scaled(ONE, 4 * ONE).unwrap(), ONE / 4);
}

#[test]
fn test_div_scaled_by_zero() {
    assert_eq!(div_scaled(ONE, 0), Err(ProtocolError::DivisionByZero));
}

#[test]
fn test_pow_scaled_zero_exponent_is_one() {
    assert_eq!(pow_scaled(3 * ONE, 0).unwrap(), ONE);
    assert_eq!(pow_scaled(0, 0).unwrap(), ONE);
}

#[test]
fn test_pow_scaled_integer_base() {
    assert_eq!(pow_scaled(2 * ONE, 10).unwrap(), 1024 * ONE);
    assert_eq!(pow_scaled(ONE, 1_000).unwrap(), ONE);
}

#[test]
fn test_pow_scaled_fractional_base() {
    // 0.5^3 = 0.125
    assert_eq!(pow_scaled(ONE / 2, 3).unwrap(), ONE / 8);
}

#[test]
fn test_mul_bps() {
    assert_eq!(mul_bps(200, 5_000).unwrap(), 100);
    assert_eq!(mul_bps(85, 5_000).unwrap(), 42); // truncation, not rounding
    assert_eq!(mul_bps(1_000, 10_000).unwrap(), 1_000);
    assert_eq!(mul_bps(1_000, 0).unwrap(), 0);
}

#[test]
fn test_value_at_price() {
    // 100 units at $1.50
    assert_eq!(value_at_price(100, 15_000_000).unwrap(), 150);
    assert_eq!(value_at_price(100, PRICE_SCALE).unwrap(), 100);
    assert_eq!(value_at_price(0, PRICE_SCALE).unwrap(), 0);
}

#[test]
fn test_convert_at_prices() {
    // 40 units at $1.00 into an asset priced $1.00
    assert_eq!(convert_at_prices(40, PRICE_SCALE, PRICE_SCALE).unwrap(), 40);
    // 85 units at $1.00 into an asset priced $0.50
    assert_eq!(convert_at_prices(85, PRICE_SCALE, 5_000_000).unwrap(), 170);
    // 42 units at $1.00 into an asset priced $1.05, truncating
    assert_eq!(convert_at_prices(42, PRICE_SCALE, 10_500_000).unwrap(), 40);
}

#[test]
fn test_convert_at_prices_zero_target() {
    assert_eq!(
        convert_at_prices(1, PRICE_SCALE, 0),
        Err(ProtocolError::DivisionByZero)
    );
}

#[test]
fn test_scale_constants() {
    assert_eq!(SCALE, 1_000_000_000_000);
    assert_eq!(ONE, SCALE);
}
