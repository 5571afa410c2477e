//! # Fixed-Point Math
//!
//! Deterministic scaled-integer arithmetic for rates, prices and ratios.
//! No floating point anywhere in the engine.
//!
//! ## Scales
//! Three scales coexist, each chosen for the quantity it carries:
//! - `SCALE` (1e12) — interest rates and the borrow index. Wide enough that
//!   a per-day rate term at realistic APRs never truncates to zero.
//! - `PRICE_SCALE` (1e7) — oracle prices ($1.50 = 15_000_000).
//! - `BPS_SCALE` (1e4) — risk factors, utilization and the health factor
//!   (health 1.0 = 10_000).
//!
//! All operations use checked `i128` arithmetic. Overflow yields
//! `ProtocolError::Overflow` rather than wrapping; a zero divisor yields
//! `ProtocolError::DivisionByZero`. Sign-producing subtractions are the
//! caller's responsibility to check.

use crate::errors::ProtocolError;

/// Scale for interest rates and the borrow index (1e12 = 1.0).
pub const SCALE: i128 = 1_000_000_000_000;

/// One full unit at `SCALE`.
pub const ONE: i128 = SCALE;

/// Oracle price scale (1e7 = 1.0).
pub const PRICE_SCALE: i128 = 10_000_000;

/// Basis-points scale (10_000 = 100%).
pub const BPS_SCALE: i128 = 10_000;

/// Multiply two `SCALE`-based quantities: `a * b / SCALE`.
pub fn mul_scaled(a: i128, b: i128) -> Result<i128, ProtocolError> {
    a.checked_mul(b)
        .ok_or(ProtocolError::Overflow)?
        .checked_div(SCALE)
        .ok_or(ProtocolError::DivisionByZero)
}

/// Divide two `SCALE`-based quantities: `a * SCALE / b`.
pub fn div_scaled(a: i128, b: i128) -> Result<i128, ProtocolError> {
    if b == 0 {
        return Err(ProtocolError::DivisionByZero);
    }
    a.checked_mul(SCALE)
        .ok_or(ProtocolError::Overflow)?
        .checked_div(b)
        .ok_or(ProtocolError::DivisionByZero)
}

/// Raise a `SCALE`-based factor to an integer power by square-and-multiply.
///
/// Used for compounding an interest factor over whole periods. `exp = 0`
/// returns `ONE` exactly.
pub fn pow_scaled(base: i128, mut exp: u64) -> Result<i128, ProtocolError> {
    let mut result = ONE;
    let mut acc = base;
    while exp > 0 {
        if exp & 1 == 1 {
            result = mul_scaled(result, acc)?;
        }
        exp >>= 1;
        if exp > 0 {
            acc = mul_scaled(acc, acc)?;
        }
    }
    Ok(result)
}

/// Apply a basis-points factor to an amount: `amount * bps / 10_000`.
pub fn mul_bps(amount: i128, bps: i128) -> Result<i128, ProtocolError> {
    amount
        .checked_mul(bps)
        .ok_or(ProtocolError::Overflow)?
        .checked_div(BPS_SCALE)
        .ok_or(ProtocolError::DivisionByZero)
}

/// Value of `amount` units at a `PRICE_SCALE` price: `amount * price / 1e7`.
pub fn value_at_price(amount: i128, price: i128) -> Result<i128, ProtocolError> {
    amount
        .checked_mul(price)
        .ok_or(ProtocolError::Overflow)?
        .checked_div(PRICE_SCALE)
        .ok_or(ProtocolError::DivisionByZero)
}

/// Convert an amount of one asset into another at the given prices:
/// `amount * from_price / to_price`.
pub fn convert_at_prices(
    amount: i128,
    from_price: i128,
    to_price: i128,
) -> Result<i128, ProtocolError> {
    if to_price == 0 {
        return Err(ProtocolError::DivisionByZero);
    }
    amount
        .checked_mul(from_price)
        .ok_or(ProtocolError::Overflow)?
        .checked_div(to_price)
        .ok_or(ProtocolError::DivisionByZero)
}
