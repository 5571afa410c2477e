//! # Interest Accrual
//!
//! Kink-based (piecewise-linear) borrow rate driven by reserve utilization,
//! with lazy per-account settlement through a global borrow index.
//!
//! ## Rate model (bps per year)
//! - Below the kink: `rate = base + slope1 * utilization / optimal`
//! - Above the kink:
//!   `rate = base + slope1 + slope2 * (utilization - optimal) / (10000 - optimal)`
//! - Supply rate: `borrow_rate * utilization * (1 - reserve_factor)`
//!
//! ## Index
//! `accrue_reserve` advances the reserve's borrow index by a compound
//! factor over the elapsed time: whole days are compounded with
//! `pow_scaled` over the one-day linear factor, the sub-day remainder is
//! applied linearly. The index never decreases and a zero-elapsed accrual
//! is an exact no-op. An account's live debt is
//! `principal * current_index / snapshot_index`; the snapshot is settled
//! only when the account is touched, so a rate change is O(1), not
//! O(accounts).
//!
//! All functions here are pure with respect to storage; callers persist the
//! returned state at commit time.

use crate::errors::ProtocolError;
use crate::math::{self, BPS_SCALE, ONE, SCALE};
use crate::types::{AssetParams, BorrowSnapshot, Reserve};

pub const SECONDS_PER_YEAR: u64 = 365 * 86_400;
pub const SECONDS_PER_DAY: u64 = 86_400;

/// Reserve utilization in basis points, 0 when nothing is supplied,
/// capped at 100%.
pub fn utilization_bps(reserve: &Reserve) -> Result<i128, ProtocolError> {
    if reserve.total_supplied == 0 {
        return Ok(0);
    }
    let utilization = reserve
        .total_borrowed
        .checked_mul(BPS_SCALE)
        .ok_or(ProtocolError::Overflow)?
        .checked_div(reserve.total_supplied)
        .ok_or(ProtocolError::DivisionByZero)?;
    Ok(utilization.min(BPS_SCALE))
}

/// Borrow rate for the given utilization, in basis points per year.
pub fn borrow_rate_bps(params: &AssetParams, utilization: i128) -> Result<i128, ProtocolError> {
    let optimal = params.optimal_utilization_bps;
    if utilization <= optimal {
        if optimal == 0 {
            return Ok(params.base_rate_bps);
        }
        let increase = utilization
            .checked_mul(params.slope1_bps)
            .ok_or(ProtocolError::Overflow)?
            .checked_div(optimal)
            .ok_or(ProtocolError::DivisionByZero)?;
        params
            .base_rate_bps
            .checked_add(increase)
            .ok_or(ProtocolError::Overflow)
    } else {
        let above = utilization
            .checked_sub(optimal)
            .ok_or(ProtocolError::Overflow)?;
        let span = BPS_SCALE
            .checked_sub(optimal)
            .ok_or(ProtocolError::Overflow)?;
        if span == 0 {
            return params
                .base_rate_bps
                .checked_add(params.slope1_bps)
                .ok_or(ProtocolError::Overflow);
        }
        let excess = above
            .checked_mul(params.slope2_bps)
            .ok_or(ProtocolError::Overflow)?
            .checked_div(span)
            .ok_or(ProtocolError::DivisionByZero)?;
        params
            .base_rate_bps
            .checked_add(params.slope1_bps)
            .ok_or(ProtocolError::Overflow)?
            .checked_add(excess)
            .ok_or(ProtocolError::Overflow)
    }
}

/// Supply rate: the borrow rate scaled by utilization, minus the protocol's
/// reserve-factor cut. In basis points per year.
pub fn supply_rate_bps(params: &AssetParams, utilization: i128) -> Result<i128, ProtocolError> {
    let borrow_rate = borrow_rate_bps(params, utilization)?;
    let gross = borrow_rate
        .checked_mul(utilization)
        .ok_or(ProtocolError::Overflow)?
        .checked_div(BPS_SCALE)
        .ok_or(ProtocolError::DivisionByZero)?;
    let lender_share = BPS_SCALE
        .checked_sub(params.reserve_factor_bps)
        .ok_or(ProtocolError::Overflow)?;
    math::mul_bps(gross, lender_share)
}

/// Convert a bps-per-year rate to a `SCALE`-based per-year rate.
fn rate_scaled(rate_bps: i128) -> Result<i128, ProtocolError> {
    rate_bps
        .checked_mul(SCALE / BPS_SCALE)
        .ok_or(ProtocolError::Overflow)
}

/// Linear accrual factor `1 + rate * elapsed / secondsPerYear` at `SCALE`.
fn linear_factor(rate_bps: i128, elapsed: u64) -> Result<i128, ProtocolError> {
    let growth = rate_scaled(rate_bps)?
        .checked_mul(elapsed as i128)
        .ok_or(ProtocolError::Overflow)?
        .checked_div(SECONDS_PER_YEAR as i128)
        .ok_or(ProtocolError::DivisionByZero)?;
    ONE.checked_add(growth).ok_or(ProtocolError::Overflow)
}

/// Compound accrual factor over `elapsed` seconds: whole days compounded,
/// the remainder linear. Exactly `ONE` for `elapsed = 0`.
pub fn compound_factor(rate_bps: i128, elapsed: u64) -> Result<i128, ProtocolError> {
    let whole_days = elapsed / SECONDS_PER_DAY;
    let remainder = elapsed % SECONDS_PER_DAY;
    let day_factor = linear_factor(rate_bps, SECONDS_PER_DAY)?;
    let compounded = math::pow_scaled(day_factor, whole_days)?;
    math::mul_scaled(compounded, linear_factor(rate_bps, remainder)?)
}

/// Advance a reserve to `now`. Returns the accrued reserve and the interest
/// added to outstanding borrows.
///
/// The full interest amount is credited to `total_supplied` as well as
/// `total_borrowed`, so accrual by itself preserves
/// `total_borrowed <= total_supplied`. The lender share of the interest
/// grows `supply_index`, making it claimable by supplier shares; the
/// protocol's `reserve_factor` cut is tracked as `protocol_reserve`, a
/// claim within `total_supplied`.
pub fn accrue_reserve(
    params: &AssetParams,
    reserve: &Reserve,
    now: u64,
) -> Result<(Reserve, i128), ProtocolError> {
    if now <= reserve.last_update {
        return Ok((reserve.clone(), 0));
    }
    let elapsed = now - reserve.last_update;

    let utilization = utilization_bps(reserve)?;
    let rate = borrow_rate_bps(params, utilization)?;
    let factor = compound_factor(rate, elapsed)?;

    let new_index = math::mul_scaled(reserve.borrow_index, factor)?;
    let new_borrowed = math::mul_scaled(reserve.total_borrowed, factor)?;
    let interest = new_borrowed
        .checked_sub(reserve.total_borrowed)
        .ok_or(ProtocolError::Overflow)?;

    let protocol_cut = math::mul_bps(interest, params.reserve_factor_bps)?;
    let lender_interest = interest
        .checked_sub(protocol_cut)
        .ok_or(ProtocolError::Overflow)?;
    let new_supply_index = if lender_interest > 0 && reserve.total_supplied > 0 {
        let growth = math::div_scaled(lender_interest, reserve.total_supplied)?;
        math::mul_scaled(
            reserve.supply_index,
            ONE.checked_add(growth).ok_or(ProtocolError::Overflow)?,
        )?
    } else {
        reserve.supply_index
    };

    let accrued = Reserve {
        total_supplied: reserve
            .total_supplied
            .checked_add(interest)
            .ok_or(ProtocolError::Overflow)?,
        total_borrowed: new_borrowed,
        borrow_index: new_index,
        supply_index: new_supply_index,
        protocol_reserve: reserve
            .protocol_reserve
            .checked_add(protocol_cut)
            .ok_or(ProtocolError::Overflow)?,
        last_update: now,
    };
    Ok((accrued, interest))
}

/// An account's live debt in one asset against the current index.
pub fn live_debt(snapshot: &BorrowSnapshot, current_index: i128) -> Result<i128, ProtocolError> {
    if snapshot.principal == 0 {
        return Ok(0);
    }
    if snapshot.index == 0 {
        return Err(ProtocolError::DivisionByZero);
    }
    snapshot
        .principal
        .checked_mul(current_index)
        .ok_or(ProtocolError::Overflow)?
        .checked_div(snapshot.index)
        .ok_or(ProtocolError::DivisionByZero)
}

/// A supplier's live balance in asset units for a share amount.
pub fn live_supplied(shares: i128, supply_index: i128) -> Result<i128, ProtocolError> {
    math::mul_scaled(shares, supply_index)
}

/// Shares minted for a deposit, rounding down so a mint never claims more
/// than the amount supplied.
pub fn shares_for_deposit(amount: i128, supply_index: i128) -> Result<i128, ProtocolError> {
    math::div_scaled(amount, supply_index)
}

/// Shares burned for a withdrawal, rounding up so a burn always covers the
/// value removed.
pub fn shares_for_withdrawal(amount: i128, supply_index: i128) -> Result<i128, ProtocolError> {
    let shares = math::div_scaled(amount, supply_index)?;
    if live_supplied(shares, supply_index)? < amount {
        shares.checked_add(1).ok_or(ProtocolError::Overflow)
    } else {
        Ok(shares)
    }
}

/// Settle a snapshot against the current index: principal is brought up to
/// date and the snapshot re-anchored.
pub fn settle_snapshot(
    snapshot: &BorrowSnapshot,
    current_index: i128,
    now: u64,
) -> Result<BorrowSnapshot, ProtocolError> {
    Ok(BorrowSnapshot {
        principal: live_debt(snapshot, current_index)?,
        index: current_index,
        last_accrual: now,
    })
}
