//! # Risk Engine
//!
//! Values a position against oracle prices and per-asset risk parameters
//! and decides whether actions are permitted and whether a position is
//! liquidatable. Reads ledger state and writes nothing; debt is brought up
//! to date with a pure index computation so health queries stay
//! side-effect-free.
//!
//! Two weightings exist on purpose:
//! - [`Weighting::CollateralFactor`] gates borrows and withdrawals, the
//!   conservative bound.
//! - [`Weighting::LiquidationThreshold`] (strictly looser) decides
//!   liquidation eligibility, leaving a safety margin between "cannot
//!   borrow more" and "can be liquidated".
//!
//! All prices used in one evaluation come from the same invocation's
//! storage snapshot; a health check never mixes prices read at different
//! times.

use soroban_sdk::{Address, Env};

use crate::errors::ProtocolError;
use crate::interest;
use crate::math::{self, BPS_SCALE};
use crate::storage;
use crate::types::{HealthSummary, Position, ProtocolConfig};

/// Which per-asset factor weights collateral value.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Weighting {
    CollateralFactor,
    LiquidationThreshold,
}

/// A validated price read for one asset under the protocol's staleness
/// bound.
pub fn asset_price(
    env: &Env,
    config: &ProtocolConfig,
    asset: &Address,
    now: u64,
) -> Result<i128, ProtocolError> {
    Ok(crate::oracle::validated_price(env, asset, now, config.max_price_age)?.price)
}

/// Value a position under the given weighting.
///
/// Every asset the position touches needs a fresh oracle price; a missing
/// or stale price fails the whole evaluation with `MissingPriceData` or
/// `StalePriceData`. Both sides are computed against the asset's current
/// (unpersisted) indexes: supply shares through the supply index, debt
/// through the borrow index.
pub fn account_health(
    env: &Env,
    position: &Position,
    weighting: Weighting,
    now: u64,
) -> Result<HealthSummary, ProtocolError> {
    let config = storage::get_config(env)?;

    let mut collateral_value: i128 = 0;
    let mut weighted_collateral: i128 = 0;
    let mut debt_value: i128 = 0;

    for (asset, shares) in position.supply_shares.iter() {
        if shares == 0 {
            continue;
        }
        let params = storage::get_params(env, &asset)?;
        let reserve = storage::get_reserve(env, &asset)?;
        let (accrued, _) = interest::accrue_reserve(&params, &reserve, now)?;
        let amount = interest::live_supplied(shares, accrued.supply_index)?;
        let price = asset_price(env, &config, &asset, now)?;
        let value = math::value_at_price(amount, price)?;
        collateral_value = collateral_value
            .checked_add(value)
            .ok_or(ProtocolError::Overflow)?;

        let factor = match weighting {
            Weighting::CollateralFactor => params.collateral_factor_bps,
            Weighting::LiquidationThreshold => params.liquidation_threshold_bps,
        };
        weighted_collateral = weighted_collateral
            .checked_add(math::mul_bps(value, factor)?)
            .ok_or(ProtocolError::Overflow)?;
    }

    for (asset, snapshot) in position.borrowed.iter() {
        if snapshot.principal == 0 {
            continue;
        }
        let params = storage::get_params(env, &asset)?;
        let reserve = storage::get_reserve(env, &asset)?;
        let (accrued, _) = interest::accrue_reserve(&params, &reserve, now)?;
        let debt = interest::live_debt(&snapshot, accrued.borrow_index)?;

        let price = asset_price(env, &config, &asset, now)?;
        debt_value = debt_value
            .checked_add(math::value_at_price(debt, price)?)
            .ok_or(ProtocolError::Overflow)?;
    }

    let health_factor_bps = if debt_value == 0 {
        i128::MAX
    } else {
        weighted_collateral
            .checked_mul(BPS_SCALE)
            .ok_or(ProtocolError::Overflow)?
            .checked_div(debt_value)
            .ok_or(ProtocolError::DivisionByZero)?
    };

    Ok(HealthSummary {
        collateral_value,
        weighted_collateral,
        debt_value,
        health_factor_bps,
    })
}

/// Gate for borrow and withdraw: the projected position must keep a
/// collateral-factor-weighted health factor of at least 1.
pub fn require_action_safe(
    env: &Env,
    projected: &Position,
    now: u64,
) -> Result<(), ProtocolError> {
    // A debt-free position is safe by definition; don't let a stale oracle
    // trap a pure supplier's collateral.
    if projected.borrowed.is_empty() {
        return Ok(());
    }
    let health = account_health(env, projected, Weighting::CollateralFactor, now)?;
    if health.debt_value > 0 && health.health_factor_bps < BPS_SCALE {
        return Err(ProtocolError::HealthCheckFailed);
    }
    Ok(())
}

/// Liquidation eligibility: threshold-weighted health below 1 with
/// outstanding debt.
pub fn liquidation_health(
    env: &Env,
    position: &Position,
    now: u64,
) -> Result<HealthSummary, ProtocolError> {
    account_health(env, position, Weighting::LiquidationThreshold, now)
}

pub fn is_liquidatable(health: &HealthSummary) -> bool {
    health.debt_value > 0 && health.health_factor_bps < BPS_SCALE
}
