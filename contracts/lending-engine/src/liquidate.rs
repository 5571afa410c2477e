//! # Liquidation Engine
//!
//! Resolves undercollateralised positions. A liquidator repays part of a
//! borrower's debt and is awarded collateral worth the repayment plus the
//! collateral asset's liquidation bonus. Eligibility uses the
//! liquidation-threshold weighting; the repayable amount in a single call
//! is bounded by the close factor unless health has fallen below the
//! full-close threshold, in which case the whole debt may be closed.
//!
//! The amount of collateral seized is capped at the borrower's actual
//! balance in the chosen asset. The cap is defined behavior, not a fault:
//! it is absorbed silently, never raised.
//!
//! The repayment itself and the delivery of seized collateral are token
//! movements performed by the external custody collaborator, atomically
//! with this ledger update. `LiquidatorInsufficientFunds` belongs to that
//! collaborator; this engine never inspects liquidator funds.

use soroban_sdk::{Address, Env};

use crate::errors::ProtocolError;
use crate::events::{emit_liquidation, LiquidationEvent};
use crate::interest;
use crate::ledger::{commit_reserve, set_borrowed, set_supply_shares};
use crate::math::{self, BPS_SCALE};
use crate::risk;
use crate::storage;

/// Liquidate part of an unhealthy position.
///
/// Returns `(debt_repaid, collateral_seized)`.
///
/// # Errors
/// * `InvalidAmount` — repay amount is zero or negative.
/// * `NoDebtToRepay` — the borrower owes nothing in `debt_asset`.
/// * `NotLiquidatable` — threshold-weighted health factor is at least 1.
/// * `ExceedsCloseFactor` — repay amount exceeds the per-call bound.
/// * `StalePriceData` / `MissingPriceData` — an oracle price failed
///   validation.
pub fn liquidate(
    env: &Env,
    liquidator: Address,
    borrower: Address,
    debt_asset: Address,
    collateral_asset: Address,
    repay_amount: i128,
) -> Result<(i128, i128), ProtocolError> {
    liquidator.require_auth();
    if repay_amount <= 0 {
        return Err(ProtocolError::InvalidAmount);
    }
    let config = storage::get_config(env)?;
    let now = env.ledger().timestamp();

    let debt_params = storage::get_params(env, &debt_asset)?;
    let stored_debt_reserve = storage::get_reserve(env, &debt_asset)?;
    let (mut debt_reserve, debt_interest) =
        interest::accrue_reserve(&debt_params, &stored_debt_reserve, now)?;

    let same_asset = collateral_asset == debt_asset;
    let coll_params = if same_asset {
        debt_params.clone()
    } else {
        storage::get_params(env, &collateral_asset)?
    };
    let coll_accrual = if same_asset {
        None
    } else {
        let stored = storage::get_reserve(env, &collateral_asset)?;
        Some(interest::accrue_reserve(&coll_params, &stored, now)?)
    };
    let coll_supply_index = match &coll_accrual {
        Some((reserve, _)) => reserve.supply_index,
        None => debt_reserve.supply_index,
    };

    let mut position = storage::get_position(env, &borrower);
    let snapshot = position
        .borrowed
        .get(debt_asset.clone())
        .ok_or(ProtocolError::NoDebtToRepay)?;
    let mut settled = interest::settle_snapshot(&snapshot, debt_reserve.borrow_index, now)?;
    if settled.principal == 0 {
        return Err(ProtocolError::NoDebtToRepay);
    }

    let health = risk::liquidation_health(env, &position, now)?;
    if !risk::is_liquidatable(&health) {
        return Err(ProtocolError::NotLiquidatable);
    }

    // Close factor bounds a single call; deep insolvency permits full closure.
    let max_repay = if health.health_factor_bps < config.full_close_health_bps {
        settled.principal
    } else {
        math::mul_bps(settled.principal, config.close_factor_bps)?
    };
    if repay_amount > max_repay {
        return Err(ProtocolError::ExceedsCloseFactor);
    }

    // Both prices come from this invocation's storage snapshot, the same
    // one the health evaluation above used.
    let debt_price = risk::asset_price(env, &config, &debt_asset, now)?;
    let coll_price = risk::asset_price(env, &config, &collateral_asset, now)?;

    let seize_value = math::convert_at_prices(repay_amount, debt_price, coll_price)?;
    let bonus_factor = BPS_SCALE
        .checked_add(coll_params.liquidation_bonus_bps)
        .ok_or(ProtocolError::Overflow)?;
    let seize_with_bonus = seize_value
        .checked_mul(bonus_factor)
        .ok_or(ProtocolError::Overflow)?
        .checked_div(BPS_SCALE)
        .ok_or(ProtocolError::DivisionByZero)?;

    let coll_shares = position
        .supply_shares
        .get(collateral_asset.clone())
        .unwrap_or(0);
    let coll_balance = interest::live_supplied(coll_shares, coll_supply_index)?;
    let seized = seize_with_bonus.min(coll_balance);

    // Commit: debt down, collateral out, reserves adjusted, all at once.
    settled.principal -= repay_amount;
    set_borrowed(&mut position, &debt_asset, settled);
    let remaining_shares = if seized == coll_balance {
        0
    } else {
        // Rounding the burn up can overshoot by a unit; clamp.
        (coll_shares - interest::shares_for_withdrawal(seized, coll_supply_index)?).max(0)
    };
    set_supply_shares(&mut position, &collateral_asset, remaining_shares);

    debt_reserve.total_borrowed = debt_reserve
        .total_borrowed
        .checked_sub(repay_amount)
        .ok_or(ProtocolError::Overflow)?
        .max(0);

    if let Some((mut coll_reserve, coll_interest)) = coll_accrual {
        coll_reserve.total_supplied = coll_reserve
            .total_supplied
            .checked_sub(seized)
            .ok_or(ProtocolError::Overflow)?;
        commit_reserve(env, &debt_asset, &debt_reserve, debt_interest);
        commit_reserve(env, &collateral_asset, &coll_reserve, coll_interest);
    } else {
        debt_reserve.total_supplied = debt_reserve
            .total_supplied
            .checked_sub(seized)
            .ok_or(ProtocolError::Overflow)?;
        commit_reserve(env, &debt_asset, &debt_reserve, debt_interest);
    }
    storage::set_position(env, &borrower, &position);

    emit_liquidation(
        env,
        LiquidationEvent {
            liquidator,
            borrower,
            debt_asset,
            collateral_asset,
            debt_repaid: repay_amount,
            collateral_seized: seized,
            timestamp: now,
        },
    );

    Ok((repay_amount, seized))
}
