//! # Position Ledger
//!
//! The authoritative store of supplied and borrowed balances. Every
//! operation follows the same shape: validate inputs, accrue the asset's
//! reserve, settle the account's debt snapshot, build the projected
//! position, run the risk gate where one applies, and only then commit —
//! no partial state is ever written.

use soroban_sdk::{Address, Env};

use crate::errors::ProtocolError;
use crate::events::{
    emit_borrow, emit_deposit, emit_repay, emit_reserve_accrued, emit_withdraw, BorrowEvent,
    DepositEvent, RepayEvent, ReserveAccruedEvent, WithdrawEvent,
};
use crate::interest;
use crate::risk;
use crate::storage;
use crate::types::{BorrowSnapshot, Position, Reserve};

/// Write back an accrued reserve and emit the accrual event when the index
/// actually advanced.
pub(crate) fn commit_reserve(env: &Env, asset: &Address, reserve: &Reserve, interest_accrued: i128) {
    storage::set_reserve(env, asset, reserve);
    if interest_accrued > 0 {
        emit_reserve_accrued(
            env,
            ReserveAccruedEvent {
                asset: asset.clone(),
                borrow_index: reserve.borrow_index,
                interest_accrued,
                timestamp: reserve.last_update,
            },
        );
    }
}

/// Set a supply-share balance, pruning the entry when it reaches zero.
pub(crate) fn set_supply_shares(position: &mut Position, asset: &Address, shares: i128) {
    if shares == 0 {
        position.supply_shares.remove(asset.clone());
    } else {
        position.supply_shares.set(asset.clone(), shares);
    }
}

/// Set a debt snapshot, pruning the entry when the principal reaches zero.
pub(crate) fn set_borrowed(position: &mut Position, asset: &Address, snapshot: BorrowSnapshot) {
    if snapshot.principal == 0 {
        position.borrowed.remove(asset.clone());
    } else {
        position.borrowed.set(asset.clone(), snapshot);
    }
}

/// Supply collateral. Deposits only improve health, so no risk gate runs.
///
/// # Errors
/// * `InvalidAmount` — amount is zero or negative.
/// * `AssetNotConfigured` — no parameters registered for the asset.
pub fn deposit(
    env: &Env,
    account: Address,
    asset: Address,
    amount: i128,
) -> Result<(), ProtocolError> {
    account.require_auth();
    if amount <= 0 {
        return Err(ProtocolError::InvalidAmount);
    }
    let params = storage::get_params(env, &asset)?;
    let now = env.ledger().timestamp();

    let stored = storage::get_reserve(env, &asset)?;
    let (mut reserve, interest_accrued) = interest::accrue_reserve(&params, &stored, now)?;

    let mut position = storage::get_position(env, &account);
    let shares = position.supply_shares.get(asset.clone()).unwrap_or(0);
    let minted = interest::shares_for_deposit(amount, reserve.supply_index)?;
    if minted == 0 {
        // Too small to mint a share once the index has grown.
        return Err(ProtocolError::InvalidAmount);
    }
    let new_shares = shares.checked_add(minted).ok_or(ProtocolError::Overflow)?;
    reserve.total_supplied = reserve
        .total_supplied
        .checked_add(amount)
        .ok_or(ProtocolError::Overflow)?;

    set_supply_shares(&mut position, &asset, new_shares);
    commit_reserve(env, &asset, &reserve, interest_accrued);
    storage::set_position(env, &account, &position);

    emit_deposit(
        env,
        DepositEvent {
            account,
            asset,
            amount,
            timestamp: now,
        },
    );
    Ok(())
}

/// Withdraw collateral. The projected position must pass the
/// collateral-factor health gate, or the whole operation is rejected.
///
/// # Errors
/// * `InvalidAmount` — amount is zero or negative.
/// * `InsufficientBalance` — amount exceeds the account's supplied balance.
/// * `InsufficientLiquidity` — withdrawal would leave the reserve's borrows
///   above its supply.
/// * `HealthCheckFailed` — the remaining collateral would not cover debt.
pub fn withdraw(
    env: &Env,
    account: Address,
    asset: Address,
    amount: i128,
) -> Result<(), ProtocolError> {
    account.require_auth();
    if amount <= 0 {
        return Err(ProtocolError::InvalidAmount);
    }
    let params = storage::get_params(env, &asset)?;
    let now = env.ledger().timestamp();

    let stored = storage::get_reserve(env, &asset)?;
    let (mut reserve, interest_accrued) = interest::accrue_reserve(&params, &stored, now)?;

    let mut position = storage::get_position(env, &account);
    let shares = position.supply_shares.get(asset.clone()).unwrap_or(0);
    let balance = interest::live_supplied(shares, reserve.supply_index)?;
    if amount > balance {
        return Err(ProtocolError::InsufficientBalance);
    }

    let new_total_supplied = reserve
        .total_supplied
        .checked_sub(amount)
        .ok_or(ProtocolError::Overflow)?;
    if new_total_supplied < reserve.total_borrowed {
        return Err(ProtocolError::InsufficientLiquidity);
    }

    let remaining_shares = if amount == balance {
        0
    } else {
        // Rounding the burn up can overshoot by a unit; clamp.
        (shares - interest::shares_for_withdrawal(amount, reserve.supply_index)?).max(0)
    };

    // Project, gate, then commit.
    set_supply_shares(&mut position, &asset, remaining_shares);
    risk::require_action_safe(env, &position, now)?;

    reserve.total_supplied = new_total_supplied;
    commit_reserve(env, &asset, &reserve, interest_accrued);
    storage::set_position(env, &account, &position);

    emit_withdraw(
        env,
        WithdrawEvent {
            account,
            asset,
            amount,
            timestamp: now,
        },
    );
    Ok(())
}

/// Borrow against supplied collateral. The projected position must pass the
/// collateral-factor health gate.
///
/// # Errors
/// * `InvalidAmount` — amount is zero or negative.
/// * `InsufficientLiquidity` — the reserve cannot cover the borrow.
/// * `HealthCheckFailed` — collateral does not cover the projected debt.
pub fn borrow(
    env: &Env,
    account: Address,
    asset: Address,
    amount: i128,
) -> Result<(), ProtocolError> {
    account.require_auth();
    if amount <= 0 {
        return Err(ProtocolError::InvalidAmount);
    }
    let params = storage::get_params(env, &asset)?;
    let now = env.ledger().timestamp();

    let stored = storage::get_reserve(env, &asset)?;
    let (mut reserve, interest_accrued) = interest::accrue_reserve(&params, &stored, now)?;

    let new_total_borrowed = reserve
        .total_borrowed
        .checked_add(amount)
        .ok_or(ProtocolError::Overflow)?;
    if new_total_borrowed > reserve.total_supplied {
        return Err(ProtocolError::InsufficientLiquidity);
    }

    let mut position = storage::get_position(env, &account);
    let snapshot = position
        .borrowed
        .get(asset.clone())
        .unwrap_or(BorrowSnapshot {
            principal: 0,
            index: reserve.borrow_index,
            last_accrual: now,
        });
    let mut settled = interest::settle_snapshot(&snapshot, reserve.borrow_index, now)?;
    settled.principal = settled
        .principal
        .checked_add(amount)
        .ok_or(ProtocolError::Overflow)?;

    set_borrowed(&mut position, &asset, settled);
    risk::require_action_safe(env, &position, now)?;

    reserve.total_borrowed = new_total_borrowed;
    commit_reserve(env, &asset, &reserve, interest_accrued);
    storage::set_position(env, &account, &position);

    emit_borrow(
        env,
        BorrowEvent {
            account,
            asset,
            amount,
            timestamp: now,
        },
    );
    Ok(())
}

/// Repay debt. The repayment is capped at the outstanding (settled) debt;
/// the amount actually applied is returned.
///
/// # Errors
/// * `InvalidAmount` — amount is zero or negative.
/// * `NoDebtToRepay` — the account owes nothing in this asset.
pub fn repay(
    env: &Env,
    account: Address,
    asset: Address,
    amount: i128,
) -> Result<i128, ProtocolError> {
    account.require_auth();
    if amount <= 0 {
        return Err(ProtocolError::InvalidAmount);
    }
    let params = storage::get_params(env, &asset)?;
    let now = env.ledger().timestamp();

    let stored = storage::get_reserve(env, &asset)?;
    let (mut reserve, interest_accrued) = interest::accrue_reserve(&params, &stored, now)?;

    let mut position = storage::get_position(env, &account);
    let snapshot = position
        .borrowed
        .get(asset.clone())
        .ok_or(ProtocolError::NoDebtToRepay)?;
    let mut settled = interest::settle_snapshot(&snapshot, reserve.borrow_index, now)?;
    if settled.principal == 0 {
        return Err(ProtocolError::NoDebtToRepay);
    }

    let repaid = amount.min(settled.principal);
    settled.principal -= repaid;

    // Per-account truncation can leave the account's settled debt a unit
    // above the aggregate; clamp rather than underflow.
    reserve.total_borrowed = reserve
        .total_borrowed
        .checked_sub(repaid)
        .ok_or(ProtocolError::Overflow)?
        .max(0);

    set_borrowed(&mut position, &asset, settled);
    commit_reserve(env, &asset, &reserve, interest_accrued);
    storage::set_position(env, &account, &position);

    emit_repay(
        env,
        RepayEvent {
            account,
            asset,
            amount: repaid,
            timestamp: now,
        },
    );
    Ok(repaid)
}
