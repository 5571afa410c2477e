//! # Lending Engine
//!
//! The position-and-risk core of a decentralized lending protocol:
//! - **Position ledger**: supplied and borrowed balances per account and
//!   asset, mutated by deposit, withdraw, borrow and repay.
//! - **Interest accrual**: a per-asset borrow index advanced by a
//!   utilization-driven kink rate model; accounts settle lazily on touch.
//! - **Risk engine**: LTV health checks that gate borrows and withdrawals
//!   and decide liquidation eligibility against oracle prices.
//! - **Liquidation engine**: close-factor-bounded partial liquidation with
//!   a collateral bonus for the liquidator.
//!
//! Token custody, transport and oracle internals live outside this
//! contract; the engine keeps the authoritative accounting and consumes
//! posted price values under a staleness bound.

#![no_std]

use soroban_sdk::{contract, contractimpl, Address, Env, Vec};

pub mod admin;
pub mod errors;
pub mod events;
pub mod interest;
pub mod ledger;
pub mod liquidate;
pub mod math;
pub mod oracle;
pub mod risk;
pub mod storage;
pub mod types;

#[cfg(test)]
mod tests;

pub use errors::ProtocolError;
pub use types::{
    AssetParams, BorrowSnapshot, Position, PositionEntry, PriceFeed, ProtocolConfig, Reserve,
};

/// The lending engine contract.
///
/// Each method delegates to the corresponding module; every operation is
/// atomic — it either commits fully or returns an error having written
/// nothing.
#[contract]
pub struct LendingEngine;

#[contractimpl]
impl LendingEngine {
    // ───────────────────────────────────────────────────
    // Administration
    // ───────────────────────────────────────────────────

    /// Initialize the contract with an admin address. Callable once.
    pub fn initialize(env: Env, admin: Address) -> Result<(), ProtocolError> {
        admin::initialize(&env, admin)
    }

    /// Register or update an asset's risk and rate parameters (admin only).
    pub fn set_asset_params(
        env: Env,
        caller: Address,
        asset: Address,
        params: AssetParams,
    ) -> Result<(), ProtocolError> {
        admin::set_asset_params(&env, caller, asset, params)
    }

    /// Update the protocol-wide policy configuration (admin only).
    pub fn set_protocol_config(
        env: Env,
        caller: Address,
        config: ProtocolConfig,
    ) -> Result<(), ProtocolError> {
        admin::set_protocol_config(&env, caller, config)
    }

    /// Post an oracle price for an asset (admin only).
    pub fn set_price(
        env: Env,
        caller: Address,
        asset: Address,
        price: i128,
    ) -> Result<(), ProtocolError> {
        oracle::set_price(&env, caller, asset, price)
    }

    // ───────────────────────────────────────────────────
    // Ledger operations
    // ───────────────────────────────────────────────────

    /// Supply `amount` of `asset` as collateral.
    pub fn deposit(
        env: Env,
        account: Address,
        asset: Address,
        amount: i128,
    ) -> Result<(), ProtocolError> {
        ledger::deposit(&env, account, asset, amount)
    }

    /// Withdraw `amount` of supplied `asset`, subject to the health gate.
    pub fn withdraw(
        env: Env,
        account: Address,
        asset: Address,
        amount: i128,
    ) -> Result<(), ProtocolError> {
        ledger::withdraw(&env, account, asset, amount)
    }

    /// Borrow `amount` of `asset` against supplied collateral.
    pub fn borrow(
        env: Env,
        account: Address,
        asset: Address,
        amount: i128,
    ) -> Result<(), ProtocolError> {
        ledger::borrow(&env, account, asset, amount)
    }

    /// Repay debt in `asset`; returns the amount actually applied.
    pub fn repay(
        env: Env,
        account: Address,
        asset: Address,
        amount: i128,
    ) -> Result<i128, ProtocolError> {
        ledger::repay(&env, account, asset, amount)
    }

    /// Liquidate part of `borrower`'s unhealthy position; returns
    /// `(debt_repaid, collateral_seized)`.
    pub fn liquidate(
        env: Env,
        liquidator: Address,
        borrower: Address,
        debt_asset: Address,
        collateral_asset: Address,
        repay_amount: i128,
    ) -> Result<(i128, i128), ProtocolError> {
        liquidate::liquidate(
            &env,
            liquidator,
            borrower,
            debt_asset,
            collateral_asset,
            repay_amount,
        )
    }

    // ───────────────────────────────────────────────────
    // Read-only views
    // ───────────────────────────────────────────────────

    /// An account's per-asset balances, both sides brought up to date
    /// against the current indexes. Side-effect-free.
    pub fn get_position(env: Env, account: Address) -> Result<Vec<PositionEntry>, ProtocolError> {
        let now = env.ledger().timestamp();
        let position = storage::get_position(&env, &account);
        let mut entries: Vec<PositionEntry> = Vec::new(&env);

        for (asset, shares) in position.supply_shares.iter() {
            let reserve = Self::live_reserve(&env, &asset, now)?;
            let supplied = interest::live_supplied(shares, reserve.supply_index)?;
            let debt = match position.borrowed.get(asset.clone()) {
                Some(snapshot) => interest::live_debt(&snapshot, reserve.borrow_index)?,
                None => 0,
            };
            entries.push_back(PositionEntry {
                asset,
                supplied,
                debt,
            });
        }
        for (asset, snapshot) in position.borrowed.iter() {
            if position.supply_shares.contains_key(asset.clone()) {
                continue;
            }
            let reserve = Self::live_reserve(&env, &asset, now)?;
            let debt = interest::live_debt(&snapshot, reserve.borrow_index)?;
            entries.push_back(PositionEntry {
                asset,
                supplied: 0,
                debt,
            });
        }
        Ok(entries)
    }

    /// The reserve state for an asset, accrued to the current timestamp.
    /// Side-effect-free, and consistent in freshness with the position and
    /// health views.
    pub fn get_reserve_state(env: Env, asset: Address) -> Result<Reserve, ProtocolError> {
        let now = env.ledger().timestamp();
        Self::live_reserve(&env, &asset, now)
    }

    /// The account's health factor in basis points, weighted by the
    /// liquidation threshold. `i128::MAX` for an account with no debt.
    pub fn get_health_factor(env: Env, account: Address) -> Result<i128, ProtocolError> {
        let now = env.ledger().timestamp();
        let position = storage::get_position(&env, &account);
        let health = risk::liquidation_health(&env, &position, now)?;
        Ok(health.health_factor_bps)
    }

    /// Current risk and rate parameters for an asset.
    pub fn get_asset_params(env: Env, asset: Address) -> Result<AssetParams, ProtocolError> {
        storage::get_params(&env, &asset)
    }

    /// Current protocol-wide policy configuration.
    pub fn get_protocol_config(env: Env) -> Result<ProtocolConfig, ProtocolError> {
        storage::get_config(&env)
    }

    /// Current utilization of an asset's reserve, in basis points.
    pub fn get_utilization(env: Env, asset: Address) -> Result<i128, ProtocolError> {
        let reserve = Self::live_reserve(&env, &asset, env.ledger().timestamp())?;
        interest::utilization_bps(&reserve)
    }

    /// Current borrow rate for an asset, in basis points per year.
    pub fn get_borrow_rate(env: Env, asset: Address) -> Result<i128, ProtocolError> {
        let params = storage::get_params(&env, &asset)?;
        let reserve = Self::live_reserve(&env, &asset, env.ledger().timestamp())?;
        interest::borrow_rate_bps(&params, interest::utilization_bps(&reserve)?)
    }

    /// Current supply rate for an asset, in basis points per year.
    pub fn get_supply_rate(env: Env, asset: Address) -> Result<i128, ProtocolError> {
        let params = storage::get_params(&env, &asset)?;
        let reserve = Self::live_reserve(&env, &asset, env.ledger().timestamp())?;
        interest::supply_rate_bps(&params, interest::utilization_bps(&reserve)?)
    }

    /// The validated oracle price for an asset under the staleness bound.
    pub fn get_price(env: Env, asset: Address) -> Result<i128, ProtocolError> {
        let config = storage::get_config(&env)?;
        let now = env.ledger().timestamp();
        Ok(oracle::validated_price(&env, &asset, now, config.max_price_age)?.price)
    }
}

impl LendingEngine {
    /// A copy of the asset's reserve accrued to `now`, never persisted.
    fn live_reserve(env: &Env, asset: &Address, now: u64) -> Result<Reserve, ProtocolError> {
        let params = storage::get_params(env, asset)?;
        let reserve = storage::get_reserve(env, asset)?;
        let (accrued, _) = interest::accrue_reserve(&params, &reserve, now)?;
        Ok(accrued)
    }
}
