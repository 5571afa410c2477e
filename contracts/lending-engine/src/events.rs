//! Structured event schema for every state-changing action.
//!
//! Each event is its own `#[contractevent]` struct; the macro derives the
//! snake_case struct name as the leading topic and exposes `.publish`.
//! `emit_*` helpers give a single call-site per action. All fields are
//! publicly observable state only.

use soroban_sdk::{contractevent, Address, Env};

/// Emitted when an account supplies collateral.
#[contractevent]
#[derive(Clone, Debug)]
pub struct DepositEvent {
    pub account: Address,
    pub asset: Address,
    pub amount: i128,
    pub timestamp: u64,
}

/// Emitted when an account withdraws collateral.
#[contractevent]
#[derive(Clone, Debug)]
pub struct WithdrawEvent {
    pub account: Address,
    pub asset: Address,
    pub amount: i128,
    pub timestamp: u64,
}

/// Emitted when an account borrows from a reserve.
#[contractevent]
#[derive(Clone, Debug)]
pub struct BorrowEvent {
    pub account: Address,
    pub asset: Address,
    pub amount: i128,
    pub timestamp: u64,
}

/// Emitted when debt is repaid. `amount` is the amount actually applied,
/// after capping at the outstanding debt.
#[contractevent]
#[derive(Clone, Debug)]
pub struct RepayEvent {
    pub account: Address,
    pub asset: Address,
    pub amount: i128,
    pub timestamp: u64,
}

/// Emitted when a liquidator closes part of an undercollateralised
/// position. `collateral_seized` is the post-cap amount the custody
/// collaborator must deliver to the liquidator.
#[contractevent]
#[derive(Clone, Debug)]
pub struct LiquidationEvent {
    pub liquidator: Address,
    pub borrower: Address,
    pub debt_asset: Address,
    pub collateral_asset: Address,
    pub debt_repaid: i128,
    pub collateral_seized: i128,
    pub timestamp: u64,
}

/// Emitted whenever a reserve's borrow index advances.
#[contractevent]
#[derive(Clone, Debug)]
pub struct ReserveAccruedEvent {
    pub asset: Address,
    pub borrow_index: i128,
    pub interest_accrued: i128,
    pub timestamp: u64,
}

/// Emitted once, when the contract is initialized.
#[contractevent]
#[derive(Clone, Debug)]
pub struct InitializedEvent {
    pub admin: Address,
    pub timestamp: u64,
}

/// Emitted when an oracle price is posted.
#[contractevent]
#[derive(Clone, Debug)]
pub struct PriceUpdatedEvent {
    pub actor: Address,
    pub asset: Address,
    pub price: i128,
    pub timestamp: u64,
}

/// Emitted when per-asset risk parameters are written.
#[contractevent]
#[derive(Clone, Debug)]
pub struct AssetParamsUpdatedEvent {
    pub actor: Address,
    pub asset: Address,
    pub timestamp: u64,
}

/// Emitted when the protocol-wide policy configuration is written.
#[contractevent]
#[derive(Clone, Debug)]
pub struct ProtocolConfigUpdatedEvent {
    pub actor: Address,
    pub timestamp: u64,
}

pub fn emit_deposit(e: &Env, event: DepositEvent) {
    event.publish(e);
}

pub fn emit_withdraw(e: &Env, event: WithdrawEvent) {
    event.publish(e);
}

pub fn emit_borrow(e: &Env, event: BorrowEvent) {
    event.publish(e);
}

pub fn emit_repay(e: &Env, event: RepayEvent) {
    event.publish(e);
}

pub fn emit_liquidation(e: &Env, event: LiquidationEvent) {
    event.publish(e);
}

pub fn emit_reserve_accrued(e: &Env, event: ReserveAccruedEvent) {
    event.publish(e);
}

pub fn emit_price_updated(e: &Env, event: PriceUpdatedEvent) {
    event.publish(e);
}

pub fn emit_asset_params_updated(e: &Env, event: AssetParamsUpdatedEvent) {
    event.publish(e);
}

pub fn emit_initialized(e: &Env, event: InitializedEvent) {
    event.publish(e);
}

pub fn emit_protocol_config_updated(e: &Env, event: ProtocolConfigUpdatedEvent) {
    event.publish(e);
}
