use soroban_sdk::{contracttype, Address, Map};

/// Per-asset risk and rate parameters, set by the administrative
/// collaborator and read as an immutable snapshot by every operation.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AssetParams {
    /// Maximum borrow-time LTV in basis points (e.g. 7500 = 75%).
    /// Must be strictly below `liquidation_threshold_bps`.
    pub collateral_factor_bps: i128,
    /// LTV above which the position becomes liquidatable, in basis points.
    pub liquidation_threshold_bps: i128,
    /// Extra collateral awarded to a liquidator, in basis points (500 = 5%).
    pub liquidation_bonus_bps: i128,
    /// Share of accrued interest retained by the protocol, in basis points.
    pub reserve_factor_bps: i128,
    /// Borrow rate at 0% utilization, in basis points per year.
    pub base_rate_bps: i128,
    /// Rate slope below the optimal utilization point, in basis points.
    pub slope1_bps: i128,
    /// Rate slope beyond the optimal utilization point, in basis points.
    pub slope2_bps: i128,
    /// The kink of the piecewise-linear rate curve, in basis points.
    pub optimal_utilization_bps: i128,
}

/// Protocol-wide policy parameters.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ProtocolConfig {
    /// Maximum fraction of a position's debt repayable in one liquidation
    /// call, in basis points.
    pub close_factor_bps: i128,
    /// Health factor (bps) below which the close factor is waived and the
    /// whole debt may be closed in one call.
    pub full_close_health_bps: i128,
    /// Maximum accepted oracle price age, in seconds.
    pub max_price_age: u64,
}

/// Protocol-wide reserve state for one asset.
///
/// `borrow_index` and `supply_index` are monotonically non-decreasing
/// `SCALE`-based accumulators; an account's live debt is
/// `principal * borrow_index / snapshot_index` and a supplier's live
/// balance is `shares * supply_index / SCALE`, so only these two values
/// advance when interest accrues and accounts settle lazily on touch.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Reserve {
    /// Total units supplied to the reserve, including accrued interest.
    pub total_supplied: i128,
    /// Total units owed by borrowers, including accrued interest.
    pub total_borrowed: i128,
    /// Cumulative borrow interest factor since the reserve was created.
    pub borrow_index: i128,
    /// Cumulative supplier interest factor; grows by the lender share of
    /// each accrual.
    pub supply_index: i128,
    /// The protocol's reserve-factor cut of accrued interest. A claim
    /// within `total_supplied`, not in addition to it.
    pub protocol_reserve: i128,
    /// Ledger timestamp of the last accrual.
    pub last_update: u64,
}

/// An account's debt in one asset, snapshotted against the borrow index.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BorrowSnapshot {
    /// Debt at the time of the last settlement.
    pub principal: i128,
    /// The reserve's borrow index at the last settlement.
    pub index: i128,
    /// Ledger timestamp of the last settlement.
    pub last_accrual: u64,
}

/// An account's position across all assets. Created on first deposit or
/// borrow; entries are pruned when zeroed but the record itself is never
/// deleted.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Position {
    /// Supply shares per asset; the live balance in asset units is
    /// `shares * supply_index / SCALE`, so supplier claims grow with the
    /// reserve's supply index without per-account writes.
    pub supply_shares: Map<Address, i128>,
    /// Debt snapshots per asset.
    pub borrowed: Map<Address, BorrowSnapshot>,
}

/// A posted oracle price for one asset.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PriceFeed {
    /// Price in `PRICE_SCALE` units (1e7 = 1.0).
    pub price: i128,
    /// Ledger timestamp when the price was posted.
    pub updated_at: u64,
}

/// A price that passed validation, together with its age in seconds.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ValidatedPrice {
    pub price: i128,
    pub age: u64,
}

/// Read-only per-asset view of an account's position with debt brought up
/// to date against the current borrow index.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PositionEntry {
    pub asset: Address,
    pub supplied: i128,
    pub debt: i128,
}

/// Aggregate valuation of a position under one weighting.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct HealthSummary {
    /// Unweighted collateral value, `PRICE_SCALE`-denominated asset units.
    pub collateral_value: i128,
    /// Collateral value weighted by the chosen per-asset factor.
    pub weighted_collateral: i128,
    /// Total debt value.
    pub debt_value: i128,
    /// `weighted_collateral * 10_000 / debt_value`; `i128::MAX` for no debt.
    pub health_factor_bps: i128,
}
