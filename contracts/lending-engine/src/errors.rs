use soroban_sdk::contracterror;

/// All errors emitted by the lending engine.
///
/// Errors are surfaced as `u32` codes in the Soroban result envelope so
/// that callers can pattern-match them programmatically. Every error aborts
/// the enclosing operation with no state mutation: operations perform all
/// checks before their first storage write, and a failed invocation is
/// rolled back by the host regardless.
#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum ProtocolError {
    /// Contract has already been initialised; `initialize` cannot be called again.
    AlreadyInitialized = 1,
    /// Contract has not been initialised yet.
    NotInitialized = 2,
    /// Caller is not the admin.
    Unauthorized = 3,
    /// The asset has no registered parameters or reserve.
    AssetNotConfigured = 4,
    /// Amount must be strictly positive.
    InvalidAmount = 5,
    /// Requested amount exceeds the account's balance in that asset.
    InsufficientBalance = 6,
    /// The reserve cannot cover the request; would leave borrows above supply.
    InsufficientLiquidity = 7,
    /// The resulting position would fall below the collateral-factor bound.
    HealthCheckFailed = 8,
    /// The account has no outstanding debt in that asset.
    NoDebtToRepay = 9,
    /// The position's health factor is at or above 1; nothing to liquidate.
    NotLiquidatable = 10,
    /// Repay amount exceeds the close-factor bound for a single call.
    ExceedsCloseFactor = 11,
    /// An oracle price is older than the configured maximum age.
    StalePriceData = 12,
    /// No oracle price has been posted for a required asset.
    MissingPriceData = 13,
    /// Checked arithmetic overflowed the working width.
    Overflow = 14,
    /// Division by zero in scaled arithmetic.
    DivisionByZero = 15,
    /// Risk parameters violate `0 < collateral factor < liquidation threshold <= 1`.
    InvalidRiskParameters = 16,
    /// Raised by the external funds-custody collaborator when the liquidator
    /// cannot cover the repayment. Reserved here; the engine itself never
    /// inspects liquidator funds.
    LiquidatorInsufficientFunds = 17,
    /// Posted price must be strictly positive.
    InvalidPrice = 18,
}
