//! Shared test helpers: environment setup, asset registration with
//! parameters and a posted price, and time travel.

use crate::types::{AssetParams, PositionEntry};
use crate::{LendingEngine, LendingEngineClient};
use soroban_sdk::{
    testutils::{Address as _, Ledger},
    Address, Env, Vec,
};

/// Oracle price for 1.0 at the 1e7 price scale.
pub const PRICE_ONE: i128 = 10_000_000;

pub fn create_test_env() -> Env {
    let env = Env::default();
    env.mock_all_auths();
    env
}

/// Register the contract and initialize it with a generated admin.
pub fn setup_engine(env: &Env) -> (Address, Address, LendingEngineClient<'_>) {
    let contract_id = env.register(LendingEngine, ());
    let client = LendingEngineClient::new(env, &contract_id);
    let admin = Address::generate(env);
    client.initialize(&admin);
    (contract_id, admin, client)
}

/// Baseline asset parameters: 70% collateral factor, 80% liquidation
/// threshold, 5% liquidation bonus, 10% reserve factor, and a kink curve
/// of 2% base, 10% slope1, 60% slope2 at 80% optimal utilization.
pub fn default_params() -> AssetParams {
    AssetParams {
        collateral_factor_bps: 7_000,
        liquidation_threshold_bps: 8_000,
        liquidation_bonus_bps: 500,
        reserve_factor_bps: 1_000,
        base_rate_bps: 200,
        slope1_bps: 1_000,
        slope2_bps: 6_000,
        optimal_utilization_bps: 8_000,
    }
}

/// Register a fresh asset with the given parameters and post its price.
pub fn register_asset(
    env: &Env,
    client: &LendingEngineClient,
    admin: &Address,
    params: &AssetParams,
    price: i128,
) -> Address {
    let asset = Address::generate(env);
    client.set_asset_params(admin, &asset, params);
    client.set_price(admin, &asset, &price);
    asset
}

/// Advance the ledger timestamp by `by` seconds.
pub fn advance_time(env: &Env, by: u64) {
    env.ledger().with_mut(|li| li.timestamp += by);
}

/// Find one asset's entry in a `get_position` result.
pub fn find_entry(entries: &Vec<PositionEntry>, asset: &Address) -> Option<PositionEntry> {
    entries.iter().find(|e| e.asset == *asset)
}
