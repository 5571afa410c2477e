//! Risk engine tests: health factor arithmetic, the two weightings, and
//! oracle failures surfacing through health evaluation.

use crate::errors::ProtocolError;
use crate::tests::test_helpers::*;
use soroban_sdk::{testutils::Address as _, Address};

#[test]
fn test_health_factor_no_debt_is_max() {
    let env = create_test_env();
    let (_contract_id, admin, client) = setup_engine(&env);
    let asset = register_asset(&env, &client, &admin, &default_params(), PRICE_ONE);

    let user = Address::generate(&env);
    client.deposit(&user, &asset, &100);
    assert_eq!(client.get_health_factor(&user), i128::MAX);
}

#[test]
fn test_health_factor_known_value() {
    let env = create_test_env();
    let (_contract_id, admin, client) = setup_engine(&env);
    let asset_a = register_asset(&env, &client, &admin, &default_params(), PRICE_ONE);
    let asset_b = register_asset(&env, &client, &admin, &default_params(), PRICE_ONE);

    let whale = Address::generate(&env);
    client.deposit(&whale, &asset_b, &1_000);

    let user = Address::generate(&env);
    client.deposit(&user, &asset_a, &100);
    client.borrow(&user, &asset_b, &50);

    // Threshold weighting: 100 * 0.8 / 50 = 1.6.
    assert_eq!(client.get_health_factor(&user), 16_000);
}

#[test]
fn test_health_factor_tracks_price() {
    let env = create_test_env();
    let (_contract_id, admin, client) = setup_engine(&env);
    let asset_a = register_asset(&env, &client, &admin, &default_params(), PRICE_ONE);
    let asset_b = register_asset(&env, &client, &admin, &default_params(), PRICE_ONE);

    let whale = Address::generate(&env);
    client.deposit(&whale, &asset_b, &1_000);

    let user = Address::generate(&env);
    client.deposit(&user, &asset_a, &100);
    client.borrow(&user, &asset_b, &50);

    // Collateral halves in value: 100 * 0.5 * 0.8 / 50 = 0.8.
    client.set_price(&admin, &asset_a, &5_000_000);
    assert_eq!(client.get_health_factor(&user), 8_000);
}

#[test]
fn test_health_factor_with_debt_needs_fresh_prices() {
    let env = create_test_env();
    let (_contract_id, admin, client) = setup_engine(&env);
    let asset_a = register_asset(&env, &client, &admin, &default_params(), PRICE_ONE);
    let asset_b = register_asset(&env, &client, &admin, &default_params(), PRICE_ONE);

    let whale = Address::generate(&env);
    client.deposit(&whale, &asset_b, &1_000);

    let user = Address::generate(&env);
    client.deposit(&user, &asset_a, &100);
    client.borrow(&user, &asset_b, &50);

    advance_time(&env, 3_601);
    assert_eq!(
        client.try_get_health_factor(&user),
        Err(Ok(ProtocolError::StalePriceData))
    );
}

#[test]
fn test_action_gate_is_tighter_than_liquidation() {
    let env = create_test_env();
    let (_contract_id, admin, client) = setup_engine(&env);
    let asset_a = register_asset(&env, &client, &admin, &default_params(), PRICE_ONE);
    let asset_b = register_asset(&env, &client, &admin, &default_params(), PRICE_ONE);

    let whale = Address::generate(&env);
    client.deposit(&whale, &asset_b, &1_000);

    let user = Address::generate(&env);
    client.deposit(&user, &asset_a, &100);

    // The collateral factor (70%) caps borrowing at 70...
    assert_eq!(
        client.try_borrow(&user, &asset_b, &71),
        Err(Ok(ProtocolError::HealthCheckFailed))
    );
    client.borrow(&user, &asset_b, &70);

    // ...but the liquidation threshold (80%) still reads healthy, leaving
    // a margin between "cannot borrow more" and "can be liquidated".
    assert_eq!(client.get_health_factor(&user), 80 * 10_000 / 70);
    let liquidator = Address::generate(&env);
    assert_eq!(
        client.try_liquidate(&liquidator, &user, &asset_b, &asset_a, &10),
        Err(Ok(ProtocolError::NotLiquidatable))
    );
}

#[test]
fn test_mixed_collateral_health() {
    let env = create_test_env();
    let (_contract_id, admin, client) = setup_engine(&env);
    let asset_a = register_asset(&env, &client, &admin, &default_params(), PRICE_ONE);
    let asset_b = register_asset(&env, &client, &admin, &default_params(), 15_000_000);
    let asset_c = register_asset(&env, &client, &admin, &default_params(), PRICE_ONE);

    let whale = Address::generate(&env);
    client.deposit(&whale, &asset_c, &1_000);

    // 100 at $1.00 plus 40 at $1.50 = $160 of collateral, $128 weighted.
    let user = Address::generate(&env);
    client.deposit(&user, &asset_a, &100);
    client.deposit(&user, &asset_b, &40);
    client.borrow(&user, &asset_c, &64);

    assert_eq!(client.get_health_factor(&user), 128 * 10_000 / 64);
}
