//! Liquidation tests: eligibility, the close-factor bound and its waiver
//! under deep insolvency, bonus arithmetic, the seize cap, and same-asset
//! liquidation.

use crate::errors::ProtocolError;
use crate::tests::test_helpers::*;
use soroban_sdk::{testutils::Address as _, Address, Env};
use crate::LendingEngineClient;

/// 100 of asset A supplied at $1.50, 85 of asset B borrowed at $1.00.
/// Healthy at entry (105 of borrow capacity against 85 of debt); a drop
/// in A's price makes it liquidatable.
fn underwater_position<'a>(
    env: &Env,
    client: &LendingEngineClient<'a>,
    admin: &Address,
) -> (Address, Address, Address, Address) {
    let asset_a = register_asset(env, client, admin, &default_params(), 15_000_000);
    let asset_b = register_asset(env, client, admin, &default_params(), PRICE_ONE);

    let whale = Address::generate(env);
    client.deposit(&whale, &asset_b, &1_000);

    let borrower = Address::generate(env);
    client.deposit(&borrower, &asset_a, &100);
    client.borrow(&borrower, &asset_b, &85);

    let liquidator = Address::generate(env);
    (asset_a, asset_b, borrower, liquidator)
}

#[test]
fn test_partial_liquidation_with_bonus() {
    let env = create_test_env();
    let (_contract_id, admin, client) = setup_engine(&env);
    let (asset_a, asset_b, borrower, liquidator) = underwater_position(&env, &client, &admin);

    // A falls to $1.00: threshold-weighted health = 80 / 85 ≈ 0.94.
    client.set_price(&admin, &asset_a, &PRICE_ONE);
    assert_eq!(client.get_health_factor(&borrower), 9_411);

    // Repaying 40 seizes 40 worth of A plus the 5% bonus.
    let result = client.liquidate(&liquidator, &borrower, &asset_b, &asset_a, &40);
    assert_eq!(result, (40, 42));

    let entries = client.get_position(&borrower);
    assert_eq!(find_entry(&entries, &asset_a).unwrap().supplied, 58);
    assert_eq!(find_entry(&entries, &asset_b).unwrap().debt, 45);

    assert_eq!(client.get_reserve_state(&asset_a).total_supplied, 58);
    assert_eq!(client.get_reserve_state(&asset_b).total_borrowed, 45);
}

#[test]
fn test_close_factor_bounds_single_call() {
    let env = create_test_env();
    let (_contract_id, admin, client) = setup_engine(&env);
    let (asset_a, asset_b, borrower, liquidator) = underwater_position(&env, &client, &admin);

    // A at $1.05: health = 84 / 85 ≈ 0.988, above the full-close threshold,
    // so a single call may repay at most 50% of 85 = 42.
    client.set_price(&admin, &asset_a, &10_500_000);
    assert_eq!(client.get_health_factor(&borrower), 9_882);

    assert_eq!(
        client.try_liquidate(&liquidator, &borrower, &asset_b, &asset_a, &43),
        Err(Ok(ProtocolError::ExceedsCloseFactor))
    );

    // 42 of B converts to 40 of A, plus the bonus.
    let result = client.liquidate(&liquidator, &borrower, &asset_b, &asset_a, &42);
    assert_eq!(result, (42, 42));
}

#[test]
fn test_deep_insolvency_waives_close_factor() {
    let env = create_test_env();
    let (_contract_id, admin, client) = setup_engine(&env);
    let (asset_a, asset_b, borrower, liquidator) = underwater_position(&env, &client, &admin);

    // A at $0.90: health = 72 / 85 ≈ 0.85, below the 0.95 full-close
    // threshold; the whole debt may be closed in one call.
    client.set_price(&admin, &asset_a, &9_000_000);

    let result = client.liquidate(&liquidator, &borrower, &asset_b, &asset_a, &85);
    // 85 of B converts to 94 of A, with bonus 98.
    assert_eq!(result, (85, 98));

    let entries = client.get_position(&borrower);
    assert!(find_entry(&entries, &asset_b).is_none());
    assert_eq!(find_entry(&entries, &asset_a).unwrap().supplied, 2);
    assert_eq!(client.get_reserve_state(&asset_b).total_borrowed, 0);
}

#[test]
fn test_seize_capped_at_borrower_collateral() {
    let env = create_test_env();
    let (_contract_id, admin, client) = setup_engine(&env);
    let (asset_a, asset_b, borrower, liquidator) = underwater_position(&env, &client, &admin);

    // A crashes to $0.50; the bonus-inflated claim (178) exceeds the
    // borrower's 100 of collateral and is capped silently.
    client.set_price(&admin, &asset_a, &5_000_000);

    let result = client.liquidate(&liquidator, &borrower, &asset_b, &asset_a, &85);
    assert_eq!(result, (85, 100));

    // Both sides of the position are emptied and pruned.
    assert_eq!(client.get_position(&borrower).len(), 0);
    assert_eq!(client.get_reserve_state(&asset_a).total_supplied, 0);
}

#[test]
fn test_healthy_position_not_liquidatable() {
    let env = create_test_env();
    let (_contract_id, admin, client) = setup_engine(&env);
    let (asset_a, asset_b, borrower, liquidator) = underwater_position(&env, &client, &admin);

    assert_eq!(
        client.try_liquidate(&liquidator, &borrower, &asset_b, &asset_a, &10),
        Err(Ok(ProtocolError::NotLiquidatable))
    );
}

#[test]
fn test_wrong_debt_asset() {
    let env = create_test_env();
    let (_contract_id, admin, client) = setup_engine(&env);
    let (asset_a, _asset_b, borrower, liquidator) = underwater_position(&env, &client, &admin);

    client.set_price(&admin, &asset_a, &PRICE_ONE);

    // The borrower's debt is in B, not A.
    assert_eq!(
        client.try_liquidate(&liquidator, &borrower, &asset_a, &asset_a, &10),
        Err(Ok(ProtocolError::NoDebtToRepay))
    );
}

#[test]
fn test_liquidate_rejects_nonpositive_amount() {
    let env = create_test_env();
    let (_contract_id, admin, client) = setup_engine(&env);
    let (asset_a, asset_b, borrower, liquidator) = underwater_position(&env, &client, &admin);

    assert_eq!(
        client.try_liquidate(&liquidator, &borrower, &asset_b, &asset_a, &0),
        Err(Ok(ProtocolError::InvalidAmount))
    );
}

#[test]
fn test_same_asset_liquidation() {
    let env = create_test_env();
    let (_contract_id, admin, client) = setup_engine(&env);
    let asset = register_asset(&env, &client, &admin, &default_params(), PRICE_ONE);

    let borrower = Address::generate(&env);
    client.deposit(&borrower, &asset, &100);
    client.borrow(&borrower, &asset, &60);

    // Same-asset positions cannot go underwater on price alone; a
    // parameter tightening makes this one liquidatable.
    let mut params = default_params();
    params.collateral_factor_bps = 4_000;
    params.liquidation_threshold_bps = 5_000;
    client.set_asset_params(&admin, &asset, &params);
    // Health = 50 / 60 ≈ 0.83, below full-close.

    let result = client.liquidate(&Address::generate(&env), &borrower, &asset, &asset, &60);
    assert_eq!(result, (60, 63));

    let entries = client.get_position(&borrower);
    assert_eq!(find_entry(&entries, &asset).unwrap().supplied, 37);
    assert_eq!(find_entry(&entries, &asset).unwrap().debt, 0);

    let reserve = client.get_reserve_state(&asset);
    assert_eq!(reserve.total_supplied, 37);
    assert_eq!(reserve.total_borrowed, 0);
}

#[test]
fn test_failed_liquidation_leaves_no_state() {
    let env = create_test_env();
    let (_contract_id, admin, client) = setup_engine(&env);
    let (asset_a, asset_b, borrower, liquidator) = underwater_position(&env, &client, &admin);

    client.set_price(&admin, &asset_a, &10_500_000);
    let _ = client.try_liquidate(&liquidator, &borrower, &asset_b, &asset_a, &43);

    let entries = client.get_position(&borrower);
    assert_eq!(find_entry(&entries, &asset_a).unwrap().supplied, 100);
    assert_eq!(find_entry(&entries, &asset_b).unwrap().debt, 85);
}
