//! Administrative collaborator surface: initialization, per-asset risk and
//! rate parameters, protocol-wide policy. Parameter writes are validated
//! here so every later read can trust the stored snapshot.

use soroban_sdk::{Address, Env};

use crate::errors::ProtocolError;
use crate::events::{
    emit_asset_params_updated, emit_initialized, emit_protocol_config_updated,
    AssetParamsUpdatedEvent, InitializedEvent, ProtocolConfigUpdatedEvent,
};
use crate::interest;
use crate::ledger;
use crate::math::{BPS_SCALE, ONE};
use crate::storage;
use crate::types::{AssetParams, ProtocolConfig, Reserve};

/// Default policy: 50% close factor, full closure below health 0.95,
/// one-hour price staleness bound.
fn default_config() -> ProtocolConfig {
    ProtocolConfig {
        close_factor_bps: 5_000,
        full_close_health_bps: 9_500,
        max_price_age: 3_600,
    }
}

/// Initialize the engine with its admin address.
///
/// # Errors
/// * `AlreadyInitialized` — an admin is already set.
pub fn initialize(env: &Env, admin: Address) -> Result<(), ProtocolError> {
    admin.require_auth();
    if storage::has_admin(env) {
        return Err(ProtocolError::AlreadyInitialized);
    }
    storage::set_admin(env, &admin);
    storage::set_config(env, &default_config());
    emit_initialized(
        env,
        InitializedEvent {
            admin,
            timestamp: env.ledger().timestamp(),
        },
    );
    Ok(())
}

fn require_admin(env: &Env, caller: &Address) -> Result<(), ProtocolError> {
    caller.require_auth();
    let admin = storage::get_admin(env)?;
    if caller != &admin {
        return Err(ProtocolError::Unauthorized);
    }
    Ok(())
}

fn validate_params(params: &AssetParams) -> Result<(), ProtocolError> {
    // The collateral factor must leave a margin below the liquidation
    // threshold, and both are fractions of 1.
    if params.collateral_factor_bps <= 0
        || params.collateral_factor_bps >= params.liquidation_threshold_bps
        || params.liquidation_threshold_bps > BPS_SCALE
    {
        return Err(ProtocolError::InvalidRiskParameters);
    }
    if params.liquidation_bonus_bps < 0 || params.liquidation_bonus_bps > BPS_SCALE {
        return Err(ProtocolError::InvalidRiskParameters);
    }
    if params.reserve_factor_bps < 0 || params.reserve_factor_bps > BPS_SCALE {
        return Err(ProtocolError::InvalidRiskParameters);
    }
    if params.base_rate_bps < 0 || params.slope1_bps < 0 || params.slope2_bps < 0 {
        return Err(ProtocolError::InvalidRiskParameters);
    }
    if params.optimal_utilization_bps <= 0 || params.optimal_utilization_bps >= BPS_SCALE {
        return Err(ProtocolError::InvalidRiskParameters);
    }
    Ok(())
}

/// Register or update an asset's risk and rate parameters. The asset's
/// reserve is created with both indexes at 1 on first registration; on an
/// update, time elapsed under the old curve is settled at the old rates
/// before the new parameters take effect.
///
/// # Errors
/// * `Unauthorized` — caller is not the admin.
/// * `InvalidRiskParameters` — the constraint
///   `0 < collateral factor < liquidation threshold <= 1` (or a rate-curve
///   bound) is violated.
pub fn set_asset_params(
    env: &Env,
    caller: Address,
    asset: Address,
    params: AssetParams,
) -> Result<(), ProtocolError> {
    require_admin(env, &caller)?;
    validate_params(&params)?;

    let now = env.ledger().timestamp();
    if storage::has_reserve(env, &asset) {
        let old_params = storage::get_params(env, &asset)?;
        let stored = storage::get_reserve(env, &asset)?;
        let (reserve, interest_accrued) = interest::accrue_reserve(&old_params, &stored, now)?;
        ledger::commit_reserve(env, &asset, &reserve, interest_accrued);
    } else {
        storage::set_reserve(
            env,
            &asset,
            &Reserve {
                total_supplied: 0,
                total_borrowed: 0,
                borrow_index: ONE,
                supply_index: ONE,
                protocol_reserve: 0,
                last_update: now,
            },
        );
    }
    storage::set_params(env, &asset, &params);

    emit_asset_params_updated(
        env,
        AssetParamsUpdatedEvent {
            actor: caller,
            asset,
            timestamp: now,
        },
    );
    Ok(())
}

/// Update the protocol-wide policy configuration.
///
/// # Errors
/// * `Unauthorized` — caller is not the admin.
/// * `InvalidRiskParameters` — a bound is out of range.
pub fn set_protocol_config(
    env: &Env,
    caller: Address,
    config: ProtocolConfig,
) -> Result<(), ProtocolError> {
    require_admin(env, &caller)?;
    if config.close_factor_bps <= 0 || config.close_factor_bps > BPS_SCALE {
        return Err(ProtocolError::InvalidRiskParameters);
    }
    if config.full_close_health_bps < 0 || config.full_close_health_bps > BPS_SCALE {
        return Err(ProtocolError::InvalidRiskParameters);
    }
    if config.max_price_age == 0 {
        return Err(ProtocolError::InvalidRiskParameters);
    }
    storage::set_config(env, &config);

    emit_protocol_config_updated(
        env,
        ProtocolConfigUpdatedEvent {
            actor: caller,
            timestamp: env.ledger().timestamp(),
        },
    );
    Ok(())
}
