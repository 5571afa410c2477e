//! Typed persistent-storage keys and load/save helpers.
//!
//! Soroban persistent storage is a flat key-value map; everything the
//! engine stores is namespaced under a variant of [`DataKey`] to avoid
//! collisions.

use soroban_sdk::{contracttype, Address, Env, Map};

use crate::errors::ProtocolError;
use crate::types::{AssetParams, Position, PriceFeed, ProtocolConfig, Reserve};

/// Top-level storage keys used by the engine.
#[contracttype]
#[derive(Clone)]
#[cfg_attr(test, derive(Debug, PartialEq))]
pub enum DataKey {
    /// Admin address; presence marks the contract as initialised.
    Admin,
    /// Protocol-wide policy configuration.
    Config,
    /// Risk and rate parameters per asset.
    Params(Address),
    /// Reserve state per asset.
    Reserve(Address),
    /// Account position, keyed by account address.
    Position(Address),
    /// Posted oracle price per asset.
    Price(Address),
}

pub fn has_admin(env: &Env) -> bool {
    env.storage().persistent().has(&DataKey::Admin)
}

pub fn get_admin(env: &Env) -> Result<Address, ProtocolError> {
    env.storage()
        .persistent()
        .get(&DataKey::Admin)
        .ok_or(ProtocolError::NotInitialized)
}

pub fn set_admin(env: &Env, admin: &Address) {
    env.storage().persistent().set(&DataKey::Admin, admin);
}

pub fn get_config(env: &Env) -> Result<ProtocolConfig, ProtocolError> {
    env.storage()
        .persistent()
        .get(&DataKey::Config)
        .ok_or(ProtocolError::NotInitialized)
}

pub fn set_config(env: &Env, config: &ProtocolConfig) {
    env.storage().persistent().set(&DataKey::Config, config);
}

pub fn get_params(env: &Env, asset: &Address) -> Result<AssetParams, ProtocolError> {
    env.storage()
        .persistent()
        .get(&DataKey::Params(asset.clone()))
        .ok_or(ProtocolError::AssetNotConfigured)
}

pub fn set_params(env: &Env, asset: &Address, params: &AssetParams) {
    env.storage()
        .persistent()
        .set(&DataKey::Params(asset.clone()), params);
}

pub fn has_reserve(env: &Env, asset: &Address) -> bool {
    env.storage()
        .persistent()
        .has(&DataKey::Reserve(asset.clone()))
}

pub fn get_reserve(env: &Env, asset: &Address) -> Result<Reserve, ProtocolError> {
    env.storage()
        .persistent()
        .get(&DataKey::Reserve(asset.clone()))
        .ok_or(ProtocolError::AssetNotConfigured)
}

pub fn set_reserve(env: &Env, asset: &Address, reserve: &Reserve) {
    env.storage()
        .persistent()
        .set(&DataKey::Reserve(asset.clone()), reserve);
}

/// Load an account's position, or a fresh empty one for a new account.
pub fn get_position(env: &Env, account: &Address) -> Position {
    env.storage()
        .persistent()
        .get(&DataKey::Position(account.clone()))
        .unwrap_or_else(|| Position {
            supply_shares: Map::new(env),
            borrowed: Map::new(env),
        })
}

pub fn set_position(env: &Env, account: &Address, position: &Position) {
    env.storage()
        .persistent()
        .set(&DataKey::Position(account.clone()), position);
}

pub fn get_price_feed(env: &Env, asset: &Address) -> Option<PriceFeed> {
    env.storage()
        .persistent()
        .get(&DataKey::Price(asset.clone()))
}

pub fn set_price_feed(env: &Env, asset: &Address, feed: &PriceFeed) {
    env.storage()
        .persistent()
        .set(&DataKey::Price(asset.clone()), feed);
}
