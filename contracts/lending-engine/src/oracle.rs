//! # Oracle Price Consumption
//!
//! The engine consumes posted price values; it does not implement an
//! oracle. Prices arrive through `set_price` (admin-gated) and are read
//! through [`validated_price`], an explicit fallible read that returns a
//! validated `(price, age)` pair or a specific failure — never a sentinel
//! price.

use soroban_sdk::{Address, Env};

use crate::errors::ProtocolError;
use crate::events::{emit_price_updated, PriceUpdatedEvent};
use crate::storage;
use crate::types::{PriceFeed, ValidatedPrice};

/// Post a new price for an asset.
///
/// # Errors
/// * `Unauthorized` — caller is not the admin.
/// * `InvalidPrice` — price is zero or negative.
pub fn set_price(
    env: &Env,
    caller: Address,
    asset: Address,
    price: i128,
) -> Result<(), ProtocolError> {
    caller.require_auth();
    let admin = storage::get_admin(env)?;
    if caller != admin {
        return Err(ProtocolError::Unauthorized);
    }
    if price <= 0 {
        return Err(ProtocolError::InvalidPrice);
    }

    let timestamp = env.ledger().timestamp();
    storage::set_price_feed(
        env,
        &asset,
        &PriceFeed {
            price,
            updated_at: timestamp,
        },
    );

    emit_price_updated(
        env,
        PriceUpdatedEvent {
            actor: caller,
            asset,
            price,
            timestamp,
        },
    );
    Ok(())
}

/// Read the price for an asset, enforcing the staleness bound.
///
/// # Errors
/// * `MissingPriceData` — no price has been posted for the asset.
/// * `StalePriceData` — the posted price is older than `max_age` seconds.
pub fn validated_price(
    env: &Env,
    asset: &Address,
    now: u64,
    max_age: u64,
) -> Result<ValidatedPrice, ProtocolError> {
    let feed = storage::get_price_feed(env, asset).ok_or(ProtocolError::MissingPriceData)?;
    if feed.price <= 0 {
        return Err(ProtocolError::MissingPriceData);
    }
    // A feed stamped in the future is treated as stale rather than fresh.
    if feed.updated_at > now {
        return Err(ProtocolError::StalePriceData);
    }
    let age = now - feed.updated_at;
    if age > max_age {
        return Err(ProtocolError::StalePriceData);
    }
    Ok(ValidatedPrice {
        price: feed.price,
        age,
    })
}
