//! Storage access for issuer configuration, series records and reserves.
//!
//! | Key                         | Tier           |
//! |-----------------------------|----------------|
//! | `Owner`, `FeeToken`, `FeeConfig`, `Vault`, `SeriesCount` | `instance()` |
//! | `Series(id)`                | `persistent()` |
//! | `Reserve(id, token)`        | `persistent()` |
//!
//! Unit entries are handled in `units.rs`.

use crate::math;
use crate::types::{BondSeries, DataKey, FeeConfig};
use soroban_sdk::{Address, Env};
use zcb_errors::ContractError;

/// Minimum ledger sequence TTL before a bump is requested (~1 day at 5 s/ledger).
pub const BUMP_THRESHOLD: u32 = 17_280;
/// Target TTL after a bump (~30 days).
pub const BUMP_TARGET: u32 = 518_400;
/// Instance storage is refreshed on any call made more than a day after the
/// last refresh.
const INSTANCE_BUMP_THRESHOLD: u32 = BUMP_TARGET - BUMP_THRESHOLD;

/// TTL for entries a unit needs at redemption. Outlives `maturity_threshold`
/// by a day and is clamped to `[BUMP_TARGET, max_ttl]`.
pub fn entry_ttl(e: &Env, maturity_threshold: u32) -> u32 {
    maturity_threshold
        .saturating_add(BUMP_THRESHOLD)
        .max(BUMP_TARGET)
        .min(e.storage().max_ttl())
}

/// Keep the contract instance (and the config in it) alive.
pub fn bump_instance(e: &Env) {
    e.storage()
        .instance()
        .extend_ttl(INSTANCE_BUMP_THRESHOLD, BUMP_TARGET);
}

// ─── Instance ──────────────────────────────────────────────────────────────

pub fn is_initialized(e: &Env) -> bool {
    e.storage().instance().has(&DataKey::Owner)
}

pub fn init(e: &Env, owner: &Address, fee_token: &Address, cfg: &FeeConfig) {
    let instance = e.storage().instance();
    instance.set(&DataKey::Owner, owner);
    instance.set(&DataKey::FeeToken, fee_token);
    instance.set(&DataKey::FeeConfig, cfg);
    instance.set(&DataKey::SeriesCount, &0_u64);
    bump_instance(e);
}

pub fn owner(e: &Env) -> Result<Address, ContractError> {
    e.storage()
        .instance()
        .get(&DataKey::Owner)
        .ok_or(ContractError::NotInitialized)
}

pub fn fee_token(e: &Env) -> Result<Address, ContractError> {
    e.storage()
        .instance()
        .get(&DataKey::FeeToken)
        .ok_or(ContractError::NotInitialized)
}

pub fn fee_config(e: &Env) -> Result<FeeConfig, ContractError> {
    e.storage()
        .instance()
        .get(&DataKey::FeeConfig)
        .ok_or(ContractError::NotInitialized)
}

pub fn vault(e: &Env) -> Option<Address> {
    e.storage().instance().get(&DataKey::Vault)
}

pub fn set_vault(e: &Env, vault: &Address) {
    e.storage().instance().set(&DataKey::Vault, vault);
}

pub fn series_count(e: &Env) -> u64 {
    e.storage()
        .instance()
        .get(&DataKey::SeriesCount)
        .unwrap_or(0)
}

/// Reserves the next series id.
pub fn next_series_id(e: &Env) -> Result<u64, ContractError> {
    let id = series_count(e);
    e.storage()
        .instance()
        .set(&DataKey::SeriesCount, &math::add_u64(id, 1)?);
    Ok(id)
}

// ─── Series ────────────────────────────────────────────────────────────────

/// Read a series and bump its TTL, or return `SeriesNotFound`.
pub fn load_series(e: &Env, series_id: u64) -> Result<BondSeries, ContractError> {
    let key = DataKey::Series(series_id);
    let storage = e.storage().persistent();
    let series: BondSeries = storage.get(&key).ok_or(ContractError::SeriesNotFound)?;
    storage.extend_ttl(&key, BUMP_THRESHOLD, entry_ttl(e, series.maturity_threshold));
    Ok(series)
}

pub fn save_series(e: &Env, series_id: u64, series: &BondSeries) {
    let key = DataKey::Series(series_id);
    e.storage().persistent().set(&key, series);
    e.storage().persistent().extend_ttl(
        &key,
        BUMP_THRESHOLD,
        entry_ttl(e, series.maturity_threshold),
    );
}

// ─── Reserves ──────────────────────────────────────────────────────────────

/// Amount of `token` booked to a series; bumps the entry when present.
pub fn reserve(e: &Env, series_id: u64, token: &Address) -> i128 {
    let key = DataKey::Reserve(series_id, token.clone());
    let storage = e.storage().persistent();
    match storage.get::<_, i128>(&key) {
        Some(amount) => {
            storage.extend_ttl(&key, BUMP_THRESHOLD, BUMP_TARGET);
            amount
        }
        None => 0,
    }
}

fn set_reserve(e: &Env, series_id: u64, token: &Address, amount: i128, ttl: u32) {
    let key = DataKey::Reserve(series_id, token.clone());
    e.storage().persistent().set(&key, &amount);
    e.storage()
        .persistent()
        .extend_ttl(&key, BUMP_THRESHOLD, ttl);
}

/// Adds to a series reserve. `ttl` comes from `entry_ttl` for the series.
pub fn credit_reserve(
    e: &Env,
    series_id: u64,
    token: &Address,
    amount: i128,
    ttl: u32,
) -> Result<i128, ContractError> {
    let updated = math::add_i128(reserve(e, series_id, token), amount)?;
    set_reserve(e, series_id, token, updated, ttl);
    Ok(updated)
}

pub fn debit_reserve(
    e: &Env,
    series_id: u64,
    token: &Address,
    amount: i128,
    ttl: u32,
) -> Result<i128, ContractError> {
    let current = reserve(e, series_id, token);
    if current < amount {
        return Err(ContractError::InsufficientLiquidity);
    }
    let updated = math::sub_i128(current, amount)?;
    set_reserve(e, series_id, token, updated, ttl);
    Ok(updated)
}
