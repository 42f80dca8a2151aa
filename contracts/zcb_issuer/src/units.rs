//! Unit ownership ledger.
//!
//! Each purchased unit has its own id (quantity 1). Ownership entries are
//! created on purchase and removed on redemption; the purchase tick is
//! written once and kept so a burned id can still be told apart from one
//! that was never minted.
//!
//! Writers take the `ttl` of the owning series (`storage::entry_ttl`) so a
//! unit's entries outlive its maturity.

use crate::math;
use crate::storage::{BUMP_TARGET, BUMP_THRESHOLD};
use crate::types::DataKey;
use soroban_sdk::{Address, Env, Map, TryFromVal, Val, Vec};
use zcb_errors::ContractError;

/// Upper bound on units minted, moved or burned by a single call.
pub const MAX_UNITS_PER_CALL: u32 = 100;

/// Reads a unit entry, refreshing its TTL once it falls below a day.
fn read_bumped<V: TryFromVal<Env, Val>>(e: &Env, key: &DataKey) -> Option<V> {
    let storage = e.storage().persistent();
    let value = storage.get(key)?;
    storage.extend_ttl(key, BUMP_THRESHOLD, BUMP_TARGET);
    Some(value)
}

pub fn owner_of(e: &Env, series_id: u64, unit_id: u64) -> Option<Address> {
    read_bumped(e, &DataKey::UnitOwner(series_id, unit_id))
}

pub fn purchase_tick(e: &Env, series_id: u64, unit_id: u64) -> Option<u32> {
    read_bumped(e, &DataKey::PurchaseTick(series_id, unit_id))
}

pub fn balance_of(e: &Env, series_id: u64, holder: &Address) -> u32 {
    read_bumped(e, &DataKey::Holding(series_id, holder.clone())).unwrap_or(0)
}

fn set_balance(e: &Env, series_id: u64, holder: &Address, balance: u32, ttl: u32) {
    let key = DataKey::Holding(series_id, holder.clone());
    if balance == 0 {
        e.storage().persistent().remove(&key);
        return;
    }
    e.storage().persistent().set(&key, &balance);
    e.storage().persistent().extend_ttl(&key, BUMP_THRESHOLD, ttl);
}

fn set_owner(e: &Env, series_id: u64, unit_id: u64, holder: &Address, ttl: u32) {
    let key = DataKey::UnitOwner(series_id, unit_id);
    e.storage().persistent().set(&key, holder);
    e.storage().persistent().extend_ttl(&key, BUMP_THRESHOLD, ttl);
}

fn extend_tick(e: &Env, series_id: u64, unit_id: u64, ttl: u32) {
    e.storage().persistent().extend_ttl(
        &DataKey::PurchaseTick(series_id, unit_id),
        BUMP_THRESHOLD,
        ttl,
    );
}

/// Rejects a zero count, a count above the per-call cap, or a count that
/// disagrees with the number of ids supplied.
pub fn validate_count(count: u32, ids_len: u32) -> Result<(), ContractError> {
    if count == 0 || count > MAX_UNITS_PER_CALL || count != ids_len {
        return Err(ContractError::InvalidCount);
    }
    Ok(())
}

/// Checks that `holder` currently owns every id in `unit_ids`.
///
/// Fails with `UnitNotFound` for ids at or beyond `next_index`,
/// `AlreadyRedeemed` for burned ids (or an id repeated within the list) and
/// `NotOwner` for ids held by someone else. Performs no writes.
pub fn require_held(
    e: &Env,
    series_id: u64,
    next_index: u64,
    holder: &Address,
    unit_ids: &Vec<u64>,
) -> Result<(), ContractError> {
    let mut seen: Map<u64, bool> = Map::new(e);
    for unit_id in unit_ids.iter() {
        if unit_id >= next_index {
            return Err(ContractError::UnitNotFound);
        }
        if seen.contains_key(unit_id) {
            return Err(ContractError::AlreadyRedeemed);
        }
        seen.set(unit_id, true);

        match owner_of(e, series_id, unit_id) {
            None => return Err(ContractError::AlreadyRedeemed),
            Some(current) if current != *holder => return Err(ContractError::NotOwner),
            Some(_) => {}
        }
    }
    Ok(())
}

/// Assigns ids `[first_id, first_id + count)` to `to`, stamped with `tick`.
/// Returns the next free id.
pub fn mint(
    e: &Env,
    series_id: u64,
    to: &Address,
    first_id: u64,
    count: u32,
    tick: u32,
    ttl: u32,
) -> Result<u64, ContractError> {
    let end = math::add_u64(first_id, count as u64)?;
    for unit_id in first_id..end {
        set_owner(e, series_id, unit_id, to, ttl);
        e.storage()
            .persistent()
            .set(&DataKey::PurchaseTick(series_id, unit_id), &tick);
        extend_tick(e, series_id, unit_id, ttl);
    }
    let balance = math::add_u32(balance_of(e, series_id, to), count)?;
    set_balance(e, series_id, to, balance, ttl);
    Ok(end)
}

/// Removes `holder`'s ownership of each id. Callers must run
/// `require_held` first.
pub fn burn(
    e: &Env,
    series_id: u64,
    holder: &Address,
    unit_ids: &Vec<u64>,
    ttl: u32,
) -> Result<(), ContractError> {
    for unit_id in unit_ids.iter() {
        e.storage()
            .persistent()
            .remove(&DataKey::UnitOwner(series_id, unit_id));
    }
    let balance = math::sub_u32(balance_of(e, series_id, holder), unit_ids.len())?;
    set_balance(e, series_id, holder, balance, ttl);
    Ok(())
}

/// Moves each id from `from` to `to` and refreshes its purchase tick.
/// Callers must run `require_held` first.
pub fn reassign(
    e: &Env,
    series_id: u64,
    from: &Address,
    to: &Address,
    unit_ids: &Vec<u64>,
    ttl: u32,
) -> Result<(), ContractError> {
    for unit_id in unit_ids.iter() {
        set_owner(e, series_id, unit_id, to, ttl);
        extend_tick(e, series_id, unit_id, ttl);
    }
    let moved = unit_ids.len();
    let from_balance = math::sub_u32(balance_of(e, series_id, from), moved)?;
    set_balance(e, series_id, from, from_balance, ttl);
    let to_balance = math::add_u32(balance_of(e, series_id, to), moved)?;
    set_balance(e, series_id, to, to_balance, ttl);
    Ok(())
}
