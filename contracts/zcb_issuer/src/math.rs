//! Overflow-safe arithmetic helpers for unit pricing, fees and payouts.
//!
//! Every helper uses checked arithmetic and surfaces failures as
//! `ContractError::Overflow` / `ContractError::Underflow` so callers can
//! propagate with `?`.

use zcb_errors::ContractError;

/// Percentages are whole numbers out of 100.
pub const PERCENT_DENOMINATOR: u32 = 100;

#[inline]
pub fn add_i128(a: i128, b: i128) -> Result<i128, ContractError> {
    a.checked_add(b).ok_or(ContractError::Overflow)
}

#[inline]
pub fn sub_i128(a: i128, b: i128) -> Result<i128, ContractError> {
    a.checked_sub(b).ok_or(ContractError::Underflow)
}

#[inline]
pub fn mul_i128(a: i128, b: i128) -> Result<i128, ContractError> {
    a.checked_mul(b).ok_or(ContractError::Overflow)
}

#[inline]
pub fn add_u32(a: u32, b: u32) -> Result<u32, ContractError> {
    a.checked_add(b).ok_or(ContractError::Overflow)
}

#[inline]
pub fn sub_u32(a: u32, b: u32) -> Result<u32, ContractError> {
    a.checked_sub(b).ok_or(ContractError::Underflow)
}

#[inline]
pub fn add_u64(a: u64, b: u64) -> Result<u64, ContractError> {
    a.checked_add(b).ok_or(ContractError::Overflow)
}

/// Rejects percentages above 100.
pub fn validate_pct(pct: u32) -> Result<(), ContractError> {
    if pct > PERCENT_DENOMINATOR {
        return Err(ContractError::InvalidPercentage);
    }
    Ok(())
}

/// `amount * pct / 100`, truncating toward zero.
pub fn pct_of(amount: i128, pct: u32) -> Result<i128, ContractError> {
    let numerator = mul_i128(amount, pct as i128)?;
    Ok(numerator / PERCENT_DENOMINATOR as i128)
}

/// Splits `amount` into `(fee, net)` with `fee + net == amount`.
///
/// The truncation remainder always lands in `net`, so the fee never exceeds
/// the exact percentage.
pub fn split_fee(amount: i128, pct: u32) -> Result<(i128, i128), ContractError> {
    validate_pct(pct)?;
    let fee = pct_of(amount, pct)?;
    let net = sub_i128(amount, fee)?;
    Ok((fee, net))
}

/// Unit price after the early-redemption penalty:
/// `principal * (100 - penalty_pct) / 100`.
pub fn after_penalty(principal: i128, penalty_pct: u32) -> Result<i128, ContractError> {
    validate_pct(penalty_pct)?;
    pct_of(principal, PERCENT_DENOMINATOR - penalty_pct)
}

/// Total price of `count` units at `unit_price` each.
pub fn cost_of(unit_price: i128, count: u32) -> Result<i128, ContractError> {
    mul_i128(unit_price, count as i128)
}
