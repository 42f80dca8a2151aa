#![cfg(test)]

use crate::math::*;
use crate::ContractError;

#[test]
fn test_split_fee_sums_to_amount() {
    for (amount, pct) in [(100_i128, 50_u32), (91, 33), (7, 1), (1, 99), (0, 10), (999, 100)] {
        let (fee, net) = split_fee(amount, pct).unwrap();
        assert_eq!(fee + net, amount);
        assert!(fee <= amount * pct as i128 / 100);
    }
}

#[test]
fn test_split_fee_truncates_toward_net() {
    assert_eq!(split_fee(91, 33).unwrap(), (30, 61));
    assert_eq!(split_fee(5, 50).unwrap(), (2, 3));
}

#[test]
fn test_split_fee_edges() {
    assert_eq!(split_fee(1_000, 0).unwrap(), (0, 1_000));
    assert_eq!(split_fee(1_000, 100).unwrap(), (1_000, 0));
    assert_eq!(split_fee(1_000, 101), Err(ContractError::InvalidPercentage));
}

#[test]
fn test_after_penalty() {
    let one = 1_000_000_000_000_000_000_i128;
    assert_eq!(after_penalty(10 * one, 25).unwrap(), 7_500_000_000_000_000_000);
    assert_eq!(after_penalty(10 * one, 0).unwrap(), 10 * one);
    assert_eq!(after_penalty(10 * one, 100).unwrap(), 0);
    assert_eq!(after_penalty(3, 50).unwrap(), 1);
    assert_eq!(after_penalty(3, 200), Err(ContractError::InvalidPercentage));
}

#[test]
fn test_cost_of() {
    assert_eq!(cost_of(10, 7).unwrap(), 70);
    assert_eq!(cost_of(i128::MAX, 2), Err(ContractError::Overflow));
}

#[test]
fn test_checked_helpers() {
    assert_eq!(add_i128(i128::MAX, 1), Err(ContractError::Overflow));
    assert_eq!(sub_i128(i128::MIN, 1), Err(ContractError::Underflow));
    assert_eq!(sub_u32(0, 1), Err(ContractError::Underflow));
    assert_eq!(add_u32(u32::MAX, 1), Err(ContractError::Overflow));
    assert_eq!(add_u64(u64::MAX, 1), Err(ContractError::Overflow));
    assert_eq!(add_u64(2, 3), Ok(5));
}

#[test]
fn test_pct_of_large_amount_overflows() {
    assert_eq!(pct_of(i128::MAX, 2), Err(ContractError::Overflow));
    assert_eq!(pct_of(i128::MAX, 1).unwrap(), i128::MAX / 100);
}
