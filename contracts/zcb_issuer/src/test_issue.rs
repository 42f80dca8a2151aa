//! Issuer initialization, vault binding and series creation.

#![cfg(test)]

use crate::test_helpers::*;
use crate::{ContractError, FeeConfig, ZeroCouponIssuer, ZeroCouponIssuerClient};
use soroban_sdk::testutils::Address as _;
use soroban_sdk::{Address, Env};

// ═══════════════════════════════════════════════════════════════════
// 1. Initialization
// ═══════════════════════════════════════════════════════════════════

#[test]
fn test_initialize_stores_config() {
    let e = Env::default();
    let s = setup(&e);

    assert_eq!(s.client.owner(), s.issuer_owner);
    assert_eq!(s.client.fee_token(), s.fee_token);
    assert_eq!(s.client.fee_config(), default_fee_config());
    assert_eq!(s.client.vault(), None);
    assert_eq!(s.client.series_count(), 0);
}

#[test]
fn test_initialize_twice_fails() {
    let e = Env::default();
    let s = setup(&e);
    assert_eq!(
        s.client
            .try_initialize(&s.issuer_owner, &s.fee_token, &default_fee_config()),
        Err(Ok(ContractError::AlreadyInitialized))
    );
}

#[test]
fn test_initialize_rejects_percentage_above_100() {
    let e = Env::default();
    e.mock_all_auths();
    let contract_id = e.register(ZeroCouponIssuer, ());
    let client = ZeroCouponIssuerClient::new(&e, &contract_id);
    let owner = Address::generate(&e);
    let token = Address::generate(&e);

    let bad_purchase = FeeConfig {
        issuance_fee: 0,
        vault_purchase_fee_pct: 101,
        early_redemption_fee_pct: 0,
    };
    assert_eq!(
        client.try_initialize(&owner, &token, &bad_purchase),
        Err(Ok(ContractError::InvalidPercentage))
    );

    let bad_early = FeeConfig {
        issuance_fee: 0,
        vault_purchase_fee_pct: 0,
        early_redemption_fee_pct: 150,
    };
    assert_eq!(
        client.try_initialize(&owner, &token, &bad_early),
        Err(Ok(ContractError::InvalidPercentage))
    );
}

#[test]
fn test_initialize_rejects_negative_issuance_fee() {
    let e = Env::default();
    e.mock_all_auths();
    let contract_id = e.register(ZeroCouponIssuer, ());
    let client = ZeroCouponIssuerClient::new(&e, &contract_id);
    let cfg = FeeConfig {
        issuance_fee: -1,
        vault_purchase_fee_pct: 0,
        early_redemption_fee_pct: 0,
    };
    assert_eq!(
        client.try_initialize(&Address::generate(&e), &Address::generate(&e), &cfg),
        Err(Ok(ContractError::InvalidAmount))
    );
}

#[test]
fn test_create_before_initialize_fails() {
    let e = Env::default();
    e.mock_all_auths();
    let contract_id = e.register(ZeroCouponIssuer, ());
    let client = ZeroCouponIssuerClient::new(&e, &contract_id);
    let token = Address::generate(&e);
    assert_eq!(
        client.try_create(
            &Address::generate(&e),
            &TOTAL,
            &MATURITY,
            &token,
            &INVESTMENT,
            &token,
            &INTEREST,
            &0_i128,
        ),
        Err(Ok(ContractError::NotInitialized))
    );
}

// ═══════════════════════════════════════════════════════════════════
// 2. Vault binding
// ═══════════════════════════════════════════════════════════════════

#[test]
fn test_bind_vault_once() {
    let e = Env::default();
    let s = setup(&e);
    let (vault, vault_id) = new_vault(&e);

    s.client.bind_vault(&s.issuer_owner, &vault_id);
    assert_eq!(s.client.vault(), Some(vault_id.clone()));
    assert_eq!(vault.issuer(), s.contract_id);

    let (_other, other_id) = new_vault(&e);
    assert_eq!(
        s.client.try_bind_vault(&s.issuer_owner, &other_id),
        Err(Ok(ContractError::VaultAlreadyBound))
    );
    assert_eq!(s.client.vault(), Some(vault_id));
}

#[test]
fn test_bind_vault_accepts_vault_already_claimed_for_this_issuer() {
    let e = Env::default();
    let s = setup(&e);
    let (vault, vault_id) = new_vault(&e);
    vault.initialize(&s.contract_id);

    s.client.bind_vault(&s.issuer_owner, &vault_id);
    assert_eq!(s.client.vault(), Some(vault_id));
}

#[test]
fn test_bind_vault_rejects_vault_of_another_issuer() {
    let e = Env::default();
    let s = setup(&e);
    let (vault, vault_id) = new_vault(&e);
    // Claimed first for someone else.
    let squatter = Address::generate(&e);
    vault.initialize(&squatter);

    assert_eq!(
        s.client.try_bind_vault(&s.issuer_owner, &vault_id),
        Err(Ok(ContractError::VaultAlreadyBound))
    );
    assert_eq!(s.client.vault(), None);
    assert_eq!(vault.issuer(), squatter);
}

#[test]
fn test_bind_vault_requires_issuer_owner() {
    let e = Env::default();
    let s = setup(&e);
    let impostor = Address::generate(&e);
    let (_vault, vault_id) = new_vault(&e);
    assert_eq!(
        s.client.try_bind_vault(&impostor, &vault_id),
        Err(Ok(ContractError::NotIssuerOwner))
    );
    assert_eq!(s.client.vault(), None);
}

#[test]
fn test_series_snapshots_vault_at_creation() {
    let e = Env::default();
    let s = setup(&e);

    let before = s.issue_default();
    let (_vault, vault_id) = bind_vault(&e, &s);
    let after = s.issue_default();

    assert_eq!(s.client.get_series(&before).vault, None);
    assert_eq!(s.client.get_series(&after).vault, Some(vault_id));
}

// ═══════════════════════════════════════════════════════════════════
// 3. Series creation: happy path
// ═══════════════════════════════════════════════════════════════════

#[test]
fn test_create_forwards_issuance_fee_to_issuer_owner() {
    let e = Env::default();
    let s = setup(&e);
    let fee_token = s.fee_token_client(&e);

    let owner_before = fee_token.balance(&s.issuer_owner);
    let creator_before = fee_token.balance(&s.series_owner);

    s.issue_default();

    assert_eq!(fee_token.balance(&s.issuer_owner) - owner_before, ISSUANCE_FEE);
    assert_eq!(creator_before - fee_token.balance(&s.series_owner), ISSUANCE_FEE);
    assert_eq!(fee_token.balance(&s.contract_id), 0);
}

#[test]
fn test_create_initial_state() {
    let e = Env::default();
    let s = setup(&e);

    let series_id = s.issue_default();
    assert_eq!(series_id, 0);
    assert_eq!(s.client.series_count(), 1);

    let info = s.client.bond_info(&series_id);
    assert_eq!(info.total, TOTAL);
    assert_eq!(info.purchased, 0);
    assert_eq!(info.redeemed, 0);
    assert_eq!(info.unique_bond_index, 0);
    assert_eq!(info.maturity_threshold, MATURITY);
    assert!(!info.is_settled);
    assert_eq!(info.purchase_fee_pct, PURCHASE_FEE_PCT);
    assert_eq!(info.early_redemption_fee_pct, EARLY_FEE_PCT);

    let series = s.client.get_series(&series_id);
    assert_eq!(series.owner, s.series_owner);
    assert_eq!(series.created_at, START_TICK);
    assert!(!series.closed);
    assert_eq!(s.client.investment(&series_id).amount, INVESTMENT);
    assert_eq!(s.client.interest(&series_id).amount, INTEREST);
    assert_eq!(s.client.investment(&series_id).token, s.token);
}

#[test]
fn test_series_ids_are_sequential() {
    let e = Env::default();
    let s = setup(&e);
    assert_eq!(s.issue_default(), 0);
    assert_eq!(s.issue_default(), 1);
    assert_eq!(s.issue_default(), 2);
    assert_eq!(s.client.series_count(), 3);
}

#[test]
fn test_create_with_zero_issuance_fee() {
    let e = Env::default();
    let s = setup_with_config(
        &e,
        FeeConfig {
            issuance_fee: 0,
            vault_purchase_fee_pct: 10,
            early_redemption_fee_pct: 5,
        },
    );
    let series_id = s.client.create(
        &s.series_owner,
        &10,
        &5,
        &s.token,
        &100_i128,
        &s.token,
        &7_i128,
        &0_i128,
    );
    assert_eq!(s.client.bond_info(&series_id).purchase_fee_pct, 10);
}

#[test]
fn test_create_with_distinct_interest_token() {
    let e = Env::default();
    let s = setup(&e);
    let reward = new_token(&e, &Address::generate(&e));

    let series_id = s.client.create(
        &s.series_owner,
        &TOTAL,
        &MATURITY,
        &s.token,
        &INVESTMENT,
        &reward,
        &INTEREST,
        &ISSUANCE_FEE,
    );
    assert_eq!(s.client.interest(&series_id).token, reward);
}

// ═══════════════════════════════════════════════════════════════════
// 4. Series creation: error paths
// ═══════════════════════════════════════════════════════════════════

#[test]
fn test_create_underpaid_fee() {
    let e = Env::default();
    let s = setup(&e);
    assert_eq!(
        s.client.try_create(
            &s.series_owner,
            &TOTAL,
            &MATURITY,
            &s.token,
            &INVESTMENT,
            &s.token,
            &INTEREST,
            &(ISSUANCE_FEE - 1),
        ),
        Err(Ok(ContractError::InsufficientFee))
    );
    assert_eq!(s.client.series_count(), 0);
}

#[test]
fn test_create_overpaid_fee() {
    let e = Env::default();
    let s = setup(&e);
    let fee_token = s.fee_token_client(&e);
    let before = fee_token.balance(&s.series_owner);

    assert_eq!(
        s.client.try_create(
            &s.series_owner,
            &TOTAL,
            &MATURITY,
            &s.token,
            &INVESTMENT,
            &s.token,
            &INTEREST,
            &(ISSUANCE_FEE + 1),
        ),
        Err(Ok(ContractError::OverpaidFee))
    );
    assert_eq!(fee_token.balance(&s.series_owner), before);
    assert_eq!(s.client.series_count(), 0);
}

#[test]
fn test_create_rejects_zero_total() {
    let e = Env::default();
    let s = setup(&e);
    assert_eq!(
        s.client.try_create(
            &s.series_owner,
            &0,
            &MATURITY,
            &s.token,
            &INVESTMENT,
            &s.token,
            &INTEREST,
            &ISSUANCE_FEE,
        ),
        Err(Ok(ContractError::InvalidTotal))
    );
}

#[test]
fn test_create_rejects_zero_maturity() {
    let e = Env::default();
    let s = setup(&e);
    assert_eq!(
        s.client.try_create(
            &s.series_owner,
            &TOTAL,
            &0,
            &s.token,
            &INVESTMENT,
            &s.token,
            &INTEREST,
            &ISSUANCE_FEE,
        ),
        Err(Ok(ContractError::InvalidMaturity))
    );
}

#[test]
fn test_create_rejects_non_positive_amounts() {
    let e = Env::default();
    let s = setup(&e);
    assert_eq!(
        s.client.try_create(
            &s.series_owner,
            &TOTAL,
            &MATURITY,
            &s.token,
            &0_i128,
            &s.token,
            &INTEREST,
            &ISSUANCE_FEE,
        ),
        Err(Ok(ContractError::InvalidAmount))
    );
    assert_eq!(
        s.client.try_create(
            &s.series_owner,
            &TOTAL,
            &MATURITY,
            &s.token,
            &INVESTMENT,
            &s.token,
            &(-1_i128),
            &ISSUANCE_FEE,
        ),
        Err(Ok(ContractError::InvalidAmount))
    );
}

#[test]
fn test_create_fee_transfer_failure_leaves_no_series() {
    let e = Env::default();
    let s = setup(&e);
    // Holds no fee token at all.
    let broke = Address::generate(&e);

    assert_eq!(
        s.client.try_create(
            &broke,
            &TOTAL,
            &MATURITY,
            &s.token,
            &INVESTMENT,
            &s.token,
            &INTEREST,
            &ISSUANCE_FEE,
        ),
        Err(Ok(ContractError::TransferFailed))
    );
    assert_eq!(s.client.series_count(), 0);
    assert_eq!(
        s.client.try_get_series(&0),
        Err(Ok(ContractError::SeriesNotFound))
    );
}

#[test]
fn test_bond_info_unknown_series() {
    let e = Env::default();
    let s = setup(&e);
    assert_eq!(
        s.client.try_bond_info(&7),
        Err(Ok(ContractError::SeriesNotFound))
    );
}
