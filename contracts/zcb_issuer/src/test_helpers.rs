//! Shared test helpers for zcb_issuer tests.

#![cfg(test)]

use crate::{FeeConfig, ZeroCouponIssuer, ZeroCouponIssuerClient};
use soroban_sdk::testutils::{Address as _, Ledger};
use soroban_sdk::token::{StellarAssetClient, TokenClient};
use soroban_sdk::{Address, Env};
use zcb_vault::{FeeVault, FeeVaultClient};

/// 1 token with 18 decimals.
pub const ONE: i128 = 1_000_000_000_000_000_000;

pub const ISSUANCE_FEE: i128 = ONE;
pub const PURCHASE_FEE_PCT: u32 = 50;
pub const EARLY_FEE_PCT: u32 = 25;

pub const TOTAL: u32 = 100;
pub const MATURITY: u32 = 50;
pub const INVESTMENT: i128 = 10 * ONE;
pub const INTEREST: i128 = 15 * ONE;

/// Ledger sequence tests start from.
pub const START_TICK: u32 = 1_000;

/// Large enough for all test scenarios.
pub const DEFAULT_MINT: i128 = 400_000 * ONE;

pub struct Setup<'a> {
    pub client: ZeroCouponIssuerClient<'a>,
    pub contract_id: Address,
    pub issuer_owner: Address,
    pub series_owner: Address,
    pub buyer: Address,
    /// Pays issuance fees.
    pub fee_token: Address,
    /// Investment and interest token of the default series.
    pub token: Address,
}

impl<'a> Setup<'a> {
    pub fn token_client(&self, e: &'a Env) -> TokenClient<'a> {
        TokenClient::new(e, &self.token)
    }

    pub fn fee_token_client(&self, e: &'a Env) -> TokenClient<'a> {
        TokenClient::new(e, &self.fee_token)
    }

    /// Issue the default series (100 units, maturity 50, 10 + 15 per unit).
    pub fn issue_default(&self) -> u64 {
        self.client.create(
            &self.series_owner,
            &TOTAL,
            &MATURITY,
            &self.token,
            &INVESTMENT,
            &self.token,
            &INTEREST,
            &ISSUANCE_FEE,
        )
    }

    /// Pre-fund `units` worth of interest from the series owner.
    pub fn fund_interest(&self, series_id: u64, units: u32) {
        self.client.fund_series(
            &self.series_owner,
            &series_id,
            &self.token,
            &(INTEREST * units as i128),
        );
    }
}

pub fn new_token(e: &Env, admin: &Address) -> Address {
    e.register_stellar_asset_contract_v2(admin.clone())
        .address()
}

/// Mint `amount` of `token` to `holder` and approve `spender` for all of it.
pub fn fund_and_approve(e: &Env, token: &Address, holder: &Address, spender: &Address, amount: i128) {
    StellarAssetClient::new(e, token).mint(holder, &amount);
    let expiry = e.ledger().sequence().saturating_add(10_000);
    TokenClient::new(e, token).approve(holder, spender, &amount, &expiry);
}

pub fn set_tick(e: &Env, tick: u32) {
    e.ledger().with_mut(|li| li.sequence_number = tick);
}

pub fn advance_ticks(e: &Env, ticks: u32) {
    e.ledger().with_mut(|li| li.sequence_number += ticks);
}

pub fn default_fee_config() -> FeeConfig {
    FeeConfig {
        issuance_fee: ISSUANCE_FEE,
        vault_purchase_fee_pct: PURCHASE_FEE_PCT,
        early_redemption_fee_pct: EARLY_FEE_PCT,
    }
}

/// Full environment setup with the default fee schedule.
pub fn setup(e: &Env) -> Setup<'_> {
    setup_with_config(e, default_fee_config())
}

/// Deploys the issuer and two tokens, funds the series owner and buyer and
/// approves the issuer for both.
pub fn setup_with_config(e: &Env, cfg: FeeConfig) -> Setup<'_> {
    e.mock_all_auths();
    // Full-size batches touch a few hundred ledger entries.
    e.cost_estimate().budget().reset_unlimited();
    set_tick(e, START_TICK);

    let contract_id = e.register(ZeroCouponIssuer, ());
    let client = ZeroCouponIssuerClient::new(e, &contract_id);
    let issuer_owner = Address::generate(e);
    let series_owner = Address::generate(e);
    let buyer = Address::generate(e);

    let token_admin = Address::generate(e);
    let fee_token = new_token(e, &token_admin);
    let token = new_token(e, &token_admin);

    StellarAssetClient::new(e, &fee_token).mint(&series_owner, &(100 * ONE));
    fund_and_approve(e, &token, &series_owner, &contract_id, DEFAULT_MINT);
    fund_and_approve(e, &token, &buyer, &contract_id, DEFAULT_MINT);

    client.initialize(&issuer_owner, &fee_token, &cfg);

    Setup {
        client,
        contract_id,
        issuer_owner,
        series_owner,
        buyer,
        fee_token,
        token,
    }
}

/// Deploys a fresh, unbound fee vault.
pub fn new_vault(e: &Env) -> (FeeVaultClient<'_>, Address) {
    let vault_id = e.register(FeeVault, ());
    (FeeVaultClient::new(e, &vault_id), vault_id)
}

/// Deploys a fee vault and binds it to the issuer in `s`; binding claims it.
pub fn bind_vault<'a>(e: &'a Env, s: &Setup<'a>) -> (FeeVaultClient<'a>, Address) {
    let (vault, vault_id) = new_vault(e);
    s.client.bind_vault(&s.issuer_owner, &vault_id);
    (vault, vault_id)
}
