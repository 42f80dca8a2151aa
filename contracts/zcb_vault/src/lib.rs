//! # Fee Vault Contract
//!
//! Accrues purchase fees for bond series bought through the vault route.
//! The issuer transfers the fee tokens to this contract and then calls
//! `credit_fee`; the vault keeps a per-token running balance.
//!
//! Disbursement is handled outside this contract.

#![no_std]

use soroban_sdk::{contract, contractimpl, contracttype, Address, Env, Symbol};
use zcb_errors::ContractError;

/// Minimum ledger sequence TTL before a bump is requested (~1 day at 5 s/ledger).
const BUMP_THRESHOLD: u32 = 17_280;
/// Target TTL after a bump (~30 days).
const BUMP_TARGET: u32 = 518_400;
/// Instance is refreshed once its TTL drops a day below the target.
const INSTANCE_BUMP_THRESHOLD: u32 = BUMP_TARGET - BUMP_THRESHOLD;

#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    /// Issuer contract allowed to credit fees. Stored in `instance()`.
    Issuer,
    /// Accrued fees per token. Stored in `persistent()`.
    FeeBalance(Address),
}

fn bump_instance(e: &Env) {
    e.storage()
        .instance()
        .extend_ttl(INSTANCE_BUMP_THRESHOLD, BUMP_TARGET);
}

fn issuer(e: &Env) -> Result<Address, ContractError> {
    e.storage()
        .instance()
        .get(&DataKey::Issuer)
        .ok_or(ContractError::NotInitialized)
}

#[contract]
pub struct FeeVault;

#[contractimpl]
impl FeeVault {
    /// One-time initialization binding the vault to its issuer. The issuer
    /// must authorize it; the issuer contract does so from `bind_vault`.
    pub fn initialize(e: Env, issuer: Address) -> Result<(), ContractError> {
        if e.storage().instance().has(&DataKey::Issuer) {
            return Err(ContractError::AlreadyInitialized);
        }
        issuer.require_auth();

        e.storage().instance().set(&DataKey::Issuer, &issuer);
        bump_instance(&e);

        e.events()
            .publish((Symbol::new(&e, "vault_initialized"),), issuer);
        Ok(())
    }

    /// Book `amount` of `token` as collected fees. Only the issuer may call
    /// this. Returns the new balance for `token`.
    ///
    /// # Errors
    /// * `NotInitialized`
    /// * `InvalidAmount` - `amount <= 0`
    /// * `Overflow`
    pub fn credit_fee(e: Env, token: Address, amount: i128) -> Result<i128, ContractError> {
        let issuer = issuer(&e)?;
        issuer.require_auth();

        if amount <= 0 {
            return Err(ContractError::InvalidAmount);
        }
        bump_instance(&e);

        let key = DataKey::FeeBalance(token.clone());
        let current: i128 = e.storage().persistent().get(&key).unwrap_or(0);
        let updated = current
            .checked_add(amount)
            .ok_or(ContractError::Overflow)?;
        e.storage().persistent().set(&key, &updated);
        e.storage()
            .persistent()
            .extend_ttl(&key, BUMP_THRESHOLD, BUMP_TARGET);

        e.events().publish(
            (Symbol::new(&e, "fee_credited"), token),
            (amount, updated),
        );
        Ok(updated)
    }

    /// Fees accrued so far in `token`.
    pub fn fee_balance(e: Env, token: Address) -> i128 {
        e.storage()
            .persistent()
            .get(&DataKey::FeeBalance(token))
            .unwrap_or(0)
    }

    pub fn issuer(e: Env) -> Result<Address, ContractError> {
        issuer(&e)
    }
}
