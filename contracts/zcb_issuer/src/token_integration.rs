//! Token and vault collaborator calls.
//!
//! Every movement goes through a `try_` client call so a refusal by the
//! collaborator surfaces as `ContractError::TransferFailed` instead of a
//! host trap.

use soroban_sdk::token::TokenClient;
use soroban_sdk::{contractclient, Address, Env};
use zcb_errors::ContractError;

/// The part of the fee vault the issuer calls into.
#[contractclient(name = "VaultClient")]
pub trait VaultInterface {
    /// Bind an unclaimed vault to `issuer`, who must authorize the call.
    fn initialize(env: Env, issuer: Address);

    /// Issuer the vault is bound to; errors while unbound.
    fn issuer(env: Env) -> Address;

    /// Record `amount` of `token` already transferred to the vault and
    /// return the vault's new balance for `token`.
    fn credit_fee(env: Env, token: Address, amount: i128) -> i128;
}

fn check_amount(amount: i128) -> Result<bool, ContractError> {
    if amount < 0 {
        return Err(ContractError::InvalidAmount);
    }
    Ok(amount > 0)
}

/// Pull `amount` of `token` from `owner` into this contract.
/// Requires a prior allowance for this contract as spender.
pub fn transfer_into_contract(
    e: &Env,
    token: &Address,
    owner: &Address,
    amount: i128,
) -> Result<(), ContractError> {
    if !check_amount(amount)? {
        return Ok(());
    }
    let contract = e.current_contract_address();
    match TokenClient::new(e, token).try_transfer_from(&contract, owner, &contract, &amount) {
        Ok(Ok(())) => Ok(()),
        _ => Err(ContractError::TransferFailed),
    }
}

/// Pay `amount` of `token` from this contract to `recipient`.
pub fn transfer_from_contract(
    e: &Env,
    token: &Address,
    recipient: &Address,
    amount: i128,
) -> Result<(), ContractError> {
    if !check_amount(amount)? {
        return Ok(());
    }
    let contract = e.current_contract_address();
    match TokenClient::new(e, token).try_transfer(&contract, recipient, &amount) {
        Ok(Ok(())) => Ok(()),
        _ => Err(ContractError::TransferFailed),
    }
}

/// Move `amount` of `token` straight from `from` to `to`; `from` must have
/// authorized the enclosing call.
pub fn forward(
    e: &Env,
    token: &Address,
    from: &Address,
    to: &Address,
    amount: i128,
) -> Result<(), ContractError> {
    if !check_amount(amount)? {
        return Ok(());
    }
    match TokenClient::new(e, token).try_transfer(from, to, &amount) {
        Ok(Ok(())) => Ok(()),
        _ => Err(ContractError::TransferFailed),
    }
}

/// Make sure `vault` answers to this contract, binding it if it is still
/// unclaimed.
///
/// # Errors
/// * `VaultAlreadyBound` - the vault belongs to another issuer
/// * `TransferFailed` - the vault refused to bind
pub fn adopt_vault(e: &Env, vault: &Address) -> Result<(), ContractError> {
    let this = e.current_contract_address();
    let client = VaultClient::new(e, vault);
    match client.try_issuer() {
        Ok(Ok(bound)) if bound == this => Ok(()),
        Ok(Ok(_)) => Err(ContractError::VaultAlreadyBound),
        _ => match client.try_initialize(&this) {
            Ok(Ok(())) => Ok(()),
            _ => Err(ContractError::TransferFailed),
        },
    }
}

/// Send `amount` of `token` to `vault` and have it book the fee.
pub fn credit_vault(
    e: &Env,
    vault: &Address,
    token: &Address,
    amount: i128,
) -> Result<(), ContractError> {
    if !check_amount(amount)? {
        return Ok(());
    }
    transfer_from_contract(e, token, vault, amount)?;
    match VaultClient::new(e, vault).try_credit_fee(token, &amount) {
        Ok(Ok(_)) => Ok(()),
        _ => Err(ContractError::TransferFailed),
    }
}
