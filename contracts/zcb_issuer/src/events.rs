use crate::types::{FeeConfig, FeeRoute, SeriesTerms};
use soroban_sdk::{Address, Env, Symbol};

/// Emitted once when the issuer is initialized.
///
/// # Topics
/// * `Symbol` - "issuer_initialized"
///
/// # Data
/// * `Address` - Issuer owner
/// * `Address` - Token the issuance fee is paid in
/// * `FeeConfig` - Fee schedule
pub fn emit_issuer_initialized(e: &Env, owner: &Address, fee_token: &Address, cfg: &FeeConfig) {
    let topics = (Symbol::new(e, "issuer_initialized"),);
    let data = (owner.clone(), fee_token.clone(), cfg.clone());
    e.events().publish(topics, data);
}

/// Emitted when the fee vault is bound.
pub fn emit_vault_bound(e: &Env, vault: &Address) {
    e.events()
        .publish((Symbol::new(e, "vault_bound"),), vault.clone());
}

/// Emitted when a new series is created.
///
/// # Topics
/// * `Symbol` - "issue"
/// * `u64` - The new series id
///
/// # Data
/// * `Address` - Series owner
/// * `SeriesTerms` - Supply, maturity, pricing and fee snapshot
pub fn emit_issue(e: &Env, series_id: u64, owner: &Address, terms: &SeriesTerms) {
    let topics = (Symbol::new(e, "issue"), series_id);
    let data = (owner.clone(), terms.clone());
    e.events().publish(topics, data);
}

/// Emitted when units are minted, moved or burned.
///
/// # Topics
/// * `Symbol` - "transfer"
/// * `u64` - Series id
///
/// # Data
/// * `u64` - First unit id of the batch
/// * `u32` - Number of consecutive ids in the batch
/// * `Option<Address>` - Previous holder (`None` on mint)
/// * `Option<Address>` - New holder (`None` on burn)
pub fn emit_transfer(
    e: &Env,
    series_id: u64,
    first_unit: u64,
    count: u32,
    from: Option<Address>,
    to: Option<Address>,
) {
    let topics = (Symbol::new(e, "transfer"), series_id);
    let data = (first_unit, count, from, to);
    e.events().publish(topics, data);
}

/// Emitted when units are bought.
///
/// # Topics
/// * `Symbol` - "purchase"
/// * `u64` - Series id
/// * `Address` - Buyer
///
/// # Data
/// * `u32` - Units bought
/// * `i128` - Total cost pulled from the buyer
/// * `i128` - Fee portion of the cost
/// * `FeeRoute` - Where the fee went
pub fn emit_purchase(
    e: &Env,
    series_id: u64,
    buyer: &Address,
    count: u32,
    cost: i128,
    fee: i128,
    route: &FeeRoute,
) {
    let topics = (Symbol::new(e, "purchase"), series_id, buyer.clone());
    let data = (count, cost, fee, route.clone());
    e.events().publish(topics, data);
}

/// Emitted once per redeemed unit.
///
/// # Topics
/// * `Symbol` - "redeem"
/// * `u64` - Series id
/// * `Address` - Holder
///
/// # Data
/// * `u64` - Unit id
/// * `i128` - Principal paid for this unit, in the investment token
/// * `i128` - Interest paid for this unit, in the interest token
/// * `bool` - Whether the penalty applied
pub fn emit_redeem(
    e: &Env,
    series_id: u64,
    holder: &Address,
    unit_id: u64,
    principal: i128,
    interest: i128,
    was_early: bool,
) {
    let topics = (Symbol::new(e, "redeem"), series_id, holder.clone());
    let data = (unit_id, principal, interest, was_early);
    e.events().publish(topics, data);
}

/// Emitted when a series reaches its terminal state.
pub fn emit_settled(e: &Env, series_id: u64, tick: u32) {
    let topics = (Symbol::new(e, "settled"), series_id);
    e.events().publish(topics, tick);
}

pub fn emit_series_funded(e: &Env, series_id: u64, funder: &Address, token: &Address, amount: i128) {
    let topics = (Symbol::new(e, "series_funded"), series_id, funder.clone());
    let data = (token.clone(), amount);
    e.events().publish(topics, data);
}

pub fn emit_series_closed(e: &Env, series_id: u64, purchased: u32) {
    let topics = (Symbol::new(e, "series_closed"), series_id);
    e.events().publish(topics, purchased);
}

pub fn emit_proceeds_withdrawn(
    e: &Env,
    series_id: u64,
    owner: &Address,
    investment_amount: i128,
    interest_amount: i128,
) {
    let topics = (Symbol::new(e, "proceeds_withdrawn"), series_id, owner.clone());
    let data = (investment_amount, interest_amount);
    e.events().publish(topics, data);
}
