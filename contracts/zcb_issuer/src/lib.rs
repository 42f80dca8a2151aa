//! Zero-Coupon Bond Issuer Contract
//!
//! Issues zero-coupon bond series, sells individually numbered units of a
//! series against an investment token, and redeems them for principal plus a
//! fixed interest amount once each unit has aged `maturity_threshold` ledger
//! sequences. Holders may redeem earlier by accepting a percentage penalty on
//! principal.
//!
//! ## Key design decisions
//!
//! - **Series are records**: every `create` appends one `BondSeries` keyed by
//!   a monotonically increasing `series_id`; nothing is ever deleted.
//! - **Fee snapshots**: fee percentages and the vault address are copied into
//!   the series at creation and never change afterwards.
//! - **Series reserves**: net purchase proceeds and owner funding are booked
//!   per series and per token; redemptions can only draw on their own series.
//! - **Surplus withdrawal**: the series owner may take out whatever a
//!   reserve holds beyond what outstanding units are owed, at any time.
//! - **Entry lifetime**: unit and series entries are extended past the
//!   series maturity; the instance is refreshed on every mutating call.
//! - **Validate, then write, then transfer**: every check runs before the first
//!   storage write; token transfers happen last.
//! - **Typed errors**: every mutating entry point returns
//!   `Result<_, ContractError>`; the host discards all writes on `Err`.

#![no_std]

mod events;
pub mod math;
mod payout;
mod storage;
pub mod token_integration;
pub mod types;
mod units;

pub use types::{BondInfo, BondSeries, FeeConfig, FeeRoute, Redemption, SeriesTerms, TokenAmount};
pub use units::MAX_UNITS_PER_CALL;
pub use zcb_errors::ContractError;

use soroban_sdk::{contract, contractimpl, log, Address, Env, Vec};

#[cfg(test)]
mod test_helpers;

#[cfg(test)]
mod test_issue;






#[cfg(test)]
mod test_math;

// ─── Helpers ───────────────────────────────────────────────────────────────

fn require_issuer_owner(e: &Env, caller: &Address) -> Result<(), ContractError> {
    caller.require_auth();
    let stored = storage::owner(e)?;
    if stored != *caller {
        return Err(ContractError::NotIssuerOwner);
    }
    Ok(())
}

fn require_series_owner(caller: &Address, series: &BondSeries) -> Result<(), ContractError> {
    caller.require_auth();
    if series.owner != *caller {
        return Err(ContractError::NotSeriesOwner);
    }
    Ok(())
}

/// Marks the series settled once sales are over and every sold unit is
/// redeemed. Returns `true` only on the transition.
fn settle_if_resolved(series: &mut BondSeries) -> bool {
    let sales_over = series.closed || series.purchased == series.total;
    if series.is_settled || !sales_over || series.redeemed != series.purchased {
        return false;
    }
    series.is_settled = true;
    true
}

/// Amount of each series token owed to outstanding units at full maturity,
/// as `(investment_token, interest_token)`. Both legs are on the first slot
/// when the two tokens are the same.
fn liability_of(series: &BondSeries) -> Result<(i128, i128), ContractError> {
    let outstanding = math::sub_u32(series.purchased, series.redeemed)?;
    let principal = math::cost_of(series.investment.amount, outstanding)?;
    let interest = math::cost_of(series.interest.amount, outstanding)?;
    if series.investment.token == series.interest.token {
        Ok((math::add_i128(principal, interest)?, 0))
    } else {
        Ok((principal, interest))
    }
}

fn info_of(series: &BondSeries) -> BondInfo {
    BondInfo {
        total: series.total,
        purchased: series.purchased,
        redeemed: series.redeemed,
        unique_bond_index: series.unique_bond_index,
        maturity_threshold: series.maturity_threshold,
        is_settled: series.is_settled,
        purchase_fee_pct: series.purchase_fee_pct,
        early_redemption_fee_pct: series.early_redemption_fee_pct,
    }
}

// ─── Contract ──────────────────────────────────────────────────────────────

#[contract]
pub struct ZeroCouponIssuer;

#[contractimpl]
impl ZeroCouponIssuer {
    // ── Issuer setup ───────────────────────────────────────────────────────

    /// One-time initialization.
    ///
    /// `fee_token` is the token issuance fees are paid in; `fee_config` is
    /// the fee schedule copied into every series created afterwards.
    ///
    /// # Errors
    /// * `AlreadyInitialized` - called twice
    /// * `InvalidPercentage` - a percentage above 100
    /// * `InvalidAmount` - negative issuance fee
    pub fn initialize(
        e: Env,
        owner: Address,
        fee_token: Address,
        fee_config: FeeConfig,
    ) -> Result<(), ContractError> {
        if storage::is_initialized(&e) {
            return Err(ContractError::AlreadyInitialized);
        }
        owner.require_auth();

        math::validate_pct(fee_config.vault_purchase_fee_pct)?;
        math::validate_pct(fee_config.early_redemption_fee_pct)?;
        if fee_config.issuance_fee < 0 {
            return Err(ContractError::InvalidAmount);
        }

        storage::init(&e, &owner, &fee_token, &fee_config);
        events::emit_issuer_initialized(&e, &owner, &fee_token, &fee_config);
        Ok(())
    }

    /// Bind the fee vault. Can only happen once; series created before the
    /// binding keep no vault. An unclaimed vault is initialized with this
    /// contract as its issuer.
    ///
    /// # Errors
    /// * `NotIssuerOwner`
    /// * `VaultAlreadyBound` - a vault is already bound here, or `vault`
    ///   answers to another issuer
    /// * `TransferFailed` - `vault` refused to bind
    pub fn bind_vault(e: Env, owner: Address, vault: Address) -> Result<(), ContractError> {
        require_issuer_owner(&e, &owner)?;
        storage::bump_instance(&e);
        if storage::vault(&e).is_some() {
            return Err(ContractError::VaultAlreadyBound);
        }
        token_integration::adopt_vault(&e, &vault)?;
        storage::set_vault(&e, &vault);
        events::emit_vault_bound(&e, &vault);
        Ok(())
    }

    // ── Issuance ───────────────────────────────────────────────────────────

    /// Create a new bond series owned by `caller` and return its id.
    ///
    /// `payment` must equal the configured issuance fee exactly; it is moved
    /// from `caller` to the issuer owner in the fee token.
    ///
    /// # Errors
    /// * `InsufficientFee` / `OverpaidFee` - `payment` differs from the fee
    /// * `InvalidTotal` - `total == 0`
    /// * `InvalidMaturity` - `maturity_threshold == 0`
    /// * `InvalidAmount` - non-positive investment or interest amount
    /// * `TransferFailed` - the fee transfer was refused
    #[allow(clippy::too_many_arguments)]
    pub fn create(
        e: Env,
        caller: Address,
        total: u32,
        maturity_threshold: u32,
        investment_token: Address,
        investment_amount: i128,
        interest_token: Address,
        interest_amount: i128,
        payment: i128,
    ) -> Result<u64, ContractError> {
        caller.require_auth();
        storage::bump_instance(&e);

        let cfg = storage::fee_config(&e)?;
        if payment < cfg.issuance_fee {
            return Err(ContractError::InsufficientFee);
        }
        if payment > cfg.issuance_fee {
            return Err(ContractError::OverpaidFee);
        }
        if total == 0 {
            return Err(ContractError::InvalidTotal);
        }
        if maturity_threshold == 0 {
            return Err(ContractError::InvalidMaturity);
        }
        if investment_amount <= 0 || interest_amount <= 0 {
            return Err(ContractError::InvalidAmount);
        }

        let issuer_owner = storage::owner(&e)?;
        let fee_token = storage::fee_token(&e)?;
        let series_id = storage::next_series_id(&e)?;

        let series = BondSeries {
            owner: caller.clone(),
            total,
            purchased: 0,
            redeemed: 0,
            unique_bond_index: 0,
            maturity_threshold,
            is_settled: false,
            closed: false,
            purchase_fee_pct: cfg.vault_purchase_fee_pct,
            early_redemption_fee_pct: cfg.early_redemption_fee_pct,
            investment: TokenAmount {
                token: investment_token,
                amount: investment_amount,
            },
            interest: TokenAmount {
                token: interest_token,
                amount: interest_amount,
            },
            vault: storage::vault(&e),
            created_at: e.ledger().sequence(),
        };
        storage::save_series(&e, series_id, &series);

        token_integration::forward(&e, &fee_token, &caller, &issuer_owner, payment)?;

        let terms = SeriesTerms {
            total,
            maturity_threshold,
            investment: series.investment.clone(),
            interest: series.interest.clone(),
            purchase_fee_pct: series.purchase_fee_pct,
            early_redemption_fee_pct: series.early_redemption_fee_pct,
        };
        events::emit_issue(&e, series_id, &caller, &terms);

        Ok(series_id)
    }

    // ── Series lifecycle ───────────────────────────────────────────────────

    /// Buy `count` units of a series. Returns the first minted unit id; the
    /// batch occupies `[first, first + count)`.
    ///
    /// The whole cost is pulled from `buyer` (prior allowance required). The
    /// purchase fee goes to the series owner on `FeeRoute::Direct` or to the
    /// series vault on `FeeRoute::ViaVault`; the remainder stays in the
    /// series reserve.
    ///
    /// # Errors
    /// * `SeriesNotFound`, `SeriesClosed`
    /// * `InvalidCount` - zero or above `MAX_UNITS_PER_CALL`
    /// * `SupplyExhausted` - not enough units left; nothing is sold
    /// * `InvalidReferrer` - vault route that is not the series vault
    /// * `Overflow`, `TransferFailed`
    pub fn purchase(
        e: Env,
        buyer: Address,
        series_id: u64,
        count: u32,
        route: FeeRoute,
    ) -> Result<u64, ContractError> {
        buyer.require_auth();
        storage::bump_instance(&e);

        let mut series = storage::load_series(&e, series_id)?;
        if series.closed || series.is_settled {
            return Err(ContractError::SeriesClosed);
        }
        if count == 0 || count > MAX_UNITS_PER_CALL {
            return Err(ContractError::InvalidCount);
        }
        let purchased = math::add_u32(series.purchased, count)?;
        if purchased > series.total {
            return Err(ContractError::SupplyExhausted);
        }
        if let FeeRoute::ViaVault(referrer) = &route {
            if series.vault.as_ref() != Some(referrer) {
                return Err(ContractError::InvalidReferrer);
            }
        }

        let cost = math::cost_of(series.investment.amount, count)?;
        let (fee, net) = math::split_fee(cost, series.purchase_fee_pct)?;
        let token = series.investment.token.clone();
        let ttl = storage::entry_ttl(&e, series.maturity_threshold);

        let first_id = series.unique_bond_index;
        series.unique_bond_index = units::mint(
            &e,
            series_id,
            &buyer,
            first_id,
            count,
            e.ledger().sequence(),
            ttl,
        )?;
        series.purchased = purchased;
        storage::credit_reserve(&e, series_id, &token, net, ttl)?;
        storage::save_series(&e, series_id, &series);

        token_integration::transfer_into_contract(&e, &token, &buyer, cost)?;
        match &route {
            FeeRoute::Direct => {
                token_integration::transfer_from_contract(&e, &token, &series.owner, fee)?
            }
            FeeRoute::ViaVault(vault) => token_integration::credit_vault(&e, vault, &token, fee)?,
        }

        events::emit_transfer(&e, series_id, first_id, count, None, Some(buyer.clone()));
        events::emit_purchase(&e, series_id, &buyer, count, cost, fee, &route);

        Ok(first_id)
    }

    /// Redeem units held by `holder`.
    ///
    /// `count` must equal `unit_ids.len()`. Matured units pay principal plus
    /// interest; immature units pay principal minus the early-redemption
    /// penalty when `allow_early` is set. Either every unit is redeemed or
    /// none is.
    ///
    /// # Errors
    /// * `SeriesNotFound`, `InvalidCount`
    /// * `UnitNotFound`, `AlreadyRedeemed`, `NotOwner`
    /// * `NotMatured` - an immature unit without `allow_early`
    /// * `InsufficientLiquidity` - reserves cannot cover the payout
    /// * `TransferFailed`
    pub fn redeem(
        e: Env,
        holder: Address,
        series_id: u64,
        unit_ids: Vec<u64>,
        count: u32,
        allow_early: bool,
    ) -> Result<Redemption, ContractError> {
        holder.require_auth();
        storage::bump_instance(&e);

        let mut series = storage::load_series(&e, series_id)?;
        units::validate_count(count, unit_ids.len())?;
        units::require_held(&e, series_id, series.unique_bond_index, &holder, &unit_ids)?;

        // Price every unit before touching state.
        let now = e.ledger().sequence();
        let mut priced: Vec<(u64, i128, i128, bool)> = Vec::new(&e);
        let mut principal_paid = 0_i128;
        let mut interest_paid = 0_i128;
        let mut early_units = 0_u32;
        for unit_id in unit_ids.iter() {
            let tick = units::purchase_tick(&e, series_id, unit_id)
                .ok_or(ContractError::UnitNotFound)?;
            let quote = payout::quote(&series, tick, now, allow_early)?;
            principal_paid = math::add_i128(principal_paid, quote.principal)?;
            interest_paid = math::add_i128(interest_paid, quote.interest)?;
            if quote.early {
                early_units += 1;
            }
            priced.push_back((unit_id, quote.principal, quote.interest, quote.early));
        }

        let investment_token = series.investment.token.clone();
        let interest_token = series.interest.token.clone();
        if investment_token == interest_token {
            let needed = math::add_i128(principal_paid, interest_paid)?;
            if storage::reserve(&e, series_id, &investment_token) < needed {
                return Err(ContractError::InsufficientLiquidity);
            }
        } else if storage::reserve(&e, series_id, &investment_token) < principal_paid
            || storage::reserve(&e, series_id, &interest_token) < interest_paid
        {
            return Err(ContractError::InsufficientLiquidity);
        }

        let ttl = storage::entry_ttl(&e, series.maturity_threshold);
        units::burn(&e, series_id, &holder, &unit_ids, ttl)?;
        storage::debit_reserve(&e, series_id, &investment_token, principal_paid, ttl)?;
        storage::debit_reserve(&e, series_id, &interest_token, interest_paid, ttl)?;
        series.redeemed = math::add_u32(series.redeemed, count)?;
        let settled_now = settle_if_resolved(&mut series);
        storage::save_series(&e, series_id, &series);

        token_integration::transfer_from_contract(&e, &investment_token, &holder, principal_paid)?;
        token_integration::transfer_from_contract(&e, &interest_token, &holder, interest_paid)?;

        for (unit_id, principal, interest, was_early) in priced.iter() {
            events::emit_transfer(&e, series_id, unit_id, 1, Some(holder.clone()), None);
            events::emit_redeem(&e, series_id, &holder, unit_id, principal, interest, was_early);
        }
        if early_units > 0 {
            log!(&e, "early redemption", series_id, early_units);
        }
        if settled_now {
            log!(&e, "series settled", series_id);
            events::emit_settled(&e, series_id, now);
        }

        Ok(Redemption {
            units: count,
            early_units,
            principal_paid,
            interest_paid,
        })
    }

    /// Move live units from `from` to `to`. Purchase ticks travel with the
    /// units, so maturity is unaffected.
    pub fn transfer_units(
        e: Env,
        from: Address,
        to: Address,
        series_id: u64,
        unit_ids: Vec<u64>,
    ) -> Result<(), ContractError> {
        from.require_auth();
        storage::bump_instance(&e);

        let series = storage::load_series(&e, series_id)?;
        units::validate_count(unit_ids.len(), unit_ids.len())?;
        units::require_held(&e, series_id, series.unique_bond_index, &from, &unit_ids)?;

        let ttl = storage::entry_ttl(&e, series.maturity_threshold);
        units::reassign(&e, series_id, &from, &to, &unit_ids, ttl)?;

        for unit_id in unit_ids.iter() {
            events::emit_transfer(
                &e,
                series_id,
                unit_id,
                1,
                Some(from.clone()),
                Some(to.clone()),
            );
        }
        Ok(())
    }

    /// Add `amount` of `token` to the series reserve, typically the interest
    /// owed at maturity. Returns the new reserve.
    ///
    /// # Errors
    /// * `UnsupportedToken` - neither the investment nor the interest token
    /// * `InvalidAmount`, `TransferFailed`
    pub fn fund_series(
        e: Env,
        funder: Address,
        series_id: u64,
        token: Address,
        amount: i128,
    ) -> Result<i128, ContractError> {
        funder.require_auth();
        storage::bump_instance(&e);

        let series = storage::load_series(&e, series_id)?;
        if token != series.investment.token && token != series.interest.token {
            return Err(ContractError::UnsupportedToken);
        }
        if amount <= 0 {
            return Err(ContractError::InvalidAmount);
        }

        let ttl = storage::entry_ttl(&e, series.maturity_threshold);
        let reserve = storage::credit_reserve(&e, series_id, &token, amount, ttl)?;
        token_integration::transfer_into_contract(&e, &token, &funder, amount)?;

        events::emit_series_funded(&e, series_id, &funder, &token, amount);
        Ok(reserve)
    }

    /// Stop sales. The series settles at once if no units are outstanding,
    /// otherwise when the last one is redeemed.
    pub fn close(e: Env, owner: Address, series_id: u64) -> Result<(), ContractError> {
        let mut series = storage::load_series(&e, series_id)?;
        require_series_owner(&owner, &series)?;
        storage::bump_instance(&e);
        if series.closed || series.is_settled {
            return Err(ContractError::SeriesClosed);
        }

        series.closed = true;
        let settled_now = settle_if_resolved(&mut series);
        storage::save_series(&e, series_id, &series);

        events::emit_series_closed(&e, series_id, series.purchased);
        if settled_now {
            events::emit_settled(&e, series_id, e.ledger().sequence());
        }
        Ok(())
    }

    /// Pay the series owner whatever the reserves hold beyond what outstanding
    /// units would be owed at maturity. Once the series is settled nothing is
    /// outstanding, so this sweeps the reserves empty.
    /// Returns `(investment_token_amount, interest_token_amount)`.
    ///
    /// # Errors
    /// * `NotSeriesOwner`
    /// * `NothingToWithdraw` - no surplus in either token
    /// * `Overflow`, `TransferFailed`
    pub fn withdraw_proceeds(
        e: Env,
        owner: Address,
        series_id: u64,
    ) -> Result<(i128, i128), ContractError> {
        let series = storage::load_series(&e, series_id)?;
        require_series_owner(&owner, &series)?;
        storage::bump_instance(&e);

        let investment_token = series.investment.token.clone();
        let interest_token = series.interest.token.clone();
        let (owed_investment, owed_interest) = liability_of(&series)?;
        let investment_amount = math::sub_i128(
            storage::reserve(&e, series_id, &investment_token),
            owed_investment,
        )?
        .max(0);
        let interest_amount = if interest_token == investment_token {
            0
        } else {
            math::sub_i128(storage::reserve(&e, series_id, &interest_token), owed_interest)?.max(0)
        };
        if investment_amount == 0 && interest_amount == 0 {
            return Err(ContractError::NothingToWithdraw);
        }

        let ttl = storage::entry_ttl(&e, series.maturity_threshold);
        storage::debit_reserve(&e, series_id, &investment_token, investment_amount, ttl)?;
        storage::debit_reserve(&e, series_id, &interest_token, interest_amount, ttl)?;

        token_integration::transfer_from_contract(&e, &investment_token, &owner, investment_amount)?;
        token_integration::transfer_from_contract(&e, &interest_token, &owner, interest_amount)?;

        events::emit_proceeds_withdrawn(&e, series_id, &owner, investment_amount, interest_amount);
        Ok((investment_amount, interest_amount))
    }

    // ── Queries ────────────────────────────────────────────────────────────

    pub fn owner(e: Env) -> Result<Address, ContractError> {
        storage::owner(&e)
    }

    pub fn fee_token(e: Env) -> Result<Address, ContractError> {
        storage::fee_token(&e)
    }

    pub fn fee_config(e: Env) -> Result<FeeConfig, ContractError> {
        storage::fee_config(&e)
    }

    pub fn vault(e: Env) -> Option<Address> {
        storage::vault(&e)
    }

    /// Number of series ever created. Ids run from 0 to `series_count - 1`.
    pub fn series_count(e: Env) -> u64 {
        storage::series_count(&e)
    }

    pub fn get_series(e: Env, series_id: u64) -> Result<BondSeries, ContractError> {
        storage::load_series(&e, series_id)
    }

    /// Counters and fee snapshot of a series.
    pub fn bond_info(e: Env, series_id: u64) -> Result<BondInfo, ContractError> {
        storage::load_series(&e, series_id).map(|series| info_of(&series))
    }

    pub fn investment(e: Env, series_id: u64) -> Result<TokenAmount, ContractError> {
        storage::load_series(&e, series_id).map(|series| series.investment)
    }

    pub fn interest(e: Env, series_id: u64) -> Result<TokenAmount, ContractError> {
        storage::load_series(&e, series_id).map(|series| series.interest)
    }

    /// Current holder of a unit; `None` once redeemed or if never minted.
    pub fn owner_of(e: Env, series_id: u64, unit_id: u64) -> Option<Address> {
        units::owner_of(&e, series_id, unit_id)
    }

    /// Ledger sequence the unit was bought at. Kept after redemption.
    pub fn purchase_tick(e: Env, series_id: u64, unit_id: u64) -> Option<u32> {
        units::purchase_tick(&e, series_id, unit_id)
    }

    /// Live units `holder` owns in a series.
    pub fn balance_of(e: Env, series_id: u64, holder: Address) -> u32 {
        units::balance_of(&e, series_id, &holder)
    }

    /// Amount of `token` booked to a series.
    pub fn reserve(e: Env, series_id: u64, token: Address) -> i128 {
        storage::reserve(&e, series_id, &token)
    }

    pub fn is_matured(e: Env, series_id: u64, unit_id: u64) -> Result<bool, ContractError> {
        let series = storage::load_series(&e, series_id)?;
        let tick = units::purchase_tick(&e, series_id, unit_id).ok_or(ContractError::UnitNotFound)?;
        Ok(payout::is_matured(&series, tick, e.ledger().sequence()))
    }

    /// Ledger sequences left until the unit redeems at full value.
    /// Returns 0 if already matured.
    pub fn ticks_remaining(e: Env, series_id: u64, unit_id: u64) -> Result<u32, ContractError> {
        let series = storage::load_series(&e, series_id)?;
        let tick = units::purchase_tick(&e, series_id, unit_id).ok_or(ContractError::UnitNotFound)?;
        let elapsed = payout::elapsed(tick, e.ledger().sequence());
        Ok(series.maturity_threshold.saturating_sub(elapsed))
    }
}
