//! Per-unit redemption pricing.

use crate::math;
use crate::types::BondSeries;
use zcb_errors::ContractError;

/// What one unit pays out, split by token.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Quote {
    /// Investment-token amount.
    pub principal: i128,
    /// Interest-token amount.
    pub interest: i128,
    pub early: bool,
}

/// Ledger sequences elapsed since `purchase_tick`.
pub fn elapsed(purchase_tick: u32, now: u32) -> u32 {
    now.saturating_sub(purchase_tick)
}

pub fn is_matured(series: &BondSeries, purchase_tick: u32, now: u32) -> bool {
    elapsed(purchase_tick, now) >= series.maturity_threshold
}

/// Prices a unit bought at `purchase_tick` being redeemed at `now`.
///
/// Matured units pay principal plus interest. Immature units pay the
/// penalised principal when `allow_early` is set and fail `NotMatured`
/// otherwise.
pub fn quote(
    series: &BondSeries,
    purchase_tick: u32,
    now: u32,
    allow_early: bool,
) -> Result<Quote, ContractError> {
    if is_matured(series, purchase_tick, now) {
        return Ok(Quote {
            principal: series.investment.amount,
            interest: series.interest.amount,
            early: false,
        });
    }
    if !allow_early {
        return Err(ContractError::NotMatured);
    }
    Ok(Quote {
        principal: math::after_penalty(series.investment.amount, series.early_redemption_fee_pct)?,
        interest: 0,
        early: true,
    })
}
