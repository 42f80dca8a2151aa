use soroban_sdk::{contracttype, Address};

// ─── Fee configuration ─────────────────────────────────────────────────────

/// Issuer-wide fee schedule, fixed at initialization.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FeeConfig {
    /// Flat fee (in the issuer's fee token) paid on every `create`.
    pub issuance_fee: i128,
    /// Purchase fee percentage (0-100) snapshotted into each new series.
    pub vault_purchase_fee_pct: u32,
    /// Early-redemption penalty percentage (0-100) snapshotted into each new series.
    pub early_redemption_fee_pct: u32,
}

// ─── Series state ──────────────────────────────────────────────────────────

/// A token reference paired with a per-unit amount.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TokenAmount {
    pub token: Address,
    pub amount: i128,
}

/// One zero-coupon bond offering.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BondSeries {
    /// Receives direct purchase fees and, after settlement, the reserves.
    pub owner: Address,
    /// Maximum purchasable units.
    pub total: u32,
    /// Units sold so far.
    pub purchased: u32,
    /// Units redeemed (burned) so far.
    pub redeemed: u32,
    /// Next unit id to mint. Never reused.
    pub unique_bond_index: u64,
    /// Ledger sequences a unit must age before it redeems at full value.
    pub maturity_threshold: u32,
    /// Terminal: every unit is resolved and no sale can happen any more.
    pub is_settled: bool,
    /// Owner stopped sales.
    pub closed: bool,
    pub purchase_fee_pct: u32,
    pub early_redemption_fee_pct: u32,
    /// Per-unit price.
    pub investment: TokenAmount,
    /// Per-unit payout above principal at maturity.
    pub interest: TokenAmount,
    /// Vault bound to the issuer when this series was created.
    pub vault: Option<Address>,
    /// Ledger sequence at creation.
    pub created_at: u32,
}

/// Read-only counters and fee snapshot of a series.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BondInfo {
    pub total: u32,
    pub purchased: u32,
    pub redeemed: u32,
    pub unique_bond_index: u64,
    pub maturity_threshold: u32,
    pub is_settled: bool,
    pub purchase_fee_pct: u32,
    pub early_redemption_fee_pct: u32,
}

/// Terms published with the `issue` event.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SeriesTerms {
    pub total: u32,
    pub maturity_threshold: u32,
    pub investment: TokenAmount,
    pub interest: TokenAmount,
    pub purchase_fee_pct: u32,
    pub early_redemption_fee_pct: u32,
}

// ─── Call arguments / results ──────────────────────────────────────────────

/// Destination of the purchase fee.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum FeeRoute {
    /// Fee goes straight to the series owner.
    Direct,
    /// Fee is credited to the named vault, which must be the series vault.
    ViaVault(Address),
}

/// Totals paid out by a single `redeem` call.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Redemption {
    pub units: u32,
    pub early_units: u32,
    /// Paid in the investment token.
    pub principal_paid: i128,
    /// Paid in the interest token.
    pub interest_paid: i128,
}

// ─── Storage keys ──────────────────────────────────────────────────────────

#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    /// Issuer owner; receives issuance fees. Stored in `instance()`.
    Owner,
    /// Token the issuance fee is paid in. Stored in `instance()`.
    FeeToken,
    /// `FeeConfig`. Stored in `instance()`.
    FeeConfig,
    /// Bound fee vault, set once. Stored in `instance()`.
    Vault,
    /// Number of series ever created; also the next series id. Stored in `instance()`.
    SeriesCount,
    /// Series record. Stored in `persistent()`.
    Series(u64),
    /// Current holder of a unit; removed on redemption. Stored in `persistent()`.
    UnitOwner(u64, u64),
    /// Ledger sequence a unit was bought at; write-once. Stored in `persistent()`.
    PurchaseTick(u64, u64),
    /// Number of live units a holder owns in a series. Stored in `persistent()`.
    Holding(u64, Address),
    /// Token held on behalf of a series. Stored in `persistent()`.
    Reserve(u64, Address),
}
