#![no_std]

use soroban_sdk::contracterror;

/// @title  ErrorCategory
/// @notice Groups errors by domain for monitoring, alerting, and dashboards.
/// @dev    Off-chain consumers should switch on this value first, then on the
///         specific `ContractError` code for fine-grained handling.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Contract setup and initialization errors (codes 1-99).
    Initialization,
    /// Caller identity and permission errors (codes 100-199).
    Authorization,
    /// Issuance parameter and series lookup errors (codes 200-299).
    Issuance,
    /// Unit purchase / redemption lifecycle errors (codes 300-399).
    Series,
    /// Token movement and liquidity errors (codes 400-499).
    Funds,
    /// Safe-math errors (codes 700-799).
    Arithmetic,
}

/// @title  ContractError
/// @notice Canonical error enum shared by the issuer and vault contracts.
/// @dev    Codes are wire-stable. Never renumber a variant after deployment.
///         Append new variants at the end of their category block only.
///         Use the ErrorExt trait to retrieve the category and description.
///
/// Error Code Layout:
///   1  -  99  : Initialization
///   100 - 199 : Authorization
///   200 - 299 : Issuance
///   300 - 399 : Series
///   400 - 499 : Funds
///   700 - 799 : Arithmetic
#[contracterror]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u32)]
pub enum ContractError {
    // --- Initialization (1-99) ---
    /// Contract has not been initialized yet.
    /// Contracts: issuer, vault
    NotInitialized = 1,

    /// Contract has already been initialized and cannot be re-initialized.
    /// Contracts: issuer, vault
    AlreadyInitialized = 2,

    // --- Authorization (100-199) ---
    /// Caller is not the issuer owner.
    /// Contracts: issuer
    NotIssuerOwner = 100,

    /// Caller is not the owner of the bond series.
    /// Contracts: issuer
    NotSeriesOwner = 101,

    /// Caller does not hold the referenced bond unit.
    /// Contracts: issuer
    NotOwner = 102,

    // --- Issuance (200-299) ---
    /// Payment sent with `create` is below the configured issuance fee.
    /// Contracts: issuer
    InsufficientFee = 200,

    /// Payment sent with `create` is above the configured issuance fee.
    /// Contracts: issuer
    OverpaidFee = 201,

    /// Series total supply must be strictly positive.
    /// Contracts: issuer
    InvalidTotal = 202,

    /// Maturity threshold must be strictly positive.
    /// Contracts: issuer
    InvalidMaturity = 203,

    /// Amount argument must be strictly positive (> 0).
    /// Contracts: issuer, vault
    InvalidAmount = 204,

    /// Percentage must be in the range 0-100.
    /// Contracts: issuer
    InvalidPercentage = 205,

    /// The fee vault has already been bound to the issuer.
    /// Contracts: issuer
    VaultAlreadyBound = 206,

    /// No bond series exists for the given id.
    /// Contracts: issuer
    SeriesNotFound = 207,

    /// Vault-routed purchase names a vault the series was not created with.
    /// Contracts: issuer
    InvalidReferrer = 208,

    /// Token is neither the investment nor the interest token of the series.
    /// Contracts: issuer
    UnsupportedToken = 209,

    // --- Series (300-399) ---
    /// Purchase would exceed the series total supply.
    /// Contracts: issuer
    SupplyExhausted = 300,

    /// Unit count is zero, above the per-call cap, or inconsistent with the
    /// supplied unit ids.
    /// Contracts: issuer
    InvalidCount = 301,

    /// Unit id has never been minted for this series.
    /// Contracts: issuer
    UnitNotFound = 302,

    /// Unit has already been redeemed (burned).
    /// Contracts: issuer
    AlreadyRedeemed = 303,

    /// Unit has not reached maturity and early redemption was not requested.
    /// Contracts: issuer
    NotMatured = 304,

    /// Series no longer accepts purchases.
    /// Contracts: issuer
    SeriesClosed = 305,

    // --- Funds (400-499) ---
    /// The token collaborator refused a transfer.
    /// Contracts: issuer
    TransferFailed = 400,

    /// Series reserves cannot cover the requested payout.
    /// Contracts: issuer
    InsufficientLiquidity = 401,

    /// Series reserves hold nothing above what outstanding units are owed.
    /// Contracts: issuer
    NothingToWithdraw = 402,

    // --- Arithmetic (700-799) ---
    /// Integer overflow detected during a checked arithmetic operation.
    /// Contracts: issuer, vault
    Overflow = 700,

    /// Integer underflow detected during a checked arithmetic operation.
    /// Contracts: issuer
    Underflow = 701,
}

/// @title  ErrorExt
/// @notice Provides category(), description() and is_retryable() on every
///         ContractError variant.
/// @dev    Use this for structured logging, monitoring, and off-chain display.
pub trait ErrorExt {
    /// @return The ErrorCategory bucket this error belongs to.
    fn category(&self) -> ErrorCategory;

    /// @return A static string description safe for logging or display.
    fn description(&self) -> &'static str;

    /// @return true when the same call may succeed after the caller changes
    ///         external state (allowance, balance, ledger height, funding).
    fn is_retryable(&self) -> bool;
}

impl ErrorExt for ContractError {
    fn category(&self) -> ErrorCategory {
        match self {
            ContractError::NotInitialized | ContractError::AlreadyInitialized => {
                ErrorCategory::Initialization
            }

            ContractError::NotIssuerOwner
            | ContractError::NotSeriesOwner
            | ContractError::NotOwner => ErrorCategory::Authorization,

            ContractError::InsufficientFee
            | ContractError::OverpaidFee
            | ContractError::InvalidTotal
            | ContractError::InvalidMaturity
            | ContractError::InvalidAmount
            | ContractError::InvalidPercentage
            | ContractError::VaultAlreadyBound
            | ContractError::SeriesNotFound
            | ContractError::InvalidReferrer
            | ContractError::UnsupportedToken => ErrorCategory::Issuance,

            ContractError::SupplyExhausted
            | ContractError::InvalidCount
            | ContractError::UnitNotFound
            | ContractError::AlreadyRedeemed
            | ContractError::NotMatured
            | ContractError::SeriesClosed => ErrorCategory::Series,

            ContractError::TransferFailed
            | ContractError::InsufficientLiquidity
            | ContractError::NothingToWithdraw => ErrorCategory::Funds,

            ContractError::Overflow | ContractError::Underflow => ErrorCategory::Arithmetic,
        }
    }

    fn description(&self) -> &'static str {
        match self {
            ContractError::NotInitialized => "Contract has not been initialized",
            ContractError::AlreadyInitialized => "Contract has already been initialized",
            ContractError::NotIssuerOwner => "Caller is not the issuer owner",
            ContractError::NotSeriesOwner => "Caller is not the bond series owner",
            ContractError::NotOwner => "Caller does not own the bond unit",
            ContractError::InsufficientFee => "Payment is below the issuance fee",
            ContractError::OverpaidFee => "Payment is above the issuance fee",
            ContractError::InvalidTotal => "Series total supply must be positive",
            ContractError::InvalidMaturity => "Maturity threshold must be positive",
            ContractError::InvalidAmount => "Amount must be strictly positive (> 0)",
            ContractError::InvalidPercentage => "Percentage must be in range 0-100",
            ContractError::VaultAlreadyBound => "Fee vault has already been bound",
            ContractError::SeriesNotFound => "No bond series found for the given id",
            ContractError::InvalidReferrer => "Referrer is not the vault bound to the series",
            ContractError::UnsupportedToken => "Token is not used by this bond series",
            ContractError::SupplyExhausted => "Purchase exceeds remaining series supply",
            ContractError::InvalidCount => "Unit count is zero, too large, or mismatched",
            ContractError::UnitNotFound => "Bond unit id has never been minted",
            ContractError::AlreadyRedeemed => "Bond unit has already been redeemed",
            ContractError::NotMatured => "Bond unit has not reached maturity",
            ContractError::SeriesClosed => "Bond series no longer accepts purchases",
            ContractError::TransferFailed => "Token transfer was refused",
            ContractError::InsufficientLiquidity => "Series reserves cannot cover the payout",
            ContractError::NothingToWithdraw => "No reserve surplus above outstanding liabilities",
            ContractError::Overflow => "Integer overflow in checked arithmetic",
            ContractError::Underflow => "Integer underflow in checked arithmetic",
        }
    }

    fn is_retryable(&self) -> bool {
        matches!(
            self,
            ContractError::NotInitialized
                | ContractError::InsufficientFee
                | ContractError::OverpaidFee
                | ContractError::NotMatured
                | ContractError::TransferFailed
                | ContractError::InsufficientLiquidity
        )
    }
}
