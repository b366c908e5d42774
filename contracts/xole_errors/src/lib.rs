#![no_std]

use soroban_sdk::contracterror;

/// Error domain, derived from the code range. Off-chain consumers switch on
/// this first and then on the specific `XoleError` code.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Contract setup and initialization errors (codes 1-99).
    Initialization,
    /// Caller identity and permission errors (codes 100-199).
    Authorization,
    /// Lock lifecycle errors (codes 200-299).
    Lock,
    /// Conversion and routing errors (codes 300-399).
    Conversion,
    /// Fund withdrawal and reward policy errors (codes 400-499).
    Funds,
    /// Internal invariant and safe-math errors (codes 500-599).
    Invariant,
}

/// Errors returned by the xOLE contract.
///
/// Codes are wire-stable. Never renumber a variant after deployment; append
/// new variants at the end of their category block only.
///
/// Error Code Layout:
///   1  -  99  : Initialization
///   100 - 199 : Authorization
///   200 - 299 : Lock
///   300 - 399 : Conversion
///   400 - 499 : Funds
///   500 - 599 : Invariant
#[contracterror]
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u32)]
pub enum XoleError {
    // --- Initialization (1-99) ---
    /// Contract has not been initialized yet.
    NotInitialized = 1,

    /// Contract has already been initialized and cannot be re-initialized.
    AlreadyInitialized = 2,

    // --- Authorization (100-199) ---
    /// Caller is not the admin or the configured operations address.
    Unauthorized = 100,

    // --- Lock (200-299) ---
    /// No lock, a lock that already exists, or an expired lock where an
    /// active one is required (and the reverse for withdrawal).
    InvalidLockState = 200,

    /// Unlock time is not in the future, not week aligned, not later than the
    /// current one, or beyond the maximum lock horizon.
    InvalidDuration = 201,

    /// Amount is non-positive or exceeds the unencumbered balance.
    InvalidAmount = 202,

    // --- Conversion (300-399) ---
    /// Realized swap output is below the caller's minimum.
    SlippageExceeded = 300,

    /// Route does not start at the spent token or does not end at the share
    /// token, or is malformed for its kind.
    InvalidRoute = 301,

    /// The share token has not been configured.
    ShareTokenUnset = 302,

    /// A conversion is already in progress.
    ReentrancyDetected = 303,

    // --- Funds (400-499) ---
    /// The requested fund holds no balance.
    NothingToWithdraw = 400,

    /// Operation is not available under the configured reward policy.
    PolicyMismatch = 401,

    /// Fund split ratios exceed 10000 basis points in total.
    InvalidRatio = 402,

    /// Share token cannot change while funds are still owed in it.
    FundsOutstanding = 403,

    // --- Invariant (500-599) ---
    /// Withdrawable totals would exceed what the contract holds.
    /// Raised as a hard abort; unreachable in correct operation.
    SolvencyViolation = 500,

    /// Integer overflow detected during a checked arithmetic operation.
    Overflow = 501,
}

/// Category and human-readable description of every `XoleError` variant.
pub trait ErrorExt {
    /// The `ErrorCategory` bucket this error belongs to.
    fn category(&self) -> ErrorCategory;

    /// Static description safe for logging or display.
    fn description(&self) -> &'static str;
}

impl ErrorExt for XoleError {
    fn category(&self) -> ErrorCategory {
        match self {
            XoleError::NotInitialized | XoleError::AlreadyInitialized => {
                ErrorCategory::Initialization
            }
            XoleError::Unauthorized => ErrorCategory::Authorization,

            XoleError::InvalidLockState | XoleError::InvalidDuration | XoleError::InvalidAmount => {
                ErrorCategory::Lock
            }

            XoleError::SlippageExceeded
            | XoleError::InvalidRoute
            | XoleError::ShareTokenUnset
            | XoleError::ReentrancyDetected => ErrorCategory::Conversion,

            XoleError::NothingToWithdraw
            | XoleError::PolicyMismatch
            | XoleError::InvalidRatio
            | XoleError::FundsOutstanding => ErrorCategory::Funds,

            XoleError::SolvencyViolation | XoleError::Overflow => ErrorCategory::Invariant,
        }
    }

    fn description(&self) -> &'static str {
        match self {
            XoleError::NotInitialized => "Contract has not been initialized",
            XoleError::AlreadyInitialized => "Contract has already been initialized",
            XoleError::Unauthorized => "Caller is not authorized for this operation",
            XoleError::InvalidLockState => "Lock is missing, already exists, or has the wrong expiry state",
            XoleError::InvalidDuration => {
                "Unlock time must be future, week aligned, increasing and within the max horizon"
            }
            XoleError::InvalidAmount => "Amount must be positive and within the available balance",
            XoleError::SlippageExceeded => "Realized output is below the requested minimum",
            XoleError::InvalidRoute => "Route does not connect the spent token to the share token",
            XoleError::ShareTokenUnset => "Share token has not been configured",
            XoleError::ReentrancyDetected => "Reentrancy detected; call rejected",
            XoleError::NothingToWithdraw => "Nothing to withdraw",
            XoleError::PolicyMismatch => "Operation is disabled by the configured reward policy",
            XoleError::InvalidRatio => "Fund ratios must sum to at most 10000 bps",
            XoleError::FundsOutstanding => "Funds are still owed in the current share token",
            XoleError::SolvencyViolation => "Withdrawable totals exceed held balance",
            XoleError::Overflow => "Integer overflow in checked arithmetic",
        }
    }
}
