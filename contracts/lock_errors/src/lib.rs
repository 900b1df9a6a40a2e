#![no_std]

use soroban_sdk::contracterror;

/// @title  ErrorCategory
/// @notice Groups errors by domain for monitoring and off-chain display.
/// @dev    Off-chain consumers should switch on this value first, then on the
///         specific `ContractError` code for fine-grained handling.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Contract setup and initialization errors (codes 1-99).
    Initialization,
    /// Capability and permission-management errors (codes 100-199).
    Authorization,
    /// Lock ledger and forwarding errors (codes 200-299).
    Lock,
    /// Failures reported by an external collaborator contract (codes 300-399).
    Collaborator,
    /// Safe-math errors (codes 700-799).
    Arithmetic,
}

/// @title  ContractError
/// @notice Canonical error enum shared by the time-lock and ACL contracts.
/// @dev    Codes are wire-stable. Never renumber a variant after deployment.
///         Append new variants at the end of their category block only.
///
/// Error Code Layout:
///   1  -  99  : Initialization
///   100 - 199 : Authorization
///   200 - 299 : Lock
///   300 - 399 : Collaborator
///   700 - 799 : Arithmetic
#[contracterror]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u32)]
pub enum ContractError {
    // --- Initialization (1-99) ---
    /// A gated operation ran before `initialize`.
    /// Contracts: time_lock, lock_acl
    NotInitialized = 1,

    /// `initialize` was called a second time.
    /// Contracts: time_lock, lock_acl
    AlreadyInitialized = 2,

    // --- Authorization (100-199) ---
    /// Caller does not hold the role required by the operation.
    /// Contracts: time_lock
    Unauthorized = 100,

    /// Caller is neither the ACL root nor the manager of the (app, role) pair.
    /// Contracts: lock_acl
    NotPermissionManager = 101,

    // --- Lock (200-299) ---
    /// Requested withdrawal count exceeds the number of active locks.
    /// Contracts: time_lock
    TooManyWithdrawLocks = 200,

    /// Lock amount must be non-negative.
    /// Contracts: time_lock
    InvalidAmount = 201,

    /// The forward target is the escrow token or the escrow itself.
    /// Contracts: time_lock
    BlacklistedTarget = 202,

    /// The account's lock queue is full; withdraw matured locks first.
    /// Contracts: time_lock
    TooManyActiveLocks = 203,

    // --- Collaborator (300-399) ---
    /// The token contract rejected a transfer (balance or allowance).
    /// Contracts: time_lock
    TransferFailed = 300,

    /// The forwarded action failed.
    /// Contracts: time_lock
    ExecutionFailed = 301,

    // --- Arithmetic (700-799) ---
    /// Integer overflow detected during a checked arithmetic operation.
    /// Contracts: time_lock
    Overflow = 700,
}

/// @title  ErrorExt
/// @notice Provides category() and description() on every ContractError variant.
pub trait ErrorExt {
    /// @return The ErrorCategory bucket this error belongs to.
    fn category(&self) -> ErrorCategory;

    /// @return A static string description safe for logging or display.
    fn description(&self) -> &'static str;
}

impl ErrorExt for ContractError {
    fn category(&self) -> ErrorCategory {
        match self {
            ContractError::NotInitialized | ContractError::AlreadyInitialized => {
                ErrorCategory::Initialization
            }
            ContractError::Unauthorized | ContractError::NotPermissionManager => {
                ErrorCategory::Authorization
            }
            ContractError::TooManyWithdrawLocks
            | ContractError::InvalidAmount
            | ContractError::BlacklistedTarget
            | ContractError::TooManyActiveLocks => ErrorCategory::Lock,

            ContractError::TransferFailed | ContractError::ExecutionFailed => {
                ErrorCategory::Collaborator
            }
            ContractError::Overflow => ErrorCategory::Arithmetic,
        }
    }

    fn description(&self) -> &'static str {
        match self {
            ContractError::NotInitialized => "Contract has not been initialized",
            ContractError::AlreadyInitialized => "Contract has already been initialized",
            ContractError::Unauthorized => "Caller does not hold the required role",
            ContractError::NotPermissionManager => {
                "Caller cannot manage this permission"
            }
            ContractError::TooManyWithdrawLocks => {
                "Requested more locks than the account holds"
            }
            ContractError::InvalidAmount => "Lock amount must be non-negative",
            ContractError::BlacklistedTarget => "Forward target is not allowed",
            ContractError::TooManyActiveLocks => "Account holds the maximum number of locks",
            ContractError::TransferFailed => "Token transfer was rejected",
            ContractError::ExecutionFailed => "Forwarded action failed",
            ContractError::Overflow => "Integer overflow in checked arithmetic",
        }
    }
}
