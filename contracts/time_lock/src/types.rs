use soroban_sdk::{contracttype, Address};

// ─── Lock state ────────────────────────────────────────────────────────────

/// Tokens held for one forwarded action. Never modified after creation.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct WithdrawLock {
    /// Ledger timestamp from which the lock may be withdrawn.
    pub unlock_time: u64,
    /// Amount captured when the lock was created, penalty included.
    pub lock_amount: i128,
}

// ─── Configuration ─────────────────────────────────────────────────────────

/// Live pricing of the next lock. Changes only affect locks created afterwards.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LockSettings {
    /// Token deposited for each forwarded action.
    pub token: Address,
    /// Base hold period in seconds.
    pub lock_duration: u64,
    /// Base deposit in token base units.
    pub lock_amount: i128,
    /// Extra fee and duration per active lock, in basis points of the base values.
    pub spam_penalty_factor: u32,
}

// ─── Storage keys ──────────────────────────────────────────────────────────

#[contracttype]
pub enum DataKey {
    /// Current `LockSettings`.
    Settings,
    /// Permission registry consulted for every role-gated call.
    Acl,
    /// Per-owner queue of active locks, oldest first.
    WithdrawLocks(Address),
}
