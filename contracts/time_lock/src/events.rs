use crate::types::LockSettings;
use soroban_sdk::{Address, Env, Symbol};

/// Emitted once by `initialize`.
///
/// # Data
/// * `Address` - Escrow token
/// * `u64` - Base lock duration
/// * `i128` - Base lock amount
/// * `u32` - Spam penalty factor (bps)
pub fn emit_lock_initialized(e: &Env, settings: &LockSettings) {
    let topics = (Symbol::new(e, "lock_initialized"),);
    let data = (
        settings.token.clone(),
        settings.lock_duration,
        settings.lock_amount,
        settings.spam_penalty_factor,
    );
    e.events().publish(topics, data);
}

/// Emitted when `forward` captures a deposit.
///
/// # Topics
/// * `Symbol` - "lock_created"
/// * `Address` - The lock owner
///
/// # Data
/// * `u64` - Unlock timestamp
/// * `i128` - Amount locked
pub fn emit_lock_created(e: &Env, owner: &Address, unlock_time: u64, lock_amount: i128) {
    let topics = (Symbol::new(e, "lock_created"), owner.clone());
    e.events().publish(topics, (unlock_time, lock_amount));
}

/// Emitted when matured locks are released.
///
/// # Topics
/// * `Symbol` - "locks_withdrawn"
/// * `Address` - The lock owner
///
/// # Data
/// * `u32` - Number of locks removed from the head of the queue
/// * `i128` - Amount returned
pub fn emit_locks_withdrawn(e: &Env, owner: &Address, lock_count: u32, amount: i128) {
    let topics = (Symbol::new(e, "locks_withdrawn"), owner.clone());
    e.events().publish(topics, (lock_count, amount));
}

pub fn emit_lock_duration_changed(e: &Env, old: u64, new: u64) {
    e.events()
        .publish((Symbol::new(e, "lock_duration_changed"),), (old, new));
}

pub fn emit_lock_amount_changed(e: &Env, old: i128, new: i128) {
    e.events()
        .publish((Symbol::new(e, "lock_amount_changed"),), (old, new));
}

pub fn emit_spam_penalty_changed(e: &Env, old: u32, new: u32) {
    e.events()
        .publish((Symbol::new(e, "spam_penalty_changed"),), (old, new));
}
