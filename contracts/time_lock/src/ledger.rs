//! Per-owner lock queue.
//!
//! Locks are appended at the tail by `forward` and only ever leave from the
//! head, so the queue doubles as the FIFO withdrawal order. Entries live in
//! `persistent()` storage; an emptied queue's entry is removed.
//!
//! A queue is a single ledger entry rewritten on every change, so its length
//! is capped at `MAX_ACTIVE_LOCKS` to stay well inside the entry size limit.

use crate::math;
use crate::types::{DataKey, WithdrawLock};
use lock_errors::ContractError;
use soroban_sdk::{Address, Env, Vec};

/// Minimum ledger sequence TTL before a bump is requested (~1 day at 5 s/ledger).
pub(crate) const BUMP_THRESHOLD: u32 = 17_280;
/// Target TTL after a bump (~30 days).
pub(crate) const BUMP_TARGET: u32 = 518_400;

/// Upper bound on one owner's active locks.
pub const MAX_ACTIVE_LOCKS: u32 = 500;

/// Read `owner`'s locks. An existing queue has its TTL bumped so it outlives
/// an owner who only comes back to withdraw.
pub fn load(e: &Env, owner: &Address) -> Vec<WithdrawLock> {
    let key = DataKey::WithdrawLocks(owner.clone());
    let storage = e.storage().persistent();
    match storage.get::<_, Vec<WithdrawLock>>(&key) {
        Some(locks) => {
            storage.extend_ttl(&key, BUMP_THRESHOLD, BUMP_TARGET);
            locks
        }
        None => Vec::new(e),
    }
}

/// Persist `locks` for `owner`, or drop the entry once the queue is empty.
pub fn save(e: &Env, owner: &Address, locks: &Vec<WithdrawLock>) {
    let key = DataKey::WithdrawLocks(owner.clone());
    let storage = e.storage().persistent();
    if locks.is_empty() {
        storage.remove(&key);
        return;
    }
    storage.set(&key, locks);
    storage.extend_ttl(&key, BUMP_THRESHOLD, BUMP_TARGET);
}

/// Append a lock at the tail of `owner`'s queue.
///
/// # Errors
/// * `TooManyActiveLocks` - the queue already holds `MAX_ACTIVE_LOCKS`
pub fn push(e: &Env, owner: &Address, lock: WithdrawLock) -> Result<(), ContractError> {
    let mut locks = load(e, owner);
    if locks.len() >= MAX_ACTIVE_LOCKS {
        return Err(ContractError::TooManyActiveLocks);
    }
    locks.push_back(lock);
    save(e, owner, &locks);
    Ok(())
}

/// Number of locks at the head of `locks`, at most `limit`, that have matured at `now`.
///
/// Stops at the first pending lock: a matured lock queued behind a pending
/// one is never counted.
pub fn matured_prefix_len(locks: &Vec<WithdrawLock>, limit: u32, now: u64) -> u32 {
    let mut count = 0;
    for lock in locks.iter() {
        if count == limit || lock.unlock_time > now {
            break;
        }
        count += 1;
    }
    count
}

/// Sum of the lock amounts in `locks`.
pub fn total_amount(locks: &Vec<WithdrawLock>) -> Result<i128, ContractError> {
    let mut total = 0_i128;
    for lock in locks.iter() {
        total = math::add_i128(total, lock.lock_amount)?;
    }
    Ok(total)
}

/// Split `locks` after the first `count` entries: `(head, rest)`.
pub fn split_head(
    locks: &Vec<WithdrawLock>,
    count: u32,
) -> (Vec<WithdrawLock>, Vec<WithdrawLock>) {
    (locks.slice(..count), locks.slice(count..))
}
