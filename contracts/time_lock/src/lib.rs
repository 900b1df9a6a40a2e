//! Time-Lock Forwarder Contract
//!
//! Gates arbitrary actions behind a refundable token deposit. Every forwarded
//! action locks a deposit for a hold period; once the period has elapsed the
//! owner withdraws it again. Each lock an account still holds makes its next
//! lock more expensive and longer (the spam penalty).
//!
//! ## Key design decisions
//!
//! - **Snapshot pricing**: the resolved amount and unlock time are stored on
//!   each `WithdrawLock`; later setting changes never touch existing locks.
//! - **FIFO release**: locks leave an owner's queue only from the head, and
//!   only as a run of matured locks.
//! - **All-or-nothing**: every entry point returns `Result`; an `Err` makes the
//!   host discard the whole invocation, token transfers and ledger writes
//!   included. `forward` relies on this when the forwarded action fails.
//! - **Injected collaborators**: roles come from an ACL contract, the deposit
//!   from a Soroban token, the action from any contract exposing
//!   `execute(payload)`.

#![no_std]

mod acl;
mod events;
mod executor;
mod ledger;
mod math;
mod penalty;
mod token;
mod types;

pub use lock_errors::ContractError;
pub use ledger::MAX_ACTIVE_LOCKS;
pub use penalty::PENALTY_SCALE;
pub use types::{LockSettings, WithdrawLock};

use types::DataKey;

use soroban_sdk::{contract, contractimpl, Address, Bytes, Env, Symbol, Vec};









#[cfg(test)]
mod test_withdraw;

// ─── Helpers ───────────────────────────────────────────────────────────────

fn load_settings(e: &Env) -> Result<LockSettings, ContractError> {
    e.storage()
        .instance()
        .get(&DataKey::Settings)
        .ok_or(ContractError::NotInitialized)
}

fn save_settings(e: &Env, settings: &LockSettings) {
    e.storage().instance().set(&DataKey::Settings, settings);
}

// ─── Contract ──────────────────────────────────────────────────────────────

#[contract]
pub struct TimeLock;

#[contractimpl]
impl TimeLock {
    // ── Setup ──────────────────────────────────────────────────────────────

    /// One-time initialization.
    ///
    /// Takes no signature: the first caller binds the ACL and token for good.
    /// Deploy and initialize in the same transaction so no one else can
    /// initialize in between.
    ///
    /// * `acl` - permission registry consulted for every role-gated call
    /// * `token` - token deposited by `forward`
    /// * `lock_duration` - base hold period in seconds
    /// * `lock_amount` - base deposit, must be non-negative
    /// * `spam_penalty_factor` - basis points of the base values added per active lock
    pub fn initialize(
        e: Env,
        acl: Address,
        token: Address,
        lock_duration: u64,
        lock_amount: i128,
        spam_penalty_factor: u32,
    ) -> Result<(), ContractError> {
        if e.storage().instance().has(&DataKey::Settings) {
            return Err(ContractError::AlreadyInitialized);
        }
        if lock_amount < 0 {
            return Err(ContractError::InvalidAmount);
        }

        let settings = LockSettings {
            token,
            lock_duration,
            lock_amount,
            spam_penalty_factor,
        };
        e.storage().instance().set(&DataKey::Acl, &acl);
        save_settings(&e, &settings);

        events::emit_lock_initialized(&e, &settings);
        Ok(())
    }

    pub fn has_initialized(e: Env) -> bool {
        e.storage().instance().has(&DataKey::Settings)
    }

    // ── Settings ───────────────────────────────────────────────────────────

    /// Set the base hold period. Requires `CHANGE_DURATION_ROLE`.
    pub fn change_lock_duration(
        e: Env,
        caller: Address,
        lock_duration: u64,
    ) -> Result<(), ContractError> {
        caller.require_auth();
        let mut settings = load_settings(&e)?;
        acl::require_role(&e, &caller, acl::CHANGE_DURATION_ROLE)?;

        let old = settings.lock_duration;
        settings.lock_duration = lock_duration;
        save_settings(&e, &settings);

        events::emit_lock_duration_changed(&e, old, lock_duration);
        Ok(())
    }

    /// Set the base deposit. Requires `CHANGE_AMOUNT_ROLE`.
    pub fn change_lock_amount(
        e: Env,
        caller: Address,
        lock_amount: i128,
    ) -> Result<(), ContractError> {
        caller.require_auth();
        let mut settings = load_settings(&e)?;
        acl::require_role(&e, &caller, acl::CHANGE_AMOUNT_ROLE)?;
        if lock_amount < 0 {
            return Err(ContractError::InvalidAmount);
        }

        let old = settings.lock_amount;
        settings.lock_amount = lock_amount;
        save_settings(&e, &settings);

        events::emit_lock_amount_changed(&e, old, lock_amount);
        Ok(())
    }

    /// Set the spam penalty factor in basis points. Requires `CHANGE_SPAM_PENALTY_ROLE`.
    pub fn change_spam_penalty_factor(
        e: Env,
        caller: Address,
        spam_penalty_factor: u32,
    ) -> Result<(), ContractError> {
        caller.require_auth();
        let mut settings = load_settings(&e)?;
        acl::require_role(&e, &caller, acl::CHANGE_SPAM_PENALTY_ROLE)?;

        let old = settings.spam_penalty_factor;
        settings.spam_penalty_factor = spam_penalty_factor;
        save_settings(&e, &settings);

        events::emit_spam_penalty_changed(&e, old, spam_penalty_factor);
        Ok(())
    }

    // ── Forwarding ─────────────────────────────────────────────────────────

    pub fn is_forwarder(_e: Env) -> bool {
        true
    }

    /// `true` once initialized and while `sender` holds `LOCK_TOKENS_ROLE`.
    pub fn can_forward(e: Env, sender: Address) -> bool {
        if !Self::has_initialized(e.clone()) {
            return false;
        }
        acl::has_role(&e, &sender, acl::LOCK_TOKENS_ROLE).unwrap_or(false)
    }

    /// Lock the current fee for `sender`, then run `execute(payload)` on `target`.
    ///
    /// The fee is `lock_amount` plus the spam penalty for the locks `sender`
    /// already holds; the hold period grows the same way. `sender` must have
    /// approved this contract for at least the fee (see `forward_fee`).
    ///
    /// # Errors
    /// * `NotInitialized`
    /// * `Unauthorized` - `sender` lacks `LOCK_TOKENS_ROLE`
    /// * `BlacklistedTarget` - `target` is the escrow token or this contract
    /// * `TooManyActiveLocks` - `sender` already holds `MAX_ACTIVE_LOCKS` locks
    /// * `TransferFailed` - the fee could not be pulled; no lock is created
    /// * `ExecutionFailed` - the action failed; the fee and lock are discarded with it
    pub fn forward(
        e: Env,
        sender: Address,
        target: Address,
        payload: Bytes,
    ) -> Result<(), ContractError> {
        sender.require_auth();
        let settings = load_settings(&e)?;
        acl::require_role(&e, &sender, acl::LOCK_TOKENS_ROLE)?;

        if target == settings.token || target == e.current_contract_address() {
            return Err(ContractError::BlacklistedTarget);
        }

        let active_locks = ledger::load(&e, &sender).len();
        let (lock_amount, duration) = penalty::next_lock_terms(active_locks, &settings)?;
        let unlock_time = math::add_u64(e.ledger().timestamp(), duration)?;

        token::transfer_into_contract(&e, &settings.token, &sender, lock_amount)?;

        ledger::push(
            &e,
            &sender,
            WithdrawLock {
                unlock_time,
                lock_amount,
            },
        )?;
        events::emit_lock_created(&e, &sender, unlock_time, lock_amount);

        executor::run(&e, &target, &payload)
    }

    // ── Withdrawal ─────────────────────────────────────────────────────────

    /// Release up to `count` locks from the head of `sender`'s queue.
    ///
    /// * `count > 0` - release exactly the first `count` locks if all of them
    ///   have matured; otherwise release nothing and return 0.
    /// * `count == 0` - release every matured lock from the head up to the
    ///   first pending one.
    ///
    /// Returns the amount transferred back to `sender`.
    ///
    /// # Errors
    /// * `NotInitialized`
    /// * `TooManyWithdrawLocks` - `count` exceeds the number of active locks
    /// * `TransferFailed` - custody could not pay out; the queue is left intact
    pub fn withdraw_tokens(e: Env, sender: Address, count: u32) -> Result<i128, ContractError> {
        sender.require_auth();
        let settings = load_settings(&e)?;

        let locks = ledger::load(&e, &sender);
        if count > locks.len() {
            return Err(ContractError::TooManyWithdrawLocks);
        }

        let limit = if count == 0 { locks.len() } else { count };
        let matured = ledger::matured_prefix_len(&locks, limit, e.ledger().timestamp());
        if matured == 0 || matured < count {
            return Ok(0);
        }

        let (released, remaining) = ledger::split_head(&locks, matured);
        let amount = ledger::total_amount(&released)?;

        // CEI: shrink the queue before paying out.
        ledger::save(&e, &sender, &remaining);
        token::transfer_from_contract(&e, &settings.token, &sender, amount)?;

        events::emit_locks_withdrawn(&e, &sender, matured, amount);
        Ok(amount)
    }

    /// Release every matured lock at the head of `sender`'s queue.
    pub fn withdraw_all_tokens(e: Env, sender: Address) -> Result<i128, ContractError> {
        Self::withdraw_tokens(e, sender, 0)
    }

    // ── Queries ────────────────────────────────────────────────────────────

    /// Token and amount `sender` would lock on its next `forward`.
    pub fn forward_fee(e: Env, sender: Address) -> Result<(Address, i128), ContractError> {
        let settings = load_settings(&e)?;
        let active_locks = ledger::load(&e, &sender).len();
        let (lock_amount, _) = penalty::next_lock_terms(active_locks, &settings)?;
        Ok((settings.token, lock_amount))
    }

    /// Extra `(amount, duration)` on top of the base values for `sender`'s next lock.
    pub fn get_spam_penalty(e: Env, sender: Address) -> Result<(i128, u64), ContractError> {
        let settings = load_settings(&e)?;
        let active_locks = ledger::load(&e, &sender).len();
        penalty::spam_penalty(active_locks, &settings)
    }

    pub fn get_withdraw_locks_count(e: Env, owner: Address) -> u32 {
        ledger::load(&e, &owner).len()
    }

    /// Lock at `index` in `owner`'s queue (0 = oldest).
    pub fn get_withdraw_lock(e: Env, owner: Address, index: u32) -> Option<WithdrawLock> {
        ledger::load(&e, &owner).get(index)
    }

    pub fn get_withdraw_locks(e: Env, owner: Address) -> Vec<WithdrawLock> {
        ledger::load(&e, &owner)
    }

    /// Number of locks `withdraw_all_tokens` would release right now.
    pub fn get_unlocked_count(e: Env, owner: Address) -> u32 {
        let locks = ledger::load(&e, &owner);
        ledger::matured_prefix_len(&locks, locks.len(), e.ledger().timestamp())
    }

    /// Sum of all active lock amounts held for `owner`.
    pub fn get_locked_total(e: Env, owner: Address) -> Result<i128, ContractError> {
        ledger::total_amount(&ledger::load(&e, &owner))
    }

    /// Escrow custody across all owners.
    pub fn get_custody_balance(e: Env) -> Result<i128, ContractError> {
        let settings = load_settings(&e)?;
        Ok(token::custody_balance(&e, &settings.token))
    }

    pub fn get_settings(e: Env) -> Result<LockSettings, ContractError> {
        load_settings(&e)
    }

    pub fn get_token(e: Env) -> Result<Address, ContractError> {
        Ok(load_settings(&e)?.token)
    }

    pub fn get_lock_duration(e: Env) -> Result<u64, ContractError> {
        Ok(load_settings(&e)?.lock_duration)
    }

    pub fn get_lock_amount(e: Env) -> Result<i128, ContractError> {
        Ok(load_settings(&e)?.lock_amount)
    }

    pub fn get_spam_penalty_factor(e: Env) -> Result<u32, ContractError> {
        Ok(load_settings(&e)?.spam_penalty_factor)
    }

    pub fn get_acl(e: Env) -> Result<Address, ContractError> {
        acl::get_acl(&e)
    }

    // ── Roles ──────────────────────────────────────────────────────────────

    pub fn lock_tokens_role(e: Env) -> Symbol {
        acl::role(&e, acl::LOCK_TOKENS_ROLE)
    }

    pub fn change_duration_role(e: Env) -> Symbol {
        acl::role(&e, acl::CHANGE_DURATION_ROLE)
    }

    pub fn change_amount_role(e: Env) -> Symbol {
        acl::role(&e, acl::CHANGE_AMOUNT_ROLE)
    }

    pub fn change_spam_penalty_role(e: Env) -> Symbol {
        acl::role(&e, acl::CHANGE_SPAM_PENALTY_ROLE)
    }
}
