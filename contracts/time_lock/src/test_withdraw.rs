//! Withdrawal: maturity, FIFO order and config snapshots.

#![cfg(test)]

use crate::test_helpers::*;
use crate::ContractError;
use soroban_sdk::testutils::{Address as _, Events, Ledger};
use soroban_sdk::{Address, Env, FromVal, Symbol};

/// Token that takes deposits but refuses every payout.
mod payout_refusing_token {
    use soroban_sdk::{contract, contractimpl, Address, Env};

    #[contract]
    pub struct PayoutRefusingToken;

    #[contractimpl]
    impl PayoutRefusingToken {
        pub fn transfer_from(
            _e: Env,
            _spender: Address,
            _from: Address,
            _to: Address,
            _amount: i128,
        ) {
        }

        pub fn transfer(_e: Env, _from: Address, _to: Address, _amount: i128) {
            panic!("payout refused");
        }

        pub fn balance(_e: Env, _id: Address) -> i128 {
            0
        }
    }
}

use payout_refusing_token::PayoutRefusingToken;

fn advance(e: &Env, seconds: u64) {
    e.ledger().with_mut(|li| li.timestamp += seconds);
}

fn set_time(e: &Env, timestamp: u64) {
    e.ledger().with_mut(|li| li.timestamp = timestamp);
}

/// Three locks created at t=1000: 10/60, 15/90, 20/120.
fn setup_three_locks(e: &Env) -> TestContext<'_> {
    let ctx = setup(e);
    set_time(e, 1_000);
    ctx.forward();
    ctx.forward();
    ctx.forward();
    ctx
}

// ═══════════════════════════════════════════════════════════════════
// 1. Maturity
// ═══════════════════════════════════════════════════════════════════

#[test]
fn test_withdraw_before_maturity_is_noop() {
    let e = Env::default();
    let ctx = setup_three_locks(&e);
    let balance = ctx.owner_balance();

    assert_eq!(ctx.client.withdraw_tokens(&ctx.owner, &3), 0);
    assert_eq!(ctx.client.withdraw_tokens(&ctx.owner, &1), 0);
    assert_eq!(ctx.client.withdraw_all_tokens(&ctx.owner), 0);

    assert_eq!(ctx.client.get_withdraw_locks_count(&ctx.owner), 3);
    assert_eq!(ctx.owner_balance(), balance);
}

#[test]
fn test_withdraw_more_than_active_fails() {
    let e = Env::default();
    let ctx = setup_three_locks(&e);

    assert_eq!(
        ctx.client.try_withdraw_tokens(&ctx.owner, &4),
        Err(Ok(ContractError::TooManyWithdrawLocks))
    );

    set_time(&e, 10_000);
    assert_eq!(
        ctx.client.try_withdraw_tokens(&ctx.owner, &4),
        Err(Ok(ContractError::TooManyWithdrawLocks))
    );
    assert_eq!(ctx.client.get_withdraw_locks_count(&ctx.owner), 3);
}

#[test]
fn test_withdraw_with_no_locks() {
    let e = Env::default();
    let ctx = setup(&e);

    assert_eq!(ctx.client.withdraw_all_tokens(&ctx.owner), 0);
    assert_eq!(
        ctx.client.try_withdraw_tokens(&ctx.owner, &1),
        Err(Ok(ContractError::TooManyWithdrawLocks))
    );
}

#[test]
fn test_withdraw_one_after_duration() {
    let e = Env::default();
    let ctx = setup_three_locks(&e);
    let balance = ctx.owner_balance();

    advance(&e, INITIAL_LOCK_DURATION + 1);
    assert_eq!(ctx.client.withdraw_tokens(&ctx.owner, &1), INITIAL_LOCK_AMOUNT);

    assert_eq!(ctx.owner_balance(), balance + INITIAL_LOCK_AMOUNT);
    assert_eq!(ctx.client.get_withdraw_locks_count(&ctx.owner), 2);
    assert_eq!(
        ctx.client.get_withdraw_lock(&ctx.owner, &0).unwrap().lock_amount,
        15 * UNIT
    );
}

#[test]
fn test_unlock_time_is_inclusive() {
    let e = Env::default();
    let ctx = setup_three_locks(&e);

    set_time(&e, 1_000 + INITIAL_LOCK_DURATION - 1);
    assert_eq!(ctx.client.withdraw_tokens(&ctx.owner, &1), 0);

    set_time(&e, 1_000 + INITIAL_LOCK_DURATION);
    assert_eq!(ctx.client.withdraw_tokens(&ctx.owner, &1), INITIAL_LOCK_AMOUNT);
}

#[test]
fn test_partial_maturity_with_explicit_count() {
    let e = Env::default();
    let ctx = setup_three_locks(&e);

    // first two matured, third still pending
    set_time(&e, 1_090);
    assert_eq!(ctx.client.withdraw_tokens(&ctx.owner, &3), 0);
    assert_eq!(ctx.client.get_withdraw_locks_count(&ctx.owner), 3);

    assert_eq!(ctx.client.withdraw_tokens(&ctx.owner, &2), 25 * UNIT);
    assert_eq!(ctx.client.get_withdraw_locks_count(&ctx.owner), 1);
}

#[test]
fn test_withdraw_all_releases_matured_prefix() {
    let e = Env::default();
    let ctx = setup_three_locks(&e);

    set_time(&e, 1_090);
    assert_eq!(ctx.client.get_unlocked_count(&ctx.owner), 2);
    assert_eq!(ctx.client.withdraw_all_tokens(&ctx.owner), 25 * UNIT);

    assert_eq!(ctx.client.get_withdraw_locks_count(&ctx.owner), 1);
    assert_eq!(ctx.client.get_unlocked_count(&ctx.owner), 0);
    assert_eq!(ctx.client.get_locked_total(&ctx.owner), 20 * UNIT);
}

#[test]
fn test_withdraw_all_returns_everything() {
    let e = Env::default();
    let ctx = setup_three_locks(&e);
    assert_eq!(ctx.owner_balance(), DEFAULT_MINT - 45 * UNIT);
    assert_eq!(ctx.client.get_locked_total(&ctx.owner), 45 * UNIT);

    advance(&e, INITIAL_LOCK_DURATION * 3 + 1);
    assert_eq!(ctx.client.get_unlocked_count(&ctx.owner), 3);
    assert_eq!(ctx.client.withdraw_all_tokens(&ctx.owner), 45 * UNIT);

    assert_eq!(ctx.owner_balance(), DEFAULT_MINT);
    assert_eq!(ctx.custody_balance(), 0);
    assert_eq!(ctx.client.get_withdraw_locks_count(&ctx.owner), 0);
    assert_eq!(ctx.client.get_locked_total(&ctx.owner), 0);

    // an emptied queue prices the next forward at the base fee again
    let (_, fee) = ctx.client.forward_fee(&ctx.owner);
    assert_eq!(fee, INITIAL_LOCK_AMOUNT);
}

#[test]
fn test_withdraw_count_zero_equals_withdraw_all() {
    let e = Env::default();
    let ctx = setup_three_locks(&e);

    set_time(&e, 1_060);
    assert_eq!(ctx.client.withdraw_tokens(&ctx.owner, &0), INITIAL_LOCK_AMOUNT);
    assert_eq!(ctx.client.get_withdraw_locks_count(&ctx.owner), 2);
}

#[test]
fn test_withdraw_is_per_account() {
    let e = Env::default();
    let ctx = setup_three_locks(&e);
    let other = Address::generate(&e);

    advance(&e, 1_000);
    assert_eq!(ctx.client.withdraw_all_tokens(&other), 0);
    assert_eq!(ctx.client.get_withdraw_locks_count(&ctx.owner), 3);
    assert_eq!(ctx.custody_balance(), 45 * UNIT);
}

// ═══════════════════════════════════════════════════════════════════
// 2. Snapshots
// ═══════════════════════════════════════════════════════════════════

#[test]
fn test_amount_change_does_not_affect_existing_locks() {
    let e = Env::default();
    let ctx = setup(&e);
    set_time(&e, 1_000);
    ctx.forward();

    ctx.grant(&ctx.root, &ctx.client.change_amount_role());
    ctx.client.change_lock_amount(&ctx.root, &(100 * UNIT));

    set_time(&e, 1_000 + INITIAL_LOCK_DURATION);
    let before = ctx.owner_balance();
    assert_eq!(ctx.client.withdraw_all_tokens(&ctx.owner), INITIAL_LOCK_AMOUNT);
    assert_eq!(ctx.owner_balance(), before + INITIAL_LOCK_AMOUNT);
}

#[test]
fn test_duration_change_does_not_affect_existing_locks() {
    let e = Env::default();
    let ctx = setup(&e);
    set_time(&e, 1_000);
    ctx.forward();

    ctx.grant(&ctx.root, &ctx.client.change_duration_role());
    ctx.client.change_lock_duration(&ctx.root, &600);

    set_time(&e, 1_000 + INITIAL_LOCK_DURATION);
    assert_eq!(ctx.client.withdraw_tokens(&ctx.owner, &1), INITIAL_LOCK_AMOUNT);
}

#[test]
fn test_pending_head_blocks_matured_tail() {
    let e = Env::default();
    let ctx = setup(&e);
    ctx.grant(&ctx.root, &ctx.client.change_duration_role());
    ctx.grant(&ctx.root, &ctx.client.change_spam_penalty_role());
    ctx.client.change_spam_penalty_factor(&ctx.root, &0);
    set_time(&e, 1_000);

    ctx.client.change_lock_duration(&ctx.root, &1_000);
    ctx.forward(); // unlocks at 2000
    ctx.client.change_lock_duration(&ctx.root, &10);
    ctx.forward(); // unlocks at 1010

    set_time(&e, 1_500);
    assert_eq!(ctx.client.get_unlocked_count(&ctx.owner), 0);
    assert_eq!(ctx.client.withdraw_all_tokens(&ctx.owner), 0);
    assert_eq!(ctx.client.withdraw_tokens(&ctx.owner, &2), 0);
    assert_eq!(ctx.client.get_withdraw_locks_count(&ctx.owner), 2);

    set_time(&e, 2_000);
    assert_eq!(ctx.client.withdraw_tokens(&ctx.owner, &2), 20 * UNIT);
    assert_eq!(ctx.client.get_withdraw_locks_count(&ctx.owner), 0);
}

// ═══════════════════════════════════════════════════════════════════
// 3. Payout failure
// ═══════════════════════════════════════════════════════════════════

#[test]
fn test_rejected_payout_keeps_locks() {
    let e = Env::default();
    let ctx = setup_uninitialized(&e, DEFAULT_MINT, DEFAULT_MINT);
    let token = e.register(PayoutRefusingToken, ());
    ctx.client.initialize(
        &ctx.acl.address,
        &token,
        &INITIAL_LOCK_DURATION,
        &INITIAL_LOCK_AMOUNT,
        &INITIAL_SPAM_PENALTY_FACTOR,
    );
    ctx.grant(&ctx.owner, &ctx.client.lock_tokens_role());
    set_time(&e, 1_000);
    ctx.forward();
    ctx.forward();

    set_time(&e, 2_000);
    assert_eq!(
        ctx.client.try_withdraw_all_tokens(&ctx.owner),
        Err(Ok(ContractError::TransferFailed))
    );
    assert_eq!(
        ctx.client.try_withdraw_tokens(&ctx.owner, &1),
        Err(Ok(ContractError::TransferFailed))
    );

    assert_eq!(ctx.client.get_withdraw_locks_count(&ctx.owner), 2);
    assert_eq!(ctx.client.get_unlocked_count(&ctx.owner), 2);
    assert_eq!(ctx.client.get_locked_total(&ctx.owner), 25 * UNIT);

    let withdrawn = Symbol::new(&e, "locks_withdrawn");
    let emitted = e.events().all().into_iter().any(|ev| {
        ev.0 == ctx.contract_id && Symbol::from_val(&e, &ev.1.get(0).unwrap()) == withdrawn
    });
    assert!(!emitted);
}
