//! Spam penalty pricing.
//!
//! Each active lock an account already holds raises the price of its next
//! lock by `spam_penalty_factor` basis points of the base amount and the base
//! duration:
//!
//! ```text
//! extra_amount   = active * lock_amount   * factor / PENALTY_SCALE
//! extra_duration = active * lock_duration * factor / PENALTY_SCALE
//! ```
//!
//! Division floors. Nothing here reads storage or the clock.

use crate::math;
use crate::types::LockSettings;
use lock_errors::ContractError;

/// Fixed-point denominator of `spam_penalty_factor` (10_000 bps = 100 %).
pub const PENALTY_SCALE: u32 = 10_000;

/// Increment on top of the base values for an account holding `active_locks`.
///
/// Returns `(extra_amount, extra_duration)`.
pub fn spam_penalty(
    active_locks: u32,
    settings: &LockSettings,
) -> Result<(i128, u64), ContractError> {
    let factor = settings.spam_penalty_factor;

    let scaled = math::mul_i128(
        math::mul_i128(active_locks as i128, settings.lock_amount)?,
        factor as i128,
    )?;
    let extra_amount = scaled / PENALTY_SCALE as i128;

    let extra_duration = math::mul_mul_div_u64(
        active_locks as u64,
        settings.lock_duration,
        factor,
        PENALTY_SCALE,
    )?;

    Ok((extra_amount, extra_duration))
}

/// Full price of the next lock: `(lock_amount, duration)`.
pub fn next_lock_terms(
    active_locks: u32,
    settings: &LockSettings,
) -> Result<(i128, u64), ContractError> {
    let (extra_amount, extra_duration) = spam_penalty(active_locks, settings)?;
    Ok((
        math::add_i128(settings.lock_amount, extra_amount)?,
        math::add_u64(settings.lock_duration, extra_duration)?,
    ))
}
