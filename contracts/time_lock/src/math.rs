//! Overflow-checked arithmetic for fee and duration calculations.
//!
//! Every helper returns `ContractError::Overflow` instead of wrapping or
//! panicking, so callers can propagate with `?`.

use lock_errors::ContractError;

/// Checked `i128` addition.
#[inline]
pub fn add_i128(a: i128, b: i128) -> Result<i128, ContractError> {
    a.checked_add(b).ok_or(ContractError::Overflow)
}

/// Checked `i128` multiplication.
#[inline]
pub fn mul_i128(a: i128, b: i128) -> Result<i128, ContractError> {
    a.checked_mul(b).ok_or(ContractError::Overflow)
}

/// Checked `u64` addition.
#[inline]
pub fn add_u64(a: u64, b: u64) -> Result<u64, ContractError> {
    a.checked_add(b).ok_or(ContractError::Overflow)
}

/// `a * b * c / denominator` with floor division, evaluated in that order.
///
/// The product is carried in `u128`; the quotient must fit back into `u64`.
#[inline]
pub fn mul_mul_div_u64(a: u64, b: u64, c: u32, denominator: u32) -> Result<u64, ContractError> {
    let product = (a as u128)
        .checked_mul(b as u128)
        .and_then(|p| p.checked_mul(c as u128))
        .ok_or(ContractError::Overflow)?;
    let quotient = product / denominator as u128;
    u64::try_from(quotient).map_err(|_| ContractError::Overflow)
}
