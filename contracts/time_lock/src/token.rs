//! Escrow token movements.
//!
//! Both directions go through the generated `try_*` client calls so a
//! rejected transfer surfaces as `TransferFailed` instead of aborting the
//! invocation with the token's own error.

use lock_errors::ContractError;
use soroban_sdk::token::TokenClient;
use soroban_sdk::{Address, Env};

/// @notice Pulls `amount` from `owner` into escrow custody.
/// @dev Requires an allowance for this contract as spender.
pub fn transfer_into_contract(
    e: &Env,
    token: &Address,
    owner: &Address,
    amount: i128,
) -> Result<(), ContractError> {
    if amount == 0 {
        return Ok(());
    }
    let contract = e.current_contract_address();
    match TokenClient::new(e, token).try_transfer_from(&contract, owner, &contract, &amount) {
        Ok(Ok(())) => Ok(()),
        _ => Err(ContractError::TransferFailed),
    }
}

/// @notice Releases `amount` from escrow custody to `recipient`.
pub fn transfer_from_contract(
    e: &Env,
    token: &Address,
    recipient: &Address,
    amount: i128,
) -> Result<(), ContractError> {
    if amount == 0 {
        return Ok(());
    }
    let contract = e.current_contract_address();
    match TokenClient::new(e, token).try_transfer(&contract, recipient, &amount) {
        Ok(Ok(())) => Ok(()),
        _ => Err(ContractError::TransferFailed),
    }
}

/// @notice Escrow custody: this contract's balance of `token`.
pub fn custody_balance(e: &Env, token: &Address) -> i128 {
    TokenClient::new(e, token).balance(&e.current_contract_address())
}
