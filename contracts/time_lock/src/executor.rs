//! Delegated action execution.
//!
//! A forwarded action is a call to `execute(payload)` on a target contract.
//! The payload is opaque here; only the target interprets it.

use lock_errors::ContractError;
use soroban_sdk::{contractclient, Address, Bytes, Env};

/// Interface a forward target must implement.
#[allow(dead_code)]
#[contractclient(name = "ActionExecutorClient")]
pub trait ActionExecutor {
    fn execute(env: Env, payload: Bytes);
}

/// Run the action once. Any failure of the target maps to `ExecutionFailed`.
pub fn run(e: &Env, target: &Address, payload: &Bytes) -> Result<(), ContractError> {
    match ActionExecutorClient::new(e, target).try_execute(payload) {
        Ok(Ok(())) => Ok(()),
        _ => Err(ContractError::ExecutionFailed),
    }
}
