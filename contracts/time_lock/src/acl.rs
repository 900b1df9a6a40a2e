//! Role checks against the external permission registry.

use crate::types::DataKey;
use lock_errors::ContractError;
use soroban_sdk::{contractclient, Address, Env, Symbol};

pub const CHANGE_DURATION_ROLE: &str = "CHANGE_DURATION_ROLE";
pub const CHANGE_AMOUNT_ROLE: &str = "CHANGE_AMOUNT_ROLE";
pub const CHANGE_SPAM_PENALTY_ROLE: &str = "CHANGE_SPAM_PENALTY_ROLE";
pub const LOCK_TOKENS_ROLE: &str = "LOCK_TOKENS_ROLE";

/// The single call this contract makes on the permission registry.
#[allow(dead_code)]
#[contractclient(name = "AclClient")]
pub trait AclInterface {
    fn has_permission(env: Env, entity: Address, app: Address, role: Symbol) -> bool;
}

pub fn role(e: &Env, name: &str) -> Symbol {
    Symbol::new(e, name)
}

pub fn get_acl(e: &Env) -> Result<Address, ContractError> {
    e.storage()
        .instance()
        .get(&DataKey::Acl)
        .ok_or(ContractError::NotInitialized)
}

/// `true` if `who` holds `role_name` on this contract.
pub fn has_role(e: &Env, who: &Address, role_name: &str) -> Result<bool, ContractError> {
    let acl = get_acl(e)?;
    Ok(AclClient::new(e, &acl).has_permission(
        who,
        &e.current_contract_address(),
        &role(e, role_name),
    ))
}

pub fn require_role(e: &Env, who: &Address, role_name: &str) -> Result<(), ContractError> {
    if has_role(e, who, role_name)? {
        Ok(())
    } else {
        Err(ContractError::Unauthorized)
    }
}
