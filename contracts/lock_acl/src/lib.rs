//! # Lock ACL Contract
//!
//! Permission registry consulted by forwarder apps before every role-gated
//! operation. A permission is the triple `(entity, app, role)`: `entity` may
//! perform `role` on the contract at `app`.
//!
//! ## Management
//! - The root address (set once at `initialize`) may manage every pair.
//! - The root may appoint a manager for a single `(app, role)` pair; that
//!   manager may grant and revoke that pair only.
//!
//! ## Storage Layout
//!
//! | Key                               | Tier           |
//! |-----------------------------------|----------------|
//! | `DataKey::Root`                   | `instance()`   |
//! | `DataKey::Manager(app, role)`     | `persistent()` |
//! | `DataKey::Permission(entity, app, role)` | `persistent()` |

#![no_std]

use lock_errors::ContractError;
use soroban_sdk::{contract, contractimpl, contracttype, Address, Env, Symbol};

/// Minimum ledger sequence TTL before a bump is requested (~1 day at 5 s/ledger).
const BUMP_THRESHOLD: u32 = 17_280;
/// Target TTL after a bump (~30 days).
const BUMP_TARGET: u32 = 518_400;

/// Storage keys for the ACL contract
#[contracttype]
#[derive(Clone)]
enum DataKey {
    /// Address allowed to manage every permission.
    Root,
    /// Delegated manager of one (app, role) pair.
    Manager(Address, Symbol),
    /// Granted flag for (entity, app, role).
    Permission(Address, Address, Symbol),
}

#[contract]
pub struct LockAcl;

#[contractimpl]
impl LockAcl {
    /// Initialize the registry with its root manager.
    ///
    /// # Errors
    /// * `AlreadyInitialized` - if a root is already stored
    ///
    /// # Events
    /// Emits `acl_initialized` with the root address
    pub fn initialize(e: Env, root: Address) -> Result<(), ContractError> {
        if e.storage().instance().has(&DataKey::Root) {
            return Err(ContractError::AlreadyInitialized);
        }
        root.require_auth();

        e.storage().instance().set(&DataKey::Root, &root);
        e.events()
            .publish((Symbol::new(&e, "acl_initialized"),), root);
        Ok(())
    }

    /// Allow `entity` to perform `role` on `app`.
    ///
    /// # Arguments
    /// * `manager` - Root or the manager of `(app, role)`; must authenticate
    /// * `entity` - Address receiving the permission
    /// * `app` - Contract the role applies to
    /// * `role` - Role identifier, e.g. `LOCK_TOKENS_ROLE`
    ///
    /// # Errors
    /// * `NotInitialized` - if no root is stored
    /// * `NotPermissionManager` - if `manager` cannot manage the pair
    ///
    /// # Events
    /// Emits `permission_granted`
    pub fn grant_permission(
        e: Env,
        manager: Address,
        entity: Address,
        app: Address,
        role: Symbol,
    ) -> Result<(), ContractError> {
        manager.require_auth();
        Self::require_manager(&e, &manager, &app, &role)?;

        let key = DataKey::Permission(entity.clone(), app.clone(), role.clone());
        e.storage().persistent().set(&key, &true);
        e.storage()
            .persistent()
            .extend_ttl(&key, BUMP_THRESHOLD, BUMP_TARGET);

        e.events()
            .publish((Symbol::new(&e, "permission_granted"), entity), (app, role));
        Ok(())
    }

    /// Remove `entity`'s permission to perform `role` on `app`.
    /// Revoking a permission that was never granted is a no-op.
    ///
    /// # Errors
    /// * `NotInitialized` - if no root is stored
    /// * `NotPermissionManager` - if `manager` cannot manage the pair
    ///
    /// # Events
    /// Emits `permission_revoked`
    pub fn revoke_permission(
        e: Env,
        manager: Address,
        entity: Address,
        app: Address,
        role: Symbol,
    ) -> Result<(), ContractError> {
        manager.require_auth();
        Self::require_manager(&e, &manager, &app, &role)?;

        e.storage()
            .persistent()
            .remove(&DataKey::Permission(entity.clone(), app.clone(), role.clone()));

        e.events()
            .publish((Symbol::new(&e, "permission_revoked"), entity), (app, role));
        Ok(())
    }

    /// Appoint `new_manager` for `(app, role)`. Only the root may call this.
    ///
    /// # Errors
    /// * `NotInitialized` - if no root is stored
    /// * `NotPermissionManager` - if `root` is not the stored root
    ///
    /// # Events
    /// Emits `permission_manager_set`
    pub fn set_permission_manager(
        e: Env,
        root: Address,
        new_manager: Address,
        app: Address,
        role: Symbol,
    ) -> Result<(), ContractError> {
        root.require_auth();
        if root != Self::get_root(e.clone())? {
            return Err(ContractError::NotPermissionManager);
        }

        let key = DataKey::Manager(app.clone(), role.clone());
        e.storage().persistent().set(&key, &new_manager);
        e.storage()
            .persistent()
            .extend_ttl(&key, BUMP_THRESHOLD, BUMP_TARGET);

        e.events().publish(
            (Symbol::new(&e, "permission_manager_set"), new_manager),
            (app, role),
        );
        Ok(())
    }

    /// Check whether `entity` may perform `role` on `app`.
    ///
    /// # Returns
    /// `false` for anything not explicitly granted, including before initialization.
    pub fn has_permission(e: Env, entity: Address, app: Address, role: Symbol) -> bool {
        let key = DataKey::Permission(entity, app, role);
        let storage = e.storage().persistent();
        match storage.get::<_, bool>(&key) {
            Some(granted) => {
                storage.extend_ttl(&key, BUMP_THRESHOLD, BUMP_TARGET);
                granted
            }
            None => false,
        }
    }

    /// Delegated manager of `(app, role)`, if one was appointed.
    pub fn get_permission_manager(e: Env, app: Address, role: Symbol) -> Option<Address> {
        e.storage().persistent().get(&DataKey::Manager(app, role))
    }

    pub fn get_root(e: Env) -> Result<Address, ContractError> {
        e.storage()
            .instance()
            .get(&DataKey::Root)
            .ok_or(ContractError::NotInitialized)
    }

    fn require_manager(
        e: &Env,
        manager: &Address,
        app: &Address,
        role: &Symbol,
    ) -> Result<(), ContractError> {
        let root = Self::get_root(e.clone())?;
        if *manager == root {
            return Ok(());
        }
        match Self::get_permission_manager(e.clone(), app.clone(), role.clone()) {
            Some(stored) if stored == *manager => Ok(()),
            _ => Err(ContractError::NotPermissionManager),
        }
    }
}
