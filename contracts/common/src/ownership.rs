//! Single-owner access control with a two-step transfer.
//!
//! The current owner nominates a successor with [`propose_owner`]; the
//! transfer only completes when the nominee calls [`accept_ownership`].
//! Nominating again overwrites the pending nominee.

use soroban_sdk::{symbol_short, Address, Env, Symbol};

use crate::CommonError;

// ── Storage Keys ─────────────────────────────────────────────────────────────

const OWNER: Symbol = symbol_short!("OWNER");
const PENDING_OWNER: Symbol = symbol_short!("PEND_OWN");

// ── Core Functions ───────────────────────────────────────────────────────────

/// Records the first owner. Fails if an owner already exists.
pub fn init_owner(env: &Env, owner: &Address) -> Result<(), CommonError> {
    if env.storage().instance().has(&OWNER) {
        return Err(CommonError::AlreadyInitialized);
    }
    env.storage().instance().set(&OWNER, owner);
    Ok(())
}

/// Returns the current owner, if one has been recorded.
pub fn get_owner(env: &Env) -> Option<Address> {
    env.storage().instance().get(&OWNER)
}

/// Guard: fails unless `caller` is the current owner.
///
/// The caller must already have been authenticated via `require_auth()`.
pub fn require_owner(env: &Env, caller: &Address) -> Result<(), CommonError> {
    let owner = get_owner(env).ok_or(CommonError::NotInitialized)?;
    if *caller != owner {
        return Err(CommonError::NotOwner);
    }
    Ok(())
}

/// Nominates `new_owner`, replacing any earlier nomination.
pub fn propose_owner(env: &Env, caller: &Address, new_owner: &Address) -> Result<(), CommonError> {
    require_owner(env, caller)?;
    env.storage().instance().set(&PENDING_OWNER, new_owner);
    Ok(())
}

/// Returns the nominated owner, if a transfer is in progress.
pub fn get_pending_owner(env: &Env) -> Option<Address> {
    env.storage().instance().get(&PENDING_OWNER)
}

/// Completes a transfer. Returns the previous owner.
pub fn accept_ownership(env: &Env, candidate: &Address) -> Result<Address, CommonError> {
    let pending = get_pending_owner(env).ok_or(CommonError::NoPendingOwner)?;
    if *candidate != pending {
        return Err(CommonError::NotPendingOwner);
    }
    let previous = get_owner(env).ok_or(CommonError::NotInitialized)?;

    env.storage().instance().set(&OWNER, candidate);
    env.storage().instance().remove(&PENDING_OWNER);

    Ok(previous)
}

/// Drops the pending nomination. Returns the address that was nominated.
pub fn cancel_ownership_transfer(env: &Env, caller: &Address) -> Result<Address, CommonError> {
    require_owner(env, caller)?;
    let pending = get_pending_owner(env).ok_or(CommonError::NoPendingOwner)?;
    env.storage().instance().remove(&PENDING_OWNER);
    Ok(pending)
}
