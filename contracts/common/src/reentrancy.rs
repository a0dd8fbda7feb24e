//! Explicit busy flag for operations that move value out of the contract.
//!
//! [`enter`] must be paired with [`exit`] on the success path. An `Err`
//! returned from the entry point rolls the flag back along with every other
//! storage write, so error paths need no cleanup.

use soroban_sdk::{symbol_short, Env, Symbol};

use crate::CommonError;

const BUSY: Symbol = symbol_short!("BUSY");

/// Marks the instance busy. Fails if it already is.
pub fn enter(env: &Env) -> Result<(), CommonError> {
    if is_busy(env) {
        return Err(CommonError::Reentrant);
    }
    env.storage().instance().set(&BUSY, &true);
    Ok(())
}

/// Clears the busy flag.
pub fn exit(env: &Env) {
    env.storage().instance().remove(&BUSY);
}

pub fn is_busy(env: &Env) -> bool {
    env.storage().instance().get(&BUSY).unwrap_or(false)
}
