//! Owner, pause, emergency-mode and per-position authorization guards.
//!
//! Emergency mode only moves forward: [`enable_emergency`] is the single
//! transition and nothing reverses it.

use common::ownership;
use soroban_sdk::{contracttype, symbol_short, Address, Env, Symbol};

use crate::{positions, positions::Position, ContractError};

// ── Types ─────────────────────────────────────────────────────

#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum LedgerMode {
    Normal,
    /// Accrual and payouts halted; principal is returned through
    /// `emergency_withdraw`.
    Emergency,
}

// ── Storage Keys ─────────────────────────────────────────────

const MODE: Symbol = symbol_short!("MODE");
const PAUSED: Symbol = symbol_short!("PAUSED");

// ── Mode ─────────────────────────────────────────────────────

pub fn mode(env: &Env) -> LedgerMode {
    env.storage()
        .instance()
        .get(&MODE)
        .unwrap_or(LedgerMode::Normal)
}

pub fn is_emergency(env: &Env) -> bool {
    mode(env) == LedgerMode::Emergency
}

/// Switch to emergency mode. Fails if already there.
pub fn enable_emergency(env: &Env) -> Result<(), ContractError> {
    match mode(env) {
        LedgerMode::Normal => {
            env.storage().instance().set(&MODE, &LedgerMode::Emergency);
            Ok(())
        }
        LedgerMode::Emergency => Err(ContractError::InEmergencyMode),
    }
}

pub fn require_not_emergency(env: &Env) -> Result<(), ContractError> {
    if is_emergency(env) {
        return Err(ContractError::InEmergencyMode);
    }
    Ok(())
}

pub fn require_emergency(env: &Env) -> Result<(), ContractError> {
    if !is_emergency(env) {
        return Err(ContractError::NotInEmergencyMode);
    }
    Ok(())
}

// ── Pause ────────────────────────────────────────────────────

pub fn is_paused(env: &Env) -> bool {
    env.storage().instance().get(&PAUSED).unwrap_or(false)
}

pub fn set_paused(env: &Env, paused: bool) -> Result<(), ContractError> {
    if is_paused(env) == paused {
        return Err(if paused {
            ContractError::Paused
        } else {
            ContractError::NotPaused
        });
    }
    env.storage().instance().set(&PAUSED, &paused);
    Ok(())
}

pub fn require_not_paused(env: &Env) -> Result<(), ContractError> {
    if is_paused(env) {
        return Err(ContractError::Paused);
    }
    Ok(())
}

// ── Identity ─────────────────────────────────────────────────

/// Guard: `caller` must be the ledger owner.
pub fn require_owner(env: &Env, caller: &Address) -> Result<(), ContractError> {
    ownership::require_owner(env, caller)?;
    Ok(())
}

/// Load position `id` for a mutating call by `caller`.
///
/// Checks, in order: the position exists, `caller` owns it, and it is still
/// open.
pub fn authorize_position(env: &Env, caller: &Address, id: u64) -> Result<Position, ContractError> {
    let position = positions::get_position(env, id).ok_or(ContractError::PositionNotFound)?;
    if position.owner != *caller {
        return Err(ContractError::NotPositionOwner);
    }
    if position.is_unstaked {
        return Err(ContractError::AlreadyUnstaked);
    }
    Ok(position)
}
