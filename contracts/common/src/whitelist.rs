//! Enforceable address whitelist.
//!
//! Membership lives in persistent storage under `(WL, address)`; the
//! enforcement toggle lives in instance storage. Batches are bounded by
//! [`MAX_BATCH_SIZE`] so a single call has a predictable footprint.
//!
//! Membership entries are kept alive by [`add_batch`] and by [`touch`], which
//! callers invoke whenever a member acts. An entry left idle past its TTL is
//! archived and must be restored (or the address re-added) before it can be
//! read again.

use soroban_sdk::{symbol_short, Address, Env, Symbol, Vec};

use crate::{CommonError, TTL_EXTEND_TO, TTL_THRESHOLD};

// ── Storage Keys ─────────────────────────────────────────────────────────────

const WL_PREFIX: Symbol = symbol_short!("WL");
const WL_ENFORCED: Symbol = symbol_short!("WL_ON");

/// Largest number of addresses accepted by a single batch call.
pub const MAX_BATCH_SIZE: u32 = 100;

pub(crate) fn member_key(addr: &Address) -> (Symbol, Address) {
    (WL_PREFIX, addr.clone())
}

fn check_batch(addrs: &Vec<Address>) -> Result<(), CommonError> {
    if addrs.is_empty() {
        return Err(CommonError::EmptyBatch);
    }
    if addrs.len() > MAX_BATCH_SIZE {
        return Err(CommonError::BatchTooLarge);
    }
    Ok(())
}

// ── Enforcement ──────────────────────────────────────────────────────────────

pub fn is_enforced(env: &Env) -> bool {
    env.storage().instance().get(&WL_ENFORCED).unwrap_or(false)
}

pub fn set_enforced(env: &Env, enforced: bool) {
    env.storage().instance().set(&WL_ENFORCED, &enforced);
}

// ── Membership ───────────────────────────────────────────────────────────────

pub fn is_whitelisted(env: &Env, addr: &Address) -> bool {
    env.storage()
        .persistent()
        .get(&member_key(addr))
        .unwrap_or(false)
}

/// `true` when enforcement is off or `addr` is a member.
pub fn is_allowed(env: &Env, addr: &Address) -> bool {
    !is_enforced(env) || is_whitelisted(env, addr)
}

/// Renews the TTL of `addr`'s membership entry. No-op for non-members.
pub fn touch(env: &Env, addr: &Address) {
    let key = member_key(addr);
    if env.storage().persistent().has(&key) {
        env.storage()
            .persistent()
            .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
    }
}

/// Adds every address in `addrs`. Returns how many were newly added.
pub fn add_batch(env: &Env, addrs: &Vec<Address>) -> Result<u32, CommonError> {
    check_batch(addrs)?;

    let mut added = 0u32;
    for addr in addrs.iter() {
        let key = member_key(&addr);
        if !is_whitelisted(env, &addr) {
            added = added.saturating_add(1);
        }
        env.storage().persistent().set(&key, &true);
        env.storage()
            .persistent()
            .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
    }
    Ok(added)
}

/// Removes every address in `addrs`. Returns how many were members.
pub fn remove_batch(env: &Env, addrs: &Vec<Address>) -> Result<u32, CommonError> {
    check_batch(addrs)?;

    let mut removed = 0u32;
    for addr in addrs.iter() {
        if is_whitelisted(env, &addr) {
            removed = removed.saturating_add(1);
            env.storage().persistent().remove(&member_key(&addr));
        }
    }
    Ok(removed)
}
