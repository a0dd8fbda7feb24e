#![allow(deprecated)] // events().publish migration tracked separately

use soroban_sdk::{symbol_short, Address, Env};

// ── Event payloads ──────────────────────────────────────────────────────────

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PoolInitializedEvent {
    pub owner: Address,
    pub token: Address,
    pub depositor: Address,
    pub timestamp: u64,
}

/// Fired when the authorized depositor credits forfeited reward.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DepositedEvent {
    pub depositor: Address,
    pub amount: i128,
    pub new_balance: i128,
    pub timestamp: u64,
}

/// Fired when the owner withdraws from the pool.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PoolWithdrawnEvent {
    pub owner: Address,
    pub to: Address,
    pub amount: i128,
    pub new_balance: i128,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DepositorSetEvent {
    pub owner: Address,
    pub previous: Address,
    pub depositor: Address,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OwnerTransferEvent {
    pub from: Address,
    pub to: Address,
    pub timestamp: u64,
}

// ── Publishers ──────────────────────────────────────────────────────────────

pub fn publish_initialized(env: &Env, owner: Address, token: Address, depositor: Address) {
    env.events().publish(
        (symbol_short!("INIT"),),
        PoolInitializedEvent {
            owner,
            token,
            depositor,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_deposited(env: &Env, depositor: Address, amount: i128, new_balance: i128) {
    env.events().publish(
        (symbol_short!("DEPOSIT"), depositor.clone()),
        DepositedEvent {
            depositor,
            amount,
            new_balance,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_withdrawn(env: &Env, owner: Address, to: Address, amount: i128, new_balance: i128) {
    env.events().publish(
        (symbol_short!("WITHDRAWN"), owner.clone()),
        PoolWithdrawnEvent {
            owner,
            to,
            amount,
            new_balance,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_depositor_set(env: &Env, owner: Address, previous: Address, depositor: Address) {
    env.events().publish(
        (symbol_short!("DEP_SET"), owner.clone()),
        DepositorSetEvent {
            owner,
            previous,
            depositor,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_owner_proposed(env: &Env, current: Address, proposed: Address) {
    env.events().publish(
        (symbol_short!("OWN_PROP"), current.clone()),
        OwnerTransferEvent {
            from: current,
            to: proposed,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_owner_accepted(env: &Env, previous: Address, new_owner: Address) {
    env.events().publish(
        (symbol_short!("OWN_ACPT"), new_owner.clone()),
        OwnerTransferEvent {
            from: previous,
            to: new_owner,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_owner_cancelled(env: &Env, owner: Address, cancelled: Address) {
    env.events().publish(
        (symbol_short!("OWN_CNCL"), owner.clone()),
        OwnerTransferEvent {
            from: owner,
            to: cancelled,
            timestamp: env.ledger().timestamp(),
        },
    );
}
