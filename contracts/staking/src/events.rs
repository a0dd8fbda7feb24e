#![allow(deprecated)] // events().publish migration tracked separately

use soroban_sdk::{symbol_short, Address, Env, Symbol};

use crate::{LedgerCounters, StakingConfig};

// ── Event payloads ──────────────────────────────────────────────────────────

/// Fired once when the ledger is bootstrapped.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InitializedEvent {
    pub owner: Address,
    pub token: Address,
    pub penalty_pool: Address,
    pub config: StakingConfig,
    pub whitelist_only: bool,
    pub timestamp: u64,
}

/// Fired when a new position is opened.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StakedEvent {
    pub staker: Address,
    pub position_id: u64,
    pub amount: i128,
    pub reserved_reward: i128,
    pub counters: LedgerCounters,
    pub timestamp: u64,
}

/// Fired when accrued reward is paid without closing the position.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RewardClaimedEvent {
    pub staker: Address,
    pub position_id: u64,
    pub amount: i128,
    pub claimed_rewards: i128,
    pub counters: LedgerCounters,
    pub timestamp: u64,
}

/// Fired on an ordinary exit after maturity.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct UnstakedEvent {
    pub staker: Address,
    pub position_id: u64,
    pub principal: i128,
    pub reward: i128,
    pub released_reserve: i128,
    pub counters: LedgerCounters,
    pub timestamp: u64,
}

/// Fired when principal is returned under emergency mode.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EmergencyWithdrawnEvent {
    pub staker: Address,
    pub position_id: u64,
    pub principal: i128,
    pub released_reserve: i128,
    pub counters: LedgerCounters,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EarlyUnstakeRequestedEvent {
    pub staker: Address,
    pub position_id: u64,
    pub request_time: u64,
    pub unlock_at: u64,
    pub timestamp: u64,
}

/// Fired when an early exit settles.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EarlyUnstakeCompletedEvent {
    pub staker: Address,
    pub position_id: u64,
    pub total_accrued: i128,
    pub payable_reward: i128,
    pub penalty: i128,
    pub principal_deduction: i128,
    pub payout: i128,
    pub counters: LedgerCounters,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RewardPoolFundedEvent {
    pub funder: Address,
    pub amount: i128,
    pub counters: LedgerCounters,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ExcessWithdrawnEvent {
    pub owner: Address,
    pub amount: i128,
    pub counters: LedgerCounters,
    pub timestamp: u64,
}

/// Fired by every configuration setter; `setting` names the field changed.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ConfigUpdatedEvent {
    pub owner: Address,
    pub setting: Symbol,
    pub config: StakingConfig,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PenaltyPoolSetEvent {
    pub owner: Address,
    pub penalty_pool: Address,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PauseChangedEvent {
    pub owner: Address,
    pub paused: bool,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EmergencyModeEnabledEvent {
    pub owner: Address,
    pub counters: LedgerCounters,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct WhitelistUpdatedEvent {
    pub owner: Address,
    pub added: bool,
    pub requested: u32,
    pub changed: u32,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct WhitelistEnforcementEvent {
    pub owner: Address,
    pub enforced: bool,
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

pub fn publish_initialized(
    env: &Env,
    owner: Address,
    token: Address,
    penalty_pool: Address,
    config: StakingConfig,
    whitelist_only: bool,
) {
    env.events().publish(
        (symbol_short!("INIT"),),
        InitializedEvent {
            owner,
            token,
            penalty_pool,
            config,
            whitelist_only,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_staked(
    env: &Env,
    staker: Address,
    position_id: u64,
    amount: i128,
    reserved_reward: i128,
    counters: LedgerCounters,
) {
    env.events().publish(
        (symbol_short!("STAKED"), staker.clone()),
        StakedEvent {
            staker,
            position_id,
            amount,
            reserved_reward,
            counters,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_reward_claimed(
    env: &Env,
    staker: Address,
    position_id: u64,
    amount: i128,
    claimed_rewards: i128,
    counters: LedgerCounters,
) {
    env.events().publish(
        (symbol_short!("CLMD"), staker.clone()),
        RewardClaimedEvent {
            staker,
            position_id,
            amount,
            claimed_rewards,
            counters,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_unstaked(
    env: &Env,
    staker: Address,
    position_id: u64,
    principal: i128,
    reward: i128,
    released_reserve: i128,
    counters: LedgerCounters,
) {
    env.events().publish(
        (symbol_short!("UNSTAKED"), staker.clone()),
        UnstakedEvent {
            staker,
            position_id,
            principal,
            reward,
            released_reserve,
            counters,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_emergency_withdrawn(
    env: &Env,
    staker: Address,
    position_id: u64,
    principal: i128,
    released_reserve: i128,
    counters: LedgerCounters,
) {
    env.events().publish(
        (symbol_short!("EMRG_WD"), staker.clone()),
        EmergencyWithdrawnEvent {
            staker,
            position_id,
            principal,
            released_reserve,
            counters,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_early_unstake_requested(
    env: &Env,
    staker: Address,
    position_id: u64,
    request_time: u64,
    unlock_at: u64,
) {
    env.events().publish(
        (symbol_short!("EARLY_REQ"), staker.clone()),
        EarlyUnstakeRequestedEvent {
            staker,
            position_id,
            request_time,
            unlock_at,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_early_unstake_completed(env: &Env, event: EarlyUnstakeCompletedEvent) {
    env.events()
        .publish((symbol_short!("EARLY_OUT"), event.staker.clone()), event);
}

pub fn publish_reward_pool_funded(
    env: &Env,
    funder: Address,
    amount: i128,
    counters: LedgerCounters,
) {
    env.events().publish(
        (symbol_short!("POOL_FUND"), funder.clone()),
        RewardPoolFundedEvent {
            funder,
            amount,
            counters,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_excess_withdrawn(env: &Env, owner: Address, amount: i128, counters: LedgerCounters) {
    env.events().publish(
        (symbol_short!("POOL_WD"), owner.clone()),
        ExcessWithdrawnEvent {
            owner,
            amount,
            counters,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_config_updated(env: &Env, owner: Address, setting: Symbol, config: StakingConfig) {
    env.events().publish(
        (symbol_short!("CFG_SET"), setting.clone()),
        ConfigUpdatedEvent {
            owner,
            setting,
            config,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_penalty_pool_set(env: &Env, owner: Address, penalty_pool: Address) {
    env.events().publish(
        (symbol_short!("PEN_SET"), owner.clone()),
        PenaltyPoolSetEvent {
            owner,
            penalty_pool,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_pause_changed(env: &Env, owner: Address, paused: bool) {
    let topic = if paused {
        symbol_short!("PAUSED")
    } else {
        symbol_short!("UNPAUSED")
    };
    env.events().publish(
        (topic, owner.clone()),
        PauseChangedEvent {
            owner,
            paused,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_emergency_enabled(env: &Env, owner: Address, counters: LedgerCounters) {
    env.events().publish(
        (symbol_short!("EMERGENCY"), owner.clone()),
        EmergencyModeEnabledEvent {
            owner,
            counters,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_whitelist_updated(
    env: &Env,
    owner: Address,
    added: bool,
    requested: u32,
    changed: u32,
) {
    env.events().publish(
        (symbol_short!("WL_UPD"), owner.clone()),
        WhitelistUpdatedEvent {
            owner,
            added,
            requested,
            changed,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_whitelist_enforcement(env: &Env, owner: Address, enforced: bool) {
    env.events().publish(
        (symbol_short!("WL_MODE"), owner.clone()),
        WhitelistEnforcementEvent {
            owner,
            enforced,
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
