#![no_std]

pub mod access;
pub mod events;
pub mod positions;
pub mod rewards;

use common::{ownership, reentrancy, whitelist, CommonError};
use soroban_sdk::{
    contract, contractclient, contractimpl, contracttype, symbol_short, token, Address, Env,
    Symbol, Vec,
};

use access::LedgerMode;
use events::EarlyUnstakeCompletedEvent;
use positions::Position;

// ── Storage key constants ────────────────────────────────────────────────────

const TOKEN: Symbol = symbol_short!("TOKEN");
const PENALTY_POOL: Symbol = symbol_short!("PEN_POOL");
const CONFIG: Symbol = symbol_short!("CONFIG");
const TOTAL_STAKED: Symbol = symbol_short!("TOT_STK");
const REWARD_POOL: Symbol = symbol_short!("RWD_POOL");
const PENDING_REWARDS: Symbol = symbol_short!("PEND_RWD");

// ── Contract errors ──────────────────────────────────────────────────────────

/// Every failure rejects the whole call; nothing is partially applied.
///
/// | Range   | Group                     |
/// |---------|---------------------------|
/// | 1 – 9   | Lifecycle                 |
/// | 10 – 19 | Access                    |
/// | 20 – 29 | Mode                      |
/// | 30 – 39 | Timing                    |
/// | 40 – 59 | Validation                |
/// | 60 – 79 | State                     |
#[soroban_sdk::contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ContractError {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    InvalidConfig = 3,

    NotOwner = 10,
    NotPositionOwner = 11,
    NotWhitelisted = 12,
    NotPendingOwner = 13,
    NoPendingOwner = 14,

    Paused = 20,
    NotPaused = 21,
    InEmergencyMode = 22,
    NotInEmergencyMode = 23,

    BeforeStakeWindow = 30,
    AfterStakeWindow = 31,
    StillLocked = 32,
    LockAlreadyEnded = 33,
    WaitingPeriodNotCompleted = 34,
    EarlyUnstakeAlreadyRequested = 35,
    NoEarlyUnstakeRequest = 36,

    AmountBelowMinimum = 40,
    InsufficientRewardCapacity = 41,
    MaxTotalStakedExceeded = 42,
    ZeroAddress = 43,
    ZeroAmount = 44,
    BatchTooLarge = 45,
    EmptyBatch = 46,
    Overflow = 47,

    PositionNotFound = 60,
    AlreadyUnstaked = 61,
    NoRewardToClaim = 62,
    InsufficientExcess = 63,
    InsufficientBalance = 64,
    Reentrant = 65,
}

impl From<CommonError> for ContractError {
    fn from(err: CommonError) -> Self {
        match err {
            CommonError::NotInitialized => ContractError::NotInitialized,
            CommonError::AlreadyInitialized => ContractError::AlreadyInitialized,
            CommonError::NotOwner => ContractError::NotOwner,
            CommonError::NotPendingOwner => ContractError::NotPendingOwner,
            CommonError::NoPendingOwner => ContractError::NoPendingOwner,
            CommonError::BatchTooLarge => ContractError::BatchTooLarge,
            CommonError::EmptyBatch => ContractError::EmptyBatch,
            CommonError::Reentrant => ContractError::Reentrant,
        }
    }
}

// ── Public-facing types ──────────────────────────────────────────────────────

/// Product parameters. A standard and a premium product differ only here
/// and in whether the whitelist is enforced.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StakingConfig {
    pub min_stake_amount: i128,
    /// Yearly yield in basis points, applied to positions opened afterwards.
    pub reward_rate: u32,
    pub stake_start_time: u64,
    pub stake_end_time: u64,
    /// 0 = unlimited.
    pub max_total_staked: i128,
}

/// Snapshot of the ledger counters.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LedgerCounters {
    pub total_staked: i128,
    /// Reward funds committed to the ledger.
    pub reward_pool_balance: i128,
    /// Reward capacity reserved against open positions up to full maturity.
    pub total_pending_rewards: i128,
    pub next_position_id: u64,
}

/// A position together with its live figures, returned by
/// `get_position_details`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PositionDetails {
    pub position: Position,
    pub pending_reward: i128,
    pub matures_at: u64,
    /// 0 when no early unstake has been requested.
    pub early_unlock_at: u64,
}

/// The one call the ledger makes into the penalty pool.
#[contractclient(name = "PenaltyPoolClient")]
pub trait PenaltyPoolInterface {
    fn deposit(env: Env, depositor: Address, amount: i128);
}

// ── Contract ─────────────────────────────────────────────────────────────────

#[contract]
pub struct StakingContract;

#[contractimpl]
impl StakingContract {
    // ── Initialisation ──────────────────────────────────────────────────────

    /// Bootstrap the ledger.
    ///
    /// * `token`          – SAC address of the staked and rewarded asset.
    /// * `penalty_pool`   – penalty pool contract; must list this contract as
    ///                      its authorized depositor.
    /// * `config`         – product parameters.
    /// * `whitelist_only` – whether `stake` starts out restricted to the
    ///                      whitelist.
    pub fn initialize(
        env: Env,
        owner: Address,
        token: Address,
        penalty_pool: Address,
        config: StakingConfig,
        whitelist_only: bool,
    ) -> Result<(), ContractError> {
        if ownership::get_owner(&env).is_some() {
            return Err(ContractError::AlreadyInitialized);
        }
        Self::validate_config(&config)?;
        if penalty_pool == env.current_contract_address() {
            return Err(ContractError::ZeroAddress);
        }

        ownership::init_owner(&env, &owner)?;
        env.storage().instance().set(&TOKEN, &token);
        env.storage().instance().set(&PENALTY_POOL, &penalty_pool);
        env.storage().instance().set(&CONFIG, &config);
        whitelist::set_enforced(&env, whitelist_only);
        // Counters, mode and pause flag start at their zero values;
        // readers fall back to defaults for absent keys.

        events::publish_initialized(&env, owner, token, penalty_pool, config, whitelist_only);

        Ok(())
    }

    // ── Staking ─────────────────────────────────────────────────────────────

    /// Open a new position of `amount` and return its id.
    ///
    /// The full-maturity reward is reserved against the pool up front; the
    /// call fails unless the unreserved part of the pool covers it.
    pub fn stake(env: Env, staker: Address, amount: i128) -> Result<u64, ContractError> {
        Self::require_initialized(&env)?;
        staker.require_auth();
        access::require_not_paused(&env)?;
        access::require_not_emergency(&env)?;

        let config = Self::config(&env)?;
        let now = env.ledger().timestamp();
        if now < config.stake_start_time {
            return Err(ContractError::BeforeStakeWindow);
        }
        if now > config.stake_end_time {
            return Err(ContractError::AfterStakeWindow);
        }
        if amount <= 0 {
            return Err(ContractError::ZeroAmount);
        }
        if amount < config.min_stake_amount {
            return Err(ContractError::AmountBelowMinimum);
        }
        if !whitelist::is_allowed(&env, &staker) {
            return Err(ContractError::NotWhitelisted);
        }
        whitelist::touch(&env, &staker);

        let mut counters = Self::counters(&env);
        let new_total = counters
            .total_staked
            .checked_add(amount)
            .ok_or(ContractError::Overflow)?;
        if config.max_total_staked > 0 && new_total > config.max_total_staked {
            return Err(ContractError::MaxTotalStakedExceeded);
        }

        // Solvency guard.
        let reserved_reward = rewards::full_lock_reward(amount, config.reward_rate)
            .ok_or(ContractError::Overflow)?;
        if Self::capacity(&counters)? < reserved_reward {
            return Err(ContractError::InsufficientRewardCapacity);
        }
        let new_pending = counters
            .total_pending_rewards
            .checked_add(reserved_reward)
            .ok_or(ContractError::Overflow)?;

        // Take custody of the principal.
        token::Client::new(&env, &Self::token(&env)?).transfer(
            &staker,
            &env.current_contract_address(),
            &amount,
        );

        let id = positions::next_position_id(&env);
        let position = Position {
            id,
            owner: staker.clone(),
            amount,
            reward_rate: config.reward_rate,
            reserved_reward,
            staked_at: now,
            last_reward_at: now,
            is_unstaked: false,
            is_completed_stake: false,
            claimed_rewards: 0,
            early_unstake_request_time: 0,
        };
        positions::store_position(&env, &position);
        positions::index_owner(&env, &staker, id);

        counters.total_staked = new_total;
        counters.total_pending_rewards = new_pending;
        counters.next_position_id = positions::peek_next_position_id(&env);
        Self::write_counters(&env, &counters);

        events::publish_staked(&env, staker, id, amount, reserved_reward, counters);

        Ok(id)
    }

    /// Pay the reward accrued on position `id` since its last settlement.
    ///
    /// Fails with `NoRewardToClaim` when nothing has accrued.
    pub fn claim_reward(env: Env, staker: Address, id: u64) -> Result<i128, ContractError> {
        Self::require_initialized(&env)?;
        staker.require_auth();
        access::require_not_paused(&env)?;
        access::require_not_emergency(&env)?;

        let mut position = access::authorize_position(&env, &staker, id)?;
        let now = env.ledger().timestamp();

        let reward = rewards::pending_reward(&position, now, false).ok_or(ContractError::Overflow)?;
        if reward <= 0 {
            return Err(ContractError::NoRewardToClaim);
        }

        reentrancy::enter(&env)?;

        let mut counters = Self::counters(&env);
        Self::settle_reward(&mut position, &mut counters, reward, now)?;
        positions::store_position(&env, &position);
        Self::write_counters(&env, &counters);

        token::Client::new(&env, &Self::token(&env)?).transfer(
            &env.current_contract_address(),
            &staker,
            &reward,
        );

        reentrancy::exit(&env);

        events::publish_reward_claimed(&env, staker, id, reward, position.claimed_rewards, counters);

        Ok(reward)
    }

    /// Close a matured position: settle outstanding reward and return the
    /// principal. Returns the total transferred.
    pub fn unstake(env: Env, staker: Address, id: u64) -> Result<i128, ContractError> {
        Self::require_initialized(&env)?;
        staker.require_auth();
        access::require_not_paused(&env)?;
        access::require_not_emergency(&env)?;

        let mut position = access::authorize_position(&env, &staker, id)?;
        let now = env.ledger().timestamp();
        if now < rewards::maturity_time(&position) {
            return Err(ContractError::StillLocked);
        }

        reentrancy::enter(&env)?;

        let mut counters = Self::counters(&env);
        let reward = rewards::pending_reward(&position, now, false).ok_or(ContractError::Overflow)?;
        if reward > 0 {
            Self::settle_reward(&mut position, &mut counters, reward, now)?;
        }

        position.is_unstaked = true;
        position.is_completed_stake = true;
        let released = Self::close_position(&position, &mut counters)?;
        positions::store_position(&env, &position);
        Self::write_counters(&env, &counters);

        let total_out = position
            .amount
            .checked_add(reward)
            .ok_or(ContractError::Overflow)?;
        token::Client::new(&env, &Self::token(&env)?).transfer(
            &env.current_contract_address(),
            &staker,
            &total_out,
        );

        reentrancy::exit(&env);

        events::publish_unstaked(&env, staker, id, position.amount, reward, released, counters);

        Ok(total_out)
    }

    /// Return the principal of position `id` with no reward. Only available
    /// in emergency mode, regardless of pause state.
    pub fn emergency_withdraw(env: Env, staker: Address, id: u64) -> Result<i128, ContractError> {
        Self::require_initialized(&env)?;
        staker.require_auth();
        access::require_emergency(&env)?;

        let mut position = access::authorize_position(&env, &staker, id)?;

        reentrancy::enter(&env)?;

        let mut counters = Self::counters(&env);
        position.is_unstaked = true;
        let released = Self::close_position(&position, &mut counters)?;
        positions::store_position(&env, &position);
        Self::write_counters(&env, &counters);

        token::Client::new(&env, &Self::token(&env)?).transfer(
            &env.current_contract_address(),
            &staker,
            &position.amount,
        );

        reentrancy::exit(&env);

        events::publish_emergency_withdrawn(&env, staker, id, position.amount, released, counters);

        Ok(position.amount)
    }

    // ── Early unstake ───────────────────────────────────────────────────────

    /// Start an early exit. Accrual for the position stops at this instant.
    ///
    /// Returns the earliest time `complete_early_unstake` will succeed.
    pub fn request_early_unstake(env: Env, staker: Address, id: u64) -> Result<u64, ContractError> {
        Self::require_initialized(&env)?;
        staker.require_auth();

        let mut position = access::authorize_position(&env, &staker, id)?;
        if position.early_unstake_request_time != 0 {
            return Err(ContractError::EarlyUnstakeAlreadyRequested);
        }
        let now = env.ledger().timestamp();
        if now >= rewards::maturity_time(&position) {
            return Err(ContractError::LockAlreadyEnded);
        }

        position.early_unstake_request_time = now;
        positions::store_position(&env, &position);

        let unlock_at = now.saturating_add(rewards::EARLY_UNLOCK_PERIOD);
        events::publish_early_unstake_requested(&env, staker, id, now, unlock_at);

        Ok(unlock_at)
    }

    /// Settle an early exit once the waiting period has passed.
    ///
    /// The staker keeps `PENALTY_RATE_BPS` of the reward accrued up to the
    /// request; the rest goes to the penalty pool. Returns the payout.
    pub fn complete_early_unstake(env: Env, staker: Address, id: u64) -> Result<i128, ContractError> {
        Self::require_initialized(&env)?;
        staker.require_auth();
        access::require_not_emergency(&env)?;

        let mut position = access::authorize_position(&env, &staker, id)?;
        if position.early_unstake_request_time == 0 {
            return Err(ContractError::NoEarlyUnstakeRequest);
        }
        let now = env.ledger().timestamp();
        let unlock_at = position
            .early_unstake_request_time
            .saturating_add(rewards::EARLY_UNLOCK_PERIOD);
        if now < unlock_at {
            return Err(ContractError::WaitingPeriodNotCompleted);
        }

        let settlement = rewards::settle_early_exit(&position).ok_or(ContractError::Overflow)?;

        reentrancy::enter(&env)?;

        let mut counters = Self::counters(&env);
        counters.reward_pool_balance = counters
            .reward_pool_balance
            .checked_sub(settlement.reward_pool_outflow)
            .ok_or(ContractError::Overflow)?;
        // Release the whole unpaid reservation before booking the final
        // payment against the position.
        Self::close_position(&position, &mut counters)?;
        position.claimed_rewards = position
            .claimed_rewards
            .checked_add(settlement.payable_reward)
            .ok_or(ContractError::Overflow)?;
        position.last_reward_at = rewards::accrual_cutoff(&position);
        position.is_unstaked = true;
        positions::store_position(&env, &position);
        Self::write_counters(&env, &counters);

        let token = token::Client::new(&env, &Self::token(&env)?);
        let this = env.current_contract_address();
        if settlement.payout > 0 {
            token.transfer(&this, &staker, &settlement.payout);
        }
        if settlement.penalty > 0 {
            let pool = Self::penalty_pool(&env)?;
            token.transfer(&this, &pool, &settlement.penalty);
            PenaltyPoolClient::new(&env, &pool).deposit(&this, &settlement.penalty);
        }

        reentrancy::exit(&env);

        events::publish_early_unstake_completed(
            &env,
            EarlyUnstakeCompletedEvent {
                staker,
                position_id: id,
                total_accrued: settlement.total_accrued,
                payable_reward: settlement.payable_reward,
                penalty: settlement.penalty,
                principal_deduction: settlement.principal_deduction,
                payout: settlement.payout,
                counters,
                timestamp: now,
            },
        );

        Ok(settlement.payout)
    }

    // ── Reward pool ─────────────────────────────────────────────────────────

    /// Add `amount` of the asset to the reward pool. Owner only.
    pub fn update_reward_pool(env: Env, caller: Address, amount: i128) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        access::require_owner(&env, &caller)?;
        if amount <= 0 {
            return Err(ContractError::ZeroAmount);
        }

        let mut counters = Self::counters(&env);
        counters.reward_pool_balance = counters
            .reward_pool_balance
            .checked_add(amount)
            .ok_or(ContractError::Overflow)?;

        token::Client::new(&env, &Self::token(&env)?).transfer(
            &caller,
            &env.current_contract_address(),
            &amount,
        );
        Self::write_counters(&env, &counters);

        events::publish_reward_pool_funded(&env, caller, amount, counters);

        Ok(())
    }

    /// Withdraw reward funds not reserved by any open position. Owner only.
    pub fn withdraw_excess_reward_pool(
        env: Env,
        caller: Address,
        amount: i128,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        access::require_owner(&env, &caller)?;
        if amount <= 0 {
            return Err(ContractError::ZeroAmount);
        }

        let mut counters = Self::counters(&env);
        if amount > Self::capacity(&counters)? {
            return Err(ContractError::InsufficientExcess);
        }

        reentrancy::enter(&env)?;

        counters.reward_pool_balance -= amount;
        Self::write_counters(&env, &counters);

        token::Client::new(&env, &Self::token(&env)?).transfer(
            &env.current_contract_address(),
            &caller,
            &amount,
        );

        reentrancy::exit(&env);

        events::publish_excess_withdrawn(&env, caller, amount, counters);

        Ok(())
    }

    // ── Configuration ───────────────────────────────────────────────────────

    pub fn set_min_stake_amount(env: Env, caller: Address, amount: i128) -> Result<(), ContractError> {
        Self::update_config(&env, &caller, symbol_short!("MIN_STK"), |cfg| {
            cfg.min_stake_amount = amount;
        })
    }

    /// Change the yearly rate for positions opened from now on.
    pub fn set_reward_rate(env: Env, caller: Address, rate_bps: u32) -> Result<(), ContractError> {
        Self::update_config(&env, &caller, symbol_short!("RWD_RATE"), |cfg| {
            cfg.reward_rate = rate_bps;
        })
    }

    pub fn set_stake_window(
        env: Env,
        caller: Address,
        start: u64,
        end: u64,
    ) -> Result<(), ContractError> {
        Self::update_config(&env, &caller, symbol_short!("WINDOW"), |cfg| {
            cfg.stake_start_time = start;
            cfg.stake_end_time = end;
        })
    }

    /// Cap on `total_staked`; 0 removes the cap.
    pub fn set_max_total_staked(env: Env, caller: Address, cap: i128) -> Result<(), ContractError> {
        Self::update_config(&env, &caller, symbol_short!("MAX_STK"), |cfg| {
            cfg.max_total_staked = cap;
        })
    }

    pub fn set_penalty_pool(env: Env, caller: Address, pool: Address) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        access::require_owner(&env, &caller)?;
        if pool == env.current_contract_address() {
            return Err(ContractError::ZeroAddress);
        }

        env.storage().instance().set(&PENALTY_POOL, &pool);

        events::publish_penalty_pool_set(&env, caller, pool);

        Ok(())
    }

    // ── Pause & emergency ───────────────────────────────────────────────────

    /// Block `stake`, `claim_reward` and `unstake`.
    pub fn pause(env: Env, caller: Address) -> Result<(), ContractError> {
        Self::set_pause_state(&env, &caller, true)
    }

    pub fn unpause(env: Env, caller: Address) -> Result<(), ContractError> {
        Self::set_pause_state(&env, &caller, false)
    }

    /// Irreversibly halt accrual and payouts. Principal stays withdrawable
    /// through `emergency_withdraw`.
    pub fn enable_emergency_mode(env: Env, caller: Address) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        access::require_owner(&env, &caller)?;
        access::enable_emergency(&env)?;

        events::publish_emergency_enabled(&env, caller, Self::counters(&env));

        Ok(())
    }

    // ── Whitelist ───────────────────────────────────────────────────────────

    pub fn set_whitelist_only(env: Env, caller: Address, enforced: bool) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        access::require_owner(&env, &caller)?;

        whitelist::set_enforced(&env, enforced);

        events::publish_whitelist_enforcement(&env, caller, enforced);

        Ok(())
    }

    /// Add up to `MAX_BATCH_SIZE` addresses. Returns how many were new.
    pub fn add_to_whitelist(
        env: Env,
        caller: Address,
        addresses: Vec<Address>,
    ) -> Result<u32, ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        access::require_owner(&env, &caller)?;

        let added = whitelist::add_batch(&env, &addresses)?;

        events::publish_whitelist_updated(&env, caller, true, addresses.len(), added);

        Ok(added)
    }

    /// Remove up to `MAX_BATCH_SIZE` addresses. Returns how many were members.
    pub fn remove_from_whitelist(
        env: Env,
        caller: Address,
        addresses: Vec<Address>,
    ) -> Result<u32, ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        access::require_owner(&env, &caller)?;

        let removed = whitelist::remove_batch(&env, &addresses)?;

        events::publish_whitelist_updated(&env, caller, false, addresses.len(), removed);

        Ok(removed)
    }

    // ── Ownership (two-step) ────────────────────────────────────────────────

    /// Nominate a new owner. Replaces any pending nomination.
    pub fn propose_owner(env: Env, caller: Address, new_owner: Address) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        ownership::propose_owner(&env, &caller, &new_owner)?;

        events::publish_owner_proposed(&env, caller, new_owner);

        Ok(())
    }

    /// Complete the transfer. Only the nominee can call this.
    pub fn accept_ownership(env: Env, new_owner: Address) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        new_owner.require_auth();
        let previous = ownership::accept_ownership(&env, &new_owner)?;

        events::publish_owner_accepted(&env, previous, new_owner);

        Ok(())
    }

    pub fn cancel_ownership_transfer(env: Env, caller: Address) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        let cancelled = ownership::cancel_ownership_transfer(&env, &caller)?;

        events::publish_owner_cancelled(&env, caller, cancelled);

        Ok(())
    }

    // ── View functions ───────────────────────────────────────────────────────

    /// Accrued, unclaimed reward of position `id` right now. Callable by
    /// anyone; never mutates state.
    pub fn pending_reward(env: Env, id: u64) -> Result<i128, ContractError> {
        let position = positions::get_position(&env, id).ok_or(ContractError::PositionNotFound)?;
        rewards::pending_reward(
            &position,
            env.ledger().timestamp(),
            access::is_emergency(&env),
        )
        .ok_or(ContractError::Overflow)
    }

    pub fn get_position(env: Env, id: u64) -> Result<Position, ContractError> {
        positions::get_position(&env, id).ok_or(ContractError::PositionNotFound)
    }

    pub fn get_position_details(env: Env, id: u64) -> Result<PositionDetails, ContractError> {
        let position = positions::get_position(&env, id).ok_or(ContractError::PositionNotFound)?;
        let pending_reward = rewards::pending_reward(
            &position,
            env.ledger().timestamp(),
            access::is_emergency(&env),
        )
        .ok_or(ContractError::Overflow)?;
        let early_unlock_at = if position.early_unstake_request_time == 0 {
            0
        } else {
            position
                .early_unstake_request_time
                .saturating_add(rewards::EARLY_UNLOCK_PERIOD)
        };

        Ok(PositionDetails {
            matures_at: rewards::maturity_time(&position),
            pending_reward,
            early_unlock_at,
            position,
        })
    }

    /// Ids of every position `owner` has opened, oldest first.
    ///
    /// Reads every index page; owners with many positions should page
    /// through [`Self::get_user_positions_page`] instead.
    pub fn get_user_positions(env: Env, owner: Address) -> Vec<u64> {
        positions::positions_of(&env, &owner)
    }

    /// Page `page` of `owner`'s position ids, `OWNER_PAGE_SIZE` per page.
    pub fn get_user_positions_page(env: Env, owner: Address, page: u32) -> Vec<u64> {
        positions::positions_page(&env, &owner, page)
    }

    pub fn get_user_position_count(env: Env, owner: Address) -> u32 {
        positions::owner_position_count(&env, &owner)
    }

    pub fn get_counters(env: Env) -> LedgerCounters {
        Self::counters(&env)
    }

    pub fn get_total_staked(env: Env) -> i128 {
        env.storage().instance().get(&TOTAL_STAKED).unwrap_or(0)
    }

    pub fn get_reward_pool_balance(env: Env) -> i128 {
        env.storage().instance().get(&REWARD_POOL).unwrap_or(0)
    }

    pub fn get_total_pending_rewards(env: Env) -> i128 {
        env.storage().instance().get(&PENDING_REWARDS).unwrap_or(0)
    }

    pub fn get_next_position_id(env: Env) -> u64 {
        positions::peek_next_position_id(&env)
    }

    /// Reward funds not yet reserved: what a new stake may still be promised.
    pub fn get_available_reward_capacity(env: Env) -> Result<i128, ContractError> {
        Self::capacity(&Self::counters(&env))
    }

    pub fn get_config(env: Env) -> Result<StakingConfig, ContractError> {
        Self::config(&env)
    }

    pub fn get_mode(env: Env) -> LedgerMode {
        access::mode(&env)
    }

    pub fn is_emergency_mode(env: Env) -> bool {
        access::is_emergency(&env)
    }

    pub fn is_paused(env: Env) -> bool {
        access::is_paused(&env)
    }

    pub fn is_whitelist_only(env: Env) -> bool {
        whitelist::is_enforced(&env)
    }

    pub fn is_whitelisted(env: Env, addr: Address) -> bool {
        whitelist::is_whitelisted(&env, &addr)
    }

    pub fn get_token(env: Env) -> Result<Address, ContractError> {
        Self::token(&env)
    }

    pub fn get_penalty_pool(env: Env) -> Result<Address, ContractError> {
        Self::penalty_pool(&env)
    }

    pub fn get_owner(env: Env) -> Result<Address, ContractError> {
        ownership::get_owner(&env).ok_or(ContractError::NotInitialized)
    }

    pub fn get_pending_owner(env: Env) -> Option<Address> {
        ownership::get_pending_owner(&env)
    }

    pub fn is_initialized(env: Env) -> bool {
        ownership::get_owner(&env).is_some()
    }

    // ── Internal helpers ─────────────────────────────────────────────────────

    /// Guard: revert if the contract is not yet initialized.
    fn require_initialized(env: &Env) -> Result<(), ContractError> {
        if ownership::get_owner(env).is_none() {
            return Err(ContractError::NotInitialized);
        }
        Ok(())
    }

    fn validate_config(config: &StakingConfig) -> Result<(), ContractError> {
        if config.min_stake_amount <= 0
            || config.reward_rate == 0
            || config.reward_rate > rewards::MAX_REWARD_RATE_BPS
            || config.stake_start_time > config.stake_end_time
            || config.max_total_staked < 0
        {
            return Err(ContractError::InvalidConfig);
        }
        Ok(())
    }

    fn config(env: &Env) -> Result<StakingConfig, ContractError> {
        env.storage()
            .instance()
            .get(&CONFIG)
            .ok_or(ContractError::NotInitialized)
    }

    /// Owner-gated read-modify-validate-write of the configuration.
    fn update_config<F>(
        env: &Env,
        caller: &Address,
        setting: Symbol,
        apply: F,
    ) -> Result<(), ContractError>
    where
        F: FnOnce(&mut StakingConfig),
    {
        Self::require_initialized(env)?;
        caller.require_auth();
        access::require_owner(env, caller)?;

        let mut config = Self::config(env)?;
        apply(&mut config);
        Self::validate_config(&config)?;
        env.storage().instance().set(&CONFIG, &config);

        events::publish_config_updated(env, caller.clone(), setting, config);

        Ok(())
    }

    fn set_pause_state(env: &Env, caller: &Address, paused: bool) -> Result<(), ContractError> {
        Self::require_initialized(env)?;
        caller.require_auth();
        access::require_owner(env, caller)?;
        access::set_paused(env, paused)?;

        events::publish_pause_changed(env, caller.clone(), paused);

        Ok(())
    }

    fn token(env: &Env) -> Result<Address, ContractError> {
        env.storage()
            .instance()
            .get(&TOKEN)
            .ok_or(ContractError::NotInitialized)
    }

    fn penalty_pool(env: &Env) -> Result<Address, ContractError> {
        env.storage()
            .instance()
            .get(&PENALTY_POOL)
            .ok_or(ContractError::NotInitialized)
    }

    fn counters(env: &Env) -> LedgerCounters {
        LedgerCounters {
            total_staked: env.storage().instance().get(&TOTAL_STAKED).unwrap_or(0),
            reward_pool_balance: env.storage().instance().get(&REWARD_POOL).unwrap_or(0),
            total_pending_rewards: env.storage().instance().get(&PENDING_REWARDS).unwrap_or(0),
            next_position_id: positions::peek_next_position_id(env),
        }
    }

    fn write_counters(env: &Env, counters: &LedgerCounters) {
        env.storage()
            .instance()
            .set(&TOTAL_STAKED, &counters.total_staked);
        env.storage()
            .instance()
            .set(&REWARD_POOL, &counters.reward_pool_balance);
        env.storage()
            .instance()
            .set(&PENDING_REWARDS, &counters.total_pending_rewards);
    }

    fn capacity(counters: &LedgerCounters) -> Result<i128, ContractError> {
        counters
            .reward_pool_balance
            .checked_sub(counters.total_pending_rewards)
            .ok_or(ContractError::Overflow)
    }

    /// Book a reward payment against the position and the pool. The caller
    /// performs the transfer.
    fn settle_reward(
        position: &mut Position,
        counters: &mut LedgerCounters,
        reward: i128,
        now: u64,
    ) -> Result<(), ContractError> {
        if reward > counters.reward_pool_balance {
            return Err(ContractError::InsufficientBalance);
        }
        position.last_reward_at = now;
        position.claimed_rewards = position
            .claimed_rewards
            .checked_add(reward)
            .ok_or(ContractError::Overflow)?;
        counters.reward_pool_balance -= reward;
        counters.total_pending_rewards = counters
            .total_pending_rewards
            .checked_sub(reward)
            .ok_or(ContractError::Overflow)?;
        Ok(())
    }

    /// Remove a closing position from the counters: its principal leaves
    /// `total_staked` and whatever it reserved but was never paid is released.
    /// Returns the released amount.
    fn close_position(
        position: &Position,
        counters: &mut LedgerCounters,
    ) -> Result<i128, ContractError> {
        let unpaid = position
            .reserved_reward
            .checked_sub(position.claimed_rewards)
            .ok_or(ContractError::Overflow)?;
        counters.total_staked = counters
            .total_staked
            .checked_sub(position.amount)
            .ok_or(ContractError::Overflow)?;
        counters.total_pending_rewards = counters
            .total_pending_rewards
            .checked_sub(unpaid)
            .ok_or(ContractError::Overflow)?;
        Ok(unpaid)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────




#[cfg(test)]
mod test_events;
