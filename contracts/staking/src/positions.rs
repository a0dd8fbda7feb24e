use common::{TTL_EXTEND_TO, TTL_THRESHOLD};
use soroban_sdk::{contracttype, symbol_short, Address, Env, Symbol, Vec};

// ── Storage key constants ───────────────────────────────────────────────────

/// Counter holding the last allocated position id.
const POS_CTR: Symbol = symbol_short!("POS_CTR");
const POSITION: Symbol = symbol_short!("POS");
const USER_POSITIONS: Symbol = symbol_short!("USR_POS");
const USER_POSITION_COUNT: Symbol = symbol_short!("USR_CNT");

/// Ids per owner-index entry. The index is split into fixed-size pages so no
/// single storage entry grows with the number of positions an owner opens.
pub const OWNER_PAGE_SIZE: u32 = 50;

// ── Types ───────────────────────────────────────────────────────────────────

/// One stake deposit and its accrual/exit state.
///
/// Closed positions (`is_unstaked`) are kept forever as an audit record and
/// are never written again.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Position {
    /// Unique, increasing, never reused.
    pub id: u64,
    pub owner: Address,
    /// Principal. Fixed for the life of the position.
    pub amount: i128,
    /// Yearly rate in basis points, fixed when the position was opened.
    pub reward_rate: u32,
    /// Full-maturity reward reserved against the pool at stake time.
    pub reserved_reward: i128,
    pub staked_at: u64,
    /// Start of the next accrual window.
    pub last_reward_at: u64,
    pub is_unstaked: bool,
    /// `true` only for an ordinary exit after maturity.
    pub is_completed_stake: bool,
    /// Cumulative reward paid out.
    pub claimed_rewards: i128,
    /// 0 when no early unstake was requested.
    pub early_unstake_request_time: u64,
}

// ── Storage helpers ─────────────────────────────────────────────────────────

fn position_key(id: u64) -> (Symbol, u64) {
    (POSITION, id)
}

fn user_page_key(owner: &Address, page: u32) -> (Symbol, Address, u32) {
    (USER_POSITIONS, owner.clone(), page)
}

fn user_count_key(owner: &Address) -> (Symbol, Address) {
    (USER_POSITION_COUNT, owner.clone())
}

/// Persist a `Position`.
pub fn store_position(env: &Env, position: &Position) {
    let key = position_key(position.id);
    env.storage().persistent().set(&key, position);
    env.storage()
        .persistent()
        .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

/// Retrieve a `Position` by id, returning `None` when not found.
pub fn get_position(env: &Env, id: u64) -> Option<Position> {
    env.storage().persistent().get(&position_key(id))
}

/// Allocate and return the next position id (1-based, monotonically increasing).
pub fn next_position_id(env: &Env) -> u64 {
    let current: u64 = env.storage().instance().get(&POS_CTR).unwrap_or(0u64);
    let next = current.saturating_add(1);
    env.storage().instance().set(&POS_CTR, &next);
    next
}

/// The id the next `stake` will receive.
pub fn peek_next_position_id(env: &Env) -> u64 {
    let current: u64 = env.storage().instance().get(&POS_CTR).unwrap_or(0u64);
    current.saturating_add(1)
}

/// Append `id` to the owner's position index.
pub fn index_owner(env: &Env, owner: &Address, id: u64) {
    let count = owner_position_count(env, owner);
    let page_key = user_page_key(owner, count / OWNER_PAGE_SIZE);
    let mut ids = positions_page(env, owner, count / OWNER_PAGE_SIZE);
    ids.push_back(id);
    env.storage().persistent().set(&page_key, &ids);
    env.storage()
        .persistent()
        .extend_ttl(&page_key, TTL_THRESHOLD, TTL_EXTEND_TO);

    let count_key = user_count_key(owner);
    env.storage()
        .persistent()
        .set(&count_key, &count.saturating_add(1));
    env.storage()
        .persistent()
        .extend_ttl(&count_key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

/// Number of positions `owner` has ever opened.
pub fn owner_position_count(env: &Env, owner: &Address) -> u32 {
    env.storage()
        .persistent()
        .get(&user_count_key(owner))
        .unwrap_or(0)
}

/// One page of `owner`'s position ids, oldest first. Empty past the end.
pub fn positions_page(env: &Env, owner: &Address, page: u32) -> Vec<u64> {
    env.storage()
        .persistent()
        .get(&user_page_key(owner, page))
        .unwrap_or(Vec::new(env))
}

/// Every position id ever opened by `owner`, oldest first.
pub fn positions_of(env: &Env, owner: &Address) -> Vec<u64> {
    let count = owner_position_count(env, owner);
    let mut ids = Vec::new(env);
    for page in 0..count.div_ceil(OWNER_PAGE_SIZE) {
        ids.append(&positions_page(env, owner, page));
    }
    ids
}
