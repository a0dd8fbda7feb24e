//! Reward accrual engine.
//!
//! Everything here is a pure function of its inputs: no storage access, no
//! side effects. Amounts are `i128` token units, times are ledger seconds,
//! and rates are basis points per year. Every multiplication is checked and
//! division truncates toward zero; `None` means the result does not fit.
//!
//! ```text
//! reward = amount × rate_bps × elapsed / (BASIS_POINTS × SECONDS_PER_YEAR)
//! ```

use crate::positions::Position;

// ── Constants ───────────────────────────────────────────────────────────────

pub const BASIS_POINTS: i128 = 10_000;
pub const SECONDS_PER_YEAR: u64 = 365 * 24 * 60 * 60;

/// Maturity duration required for an ordinary unstake.
pub const LOCK_PERIOD: u64 = 365 * 24 * 60 * 60;

/// Mandatory wait between an early-unstake request and its completion.
pub const EARLY_UNLOCK_PERIOD: u64 = 7 * 24 * 60 * 60;

/// Share of accrued reward an early exit keeps, in basis points.
pub const PENALTY_RATE_BPS: i128 = 5_000;

/// Highest configurable yearly rate. Keeping it at 100% bounds any
/// early-exit clawback to half the principal.
pub const MAX_REWARD_RATE_BPS: u32 = 10_000;

// ── Core formula ────────────────────────────────────────────────────────────

/// Reward earned by `amount` at `rate_bps` over `elapsed` seconds.
pub fn reward_for(amount: i128, rate_bps: u32, elapsed: u64) -> Option<i128> {
    let denominator = BASIS_POINTS.checked_mul(SECONDS_PER_YEAR as i128)?;
    amount
        .checked_mul(rate_bps as i128)?
        .checked_mul(elapsed as i128)?
        .checked_div(denominator)
}

/// Worst-case total promise for a new position held to full maturity.
pub fn full_lock_reward(amount: i128, rate_bps: u32) -> Option<i128> {
    reward_for(amount, rate_bps, LOCK_PERIOD)
}

// ── Position-level accrual ──────────────────────────────────────────────────

pub fn maturity_time(position: &Position) -> u64 {
    position.staked_at.saturating_add(LOCK_PERIOD)
}

/// Latest instant that still earns reward: lock maturity, or the early-unstake
/// request time when one has been recorded.
pub fn accrual_cutoff(position: &Position) -> u64 {
    let maturity = maturity_time(position);
    if position.early_unstake_request_time != 0 {
        maturity.min(position.early_unstake_request_time)
    } else {
        maturity
    }
}

/// Accrued, unclaimed reward for `position` as of `now`.
///
/// Always zero once the position is closed or the ledger is in emergency
/// mode.
pub fn pending_reward(position: &Position, now: u64, emergency: bool) -> Option<i128> {
    if emergency || position.is_unstaked {
        return Some(0);
    }
    let end = now.min(accrual_cutoff(position));
    let elapsed = end.saturating_sub(position.last_reward_at);
    reward_for(position.amount, position.reward_rate, elapsed)
}

// ── Early exit ──────────────────────────────────────────────────────────────

/// Outcome of completing an early unstake.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EarlyExitSettlement {
    /// Lifetime reward from `staked_at` to the frozen cutoff.
    pub total_accrued: i128,
    /// Part of `total_accrued` the staker is entitled to keep.
    pub allowed_reward: i128,
    /// Forfeited part, credited to the penalty pool.
    pub penalty: i128,
    /// Reward still owed on top of what was already claimed.
    pub payable_reward: i128,
    /// Excess of earlier claims over `allowed_reward`, taken from principal.
    pub principal_deduction: i128,
    /// Total sent back to the staker.
    pub payout: i128,
    /// Amount leaving the reward pool: `total_accrued - claimed_rewards`.
    pub reward_pool_outflow: i128,
}

/// Split a position's lifetime accrual between staker and penalty pool.
///
/// `claimed_rewards` can never exceed `total_accrued`: claims stop accruing at
/// the same cutoff and the lifetime figure is computed in one truncating step,
/// which is never below the sum of the truncated claims.
pub fn settle_early_exit(position: &Position) -> Option<EarlyExitSettlement> {
    let elapsed = accrual_cutoff(position).saturating_sub(position.staked_at);
    let total_accrued = reward_for(position.amount, position.reward_rate, elapsed)?;
    settle_amounts(position.amount, total_accrued, position.claimed_rewards)
}

/// Arithmetic core of [`settle_early_exit`].
pub fn settle_amounts(
    principal: i128,
    total_accrued: i128,
    claimed_rewards: i128,
) -> Option<EarlyExitSettlement> {
    let allowed_reward = total_accrued
        .checked_mul(PENALTY_RATE_BPS)?
        .checked_div(BASIS_POINTS)?;
    let penalty = total_accrued.checked_sub(allowed_reward)?;

    let (payable_reward, principal_deduction) = if claimed_rewards < allowed_reward {
        (allowed_reward.checked_sub(claimed_rewards)?, 0)
    } else {
        (0, claimed_rewards.checked_sub(allowed_reward)?)
    };

    if principal_deduction > principal {
        return None;
    }
    let reward_pool_outflow = total_accrued.checked_sub(claimed_rewards)?;
    if reward_pool_outflow < 0 {
        return None;
    }

    let payout = principal
        .checked_sub(principal_deduction)?
        .checked_add(payable_reward)?;

    Some(EarlyExitSettlement {
        total_accrued,
        allowed_reward,
        penalty,
        payable_reward,
        principal_deduction,
        payout,
        reward_pool_outflow,
    })
}

// ── Unit tests ──────────────────────────────────────────────────────────────
// Pure-math tests with no contract registered.
