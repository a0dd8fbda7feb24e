//! Properties of reward accrual and exit settlement for a single position.

use proptest::prelude::*;

use crate::support::{Harness, DAY};

const YEAR: u64 = 365 * DAY;
const FUNDING: i128 = 10_000_000;

/// Reference formula, evaluated independently of the contract.
fn expected_reward(amount: i128, rate: u32, elapsed: u64) -> i128 {
    amount * rate as i128 * elapsed as i128 / (10_000 * YEAR as i128)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    /// Pending reward never decreases over time, never exceeds the reserved
    /// promise, and follows the yearly-rate formula up to maturity.
    #[test]
    fn prop_accrual_is_monotonic_and_capped(
        amount in 100i128..10_000_000,
        rate in 1u32..=10_000,
        t1 in 0u64..(400 * DAY),
        dt in 0u64..(400 * DAY),
    ) {
        let h = Harness::new(rate, FUNDING);
        let staker = h.staker(amount);
        let id = h.client.stake(&staker, &amount);

        h.set_time(t1);
        let first = h.client.pending_reward(&id);
        h.set_time(t1 + dt);
        let second = h.client.pending_reward(&id);

        prop_assert!(second >= first);
        prop_assert!(second <= h.client.get_position(&id).reserved_reward);
        prop_assert_eq!(first, expected_reward(amount, rate, t1.min(YEAR)));
    }

    /// An early exit with no prior claims pays full principal plus the
    /// retained half of the reward accrued up to the request; the other half
    /// is credited to the penalty pool.
    #[test]
    fn prop_early_exit_pays_retained_share(
        amount in 100i128..10_000_000,
        rate in 1u32..=10_000,
        day in 1u64..365,
    ) {
        let h = Harness::new(rate, FUNDING);
        let staker = h.staker(amount);
        let id = h.client.stake(&staker, &amount);

        h.set_time(day * DAY);
        h.client.request_early_unstake(&staker, &id);
        h.set_time(h.now() + 7 * DAY);
        let payout = h.client.complete_early_unstake(&staker, &id);

        let accrued = expected_reward(amount, rate, day * DAY);
        let kept = accrued * 5_000 / 10_000;
        prop_assert_eq!(payout, amount + kept);
        prop_assert_eq!(h.balance(&staker), amount + kept);
        prop_assert_eq!(h.pool.get_balance(), accrued - kept);

        let counters = h.client.get_counters();
        prop_assert_eq!(counters.total_staked, 0);
        prop_assert_eq!(counters.total_pending_rewards, 0);
    }

    /// Under emergency mode a position returns exactly its principal, no
    /// matter how long it accrued beforehand.
    #[test]
    fn prop_emergency_returns_exact_principal(
        amount in 100i128..10_000_000,
        day in 0u64..400,
    ) {
        let h = Harness::new(500, FUNDING);
        let staker = h.staker(amount);
        let id = h.client.stake(&staker, &amount);

        h.set_time(day * DAY);
        h.client.enable_emergency_mode(&h.owner);
        prop_assert_eq!(h.client.pending_reward(&id), 0);
        prop_assert_eq!(h.client.emergency_withdraw(&staker, &id), amount);
        prop_assert_eq!(h.balance(&staker), amount);
        prop_assert_eq!(h.client.get_reward_pool_balance(), FUNDING);
    }
}
