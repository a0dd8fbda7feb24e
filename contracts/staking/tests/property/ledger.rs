//! Property-based state machine tests for the staking ledger.
//!
//! Random sequences of operations run against one contract instance.
//! Failing calls are expected and ignored; after every step the ledger must
//! still satisfy:
//! - Solvency: `reward_pool_balance >= total_pending_rewards`
//! - Conservation: `total_staked` equals the principal of open positions
//! - Custody: the contract holds exactly `total_staked + reward_pool_balance`
//! - Terminal records: a closed position never changes again

use std::collections::BTreeMap;

use proptest::prelude::*;
use proptest_derive::Arbitrary;
use soroban_sdk::Address;
use staking::positions::Position;

use crate::support::{Harness, DAY};

const STAKERS: usize = 3;

#[derive(Clone, Debug, Arbitrary)]
enum Op {
    #[proptest(weight = 4)]
    Stake {
        #[proptest(strategy = "0usize..STAKERS")]
        who: usize,
        #[proptest(strategy = "50i128..3_000_000")]
        amount: i128,
    },
    #[proptest(weight = 3)]
    Claim {
        #[proptest(strategy = "0usize..STAKERS")]
        who: usize,
        #[proptest(strategy = "1u64..12")]
        id: u64,
    },
    #[proptest(weight = 2)]
    Unstake {
        #[proptest(strategy = "0usize..STAKERS")]
        who: usize,
        #[proptest(strategy = "1u64..12")]
        id: u64,
    },
    #[proptest(weight = 2)]
    RequestEarly {
        #[proptest(strategy = "0usize..STAKERS")]
        who: usize,
        #[proptest(strategy = "1u64..12")]
        id: u64,
    },
    #[proptest(weight = 2)]
    CompleteEarly {
        #[proptest(strategy = "0usize..STAKERS")]
        who: usize,
        #[proptest(strategy = "1u64..12")]
        id: u64,
    },
    EmergencyWithdraw {
        #[proptest(strategy = "0usize..STAKERS")]
        who: usize,
        #[proptest(strategy = "1u64..12")]
        id: u64,
    },
    FundPool {
        #[proptest(strategy = "1i128..100_000")]
        amount: i128,
    },
    WithdrawExcess {
        #[proptest(strategy = "1i128..200_000")]
        amount: i128,
    },
    TogglePause,
    EnableEmergency,
    #[proptest(weight = 4)]
    Advance {
        #[proptest(strategy = "0u64..120")]
        days: u64,
    },
}

fn apply(h: &Harness, stakers: &[Address], op: &Op) {
    match op {
        Op::Stake { who, amount } => {
            let _ = h.client.try_stake(&stakers[*who], amount);
        }
        Op::Claim { who, id } => {
            let _ = h.client.try_claim_reward(&stakers[*who], id);
        }
        Op::Unstake { who, id } => {
            let _ = h.client.try_unstake(&stakers[*who], id);
        }
        Op::RequestEarly { who, id } => {
            let _ = h.client.try_request_early_unstake(&stakers[*who], id);
        }
        Op::CompleteEarly { who, id } => {
            let _ = h.client.try_complete_early_unstake(&stakers[*who], id);
        }
        Op::EmergencyWithdraw { who, id } => {
            let _ = h.client.try_emergency_withdraw(&stakers[*who], id);
        }
        Op::FundPool { amount } => {
            h.mint(&h.owner, *amount);
            let _ = h.client.try_update_reward_pool(&h.owner, amount);
        }
        Op::WithdrawExcess { amount } => {
            let _ = h.client.try_withdraw_excess_reward_pool(&h.owner, amount);
        }
        Op::TogglePause => {
            if h.client.is_paused() {
                let _ = h.client.try_unpause(&h.owner);
            } else {
                let _ = h.client.try_pause(&h.owner);
            }
        }
        Op::EnableEmergency => {
            let _ = h.client.try_enable_emergency_mode(&h.owner);
        }
        Op::Advance { days } => h.set_time(h.now() + days * DAY),
    }
}

fn open_positions(h: &Harness) -> Vec<Position> {
    let next = h.client.get_next_position_id();
    (1..next).map(|id| h.client.get_position(&id)).collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn prop_ledger_invariants_hold_for_any_sequence(
        ops in proptest::collection::vec(any::<Op>(), 1..40),
    ) {
        let h = Harness::new(800, 400_000);
        let stakers: Vec<Address> = (0..STAKERS).map(|_| h.staker(10_000_000)).collect();
        let mut closed: BTreeMap<u64, Position> = BTreeMap::new();

        for op in &ops {
            apply(&h, &stakers, op);

            let counters = h.client.get_counters();
            prop_assert!(
                counters.reward_pool_balance >= counters.total_pending_rewards,
                "solvency violated after {:?}", op
            );

            let positions = open_positions(&h);
            let open_principal: i128 = positions
                .iter()
                .filter(|p| !p.is_unstaked)
                .map(|p| p.amount)
                .sum();
            prop_assert_eq!(counters.total_staked, open_principal);

            prop_assert_eq!(
                h.balance(&h.client.address),
                counters.total_staked + counters.reward_pool_balance
            );

            for p in positions.iter().filter(|p| p.is_unstaked) {
                if let Some(previous) = closed.get(&p.id) {
                    prop_assert_eq!(previous, p);
                }
                prop_assert_eq!(h.client.pending_reward(&p.id), 0);
                closed.insert(p.id, p.clone());
            }
        }
    }
}
