#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use penalty_pool::{PenaltyPoolContract, PenaltyPoolContractClient};
use soroban_sdk::{
    testutils::{Address as _, Ledger as _},
    token::{Client as TokenClient, StellarAssetClient},
    Address, Env,
};
use staking::{StakingConfig, StakingContract, StakingContractClient};

#[derive(Arbitrary, Debug)]
pub enum FuzzAction {
    Stake { who: u8, amount: u32 },
    Claim { who: u8, id: u8 },
    Unstake { who: u8, id: u8 },
    RequestEarly { who: u8, id: u8 },
    CompleteEarly { who: u8, id: u8 },
    EmergencyWithdraw { who: u8, id: u8 },
    Fund { amount: u32 },
    WithdrawExcess { amount: u32 },
    EnableEmergency,
    Advance { hours: u16 },
}

fuzz_target!(|input: (u16, Vec<FuzzAction>)| {
    let (rate, actions) = input;
    let env = Env::default();
    env.mock_all_auths();

    let token = env
        .register_stellar_asset_contract_v2(Address::generate(&env))
        .address();
    let contract_id = env.register(StakingContract, ());
    let client = StakingContractClient::new(&env, &contract_id);
    let pool_id = env.register(PenaltyPoolContract, ());
    let pool = PenaltyPoolContractClient::new(&env, &pool_id);
    let owner = Address::generate(&env);
    pool.initialize(&owner, &token, &contract_id);

    let config = StakingConfig {
        min_stake_amount: 1,
        reward_rate: u32::from(rate % 10_000) + 1,
        stake_start_time: 0,
        stake_end_time: u64::MAX,
        max_total_staked: 0,
    };
    client.initialize(&owner, &token, &pool_id, &config, &false);

    let minter = StellarAssetClient::new(&env, &token);
    let balances = TokenClient::new(&env, &token);
    let users: Vec<Address> = (0..4).map(|_| Address::generate(&env)).collect();
    for user in &users {
        minter.mint(user, &(u32::MAX as i128 * 4));
    }

    // Failing calls are fine; the ledger invariants must hold regardless.
    for action in actions.into_iter().take(64) {
        let pick = |who: u8| &users[who as usize % users.len()];
        match action {
            FuzzAction::Stake { who, amount } => {
                let _ = client.try_stake(pick(who), &(amount as i128));
            }
            FuzzAction::Claim { who, id } => {
                let _ = client.try_claim_reward(pick(who), &(id as u64));
            }
            FuzzAction::Unstake { who, id } => {
                let _ = client.try_unstake(pick(who), &(id as u64));
            }
            FuzzAction::RequestEarly { who, id } => {
                let _ = client.try_request_early_unstake(pick(who), &(id as u64));
            }
            FuzzAction::CompleteEarly { who, id } => {
                let _ = client.try_complete_early_unstake(pick(who), &(id as u64));
            }
            FuzzAction::EmergencyWithdraw { who, id } => {
                let _ = client.try_emergency_withdraw(pick(who), &(id as u64));
            }
            FuzzAction::Fund { amount } => {
                minter.mint(&owner, &(amount as i128));
                let _ = client.try_update_reward_pool(&owner, &(amount as i128));
            }
            FuzzAction::WithdrawExcess { amount } => {
                let _ = client.try_withdraw_excess_reward_pool(&owner, &(amount as i128));
            }
            FuzzAction::EnableEmergency => {
                let _ = client.try_enable_emergency_mode(&owner);
            }
            FuzzAction::Advance { hours } => {
                let now = env.ledger().timestamp();
                env.ledger().set_timestamp(now + hours as u64 * 3_600);
            }
        }

        let counters = client.get_counters();
        assert!(counters.reward_pool_balance >= counters.total_pending_rewards);
        assert_eq!(
            balances.balance(&contract_id),
            counters.total_staked + counters.reward_pool_balance
        );
        assert_eq!(balances.balance(&pool_id), pool.get_balance());
    }
});
