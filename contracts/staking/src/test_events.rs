extern crate std;

use penalty_pool::events::DepositedEvent;
use soroban_sdk::{
    symbol_short,
    testutils::Events,
    xdr, Address, Env, Symbol, TryFromVal, TryIntoVal, Val, Vec,
};

use crate::{
    events::{
        EarlyUnstakeCompletedEvent, EarlyUnstakeRequestedEvent, EmergencyWithdrawnEvent,
        RewardClaimedEvent, StakedEvent, UnstakedEvent,
    },
    test::{at_day, funded_staker, setup, Ctx, DAY, REWARD_FUNDING},
    LedgerCounters,
};

const PRINCIPAL: i128 = 1_000_000;
// 1_000_000 at 500 bps for a full year.
const FULL_RESERVE: i128 = 50_000;

/// Topics and payload of the event `contract` published under `name` during
/// the last invocation.
fn find_event(env: &Env, contract: &Address, name: Symbol) -> (Vec<Val>, Val) {
    let mut events: Vec<(Address, Vec<Val>, Val)> = Vec::new(env);
    for event in env.events().all().events() {
        let Some(contract_id) = &event.contract_id else {
            continue;
        };
        let xdr::ContractEventBody::V0(body) = &event.body;
        let address =
            Address::try_from_val(env, &xdr::ScAddress::Contract(contract_id.clone())).unwrap();
        let mut topics: Vec<Val> = Vec::new(env);
        for topic in body.topics.iter() {
            topics.push_back(Val::try_from_val(env, topic).unwrap());
        }
        let data = Val::try_from_val(env, &body.data).unwrap();
        events.push_back((address, topics, data));
    }
    for event in events.iter() {
        if &event.0 != contract {
            continue;
        }
        let topic: Symbol = event.1.get(0).unwrap().try_into_val(env).unwrap();
        if topic == name {
            return (event.1, event.2);
        }
    }
    panic!("no matching event published");
}

fn actor(env: &Env, topics: &Vec<Val>) -> Address {
    topics.get(1).unwrap().try_into_val(env).unwrap()
}

fn open_position(ctx: &Ctx) -> (Address, u64) {
    let staker = funded_staker(ctx, PRINCIPAL);
    let id = ctx.client.stake(&staker, &PRINCIPAL);
    (staker, id)
}

#[test]
fn test_stake_emits_event() {
    let ctx = setup(500);
    at_day(&ctx, 3);
    let (staker, id) = open_position(&ctx);

    let (topics, data) = find_event(&ctx.env, &ctx.client.address, symbol_short!("STAKED"));
    assert_eq!(actor(&ctx.env, &topics), staker);
    let event: StakedEvent = data.try_into_val(&ctx.env).unwrap();
    assert_eq!(event.staker, staker);
    assert_eq!(event.position_id, id);
    assert_eq!(event.amount, PRINCIPAL);
    assert_eq!(event.reserved_reward, FULL_RESERVE);
    assert_eq!(event.timestamp, 3 * DAY);
    assert_eq!(
        event.counters,
        LedgerCounters {
            total_staked: PRINCIPAL,
            reward_pool_balance: REWARD_FUNDING,
            total_pending_rewards: FULL_RESERVE,
            next_position_id: 2,
        }
    );
}

#[test]
fn test_claim_emits_event() {
    let ctx = setup(500);
    let (staker, id) = open_position(&ctx);

    // 73 days is exactly a fifth of a year: 10_000.
    at_day(&ctx, 73);
    ctx.client.claim_reward(&staker, &id);

    let (topics, data) = find_event(&ctx.env, &ctx.client.address, symbol_short!("CLMD"));
    assert_eq!(actor(&ctx.env, &topics), staker);
    let event: RewardClaimedEvent = data.try_into_val(&ctx.env).unwrap();
    assert_eq!(event.position_id, id);
    assert_eq!(event.amount, 10_000);
    assert_eq!(event.claimed_rewards, 10_000);
    assert_eq!(event.timestamp, 73 * DAY);
    assert_eq!(event.counters.reward_pool_balance, REWARD_FUNDING - 10_000);
    assert_eq!(event.counters.total_pending_rewards, FULL_RESERVE - 10_000);
    assert_eq!(event.counters, ctx.client.get_counters());
}

#[test]
fn test_unstake_emits_event() {
    let ctx = setup(500);
    let (staker, id) = open_position(&ctx);

    at_day(&ctx, 73);
    ctx.client.claim_reward(&staker, &id);
    at_day(&ctx, 365);
    ctx.client.unstake(&staker, &id);

    let (topics, data) = find_event(&ctx.env, &ctx.client.address, symbol_short!("UNSTAKED"));
    assert_eq!(actor(&ctx.env, &topics), staker);
    let event: UnstakedEvent = data.try_into_val(&ctx.env).unwrap();
    assert_eq!(event.position_id, id);
    assert_eq!(event.principal, PRINCIPAL);
    assert_eq!(event.reward, FULL_RESERVE - 10_000);
    assert_eq!(event.released_reserve, 0);
    assert_eq!(event.timestamp, 365 * DAY);
    assert_eq!(
        event.counters,
        LedgerCounters {
            total_staked: 0,
            reward_pool_balance: REWARD_FUNDING - FULL_RESERVE,
            total_pending_rewards: 0,
            next_position_id: 2,
        }
    );
}

#[test]
fn test_emergency_withdraw_emits_event() {
    let ctx = setup(500);
    let (staker, id) = open_position(&ctx);

    at_day(&ctx, 10);
    ctx.client.enable_emergency_mode(&ctx.owner);
    ctx.client.emergency_withdraw(&staker, &id);

    let (topics, data) = find_event(&ctx.env, &ctx.client.address, symbol_short!("EMRG_WD"));
    assert_eq!(actor(&ctx.env, &topics), staker);
    let event: EmergencyWithdrawnEvent = data.try_into_val(&ctx.env).unwrap();
    assert_eq!(event.position_id, id);
    assert_eq!(event.principal, PRINCIPAL);
    assert_eq!(event.released_reserve, FULL_RESERVE);
    assert_eq!(event.timestamp, 10 * DAY);
    assert_eq!(event.counters.total_staked, 0);
    assert_eq!(event.counters.total_pending_rewards, 0);
    assert_eq!(event.counters.reward_pool_balance, REWARD_FUNDING);
}

#[test]
fn test_early_request_emits_event() {
    let ctx = setup(500);
    let (staker, id) = open_position(&ctx);

    at_day(&ctx, 60);
    ctx.client.request_early_unstake(&staker, &id);

    let (topics, data) = find_event(&ctx.env, &ctx.client.address, symbol_short!("EARLY_REQ"));
    assert_eq!(actor(&ctx.env, &topics), staker);
    let event: EarlyUnstakeRequestedEvent = data.try_into_val(&ctx.env).unwrap();
    assert_eq!(event.position_id, id);
    assert_eq!(event.request_time, 60 * DAY);
    assert_eq!(event.unlock_at, 67 * DAY);
    assert_eq!(event.timestamp, 60 * DAY);
}

#[test]
fn test_early_completion_emits_ledger_and_pool_events() {
    let ctx = setup(500);
    let (staker, id) = open_position(&ctx);

    at_day(&ctx, 60);
    ctx.client.request_early_unstake(&staker, &id);
    at_day(&ctx, 67);
    ctx.client.complete_early_unstake(&staker, &id);

    let (topics, data) = find_event(&ctx.env, &ctx.client.address, symbol_short!("EARLY_OUT"));
    assert_eq!(actor(&ctx.env, &topics), staker);
    let event: EarlyUnstakeCompletedEvent = data.try_into_val(&ctx.env).unwrap();
    assert_eq!(event.position_id, id);
    assert_eq!(event.total_accrued, 8_219);
    assert_eq!(event.payable_reward, 4_109);
    assert_eq!(event.penalty, 4_110);
    assert_eq!(event.principal_deduction, 0);
    assert_eq!(event.payout, PRINCIPAL + 4_109);
    assert_eq!(event.timestamp, 67 * DAY);
    assert_eq!(
        event.counters,
        LedgerCounters {
            total_staked: 0,
            reward_pool_balance: REWARD_FUNDING - 8_219,
            total_pending_rewards: 0,
            next_position_id: 2,
        }
    );

    // The nested deposit is recorded by the penalty pool itself.
    let (topics, data) = find_event(&ctx.env, &ctx.pool.address, symbol_short!("DEPOSIT"));
    assert_eq!(actor(&ctx.env, &topics), ctx.client.address);
    let deposit: DepositedEvent = data.try_into_val(&ctx.env).unwrap();
    assert_eq!(deposit.depositor, ctx.client.address);
    assert_eq!(deposit.amount, 4_110);
    assert_eq!(deposit.new_balance, 4_110);
}
