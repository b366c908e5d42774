#![cfg(test)]

use crate::math::REWARD_SCALE;
use crate::test_helpers::*;
use crate::types::RewardPolicy;
use crate::XoleError;
use soroban_sdk::testutils::Events;
use soroban_sdk::{Env, IntoVal, Symbol, TryFromVal, Vec};

fn pool_share(out: i128) -> i128 {
    out * 5_000 / 10_000
}

fn share_of(pool: i128, amount: i128, total: i128) -> i128 {
    let per_unit = pool * REWARD_SCALE / total;
    amount * per_unit / REWARD_SCALE
}

#[test]
fn test_rewards_split_by_locked_amount() {
    let e = Env::default();
    let ctx = setup(&e);
    let a = locker(&e, &ctx, 3_000 * UNIT, 10);
    let b = locker(&e, &ctx, 1_000 * UNIT, 100);

    let out = convert_idle(&e, &ctx, UNIT);
    let pool = pool_share(out);

    let earned_a = ctx.client.earned(&a);
    let earned_b = ctx.client.earned(&b);
    assert_eq!(earned_a, share_of(pool, 3_000 * UNIT, 4_000 * UNIT));
    assert_eq!(earned_b, share_of(pool, 1_000 * UNIT, 4_000 * UNIT));
    assert!(earned_a + earned_b <= pool);
    assert!(pool - (earned_a + earned_b) <= 2);
    // Lock duration does not weigh into rewards.
    assert!((earned_a - 3 * earned_b).abs() <= 3);
}

#[test]
fn test_accumulator_tracks_distributions() {
    let e = Env::default();
    let ctx = setup(&e);
    locker(&e, &ctx, 2_000 * UNIT, 10);

    let out = convert_idle(&e, &ctx, UNIT);
    let state = ctx.client.get_reward_state();
    assert_eq!(state.total_locked, 2_000 * UNIT);
    assert_eq!(
        state.reward_per_unit_stored,
        pool_share(out) * REWARD_SCALE / (2_000 * UNIT)
    );
    assert_eq!(state.last_update_time, START);
    assert_eq!(ctx.client.reward_per_unit(), state.reward_per_unit_stored);
}

#[test]
fn test_late_locker_gets_only_later_rewards() {
    let e = Env::default();
    let ctx = setup(&e);
    let early = locker(&e, &ctx, 1_000 * UNIT, 10);
    let first = pool_share(convert_idle(&e, &ctx, UNIT));

    let late = locker(&e, &ctx, 1_000 * UNIT, 10);
    assert_eq!(ctx.client.earned(&late), 0);

    let second = pool_share(convert_idle(&e, &ctx, UNIT));
    assert_eq!(
        ctx.client.earned(&late),
        share_of(second, 1_000 * UNIT, 2_000 * UNIT)
    );
    let early_expected = share_of(first, 1_000 * UNIT, 1_000 * UNIT)
        + share_of(second, 1_000 * UNIT, 2_000 * UNIT);
    assert!((ctx.client.earned(&early) - early_expected).abs() <= 1);
}

#[test]
fn test_lock_changes_bank_pending_rewards() {
    let e = Env::default();
    let ctx = setup(&e);
    let who = participant(&e, &ctx, 2_000 * UNIT);
    ctx.client
        .create_lock(&who, &(1_000 * UNIT), &(START + 10 * ONE_WEEK));
    let other = locker(&e, &ctx, 1_000 * UNIT, 10);

    let first = pool_share(convert_idle(&e, &ctx, UNIT));
    let banked = share_of(first, 1_000 * UNIT, 2_000 * UNIT);

    ctx.client.increase_amount(&who, &(1_000 * UNIT));
    assert_eq!(ctx.client.earned(&who), banked);

    let second = pool_share(convert_idle(&e, &ctx, UNIT));
    let expected = banked + share_of(second, 2_000 * UNIT, 3_000 * UNIT);
    assert!((ctx.client.earned(&who) - expected).abs() <= 1);
    assert!(ctx.client.earned(&who) > ctx.client.earned(&other));
}

#[test]
fn test_claim_pays_and_resets() {
    let e = Env::default();
    let ctx = setup(&e);
    let who = locker(&e, &ctx, 1_000 * UNIT, 10);
    convert_idle(&e, &ctx, UNIT);
    let owed = ctx.client.earned(&who);
    assert!(owed > 0);

    let paid = ctx.client.claim_reward(&who);

    assert_eq!(paid, owed);
    assert_eq!(balance(&e, &ctx.share_token, &who), owed);
    assert_eq!(ctx.client.earned(&who), 0);
    assert_eq!(ctx.client.get_funds().withdrawn_reward, owed);
    assert_eq!(
        ctx.client.try_claim_reward(&who),
        Err(Ok(XoleError::NothingToWithdraw))
    );
}

#[test]
fn test_claim_emits_event() {
    let e = Env::default();
    let ctx = setup(&e);
    let who = locker(&e, &ctx, 1_000 * UNIT, 10);
    convert_idle(&e, &ctx, UNIT);

    let paid = ctx.client.claim_reward(&who);

    let expected_topics = Vec::from_array(
        &e,
        [
            Symbol::new(&e, "reward_claimed").into_val(&e),
            who.clone().into_val(&e),
        ],
    );
    let found = e.events().all().iter().any(|evt| {
        evt.0 == ctx.contract_id
            && evt.1 == expected_topics
            && i128::try_from_val(&e, &evt.2)
                .map(|amount| amount == paid)
                .unwrap_or(false)
    });
    assert!(found, "expected reward_claimed event not found");
}

#[test]
fn test_claim_without_rewards_rejected() {
    let e = Env::default();
    let ctx = setup(&e);
    let who = locker(&e, &ctx, UNIT, 4);

    assert_eq!(
        ctx.client.try_claim_reward(&who),
        Err(Ok(XoleError::NothingToWithdraw))
    );
}

#[test]
fn test_rewards_survive_withdrawal() {
    let e = Env::default();
    let ctx = setup(&e);
    let who = locker(&e, &ctx, 500 * UNIT, 2);
    convert_idle(&e, &ctx, UNIT);
    let owed = ctx.client.earned(&who);

    let unlock = ctx.client.get_lock(&who).unwrap().unlock_time;
    set_time(&e, unlock);
    ctx.client.withdraw(&who);

    assert_eq!(ctx.client.earned(&who), owed);
    assert_eq!(ctx.client.claim_reward(&who), owed);
}

#[test]
fn test_proceeds_without_lockers_are_unallocated() {
    let e = Env::default();
    let ctx = setup(&e);

    let out = convert_idle(&e, &ctx, UNIT);

    let funds = ctx.client.get_funds();
    assert_eq!(funds.unallocated, pool_share(out));
    assert_eq!(funds.total_rewarded, pool_share(out));
    assert_eq!(ctx.client.get_reward_state().reward_per_unit_stored, 0);

    // A later locker does not inherit them.
    let who = locker(&e, &ctx, UNIT, 4);
    assert_eq!(ctx.client.earned(&who), 0);
}

#[test]
fn test_claim_rejected_under_community_sweep() {
    let e = Env::default();
    let ctx = setup_with(&e, RewardPolicy::CommunitySweep, 5_000, 5_000);
    let who = locker(&e, &ctx, 1_000 * UNIT, 10);
    convert_idle(&e, &ctx, UNIT);

    assert_eq!(ctx.client.earned(&who), 0);
    assert_eq!(ctx.client.get_reward_state().reward_per_unit_stored, 0);
    assert_eq!(
        ctx.client.try_claim_reward(&who),
        Err(Ok(XoleError::PolicyMismatch))
    );
}
