//! Reward-per-unit-locked accumulator.
//!
//! `reward_per_unit_stored` grows by `amount * REWARD_SCALE / total_locked`
//! whenever proceeds are distributed. Each participant banks
//! `locked * (stored - paid) / REWARD_SCALE` into `accrued` before anything
//! changes their locked amount or the total.

use soroban_sdk::{panic_with_error, Address, Env};
use xole_errors::XoleError;

use crate::events;
use crate::math::{self, REWARD_SCALE};
use crate::storage;
use crate::token_integration::transfer_from_contract;
use crate::types::{RewardPolicy, UserReward};

fn pending(e: &Env, participant: &Address, snapshot: &UserReward) -> Result<i128, XoleError> {
    let stored = storage::get_reward_state(e).reward_per_unit_stored;
    let delta = math::sub_i128(stored, snapshot.reward_per_unit_paid)?;
    if delta == 0 {
        return Ok(0);
    }
    math::mul_div(storage::locked_amount(e, participant), delta, REWARD_SCALE)
}

/// Claimable rewards of `participant`, banked plus pending.
pub fn earned(e: &Env, participant: &Address) -> Result<i128, XoleError> {
    let snapshot = storage::get_user_reward(e, participant);
    math::add_i128(snapshot.accrued, pending(e, participant, &snapshot)?)
}

/// Bank pending rewards under the participant's current locked amount.
pub fn sync(e: &Env, participant: &Address) -> Result<UserReward, XoleError> {
    let mut snapshot = storage::get_user_reward(e, participant);
    snapshot.accrued = math::add_i128(snapshot.accrued, pending(e, participant, &snapshot)?)?;
    snapshot.reward_per_unit_paid = storage::get_reward_state(e).reward_per_unit_stored;
    storage::set_user_reward(e, participant, &snapshot);
    Ok(snapshot)
}

/// Spread `amount` over everything currently locked.
///
/// Returns `false` without touching the accumulator when nothing is locked;
/// the caller decides where those proceeds go.
pub fn distribute(e: &Env, amount: i128) -> Result<bool, XoleError> {
    let mut state = storage::get_reward_state(e);
    if state.total_locked == 0 {
        return Ok(false);
    }
    if amount > 0 {
        let per_unit = math::mul_div(amount, REWARD_SCALE, state.total_locked)?;
        state.reward_per_unit_stored = math::add_i128(state.reward_per_unit_stored, per_unit)?;
    }
    state.last_update_time = e.ledger().timestamp();
    storage::set_reward_state(e, &state);
    Ok(true)
}

/// Pay out everything `participant` has accrued.
pub fn claim(e: &Env, participant: &Address) -> Result<i128, XoleError> {
    let cfg = storage::get_config(e)?;
    if cfg.policy != RewardPolicy::ProRata {
        return Err(XoleError::PolicyMismatch);
    }
    let share_token = storage::get_share_token(e).ok_or(XoleError::ShareTokenUnset)?;

    let mut snapshot = sync(e, participant)?;
    let payout = snapshot.accrued;
    if payout <= 0 {
        return Err(XoleError::NothingToWithdraw);
    }

    let mut funds = storage::get_funds(e);
    let withdrawn = math::add_i128(funds.withdrawn_reward, payout)?;
    if withdrawn > funds.total_rewarded {
        panic_with_error!(e, XoleError::SolvencyViolation);
    }
    funds.withdrawn_reward = withdrawn;
    storage::set_funds(e, &funds);

    snapshot.accrued = 0;
    storage::set_user_reward(e, participant, &snapshot);

    transfer_from_contract(e, &share_token, participant, payout);
    events::emit_reward_claimed(e, participant, payout);
    Ok(payout)
}
