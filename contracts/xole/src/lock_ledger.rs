//! Lock lifecycle: create, top up, extend, withdraw after expiry.
//!
//! Every mutation banks the participant's rewards first, then records the
//! old and new lock curves so the voting checkpoints stay consistent, and
//! finally adjusts the raw `total_locked` used for reward accrual.

use soroban_sdk::{Address, Env};
use xole_errors::XoleError;

use crate::checkpoints;
use crate::events;
use crate::math::{self, floor_week, MAX_LOCK_TIME, WEEK};
use crate::reward_accrual;
use crate::storage;
use crate::token_integration::{transfer_from_contract, transfer_into_contract};
use crate::types::Lock;

const NO_LOCK: Lock = Lock {
    amount: 0,
    unlock_time: 0,
};

fn horizon(now: u64) -> u64 {
    now.saturating_add(MAX_LOCK_TIME)
}

/// Loads a lock that exists and has not yet expired.
fn active_lock(e: &Env, participant: &Address) -> Result<Lock, XoleError> {
    let lock = storage::get_lock(e, participant).ok_or(XoleError::InvalidLockState)?;
    if lock.unlock_time <= e.ledger().timestamp() {
        return Err(XoleError::InvalidLockState);
    }
    Ok(lock)
}

fn adjust_total_locked(e: &Env, delta: i128) -> Result<i128, XoleError> {
    let mut state = storage::get_reward_state(e);
    state.total_locked = math::add_i128(state.total_locked, delta)?;
    if state.total_locked < 0 {
        return Err(XoleError::Overflow);
    }
    storage::set_reward_state(e, &state);
    Ok(state.total_locked)
}

pub fn create_lock(
    e: &Env,
    participant: &Address,
    amount: i128,
    unlock_time: u64,
) -> Result<Lock, XoleError> {
    if storage::get_lock(e, participant).is_some() {
        return Err(XoleError::InvalidLockState);
    }
    if amount <= 0 {
        return Err(XoleError::InvalidAmount);
    }
    let now = e.ledger().timestamp();
    let unlock_time = floor_week(unlock_time);
    if unlock_time <= now || unlock_time > horizon(now) {
        return Err(XoleError::InvalidDuration);
    }

    reward_accrual::sync(e, participant)?;
    let token = storage::get_lock_token(e)?;
    transfer_into_contract(e, &token, participant, amount)?;

    let lock = Lock {
        amount,
        unlock_time,
    };
    checkpoints::record(e, participant, &NO_LOCK, &lock)?;
    storage::set_lock(e, participant, &lock);
    adjust_total_locked(e, amount)?;

    events::emit_lock_created(e, participant, amount, unlock_time);
    Ok(lock)
}

pub fn increase_amount(e: &Env, participant: &Address, amount: i128) -> Result<Lock, XoleError> {
    let old = active_lock(e, participant)?;
    if amount <= 0 {
        return Err(XoleError::InvalidAmount);
    }

    reward_accrual::sync(e, participant)?;
    let token = storage::get_lock_token(e)?;
    transfer_into_contract(e, &token, participant, amount)?;

    let lock = Lock {
        amount: math::add_i128(old.amount, amount)?,
        unlock_time: old.unlock_time,
    };
    checkpoints::record(e, participant, &old, &lock)?;
    storage::set_lock(e, participant, &lock);
    adjust_total_locked(e, amount)?;

    events::emit_lock_increased(e, participant, amount, lock.amount);
    Ok(lock)
}

pub fn increase_unlock_time(
    e: &Env,
    participant: &Address,
    unlock_time: u64,
) -> Result<Lock, XoleError> {
    let old = active_lock(e, participant)?;
    let now = e.ledger().timestamp();
    if unlock_time % WEEK != 0 || unlock_time <= old.unlock_time || unlock_time > horizon(now) {
        return Err(XoleError::InvalidDuration);
    }

    let lock = Lock {
        amount: old.amount,
        unlock_time,
    };
    checkpoints::record(e, participant, &old, &lock)?;
    storage::set_lock(e, participant, &lock);

    events::emit_lock_extended(e, participant, old.unlock_time, unlock_time);
    Ok(lock)
}

/// Return the full amount of an expired lock to its owner.
pub fn withdraw(e: &Env, participant: &Address) -> Result<i128, XoleError> {
    let old = storage::get_lock(e, participant).ok_or(XoleError::InvalidLockState)?;
    if old.unlock_time > e.ledger().timestamp() {
        return Err(XoleError::InvalidLockState);
    }

    reward_accrual::sync(e, participant)?;
    checkpoints::record(e, participant, &old, &NO_LOCK)?;
    storage::remove_lock(e, participant);
    adjust_total_locked(e, -old.amount)?;

    let token = storage::get_lock_token(e)?;
    transfer_from_contract(e, &token, participant, old.amount);

    events::emit_lock_withdrawn(e, participant, old.amount);
    Ok(old.amount)
}

pub fn voting_power_at(e: &Env, participant: &Address, t: u64) -> Result<i128, XoleError> {
    Ok(math::to_voting_power(checkpoints::user_bias_at(
        e,
        participant,
        t,
    )?))
}

pub fn total_voting_power_at(e: &Env, t: u64) -> Result<i128, XoleError> {
    Ok(math::to_voting_power(checkpoints::total_bias_at(e, t)?))
}
