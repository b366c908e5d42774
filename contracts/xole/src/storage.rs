//! Storage accessors for xOLE state.
//!
//! | Key                              | Tier           |
//! |----------------------------------|----------------|
//! | config, funds, reward state      | `instance()`   |
//! | locks, reward snapshots          | `persistent()` |
//! | checkpoints, slope changes       | `persistent()` |
//!
//! Persistent entries are extended on every write and on every read. Entries
//! tied to a lock are kept alive until its unlock time plus `BUMP_TARGET`,
//! capped at the network maximum.

use soroban_sdk::{Address, Env, IntoVal, TryFromVal, Val};
use xole_errors::XoleError;

use crate::types::{DataKey, DistributionConfig, DistributionFunds, Lock, RewardState, UserReward};

/// Minimum ledger sequence TTL before a bump is requested (~1 day at 5 s/ledger).
const BUMP_THRESHOLD: u32 = 17_280;
/// Target TTL after a bump (~30 days).
const BUMP_TARGET: u32 = 518_400;
/// Instance storage is topped up whenever it has used a day of its target.
const INSTANCE_THRESHOLD: u32 = BUMP_TARGET - BUMP_THRESHOLD;
/// Nominal ledger close time.
const LEDGER_SECONDS: u64 = 5;

/// TTL in ledgers that keeps an entry alive until `until`, with `BUMP_TARGET`
/// of slack after it.
pub fn ttl_until(e: &Env, until: u64) -> u32 {
    let ledgers = until.saturating_sub(e.ledger().timestamp()) / LEDGER_SECONDS;
    let wanted = u32::try_from(ledgers)
        .unwrap_or(u32::MAX)
        .saturating_add(BUMP_TARGET);
    wanted.min(e.storage().max_ttl())
}

/// Extend an existing persistent entry so it lives until at least `until`.
pub fn extend_until(e: &Env, key: &DataKey, until: u64) {
    let persistent = e.storage().persistent();
    if persistent.has(key) {
        let ttl = ttl_until(e, until);
        persistent.extend_ttl(key, ttl, ttl);
    }
}

pub fn set_persistent<V>(e: &Env, key: &DataKey, value: &V)
where
    V: IntoVal<Env, Val>,
{
    e.storage().persistent().set(key, value);
    let target = BUMP_TARGET.min(e.storage().max_ttl());
    e.storage()
        .persistent()
        .extend_ttl(key, BUMP_THRESHOLD.min(target), target);
}

/// Write `value` and keep it alive until at least `until`.
pub fn set_persistent_until<V>(e: &Env, key: &DataKey, value: &V, until: u64)
where
    V: IntoVal<Env, Val>,
{
    e.storage().persistent().set(key, value);
    let ttl = ttl_until(e, until);
    e.storage().persistent().extend_ttl(key, ttl, ttl);
}

/// Read a persistent entry, extending it when it is close to archival.
pub fn get_persistent<V>(e: &Env, key: &DataKey) -> Option<V>
where
    V: TryFromVal<Env, Val>,
{
    let persistent = e.storage().persistent();
    let value = persistent.get(key);
    if value.is_some() {
        let target = BUMP_TARGET.min(e.storage().max_ttl());
        persistent.extend_ttl(key, BUMP_THRESHOLD.min(target), target);
    }
    value
}

/// Keeps config and the singletons alive alongside the persistent entries.
fn bump_instance(e: &Env) {
    let target = BUMP_TARGET.min(e.storage().max_ttl());
    e.storage()
        .instance()
        .extend_ttl(INSTANCE_THRESHOLD.min(target), target);
}

// ── Configuration ───────────────────────────────────────────────────────────

pub fn is_initialized(e: &Env) -> bool {
    e.storage().instance().has(&DataKey::Admin)
}

pub fn get_admin(e: &Env) -> Result<Address, XoleError> {
    e.storage()
        .instance()
        .get(&DataKey::Admin)
        .ok_or(XoleError::NotInitialized)
}

pub fn get_lock_token(e: &Env) -> Result<Address, XoleError> {
    e.storage()
        .instance()
        .get(&DataKey::LockToken)
        .ok_or(XoleError::NotInitialized)
}

pub fn get_share_token(e: &Env) -> Option<Address> {
    e.storage().instance().get(&DataKey::ShareToken)
}

pub fn get_router(e: &Env) -> Result<Address, XoleError> {
    e.storage()
        .instance()
        .get(&DataKey::Router)
        .ok_or(XoleError::NotInitialized)
}

pub fn get_config(e: &Env) -> Result<DistributionConfig, XoleError> {
    e.storage()
        .instance()
        .get(&DataKey::DistConfig)
        .ok_or(XoleError::NotInitialized)
}

pub fn set_config(e: &Env, cfg: &DistributionConfig) {
    e.storage().instance().set(&DataKey::DistConfig, cfg);
}

// ── Singletons ──────────────────────────────────────────────────────────────

pub fn get_funds(e: &Env) -> DistributionFunds {
    e.storage()
        .instance()
        .get(&DataKey::Funds)
        .unwrap_or_default()
}

pub fn set_funds(e: &Env, funds: &DistributionFunds) {
    e.storage().instance().set(&DataKey::Funds, funds);
    bump_instance(e);
}

pub fn get_reward_state(e: &Env) -> RewardState {
    e.storage()
        .instance()
        .get(&DataKey::Rewards)
        .unwrap_or_default()
}

pub fn set_reward_state(e: &Env, state: &RewardState) {
    e.storage().instance().set(&DataKey::Rewards, state);
    bump_instance(e);
}

// ── Per participant ─────────────────────────────────────────────────────────

pub fn get_lock(e: &Env, participant: &Address) -> Option<Lock> {
    get_persistent(e, &DataKey::Lock(participant.clone()))
}

/// Stores `lock` together with the participant's reward snapshot for as
/// long as the lock runs.
pub fn set_lock(e: &Env, participant: &Address, lock: &Lock) {
    set_persistent_until(e, &DataKey::Lock(participant.clone()), lock, lock.unlock_time);
    extend_until(e, &DataKey::UserReward(participant.clone()), lock.unlock_time);
}

pub fn remove_lock(e: &Env, participant: &Address) {
    e.storage()
        .persistent()
        .remove(&DataKey::Lock(participant.clone()));
}

/// Raw amount locked by `participant`, zero without a lock.
pub fn locked_amount(e: &Env, participant: &Address) -> i128 {
    get_lock(e, participant).map(|l| l.amount).unwrap_or(0)
}

pub fn get_user_reward(e: &Env, participant: &Address) -> UserReward {
    get_persistent(e, &DataKey::UserReward(participant.clone())).unwrap_or_default()
}

pub fn set_user_reward(e: &Env, participant: &Address, reward: &UserReward) {
    set_persistent(e, &DataKey::UserReward(participant.clone()), reward);
}
