//! xOLE Contract
//!
//! Vote-escrow staking ledger with revenue conversion and distribution.
//! Participants lock the lock token until a week-aligned unlock time and
//! receive voting power that decays linearly to zero at unlock. Idle token
//! holdings are swapped into the share token through an external router and
//! the proceeds are split between an operations fund, a reward pool and an
//! untracked treasury remainder.
//!
//! ## Key design decisions
//!
//! - **Piecewise-linear checkpoints**: voting power at any time is derived
//!   from the nearest checkpoint plus scheduled slope changes, so aggregate
//!   queries never visit individual participants.
//! - **Exact decay**: curves are stored multiplied by `MAX_LOCK_TIME`; the
//!   only rounding is the final division when power is reported.
//! - **One reward policy per deployment**: pro-rata claims by lockers, or a
//!   single admin sweep of the whole pool. Chosen at `initialize`.
//! - **Balance-checked conversions**: the router's reported output is never
//!   trusted; the share-token balance delta is.
//! - **Typed errors**: every entry point returns `Result<_, XoleError>`;
//!   invariant breaches abort with `SolvencyViolation`.

#![no_std]

mod checkpoints;
mod config;
mod conversion;
mod events;
mod funds;
mod lock_ledger;
pub mod math;
mod reward_accrual;
mod route;
mod storage;
mod token_integration;
pub mod types;

pub use route::{ExchangeRouter, ExchangeRouterClient};
pub use types::{
    Checkpoint, DistributionConfig, DistributionFunds, Lock, RewardPolicy, RewardState,
    RouteKind, SwapRoute,
};
pub use xole_errors::XoleError;

use soroban_sdk::{contract, contractimpl, Address, Env};





#[cfg(test)]
mod test_reward_accrual;



#[cfg(test)]
mod test_math;

#[contract]
pub struct Xole;

#[contractimpl]
impl Xole {
    // ── Admin setup ────────────────────────────────────────────────────────

    /// One-time initialization.
    ///
    /// `operations_bps` and `pool_bps` are the shares of every conversion
    /// routed to the operations fund and to the reward pool; they may not
    /// exceed 10000 together. `policy` fixes how the pool is paid out.
    #[allow(clippy::too_many_arguments)]
    pub fn initialize(
        e: Env,
        admin: Address,
        lock_token: Address,
        router: Address,
        operations: Address,
        operations_bps: u32,
        pool_bps: u32,
        policy: RewardPolicy,
    ) -> Result<(), XoleError> {
        config::initialize(
            &e,
            &admin,
            &lock_token,
            &router,
            &operations,
            operations_bps,
            pool_bps,
            policy,
        )
    }

    /// Designate the share token. Must be set before any conversion.
    pub fn set_share_token(e: Env, admin: Address, token: Address) -> Result<(), XoleError> {
        config::set_share_token(&e, &admin, &token)
    }

    pub fn set_exchange_router(e: Env, admin: Address, router: Address) -> Result<(), XoleError> {
        config::set_exchange_router(&e, &admin, &router)
    }

    /// Change the fixed recipient of the operations fund.
    pub fn set_operations(e: Env, admin: Address, operations: Address) -> Result<(), XoleError> {
        config::set_operations(&e, &admin, &operations)
    }

    pub fn set_fund_ratios(
        e: Env,
        admin: Address,
        operations_bps: u32,
        pool_bps: u32,
    ) -> Result<(), XoleError> {
        config::set_fund_ratios(&e, &admin, operations_bps, pool_bps)
    }

    pub fn set_admin(e: Env, admin: Address, new_admin: Address) -> Result<(), XoleError> {
        config::set_admin(&e, &admin, &new_admin)
    }

    pub fn get_admin(e: Env) -> Result<Address, XoleError> {
        storage::get_admin(&e)
    }

    pub fn get_lock_token(e: Env) -> Result<Address, XoleError> {
        storage::get_lock_token(&e)
    }

    /// Returns `None` until `set_share_token` has been called.
    pub fn get_share_token(e: Env) -> Option<Address> {
        storage::get_share_token(&e)
    }

    pub fn get_exchange_router(e: Env) -> Result<Address, XoleError> {
        storage::get_router(&e)
    }

    pub fn get_distribution_config(e: Env) -> Result<DistributionConfig, XoleError> {
        storage::get_config(&e)
    }

    // ── Locks ──────────────────────────────────────────────────────────────

    /// Lock `amount` until `unlock_time`, rounded down to a week boundary.
    ///
    /// # Errors
    /// * `InvalidLockState` - `participant` already has a lock
    /// * `InvalidAmount` - `amount <= 0` or not approved
    /// * `InvalidDuration` - rounded unlock time is not in the future or is
    ///   more than four years away
    pub fn create_lock(
        e: Env,
        participant: Address,
        amount: i128,
        unlock_time: u64,
    ) -> Result<Lock, XoleError> {
        participant.require_auth();
        lock_ledger::create_lock(&e, &participant, amount, unlock_time)
    }

    /// Add `amount` to an active lock without changing its unlock time.
    pub fn increase_amount(e: Env, participant: Address, amount: i128) -> Result<Lock, XoleError> {
        participant.require_auth();
        lock_ledger::increase_amount(&e, &participant, amount)
    }

    /// Move an active lock's unlock time to a later week boundary.
    pub fn increase_unlock_time(
        e: Env,
        participant: Address,
        unlock_time: u64,
    ) -> Result<Lock, XoleError> {
        participant.require_auth();
        lock_ledger::increase_unlock_time(&e, &participant, unlock_time)
    }

    /// Withdraw an expired lock in full.
    pub fn withdraw(e: Env, participant: Address) -> Result<i128, XoleError> {
        participant.require_auth();
        lock_ledger::withdraw(&e, &participant)
    }

    pub fn get_lock(e: Env, participant: Address) -> Option<Lock> {
        storage::get_lock(&e, &participant)
    }

    /// Raw sum of all lock amounts.
    pub fn total_locked(e: Env) -> i128 {
        storage::get_reward_state(&e).total_locked
    }

    // ── Voting power ───────────────────────────────────────────────────────

    pub fn voting_power(e: Env, participant: Address) -> Result<i128, XoleError> {
        let now = e.ledger().timestamp();
        lock_ledger::voting_power_at(&e, &participant, now)
    }

    pub fn voting_power_at(e: Env, participant: Address, time: u64) -> Result<i128, XoleError> {
        lock_ledger::voting_power_at(&e, &participant, time)
    }

    pub fn total_voting_power(e: Env) -> Result<i128, XoleError> {
        let now = e.ledger().timestamp();
        lock_ledger::total_voting_power_at(&e, now)
    }

    pub fn total_voting_power_at(e: Env, time: u64) -> Result<i128, XoleError> {
        lock_ledger::total_voting_power_at(&e, time)
    }

    pub fn user_checkpoint_count(e: Env, participant: Address) -> u32 {
        checkpoints::user_point_count(&e, &participant)
    }

    pub fn user_checkpoint(e: Env, participant: Address, index: u32) -> Option<Checkpoint> {
        checkpoints::user_point(&e, &participant, index)
    }

    pub fn global_checkpoint_count(e: Env) -> u32 {
        checkpoints::global_point_count(&e)
    }

    pub fn global_checkpoint(e: Env, index: u32) -> Option<Checkpoint> {
        checkpoints::global_point(&e, index)
    }

    /// Scheduled slope delta at a week timestamp, scaled like checkpoints.
    pub fn slope_change(e: Env, timestamp: u64) -> i128 {
        checkpoints::slope_change(&e, timestamp)
    }

    // ── Rewards ────────────────────────────────────────────────────────────

    pub fn earned(e: Env, participant: Address) -> Result<i128, XoleError> {
        reward_accrual::earned(&e, &participant)
    }

    /// Accumulated reward per locked unit, scaled by `REWARD_SCALE`.
    pub fn reward_per_unit(e: Env) -> i128 {
        storage::get_reward_state(&e).reward_per_unit_stored
    }

    pub fn get_reward_state(e: Env) -> RewardState {
        storage::get_reward_state(&e)
    }

    /// Pay out the caller's accrued rewards (pro-rata policy only).
    pub fn claim_reward(e: Env, participant: Address) -> Result<i128, XoleError> {
        participant.require_auth();
        reward_accrual::claim(&e, &participant)
    }

    // ── Conversion ─────────────────────────────────────────────────────────

    /// Swap `amount_in` of an idle `from_token` into the share token along
    /// `route` and split the proceeds. Callable by anyone.
    ///
    /// # Errors
    /// * `ShareTokenUnset` - no share token configured
    /// * `InvalidAmount` - `amount_in <= 0` or above the shareable balance
    /// * `InvalidRoute` - route does not lead from `from_token` to the share token
    /// * `SlippageExceeded` - realized output below `min_amount_out`
    pub fn convert(
        e: Env,
        from_token: Address,
        route: SwapRoute,
        amount_in: i128,
        min_amount_out: i128,
    ) -> Result<i128, XoleError> {
        conversion::convert(&e, &from_token, &route, amount_in, min_amount_out)
    }

    /// Unencumbered balance of `token` available to `convert`.
    pub fn shareable_amount(e: Env, token: Address) -> Result<i128, XoleError> {
        conversion::shareable_amount(&e, &token)
    }

    // ── Funds ──────────────────────────────────────────────────────────────

    pub fn withdraw_operations_fund(e: Env, caller: Address) -> Result<i128, XoleError> {
        funds::withdraw_operations_fund(&e, &caller)
    }

    pub fn withdraw_community_pool(
        e: Env,
        admin: Address,
        recipient: Address,
    ) -> Result<i128, XoleError> {
        funds::withdraw_community_pool(&e, &admin, &recipient)
    }

    pub fn get_funds(e: Env) -> DistributionFunds {
        storage::get_funds(&e)
    }
}
