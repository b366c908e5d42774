//! Withdrawal of the operations fund and the community pool.

use soroban_sdk::{panic_with_error, Address, Env};
use xole_errors::XoleError;

use crate::config::require_admin;
use crate::events;
use crate::math;
use crate::storage;
use crate::token_integration::transfer_from_contract;
use crate::types::RewardPolicy;

/// Pay the whole operations fund to the configured operations address.
pub fn withdraw_operations_fund(e: &Env, caller: &Address) -> Result<i128, XoleError> {
    caller.require_auth();
    let cfg = storage::get_config(e)?;
    if *caller != cfg.operations {
        return Err(XoleError::Unauthorized);
    }

    let mut funds = storage::get_funds(e);
    let amount = funds.operations_fund;
    if amount <= 0 {
        return Err(XoleError::NothingToWithdraw);
    }
    let share_token = storage::get_share_token(e).ok_or(XoleError::ShareTokenUnset)?;

    // CEI: clear state before transfer.
    funds.operations_fund = 0;
    storage::set_funds(e, &funds);

    transfer_from_contract(e, &share_token, &cfg.operations, amount);
    events::emit_operations_withdrawn(e, &cfg.operations, amount);
    Ok(amount)
}

/// Sweep the community pool to `recipient`.
///
/// Under `CommunitySweep` this is the whole unwithdrawn pool. Under
/// `ProRata` only proceeds that arrived while nothing was locked can leave
/// this way; the rest belongs to lockers.
pub fn withdraw_community_pool(
    e: &Env,
    admin: &Address,
    recipient: &Address,
) -> Result<i128, XoleError> {
    require_admin(e, admin)?;
    let cfg = storage::get_config(e)?;

    let mut funds = storage::get_funds(e);
    let amount = match cfg.policy {
        RewardPolicy::CommunitySweep => funds.reward_outstanding(),
        RewardPolicy::ProRata => funds.unallocated,
    };
    if amount <= 0 {
        return Err(XoleError::NothingToWithdraw);
    }
    let share_token = storage::get_share_token(e).ok_or(XoleError::ShareTokenUnset)?;

    funds.withdrawn_reward = math::add_i128(funds.withdrawn_reward, amount)?;
    funds.unallocated = 0;
    if funds.withdrawn_reward > funds.total_rewarded {
        panic_with_error!(e, XoleError::SolvencyViolation);
    }
    storage::set_funds(e, &funds);

    transfer_from_contract(e, &share_token, recipient, amount);
    events::emit_community_withdrawn(e, recipient, amount);
    Ok(amount)
}
