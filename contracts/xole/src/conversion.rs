//! Conversion of idle holdings into the share token.
//!
//! Proceeds are split between the operations fund, the reward pool and an
//! untracked treasury remainder. Only unencumbered balances can be spent and
//! the realized output is measured from the contract's own share-token
//! balance, never taken from the router's return value.

use soroban_sdk::{panic_with_error, Address, Env};
use xole_errors::XoleError;

use crate::events;
use crate::math;
use crate::reward_accrual;
use crate::route::{self, ExchangeRouterClient};
use crate::storage;
use crate::token_integration::{held_balance, transfer_from_contract};
use crate::types::{DataKey, RewardPolicy, SwapRoute};

/// Part of the contract's `token` balance owed to lockers or funds.
fn encumbered(e: &Env, token: &Address) -> Result<i128, XoleError> {
    let mut owed = 0_i128;
    if *token == storage::get_lock_token(e)? {
        owed = math::add_i128(owed, storage::get_reward_state(e).total_locked)?;
    }
    if storage::get_share_token(e).as_ref() == Some(token) {
        let funds = storage::get_funds(e);
        owed = math::add_i128(owed, funds.operations_fund)?;
        owed = math::add_i128(owed, funds.reward_outstanding())?;
    }
    Ok(owed)
}

/// Balance of `token` that `convert` may spend.
pub fn shareable_amount(e: &Env, token: &Address) -> Result<i128, XoleError> {
    let free = math::sub_i128(held_balance(e, token), encumbered(e, token)?)?;
    Ok(free.max(0))
}

pub(crate) fn enter(e: &Env) -> Result<(), XoleError> {
    let busy: bool = e
        .storage()
        .instance()
        .get(&DataKey::Converting)
        .unwrap_or(false);
    if busy {
        return Err(XoleError::ReentrancyDetected);
    }
    e.storage().instance().set(&DataKey::Converting, &true);
    Ok(())
}

pub(crate) fn exit(e: &Env) {
    e.storage().instance().set(&DataKey::Converting, &false);
}

/// Swap `amount_in` of `from_token` along `route` and book the proceeds.
/// Returns the realized share-token output.
pub fn convert(
    e: &Env,
    from_token: &Address,
    route: &SwapRoute,
    amount_in: i128,
    min_amount_out: i128,
) -> Result<i128, XoleError> {
    let share_token = storage::get_share_token(e).ok_or(XoleError::ShareTokenUnset)?;
    if amount_in <= 0 || min_amount_out < 0 {
        return Err(XoleError::InvalidAmount);
    }
    route::validate(route, from_token, &share_token)?;
    if amount_in > shareable_amount(e, from_token)? {
        return Err(XoleError::InvalidAmount);
    }

    let amount_out = if route::is_identity(route, &share_token) {
        amount_in
    } else {
        enter(e)?;
        let router = storage::get_router(e)?;
        let before = held_balance(e, &share_token);
        transfer_from_contract(e, from_token, &router, amount_in);
        let swapped = ExchangeRouterClient::new(e, &router).try_swap(
            &route::encode(e, route),
            &amount_in,
            &min_amount_out,
            &e.current_contract_address(),
        );
        exit(e);
        // A failed swap reverts with the rest of the invocation.
        if !matches!(swapped, Ok(Ok(_))) {
            return Err(XoleError::SlippageExceeded);
        }
        math::sub_i128(held_balance(e, &share_token), before)?
    };
    if amount_out <= 0 || amount_out < min_amount_out {
        return Err(XoleError::SlippageExceeded);
    }

    let cfg = storage::get_config(e)?;
    let to_operations = math::bps(amount_out, cfg.operations_bps)?;
    let to_pool = math::bps(amount_out, cfg.pool_bps)?;
    // A configured share must not round away to nothing.
    if (cfg.operations_bps > 0 && to_operations == 0) || (cfg.pool_bps > 0 && to_pool == 0) {
        return Err(XoleError::SlippageExceeded);
    }

    let mut funds = storage::get_funds(e);
    funds.operations_fund = math::add_i128(funds.operations_fund, to_operations)?;
    funds.total_rewarded = math::add_i128(funds.total_rewarded, to_pool)?;
    if cfg.policy == RewardPolicy::ProRata && !reward_accrual::distribute(e, to_pool)? {
        funds.unallocated = math::add_i128(funds.unallocated, to_pool)?;
    }
    storage::set_funds(e, &funds);

    // Everything withdrawable must still be backed by the held balance.
    let owed = encumbered(e, &share_token)?;
    if held_balance(e, &share_token) < owed {
        panic_with_error!(e, XoleError::SolvencyViolation);
    }

    events::emit_converted(e, from_token, amount_in, amount_out, to_operations, to_pool);
    Ok(amount_out)
}
