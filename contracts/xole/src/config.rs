//! Initialization and admin-gated configuration.

use soroban_sdk::{Address, Env};
use xole_errors::XoleError;

use crate::events;
use crate::math::BPS_DENOMINATOR;
use crate::storage;
use crate::types::{DataKey, DistributionConfig, RewardPolicy};

pub fn require_admin(e: &Env, admin: &Address) -> Result<(), XoleError> {
    admin.require_auth();
    let stored = storage::get_admin(e)?;
    if stored != *admin {
        return Err(XoleError::Unauthorized);
    }
    Ok(())
}

fn check_ratios(operations_bps: u32, pool_bps: u32) -> Result<(), XoleError> {
    match operations_bps.checked_add(pool_bps) {
        Some(total) if total <= BPS_DENOMINATOR => Ok(()),
        _ => Err(XoleError::InvalidRatio),
    }
}

#[allow(clippy::too_many_arguments)]
pub fn initialize(
    e: &Env,
    admin: &Address,
    lock_token: &Address,
    router: &Address,
    operations: &Address,
    operations_bps: u32,
    pool_bps: u32,
    policy: RewardPolicy,
) -> Result<(), XoleError> {
    if storage::is_initialized(e) {
        return Err(XoleError::AlreadyInitialized);
    }
    check_ratios(operations_bps, pool_bps)?;

    let instance = e.storage().instance();
    instance.set(&DataKey::Admin, admin);
    instance.set(&DataKey::LockToken, lock_token);
    instance.set(&DataKey::Router, router);
    storage::set_config(
        e,
        &DistributionConfig {
            operations: operations.clone(),
            operations_bps,
            pool_bps,
            policy,
        },
    );
    events::emit_config_updated(e, "initialized", admin);
    Ok(())
}

/// Designate the token conversions accrue in.
///
/// Refused while the operations fund or the reward pool still hold a balance
/// in a different, previously configured share token.
pub fn set_share_token(e: &Env, admin: &Address, token: &Address) -> Result<(), XoleError> {
    require_admin(e, admin)?;
    if let Some(current) = storage::get_share_token(e) {
        let funds = storage::get_funds(e);
        if current != *token && (funds.operations_fund > 0 || funds.reward_outstanding() > 0) {
            return Err(XoleError::FundsOutstanding);
        }
    }
    e.storage().instance().set(&DataKey::ShareToken, token);
    events::emit_config_updated(e, "share_token", admin);
    Ok(())
}

pub fn set_exchange_router(e: &Env, admin: &Address, router: &Address) -> Result<(), XoleError> {
    require_admin(e, admin)?;
    e.storage().instance().set(&DataKey::Router, router);
    events::emit_config_updated(e, "router", admin);
    Ok(())
}

pub fn set_operations(e: &Env, admin: &Address, operations: &Address) -> Result<(), XoleError> {
    require_admin(e, admin)?;
    let mut cfg = storage::get_config(e)?;
    cfg.operations = operations.clone();
    storage::set_config(e, &cfg);
    events::emit_config_updated(e, "operations", admin);
    Ok(())
}

pub fn set_fund_ratios(
    e: &Env,
    admin: &Address,
    operations_bps: u32,
    pool_bps: u32,
) -> Result<(), XoleError> {
    require_admin(e, admin)?;
    check_ratios(operations_bps, pool_bps)?;
    let mut cfg = storage::get_config(e)?;
    cfg.operations_bps = operations_bps;
    cfg.pool_bps = pool_bps;
    storage::set_config(e, &cfg);
    events::emit_config_updated(e, "fund_ratios", admin);
    Ok(())
}

pub fn set_admin(e: &Env, admin: &Address, new_admin: &Address) -> Result<(), XoleError> {
    require_admin(e, admin)?;
    e.storage().instance().set(&DataKey::Admin, new_admin);
    events::emit_config_updated(e, "admin", admin);
    Ok(())
}
