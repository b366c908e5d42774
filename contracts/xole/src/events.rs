use soroban_sdk::{Address, Env, Symbol};

/// Emitted when a participant opens a lock.
///
/// # Topics
/// * `Symbol` - "lock_created"
/// * `Address` - The participant
///
/// # Data
/// * `i128` - Locked amount
/// * `u64` - Week-aligned unlock time
pub fn emit_lock_created(e: &Env, participant: &Address, amount: i128, unlock_time: u64) {
    let topics = (Symbol::new(e, "lock_created"), participant.clone());
    e.events().publish(topics, (amount, unlock_time));
}

/// Emitted when a lock's amount grows.
///
/// # Data
/// * `i128` - Added amount
/// * `i128` - New locked amount
pub fn emit_lock_increased(e: &Env, participant: &Address, added: i128, new_amount: i128) {
    let topics = (Symbol::new(e, "lock_increased"), participant.clone());
    e.events().publish(topics, (added, new_amount));
}

/// Emitted when a lock's unlock time moves later.
///
/// # Data
/// * `u64` - Previous unlock time
/// * `u64` - New unlock time
pub fn emit_lock_extended(e: &Env, participant: &Address, old_unlock: u64, new_unlock: u64) {
    let topics = (Symbol::new(e, "lock_extended"), participant.clone());
    e.events().publish(topics, (old_unlock, new_unlock));
}

pub fn emit_lock_withdrawn(e: &Env, participant: &Address, amount: i128) {
    let topics = (Symbol::new(e, "lock_withdrawn"), participant.clone());
    e.events().publish(topics, amount);
}

/// Emitted after a conversion has been split.
///
/// # Topics
/// * `Symbol` - "converted"
/// * `Address` - The token that was spent
///
/// # Data
/// * `i128` - Amount spent
/// * `i128` - Share token received
/// * `i128` - Added to the operations fund
/// * `i128` - Added to the reward pool
pub fn emit_converted(
    e: &Env,
    from_token: &Address,
    amount_in: i128,
    amount_out: i128,
    to_operations: i128,
    to_pool: i128,
) {
    let topics = (Symbol::new(e, "converted"), from_token.clone());
    e.events()
        .publish(topics, (amount_in, amount_out, to_operations, to_pool));
}

pub fn emit_reward_claimed(e: &Env, participant: &Address, amount: i128) {
    let topics = (Symbol::new(e, "reward_claimed"), participant.clone());
    e.events().publish(topics, amount);
}

pub fn emit_operations_withdrawn(e: &Env, recipient: &Address, amount: i128) {
    let topics = (Symbol::new(e, "operations_withdrawn"), recipient.clone());
    e.events().publish(topics, amount);
}

pub fn emit_community_withdrawn(e: &Env, recipient: &Address, amount: i128) {
    let topics = (Symbol::new(e, "community_withdrawn"), recipient.clone());
    e.events().publish(topics, amount);
}

/// Emitted by every admin setter.
///
/// # Topics
/// * `Symbol` - "config_updated"
/// * `Symbol` - Name of the changed setting
pub fn emit_config_updated(e: &Env, setting: &str, admin: &Address) {
    let topics = (Symbol::new(e, "config_updated"), Symbol::new(e, setting));
    e.events().publish(topics, admin.clone());
}
