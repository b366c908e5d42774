//! Overflow-safe arithmetic helpers for lock and reward calculations.
//!
//! All functions use checked arithmetic and return `XoleError::Overflow` on
//! overflow, underflow or division by zero.

use xole_errors::XoleError;

/// One week in seconds. Unlock times are aligned to this granularity.
pub const WEEK: u64 = 7 * 86_400;

/// Maximum lock horizon: four years.
pub const MAX_LOCK_TIME: u64 = 4 * 365 * 86_400;

/// Fixed-point scale of the reward-per-unit accumulator.
pub const REWARD_SCALE: i128 = 1_000_000_000_000_000_000;

/// Denominator of basis-point ratios.
pub const BPS_DENOMINATOR: u32 = 10_000;

#[inline]
pub fn add_i128(a: i128, b: i128) -> Result<i128, XoleError> {
    a.checked_add(b).ok_or(XoleError::Overflow)
}

#[inline]
pub fn sub_i128(a: i128, b: i128) -> Result<i128, XoleError> {
    a.checked_sub(b).ok_or(XoleError::Overflow)
}

#[inline]
pub fn mul_i128(a: i128, b: i128) -> Result<i128, XoleError> {
    a.checked_mul(b).ok_or(XoleError::Overflow)
}

#[inline]
pub fn div_i128(a: i128, b: i128) -> Result<i128, XoleError> {
    a.checked_div(b).ok_or(XoleError::Overflow)
}

/// `a * b / denominator`, flooring.
#[inline]
pub fn mul_div(a: i128, b: i128, denominator: i128) -> Result<i128, XoleError> {
    div_i128(mul_i128(a, b)?, denominator)
}

/// Basis-point share of an amount: `amount * bps / 10_000`.
#[inline]
pub fn bps(amount: i128, bps: u32) -> Result<i128, XoleError> {
    mul_div(amount, bps as i128, BPS_DENOMINATOR as i128)
}

/// Round a timestamp down to the enclosing week boundary.
#[inline]
#[must_use]
pub fn floor_week(t: u64) -> u64 {
    t / WEEK * WEEK
}

/// Scaled voting bias of `amount` locked until `unlock_time`, seen at `now`.
/// Zero once the lock has expired.
pub fn scaled_bias(amount: i128, unlock_time: u64, now: u64) -> Result<i128, XoleError> {
    if unlock_time <= now || amount <= 0 {
        return Ok(0);
    }
    mul_i128(amount, (unlock_time - now) as i128)
}

/// Unscale a stored bias into reported voting power.
#[inline]
#[must_use]
pub fn to_voting_power(scaled: i128) -> i128 {
    if scaled <= 0 {
        0
    } else {
        scaled / MAX_LOCK_TIME as i128
    }
}
