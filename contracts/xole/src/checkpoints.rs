//! Voting power checkpoints.
//!
//! Each participant has an append-only sequence of `Checkpoint`s and the
//! contract keeps one global sequence. Lock expiries are scheduled as slope
//! deltas keyed by week timestamp, so the aggregate curve can be advanced to
//! any time by walking weeks from the nearest checkpoint instead of visiting
//! every participant.

use soroban_sdk::{Address, Env};
use xole_errors::XoleError;

use crate::math::{self, floor_week, scaled_bias, MAX_LOCK_TIME, WEEK};
use crate::storage::{extend_until, get_persistent, set_persistent_until};
use crate::types::{Checkpoint, DataKey, Lock};

/// Upper bound on weeks walked by `advance`. Every lock active at a
/// checkpoint expires within `MAX_LOCK_TIME` (< 209 weeks) of it.
const MAX_WEEK_STEPS: u32 = 256;

// ── Raw access ──────────────────────────────────────────────────────────────

#[must_use]
pub fn user_point_count(e: &Env, participant: &Address) -> u32 {
    get_persistent(e, &DataKey::UserPointCount(participant.clone())).unwrap_or(0)
}

#[must_use]
pub fn user_point(e: &Env, participant: &Address, index: u32) -> Option<Checkpoint> {
    get_persistent(e, &DataKey::UserPoint(participant.clone(), index))
}

#[must_use]
pub fn global_point_count(e: &Env) -> u32 {
    get_persistent(e, &DataKey::GlobalPointCount).unwrap_or(0)
}

#[must_use]
pub fn global_point(e: &Env, index: u32) -> Option<Checkpoint> {
    get_persistent(e, &DataKey::GlobalPoint(index))
}

/// Scheduled slope delta (zero or negative) at `timestamp`.
#[must_use]
pub fn slope_change(e: &Env, timestamp: u64) -> i128 {
    get_persistent(e, &DataKey::SlopeChange(timestamp)).unwrap_or(0)
}

/// A slope change must outlive the week it is applied at.
fn set_slope_change(e: &Env, timestamp: u64, delta: i128) {
    set_persistent_until(e, &DataKey::SlopeChange(timestamp), &delta, timestamp);
}

/// Append `point`, keeping the sequence alive until `until`.
fn push_user_point(e: &Env, participant: &Address, point: &Checkpoint, until: u64) {
    let count = user_point_count(e, participant);
    let count_key = DataKey::UserPointCount(participant.clone());
    // Same-timestamp writes merge into the latest entry.
    if count > 0 {
        if let Some(last) = user_point(e, participant, count - 1) {
            if last.timestamp == point.timestamp {
                let key = DataKey::UserPoint(participant.clone(), count - 1);
                set_persistent_until(e, &key, point, until);
                extend_until(e, &count_key, until);
                return;
            }
        }
    }
    let key = DataKey::UserPoint(participant.clone(), count);
    set_persistent_until(e, &key, point, until);
    set_persistent_until(e, &count_key, &(count + 1), until);
}

fn push_global_point(e: &Env, point: &Checkpoint, until: u64) {
    let count = global_point_count(e);
    if count > 0 {
        if let Some(last) = global_point(e, count - 1) {
            if last.timestamp == point.timestamp {
                set_persistent_until(e, &DataKey::GlobalPoint(count - 1), point, until);
                extend_until(e, &DataKey::GlobalPointCount, until);
                return;
            }
        }
    }
    set_persistent_until(e, &DataKey::GlobalPoint(count), point, until);
    set_persistent_until(e, &DataKey::GlobalPointCount, &(count + 1), until);
}

// ── Lookup ──────────────────────────────────────────────────────────────────

/// Latest checkpoint with `timestamp <= t` in a sequence of `count` entries
/// ordered by strictly increasing timestamp.
fn search<F>(count: u32, t: u64, load: F) -> Option<Checkpoint>
where
    F: Fn(u32) -> Option<Checkpoint>,
{
    if count == 0 {
        return None;
    }
    if load(0)?.timestamp > t {
        return None;
    }
    let (mut lo, mut hi) = (0_u32, count - 1);
    while lo < hi {
        let mid = lo + (hi - lo + 1) / 2;
        match load(mid) {
            Some(p) if p.timestamp <= t => lo = mid,
            _ => hi = mid - 1,
        }
    }
    load(lo)
}

#[must_use]
pub fn find_user_point(e: &Env, participant: &Address, t: u64) -> Option<Checkpoint> {
    search(user_point_count(e, participant), t, |i| {
        user_point(e, participant, i)
    })
}

#[must_use]
pub fn find_global_point(e: &Env, t: u64) -> Option<Checkpoint> {
    search(global_point_count(e), t, |i| global_point(e, i))
}

/// Move an aggregate checkpoint forward to `t`, applying every scheduled
/// slope change at the week boundaries in `(point.timestamp, t]`.
pub fn advance(e: &Env, mut point: Checkpoint, t: u64) -> Result<Checkpoint, XoleError> {
    if t <= point.timestamp {
        return Ok(point);
    }
    let mut week = floor_week(point.timestamp);
    for _ in 0..MAX_WEEK_STEPS {
        week = week.saturating_add(WEEK);
        let (step_to, d_slope) = if week > t {
            (t, 0)
        } else {
            (week, slope_change(e, week))
        };
        let elapsed = (step_to - point.timestamp) as i128;
        let decay = math::mul_i128(point.slope, elapsed)?;
        point.bias = math::sub_i128(point.bias, decay)?.max(0);
        point.slope = math::add_i128(point.slope, d_slope)?.max(0);
        point.timestamp = step_to;
        if step_to == t {
            return Ok(point);
        }
    }
    // Every lock seen by the starting checkpoint has expired by now.
    Ok(Checkpoint {
        timestamp: t,
        bias: 0,
        slope: 0,
    })
}

/// Scaled voting bias of `participant` at `t`.
pub fn user_bias_at(e: &Env, participant: &Address, t: u64) -> Result<i128, XoleError> {
    match find_user_point(e, participant, t) {
        None => Ok(0),
        Some(p) => {
            let decay = math::mul_i128(p.slope, (t - p.timestamp) as i128)?;
            Ok(math::sub_i128(p.bias, decay)?.max(0))
        }
    }
}

/// Scaled aggregate voting bias at `t`.
pub fn total_bias_at(e: &Env, t: u64) -> Result<i128, XoleError> {
    match find_global_point(e, t) {
        None => Ok(0),
        Some(p) => Ok(advance(e, p, t)?.bias),
    }
}

// ── Update ──────────────────────────────────────────────────────────────────

/// Scaled curve of a lock as seen at `now`.
fn curve_of(lock: &Lock, now: u64) -> Result<Checkpoint, XoleError> {
    let active = lock.amount > 0 && lock.unlock_time > now;
    Ok(Checkpoint {
        timestamp: now,
        bias: scaled_bias(lock.amount, lock.unlock_time, now)?,
        slope: if active { lock.amount } else { 0 },
    })
}

/// Record a change of `participant`'s lock from `old` to `new`.
///
/// Pass `Lock { amount: 0, unlock_time: 0 }` for a missing lock on either
/// side. Writes the participant checkpoint, brings the global checkpoint to
/// now with the participant's delta applied, and moves the scheduled slope
/// removals.
pub fn record(e: &Env, participant: &Address, old: &Lock, new: &Lock) -> Result<(), XoleError> {
    let now = e.ledger().timestamp();
    let u_old = curve_of(old, now)?;
    let u_new = curve_of(new, now)?;

    let mut old_dslope = if old.unlock_time > now {
        slope_change(e, old.unlock_time)
    } else {
        0
    };
    let mut new_dslope = if new.unlock_time > now {
        if new.unlock_time == old.unlock_time {
            old_dslope
        } else {
            slope_change(e, new.unlock_time)
        }
    } else {
        0
    };

    let last = match global_point_count(e) {
        0 => None,
        n => global_point(e, n - 1),
    };
    let mut global = advance(
        e,
        last.unwrap_or(Checkpoint {
            timestamp: now,
            bias: 0,
            slope: 0,
        }),
        now,
    )?;
    global.bias = math::add_i128(global.bias, math::sub_i128(u_new.bias, u_old.bias)?)?.max(0);
    global.slope = math::add_i128(global.slope, math::sub_i128(u_new.slope, u_old.slope)?)?.max(0);
    // Any lock that can still change the aggregate ends within MAX_LOCK_TIME.
    push_global_point(e, &global, now.saturating_add(MAX_LOCK_TIME));

    if old.unlock_time > now {
        old_dslope = math::add_i128(old_dslope, u_old.slope)?;
        if new.unlock_time == old.unlock_time {
            old_dslope = math::sub_i128(old_dslope, u_new.slope)?;
        }
        set_slope_change(e, old.unlock_time, old_dslope);
    }
    if new.unlock_time > now && new.unlock_time != old.unlock_time {
        new_dslope = math::sub_i128(new_dslope, u_new.slope)?;
        set_slope_change(e, new.unlock_time, new_dslope);
    }

    push_user_point(e, participant, &u_new, new.unlock_time.max(old.unlock_time));
    Ok(())
}
