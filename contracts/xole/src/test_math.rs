#![cfg(test)]

use crate::math::*;
use crate::XoleError;

#[test]
fn test_floor_week() {
    assert_eq!(floor_week(0), 0);
    assert_eq!(floor_week(WEEK - 1), 0);
    assert_eq!(floor_week(WEEK), WEEK);
    assert_eq!(floor_week(3 * WEEK + 12_345), 3 * WEEK);
}

#[test]
fn test_scaled_bias() {
    assert_eq!(scaled_bias(100, 1_000, 400), Ok(60_000));
    assert_eq!(scaled_bias(100, 1_000, 1_000), Ok(0));
    assert_eq!(scaled_bias(100, 1_000, 2_000), Ok(0));
    assert_eq!(scaled_bias(0, 1_000, 0), Ok(0));
    assert_eq!(
        scaled_bias(i128::MAX, MAX_LOCK_TIME, 0),
        Err(XoleError::Overflow)
    );
}

#[test]
fn test_full_length_lock_gives_full_power() {
    let amount = 5_000;
    let bias = scaled_bias(amount, MAX_LOCK_TIME, 0).unwrap();
    assert_eq!(to_voting_power(bias), amount);

    let half = scaled_bias(amount, MAX_LOCK_TIME, MAX_LOCK_TIME / 2).unwrap();
    assert_eq!(to_voting_power(half), amount / 2);
}

#[test]
fn test_to_voting_power_floors_and_clamps() {
    assert_eq!(to_voting_power(MAX_LOCK_TIME as i128 - 1), 0);
    assert_eq!(to_voting_power(2 * MAX_LOCK_TIME as i128 + 7), 2);
    assert_eq!(to_voting_power(-10), 0);
}

#[test]
fn test_bps() {
    assert_eq!(bps(10_000, 5_000), Ok(5_000));
    assert_eq!(bps(9_999, 5_000), Ok(4_999));
    assert_eq!(bps(1, 1), Ok(0));
    assert_eq!(bps(i128::MAX, 2), Err(XoleError::Overflow));
}

#[test]
fn test_checked_helpers() {
    assert_eq!(add_i128(i128::MAX, 1), Err(XoleError::Overflow));
    assert_eq!(sub_i128(i128::MIN, 1), Err(XoleError::Overflow));
    assert_eq!(mul_i128(i128::MAX, 2), Err(XoleError::Overflow));
    assert_eq!(div_i128(1, 0), Err(XoleError::Overflow));
    assert_eq!(mul_div(7, 3, 2), Ok(10));
}
