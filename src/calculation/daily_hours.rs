//! Daily worked-hours calculation.
//!
//! Turns one day's clock-in/out times and unpaid lunch break into worked
//! hours. Shifts whose clock-out time of day is earlier than clock-in are
//! treated as running past midnight.

use chrono::NaiveTime;
use rust_decimal::Decimal;

const SECONDS_PER_DAY: i64 = 24 * 60 * 60;
const SECONDS_PER_HOUR: i64 = 60 * 60;

/// Calculates worked hours for a single timesheet entry.
///
/// - Raw duration is `time_out - time_in`; a negative duration is an
///   overnight shift and gets 24 hours added.
/// - `lunch_minutes / 60` is subtracted.
/// - The result never goes below zero. No upper bound is applied.
///
/// The arithmetic is done in whole seconds and divided once, so for a
/// same-day shift the result equals `(time_out - time_in) - lunch/60`
/// exactly.
///
/// # Examples
///
/// ## Overnight shift
///
/// ```
/// use warehouse_labor::calculation::compute_daily_hours;
/// use chrono::NaiveTime;
/// use rust_decimal::Decimal;
///
/// let hours = compute_daily_hours(
///     NaiveTime::from_hms_opt(22, 0, 0).unwrap(),
///     NaiveTime::from_hms_opt(6, 0, 0).unwrap(),
///     30,
/// );
/// assert_eq!(hours, Decimal::new(75, 1)); // 7.5
/// ```
///
/// ## Lunch longer than the shift
///
/// ```
/// use warehouse_labor::calculation::compute_daily_hours;
/// use chrono::NaiveTime;
/// use rust_decimal::Decimal;
///
/// let hours = compute_daily_hours(
///     NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
///     NaiveTime::from_hms_opt(9, 15, 0).unwrap(),
///     30,
/// );
/// assert_eq!(hours, Decimal::ZERO);
/// ```
pub fn compute_daily_hours(time_in: NaiveTime, time_out: NaiveTime, lunch_minutes: u32) -> Decimal {
    let mut shift_seconds = (time_out - time_in).num_seconds();
    if shift_seconds < 0 {
        shift_seconds += SECONDS_PER_DAY;
    }

    let worked_seconds = shift_seconds - i64::from(lunch_minutes) * 60;
    if worked_seconds <= 0 {
        return Decimal::ZERO;
    }

    Decimal::from(worked_seconds) / Decimal::from(SECONDS_PER_HOUR)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn test_day_shift_with_default_lunch() {
        assert_eq!(compute_daily_hours(time(8, 0), time(16, 30), 30), dec("8"));
    }

    #[test]
    fn test_overnight_shift() {
        assert_eq!(compute_daily_hours(time(22, 0), time(6, 0), 30), dec("7.5"));
    }

    #[test]
    fn test_lunch_longer_than_shift_clamps_to_zero() {
        assert_eq!(compute_daily_hours(time(9, 0), time(9, 15), 30), Decimal::ZERO);
    }

    #[test]
    fn test_lunch_equal_to_shift_is_zero() {
        assert_eq!(compute_daily_hours(time(9, 0), time(9, 30), 30), Decimal::ZERO);
    }

    #[test]
    fn test_zero_duration_shift_is_zero() {
        assert_eq!(compute_daily_hours(time(9, 0), time(9, 0), 0), Decimal::ZERO);
    }

    #[test]
    fn test_no_lunch() {
        assert_eq!(compute_daily_hours(time(6, 0), time(14, 45), 0), dec("8.75"));
    }

    #[test]
    fn test_no_upper_bound() {
        // 05:00 to 04:00 the next day is 23 hours
        assert_eq!(compute_daily_hours(time(5, 0), time(4, 0), 0), dec("23"));
    }

    #[test]
    fn test_twenty_minute_remainder() {
        let hours = compute_daily_hours(time(8, 0), time(15, 50), 30);
        // 7h50m - 30m = 7h20m
        assert!((hours - dec("7.3333333333")).abs() < dec("0.0000000001"));
    }

    proptest! {
        #[test]
        fn prop_same_day_identity(
            start in 0u32..(23 * 60),
            length in 1u32..(6 * 60),
            lunch_fraction in 0u32..=100,
        ) {
            let end = (start + length).min(23 * 60 + 59);
            let shift_minutes = end - start;
            let lunch = shift_minutes * lunch_fraction / 100;
            let time_in = time(start / 60, start % 60);
            let time_out = time(end / 60, end % 60);

            let hours = compute_daily_hours(time_in, time_out, lunch);
            let expected = Decimal::from(shift_minutes) / Decimal::from(60)
                - Decimal::from(lunch) / Decimal::from(60);

            prop_assert!((hours - expected).abs() < dec("0.000000000000000001"));
        }

        #[test]
        fn prop_never_negative(
            start in 0u32..(24 * 60),
            end in 0u32..(24 * 60),
            lunch in 0u32..2000,
        ) {
            let hours = compute_daily_hours(
                time(start / 60, start % 60),
                time(end / 60, end % 60),
                lunch,
            );
            prop_assert!(hours >= Decimal::ZERO);
            prop_assert!(hours < dec("24"));
        }
    }
}
