//! Property-based tests for projections.

use chrono::{Datelike, NaiveDate, TimeZone, Utc};
use proptest::prelude::*;
use rust_decimal::Decimal;

use super::{current_age, days_left_to_retirement, value_trajectory};

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Age depends on the calendar years alone.
    #[test]
    fn prop_age_is_year_difference(
        birth_year in 1900i32..2024,
        birth_ordinal in 1u32..=365,
        now_year in 2024i32..2100,
        now_month in 1u32..=12,
    ) {
        let birth = NaiveDate::from_yo_opt(birth_year, birth_ordinal).unwrap();
        let now = Utc.with_ymd_and_hms(now_year, now_month, 1, 0, 0, 0).unwrap();

        prop_assert_eq!(current_age(birth, now), now.year() - birth.year());
    }

    /// Days left stays within half a day of the exact product and keeps its sign.
    #[test]
    fn prop_days_left_close_to_exact(retirement in 0i32..120, age in 0i32..120) {
        let days = days_left_to_retirement(retirement, age);
        let exact = Decimal::from(retirement - age) * Decimal::new(36525, 2);
        let diff = (Decimal::from(days) - exact).abs();

        prop_assert!(diff <= Decimal::new(5, 1));
        prop_assert_eq!(days.signum(), i64::from((retirement - age).signum()));
    }

    /// Each additional year of retirement horizon adds 365 or 366 days.
    #[test]
    fn prop_days_left_monotonic(retirement in 1i32..120, age in 0i32..120) {
        let step = days_left_to_retirement(retirement, age)
            - days_left_to_retirement(retirement - 1, age);
        prop_assert!(step == 365 || step == 366);
    }

    /// Non-negative rates never shrink a positive principal.
    #[test]
    fn prop_trajectory_non_decreasing(
        principal in 1i64..10_000_000,
        rate_bp in 0i64..2_000,
        years in 0u32..40,
    ) {
        let rate = Decimal::new(rate_bp, 2);
        let trajectory = value_trajectory(principal, rate, years);

        prop_assert_eq!(trajectory.len(), years as usize + 1);
        prop_assert_eq!(trajectory[0], Decimal::from(principal));
        for pair in trajectory.windows(2) {
            prop_assert!(pair[1] >= pair[0]);
        }
    }
}
