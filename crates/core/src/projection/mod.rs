//! Time-based derivations.
//!
//! Every function takes the reference instant (or an already-derived age)
//! explicitly; nothing here reads the wall clock. Day counts use decimal
//! arithmetic, never floats.

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

#[cfg(test)]
mod props;

/// Average days per year, including leap years.
#[must_use]
pub fn days_per_year() -> Decimal {
    Decimal::new(36525, 2)
}

/// Age in whole calendar years.
///
/// This is the year difference only: month and day are ignored, so someone
/// born in December counts a year older from January 1st.
#[must_use]
pub fn current_age(date_of_birth: NaiveDate, now: DateTime<Utc>) -> i32 {
    now.year() - date_of_birth.year()
}

/// Whole years until retirement. Negative once past retirement.
#[must_use]
pub fn years_to_retirement(retirement_age: i32, current_age: i32) -> i32 {
    retirement_age.saturating_sub(current_age)
}

/// Days until retirement: `round((retirement_age - current_age) * 365.25)`.
///
/// Halves round away from zero. Negative results mean the user is already
/// past retirement age and are returned as is.
#[must_use]
pub fn days_left_to_retirement(retirement_age: i32, current_age: i32) -> i64 {
    let years = i64::from(retirement_age) - i64::from(current_age);
    let days = Decimal::from(years) * days_per_year();

    // |years| < 2^33 and 365.25 < 2^9, so the rounded value fits in i64.
    days.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .unwrap_or_default()
}

/// Longest horizon, in years, a value trajectory covers.
pub const MAX_PROJECTION_YEARS: u32 = 100;

/// Yearly values of `principal` compounding at `annual_rate_percent`.
///
/// Element `y` is the value after `y` years, starting with the principal
/// itself, rounded to two decimal places. `years` is clamped to
/// [`MAX_PROJECTION_YEARS`]. The trajectory stops early if a value would
/// overflow.
#[must_use]
pub fn value_trajectory(principal: i64, annual_rate_percent: Decimal, years: u32) -> Vec<Decimal> {
    let years = years.min(MAX_PROJECTION_YEARS);
    let factor = Decimal::ONE + annual_rate_percent / Decimal::ONE_HUNDRED;
    let mut value = Decimal::from(principal);
    let mut trajectory = Vec::with_capacity(MAX_PROJECTION_YEARS as usize + 1);
    trajectory.push(value.round_dp(2));

    for _ in 0..years {
        match value.checked_mul(factor) {
            Some(next) => value = next,
            None => break,
        }
        trajectory.push(value.round_dp(2));
    }

    trajectory
}
