//! Property-based tests for validation rule ordering.

use chrono::{NaiveDate, TimeZone, Utc};
use proptest::prelude::*;

use super::{Operation, Validate, ValidationContext};
use crate::domain::UserInput;
use crate::email::StandardEmailChecker;

fn email_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-z]{1,10}@[a-z]{1,10}\\.com",
        "[a-z]{0,10}",
        "[a-z]{1,5}@@[a-z]{1,5}",
    ]
}

fn profile_operation() -> impl Strategy<Value = Operation> {
    prop_oneof![
        Just(Operation::Create),
        Just(Operation::Update),
        Just(Operation::Default),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// A retirement age below the current age is reported on that field,
    /// whatever the email looks like.
    #[test]
    fn prop_retirement_before_age_reported_first(
        birth_year in 1930i32..2000,
        gap in 1i32..20,
        email in email_strategy(),
        operation in profile_operation(),
    ) {
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
        let age = 2024 - birth_year;
        let input = UserInput {
            full_name: "Someone".to_string(),
            date_of_birth: NaiveDate::from_ymd_opt(birth_year, 3, 1).unwrap(),
            email: format!("x{email}"),
            secret: "pw".to_string(),
            income: 1,
            retirement_age: (age - gap).max(1),
        };
        prop_assume!(input.retirement_age < age);

        let ctx = ValidationContext::new(now, &StandardEmailChecker);
        let err = input.validate(operation, &ctx).unwrap_err();
        prop_assert_eq!(err.field, "retirement age");
    }

    /// Login only looks at email and secret.
    #[test]
    fn prop_login_ignores_profile_fields(
        full_name in ".{0,12}",
        income in any::<i64>(),
        retirement_age in any::<i32>(),
        birth_year in 1900i32..2200,
    ) {
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
        let input = UserInput {
            full_name,
            date_of_birth: NaiveDate::from_ymd_opt(birth_year, 1, 1).unwrap(),
            email: "jane@example.com".to_string(),
            secret: "pw".to_string(),
            income,
            retirement_age,
        };

        let ctx = ValidationContext::new(now, &StandardEmailChecker);
        prop_assert!(input.validate(Operation::Login, &ctx).is_ok());
    }
}
