//! Validation rules per entity input.

use rust_decimal::Decimal;

use super::{Operation, Validate, ValidationContext, ValidationError};
use crate::domain::{AccountInput, BankInput, ExpenseInput, InvestmentInput, UserInput};
use crate::projection;

/// Retirement age must stay below this.
pub const MAX_RETIREMENT_AGE: i32 = 65;

const REQUIRED: &str = "required";
const MUST_BE_POSITIVE: &str = "must be positive";
const NOT_NEGATIVE: &str = "must not be negative";
const INVALID_FORMAT: &str = "invalid format";

impl Validate for UserInput {
    fn validate(
        &self,
        operation: Operation,
        ctx: &ValidationContext<'_>,
    ) -> Result<(), ValidationError> {
        match operation {
            Operation::Login => {
                if self.secret.is_empty() {
                    return Err(ValidationError::new("secret", REQUIRED));
                }
                if self.email.is_empty() {
                    return Err(ValidationError::new("email", REQUIRED));
                }
                if !ctx.email.is_valid_format(&self.email) {
                    return Err(ValidationError::new("email", INVALID_FORMAT));
                }
                Ok(())
            }
            Operation::Create | Operation::Update | Operation::Default => {
                if self.full_name.is_empty() {
                    return Err(ValidationError::new("full name", REQUIRED));
                }
                if self.date_of_birth > ctx.now.date_naive() {
                    return Err(ValidationError::new("birth date", "in the future"));
                }
                if self.secret.is_empty() {
                    return Err(ValidationError::new("secret", REQUIRED));
                }
                if self.email.is_empty() {
                    return Err(ValidationError::new("email", REQUIRED));
                }
                if self.income == 0 {
                    return Err(ValidationError::new("income", REQUIRED));
                }
                if self.income < 0 {
                    return Err(ValidationError::new("income", MUST_BE_POSITIVE));
                }

                let current_age = projection::current_age(self.date_of_birth, ctx.now);
                if self.retirement_age == 0 {
                    return Err(ValidationError::new("retirement age", REQUIRED));
                }
                if self.retirement_age < current_age {
                    return Err(ValidationError::new("retirement age", "below current age"));
                }
                if self.retirement_age >= MAX_RETIREMENT_AGE {
                    return Err(ValidationError::new("retirement age", "must be under 65"));
                }

                if !ctx.email.is_valid_format(&self.email) {
                    return Err(ValidationError::new("email", INVALID_FORMAT));
                }
                Ok(())
            }
        }
    }
}

impl Validate for AccountInput {
    fn validate(&self, _: Operation, _: &ValidationContext<'_>) -> Result<(), ValidationError> {
        if self.number.is_empty() {
            return Err(ValidationError::new("number", REQUIRED));
        }
        if !self.user_id.is_assigned() {
            return Err(ValidationError::new("user", REQUIRED));
        }
        if !self.bank_id.is_assigned() {
            return Err(ValidationError::new("bank", REQUIRED));
        }
        Ok(())
    }
}

impl Validate for BankInput {
    fn validate(&self, _: Operation, _: &ValidationContext<'_>) -> Result<(), ValidationError> {
        if !self.user_id.is_assigned() {
            return Err(ValidationError::new("user", REQUIRED));
        }
        if self.interest < Decimal::ZERO {
            return Err(ValidationError::new("interest", NOT_NEGATIVE));
        }
        if self.interest_on_fd < Decimal::ZERO {
            return Err(ValidationError::new("interest on fd", NOT_NEGATIVE));
        }
        if self.interest_on_rd < Decimal::ZERO {
            return Err(ValidationError::new("interest on rd", NOT_NEGATIVE));
        }
        Ok(())
    }
}

impl Validate for InvestmentInput {
    fn validate(&self, _: Operation, _: &ValidationContext<'_>) -> Result<(), ValidationError> {
        if !self.user_id.is_assigned() {
            return Err(ValidationError::new("user", REQUIRED));
        }
        if !self.account_id.is_assigned() {
            return Err(ValidationError::new("account", REQUIRED));
        }
        if self.amount <= 0 {
            return Err(ValidationError::new("amount", MUST_BE_POSITIVE));
        }
        Ok(())
    }
}

impl Validate for ExpenseInput {
    fn validate(&self, _: Operation, _: &ValidationContext<'_>) -> Result<(), ValidationError> {
        if self.reason.is_empty() {
            return Err(ValidationError::new("reason", REQUIRED));
        }
        if self.amount <= 0 {
            return Err(ValidationError::new("amount", MUST_BE_POSITIVE));
        }
        if !self.user_id.is_assigned() {
            return Err(ValidationError::new("user", REQUIRED));
        }
        Ok(())
    }
}
