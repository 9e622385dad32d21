//! Bank entity.

use chrono::{DateTime, Utc};
use nestegg_shared::types::{BankId, UserId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{BankName, InvestmentType, Touched};
use crate::store::{Column, Record, RecordKind, Value};

/// A stored bank with its published rates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bank {
    /// Identity assigned by storage.
    pub id: BankId,
    /// Registering user.
    pub user_id: UserId,
    /// Bank name (unique).
    pub name: BankName,
    /// Savings interest rate, percent per year.
    pub interest: Decimal,
    /// Fixed deposit rate, percent per year.
    pub interest_on_fd: Decimal,
    /// Recurring deposit rate, percent per year.
    pub interest_on_rd: Decimal,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Caller-supplied bank fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BankInput {
    /// Registering user.
    pub user_id: UserId,
    /// Bank name.
    pub name: BankName,
    /// Savings interest rate.
    pub interest: Decimal,
    /// Fixed deposit rate.
    pub interest_on_fd: Decimal,
    /// Recurring deposit rate.
    pub interest_on_rd: Decimal,
}

impl Bank {
    /// Builds a new bank record stamped at `now`.
    #[must_use]
    pub fn prepare(input: &BankInput, now: DateTime<Utc>) -> Self {
        Self {
            id: BankId::UNASSIGNED,
            user_id: input.user_id,
            name: input.name,
            interest: input.interest,
            interest_on_fd: input.interest_on_fd,
            interest_on_rd: input.interest_on_rd,
            created_at: now,
            updated_at: now,
        }
    }

    /// Rate the bank pays on an investment of the given kind.
    ///
    /// Market-linked kinds have no bank rate.
    #[must_use]
    pub fn rate_for(&self, kind: InvestmentType) -> Option<Decimal> {
        match kind {
            InvestmentType::FixedDeposit => Some(self.interest_on_fd),
            InvestmentType::RecurringDeposit => Some(self.interest_on_rd),
            InvestmentType::Stock | InvestmentType::MutualFund => None,
        }
    }
}

impl Record for Bank {
    const KIND: RecordKind = RecordKind::Bank;
    const UNIQUE: &'static [&'static [Column]] = &[&[Column::Name]];

    type Changes = Touched;

    fn id(&self) -> u32 {
        self.id.into_inner()
    }

    fn assign_id(&mut self, id: u32) {
        self.id = BankId::new(id);
    }

    fn value(&self, column: Column) -> Option<Value> {
        match column {
            Column::Id => Some(self.id.into()),
            Column::UserId => Some(self.user_id.into()),
            Column::Name => Some(self.name.as_str().into()),
            _ => None,
        }
    }

    fn apply(&mut self, changes: Touched) {
        self.updated_at = changes.updated_at;
    }
}
