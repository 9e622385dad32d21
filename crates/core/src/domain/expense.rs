//! Recurring monthly expense entity.

use chrono::{DateTime, NaiveDate, Utc};
use nestegg_shared::types::{ExpenseId, UserId};
use serde::{Deserialize, Serialize};

use super::Touched;
use crate::store::{Column, Record, RecordKind, Value};

/// A stored recurring monthly expense.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyExpense {
    /// Identity assigned by storage.
    pub id: ExpenseId,
    /// Owning user.
    pub user_id: UserId,
    /// Reason (unique per user).
    pub reason: String,
    /// Monthly amount.
    pub amount: i64,
    /// Last month the expense recurs.
    pub end_date: NaiveDate,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Caller-supplied expense fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpenseInput {
    /// Owning user.
    pub user_id: UserId,
    /// Reason.
    pub reason: String,
    /// Monthly amount.
    pub amount: i64,
    /// Last month the expense recurs.
    pub end_date: NaiveDate,
}

impl ExpenseInput {
    /// Trims surrounding whitespace from the reason.
    #[must_use]
    pub fn normalized(mut self) -> Self {
        self.reason = self.reason.trim().to_string();
        self
    }
}

impl MonthlyExpense {
    /// Builds a new expense record stamped at `now`.
    #[must_use]
    pub fn prepare(input: &ExpenseInput, now: DateTime<Utc>) -> Self {
        Self {
            id: ExpenseId::UNASSIGNED,
            user_id: input.user_id,
            reason: input.reason.clone(),
            amount: input.amount,
            end_date: input.end_date,
            created_at: now,
            updated_at: now,
        }
    }

    /// Returns true while the expense still recurs on `today`.
    #[must_use]
    pub fn is_active(&self, today: NaiveDate) -> bool {
        today <= self.end_date
    }
}

impl Record for MonthlyExpense {
    const KIND: RecordKind = RecordKind::MonthlyExpense;
    const UNIQUE: &'static [&'static [Column]] = &[&[Column::UserId, Column::Reason]];

    type Changes = Touched;

    fn id(&self) -> u32 {
        self.id.into_inner()
    }

    fn assign_id(&mut self, id: u32) {
        self.id = ExpenseId::new(id);
    }

    fn value(&self, column: Column) -> Option<Value> {
        match column {
            Column::Id => Some(self.id.into()),
            Column::UserId => Some(self.user_id.into()),
            Column::Reason => Some(self.reason.as_str().into()),
            _ => None,
        }
    }

    fn apply(&mut self, changes: Touched) {
        self.updated_at = changes.updated_at;
    }
}
