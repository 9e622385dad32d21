//! Investment entity.

use chrono::{DateTime, NaiveDate, Utc};
use nestegg_shared::types::{AccountId, InvestmentId, UserId};
use serde::{Deserialize, Serialize};

use super::{InvestmentType, Touched};
use crate::store::{Column, Record, RecordKind, Value};

/// A stored investment held against an account.
///
/// Return and profit are recorded as supplied; nothing here derives them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Investment {
    /// Identity assigned by storage.
    pub id: InvestmentId,
    /// Owning user. Always the owner of `account_id`.
    pub user_id: UserId,
    /// Account the investment is held against.
    pub account_id: AccountId,
    /// Investment kind.
    #[serde(rename = "type")]
    pub kind: InvestmentType,
    /// Principal amount.
    pub amount: i64,
    /// Maturity date.
    pub end_date: NaiveDate,
    /// Total return to date.
    pub total_return: i64,
    /// Total profit to date.
    pub total_profit: i64,
    /// Free-text description.
    pub description: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Caller-supplied investment fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvestmentInput {
    /// Owning user.
    pub user_id: UserId,
    /// Account the investment is held against.
    pub account_id: AccountId,
    /// Investment kind.
    #[serde(rename = "type")]
    pub kind: InvestmentType,
    /// Principal amount.
    pub amount: i64,
    /// Maturity date.
    pub end_date: NaiveDate,
    /// Total return to date.
    pub total_return: i64,
    /// Total profit to date.
    pub total_profit: i64,
    /// Free-text description.
    #[serde(default)]
    pub description: String,
}

impl InvestmentInput {
    /// Trims surrounding whitespace from the description.
    #[must_use]
    pub fn normalized(mut self) -> Self {
        self.description = self.description.trim().to_string();
        self
    }
}

impl Investment {
    /// Builds a new investment record stamped at `now`.
    #[must_use]
    pub fn prepare(input: &InvestmentInput, now: DateTime<Utc>) -> Self {
        Self {
            id: InvestmentId::UNASSIGNED,
            user_id: input.user_id,
            account_id: input.account_id,
            kind: input.kind,
            amount: input.amount,
            end_date: input.end_date,
            total_return: input.total_return,
            total_profit: input.total_profit,
            description: input.description.clone(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Returns true once the maturity date has been reached.
    #[must_use]
    pub fn is_matured(&self, today: NaiveDate) -> bool {
        self.end_date <= today
    }
}

impl Record for Investment {
    const KIND: RecordKind = RecordKind::Investment;
    const UNIQUE: &'static [&'static [Column]] = &[];

    type Changes = Touched;

    fn id(&self) -> u32 {
        self.id.into_inner()
    }

    fn assign_id(&mut self, id: u32) {
        self.id = InvestmentId::new(id);
    }

    fn value(&self, column: Column) -> Option<Value> {
        match column {
            Column::Id => Some(self.id.into()),
            Column::UserId => Some(self.user_id.into()),
            Column::AccountId => Some(self.account_id.into()),
            _ => None,
        }
    }

    fn apply(&mut self, changes: Touched) {
        self.updated_at = changes.updated_at;
    }
}
