//! Transaction domain model

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::month::MonthKey;
use crate::domain::result::{Error, Result};
use crate::domain::user::UserId;

/// Direction of a ledger entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    Income,
    Expense,
}

impl EntryKind {
    /// The discriminant value as stored in documents
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single income or expense entry in the ledger
///
/// Belongs to exactly one user and one funding source. `account_id` may
/// reference either a bank account or a card; the name is kept for
/// compatibility with the stored document schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: Uuid,
    pub user_id: UserId,
    pub account_id: Uuid,
    #[serde(rename = "type")]
    pub kind: EntryKind,
    pub description: String,
    /// Always stored positive; sign is implied by `kind`
    pub amount: Decimal,
    pub category: String,
    /// Calendar day, no time component
    pub date: NaiveDate,
    #[serde(default)]
    pub notes: String,
    pub created_at: DateTime<Utc>,
}

impl Transaction {
    pub fn new(
        user_id: UserId,
        account_id: Uuid,
        kind: EntryKind,
        description: impl Into<String>,
        amount: Decimal,
        category: impl Into<String>,
        date: NaiveDate,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            account_id,
            kind,
            description: description.into(),
            amount,
            category: category.into(),
            date,
            notes: String::new(),
            created_at: Utc::now(),
        }
    }

    /// The entry's contribution to a net balance: income adds, expense
    /// subtracts
    pub fn signed_amount(&self) -> Decimal {
        match self.kind {
            EntryKind::Income => self.amount,
            EntryKind::Expense => -self.amount,
        }
    }

    /// Whether this entry is dated inside the given month
    pub fn in_month(&self, month: MonthKey) -> bool {
        month.contains(self.date)
    }

    pub fn validate(&self) -> Result<()> {
        if self.amount <= Decimal::ZERO {
            return Err(Error::InvalidAmount(self.amount));
        }
        if self.description.trim().is_empty() {
            return Err(Error::validation("transaction description cannot be empty"));
        }
        if self.category.trim().is_empty() {
            return Err(Error::validation("transaction category cannot be empty"));
        }
        Ok(())
    }
}
