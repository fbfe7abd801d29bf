//! Reminder domain model

use chrono::{DateTime, Duration, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::result::{Error, Result};
use crate::domain::user::UserId;

/// A standalone future-dated payment obligation
///
/// Not linked to any funding source or transaction; paying a bill is
/// recorded separately as an expense if the user chooses to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reminder {
    pub id: Uuid,
    pub user_id: UserId,
    pub description: String,
    pub amount: Decimal,
    /// Calendar day the payment is due
    pub due_date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

impl Reminder {
    pub fn new(
        user_id: UserId,
        description: impl Into<String>,
        amount: Decimal,
        due_date: NaiveDate,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            description: description.into(),
            amount,
            due_date,
            created_at: Utc::now(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.amount <= Decimal::ZERO {
            return Err(Error::InvalidAmount(self.amount));
        }
        if self.description.trim().is_empty() {
            return Err(Error::validation("reminder description cannot be empty"));
        }
        Ok(())
    }

    /// Schedule position relative to a reference day
    pub fn status(&self, today: NaiveDate) -> ReminderStatus {
        let days = (self.due_date - today).num_days();
        if days < 0 {
            ReminderStatus::Overdue { days_late: -days }
        } else if days == 0 {
            ReminderStatus::DueToday
        } else {
            ReminderStatus::DueIn { days }
        }
    }

    /// Whether the due date falls in `[today, today + window_days]`
    pub fn is_due_within(&self, today: NaiveDate, window_days: i64) -> bool {
        self.due_date >= today && self.due_date <= today + Duration::days(window_days)
    }
}

/// Where a reminder sits relative to its due date
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase", tag = "state")]
pub enum ReminderStatus {
    #[serde(rename_all = "camelCase")]
    Overdue { days_late: i64 },
    DueToday,
    DueIn { days: i64 },
}

impl ReminderStatus {
    pub fn is_overdue(&self) -> bool {
        matches!(self, Self::Overdue { .. })
    }
}
