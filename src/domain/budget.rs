//! Budget domain model

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::month::MonthKey;
use crate::domain::result::{Error, Result};
use crate::domain::user::UserId;

/// A per-month, per-category spending target
///
/// No uniqueness is enforced over (user, month, category): duplicates are
/// permitted and each one reports its own status row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Budget {
    pub id: Uuid,
    pub user_id: UserId,
    pub month: MonthKey,
    pub category: String,
    pub amount: Decimal,
    pub created_at: DateTime<Utc>,
}

impl Budget {
    pub fn new(
        user_id: UserId,
        month: MonthKey,
        category: impl Into<String>,
        amount: Decimal,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            month,
            category: category.into(),
            amount,
            created_at: Utc::now(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.amount <= Decimal::ZERO {
            return Err(Error::InvalidAmount(self.amount));
        }
        if self.category.trim().is_empty() {
            return Err(Error::validation("budget category cannot be empty"));
        }
        Ok(())
    }
}

/// Severity buckets for budget consumption
///
/// Over-budget above 100% and near-limit above 80%; the thresholds are the
/// application's fixed presentation contract, exposed here so renderers
/// never recompute them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum BudgetSeverity {
    WithinBudget,
    NearLimit,
    OverBudget,
}

impl BudgetSeverity {
    pub fn classify(percentage: Decimal) -> Self {
        if percentage > Decimal::ONE_HUNDRED {
            Self::OverBudget
        } else if percentage > Decimal::from(80) {
            Self::NearLimit
        } else {
            Self::WithinBudget
        }
    }
}

/// A budget compared against the month's actual category spend
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetStatus {
    pub budget: Budget,
    pub spent: Decimal,
    /// `amount - spent`; negative once over budget
    pub remaining: Decimal,
    /// Raw consumption percentage, unclamped (120 means 20% over)
    pub percentage: Decimal,
    pub severity: BudgetSeverity,
}

impl BudgetStatus {
    /// Compare a budget against the spend aggregated for its month and
    /// category. `spent` of zero covers categories with no expenses.
    pub fn evaluate(budget: Budget, spent: Decimal) -> Result<Self> {
        budget.validate()?;
        if spent < Decimal::ZERO {
            return Err(Error::InvalidAmount(spent));
        }
        let remaining = budget.amount - spent;
        let percentage = spent / budget.amount * Decimal::ONE_HUNDRED;
        Ok(Self {
            severity: BudgetSeverity::classify(percentage),
            budget,
            spent,
            remaining,
            percentage,
        })
    }

    /// Consumption clamped to [0, 100], for progress bar widths
    pub fn gauge_width(&self) -> Decimal {
        self.percentage.clamp(Decimal::ZERO, Decimal::ONE_HUNDRED)
    }
}
