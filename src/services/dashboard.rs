//! Dashboard service - one-call summary for a home screen

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::domain::ledger::{self, MonthlyTrend};
use crate::domain::{
    FundingSource, MonthKey, Reminder, ReminderStatus, Result, SourceKind, Transaction, UserId,
};
use crate::ports::{collections, from_documents, DocumentStore, Query, SortOrder};

/// Most reminders a summary will carry
const UPCOMING_BILL_LIMIT: usize = 5;

/// A reminder paired with its schedule status
#[derive(Debug, Clone, Serialize)]
pub struct UpcomingBill {
    pub reminder: Reminder,
    pub status: ReminderStatus,
}

/// Everything a home screen shows, computed in one pass
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    /// Bank balances plus card available credit
    pub total_balance: Decimal,
    pub month_income: Decimal,
    pub month_expense: Decimal,
    /// All-time expense totals by category
    pub category_breakdown: BTreeMap<String, Decimal>,
    pub trend: MonthlyTrend,
    pub upcoming_bills: Vec<UpcomingBill>,
}

/// Builds presentation-ready summaries from stored state
#[derive(Clone)]
pub struct DashboardService {
    store: Arc<dyn DocumentStore>,
    trend_months: usize,
    reminder_window_days: i64,
}

impl DashboardService {
    pub fn new(store: Arc<dyn DocumentStore>, trend_months: usize, reminder_window_days: i64) -> Self {
        Self {
            store,
            trend_months,
            reminder_window_days,
        }
    }

    /// Compute the user's dashboard as of `today`
    ///
    /// Reads the stored balance and spend caches rather than re-deriving
    /// them, so the summary reflects the last reconciliation pass.
    pub async fn summary(&self, user: &UserId, today: NaiveDate) -> Result<DashboardSummary> {
        let sources = self.user_sources(user).await?;
        let mut total_balance = Decimal::ZERO;
        for source in &sources {
            match &source.kind {
                SourceKind::Bank { balance, .. } => total_balance += *balance,
                SourceKind::Card { .. } => total_balance += source.card_position()?.available,
            }
        }

        let transactions = self.user_transactions(user).await?;
        let month = MonthKey::from_date(today);
        let totals = ledger::month_totals(&transactions, month)?;
        let category_breakdown = ledger::category_totals(&transactions)?;
        let trend = ledger::monthly_trend(&transactions, month, self.trend_months)?;

        let reminders = self.user_reminders(user).await?;
        let upcoming_bills = reminders
            .into_iter()
            .filter(|reminder| reminder.is_due_within(today, self.reminder_window_days))
            .take(UPCOMING_BILL_LIMIT)
            .map(|reminder| UpcomingBill {
                status: reminder.status(today),
                reminder,
            })
            .collect();

        Ok(DashboardSummary {
            total_balance,
            month_income: totals.income,
            month_expense: totals.expense,
            category_breakdown,
            trend,
            upcoming_bills,
        })
    }

    async fn user_sources(&self, user: &UserId) -> Result<Vec<FundingSource>> {
        let query = Query::new().filter("userId", user.as_str());
        let documents = self.store.find(collections::ACCOUNTS, query).await?;
        from_documents(documents)
    }

    async fn user_transactions(&self, user: &UserId) -> Result<Vec<Transaction>> {
        let query = Query::new().filter("userId", user.as_str());
        let documents = self.store.find(collections::TRANSACTIONS, query).await?;
        from_documents(documents)
    }

    async fn user_reminders(&self, user: &UserId) -> Result<Vec<Reminder>> {
        let query = Query::new()
            .filter("userId", user.as_str())
            .sort_by("dueDate", SortOrder::Ascending);
        let documents = self.store.find(collections::REMINDERS, query).await?;
        from_documents(documents)
    }
}
