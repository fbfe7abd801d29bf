//! Budget service - monthly category budgets

use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::info;
use uuid::Uuid;

use crate::domain::ledger;
use crate::domain::{
    Budget, BudgetStatus, CategoryCatalog, EntryKind, Error, MonthKey, Result, Transaction, UserId,
};
use crate::ports::{collections, from_documents, to_document, DocumentStore, Query, SortOrder};

/// Manages budgets and evaluates them against recorded spending
#[derive(Clone)]
pub struct BudgetService {
    store: Arc<dyn DocumentStore>,
    catalog: CategoryCatalog,
}

impl BudgetService {
    pub fn new(store: Arc<dyn DocumentStore>, catalog: CategoryCatalog) -> Self {
        Self { store, catalog }
    }

    /// Define a budget for one category in one month
    ///
    /// Several budgets may target the same month and category; each is
    /// evaluated independently against the same spending.
    pub async fn define(
        &self,
        user: &UserId,
        month: MonthKey,
        category: impl Into<String>,
        amount: Decimal,
    ) -> Result<Budget> {
        let budget = Budget::new(user.clone(), month, category, amount);
        budget.validate()?;
        if !self.catalog.contains(EntryKind::Expense, &budget.category) {
            return Err(Error::validation(format!(
                "unknown expense category `{}`",
                budget.category
            )));
        }
        self.store
            .put(collections::BUDGETS, &budget.id.to_string(), to_document(&budget)?)
            .await?;
        info!(
            "defined budget of {} for `{}` in {}",
            budget.amount, budget.category, budget.month
        );
        Ok(budget)
    }

    /// The user's budgets for a month, sorted by category
    pub async fn budgets_for_month(&self, user: &UserId, month: MonthKey) -> Result<Vec<Budget>> {
        let query = Query::new()
            .filter("userId", user.as_str())
            .filter("month", month.to_string())
            .sort_by("category", SortOrder::Ascending);
        let documents = self.store.find(collections::BUDGETS, query).await?;
        from_documents(documents)
    }

    /// Delete a budget
    pub async fn remove(&self, user: &UserId, id: Uuid) -> Result<()> {
        let document = self.store.get(collections::BUDGETS, &id.to_string()).await?;
        let budget: Budget = match document {
            Some(document) => crate::ports::from_document(document)?,
            None => return Err(Error::not_found(format!("budget {}", id))),
        };
        if budget.user_id != *user {
            return Err(Error::not_found(format!("budget {}", id)));
        }
        self.store.delete(collections::BUDGETS, &id.to_string()).await
    }

    /// Evaluate the month's budgets against recorded spending
    ///
    /// A category with no matching expenses counts as zero spent, so a
    /// fresh month reports every budget as fully available.
    pub async fn statuses_for_month(
        &self,
        user: &UserId,
        month: MonthKey,
    ) -> Result<Vec<BudgetStatus>> {
        let budgets = self.budgets_for_month(user, month).await?;
        if budgets.is_empty() {
            return Ok(Vec::new());
        }

        let query = Query::new().filter("userId", user.as_str());
        let documents = self.store.find(collections::TRANSACTIONS, query).await?;
        let transactions: Vec<Transaction> = from_documents(documents)?;
        let spend = ledger::category_spend(&transactions, month)?;

        budgets
            .into_iter()
            .map(|budget| {
                let spent = spend.get(&budget.category).copied().unwrap_or(Decimal::ZERO);
                BudgetStatus::evaluate(budget, spent)
            })
            .collect()
    }
}
