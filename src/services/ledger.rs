//! Ledger service - transaction recording and queries
//!
//! Every write ends with a reconciliation pass over the funding sources
//! it touched, so derived balances never drift from the history.

use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::debug;
use uuid::Uuid;

use crate::domain::ledger::{self, FilterOptions, TransactionFilter};
use crate::domain::{CategoryCatalog, EntryKind, Error, Result, Transaction, UserId};
use crate::ports::{collections, from_documents, to_document, DocumentStore, Query, SortOrder};

use super::ReconciliationService;

/// Parameters for recording a transaction
#[derive(Debug, Clone)]
pub struct NewTransaction {
    pub account_id: Uuid,
    pub kind: EntryKind,
    pub description: String,
    pub amount: Decimal,
    pub category: String,
    pub date: NaiveDate,
}

/// Records transactions and answers ledger queries
#[derive(Clone)]
pub struct LedgerService {
    store: Arc<dyn DocumentStore>,
    reconciliation: ReconciliationService,
    catalog: CategoryCatalog,
}

impl LedgerService {
    pub fn new(store: Arc<dyn DocumentStore>, catalog: CategoryCatalog) -> Self {
        let reconciliation = ReconciliationService::new(Arc::clone(&store));
        Self {
            store,
            reconciliation,
            catalog,
        }
    }

    fn check_category(&self, kind: EntryKind, category: &str) -> Result<()> {
        if !self.catalog.contains(kind, category) {
            return Err(Error::validation(format!(
                "unknown {} category `{}`",
                kind, category
            )));
        }
        Ok(())
    }

    /// Record a new transaction and reconcile its funding source
    ///
    /// The funding source is checked before anything is written, so a
    /// transaction can never be recorded against a source the user does
    /// not own.
    pub async fn record(&self, user: &UserId, params: NewTransaction) -> Result<Transaction> {
        let tx = Transaction::new(
            user.clone(),
            params.account_id,
            params.kind,
            params.description,
            params.amount,
            params.category,
            params.date,
        );
        tx.validate()?;
        self.check_category(tx.kind, &tx.category)?;
        self.reconciliation.fetch_source(user, tx.account_id).await?;

        self.store
            .put(collections::TRANSACTIONS, &tx.id.to_string(), to_document(&tx)?)
            .await?;
        self.reconciliation.reconcile_source(user, tx.account_id).await?;

        debug!(
            "recorded {} of {} in `{}` for user {}",
            tx.kind, tx.amount, tx.category, user
        );
        Ok(tx)
    }

    /// Amend a stored transaction and reconcile every source it touched
    ///
    /// When the amendment moves the transaction to a different funding
    /// source, both the old and the new source are reconciled.
    pub async fn amend(&self, user: &UserId, mut tx: Transaction) -> Result<Transaction> {
        tx.validate()?;
        self.check_category(tx.kind, &tx.category)?;

        let stored = self.fetch_transaction(user, tx.id).await?;
        self.reconciliation.fetch_source(user, tx.account_id).await?;

        tx.user_id = stored.user_id;
        tx.created_at = stored.created_at;
        self.store
            .put(collections::TRANSACTIONS, &tx.id.to_string(), to_document(&tx)?)
            .await?;

        self.reconciliation.reconcile_source(user, tx.account_id).await?;
        if stored.account_id != tx.account_id {
            self.reconciliation
                .reconcile_source(user, stored.account_id)
                .await?;
        }
        Ok(tx)
    }

    async fn fetch_transaction(&self, user: &UserId, id: Uuid) -> Result<Transaction> {
        let document = self
            .store
            .get(collections::TRANSACTIONS, &id.to_string())
            .await?;
        let Some(document) = document else {
            return Err(Error::not_found(format!("transaction {}", id)));
        };
        let stored: Transaction = crate::ports::from_document(document)?;
        if stored.user_id != *user {
            return Err(Error::not_found(format!("transaction {}", id)));
        }
        Ok(stored)
    }

    /// All of a user's transactions, newest first
    pub async fn transactions_for_user(&self, user: &UserId) -> Result<Vec<Transaction>> {
        let query = Query::new()
            .filter("userId", user.as_str())
            .sort_by("date", SortOrder::Descending);
        let documents = self.store.find(collections::TRANSACTIONS, query).await?;
        from_documents(documents)
    }

    /// One funding source's transactions, newest first
    pub async fn transactions_for_source(
        &self,
        user: &UserId,
        account_id: Uuid,
    ) -> Result<Vec<Transaction>> {
        let query = Query::new()
            .filter("userId", user.as_str())
            .filter("accountId", account_id.to_string())
            .sort_by("date", SortOrder::Descending);
        let documents = self.store.find(collections::TRANSACTIONS, query).await?;
        from_documents(documents)
    }

    /// A user's transactions narrowed by an in-memory filter, newest first
    pub async fn filtered(
        &self,
        user: &UserId,
        filter: &TransactionFilter,
    ) -> Result<Vec<Transaction>> {
        let transactions = self.transactions_for_user(user).await?;
        Ok(transactions
            .into_iter()
            .filter(|tx| filter.matches(tx))
            .collect())
    }

    /// Distinct categories and months present in the user's history
    pub async fn filter_options(&self, user: &UserId) -> Result<FilterOptions> {
        let transactions = self.transactions_for_user(user).await?;
        Ok(ledger::filter_options(&transactions))
    }

    /// The category catalog writes are validated against
    pub fn catalog(&self) -> &CategoryCatalog {
        &self.catalog
    }
}
