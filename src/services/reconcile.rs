//! Reconciliation service - derived funding source caches
//!
//! Bank balances and card spend totals are caches derived from the
//! transaction history. This service recomputes them from scratch, so a
//! reconcile pass is idempotent and self-healing: whatever value the
//! stored source carried before is replaced, never adjusted.

use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::domain::ledger;
use crate::domain::{Error, FundingSource, Result, Transaction, UserId};
use crate::ports::{collections, from_documents, to_document, DocumentStore, Query};

/// Recomputes bank balances and card spend from transaction history
#[derive(Clone)]
pub struct ReconciliationService {
    store: Arc<dyn DocumentStore>,
}

impl ReconciliationService {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Fetch a funding source, enforcing ownership
    ///
    /// A source that exists but belongs to another user is reported the
    /// same way as one that does not exist at all.
    pub(crate) async fn fetch_source(&self, user: &UserId, id: Uuid) -> Result<FundingSource> {
        let document = self
            .store
            .get(collections::ACCOUNTS, &id.to_string())
            .await?;
        let Some(document) = document else {
            return Err(Error::UnknownFundingSource(id));
        };
        let source: FundingSource = crate::ports::from_document(document)?;
        if source.user_id != *user {
            return Err(Error::UnknownFundingSource(id));
        }
        Ok(source)
    }

    async fn source_transactions(
        &self,
        user: &UserId,
        account_id: Uuid,
        expenses_only: bool,
    ) -> Result<Vec<Transaction>> {
        let mut query = Query::new()
            .filter("userId", user.as_str())
            .filter("accountId", account_id.to_string());
        if expenses_only {
            query = query.filter("type", "expense");
        }
        let documents = self.store.find(collections::TRANSACTIONS, query).await?;
        from_documents(documents)
    }

    /// Recompute a bank account's balance from its full history
    ///
    /// Balance is the signed sum of every transaction ever recorded
    /// against the account: income adds, expense subtracts. An account
    /// with no transactions lands on zero. The result is written back to
    /// the stored source and returned.
    pub async fn reconcile_bank_balance(&self, user: &UserId, account_id: Uuid) -> Result<Decimal> {
        let mut source = self.fetch_source(user, account_id).await?;
        if !source.is_bank() {
            return Err(Error::validation(format!(
                "funding source `{}` is a card, not a bank account",
                source.name
            )));
        }

        let transactions = self.source_transactions(user, account_id, false).await?;
        let balance = ledger::net_balance(&transactions)?;

        source.set_balance(balance)?;
        self.store
            .put(collections::ACCOUNTS, &account_id.to_string(), to_document(&source)?)
            .await?;

        debug!(
            "reconciled bank `{}`: balance {} across {} transactions",
            source.name,
            balance,
            transactions.len()
        );
        Ok(balance)
    }

    /// Recompute a card's spend total from its full expense history
    ///
    /// Sums every expense ever charged to the card. The statement cycle
    /// implied by the card's closing day is not applied here; restricting
    /// the total to the open cycle is a known follow-up.
    pub async fn reconcile_card_spend(&self, user: &UserId, account_id: Uuid) -> Result<Decimal> {
        let mut source = self.fetch_source(user, account_id).await?;
        if !source.is_card() {
            return Err(Error::validation(format!(
                "funding source `{}` is a bank account, not a card",
                source.name
            )));
        }

        let transactions = self.source_transactions(user, account_id, true).await?;
        let spent = ledger::expense_total(&transactions)?;

        source.set_current_spent(spent)?;
        self.store
            .put(collections::ACCOUNTS, &account_id.to_string(), to_document(&source)?)
            .await?;

        if let Ok(position) = source.card_position() {
            if position.is_over_limit() {
                warn!(
                    "card `{}` is over its limit: {} spent of {}",
                    source.name, position.spent, position.limit
                );
            }
        }

        debug!("reconciled card `{}`: spent {}", source.name, spent);
        Ok(spent)
    }

    /// Recompute whichever cache the source's kind uses
    pub async fn reconcile_source(&self, user: &UserId, account_id: Uuid) -> Result<Decimal> {
        let source = self.fetch_source(user, account_id).await?;
        if source.is_bank() {
            self.reconcile_bank_balance(user, account_id).await
        } else {
            self.reconcile_card_spend(user, account_id).await
        }
    }
}
