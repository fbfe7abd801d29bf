//! Account service - funding source management

use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::info;
use uuid::Uuid;

use crate::domain::{Error, FundingSource, Result, UserId};
use crate::ports::{collections, from_documents, to_document, DocumentStore, Query, SortOrder};

use super::ReconciliationService;

/// Parameters for creating a bank account
#[derive(Debug, Clone)]
pub struct NewBankAccount {
    pub name: String,
    pub bank: String,
    pub opening_balance: Decimal,
    pub color: String,
}

/// Parameters for creating a card
#[derive(Debug, Clone)]
pub struct NewCard {
    pub name: String,
    pub brand: String,
    pub limit: Decimal,
    pub closing_day: u8,
    pub due_day: u8,
    pub color: String,
}

/// Manages funding sources (bank accounts and cards)
#[derive(Clone)]
pub struct AccountService {
    store: Arc<dyn DocumentStore>,
    reconciliation: ReconciliationService,
}

impl AccountService {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        let reconciliation = ReconciliationService::new(Arc::clone(&store));
        Self {
            store,
            reconciliation,
        }
    }

    /// Create a bank account
    ///
    /// The opening balance is only a seed value: the first reconciliation
    /// pass replaces it with the sum of recorded transactions.
    pub async fn create_bank_account(
        &self,
        user: &UserId,
        params: NewBankAccount,
    ) -> Result<FundingSource> {
        let source = FundingSource::bank(
            user.clone(),
            params.name,
            params.bank,
            params.opening_balance,
            params.color,
        );
        source.validate()?;
        self.store
            .put(collections::ACCOUNTS, &source.id.to_string(), to_document(&source)?)
            .await?;
        info!("created bank account `{}` ({})", source.name, source.id);
        Ok(source)
    }

    /// Create a card
    pub async fn create_card(&self, user: &UserId, params: NewCard) -> Result<FundingSource> {
        let source = FundingSource::card(
            user.clone(),
            params.name,
            params.brand,
            params.limit,
            params.closing_day,
            params.due_day,
            params.color,
        );
        source.validate()?;
        self.store
            .put(collections::ACCOUNTS, &source.id.to_string(), to_document(&source)?)
            .await?;
        info!("created card `{}` ({})", source.name, source.id);
        Ok(source)
    }

    /// Fetch one funding source, enforcing ownership
    pub async fn get(&self, user: &UserId, id: Uuid) -> Result<FundingSource> {
        self.reconciliation.fetch_source(user, id).await
    }

    /// Update a funding source in place
    ///
    /// The source keeps its identity: kind and owner are immutable, and
    /// the stored creation timestamp wins over whatever the caller sends.
    pub async fn update(&self, user: &UserId, mut source: FundingSource) -> Result<FundingSource> {
        let stored = self.reconciliation.fetch_source(user, source.id).await?;
        if stored.kind_name() != source.kind_name() {
            return Err(Error::validation(format!(
                "funding source `{}` cannot change kind from {} to {}",
                source.name,
                stored.kind_name(),
                source.kind_name()
            )));
        }
        source.user_id = stored.user_id;
        source.created_at = stored.created_at;
        source.validate()?;
        self.store
            .put(collections::ACCOUNTS, &source.id.to_string(), to_document(&source)?)
            .await?;
        Ok(source)
    }

    /// All of a user's funding sources, sorted by name
    pub async fn list(&self, user: &UserId) -> Result<Vec<FundingSource>> {
        let query = Query::new()
            .filter("userId", user.as_str())
            .sort_by("name", SortOrder::Ascending);
        let documents = self.store.find(collections::ACCOUNTS, query).await?;
        from_documents(documents)
    }

    /// The user's bank accounts, sorted by name
    pub async fn list_bank_accounts(&self, user: &UserId) -> Result<Vec<FundingSource>> {
        Ok(self
            .list(user)
            .await?
            .into_iter()
            .filter(FundingSource::is_bank)
            .collect())
    }

    /// The user's cards, sorted by name
    pub async fn list_cards(&self, user: &UserId) -> Result<Vec<FundingSource>> {
        Ok(self
            .list(user)
            .await?
            .into_iter()
            .filter(FundingSource::is_card)
            .collect())
    }
}
