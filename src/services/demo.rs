//! Demo service - seeds a sample ledger

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::info;

use crate::adapters::demo;
use crate::domain::{MonthKey, Result, UserId};
use crate::ports::{collections, to_document, DocumentStore};

use super::ReconciliationService;

/// What a seeding pass wrote
#[derive(Debug, Clone, Copy)]
pub struct DemoSeedResult {
    pub sources: usize,
    pub transactions: usize,
    pub budgets: usize,
    pub reminders: usize,
}

/// Seeds the store with the demo dataset
pub struct DemoService {
    store: Arc<dyn DocumentStore>,
    reconciliation: ReconciliationService,
}

impl DemoService {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        let reconciliation = ReconciliationService::new(Arc::clone(&store));
        Self {
            store,
            reconciliation,
        }
    }

    /// Seed the demo ledger for a user
    ///
    /// Sources and transactions are written first, then every source is
    /// reconciled, so the seeded balances come out of the same code path
    /// production data does.
    pub async fn seed(&self, user: &UserId, today: NaiveDate) -> Result<DemoSeedResult> {
        let sources = demo::generate_demo_sources(user);
        for source in &sources {
            self.store
                .put(collections::ACCOUNTS, &source.id.to_string(), to_document(source)?)
                .await?;
        }

        let transactions = demo::generate_demo_transactions(user, today);
        for tx in &transactions {
            self.store
                .put(collections::TRANSACTIONS, &tx.id.to_string(), to_document(tx)?)
                .await?;
        }

        for source in &sources {
            self.reconciliation.reconcile_source(user, source.id).await?;
        }

        let budgets = demo::generate_demo_budgets(user, MonthKey::from_date(today));
        for budget in &budgets {
            self.store
                .put(collections::BUDGETS, &budget.id.to_string(), to_document(budget)?)
                .await?;
        }

        let reminders = demo::generate_demo_reminders(user, today);
        for reminder in &reminders {
            self.store
                .put(
                    collections::REMINDERS,
                    &reminder.id.to_string(),
                    to_document(reminder)?,
                )
                .await?;
        }

        info!(
            "seeded demo ledger for {}: {} sources, {} transactions, {} budgets, {} reminders",
            user,
            sources.len(),
            transactions.len(),
            budgets.len(),
            reminders.len()
        );
        Ok(DemoSeedResult {
            sources: sources.len(),
            transactions: transactions.len(),
            budgets: budgets.len(),
            reminders: reminders.len(),
        })
    }
}
