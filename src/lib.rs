//! Lastro Core - ledger reconciliation and budgeting engine
//!
//! This crate implements the core domain logic following hexagonal architecture:
//!
//! - **domain**: Business entities (FundingSource, Transaction, etc.) and pure ledger math
//! - **ports**: Trait definitions for external dependencies (DocumentStore, IdentityProvider)
//! - **services**: Business logic orchestration
//! - **adapters**: Concrete implementations (in-memory store, JSON files, local identity)

pub mod adapters;
pub mod config;
pub mod domain;
pub mod ports;
pub mod services;

use std::path::Path;
use std::sync::Arc;

use adapters::identity::LocalIdentity;
use adapters::json_file::JsonFileStore;
use adapters::memory::MemoryStore;
use config::Config;
use ports::{DocumentStore, IdentityProvider};
use services::*;

// Re-export commonly used types at crate root
pub use domain::ledger::{MonthlyTrend, TransactionFilter};
pub use domain::{
    AuthState, Budget, BudgetSeverity, BudgetStatus, CardPosition, EntryKind, Error, FundingSource,
    MonthKey, Reminder, ReminderStatus, Result, SourceKind, Transaction, UserId,
};

/// Main context for Lastro operations
///
/// This is the primary entry point for all business logic. It holds the
/// store, the identity provider, configuration, and all services.
pub struct LastroContext {
    pub config: Config,
    pub store: Arc<dyn DocumentStore>,
    pub identity: Arc<dyn IdentityProvider>,
    pub accounts: AccountService,
    pub ledger: LedgerService,
    pub reconciliation: ReconciliationService,
    pub budgets: BudgetService,
    pub reminders: ReminderService,
    pub dashboard: DashboardService,
    pub demo: DemoService,
}

impl LastroContext {
    /// Create a context over the given store and identity provider
    pub fn new(
        store: Arc<dyn DocumentStore>,
        identity: Arc<dyn IdentityProvider>,
        config: Config,
    ) -> Self {
        let accounts = AccountService::new(Arc::clone(&store));
        let ledger = LedgerService::new(Arc::clone(&store), config.categories.clone());
        let reconciliation = ReconciliationService::new(Arc::clone(&store));
        let budgets = BudgetService::new(Arc::clone(&store), config.categories.clone());
        let reminders = ReminderService::new(Arc::clone(&store));
        let dashboard = DashboardService::new(
            Arc::clone(&store),
            config.trend_months,
            config.reminder_window_days,
        );
        let demo = DemoService::new(Arc::clone(&store));

        Self {
            config,
            store,
            identity,
            accounts,
            ledger,
            reconciliation,
            budgets,
            reminders,
            dashboard,
            demo,
        }
    }

    /// Context backed by JSON files under `dir`
    ///
    /// Loads settings.json from the same directory.
    pub fn open(dir: &Path) -> Result<Self> {
        let config = Config::load(dir)?;
        let store: Arc<dyn DocumentStore> = Arc::new(JsonFileStore::open(dir)?);
        let identity: Arc<dyn IdentityProvider> = Arc::new(LocalIdentity::new());
        Ok(Self::new(store, identity, config))
    }

    /// Ephemeral in-memory context, for tests and demo sessions
    pub fn in_memory() -> Self {
        let store: Arc<dyn DocumentStore> = Arc::new(MemoryStore::new());
        let identity: Arc<dyn IdentityProvider> = Arc::new(LocalIdentity::new());
        Self::new(store, identity, Config::default())
    }

    /// The signed-in user's id
    ///
    /// Every user-scoped operation starts here; a signed-out session gets
    /// `Error::Unauthenticated` instead of an empty result set.
    pub fn require_user(&self) -> Result<UserId> {
        match self.identity.current() {
            AuthState::SignedIn(user) => Ok(user),
            AuthState::SignedOut => Err(Error::Unauthenticated),
        }
    }
}
