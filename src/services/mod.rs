//! Service layer - business logic orchestration
//!
//! Services coordinate domain logic and port interactions. Each service
//! focuses on a specific use case or feature area.

mod account;
mod budget;
mod dashboard;
mod demo;
mod ledger;
mod reconcile;
mod reminder;

pub use account::{AccountService, NewBankAccount, NewCard};
pub use budget::BudgetService;
pub use dashboard::{DashboardService, DashboardSummary, UpcomingBill};
pub use demo::{DemoSeedResult, DemoService};
pub use ledger::{LedgerService, NewTransaction};
pub use reconcile::ReconciliationService;
pub use reminder::ReminderService;
