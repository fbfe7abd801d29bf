//! Core domain entities and ledger arithmetic
//!
//! All business entities are defined here. These are pure data structures
//! with validation logic - no I/O or external dependencies. The `ledger`
//! module holds the aggregation functions that operate over snapshots of
//! them.

mod budget;
mod category;
mod funding_source;
pub mod ledger;
mod month;
mod reminder;
pub mod result;
mod transaction;
mod user;

pub use budget::{Budget, BudgetSeverity, BudgetStatus};
pub use category::{CategoryCatalog, DEFAULT_EXPENSE_CATEGORIES, DEFAULT_INCOME_CATEGORIES};
pub use funding_source::{CardPosition, FundingSource, SourceKind};
pub use ledger::{FilterOptions, MonthTotals, MonthlyTrend, TransactionFilter};
pub use month::MonthKey;
pub use reminder::{Reminder, ReminderStatus};
pub use result::{Error, Result};
pub use transaction::{EntryKind, Transaction};
pub use user::{AuthState, UserId};
