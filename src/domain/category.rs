//! Category catalog

use serde::{Deserialize, Serialize};

use crate::domain::transaction::EntryKind;

/// Stock expense categories offered to every user
pub const DEFAULT_EXPENSE_CATEGORIES: &[&str] = &[
    "Food",
    "Transport",
    "Housing",
    "Health",
    "Education",
    "Leisure",
    "Clothing",
    "Utilities",
    "Taxes",
    "Other",
];

/// Stock income categories offered to every user
pub const DEFAULT_INCOME_CATEGORIES: &[&str] =
    &["Salary", "Freelance", "Investments", "Sales", "Other"];

/// The fixed category lists a ledger accepts, keyed by entry kind
///
/// Transactions and budgets must name a category from the list for their
/// kind. The lists are configurable per deployment; the defaults are the
/// application's stock catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCatalog {
    pub expense: Vec<String>,
    pub income: Vec<String>,
}

impl Default for CategoryCatalog {
    fn default() -> Self {
        let owned = |items: &[&str]| items.iter().map(|s| s.to_string()).collect();
        Self {
            expense: owned(DEFAULT_EXPENSE_CATEGORIES),
            income: owned(DEFAULT_INCOME_CATEGORIES),
        }
    }
}

impl CategoryCatalog {
    /// The category list for one entry kind
    pub fn for_kind(&self, kind: EntryKind) -> &[String] {
        match kind {
            EntryKind::Income => &self.income,
            EntryKind::Expense => &self.expense,
        }
    }

    pub fn contains(&self, kind: EntryKind, category: &str) -> bool {
        self.for_kind(kind).iter().any(|c| c == category)
    }
}
