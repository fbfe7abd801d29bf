//! Pure ledger arithmetic
//!
//! Aggregation over immutable transaction snapshots. Nothing here touches
//! the store: services fetch a snapshot and hand it in, so every
//! computation is independently testable and idempotent by construction.
//!
//! Every function validates the snapshot's amounts first; a non-positive
//! amount is rejected rather than folded into a total.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

use crate::domain::month::MonthKey;
use crate::domain::result::{Error, Result};
use crate::domain::transaction::{EntryKind, Transaction};

fn check_amounts(transactions: &[Transaction]) -> Result<()> {
    for tx in transactions {
        if tx.amount <= Decimal::ZERO {
            return Err(Error::InvalidAmount(tx.amount));
        }
    }
    Ok(())
}

/// Net balance of a snapshot: income adds, expense subtracts
pub fn net_balance(transactions: &[Transaction]) -> Result<Decimal> {
    check_amounts(transactions)?;
    Ok(transactions.iter().map(Transaction::signed_amount).sum())
}

/// Total of expense entries, ignoring income
pub fn expense_total(transactions: &[Transaction]) -> Result<Decimal> {
    check_amounts(transactions)?;
    Ok(transactions
        .iter()
        .filter(|tx| tx.kind == EntryKind::Expense)
        .map(|tx| tx.amount)
        .sum())
}

/// Expense totals per category for one month
///
/// Only expense entries dated inside `month` contribute; every category
/// present in that slice appears, categories from other months never do.
pub fn category_spend(
    transactions: &[Transaction],
    month: MonthKey,
) -> Result<BTreeMap<String, Decimal>> {
    check_amounts(transactions)?;
    let mut totals = BTreeMap::new();
    for tx in transactions
        .iter()
        .filter(|tx| tx.kind == EntryKind::Expense && tx.in_month(month))
    {
        *totals.entry(tx.category.clone()).or_insert(Decimal::ZERO) += tx.amount;
    }
    Ok(totals)
}

/// All-time expense totals per category
pub fn category_totals(transactions: &[Transaction]) -> Result<BTreeMap<String, Decimal>> {
    check_amounts(transactions)?;
    let mut totals = BTreeMap::new();
    for tx in transactions.iter().filter(|tx| tx.kind == EntryKind::Expense) {
        *totals.entry(tx.category.clone()).or_insert(Decimal::ZERO) += tx.amount;
    }
    Ok(totals)
}

/// Income and expense totals for one month
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct MonthTotals {
    pub income: Decimal,
    pub expense: Decimal,
}

pub fn month_totals(transactions: &[Transaction], month: MonthKey) -> Result<MonthTotals> {
    check_amounts(transactions)?;
    let mut totals = MonthTotals::default();
    for tx in transactions.iter().filter(|tx| tx.in_month(month)) {
        match tx.kind {
            EntryKind::Income => totals.income += tx.amount,
            EntryKind::Expense => totals.expense += tx.amount,
        }
    }
    Ok(totals)
}

/// Chart-ready income/expense series over a rolling month window
///
/// The three sequences are equal-length and aligned, oldest month first.
/// Months without transactions contribute zero to both series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyTrend {
    pub months: Vec<MonthKey>,
    pub income: Vec<Decimal>,
    pub expense: Vec<Decimal>,
}

impl MonthlyTrend {
    /// Axis labels, oldest first
    pub fn labels(&self) -> Vec<String> {
        self.months.iter().map(MonthKey::to_string).collect()
    }
}

/// Per-month totals over the `month_count` months ending at `end`
pub fn monthly_trend(
    transactions: &[Transaction],
    end: MonthKey,
    month_count: usize,
) -> Result<MonthlyTrend> {
    check_amounts(transactions)?;
    let mut by_month: HashMap<MonthKey, MonthTotals> = HashMap::new();
    for tx in transactions {
        let entry = by_month.entry(MonthKey::from_date(tx.date)).or_default();
        match tx.kind {
            EntryKind::Income => entry.income += tx.amount,
            EntryKind::Expense => entry.expense += tx.amount,
        }
    }

    let months = end.window_ending(month_count);
    let mut income = Vec::with_capacity(months.len());
    let mut expense = Vec::with_capacity(months.len());
    for month in &months {
        let totals = by_month.get(month).copied().unwrap_or_default();
        income.push(totals.income);
        expense.push(totals.expense);
    }
    Ok(MonthlyTrend {
        months,
        income,
        expense,
    })
}

/// Snapshot filter combining kind, category, funding source, and month
///
/// An unset field matches everything, so the default filter passes every
/// transaction through.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransactionFilter {
    pub kind: Option<EntryKind>,
    pub category: Option<String>,
    pub account_id: Option<Uuid>,
    pub month: Option<MonthKey>,
}

impl TransactionFilter {
    pub fn matches(&self, tx: &Transaction) -> bool {
        self.kind.map_or(true, |kind| tx.kind == kind)
            && self
                .category
                .as_deref()
                .map_or(true, |category| tx.category == category)
            && self.account_id.map_or(true, |id| tx.account_id == id)
            && self.month.map_or(true, |month| tx.in_month(month))
    }
}

/// Distinct filter choices present in a snapshot
///
/// Categories sort alphabetically, months newest first, matching the order
/// the filter controls present them in.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterOptions {
    pub categories: Vec<String>,
    pub months: Vec<MonthKey>,
}

pub fn filter_options(transactions: &[Transaction]) -> FilterOptions {
    let categories: BTreeSet<String> =
        transactions.iter().map(|tx| tx.category.clone()).collect();
    let months: BTreeSet<MonthKey> = transactions
        .iter()
        .map(|tx| MonthKey::from_date(tx.date))
        .collect();
    FilterOptions {
        categories: categories.into_iter().collect(),
        months: months.into_iter().rev().collect(),
    }
}
