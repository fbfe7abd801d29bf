//! Demo data provider
//!
//! Generates a realistic sample ledger: two bank accounts, two cards,
//! three months of transactions, current-month budgets, and a few
//! reminders. Seeded through `DemoService` so every derived value comes
//! out of real reconciliation rather than being hard-coded here.

use chrono::{Duration, NaiveDate};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::domain::{
    Budget, EntryKind, FundingSource, MonthKey, Reminder, Transaction, UserId,
};

fn checking_id() -> Uuid {
    Uuid::parse_str("11111111-1111-1111-1111-111111111111").unwrap()
}

fn savings_id() -> Uuid {
    Uuid::parse_str("22222222-2222-2222-2222-222222222222").unwrap()
}

fn travel_card_id() -> Uuid {
    Uuid::parse_str("33333333-3333-3333-3333-333333333333").unwrap()
}

fn cashback_card_id() -> Uuid {
    Uuid::parse_str("44444444-4444-4444-4444-444444444444").unwrap()
}

fn day(month: MonthKey, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(month.year(), month.month(), day).unwrap()
}

/// Generate demo funding sources
pub fn generate_demo_sources(user: &UserId) -> Vec<FundingSource> {
    let mut checking = FundingSource::bank(
        user.clone(),
        "Everyday Checking",
        "Northwind Bank",
        Decimal::ZERO,
        "#2e86de",
    );
    checking.id = checking_id();

    let mut savings = FundingSource::bank(
        user.clone(),
        "Rainy Day Savings",
        "First Federal",
        Decimal::new(120000, 2), // seed only; reconciliation replaces it
        "#10ac84",
    );
    savings.id = savings_id();

    let mut travel = FundingSource::card(
        user.clone(),
        "Travel Card",
        "Visa",
        Decimal::new(800000, 2), // 8,000.00
        15,
        22,
        "#8e44ad",
    );
    travel.id = travel_card_id();

    let mut cashback = FundingSource::card(
        user.clone(),
        "Cashback Card",
        "Mastercard",
        Decimal::new(350000, 2), // 3,500.00
        3,
        10,
        "#e67e22",
    );
    cashback.id = cashback_card_id();

    vec![checking, savings, travel, cashback]
}

/// Generate three months of demo transactions ending at `today`'s month
pub fn generate_demo_transactions(user: &UserId, today: NaiveDate) -> Vec<Transaction> {
    let months = MonthKey::from_date(today).window_ending(3);
    let current = months[months.len() - 1];
    let mut transactions = Vec::new();

    let mut push = |account: Uuid,
                    kind: EntryKind,
                    description: &str,
                    cents: i64,
                    category: &str,
                    date: NaiveDate| {
        transactions.push(Transaction::new(
            user.clone(),
            account,
            kind,
            description,
            Decimal::new(cents, 2),
            category,
            date,
        ));
    };

    for month in &months {
        let m = *month;
        push(checking_id(), EntryKind::Income, "Monthly salary", 420000, "Salary", day(m, 1));
        push(checking_id(), EntryKind::Income, "Design contract", 65000, "Freelance", day(m, 15));
        push(checking_id(), EntryKind::Expense, "Rent", 145000, "Housing", day(m, 5));
        push(checking_id(), EntryKind::Expense, "Power and water", 12050, "Utilities", day(m, 8));
        push(checking_id(), EntryKind::Expense, "Metro pass", 9540, "Transport", day(m, 12));
        push(savings_id(), EntryKind::Income, "Interest", 22000, "Investments", day(m, 28));
        push(cashback_card_id(), EntryKind::Expense, "Groceries", 32000, "Food", day(m, 7));
        push(cashback_card_id(), EntryKind::Expense, "Groceries", 28075, "Food", day(m, 18));
        push(travel_card_id(), EntryKind::Expense, "Concert tickets", 15000, "Leisure", day(m, 20));
    }

    // a couple of one-off entries so months are not identical
    push(checking_id(), EntryKind::Expense, "Winter jacket", 8990, "Clothing", day(current, 22));
    push(checking_id(), EntryKind::Expense, "Dentist", 7500, "Health", day(months[1], 10));

    transactions
}

/// Generate demo budgets for the given month
pub fn generate_demo_budgets(user: &UserId, month: MonthKey) -> Vec<Budget> {
    vec![
        // groceries land at 600.75, close to the 700 target
        Budget::new(user.clone(), month, "Food", Decimal::new(70000, 2)),
        // concert tickets blow through this one
        Budget::new(user.clone(), month, "Leisure", Decimal::new(14000, 2)),
        Budget::new(user.clone(), month, "Transport", Decimal::new(25000, 2)),
    ]
}

/// Generate demo reminders around `today`
pub fn generate_demo_reminders(user: &UserId, today: NaiveDate) -> Vec<Reminder> {
    vec![
        Reminder::new(
            user.clone(),
            "Internet bill",
            Decimal::new(8990, 2),
            today + Duration::days(3),
        ),
        Reminder::new(
            user.clone(),
            "Rent",
            Decimal::new(145000, 2),
            today + Duration::days(10),
        ),
        Reminder::new(
            user.clone(),
            "Gym membership",
            Decimal::new(5990, 2),
            today - Duration::days(2),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn test_sources_reference_fixed_ids() {
        let user = UserId::new("demo");
        let sources = generate_demo_sources(&user);
        assert_eq!(sources.len(), 4);
        assert!(sources.iter().all(|s| s.validate().is_ok()));
        assert_eq!(sources.iter().filter(|s| s.is_card()).count(), 2);
    }

    #[test]
    fn test_transactions_only_touch_demo_sources() {
        let user = UserId::new("demo");
        let sources = generate_demo_sources(&user);
        let transactions = generate_demo_transactions(&user, date("2024-03-14"));
        assert!(transactions
            .iter()
            .all(|tx| sources.iter().any(|s| s.id == tx.account_id)));
        assert!(transactions.iter().all(|tx| tx.validate().is_ok()));
    }

    #[test]
    fn test_cards_only_receive_expenses() {
        let user = UserId::new("demo");
        let cards: Vec<Uuid> = generate_demo_sources(&user)
            .into_iter()
            .filter(|s| s.is_card())
            .map(|s| s.id)
            .collect();
        let transactions = generate_demo_transactions(&user, date("2024-03-14"));
        assert!(transactions
            .iter()
            .filter(|tx| cards.contains(&tx.account_id))
            .all(|tx| tx.kind == EntryKind::Expense));
    }

    #[test]
    fn test_budget_months_match_request() {
        let user = UserId::new("demo");
        let month: MonthKey = "2024-03".parse().unwrap();
        let budgets = generate_demo_budgets(&user, month);
        assert!(budgets.iter().all(|b| b.month == month));
        assert!(budgets.iter().all(|b| b.validate().is_ok()));
    }
}
