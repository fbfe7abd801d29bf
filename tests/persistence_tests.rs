//! Persistence tests for the JSON-file store
//!
//! These tests exercise durability across reopen, corruption reporting,
//! and the directory lock, all against real temp directories.
//!
//! Run with: cargo test --test persistence_tests -- --nocapture

use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tempfile::TempDir;

use lastro_core::adapters::identity::LocalIdentity;
use lastro_core::adapters::json_file::JsonFileStore;
use lastro_core::config::Config;
use lastro_core::ports::{collections, DocumentStore, Query};
use lastro_core::services::{NewBankAccount, NewTransaction};
use lastro_core::{EntryKind, Error, LastroContext, SourceKind, UserId};

fn date(s: &str) -> NaiveDate {
    s.parse().expect("valid test date")
}

fn dec(cents: i64) -> Decimal {
    Decimal::new(cents, 2)
}

fn sample_document(id: &str) -> lastro_core::ports::Document {
    let value = serde_json::json!({
        "id": id,
        "userId": "user-1",
        "note": "durable"
    });
    match value {
        serde_json::Value::Object(map) => map,
        _ => unreachable!(),
    }
}

/// Documents written before a drop are there after reopen
#[tokio::test]
async fn test_data_survives_reopen() {
    let dir = TempDir::new().unwrap();

    {
        let store = JsonFileStore::open(dir.path()).unwrap();
        store
            .put(collections::TRANSACTIONS, "tx-1", sample_document("tx-1"))
            .await
            .unwrap();
        store
            .put(collections::TRANSACTIONS, "tx-2", sample_document("tx-2"))
            .await
            .unwrap();
    }

    let store = JsonFileStore::open(dir.path()).unwrap();
    let found = store
        .find(collections::TRANSACTIONS, Query::new())
        .await
        .unwrap();
    assert_eq!(found.len(), 2);
    let one = store.get(collections::TRANSACTIONS, "tx-1").await.unwrap();
    assert!(one.is_some());
}

/// Deletes persist too
#[tokio::test]
async fn test_delete_survives_reopen() {
    let dir = TempDir::new().unwrap();

    {
        let store = JsonFileStore::open(dir.path()).unwrap();
        store
            .put(collections::BUDGETS, "b-1", sample_document("b-1"))
            .await
            .unwrap();
        store.delete(collections::BUDGETS, "b-1").await.unwrap();
        // deleting what is already gone is fine
        store.delete(collections::BUDGETS, "b-1").await.unwrap();
    }

    let store = JsonFileStore::open(dir.path()).unwrap();
    assert!(store.get(collections::BUDGETS, "b-1").await.unwrap().is_none());
}

/// An unreadable collection file is a store error, not an empty result
#[tokio::test]
async fn test_corrupt_collection_file_is_reported() {
    let dir = TempDir::new().unwrap();
    let store = JsonFileStore::open(dir.path()).unwrap();
    store
        .put(collections::TRANSACTIONS, "tx-1", sample_document("tx-1"))
        .await
        .unwrap();

    std::fs::write(dir.path().join("transactions.json"), "{definitely not json").unwrap();

    let err = store
        .find(collections::TRANSACTIONS, Query::new())
        .await
        .unwrap_err();
    match err {
        Error::Store(message) => assert!(message.contains("corrupt")),
        other => panic!("expected Store error, got {:?}", other),
    }
}

/// Two stores cannot share a data directory
#[tokio::test]
async fn test_directory_lock_rejects_second_open() {
    let dir = TempDir::new().unwrap();
    let _first = JsonFileStore::open(dir.path()).unwrap();

    let err = JsonFileStore::open(dir.path()).unwrap_err();
    assert!(matches!(err, Error::Store(_)));
}

/// Dropping the store releases the directory for the next process
#[tokio::test]
async fn test_lock_released_on_drop() {
    let dir = TempDir::new().unwrap();
    {
        let _store = JsonFileStore::open(dir.path()).unwrap();
    }
    assert!(JsonFileStore::open(dir.path()).is_ok());
}

/// A whole context over JSON files keeps reconciled balances across restarts
#[tokio::test]
async fn test_context_state_survives_restart() {
    let dir = TempDir::new().unwrap();
    let user = UserId::new("user-1");
    let account_id;

    {
        let ctx = LastroContext::open(dir.path()).unwrap();
        let account = ctx
            .accounts
            .create_bank_account(
                &user,
                NewBankAccount {
                    name: "Checking".to_string(),
                    bank: "Northwind Bank".to_string(),
                    opening_balance: Decimal::ZERO,
                    color: "#2e86de".to_string(),
                },
            )
            .await
            .unwrap();
        account_id = account.id;

        ctx.ledger
            .record(
                &user,
                NewTransaction {
                    account_id,
                    kind: EntryKind::Income,
                    description: "Salary".to_string(),
                    amount: dec(100000),
                    category: "Salary".to_string(),
                    date: date("2024-03-01"),
                },
            )
            .await
            .unwrap();
        ctx.ledger
            .record(
                &user,
                NewTransaction {
                    account_id,
                    kind: EntryKind::Expense,
                    description: "Groceries".to_string(),
                    amount: dec(30000),
                    category: "Food".to_string(),
                    date: date("2024-03-05"),
                },
            )
            .await
            .unwrap();
    }

    let ctx = LastroContext::open(dir.path()).unwrap();
    let account = ctx.accounts.get(&user, account_id).await.unwrap();
    match &account.kind {
        SourceKind::Bank { balance, .. } => assert_eq!(*balance, dec(70000)),
        SourceKind::Card { .. } => panic!("expected a bank account"),
    }
    assert_eq!(ctx.ledger.transactions_for_user(&user).await.unwrap().len(), 2);
}

/// settings.json in the data directory drives the context configuration
#[tokio::test]
async fn test_context_reads_settings_from_data_directory() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("settings.json"),
        r#"{"trendMonths": 3, "reminderWindowDays": 14}"#,
    )
    .unwrap();

    let ctx = LastroContext::open(dir.path()).unwrap();
    assert_eq!(ctx.config.trend_months, 3);

    let user = UserId::new("user-1");
    let summary = ctx.dashboard.summary(&user, date("2024-03-15")).await.unwrap();
    assert_eq!(summary.trend.labels(), vec!["2024-01", "2024-02", "2024-03"]);
}

/// Contexts share nothing once their directories differ
#[tokio::test]
async fn test_directories_are_independent() {
    let first_dir = TempDir::new().unwrap();
    let second_dir = TempDir::new().unwrap();
    let user = UserId::new("user-1");

    let first = LastroContext::open(first_dir.path()).unwrap();
    first
        .reminders
        .create(&user, "Only here", dec(1000), date("2024-04-01"))
        .await
        .unwrap();

    let second = LastroContext::open(second_dir.path()).unwrap();
    assert!(second.reminders.list(&user).await.unwrap().is_empty());
}

/// The same store can sit behind several service handles at once
#[tokio::test]
async fn test_shared_store_between_contexts() {
    let dir = TempDir::new().unwrap();
    let store: Arc<dyn DocumentStore> = Arc::new(JsonFileStore::open(dir.path()).unwrap());
    let user = UserId::new("user-1");

    let first = LastroContext::new(
        Arc::clone(&store),
        Arc::new(LocalIdentity::new()),
        Config::default(),
    );
    let second = LastroContext::new(
        Arc::clone(&store),
        Arc::new(LocalIdentity::new()),
        Config::default(),
    );

    first
        .reminders
        .create(&user, "Visible to both", dec(1000), date("2024-04-01"))
        .await
        .unwrap();
    assert_eq!(second.reminders.list(&user).await.unwrap().len(), 1);
}
