//! Document store port - persistence abstraction

use std::cmp::Ordering;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::domain::result::{Error, Result};

/// Collection names the core reads and writes
pub mod collections {
    /// Bank accounts and cards, unified (see `FundingSource`)
    pub const ACCOUNTS: &str = "accounts";
    pub const TRANSACTIONS: &str = "transactions";
    pub const BUDGETS: &str = "budgets";
    pub const REMINDERS: &str = "reminders";
}

/// A stored record: one JSON object
pub type Document = serde_json::Map<String, Value>;

/// Sort direction for query results
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

/// Equality-filtered query over one collection
///
/// Predicates are ANDed; an empty query matches the whole collection. At
/// most one field drives the sort, mirroring what hosted document
/// databases offer without composite indexes.
#[derive(Debug, Clone, Default)]
pub struct Query {
    pub filters: Vec<(String, Value)>,
    pub sort: Option<(String, SortOrder)>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an equality predicate on a document field
    pub fn filter(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.filters.push((field.into(), value.into()));
        self
    }

    /// Sort the result set by a single field
    pub fn sort_by(mut self, field: impl Into<String>, order: SortOrder) -> Self {
        self.sort = Some((field.into(), order));
        self
    }

    /// Whether a document satisfies every predicate
    pub fn matches(&self, document: &Document) -> bool {
        self.filters
            .iter()
            .all(|(field, expected)| document.get(field) == Some(expected))
    }
}

/// Field ordering used by adapters when a query requests a sort
///
/// Numbers order numerically, strings lexically (ISO dates therefore sort
/// chronologically), missing fields sort first.
pub fn compare_field(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(a), Some(b)) => match (a, b) {
            (Value::Number(x), Value::Number(y)) => x
                .as_f64()
                .unwrap_or(0.0)
                .partial_cmp(&y.as_f64().unwrap_or(0.0))
                .unwrap_or(Ordering::Equal),
            (Value::String(x), Value::String(y)) => x.cmp(y),
            (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
            _ => Ordering::Equal,
        },
    }
}

/// Evaluate a query against candidate documents
///
/// Shared by adapters that hold plain document sets and evaluate queries
/// themselves.
pub fn run_query<'a>(
    documents: impl Iterator<Item = &'a Document>,
    query: &Query,
) -> Vec<Document> {
    let mut matches: Vec<Document> = documents
        .filter(|document| query.matches(document))
        .cloned()
        .collect();
    if let Some((field, order)) = &query.sort {
        matches.sort_by(|a, b| {
            let ordering = compare_field(a.get(field), b.get(field));
            match order {
                SortOrder::Ascending => ordering,
                SortOrder::Descending => ordering.reverse(),
            }
        });
    }
    matches
}

/// Persistent store abstraction
///
/// This trait defines all persistence operations the core needs: keyed
/// CRUD plus equality-filtered queries over named collections of JSON
/// documents. Implementations (adapters) provide the actual storage;
/// production shells attach their hosted document database here.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Create or replace the record `id` in `collection`
    async fn put(&self, collection: &str, id: &str, document: Document) -> Result<()>;

    /// Fetch one record; `None` when absent
    async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>>;

    /// Remove a record. Removing an absent record is not an error.
    async fn delete(&self, collection: &str, id: &str) -> Result<()>;

    /// All records satisfying the query
    async fn find(&self, collection: &str, query: Query) -> Result<Vec<Document>>;
}

/// Serialize an entity into its stored document form
pub fn to_document<T: Serialize>(entity: &T) -> Result<Document> {
    match serde_json::to_value(entity)? {
        Value::Object(map) => Ok(map),
        _ => Err(Error::validation(
            "entity did not serialize to a JSON object",
        )),
    }
}

/// Deserialize a stored document back into an entity
pub fn from_document<T: DeserializeOwned>(document: Document) -> Result<T> {
    Ok(serde_json::from_value(Value::Object(document))?)
}

/// Deserialize a whole result set
pub fn from_documents<T: DeserializeOwned>(documents: Vec<Document>) -> Result<Vec<T>> {
    documents.into_iter().map(from_document).collect()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn doc(value: Value) -> Document {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    #[test]
    fn test_query_matches_all_predicates() {
        let query = Query::new()
            .filter("userId", "user-1")
            .filter("type", "expense");

        let hit = doc(json!({"userId": "user-1", "type": "expense", "amount": "10"}));
        let wrong_type = doc(json!({"userId": "user-1", "type": "income"}));
        let missing_field = doc(json!({"type": "expense"}));

        assert!(query.matches(&hit));
        assert!(!query.matches(&wrong_type));
        assert!(!query.matches(&missing_field));
    }

    #[test]
    fn test_empty_query_matches_everything() {
        assert!(Query::new().matches(&doc(json!({"anything": 1}))));
    }

    #[test]
    fn test_compare_field_orders_dates_chronologically() {
        let earlier = json!("2024-02-20");
        let later = json!("2024-03-05");
        assert_eq!(
            compare_field(Some(&earlier), Some(&later)),
            Ordering::Less
        );
    }

    #[test]
    fn test_compare_field_missing_sorts_first() {
        let value = json!(5);
        assert_eq!(compare_field(None, Some(&value)), Ordering::Less);
        assert_eq!(compare_field(Some(&value), None), Ordering::Greater);
    }

    #[test]
    fn test_document_round_trip() {
        use crate::domain::{EntryKind, Transaction, UserId};
        use rust_decimal::Decimal;

        let tx = Transaction::new(
            UserId::new("user-1"),
            uuid::Uuid::new_v4(),
            EntryKind::Expense,
            "Bus ticket",
            Decimal::new(450, 2),
            "Transport",
            "2024-03-11".parse().unwrap(),
        );
        let document = to_document(&tx).unwrap();
        assert_eq!(document["type"], "expense");
        let back: Transaction = from_document(document).unwrap();
        assert_eq!(back, tx);
    }
}
