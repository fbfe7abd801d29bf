//! Reminder service - bill reminders

use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::info;
use uuid::Uuid;

use crate::domain::{Error, Reminder, Result, UserId};
use crate::ports::{collections, from_documents, to_document, DocumentStore, Query, SortOrder};

/// Manages standalone bill reminders
#[derive(Clone)]
pub struct ReminderService {
    store: Arc<dyn DocumentStore>,
}

impl ReminderService {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Create a reminder
    pub async fn create(
        &self,
        user: &UserId,
        description: impl Into<String>,
        amount: Decimal,
        due_date: NaiveDate,
    ) -> Result<Reminder> {
        let reminder = Reminder::new(user.clone(), description, amount, due_date);
        reminder.validate()?;
        self.store
            .put(
                collections::REMINDERS,
                &reminder.id.to_string(),
                to_document(&reminder)?,
            )
            .await?;
        info!(
            "created reminder `{}` due {}",
            reminder.description, reminder.due_date
        );
        Ok(reminder)
    }

    /// The user's reminders, soonest due date first
    pub async fn list(&self, user: &UserId) -> Result<Vec<Reminder>> {
        let query = Query::new()
            .filter("userId", user.as_str())
            .sort_by("dueDate", SortOrder::Ascending);
        let documents = self.store.find(collections::REMINDERS, query).await?;
        from_documents(documents)
    }

    /// Delete a reminder
    pub async fn remove(&self, user: &UserId, id: Uuid) -> Result<()> {
        let document = self.store.get(collections::REMINDERS, &id.to_string()).await?;
        let reminder: Reminder = match document {
            Some(document) => crate::ports::from_document(document)?,
            None => return Err(Error::not_found(format!("reminder {}", id))),
        };
        if reminder.user_id != *user {
            return Err(Error::not_found(format!("reminder {}", id)));
        }
        self.store.delete(collections::REMINDERS, &id.to_string()).await
    }

    /// Reminders due within the look-ahead window, soonest first
    ///
    /// Overdue reminders are excluded; they surface through `list` with
    /// their schedule status instead.
    pub async fn upcoming(
        &self,
        user: &UserId,
        today: NaiveDate,
        window_days: i64,
    ) -> Result<Vec<Reminder>> {
        let reminders = self.list(user).await?;
        Ok(reminders
            .into_iter()
            .filter(|reminder| reminder.is_due_within(today, window_days))
            .collect())
    }
}
