//! Funding source domain model

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::result::{Error, Result};
use crate::domain::user::UserId;

/// A place money lives or is borrowed from: a bank account or a credit card
///
/// Both kinds share one stored collection, discriminated by the `type`
/// field. The derived fields (`balance` for banks, `current_spent` for
/// cards) are caches recomputed from the transaction ledger; the stored
/// value is never the source of truth.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FundingSource {
    pub id: Uuid,
    pub user_id: UserId,
    pub name: String,
    pub color: String,
    #[serde(flatten)]
    pub kind: SourceKind,
    pub created_at: DateTime<Utc>,
}

/// Kind discriminant and kind-specific fields
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SourceKind {
    #[serde(rename_all = "camelCase")]
    Bank {
        /// Issuing bank name
        bank: String,
        /// Derived: sum of all entries against this account
        balance: Decimal,
    },
    #[serde(rename_all = "camelCase")]
    Card {
        brand: String,
        /// Credit limit, always positive
        limit: Decimal,
        /// Statement closing day of month (1-31)
        closing_day: u8,
        /// Payment due day of month (1-31)
        due_day: u8,
        /// Derived: sum of all expense entries against this card
        current_spent: Decimal,
    },
}

impl FundingSource {
    /// Create a bank account. The opening balance is only a seed; the first
    /// reconciliation replaces it with the ledger-derived value.
    pub fn bank(
        user_id: UserId,
        name: impl Into<String>,
        bank: impl Into<String>,
        opening_balance: Decimal,
        color: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            name: name.into(),
            color: color.into(),
            kind: SourceKind::Bank {
                bank: bank.into(),
                balance: opening_balance,
            },
            created_at: Utc::now(),
        }
    }

    /// Create a card with no spend recorded yet
    pub fn card(
        user_id: UserId,
        name: impl Into<String>,
        brand: impl Into<String>,
        limit: Decimal,
        closing_day: u8,
        due_day: u8,
        color: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            name: name.into(),
            color: color.into(),
            kind: SourceKind::Card {
                brand: brand.into(),
                limit,
                closing_day,
                due_day,
                current_spent: Decimal::ZERO,
            },
            created_at: Utc::now(),
        }
    }

    pub fn is_bank(&self) -> bool {
        matches!(self.kind, SourceKind::Bank { .. })
    }

    pub fn is_card(&self) -> bool {
        matches!(self.kind, SourceKind::Card { .. })
    }

    /// The discriminant value as stored in documents
    pub fn kind_name(&self) -> &'static str {
        match self.kind {
            SourceKind::Bank { .. } => "bank",
            SourceKind::Card { .. } => "card",
        }
    }

    /// Replace the derived balance cache. Only valid for bank accounts.
    pub fn set_balance(&mut self, value: Decimal) -> Result<()> {
        match &mut self.kind {
            SourceKind::Bank { balance, .. } => {
                *balance = value;
                Ok(())
            }
            SourceKind::Card { .. } => Err(Error::validation(format!(
                "funding source {} is a card and has no balance field",
                self.id
            ))),
        }
    }

    /// Replace the derived spend cache. Only valid for cards.
    pub fn set_current_spent(&mut self, value: Decimal) -> Result<()> {
        match &mut self.kind {
            SourceKind::Card { current_spent, .. } => {
                *current_spent = value;
                Ok(())
            }
            SourceKind::Bank { .. } => Err(Error::validation(format!(
                "funding source {} is a bank account and has no spend field",
                self.id
            ))),
        }
    }

    /// Derived credit position. Errors for bank accounts and for cards whose
    /// stored limit is not positive.
    pub fn card_position(&self) -> Result<CardPosition> {
        match &self.kind {
            SourceKind::Card {
                limit,
                current_spent,
                ..
            } => {
                if *limit <= Decimal::ZERO {
                    return Err(Error::InvalidAmount(*limit));
                }
                Ok(CardPosition {
                    limit: *limit,
                    spent: *current_spent,
                    available: *limit - *current_spent,
                    percentage: *current_spent / *limit * Decimal::ONE_HUNDRED,
                })
            }
            SourceKind::Bank { .. } => Err(Error::validation(format!(
                "funding source {} is not a card",
                self.id
            ))),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::validation("funding source name cannot be empty"));
        }
        match &self.kind {
            SourceKind::Bank { bank, .. } => {
                if bank.trim().is_empty() {
                    return Err(Error::validation("bank name cannot be empty"));
                }
            }
            SourceKind::Card {
                brand,
                limit,
                closing_day,
                due_day,
                current_spent,
            } => {
                if brand.trim().is_empty() {
                    return Err(Error::validation("card brand cannot be empty"));
                }
                if *limit <= Decimal::ZERO {
                    return Err(Error::InvalidAmount(*limit));
                }
                if *current_spent < Decimal::ZERO {
                    return Err(Error::InvalidAmount(*current_spent));
                }
                for (label, day) in [("closing", *closing_day), ("due", *due_day)] {
                    if !(1..=31).contains(&day) {
                        return Err(Error::validation(format!(
                            "card {} day {} is out of range (1-31)",
                            label, day
                        )));
                    }
                }
            }
        }
        Ok(())
    }
}

/// Credit position derived from a card's limit and spend
///
/// `percentage` is the raw utilization; values above 100 signal an
/// over-limit card and are preserved as-is. Display clamping is provided
/// separately so the stored figure is never distorted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CardPosition {
    pub limit: Decimal,
    pub spent: Decimal,
    pub available: Decimal,
    pub percentage: Decimal,
}

impl CardPosition {
    pub fn is_over_limit(&self) -> bool {
        self.percentage > Decimal::ONE_HUNDRED
    }

    /// Utilization clamped to [0, 100], for progress bar widths
    pub fn gauge_width(&self) -> Decimal {
        self.percentage.clamp(Decimal::ZERO, Decimal::ONE_HUNDRED)
    }
}
