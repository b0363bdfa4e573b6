use std::collections::BTreeSet;

use chrono::{DateTime, Duration, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{
    period::{DateWindow, PeriodKind},
    transaction::Transaction,
};
use crate::errors::FinanceError;

pub const DEFAULT_ALERT_THRESHOLD: u8 = 80;

/// A spending limit over a period, optionally scoped to categories and accounts.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Budget {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub limit_amount: Decimal,
    pub period: PeriodKind,
    pub start_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    /// Empty means every category.
    #[serde(default)]
    pub category_ids: BTreeSet<Uuid>,
    /// Empty means every account.
    #[serde(default)]
    pub account_ids: BTreeSet<Uuid>,
    #[serde(default = "Budget::default_alert_threshold")]
    pub alert_threshold: u8,
    #[serde(default = "Budget::default_active")]
    pub active: bool,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}

impl Budget {
    pub fn new(
        owner_id: Uuid,
        name: impl Into<String>,
        limit_amount: Decimal,
        period: PeriodKind,
        start_date: NaiveDate,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            owner_id,
            name: name.into(),
            description: None,
            limit_amount,
            period,
            start_date,
            end_date: None,
            category_ids: BTreeSet::new(),
            account_ids: BTreeSet::new(),
            alert_threshold: DEFAULT_ALERT_THRESHOLD,
            active: true,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_threshold(mut self, threshold: u8) -> Self {
        self.alert_threshold = threshold;
        self
    }

    pub fn with_end_date(mut self, end_date: NaiveDate) -> Self {
        self.end_date = Some(end_date);
        self
    }

    pub fn with_categories(mut self, ids: impl IntoIterator<Item = Uuid>) -> Self {
        self.category_ids.extend(ids);
        self
    }

    pub fn with_accounts(mut self, ids: impl IntoIterator<Item = Uuid>) -> Self {
        self.account_ids.extend(ids);
        self
    }

    pub fn inactive(mut self) -> Self {
        self.active = false;
        self
    }

    /// Checks the definition invariants enforced when a budget is saved.
    pub fn validate(&self) -> Result<(), FinanceError> {
        if self.name.trim().is_empty() {
            return Err(FinanceError::InvalidInput("budget name is required".into()));
        }
        if self.limit_amount <= Decimal::ZERO {
            return Err(FinanceError::InvalidInput(format!(
                "budget `{}` limit must be positive",
                self.name
            )));
        }
        if !(1..=100).contains(&self.alert_threshold) {
            return Err(FinanceError::InvalidInput(format!(
                "budget `{}` alert threshold must be between 1 and 100",
                self.name
            )));
        }
        if let Some(end) = self.end_date {
            if end < self.start_date {
                return Err(FinanceError::InvalidInput(format!(
                    "budget `{}` ends before it starts",
                    self.name
                )));
            }
        }
        Ok(())
    }

    /// The budget's lifetime as a half-open window; `None` end means unbounded.
    fn lifetime(&self) -> DateWindow {
        let end = self
            .end_date
            .map(|end| end + Duration::days(1))
            .unwrap_or(NaiveDate::MAX);
        DateWindow {
            start: self.start_date,
            end,
        }
    }

    /// Current period cycle clipped to `[start, end]`; `None` when `reference`
    /// falls in a cycle that does not overlap the budget's lifetime.
    pub fn period_window(&self, reference: NaiveDate) -> Option<DateWindow> {
        self.period
            .cycle_window(self.start_date, reference)
            .intersect(&self.lifetime())
    }

    /// Set-membership scope check; an empty set does not restrict.
    pub fn in_scope(&self, transaction: &Transaction) -> bool {
        let category_ok = self.category_ids.is_empty()
            || transaction
                .category_id()
                .is_some_and(|id| self.category_ids.contains(&id));
        let account_ok =
            self.account_ids.is_empty() || self.account_ids.contains(&transaction.account.id);
        category_ok && account_ok
    }

    pub fn default_alert_threshold() -> u8 {
        DEFAULT_ALERT_THRESHOLD
    }

    fn default_active() -> bool {
        true
    }
}
