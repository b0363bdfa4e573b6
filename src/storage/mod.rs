//! Fetch seam between the aggregation core and the remote record store.

pub mod json_backend;
pub mod memory;

use std::collections::BTreeSet;

use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    domain::{Budget, DateWindow, PaymentStatus, Transaction, TransactionKind},
    errors::Result,
};

pub use json_backend::{load_snapshot, save_snapshot, JsonSnapshotSource, Snapshot};
pub use memory::InMemorySource;

/// Filters pushed down to the store. Empty sets do not restrict.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionQuery {
    pub window: DateWindow,
    pub kind: Option<TransactionKind>,
    pub statuses: BTreeSet<PaymentStatus>,
    pub category_ids: BTreeSet<Uuid>,
    pub account_ids: BTreeSet<Uuid>,
}

impl TransactionQuery {
    pub fn for_window(window: DateWindow) -> Self {
        Self {
            window,
            kind: None,
            statuses: BTreeSet::new(),
            category_ids: BTreeSet::new(),
            account_ids: BTreeSet::new(),
        }
    }

    pub fn with_kind(mut self, kind: TransactionKind) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn with_statuses(mut self, statuses: impl IntoIterator<Item = PaymentStatus>) -> Self {
        self.statuses.extend(statuses);
        self
    }

    pub fn matches(&self, transaction: &Transaction) -> bool {
        self.window.contains(transaction.date)
            && self.kind.map_or(true, |kind| kind == transaction.kind)
            && (self.statuses.is_empty() || self.statuses.contains(&transaction.status))
            && (self.category_ids.is_empty()
                || transaction
                    .category_id()
                    .is_some_and(|id| self.category_ids.contains(&id)))
            && (self.account_ids.is_empty() || self.account_ids.contains(&transaction.account.id))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BudgetQuery {
    pub owner_id: Option<Uuid>,
    pub active_only: bool,
}

impl BudgetQuery {
    pub fn matches(&self, budget: &Budget) -> bool {
        self.owner_id.map_or(true, |owner| owner == budget.owner_id)
            && (!self.active_only || budget.active)
    }
}

/// Asynchronous access to budgets and transactions.
///
/// Implementations return transactions ordered by date.
#[async_trait]
pub trait RecordSource: Send + Sync {
    async fn fetch_transactions(&self, query: &TransactionQuery) -> Result<Vec<Transaction>>;
    async fn fetch_budgets(&self, query: &BudgetQuery) -> Result<Vec<Budget>>;
}

pub(crate) fn select_transactions<'a, I>(records: I, query: &TransactionQuery) -> Vec<Transaction>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut selected: Vec<Transaction> = records
        .into_iter()
        .filter(|txn| query.matches(txn))
        .cloned()
        .collect();
    selected.sort_by(|a, b| a.date.cmp(&b.date));
    selected
}

pub(crate) fn select_budgets<'a, I>(records: I, query: &BudgetQuery) -> Vec<Budget>
where
    I: IntoIterator<Item = &'a Budget>,
{
    records
        .into_iter()
        .filter(|budget| query.matches(budget))
        .cloned()
        .collect()
}
