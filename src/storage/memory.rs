use async_trait::async_trait;

use super::{select_budgets, select_transactions, BudgetQuery, RecordSource, TransactionQuery};
use crate::{
    domain::{Budget, Transaction},
    errors::Result,
};

/// Vector-backed source; useful for embedding and tests.
#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    pub budgets: Vec<Budget>,
    pub transactions: Vec<Transaction>,
}

impl InMemorySource {
    pub fn new(budgets: Vec<Budget>, transactions: Vec<Transaction>) -> Self {
        Self {
            budgets,
            transactions,
        }
    }
}

#[async_trait]
impl RecordSource for InMemorySource {
    async fn fetch_transactions(&self, query: &TransactionQuery) -> Result<Vec<Transaction>> {
        Ok(select_transactions(&self.transactions, query))
    }

    async fn fetch_budgets(&self, query: &BudgetQuery) -> Result<Vec<Budget>> {
        Ok(select_budgets(&self.budgets, query))
    }
}
