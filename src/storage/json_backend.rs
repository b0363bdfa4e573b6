use std::{
    fs,
    path::{Path, PathBuf},
};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::{select_budgets, select_transactions, BudgetQuery, RecordSource, TransactionQuery};
use crate::{
    core::utils::write_atomic,
    domain::{Budget, Transaction},
    errors::{FinanceError, Result},
};

/// Export of the remote store's budgets and transactions.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub budgets: Vec<Budget>,
    #[serde(default)]
    pub transactions: Vec<Transaction>,
}

/// Reads a JSON snapshot on every fetch, so edits to the file show up on the next reload.
#[derive(Debug, Clone)]
pub struct JsonSnapshotSource {
    path: PathBuf,
}

impl JsonSnapshotSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read(&self) -> Result<Snapshot> {
        let data = tokio::fs::read_to_string(&self.path).await.map_err(|err| {
            FinanceError::Fetch(format!("cannot read `{}`: {err}", self.path.display()))
        })?;
        Ok(serde_json::from_str(&data)?)
    }
}

#[async_trait]
impl RecordSource for JsonSnapshotSource {
    async fn fetch_transactions(&self, query: &TransactionQuery) -> Result<Vec<Transaction>> {
        let snapshot = self.read().await?;
        let selected = select_transactions(&snapshot.transactions, query);
        tracing::debug!(
            path = %self.path.display(),
            matched = selected.len(),
            "fetched transactions from snapshot"
        );
        Ok(selected)
    }

    async fn fetch_budgets(&self, query: &BudgetQuery) -> Result<Vec<Budget>> {
        let snapshot = self.read().await?;
        Ok(select_budgets(&snapshot.budgets, query))
    }
}

/// Loads a snapshot synchronously.
pub fn load_snapshot(path: &Path) -> Result<Snapshot> {
    let data = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&data)?)
}

/// Writes the snapshot by staging to a temporary file and renaming it into place.
pub fn save_snapshot(snapshot: &Snapshot, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(snapshot)?;
    write_atomic(path, &json)
}
