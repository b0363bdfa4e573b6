#![allow(dead_code)]

use std::{path::PathBuf, sync::Mutex};

use chrono::NaiveDate;
use finance_core::{
    config::ConfigManager,
    domain::{AccountRef, Budget, CategoryRef, PeriodKind, Transaction, TransactionKind},
    storage::{save_snapshot, Snapshot},
};
use once_cell::sync::Lazy;
use rust_decimal::Decimal;
use tempfile::TempDir;
use uuid::Uuid;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// Creates a unique base directory that outlives the calling test.
pub fn temp_base() -> PathBuf {
    let temp = TempDir::new().expect("create temp dir");
    let base = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    base
}

/// Isolated config manager backed by a unique directory.
pub fn setup_test_env() -> (PathBuf, ConfigManager) {
    let base = temp_base();
    let config_manager =
        ConfigManager::with_base_dir(base.clone()).expect("create config manager for temp dir");
    (base, config_manager)
}

/// Writes `budgets` and `transactions` as a snapshot file and returns its path.
pub fn write_snapshot(budgets: Vec<Budget>, transactions: Vec<Transaction>) -> PathBuf {
    let path = temp_base().join("snapshot.json");
    save_snapshot(
        &Snapshot {
            budgets,
            transactions,
        },
        &path,
    )
    .expect("write snapshot");
    path
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

pub fn checking() -> AccountRef {
    AccountRef::new("Checking")
}

pub fn groceries() -> CategoryRef {
    CategoryRef::new("Groceries")
}

pub fn expense(title: &str, amount: Decimal, on: NaiveDate) -> Transaction {
    Transaction::new(title, amount, TransactionKind::Expense, on, checking())
}

pub fn income(title: &str, amount: Decimal, on: NaiveDate) -> Transaction {
    Transaction::new(title, amount, TransactionKind::Income, on, checking())
}

pub fn monthly_budget(name: &str, limit: Decimal, start: NaiveDate) -> Budget {
    Budget::new(Uuid::new_v4(), name, limit, PeriodKind::Monthly, start)
}
