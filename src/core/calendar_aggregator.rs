//! Day and month totals for the transaction calendar.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::{PaymentStatus, Transaction, TransactionKind};

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct StatusCounts {
    pub paid: usize,
    pub pending: usize,
    pub overdue: usize,
}

impl StatusCounts {
    pub fn record(&mut self, status: PaymentStatus) {
        match status {
            PaymentStatus::Paid => self.paid += 1,
            PaymentStatus::Pending => self.pending += 1,
            PaymentStatus::Overdue => self.overdue += 1,
        }
    }

    pub fn get(&self, status: PaymentStatus) -> usize {
        match status {
            PaymentStatus::Paid => self.paid,
            PaymentStatus::Pending => self.pending,
            PaymentStatus::Overdue => self.overdue,
        }
    }

    pub fn total(&self) -> usize {
        self.paid + self.pending + self.overdue
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DaySummary {
    pub date: NaiveDate,
    pub total_income: Decimal,
    pub total_expense: Decimal,
    pub net_balance: Decimal,
    pub transactions: Vec<Transaction>,
}

impl DaySummary {
    pub fn empty(date: NaiveDate) -> Self {
        Self {
            date,
            total_income: Decimal::ZERO,
            total_expense: Decimal::ZERO,
            net_balance: Decimal::ZERO,
            transactions: Vec::new(),
        }
    }

    fn push(&mut self, transaction: &Transaction) {
        match transaction.kind {
            TransactionKind::Income => {
                self.total_income = self.total_income.saturating_add(transaction.amount)
            }
            TransactionKind::Expense => {
                self.total_expense = self.total_expense.saturating_add(transaction.amount)
            }
        }
        self.net_balance = self.total_income.saturating_sub(self.total_expense);
        self.transactions.push(transaction.clone());
    }

    pub fn has_transactions(&self) -> bool {
        !self.transactions.is_empty()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct MonthSummary {
    pub total_income: Decimal,
    pub total_expense: Decimal,
    pub net_balance: Decimal,
    pub total_transactions: usize,
    pub status_counts: StatusCounts,
}

/// Payment status never filters here: pending and overdue records count
/// toward every total. Status filtering belongs in the query.
pub struct CalendarAggregator;

impl CalendarAggregator {
    /// Buckets transactions by their date; each lands in exactly one bucket.
    pub fn bucket_by_day(transactions: &[Transaction]) -> BTreeMap<NaiveDate, DaySummary> {
        let mut days: BTreeMap<NaiveDate, DaySummary> = BTreeMap::new();
        for transaction in transactions {
            days.entry(transaction.date)
                .or_insert_with(|| DaySummary::empty(transaction.date))
                .push(transaction);
        }
        tracing::debug!(
            transactions = transactions.len(),
            days = days.len(),
            "bucketed transactions by day"
        );
        days
    }

    /// Summary for a single date, empty when nothing matches.
    pub fn summarize_day(date: NaiveDate, transactions: &[Transaction]) -> DaySummary {
        transactions
            .iter()
            .filter(|txn| txn.date == date)
            .fold(DaySummary::empty(date), |mut day, txn| {
                day.push(txn);
                day
            })
    }

    pub fn summarize_month(transactions: &[Transaction]) -> MonthSummary {
        let mut summary = MonthSummary::default();
        for transaction in transactions {
            match transaction.kind {
                TransactionKind::Income => {
                    summary.total_income = summary.total_income.saturating_add(transaction.amount)
                }
                TransactionKind::Expense => {
                    summary.total_expense = summary.total_expense.saturating_add(transaction.amount)
                }
            }
            summary.status_counts.record(transaction.status);
        }
        summary.total_transactions = transactions.len();
        summary.net_balance = summary.total_income.saturating_sub(summary.total_expense);
        summary
    }
}
