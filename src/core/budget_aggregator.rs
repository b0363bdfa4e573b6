//! Spend-to-date, remaining and status classification for budgets.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{Budget, PaymentStatus, Transaction};

const HUNDRED: Decimal = dec!(100);

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum BudgetStatus {
    Ok,
    Alert,
    Exceeded,
}

impl BudgetStatus {
    pub fn label(&self) -> &'static str {
        match self {
            BudgetStatus::Ok => "ok",
            BudgetStatus::Alert => "alert",
            BudgetStatus::Exceeded => "exceeded",
        }
    }
}

/// Derived progress of one budget. Never persisted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BudgetProgress {
    pub budget_id: Uuid,
    pub limit: Decimal,
    pub spent: Decimal,
    /// `max(limit - spent, 0)`.
    pub remaining: Decimal,
    /// `max(spent - limit, 0)`; the excess the clamped percentage hides.
    pub overspent: Decimal,
    /// Clamped to `[0, 100]` for display.
    pub percentage: Decimal,
    /// Raw `spent > limit`, independent of the clamped percentage.
    pub exceeded: bool,
    pub alert_threshold: u8,
    pub status: BudgetStatus,
}

/// Totals across the active budget set.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct BudgetOverview {
    pub total_limit: Decimal,
    pub total_spent: Decimal,
    pub total_remaining: Decimal,
    /// `total_spent / total_limit * 100`, not clamped; saturates at `Decimal::MAX`.
    pub overall_percentage: Decimal,
    pub budget_count: usize,
    pub ok_count: usize,
    pub alert_count: usize,
    pub exceeded_count: usize,
}

impl BudgetOverview {
    pub fn count_for(&self, status: BudgetStatus) -> usize {
        match status {
            BudgetStatus::Ok => self.ok_count,
            BudgetStatus::Alert => self.alert_count,
            BudgetStatus::Exceeded => self.exceeded_count,
        }
    }
}

pub struct BudgetAggregator;

impl BudgetAggregator {
    /// Computes progress from amounts the caller already filtered to the
    /// budget's window and scope.
    ///
    /// A non-positive limit is degenerate: percentage 0 and status `ok`.
    pub fn compute_progress<I>(budget: &Budget, matching_expense_amounts: I) -> BudgetProgress
    where
        I: IntoIterator<Item = Decimal>,
    {
        let limit = budget.limit_amount;
        let spent = matching_expense_amounts
            .into_iter()
            .fold(Decimal::ZERO, Decimal::saturating_add);
        let remaining = limit.saturating_sub(spent).max(Decimal::ZERO);
        let overspent = spent.saturating_sub(limit).max(Decimal::ZERO);
        let exceeded = spent > limit;

        let (percentage, status) = if limit <= Decimal::ZERO {
            (Decimal::ZERO, BudgetStatus::Ok)
        } else if exceeded {
            (HUNDRED, BudgetStatus::Exceeded)
        } else {
            // spent <= limit here, so the ratio cannot overflow.
            let percentage = spent
                .checked_div(limit)
                .and_then(|ratio| ratio.checked_mul(HUNDRED))
                .unwrap_or(Decimal::ZERO)
                .clamp(Decimal::ZERO, HUNDRED);
            let status = if percentage >= Decimal::from(budget.alert_threshold) {
                BudgetStatus::Alert
            } else {
                BudgetStatus::Ok
            };
            (percentage, status)
        };

        tracing::trace!(
            budget = %budget.id,
            %spent,
            %percentage,
            status = status.label(),
            "computed budget progress"
        );

        BudgetProgress {
            budget_id: budget.id,
            limit,
            spent,
            remaining,
            overspent,
            percentage,
            exceeded,
            alert_threshold: budget.alert_threshold,
            status,
        }
    }

    /// Amounts of paid expenses inside the budget's current period window and scope.
    pub fn matching_expense_amounts(
        budget: &Budget,
        transactions: &[Transaction],
        reference: NaiveDate,
    ) -> Vec<Decimal> {
        let Some(window) = budget.period_window(reference) else {
            return Vec::new();
        };
        transactions
            .iter()
            .filter(|txn| txn.is_expense() && txn.status == PaymentStatus::Paid)
            .filter(|txn| window.contains(txn.date))
            .filter(|txn| budget.in_scope(txn))
            .map(|txn| txn.amount)
            .collect()
    }

    /// Filters `transactions` for `budget` and computes its progress in one step.
    pub fn progress_for(
        budget: &Budget,
        transactions: &[Transaction],
        reference: NaiveDate,
    ) -> BudgetProgress {
        let amounts = Self::matching_expense_amounts(budget, transactions, reference);
        Self::compute_progress(budget, amounts)
    }

    /// Aggregates the active budgets; inactive entries are skipped entirely.
    pub fn summarize<'a, I>(entries: I) -> BudgetOverview
    where
        I: IntoIterator<Item = (&'a Budget, &'a BudgetProgress)>,
    {
        let mut overview = BudgetOverview::default();
        for (budget, progress) in entries {
            if !budget.active {
                continue;
            }
            overview.total_limit = overview.total_limit.saturating_add(progress.limit);
            overview.total_spent = overview.total_spent.saturating_add(progress.spent);
            overview.total_remaining = overview.total_remaining.saturating_add(progress.remaining);
            overview.budget_count += 1;
            match progress.status {
                BudgetStatus::Ok => overview.ok_count += 1,
                BudgetStatus::Alert => overview.alert_count += 1,
                BudgetStatus::Exceeded => overview.exceeded_count += 1,
            }
        }
        if overview.total_limit > Decimal::ZERO {
            overview.overall_percentage = overview
                .total_spent
                .checked_div(overview.total_limit)
                .and_then(|ratio| ratio.checked_mul(HUNDRED))
                .unwrap_or(Decimal::MAX);
        }
        overview
    }
}
