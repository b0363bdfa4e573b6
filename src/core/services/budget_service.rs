//! Fetch-then-aggregate flow behind the budgets screen.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::core::budget_aggregator::{BudgetAggregator, BudgetOverview, BudgetProgress};
use crate::domain::{Budget, DateWindow, PaymentStatus, Transaction, TransactionKind};
use crate::storage::{BudgetQuery, RecordSource, TransactionQuery};

use super::ServiceResult;

/// Raw records returned by the fetch phase.
#[derive(Debug, Clone, Default)]
pub struct BudgetRecords {
    pub budgets: Vec<Budget>,
    pub transactions: Vec<Transaction>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BudgetReport {
    pub budget: Budget,
    /// `None` when the reference date is outside the budget's lifetime.
    pub window: Option<DateWindow>,
    pub progress: BudgetProgress,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BudgetDashboard {
    pub reference: NaiveDate,
    pub reports: Vec<BudgetReport>,
    pub overview: BudgetOverview,
}

impl BudgetDashboard {
    pub fn report(&self, budget_id: Uuid) -> Option<&BudgetReport> {
        self.reports.iter().find(|report| report.budget.id == budget_id)
    }
}

pub struct BudgetService;

impl BudgetService {
    /// Budgets of `owner` plus the paid expenses covering every budget's current window.
    pub async fn fetch(
        source: &dyn RecordSource,
        owner: Option<Uuid>,
        reference: NaiveDate,
    ) -> ServiceResult<BudgetRecords> {
        let budgets = source
            .fetch_budgets(&BudgetQuery {
                owner_id: owner,
                active_only: false,
            })
            .await?;

        let window = budgets
            .iter()
            .filter_map(|budget| budget.period_window(reference))
            .reduce(|acc, window| acc.span(&window));

        let transactions = match window {
            Some(window) => {
                let query = TransactionQuery::for_window(window)
                    .with_kind(TransactionKind::Expense)
                    .with_statuses([PaymentStatus::Paid]);
                source.fetch_transactions(&query).await?
            }
            None => Vec::new(),
        };

        Ok(BudgetRecords {
            budgets,
            transactions,
        })
    }

    /// Pure second phase: progress per budget and the overview of the active set.
    pub fn aggregate(records: &BudgetRecords, reference: NaiveDate) -> BudgetDashboard {
        let reports: Vec<BudgetReport> = records
            .budgets
            .iter()
            .map(|budget| BudgetReport {
                budget: budget.clone(),
                window: budget.period_window(reference),
                progress: BudgetAggregator::progress_for(budget, &records.transactions, reference),
            })
            .collect();
        let overview = BudgetAggregator::summarize(
            reports
                .iter()
                .map(|report| (&report.budget, &report.progress)),
        );
        BudgetDashboard {
            reference,
            reports,
            overview,
        }
    }

    pub async fn load(
        source: &dyn RecordSource,
        owner: Option<Uuid>,
        reference: NaiveDate,
    ) -> ServiceResult<BudgetDashboard> {
        let records = Self::fetch(source, owner, reference).await?;
        let dashboard = Self::aggregate(&records, reference);
        tracing::info!(
            budgets = dashboard.reports.len(),
            exceeded = dashboard.overview.exceeded_count,
            "budget dashboard loaded"
        );
        Ok(dashboard)
    }
}
