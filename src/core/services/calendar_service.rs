use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::core::calendar_aggregator::{CalendarAggregator, DaySummary, MonthSummary};
use crate::core::calendar_grid::{CalendarGrid, MonthCursor};
use crate::domain::{PaymentStatus, Transaction, TransactionKind};
use crate::storage::{RecordSource, TransactionQuery};

use super::ServiceResult;

/// Filter values owned by the calendar screen.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarFilters {
    pub kind: Option<TransactionKind>,
    #[serde(default)]
    pub statuses: BTreeSet<PaymentStatus>,
    #[serde(default)]
    pub category_ids: BTreeSet<Uuid>,
    #[serde(default)]
    pub account_ids: BTreeSet<Uuid>,
    /// Also load the adjacent-month days shown as grid padding.
    #[serde(default)]
    pub include_padding_days: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalendarView {
    pub cursor: MonthCursor,
    pub days: BTreeMap<NaiveDate, DaySummary>,
    pub month: MonthSummary,
    pub grid: CalendarGrid,
}

impl CalendarView {
    pub fn day(&self, date: NaiveDate) -> Option<&DaySummary> {
        self.days.get(&date)
    }
}

pub struct CalendarService;

impl CalendarService {
    pub fn query_for(cursor: &MonthCursor, filters: &CalendarFilters) -> TransactionQuery {
        let window = if filters.include_padding_days {
            cursor.grid_window()
        } else {
            cursor.month_window()
        };
        TransactionQuery {
            window,
            kind: filters.kind,
            statuses: filters.statuses.clone(),
            category_ids: filters.category_ids.clone(),
            account_ids: filters.account_ids.clone(),
        }
    }

    pub async fn fetch(
        source: &dyn RecordSource,
        cursor: &MonthCursor,
        filters: &CalendarFilters,
    ) -> ServiceResult<Vec<Transaction>> {
        let query = Self::query_for(cursor, filters);
        Ok(source.fetch_transactions(&query).await?)
    }

    /// Builds the day buckets, the month totals and the display grid.
    ///
    /// Month totals only cover the cursor's month even when padding days were loaded.
    pub fn aggregate(
        cursor: &MonthCursor,
        transactions: &[Transaction],
        today: Option<NaiveDate>,
    ) -> CalendarView {
        let days = CalendarAggregator::bucket_by_day(transactions);
        let month_window = cursor.month_window();
        let in_month: Vec<Transaction> = transactions
            .iter()
            .filter(|txn| month_window.contains(txn.date))
            .cloned()
            .collect();
        let month = CalendarAggregator::summarize_month(&in_month);
        let grid = CalendarGrid::build(cursor, &days, today);
        CalendarView {
            cursor: *cursor,
            days,
            month,
            grid,
        }
    }

    pub async fn load(
        source: &dyn RecordSource,
        cursor: &MonthCursor,
        filters: &CalendarFilters,
        today: Option<NaiveDate>,
    ) -> ServiceResult<CalendarView> {
        let transactions = Self::fetch(source, cursor, filters).await?;
        let view = Self::aggregate(cursor, &transactions, today);
        tracing::info!(
            month = %cursor.label(),
            transactions = view.month.total_transactions,
            "calendar month loaded"
        );
        Ok(view)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::AccountRef;
    use crate::storage::InMemorySource;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn source() -> InMemorySource {
        let checking = AccountRef::new("Checking");
        InMemorySource::new(
            Vec::new(),
            vec![
                Transaction::new(
                    "Groceries",
                    dec!(80),
                    TransactionKind::Expense,
                    date(2024, 5, 31),
                    checking.clone(),
                ),
                Transaction::new(
                    "Salary",
                    dec!(4000),
                    TransactionKind::Income,
                    date(2024, 6, 5),
                    checking.clone(),
                ),
                Transaction::new(
                    "Power",
                    dec!(150),
                    TransactionKind::Expense,
                    date(2024, 6, 20),
                    checking,
                )
                .with_status(PaymentStatus::Overdue),
            ],
        )
    }

    #[tokio::test]
    async fn month_view_covers_only_the_month_by_default() {
        let cursor = MonthCursor::new(date(2024, 6, 1));
        let view = CalendarService::load(&source(), &cursor, &CalendarFilters::default(), None)
            .await
            .unwrap();
        assert_eq!(view.month.total_transactions, 2);
        assert_eq!(view.month.net_balance, dec!(3850));
        assert_eq!(view.month.status_counts.overdue, 1);
        assert!(view.day(date(2024, 5, 31)).is_none());
    }

    #[tokio::test]
    async fn padding_days_resolve_when_requested() {
        let cursor = MonthCursor::new(date(2024, 6, 1));
        let filters = CalendarFilters {
            include_padding_days: true,
            ..CalendarFilters::default()
        };
        let view = CalendarService::load(&source(), &cursor, &filters, None)
            .await
            .unwrap();
        assert_eq!(view.month.total_transactions, 2);
        let padding = view.grid.cell(date(2024, 5, 31)).unwrap();
        assert!(!padding.in_month);
        assert_eq!(padding.summary.as_ref().unwrap().total_expense, dec!(80));
    }

    #[tokio::test]
    async fn status_filter_is_pushed_into_the_query() {
        let cursor = MonthCursor::new(date(2024, 6, 1));
        let filters = CalendarFilters {
            statuses: [PaymentStatus::Paid].into_iter().collect(),
            ..CalendarFilters::default()
        };
        let view = CalendarService::load(&source(), &cursor, &filters, None)
            .await
            .unwrap();
        assert_eq!(view.month.total_transactions, 1);
        assert_eq!(view.month.total_expense, dec!(0));
    }
}
