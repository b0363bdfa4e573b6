mod common;

use common::{date, expense, income, monthly_budget, temp_base, write_snapshot};
use finance_core::{
    core::{services::BudgetService, BudgetStatus},
    domain::{DateWindow, PaymentStatus, TransactionKind},
    errors::FinanceError,
    storage::{BudgetQuery, JsonSnapshotSource, RecordSource, TransactionQuery},
};
use rust_decimal_macros::dec;
use uuid::Uuid;

#[tokio::test]
async fn snapshot_source_applies_query_filters() {
    let path = write_snapshot(
        Vec::new(),
        vec![
            expense("Rent", dec!(1500), date(2024, 6, 1)),
            expense("Phone", dec!(60), date(2024, 6, 18)).with_status(PaymentStatus::Overdue),
            income("Salary", dec!(4000), date(2024, 6, 5)),
            expense("July rent", dec!(1500), date(2024, 7, 1)),
        ],
    );
    let source = JsonSnapshotSource::new(&path);
    let june = DateWindow::month_of(date(2024, 6, 10));

    let all = source
        .fetch_transactions(&TransactionQuery::for_window(june))
        .await
        .expect("fetch june");
    let titles: Vec<&str> = all.iter().map(|txn| txn.title.as_str()).collect();
    assert_eq!(titles, ["Rent", "Salary", "Phone"]);

    let paid_expenses = source
        .fetch_transactions(
            &TransactionQuery::for_window(june)
                .with_kind(TransactionKind::Expense)
                .with_statuses([PaymentStatus::Paid]),
        )
        .await
        .expect("fetch paid expenses");
    assert_eq!(paid_expenses.len(), 1);
    assert_eq!(paid_expenses[0].title, "Rent");
}

#[tokio::test]
async fn snapshot_source_filters_budgets_by_owner() {
    let owner = Uuid::new_v4();
    let mut mine = monthly_budget("Mine", dec!(100), date(2024, 1, 1));
    mine.owner_id = owner;
    let theirs = monthly_budget("Theirs", dec!(100), date(2024, 1, 1));
    let paused = {
        let mut budget = monthly_budget("Paused", dec!(100), date(2024, 1, 1)).inactive();
        budget.owner_id = owner;
        budget
    };
    let source = JsonSnapshotSource::new(write_snapshot(vec![mine, theirs, paused], Vec::new()));

    let owned = source
        .fetch_budgets(&BudgetQuery {
            owner_id: Some(owner),
            active_only: false,
        })
        .await
        .expect("fetch owned budgets");
    assert_eq!(owned.len(), 2);

    let active = source
        .fetch_budgets(&BudgetQuery {
            owner_id: Some(owner),
            active_only: true,
        })
        .await
        .expect("fetch active budgets");
    assert_eq!(active.len(), 1);
    assert_eq!(active[0].name, "Mine");
}

#[tokio::test]
async fn missing_snapshot_is_a_fetch_error() {
    let source = JsonSnapshotSource::new(temp_base().join("absent.json"));
    let err = source
        .fetch_budgets(&BudgetQuery::default())
        .await
        .expect_err("missing file must fail");
    assert!(matches!(err, FinanceError::Fetch(_)));
}

#[tokio::test]
async fn amounts_accept_strings_and_numbers() {
    let path = temp_base().join("handwritten.json");
    let account = Uuid::new_v4();
    let json = format!(
        r#"{{
  "budgets": [{{
    "id": "{budget}",
    "owner_id": "{owner}",
    "name": "Everything",
    "limit_amount": "1000.00",
    "period": "monthly",
    "start_date": "2024-01-01"
  }}],
  "transactions": [
    {{"id": "{t1}", "title": "Rent", "amount": "700.00", "kind": "expense", "status": "paid",
      "date": "2024-02-01", "account": {{"id": "{account}", "name": "Checking"}}}},
    {{"id": "{t2}", "title": "Market", "amount": 150.5, "kind": "expense", "status": "paid",
      "date": "2024-02-10", "account": {{"id": "{account}", "name": "Checking"}}}}
  ]
}}"#,
        budget = Uuid::new_v4(),
        owner = Uuid::new_v4(),
        t1 = Uuid::new_v4(),
        t2 = Uuid::new_v4(),
    );
    std::fs::write(&path, json).expect("write snapshot");
    let source = JsonSnapshotSource::new(&path);

    let dashboard = BudgetService::load(&source, None, date(2024, 2, 14))
        .await
        .expect("load dashboard");
    let report = &dashboard.reports[0];
    assert_eq!(report.budget.alert_threshold, 80);
    assert!(report.budget.active);
    assert_eq!(report.progress.spent, dec!(850.5));
    assert_eq!(report.progress.status, BudgetStatus::Alert);
    assert_eq!(dashboard.overview.budget_count, 1);
}
