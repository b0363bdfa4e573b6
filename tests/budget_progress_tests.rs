mod common;

use common::{date, expense, groceries, income, monthly_budget};
use finance_core::{
    core::{BudgetAggregator, BudgetProgress, BudgetStatus},
    domain::{Budget, PaymentStatus, PeriodKind},
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

#[test]
fn threshold_crossed_reports_alert() {
    let budget = monthly_budget("Household", dec!(1000), date(2024, 1, 1));
    let progress = BudgetAggregator::compute_progress(&budget, [dec!(500), dec!(350)]);

    assert_eq!(progress.spent, dec!(850));
    assert_eq!(progress.percentage, dec!(85));
    assert_eq!(progress.remaining, dec!(150));
    assert_eq!(progress.status, BudgetStatus::Alert);
    assert!(!progress.exceeded);
}

#[test]
fn overspending_clamps_percentage_and_reports_exceeded() {
    let budget = monthly_budget("Household", dec!(1000), date(2024, 1, 1));
    let progress = BudgetAggregator::compute_progress(&budget, [dec!(1200)]);

    assert_eq!(progress.percentage, dec!(100));
    assert_eq!(progress.remaining, Decimal::ZERO);
    assert_eq!(progress.overspent, dec!(200));
    assert_eq!(progress.status, BudgetStatus::Exceeded);
    assert!(progress.exceeded);
}

#[test]
fn status_follows_spent_against_limit_and_threshold() {
    let budget = monthly_budget("Fuel", dec!(400), date(2024, 1, 1)).with_threshold(50);
    let cases = [
        (dec!(0), BudgetStatus::Ok),
        (dec!(199.99), BudgetStatus::Ok),
        (dec!(200), BudgetStatus::Alert),
        (dec!(400), BudgetStatus::Alert),
        (dec!(400.01), BudgetStatus::Exceeded),
        (dec!(10000), BudgetStatus::Exceeded),
    ];
    for (spent, expected) in cases {
        let progress = BudgetAggregator::compute_progress(&budget, [spent]);
        assert_eq!(progress.status, expected, "spent {spent}");
        assert!(progress.percentage >= Decimal::ZERO && progress.percentage <= dec!(100));
        assert_eq!(progress.remaining, (dec!(400) - spent).max(Decimal::ZERO));
    }
}

#[test]
fn zero_limit_is_ok_with_zero_percentage() {
    let mut budget = monthly_budget("Placeholder", dec!(1), date(2024, 1, 1));
    budget.limit_amount = Decimal::ZERO;
    let progress = BudgetAggregator::compute_progress(&budget, [dec!(25)]);

    assert_eq!(progress.percentage, Decimal::ZERO);
    assert_eq!(progress.status, BudgetStatus::Ok);
    assert_eq!(progress.remaining, Decimal::ZERO);
    assert!(budget.validate().is_err());
}

#[test]
fn only_paid_expenses_in_window_and_scope_are_counted() {
    let category = groceries();
    let budget = monthly_budget("Groceries", dec!(600), date(2024, 1, 1))
        .with_categories([category.id]);
    let transactions = vec![
        expense("Market", dec!(120), date(2024, 3, 2)).with_category(category.clone()),
        expense("Bakery", dec!(30), date(2024, 3, 20))
            .with_category(category.clone())
            .with_status(PaymentStatus::Pending),
        expense("Last month", dec!(90), date(2024, 2, 29)).with_category(category.clone()),
        expense("Cinema", dec!(45), date(2024, 3, 5)),
        income("Refund", dec!(15), date(2024, 3, 6)).with_category(category),
    ];

    let progress = BudgetAggregator::progress_for(&budget, &transactions, date(2024, 3, 15));
    assert_eq!(progress.spent, dec!(120));
    assert_eq!(progress.percentage, dec!(20));
    assert_eq!(progress.status, BudgetStatus::Ok);
}

#[test]
fn ended_budget_counts_nothing_after_its_end_date() {
    let budget =
        monthly_budget("Trip", dec!(500), date(2024, 1, 1)).with_end_date(date(2024, 1, 31));
    let transactions = vec![expense("Hotel", dec!(300), date(2024, 2, 10))];

    assert!(budget.period_window(date(2024, 2, 15)).is_none());
    let progress = BudgetAggregator::progress_for(&budget, &transactions, date(2024, 2, 15));
    assert_eq!(progress.spent, Decimal::ZERO);
}

#[test]
fn weekly_budget_uses_seven_day_blocks_from_start() {
    let mut budget = monthly_budget("Lunch", dec!(100), date(2024, 6, 3));
    budget.period = PeriodKind::Weekly;
    let transactions = vec![
        expense("Mon", dec!(20), date(2024, 6, 10)),
        expense("Sun", dec!(25), date(2024, 6, 16)),
        expense("Next Mon", dec!(40), date(2024, 6, 17)),
    ];

    let progress = BudgetAggregator::progress_for(&budget, &transactions, date(2024, 6, 12));
    assert_eq!(progress.spent, dec!(45));
}

#[test]
fn overview_sums_active_budgets_without_clamping() {
    let over = monthly_budget("Over", dec!(100), date(2024, 1, 1));
    let fine = monthly_budget("Fine", dec!(300), date(2024, 1, 1));
    let paused = monthly_budget("Paused", dec!(1000), date(2024, 1, 1)).inactive();

    let over_progress = BudgetAggregator::compute_progress(&over, [dec!(250)]);
    let fine_progress = BudgetAggregator::compute_progress(&fine, [dec!(150)]);
    let paused_progress = BudgetAggregator::compute_progress(&paused, [dec!(999)]);

    let overview = BudgetAggregator::summarize([
        (&over, &over_progress),
        (&fine, &fine_progress),
        (&paused, &paused_progress),
    ]);
    assert_eq!(overview.budget_count, 2);
    assert_eq!(overview.total_limit, dec!(400));
    assert_eq!(overview.total_spent, dec!(400));
    assert_eq!(overview.total_remaining, dec!(150));
    assert_eq!(overview.overall_percentage, dec!(100));
    assert_eq!(overview.count_for(BudgetStatus::Exceeded), 1);
    assert_eq!(overview.count_for(BudgetStatus::Ok), 1);
    assert_eq!(overview.count_for(BudgetStatus::Alert), 0);
}

#[test]
fn empty_overview_is_zeroed() {
    let overview = BudgetAggregator::summarize(std::iter::empty::<(&Budget, &BudgetProgress)>());
    assert_eq!(overview.overall_percentage, Decimal::ZERO);
    assert_eq!(overview.budget_count, 0);
}
