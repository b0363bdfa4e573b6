//! Plain-text renderings of the derived views.

use std::fmt::Write;

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;

use crate::config::Config;
use crate::core::calendar_aggregator::DaySummary;
use crate::core::services::{BudgetDashboard, CalendarView};
use crate::core::BudgetStatus;
use crate::currency::{format_currency, format_percentage, CurrencyCode, LocaleConfig};
use crate::domain::TransactionKind;

const WEEKDAY_HEADER: [&str; 7] = ["Su", "Mo", "Tu", "We", "Th", "Fr", "Sa"];

struct Money {
    code: CurrencyCode,
    locale: LocaleConfig,
}

impl Money {
    fn from_config(config: &Config) -> Self {
        Self {
            code: config.currency_code(),
            locale: config.locale_config(),
        }
    }

    fn amount(&self, value: Decimal) -> String {
        format_currency(value, &self.code, &self.locale)
    }

    fn percent(&self, value: Decimal) -> String {
        format_percentage(&self.locale, value)
    }
}

pub fn render_budgets(dashboard: &BudgetDashboard, config: &Config) -> String {
    let money = Money::from_config(config);
    let mut out = String::new();
    let _ = writeln!(out, "Budgets as of {}", dashboard.reference);
    if dashboard.reports.is_empty() {
        out.push_str("No budgets.\n");
        return out;
    }
    for report in &dashboard.reports {
        let progress = &report.progress;
        let mut used = money.percent(progress.percentage);
        if progress.exceeded {
            let _ = write!(used, " (+{})", money.amount(progress.overspent));
        }
        let inactive = if report.budget.active { "" } else { " [inactive]" };
        let _ = writeln!(
            out,
            "{}{}: {} of {} spent, {} left, {} used, {}",
            report.budget.name,
            inactive,
            money.amount(progress.spent),
            money.amount(progress.limit),
            money.amount(progress.remaining),
            used,
            progress.status.label()
        );
    }
    let overview = &dashboard.overview;
    let _ = writeln!(
        out,
        "Total: {} of {} ({}), {} left",
        money.amount(overview.total_spent),
        money.amount(overview.total_limit),
        money.percent(overview.overall_percentage),
        money.amount(overview.total_remaining)
    );
    let _ = writeln!(
        out,
        "Status: {} ok, {} alert, {} exceeded",
        overview.count_for(BudgetStatus::Ok),
        overview.count_for(BudgetStatus::Alert),
        overview.count_for(BudgetStatus::Exceeded)
    );
    out
}

/// Month grid; `*` marks days with transactions, `!` days with anything
/// overdue as of `today`.
pub fn render_month(view: &CalendarView, config: &Config, today: NaiveDate) -> String {
    let money = Money::from_config(config);
    let mut out = String::new();
    let _ = writeln!(out, "{}", view.cursor.label());
    let header: String = WEEKDAY_HEADER.iter().map(|day| format!("{day:>3} ")).collect();
    let _ = writeln!(out, "{}", header.trim_end());
    for week in &view.grid.weeks {
        let row: String = week
            .iter()
            .map(|cell| {
                let marker = match &cell.summary {
                    Some(day)
                        if day
                            .transactions
                            .iter()
                            .any(|txn| txn.is_overdue_on(today)) =>
                    {
                        '!'
                    }
                    Some(day) if day.has_transactions() => '*',
                    _ => ' ',
                };
                format!("{:>3}{}", cell.date.day(), marker)
            })
            .collect();
        let _ = writeln!(out, "{}", row.trim_end());
    }
    let month = &view.month;
    let _ = writeln!(
        out,
        "Income: {}  Expense: {}  Net: {}",
        money.amount(month.total_income),
        money.amount(month.total_expense),
        money.amount(month.net_balance)
    );
    let counts = &month.status_counts;
    let _ = writeln!(
        out,
        "Transactions: {} (paid {}, pending {}, overdue {})",
        month.total_transactions, counts.paid, counts.pending, counts.overdue
    );
    out
}

pub fn render_day(day: &DaySummary, config: &Config) -> String {
    let money = Money::from_config(config);
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{}: income {}, expense {}, net {}",
        day.date,
        money.amount(day.total_income),
        money.amount(day.total_expense),
        money.amount(day.net_balance)
    );
    for txn in &day.transactions {
        let sign = match txn.kind {
            TransactionKind::Income => '+',
            TransactionKind::Expense => '-',
        };
        let mut line = format!(
            "  {sign} {} {} [{}] {}",
            txn.title,
            money.amount(txn.amount),
            txn.status.label(),
            txn.account.name
        );
        if let Some(category) = &txn.category {
            let _ = write!(line, " / {}", category.name);
        }
        if let Some(label) = txn.installment_label() {
            let _ = write!(line, " ({label})");
        }
        if txn.recurring {
            line.push_str(" (recurring)");
        }
        let _ = writeln!(out, "{line}");
    }
    out
}
