use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::errors::FinanceError;

/// Half-open date range `[start, end)`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateWindow {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, FinanceError> {
        if end <= start {
            return Err(FinanceError::InvalidInput(
                "window end must be after start".into(),
            ));
        }
        Ok(Self { start, end })
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date < self.end
    }

    /// Overlap of two windows, `None` when they are disjoint.
    pub fn intersect(&self, other: &DateWindow) -> Option<DateWindow> {
        let start = self.start.max(other.start);
        let end = self.end.min(other.end);
        (end > start).then_some(DateWindow { start, end })
    }

    /// Smallest window covering both inputs.
    pub fn span(&self, other: &DateWindow) -> DateWindow {
        DateWindow {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }

    /// Last date included in the window.
    pub fn last_day(&self) -> NaiveDate {
        self.end - Duration::days(1)
    }

    /// Calendar month containing `reference`.
    pub fn month_of(reference: NaiveDate) -> Self {
        let start = first_of_month(reference);
        Self {
            start,
            end: shift_month(start, 1),
        }
    }
}

/// Budget cadence.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum PeriodKind {
    Weekly,
    #[default]
    Monthly,
    Yearly,
}

impl PeriodKind {
    /// The period cycle that contains `reference`.
    ///
    /// Weekly cycles are seven-day blocks anchored at `anchor`; monthly and
    /// yearly cycles follow the calendar.
    pub fn cycle_window(&self, anchor: NaiveDate, reference: NaiveDate) -> DateWindow {
        match self {
            PeriodKind::Weekly => {
                let steps = (reference - anchor).num_days().div_euclid(7);
                let start = anchor + Duration::days(steps * 7);
                DateWindow {
                    start,
                    end: start + Duration::days(7),
                }
            }
            PeriodKind::Monthly => DateWindow::month_of(reference),
            PeriodKind::Yearly => {
                let start = NaiveDate::from_ymd_opt(reference.year(), 1, 1).unwrap_or(reference);
                DateWindow {
                    start,
                    end: shift_month(start, 12),
                }
            }
        }
    }
}

pub fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// Moves `date` by whole calendar months, clamping the day to the target month.
pub fn shift_month(date: NaiveDate, months: i32) -> NaiveDate {
    let index = date.year() * 12 + date.month0() as i32 + months;
    let year = index.div_euclid(12);
    let month = index.rem_euclid(12) as u32 + 1;
    let day = date.day().min(days_in_month(year, month));
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or(date)
}

pub fn days_in_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .map(|first_next| (first_next - Duration::days(1)).day())
        .unwrap_or(28)
}
