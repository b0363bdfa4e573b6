//! Month navigation and the Sunday-first display grid.

use std::collections::BTreeMap;

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use super::{calendar_aggregator::DaySummary, clock::Clock};
use crate::domain::{first_of_month, shift_month, DateWindow};

/// Reference date the calendar screen is looking at.
///
/// Moving the cursor never loads anything; callers reload explicitly.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct MonthCursor {
    reference: NaiveDate,
}

impl MonthCursor {
    pub fn new(reference: NaiveDate) -> Self {
        Self { reference }
    }

    pub fn reference(&self) -> NaiveDate {
        self.reference
    }

    pub fn previous(self) -> Self {
        Self::new(shift_month(self.reference, -1))
    }

    pub fn next(self) -> Self {
        Self::new(shift_month(self.reference, 1))
    }

    pub fn today(clock: &dyn Clock) -> Self {
        Self::new(clock.today())
    }

    pub fn year(&self) -> i32 {
        self.reference.year()
    }

    pub fn month(&self) -> u32 {
        self.reference.month()
    }

    pub fn month_window(&self) -> DateWindow {
        DateWindow::month_of(self.reference)
    }

    /// Every date shown by the grid, padding included.
    pub fn grid_window(&self) -> DateWindow {
        let month = self.month_window();
        let start = month.start - Duration::days(leading_padding(month.start));
        let last = month.last_day();
        let end = last + Duration::days(6 - last.weekday().num_days_from_sunday() as i64 + 1);
        DateWindow { start, end }
    }

    /// `"June 2024"`.
    pub fn label(&self) -> String {
        first_of_month(self.reference).format("%B %Y").to_string()
    }
}

fn leading_padding(first: NaiveDate) -> i64 {
    first.weekday().num_days_from_sunday() as i64
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CalendarCell {
    pub date: NaiveDate,
    pub in_month: bool,
    pub is_today: bool,
    /// Looked up by the cell's real date, so padding days resolve too.
    pub summary: Option<DaySummary>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CalendarGrid {
    pub year: i32,
    pub month: u32,
    /// Full Sunday..Saturday weeks.
    pub weeks: Vec<Vec<CalendarCell>>,
}

impl CalendarGrid {
    pub fn build(
        cursor: &MonthCursor,
        days: &BTreeMap<NaiveDate, DaySummary>,
        today: Option<NaiveDate>,
    ) -> Self {
        let month = cursor.month_window();
        let span = cursor.grid_window();
        let cells: Vec<CalendarCell> = span
            .start
            .iter_days()
            .take_while(|date| *date < span.end)
            .map(|date| CalendarCell {
                date,
                in_month: month.contains(date),
                is_today: today == Some(date),
                summary: days.get(&date).cloned(),
            })
            .collect();
        let weeks = cells.chunks(7).map(|week| week.to_vec()).collect();
        Self {
            year: cursor.year(),
            month: cursor.month(),
            weeks,
        }
    }

    pub fn cell(&self, date: NaiveDate) -> Option<&CalendarCell> {
        self.weeks.iter().flatten().find(|cell| cell.date == date)
    }

    pub fn cells(&self) -> impl Iterator<Item = &CalendarCell> {
        self.weeks.iter().flatten()
    }
}
