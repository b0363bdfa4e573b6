//! Screen state owned by the UI layer.
//!
//! Screens hold only the reference date, filter values and the last derived
//! view. A reload is split into `begin_reload` (capture inputs, raise the
//! loading flag), the asynchronous `PendingLoad::run`, and `apply` (store the
//! result). Loads are not fenced: whichever result is applied last wins.

use chrono::NaiveDate;
use uuid::Uuid;

use super::calendar_grid::MonthCursor;
use super::clock::Clock;
use super::services::{
    BudgetDashboard, BudgetService, CalendarFilters, CalendarService, CalendarView, ServiceResult,
};
use crate::storage::RecordSource;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Error,
}

/// Transient user-facing message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
}

/// Last good data plus the in-flight load count.
#[derive(Debug, Clone)]
pub struct ViewState<T> {
    data: Option<T>,
    in_flight: usize,
    notifications: Vec<Notification>,
}

impl<T> Default for ViewState<T> {
    fn default() -> Self {
        Self {
            data: None,
            in_flight: 0,
            notifications: Vec::new(),
        }
    }
}

impl<T> ViewState<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn data(&self) -> Option<&T> {
        self.data.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight > 0
    }

    pub fn begin_load(&mut self) {
        self.in_flight += 1;
    }

    /// Stores a successful result; on failure keeps the previous data and
    /// queues an error notification. Returns whether the data was replaced.
    pub fn finish_load(&mut self, context: &str, result: ServiceResult<T>) -> bool {
        self.in_flight = self.in_flight.saturating_sub(1);
        match result {
            Ok(data) => {
                self.data = Some(data);
                true
            }
            Err(err) => {
                tracing::warn!(error = %err, "{context} failed; keeping previous data");
                self.notifications.push(Notification {
                    level: NotificationLevel::Error,
                    message: format!("Could not load {context}: {err}"),
                });
                false
            }
        }
    }

    pub fn notify(&mut self, message: impl Into<String>) {
        self.notifications.push(Notification {
            level: NotificationLevel::Info,
            message: message.into(),
        });
    }

    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    /// Drains queued notifications once the UI has shown them.
    pub fn take_notifications(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.notifications)
    }
}

/// Inputs captured for one calendar load.
#[derive(Debug, Clone)]
pub struct PendingCalendarLoad {
    pub cursor: MonthCursor,
    pub filters: CalendarFilters,
    pub today: NaiveDate,
}

impl PendingCalendarLoad {
    pub async fn run(&self, source: &dyn RecordSource) -> ServiceResult<CalendarView> {
        CalendarService::load(source, &self.cursor, &self.filters, Some(self.today)).await
    }
}

#[derive(Debug, Clone)]
pub struct CalendarScreen {
    cursor: MonthCursor,
    filters: CalendarFilters,
    state: ViewState<CalendarView>,
}

impl CalendarScreen {
    pub fn new(reference: NaiveDate) -> Self {
        Self {
            cursor: MonthCursor::new(reference),
            filters: CalendarFilters::default(),
            state: ViewState::new(),
        }
    }

    pub fn cursor(&self) -> MonthCursor {
        self.cursor
    }

    pub fn filters(&self) -> &CalendarFilters {
        &self.filters
    }

    pub fn state(&self) -> &ViewState<CalendarView> {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut ViewState<CalendarView> {
        &mut self.state
    }

    pub fn view(&self) -> Option<&CalendarView> {
        self.state.data()
    }

    pub fn previous_month(&mut self) {
        self.cursor = self.cursor.previous();
    }

    pub fn next_month(&mut self) {
        self.cursor = self.cursor.next();
    }

    /// Jumps the reference date to today; the displayed view changes on the next reload.
    pub fn go_to_today(&mut self, clock: &dyn Clock) {
        self.cursor = MonthCursor::today(clock);
    }

    pub fn set_filters(&mut self, filters: CalendarFilters) {
        self.filters = filters;
    }

    pub fn begin_reload(&mut self, clock: &dyn Clock) -> PendingCalendarLoad {
        self.state.begin_load();
        PendingCalendarLoad {
            cursor: self.cursor,
            filters: self.filters.clone(),
            today: clock.today(),
        }
    }

    /// Stores the loaded month; an empty month also queues an info notification.
    pub fn apply(&mut self, result: ServiceResult<CalendarView>) -> bool {
        let empty_month = match &result {
            Ok(view) if view.month.total_transactions == 0 => Some(view.cursor.label()),
            _ => None,
        };
        let replaced = self.state.finish_load("calendar", result);
        if let Some(label) = empty_month {
            self.state.notify(format!("No transactions in {label}"));
        }
        replaced
    }

    pub async fn reload(&mut self, source: &dyn RecordSource, clock: &dyn Clock) -> bool {
        let pending = self.begin_reload(clock);
        let result = pending.run(source).await;
        self.apply(result)
    }
}

/// Inputs captured for one budgets load.
#[derive(Debug, Clone, Copy)]
pub struct PendingBudgetLoad {
    pub owner: Option<Uuid>,
    pub reference: NaiveDate,
}

impl PendingBudgetLoad {
    pub async fn run(&self, source: &dyn RecordSource) -> ServiceResult<BudgetDashboard> {
        BudgetService::load(source, self.owner, self.reference).await
    }
}

#[derive(Debug, Clone)]
pub struct BudgetScreen {
    owner: Option<Uuid>,
    reference: NaiveDate,
    state: ViewState<BudgetDashboard>,
}

impl BudgetScreen {
    pub fn new(owner: Option<Uuid>, reference: NaiveDate) -> Self {
        Self {
            owner,
            reference,
            state: ViewState::new(),
        }
    }

    pub fn reference(&self) -> NaiveDate {
        self.reference
    }

    pub fn set_reference(&mut self, reference: NaiveDate) {
        self.reference = reference;
    }

    pub fn state(&self) -> &ViewState<BudgetDashboard> {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut ViewState<BudgetDashboard> {
        &mut self.state
    }

    pub fn dashboard(&self) -> Option<&BudgetDashboard> {
        self.state.data()
    }

    pub fn begin_reload(&mut self) -> PendingBudgetLoad {
        self.state.begin_load();
        PendingBudgetLoad {
            owner: self.owner,
            reference: self.reference,
        }
    }

    pub fn apply(&mut self, result: ServiceResult<BudgetDashboard>) -> bool {
        self.state.finish_load("budgets", result)
    }

    pub async fn reload(&mut self, source: &dyn RecordSource) -> bool {
        let pending = self.begin_reload();
        let result = pending.run(source).await;
        self.apply(result)
    }
}
