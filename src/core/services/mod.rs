pub mod budget_service;
pub mod calendar_service;

pub use budget_service::{BudgetDashboard, BudgetRecords, BudgetReport, BudgetService};
pub use calendar_service::{CalendarFilters, CalendarService, CalendarView};

use crate::errors::FinanceError;

pub type ServiceResult<T> = Result<T, ServiceError>;

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error(transparent)]
    Finance(#[from] FinanceError),
}
