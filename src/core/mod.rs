pub mod budget_aggregator;
pub mod calendar_aggregator;
pub mod calendar_grid;
pub mod clock;
pub mod services;
pub mod utils;
pub mod view_state;

pub use budget_aggregator::{BudgetAggregator, BudgetOverview, BudgetProgress, BudgetStatus};
pub use calendar_aggregator::{CalendarAggregator, DaySummary, MonthSummary, StatusCounts};
pub use calendar_grid::{CalendarCell, CalendarGrid, MonthCursor};
pub use clock::{Clock, FixedClock, SystemClock};
pub use view_state::{BudgetScreen, CalendarScreen, Notification, NotificationLevel, ViewState};
