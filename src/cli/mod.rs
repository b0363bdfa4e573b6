//! Terminal presentation used by `finance_core_cli`.

pub mod output;
pub mod render;

pub use render::{render_budgets, render_day, render_month};
