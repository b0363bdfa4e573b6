//! Records consumed from the remote store and the date helpers they rely on.

pub mod budget;
pub mod period;
pub mod transaction;

pub use budget::{Budget, DEFAULT_ALERT_THRESHOLD};
pub use period::{days_in_month, first_of_month, shift_month, DateWindow, PeriodKind};
pub use transaction::{
    AccountRef, CategoryRef, Installment, PaymentStatus, Transaction, TransactionKind,
};
