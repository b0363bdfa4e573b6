use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Income,
    Expense,
}

/// Payment state as recorded by the remote store.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Paid,
    Pending,
    Overdue,
}

impl PaymentStatus {
    pub fn label(&self) -> &'static str {
        match self {
            PaymentStatus::Paid => "paid",
            PaymentStatus::Pending => "pending",
            PaymentStatus::Overdue => "overdue",
        }
    }
}

/// Account join carried on each transaction.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AccountRef {
    pub id: Uuid,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl AccountRef {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            color: None,
        }
    }
}

/// Category join; absent for uncategorised records.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CategoryRef {
    pub id: Uuid,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

impl CategoryRef {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            color: None,
            icon: None,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Installment {
    pub current: u16,
    pub total: u16,
}

/// A single income or expense record. Amounts are always positive; `kind`
/// carries the direction.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Transaction {
    pub id: Uuid,
    pub title: String,
    pub amount: Decimal,
    pub kind: TransactionKind,
    pub status: PaymentStatus,
    pub date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    pub account: AccountRef,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<CategoryRef>,
    #[serde(default)]
    pub recurring: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub installment: Option<Installment>,
}

impl Transaction {
    pub fn new(
        title: impl Into<String>,
        amount: Decimal,
        kind: TransactionKind,
        date: NaiveDate,
        account: AccountRef,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            amount,
            kind,
            status: PaymentStatus::Paid,
            date,
            due_date: None,
            account,
            category: None,
            recurring: false,
            installment: None,
        }
    }

    pub fn with_status(mut self, status: PaymentStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_category(mut self, category: CategoryRef) -> Self {
        self.category = Some(category);
        self
    }

    pub fn with_due_date(mut self, due_date: NaiveDate) -> Self {
        self.due_date = Some(due_date);
        self
    }

    pub fn with_installment(mut self, current: u16, total: u16) -> Self {
        self.installment = Some(Installment { current, total });
        self
    }

    pub fn recurring(mut self) -> Self {
        self.recurring = true;
        self
    }

    pub fn is_income(&self) -> bool {
        self.kind == TransactionKind::Income
    }

    pub fn is_expense(&self) -> bool {
        self.kind == TransactionKind::Expense
    }

    pub fn category_id(&self) -> Option<Uuid> {
        self.category.as_ref().map(|category| category.id)
    }

    /// Income counts positive, expenses negative.
    pub fn signed_amount(&self) -> Decimal {
        match self.kind {
            TransactionKind::Income => self.amount,
            TransactionKind::Expense => -self.amount,
        }
    }

    /// True for records already flagged overdue, or still pending past their due date.
    pub fn is_overdue_on(&self, today: NaiveDate) -> bool {
        match self.status {
            PaymentStatus::Overdue => true,
            PaymentStatus::Pending => self.due_date.is_some_and(|due| due < today),
            PaymentStatus::Paid => false,
        }
    }

    /// `"3/12"` style label for instalment purchases.
    pub fn installment_label(&self) -> Option<String> {
        self.installment
            .map(|Installment { current, total }| format!("{current}/{total}"))
    }
}
