use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::window::ResolvedWindow;
use crate::calendar::CalendarDate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionKind {
    Expense,
    Income,
}

/// A recorded transaction as handed over by the data-access layer.
///
/// Amounts are integer minor units (cents) of the ledger currency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: Uuid,
    pub kind: TransactionKind,
    #[serde(default)]
    pub category_id: Option<Uuid>,
    pub amount_cents: i64,
    pub date: CalendarDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Transaction {
    pub fn expense(category_id: Option<Uuid>, amount_cents: i64, date: CalendarDate) -> Self {
        Self::new(TransactionKind::Expense, category_id, amount_cents, date)
    }

    pub fn income(category_id: Option<Uuid>, amount_cents: i64, date: CalendarDate) -> Self {
        Self::new(TransactionKind::Income, category_id, amount_cents, date)
    }

    fn new(
        kind: TransactionKind,
        category_id: Option<Uuid>,
        amount_cents: i64,
        date: CalendarDate,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            category_id,
            amount_cents,
            date,
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn is_expense(&self) -> bool {
        self.kind == TransactionKind::Expense
    }
}

/// Sums expense transactions dated inside `window` (both ends inclusive).
///
/// With a `category_id` only that category counts; without one every expense
/// counts, categorised or not. Income never counts toward spending.
pub fn spent_in_window(
    transactions: &[Transaction],
    window: &ResolvedWindow,
    category_id: Option<Uuid>,
) -> i64 {
    transactions
        .iter()
        .filter(|txn| txn.is_expense() && window.contains(txn.date))
        .filter(|txn| category_id.map_or(true, |wanted| txn.category_id == Some(wanted)))
        .fold(0i64, |total, txn| total.saturating_add(txn.amount_cents))
}
