//! Budget periods, their spending windows, and spend-versus-limit evaluation.

pub mod period;
pub mod spend;
pub mod window;

use std::{cmp::Ordering, fmt};

use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::calendar::CalendarDate;
use crate::errors::ScheduleError;

pub use period::{BudgetPeriodSpec, PeriodKind};
pub use spend::{spent_in_window, Transaction, TransactionKind};
pub use window::{resolve_period_window, resolve_window, ResolvedWindow};

/// A spending limit for one category (or for all expenses) over a period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Budget {
    pub id: Uuid,
    pub name: String,
    pub limit_cents: i64,
    #[serde(default)]
    pub category_id: Option<Uuid>,
    #[serde(flatten)]
    pub period: BudgetPeriodSpec,
}

impl Budget {
    pub fn new(
        name: impl Into<String>,
        limit_cents: i64,
        category_id: Option<Uuid>,
        period: BudgetPeriodSpec,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            limit_cents,
            category_id,
            period,
        }
    }

    pub fn is_active(&self, as_of: CalendarDate) -> bool {
        self.period.is_active(as_of)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BudgetStatus {
    UnderBudget,
    OnTrack,
    OverBudget,
    Empty,
}

impl fmt::Display for BudgetStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            BudgetStatus::UnderBudget => "Under Budget",
            BudgetStatus::OnTrack => "On Track",
            BudgetStatus::OverBudget => "Over Budget",
            BudgetStatus::Empty => "Empty",
        };
        f.write_str(label)
    }
}

/// Spending against a budget inside the window that contains the reference date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetProgress {
    pub budget_id: Uuid,
    pub window: ResolvedWindow,
    pub limit_cents: i64,
    pub spent_cents: i64,
    pub remaining_cents: i64,
    pub percent_used: Option<f64>,
    pub status: BudgetStatus,
}

impl BudgetProgress {
    pub fn from_parts(
        budget_id: Uuid,
        window: ResolvedWindow,
        limit_cents: i64,
        spent_cents: i64,
    ) -> Self {
        let remaining_cents = limit_cents.saturating_sub(spent_cents);
        let percent_used = if limit_cents != 0 {
            Some(spent_cents as f64 * 100.0 / limit_cents as f64)
        } else if spent_cents != 0 {
            Some(100.0)
        } else {
            None
        };
        let status = if limit_cents == 0 && spent_cents == 0 {
            BudgetStatus::Empty
        } else {
            match spent_cents.cmp(&limit_cents) {
                Ordering::Greater => BudgetStatus::OverBudget,
                Ordering::Less => BudgetStatus::UnderBudget,
                Ordering::Equal => BudgetStatus::OnTrack,
            }
        };
        Self {
            budget_id,
            window,
            limit_cents,
            spent_cents,
            remaining_cents,
            percent_used,
            status,
        }
    }
}

/// Stateless budget evaluation over caller-supplied records.
pub struct BudgetService;

impl BudgetService {
    /// Evaluates `budget` for the window containing `as_of`.
    ///
    /// Returns `Ok(None)` when the budget is not active on `as_of`. A malformed
    /// period is reported even for inactive budgets.
    pub fn evaluate(
        budget: &Budget,
        transactions: &[Transaction],
        as_of: CalendarDate,
    ) -> Result<Option<BudgetProgress>, ScheduleError> {
        budget.period.validate()?;
        if !budget.is_active(as_of) {
            debug!(budget = %budget.id, as_of = %as_of, "budget inactive");
            return Ok(None);
        }
        let window = budget.period.window_for(as_of)?;
        let spent = spent_in_window(transactions, &window, budget.category_id);
        Ok(Some(BudgetProgress::from_parts(
            budget.id,
            window,
            budget.limit_cents,
            spent,
        )))
    }

    /// Evaluates every active budget, failing on the first malformed period.
    pub fn evaluate_all(
        budgets: &[Budget],
        transactions: &[Transaction],
        as_of: CalendarDate,
    ) -> Result<Vec<BudgetProgress>, ScheduleError> {
        let mut results = Vec::new();
        for budget in budgets {
            if let Some(progress) = Self::evaluate(budget, transactions, as_of)? {
                results.push(progress);
            }
        }
        Ok(results)
    }

    pub fn over_budget(
        budgets: &[Budget],
        transactions: &[Transaction],
        as_of: CalendarDate,
    ) -> Result<Vec<BudgetProgress>, ScheduleError> {
        let mut progress = Self::evaluate_all(budgets, transactions, as_of)?;
        progress.retain(|entry| entry.status == BudgetStatus::OverBudget);
        Ok(progress)
    }
}
