//! Recurring bills: next due dates, payment tracking and window projections.

use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::budget::ResolvedWindow;
use crate::calendar::{add_days, CalendarDate};
use crate::config::ScheduleConfig;
use crate::schedule::{DueStatus, Frequency, RecurrenceSpec};

/// A bill as stored by the data-access layer.
///
/// `paid_through` is the latest occurrence already settled; every occurrence on
/// or before it is considered paid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bill {
    pub id: Uuid,
    pub name: String,
    pub amount_cents: i64,
    pub due_date: CalendarDate,
    pub frequency: Frequency,
    #[serde(default)]
    pub category_id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paid_through: Option<CalendarDate>,
}

impl Bill {
    pub fn new(
        name: impl Into<String>,
        amount_cents: i64,
        due_date: CalendarDate,
        frequency: Frequency,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            amount_cents,
            due_date,
            frequency,
            category_id: None,
            paid_through: None,
        }
    }

    pub fn with_category(mut self, category_id: Uuid) -> Self {
        self.category_id = Some(category_id);
        self
    }

    pub fn recurrence(&self) -> RecurrenceSpec {
        RecurrenceSpec::new(self.due_date, self.frequency)
    }

    fn is_paid(&self, date: CalendarDate) -> bool {
        self.paid_through.map_or(false, |paid| date <= paid)
    }

    /// Earliest unpaid due date.
    ///
    /// With a payment on record this is the first occurrence after
    /// `paid_through`, which may fall before `as_of` when a payment was missed.
    /// Without one it is the next occurrence on or after `as_of`. A one-time bill
    /// keeps its single date until paid and has no next due date afterwards.
    pub fn next_due(&self, as_of: CalendarDate) -> Option<CalendarDate> {
        let spec = self.recurrence();
        if !self.frequency.is_recurring() {
            return (!self.is_paid(spec.anchor_date)).then_some(spec.anchor_date);
        }
        let reference = self.paid_through.map_or(as_of, |paid| add_days(paid, 1));
        let next = spec.next_occurrence(reference);
        // Only reachable at the calendar's upper bound.
        (!self.is_paid(next)).then_some(next)
    }

    /// Marks the occurrence currently due as paid and returns it.
    pub fn record_payment(&mut self, as_of: CalendarDate) -> Option<CalendarDate> {
        let due = self.next_due(as_of)?;
        self.paid_through = Some(due);
        debug!(bill = %self.id, paid = %due, "recorded bill payment");
        Some(due)
    }
}

/// One row of the upcoming-bills listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillDue {
    pub bill_id: Uuid,
    pub name: String,
    pub amount_cents: i64,
    pub due_date: CalendarDate,
    pub status: DueStatus,
}

/// Stateless bill queries over caller-supplied records.
pub struct BillService;

impl BillService {
    /// Next due date of every bill that still has one, earliest first.
    pub fn upcoming(bills: &[Bill], as_of: CalendarDate, config: &ScheduleConfig) -> Vec<BillDue> {
        let mut rows: Vec<BillDue> = bills
            .iter()
            .filter_map(|bill| {
                let due_date = bill.next_due(as_of)?;
                Some(BillDue {
                    bill_id: bill.id,
                    name: bill.name.clone(),
                    amount_cents: bill.amount_cents,
                    due_date,
                    status: DueStatus::classify(due_date, as_of, config.due_soon_days),
                })
            })
            .collect();
        rows.sort_by(|a, b| a.due_date.cmp(&b.due_date).then_with(|| a.name.cmp(&b.name)));
        rows
    }

    /// Sum of every unpaid occurrence falling inside `window`.
    ///
    /// With a `category_id` only bills of that category count.
    pub fn projected_total(
        bills: &[Bill],
        window: &ResolvedWindow,
        category_id: Option<Uuid>,
        config: &ScheduleConfig,
    ) -> i64 {
        bills
            .iter()
            .filter(|bill| category_id.map_or(true, |wanted| bill.category_id == Some(wanted)))
            .flat_map(|bill| {
                bill.recurrence()
                    .occurrences_between(
                        window.window_start(),
                        window.window_end(),
                        config.max_projected_occurrences,
                    )
                    .into_iter()
                    .filter(move |date| !bill.is_paid(*date))
                    .map(move |_| bill.amount_cents)
            })
            .fold(0i64, |total, amount| total.saturating_add(amount))
    }
}
