use std::fmt;

use serde::{Deserialize, Serialize};

use crate::calendar::{add_days, CalendarDate};

/// Where a due date sits relative to the reference date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DueStatus {
    Overdue,
    DueToday,
    DueSoon,
    Upcoming,
}

impl DueStatus {
    /// Classifies `due` against `as_of`; anything within `due_soon_days` after
    /// `as_of` is [`DueStatus::DueSoon`].
    pub fn classify(due: CalendarDate, as_of: CalendarDate, due_soon_days: u32) -> DueStatus {
        if due < as_of {
            return DueStatus::Overdue;
        }
        if due == as_of {
            return DueStatus::DueToday;
        }
        let soon_cutoff = add_days(as_of, i64::from(due_soon_days));
        if due <= soon_cutoff {
            DueStatus::DueSoon
        } else {
            DueStatus::Upcoming
        }
    }

    pub fn needs_attention(self) -> bool {
        matches!(self, DueStatus::Overdue | DueStatus::DueToday)
    }
}

impl fmt::Display for DueStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            DueStatus::Overdue => "Overdue",
            DueStatus::DueToday => "Due today",
            DueStatus::DueSoon => "Due soon",
            DueStatus::Upcoming => "Upcoming",
        };
        f.write_str(label)
    }
}
