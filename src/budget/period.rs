use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use super::window::{resolve_period_window, ResolvedWindow};
use crate::calendar::CalendarDate;
use crate::errors::ScheduleError;

/// Shape of the spending window a budget is tracked against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "&'static str")]
pub enum PeriodKind {
    Monthly,
    Weekly,
    Yearly,
    Custom,
}

impl PeriodKind {
    pub const ALL: [PeriodKind; 4] = [
        PeriodKind::Monthly,
        PeriodKind::Weekly,
        PeriodKind::Yearly,
        PeriodKind::Custom,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            PeriodKind::Monthly => "monthly",
            PeriodKind::Weekly => "weekly",
            PeriodKind::Yearly => "yearly",
            PeriodKind::Custom => "custom",
        }
    }
}

impl fmt::Display for PeriodKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            PeriodKind::Monthly => "Monthly",
            PeriodKind::Weekly => "Weekly",
            PeriodKind::Yearly => "Yearly",
            PeriodKind::Custom => "Custom",
        };
        f.write_str(label)
    }
}

impl FromStr for PeriodKind {
    type Err = ScheduleError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "monthly" => Ok(PeriodKind::Monthly),
            "weekly" => Ok(PeriodKind::Weekly),
            "yearly" | "annual" | "annually" => Ok(PeriodKind::Yearly),
            "custom" => Ok(PeriodKind::Custom),
            _ => Err(ScheduleError::InvalidSpec(format!(
                "unknown period kind `{value}`"
            ))),
        }
    }
}

impl TryFrom<String> for PeriodKind {
    type Error = ScheduleError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<PeriodKind> for &'static str {
    fn from(value: PeriodKind) -> Self {
        value.as_str()
    }
}

/// A budget's configured period: its kind plus the dates it is active between.
///
/// `end_date` is optional for calendar periods (the budget runs indefinitely) and
/// required for [`PeriodKind::Custom`], where it bounds the spending window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetPeriodSpec {
    pub period_kind: PeriodKind,
    pub start_date: CalendarDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<CalendarDate>,
}

impl BudgetPeriodSpec {
    /// Builds a validated spec. See [`BudgetPeriodSpec::validate`].
    pub fn new(
        period_kind: PeriodKind,
        start_date: CalendarDate,
        end_date: Option<CalendarDate>,
    ) -> Result<Self, ScheduleError> {
        let spec = Self {
            period_kind,
            start_date,
            end_date,
        };
        spec.validate()?;
        Ok(spec)
    }

    pub fn monthly(start_date: CalendarDate) -> Self {
        Self {
            period_kind: PeriodKind::Monthly,
            start_date,
            end_date: None,
        }
    }

    pub fn weekly(start_date: CalendarDate) -> Self {
        Self {
            period_kind: PeriodKind::Weekly,
            start_date,
            end_date: None,
        }
    }

    pub fn yearly(start_date: CalendarDate) -> Self {
        Self {
            period_kind: PeriodKind::Yearly,
            start_date,
            end_date: None,
        }
    }

    pub fn custom(
        start_date: CalendarDate,
        end_date: CalendarDate,
    ) -> Result<Self, ScheduleError> {
        Self::new(PeriodKind::Custom, start_date, Some(end_date))
    }

    /// Rejects a custom period without an end date and any period whose start
    /// falls after its end.
    pub fn validate(&self) -> Result<(), ScheduleError> {
        if let Some(end) = self.end_date {
            if self.start_date > end {
                return Err(ScheduleError::InvalidSpec(format!(
                    "start date {} is after end date {}",
                    self.start_date, end
                )));
            }
        }
        if self.period_kind == PeriodKind::Custom && self.end_date.is_none() {
            return Err(missing_custom_end());
        }
        Ok(())
    }

    /// Whether the budget applies on `as_of`: `start_date <= as_of <= end_date`,
    /// with an open end when no end date is configured.
    pub fn is_active(&self, as_of: CalendarDate) -> bool {
        self.start_date <= as_of && self.end_date.map_or(true, |end| as_of <= end)
    }

    pub fn window_for(&self, as_of: CalendarDate) -> Result<ResolvedWindow, ScheduleError> {
        resolve_period_window(self, as_of)
    }
}

pub(crate) fn missing_custom_end() -> ScheduleError {
    ScheduleError::InvalidSpec("custom period requires an end date".into())
}
