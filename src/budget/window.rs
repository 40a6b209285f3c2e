use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::period::{missing_custom_end, BudgetPeriodSpec, PeriodKind};
use crate::calendar::{
    end_of_week, first_day_of_month, first_day_of_year, last_day_of_month, last_day_of_year,
    start_of_week, CalendarDate,
};
use crate::errors::ScheduleError;

/// An inclusive `[window_start, window_end]` range of calendar dates.
///
/// The start never falls after the end; both [`ResolvedWindow::new`] and
/// deserialization enforce it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "WindowBounds")]
pub struct ResolvedWindow {
    window_start: CalendarDate,
    window_end: CalendarDate,
}

#[derive(Deserialize)]
struct WindowBounds {
    window_start: CalendarDate,
    window_end: CalendarDate,
}

impl TryFrom<WindowBounds> for ResolvedWindow {
    type Error = ScheduleError;

    fn try_from(bounds: WindowBounds) -> Result<Self, Self::Error> {
        Self::new(bounds.window_start, bounds.window_end)
    }
}

impl ResolvedWindow {
    pub fn new(
        window_start: CalendarDate,
        window_end: CalendarDate,
    ) -> Result<Self, ScheduleError> {
        if window_start > window_end {
            return Err(ScheduleError::InvalidSpec(format!(
                "window start {window_start} is after window end {window_end}"
            )));
        }
        Ok(Self {
            window_start,
            window_end,
        })
    }

    pub fn window_start(&self) -> CalendarDate {
        self.window_start
    }

    pub fn window_end(&self) -> CalendarDate {
        self.window_end
    }

    pub fn contains(&self, date: CalendarDate) -> bool {
        self.window_start <= date && date <= self.window_end
    }

    /// Number of days covered, counting both ends.
    pub fn len_days(&self) -> i64 {
        self.window_start.days_until(self.window_end) + 1
    }
}

impl fmt::Display for ResolvedWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} to {}", self.window_start, self.window_end)
    }
}

/// Resolves the spending window of a budget period for `as_of`.
///
/// Calendar kinds return the month, Sunday-to-Saturday week or year containing
/// `as_of`. A custom period returns its configured range and ignores `as_of`.
/// The budget's own start/end dates decide whether it is active at all; that
/// check belongs to the caller (see [`BudgetPeriodSpec::is_active`]).
pub fn resolve_period_window(
    spec: &BudgetPeriodSpec,
    as_of: CalendarDate,
) -> Result<ResolvedWindow, ScheduleError> {
    spec.validate()?;
    let window = match spec.period_kind {
        PeriodKind::Custom => {
            let end = spec.end_date.ok_or_else(missing_custom_end)?;
            ResolvedWindow::new(spec.start_date, end)?
        }
        PeriodKind::Monthly => ResolvedWindow {
            window_start: first_day_of_month(as_of),
            window_end: last_day_of_month(as_of),
        },
        PeriodKind::Weekly => ResolvedWindow {
            window_start: start_of_week(as_of),
            window_end: end_of_week(as_of),
        },
        PeriodKind::Yearly => ResolvedWindow {
            window_start: first_day_of_year(as_of),
            window_end: last_day_of_year(as_of),
        },
    };
    debug!(
        period = spec.period_kind.as_str(),
        as_of = %as_of,
        window = %window,
        "resolved budget window"
    );
    Ok(window)
}

/// Boundary form of [`resolve_period_window`] taking the raw budget columns.
pub fn resolve_window(
    period_kind: PeriodKind,
    start_date: CalendarDate,
    end_date: Option<CalendarDate>,
    as_of: CalendarDate,
) -> Result<ResolvedWindow, ScheduleError> {
    let spec = BudgetPeriodSpec {
        period_kind,
        start_date,
        end_date,
    };
    resolve_period_window(&spec, as_of)
}
