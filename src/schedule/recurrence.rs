use serde::{Deserialize, Serialize};
use tracing::trace;

use super::Frequency;
use crate::calendar::{
    add_days, add_months_clamped, add_weeks, add_years, months_between, CalendarDate,
};
use crate::clock::Clock;
use crate::errors::ScheduleError;

/// A configured due date plus the cadence it repeats on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RecurrenceSpec {
    pub anchor_date: CalendarDate,
    pub frequency: Frequency,
}

impl RecurrenceSpec {
    pub const fn new(anchor_date: CalendarDate, frequency: Frequency) -> Self {
        Self {
            anchor_date,
            frequency,
        }
    }

    /// Builds a spec from storage values, rejecting unknown frequencies and malformed dates.
    pub fn parse(anchor_date: &str, frequency: &str) -> Result<Self, ScheduleError> {
        Ok(Self::new(anchor_date.parse()?, frequency.parse()?))
    }

    /// Returns the `index`-th occurrence counted from the anchor (index 0).
    ///
    /// Occurrences are always derived from the anchor itself, so a bill anchored on
    /// the 31st lands on the 31st again whenever the month allows it. One-time
    /// specs only have index 0.
    pub fn occurrence(&self, index: u32) -> Option<CalendarDate> {
        if self.frequency == Frequency::OneTime && index > 0 {
            return None;
        }
        Some(self.nth(index))
    }

    /// Next occurrence on or after `as_of`. See [`resolve_next`].
    pub fn next_occurrence(&self, as_of: CalendarDate) -> CalendarDate {
        if !self.frequency.is_recurring() || self.anchor_date >= as_of {
            return self.anchor_date;
        }
        let index = self.index_on_or_after(as_of);
        let next = self.nth(index);
        trace!(
            anchor = %self.anchor_date,
            frequency = self.frequency.as_str(),
            as_of = %as_of,
            steps = index,
            next = %next,
            "resolved next occurrence"
        );
        next
    }

    /// Smallest occurrence index whose date is on or after `as_of`.
    ///
    /// For a one-time spec already in the past this is 1, which has no occurrence.
    pub fn index_on_or_after(&self, as_of: CalendarDate) -> u32 {
        let anchor = self.anchor_date;
        if anchor >= as_of {
            return 0;
        }
        let estimate = match self.frequency {
            Frequency::OneTime => return 1,
            Frequency::Daily => anchor.days_until(as_of),
            Frequency::Weekly => (anchor.days_until(as_of) + 6) / 7,
            Frequency::Monthly => months_between(anchor, as_of),
            Frequency::Yearly => i64::from(as_of.year()) - i64::from(anchor.year()),
        };
        // Monthly and yearly estimates land in as_of's month/year; one step past it
        // is enough when the clamped day still falls before as_of.
        let index = u32::try_from(estimate).unwrap_or(u32::MAX);
        if self.nth(index) < as_of {
            index.saturating_add(1)
        } else {
            index
        }
    }

    pub fn occurrences(&self) -> Occurrences {
        Occurrences::starting_at(*self, 0)
    }

    /// Occurrences inside the inclusive range `[from, to]`, at most `limit` of them.
    pub fn occurrences_between(
        &self,
        from: CalendarDate,
        to: CalendarDate,
        limit: usize,
    ) -> Vec<CalendarDate> {
        if from > to {
            return Vec::new();
        }
        Occurrences::starting_at(*self, self.index_on_or_after(from))
            .take_while(|date| *date <= to)
            .take(limit)
            .collect()
    }

    fn nth(&self, index: u32) -> CalendarDate {
        let anchor = self.anchor_date;
        match self.frequency {
            Frequency::OneTime => anchor,
            Frequency::Daily => add_days(anchor, i64::from(index)),
            Frequency::Weekly => add_weeks(anchor, i64::from(index)),
            Frequency::Monthly => add_months_clamped(anchor, clamp_steps(index)),
            Frequency::Yearly => add_years(anchor, clamp_steps(index)),
        }
    }
}

fn clamp_steps(index: u32) -> i32 {
    i32::try_from(index).unwrap_or(i32::MAX)
}

/// Iterator over the occurrences of a [`RecurrenceSpec`], in ascending order.
///
/// Stops after the single occurrence of a one-time spec, or once the calendar's
/// upper bound has been reached.
#[derive(Debug, Clone)]
pub struct Occurrences {
    spec: RecurrenceSpec,
    index: u32,
    last: Option<CalendarDate>,
}

impl Occurrences {
    pub fn starting_at(spec: RecurrenceSpec, index: u32) -> Self {
        Self {
            spec,
            index,
            last: None,
        }
    }
}

impl Iterator for Occurrences {
    type Item = CalendarDate;

    fn next(&mut self) -> Option<Self::Item> {
        let date = self.spec.occurrence(self.index)?;
        if self.last.is_some_and(|last| date <= last) {
            return None;
        }
        self.last = Some(date);
        self.index = self.index.saturating_add(1);
        Some(date)
    }
}

/// A spec evaluated against a reference date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduleQuery {
    pub spec: RecurrenceSpec,
    pub as_of: CalendarDate,
}

impl ScheduleQuery {
    pub const fn new(spec: RecurrenceSpec, as_of: CalendarDate) -> Self {
        Self { spec, as_of }
    }

    /// Query with `as_of` set to the clock's current calendar date.
    pub fn for_today(spec: RecurrenceSpec, clock: &dyn Clock) -> Self {
        Self::new(spec, clock.today())
    }

    pub fn resolve(&self) -> CalendarDate {
        self.spec.next_occurrence(self.as_of)
    }
}

/// Computes the next occurrence of a bill on or after `as_of`.
///
/// * One-time items return `anchor` unchanged, even when it is in the past.
/// * A recurring anchor on or after `as_of` is returned as-is.
/// * Otherwise the anchor is advanced by whole periods until it reaches `as_of`;
///   landing exactly on `as_of` counts as due.
///
/// The advance is computed in closed form and matches
/// [`resolve_next_iterative`] exactly.
pub fn resolve_next(
    anchor: CalendarDate,
    frequency: Frequency,
    as_of: CalendarDate,
) -> CalendarDate {
    RecurrenceSpec::new(anchor, frequency).next_occurrence(as_of)
}

/// Step-by-step reference implementation of [`resolve_next`].
pub fn resolve_next_iterative(
    anchor: CalendarDate,
    frequency: Frequency,
    as_of: CalendarDate,
) -> CalendarDate {
    let spec = RecurrenceSpec::new(anchor, frequency);
    if !frequency.is_recurring() || anchor >= as_of {
        return anchor;
    }
    let mut index = 1u32;
    loop {
        let candidate = spec.nth(index);
        if candidate >= as_of {
            return candidate;
        }
        index = index.saturating_add(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;

    fn date(y: i32, m: u32, d: u32) -> CalendarDate {
        CalendarDate::from_ymd(y, m, d).unwrap()
    }

    #[test]
    fn one_time_never_rolls_forward() {
        let anchor = date(2024, 3, 10);
        for as_of in [date(2020, 1, 1), anchor, date(2024, 3, 11), date(2031, 12, 31)] {
            assert_eq!(resolve_next(anchor, Frequency::OneTime, as_of), anchor);
        }
    }

    #[test]
    fn future_anchor_is_returned_unchanged() {
        let anchor = date(2024, 5, 20);
        for frequency in Frequency::ALL {
            assert_eq!(resolve_next(anchor, frequency, date(2024, 5, 1)), anchor);
            assert_eq!(resolve_next(anchor, frequency, anchor), anchor);
        }
    }

    #[test]
    fn monthly_clamps_to_february_end() {
        assert_eq!(
            resolve_next(date(2024, 1, 31), Frequency::Monthly, date(2024, 2, 15)),
            date(2024, 2, 29)
        );
        assert_eq!(
            resolve_next(date(2023, 1, 31), Frequency::Monthly, date(2023, 2, 15)),
            date(2023, 2, 28)
        );
    }

    #[test]
    fn monthly_reanchors_to_original_day() {
        assert_eq!(
            resolve_next(date(2024, 1, 31), Frequency::Monthly, date(2024, 4, 1)),
            date(2024, 4, 30)
        );
        assert_eq!(
            resolve_next(date(2024, 1, 31), Frequency::Monthly, date(2024, 3, 1)),
            date(2024, 3, 31)
        );
        // Stepping from the clamped Feb 29 would give Mar 29 and miss this date.
        assert_eq!(
            resolve_next(date(2024, 1, 31), Frequency::Monthly, date(2024, 3, 30)),
            date(2024, 3, 31)
        );
        let spec = RecurrenceSpec::new(date(2024, 1, 31), Frequency::Monthly);
        let dates: Vec<_> = spec.occurrences().take(4).collect();
        assert_eq!(
            dates,
            vec![
                date(2024, 1, 31),
                date(2024, 2, 29),
                date(2024, 3, 31),
                date(2024, 4, 30)
            ]
        );
    }

    #[test]
    fn yearly_leap_day_rolls_to_feb_28() {
        assert_eq!(
            resolve_next(date(2024, 2, 29), Frequency::Yearly, date(2025, 1, 1)),
            date(2025, 2, 28)
        );
        assert_eq!(
            resolve_next(date(2024, 2, 29), Frequency::Yearly, date(2027, 3, 1)),
            date(2028, 2, 29)
        );
    }

    #[test]
    fn equality_with_as_of_counts_as_due() {
        let anchor = date(2024, 1, 1);
        assert_eq!(
            resolve_next(anchor, Frequency::Weekly, date(2024, 1, 15)),
            date(2024, 1, 15)
        );
        assert_eq!(
            resolve_next(anchor, Frequency::Weekly, date(2024, 1, 16)),
            date(2024, 1, 22)
        );
        assert_eq!(
            resolve_next(anchor, Frequency::Daily, date(2024, 3, 1)),
            date(2024, 3, 1)
        );
    }

    #[test]
    fn closed_form_matches_iterative_on_edge_dates() {
        let anchors = [
            date(2024, 1, 31),
            date(2024, 2, 29),
            date(2023, 12, 31),
            date(2020, 8, 30),
        ];
        let as_ofs = [
            date(2024, 2, 28),
            date(2024, 3, 1),
            date(2025, 2, 28),
            date(2032, 2, 29),
        ];
        for anchor in anchors {
            for as_of in as_ofs {
                for frequency in Frequency::ALL {
                    assert_eq!(
                        resolve_next(anchor, frequency, as_of),
                        resolve_next_iterative(anchor, frequency, as_of),
                        "{anchor} {frequency} {as_of}"
                    );
                }
            }
        }
    }

    #[test]
    fn occurrences_between_lists_window_dates() {
        let spec = RecurrenceSpec::new(date(2024, 1, 5), Frequency::Weekly);
        let dates = spec.occurrences_between(date(2024, 2, 1), date(2024, 2, 29), 10);
        assert_eq!(
            dates,
            vec![date(2024, 2, 2), date(2024, 2, 9), date(2024, 2, 16), date(2024, 2, 23)]
        );
        assert_eq!(
            spec.occurrences_between(date(2024, 2, 1), date(2024, 2, 29), 2).len(),
            2
        );
        assert!(spec
            .occurrences_between(date(2024, 3, 1), date(2024, 2, 1), 10)
            .is_empty());
    }

    #[test]
    fn one_time_occurrences_stop_after_anchor() {
        let spec = RecurrenceSpec::new(date(2024, 6, 1), Frequency::OneTime);
        assert_eq!(spec.occurrences().collect::<Vec<_>>(), vec![date(2024, 6, 1)]);
        assert!(spec
            .occurrences_between(date(2024, 6, 2), date(2024, 12, 31), 10)
            .is_empty());
        assert_eq!(
            spec.occurrences_between(date(2024, 1, 1), date(2024, 12, 31), 10),
            vec![date(2024, 6, 1)]
        );
    }

    #[test]
    fn occurrences_stop_at_calendar_bound() {
        let spec = RecurrenceSpec::new(CalendarDate::MAX, Frequency::Daily);
        assert_eq!(spec.occurrences().count(), 1);
        assert_eq!(
            resolve_next(date(2024, 1, 1), Frequency::Yearly, CalendarDate::MAX),
            CalendarDate::MAX
        );
    }

    #[test]
    fn query_defaults_to_clock_today() {
        let clock = FixedClock::new(date(2024, 2, 15));
        let spec = RecurrenceSpec::parse("2024-01-31", "monthly").unwrap();
        let query = ScheduleQuery::for_today(spec, &clock);
        assert_eq!(query.as_of, date(2024, 2, 15));
        assert_eq!(query.resolve(), date(2024, 2, 29));
    }

    #[test]
    fn parse_rejects_unknown_frequency() {
        assert!(matches!(
            RecurrenceSpec::parse("2024-01-31", "biweekly"),
            Err(ScheduleError::InvalidFrequency(_))
        ));
    }
}
