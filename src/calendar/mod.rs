//! Calendar dates and the arithmetic primitives every resolver builds on.
//!
//! All functions are pure and total: results that would fall outside the
//! representable range saturate at [`CalendarDate::MIN`] / [`CalendarDate::MAX`].

pub mod arith;
pub mod date;

pub use arith::{
    add_days, add_months_clamped, add_weeks, add_years, days_in_month, days_in_year,
    end_of_week, first_day_of_month, first_day_of_year, is_leap_year, last_day_of_month,
    last_day_of_year, months_between, start_of_week,
};
pub use date::{CalendarDate, DATE_FORMAT};
