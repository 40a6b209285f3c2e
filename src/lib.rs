#![doc(test(attr(deny(warnings))))]

//! Budget Schedule resolves recurring bill due dates and budget spending windows
//! for a personal budget tracker.
//!
//! Everything here is a pure function of its inputs: the caller supplies the
//! reference date (or a [`clock::Clock`]) and the records to evaluate.
//!
//! ```
//! use budget_schedule::{resolve_next, CalendarDate, Frequency};
//!
//! let anchor = CalendarDate::from_ymd(2024, 1, 31).unwrap();
//! let as_of = CalendarDate::from_ymd(2024, 2, 1).unwrap();
//! let next = resolve_next(anchor, Frequency::Monthly, as_of);
//! assert_eq!(next.to_string(), "2024-02-29");
//! ```

pub mod bills;
pub mod budget;
pub mod calendar;
pub mod clock;
pub mod config;
pub mod errors;
pub mod schedule;
pub mod utils;

pub use bills::{Bill, BillDue, BillService};
pub use budget::{
    resolve_window, spent_in_window, Budget, BudgetPeriodSpec, BudgetProgress, BudgetService,
    BudgetStatus, PeriodKind, ResolvedWindow, Transaction, TransactionKind,
};
pub use calendar::CalendarDate;
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{ConfigError, ConfigManager, ScheduleConfig};
pub use errors::ScheduleError;
pub use schedule::{resolve_next, DueStatus, Frequency, RecurrenceSpec, ScheduleQuery};

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Budget Schedule tracing initialized.");
    });
}
