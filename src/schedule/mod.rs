//! Recurring bill schedules: frequencies, next-occurrence resolution and due status.

pub mod frequency;
pub mod recurrence;
pub mod status;

pub use frequency::Frequency;
pub use recurrence::{
    resolve_next, resolve_next_iterative, Occurrences, RecurrenceSpec, ScheduleQuery,
};
pub use status::DueStatus;
