use serde::{Deserialize, Serialize};

/// Default look-ahead for flagging bills as due soon, in days.
pub const DEFAULT_DUE_SOON_DAYS: u32 = 7;
/// Default cap on projected occurrences per bill and window.
pub const DEFAULT_MAX_PROJECTED_OCCURRENCES: usize = 1024;

/// Tunables consumed by the bill services. Missing keys take their defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScheduleConfig {
    pub due_soon_days: u32,
    pub max_projected_occurrences: usize,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            due_soon_days: DEFAULT_DUE_SOON_DAYS,
            max_projected_occurrences: DEFAULT_MAX_PROJECTED_OCCURRENCES,
        }
    }
}
