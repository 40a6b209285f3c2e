//! Persistent user preferences and their on-disk storage.

pub mod error;
pub mod manager;
pub mod model;

pub use error::ConfigError;
pub use manager::{app_data_dir, ConfigManager};
pub use model::ScheduleConfig;
