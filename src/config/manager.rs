use std::{
    env,
    ffi::OsString,
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use tracing::{debug, info};

use crate::config::{ConfigError, ScheduleConfig};

const DEFAULT_DIR_NAME: &str = ".budget_schedule";
const CONFIG_FILE: &str = "config.json";
const HOME_ENV: &str = "BUDGET_SCHEDULE_HOME";

/// Reads and writes the schedule configuration file.
#[derive(Debug, Clone)]
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    pub fn new(config_path: PathBuf) -> Self {
        Self { config_path }
    }

    /// Manager rooted at `$BUDGET_SCHEDULE_HOME`, falling back to `~/.budget_schedule`.
    pub fn default_location() -> Result<Self, ConfigError> {
        Self::with_base_dir(app_data_dir())
    }

    /// Manager for `config.json` inside `base`, creating the directory if needed.
    pub fn with_base_dir(base: PathBuf) -> Result<Self, ConfigError> {
        fs::create_dir_all(&base).map_err(ConfigError::io(&base))?;
        Ok(Self::new(base.join(CONFIG_FILE)))
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Stored settings, or the defaults when no file has been written yet.
    pub fn load(&self) -> Result<ScheduleConfig, ConfigError> {
        let path = &self.config_path;
        if !path.is_file() {
            debug!(path = %path.display(), "schedule config missing, using defaults");
            return Ok(ScheduleConfig::default());
        }
        let raw = fs::read_to_string(path).map_err(ConfigError::io(path))?;
        let config = serde_json::from_str(&raw).map_err(ConfigError::format(path))?;
        debug!(path = %path.display(), ?config, "loaded schedule config");
        Ok(config)
    }

    /// Replaces the stored settings. The file is written beside the target and
    /// renamed over it, so readers never observe a partial document.
    pub fn save(&self, config: &ScheduleConfig) -> Result<(), ConfigError> {
        let path = &self.config_path;
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir).map_err(ConfigError::io(dir))?;
        }
        let body = serde_json::to_string_pretty(config).map_err(ConfigError::format(path))?;
        let staging = staging_path(path);
        write_synced(&staging, body.as_bytes()).map_err(ConfigError::io(&staging))?;
        fs::rename(&staging, path).map_err(ConfigError::io(path))?;
        info!(path = %path.display(), "saved schedule config");
        Ok(())
    }
}

/// Application data directory, defaulting to `~/.budget_schedule`.
pub fn app_data_dir() -> PathBuf {
    if let Some(custom) = env::var_os(HOME_ENV) {
        return PathBuf::from(custom);
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_DIR_NAME)
}

/// Sibling path used while a save is in flight: `config.json` -> `config.json.partial`.
fn staging_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(OsString::from)
        .unwrap_or_else(|| OsString::from(CONFIG_FILE));
    name.push(".partial");
    path.with_file_name(name)
}

fn write_synced(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(bytes)?;
    file.sync_all()
}
