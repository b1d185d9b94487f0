use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::pomodoro::Durations;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub work_secs: u32,
    pub short_break_secs: u32,
    pub long_break_secs: u32,
    pub cycles_before_long_break: u32,
    /// Pinned theme id; `None` means a random theme per session.
    pub theme: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            work_secs: 25 * 60,
            short_break_secs: 5 * 60,
            long_break_secs: 15 * 60,
            cycles_before_long_break: 4,
            theme: None,
        }
    }
}

impl Config {
    /// Interval lengths with non-positive values replaced by defaults.
    /// A countdown of zero seconds has no valid transition, so malformed
    /// config files degrade field by field instead of failing the launch.
    pub fn durations(&self) -> Durations {
        let fallback = Durations::default();

        fn positive_or(value: u32, fallback: u32) -> u32 {
            if value == 0 {
                fallback
            } else {
                value
            }
        }

        Durations {
            work_secs: positive_or(self.work_secs, fallback.work_secs),
            short_break_secs: positive_or(self.short_break_secs, fallback.short_break_secs),
            long_break_secs: positive_or(self.long_break_secs, fallback.long_break_secs),
            cycles_before_long_break: positive_or(
                self.cycles_before_long_break,
                fallback.cycles_before_long_break,
            ),
        }
    }
}

pub trait ConfigStore {
    fn load(&self) -> Config;
    fn save(&self, cfg: &Config) -> std::io::Result<()>;
}

#[derive(Debug, Clone)]
pub struct FileConfigStore {
    path: PathBuf,
}

impl FileConfigStore {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        let path = if let Some(pd) = ProjectDirs::from("", "", "bloom") {
            pd.config_dir().join("config.json")
        } else {
            PathBuf::from("bloom_config.json")
        };
        Self { path }
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }
}

impl Default for FileConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigStore for FileConfigStore {
    fn load(&self) -> Config {
        if let Ok(bytes) = fs::read(&self.path) {
            if let Ok(cfg) = serde_json::from_slice::<Config>(&bytes) {
                return cfg;
            }
        }
        Config::default()
    }

    fn save(&self, cfg: &Config) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_vec_pretty(cfg).unwrap_or_default();
        fs::write(&self.path, data)
    }
}
