use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::errors::ConfigError;
use crate::palette;

pub const CONFIG_ENV_VAR: &str = "WATER_FILL_CONFIG";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FillerConfig {
    /// Units per tube.
    pub capacity: usize,
    pub autoplay_interval_ms: u64,
    pub total_tubes: usize,
    pub empty_tubes: usize,
    /// Fixed seed for reproducible fills. `None` draws from entropy.
    pub seed: Option<u64>,
}

impl Default for FillerConfig {
    fn default() -> Self {
        Self {
            capacity: 4,
            autoplay_interval_ms: 800,
            total_tubes: 3,
            empty_tubes: 1,
            seed: None,
        }
    }
}

#[derive(Debug, Deserialize)]
struct FileConfig {
    capacity: Option<usize>,
    autoplay_interval_ms: Option<u64>,
    total_tubes: Option<usize>,
    empty_tubes: Option<usize>,
    seed: Option<u64>,
}

impl FillerConfig {
    pub fn autoplay_interval(&self) -> Duration {
        Duration::from_millis(self.autoplay_interval_ms)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.capacity == 0 {
            return Err(ConfigError::Invalid("capacity must be at least 1".into()));
        }
        if self.autoplay_interval_ms == 0 {
            return Err(ConfigError::Invalid("autoplay_interval_ms must be positive".into()));
        }
        if self.total_tubes < 2 || self.total_tubes > palette::len() {
            return Err(ConfigError::Invalid(format!(
                "total_tubes must be within 2..={}",
                palette::len()
            )));
        }
        if self.empty_tubes >= self.total_tubes {
            return Err(ConfigError::Invalid(
                "empty_tubes must be less than total_tubes".into(),
            ));
        }
        Ok(())
    }

    fn apply(&mut self, file: FileConfig) {
        if let Some(v) = file.capacity {
            self.capacity = v;
        }
        if let Some(v) = file.autoplay_interval_ms {
            self.autoplay_interval_ms = v;
        }
        if let Some(v) = file.total_tubes {
            self.total_tubes = v;
        }
        if let Some(v) = file.empty_tubes {
            self.empty_tubes = v;
        }
        if file.seed.is_some() {
            self.seed = file.seed;
        }
    }

    /// Parses TOML on top of the defaults. Missing keys keep their default.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let file: FileConfig = toml::from_str(s)?;
        let mut cfg = Self::default();
        cfg.apply(file);
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let s = fs::read_to_string(path)?;
        Self::from_toml_str(&s)
    }
}

/// Loads the file named by `WATER_FILL_CONFIG`, or the defaults when unset.
pub fn load() -> Result<FillerConfig, ConfigError> {
    match std::env::var(CONFIG_ENV_VAR) {
        Ok(path) => FillerConfig::from_file(path),
        Err(_) => Ok(FillerConfig::default()),
    }
}
