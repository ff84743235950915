use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::game::JudgeConfig;
use crate::model::{LEAD_TIME, Tempo};
use crate::pattern::{Pattern, ScheduleLayout, default_catalog, validate_catalog};
use crate::util::ConfigError;

/// Settings for one play session (one round of the minigame).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SessionConfig {
    pub bpm: f64,
    pub rounds: usize,
    pub pre_roll_beats: f64,
    pub round_gap_beats: f64,
    /// Seconds a note is visible (and judgeable) before its target.
    pub lead_time: f64,
    pub judge: JudgeConfig,
    pub patterns: Vec<Pattern>,
    /// Pattern selection seed. `None` draws from OS entropy.
    pub seed: Option<u64>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            bpm: 120.0,
            rounds: 5,
            pre_roll_beats: 4.0,
            round_gap_beats: 6.0,
            lead_time: LEAD_TIME,
            judge: JudgeConfig::default(),
            patterns: default_catalog(),
            seed: None,
        }
    }
}

impl SessionConfig {
    /// Loads config from a specified path.
    /// Returns default config if file doesn't exist.
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        let config = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Saves config to a specified path.
    pub fn save_to<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    pub fn tempo(&self) -> Result<Tempo, ConfigError> {
        Tempo::new(self.bpm)
    }

    pub fn layout(&self) -> ScheduleLayout {
        ScheduleLayout {
            rounds: self.rounds,
            pre_roll_beats: self.pre_roll_beats,
            round_gap_beats: self.round_gap_beats,
        }
    }

    /// First problem found, in field order.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_timing()?;
        if self.rounds > 0 && self.patterns.is_empty() {
            return Err(ConfigError::EmptyCatalog);
        }
        validate_catalog(&self.patterns)?;
        self.layout().validate()
    }

    /// Tempo, lead time and judge windows only. Enough for explicit schedules.
    pub fn validate_timing(&self) -> Result<(), ConfigError> {
        self.tempo()?;
        if !self.lead_time.is_finite() || self.lead_time <= 0.0 {
            return Err(ConfigError::InvalidLeadTime(self.lead_time));
        }
        self.judge.validate()
    }
}
