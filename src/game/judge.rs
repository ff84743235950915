use serde::{Deserialize, Serialize};

use crate::util::ConfigError;

/// Early/late classification of a judged press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimingDirection {
    Early,
    Exact,
    Late,
}

impl TimingDirection {
    const EXACT_THRESHOLD_S: f64 = 0.001;

    /// `offset` is `current_time - target_time` in seconds.
    pub fn from_offset(offset: f64) -> Self {
        if offset < -Self::EXACT_THRESHOLD_S {
            TimingDirection::Early
        } else if offset > Self::EXACT_THRESHOLD_S {
            TimingDirection::Late
        } else {
            TimingDirection::Exact
        }
    }
}

/// Cumulative EARLY/LATE statistics during a session
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TimingStats {
    pub early_count: u32,
    pub late_count: u32,
}

impl TimingStats {
    pub fn record(&mut self, judgment: Judgment, offset: f64) {
        // PERFECT is close enough that the direction is noise
        if judgment == Judgment::Perfect {
            return;
        }

        match TimingDirection::from_offset(offset) {
            TimingDirection::Early => self.early_count += 1,
            TimingDirection::Late => self.late_count += 1,
            TimingDirection::Exact => {}
        }
    }
}

/// Accuracy tier assigned to a resolved note.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Judgment {
    Perfect,
    Good,
    Bad,
    Miss,
}

impl Judgment {
    /// Base points before combo bonus.
    pub fn points(&self) -> u64 {
        match self {
            Self::Perfect => 300,
            Self::Good => 200,
            Self::Bad => 100,
            Self::Miss => 0,
        }
    }

    /// Whether the press counts as a successful parry.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Perfect | Self::Good)
    }

    pub fn is_combo_break(&self) -> bool {
        !self.is_success()
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Perfect => "PERFECT",
            Self::Good => "GOOD",
            Self::Bad => "BAD",
            Self::Miss => "MISS",
        }
    }
}

/// Judgment windows in seconds, each an upper bound on `|current_time - target_time|`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JudgeConfig {
    pub perfect_window: f64,
    pub good_window: f64,
    pub bad_window: f64,
}

impl JudgeConfig {
    pub fn normal() -> Self {
        Self {
            perfect_window: 0.05,
            good_window: 0.1,
            bad_window: 0.2,
        }
    }

    pub fn builder() -> JudgeConfigBuilder {
        JudgeConfigBuilder::default()
    }

    /// Windows must be finite, non-negative and ascending so tiers never overlap.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("perfect", self.perfect_window),
            ("good", self.good_window),
            ("bad", self.bad_window),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::NegativeWindow { name, value });
            }
        }
        if self.perfect_window > self.good_window || self.good_window > self.bad_window {
            return Err(ConfigError::WindowsOutOfOrder);
        }
        Ok(())
    }
}

impl Default for JudgeConfig {
    fn default() -> Self {
        Self::normal()
    }
}

#[derive(Debug, Default)]
pub struct JudgeConfigBuilder {
    perfect_window: Option<f64>,
    good_window: Option<f64>,
    bad_window: Option<f64>,
}

impl JudgeConfigBuilder {
    pub fn perfect_window(mut self, seconds: f64) -> Self {
        self.perfect_window = Some(seconds);
        self
    }

    pub fn good_window(mut self, seconds: f64) -> Self {
        self.good_window = Some(seconds);
        self
    }

    pub fn bad_window(mut self, seconds: f64) -> Self {
        self.bad_window = Some(seconds);
        self
    }

    pub fn build(self) -> JudgeConfig {
        let default = JudgeConfig::normal();
        JudgeConfig {
            perfect_window: self.perfect_window.unwrap_or(default.perfect_window),
            good_window: self.good_window.unwrap_or(default.good_window),
            bad_window: self.bad_window.unwrap_or(default.bad_window),
        }
    }
}

#[derive(Debug, Clone)]
pub struct JudgeSystem {
    config: JudgeConfig,
}

impl JudgeSystem {
    pub fn new(config: JudgeConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &JudgeConfig {
        &self.config
    }

    /// Map a time difference to its tier. Anything beyond the bad window is a miss.
    pub fn judge(&self, offset: f64) -> Judgment {
        let abs_diff = offset.abs();

        if abs_diff <= self.config.perfect_window {
            Judgment::Perfect
        } else if abs_diff <= self.config.good_window {
            Judgment::Good
        } else if abs_diff <= self.config.bad_window {
            Judgment::Bad
        } else {
            Judgment::Miss
        }
    }

    /// True once a note can no longer be hit.
    /// `offset`: current_time - target_time (positive = note is in the past)
    pub fn is_expired(&self, offset: f64) -> bool {
        offset > self.config.bad_window
    }
}

impl Default for JudgeSystem {
    fn default() -> Self {
        Self {
            config: JudgeConfig::normal(),
        }
    }
}
