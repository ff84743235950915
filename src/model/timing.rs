use crate::util::ConfigError;

/// Fixed tempo for one session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tempo {
    bpm: f64,
    beat_interval: f64,
}

impl Tempo {
    pub fn new(bpm: f64) -> Result<Self, ConfigError> {
        if !bpm.is_finite() || bpm <= 0.0 {
            return Err(ConfigError::InvalidBpm(bpm));
        }
        Ok(Self {
            bpm,
            beat_interval: 60.0 / bpm,
        })
    }

    pub fn bpm(&self) -> f64 {
        self.bpm
    }

    /// Seconds per beat.
    pub fn beat_interval(&self) -> f64 {
        self.beat_interval
    }

    /// Duration of `beats` beats in seconds.
    pub fn beats_to_seconds(&self, beats: f64) -> f64 {
        beats * self.beat_interval
    }

    /// Number of beats covered by `seconds`.
    pub fn seconds_to_beats(&self, seconds: f64) -> f64 {
        seconds / self.beat_interval
    }
}
