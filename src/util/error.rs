use thiserror::Error;

use crate::model::NoteId;

/// Rejected session or judge configuration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("BPM must be positive and finite, got {0}")]
    InvalidBpm(f64),

    #[error("Timing window `{name}` must be non-negative and finite, got {value}")]
    NegativeWindow { name: &'static str, value: f64 },

    #[error("Timing windows must satisfy perfect <= good <= bad")]
    WindowsOutOfOrder,

    #[error("Lead time must be positive and finite, got {0}")]
    InvalidLeadTime(f64),

    #[error("Pattern catalog is empty")]
    EmptyCatalog,

    #[error("Pattern {0} has no beat offsets")]
    EmptyPattern(usize),

    #[error("Pattern {pattern} has an invalid beat offset: {value}")]
    InvalidBeatOffset { pattern: usize, value: f64 },

    #[error("Layout `{name}` must be finite, got {value}")]
    InvalidLayoutBeats { name: &'static str, value: f64 },

    #[error("Note target time must be finite, got {0}")]
    InvalidTargetTime(f64),
}

/// Broken note lifecycle contract. Always a caller bug.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimingError {
    #[error("Note {0} is already resolved")]
    AlreadyResolved(NoteId),
}
