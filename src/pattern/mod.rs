//! Beat-offset patterns and note schedule generation.
//!
//! A session is a sequence of rounds. Each round picks one pattern from a
//! catalog through a [`PatternSelector`] and lays its beat offsets out after
//! the current beat cursor. Two selectors:
//! - **Random**: uniform choice from an injected (seedable) RNG.
//! - **Sequence**: a fixed, cycling list of catalog indices.

mod random;
mod schedule;

pub use random::{RandomSelector, SequenceSelector};
pub use schedule::{ScheduleLayout, generate_schedule};
pub(crate) use schedule::notes_from_times;

use serde::{Deserialize, Serialize};

use crate::util::ConfigError;

/// Chooses which catalog pattern the next round uses.
pub trait PatternSelector {
    /// Returns an index below `len`. Never called with `len == 0`.
    fn select(&mut self, len: usize) -> usize;
}

/// An ordered sequence of beat offsets defining a micro-rhythm.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Pattern {
    offsets: Vec<f64>,
}

impl Pattern {
    pub fn new(offsets: Vec<f64>) -> Self {
        Self { offsets }
    }

    pub fn offsets(&self) -> &[f64] {
        &self.offsets
    }

    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }
}

impl From<Vec<f64>> for Pattern {
    fn from(offsets: Vec<f64>) -> Self {
        Self::new(offsets)
    }
}

/// The built-in catalog.
pub fn default_catalog() -> Vec<Pattern> {
    vec![
        // straight quarter notes
        Pattern::new(vec![1.0, 2.0, 3.0, 4.0]),
        // eighth-note run
        Pattern::new(vec![1.0, 1.5, 2.0, 2.5]),
        // syncopation
        Pattern::new(vec![1.0, 1.75, 2.5, 3.25]),
        Pattern::new(vec![1.0, 1.25, 1.75, 2.25, 3.0, 3.5]),
    ]
}

/// Reject empty patterns and negative or non-finite offsets.
pub fn validate_catalog(catalog: &[Pattern]) -> Result<(), ConfigError> {
    for (index, pattern) in catalog.iter().enumerate() {
        if pattern.is_empty() {
            return Err(ConfigError::EmptyPattern(index));
        }
        if let Some(&value) = pattern
            .offsets()
            .iter()
            .find(|offset| !offset.is_finite() || **offset < 0.0)
        {
            return Err(ConfigError::InvalidBeatOffset {
                pattern: index,
                value,
            });
        }
    }
    Ok(())
}
