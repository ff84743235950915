use tracing::debug;

use super::{Pattern, PatternSelector, validate_catalog};
use crate::model::{Note, NoteId, Tempo};
use crate::util::ConfigError;

/// How rounds are spaced on the beat grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScheduleLayout {
    pub rounds: usize,
    /// Beats before the first round starts.
    pub pre_roll_beats: f64,
    /// Beats the cursor advances after each round.
    pub round_gap_beats: f64,
}

impl ScheduleLayout {
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("pre_roll_beats", self.pre_roll_beats),
            ("round_gap_beats", self.round_gap_beats),
        ] {
            if !value.is_finite() {
                return Err(ConfigError::InvalidLayoutBeats { name, value });
            }
        }
        Ok(())
    }
}

impl Default for ScheduleLayout {
    fn default() -> Self {
        Self {
            rounds: 5,
            pre_roll_beats: 4.0,
            round_gap_beats: 6.0,
        }
    }
}

/// Build the full note schedule, ordered by target time with ids in that order.
pub fn generate_schedule<S: PatternSelector + ?Sized>(
    tempo: &Tempo,
    session_start: f64,
    lead_time: f64,
    catalog: &[Pattern],
    layout: &ScheduleLayout,
    selector: &mut S,
) -> Result<Vec<Note>, ConfigError> {
    if layout.rounds > 0 && catalog.is_empty() {
        return Err(ConfigError::EmptyCatalog);
    }
    validate_catalog(catalog)?;
    layout.validate()?;

    let mut target_times = Vec::new();
    let mut cursor = layout.pre_roll_beats;
    for round in 0..layout.rounds {
        let index = selector.select(catalog.len()).min(catalog.len() - 1);
        let pattern = &catalog[index];
        debug!(round, pattern = index, beat = cursor, "round scheduled");

        target_times.extend(
            pattern
                .offsets()
                .iter()
                .map(|offset| session_start + tempo.beats_to_seconds(cursor + offset)),
        );
        cursor += layout.round_gap_beats;
    }

    notes_from_times(target_times, lead_time)
}

/// Stable sort by target time, then number notes in that order.
///
/// A non-finite target could never be promoted, so it is rejected.
pub(crate) fn notes_from_times(
    mut target_times: Vec<f64>,
    lead_time: f64,
) -> Result<Vec<Note>, ConfigError> {
    if let Some(&time) = target_times.iter().find(|time| !time.is_finite()) {
        return Err(ConfigError::InvalidTargetTime(time));
    }
    target_times.sort_by(f64::total_cmp);
    Ok(target_times
        .into_iter()
        .enumerate()
        .map(|(index, time)| Note::new(NoteId(index), time, lead_time))
        .collect())
}
