use std::collections::{BTreeMap, VecDeque};

use tracing::{debug, info};

use super::{JudgeConfig, JudgeSystem, Judgment, ScoreManager, TimingStats};
use crate::config::SessionConfig;
use crate::model::{Note, NoteId, Tempo};
use crate::pattern::{PatternSelector, RandomSelector, generate_schedule, notes_from_times};
use crate::util::{ConfigError, TimingError};

/// How long the latest judgment stays on screen, in seconds.
pub const JUDGMENT_DISPLAY_TIME: f64 = 1.0;

/// Result of a player action.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InputOutcome {
    pub judgment: Judgment,
    pub success: bool,
    /// Matched note, `None` when nothing was active.
    pub note: Option<NoteId>,
    /// Signed `current_time - target_time` of the matched note.
    pub offset: Option<f64>,
}

impl InputOutcome {
    fn empty() -> Self {
        Self {
            judgment: Judgment::Miss,
            success: false,
            note: None,
            offset: None,
        }
    }

    pub fn pair(&self) -> (Judgment, bool) {
        (self.judgment, self.success)
    }
}

#[derive(Debug, Clone, Copy)]
struct LastJudgment {
    judgment: Judgment,
    time: f64,
}

/// Rhythm core: owns the note schedule, promotes and expires notes over
/// time, and turns player input into judgments.
///
/// Every time-dependent call takes `current_time` from the caller.
/// Notes live in exactly one place: `scheduled` (sorted by target time),
/// `active` (keyed by id), or nowhere once resolved.
#[derive(Debug)]
pub struct TimingManager {
    tempo: Tempo,
    session_start: f64,
    judge: JudgeSystem,
    scheduled: VecDeque<Note>,
    active: BTreeMap<NoteId, Note>,
    total_notes: usize,
    score: ScoreManager,
    timing_stats: TimingStats,
    last_judgment: Option<LastJudgment>,
}

impl TimingManager {
    /// Generate a pattern-based schedule starting at `session_start`.
    pub fn new<S: PatternSelector + ?Sized>(
        config: &SessionConfig,
        session_start: f64,
        selector: &mut S,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let tempo = config.tempo()?;
        let notes = generate_schedule(
            &tempo,
            session_start,
            config.lead_time,
            &config.patterns,
            &config.layout(),
            selector,
        )?;
        Self::from_notes(config, tempo, session_start, notes)
    }

    /// Pattern selection seeded from `config.seed`, or from entropy when unset.
    pub fn from_config(config: &SessionConfig, session_start: f64) -> Result<Self, ConfigError> {
        match config.seed {
            Some(seed) => Self::new(config, session_start, &mut RandomSelector::seeded(seed)),
            None => Self::new(
                config,
                session_start,
                &mut RandomSelector::new(rand::thread_rng()),
            ),
        }
    }

    /// Explicit target times instead of patterns. Times need not be sorted.
    pub fn with_schedule<I>(
        config: &SessionConfig,
        session_start: f64,
        target_times: I,
    ) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = f64>,
    {
        config.validate_timing()?;
        let tempo = config.tempo()?;
        let notes = notes_from_times(target_times.into_iter().collect(), config.lead_time)?;
        Self::from_notes(config, tempo, session_start, notes)
    }

    fn from_notes(
        config: &SessionConfig,
        tempo: Tempo,
        session_start: f64,
        notes: Vec<Note>,
    ) -> Result<Self, ConfigError> {
        let judge = JudgeSystem::new(config.judge.clone())?;
        info!(
            notes = notes.len(),
            bpm = tempo.bpm(),
            session_start,
            "session scheduled"
        );
        Ok(Self {
            tempo,
            session_start,
            judge,
            total_notes: notes.len(),
            scheduled: notes.into(),
            active: BTreeMap::new(),
            score: ScoreManager::new(),
            timing_stats: TimingStats::default(),
            last_judgment: None,
        })
    }

    /// Advance one tick: expire overdue active notes, then promote notes
    /// entering their lead time. Returns the notes that timed out.
    pub fn update(&mut self, current_time: f64) -> Result<Vec<Note>, TimingError> {
        let expired_ids: Vec<NoteId> = self
            .active
            .values()
            .filter(|note| !note.is_resolved() && self.judge.is_expired(note.offset(current_time)))
            .map(Note::id)
            .collect();

        let mut expired = Vec::with_capacity(expired_ids.len());
        for id in expired_ids {
            let Some(mut note) = self.active.remove(&id) else {
                continue;
            };
            note.resolve(Judgment::Miss)?;
            self.score.add_timeout();
            self.last_judgment = Some(LastJudgment {
                judgment: Judgment::Miss,
                time: current_time,
            });
            debug!(note = %id, target = note.target_time(), "note timed out");
            expired.push(note);
        }

        // Sorted by target time, so the notes to promote form a prefix.
        let due = self
            .scheduled
            .partition_point(|note| note.target_time() - current_time <= note.lead_time());
        for mut note in self.scheduled.drain(..due) {
            note.activate();
            debug!(note = %note.id(), target = note.target_time(), "note activated");
            self.active.insert(note.id(), note);
        }

        if !expired.is_empty() {
            self.log_if_finished();
        }
        Ok(expired)
    }

    /// Judge a player action against the nearest active note.
    pub fn resolve_input(&mut self, current_time: f64) -> Result<InputOutcome, TimingError> {
        // Ids follow target order and `min_by` keeps the first minimum,
        // so ties go to the earlier note.
        let nearest = self
            .active
            .values()
            .filter(|note| !note.is_resolved())
            .min_by(|a, b| {
                a.offset(current_time)
                    .abs()
                    .total_cmp(&b.offset(current_time).abs())
            })
            .map(Note::id);

        let Some(mut note) = nearest.and_then(|id| self.active.remove(&id)) else {
            self.score.add_empty_press();
            self.last_judgment = Some(LastJudgment {
                judgment: Judgment::Miss,
                time: current_time,
            });
            debug!(time = current_time, "input with no active note");
            return Ok(InputOutcome::empty());
        };

        let offset = note.offset(current_time);
        let judgment = self.judge.judge(offset);
        note.resolve(judgment)?;

        let gained = self.score.add_judgment(judgment);
        self.timing_stats.record(judgment, offset);
        self.last_judgment = Some(LastJudgment {
            judgment,
            time: current_time,
        });
        debug!(
            note = %note.id(),
            judgment = judgment.label(),
            offset,
            gained,
            combo = self.score.combo,
            "input judged"
        );
        self.log_if_finished();

        Ok(InputOutcome {
            judgment,
            success: judgment.is_success(),
            note: Some(note.id()),
            offset: Some(offset),
        })
    }

    /// True once every generated note has been hit or has timed out.
    pub fn is_finished(&self) -> bool {
        self.scheduled.is_empty() && self.active.is_empty()
    }

    /// Beats elapsed since the session started.
    pub fn current_beat_position(&self, current_time: f64) -> f64 {
        self.tempo.seconds_to_beats(current_time - self.session_start)
    }

    /// The latest judgment while it is still on display.
    pub fn last_judgment(&self, current_time: f64) -> Option<Judgment> {
        self.last_judgment
            .filter(|last| current_time - last.time <= JUDGMENT_DISPLAY_TIME)
            .map(|last| last.judgment)
    }

    pub fn score(&self) -> u64 {
        self.score.score
    }

    pub fn combo(&self) -> u32 {
        self.score.combo
    }

    pub fn max_combo(&self) -> u32 {
        self.score.max_combo
    }

    pub fn score_manager(&self) -> &ScoreManager {
        &self.score
    }

    pub fn timing_stats(&self) -> &TimingStats {
        &self.timing_stats
    }

    /// Notes eligible for input or timeout, in target order.
    pub fn active_notes(&self) -> impl Iterator<Item = &Note> {
        self.active.values()
    }

    /// Notes not yet promoted, in target order.
    pub fn scheduled_notes(&self) -> impl Iterator<Item = &Note> {
        self.scheduled.iter()
    }

    pub fn total_notes(&self) -> usize {
        self.total_notes
    }

    /// Notes not yet resolved.
    pub fn remaining_notes(&self) -> usize {
        self.scheduled.len() + self.active.len()
    }

    pub fn tempo(&self) -> &Tempo {
        &self.tempo
    }

    pub fn session_start(&self) -> f64 {
        self.session_start
    }

    pub fn judge_config(&self) -> &JudgeConfig {
        self.judge.config()
    }

    fn log_if_finished(&self) {
        if self.is_finished() {
            info!(
                score = self.score.score,
                max_combo = self.score.max_combo,
                "session finished"
            );
        }
    }
}
