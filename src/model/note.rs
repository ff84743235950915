use std::fmt;

use crate::game::Judgment;
use crate::util::TimingError;

/// Default time before its target at which a note appears and becomes judgeable.
pub const LEAD_TIME: f64 = 2.0;

/// Identity of a note within one session. Assigned in schedule order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NoteId(pub usize);

impl fmt::Display for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Lifecycle stage of a note.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoteState {
    Scheduled,
    Active,
    Resolved(Judgment),
}

impl NoteState {
    pub fn is_resolved(&self) -> bool {
        matches!(self, Self::Resolved(_))
    }
}

/// A single timing target.
#[derive(Debug, Clone, PartialEq)]
pub struct Note {
    id: NoteId,
    target_time: f64,
    lead_time: f64,
    state: NoteState,
}

impl Note {
    pub fn new(id: NoteId, target_time: f64, lead_time: f64) -> Self {
        Self {
            id,
            target_time,
            lead_time,
            state: NoteState::Scheduled,
        }
    }

    pub fn id(&self) -> NoteId {
        self.id
    }

    /// Absolute time the note must be hit.
    pub fn target_time(&self) -> f64 {
        self.target_time
    }

    pub fn lead_time(&self) -> f64 {
        self.lead_time
    }

    /// Time at which the note first becomes visible.
    pub fn appear_time(&self) -> f64 {
        self.target_time - self.lead_time
    }

    pub fn state(&self) -> NoteState {
        self.state
    }

    /// Judgment assigned at resolution, `None` while unresolved.
    pub fn judgment(&self) -> Option<Judgment> {
        match self.state {
            NoteState::Resolved(judgment) => Some(judgment),
            NoteState::Scheduled | NoteState::Active => None,
        }
    }

    pub fn is_resolved(&self) -> bool {
        self.state.is_resolved()
    }

    /// Signed offset of `current_time` from the target (positive = late).
    pub fn offset(&self, current_time: f64) -> f64 {
        current_time - self.target_time
    }

    /// Approach progress for renderers: 0.0 when the note appears, 1.0 at its target.
    pub fn compute_approach_progress(&self, current_time: f64) -> f64 {
        if current_time >= self.target_time {
            return 1.0;
        }
        if current_time <= self.appear_time() {
            return 0.0;
        }
        ((current_time - self.appear_time()) / self.lead_time).clamp(0.0, 1.0)
    }

    pub fn is_visible(&self, current_time: f64) -> bool {
        current_time >= self.appear_time() && !self.is_resolved()
    }

    pub(crate) fn activate(&mut self) {
        if self.state == NoteState::Scheduled {
            self.state = NoteState::Active;
        }
    }

    /// Assign the final judgment. A note can only be resolved once.
    pub fn resolve(&mut self, judgment: Judgment) -> Result<(), TimingError> {
        if self.is_resolved() {
            return Err(TimingError::AlreadyResolved(self.id));
        }
        self.state = NoteState::Resolved(judgment);
        Ok(())
    }
}
