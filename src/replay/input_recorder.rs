use super::InputScript;

/// Records player actions during a live session.
#[derive(Debug, Clone)]
pub struct InputRecorder {
    session_start: f64,
    actions: Vec<f64>,
}

impl InputRecorder {
    pub fn new(session_start: f64) -> Self {
        Self {
            session_start,
            actions: Vec::new(),
        }
    }

    pub fn record(&mut self, time: f64) {
        self.actions.push(time - self.session_start);
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Take the recorded actions as a script.
    pub fn into_script(self, seed: Option<u64>) -> InputScript {
        InputScript::new(seed, self.actions)
    }
}
