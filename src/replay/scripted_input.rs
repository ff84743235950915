use tracing::warn;

use super::InputScript;

/// Delivers scripted actions to a tick loop in time order.
#[derive(Debug, Clone)]
pub struct ScriptedInput {
    /// Absolute action times, ascending.
    actions: Vec<f64>,
    cursor: usize,
}

impl ScriptedInput {
    /// `session_start` converts the script's relative times to absolute ones.
    pub fn new(script: &InputScript, session_start: f64) -> Self {
        let mut actions: Vec<f64> = script
            .actions
            .iter()
            .map(|time| session_start + time)
            .collect();
        if actions.windows(2).any(|pair| pair[0] > pair[1]) {
            warn!("input script actions out of order; sorting");
            actions.sort_by(f64::total_cmp);
        }
        Self { actions, cursor: 0 }
    }

    /// Actions due at or before `time`, each delivered once.
    pub fn poll_up_to(&mut self, time: f64) -> Vec<f64> {
        let due = self.actions[self.cursor..].partition_point(|&action| action <= time);
        let polled = self.actions[self.cursor..self.cursor + due].to_vec();
        self.cursor += due;
        polled
    }

    /// Whether all actions have been delivered.
    pub fn is_finished(&self) -> bool {
        self.cursor >= self.actions.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn polls_each_action_once() {
        let script = InputScript::new(None, vec![1.0, 2.0, 3.0]);
        let mut input = ScriptedInput::new(&script, 10.0);

        assert!(input.poll_up_to(10.5).is_empty());
        assert_eq!(input.poll_up_to(12.0), vec![11.0, 12.0]);
        assert!(input.poll_up_to(12.5).is_empty());
        assert!(!input.is_finished());
        assert_eq!(input.poll_up_to(20.0), vec![13.0]);
        assert!(input.is_finished());
    }

    #[test]
    fn unordered_script_is_sorted() {
        let script = InputScript::new(None, vec![3.0, 1.0]);
        let mut input = ScriptedInput::new(&script, 0.0);
        assert_eq!(input.poll_up_to(5.0), vec![1.0, 3.0]);
    }
}
