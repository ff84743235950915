//! Test utilities for building sessions and driving them over time.

#[cfg(test)]
pub mod builders {
    use crate::config::SessionConfig;
    use crate::game::{JudgeConfig, TimingManager};

    /// Builder for managers with an explicit note schedule.
    #[derive(Debug, Clone)]
    pub struct SessionBuilder {
        config: SessionConfig,
        session_start: f64,
        target_times: Vec<f64>,
    }

    impl SessionBuilder {
        pub fn new() -> Self {
            Self {
                config: SessionConfig::default(),
                session_start: 0.0,
                target_times: Vec::new(),
            }
        }

        pub fn bpm(mut self, bpm: f64) -> Self {
            self.config.bpm = bpm;
            self
        }

        pub fn judge(mut self, judge: JudgeConfig) -> Self {
            self.config.judge = judge;
            self
        }

        pub fn session_start(mut self, time: f64) -> Self {
            self.session_start = time;
            self
        }

        pub fn note(mut self, target_time: f64) -> Self {
            self.target_times.push(target_time);
            self
        }

        /// Notes on consecutive beats, starting `first_beat` beats after session start.
        pub fn notes_on_beats(mut self, first_beat: u32, count: u32) -> Self {
            let interval = 60.0 / self.config.bpm;
            self.target_times.extend(
                (first_beat..first_beat + count)
                    .map(|beat| self.session_start + f64::from(beat) * interval),
            );
            self
        }

        pub fn build(self) -> TimingManager {
            TimingManager::with_schedule(&self.config, self.session_start, self.target_times)
                .expect("valid test session")
        }
    }

    impl Default for SessionBuilder {
        fn default() -> Self {
            Self::new()
        }
    }

    /// Tick `manager` from `from` to `to` (inclusive) in `step` increments.
    pub fn tick_through(manager: &mut TimingManager, from: f64, to: f64, step: f64) {
        let mut time = from;
        while time <= to {
            manager.update(time).expect("tick");
            time += step;
        }
        manager.update(to).expect("tick");
    }
}
