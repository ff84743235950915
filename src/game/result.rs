use serde::Serialize;

use super::TimingManager;

/// End-of-session summary for result screens.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PlayResult {
    pub score: u64,
    pub max_combo: u32,
    pub perfect_count: u32,
    pub good_count: u32,
    pub bad_count: u32,
    pub miss_count: u32,
    pub timeout_count: u32,
    pub empty_press_count: u32,
    pub early_count: u32,
    pub late_count: u32,
    pub total_notes: u32,
}

impl PlayResult {
    pub fn from_manager(manager: &TimingManager) -> Self {
        let score = manager.score_manager();
        let stats = manager.timing_stats();
        Self {
            score: score.score,
            max_combo: score.max_combo,
            perfect_count: score.perfect_count,
            good_count: score.good_count,
            bad_count: score.bad_count,
            miss_count: score.miss_count,
            timeout_count: score.timeout_count,
            empty_press_count: score.empty_press_count,
            early_count: stats.early_count,
            late_count: stats.late_count,
            total_notes: u32::try_from(manager.total_notes()).unwrap_or(u32::MAX),
        }
    }

    /// Weighted hit rate in percent: PERFECT 3, GOOD 2, BAD 1, MISS 0.
    pub fn accuracy(&self) -> f64 {
        if self.total_notes == 0 {
            return 0.0;
        }
        let earned = self.perfect_count * 3 + self.good_count * 2 + self.bad_count;
        let max = self.total_notes * 3;
        earned as f64 / max as f64 * 100.0
    }

    pub fn rank(&self) -> &'static str {
        let acc = self.accuracy();
        if acc >= 95.0 {
            "S"
        } else if acc >= 85.0 {
            "A"
        } else if acc >= 70.0 {
            "B"
        } else if acc >= 50.0 {
            "C"
        } else {
            "D"
        }
    }

    pub fn is_full_combo(&self) -> bool {
        self.total_notes > 0 && self.max_combo == self.total_notes
    }
}
