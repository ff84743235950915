use super::Judgment;

/// Bonus added per combo step on a successful hit.
pub const COMBO_BONUS_STEP: u64 = 10;
/// Upper bound on the per-hit combo bonus.
pub const COMBO_BONUS_CAP: u64 = 500;

/// Score, combo and per-tier counters for one session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScoreManager {
    pub score: u64,
    pub combo: u32,
    pub max_combo: u32,
    pub perfect_count: u32,
    pub good_count: u32,
    pub bad_count: u32,
    pub miss_count: u32,
    /// Misses caused by a note expiring without input (included in `miss_count`).
    pub timeout_count: u32,
    /// Presses with no note to match. Not counted as notes.
    pub empty_press_count: u32,
}

impl ScoreManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bonus for a hit that brought the combo to `combo`.
    pub fn combo_bonus(combo: u32) -> u64 {
        (u64::from(combo) * COMBO_BONUS_STEP).min(COMBO_BONUS_CAP)
    }

    /// Apply a judgment for a matched note. Returns the points gained.
    pub fn add_judgment(&mut self, judgment: Judgment) -> u64 {
        match judgment {
            Judgment::Perfect => self.perfect_count += 1,
            Judgment::Good => self.good_count += 1,
            Judgment::Bad => self.bad_count += 1,
            Judgment::Miss => self.miss_count += 1,
        }

        if judgment.is_combo_break() {
            self.combo = 0;
            return 0;
        }

        self.combo += 1;
        self.max_combo = self.max_combo.max(self.combo);
        let gained = judgment.points() + Self::combo_bonus(self.combo);
        self.score += gained;
        gained
    }

    /// A note expired without input.
    pub fn add_timeout(&mut self) {
        self.timeout_count += 1;
        self.add_judgment(Judgment::Miss);
    }

    /// A press with nothing to hit. Breaks the combo, never touches the score.
    pub fn add_empty_press(&mut self) {
        self.empty_press_count += 1;
        self.combo = 0;
    }

    /// Notes that reached a judgment, by input or timeout.
    pub fn judged_notes(&self) -> u32 {
        self.perfect_count + self.good_count + self.bad_count + self.miss_count
    }
}
