mod judge;
mod result;
mod score;
mod timing_manager;

pub use judge::{
    JudgeConfig, JudgeConfigBuilder, JudgeSystem, Judgment, TimingDirection, TimingStats,
};
pub use result::PlayResult;
pub use score::{COMBO_BONUS_CAP, COMBO_BONUS_STEP, ScoreManager};
pub use timing_manager::{InputOutcome, JUDGMENT_DISPLAY_TIME, TimingManager};
