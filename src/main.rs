use std::path::PathBuf;
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info, warn};

use beatparry::config::SessionConfig;
use beatparry::game::{PlayResult, TimingManager};
use beatparry::replay::{InputRecorder, InputScript, ScriptedInput};
use beatparry::traits::{MockTimeProvider, SystemTimeProvider, TimeProvider};
use beatparry::util::init_logging;

/// Run one parry session headlessly on a simulated clock.
#[derive(Debug, Parser)]
#[command(name = "beatparry", version)]
struct Args {
    /// Session config (JSON). Defaults are used when the file is missing.
    #[arg(long, default_value = "session.json")]
    config: PathBuf,

    /// Pattern seed, overrides the config.
    #[arg(long, env = "BEATPARRY_SEED")]
    seed: Option<u64>,

    /// Tempo, overrides the config.
    #[arg(long)]
    bpm: Option<f64>,

    /// Replay actions from an input script instead of autoplay.
    #[arg(long)]
    script: Option<PathBuf>,

    /// Save the actions played to an input script.
    #[arg(long)]
    record: Option<PathBuf>,

    /// Autoplay hit offset in milliseconds (negative = early).
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    offset_ms: f64,

    /// Autoplay random jitter in milliseconds, applied as +/- this value.
    #[arg(long, default_value_t = 0.0)]
    jitter_ms: f64,

    /// Simulation ticks per second.
    #[arg(long, default_value_t = 60.0)]
    tick_rate: f64,

    /// Pace ticks to the wall clock instead of running as fast as possible.
    #[arg(long)]
    realtime: bool,

    /// Print the result as JSON.
    #[arg(long)]
    json: bool,

    #[arg(long)]
    log_dir: Option<PathBuf>,

    #[arg(short, long)]
    verbose: bool,
}

const MAX_HP: u32 = 3;
const PARRY_DURATION: f64 = 0.3;
const HIT_DURATION: f64 = 0.5;

/// Player avatar. Owns the consequences of judgments; the timing core never sees it.
#[derive(Debug)]
struct Avatar {
    hp: u32,
    parry_until: f64,
    hit_until: f64,
}

impl Avatar {
    fn new() -> Self {
        Self {
            hp: MAX_HP,
            parry_until: f64::NEG_INFINITY,
            hit_until: f64::NEG_INFINITY,
        }
    }

    /// Start a parry. Refused while the hit animation plays.
    fn try_parry(&mut self, time: f64) -> bool {
        if time < self.hit_until {
            return false;
        }
        self.parry_until = time + PARRY_DURATION;
        true
    }

    fn is_parrying(&self, time: f64) -> bool {
        time < self.parry_until
    }

    fn take_damage(&mut self, time: f64) {
        self.hp = self.hp.saturating_sub(1);
        self.hit_until = time + HIT_DURATION;
        self.parry_until = f64::NEG_INFINITY;
    }

    fn is_alive(&self) -> bool {
        self.hp > 0
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.log_dir.as_deref(), args.verbose)?;

    let mut config = SessionConfig::load_from(&args.config)
        .with_context(|| format!("failed to load {}", args.config.display()))?;
    if let Some(seed) = args.seed {
        config.seed = Some(seed);
    }
    if let Some(bpm) = args.bpm {
        config.bpm = bpm;
    }
    if !(args.tick_rate.is_finite() && args.tick_rate > 0.0) {
        anyhow::bail!("tick rate must be positive, got {}", args.tick_rate);
    }

    let clock = MockTimeProvider::new();
    let session_start = clock.now();
    let mut manager = TimingManager::from_config(&config, session_start)?;

    let script = match &args.script {
        Some(path) => InputScript::load_from(path)
            .with_context(|| format!("failed to load {}", path.display()))?,
        None => autoplay_script(&manager, &config, args.offset_ms, args.jitter_ms),
    };
    let mut input = ScriptedInput::new(&script, session_start);
    let mut recorder = InputRecorder::new(session_start);
    let mut avatar = Avatar::new();
    let wall_clock = args.realtime.then(SystemTimeProvider::new);

    let tick = 1.0 / args.tick_rate;
    while !manager.is_finished() && avatar.is_alive() {
        clock.advance(tick);
        let now = clock.now();

        // Each action is judged at its own time, before the tick's timeouts.
        for action_time in input.poll_up_to(now) {
            apply_timeouts(&mut manager, &mut avatar, action_time)?;
            recorder.record(action_time);
            if !avatar.try_parry(action_time) {
                debug!(time = action_time, "parry blocked while hit");
                continue;
            }
            let outcome = manager.resolve_input(action_time)?;
            info!(
                judgment = outcome.judgment.label(),
                offset_ms = outcome.offset.map(|offset| offset * 1000.0),
                beat = manager.current_beat_position(action_time),
                combo = manager.combo(),
                score = manager.score(),
                "parry"
            );
            if !outcome.success {
                avatar.take_damage(action_time);
            }
        }

        apply_timeouts(&mut manager, &mut avatar, now)?;

        if let Some(wall) = &wall_clock {
            let ahead = (now - session_start) - wall.now();
            if ahead > 0.0 {
                thread::sleep(Duration::from_secs_f64(ahead));
            }
        }
    }

    if let Some(path) = &args.record {
        if recorder.is_empty() {
            warn!("no actions to record");
        }
        info!(actions = recorder.len(), path = %path.display(), "saving input script");
        recorder
            .into_script(config.seed)
            .save_to(path)
            .with_context(|| format!("failed to save {}", path.display()))?;
    }

    let result = PlayResult::from_manager(&manager);
    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print_result(&result, avatar.hp);
    }
    if !avatar.is_alive() {
        warn!(remaining = manager.remaining_notes(), "game over");
    }

    Ok(())
}

/// Advance the core to `time`. Each expired note costs a hit point unless parried.
fn apply_timeouts(manager: &mut TimingManager, avatar: &mut Avatar, time: f64) -> Result<()> {
    for missed in manager.update(time)? {
        info!(note = %missed.id(), "MISS (timeout)");
        if !avatar.is_parrying(time) {
            avatar.take_damage(time);
        }
    }
    Ok(())
}

/// One action per note at its target time plus offset and jitter.
fn autoplay_script(
    manager: &TimingManager,
    config: &SessionConfig,
    offset_ms: f64,
    jitter_ms: f64,
) -> InputScript {
    let mut rng = ChaCha8Rng::seed_from_u64(config.seed.unwrap_or_default());
    let jitter = jitter_ms.abs() / 1000.0;
    let actions = manager
        .scheduled_notes()
        .map(|note| {
            let noise = if jitter > 0.0 {
                rng.gen_range(-jitter..=jitter)
            } else {
                0.0
            };
            note.target_time() - manager.session_start() + offset_ms / 1000.0 + noise
        })
        .collect();
    InputScript::new(config.seed, actions)
}

fn print_result(result: &PlayResult, hp: u32) {
    if hp == 0 {
        println!("GAME OVER");
    } else {
        println!("CLEAR ({hp}/{MAX_HP} HP)");
    }
    println!("Score: {}", result.score);
    if result.is_full_combo() {
        println!("Max combo: {} (FULL COMBO)", result.max_combo);
    } else {
        println!("Max combo: {}", result.max_combo);
    }
    println!(
        "PERFECT {} / GOOD {} / BAD {} / MISS {}",
        result.perfect_count, result.good_count, result.bad_count, result.miss_count
    );
    println!("EARLY {} / LATE {}", result.early_count, result.late_count);
    println!(
        "Accuracy: {:.2}% ({})",
        result.accuracy(),
        result.rank()
    );
}
