//! Integration tests for full parry sessions on a simulated clock.

use beatparry::config::SessionConfig;
use beatparry::game::{Judgment, PlayResult, TimingManager};
use beatparry::pattern::{RandomSelector, SequenceSelector};
use beatparry::replay::{InputRecorder, InputScript, ScriptedInput};
use beatparry::traits::{MockTimeProvider, TimeProvider};

fn manager_with(times: &[f64]) -> TimingManager {
    TimingManager::with_schedule(&SessionConfig::default(), 0.0, times.iter().copied()).unwrap()
}

/// Drive a session at 60 Hz. Each due action is judged at its own time,
/// then the tick itself is applied.
fn play(manager: &mut TimingManager, script: &InputScript) {
    let clock = MockTimeProvider::starting_at(manager.session_start());
    let mut input = ScriptedInput::new(script, manager.session_start());
    let mut guard = 0;
    while !manager.is_finished() {
        clock.advance(1.0 / 60.0);
        let now = clock.now();
        for action in input.poll_up_to(now) {
            manager.update(action).unwrap();
            manager.resolve_input(action).unwrap();
        }
        manager.update(now).unwrap();
        guard += 1;
        assert!(guard < 100_000, "session never finished");
    }
}

fn perfect_script(manager: &TimingManager) -> InputScript {
    let actions = manager
        .scheduled_notes()
        .map(|note| note.target_time() - manager.session_start())
        .collect();
    InputScript::new(None, actions)
}

#[test]
fn test_on_time_parry_is_perfect() {
    let mut manager = manager_with(&[2.5]);
    manager.update(0.5).unwrap();
    assert_eq!(manager.active_notes().count(), 1);

    let outcome = manager.resolve_input(2.5).unwrap();
    assert_eq!(outcome.pair(), (Judgment::Perfect, true));
    assert_eq!(manager.score(), 310);
    assert_eq!(manager.combo(), 1);
    assert!(manager.is_finished());
}

#[test]
fn test_late_bad_breaks_combo() {
    let mut manager = manager_with(&[1.0, 2.5]);
    manager.update(0.5).unwrap();
    manager.resolve_input(1.0).unwrap();
    assert_eq!(manager.combo(), 1);

    let outcome = manager.resolve_input(2.65).unwrap();
    assert_eq!(outcome.pair(), (Judgment::Bad, false));
    assert_eq!(manager.combo(), 0);
    assert_eq!(manager.score(), 310);
}

#[test]
fn test_unanswered_note_times_out() {
    let mut manager = manager_with(&[2.5]);
    manager.update(0.5).unwrap();
    assert!(manager.update(2.65).unwrap().is_empty());

    let expired = manager.update(2.71).unwrap();
    assert_eq!(expired.len(), 1);
    assert_eq!(expired[0].judgment(), Some(Judgment::Miss));
    assert_eq!(manager.combo(), 0);
    assert_eq!(manager.last_judgment(2.71), Some(Judgment::Miss));
    assert!(manager.is_finished());
}

#[test]
fn test_combo_bonus_accumulates() {
    let times = [2.5, 3.0, 3.5, 4.0, 4.5];
    let mut manager = manager_with(&times);
    manager.update(0.5).unwrap();

    let mut expected = 0;
    for (index, &time) in times.iter().enumerate() {
        manager.update(time).unwrap();
        assert_eq!(manager.resolve_input(time).unwrap().judgment, Judgment::Perfect);
        expected += 300 + 10 * (index as u64 + 1);
        assert_eq!(manager.score(), expected);
    }
    assert_eq!(manager.score(), 1650);
    assert_eq!(manager.combo(), 5);
    assert_eq!(manager.max_combo(), 5);
}

#[test]
fn test_empty_press_resets_combo_only() {
    let mut manager = manager_with(&[2.5, 10.0]);
    manager.update(0.5).unwrap();
    manager.resolve_input(2.5).unwrap();
    manager.update(3.0).unwrap();
    assert_eq!(manager.active_notes().count(), 0);

    let outcome = manager.resolve_input(3.0).unwrap();
    assert_eq!(outcome.pair(), (Judgment::Miss, false));
    assert_eq!(outcome.note, None);
    assert_eq!(manager.combo(), 0);
    assert_eq!(manager.max_combo(), 1);
    assert_eq!(manager.score(), 310);
    assert_eq!(manager.score_manager().empty_press_count, 1);
    assert_eq!(manager.remaining_notes(), 1);
}

#[test]
fn test_perfect_autoplay_full_combo() {
    let mut selector = RandomSelector::seeded(42);
    let mut manager = TimingManager::new(&SessionConfig::default(), 3.0, &mut selector).unwrap();
    let script = perfect_script(&manager);
    let total = manager.total_notes();
    assert!(total >= 20);

    play(&mut manager, &script);

    let result = PlayResult::from_manager(&manager);
    assert_eq!(result.perfect_count as usize, total);
    assert_eq!(result.max_combo as usize, total);
    assert!(result.is_full_combo());
    assert_eq!(result.rank(), "S");

    let expected: u64 = (1..=total as u64).map(|k| 300 + (k * 10).min(500)).sum();
    assert_eq!(result.score, expected);
}

#[test]
fn test_idle_session_times_out_every_note() {
    let mut selector = SequenceSelector::new(vec![0, 1, 2, 3]);
    let mut manager = TimingManager::new(&SessionConfig::default(), 0.0, &mut selector).unwrap();
    let total = manager.total_notes();

    play(&mut manager, &InputScript::default());

    let score = manager.score_manager();
    assert_eq!(score.timeout_count as usize, total);
    assert_eq!(score.miss_count as usize, total);
    assert_eq!(manager.score(), 0);
    assert_eq!(manager.max_combo(), 0);
}

#[test]
fn test_max_combo_never_decreases() {
    let mut manager = manager_with(&[2.5, 3.0, 3.5, 4.0, 4.5, 5.0]);
    manager.update(0.5).unwrap();
    let inputs = [2.5, 3.02, 3.65, 4.0, 4.5, 6.0];

    let mut previous = 0;
    for &time in &inputs {
        manager.update(time).unwrap();
        manager.resolve_input(time).unwrap();
        assert!(manager.max_combo() >= previous);
        assert!(manager.max_combo() >= manager.combo());
        previous = manager.max_combo();
    }
    assert_eq!(manager.max_combo(), 2);
}

#[test]
fn test_seeded_sessions_match() {
    let config = SessionConfig {
        seed: Some(7),
        ..Default::default()
    };
    let a = TimingManager::from_config(&config, 0.0).unwrap();
    let b = TimingManager::from_config(&config, 0.0).unwrap();
    let times = |m: &TimingManager| m.scheduled_notes().map(|n| n.target_time()).collect::<Vec<_>>();
    assert_eq!(times(&a), times(&b));
}

#[test]
fn test_recorded_script_replays_identically() {
    let mut first = manager_with(&[2.5, 3.0, 3.5]);
    let mut recorder = InputRecorder::new(first.session_start());
    for time in [2.48, 3.09, 3.56] {
        first.update(time).unwrap();
        recorder.record(time);
        first.resolve_input(time).unwrap();
    }
    assert!(first.is_finished());
    let script = recorder.into_script(None);

    let mut second = manager_with(&[2.5, 3.0, 3.5]);
    play(&mut second, &script);

    assert_eq!(
        PlayResult::from_manager(&first),
        PlayResult::from_manager(&second)
    );
}

#[test]
fn test_late_press_inside_tick_is_judged() {
    // Bad window ends at 2.705; the 60 Hz tick that delivers the press is past it.
    let mut manager = manager_with(&[2.505]);
    let script = InputScript::new(None, vec![2.703]);

    play(&mut manager, &script);

    let score = manager.score_manager();
    assert_eq!(score.bad_count, 1);
    assert_eq!(score.timeout_count, 0);
    assert_eq!(score.empty_press_count, 0);
}

#[test]
fn test_late_press_from_pattern_config() {
    let config: SessionConfig =
        serde_json::from_str(r#"{"rounds": 1, "patterns": [[1.01]]}"#).unwrap();
    let mut selector = SequenceSelector::repeat(0);
    let mut manager = TimingManager::new(&config, 0.0, &mut selector).unwrap();
    let target = manager.scheduled_notes().next().unwrap().target_time();
    assert!((target - 2.505).abs() < 1e-9);

    play(&mut manager, &InputScript::new(None, vec![target + 0.198]));

    let result = PlayResult::from_manager(&manager);
    assert_eq!(result.bad_count, 1);
    assert_eq!(result.timeout_count, 0);
    assert_eq!(result.late_count, 1);
}
