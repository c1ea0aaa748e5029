use std::time::Duration;

use fencing_core::clock::TimerKind;
use fencing_core::display::RunStatus;
use fencing_core::{Action, ManualClock, Priority, Remote, RemoteConfig, Side};
use proptest::prelude::*;

fn remote(seed: u64) -> (Remote<ManualClock>, ManualClock) {
    let clock = ManualClock::new();
    let remote = Remote::with_config(RemoteConfig::deterministic(seed), clock.clone())
        .expect("standard config is valid");
    (remote, clock)
}

/// Double SET: loads the short bout time.
fn load_one_minute(remote: &mut Remote<ManualClock>, clock: &ManualClock) {
    remote.dispatch(Action::Set);
    clock.advance_millis(100);
    remote.dispatch(Action::Set);
    assert_eq!(remote.state().time_remaining(), 60);
}

#[test]
fn countdown_from_one_minute_auto_stops() {
    let (mut remote, clock) = remote(1);
    load_one_minute(&mut remote, &clock);

    remote.dispatch(Action::StartStop);
    assert!(remote.state().is_running());

    clock.advance_secs(30);
    assert_eq!(remote.poll(), 30);
    assert_eq!(remote.state().time_remaining(), 30);
    assert_eq!(remote.view().clock, "0:30");

    clock.advance_secs(30);
    remote.poll();
    let state = remote.state();
    assert_eq!(state.time_remaining(), 0);
    assert!(!state.is_running());
    assert!(!state.is_paused());
    assert!(remote.scheduler().countdown().is_none());
    assert!(remote.scheduler().pause().is_none());

    // Nothing left to fire.
    clock.advance_secs(600);
    assert_eq!(remote.poll(), 0);
}

#[test]
fn start_on_empty_clock_does_nothing() {
    let (mut remote, clock) = remote(1);
    load_one_minute(&mut remote, &clock);
    remote.dispatch(Action::StartStop);
    clock.advance_secs(61);
    remote.poll();

    remote.dispatch(Action::StartStop);
    assert!(!remote.state().is_running());
    assert!(remote.scheduler().countdown().is_none());
}

#[test]
fn pause_while_stopped_reloads_clock() {
    let (mut remote, clock) = remote(1);
    load_one_minute(&mut remote, &clock);

    remote.dispatch(Action::Pause);
    assert_eq!(remote.view().status, RunStatus::Pause);
    assert_eq!(remote.view().clock, "1:00");

    clock.advance_secs(59);
    remote.poll();
    assert_eq!(remote.state().pause_remaining(), Some(1));
    assert_eq!(remote.state().time_remaining(), 60);

    clock.advance_secs(1);
    remote.poll();
    let state = remote.state();
    assert!(!state.is_running());
    assert!(!state.pause_active());
    assert_eq!(state.time_remaining(), 180);
    // Indicator was off and stays off.
    assert_eq!(state.match_count(), 0);
    assert!(remote.scheduler().pause().is_none());
}

#[test]
fn pause_expiry_advances_match_count_skipping_zero() {
    let (mut remote, clock) = remote(1);
    for _ in 0..3 {
        remote.dispatch(Action::CycleMatchCount);
    }
    assert_eq!(remote.state().match_count(), 3);

    let mut seen = Vec::new();
    for _ in 0..4 {
        remote.dispatch(Action::Pause);
        clock.advance_secs(60);
        remote.poll();
        seen.push(remote.state().match_count());
    }
    assert_eq!(seen, vec![1, 2, 3, 1]);
}

#[test]
fn pause_over_running_clock_suspends_countdown() {
    let (mut remote, clock) = remote(1);
    remote.dispatch(Action::StartStop);
    clock.advance_secs(10);
    remote.poll();
    assert_eq!(remote.state().time_remaining(), 170);

    remote.dispatch(Action::Pause);
    assert_eq!(remote.view().status, RunStatus::Paused);
    assert!(remote.scheduler().countdown().is_none());

    clock.advance_secs(30);
    remote.poll();
    assert_eq!(remote.state().time_remaining(), 170);
    assert_eq!(remote.state().pause_remaining(), Some(30));

    clock.advance_secs(30);
    remote.poll();
    assert!(!remote.state().is_running());
    assert_eq!(remote.state().time_remaining(), 180);
}

#[test]
fn set_burst_classifies_single_double_double() {
    let (mut remote, clock) = remote(1);
    remote.dispatch(Action::StartStop);

    remote.dispatch(Action::Set);
    assert_eq!(remote.state().time_remaining(), 180);
    assert!(!remote.state().is_running());

    clock.advance_millis(100);
    remote.dispatch(Action::Set);
    assert_eq!(remote.state().time_remaining(), 60);

    clock.advance_millis(100);
    remote.dispatch(Action::Set);
    assert_eq!(remote.state().time_remaining(), 60);

    // Window is strict: exactly 500ms apart is two singles.
    clock.advance_millis(500);
    remote.dispatch(Action::Set);
    assert_eq!(remote.state().time_remaining(), 180);
}

#[test]
fn set_by_accessible_name_matches_panel_usage() {
    let (mut remote, clock) = remote(1);
    remote.press("SET");
    clock.advance_secs(2);
    remote.press("SET");
    clock.advance_millis(80);
    remote.press("SET");
    clock.advance_millis(80);
    remote.press("SET");
    assert_eq!(remote.view().clock, "1:00");
    assert!(remote.press("FLECHE").is_none());
}

#[test]
fn random_priority_is_fair_and_toggles_off() {
    let (mut remote, _clock) = remote(2024);
    let mut left = 0;
    let trials = 2000;

    for _ in 0..trials {
        let assigned = remote.dispatch(Action::PriorityRandom).priority();
        match assigned {
            Priority::Left => left += 1,
            Priority::Right => {}
            Priority::None => panic!("random priority left nobody holding it"),
        }
        let cleared = remote.dispatch(Action::PriorityRandom).priority();
        assert_eq!(cleared, Priority::None);
    }

    let share = left as f64 / trials as f64;
    assert!((0.45..=0.55).contains(&share), "left share {share}");
}

#[test]
fn manual_priority_cycle_after_random() {
    let (mut remote, _clock) = remote(9);
    let drawn = remote.dispatch(Action::PriorityRandom).priority();
    assert_ne!(drawn, Priority::None);

    let mut sequence = vec![drawn];
    for _ in 0..4 {
        sequence.push(remote.dispatch(Action::PriorityManual).priority());
    }

    let cycle = [Priority::None, Priority::Left, Priority::Right];
    let start = cycle.iter().position(|p| *p == drawn).unwrap_or(0);
    let expected: Vec<_> = (0..5).map(|i| cycle[(start + i) % 3]).collect();
    assert_eq!(sequence, expected);
}

#[test]
fn manual_match_count_cycle_includes_zero() {
    let (mut remote, _clock) = remote(1);
    let counts: Vec<u8> =
        (0..6).map(|_| remote.dispatch(Action::CycleMatchCount).match_count()).collect();
    assert_eq!(counts, vec![1, 2, 3, 0, 1, 2]);
}

#[test]
fn pause_suspends_countdown_and_ticks_from_its_own_phase() {
    let (mut remote, clock) = remote(1);
    let fired = std::sync::Arc::new(std::sync::Mutex::new(Vec::new()));
    let log = fired.clone();
    remote.subscribe(move |state| {
        log.lock().unwrap().push((state.time_remaining(), state.pause_remaining()));
    });

    remote.dispatch(Action::StartStop);
    clock.advance_millis(500);
    remote.dispatch(Action::Pause);

    // Countdown was suspended by the pause; only the pause timer is left.
    assert!(remote.scheduler().countdown().is_none());
    let pause = remote.scheduler().pause().copied().unwrap();
    assert_eq!(pause.kind, TimerKind::Pause);
    assert_eq!(pause.deadline, Duration::from_millis(1500));

    clock.advance_secs(3);
    assert_eq!(remote.poll(), 3);
    let observed = fired.lock().unwrap().clone();
    let pauses: Vec<_> = observed.iter().rev().take(3).map(|(_, p)| *p).collect();
    assert_eq!(pauses, vec![Some(57), Some(58), Some(59)]);
}

#[derive(Debug, Clone, Copy)]
enum Cancel {
    Pause,
    StartStop,
    Set,
}

fn cancel_strategy() -> impl Strategy<Value = Cancel> {
    prop_oneof![Just(Cancel::Pause), Just(Cancel::StartStop), Just(Cancel::Set)]
}

proptest! {
    #[test]
    fn score_tracks_adds_minus_removes(ops in proptest::collection::vec(any::<bool>(), 0..200)) {
        let (mut remote, _clock) = remote(1);
        let mut expected: u32 = 0;
        for add in ops {
            if add {
                remote.dispatch(Action::AddPoint { side: Side::Left });
                expected += 1;
            } else {
                remote.dispatch(Action::RemovePoint { side: Side::Left });
                expected = expected.saturating_sub(1);
            }
            prop_assert_eq!(remote.state().left_score(), expected);
        }
        prop_assert_eq!(remote.state().right_score(), 0);
    }

    #[test]
    fn cancelled_pause_leaves_no_trace(cancel_at_ms in 1_000u64..59_000, cancel in cancel_strategy()) {
        let (mut remote, clock) = remote(1);
        load_one_minute(&mut remote, &clock);
        remote.dispatch(Action::CycleMatchCount);
        remote.dispatch(Action::CycleMatchCount);

        clock.set(Duration::from_secs(1));
        remote.dispatch(Action::Pause);

        clock.advance_millis(cancel_at_ms);
        match cancel {
            Cancel::Pause => remote.dispatch(Action::Pause),
            Cancel::StartStop => remote.dispatch(Action::StartStop),
            Cancel::Set => remote.dispatch(Action::Set),
        };
        let after_cancel = *remote.state();

        // Past the 60-tick mark of the first pause.
        clock.set(Duration::from_millis(61_500));
        remote.poll();
        let state = *remote.state();
        prop_assert_eq!(state.match_count(), 2);
        prop_assert!(state.is_consistent(remote.config().bout_secs));

        match cancel {
            Cancel::Pause => {
                prop_assert!(state.pause_active());
                prop_assert_eq!(state.time_remaining(), 60);
            }
            Cancel::StartStop => {
                prop_assert!(!state.pause_active());
                prop_assert!(state.time_remaining() <= 60);
            }
            Cancel::Set => {
                prop_assert_eq!(state, after_cancel);
                prop_assert_eq!(state.time_remaining(), 180);
            }
        }

        // Long after: only a replacement pause ever expires, and only once.
        clock.set(Duration::from_secs(300));
        remote.poll();
        let expected = if matches!(cancel, Cancel::Pause) { 3 } else { 2 };
        prop_assert_eq!(remote.state().match_count(), expected);
        prop_assert!(remote.scheduler().pause().is_none());
    }
}
