mod common;

use std::sync::Arc;

use common::*;
use pomodoro_timer::{
    services::AlertSound,
    settings::TimerSettings,
    state::Mode,
    timer::{CommandOutcome, TimerCommand},
};

#[tokio::test(start_paused = true)]
async fn countdown_ticks_once_per_second() {
    let h = harness(TimerSettings::default());

    assert!(h.controller.start().unwrap().is_applied());
    sleep_ticks(3).await;

    let state = h.controller.interval_state().unwrap();
    assert_eq!(state.remaining_seconds, 1500 - 3);
    assert!(state.running && !state.paused);
}

#[tokio::test(start_paused = true)]
async fn four_cycles_end_in_long_break() {
    let h = harness(TimerSettings {
        warning_minutes: 0,
        ..TimerSettings::default()
    });

    let mut modes = vec![h.controller.interval_state().unwrap().mode];
    for _ in 0..7 {
        run_interval(&h.controller).await;
        let state = h.controller.interval_state().unwrap();
        assert!(!state.running, "next interval must wait for start");
        modes.push(state.mode);
    }

    assert_eq!(
        modes,
        vec![
            Mode::Work,
            Mode::ShortBreak,
            Mode::Work,
            Mode::ShortBreak,
            Mode::Work,
            Mode::ShortBreak,
            Mode::Work,
            Mode::LongBreak,
        ]
    );

    let state = h.controller.interval_state().unwrap();
    assert_eq!(state.remaining_seconds, 900);
    assert_eq!(state.completed_work_cycles, 0);

    // One save per finished work interval, each carrying the new count
    let counts: Vec<u64> = h.store.saves().iter().map(|s| s.completed_sessions).collect();
    assert_eq!(counts, vec![1, 2, 3, 4]);
    assert_eq!(h.controller.settings().unwrap().completed_sessions, 4);

    assert_eq!(h.alerts.count_title("Work session complete!"), 4);
    assert_eq!(h.alerts.count_title("Break time over!"), 3);
}

#[tokio::test(start_paused = true)]
async fn completion_waits_for_explicit_start() {
    let h = harness(quick_settings());

    run_interval(&h.controller).await;
    let before = h.controller.interval_state().unwrap();
    assert_eq!(before.mode, Mode::ShortBreak);

    sleep_ticks(10).await;
    assert_eq!(h.controller.interval_state().unwrap(), before);
}

#[tokio::test(start_paused = true)]
async fn warning_fires_once_per_interval() {
    let h = harness(quick_settings());

    run_interval(&h.controller).await;

    assert_eq!(h.alerts.count_title("Almost done!"), 1);
    assert_eq!(
        h.alerts.sounds(),
        vec![AlertSound::Warning, AlertSound::Completion]
    );

    // The flag is re-armed for the break that follows
    run_interval(&h.controller).await;
    assert_eq!(h.alerts.count_title("Break ending soon"), 1);
}

#[tokio::test(start_paused = true)]
async fn zero_warning_minutes_never_warns() {
    let h = harness(TimerSettings {
        warning_minutes: 0,
        ..quick_settings()
    });

    run_interval(&h.controller).await;

    assert_eq!(h.alerts.count_title("Almost done!"), 0);
    assert_eq!(h.alerts.sounds(), vec![AlertSound::Completion]);
}

#[tokio::test(start_paused = true)]
async fn warning_threshold_is_inclusive() {
    let h = harness(quick_settings());

    h.controller.start().unwrap();
    sleep_ticks(60).await;
    let state = h.controller.interval_state().unwrap();
    assert_eq!(state.remaining_seconds, 60);
    assert!(!state.warning_fired);

    tokio::time::sleep(std::time::Duration::from_secs(1)).await;
    assert!(h.controller.interval_state().unwrap().warning_fired);
    assert_eq!(h.alerts.count_title("Almost done!"), 1);
}

#[tokio::test(start_paused = true)]
async fn disabled_alerts_stay_silent_but_still_count() {
    let h = harness(TimerSettings {
        sound_enabled: false,
        notifications_enabled: false,
        ..quick_settings()
    });

    run_interval(&h.controller).await;

    assert!(h.alerts.titles().is_empty());
    assert!(h.alerts.sounds().is_empty());
    assert_eq!(h.controller.settings().unwrap().completed_sessions, 1);
}

#[tokio::test(start_paused = true)]
async fn skip_transitions_without_counting() {
    let h = harness(quick_settings());

    h.controller.start().unwrap();
    sleep_ticks(5).await;
    assert!(h.controller.skip().unwrap().is_applied());

    let state = h.controller.interval_state().unwrap();
    assert_eq!(state.mode, Mode::ShortBreak);
    assert_eq!(state.remaining_seconds, 60);
    assert_eq!(state.completed_work_cycles, 1);
    assert!(!state.running && !state.paused);

    // Second skipped work interval still earns the long break
    h.controller.skip().unwrap();
    h.controller.skip().unwrap();
    assert_eq!(h.controller.interval_state().unwrap().mode, Mode::LongBreak);

    assert_eq!(h.controller.settings().unwrap().completed_sessions, 0);
    assert!(h.store.saves().is_empty());
    assert!(h.alerts.titles().is_empty());
    assert!(h.alerts.sounds().is_empty());

    // The stopped loop does not keep counting
    sleep_ticks(5).await;
    assert_eq!(h.controller.interval_state().unwrap().remaining_seconds, 300);
}

#[tokio::test(start_paused = true)]
async fn pause_does_not_drift() {
    let h = harness(TimerSettings::default());

    h.controller.start().unwrap();
    sleep_ticks(3).await;
    assert!(h.controller.pause().unwrap().is_applied());
    let paused_at = h.controller.interval_state().unwrap().remaining_seconds;
    assert_eq!(paused_at, 1497);

    tokio::time::sleep(std::time::Duration::from_secs(120)).await;
    let state = h.controller.interval_state().unwrap();
    assert_eq!(state.remaining_seconds, paused_at);
    assert!(state.running && state.paused);

    let resumed = h.controller.start().unwrap();
    assert!(resumed.is_applied());
    assert_eq!(resumed.display().remaining_seconds, paused_at);

    tokio::time::sleep(std::time::Duration::from_secs(2)).await;
    assert_eq!(h.controller.interval_state().unwrap().remaining_seconds, paused_at - 2);
}

#[tokio::test(start_paused = true)]
async fn invalid_controls_are_rejected_no_ops() {
    let h = harness(TimerSettings::default());

    // Pause while idle
    let outcome = h.controller.pause().unwrap();
    assert!(matches!(outcome, CommandOutcome::Rejected { .. }));

    h.controller.start().unwrap();

    // Start while already counting
    let before = h.controller.interval_state().unwrap();
    match h.controller.start().unwrap() {
        CommandOutcome::Rejected { reason, display } => {
            assert!(reason.contains("already running"));
            assert_eq!(display.remaining_seconds, before.remaining_seconds);
        }
        other => panic!("expected rejection, got {:?}", other),
    }

    h.controller.pause().unwrap();
    // Pause while paused
    assert!(!h.controller.pause().unwrap().is_applied());
}

#[tokio::test(start_paused = true)]
async fn reset_rewinds_and_stops() {
    let h = harness(quick_settings());

    h.controller.start().unwrap();
    sleep_ticks(65).await;
    let state = h.controller.interval_state().unwrap();
    assert!(state.warning_fired);
    assert_eq!(state.remaining_seconds, 120 - 65);

    assert!(h.controller.reset().unwrap().is_applied());
    let state = h.controller.interval_state().unwrap();
    assert_eq!(state.mode, Mode::Work);
    assert_eq!(state.remaining_seconds, 120);
    assert!(!state.warning_fired && !state.running && !state.paused);

    sleep_ticks(5).await;
    assert_eq!(h.controller.interval_state().unwrap().remaining_seconds, 120);
}

#[tokio::test(start_paused = true)]
async fn reset_keeps_mode_and_cycle_count() {
    let h = harness(quick_settings());

    run_interval(&h.controller).await;
    h.controller.start().unwrap();
    sleep_ticks(10).await;
    h.controller.reset().unwrap();

    let state = h.controller.interval_state().unwrap();
    assert_eq!(state.mode, Mode::ShortBreak);
    assert_eq!(state.remaining_seconds, 60);
    assert_eq!(state.completed_work_cycles, 1);
}

#[tokio::test(start_paused = true)]
async fn restart_right_after_reset_runs_a_single_loop() {
    let h = harness(TimerSettings::default());

    h.controller.start().unwrap();
    sleep_ticks(2).await;
    h.controller.reset().unwrap();
    h.controller.start().unwrap();

    sleep_ticks(3).await;
    assert_eq!(h.controller.interval_state().unwrap().remaining_seconds, 1500 - 3);
}

#[tokio::test(start_paused = true)]
async fn work_duration_locked_while_running() {
    let h = harness(TimerSettings::default());

    h.controller.start().unwrap();
    sleep_ticks(1).await;
    let before = h.controller.interval_state().unwrap();

    let outcome = h.controller.set_work_duration(15).unwrap();
    assert!(!outcome.is_applied());
    assert_eq!(h.controller.interval_state().unwrap().remaining_seconds, before.remaining_seconds);
    assert_eq!(h.controller.settings().unwrap().work_minutes, 25);

    // Still locked while paused
    h.controller.pause().unwrap();
    assert!(!h.controller.set_work_duration(15).unwrap().is_applied());
}

#[tokio::test(start_paused = true)]
async fn work_duration_applies_immediately_when_idle() {
    let h = harness(TimerSettings::default());

    let outcome = h.controller.set_work_duration(20).unwrap();
    assert!(outcome.is_applied());
    assert_eq!(outcome.display().remaining_seconds, 1200);
    assert_eq!(h.store.saves().last().unwrap().work_minutes, 20);

    // Outside work mode only the setting changes
    h.controller.skip().unwrap();
    h.controller.set_work_duration(30).unwrap();
    let state = h.controller.interval_state().unwrap();
    assert_eq!(state.mode, Mode::ShortBreak);
    assert_eq!(state.remaining_seconds, 300);

    h.controller.skip().unwrap();
    assert_eq!(h.controller.interval_state().unwrap().remaining_seconds, 1800);

    assert!(!h.controller.set_work_duration(0).unwrap().is_applied());
    match h.controller.set_work_duration(61).unwrap() {
        CommandOutcome::Rejected { reason, .. } => {
            assert!(reason.contains("between 1 and 60 minutes"), "{}", reason);
            assert!(reason.contains("longest work interval"), "{}", reason);
        }
        other => panic!("expected rejection, got {:?}", other),
    }
    assert_eq!(h.controller.settings().unwrap().work_minutes, 30);
}

#[tokio::test(start_paused = true)]
async fn apply_settings_rederives_idle_countdown() {
    let h = harness(TimerSettings {
        completed_sessions: 7,
        ..TimerSettings::default()
    });

    let new_settings = TimerSettings {
        work_minutes: 50,
        short_break_minutes: 10,
        completed_sessions: 0,
        sound_enabled: false,
        ..TimerSettings::default()
    };
    assert!(h.controller.apply_settings(new_settings).unwrap().is_applied());

    let settings = h.controller.settings().unwrap();
    assert_eq!(settings.work_minutes, 50);
    assert!(!settings.sound_enabled);
    assert_eq!(settings.completed_sessions, 7);
    assert_eq!(h.controller.interval_state().unwrap().remaining_seconds, 3000);
    assert_eq!(h.store.saves().last().unwrap(), &settings);
}

#[tokio::test(start_paused = true)]
async fn apply_settings_leaves_running_countdown_alone() {
    let h = harness(TimerSettings::default());

    h.controller.start().unwrap();
    sleep_ticks(4).await;

    let new_settings = TimerSettings {
        work_minutes: 10,
        ..TimerSettings::default()
    };
    assert!(h.controller.apply_settings(new_settings).unwrap().is_applied());
    assert_eq!(h.controller.interval_state().unwrap().remaining_seconds, 1496);
    assert_eq!(h.controller.settings().unwrap().work_minutes, 10);
}

#[tokio::test(start_paused = true)]
async fn apply_settings_rejects_out_of_range_values() {
    let h = harness(TimerSettings::default());

    let outcome = h
        .controller
        .apply_settings(TimerSettings {
            cycles_before_long_break: 0,
            ..TimerSettings::default()
        })
        .unwrap();

    match outcome {
        CommandOutcome::Rejected { reason, .. } => assert!(reason.contains("cycles_before_long_break")),
        other => panic!("expected rejection, got {:?}", other),
    }
    assert_eq!(h.controller.settings().unwrap(), TimerSettings::default());
    assert!(h.store.saves().is_empty());
}

#[tokio::test(start_paused = true)]
async fn session_counter_reset_is_persisted() {
    let h = harness(TimerSettings {
        completed_sessions: 12,
        ..TimerSettings::default()
    });

    let outcome = h.controller.reset_session_counter().unwrap();
    assert_eq!(outcome.display().sessions_completed, 0);
    assert_eq!(h.store.saves().last().unwrap().completed_sessions, 0);
}

#[tokio::test(start_paused = true)]
async fn persistence_failure_does_not_stop_the_timer() {
    let h = harness_with_store(Arc::new(MemoryStore::failing(quick_settings())));

    run_interval(&h.controller).await;

    let state = h.controller.interval_state().unwrap();
    assert_eq!(state.mode, Mode::ShortBreak);
    assert_eq!(h.controller.settings().unwrap().completed_sessions, 1);

    run_interval(&h.controller).await;
    assert_eq!(h.controller.interval_state().unwrap().mode, Mode::Work);
}

#[tokio::test(start_paused = true)]
async fn dispatch_routes_every_command() {
    let h = harness(quick_settings());
    let c = &h.controller;

    assert!(c.dispatch(TimerCommand::Start).unwrap().is_applied());
    assert!(c.dispatch(TimerCommand::Pause).unwrap().is_applied());
    assert!(c.dispatch(TimerCommand::Start).unwrap().is_applied());
    assert!(c.dispatch(TimerCommand::Reset).unwrap().is_applied());
    assert!(c.dispatch(TimerCommand::SetWorkMinutes(15)).unwrap().is_applied());
    assert!(c.dispatch(TimerCommand::Skip).unwrap().is_applied());
    assert!(c.dispatch(TimerCommand::ApplySettings(quick_settings())).unwrap().is_applied());
    assert!(c.dispatch(TimerCommand::ResetSessionCounter).unwrap().is_applied());

    assert_eq!(c.interval_state().unwrap().mode, Mode::ShortBreak);
}

#[tokio::test(start_paused = true)]
async fn display_updates_are_published() {
    let h = harness(TimerSettings::default());
    let mut rx = h.controller.subscribe();

    h.controller.start().unwrap();
    sleep_ticks(2).await;

    assert!(rx.has_changed().unwrap());
    let display = rx.borrow_and_update().clone();
    assert_eq!(display.remaining_seconds, 1498);
    assert_eq!(display.remaining_text, "24:58");
    assert!(display.running);
    assert!(display.buttons.pause && !display.buttons.start);
}

#[tokio::test(start_paused = true)]
async fn shutdown_stops_the_loop() {
    let h = harness(TimerSettings::default());

    h.controller.start().unwrap();
    sleep_ticks(2).await;
    h.controller.shutdown().unwrap();
    sleep_ticks(5).await;

    let state = h.controller.interval_state().unwrap();
    assert!(!state.running);
    assert_eq!(state.remaining_seconds, 1498);
}

#[tokio::test(start_paused = true)]
async fn shutdown_publishes_the_stopped_display() {
    let h = harness(TimerSettings::default());
    let mut rx = h.controller.subscribe();

    h.controller.start().unwrap();
    sleep_ticks(2).await;
    rx.borrow_and_update();

    h.controller.shutdown().unwrap();

    assert!(rx.has_changed().unwrap());
    let last = rx.borrow_and_update().clone();
    assert!(!last.running && !last.paused);
    assert_eq!(last.remaining_text, "24:58");
}

#[tokio::test(start_paused = true)]
async fn display_task_follows_mode_changes() {
    let h = harness(quick_settings());
    let handle = tokio::spawn(pomodoro_timer::tasks::display_task(Arc::clone(&h.controller)));

    h.controller.start().unwrap();
    sleep_ticks(3).await;
    h.controller.skip().unwrap();
    sleep_ticks(1).await;
    h.controller.start().unwrap();
    sleep_ticks(2).await;

    assert!(!handle.is_finished());
    assert_eq!(h.controller.interval_state().unwrap().mode, Mode::ShortBreak);

    h.controller.shutdown().unwrap();
    handle.abort();
}
