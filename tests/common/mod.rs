//! Shared test doubles

#![allow(dead_code)]

use std::{sync::{Arc, Mutex}, time::Duration};

use pomodoro_timer::{
    services::{AlertSound, Alerts, Notifier, SoundPlayer},
    settings::{SettingsStore, TimerSettings},
    timer::IntervalController,
};

/// In-memory settings store that records every save
pub struct MemoryStore {
    initial: TimerSettings,
    fail: bool,
    pub saved: Mutex<Vec<TimerSettings>>,
}

impl MemoryStore {
    pub fn new(initial: TimerSettings) -> Self {
        Self { initial, fail: false, saved: Mutex::new(Vec::new()) }
    }

    pub fn failing(initial: TimerSettings) -> Self {
        Self { initial, fail: true, saved: Mutex::new(Vec::new()) }
    }

    pub fn saves(&self) -> Vec<TimerSettings> {
        self.saved.lock().unwrap().clone()
    }
}

impl SettingsStore for MemoryStore {
    fn load(&self) -> TimerSettings {
        self.initial.clone()
    }

    fn persist(&self, settings: &TimerSettings) -> anyhow::Result<()> {
        if self.fail {
            anyhow::bail!("disk full");
        }
        self.saved.lock().unwrap().push(settings.clone());
        Ok(())
    }
}

/// Records notifications and sounds instead of delivering them
#[derive(Default)]
pub struct Recorder {
    pub notes: Mutex<Vec<String>>,
    pub sounds: Mutex<Vec<AlertSound>>,
}

impl Recorder {
    pub fn titles(&self) -> Vec<String> {
        self.notes.lock().unwrap().clone()
    }

    pub fn sounds(&self) -> Vec<AlertSound> {
        self.sounds.lock().unwrap().clone()
    }

    pub fn count_title(&self, title: &str) -> usize {
        self.titles().iter().filter(|t| t.as_str() == title).count()
    }
}

impl Notifier for Recorder {
    fn notify(&self, title: &str, _body: &str, _duration_secs: u32) {
        self.notes.lock().unwrap().push(title.to_string());
    }
}

impl SoundPlayer for Recorder {
    fn play(&self, sound: AlertSound) {
        self.sounds.lock().unwrap().push(sound);
    }
}

pub struct Harness {
    pub controller: Arc<IntervalController>,
    pub store: Arc<MemoryStore>,
    pub alerts: Arc<Recorder>,
}

pub fn harness(settings: TimerSettings) -> Harness {
    harness_with_store(Arc::new(MemoryStore::new(settings)))
}

pub fn harness_with_store(store: Arc<MemoryStore>) -> Harness {
    let alerts = Arc::new(Recorder::default());
    let controller = Arc::new(IntervalController::new(
        store.clone(),
        Alerts::new(alerts.clone(), alerts.clone()),
    ));
    Harness { controller, store, alerts }
}

/// Short intervals so whole cycles run quickly on virtual time
pub fn quick_settings() -> TimerSettings {
    TimerSettings {
        work_minutes: 2,
        short_break_minutes: 1,
        long_break_minutes: 5,
        cycles_before_long_break: 2,
        warning_minutes: 1,
        ..TimerSettings::default()
    }
}

/// Sleep for whole seconds plus half a tick so the check lands between ticks
pub async fn sleep_ticks(seconds: u64) {
    tokio::time::sleep(Duration::from_millis(seconds * 1000 + 500)).await;
}

/// Start the current interval and let it run to completion
pub async fn run_interval(controller: &Arc<IntervalController>) {
    let remaining = controller.interval_state().unwrap().remaining_seconds;
    assert!(controller.start().unwrap().is_applied());
    sleep_ticks(remaining).await;
}
