//! Interval controller: owns the timer state and applies every transition

use std::sync::{Arc, Mutex, MutexGuard};
use tokio::sync::watch;
use tracing::{debug, error, info, warn};

use super::command::{CommandOutcome, TimerCommand};
use crate::{
    services::Alerts,
    settings::{SettingsStore, TimerSettings, WORK_MINUTES_RANGE},
    state::{DisplayState, IntervalState, Mode},
    tasks::scheduler_task,
};

/// What a single tick did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// One second was counted down
    Counted,
    /// Loop is alive but the countdown is suspended
    Paused,
    /// The interval of this mode ran out; the loop must exit
    Completed(Mode),
    /// The loop was stopped or superseded; it must exit
    Stopped,
}

struct Inner {
    settings: TimerSettings,
    state: IntervalState,
    /// Identifies the only tick loop allowed to drive the countdown
    generation: u64,
}

impl Inner {
    fn display(&self) -> DisplayState {
        DisplayState::new(&self.state, &self.settings)
    }
}

/// Single owner of the timer. All state lives behind one mutex; the tick loop
/// and control operations both go through it.
pub struct IntervalController {
    inner: Mutex<Inner>,
    store: Arc<dyn SettingsStore>,
    alerts: Alerts,
    display_tx: watch::Sender<DisplayState>,
    /// Keep the receiver alive to prevent channel closure
    _display_rx: watch::Receiver<DisplayState>,
}

impl IntervalController {
    /// Build the controller from persisted settings, idle at the start of a work interval
    pub fn new(store: Arc<dyn SettingsStore>, alerts: Alerts) -> Self {
        let settings = store.load();
        let state = IntervalState::new(&settings);
        let (display_tx, display_rx) = watch::channel(DisplayState::new(&state, &settings));

        info!("Timer ready: {} min work, {} min short break, {} min long break, long break every {} cycles",
              settings.work_minutes, settings.short_break_minutes,
              settings.long_break_minutes, settings.cycles_before_long_break);

        Self {
            inner: Mutex::new(Inner {
                settings,
                state,
                generation: 0,
            }),
            store,
            alerts,
            display_tx,
            _display_rx: display_rx,
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Inner>, String> {
        self.inner.lock()
            .map_err(|e| format!("Failed to lock timer state: {}", e))
    }

    /// Subscribe to display updates
    pub fn subscribe(&self) -> watch::Receiver<DisplayState> {
        self.display_tx.subscribe()
    }

    /// Current display snapshot
    pub fn display(&self) -> Result<DisplayState, String> {
        self.lock().map(|inner| inner.display())
    }

    /// Current settings
    pub fn settings(&self) -> Result<TimerSettings, String> {
        self.lock().map(|inner| inner.settings.clone())
    }

    /// Current interval state
    pub fn interval_state(&self) -> Result<IntervalState, String> {
        self.lock().map(|inner| inner.state.clone())
    }

    /// Route a command to its operation
    pub fn dispatch(self: &Arc<Self>, command: TimerCommand) -> Result<CommandOutcome, String> {
        debug!("Dispatching {}", command.name());
        match command {
            TimerCommand::Start => self.start(),
            TimerCommand::Pause => self.pause(),
            TimerCommand::Reset => self.reset(),
            TimerCommand::Skip => self.skip(),
            TimerCommand::SetWorkMinutes(minutes) => self.set_work_duration(minutes),
            TimerCommand::ApplySettings(settings) => self.apply_settings(settings),
            TimerCommand::ResetSessionCounter => self.reset_session_counter(),
        }
    }

    /// Start a new countdown, or resume a paused one
    pub fn start(self: &Arc<Self>) -> Result<CommandOutcome, String> {
        let mut inner = self.lock()?;

        if inner.state.running && inner.state.paused {
            inner.state.paused = false;
            info!("Resuming {:?} with {}s left", inner.state.mode, inner.state.remaining_seconds);
            return Ok(self.applied(inner.display()));
        }
        if inner.state.running {
            return Ok(rejected("Timer is already running", inner.display()));
        }

        inner.state.running = true;
        inner.state.paused = false;
        inner.generation += 1;
        let generation = inner.generation;
        info!("Starting {:?} with {}s left", inner.state.mode, inner.state.remaining_seconds);
        let display = inner.display();
        drop(inner);

        tokio::spawn(scheduler_task(Arc::clone(self), generation));
        Ok(self.applied(display))
    }

    /// Suspend the countdown without tearing down the loop
    pub fn pause(&self) -> Result<CommandOutcome, String> {
        let mut inner = self.lock()?;

        if !inner.state.is_ticking() {
            return Ok(rejected("Timer is not running", inner.display()));
        }

        inner.state.paused = true;
        info!("Paused {:?} with {}s left", inner.state.mode, inner.state.remaining_seconds);
        Ok(self.applied(inner.display()))
    }

    /// Stop and rewind the current interval; mode and cycle count are kept
    pub fn reset(&self) -> Result<CommandOutcome, String> {
        let mut inner = self.lock()?;
        let Inner { settings, state, .. } = &mut *inner;
        state.rewind(settings);
        info!("Reset {:?} to {}s", state.mode, state.remaining_seconds);
        Ok(self.applied(inner.display()))
    }

    /// Abandon the current interval and move on without counting it
    pub fn skip(&self) -> Result<CommandOutcome, String> {
        let mut inner = self.lock()?;
        let Inner { settings, state, .. } = &mut *inner;

        state.running = false;
        state.paused = false;
        let skipped = state.mode;
        let next = state.advance(settings);
        info!("Skipped {:?}, next up {:?}", skipped, next);
        Ok(self.applied(inner.display()))
    }

    /// Change the work length; refused while a countdown is active
    pub fn set_work_duration(&self, minutes: u32) -> Result<CommandOutcome, String> {
        let mut inner = self.lock()?;

        if inner.state.running {
            warn!("Refusing to change work duration to {} min while running", minutes);
            return Ok(rejected("Cannot change the work duration while the timer is running", inner.display()));
        }
        if !WORK_MINUTES_RANGE.contains(&minutes) {
            let reason = format!(
                "Work duration must be between {} and {} minutes; {} is the longest work interval this timer supports",
                WORK_MINUTES_RANGE.start(),
                WORK_MINUTES_RANGE.end(),
                WORK_MINUTES_RANGE.end()
            );
            return Ok(rejected(reason, inner.display()));
        }

        inner.settings.work_minutes = minutes;
        if inner.state.mode == Mode::Work {
            inner.state.remaining_seconds = inner.settings.duration_secs(Mode::Work);
            inner.state.warning_fired = false;
        }
        info!("Work interval set to {} minutes", minutes);
        self.save_settings(&inner.settings);
        Ok(self.applied(inner.display()))
    }

    /// Replace all configuration fields. The session counter is kept.
    pub fn apply_settings(&self, mut new_settings: TimerSettings) -> Result<CommandOutcome, String> {
        let mut inner = self.lock()?;

        if let Err(reason) = new_settings.validate() {
            warn!("Rejected settings update: {}", reason);
            return Ok(rejected(reason, inner.display()));
        }

        new_settings.completed_sessions = inner.settings.completed_sessions;
        inner.settings = new_settings;

        if !inner.state.running {
            let Inner { settings, state, .. } = &mut *inner;
            state.remaining_seconds = settings.duration_secs(state.mode);
            state.warning_fired = false;
        }
        info!("Settings updated");
        self.save_settings(&inner.settings);
        Ok(self.applied(inner.display()))
    }

    /// Zero the persisted completed-sessions counter
    pub fn reset_session_counter(&self) -> Result<CommandOutcome, String> {
        let mut inner = self.lock()?;
        inner.settings.completed_sessions = 0;
        info!("Completed sessions counter reset");
        self.save_settings(&inner.settings);
        Ok(self.applied(inner.display()))
    }

    /// Stop any running loop, leaving the countdown where it is
    pub fn shutdown(&self) -> Result<(), String> {
        let mut inner = self.lock()?;
        inner.state.running = false;
        inner.state.paused = false;
        inner.generation += 1;
        info!("Timer stopped for shutdown");
        self.publish(inner.display());
        Ok(())
    }

    /// Advance the countdown by one second on behalf of loop `generation`
    pub fn tick(&self, generation: u64) -> TickOutcome {
        let mut inner = match self.lock() {
            Ok(inner) => inner,
            Err(e) => {
                error!("{}", e);
                return TickOutcome::Stopped;
            }
        };

        if inner.generation != generation || !inner.state.running {
            return TickOutcome::Stopped;
        }
        if inner.state.paused {
            return TickOutcome::Paused;
        }

        let mut warn_now = false;
        if inner.state.remaining_seconds > 0 {
            if !inner.state.warning_fired && inner.state.remaining_seconds <= inner.settings.warning_secs() {
                inner.state.warning_fired = true;
                warn_now = true;
            }
            inner.state.remaining_seconds -= 1;
        }

        let mode = inner.state.mode;
        if warn_now {
            info!("{:?} warning: {}s left", mode, inner.state.remaining_seconds + 1);
            self.alerts.interval_warning(mode, &inner.settings);
        }

        if inner.state.remaining_seconds == 0 {
            self.complete(&mut *inner);
            self.publish(inner.display());
            return TickOutcome::Completed(mode);
        }

        debug!("Tick: {:?} {}s left", mode, inner.state.remaining_seconds);
        self.publish(inner.display());
        TickOutcome::Counted
    }

    /// Natural end of an interval. The next interval starts idle.
    fn complete(&self, inner: &mut Inner) {
        let Inner { settings, state, .. } = inner;
        let finished = state.mode;

        state.running = false;
        state.paused = false;
        self.alerts.interval_complete(finished, settings);

        if finished == Mode::Work {
            settings.completed_sessions += 1;
            info!("Work session complete, {} sessions so far", settings.completed_sessions);
            self.save_settings(settings);
        } else {
            info!("{:?} complete", finished);
        }

        let next = state.advance(settings);
        info!("Next up {:?} ({}s), waiting for start", next, state.remaining_seconds);
    }

    fn save_settings(&self, settings: &TimerSettings) {
        if let Err(e) = self.store.persist(settings) {
            error!("Failed to save settings: {:#}", e);
        }
    }

    fn applied(&self, display: DisplayState) -> CommandOutcome {
        self.publish(display.clone());
        CommandOutcome::Applied(display)
    }

    fn publish(&self, display: DisplayState) {
        if let Err(e) = self.display_tx.send(display) {
            warn!("Failed to send display update: {}", e);
        }
    }
}

fn rejected(reason: impl Into<String>, display: DisplayState) -> CommandOutcome {
    let reason = reason.into();
    debug!("Command rejected: {}", reason);
    CommandOutcome::Rejected { reason, display }
}
