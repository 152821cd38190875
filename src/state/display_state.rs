//! Display snapshot pushed to observers after every state change

use serde::{Deserialize, Serialize};

use super::{IntervalState, Mode};
use crate::settings::TimerSettings;

/// Which controls make sense in the current state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ButtonEnablement {
    pub start: bool,
    /// "Resume" while paused, "Start" otherwise
    pub start_label: String,
    pub pause: bool,
    pub reset: bool,
    pub skip: bool,
    /// Quick work-length presets; only accepted while idle
    pub work_presets: bool,
}

impl ButtonEnablement {
    pub fn for_state(state: &IntervalState) -> Self {
        Self {
            start: !state.is_ticking(),
            start_label: if state.running && state.paused { "Resume" } else { "Start" }.to_string(),
            pause: state.is_ticking(),
            reset: true,
            skip: true,
            work_presets: !state.running,
        }
    }
}

/// Everything a presentation layer needs to draw the timer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayState {
    pub mode: Mode,
    pub mode_label: String,
    pub remaining_seconds: u64,
    /// `MM:SS`
    pub remaining_text: String,
    pub progress: f64,
    pub sessions_completed: u64,
    pub completed_work_cycles: u32,
    pub running: bool,
    pub paused: bool,
    pub buttons: ButtonEnablement,
}

impl DisplayState {
    pub fn new(state: &IntervalState, settings: &TimerSettings) -> Self {
        Self {
            mode: state.mode,
            mode_label: state.mode.label().to_string(),
            remaining_seconds: state.remaining_seconds,
            remaining_text: format_clock(state.remaining_seconds),
            progress: state.progress(settings),
            sessions_completed: settings.completed_sessions,
            completed_work_cycles: state.completed_work_cycles,
            running: state.running,
            paused: state.paused,
            buttons: ButtonEnablement::for_state(state),
        }
    }

    /// One-line rendering for terminal output
    pub fn status_line(&self) -> String {
        let status = match (self.running, self.paused) {
            (true, true) => "paused",
            (true, false) => "running",
            _ => "idle",
        };
        format!(
            "{} {} [{:>3.0}%] {} | sessions: {}",
            self.mode_label,
            self.remaining_text,
            self.progress * 100.0,
            status,
            self.sessions_completed
        )
    }
}

/// Format seconds as a zero-padded `MM:SS` clock
pub fn format_clock(seconds: u64) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}
