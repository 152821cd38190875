//! Interval state and the work/break transition rule

use serde::{Deserialize, Serialize};

use crate::settings::TimerSettings;

/// The three kinds of interval
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    Work,
    ShortBreak,
    LongBreak,
}

impl Mode {
    pub fn label(&self) -> &'static str {
        match self {
            Mode::Work => "WORK TIME",
            Mode::ShortBreak => "SHORT BREAK",
            Mode::LongBreak => "LONG BREAK",
        }
    }
}

/// Ephemeral countdown state, rebuilt from settings on every mode change
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntervalState {
    pub mode: Mode,
    pub remaining_seconds: u64,
    /// Always below `cycles_before_long_break`
    pub completed_work_cycles: u32,
    pub running: bool,
    /// Only meaningful while `running`
    pub paused: bool,
    pub warning_fired: bool,
}

impl IntervalState {
    /// Fresh state at process start: an idle work interval
    pub fn new(settings: &TimerSettings) -> Self {
        Self {
            mode: Mode::Work,
            remaining_seconds: settings.duration_secs(Mode::Work),
            completed_work_cycles: 0,
            running: false,
            paused: false,
            warning_fired: false,
        }
    }

    /// Counting down right now
    pub fn is_ticking(&self) -> bool {
        self.running && !self.paused
    }

    /// Stop the loop and rewind the current interval to its full length
    pub fn rewind(&mut self, settings: &TimerSettings) {
        self.running = false;
        self.paused = false;
        self.remaining_seconds = settings.duration_secs(self.mode);
        self.warning_fired = false;
    }

    /// Move to the next interval. Shared by natural completion and skip.
    ///
    /// Every `cycles_before_long_break`-th work interval is followed by a long
    /// break; every break is followed by work.
    pub fn advance(&mut self, settings: &TimerSettings) -> Mode {
        self.mode = match self.mode {
            Mode::Work => {
                self.completed_work_cycles += 1;
                if self.completed_work_cycles >= settings.cycles_before_long_break {
                    self.completed_work_cycles = 0;
                    Mode::LongBreak
                } else {
                    Mode::ShortBreak
                }
            }
            Mode::ShortBreak | Mode::LongBreak => Mode::Work,
        };
        self.remaining_seconds = settings.duration_secs(self.mode);
        self.warning_fired = false;
        self.mode
    }

    /// Fraction of the current interval already elapsed, in [0, 1]
    pub fn progress(&self, settings: &TimerSettings) -> f64 {
        let total = settings.duration_secs(self.mode);
        if total == 0 {
            return 1.0;
        }
        let remaining = self.remaining_seconds.min(total);
        1.0 - remaining as f64 / total as f64
    }
}
