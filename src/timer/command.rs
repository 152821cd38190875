//! Command interface dispatched to the interval controller

use serde::{Deserialize, Serialize};

use crate::{settings::TimerSettings, state::DisplayState};

/// Every user-facing control operation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "command", content = "value", rename_all = "snake_case")]
pub enum TimerCommand {
    Start,
    Pause,
    Reset,
    Skip,
    SetWorkMinutes(u32),
    ApplySettings(TimerSettings),
    ResetSessionCounter,
}

impl TimerCommand {
    /// Short name used for logging and last-action tracking
    pub fn name(&self) -> &'static str {
        match self {
            TimerCommand::Start => "start",
            TimerCommand::Pause => "pause",
            TimerCommand::Reset => "reset",
            TimerCommand::Skip => "skip",
            TimerCommand::SetWorkMinutes(_) => "set-work-minutes",
            TimerCommand::ApplySettings(_) => "apply-settings",
            TimerCommand::ResetSessionCounter => "reset-session-counter",
        }
    }
}

/// Result of a control operation that did not hit an internal failure
#[derive(Debug, Clone, PartialEq)]
pub enum CommandOutcome {
    /// State changed (or was already as requested); carries the new display
    Applied(DisplayState),
    /// Not valid in the current state; nothing changed
    Rejected { reason: String, display: DisplayState },
}

impl CommandOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, CommandOutcome::Applied(_))
    }

    pub fn display(&self) -> &DisplayState {
        match self {
            CommandOutcome::Applied(display) => display,
            CommandOutcome::Rejected { display, .. } => display,
        }
    }
}
