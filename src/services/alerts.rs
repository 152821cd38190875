//! Mode-specific alert content and the sound/notification gates

use std::sync::Arc;
use tracing::debug;

use super::{AlertSound, Notifier, SoundPlayer};
use crate::{settings::TimerSettings, state::Mode};

const COMPLETION_NOTIFICATION_SECS: u32 = 5;
const WARNING_NOTIFICATION_SECS: u32 = 3;

/// Sound and notification side effects of the timer
#[derive(Clone)]
pub struct Alerts {
    notifier: Arc<dyn Notifier>,
    sound: Arc<dyn SoundPlayer>,
}

impl Alerts {
    pub fn new(notifier: Arc<dyn Notifier>, sound: Arc<dyn SoundPlayer>) -> Self {
        Self { notifier, sound }
    }

    /// An interval of `mode` ran to zero
    pub fn interval_complete(&self, mode: Mode, settings: &TimerSettings) {
        debug!("Completion alerts for {:?}", mode);
        if settings.sound_enabled {
            self.sound.play(AlertSound::Completion);
        }
        if settings.notifications_enabled {
            let (title, body) = completion_message(mode);
            self.notifier.notify(title, body, COMPLETION_NOTIFICATION_SECS);
        }
    }

    /// The warning threshold of an interval of `mode` was reached
    pub fn interval_warning(&self, mode: Mode, settings: &TimerSettings) {
        debug!("Warning alerts for {:?}", mode);
        if settings.notifications_enabled {
            let (title, body) = warning_message(mode, settings.warning_minutes);
            self.notifier.notify(title, &body, WARNING_NOTIFICATION_SECS);
        }
        if settings.sound_enabled {
            self.sound.play(AlertSound::Warning);
        }
    }
}

pub fn completion_message(mode: Mode) -> (&'static str, &'static str) {
    match mode {
        Mode::Work => ("Work session complete!", "Time to take a break! Great job focusing!"),
        Mode::ShortBreak | Mode::LongBreak => ("Break time over!", "Ready to focus again?"),
    }
}

pub fn warning_message(mode: Mode, minutes: u32) -> (&'static str, String) {
    match mode {
        Mode::Work => ("Almost done!", format!("{} minute(s) left in work session", minutes)),
        Mode::ShortBreak | Mode::LongBreak => {
            ("Break ending soon", format!("{} minute(s) left in break", minutes))
        }
    }
}
