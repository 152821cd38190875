//! Timer settings and their persistence
//!
//! Durations are stored in minutes; all countdown arithmetic elsewhere is in
//! whole seconds.

pub mod store;

use std::ops::RangeInclusive;
use serde::{Deserialize, Serialize};

use crate::state::Mode;

pub use store::{JsonSettingsStore, SettingsStore};

pub const WORK_MINUTES_RANGE: RangeInclusive<u32> = 1..=60;
pub const SHORT_BREAK_MINUTES_RANGE: RangeInclusive<u32> = 1..=30;
pub const LONG_BREAK_MINUTES_RANGE: RangeInclusive<u32> = 5..=60;
pub const CYCLES_RANGE: RangeInclusive<u32> = 1..=10;
pub const WARNING_MINUTES_RANGE: RangeInclusive<u32> = 0..=5;

/// User preferences plus the persisted completed-sessions counter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimerSettings {
    pub work_minutes: u32,
    pub short_break_minutes: u32,
    pub long_break_minutes: u32,
    /// Completed work intervals before a long break replaces the short one
    pub cycles_before_long_break: u32,
    /// Minutes before the end of an interval at which the warning fires
    pub warning_minutes: u32,
    pub sound_enabled: bool,
    pub notifications_enabled: bool,
    pub completed_sessions: u64,
    pub theme: String,
}

impl TimerSettings {
    /// Configured length of an interval in minutes
    pub fn minutes_for(&self, mode: Mode) -> u32 {
        match mode {
            Mode::Work => self.work_minutes,
            Mode::ShortBreak => self.short_break_minutes,
            Mode::LongBreak => self.long_break_minutes,
        }
    }

    /// Configured length of an interval in seconds
    pub fn duration_secs(&self, mode: Mode) -> u64 {
        u64::from(self.minutes_for(mode)) * 60
    }

    pub fn warning_secs(&self) -> u64 {
        u64::from(self.warning_minutes) * 60
    }

    /// Check every configurable field against its allowed range
    pub fn validate(&self) -> Result<(), String> {
        check_range("work_minutes", self.work_minutes, &WORK_MINUTES_RANGE)?;
        check_range("short_break_minutes", self.short_break_minutes, &SHORT_BREAK_MINUTES_RANGE)?;
        check_range("long_break_minutes", self.long_break_minutes, &LONG_BREAK_MINUTES_RANGE)?;
        check_range("cycles_before_long_break", self.cycles_before_long_break, &CYCLES_RANGE)?;
        check_range("warning_minutes", self.warning_minutes, &WARNING_MINUTES_RANGE)?;
        if self.theme.trim().is_empty() {
            return Err("theme must not be empty".to_string());
        }
        Ok(())
    }
}

impl Default for TimerSettings {
    fn default() -> Self {
        Self {
            work_minutes: 25,
            short_break_minutes: 5,
            long_break_minutes: 15,
            cycles_before_long_break: 4,
            warning_minutes: 1,
            sound_enabled: true,
            notifications_enabled: true,
            completed_sessions: 0,
            theme: "dark".to_string(),
        }
    }
}

pub(crate) fn check_range(field: &str, value: u32, range: &RangeInclusive<u32>) -> Result<(), String> {
    if range.contains(&value) {
        Ok(())
    } else {
        Err(format!(
            "{} must be between {} and {} (got {})",
            field,
            range.start(),
            range.end(),
            value
        ))
    }
}
