//! Settings file loading and saving

use std::{
    fs,
    io::Write,
    ops::RangeInclusive,
    path::{Path, PathBuf},
};
use anyhow::Context;
use serde_json::{Map, Value};
use tempfile::NamedTempFile;
use tracing::{debug, info, warn};

use super::{
    TimerSettings, CYCLES_RANGE, LONG_BREAK_MINUTES_RANGE, SHORT_BREAK_MINUTES_RANGE,
    WARNING_MINUTES_RANGE, WORK_MINUTES_RANGE,
};

/// Persistence boundary for [`TimerSettings`]
pub trait SettingsStore: Send + Sync {
    /// Load settings merged over the built-in defaults. Never fails.
    fn load(&self) -> TimerSettings;

    /// Write the full settings record
    fn persist(&self, settings: &TimerSettings) -> anyhow::Result<()>;
}

/// Settings stored as a JSON object on disk
#[derive(Debug, Clone)]
pub struct JsonSettingsStore {
    path: PathBuf,
}

impl JsonSettingsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SettingsStore for JsonSettingsStore {
    fn load(&self) -> TimerSettings {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                info!("No settings file at {}, using defaults", self.path.display());
                return TimerSettings::default();
            }
            Err(e) => {
                warn!("Failed to read settings from {}: {}", self.path.display(), e);
                return TimerSettings::default();
            }
        };

        match serde_json::from_str::<Value>(&contents) {
            Ok(Value::Object(record)) => {
                debug!("Loaded settings record with {} keys", record.len());
                merge_record(&record)
            }
            Ok(other) => {
                warn!("Settings file {} is not a JSON object ({}), using defaults",
                      self.path.display(), json_kind(&other));
                TimerSettings::default()
            }
            Err(e) => {
                warn!("Settings file {} is not valid JSON: {}", self.path.display(), e);
                TimerSettings::default()
            }
        }
    }

    fn persist(&self, settings: &TimerSettings) -> anyhow::Result<()> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create settings directory {}", dir.display()))?;

        let json = serde_json::to_string_pretty(settings).context("Failed to serialize settings")?;

        // Write next to the target so the final rename stays on one filesystem
        let mut tmp = NamedTempFile::new_in(&dir)
            .with_context(|| format!("Failed to create temporary file in {}", dir.display()))?;
        tmp.write_all(json.as_bytes()).context("Failed to write settings")?;
        tmp.as_file().sync_all().context("Failed to sync settings file")?;
        tmp.persist(&self.path)
            .with_context(|| format!("Failed to replace {}", self.path.display()))?;

        debug!("Settings saved to {}", self.path.display());
        Ok(())
    }
}

/// Merge a stored record over the defaults, one field at a time
fn merge_record(record: &Map<String, Value>) -> TimerSettings {
    let mut settings = TimerSettings::default();

    if let Some(v) = minutes_field(record, &["work_minutes", "work_time"], &WORK_MINUTES_RANGE) {
        settings.work_minutes = v;
    }
    if let Some(v) = minutes_field(record, &["short_break_minutes", "short_break"], &SHORT_BREAK_MINUTES_RANGE) {
        settings.short_break_minutes = v;
    }
    if let Some(v) = minutes_field(record, &["long_break_minutes", "long_break"], &LONG_BREAK_MINUTES_RANGE) {
        settings.long_break_minutes = v;
    }
    if let Some(v) = minutes_field(record, &["cycles_before_long_break"], &CYCLES_RANGE) {
        settings.cycles_before_long_break = v;
    }
    if let Some(v) = minutes_field(record, &["warning_minutes", "warning_time"], &WARNING_MINUTES_RANGE) {
        settings.warning_minutes = v;
    }
    if let Some(v) = bool_field(record, &["sound_enabled"]) {
        settings.sound_enabled = v;
    }
    if let Some(v) = bool_field(record, &["notifications_enabled", "notification_enabled"]) {
        settings.notifications_enabled = v;
    }
    if let Some((key, value)) = lookup(record, &["completed_sessions"]) {
        match value.as_u64() {
            Some(count) => settings.completed_sessions = count,
            None => reject(key, value, "a non-negative integer"),
        }
    }
    if let Some((key, value)) = lookup(record, &["theme"]) {
        match value.as_str() {
            Some(theme) if !theme.trim().is_empty() => settings.theme = theme.to_string(),
            _ => reject(key, value, "a non-empty string"),
        }
    }

    settings
}

/// First present key wins, so the current name shadows its legacy alias
fn lookup<'a>(record: &'a Map<String, Value>, keys: &[&'a str]) -> Option<(&'a str, &'a Value)> {
    keys.iter()
        .find_map(|key| record.get(*key).map(|value| (*key, value)))
}

fn minutes_field(record: &Map<String, Value>, keys: &[&str], range: &RangeInclusive<u32>) -> Option<u32> {
    let (key, value) = lookup(record, keys)?;
    match value.as_u64().and_then(|n| u32::try_from(n).ok()) {
        Some(n) if range.contains(&n) => Some(n),
        _ => {
            reject(key, value, &format!("an integer in {}..={}", range.start(), range.end()));
            None
        }
    }
}

fn bool_field(record: &Map<String, Value>, keys: &[&str]) -> Option<bool> {
    let (key, value) = lookup(record, keys)?;
    let parsed = value.as_bool();
    if parsed.is_none() {
        reject(key, value, "a boolean");
    }
    parsed
}

fn reject(key: &str, value: &Value, expected: &str) {
    warn!("Ignoring stored setting {}={}: expected {}, keeping default", key, value, expected);
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
