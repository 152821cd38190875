//! Configuration and CLI argument handling

use std::path::PathBuf;
use clap::Parser;

const SETTINGS_DIR: &str = "pomodoro-timer";
const SETTINGS_FILE: &str = "settings.json";

/// CLI argument parsing structure
#[derive(Parser, Debug)]
#[command(name = "pomodoro-timer")]
#[command(about = "A state-managed Pomodoro interval timer with a local HTTP control surface")]
#[command(version)]
pub struct Config {
    /// Port to bind the server to
    #[arg(short, long, default_value = "20554")]
    pub port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Settings file (defaults to the user config directory)
    #[arg(long)]
    pub settings: Option<PathBuf>,

    /// Program used to play alert sounds
    #[arg(long, default_value = "paplay")]
    pub sound_player: String,

    /// Sound played when an interval completes
    #[arg(long, default_value = "/usr/share/sounds/freedesktop/stereo/complete.oga")]
    pub completion_sound: PathBuf,

    /// Sound played at the warning threshold
    #[arg(long, default_value = "/usr/share/sounds/freedesktop/stereo/bell.oga")]
    pub warning_sound: PathBuf,

    /// Start the first work interval right away
    #[arg(long)]
    pub autostart: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the server address as a formatted string
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }

    /// Resolve the settings file location
    pub fn settings_path(&self) -> PathBuf {
        if let Some(path) = &self.settings {
            return path.clone();
        }
        match dirs::config_dir() {
            Some(dir) => dir.join(SETTINGS_DIR).join(SETTINGS_FILE),
            None => PathBuf::from(SETTINGS_FILE),
        }
    }
}
