//! Pomodoro Timer - A state-managed interval timer with a local HTTP control surface
//!
//! This library provides the work/short-break/long-break interval state
//! machine, its one-second countdown loop, settings persistence, and the
//! alert and HTTP layers around them.

pub mod config;
pub mod settings;
pub mod state;
pub mod timer;
pub mod api;
pub mod services;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use settings::TimerSettings;
pub use state::AppState;
pub use timer::{IntervalController, TimerCommand};
pub use api::create_router;
pub use utils::signals::shutdown_signal;
