//! External collaborator module
//!
//! This module contains the side-effect sinks used by the timer: desktop
//! notifications and audio alerts.

pub mod alerts;
pub mod notifier;
pub mod sound;

// Re-export main types
pub use alerts::Alerts;
pub use notifier::{DesktopNotifier, Notifier};
pub use sound::{AlertSound, CommandSoundPlayer, SoundPlayer};
