//! Interval timer module
//!
//! This module contains the interval controller and the command interface
//! that drives it.

pub mod command;
pub mod controller;

// Re-export main types
pub use command::{CommandOutcome, TimerCommand};
pub use controller::{IntervalController, TickOutcome};
