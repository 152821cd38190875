//! State management module
//!
//! This module contains the timer state, its display snapshot, and the
//! application state shared with the HTTP layer.

pub mod app_state;
pub mod display_state;
pub mod interval_state;

// Re-export main types
pub use app_state::AppState;
pub use display_state::{ButtonEnablement, DisplayState};
pub use interval_state::{IntervalState, Mode};
