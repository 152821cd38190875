//! Process-level helpers
//!
//! Currently only the shutdown signal listener used by `main`.

pub mod signals;

pub use signals::shutdown_signal;
