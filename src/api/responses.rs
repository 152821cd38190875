//! API response structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{state::DisplayState, timer::CommandOutcome};

/// API response structure for control endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse {
    pub status: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub display: DisplayState,
}

impl ApiResponse {
    /// Create a new API response
    pub fn new(status: String, message: String, display: DisplayState) -> Self {
        Self {
            status,
            message,
            timestamp: Utc::now(),
            display,
        }
    }

    /// Create an ok response
    pub fn ok(message: String, display: DisplayState) -> Self {
        Self::new("ok".to_string(), message, display)
    }

    /// Create a rejected response
    pub fn rejected(message: String, display: DisplayState) -> Self {
        Self::new("rejected".to_string(), message, display)
    }

    /// Build a response from a command outcome; `applied_message` describes success
    pub fn from_outcome(outcome: CommandOutcome, applied_message: String) -> Self {
        match outcome {
            CommandOutcome::Applied(display) => Self::ok(applied_message, display),
            CommandOutcome::Rejected { reason, display } => Self::rejected(reason, display),
        }
    }

    pub fn is_rejected(&self) -> bool {
        self.status == "rejected"
    }
}

/// Status response with timer and server information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub display: DisplayState,
    pub uptime: String,
    pub port: u16,
    pub host: String,
    pub last_action: Option<String>,
    pub last_action_time: Option<DateTime<Utc>>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
}

impl HealthResponse {
    /// Create a new health response
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            timestamp: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}
