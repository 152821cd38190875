//! HTTP endpoint handlers

use std::sync::Arc;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use tracing::{error, info, warn};

use crate::{
    settings::TimerSettings,
    state::AppState,
    timer::TimerCommand,
};
use super::responses::{ApiResponse, HealthResponse, StatusResponse};

type CommandResult = Result<(StatusCode, Json<ApiResponse>), StatusCode>;

/// Run a command and map its outcome: applied → 200, rejected → 409
fn run_command(state: &AppState, command: TimerCommand, applied_message: String) -> CommandResult {
    let action = command.name();
    match state.execute(command) {
        Ok(outcome) => {
            let response = ApiResponse::from_outcome(outcome, applied_message);
            if response.is_rejected() {
                warn!("{} rejected: {}", action, response.message);
                Ok((StatusCode::CONFLICT, Json(response)))
            } else {
                info!("{} endpoint called - {}", action, response.message);
                Ok((StatusCode::OK, Json(response)))
            }
        }
        Err(e) => {
            error!("Failed to {}: {}", action, e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle POST /start - Start or resume the countdown
pub async fn start_handler(State(state): State<Arc<AppState>>) -> CommandResult {
    run_command(&state, TimerCommand::Start, "Timer running".to_string())
}

/// Handle POST /pause - Pause the countdown
pub async fn pause_handler(State(state): State<Arc<AppState>>) -> CommandResult {
    run_command(&state, TimerCommand::Pause, "Timer paused".to_string())
}

/// Handle POST /reset - Rewind the current interval
pub async fn reset_handler(State(state): State<Arc<AppState>>) -> CommandResult {
    run_command(&state, TimerCommand::Reset, "Interval reset".to_string())
}

/// Handle POST /skip - Move to the next interval without counting this one
pub async fn skip_handler(State(state): State<Arc<AppState>>) -> CommandResult {
    run_command(&state, TimerCommand::Skip, "Interval skipped".to_string())
}

/// Handle POST /work-minutes/:minutes - Quick work-length preset
pub async fn work_minutes_handler(
    State(state): State<Arc<AppState>>,
    Path(minutes): Path<u32>,
) -> CommandResult {
    run_command(
        &state,
        TimerCommand::SetWorkMinutes(minutes),
        format!("Work interval set to {} minutes", minutes),
    )
}

/// Handle POST /sessions/reset - Zero the completed sessions counter
pub async fn reset_sessions_handler(State(state): State<Arc<AppState>>) -> CommandResult {
    run_command(
        &state,
        TimerCommand::ResetSessionCounter,
        "Completed sessions counter has been reset to 0".to_string(),
    )
}

/// Handle GET /settings - Return the current settings
pub async fn get_settings_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<TimerSettings>, StatusCode> {
    match state.controller.settings() {
        Ok(settings) => Ok(Json(settings)),
        Err(e) => {
            error!("Failed to get settings: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle PUT /settings - Replace all settings
pub async fn apply_settings_handler(
    State(state): State<Arc<AppState>>,
    Json(settings): Json<TimerSettings>,
) -> CommandResult {
    run_command(
        &state,
        TimerCommand::ApplySettings(settings),
        "Your settings have been updated".to_string(),
    )
}

/// Handle POST /command - Dispatch any tagged command
pub async fn command_handler(
    State(state): State<Arc<AppState>>,
    Json(command): Json<TimerCommand>,
) -> CommandResult {
    let message = format!("{} applied", command.name());
    run_command(&state, command, message)
}

/// Handle GET /status - Return current timer status
pub async fn status_handler(State(state): State<Arc<AppState>>) -> Result<Json<StatusResponse>, StatusCode> {
    let display = match state.controller.display() {
        Ok(d) => d,
        Err(e) => {
            error!("Failed to get display state: {}", e);
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    let (last_action, last_action_time) = state.get_last_action();

    Ok(Json(StatusResponse {
        display,
        uptime: state.get_uptime(),
        port: state.port,
        host: state.host.clone(),
        last_action,
        last_action_time,
    }))
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
