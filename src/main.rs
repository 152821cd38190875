//! Pomodoro Timer - A state-managed interval timer with a local HTTP control surface
//!
//! This is the main entry point for the pomodoro-timer application.

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{error, info};

use pomodoro_timer::{
    api::create_router,
    config::Config,
    services::{Alerts, CommandSoundPlayer, DesktopNotifier},
    settings::JsonSettingsStore,
    state::AppState,
    tasks::display_task,
    timer::IntervalController,
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("pomodoro_timer={},tower_http=info", config.log_level()))
        .init();

    info!("Starting pomodoro-timer v{}", env!("CARGO_PKG_VERSION"));

    // Wire the controller to its collaborators
    let store = Arc::new(JsonSettingsStore::new(config.settings_path()));
    info!("Configuration: host={}, port={}, settings={}",
          config.host, config.port, store.path().display());

    let alerts = Alerts::new(
        Arc::new(DesktopNotifier::new()),
        Arc::new(CommandSoundPlayer::new(
            config.sound_player.clone(),
            config.completion_sound.clone(),
            config.warning_sound.clone(),
        )),
    );
    let controller = Arc::new(IntervalController::new(store, alerts));

    // Render display changes off the tick loop
    tokio::spawn(display_task(Arc::clone(&controller)));

    if config.autostart {
        if let Err(e) = controller.start() {
            error!("Failed to autostart timer: {}", e);
        }
    }

    let state = Arc::new(AppState::new(Arc::clone(&controller), config.port, config.host.clone()));
    let app = create_router(state);

    // Bind to the specified address
    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  POST /start                 - Start or resume the timer");
    info!("  POST /pause                 - Pause the timer");
    info!("  POST /reset                 - Reset the current interval");
    info!("  POST /skip                  - Skip to the next interval");
    info!("  POST /work-minutes/:minutes - Set the work interval length");
    info!("  POST /sessions/reset        - Reset the completed sessions counter");
    info!("  GET  /settings              - Show settings");
    info!("  PUT  /settings              - Replace settings");
    info!("  POST /command               - Dispatch a JSON command");
    info!("  GET  /status                - Current timer state");
    info!("  GET  /health                - Health check");

    // Setup graceful shutdown
    let server = axum::serve(listener, app);

    tokio::select! {
        result = server => {
            if let Err(e) = result {
                error!("Server error: {}", e);
            }
        }
        _ = shutdown_signal() => {
            info!("Shutdown signal received");
        }
    }

    if let Err(e) = controller.shutdown() {
        error!("Failed to stop timer: {}", e);
    }

    info!("Server shutdown complete");
    Ok(())
}
