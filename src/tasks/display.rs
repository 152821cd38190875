//! Terminal rendering of display updates

use std::sync::Arc;
use tracing::{info, warn};

use crate::state::{DisplayState, Mode};
use crate::timer::IntervalController;

/// Background task that renders every display change as a status line.
///
/// Runs off the tick loop; a slow terminal never delays the countdown.
pub async fn display_task(controller: Arc<IntervalController>) {
    let mut display_rx = controller.subscribe();
    let mut last_mode: Option<Mode> = None;

    loop {
        let current: DisplayState = display_rx.borrow_and_update().clone();

        for line in render_lines(&mut last_mode, &current) {
            info!("{}", line);
        }

        if let Err(e) = display_rx.changed().await {
            warn!("Display channel closed: {}", e);
            break;
        }
    }
}

/// Lines for one update: a banner when the mode changes, then the status line
pub fn render_lines(last_mode: &mut Option<Mode>, current: &DisplayState) -> Vec<String> {
    let mut lines = Vec::with_capacity(2);
    if *last_mode != Some(current.mode) {
        lines.push(format!("== {} ==", current.mode_label));
        *last_mode = Some(current.mode);
    }
    lines.push(current.status_line());
    lines
}
