//! Audio alert playback through an external player

use std::path::{Path, PathBuf};
use tokio::process::Command;
use tracing::{debug, warn};

/// Which cue to play
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertSound {
    Completion,
    Warning,
}

/// Fire-and-forget audio cue sink
pub trait SoundPlayer: Send + Sync {
    fn play(&self, sound: AlertSound);
}

/// Plays sound files by spawning a player binary such as `paplay`
#[derive(Debug, Clone)]
pub struct CommandSoundPlayer {
    program: String,
    completion_sound: PathBuf,
    warning_sound: PathBuf,
}

impl CommandSoundPlayer {
    pub fn new(program: impl Into<String>, completion_sound: PathBuf, warning_sound: PathBuf) -> Self {
        Self {
            program: program.into(),
            completion_sound,
            warning_sound,
        }
    }

    fn file_for(&self, sound: AlertSound) -> &PathBuf {
        match sound {
            AlertSound::Completion => &self.completion_sound,
            AlertSound::Warning => &self.warning_sound,
        }
    }
}

impl SoundPlayer for CommandSoundPlayer {
    fn play(&self, sound: AlertSound) {
        let program = self.program.clone();
        let file = self.file_for(sound).clone();

        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                handle.spawn(async move {
                    if let Err(e) = run_player(&program, &file).await {
                        warn!("Failed to play {:?} sound: {}", sound, e);
                    }
                });
            }
            Err(_) => warn!("No async runtime available, skipping {:?} sound", sound),
        }
    }
}

/// Run the player to completion and report a non-zero exit
async fn run_player(program: &str, file: &Path) -> Result<(), String> {
    debug!("Playing {} with {}", file.display(), program);

    let output = Command::new(program)
        .arg(file)
        .output()
        .await
        .map_err(|e| format!("Failed to execute {}: {}", program, e))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(format!("{} failed: {}", program, stderr.trim()));
    }

    Ok(())
}
