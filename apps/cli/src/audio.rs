//! Fire-and-forget audio playback through an external player command.

use std::process::{Command, Stdio};

use tracing::{debug, warn};

/// Plays pronunciation audio by spawning a configured player (e.g. `mpv`)
/// with the URL as its only argument. Playback failures never reach the quiz
/// loop; they are logged and dropped.
pub struct AudioPlayer {
    command: Option<String>,
}

impl AudioPlayer {
    pub fn new(command: Option<String>) -> Self {
        Self { command }
    }

    /// Whether a player command is configured at all.
    pub fn enabled(&self) -> bool {
        self.command.is_some()
    }

    /// Spawn the player detached. No-op when no command is configured.
    pub fn play(&self, url: &str) {
        let Some(command) = &self.command else {
            return;
        };
        debug!(%url, player = %command, "playing audio");
        match Command::new(command)
            .arg(url)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
        {
            Ok(_) => {}
            Err(err) => warn!(%err, player = %command, "audio player failed to start"),
        }
    }
}
