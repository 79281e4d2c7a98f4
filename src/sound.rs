//! Best-effort completion sound through the platform's audio players.

use std::io;
use std::path::Path;
use std::process::{Command, ExitStatus, Stdio};

use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum SoundError {
    #[error("no audio player could play a sound")]
    NoPlayer,

    #[error("failed to run audio player: {0}")]
    Io(#[from] io::Error),
}

const MACOS_SOUNDS: &[&str] = &[
    "/System/Library/Sounds/Glass.aiff",
    "/System/Library/Sounds/Ping.aiff",
    "/System/Library/Sounds/Pop.aiff",
    "/System/Library/Sounds/Purr.aiff",
];

const LINUX_SOUNDS: &[&str] = &[
    "/usr/share/sounds/freedesktop/stereo/complete.oga",
    "/usr/share/sounds/alsa/Front_Left.wav",
    "/usr/share/sounds/sound-icons/bell.wav",
    "/usr/share/sounds/gnome/default/alerts/glass.ogg",
];

/// Audio players to try, in order, with the files each should attempt
fn candidates() -> Vec<(&'static str, &'static [&'static str])> {
    if cfg!(target_os = "macos") {
        vec![("afplay", MACOS_SOUNDS)]
    } else if cfg!(target_os = "linux") {
        vec![("paplay", LINUX_SOUNDS), ("aplay", LINUX_SOUNDS)]
    } else {
        Vec::new()
    }
}

/// Result of one player run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Playback {
    Played,
    /// Stopped by Ctrl-C, which reaches the player too
    Interrupted,
    Failed,
}

/// Play one completion sound, blocking until the player exits
pub fn play_completion_sound() -> Result<(), SoundError> {
    for (player, sounds) in candidates() {
        for sound in sounds.iter().filter(|s| Path::new(s).exists()) {
            match play_with(player, sound) {
                Ok(Playback::Played) => return Ok(()),
                Ok(Playback::Interrupted) => {
                    debug!("{} interrupted", player);
                    return Ok(());
                }
                Ok(Playback::Failed) => debug!("{} could not play {}", player, sound),
                Err(e) if e.kind() == io::ErrorKind::NotFound => {
                    debug!("{} is not installed", player);
                    break;
                }
                Err(e) => return Err(e.into()),
            }
        }
    }
    Err(SoundError::NoPlayer)
}

fn play_with(player: &str, sound: &str) -> io::Result<Playback> {
    let status = Command::new(player)
        .arg(sound)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()?;
    Ok(classify(status))
}

fn classify(status: ExitStatus) -> Playback {
    if status.success() {
        Playback::Played
    } else if killed_by_interrupt(status) {
        Playback::Interrupted
    } else {
        Playback::Failed
    }
}

#[cfg(unix)]
fn killed_by_interrupt(status: ExitStatus) -> bool {
    use std::os::unix::process::ExitStatusExt;

    const SIGINT: i32 = 2;
    status.signal() == Some(SIGINT)
}

#[cfg(not(unix))]
fn killed_by_interrupt(_status: ExitStatus) -> bool {
    false
}
