use std::{fmt, io};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PomodoroError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("Could not find a home directory, use --root or $POMODORO_ROOT")]
    NoHomeDir,
    #[error("Invalid timer name {0:?}")]
    InvalidTimerName(String),
    #[error("Invalid pause marker {0:?}, expected MM:SS")]
    InvalidPauseMarker(String),
    #[error("Timer file is in use: {0}")]
    SlotBusy(io::Error),
    #[error("{0}")]
    Notice(#[from] TimerNotice),
}

/// User facing, non-fatal outcomes. The timer state is left untouched.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum TimerNotice {
    #[error("A timer is already running.")]
    AlreadyRunning,
    #[error("No timer is currently running.")]
    NotRunning,
    #[error("The timer is already paused.")]
    AlreadyPaused,
    #[error("Could not {0} the current timer. The file is probably in use.")]
    Busy(Action),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Stop,
    Resume,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Action::Stop => "stop",
            Action::Resume => "resume",
        })
    }
}
