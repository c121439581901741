use directories::BaseDirs;
use std::path::PathBuf;

pub mod args;
pub mod clock;
pub mod config;
pub mod error;
pub mod slot;
pub mod time;
pub mod timer;

/// `~/.config/pomodoro`, on every platform
pub fn default_root() -> Result<PathBuf, error::PomodoroError> {
    BaseDirs::new()
        .map(|dirs| dirs.home_dir().join(".config").join("pomodoro"))
        .ok_or(error::PomodoroError::NoHomeDir)
}
