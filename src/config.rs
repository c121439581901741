use crate::{default_root, error::PomodoroError};
use chrono::Duration;
use std::{
    env,
    path::{Component, Path, PathBuf},
};
use tracing::debug;

pub const DEFAULT_NAME: &str = "default";
pub const ROOT_ENV: &str = "POMODORO_ROOT";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimerConfig {
    /// Directory holding one file per timer
    pub root: PathBuf,
    pub name: String,
    pub work: Duration,
    pub rest: Duration,
}

impl TimerConfig {
    pub fn new(
        root: PathBuf,
        name: String,
        work: Duration,
        rest: Duration,
    ) -> Result<Self, PomodoroError> {
        if !is_valid_name(&name) {
            return Err(PomodoroError::InvalidTimerName(name));
        }

        Ok(Self {
            root,
            name,
            work,
            rest,
        })
    }

    pub fn slot_path(&self) -> PathBuf {
        self.root.join(&self.name)
    }
}

/// Picks the timer directory: explicit path, then `$POMODORO_ROOT`, then `~/.config/pomodoro`
pub fn resolve_root(root: Option<PathBuf>) -> Result<PathBuf, PomodoroError> {
    if let Some(root) = root {
        return Ok(root);
    }

    if let Some(root) = env::var_os(ROOT_ENV).filter(|root| !root.is_empty()) {
        debug!("Using timer root from ${ROOT_ENV}");
        return Ok(root.into());
    }

    default_root()
}

/// A name must map to exactly one file directly inside the root
fn is_valid_name(name: &str) -> bool {
    let mut components = Path::new(name).components();

    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    ) && !name.contains(['/', '\\'])
}
