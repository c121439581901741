use crate::{
    clock::{Clock, SystemClock},
    config::TimerConfig,
    error::{Action, PomodoroError, TimerNotice},
    slot::{FileSlot, Slot},
    time,
};
use chrono::Duration;
use std::fmt;
use tracing::{debug, instrument, warn};

/// Shown by `status` when no timer exists
pub const IDLE: &str = "--:--";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Work,
    Break,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Idle,
    Active {
        phase: Phase,
        paused: bool,
        /// Not clamped, runs negative once the break is over as well
        remaining: Duration,
    },
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Status::Active {
            phase,
            paused,
            remaining,
        } = self
        else {
            return f.write_str(IDLE);
        };

        if *paused {
            f.write_str("P")?;
        }
        f.write_str(match phase {
            Phase::Work => "W",
            Phase::Break => "B",
        })?;
        f.write_str(&time::format_remaining(*remaining))
    }
}

/// A named pomodoro timer whose whole state lives in a [`Slot`]
#[derive(Debug)]
pub struct Pomodoro<S, C = SystemClock> {
    name: String,
    work: Duration,
    rest: Duration,
    slot: S,
    clock: C,
}

impl Pomodoro<FileSlot> {
    pub fn from_config(config: &TimerConfig) -> Self {
        Self::new(
            config.name.to_owned(),
            config.work,
            config.rest,
            FileSlot::new(config.slot_path()),
            SystemClock,
        )
    }
}

impl<S: Slot, C: Clock> Pomodoro<S, C> {
    pub fn new(name: String, work: Duration, rest: Duration, slot: S, clock: C) -> Self {
        Self {
            name,
            work,
            rest,
            slot,
            clock,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn work(&self) -> Duration {
        self.work
    }

    pub fn slot(&self) -> &S {
        &self.slot
    }

    /// Derives the current phase and remaining time from the slot alone
    #[instrument(level = "trace", skip(self), fields(name = %self.name))]
    pub fn status(&self) -> Result<Status, PomodoroError> {
        let Some(meta) = self.slot.stat()? else {
            return Ok(Status::Idle);
        };

        let paused = meta.len > 0;
        let elapsed = if paused {
            time::parse_pause_marker(&self.slot.read()?)?
        } else {
            self.clock.now() - meta.modified
        };

        let remaining = self.work - elapsed;
        let (phase, remaining) = if remaining < Duration::zero() {
            (Phase::Break, remaining + self.rest)
        } else {
            (Phase::Work, remaining)
        };

        Ok(Status::Active {
            phase,
            paused,
            remaining,
        })
    }

    #[instrument(level = "trace", skip(self), fields(name = %self.name))]
    pub fn start(&self) -> Result<(), PomodoroError> {
        if self.slot.exists()? {
            Err(TimerNotice::AlreadyRunning)?
        }

        let now = self.clock.now();
        self.slot.create()?;
        self.slot.set_modified(now)?;
        debug!("Started timer at {now}");

        Ok(())
    }

    /// Stores the elapsed work time as `MM:SS` in the slot
    #[instrument(level = "trace", skip(self), fields(name = %self.name))]
    pub fn pause(&self) -> Result<(), PomodoroError> {
        let Some(meta) = self.slot.stat()? else {
            return Err(TimerNotice::NotRunning.into());
        };
        if meta.len > 0 {
            Err(TimerNotice::AlreadyPaused)?
        }

        let marker = time::encode_pause_marker(self.clock.now() - meta.modified);
        self.slot.write(&marker)?;
        debug!("Paused timer after {marker}");

        Ok(())
    }

    /// Rewinds the start of the timer by the paused elapsed time, returns true if a timer was resumed.
    ///
    /// A running timer has no marker to resume from, it is removed and left idle.
    #[instrument(level = "trace", skip(self), fields(name = %self.name))]
    pub fn resume(&self) -> Result<bool, PomodoroError> {
        let Some(meta) = self.slot.stat()? else {
            debug!("No timer to resume");
            return Ok(false);
        };

        let start = if meta.len > 0 {
            let content = self.slot.read()?;
            let elapsed = time::parse_pause_marker(&content)?;
            let start = self
                .clock
                .now()
                .checked_sub_signed(elapsed)
                .ok_or_else(|| PomodoroError::InvalidPauseMarker(content.trim().to_owned()))?;
            Some(start)
        } else {
            None
        };

        self.remove(Action::Resume)?;

        let Some(start) = start else {
            debug!("Timer was not paused, removed it");
            return Ok(false);
        };

        self.slot.create()?;
        self.slot.set_modified(start)?;
        debug!("Resumed timer, effective start {start}");

        Ok(true)
    }

    /// Returns true if a timer was stopped
    #[instrument(level = "trace", skip(self), fields(name = %self.name))]
    pub fn stop(&self) -> Result<bool, PomodoroError> {
        if !self.slot.exists()? {
            return Ok(false);
        }

        self.remove(Action::Stop)?;
        debug!("Stopped timer");

        Ok(true)
    }

    fn remove(&self, action: Action) -> Result<(), PomodoroError> {
        match self.slot.remove() {
            Err(PomodoroError::SlotBusy(error)) => {
                warn!("Could not remove timer file: {error}");
                Err(TimerNotice::Busy(action).into())
            }
            result => result,
        }
    }
}
