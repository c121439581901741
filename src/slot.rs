//! Durable storage for a single named timer.
//!
//! A slot is a file-like location whose existence, size, content and
//! modification time together encode the timer state:
//!
//! | Slot                    | Timer                             |
//! |-------------------------|-----------------------------------|
//! | missing                 | idle                              |
//! | empty, modified at `T`  | running, work started at `T`      |
//! | contains `MM:SS`        | paused after `MM:SS` of elapsed   |

use crate::error::PomodoroError;
use chrono::{DateTime, Utc};
use std::{
    fs::{self, File},
    io::{self, ErrorKind},
    path::{Path, PathBuf},
    time::SystemTime,
};
use tracing::{debug, instrument};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotMeta {
    /// Size of the content in bytes
    pub len: u64,
    pub modified: DateTime<Utc>,
}

pub trait Slot {
    /// Returns `None` if the slot does not exist
    fn stat(&self) -> Result<Option<SlotMeta>, PomodoroError>;

    fn exists(&self) -> Result<bool, PomodoroError> {
        Ok(self.stat()?.is_some())
    }

    /// Creates an empty slot, replacing any content
    fn create(&self) -> Result<(), PomodoroError>;

    fn set_modified(&self, modified: DateTime<Utc>) -> Result<(), PomodoroError>;

    fn write(&self, content: &str) -> Result<(), PomodoroError>;

    fn read(&self) -> Result<String, PomodoroError>;

    /// Deletes the slot, failing with [`PomodoroError::SlotBusy`] if it is held open elsewhere
    fn remove(&self) -> Result<(), PomodoroError>;
}

#[derive(Debug, Clone)]
pub struct FileSlot {
    path: PathBuf,
}

impl FileSlot {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Slot for FileSlot {
    fn stat(&self) -> Result<Option<SlotMeta>, PomodoroError> {
        match fs::metadata(&self.path) {
            Ok(metadata) => Ok(Some(SlotMeta {
                len: metadata.len(),
                modified: metadata.modified()?.into(),
            })),
            Err(error) if error.kind() == ErrorKind::NotFound => Ok(None),
            Err(error) => Err(error.into()),
        }
    }

    #[instrument(level = "trace")]
    fn create(&self) -> Result<(), PomodoroError> {
        if let Some(parent) = self.path.parent() {
            if !parent.is_dir() {
                debug!("Creating timer directory {}", parent.display());
                fs::create_dir_all(parent)?;
            }
        }

        File::create(&self.path)?;

        Ok(())
    }

    #[instrument(level = "trace")]
    fn set_modified(&self, modified: DateTime<Utc>) -> Result<(), PomodoroError> {
        File::options()
            .write(true)
            .open(&self.path)?
            .set_modified(SystemTime::from(modified))?;

        Ok(())
    }

    #[instrument(level = "trace")]
    fn write(&self, content: &str) -> Result<(), PomodoroError> {
        fs::write(&self.path, content)?;

        Ok(())
    }

    fn read(&self) -> Result<String, PomodoroError> {
        Ok(fs::read_to_string(&self.path)?)
    }

    #[instrument(level = "trace")]
    fn remove(&self) -> Result<(), PomodoroError> {
        fs::remove_file(&self.path).map_err(|error| {
            if is_busy(&error) {
                PomodoroError::SlotBusy(error)
            } else {
                error.into()
            }
        })
    }
}

/// Unix lets an open file be unlinked, only Windows refuses with a permission or sharing error
fn is_busy(error: &io::Error) -> bool {
    if cfg!(windows) {
        // ERROR_SHARING_VIOLATION and ERROR_LOCK_VIOLATION
        if matches!(error.raw_os_error(), Some(32 | 33)) {
            return true;
        }
        if error.kind() == ErrorKind::PermissionDenied {
            return true;
        }
    }

    error.kind() == ErrorKind::ResourceBusy
}

#[cfg(test)]
pub use memory::MemorySlot;

#[cfg(test)]
mod memory {
    use super::{Slot, SlotMeta};
    use crate::error::PomodoroError;
    use chrono::{DateTime, TimeZone, Utc};
    use std::{
        cell::{Cell, RefCell},
        io::{self, ErrorKind},
    };

    #[derive(Debug, Clone)]
    struct Entry {
        content: String,
        modified: DateTime<Utc>,
    }

    /// In-memory slot. Writes leave the modification time alone.
    #[derive(Debug, Default)]
    pub struct MemorySlot {
        entry: RefCell<Option<Entry>>,
        busy: Cell<bool>,
    }

    impl MemorySlot {
        /// Makes every following `remove` fail as if the slot was held open
        pub fn set_busy(&self, busy: bool) {
            self.busy.set(busy);
        }

        fn missing() -> PomodoroError {
            io::Error::from(ErrorKind::NotFound).into()
        }
    }

    impl Slot for MemorySlot {
        fn stat(&self) -> Result<Option<SlotMeta>, PomodoroError> {
            Ok(self.entry.borrow().as_ref().map(|entry| SlotMeta {
                len: entry.content.len() as u64,
                modified: entry.modified,
            }))
        }

        fn create(&self) -> Result<(), PomodoroError> {
            *self.entry.borrow_mut() = Some(Entry {
                content: String::new(),
                modified: Utc.timestamp_opt(0, 0).unwrap(),
            });
            Ok(())
        }

        fn set_modified(&self, modified: DateTime<Utc>) -> Result<(), PomodoroError> {
            let mut entry = self.entry.borrow_mut();
            entry.as_mut().ok_or_else(Self::missing)?.modified = modified;
            Ok(())
        }

        fn write(&self, content: &str) -> Result<(), PomodoroError> {
            let mut entry = self.entry.borrow_mut();
            entry.as_mut().ok_or_else(Self::missing)?.content = content.to_owned();
            Ok(())
        }

        fn read(&self) -> Result<String, PomodoroError> {
            let entry = self.entry.borrow();
            Ok(entry.as_ref().ok_or_else(Self::missing)?.content.clone())
        }

        fn remove(&self) -> Result<(), PomodoroError> {
            if self.busy.get() {
                return Err(PomodoroError::SlotBusy(ErrorKind::ResourceBusy.into()));
            }
            self.entry.borrow_mut().take().ok_or_else(Self::missing)?;
            Ok(())
        }
    }
}
