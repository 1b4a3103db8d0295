//! Once-per-UTC-day submission stamp.
//!
//! A small JSON file records the last UTC day on which orders were
//! submitted. A missing or unreadable stamp reads as "never submitted".
//! The stamp is only written through [`PendingStamp::commit`]; dropping a
//! pending stamp writes nothing.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, NaiveDate, Utc};
use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Persisted record of the last submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunStamp {
    pub last_submit_utc_day: NaiveDate,
    pub last_submit_ts_utc: DateTime<Utc>,
    #[serde(default)]
    pub paper: bool,
}

/// File-backed store for the [`RunStamp`].
#[derive(Debug, Clone)]
pub struct RunStampStore {
    path: PathBuf,
}

impl RunStampStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the stamp. Missing or corrupt files yield `None`.
    pub fn load(&self) -> Option<RunStamp> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return None,
            Err(e) => {
                warn!("Cannot read run stamp {}: {e}", self.path.display());
                return None;
            }
        };
        match serde_json::from_str(&contents) {
            Ok(stamp) => Some(stamp),
            Err(e) => {
                warn!(
                    "Ignoring corrupt run stamp {}: {e}",
                    self.path.display()
                );
                None
            }
        }
    }

    /// True if a submission was already stamped on `day`.
    pub fn submitted_on(&self, day: NaiveDate) -> bool {
        self.load()
            .is_some_and(|stamp| stamp.last_submit_utc_day == day)
    }

    /// Prepare a stamp for a submission pass starting at `now`.
    pub fn begin(&self, now: DateTime<Utc>, paper: bool) -> PendingStamp<'_> {
        PendingStamp {
            store: self,
            stamp: RunStamp {
                last_submit_utc_day: now.date_naive(),
                last_submit_ts_utc: now,
                paper,
            },
        }
    }

    fn write(&self, stamp: &RunStamp) -> Result<()> {
        let io_err = |source| Error::Stamp {
            path: self.path.clone(),
            source,
        };
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        let json = serde_json::to_string_pretty(stamp)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json).map_err(io_err)?;
        fs::rename(&tmp, &self.path).map_err(io_err)?;
        Ok(())
    }
}

/// A stamp that is persisted only when committed.
#[must_use = "a pending stamp writes nothing unless committed"]
#[derive(Debug)]
pub struct PendingStamp<'a> {
    store: &'a RunStampStore,
    stamp: RunStamp,
}

impl PendingStamp<'_> {
    pub fn stamp(&self) -> &RunStamp {
        &self.stamp
    }

    /// Write the stamp.
    pub fn commit(self) -> Result<RunStamp> {
        self.store.write(&self.stamp)?;
        info!(
            "Run stamp written: {} ({})",
            self.stamp.last_submit_utc_day,
            self.store.path.display()
        );
        Ok(self.stamp)
    }
}
