//! JSONL run journal.
//!
//! Every rebalance run, blocked or not, appends one [`RunRecord`] to the
//! journal file, one JSON object per line.

use std::collections::BTreeMap;
use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use weightbook::OrderPlan;

use crate::error::Result;
use crate::execution::{FailedSubmission, SubmissionReceipt};

/// Whether a run could place orders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RunMode {
    DryRun,
    Submit,
}

impl RunMode {
    pub fn from_submit(submit: bool) -> Self {
        if submit { RunMode::Submit } else { RunMode::DryRun }
    }
}

/// One journal line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunRecord {
    pub ts_utc: DateTime<Utc>,
    pub mode: RunMode,
    pub blocked: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub reasons: Vec<String>,
    pub equity: f64,
    #[serde(default)]
    pub plans: Vec<OrderPlan>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub submitted: Vec<SubmissionReceipt>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failure: Option<FailedSubmission>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub skipped: Vec<OrderPlan>,
    #[serde(default)]
    pub positions: BTreeMap<String, f64>,
    #[serde(default)]
    pub target_qty: BTreeMap<String, i64>,
}

impl RunRecord {
    /// An empty record for a run starting at `ts_utc`.
    pub fn new(ts_utc: DateTime<Utc>, mode: RunMode, equity: f64) -> Self {
        Self {
            ts_utc,
            mode,
            blocked: false,
            reasons: Vec::new(),
            equity,
            plans: Vec::new(),
            submitted: Vec::new(),
            failure: None,
            skipped: Vec::new(),
            positions: BTreeMap::new(),
            target_qty: BTreeMap::new(),
        }
    }

    /// Mark the run as blocked for the given reasons.
    pub fn blocked(mut self, reasons: Vec<String>) -> Self {
        self.blocked = true;
        self.reasons = reasons;
        self
    }
}

/// Append-only journal writer.
pub struct Journal {
    path: PathBuf,
    writer: BufWriter<File>,
}

impl Journal {
    /// Open (or create) the journal for appending.
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let file = OpenOptions::new().create(true).append(true).open(path)?;

        Ok(Self {
            path: path.to_path_buf(),
            writer: BufWriter::new(file),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one record and flush.
    pub fn append(&mut self, record: &RunRecord) -> Result<()> {
        let json = serde_json::to_string(record)?;
        writeln!(self.writer, "{json}")?;
        self.writer.flush()?;
        Ok(())
    }
}

/// Read every record from a journal file.
pub fn read_records(path: &Path) -> Result<Vec<RunRecord>> {
    let reader = BufReader::new(File::open(path)?);
    let mut records = Vec::new();
    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        records.push(serde_json::from_str(&line)?);
    }
    Ok(records)
}
