//! JSON artifacts written at the end of a run.

use anyhow::{Context, Result};
use chrono::Local;
use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::run_log::{LogEntry, RunLog, TIMESTAMP_FORMAT};
use crate::snapshot::SignSnapshot;

pub const RESULTS_FILE: &str = "auto-worker-results.json";
pub const SIGN_DATA_FILE: &str = "sign-data.json";

/// Audit trail of one run: every attempt log entry, verbatim.
#[derive(Debug, Serialize)]
pub struct ResultsFile<'a> {
    pub timestamp: String,
    pub results: &'a [LogEntry],
}

/// Write `auto-worker-results.json` into `dir`.
pub fn write_results(dir: &Path, log: &RunLog) -> Result<PathBuf> {
    let path = dir.join(RESULTS_FILE);
    let file = ResultsFile {
        timestamp: Local::now().format(TIMESTAMP_FORMAT).to_string(),
        results: log.entries(),
    };
    write_json(&path, &file)?;
    Ok(path)
}

/// Write `sign-data.json` into `dir`.
pub fn write_sign_data(dir: &Path, snapshot: &SignSnapshot) -> Result<PathBuf> {
    let path = dir.join(SIGN_DATA_FILE);
    write_json(&path, snapshot)?;
    Ok(path)
}

/// Pretty-printed UTF-8; non-ASCII text is written as-is.
fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create dir: {}", parent.display()))?;
    }
    let json = serde_json::to_string_pretty(value)
        .with_context(|| format!("serialize {}", path.display()))?;
    std::fs::write(path, json).with_context(|| format!("write {}", path.display()))?;
    Ok(())
}
