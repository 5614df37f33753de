//! Outcome report: `{ intruder_win, guard_win, time_taken_seconds }`.
//!
//! A plain serde-derived struct — no writer trait or backend is needed,
//! since a run's output is a single JSON object rather than a stream of
//! per-tick rows.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use sv_core::{SvError, SvResult};

/// The final result of a run, handed to the external caller / batch runner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OutcomeReport {
    pub intruder_win: bool,
    pub guard_win: bool,
    pub time_taken_seconds: f32,
}

impl OutcomeReport {
    /// Builds a report for a run that ended in a guard win.
    pub fn guards_won(time_taken_seconds: f32) -> Self {
        Self {
            intruder_win: false,
            guard_win: true,
            time_taken_seconds,
        }
    }

    /// Builds a report for a run that ended in an intruder win.
    pub fn intruders_won(time_taken_seconds: f32) -> Self {
        Self {
            intruder_win: true,
            guard_win: false,
            time_taken_seconds,
        }
    }

    /// Builds a report for a run that never reached a win condition (e.g. a
    /// caller-imposed tick limit was hit).
    pub fn undecided(time_taken_seconds: f32) -> Self {
        Self {
            intruder_win: false,
            guard_win: false,
            time_taken_seconds,
        }
    }
}

/// Writes an [`OutcomeReport`] to a JSON file on disk.
pub fn save_report(path: &Path, report: &OutcomeReport) -> SvResult<()> {
    let text = serde_json::to_string_pretty(report)
        .map_err(|e| SvError::SaveFile(format!("failed to serialize outcome report: {e}")))?;
    fs::write(path, text)?;
    Ok(())
}

/// Reads an [`OutcomeReport`] back from a JSON file on disk.
pub fn load_report(path: &Path) -> SvResult<OutcomeReport> {
    let text = fs::read_to_string(path)?;
    serde_json::from_str(&text).map_err(|e| SvError::SaveFile(format!("malformed outcome report: {e}")))
}
