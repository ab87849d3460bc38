//! Run summary: which files produced a block and which did not

use std::fmt;

use serde::Serialize;

use super::task::TaskOutcome;
use crate::frequency::{CountError, FrequencyTable};

/// Why a task produced no report block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FailureKind {
    /// Input could not be opened
    Open,
    /// Input failed part-way through reading
    Read,
    /// Block could not be written to the destination
    Write,
    /// Task panicked or could not be joined
    Aborted,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FailureKind::Open => "open",
            FailureKind::Read => "read",
            FailureKind::Write => "write",
            FailureKind::Aborted => "aborted",
        };
        f.write_str(name)
    }
}

/// A file whose block reached the destination
#[derive(Debug, Clone, Serialize)]
pub struct FileReport {
    pub file: String,
    /// Total letters counted
    pub letters: u64,
    pub counts: FrequencyTable,
}

/// A file whose task ended without a block
#[derive(Debug, Clone, Serialize)]
pub struct FailedFile {
    pub file: String,
    pub kind: FailureKind,
    pub message: String,
}

/// Result of one dispatcher run
#[derive(Debug, Clone, Default, Serialize)]
pub struct Summary {
    pub succeeded: Vec<FileReport>,
    pub failed: Vec<FailedFile>,
}

impl Summary {
    /// Fold one terminal task outcome in
    pub fn record(&mut self, outcome: TaskOutcome) {
        match outcome {
            TaskOutcome::Done { file, table } => self.succeeded.push(FileReport {
                file,
                letters: table.total(),
                counts: table,
            }),
            TaskOutcome::CountFailed { file, error } => {
                let kind = match error {
                    CountError::Open { .. } => FailureKind::Open,
                    CountError::Read { .. } => FailureKind::Read,
                };
                self.push_failure(file, kind, error.to_string());
            }
            TaskOutcome::SubmitFailed { file, error } => {
                self.push_failure(file, FailureKind::Write, error.to_string());
            }
            TaskOutcome::Aborted { file, reason } => {
                self.push_failure(file, FailureKind::Aborted, reason);
            }
        }
    }

    fn push_failure(&mut self, file: String, kind: FailureKind, message: String) {
        self.failed.push(FailedFile {
            file,
            kind,
            message,
        });
    }

    /// Every task produced a block
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }

    pub fn total_tasks(&self) -> usize {
        self.succeeded.len() + self.failed.len()
    }

    /// Failure kind recorded for `file`, if it failed
    pub fn failure_of(&self, file: &str) -> Option<FailureKind> {
        self.failed.iter().find(|f| f.file == file).map(|f| f.kind)
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Processed {} file(s): {} succeeded, {} failed",
            self.total_tasks(),
            self.succeeded.len(),
            self.failed.len()
        )?;
        for failed in &self.failed {
            writeln!(f, "  {} [{}]: {}", failed.file, failed.kind, failed.message)?;
        }
        Ok(())
    }
}
