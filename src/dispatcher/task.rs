//! One task: count one file, hand the table to the sink
//!
//! ```text
//! Created -> Counting -> Submitting -> Done
//!                    \-> CountFailed   \-> SubmitFailed
//!                    \-> Aborted
//! ```

use std::fmt;
use std::path::{Path, PathBuf};

use tracing::{debug, error};

use crate::frequency::{count_file, CountError, FrequencyTable};
use crate::sink::{SinkError, SinkHandle};

/// Lifecycle state of a task
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskState {
    Created,
    Counting,
    Submitting,
    Done,
    CountFailed,
    SubmitFailed,
    /// Counting job panicked or could not be joined
    Aborted,
}

/// Counting function a task runs on the blocking pool
pub(crate) type CountFn = fn(&Path) -> Result<FrequencyTable, CountError>;

impl TaskState {
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            TaskState::Done
                | TaskState::CountFailed
                | TaskState::SubmitFailed
                | TaskState::Aborted
        )
    }
}

impl fmt::Display for TaskState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Terminal result of a task
#[derive(Debug)]
pub enum TaskOutcome {
    /// Block written
    Done { file: String, table: FrequencyTable },
    /// Input could not be counted; no block
    CountFailed { file: String, error: CountError },
    /// Counted, but the block could not be written
    SubmitFailed { file: String, error: SinkError },
    /// Task panicked or its blocking worker could not be joined
    Aborted { file: String, reason: String },
}

impl TaskOutcome {
    pub fn file(&self) -> &str {
        match self {
            TaskOutcome::Done { file, .. }
            | TaskOutcome::CountFailed { file, .. }
            | TaskOutcome::SubmitFailed { file, .. }
            | TaskOutcome::Aborted { file, .. } => file,
        }
    }
}

/// A unit of work bound to one input file
#[derive(Debug)]
pub struct Task {
    file: String,
    path: PathBuf,
    state: TaskState,
}

impl Task {
    pub fn new(path: PathBuf) -> Self {
        Self {
            file: path.display().to_string(),
            path,
            state: TaskState::Created,
        }
    }

    pub fn file(&self) -> &str {
        &self.file
    }

    pub fn state(&self) -> TaskState {
        self.state
    }

    fn advance(&mut self, next: TaskState) {
        debug!(file = %self.file, from = %self.state, to = %next, "Task transition");
        self.state = next;
    }

    /// Drive the task to a terminal state.
    ///
    /// Counting runs on the blocking pool so a slow read only holds up this
    /// task.
    pub async fn run(self, sink: SinkHandle) -> TaskOutcome {
        self.run_with(sink, count_file).await
    }

    pub(crate) async fn run_with(mut self, sink: SinkHandle, count: CountFn) -> TaskOutcome {
        self.advance(TaskState::Counting);
        let path = self.path.clone();
        let counted = match tokio::task::spawn_blocking(move || count(&path)).await {
            Ok(counted) => counted,
            Err(join_error) => {
                self.advance(TaskState::Aborted);
                error!(file = %self.file, error = %join_error, "Counting task aborted");
                return TaskOutcome::Aborted {
                    file: self.file,
                    reason: join_error.to_string(),
                };
            }
        };

        let table = match counted {
            Ok(table) => table,
            Err(e) => {
                self.advance(TaskState::CountFailed);
                error!(file = %self.file, error = %e, "Error counting usage");
                return TaskOutcome::CountFailed {
                    file: self.file,
                    error: e,
                };
            }
        };

        self.advance(TaskState::Submitting);
        match sink.submit(&self.file, table).await {
            Ok(()) => {
                self.advance(TaskState::Done);
                TaskOutcome::Done {
                    file: self.file,
                    table,
                }
            }
            Err(e) => {
                self.advance(TaskState::SubmitFailed);
                error!(file = %self.file, error = %e, "Error writing report block");
                TaskOutcome::SubmitFailed {
                    file: self.file,
                    error: e,
                }
            }
        }
    }
}
