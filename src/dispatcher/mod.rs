//! Dispatcher — one task per input file, joined behind a barrier
//!
//! Every task is registered with `InFlight` before it is spawned and holds
//! its guard until it reaches a terminal state. `run` returns only after the
//! count is back to zero and every handle has been joined.

mod inflight;
mod summary;
mod task;

pub use inflight::{InFlight, InFlightGuard};
pub use summary::{FailedFile, FailureKind, FileReport, Summary};
pub use task::{Task, TaskOutcome, TaskState};

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::Semaphore;
use tracing::{debug, error, info, info_span, Instrument};

use crate::frequency::count_file;
use crate::sink::SinkHandle;
use task::CountFn;

/// Dispatcher tuning
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchOptions {
    /// Most tasks counting at once; 0 means no cap
    pub max_in_flight: usize,
}

/// Fans input files out to concurrent tasks
pub struct Dispatcher {
    sink: SinkHandle,
    in_flight: Arc<InFlight>,
    limit: Option<Arc<Semaphore>>,
    count: CountFn,
}

impl fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatcher")
            .field("sink", &self.sink)
            .field("in_flight", &self.in_flight)
            .field("limit", &self.limit)
            .finish_non_exhaustive()
    }
}

impl Dispatcher {
    pub fn new(sink: SinkHandle, options: DispatchOptions) -> Self {
        let limit = match options.max_in_flight {
            0 => None,
            n => Some(Arc::new(Semaphore::new(n))),
        };

        Self {
            sink,
            in_flight: InFlight::new(),
            limit,
            count: count_file,
        }
    }

    /// Swap the per-file counting function
    #[cfg(test)]
    pub(crate) fn with_counter(mut self, count: CountFn) -> Self {
        self.count = count;
        self
    }

    /// Tasks currently between spawn and terminal state
    pub fn in_flight(&self) -> usize {
        self.in_flight.current()
    }

    /// Run one task per path and wait for all of them.
    ///
    /// Per-task failures are collected into the summary; none of them stop
    /// sibling tasks. Failed tasks are not retried.
    pub async fn run(&self, paths: Vec<PathBuf>) -> Summary {
        info!(tasks = paths.len(), "Dispatching");

        let mut handles = Vec::with_capacity(paths.len());
        for path in paths {
            let task = Task::new(path);
            let file = task.file().to_string();
            let guard = self.in_flight.enter();
            let sink = self.sink.clone();
            let limit = self.limit.clone();
            let count = self.count;
            let span = info_span!("task", file = %file);

            let handle = tokio::spawn(
                async move {
                    let _guard = guard;
                    let _permit = match limit {
                        Some(limit) => limit.acquire_owned().await.ok(),
                        None => None,
                    };
                    task.run_with(sink, count).await
                }
                .instrument(span),
            );
            handles.push((file, handle));
        }

        self.in_flight.wait_idle().await;

        let mut summary = Summary::default();
        for (file, handle) in handles {
            let outcome = match handle.await {
                Ok(outcome) => outcome,
                Err(join_error) => {
                    error!(file = %file, error = %join_error, "Task aborted");
                    TaskOutcome::Aborted {
                        file,
                        reason: join_error.to_string(),
                    }
                }
            };
            debug!(file = outcome.file(), "Task joined");
            summary.record(outcome);
        }

        info!(
            succeeded = summary.succeeded.len(),
            failed = summary.failed.len(),
            "All tasks finished"
        );
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frequency::{CountError, FrequencyTable};
    use crate::sink::Sink;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    /// Counts normally, except for files named `poison*`
    fn poisoned_count(path: &Path) -> Result<FrequencyTable, CountError> {
        let name = path.file_name().and_then(|n| n.to_str()).unwrap_or("");
        if name.starts_with("poison") {
            panic!("cannot count {}", name);
        }
        count_file(path)
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_panicking_task_is_aborted_and_barrier_completes() {
        let temp_dir = TempDir::new().unwrap();
        let out = temp_dir.path().join("out.txt");
        let mut inputs = Vec::new();
        for name in ["a.txt", "poison.txt", "b.txt", "poison2.txt", "c.txt"] {
            let path = temp_dir.path().join(name);
            fs::write(&path, "abc").unwrap();
            inputs.push(path);
        }

        let sink = Sink::new(&out);
        sink.reset().unwrap();
        let (handle, worker) = sink.spawn();
        let dispatcher = Dispatcher::new(handle, DispatchOptions::default())
            .with_counter(poisoned_count);

        let summary = dispatcher.run(inputs).await;
        assert_eq!(dispatcher.in_flight(), 0);
        drop(dispatcher);
        assert_eq!(worker.join().await.unwrap(), 3);

        assert_eq!(summary.total_tasks(), 5);
        assert_eq!(summary.succeeded.len(), 3);
        for name in ["poison.txt", "poison2.txt"] {
            let file = temp_dir.path().join(name).display().to_string();
            assert_eq!(summary.failure_of(&file), Some(FailureKind::Aborted));
        }
        assert_eq!(fs::read_to_string(&out).unwrap().matches("Results of").count(), 3);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_run_with_no_files() {
        let temp_dir = TempDir::new().unwrap();
        let (sink, worker) = Sink::new(temp_dir.path().join("out.txt")).spawn();
        let dispatcher = Dispatcher::new(sink, DispatchOptions::default());

        let summary = dispatcher.run(Vec::new()).await;
        assert_eq!(summary.total_tasks(), 0);
        assert_eq!(dispatcher.in_flight(), 0);

        drop(dispatcher);
        assert_eq!(worker.join().await.unwrap(), 0);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_failed_task_does_not_stop_siblings() {
        let temp_dir = TempDir::new().unwrap();
        let out = temp_dir.path().join("out.txt");
        let good = temp_dir.path().join("good.txt");
        let bad = temp_dir.path().join("bad.txt");
        fs::write(&good, "abc").unwrap();

        let sink = Sink::new(&out);
        sink.reset().unwrap();
        let (handle, worker) = sink.spawn();
        let dispatcher = Dispatcher::new(handle, DispatchOptions::default());

        let summary = dispatcher.run(vec![good.clone(), bad.clone()]).await;
        assert_eq!(dispatcher.in_flight(), 0);
        drop(dispatcher);
        assert_eq!(worker.join().await.unwrap(), 1);

        assert_eq!(summary.succeeded.len(), 1);
        assert_eq!(summary.succeeded[0].file, good.display().to_string());
        assert_eq!(
            summary.failure_of(&bad.display().to_string()),
            Some(FailureKind::Open)
        );
        assert_eq!(fs::read_to_string(&out).unwrap().matches("Results of").count(), 1);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_capped_run_processes_every_file() {
        let temp_dir = TempDir::new().unwrap();
        let out = temp_dir.path().join("out.txt");
        let mut inputs = Vec::new();
        for i in 0..10 {
            let path = temp_dir.path().join(format!("in{}.txt", i));
            fs::write(&path, "z".repeat(i + 1)).unwrap();
            inputs.push(path);
        }

        let (handle, worker) = Sink::new(&out).spawn();
        let dispatcher = Dispatcher::new(handle, DispatchOptions { max_in_flight: 2 });
        let summary = dispatcher.run(inputs).await;
        drop(dispatcher);
        worker.join().await.unwrap();

        assert!(summary.is_clean());
        assert_eq!(summary.succeeded.len(), 10);
        let total: u64 = summary.succeeded.iter().map(|r| r.letters).sum();
        assert_eq!(total, (1..=10).sum::<u64>());
    }
}
