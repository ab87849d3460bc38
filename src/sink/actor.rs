//! Single-writer sink actor
//!
//! The worker owns the destination path. Every submission is a message with
//! a oneshot reply; the worker handles them one at a time, so at most one
//! block is being written at any instant.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::{debug, trace};

use super::{ReportBlock, SinkError};
use crate::frequency::FrequencyTable;

/// Pending submissions the channel buffers before `submit` waits
const QUEUE_DEPTH: usize = 64;

struct SinkRequest {
    file_id: String,
    table: FrequencyTable,
    reply: oneshot::Sender<Result<(), SinkError>>,
}

/// Report destination, before its worker is started
#[derive(Debug, Clone)]
pub struct Sink {
    destination: PathBuf,
}

impl Sink {
    pub fn new(destination: impl Into<PathBuf>) -> Self {
        Self {
            destination: destination.into(),
        }
    }

    /// Create or truncate the destination. Call once, before any submission.
    pub fn reset(&self) -> Result<(), SinkError> {
        File::create(&self.destination).map_err(|source| SinkError::Reset {
            path: self.destination.clone(),
            source,
        })?;
        debug!(destination = %self.destination.display(), "Output reset");
        Ok(())
    }

    /// Start the writer worker.
    ///
    /// Must be called from within a tokio runtime. The worker exits once
    /// every `SinkHandle` clone has been dropped.
    pub fn spawn(self) -> (SinkHandle, SinkWorker) {
        let (tx, rx) = mpsc::channel(QUEUE_DEPTH);
        let destination = self.destination;
        let handle = tokio::task::spawn_blocking(move || serve(destination, rx));
        (SinkHandle { tx }, SinkWorker { handle })
    }
}

/// Submission side of the sink. Clone one per task.
#[derive(Debug, Clone)]
pub struct SinkHandle {
    tx: mpsc::Sender<SinkRequest>,
}

impl SinkHandle {
    /// Hand a finished table to the writer and wait until its block is on
    /// disk (or has failed).
    pub async fn submit(&self, file_id: &str, table: FrequencyTable) -> Result<(), SinkError> {
        let (reply, outcome) = oneshot::channel();
        self.tx
            .send(SinkRequest {
                file_id: file_id.to_string(),
                table,
                reply,
            })
            .await
            .map_err(|_| SinkError::Closed)?;

        outcome.await.map_err(|_| SinkError::Closed)?
    }
}

/// Join handle for the writer worker
#[derive(Debug)]
pub struct SinkWorker {
    handle: JoinHandle<usize>,
}

impl SinkWorker {
    /// Wait for the worker to drain and exit.
    ///
    /// Returns the number of blocks it wrote.
    pub async fn join(self) -> Result<usize, SinkError> {
        self.handle
            .await
            .map_err(|e| SinkError::Worker(e.to_string()))
    }
}

fn serve(destination: PathBuf, mut rx: mpsc::Receiver<SinkRequest>) -> usize {
    let mut written = 0;

    while let Some(request) = rx.blocking_recv() {
        let block = ReportBlock::render(&request.file_id, &request.table);
        let result = append_block(&destination, &block);
        if result.is_ok() {
            written += 1;
            trace!(file = block.file_id(), "Block written");
        }
        // The submitter may have gone away; the block is written regardless.
        let _ = request.reply.send(result);
    }

    debug!(blocks = written, "Sink worker finished");
    written
}

/// Open-append-close for one block
fn append_block(destination: &Path, block: &ReportBlock) -> Result<(), SinkError> {
    let mut file = OpenOptions::new()
        .append(true)
        .create(true)
        .open(destination)
        .map_err(|source| SinkError::Open {
            path: destination.to_path_buf(),
            source,
        })?;

    file.write_all(block.as_bytes())
        .and_then(|_| file.flush())
        .map_err(|source| SinkError::Write {
            path: destination.to_path_buf(),
            source,
        })
}
