//! Sink — the single writer that owns the report destination
//!
//! Tasks never touch the destination file themselves. They send their
//! finished table to one worker over a channel, and that worker renders and
//! appends one complete block at a time.

mod actor;
mod render;

pub use actor::{Sink, SinkHandle, SinkWorker};
pub use render::ReportBlock;

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by the sink
#[derive(Error, Debug)]
pub enum SinkError {
    #[error("Error resetting output file {path}: {source}")]
    Reset {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Error opening output file {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Error writing output file {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Sink worker is no longer running")]
    Closed,

    #[error("Sink worker failed: {0}")]
    Worker(String),
}
