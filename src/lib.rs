//! letterfreq: concurrent per-file letter frequency reports
//!
//! Each input file is counted by its own task. Finished tables go to a
//! single writer that appends one report block per file to the output, and
//! the run completes only once every task has finished.

pub mod cli;
pub mod config;
pub mod dispatcher;
pub mod frequency;
pub mod logging;
pub mod sink;

pub use config::Config;
pub use dispatcher::{DispatchOptions, Dispatcher, FailureKind, Summary};
pub use frequency::{count_file, CountError, FrequencyTable};
pub use sink::{ReportBlock, Sink, SinkError, SinkHandle, SinkWorker};
