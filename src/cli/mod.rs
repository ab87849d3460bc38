//! CLI module
//!
//! Provides:
//! - Argument parsing (`<n> <file1> ... <filen> <output>` plus options)
//! - Input existence preflight
//! - Dispatch into the concurrent run and deterministic exit codes

pub mod args;
pub mod dispatch;
pub mod preflight;

// Re-exports
pub use args::{parse_args, usage, Args, Job};
pub use dispatch::{run_cli_mode, ExitCode};
pub use preflight::check_files;

use std::path::PathBuf;

/// CLI errors
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Not enough command line arguments received")]
    MissingArguments,

    #[error("Invalid number of files specified: {0}")]
    InvalidCount(String),

    #[error("Invalid arguments: {0}")]
    InvalidArgs(String),

    #[error("Too many file names received (expected {expected}, got {got})")]
    TooManyFiles { expected: usize, got: usize },

    #[error("Not enough file names received (expected {expected}, got {got})")]
    NotEnoughFiles { expected: usize, got: usize },

    #[error("File {} does not exist!", .0.display())]
    MissingFile(PathBuf),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Sink(#[from] crate::sink::SinkError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Exit code for this error
    pub fn exit_code(&self) -> ExitCode {
        match self {
            Error::MissingArguments => EXIT_MISSING_ARGS,
            Error::InvalidCount(_) | Error::InvalidArgs(_) => EXIT_INVALID_COUNT,
            Error::TooManyFiles { .. } | Error::NotEnoughFiles { .. } => EXIT_COUNT_MISMATCH,
            Error::MissingFile(_) => EXIT_MISSING_FILE,
            Error::Config(_) => EXIT_CONFIG_ERROR,
            Error::Sink(_) | Error::Io(_) | Error::Serialization(_) => EXIT_RUNTIME_ERROR,
        }
    }

    /// Whether the usage text should accompany this error
    pub fn is_usage(&self) -> bool {
        matches!(
            self,
            Error::MissingArguments
                | Error::InvalidCount(_)
                | Error::InvalidArgs(_)
                | Error::TooManyFiles { .. }
                | Error::NotEnoughFiles { .. }
        )
    }
}

/// Exit codes (deterministic)
pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_MISSING_ARGS: i32 = 1;
pub const EXIT_INVALID_COUNT: i32 = 2;
pub const EXIT_COUNT_MISMATCH: i32 = 3;
pub const EXIT_MISSING_FILE: i32 = 4;
pub const EXIT_CONFIG_ERROR: i32 = 5;
pub const EXIT_RUNTIME_ERROR: i32 = 6;

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, Error>;
