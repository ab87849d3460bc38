//! CLI argument parsing
//!
//! Grammar:
//! ```text
//! letterfreq [options] <n> <file1> <file2> ... <filen> <output>
//!
//! OPTIONS:
//!   --config <path>     TOML configuration file
//!   --max-tasks <k>     Count at most k files at once (0 = no cap)
//!   --json              Print the run summary as JSON
//!   --verbose, -v       Debug diagnostics
//!   --quiet, -q         Errors only
//!   --version, -V       Show version
//!   --help, -h          Show help
//!   --                  Everything after is positional
//! ```

use std::path::PathBuf;

use crate::cli::{Error, Result};

/// Parsed CLI arguments
#[derive(Debug, Clone, PartialEq)]
pub struct Args {
    /// Inputs and output (None only with --help / --version)
    pub job: Option<Job>,

    /// Configuration file
    pub config: Option<PathBuf>,

    /// Task cap from --max-tasks (overrides config)
    pub max_tasks: Option<usize>,

    /// JSON summary flag
    pub json_output: bool,

    pub verbose: bool,

    pub quiet: bool,

    /// Show version and exit
    pub show_version: bool,

    /// Show help and exit
    pub show_help: bool,
}

/// The files to count and where to write the report
#[derive(Debug, Clone, PartialEq)]
pub struct Job {
    pub inputs: Vec<PathBuf>,
    pub output: PathBuf,
}

/// Usage text shown with argument errors
pub fn usage(program: &str) -> String {
    format!(
        "Usage:\n{} n file1.txt file2.txt ... filen.txt results.txt",
        program
    )
}

/// Parse CLI arguments from std::env::args()
pub fn parse_args<I: IntoIterator<Item = String>>(args: I) -> Result<Args> {
    let mut iter = args.into_iter();
    let _program = iter.next(); // Skip program name

    let mut args_out = Args {
        job: None,
        config: None,
        max_tasks: None,
        json_output: false,
        verbose: false,
        quiet: false,
        show_version: false,
        show_help: false,
    };

    let mut positional = Vec::new();

    // First pass: collect flags and positional args
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--version" | "-V" => {
                args_out.show_version = true;
            }
            "--help" | "-h" => {
                args_out.show_help = true;
            }
            "--json" => {
                args_out.json_output = true;
            }
            "--verbose" | "-v" => {
                args_out.verbose = true;
            }
            "--quiet" | "-q" => {
                args_out.quiet = true;
            }
            "--config" => {
                let path = iter.next().ok_or_else(|| {
                    Error::InvalidArgs("--config requires a path".to_string())
                })?;
                args_out.config = Some(PathBuf::from(path));
            }
            "--max-tasks" => {
                let value = iter.next().ok_or_else(|| {
                    Error::InvalidArgs("--max-tasks requires a number".to_string())
                })?;
                let n = value.parse::<usize>().map_err(|_| {
                    Error::InvalidArgs(format!("--max-tasks expects a number, got '{}'", value))
                })?;
                args_out.max_tasks = Some(n);
            }
            "--" => {
                positional.extend(iter.by_ref());
            }
            other if other.starts_with("--") => {
                return Err(Error::InvalidArgs(format!("Unknown option: {}", other)));
            }
            other => {
                positional.push(other.to_string());
            }
        }
    }

    if args_out.verbose && args_out.quiet {
        return Err(Error::InvalidArgs(
            "--verbose and --quiet are mutually exclusive".to_string(),
        ));
    }

    if args_out.show_help || args_out.show_version {
        return Ok(args_out);
    }

    // Second pass: n, the inputs, then the output
    args_out.job = Some(parse_job(positional)?);
    Ok(args_out)
}

fn parse_job(positional: Vec<String>) -> Result<Job> {
    let mut iter = positional.into_iter();
    let count_arg = iter.next().ok_or(Error::MissingArguments)?;

    let expected = match count_arg.parse::<i64>() {
        Ok(n) if n >= 1 => n as usize,
        _ => return Err(Error::InvalidCount(count_arg)),
    };

    let mut rest: Vec<PathBuf> = iter.map(PathBuf::from).collect();
    // The last positional is the output; everything before it is an input
    let output = rest.pop();
    let got = rest.len();

    match output {
        Some(output) if got == expected => Ok(Job {
            inputs: rest,
            output,
        }),
        Some(_) if got > expected => Err(Error::TooManyFiles { expected, got }),
        _ => Err(Error::NotEnoughFiles { expected, got }),
    }
}
