//! CLI run dispatch
//!
//! Order of operations:
//! 1. Resolve configuration (file, then flags)
//! 2. Install logging
//! 3. Check every input exists (fatal on the first missing one)
//! 4. Reset the output
//! 5. Run the dispatcher to completion and report

use std::io::{self, Write};

use tracing::debug;

use crate::cli::{check_files, Args, Error, Job, Result, EXIT_SUCCESS};
use crate::config::Config;
use crate::dispatcher::{DispatchOptions, Dispatcher, Summary};
use crate::logging;
use crate::sink::Sink;

/// Exit code wrapper for CLI operations
pub type ExitCode = i32;

/// Printed once every task has reached a terminal state
pub const FINISHED_MESSAGE: &str = "All tasks finished! Terminating program";

/// Run a parsed command line and return the exit code
///
/// Called from main() after argument parsing; `--help` and `--version` are
/// handled there.
pub fn run_cli_mode(args: Args) -> ExitCode {
    let config = match resolve_config(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            return e.exit_code();
        }
    };

    if let Err(e) = logging::init(&config.log_level) {
        let e = Error::Config(format!("Invalid log level '{}': {}", config.log_level, e));
        eprintln!("Error: {}", e);
        return e.exit_code();
    }

    let job = match args.job {
        Some(job) => job,
        None => {
            let e = Error::MissingArguments;
            eprintln!("{}", e);
            return e.exit_code();
        }
    };

    match run_job(job, &config) {
        Ok(summary) => match report(&summary, config.json_summary) {
            Ok(()) => EXIT_SUCCESS,
            Err(e) => {
                eprintln!("Error: {}", e);
                e.exit_code()
            }
        },
        Err(e @ Error::MissingFile(_)) => {
            eprintln!("{}", e);
            eprintln!("Execution ending early due to missing files...");
            e.exit_code()
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            e.exit_code()
        }
    }
}

/// Config file values with command-line flags applied on top
pub fn resolve_config(args: &Args) -> Result<Config> {
    let mut config = match &args.config {
        Some(path) => Config::load(path).map_err(|e| Error::Config(format!("{:#}", e)))?,
        None => Config::default(),
    };

    if let Some(n) = args.max_tasks {
        config.max_in_flight = n;
    }
    if args.json_output {
        config.json_summary = true;
    }
    if args.verbose {
        config.log_level = "debug".to_string();
    } else if args.quiet {
        config.log_level = "error".to_string();
    }

    Ok(config)
}

/// Preflight, reset, and run every task to completion
pub fn run_job(job: Job, config: &Config) -> Result<Summary> {
    check_files(&job.inputs)?;

    let sink = Sink::new(&job.output);
    sink.reset()?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .thread_name("letterfreq-worker")
        .build()?;

    let options = DispatchOptions {
        max_in_flight: config.max_in_flight,
    };

    runtime.block_on(async move {
        let (handle, worker) = sink.spawn();
        let dispatcher = Dispatcher::new(handle, options);
        let summary = dispatcher.run(job.inputs).await;

        // Last handle goes with the dispatcher; the worker then drains and exits
        drop(dispatcher);
        let written = worker.join().await?;
        debug!(blocks = written, "Output complete");

        Ok::<Summary, Error>(summary)
    })
}

fn report(summary: &Summary, json: bool) -> Result<()> {
    // Task-local failures always reach stderr, whatever the log filter
    report_failures(summary, &mut io::stderr().lock())?;

    if json {
        println!("{}", serde_json::to_string_pretty(summary)?);
    } else {
        print!("{}", summary);
        println!("{}", FINISHED_MESSAGE);
    }
    Ok(())
}

/// One stderr line per file that produced no block
pub fn report_failures<W: Write>(summary: &Summary, out: &mut W) -> io::Result<()> {
    for failed in &summary.failed {
        writeln!(
            out,
            "Error processing {} [{}]: {}",
            failed.file, failed.kind, failed.message
        )?;
    }
    Ok(())
}
