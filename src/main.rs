//! letterfreq CLI
//!
//! `letterfreq <n> <file1> ... <filen> <output>` counts letters in every
//! input concurrently and appends one report block per file to `<output>`.

use letterfreq::cli::{parse_args, run_cli_mode, usage};

fn main() {
    // Parse CLI arguments
    let args: Vec<String> = std::env::args().collect();
    let program = args
        .first()
        .cloned()
        .unwrap_or_else(|| env!("CARGO_PKG_NAME").to_string());

    let parsed = match parse_args(args) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("{}", e);
            if e.is_usage() {
                println!("{}", usage(&program));
            }
            std::process::exit(e.exit_code());
        }
    };

    // Handle --version flag
    if parsed.show_version {
        println!("letterfreq v{}", env!("CARGO_PKG_VERSION"));
        return;
    }

    // Handle --help flag
    if parsed.show_help {
        print_help(&program);
        return;
    }

    std::process::exit(run_cli_mode(parsed));
}

fn print_help(program: &str) {
    println!("letterfreq — per-file letter frequency reports");
    println!();
    println!("{}", usage(program));
    println!();
    println!("OPTIONS:");
    println!("  --config <path>     TOML configuration file");
    println!("  --max-tasks <k>     Count at most k files at once (0 = no cap)");
    println!("  --json              Print the run summary as JSON");
    println!("  -v, --verbose       Debug diagnostics on stderr");
    println!("  -q, --quiet         Errors only on stderr");
    println!("  -V, --version       Show version");
    println!("  -h, --help          Show this help");
    println!();
    println!("EXIT CODES:");
    println!("  0  finished (files that could not be read are reported, not fatal)");
    println!("  1  missing arguments");
    println!("  2  invalid file count or option");
    println!("  3  file count does not match the file names given");
    println!("  4  an input file does not exist");
    println!("  5  configuration error");
    println!("  6  output or runtime error");
}
