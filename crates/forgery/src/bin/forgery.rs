//! Template rendering CLI.
//!
//! This binary delegates to `forgery::template_cli` for parsing and
//! rendering, keeping the CLI behaviour testable without spawning a process.
//! Diagnostics go to stderr, filtered by `RUST_LOG`.

use std::env;
use std::io::{self, Write};
use std::process::ExitCode;

use forgery::template_cli::{CliError, ParseOutcome, parse_args, render};
use tracing_subscriber::{EnvFilter, fmt};

fn main() -> ExitCode {
    if let Err(err) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .try_init()
    {
        drop(err);
    }

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            if let Err(write_err) = writeln!(io::stderr().lock(), "{err}") {
                drop(write_err);
            }
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), CliError> {
    match parse_args(env::args().skip(1))? {
        ParseOutcome::Help => {
            print_usage(io::stdout().lock());
            Ok(())
        }
        ParseOutcome::Options(options) => {
            let lines = render(&options)?;
            write_lines(&lines);
            Ok(())
        }
    }
}

fn print_usage(mut out: impl Write) {
    let usage = concat!(
        "Usage: forgery [options] <template>\n",
        "\n",
        "Renders <template>, replacing each {{ format }} token with fake data.\n",
        "\n",
        "Options:\n",
        "  --seed <n>        RNG seed value (defaults to random)\n",
        "  --count <n>       Number of lines to render (defaults to 1)\n",
        "  --config <path>   Path to a generator config JSON file\n",
        "  -h, --help        Print this help output\n",
    );
    if let Err(err) = out.write_all(usage.as_bytes()) {
        drop(err);
    }
}

fn write_lines(lines: &[String]) {
    let mut out = io::stdout().lock();
    for line in lines {
        if let Err(err) = writeln!(out, "{line}") {
            drop(err);
            return;
        }
    }
}
