// rextract/src/cli.rs
//! This file defines the command-line interface (CLI) for the rextract
//! application.
//! License: MIT OR Apache-2.0

use clap::Parser;
use std::path::PathBuf;

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(
    name = "rextract",
    version = env!("CARGO_PKG_VERSION"),
    about = "Extract templated values from files with regular expressions",
    long_about = "Rextract scans a file (or stdin) line by line with a regular expression, \
selects a match occurrence by a 1-indexed window, and renders the result through an output \
template: \\0 is the whole match, \\1-\\9 are capture groups, \\\\N is a literal backslash \
and digit, and an empty template returns the whole matching line. Exit status is 0 on a \
match, 1 when nothing was selected, 2 on errors.",
    arg_required_else_help = true,
)]
pub struct Cli {
    /// Path to the input file (reads from stdin if not provided).
    #[arg(value_name = "FILE", help = "Read input from this file instead of stdin.")]
    pub file: Option<PathBuf>,

    /// The regular expression to match against each line.
    #[arg(long, short = 'e', value_name = "PATTERN", help = "The regular expression to match against each line.")]
    pub pattern: Option<String>,

    /// Character encoding of the input (WHATWG label, e.g. iso-8859-5).
    #[arg(long, value_name = "NAME", default_value = "", help = "Character encoding of the input (WHATWG label); UTF-8 if omitted.")]
    pub encoding: String,

    /// First selectable match occurrence (1-indexed, inclusive).
    #[arg(long, value_name = "N", help = "First selectable match occurrence (1-indexed, inclusive).")]
    pub start_occurrence: Option<u64>,

    /// Last selectable match occurrence (1-indexed, inclusive).
    #[arg(long, value_name = "N", help = "Last selectable match occurrence (1-indexed, inclusive).")]
    pub end_occurrence: Option<u64>,

    /// Output template with \N backreferences (empty returns the whole matching line).
    #[arg(long, short = 'o', value_name = "TEMPLATE", default_value = "", help = "Output template with \\N backreferences; empty returns the whole matching line.")]
    pub output: String,

    /// Path to a YAML query configuration file.
    #[arg(long = "config", value_name = "FILE", help = "Path to a YAML query configuration file.")]
    pub config: Option<PathBuf>,

    /// Run only this named query from the configuration.
    #[arg(long, value_name = "NAME", requires = "config", help = "Run only this named query from the configuration.")]
    pub query: Option<String>,

    /// Emit results as JSON records instead of plain values.
    #[arg(long, help = "Emit results as JSON records instead of plain values.")]
    pub json: bool,

    /// Disable informational messages.
    #[arg(long, short = 'q', help = "Suppress all informational and debug messages.")]
    pub quiet: bool,

    /// Enable debug logging (overrides RUST_LOG for this run).
    #[arg(long, short = 'd', help = "Enable debug logging.")]
    pub debug: bool,
}
