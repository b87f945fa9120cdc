// rextract/src/main.rs
//! rextract entry point.
//!
//! Reads a file (or stdin), runs either an ad hoc pattern or a YAML query
//! configuration through `rextract-core`, and prints the extracted value(s).
//! Exit status: 0 on a match, 1 when nothing was selected, 2 on errors.

mod cli;

use std::io::Read;
use std::process::ExitCode;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use log::{debug, info};

use rextract_core::{
    extract_selection, ExtractionEngine, ExtractionMatch, QueryConfig, RegexExtractor,
};

use crate::cli::Cli;

fn main() -> ExitCode {
    let args = Cli::parse();
    init_logger(&args);

    match run(&args) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => {
            info!("no occurrence selected");
            ExitCode::from(1)
        }
        Err(e) => {
            eprintln!("rextract: {e:#}");
            ExitCode::from(2)
        }
    }
}

fn init_logger(args: &Cli) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if args.quiet {
        builder.filter_level(log::LevelFilter::Off);
    } else if args.debug {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.format_timestamp(None).init();
}

/// Returns `Ok(true)` when at least one value was extracted and printed.
fn run(args: &Cli) -> Result<bool> {
    let (raw, source_id) = read_input(args)?;
    debug!("read {} bytes from {}", raw.len(), source_id);

    match (&args.pattern, &args.config) {
        (Some(pattern), None) => run_ad_hoc(args, pattern, &raw, &source_id),
        (None, Some(config_path)) => {
            let config = QueryConfig::load_from_file(config_path)?;
            run_configured(args, config, &raw, &source_id)
        }
        (Some(_), Some(_)) => Err(anyhow!("--pattern and --config are mutually exclusive")),
        (None, None) => Err(anyhow!("either --pattern or --config is required")),
    }
}

fn read_input(args: &Cli) -> Result<(Vec<u8>, String)> {
    match &args.file {
        Some(path) => {
            let raw = std::fs::read(path)
                .with_context(|| format!("Failed to read input file {}", path.display()))?;
            Ok((raw, path.display().to_string()))
        }
        None => {
            let mut raw = Vec::new();
            std::io::stdin()
                .read_to_end(&mut raw)
                .context("Failed to read from stdin")?;
            Ok((raw, "<stdin>".to_string()))
        }
    }
}

fn run_ad_hoc(args: &Cli, pattern: &str, raw: &[u8], source_id: &str) -> Result<bool> {
    let selection = extract_selection(
        raw,
        pattern,
        &args.encoding,
        args.start_occurrence,
        args.end_occurrence,
        &args.output,
    )?;
    let Some(selection) = selection else {
        return Ok(false);
    };

    if args.json {
        let record = ExtractionMatch {
            query_name: "<ad hoc>".to_string(),
            value: selection.value,
            whole_match: selection.whole_match,
            line_number: selection.line_number,
            occurrence: selection.occurrence,
            source_id: source_id.to_string(),
            timestamp: None,
        };
        println!("{}", serde_json::to_string_pretty(&record)?);
    } else {
        print_value(&selection.value);
    }
    Ok(true)
}

fn run_configured(args: &Cli, config: QueryConfig, raw: &[u8], source_id: &str) -> Result<bool> {
    let engine = RegexExtractor::new(config)?;

    let matches: Vec<ExtractionMatch> = match &args.query {
        Some(name) => engine.extract_one(raw, source_id, name)?.into_iter().collect(),
        None => engine.extract_all(raw, source_id)?,
    };
    if matches.is_empty() {
        return Ok(false);
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&matches)?);
    } else {
        for m in &matches {
            if args.query.is_some() {
                print_value(&m.value);
            } else {
                print!("{}: ", m.query_name);
                print_value(&m.value);
            }
        }
    }
    Ok(true)
}

/// Prints a value followed by exactly one newline. Values produced from an
/// empty template keep their own terminator; do not add a second one.
fn print_value(value: &str) {
    if value.ends_with('\n') {
        print!("{value}");
    } else {
        println!("{value}");
    }
}
