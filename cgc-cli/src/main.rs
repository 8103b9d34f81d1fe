//! # cgc - Compare Gene Calls
//!
//! Compares normalized gene calls from two or more gene callers and reports
//! the common core, partial matches and each caller's unique calls.
//!
//! ## Usage
//!
//! ```bash
//! # Text report on stdout
//! cgc prodigal.cgc genemark.cgc glimmer.cgc
//!
//! # TSV report and a run log
//! cgc -f tsv -o report.tsv -l run.log prodigal.cgc genemark.cgc
//!
//! # Require both boundaries to agree
//! cgc -m exact prodigal.cgc genemark.cgc
//! ```
//!
//! ## Options
//!
//! - `-o, --output <FILE>`: Report file (default: stdout)
//! - `-l, --log <FILE>`: Run log with skipped records
//! - `-f, --format <FORMAT>`: Report format: text, tsv (default: text)
//! - `-m, --match <POLICY>`: Match policy: start, exact (default: start)
//! - `-q, --quiet`: Suppress the summary and warnings
//! - `-v, --verbose`: More log output (repeatable)
//! - `--dump`: Write every call set and the merged pool to the run log
//!
//! A first argument of `help`, `usage`, `input`, `info` or `detail` prints
//! the matching text instead.

use clap::{Arg, ArgAction, Command};
use cgc_cli::help::{COMPARE_USAGE, Keyword, compare_text};
use cgc_cli::{init_logging, log_level, parse_option};
use cgc_core::config::{CgcConfig, MatchPolicy, ReportFormat};
use cgc_core::constants::MIN_INPUT_FILES;
use cgc_core::engine::{DeferredFile, RunContext};
use cgc_core::*;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::process::ExitCode;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), CgcError> {
    let matches = Command::new("cgc")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Compare gene calls across gene callers")
        .arg(
            Arg::new("files")
                .value_name("FILE")
                .num_args(0..)
                .help("Normalized gene call files, one per caller"),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .value_name("FILE")
                .help("Report file (default: stdout)"),
        )
        .arg(
            Arg::new("log")
                .short('l')
                .long("log")
                .value_name("FILE")
                .help("Run log file"),
        )
        .arg(
            Arg::new("format")
                .short('f')
                .long("format")
                .value_name("FORMAT")
                .help("Report format: text, tsv")
                .default_value("text"),
        )
        .arg(
            Arg::new("match")
                .short('m')
                .long("match")
                .value_name("POLICY")
                .help("Match policy: start, exact")
                .default_value("start"),
        )
        .arg(
            Arg::new("quiet")
                .short('q')
                .long("quiet")
                .action(ArgAction::SetTrue)
                .help("Quiet mode"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(ArgAction::Count)
                .help("More log output"),
        )
        .arg(
            Arg::new("dump")
                .long("dump")
                .action(ArgAction::SetTrue)
                .help("Dump call sets and the merged pool to the run log"),
        )
        .get_matches();

    let files: Vec<String> = matches
        .get_many::<String>("files")
        .map(|values| values.cloned().collect())
        .unwrap_or_default();

    if let Some(keyword) = files.first().and_then(|f| Keyword::from_arg(f)) {
        print!("{}", compare_text(keyword));
        return Ok(());
    }

    let quiet = matches.get_flag("quiet");
    init_logging(log_level(quiet, matches.get_count("verbose")));

    let config = CgcConfig {
        match_policy: parse_option::<MatchPolicy>(&matches, "match")?,
        report_format: parse_option::<ReportFormat>(&matches, "format")?,
        quiet,
        dump_calls: matches.get_flag("dump"),
    };

    let run_log: Option<Box<dyn Write>> = match matches.get_one::<String>("log") {
        Some(path) => Some(Box::new(BufWriter::new(File::create(path)?))),
        None => None,
    };

    if files.len() < MIN_INPUT_FILES {
        print!("{COMPARE_USAGE}");
        if let Some(mut log) = run_log {
            writeln!(log, "Incorrect number of command-line arguments provided")?;
            log.flush()?;
        }
        return Ok(());
    }

    let report: Box<dyn Write> = if let Some(output_file) = matches.get_one::<String>("output") {
        Box::new(DeferredFile::new(output_file))
    } else {
        Box::new(BufWriter::new(io::stdout()))
    };
    let mut ctx = RunContext::new(report);
    if let Some(log) = run_log {
        ctx = ctx.with_run_log(log);
    }

    let analyzer = CgcAnalyzer::new(config);
    let summary = analyzer.compare_files(&files, &mut ctx)?;

    if !analyzer.config.quiet {
        eprintln!("Comparison complete! {summary}");
    }

    Ok(())
}
