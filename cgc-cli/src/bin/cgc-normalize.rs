//! # cgc-normalize
//!
//! Converts the output of one gene caller into the normalized record format
//! read by `cgc`.
//!
//! ```bash
//! cgc-normalize prodigal genome.sco prodigal.cgc
//! cgc-normalize --glimmer 2 glimmer genome.g2.coord glimmer.cgc
//! cgc-normalize --prodigal gff prodigal genome.gff > prodigal.cgc
//! ```

use clap::{Arg, ArgAction, Command};
use cgc_cli::help::{Keyword, NORMALIZE_USAGE, normalize_text};
use cgc_cli::{init_logging, log_level, parse_option};
use cgc_core::CgcError;
use cgc_core::config::{GlimmerVersion, NormalizerConfig, ProdigalFormat};
use cgc_core::normalizer::normalize;
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
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
    let matches = Command::new("cgc-normalize")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Convert gene caller output to the common gene call format")
        .arg(
            Arg::new("caller")
                .value_name("CALLER")
                .help("Gene caller name: prodigal, genemark, glimmer, rast, phate"),
        )
        .arg(
            Arg::new("input")
                .value_name("INPUT")
                .help("Output file of the gene caller"),
        )
        .arg(
            Arg::new("output")
                .value_name("OUTPUT")
                .help("Normalized file (default: stdout)"),
        )
        .arg(
            Arg::new("glimmer")
                .long("glimmer")
                .value_name("VERSION")
                .help("Glimmer release: 2, 3")
                .default_value("3"),
        )
        .arg(
            Arg::new("prodigal")
                .long("prodigal")
                .value_name("FORMAT")
                .help("Prodigal output file: sco, gff")
                .default_value("sco"),
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
        .get_matches();

    let caller = matches.get_one::<String>("caller");
    if let Some(keyword) = caller.and_then(|c| Keyword::from_arg(c)) {
        print!("{}", normalize_text(keyword));
        return Ok(());
    }
    let (Some(caller), Some(input)) = (caller, matches.get_one::<String>("input")) else {
        print!("{NORMALIZE_USAGE}");
        return Ok(());
    };

    let quiet = matches.get_flag("quiet");
    init_logging(log_level(quiet, matches.get_count("verbose")));

    let config = NormalizerConfig {
        glimmer: parse_option::<GlimmerVersion>(&matches, "glimmer")?,
        prodigal: parse_option::<ProdigalFormat>(&matches, "prodigal")?,
        ..Default::default()
    };

    let reader = BufReader::new(File::open(input)?);
    let mut writer: Box<dyn Write> = if let Some(output_file) = matches.get_one::<String>("output")
    {
        Box::new(BufWriter::new(File::create(output_file)?))
    } else {
        Box::new(BufWriter::new(io::stdout()))
    };

    let outcome = normalize(reader, &mut writer, &caller.to_lowercase(), input, &config)?;
    writer.flush()?;

    if !quiet {
        eprintln!(
            "Normalization complete! {} calls written, {} records skipped.",
            outcome.calls,
            outcome.skipped.len()
        );
    }
    Ok(())
}
