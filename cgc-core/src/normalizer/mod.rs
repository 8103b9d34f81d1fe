//! Conversion of raw gene-caller output into the normalized record format.
//!
//! Each supported caller has one [`Normalizer`] implementation, chosen once
//! by [`normalizer_for`]. The normalizer sees the raw file line by line and
//! yields a [`GeneCall`] for every gene record; [`normalize`] wraps the
//! records in the header and `# END` trailer of the normalized format.
//!
//! | Caller   | Input                          | Gene number      | Contig                    |
//! |----------|--------------------------------|------------------|---------------------------|
//! | GeneMark | `.lst` table                   | column 1         | `FASTA definition line`   |
//! | Glimmer  | Glimmer2 `.coord`, Glimmer3 `.predict` | `orf` id / column 1 | `>` header (Glimmer3) |
//! | Prodigal | `.sco` or `.gff`               | `>N_` / CDS count | `seqhdr` / GFF column 1  |
//! | RAST     | GFF3 export                    | CDS count        | GFF column 1              |
//! | PhATE    | start, end, strand columns     | row count        | `unknown`                 |
//!
//! # Examples
//!
//! ```rust
//! use cgc_core::config::NormalizerConfig;
//! use cgc_core::normalizer::normalize;
//!
//! let raw = "100\t400\t+\n900\t610\t-\n";
//! let mut out = Vec::new();
//! let outcome = normalize(raw.as_bytes(), &mut out, "phate", "phate.tsv", &NormalizerConfig::default())?;
//!
//! assert_eq!(outcome.calls, 2);
//! let text = String::from_utf8(out).unwrap();
//! assert!(text.contains("2\t-\t610\t900\t291\tunknown\n"));
//! assert!(text.ends_with("# END\n"));
//! # Ok::<(), cgc_core::types::CgcError>(())
//! ```

mod genemark;
mod gff;
mod glimmer;
mod phate;
mod prodigal;
mod rast;

pub use genemark::GeneMarkNormalizer;
pub use glimmer::GlimmerNormalizer;
pub use phate::PhateNormalizer;
pub use prodigal::{ProdigalGffNormalizer, ProdigalScoNormalizer};
pub use rast::RastNormalizer;

use std::io::{BufRead, Write};

use log::{debug, info, warn};
use regex::Captures;

use crate::config::{NormalizerConfig, ProdigalFormat};
use crate::record::{input_lines, write_end, write_header, write_record};
use crate::types::{CgcError, GeneCall, GeneCaller, SkippedRecord};

/// Line-by-line parser for one caller's raw output.
pub trait Normalizer {
    /// The caller whose output this parses
    fn gene_caller(&self) -> GeneCaller;

    /// Consume one raw line.
    ///
    /// Returns `Ok(Some(call))` for a gene record and `Ok(None)` for comments,
    /// contig headers and any other line that is not a record. A line that
    /// looks like a record but cannot become a valid call is an error.
    fn normalize_line(&mut self, line: &str) -> Result<Option<GeneCall>, CgcError>;
}

/// Select the normalizer for `caller`.
///
/// # Errors
///
/// [`CgcError::UnsupportedCaller`] for [`GeneCaller::Unknown`].
pub fn normalizer_for(
    caller: GeneCaller,
    config: &NormalizerConfig,
) -> Result<Box<dyn Normalizer>, CgcError> {
    let normalizer: Box<dyn Normalizer> = match caller {
        GeneCaller::GeneMark => Box::new(GeneMarkNormalizer::new()),
        GeneCaller::Glimmer => Box::new(GlimmerNormalizer::new(config.glimmer)),
        GeneCaller::Prodigal => match config.prodigal {
            ProdigalFormat::Sco => Box::new(ProdigalScoNormalizer::new()),
            ProdigalFormat::Gff => Box::new(ProdigalGffNormalizer::new()),
        },
        GeneCaller::Rast => Box::new(RastNormalizer::new(config.rast)),
        GeneCaller::Phate => Box::new(PhateNormalizer::new()),
        GeneCaller::Unknown => {
            return Err(CgcError::UnsupportedCaller(caller.to_string()));
        }
    };
    Ok(normalizer)
}

/// Result of normalizing one raw file
#[derive(Debug, Default)]
pub struct NormalizeOutcome {
    /// Records written
    pub calls: usize,
    /// Record-like lines that could not be converted
    pub skipped: Vec<SkippedRecord>,
}

/// Normalize a raw caller output stream.
///
/// `caller_name` is written to the header verbatim and also decides which
/// normalizer runs. `source_file` is only recorded in the header.
///
/// # Errors
///
/// - [`CgcError::UnsupportedCaller`] if `caller_name` names no known caller;
///   nothing is written in that case
/// - [`CgcError::IoError`] if reading or writing fails
pub fn normalize<R: BufRead, W: Write>(
    reader: R,
    writer: &mut W,
    caller_name: &str,
    source_file: &str,
    config: &NormalizerConfig,
) -> Result<NormalizeOutcome, CgcError> {
    let caller = GeneCaller::from_name(caller_name);
    if caller == GeneCaller::Unknown {
        return Err(CgcError::UnsupportedCaller(caller_name.to_string()));
    }
    let mut normalizer = normalizer_for(caller, config)?;
    debug!("Normalizing {source_file} as {caller} output");

    write_header(writer, caller_name, source_file)?;
    let mut outcome = NormalizeOutcome::default();
    for line in input_lines(reader) {
        let line = line?;
        let result = match normalizer.normalize_line(&line.text) {
            Ok(Some(_)) | Err(_) if !line.valid_utf8 => Err(CgcError::InvalidEncoding),
            result => result,
        };
        match result {
            Ok(Some(call)) => {
                write_record(writer, &call)?;
                outcome.calls += 1;
            }
            Ok(None) => {}
            Err(reason) => {
                warn!(
                    "Skipping {} record at line {}: {}",
                    caller, line.number, reason
                );
                outcome.skipped.push(SkippedRecord {
                    line_number: line.number,
                    line: line.text,
                    reason,
                });
            }
        }
    }
    write_end(writer)?;

    info!(
        "Normalized {} {} calls from {} ({} skipped)",
        outcome.calls,
        caller,
        source_file,
        outcome.skipped.len()
    );
    Ok(outcome)
}

/// Numeric capture group as a coordinate or count.
fn capture_u64(captures: &Captures<'_>, group: usize) -> Result<u64, CgcError> {
    let text = captures.get(group).map_or("", |m| m.as_str());
    text.parse::<u64>()
        .map_err(|_| CgcError::InvalidCoordinate(text.to_string()))
}

/// Capture group as text, empty if it did not participate.
fn capture_str<'t>(captures: &Captures<'t>, group: usize) -> &'t str {
    captures.get(group).map_or("", |m| m.as_str())
}
