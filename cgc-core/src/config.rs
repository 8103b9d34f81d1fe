//! Run configuration for comparison and normalization.
//!
//! Sub-format choices (which Glimmer release, which Prodigal file) and the
//! comparison settings are plain values passed to the component that needs
//! them.

use std::fmt;
use std::str::FromStr;

use crate::types::CgcError;

/// How two calls from different callers are judged to be the same gene.
///
/// # Examples
///
/// ```rust
/// use cgc_core::config::MatchPolicy;
///
/// let policy: MatchPolicy = "exact".parse()?;
/// assert_eq!(policy, MatchPolicy::ExactBoundaries);
/// assert_eq!(MatchPolicy::default(), MatchPolicy::StartCodon);
/// # Ok::<(), cgc_core::types::CgcError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatchPolicy {
    /// Same contig, same strand and the same translation start.
    ///
    /// The start is `left_end` on the `+` strand and `right_end` on the `-`
    /// strand. Callers often disagree on the stop end, so it is not compared.
    #[default]
    StartCodon,

    /// Same contig, same strand and both boundaries equal.
    ExactBoundaries,
}

impl fmt::Display for MatchPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::StartCodon => write!(f, "start-codon"),
            Self::ExactBoundaries => write!(f, "exact-boundaries"),
        }
    }
}

impl FromStr for MatchPolicy {
    type Err = CgcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "start" | "start-codon" => Ok(Self::StartCodon),
            "exact" | "exact-boundaries" => Ok(Self::ExactBoundaries),
            other => Err(CgcError::ParseError(format!("unknown match policy '{other}'"))),
        }
    }
}

/// Report layouts produced by [`crate::output::write_report`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportFormat {
    /// Sectioned, human-readable report.
    ///
    /// Common core, then partial groups, then each caller's unique calls in
    /// the normalized record layout.
    #[default]
    Text,

    /// One tab-separated row per call, with its locus class.
    ///
    /// Easy to load into a spreadsheet or data frame.
    Tsv,
}

impl FromStr for ReportFormat {
    type Err = CgcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" | "txt" => Ok(Self::Text),
            "tsv" => Ok(Self::Tsv),
            other => Err(CgcError::ParseError(format!("unknown report format '{other}'"))),
        }
    }
}

/// Configuration for a comparison run.
///
/// # Examples
///
/// ```rust
/// use cgc_core::config::{CgcConfig, MatchPolicy, ReportFormat};
///
/// let config = CgcConfig {
///     match_policy: MatchPolicy::ExactBoundaries,
///     report_format: ReportFormat::Tsv,
///     ..Default::default()
/// };
/// assert!(!config.quiet);
/// ```
#[derive(Debug, Clone, Default)]
pub struct CgcConfig {
    /// Rule used to decide that two calls are the same gene.
    ///
    /// **Default**: [`MatchPolicy::StartCodon`]
    pub match_policy: MatchPolicy,

    /// Layout of the written report.
    ///
    /// **Default**: [`ReportFormat::Text`]
    pub report_format: ReportFormat,

    /// Suppress the run summary on stderr.
    ///
    /// **Default**: `false`
    pub quiet: bool,

    /// Dump every sorted call set and the merged pool to the run log.
    ///
    /// **Default**: `false`
    pub dump_calls: bool,
}

/// Which Glimmer release produced the coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GlimmerVersion {
    /// Glimmer2 `.g2.coord` file; stops are 3 bp short
    Glimmer2,
    /// Glimmer3 `run3.coords` file
    #[default]
    Glimmer3,
}

impl FromStr for GlimmerVersion {
    type Err = CgcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().trim_start_matches("glimmer") {
            "2" => Ok(Self::Glimmer2),
            "3" => Ok(Self::Glimmer3),
            other => Err(CgcError::ParseError(format!("unknown Glimmer version '{other}'"))),
        }
    }
}

/// Which Prodigal output file is being read
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProdigalFormat {
    /// `genes.sco` simple coordinate output
    #[default]
    Sco,
    /// `genes.gff` GFF output
    Gff,
}

impl FromStr for ProdigalFormat {
    type Err = CgcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "sco" => Ok(Self::Sco),
            "gff" | "gff3" => Ok(Self::Gff),
            other => Err(CgcError::ParseError(format!("unknown Prodigal format '{other}'"))),
        }
    }
}

/// Which RAST export is being read
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RastFormat {
    /// GFF3 export, the only one supported
    #[default]
    Gff3,
}

/// Sub-format selection for the raw-output normalizers.
#[derive(Debug, Clone, Copy, Default)]
pub struct NormalizerConfig {
    /// **Default**: [`GlimmerVersion::Glimmer3`]
    pub glimmer: GlimmerVersion,
    /// **Default**: [`ProdigalFormat::Sco`]
    pub prodigal: ProdigalFormat,
    /// **Default**: [`RastFormat::Gff3`]
    pub rast: RastFormat,
}
