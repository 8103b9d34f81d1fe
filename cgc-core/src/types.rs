use std::fmt;

use bio::bio_types::strand::ReqStrand;
use regex::Regex;
use std::sync::LazyLock;
use thiserror::Error;

use crate::constants::UNKNOWN_CONTIG;

static PRODIGAL_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)prodigal").expect("valid regex"));
static GENEMARK_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)genemark").expect("valid regex"));
static GLIMMER_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)glim+er").expect("valid regex"));
static RAST_NAME: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)rast").expect("valid regex"));
static PHATE_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)phate").expect("valid regex"));

/// Gene-calling programs whose output can be reconciled.
///
/// The caller is resolved once from free text (a command-line argument or the
/// header line of a normalized file) and then carried as a value.
///
/// # Examples
///
/// ```rust
/// use cgc_core::types::GeneCaller;
///
/// assert_eq!(GeneCaller::from_name("GeneMarkS"), GeneCaller::GeneMark);
/// assert_eq!(GeneCaller::from_name("glimer3"), GeneCaller::Glimmer);
/// assert_eq!(GeneCaller::from_name("augustus"), GeneCaller::Unknown);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum GeneCaller {
    /// Prodigal (`.sco` or `.gff` output)
    Prodigal,
    /// GeneMark / GeneMarkS (`.lst` output)
    GeneMark,
    /// Glimmer2 or Glimmer3 (`.coord` / `.coords` output)
    Glimmer,
    /// RAST annotation server (GFF3 output)
    Rast,
    /// PhATE pipeline (tab-delimited start/end/strand)
    Phate,
    /// Anything not recognized above
    #[default]
    Unknown,
}

impl GeneCaller {
    /// All callers that have a normalizer.
    pub const SUPPORTED: [Self; 5] = [
        Self::Prodigal,
        Self::GeneMark,
        Self::Glimmer,
        Self::Rast,
        Self::Phate,
    ];

    /// Resolve a caller from a free-text name, case-insensitively.
    ///
    /// The name only has to contain the caller's name, so `"prodigal.v2.6"` and
    /// `"GeneMarkS"` resolve as expected.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        if GENEMARK_NAME.is_match(name) {
            Self::GeneMark
        } else if GLIMMER_NAME.is_match(name) {
            Self::Glimmer
        } else if PRODIGAL_NAME.is_match(name) {
            Self::Prodigal
        } else if RAST_NAME.is_match(name) {
            Self::Rast
        } else if PHATE_NAME.is_match(name) {
            Self::Phate
        } else {
            Self::Unknown
        }
    }
}

impl fmt::Display for GeneCaller {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Prodigal => write!(f, "Prodigal"),
            Self::GeneMark => write!(f, "GeneMark"),
            Self::Glimmer => write!(f, "Glimmer"),
            Self::Rast => write!(f, "RAST"),
            Self::Phate => write!(f, "PhATE"),
            Self::Unknown => write!(f, "Unknown"),
        }
    }
}

/// Parse a strand column. Only `+` and `-` are accepted.
pub fn parse_strand(field: &str) -> Result<ReqStrand, CgcError> {
    match field {
        "+" => Ok(ReqStrand::Forward),
        "-" => Ok(ReqStrand::Reverse),
        other => Err(CgcError::InvalidStrand(other.to_string())),
    }
}

/// Symbol written for a strand in records and reports
#[must_use]
pub const fn strand_symbol(strand: ReqStrand) -> char {
    match strand {
        ReqStrand::Forward => '+',
        ReqStrand::Reverse => '-',
    }
}

/// One predicted gene from one caller.
///
/// Coordinates are 1-based and inclusive with `left_end <= right_end` on both
/// strands; the strand only records the reading direction. The length is
/// always derived from the coordinates.
///
/// # Examples
///
/// ```rust
/// use bio::bio_types::strand::ReqStrand;
/// use cgc_core::types::{GeneCall, GeneCaller};
///
/// let call = GeneCall::new(GeneCaller::Glimmer, "3", "c1", ReqStrand::Reverse, 2801, 3733)?;
/// assert_eq!(call.length(), 933);
/// assert_eq!(call.start(), 3733);
/// assert_eq!(call.stop(), 2801);
/// # Ok::<(), cgc_core::types::CgcError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneCall {
    gene_caller: GeneCaller,
    gene_number: String,
    contig: String,
    strand: ReqStrand,
    left_end: u64,
    right_end: u64,
}

impl GeneCall {
    /// Create a call, checking the coordinate invariants.
    ///
    /// An empty contig is replaced by [`UNKNOWN_CONTIG`].
    ///
    /// # Errors
    ///
    /// [`CgcError::InvalidCoordinates`] for a zero coordinate or
    /// `left_end > right_end`.
    pub fn new(
        gene_caller: GeneCaller,
        gene_number: impl Into<String>,
        contig: impl Into<String>,
        strand: ReqStrand,
        left_end: u64,
        right_end: u64,
    ) -> Result<Self, CgcError> {
        if left_end == 0 || left_end > right_end {
            return Err(CgcError::InvalidCoordinates {
                left: left_end,
                right: right_end,
            });
        }
        let contig = contig.into();
        Ok(Self {
            gene_caller,
            gene_number: gene_number.into(),
            contig: if contig.is_empty() {
                UNKNOWN_CONTIG.to_string()
            } else {
                contig
            },
            strand,
            left_end,
            right_end,
        })
    }

    #[must_use]
    pub const fn gene_caller(&self) -> GeneCaller {
        self.gene_caller
    }

    #[must_use]
    pub fn gene_number(&self) -> &str {
        &self.gene_number
    }

    #[must_use]
    pub fn contig(&self) -> &str {
        &self.contig
    }

    #[must_use]
    pub const fn strand(&self) -> ReqStrand {
        self.strand
    }

    #[must_use]
    pub const fn left_end(&self) -> u64 {
        self.left_end
    }

    #[must_use]
    pub const fn right_end(&self) -> u64 {
        self.right_end
    }

    /// Length in base pairs, `right_end - left_end + 1`.
    #[must_use]
    pub const fn length(&self) -> u64 {
        self.right_end - self.left_end + 1
    }

    /// Strand-dependent translation start: `left_end` on `+`, `right_end` on `-`.
    #[must_use]
    pub const fn start(&self) -> u64 {
        match self.strand {
            ReqStrand::Forward => self.left_end,
            ReqStrand::Reverse => self.right_end,
        }
    }

    /// Boundary opposite the start (the stop codon end).
    #[must_use]
    pub const fn stop(&self) -> u64 {
        match self.strand {
            ReqStrand::Forward => self.right_end,
            ReqStrand::Reverse => self.left_end,
        }
    }

    pub(crate) fn set_gene_caller(&mut self, gene_caller: GeneCaller) {
        self.gene_caller = gene_caller;
    }

    /// Whether both boundaries agree with `other`
    #[must_use]
    pub fn same_boundaries(&self, other: &Self) -> bool {
        self.left_end == other.left_end && self.right_end == other.right_end
    }
}

impl fmt::Display for GeneCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}\t{}\t{}\t{}\t{}\t{}",
            self.gene_number,
            strand_symbol(self.strand),
            self.left_end,
            self.right_end,
            self.length(),
            self.contig
        )
    }
}

/// A data line that could not be turned into a [`GeneCall`].
#[derive(Debug)]
pub struct SkippedRecord {
    /// 1-based line number in the input stream
    pub line_number: usize,
    /// The offending line, without its line terminator
    pub line: String,
    /// Why the line was rejected
    pub reason: CgcError,
}

impl fmt::Display for SkippedRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "line {}: {} [{}]",
            self.line_number, self.reason, self.line
        )
    }
}

/// Error types that can occur while normalizing or comparing gene calls
#[derive(Error, Debug)]
pub enum CgcError {
    /// File I/O operation failed
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    /// Generic parse failure
    #[error("Parse error: {0}")]
    ParseError(String),
    /// Strand column is not `+` or `-`
    #[error("Invalid strand: '{0}'")]
    InvalidStrand(String),
    /// A coordinate column is not a positive integer
    #[error("Invalid coordinate: '{0}'")]
    InvalidCoordinate(String),
    /// Coordinates are zero or out of order
    #[error("Invalid coordinates: left end {left} exceeds right end {right} or is zero")]
    InvalidCoordinates { left: u64, right: u64 },
    /// Data line has the wrong number of tab-separated fields
    #[error("Expected {expected} tab-separated fields, found {found}")]
    FieldCount { expected: usize, found: usize },
    /// The same caller was merged into a comparison twice
    #[error("Gene caller '{0}' was already merged into this comparison")]
    DuplicateCaller(String),
    /// A record line holds bytes that are not UTF-8
    #[error("Line is not valid UTF-8")]
    InvalidEncoding,
    /// No normalizer exists for the named caller
    #[error("Cannot process unknown gene caller output: '{0}'")]
    UnsupportedCaller(String),
}
