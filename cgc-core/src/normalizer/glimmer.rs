use std::sync::LazyLock;

use bio::bio_types::strand::ReqStrand;
use regex::Regex;

use crate::config::GlimmerVersion;
use crate::constants::{GLIMMER2_STOP_ADJUSTMENT, UNKNOWN_CONTIG};
use crate::types::{CgcError, GeneCall, GeneCaller, parse_strand};

use super::{Normalizer, capture_str, capture_u64};

static GLIMMER3_GENE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"orf(\d+)\s+(\d+)\s+(\d+)\s+([+-])\d").expect("valid regex")
});
static GLIMMER2_GENE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\s*(\d+)\s+(\d+)\s+(\d+)\s+\[([+-])\d\sL=\s*\d+\sr=.*\]").expect("valid regex")
});
static GLIMMER3_CONTIG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^>(\S+)").expect("valid regex"));

/// Glimmer2 `.coord` and Glimmer3 `.predict` output.
///
/// Glimmer lists reverse-strand genes start first, so their columns are
/// swapped. Glimmer2 stop coordinates exclude the stop codon and are
/// extended by three bases.
#[derive(Debug)]
pub struct GlimmerNormalizer {
    version: GlimmerVersion,
    contig: String,
}

impl GlimmerNormalizer {
    #[must_use]
    pub fn new(version: GlimmerVersion) -> Self {
        Self {
            version,
            contig: UNKNOWN_CONTIG.to_string(),
        }
    }

    fn gene_pattern(&self) -> &'static Regex {
        match self.version {
            GlimmerVersion::Glimmer2 => &*GLIMMER2_GENE,
            GlimmerVersion::Glimmer3 => &*GLIMMER3_GENE,
        }
    }
}

impl Normalizer for GlimmerNormalizer {
    fn gene_caller(&self) -> GeneCaller {
        GeneCaller::Glimmer
    }

    fn normalize_line(&mut self, line: &str) -> Result<Option<GeneCall>, CgcError> {
        if line.starts_with('#') {
            return Ok(None);
        }
        if let Some(captures) = GLIMMER3_CONTIG.captures(line) {
            self.contig = capture_str(&captures, 1).to_string();
            return Ok(None);
        }
        let Some(captures) = self.gene_pattern().captures(line) else {
            return Ok(None);
        };

        // orf00012 becomes gene 12
        let gene_number = capture_u64(&captures, 1)?;
        let first = capture_u64(&captures, 2)?;
        let second = capture_u64(&captures, 3)?;
        let strand = parse_strand(capture_str(&captures, 4))?;
        let adjustment = match self.version {
            GlimmerVersion::Glimmer2 => GLIMMER2_STOP_ADJUSTMENT,
            GlimmerVersion::Glimmer3 => 0,
        };

        let invalid = CgcError::InvalidCoordinates {
            left: first.min(second),
            right: first.max(second),
        };
        let (left_end, right_end) = match strand {
            ReqStrand::Forward => (first, second.checked_add(adjustment).ok_or(invalid)?),
            ReqStrand::Reverse => (second.checked_sub(adjustment).ok_or(invalid)?, first),
        };

        GeneCall::new(
            GeneCaller::Glimmer,
            gene_number.to_string(),
            self.contig.as_str(),
            strand,
            left_end,
            right_end,
        )
        .map(Some)
    }
}
