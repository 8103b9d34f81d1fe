use std::sync::LazyLock;

use regex::Regex;

use crate::constants::UNKNOWN_CONTIG;
use crate::types::{CgcError, GeneCall, GeneCaller, parse_strand};

use super::gff::parse_cds_line;
use super::{Normalizer, capture_str, capture_u64};

static SCO_GENE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^>(\d+)_(\d+)_(\d+)_([+-])").expect("valid regex"));
static SCO_SEQUENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^#\s*Sequence Data:.*seqhdr="\s*([^"\s]+)"#).expect("valid regex")
});

/// Prodigal `.sco` output (`>N_left_right_strand` lines).
///
/// The contig is taken from the `seqhdr` of the preceding `# Sequence Data`
/// comment when present, otherwise it is `unknown`.
#[derive(Debug)]
pub struct ProdigalScoNormalizer {
    contig: String,
}

impl Default for ProdigalScoNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl ProdigalScoNormalizer {
    #[must_use]
    pub fn new() -> Self {
        Self {
            contig: UNKNOWN_CONTIG.to_string(),
        }
    }
}

impl Normalizer for ProdigalScoNormalizer {
    fn gene_caller(&self) -> GeneCaller {
        GeneCaller::Prodigal
    }

    fn normalize_line(&mut self, line: &str) -> Result<Option<GeneCall>, CgcError> {
        if let Some(captures) = SCO_SEQUENCE.captures(line) {
            self.contig = capture_str(&captures, 1).to_string();
            return Ok(None);
        }
        if line.starts_with('#') {
            return Ok(None);
        }
        let Some(captures) = SCO_GENE.captures(line) else {
            return Ok(None);
        };

        GeneCall::new(
            GeneCaller::Prodigal,
            capture_str(&captures, 1),
            self.contig.as_str(),
            parse_strand(capture_str(&captures, 4))?,
            capture_u64(&captures, 2)?,
            capture_u64(&captures, 3)?,
        )
        .map(Some)
    }
}

/// Prodigal GFF output. Genes are numbered by CDS order.
#[derive(Debug, Default)]
pub struct ProdigalGffNormalizer {
    count: u64,
}

impl ProdigalGffNormalizer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Normalizer for ProdigalGffNormalizer {
    fn gene_caller(&self) -> GeneCaller {
        GeneCaller::Prodigal
    }

    fn normalize_line(&mut self, line: &str) -> Result<Option<GeneCall>, CgcError> {
        let Some(feature) = parse_cds_line(line)? else {
            return Ok(None);
        };
        self.count += 1;
        feature.into_call(GeneCaller::Prodigal, self.count).map(Some)
    }
}
