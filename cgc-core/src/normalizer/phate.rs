use std::sync::LazyLock;

use bio::bio_types::strand::ReqStrand;
use regex::Regex;

use crate::constants::UNKNOWN_CONTIG;
use crate::types::{CgcError, GeneCall, GeneCaller, parse_strand};

use super::{Normalizer, capture_str, capture_u64};

static PHATE_GENE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+)\t(\d+)\t([+-])").expect("valid regex"));

/// PhATE tab-separated start, end, strand rows. Genes are numbered by row.
#[derive(Debug, Default)]
pub struct PhateNormalizer {
    count: u64,
}

impl PhateNormalizer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Normalizer for PhateNormalizer {
    fn gene_caller(&self) -> GeneCaller {
        GeneCaller::Phate
    }

    fn normalize_line(&mut self, line: &str) -> Result<Option<GeneCall>, CgcError> {
        if line.starts_with('#') {
            return Ok(None);
        }
        let Some(captures) = PHATE_GENE.captures(line) else {
            return Ok(None);
        };
        self.count += 1;

        let start = capture_u64(&captures, 1)?;
        let end = capture_u64(&captures, 2)?;
        let strand = parse_strand(capture_str(&captures, 3))?;
        let (left_end, right_end) = match strand {
            ReqStrand::Forward => (start, end),
            ReqStrand::Reverse => (end, start),
        };

        GeneCall::new(
            GeneCaller::Phate,
            self.count.to_string(),
            UNKNOWN_CONTIG,
            strand,
            left_end,
            right_end,
        )
        .map(Some)
    }
}
