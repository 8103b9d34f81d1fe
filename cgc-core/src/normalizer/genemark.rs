use std::sync::LazyLock;

use regex::Regex;

use crate::constants::UNKNOWN_CONTIG;
use crate::types::{CgcError, GeneCall, GeneCaller, parse_strand};

use super::{Normalizer, capture_str, capture_u64};

static GENEMARK_GENE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(\d+)\s+([+-])\s+[<>]?(\d+)\s+[<>]?(\d+)\s+\d+\s+\d+").expect("valid regex")
});
static GENEMARK_CONTIG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"FASTA\sdefinition\sline:\s*(\S+).*\slength=\d+").expect("valid regex")
});

/// GeneMark / GeneMarkS `.lst` output.
///
/// Partial-gene marks (`<`, `>`) on coordinates are dropped. The contig is
/// the first word of the `FASTA definition line`.
#[derive(Debug)]
pub struct GeneMarkNormalizer {
    contig: String,
}

impl Default for GeneMarkNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl GeneMarkNormalizer {
    #[must_use]
    pub fn new() -> Self {
        Self {
            contig: UNKNOWN_CONTIG.to_string(),
        }
    }
}

impl Normalizer for GeneMarkNormalizer {
    fn gene_caller(&self) -> GeneCaller {
        GeneCaller::GeneMark
    }

    fn normalize_line(&mut self, line: &str) -> Result<Option<GeneCall>, CgcError> {
        if line.starts_with('#') {
            return Ok(None);
        }
        if let Some(captures) = GENEMARK_CONTIG.captures(line) {
            self.contig = capture_str(&captures, 1).to_string();
            return Ok(None);
        }
        let Some(captures) = GENEMARK_GENE.captures(line) else {
            return Ok(None);
        };

        GeneCall::new(
            GeneCaller::GeneMark,
            capture_str(&captures, 1),
            self.contig.as_str(),
            parse_strand(capture_str(&captures, 2))?,
            capture_u64(&captures, 3)?,
            capture_u64(&captures, 4)?,
        )
        .map(Some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bio::bio_types::strand::ReqStrand;

    const LST: &str = "GeneMark.hmm PROKARYOTIC (Version 3.25)\n\
        Sequence file name: lambda.fasta, RBS: true\n\
        FASTA definition line: NC_001416 Enterobacteria phage lambda length=48502\n\
        Predicted genes\n\
        \x20  Gene    Strand    LeftEnd    RightEnd       Gene     Class\n\
        \x20   #                                         Length\n\
        \x20    1        +         191         736         546         1\n\
        \x20    2        +        <711        2636        1926         1\n\
        \x20    3        -        2801       >3733         933         2\n";

    fn run(input: &str) -> Vec<GeneCall> {
        let mut normalizer = GeneMarkNormalizer::new();
        input
            .lines()
            .filter_map(|l| normalizer.normalize_line(l).unwrap())
            .collect()
    }

    #[test]
    fn test_genemark_lst() {
        let calls = run(LST);
        assert_eq!(calls.len(), 3);
        assert!(calls.iter().all(|c| c.contig() == "NC_001416"));
        assert_eq!(calls[0].gene_number(), "1");
        assert_eq!((calls[0].left_end(), calls[0].right_end()), (191, 736));
    }

    #[test]
    fn test_genemark_partial_marks_are_stripped() {
        let calls = run(LST);
        assert_eq!(calls[1].left_end(), 711);
        assert_eq!(calls[2].right_end(), 3733);
        assert_eq!(calls[2].strand(), ReqStrand::Reverse);
        assert_eq!(calls[2].start(), 3733);
    }

    #[test]
    fn test_genemark_without_definition_line() {
        let calls = run("    1        +         191         736         546         1\n");
        assert_eq!(calls[0].contig(), "unknown");
    }

    #[test]
    fn test_genemark_column_headers_are_not_records() {
        assert!(run("   Gene    Strand    LeftEnd\n    #    Length\n").is_empty());
    }
}
