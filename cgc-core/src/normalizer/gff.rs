use bio::bio_types::strand::ReqStrand;

use crate::types::{CgcError, GeneCall, GeneCaller, parse_strand};

const GFF_COLUMNS: usize = 8;

/// Coordinates of one GFF `CDS` feature
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct CdsFeature<'a> {
    pub seqid: &'a str,
    pub start: u64,
    pub end: u64,
    pub strand: ReqStrand,
}

impl CdsFeature<'_> {
    pub(super) fn into_call(
        self,
        caller: GeneCaller,
        gene_number: u64,
    ) -> Result<GeneCall, CgcError> {
        GeneCall::new(
            caller,
            gene_number.to_string(),
            self.seqid,
            self.strand,
            self.start,
            self.end,
        )
    }
}

fn coordinate(field: &str) -> Result<u64, CgcError> {
    field
        .parse::<u64>()
        .map_err(|_| CgcError::InvalidCoordinate(field.to_string()))
}

/// Read a GFF line as a CDS feature.
///
/// Returns `Ok(None)` for directives, comments and non-CDS features.
pub(super) fn parse_cds_line(line: &str) -> Result<Option<CdsFeature<'_>>, CgcError> {
    if line.starts_with('#') || line.trim().is_empty() {
        return Ok(None);
    }
    let fields: Vec<&str> = line.split('\t').collect();
    if fields.len() < GFF_COLUMNS || fields[2] != "CDS" {
        return Ok(None);
    }

    Ok(Some(CdsFeature {
        seqid: fields[0],
        start: coordinate(fields[3])?,
        end: coordinate(fields[4])?,
        strand: parse_strand(fields[6])?,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_cds_line() {
        let line = "contig_1\tProdigal_v2.6.3\tCDS\t337\t2799\t354.2\t+\t0\tID=1_1;partial=00";
        let feature = parse_cds_line(line).unwrap().unwrap();
        assert_eq!(feature.seqid, "contig_1");
        assert_eq!((feature.start, feature.end), (337, 2799));
        assert_eq!(feature.strand, ReqStrand::Forward);
    }

    #[test]
    fn test_non_cds_lines_are_ignored() {
        assert!(parse_cds_line("##gff-version 3").unwrap().is_none());
        assert!(parse_cds_line("c1\tRAST\tgene\t1\t90\t.\t+\t.\tID=g1").unwrap().is_none());
        assert!(parse_cds_line("c1\tRAST\tCDS\t1").unwrap().is_none());
        assert!(parse_cds_line("").unwrap().is_none());
    }

    #[test]
    fn test_malformed_cds_is_an_error() {
        let bad_strand = "c1\tRAST\tCDS\t1\t90\t.\t.\t0\tID=g1";
        assert!(matches!(
            parse_cds_line(bad_strand),
            Err(CgcError::InvalidStrand(_))
        ));
        let bad_start = "c1\tRAST\tCDS\tx\t90\t.\t+\t0\tID=g1";
        assert!(matches!(
            parse_cds_line(bad_start),
            Err(CgcError::InvalidCoordinate(_))
        ));
    }
}
