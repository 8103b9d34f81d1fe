use std::io::Write;

use crate::{
    CgcError,
    comparison::{CallerId, Comparison, LocusClass},
    output::agreement_label,
    types::strand_symbol,
};

/// Column header of the TSV report
pub const TSV_HEADER: &str =
    "locus\tclass\tcaller\tgene_no\tstrand\tleft_end\tright_end\tlength\tcontig\tagreement";

/// Write one row per classified call.
///
/// Rows come in report order (common core, partial, then each caller's unique
/// calls), and `locus` is the 1-based position of the call's group.
pub fn write_tsv_format<W: Write>(writer: &mut W, comparison: &Comparison) -> Result<(), CgcError> {
    writeln!(writer, "{TSV_HEADER}")?;

    let classification = comparison.classification();
    let caller_count = comparison.callers().len();
    let unique = (0..caller_count).flat_map(|c: CallerId| {
        classification
            .unique
            .get(c)
            .map(Vec::as_slice)
            .unwrap_or_default()
    });

    for &index in classification
        .common_core
        .iter()
        .chain(&classification.partial)
        .chain(unique)
    {
        let group = &comparison.groups()[index];
        let class = LocusClass::of(group, caller_count).name();
        for pooled in comparison.group_calls(group) {
            let call = &pooled.call;
            writeln!(
                writer,
                "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}",
                index + 1,
                class,
                comparison.callers()[pooled.caller].label,
                call.gene_number(),
                strand_symbol(call.strand()),
                call.left_end(),
                call.right_end(),
                call.length(),
                call.contig(),
                agreement_label(group)
            )?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::call_set::GeneCallSet;

    fn set(label: &str, records: &str) -> GeneCallSet {
        let mut set = GeneCallSet::with_label(label);
        set.add_gene_calls(records.as_bytes()).unwrap();
        set
    }

    #[test]
    fn test_tsv_rows() {
        let mut comparison = Comparison::new();
        comparison
            .merge(set("A", "1\t+\t10\t100\t91\tc1\n2\t+\t500\t600\t101\tc1\n"))
            .unwrap();
        comparison
            .merge(set("B", "4\t+\t10\t100\t91\tc1\n5\t+\t500\t650\t151\tc1\n"))
            .unwrap();
        comparison
            .merge(set("C", "9\t+\t10\t100\t91\tc1\n"))
            .unwrap();
        comparison.compare();
        comparison.identify_common_core();

        let mut output = Vec::new();
        write_tsv_format(&mut output, &comparison).unwrap();
        let output = String::from_utf8(output).unwrap();
        let lines: Vec<&str> = output.lines().collect();

        assert_eq!(lines.len(), 6);
        assert_eq!(lines[0], TSV_HEADER);
        assert_eq!(lines[1], "1\tcommon_core\tA\t1\t+\t10\t100\t91\tc1\texact");
        assert_eq!(lines[3], "1\tcommon_core\tC\t9\t+\t10\t100\t91\tc1\texact");
        assert_eq!(lines[4], "2\tpartial\tA\t2\t+\t500\t600\t101\tc1\tstart-only");
        assert_eq!(lines[5], "2\tpartial\tB\t5\t+\t500\t650\t151\tc1\tstart-only");
    }

    #[test]
    fn test_tsv_unique_rows() {
        let mut comparison = Comparison::new();
        comparison.merge(set("A", "1\t+\t10\t100\t91\tc1\n")).unwrap();
        comparison.merge(set("B", "1\t-\t10\t100\t91\tc1\n")).unwrap();
        comparison.compare();
        comparison.identify_common_core();

        let mut output = Vec::new();
        write_tsv_format(&mut output, &comparison).unwrap();
        let output = String::from_utf8(output).unwrap();
        let classes: Vec<&str> = output
            .lines()
            .skip(1)
            .map(|l| l.split('\t').nth(1).unwrap())
            .collect();
        assert_eq!(classes, vec!["unique", "unique"]);
        let agreements: Vec<&str> = output
            .lines()
            .skip(1)
            .map(|l| l.rsplit('\t').next().unwrap())
            .collect();
        assert_eq!(agreements, vec!["-", "-"]);
    }

    #[test]
    fn test_tsv_unclassified_is_header_only() {
        let comparison = Comparison::new();
        let mut output = Vec::new();
        write_tsv_format(&mut output, &comparison).unwrap();
        assert_eq!(String::from_utf8(output).unwrap(), format!("{TSV_HEADER}\n"));
    }
}
