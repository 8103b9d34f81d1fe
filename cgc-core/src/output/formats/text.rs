use std::io::Write;

use crate::{
    CgcError,
    comparison::{CallGroup, Comparison},
    constants::{COLUMN_HEADER, END_MARKER, VERSION},
    output::agreement_label,
    types::strand_symbol,
};

const GROUP_COLUMNS: &str = "Contig\tStrand\tStart\tAgreement\tCallers\tCalls";

/// Write the human-readable report: header, common core, partial and
/// per-caller unique sections, then `# END`.
pub fn write_text_format<W: Write>(writer: &mut W, comparison: &Comparison) -> Result<(), CgcError> {
    writeln!(writer, "# Compare Gene Calls report (cgc v{VERSION})")?;
    writeln!(writer, "# Match policy: {}", comparison.match_policy())?;
    let callers: Vec<String> = comparison
        .callers()
        .iter()
        .map(|c| format!("{} ({}, {} calls)", c.label, c.gene_caller, c.call_count))
        .collect();
    writeln!(writer, "# Callers: {}", callers.join(", "))?;

    let core: Vec<&CallGroup> = comparison.common_core().collect();
    writeln!(writer, "#")?;
    writeln!(writer, "# Common core: {} loci", core.len())?;
    write_groups(writer, comparison, &core)?;

    let partial: Vec<&CallGroup> = comparison.partial().collect();
    writeln!(writer, "#")?;
    writeln!(writer, "# Partial: {} loci", partial.len())?;
    write_groups(writer, comparison, &partial)?;

    for caller in comparison.callers() {
        let unique: Vec<_> = comparison.unique_calls(caller.id).collect();
        writeln!(writer, "#")?;
        writeln!(writer, "# Unique to {}: {} calls", caller.label, unique.len())?;
        writeln!(writer, "{COLUMN_HEADER}")?;
        for call in unique {
            writeln!(writer, "{call}")?;
        }
    }

    writeln!(writer, "{END_MARKER}")?;
    Ok(())
}

fn write_groups<W: Write>(
    writer: &mut W,
    comparison: &Comparison,
    groups: &[&CallGroup],
) -> Result<(), CgcError> {
    writeln!(writer, "{GROUP_COLUMNS}")?;
    for group in groups {
        // label:gene_no:left-right for each member
        let calls: Vec<String> = comparison
            .group_calls(group)
            .map(|p| {
                format!(
                    "{}:{}:{}-{}",
                    comparison.callers()[p.caller].label,
                    p.call.gene_number(),
                    p.call.left_end(),
                    p.call.right_end()
                )
            })
            .collect();
        writeln!(
            writer,
            "{}\t{}\t{}\t{}\t{}\t{}",
            group.contig(),
            strand_symbol(group.strand()),
            group.start(),
            agreement_label(group),
            comparison.group_labels(group).join(","),
            calls.join(";")
        )?;
    }
    Ok(())
}
