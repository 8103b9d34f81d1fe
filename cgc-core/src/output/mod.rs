//! Report writers for a classified [`Comparison`].
//!
//! ## Supported Formats
//!
//! - **Text**: commented sections for the common core, partial loci and each
//!   caller's unique calls, terminated by `# END`
//! - **TSV**: one row per call with its locus and class
//!
//! Both writers only read the comparison, so a report can be written any
//! number of times. Before classification the sections are empty.
//!
//! ## Examples
//!
//! ```rust
//! use cgc_core::call_set::GeneCallSet;
//! use cgc_core::comparison::Comparison;
//! use cgc_core::config::ReportFormat;
//! use cgc_core::output::write_report;
//!
//! let mut a = GeneCallSet::with_label("prodigal");
//! a.add_gene_calls("1\t+\t10\t100\t91\tc1\n".as_bytes())?;
//! let mut comparison = Comparison::new();
//! comparison.merge(a)?;
//! comparison.compare();
//! comparison.identify_common_core();
//!
//! let mut report = Vec::new();
//! write_report(&mut report, &comparison, ReportFormat::Tsv)?;
//! assert_eq!(String::from_utf8_lossy(&report).lines().count(), 2);
//! # Ok::<(), cgc_core::types::CgcError>(())
//! ```

use crate::{
    CgcError,
    comparison::{CallGroup, Comparison},
    config::ReportFormat,
};
use std::io::Write;

mod formats {
    pub mod text;
    pub mod tsv;
}

pub use formats::tsv::TSV_HEADER;
use formats::{text::write_text_format, tsv::write_tsv_format};

/// Writes the comparison report in the specified format.
///
/// # Errors
///
/// Returns [`CgcError::IoError`] if the writer fails.
pub fn write_report<W: Write>(
    writer: &mut W,
    comparison: &Comparison,
    format: ReportFormat,
) -> Result<(), CgcError> {
    match format {
        ReportFormat::Text => write_text_format(writer, comparison),
        ReportFormat::Tsv => write_tsv_format(writer, comparison),
    }
}

/// Agreement column of a group; `-` for a single call.
pub(crate) fn agreement_label(group: &CallGroup) -> String {
    group
        .agreement()
        .map_or_else(|| "-".to_string(), |agreement| agreement.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::call_set::GeneCallSet;
    use std::io::Cursor;

    fn classified() -> Comparison {
        let mut a = GeneCallSet::with_label("A");
        a.add_gene_calls("1\t+\t10\t100\t91\tc1\n".as_bytes()).unwrap();
        let mut b = GeneCallSet::with_label("B");
        b.add_gene_calls("1\t+\t10\t100\t91\tc1\n".as_bytes()).unwrap();
        let mut comparison = Comparison::new();
        comparison.merge(a).unwrap();
        comparison.merge(b).unwrap();
        comparison.compare();
        comparison.identify_common_core();
        comparison
    }

    #[test]
    fn test_write_report_text_format() {
        let mut buffer = Vec::new();
        let mut cursor = Cursor::new(&mut buffer);
        let result = write_report(&mut cursor, &classified(), ReportFormat::Text);
        assert!(result.is_ok());

        let output = String::from_utf8(buffer).unwrap();
        assert!(output.starts_with("# Compare Gene Calls report"));
        assert!(output.contains("# Common core: 1 loci"));
    }

    #[test]
    fn test_write_report_tsv_format() {
        let mut buffer = Vec::new();
        let mut cursor = Cursor::new(&mut buffer);
        let result = write_report(&mut cursor, &classified(), ReportFormat::Tsv);
        assert!(result.is_ok());

        let output = String::from_utf8(buffer).unwrap();
        assert!(output.starts_with(TSV_HEADER));
        assert_eq!(output.lines().count(), 3);
    }

    #[test]
    fn test_print_report_delegates() {
        let comparison = classified();
        let mut direct = Vec::new();
        write_report(&mut direct, &comparison, ReportFormat::Text).unwrap();
        let mut via_engine = Vec::new();
        comparison
            .print_report(&mut via_engine, ReportFormat::Text)
            .unwrap();
        assert_eq!(direct, via_engine);
    }
}
