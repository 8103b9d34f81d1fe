//! Per-caller collections of normalized gene calls.

use std::io::{BufRead, Write};

use log::{debug, warn};

use crate::record::{
    RecordLine, caller_name_from_header, classify_line, input_lines, parse_record_line,
};
use crate::types::{CgcError, GeneCall, GeneCaller, SkippedRecord};

/// The ordered gene calls contributed by one caller.
///
/// A set is filled from one normalized file with
/// [`add_gene_calls`](Self::add_gene_calls), put into a deterministic order
/// with [`sort_gene_calls`](Self::sort_gene_calls) and then handed to
/// [`Comparison::merge`](crate::comparison::Comparison::merge).
///
/// # Examples
///
/// ```rust
/// use cgc_core::call_set::GeneCallSet;
/// use cgc_core::types::GeneCaller;
///
/// let input = "# glimmer gene calls, taken from file run3.coords\n\
///              Gene No.\tStrand\tLeftEnd\tRightEnd\tLength\tContig\n\
///              2\t-\t2801\t3733\t933\tc1\n\
///              1\t+\t337\t2799\t2463\tc1\n\
///              # END\n";
///
/// let mut set = GeneCallSet::new();
/// set.add_gene_calls(input.as_bytes())?;
/// set.sort_gene_calls();
///
/// assert_eq!(set.gene_caller(), GeneCaller::Glimmer);
/// assert_eq!(set.label(), "glimmer");
/// assert_eq!(set.gene_calls()[0].left_end(), 337);
/// # Ok::<(), cgc_core::types::CgcError>(())
/// ```
#[derive(Debug, Default)]
pub struct GeneCallSet {
    gene_caller: GeneCaller,
    label: String,
    gene_call_list: Vec<GeneCall>,
    skipped: Vec<SkippedRecord>,
}

impl GeneCallSet {
    /// An empty set with an unknown caller.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty set whose caller is already known.
    ///
    /// A header line read later does not override `label`.
    #[must_use]
    pub fn with_label(label: impl Into<String>) -> Self {
        let label = label.into();
        Self {
            gene_caller: GeneCaller::from_name(&label),
            label,
            ..Self::default()
        }
    }

    #[must_use]
    pub const fn gene_caller(&self) -> GeneCaller {
        self.gene_caller
    }

    /// Caller name as written in the header, or empty if none was seen
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Set the caller name if the input did not provide one.
    ///
    /// Calls already in the set are re-attributed to the resolved caller.
    pub fn set_label_if_missing(&mut self, label: &str) {
        if self.label.is_empty() {
            self.label = label.to_string();
            self.gene_caller = GeneCaller::from_name(label);
            for call in &mut self.gene_call_list {
                call.set_gene_caller(self.gene_caller);
            }
        }
    }

    #[must_use]
    pub fn gene_calls(&self) -> &[GeneCall] {
        &self.gene_call_list
    }

    /// Records rejected during ingestion, in input order
    #[must_use]
    pub fn skipped(&self) -> &[SkippedRecord] {
        &self.skipped
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.gene_call_list.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.gene_call_list.is_empty()
    }

    /// Read a normalized record stream and append its calls.
    ///
    /// Comment lines, blank lines and the column header are skipped; reading
    /// stops at `# END` or at end of input. The first comment line names the
    /// caller unless the set already has a label. Malformed data lines,
    /// including lines that are not UTF-8, are logged, kept in
    /// [`skipped`](Self::skipped) and do not stop ingestion.
    ///
    /// Returns the number of calls appended.
    ///
    /// # Errors
    ///
    /// Returns [`CgcError::IoError`] if the reader fails; calls read before
    /// the failure stay in the set.
    pub fn add_gene_calls<R: BufRead>(&mut self, reader: R) -> Result<usize, CgcError> {
        let mut added = 0;
        let mut seen_comment = false;

        for line in input_lines(reader) {
            let line = line?;
            let line_number = line.number;

            match classify_line(&line.text) {
                RecordLine::End => break,
                RecordLine::Blank | RecordLine::ColumnHeader => {}
                RecordLine::Comment(comment) => {
                    if !seen_comment {
                        seen_comment = true;
                        if let Some(name) = caller_name_from_header(comment) {
                            self.set_label_if_missing(&name);
                        }
                    }
                }
                RecordLine::Data(data) => {
                    let parsed = if line.valid_utf8 {
                        parse_record_line(data, self.gene_caller)
                    } else {
                        Err(CgcError::InvalidEncoding)
                    };
                    match parsed {
                        Ok(call) => {
                            self.gene_call_list.push(call);
                            added += 1;
                        }
                        Err(reason) => {
                            warn!(
                                "Skipping malformed {} record at line {}: {}",
                                self.display_name(),
                                line_number,
                                reason
                            );
                            self.skipped.push(SkippedRecord {
                                line_number,
                                line: data.to_string(),
                                reason,
                            });
                        }
                    }
                }
            }
        }

        debug!(
            "Read {} calls for {} ({} skipped)",
            added,
            self.display_name(),
            self.skipped.len()
        );
        Ok(added)
    }

    /// Order calls by contig, then left end, then right end.
    ///
    /// The sort is stable, so calls with identical coordinates keep their
    /// input order, and sorting twice changes nothing.
    pub fn sort_gene_calls(&mut self) {
        self.gene_call_list.sort_by(|a, b| {
            a.contig()
                .cmp(b.contig())
                .then(a.left_end().cmp(&b.left_end()))
                .then(a.right_end().cmp(&b.right_end()))
        });
    }

    /// Dump every call in current order, one normalized record per line.
    pub fn print_all<W: Write>(&self, writer: &mut W) -> Result<(), CgcError> {
        writeln!(
            writer,
            "# {} ({}): {} calls",
            self.display_name(),
            self.gene_caller,
            self.gene_call_list.len()
        )?;
        for call in &self.gene_call_list {
            writeln!(writer, "{call}")?;
        }
        Ok(())
    }

    pub(crate) fn into_parts(self) -> (GeneCaller, String, Vec<GeneCall>) {
        (self.gene_caller, self.label, self.gene_call_list)
    }

    fn display_name(&self) -> &str {
        if self.label.is_empty() {
            "unlabeled caller"
        } else {
            &self.label
        }
    }
}
