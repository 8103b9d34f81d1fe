//! The normalized, tab-separated gene call record format.
//!
//! Every normalizer writes this format and [`crate::call_set::GeneCallSet`]
//! reads it:
//!
//! ```text
//! # prodigal gene calls, taken from file genome.sco
//! Gene No.	Strand	LeftEnd	RightEnd	Length	Contig
//! 1	+	337	2799	2463	unknown
//! 2	-	2801	3733	933	unknown
//! # END
//! ```

use std::io::{BufRead, Write};

use log::debug;

use crate::constants::{
    COLUMN_HEADER, COLUMN_HEADER_FIRST_FIELD, END_MARKER, HEADER_CALLER_SUFFIX, RECORD_FIELDS,
    RECORD_FIELDS_WITHOUT_CONTIG, UNKNOWN_CONTIG,
};
use crate::types::{CgcError, GeneCall, GeneCaller, parse_strand};

/// What a single line of a normalized file holds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordLine<'a> {
    /// `#` comment, with the leading `#` and whitespace removed
    Comment(&'a str),
    /// The `Gene No.` column header
    ColumnHeader,
    /// The `# END` terminator
    End,
    /// Empty or whitespace-only line
    Blank,
    /// Anything else
    Data(&'a str),
}

/// One line of input, decoded lossily.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputLine {
    /// 1-based line number
    pub number: usize,
    /// Line text without its terminator; invalid bytes become U+FFFD
    pub text: String,
    /// Whether the raw bytes were valid UTF-8
    pub valid_utf8: bool,
}

/// Iterator over the lines of a reader that does not stop at bytes which are
/// not UTF-8. Only I/O failures are errors.
#[derive(Debug)]
pub struct InputLines<R> {
    reader: R,
    buffer: Vec<u8>,
    number: usize,
}

/// Read `reader` line by line as [`InputLine`]s.
pub fn input_lines<R: BufRead>(reader: R) -> InputLines<R> {
    InputLines {
        reader,
        buffer: Vec::new(),
        number: 0,
    }
}

impl<R: BufRead> Iterator for InputLines<R> {
    type Item = Result<InputLine, CgcError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.buffer.clear();
        match self.reader.read_until(b'\n', &mut self.buffer) {
            Ok(0) => None,
            Ok(_) => {
                self.number += 1;
                while matches!(self.buffer.last(), Some(b'\n' | b'\r')) {
                    self.buffer.pop();
                }
                let bytes = std::mem::take(&mut self.buffer);
                let (text, valid_utf8) = match String::from_utf8(bytes) {
                    Ok(text) => (text, true),
                    Err(e) => (String::from_utf8_lossy(e.as_bytes()).into_owned(), false),
                };
                Some(Ok(InputLine {
                    number: self.number,
                    text,
                    valid_utf8,
                }))
            }
            Err(e) => Some(Err(e.into())),
        }
    }
}

/// Classify one line of a normalized file.
#[must_use]
pub fn classify_line(line: &str) -> RecordLine<'_> {
    let line = line.trim_end_matches(['\r', '\n']);
    if line.trim().is_empty() {
        RecordLine::Blank
    } else if line.trim_end() == END_MARKER {
        RecordLine::End
    } else if let Some(comment) = line.strip_prefix('#') {
        RecordLine::Comment(comment.trim())
    } else if line.split('\t').next() == Some(COLUMN_HEADER_FIRST_FIELD) {
        RecordLine::ColumnHeader
    } else {
        RecordLine::Data(line)
    }
}

/// Extract the caller name from a header comment.
///
/// Accepts the comment text after `#`, e.g.
/// `"prodigal gene calls, taken from file x.sco"` yields `"prodigal"`. A
/// comment without the `gene calls` phrase yields its first word.
#[must_use]
pub fn caller_name_from_header(comment: &str) -> Option<String> {
    let comment = comment.trim();
    let name = match comment.find(HEADER_CALLER_SUFFIX) {
        Some(end) => comment[..end].trim(),
        None => comment.split_whitespace().next().unwrap_or(""),
    };
    (!name.is_empty()).then(|| name.to_string())
}

fn parse_coordinate(field: &str) -> Result<u64, CgcError> {
    field
        .trim()
        .parse::<u64>()
        .map_err(|_| CgcError::InvalidCoordinate(field.to_string()))
}

/// Parse one data line into a [`GeneCall`] attributed to `caller`.
///
/// A line may omit the contig column, in which case the contig is
/// [`UNKNOWN_CONTIG`]. The length column must be numeric but is recomputed
/// from the coordinates.
///
/// # Errors
///
/// [`CgcError::FieldCount`], [`CgcError::InvalidStrand`],
/// [`CgcError::InvalidCoordinate`] or [`CgcError::InvalidCoordinates`].
pub fn parse_record_line(line: &str, caller: GeneCaller) -> Result<GeneCall, CgcError> {
    let fields: Vec<&str> = line.trim_end_matches(['\r', '\n']).split('\t').collect();
    if fields.len() != RECORD_FIELDS && fields.len() != RECORD_FIELDS_WITHOUT_CONTIG {
        return Err(CgcError::FieldCount {
            expected: RECORD_FIELDS,
            found: fields.len(),
        });
    }

    let strand = parse_strand(fields[1].trim())?;
    let left_end = parse_coordinate(fields[2])?;
    let right_end = parse_coordinate(fields[3])?;
    let length = parse_coordinate(fields[4])?;
    let contig = fields
        .get(5)
        .map(|c| c.trim())
        .filter(|c| !c.is_empty())
        .unwrap_or(UNKNOWN_CONTIG);

    let call = GeneCall::new(
        caller,
        fields[0].trim(),
        contig,
        strand,
        left_end,
        right_end,
    )?;
    if call.length() != length {
        debug!(
            "Gene {} on {}: length column {} disagrees with coordinates, using {}",
            call.gene_number(),
            call.contig(),
            length,
            call.length()
        );
    }
    Ok(call)
}

/// Write the header comment and column header of a normalized file.
pub fn write_header<W: Write>(
    writer: &mut W,
    caller_name: &str,
    source_file: &str,
) -> Result<(), CgcError> {
    writeln!(
        writer,
        "# {caller_name}{HEADER_CALLER_SUFFIX}, taken from file {source_file}"
    )?;
    writeln!(writer, "{COLUMN_HEADER}")?;
    Ok(())
}

/// Write one call as a data line.
pub fn write_record<W: Write>(writer: &mut W, call: &GeneCall) -> Result<(), CgcError> {
    writeln!(writer, "{call}")?;
    Ok(())
}

/// Write the `# END` terminator.
pub fn write_end<W: Write>(writer: &mut W) -> Result<(), CgcError> {
    writeln!(writer, "{END_MARKER}")?;
    Ok(())
}
