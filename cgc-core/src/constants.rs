// =============================================================================
// Common record format
// =============================================================================

/// Version string for cgc
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Contig name used when the caller output does not name one
pub const UNKNOWN_CONTIG: &str = "unknown";

/// Column header line of the normalized record format
pub const COLUMN_HEADER: &str = "Gene No.\tStrand\tLeftEnd\tRightEnd\tLength\tContig";

/// First field of the column header line
pub const COLUMN_HEADER_FIRST_FIELD: &str = "Gene No.";

/// Terminal line of a normalized file
pub const END_MARKER: &str = "# END";

/// Phrase separating the caller name from the rest of the header comment
pub const HEADER_CALLER_SUFFIX: &str = " gene calls";

/// Number of fields in a complete data line
pub const RECORD_FIELDS: usize = 6;

/// Number of fields in a data line without a contig column
pub const RECORD_FIELDS_WITHOUT_CONTIG: usize = 5;

// =============================================================================
// Raw caller formats
// =============================================================================

/// Glimmer2 reports stops 3 bp short of the other callers
pub const GLIMMER2_STOP_ADJUSTMENT: u64 = 3;

// =============================================================================
// Command line
// =============================================================================

/// Minimum number of normalized files the `cgc` command compares
pub const MIN_INPUT_FILES: usize = 2;
