use std::fmt;

/// Counts describing one comparison run.
///
/// Produced by [`Comparison::summary`](crate::comparison::Comparison::summary)
/// and returned by [`CgcAnalyzer::compare_files`](crate::engine::CgcAnalyzer::compare_files),
/// which also fills in the number of skipped records.
///
/// # Examples
///
/// ```rust
/// # use cgc_core::results::ComparisonSummary;
/// let summary = ComparisonSummary {
///     callers: 3,
///     total_calls: 1200,
///     common_core_loci: 350,
///     partial_loci: 40,
///     unique_calls: 12,
///     skipped_records: 0,
/// };
///
/// assert_eq!(
///     summary.to_string(),
///     "3 callers, 1200 calls: 350 common core, 40 partial, 12 unique, 0 skipped records"
/// );
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ComparisonSummary {
    /// Number of merged callers
    pub callers: usize,

    /// Calls in the merged pool
    pub total_calls: usize,

    /// Loci called by every caller
    pub common_core_loci: usize,

    /// Loci called by more than one caller, but not all
    pub partial_loci: usize,

    /// Calls made by a single caller only
    pub unique_calls: usize,

    /// Malformed input lines skipped during ingestion
    pub skipped_records: usize,
}

impl fmt::Display for ComparisonSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} callers, {} calls: {} common core, {} partial, {} unique, {} skipped records",
            self.callers,
            self.total_calls,
            self.common_core_loci,
            self.partial_loci,
            self.unique_calls,
            self.skipped_records
        )
    }
}
