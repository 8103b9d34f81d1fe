//! Cross-caller reconciliation of gene calls.
//!
//! A [`Comparison`] pools the calls of every merged [`GeneCallSet`], groups
//! calls from different callers that describe the same gene, and partitions
//! the groups into common core, partial and unique loci.
//!
//! ## Lifecycle
//!
//! ```text
//! Empty --merge--> Merged --compare--> Compared --identify_common_core--> Classified
//! ```
//!
//! Operations called out of order produce an empty result instead of an
//! error: comparing an empty pool yields no groups, and a report written
//! before classification has empty sections. Reporting never changes state.
//!
//! ## Matching
//!
//! Two calls are the same gene when they are on the same contig and strand
//! and share the translation start (`left_end` on `+`, `right_end` on `-`).
//! See [`MatchPolicy`] for the stricter alternative. Grouping is transitive.
//!
//! # Examples
//!
//! ```rust
//! use cgc_core::call_set::GeneCallSet;
//! use cgc_core::comparison::Comparison;
//!
//! let mut a = GeneCallSet::with_label("prodigal");
//! a.add_gene_calls("1\t+\t10\t100\t91\tc1\n".as_bytes())?;
//! let mut b = GeneCallSet::with_label("genemark");
//! b.add_gene_calls("7\t+\t10\t115\t106\tc1\n".as_bytes())?;
//!
//! let mut comparison = Comparison::new();
//! comparison.merge(a)?;
//! comparison.merge(b)?;
//! comparison.compare();
//! comparison.identify_common_core();
//!
//! assert_eq!(comparison.common_core().count(), 1);
//! # Ok::<(), cgc_core::types::CgcError>(())
//! ```

mod classification;
mod matching;

pub use classification::{Classification, LocusClass};
pub use matching::{BoundaryAgreement, CallGroup};

use std::io::Write;

use log::{debug, info};

use crate::call_set::GeneCallSet;
use crate::config::{MatchPolicy, ReportFormat};
use crate::output::write_report;
use crate::results::ComparisonSummary;
use crate::types::{CgcError, GeneCall, GeneCaller};

/// Position of a caller in merge order
pub type CallerId = usize;

/// One merged caller
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallerEntry {
    pub id: CallerId,
    /// Name from the normalized file header
    pub label: String,
    pub gene_caller: GeneCaller,
    /// Number of calls contributed
    pub call_count: usize,
}

/// A call in the merged pool, tagged with its caller
#[derive(Debug, Clone)]
pub struct PooledCall {
    pub call: GeneCall,
    pub caller: CallerId,
}

/// Progress of a [`Comparison`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ComparisonState {
    Empty,
    Merged,
    Compared,
    Classified,
}

/// The merged pool of calls from all callers and its reconciliation.
#[derive(Debug)]
pub struct Comparison {
    match_policy: MatchPolicy,
    callers: Vec<CallerEntry>,
    all_calls: Vec<PooledCall>,
    groups: Vec<CallGroup>,
    classification: Classification,
    state: ComparisonState,
}

impl Default for Comparison {
    fn default() -> Self {
        Self::new()
    }
}

impl Comparison {
    /// An empty comparison using [`MatchPolicy::StartCodon`].
    #[must_use]
    pub fn new() -> Self {
        Self::with_match_policy(MatchPolicy::default())
    }

    #[must_use]
    pub fn with_match_policy(match_policy: MatchPolicy) -> Self {
        Self {
            match_policy,
            callers: Vec::new(),
            all_calls: Vec::new(),
            groups: Vec::new(),
            classification: Classification::default(),
            state: ComparisonState::Empty,
        }
    }

    /// Add one caller's calls to the pool.
    ///
    /// A set without a label is named `caller_<n>` after its merge position.
    /// Merging into a compared or classified comparison discards the groups
    /// and returns it to [`ComparisonState::Merged`].
    ///
    /// # Errors
    ///
    /// [`CgcError::DuplicateCaller`] if a caller with the same label, ignoring
    /// case, was already merged; the comparison is left unchanged.
    pub fn merge(&mut self, set: GeneCallSet) -> Result<CallerId, CgcError> {
        let id = self.callers.len();
        let (gene_caller, label, calls) = set.into_parts();
        let label = if label.is_empty() {
            format!("caller_{}", id + 1)
        } else {
            label
        };

        if self.callers.iter().any(|c| c.label.eq_ignore_ascii_case(&label)) {
            return Err(CgcError::DuplicateCaller(label));
        }

        info!("Merging {} calls from {}", calls.len(), label);
        self.callers.push(CallerEntry {
            id,
            label,
            gene_caller,
            call_count: calls.len(),
        });
        self.all_calls
            .extend(calls.into_iter().map(|call| PooledCall { call, caller: id }));

        self.groups.clear();
        self.classification = Classification::default();
        self.state = ComparisonState::Merged;
        Ok(id)
    }

    /// Group matching calls from different callers.
    ///
    /// Rebuilds the groups from scratch each time. Every pooled call ends up
    /// in exactly one group; calls without a counterpart form singletons.
    pub fn compare(&mut self) {
        self.groups = matching::build_groups(&self.all_calls, self.match_policy);
        self.classification = Classification::default();
        self.state = ComparisonState::Compared;

        let matched = self.groups.iter().filter(|g| !g.is_singleton()).count();
        info!(
            "Compared {} calls from {} callers: {} matched groups, {} loci in total",
            self.all_calls.len(),
            self.callers.len(),
            matched,
            self.groups.len()
        );
    }

    /// Partition the groups into common core, partial and unique loci.
    ///
    /// Before [`compare`](Self::compare) there are no groups and the
    /// classification is empty.
    pub fn identify_common_core(&mut self) {
        if self.state < ComparisonState::Compared {
            debug!("identify_common_core called before compare; nothing to classify");
        }
        self.classification = classification::classify(&self.groups, self.callers.len());
        if self.state >= ComparisonState::Compared {
            self.state = ComparisonState::Classified;
        }

        info!(
            "Common core: {} loci, partial: {} loci, unique: {} calls",
            self.classification.common_core.len(),
            self.classification.partial.len(),
            self.classification.unique.iter().map(Vec::len).sum::<usize>()
        );
    }

    /// Write the report in `format`. Safe to call repeatedly.
    pub fn print_report<W: Write>(
        &self,
        writer: &mut W,
        format: ReportFormat,
    ) -> Result<(), CgcError> {
        write_report(writer, self, format)
    }

    /// Dump the whole pool in merge order, unfiltered.
    pub fn print_all<W: Write>(&self, writer: &mut W) -> Result<(), CgcError> {
        writeln!(
            writer,
            "# All calls: {} from {} callers",
            self.all_calls.len(),
            self.callers.len()
        )?;
        for pooled in &self.all_calls {
            writeln!(writer, "{}\t{}", self.callers[pooled.caller].label, pooled.call)?;
        }
        Ok(())
    }

    #[must_use]
    pub const fn state(&self) -> ComparisonState {
        self.state
    }

    #[must_use]
    pub const fn match_policy(&self) -> MatchPolicy {
        self.match_policy
    }

    #[must_use]
    pub fn callers(&self) -> &[CallerEntry] {
        &self.callers
    }

    #[must_use]
    pub fn caller(&self, id: CallerId) -> Option<&CallerEntry> {
        self.callers.get(id)
    }

    #[must_use]
    pub fn all_calls(&self) -> &[PooledCall] {
        &self.all_calls
    }

    /// All loci, singletons included, ordered by contig, start and strand
    #[must_use]
    pub fn groups(&self) -> &[CallGroup] {
        &self.groups
    }

    #[must_use]
    pub const fn classification(&self) -> &Classification {
        &self.classification
    }

    /// Pooled calls of a group, ordered by caller
    pub fn group_calls<'a>(
        &'a self,
        group: &'a CallGroup,
    ) -> impl Iterator<Item = &'a PooledCall> + 'a {
        group.members().iter().map(|&i| &self.all_calls[i])
    }

    /// Labels of the callers contributing to a group
    #[must_use]
    pub fn group_labels(&self, group: &CallGroup) -> Vec<&str> {
        group
            .callers()
            .iter()
            .map(|&c| self.callers[c].label.as_str())
            .collect()
    }

    pub fn common_core(&self) -> impl Iterator<Item = &CallGroup> {
        self.classification
            .common_core
            .iter()
            .map(|&i| &self.groups[i])
    }

    pub fn partial(&self) -> impl Iterator<Item = &CallGroup> {
        self.classification.partial.iter().map(|&i| &self.groups[i])
    }

    /// Calls of `caller` that no other caller made
    pub fn unique_calls(&self, caller: CallerId) -> impl Iterator<Item = &GeneCall> {
        self.classification
            .unique
            .get(caller)
            .into_iter()
            .flatten()
            .flat_map(|&i| self.groups[i].members())
            .map(|&m| &self.all_calls[m].call)
    }

    /// Counts describing the current state
    #[must_use]
    pub fn summary(&self) -> ComparisonSummary {
        ComparisonSummary {
            callers: self.callers.len(),
            total_calls: self.all_calls.len(),
            common_core_loci: self.classification.common_core.len(),
            partial_loci: self.classification.partial.len(),
            unique_calls: self.classification.unique.iter().map(Vec::len).sum(),
            skipped_records: 0,
        }
    }
}
