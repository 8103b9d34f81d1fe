//! # Compare Gene Calls
//!
//! Reconciles gene predictions made by several prokaryotic gene callers
//! (Prodigal, GeneMark, Glimmer, RAST, PhATE) on the same genome and reports
//! which genes every caller found, which only some found, and which are
//! unique to one caller.
//!
//! ## Overview
//!
//! Each caller's raw output is first converted by a [`normalizer`] into a
//! common tab-separated record format. Normalized files are read into one
//! [`GeneCallSet`](call_set::GeneCallSet) per caller, merged into a
//! [`Comparison`](comparison::Comparison), matched on translation start and
//! classified:
//!
//! - **Common core**: loci called by every caller
//! - **Partial**: loci called by more than one caller, but not all
//! - **Unique**: calls made by a single caller
//!
//! ## Quick Start
//!
//! ```rust
//! use cgc_core::call_set::GeneCallSet;
//! use cgc_core::comparison::Comparison;
//! use cgc_core::config::ReportFormat;
//!
//! let prodigal = "# prodigal gene calls, taken from file genome.sco\n\
//!                 1\t+\t337\t2799\t2463\tc1\n\
//!                 2\t-\t2801\t3733\t933\tc1\n";
//! let glimmer = "# glimmer gene calls, taken from file run3.predict\n\
//!                1\t+\t337\t2799\t2463\tc1\n";
//!
//! let mut comparison = Comparison::new();
//! for input in [prodigal, glimmer] {
//!     let mut set = GeneCallSet::new();
//!     set.add_gene_calls(input.as_bytes())?;
//!     set.sort_gene_calls();
//!     comparison.merge(set)?;
//! }
//! comparison.compare();
//! comparison.identify_common_core();
//!
//! assert_eq!(comparison.common_core().count(), 1);
//! assert_eq!(comparison.unique_calls(0).count(), 1);
//!
//! let mut report = Vec::new();
//! comparison.print_report(&mut report, ReportFormat::Text)?;
//! # Ok::<(), cgc_core::types::CgcError>(())
//! ```
//!
//! ## Module Organization
//!
//! - [`normalizer`]: raw caller output to normalized records
//! - [`record`]: the normalized record format
//! - [`call_set`]: per-caller call collections
//! - [`comparison`]: merging, matching and classification
//! - [`output`]: report writers
//! - [`engine`]: file-level pipeline and run sinks
//! - [`config`]: run options
//! - [`types`]: gene calls, callers and errors
//!
//! ## Error Handling
//!
//! Fallible operations return [`Result<T, CgcError>`](types::CgcError).
//! Malformed input records are skipped and reported rather than failing the
//! run; I/O failures and duplicate callers are errors.

pub mod call_set;
pub mod comparison;
pub mod config;
pub mod constants;
pub mod engine;
pub mod normalizer;
pub mod output;
pub mod record;
pub mod results;
pub mod types;

pub use engine::CgcAnalyzer;
pub use types::CgcError;
