use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use log::{info, warn};

use crate::call_set::GeneCallSet;
use crate::comparison::Comparison;
use crate::config::CgcConfig;
use crate::constants::MIN_INPUT_FILES;
use crate::results::ComparisonSummary;
use crate::types::CgcError;

/// Output sinks of one run.
///
/// The report goes to `report`; progress lines and skipped input records go
/// to the optional run log. Both are flushed when the run finishes.
///
/// # Examples
///
/// ```rust
/// use cgc_core::engine::RunContext;
///
/// let mut report = Vec::new();
/// let mut log = Vec::new();
/// {
///     let mut ctx = RunContext::new(&mut report).with_run_log(&mut log);
///     ctx.log_line("starting")?;
///     ctx.flush()?;
/// }
/// assert_eq!(log, b"starting\n");
/// # Ok::<(), cgc_core::types::CgcError>(())
/// ```
pub struct RunContext<'a> {
    report: Box<dyn Write + 'a>,
    run_log: Option<Box<dyn Write + 'a>>,
}

impl<'a> RunContext<'a> {
    /// A context writing the report to `report` and keeping no run log.
    pub fn new(report: impl Write + 'a) -> Self {
        Self {
            report: Box::new(report),
            run_log: None,
        }
    }

    #[must_use]
    pub fn with_run_log(mut self, run_log: impl Write + 'a) -> Self {
        self.run_log = Some(Box::new(run_log));
        self
    }

    /// Append a line to the run log, if there is one.
    pub fn log_line(&mut self, message: impl AsRef<str>) -> Result<(), CgcError> {
        if let Some(log) = self.run_log.as_mut() {
            writeln!(log, "{}", message.as_ref())?;
        }
        Ok(())
    }

    pub fn flush(&mut self) -> Result<(), CgcError> {
        self.report.flush()?;
        if let Some(log) = self.run_log.as_mut() {
            log.flush()?;
        }
        Ok(())
    }
}

/// A report file that is created on the first write.
///
/// An existing file at `path` is only truncated once the report is written,
/// so a run that fails while reading its inputs leaves it untouched.
#[derive(Debug)]
pub struct DeferredFile {
    path: PathBuf,
    file: Option<BufWriter<File>>,
}

impl DeferredFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            file: None,
        }
    }

    fn file(&mut self) -> io::Result<&mut BufWriter<File>> {
        let file = match self.file.take() {
            Some(file) => file,
            None => BufWriter::new(File::create(&self.path)?),
        };
        Ok(self.file.insert(file))
    }
}

impl Write for DeferredFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.file()?.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        match self.file.as_mut() {
            Some(file) => file.flush(),
            None => Ok(()),
        }
    }
}

/// Pipeline driver: reads normalized files, compares them and writes the
/// report.
///
/// # Examples
///
/// ```rust,no_run
/// use cgc_core::{CgcAnalyzer, config::CgcConfig, engine::RunContext};
///
/// let analyzer = CgcAnalyzer::new(CgcConfig::default());
/// let mut ctx = RunContext::new(std::io::stdout());
/// let summary = analyzer.compare_files(&["prodigal.cgc", "glimmer.cgc"], &mut ctx)?;
/// eprintln!("{summary}");
/// # Ok::<(), cgc_core::types::CgcError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct CgcAnalyzer {
    pub config: CgcConfig,
}

impl CgcAnalyzer {
    pub const fn new(config: CgcConfig) -> Self {
        Self { config }
    }

    /// Read and sort one normalized file.
    ///
    /// A file without a header comment is labeled with its file name.
    /// Skipped records are written to the run log.
    ///
    /// # Errors
    ///
    /// [`CgcError::IoError`] if the file cannot be opened or read.
    pub fn read_call_set(
        &self,
        path: &Path,
        ctx: &mut RunContext<'_>,
    ) -> Result<GeneCallSet, CgcError> {
        let file = File::open(path)?;
        let mut set = GeneCallSet::new();
        set.add_gene_calls(BufReader::new(file))?;

        let file_name = path
            .file_name()
            .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned());
        if set.label().is_empty() {
            warn!("{file_name} has no caller header; using the file name as its label");
            set.set_label_if_missing(&file_name);
        }
        set.sort_gene_calls();

        ctx.log_line(format!(
            "Read {} {} calls from {}",
            set.len(),
            set.label(),
            path.display()
        ))?;
        for skipped in set.skipped() {
            ctx.log_line(format!("ERROR: skipped record in {file_name}, {skipped}"))?;
        }
        Ok(set)
    }

    /// Build a classified comparison of `paths`, in order.
    ///
    /// Returns the comparison and the total number of skipped records.
    ///
    /// # Errors
    ///
    /// [`CgcError::IoError`] for an unreadable file and
    /// [`CgcError::DuplicateCaller`] when two files name the same caller.
    pub fn build_comparison<P: AsRef<Path>>(
        &self,
        paths: &[P],
        ctx: &mut RunContext<'_>,
    ) -> Result<(Comparison, usize), CgcError> {
        let mut comparison = Comparison::with_match_policy(self.config.match_policy);
        let mut skipped = 0;
        for path in paths {
            let set = self.read_call_set(path.as_ref(), ctx)?;
            skipped += set.skipped().len();
            if self.config.dump_calls {
                if let Some(log) = ctx.run_log.as_mut() {
                    set.print_all(log)?;
                }
            }
            comparison.merge(set)?;
        }

        if comparison.callers().len() < MIN_INPUT_FILES {
            warn!(
                "Only {} caller(s) to compare; every call will be common core",
                comparison.callers().len()
            );
        }
        comparison.compare();
        comparison.identify_common_core();
        if self.config.dump_calls {
            if let Some(log) = ctx.run_log.as_mut() {
                comparison.print_all(log)?;
            }
        }
        Ok((comparison, skipped))
    }

    /// Compare `paths` and write the report to the context.
    ///
    /// # Errors
    ///
    /// Any error of [`build_comparison`](Self::build_comparison), or
    /// [`CgcError::IoError`] when writing the report fails.
    pub fn compare_files<P: AsRef<Path>>(
        &self,
        paths: &[P],
        ctx: &mut RunContext<'_>,
    ) -> Result<ComparisonSummary, CgcError> {
        let (comparison, skipped_records) = self.build_comparison(paths, ctx)?;
        comparison.print_report(&mut ctx.report, self.config.report_format)?;

        let summary = ComparisonSummary {
            skipped_records,
            ..comparison.summary()
        };
        info!("{summary}");
        ctx.log_line(format!("Processing complete: {summary}"))?;
        ctx.flush()?;
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{MatchPolicy, ReportFormat};
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn write_file(dir: &TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    fn fixture(dir: &TempDir) -> Vec<PathBuf> {
        vec![
            write_file(
                dir,
                "prodigal.cgc",
                "# prodigal gene calls, taken from file genome.sco\n\
                 Gene No.\tStrand\tLeftEnd\tRightEnd\tLength\tContig\n\
                 1\t+\t10\t100\t91\tc1\n\
                 2\t+\t500\t800\t301\tc1\n\
                 # END\n",
            ),
            write_file(
                dir,
                "glimmer.cgc",
                "# glimmer gene calls, taken from file run3.predict\n\
                 Gene No.\tStrand\tLeftEnd\tRightEnd\tLength\tContig\n\
                 1\t+\t10\t115\t106\tc1\n\
                 2\t-\t900\t990\t91\tc1\n\
                 3\t?\t1\t2\t2\tc1\n\
                 # END\n",
            ),
        ]
    }

    #[test]
    fn test_compare_files_writes_report_and_summary() {
        let dir = TempDir::new().unwrap();
        let paths = fixture(&dir);
        let mut report = Vec::new();
        let mut log = Vec::new();

        let summary = {
            let mut ctx = RunContext::new(&mut report).with_run_log(&mut log);
            CgcAnalyzer::default().compare_files(&paths, &mut ctx).unwrap()
        };

        assert_eq!(summary.callers, 2);
        assert_eq!(summary.total_calls, 4);
        assert_eq!(summary.common_core_loci, 1);
        assert_eq!(summary.partial_loci, 0);
        assert_eq!(summary.unique_calls, 2);
        assert_eq!(summary.skipped_records, 1);

        let report = String::from_utf8(report).unwrap();
        assert!(report.contains("# Common core: 1 loci"));
        let log = String::from_utf8(log).unwrap();
        assert!(log.contains("Read 2 prodigal calls"));
        assert!(log.contains("ERROR: skipped record in glimmer.cgc, line 5"));
        assert!(log.contains("Processing complete: 2 callers"));
    }

    #[test]
    fn test_compare_files_tsv_and_exact() {
        let dir = TempDir::new().unwrap();
        let paths = fixture(&dir);
        let analyzer = CgcAnalyzer::new(CgcConfig {
            match_policy: MatchPolicy::ExactBoundaries,
            report_format: ReportFormat::Tsv,
            ..Default::default()
        });
        let mut report = Vec::new();
        let summary = analyzer
            .compare_files(&paths, &mut RunContext::new(&mut report))
            .unwrap();

        assert_eq!(summary.common_core_loci, 0);
        assert_eq!(summary.unique_calls, 4);
        let report = String::from_utf8(report).unwrap();
        assert!(report.starts_with("locus\tclass"));
        assert_eq!(report.lines().count(), 5);
    }

    #[test]
    fn test_dump_calls_goes_to_run_log() {
        let dir = TempDir::new().unwrap();
        let paths = fixture(&dir);
        let analyzer = CgcAnalyzer::new(CgcConfig {
            dump_calls: true,
            ..Default::default()
        });
        let mut report = Vec::new();
        let mut log = Vec::new();
        {
            let mut ctx = RunContext::new(&mut report).with_run_log(&mut log);
            analyzer.compare_files(&paths, &mut ctx).unwrap();
        }
        let log = String::from_utf8(log).unwrap();
        assert!(log.contains("# prodigal (Prodigal): 2 calls\n"));
        assert!(log.contains("# glimmer (Glimmer): 2 calls\n"));
        assert!(log.contains("# All calls: 4 from 2 callers\n"));
    }

    #[test]
    fn test_missing_file_is_fatal() {
        let dir = TempDir::new().unwrap();
        let mut paths = fixture(&dir);
        paths.push(dir.path().join("missing.cgc"));
        let mut report = Vec::new();
        let result =
            CgcAnalyzer::default().compare_files(&paths, &mut RunContext::new(&mut report));
        assert!(matches!(result, Err(CgcError::IoError(_))));
        assert!(report.is_empty());
    }

    #[test]
    fn test_failed_run_keeps_existing_report_file() {
        let dir = TempDir::new().unwrap();
        let mut paths = fixture(&dir);
        paths.push(dir.path().join("missing.cgc"));
        let report_path = write_file(&dir, "report.txt", "previous report\n");

        let result = CgcAnalyzer::default()
            .compare_files(&paths, &mut RunContext::new(DeferredFile::new(&report_path)));
        assert!(result.is_err());
        assert_eq!(fs::read_to_string(&report_path).unwrap(), "previous report\n");

        paths.pop();
        CgcAnalyzer::default()
            .compare_files(&paths, &mut RunContext::new(DeferredFile::new(&report_path)))
            .unwrap();
        let report = fs::read_to_string(&report_path).unwrap();
        assert!(report.starts_with("# Compare Gene Calls report"));
    }

    #[test]
    fn test_deferred_file_is_not_created_without_writes() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("never.txt");
        let mut sink = DeferredFile::new(&path);
        sink.flush().unwrap();
        assert!(!path.exists());
    }

    #[test]
    fn test_duplicate_caller_files() {
        let dir = TempDir::new().unwrap();
        let first = write_file(&dir, "a.cgc", "# prodigal gene calls\n1\t+\t10\t100\t91\tc1\n");
        let second = write_file(&dir, "b.cgc", "# prodigal gene calls\n1\t+\t10\t100\t91\tc1\n");
        let mut report = Vec::new();
        let result = CgcAnalyzer::default()
            .compare_files(&[first, second], &mut RunContext::new(&mut report));
        assert!(matches!(result, Err(CgcError::DuplicateCaller(_))));
    }

    #[test]
    fn test_headerless_file_uses_file_name() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "genemark_calls.txt", "1\t+\t10\t100\t91\tc1\n");
        let analyzer = CgcAnalyzer::default();
        let mut sink = Vec::new();
        let set = analyzer
            .read_call_set(&path, &mut RunContext::new(&mut sink))
            .unwrap();
        assert_eq!(set.label(), "genemark_calls.txt");
        assert_eq!(set.gene_caller(), crate::types::GeneCaller::GeneMark);
    }

    #[test]
    fn test_single_file_is_all_common_core() {
        let dir = TempDir::new().unwrap();
        let paths = fixture(&dir);
        let mut report = Vec::new();
        let summary = CgcAnalyzer::default()
            .compare_files(&paths[..1], &mut RunContext::new(&mut report))
            .unwrap();
        assert_eq!(summary.common_core_loci, 2);
        assert_eq!(summary.unique_calls, 0);
    }
}
