use crate::classifier::Classifier;
use crate::matcher::{match_entries, orient, RootListing};
use crate::report::{ReportOptions, Reporter, DEFAULT_WIDTH};
use crate::scanner::{filter_entries, ExtensionFilter, FolderScanner};
use crate::stats::RunStatistics;
use srccmp_common::{Candidate, CompareConfig, CompareError, FileEntry, FileSource, Pairing};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Result of a directory comparison
#[derive(Debug, Clone)]
pub struct DirectoryOutcome {
    pub primary_root: PathBuf,
    pub secondary_root: PathBuf,
    /// The roots were swapped because the second one had more files
    pub swapped: bool,
    pub pairings: Vec<Pairing>,
    pub stats: RunStatistics,
}

impl DirectoryOutcome {
    pub fn all_matched(&self) -> bool {
        self.stats.all_matched()
    }
}

/// Comparison engine for a file pair or two directory roots
pub struct ComparisonEngine<'a> {
    source: &'a dyn FileSource,
    width: usize,
}

impl<'a> ComparisonEngine<'a> {
    pub fn new(source: &'a dyn FileSource) -> Self {
        Self {
            source,
            width: DEFAULT_WIDTH,
        }
    }

    /// Report width in columns, normally the terminal width
    pub fn with_width(mut self, width: usize) -> Self {
        self.width = width;
        self
    }

    /// Compare two directories, writing the report to `out`.
    ///
    /// Returns true iff every compared file matched. Setup failures are
    /// written to `out` and return false.
    pub fn compare_directories(&self, config: &CompareConfig, out: &mut dyn Write) -> bool {
        match self.run_directories(config, out) {
            Ok(outcome) => outcome.all_matched(),
            Err(e) => {
                report_failure(out, &e);
                false
            }
        }
    }

    /// Compare two files, writing the status line to `out`.
    ///
    /// Returns true when the comparison ran, whatever its status; the
    /// status itself is the report line (or [`ComparisonEngine::run_files`]).
    pub fn compare_files(&self, config: &CompareConfig, out: &mut dyn Write) -> bool {
        match self.run_files(config, out) {
            Ok(_) => true,
            Err(e) => {
                report_failure(out, &e);
                false
            }
        }
    }

    pub fn run_directories(
        &self,
        config: &CompareConfig,
        out: &mut dyn Write,
    ) -> Result<DirectoryOutcome, CompareError> {
        self.check_dirs(&config.path1, &config.path2)?;

        info!("Comparing directories:");
        info!("  dir1: {}", config.path1.display());
        info!("  dir2: {}", config.path2.display());

        let scanner = FolderScanner::new(self.source, config.scope);
        let files1 = scanner.scan(&config.path1)?;
        let files2 = scanner.scan(&config.path2)?;

        let mut reporter = Reporter::new(out, ReportOptions::from_config(config, self.width));
        reporter.header(config)?;

        let oriented = orient(
            RootListing {
                root: config.path1.clone(),
                files: files1,
            },
            RootListing {
                root: config.path2.clone(),
                files: files2,
            },
        );
        let primary_root = oriented.primary.root;
        let secondary_root = oriented.secondary.root;

        let filter = ExtensionFilter::from_config(config);
        let primary_entries = filter_entries(&oriented.primary.files, &filter);
        let secondary_entries: Vec<FileEntry> = oriented
            .secondary
            .files
            .iter()
            .map(|path| FileEntry::new(path.clone()))
            .collect();

        reporter.found(
            (primary_entries.len(), oriented.primary.files.len(), &primary_root),
            (secondary_entries.len(), oriented.secondary.files.len(), &secondary_root),
        )?;

        if primary_entries.is_empty() {
            return Err(CompareError::NothingToCompare);
        }

        let classifier = Classifier::new(self.source);
        let mut stats = RunStatistics::new(primary_entries.len());
        let mut pairings = Vec::with_capacity(primary_entries.len());

        for candidate in match_entries(primary_entries, &secondary_entries) {
            let pairing = classifier.classify(candidate);
            stats.record(pairing.status);
            if reporter.pairing(&pairing, &primary_root, &secondary_root)? {
                stats.record_listed();
            }
            pairings.push(pairing);
        }

        reporter.summary(&stats)?;

        info!(
            "Compared {} files: {} matched, {} mismatched, {} missing",
            stats.compared(),
            stats.matched,
            stats.mismatched,
            stats.missing
        );

        Ok(DirectoryOutcome {
            primary_root,
            secondary_root,
            swapped: oriented.swapped,
            pairings,
            stats,
        })
    }

    /// The status line of a file comparison is always written, whatever the
    /// verbosity mask.
    pub fn run_files(
        &self,
        config: &CompareConfig,
        out: &mut dyn Write,
    ) -> Result<Pairing, CompareError> {
        if !self.source.exists(&config.path1) {
            return Err(CompareError::MissingFile1(config.path1.clone()));
        }
        if !self.source.exists(&config.path2) {
            return Err(CompareError::MissingFile2(config.path2.clone()));
        }

        info!(
            "Comparing files {} and {}",
            config.path1.display(),
            config.path2.display()
        );

        let pairing = Classifier::new(self.source).classify(Candidate {
            primary: FileEntry::new(config.path1.clone()),
            secondary: Some(FileEntry::new(config.path2.clone())),
        });

        let mut reporter = Reporter::new(out, ReportOptions::from_config(config, self.width));
        reporter.line(&pairing, parent_of(&config.path1), parent_of(&config.path2))?;

        Ok(pairing)
    }

    fn check_dirs(&self, dir1: &Path, dir2: &Path) -> Result<(), CompareError> {
        if !self.source.is_dir(dir1) {
            return Err(CompareError::MissingDir1(dir1.to_path_buf()));
        }
        if !self.source.is_dir(dir2) {
            return Err(CompareError::MissingDir2(dir2.to_path_buf()));
        }
        if dir1 == dir2 {
            return Err(CompareError::SameDirectory);
        }
        Ok(())
    }
}

fn parent_of(path: &Path) -> &Path {
    path.parent().unwrap_or_else(|| Path::new(""))
}

fn report_failure(out: &mut dyn Write, error: &CompareError) {
    warn!("Comparison aborted: {}", error);
    if let Err(e) = writeln!(out, "{}", error) {
        warn!("Failed to write report: {}", e);
    }
}
