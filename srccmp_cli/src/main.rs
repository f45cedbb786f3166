use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use srccmp_common::{
    ensure_config, load_config, normalize_extensions, parse_extensions, AppConfig, CompareConfig,
    CompareError, CompareMode, Pairing, SearchScope, Status, VerbosityMask,
};
use srccmp_core::report::DEFAULT_WIDTH;
use srccmp_core::{ComparisonEngine, DirectoryOutcome, LocalSource, RunStatistics};
use std::io::{self, IsTerminal, Write};
use std::path::{Path, PathBuf};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Exit code when a directory comparison found differences
const EXIT_DIFFERENT: i32 = 2;
const EXIT_ERROR: i32 = 1;

#[derive(Parser)]
#[command(name = "srccmp")]
#[command(author = "srccmp Contributors")]
#[command(version = "0.1.0")]
#[command(about = "Verify that a copied source tree matches its origin", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compare two directories by file name and content
    Dir {
        /// First directory
        path1: PathBuf,

        /// Second directory
        path2: PathBuf,

        #[command(flatten)]
        options: CompareArgs,
    },

    /// Compare two files by content
    File {
        /// First file
        path1: PathBuf,

        /// Second file
        path2: PathBuf,

        #[command(flatten)]
        options: CompareArgs,
    },

    /// Create the config file if missing and print its location
    Config {
        /// Keep the config file next to the executable
        #[arg(long)]
        portable: bool,
    },
}

#[derive(Args, Debug, Default, Clone)]
struct CompareArgs {
    /// Display status labels in color
    #[arg(short = 'c', long)]
    color: bool,

    /// Search the top directory only
    #[arg(short = 't', long)]
    top: bool,

    /// Descend into symlinked directories
    #[arg(long)]
    follow_links: bool,

    /// Include only these extensions, e.g. "*.h;*.cpp"
    #[arg(long = "incl", visible_alias = "include", value_name = "EXTS")]
    include: Option<String>,

    /// Exclude these extensions, e.g. "*.obj;*.pdb"
    #[arg(long = "excl", visible_alias = "exclude", value_name = "EXTS")]
    exclude: Option<String>,

    /// Show matched files
    #[arg(long = "match", visible_alias = "ok")]
    show_matched: bool,

    /// Show content mismatches
    #[arg(long = "mismatch", visible_alias = "hash")]
    show_mismatched: bool,

    /// Show files missing from the other side
    #[arg(long = "missing", visible_alias = "file")]
    show_missing: bool,

    /// Show mismatched and missing files
    #[arg(long)]
    diff: bool,

    /// Show matched and mismatched files
    #[arg(long)]
    found: bool,

    /// No per-file output
    #[arg(long)]
    noverb: bool,

    /// Report width in columns (defaults to the terminal width)
    #[arg(long)]
    width: Option<u16>,

    /// Output results as JSON
    #[arg(long)]
    json: bool,
}

fn main() {
    // Tracing goes to stderr so the report on stdout stays clean
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Dir {
            path1,
            path2,
            options,
        } => run_compare(CompareMode::Directories, path1, path2, &options),
        Commands::File {
            path1,
            path2,
            options,
        } => run_compare(CompareMode::Files, path1, path2, &options),
        Commands::Config { portable } => run_config(portable),
    };

    let code = result.unwrap_or_else(|e| {
        error!("{:#}", e);
        EXIT_ERROR
    });
    std::process::exit(code);
}

fn run_config(portable: bool) -> anyhow::Result<i32> {
    let loaded = ensure_config(portable)?;
    println!("{}", loaded.path.display());
    Ok(0)
}

fn run_compare(
    mode: CompareMode,
    path1: PathBuf,
    path2: PathBuf,
    options: &CompareArgs,
) -> anyhow::Result<i32> {
    let loaded = load_config(false)?;
    info!("Using config {}", loaded.path.display());

    let config = build_config(mode, path1, path2, options, &loaded.config)?;
    let width = options
        .width
        .or(loaded.config.width)
        .map(usize::from)
        .unwrap_or_else(terminal_width);

    let source = LocalSource::new().with_follow_symlinks(options.follow_links);
    let engine = ComparisonEngine::new(&source).with_width(width);

    if options.json {
        let mut sink = io::sink();
        let report = match mode {
            CompareMode::Directories => engine
                .run_directories(&config, &mut sink)
                .map(|outcome| {
                    (
                        build_json_report(&outcome, &config.verbosity),
                        outcome.all_matched(),
                    )
                }),
            CompareMode::Files => engine
                .run_files(&config, &mut sink)
                .map(|pairing| (build_file_json_report(&config, pairing), true)),
        };
        return match report {
            Ok((report, all_matched)) => {
                println!("{}", serde_json::to_string_pretty(&report)?);
                Ok(exit_code(mode, all_matched))
            }
            Err(e) => setup_failure(e),
        };
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let all_matched = match mode {
        CompareMode::Directories => engine
            .run_directories(&config, &mut out)
            .map(|outcome| outcome.all_matched()),
        CompareMode::Files => engine.run_files(&config, &mut out).map(|_| true),
    };
    out.flush()?;

    match all_matched {
        Ok(all_matched) => Ok(exit_code(mode, all_matched)),
        Err(e) => setup_failure(e),
    }
}

/// A run that was aborted before comparing is reported, not propagated
fn setup_failure(e: CompareError) -> anyhow::Result<i32> {
    if e.is_setup() {
        error!("{}", e);
        return Ok(EXIT_ERROR);
    }
    Err(e).context("comparison failed")
}

/// File mode exits 0 whenever the comparison ran
fn exit_code(mode: CompareMode, all_matched: bool) -> i32 {
    match mode {
        CompareMode::Directories if !all_matched => EXIT_DIFFERENT,
        _ => 0,
    }
}

fn terminal_width() -> usize {
    if io::stdout().is_terminal() {
        if let Ok((cols, _)) = crossterm::terminal::size() {
            return usize::from(cols);
        }
    }
    DEFAULT_WIDTH
}

/// Merge command-line switches over config file defaults
fn build_config(
    mode: CompareMode,
    path1: PathBuf,
    path2: PathBuf,
    options: &CompareArgs,
    defaults: &AppConfig,
) -> anyhow::Result<CompareConfig> {
    let include_extensions = match (&options.include, &defaults.include_extensions) {
        (Some(list), _) => Some(parse_extensions(list)?),
        (None, Some(list)) => Some(normalize_extensions(list)?),
        (None, None) => None,
    };
    let exclude_extensions = match (&options.exclude, &defaults.exclude_extensions) {
        (Some(list), _) => Some(parse_extensions(list)?),
        (None, Some(list)) => Some(normalize_extensions(list)?),
        (None, None) => None,
    };

    let scope = if options.top || defaults.top_directory_only {
        SearchScope::TopLevelOnly
    } else {
        SearchScope::Recursive
    };

    Ok(CompareConfig {
        mode,
        scope,
        verbosity: verbosity_from(options),
        include_extensions,
        exclude_extensions,
        color: options.color || defaults.color,
        path1,
        path2,
    })
}

/// `--noverb` wins over every other output switch; no switch means all
fn verbosity_from(options: &CompareArgs) -> VerbosityMask {
    if options.noverb {
        return VerbosityMask::OFF;
    }

    let mut mask = VerbosityMask::OFF;
    if options.show_matched {
        mask = mask.with(Status::Match);
    }
    if options.show_mismatched {
        mask = mask.with(Status::ContentMismatch);
    }
    if options.show_missing {
        mask = mask.with(Status::Missing);
    }
    if options.diff {
        mask = mask.with(Status::ContentMismatch).with(Status::Missing);
    }
    if options.found {
        mask = mask.with(Status::Match).with(Status::ContentMismatch);
    }

    if mask.is_off() {
        VerbosityMask::ALL
    } else {
        mask
    }
}

#[derive(Serialize)]
struct JsonReport {
    primary: String,
    secondary: String,
    swapped: bool,
    summary: JsonSummary,
    entries: Vec<JsonEntry>,
}

#[derive(Serialize)]
struct JsonSummary {
    total: usize,
    listed: usize,
    matched: usize,
    mismatched: usize,
    missing: usize,
    compared: usize,
    matched_percent: usize,
    mismatched_percent: usize,
    missing_percent: usize,
    compared_percent: usize,
}

#[derive(Serialize)]
struct JsonEntry {
    name: String,
    status: Status,
    primary: String,
    secondary: Option<String>,
    primary_digest: Option<String>,
    secondary_digest: Option<String>,
}

fn build_json_report(outcome: &DirectoryOutcome, verbosity: &VerbosityMask) -> JsonReport {
    let entries = outcome
        .pairings
        .iter()
        .filter(|pairing| verbosity.shows(pairing.status))
        .map(json_entry)
        .collect();

    JsonReport {
        primary: path_string(&outcome.primary_root),
        secondary: path_string(&outcome.secondary_root),
        swapped: outcome.swapped,
        summary: json_summary(&outcome.stats),
        entries,
    }
}

fn build_file_json_report(config: &CompareConfig, pairing: Pairing) -> JsonReport {
    let mut stats = RunStatistics::new(1);
    stats.record(pairing.status);
    stats.record_listed();

    JsonReport {
        primary: path_string(&config.path1),
        secondary: path_string(&config.path2),
        swapped: false,
        summary: json_summary(&stats),
        entries: vec![json_entry(&pairing)],
    }
}

fn json_summary(stats: &RunStatistics) -> JsonSummary {
    JsonSummary {
        total: stats.total,
        listed: stats.listed,
        matched: stats.matched,
        mismatched: stats.mismatched,
        missing: stats.missing,
        compared: stats.compared(),
        matched_percent: stats.percent(stats.matched),
        mismatched_percent: stats.percent(stats.mismatched),
        missing_percent: stats.percent(stats.missing),
        compared_percent: stats.percent(stats.compared()),
    }
}

fn json_entry(pairing: &Pairing) -> JsonEntry {
    JsonEntry {
        name: pairing.primary.name().to_string(),
        status: pairing.status,
        primary: path_string(pairing.primary.path()),
        secondary: pairing.secondary.as_ref().map(|e| path_string(e.path())),
        primary_digest: pairing.primary.digest().map(|d| d.to_hex()),
        secondary_digest: pairing
            .secondary
            .as_ref()
            .and_then(|e| e.digest())
            .map(|d| d.to_hex()),
    }
}

fn path_string(path: &Path) -> String {
    path.to_string_lossy().to_string()
}
