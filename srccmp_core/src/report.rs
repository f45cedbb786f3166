//! Text report rendering
//!
//! Rendering is split into pure `render_*` functions that build strings and
//! a thin [`Reporter`] that writes them. The report width is supplied by the
//! caller so output does not depend on the terminal the tests run in.

use crate::stats::RunStatistics;
use srccmp_common::{CompareConfig, Pairing, SearchScope, Status, VerbosityMask};
use std::io::{self, Write};
use std::path::{Path, MAIN_SEPARATOR};

const ANSI_RESET: &str = "\x1b[0m";

/// Width reserved for the two `" -> .."` arrows and surrounding spacing
const ARROW_ALLOWANCE: usize = 10 * 2;

pub const DEFAULT_WIDTH: usize = 120;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportOptions {
    pub verbosity: VerbosityMask,
    pub color: bool,
    /// Total output width in columns
    pub width: usize,
}

impl ReportOptions {
    pub fn from_config(config: &CompareConfig, width: usize) -> Self {
        Self {
            verbosity: config.verbosity,
            color: config.color,
            width,
        }
    }
}

/// Whether a pairing with `status` produces a report line
pub fn should_show(status: Status, mask: &VerbosityMask) -> bool {
    mask.shows(status)
}

/// Label for `status`; padding is dropped when the mask selects exactly
/// this status
pub fn status_label(status: Status, mask: &VerbosityMask) -> &'static str {
    if mask.is_single() && mask.shows(status) {
        status.label().trim_end()
    } else {
        status.label()
    }
}

/// Path with the root prefix removed, as plain text, always starting with a
/// separator. An empty root (a bare relative file name) or a root ending in a
/// separator such as `/` would otherwise leave the name glued to the `..`.
fn strip_root(path: &Path, root: &Path) -> String {
    let path = path.to_string_lossy();
    let root = root.to_string_lossy();
    let rest: &str = if root.is_empty() {
        &path
    } else {
        match path.strip_prefix(&*root) {
            Some(rest) => rest,
            None => return path.to_string(),
        }
    };
    if rest.starts_with(is_separator) {
        rest.to_string()
    } else {
        format!("{}{}", MAIN_SEPARATOR, rest)
    }
}

fn is_separator(c: char) -> bool {
    c == '/' || c == '\\'
}

/// Cut `path` from the front so that roughly `max_width` columns remain,
/// starting at the last directory separator at or before the cut point.
/// A path without such a separator is left whole.
pub fn truncate_front(path: &str, max_width: usize) -> String {
    let chars: Vec<char> = path.chars().collect();
    if max_width == 0 || chars.len() <= max_width {
        return path.to_string();
    }

    let cut = chars.len() - max_width;
    match chars[..=cut].iter().rposition(|c| is_separator(*c)) {
        Some(idx) => chars[idx..].iter().collect(),
        None => path.to_string(),
    }
}

/// Column width given to the primary path
pub fn column_width(total_width: usize, label: &str) -> usize {
    total_width
        .saturating_sub(label.len())
        .saturating_sub(ARROW_ALLOWANCE)
        / 2
}

/// One status line, without the trailing newline
pub fn render_status_line(
    pairing: &Pairing,
    primary_root: &Path,
    secondary_root: &Path,
    options: &ReportOptions,
) -> String {
    let label = status_label(pairing.status, &options.verbosity);
    let width = column_width(options.width, label);

    let mut line = if options.color {
        format!("{}{}{}", pairing.status.ansi_color(), label, ANSI_RESET)
    } else {
        label.to_string()
    };

    let primary = truncate_front(&strip_root(pairing.primary.path(), primary_root), width);
    line.push_str(&format!(" -> ..{:<width$}", primary, width = width));

    match (pairing.status, &pairing.secondary) {
        (Status::Match | Status::ContentMismatch, Some(secondary)) => {
            line.push_str(" -> ..");
            line.push_str(&strip_root(secondary.path(), secondary_root));
        }
        _ => {}
    }

    line
}

/// Final summary block
pub fn render_summary(stats: &RunStatistics, verbosity: &VerbosityMask) -> String {
    if stats.total == 0 {
        return "No files were compared".to_string();
    }

    let mut out = String::new();
    if !verbosity.is_off() {
        out.push_str(&format!(
            "\nListed: {:>5} {:02}%\n\n",
            stats.listed,
            stats.percent(stats.listed)
        ));
    }
    out.push_str(&format!(
        "Matched:    {:>5} {:02}%\n",
        stats.matched,
        stats.percent(stats.matched)
    ));
    out.push_str(&format!(
        "Mismatched: {:>5} {:02}%\n",
        stats.mismatched,
        stats.percent(stats.mismatched)
    ));
    out.push_str(&format!(
        "Not found:  {:>5} {:02}%\n",
        stats.missing,
        stats.percent(stats.missing)
    ));
    out.push_str(&format!(
        "Compared:   {:>5} {:02}%\n",
        stats.compared(),
        stats.percent(stats.compared())
    ));
    out
}

/// "Listing ..." and "Searching ..." header for a directory run
pub fn render_header(
    verbosity: &VerbosityMask,
    scope: SearchScope,
    include: Option<&[String]>,
    exclude: Option<&[String]>,
) -> String {
    let mut out = String::new();
    if !verbosity.is_off() {
        out.push_str(&format!("Listing {} files\n", verbosity.describe()));
    }

    out.push_str(match scope {
        SearchScope::TopLevelOnly => "Searching top directory",
        SearchScope::Recursive => "Searching directories",
    });

    match include {
        Some(exts) => out.push_str(&format!(" for *{} files", exts.join(", *"))),
        None => out.push_str(" for all files"),
    }
    if let Some(exts) = exclude {
        out.push_str(&format!(" excluding *{}", exts.join(", *")));
    }
    out
}

/// Candidate counts for both roots
pub fn render_found(
    primary: (usize, usize, &Path),
    secondary: (usize, usize, &Path),
) -> String {
    let pad = primary.0.to_string().len();
    format!(
        "\nFound {:>pad$} of {:>pad$} files in {}\nFound {:>pad$} of {:>pad$} files in {}\n",
        primary.0,
        primary.1,
        primary.2.display(),
        secondary.0,
        secondary.1,
        secondary.2.display(),
        pad = pad
    )
}

/// Writes report sections to an output stream
pub struct Reporter<'w> {
    out: &'w mut dyn Write,
    options: ReportOptions,
}

impl<'w> Reporter<'w> {
    pub fn new(out: &'w mut dyn Write, options: ReportOptions) -> Self {
        Self { out, options }
    }

    pub fn header(&mut self, config: &CompareConfig) -> io::Result<()> {
        let header = render_header(
            &self.options.verbosity,
            config.scope,
            config.include_extensions.as_deref(),
            config.exclude_extensions.as_deref(),
        );
        writeln!(self.out, "{}", header)
    }

    pub fn found(
        &mut self,
        primary: (usize, usize, &Path),
        secondary: (usize, usize, &Path),
    ) -> io::Result<()> {
        writeln!(self.out, "{}", render_found(primary, secondary))
    }

    /// Write the line for `pairing` if the mask allows it; returns whether
    /// a line was written.
    pub fn pairing(
        &mut self,
        pairing: &Pairing,
        primary_root: &Path,
        secondary_root: &Path,
    ) -> io::Result<bool> {
        if !should_show(pairing.status, &self.options.verbosity) {
            return Ok(false);
        }
        self.line(pairing, primary_root, secondary_root)?;
        Ok(true)
    }

    /// Write the line for `pairing` unconditionally
    pub fn line(
        &mut self,
        pairing: &Pairing,
        primary_root: &Path,
        secondary_root: &Path,
    ) -> io::Result<()> {
        let line = render_status_line(pairing, primary_root, secondary_root, &self.options);
        writeln!(self.out, "{}", line)
    }

    pub fn summary(&mut self, stats: &RunStatistics) -> io::Result<()> {
        writeln!(self.out, "{}", render_summary(stats, &self.options.verbosity))
    }

    pub fn message(&mut self, message: &str) -> io::Result<()> {
        writeln!(self.out, "{}", message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use srccmp_common::FileEntry;

    fn pairing(primary: &str, secondary: Option<&str>, status: Status) -> Pairing {
        Pairing {
            primary: FileEntry::new(primary),
            secondary: secondary.map(FileEntry::new),
            status,
        }
    }

    fn options(verbosity: VerbosityMask, width: usize) -> ReportOptions {
        ReportOptions {
            verbosity,
            color: false,
            width,
        }
    }

    #[test]
    fn test_should_show_single_status_mask() {
        let mask = VerbosityMask::only(Status::ContentMismatch);
        assert!(!should_show(Status::Match, &mask));
        assert!(should_show(Status::ContentMismatch, &mask));
        assert!(!should_show(Status::Missing, &mask));
        assert!(!should_show(Status::Missing, &VerbosityMask::OFF));
    }

    #[test]
    fn test_single_status_mask_trims_label() {
        assert_eq!(status_label(Status::Match, &VerbosityMask::only(Status::Match)), "MATCH");
        assert_eq!(status_label(Status::Match, &VerbosityMask::ALL), "MATCH    ");
        assert_eq!(status_label(Status::Missing, &VerbosityMask::ALL), "NOT FOUND");
    }

    #[test]
    fn test_single_mask_of_another_status_keeps_padding() {
        let mask = VerbosityMask::only(Status::Missing);
        assert_eq!(status_label(Status::Match, &mask), "MATCH    ");
        assert_eq!(status_label(Status::ContentMismatch, &mask), "MISMATCH ");
        assert_eq!(
            status_label(Status::Match, &VerbosityMask::only(Status::Match).with(Status::Missing)),
            "MATCH    "
        );
    }

    #[test]
    fn test_match_line_shows_both_sides() {
        let p = pairing("/a/x.txt", Some("/b/x.txt"), Status::Match);
        let line = render_status_line(&p, Path::new("/a"), Path::new("/b"), &options(VerbosityMask::ALL, 49));

        // (49 - 9 - 20) / 2 = 10 columns for the primary path
        assert_eq!(line, "MATCH     -> ../x.txt     -> ../x.txt");
    }

    #[test]
    fn test_missing_line_shows_primary_only() {
        let p = pairing("/a/y.txt", None, Status::Missing);
        let line = render_status_line(&p, Path::new("/a"), Path::new("/b"), &options(VerbosityMask::ALL, 49));
        assert_eq!(line, "NOT FOUND -> ../y.txt    ");
        assert_eq!(line.matches(" -> ..").count(), 1);
    }

    #[test]
    fn test_colored_label() {
        let p = pairing("/a/x.txt", Some("/b/x.txt"), Status::ContentMismatch);
        let mut opts = options(VerbosityMask::ALL, 80);
        opts.color = true;
        let line = render_status_line(&p, Path::new("/a"), Path::new("/b"), &opts);
        assert!(line.starts_with("\x1b[33mMISMATCH \x1b[0m -> .."));

        let p = pairing("/a/x.txt", Some("/b/x.txt"), Status::Match);
        let line = render_status_line(&p, Path::new("/a"), Path::new("/b"), &opts);
        assert!(line.starts_with("\x1b[32mMATCH    \x1b[0m -> .."));

        let p = pairing("/a/y.txt", None, Status::Missing);
        let line = render_status_line(&p, Path::new("/a"), Path::new("/b"), &opts);
        assert!(line.starts_with("\x1b[31mNOT FOUND\x1b[0m -> .."));
    }

    #[test]
    fn test_relative_path_with_empty_root() {
        let sep = MAIN_SEPARATOR;
        let secondary = format!("y{}x.txt", sep);
        let p = pairing("x.txt", Some(&secondary), Status::Match);
        let line = render_status_line(&p, Path::new(""), Path::new("y"), &options(VerbosityMask::ALL, 49));
        assert!(line.starts_with(&format!("MATCH     -> ..{}x.txt", sep)));
        assert!(line.ends_with(&format!(" -> ..{}x.txt", sep)));
    }

    #[test]
    fn test_root_ending_in_separator() {
        let p = pairing("/x.txt", None, Status::Missing);
        let line = render_status_line(&p, Path::new("/"), Path::new("/b"), &options(VerbosityMask::ALL, 49));
        assert!(line.starts_with("NOT FOUND -> ../x.txt"));
    }

    #[test]
    fn test_truncate_front_at_separator() {
        // cut point is index 18 - 8 = 10; the last separator at or before it is at 9
        assert_eq!(truncate_front("/long/dir/name/x.h", 8), "/name/x.h");
        assert_eq!(truncate_front("/short.h", 8), "/short.h");
        assert_eq!(truncate_front("averyveryverylongname.h", 8), "averyveryverylongname.h");
        assert_eq!(truncate_front("\\win\\dir\\file.h", 7), "\\file.h");
        assert_eq!(truncate_front("/a/b/c", 0), "/a/b/c");
    }

    #[test]
    fn test_long_primary_path_is_truncated() {
        let p = pairing("/root/deep/nested/tree/file.cpp", None, Status::Missing);
        let line = render_status_line(&p, Path::new("/root"), Path::new("/other"), &options(VerbosityMask::ALL, 53));
        // 12 columns: "/deep/nested/tree/file.cpp" is cut to "/tree/file.cpp"
        assert_eq!(line, "NOT FOUND -> ../tree/file.cpp");
    }

    #[test]
    fn test_narrow_width_does_not_panic() {
        let p = pairing("/a/x.txt", Some("/b/x.txt"), Status::Match);
        let line = render_status_line(&p, Path::new("/a"), Path::new("/b"), &options(VerbosityMask::ALL, 5));
        assert_eq!(line, "MATCH     -> ../x.txt -> ../x.txt");
    }

    #[test]
    fn test_summary_block() {
        let stats = RunStatistics {
            matched: 1,
            mismatched: 0,
            missing: 1,
            listed: 2,
            total: 2,
        };
        let summary = render_summary(&stats, &VerbosityMask::ALL);
        assert_eq!(
            summary,
            "\nListed:     2 100%\n\n\
             Matched:        1 50%\n\
             Mismatched:     0 00%\n\
             Not found:      1 50%\n\
             Compared:       2 100%\n"
        );
    }

    #[test]
    fn test_summary_without_listed_when_off() {
        let stats = RunStatistics {
            matched: 1,
            mismatched: 1,
            missing: 1,
            listed: 0,
            total: 3,
        };
        let summary = render_summary(&stats, &VerbosityMask::OFF);
        assert!(!summary.contains("Listed"));
        assert!(summary.contains("Matched:        1 33%"));
        assert!(summary.contains("Mismatched:     1 33%"));
        assert!(summary.contains("Not found:      1 33%"));
        assert!(summary.contains("Compared:       3 100%"));
    }

    #[test]
    fn test_summary_nothing_compared() {
        let stats = RunStatistics::new(0);
        assert_eq!(render_summary(&stats, &VerbosityMask::ALL), "No files were compared");
    }

    #[test]
    fn test_header() {
        let include = vec![".h".to_string(), ".cpp".to_string()];
        let exclude = vec![".obj".to_string()];
        let header = render_header(
            &VerbosityMask::only(Status::ContentMismatch),
            SearchScope::TopLevelOnly,
            Some(include.as_slice()),
            Some(exclude.as_slice()),
        );
        assert_eq!(
            header,
            "Listing hash mismatched files\nSearching top directory for *.h, *.cpp files excluding *.obj"
        );

        let header = render_header(&VerbosityMask::OFF, SearchScope::Recursive, None, None);
        assert_eq!(header, "Searching directories for all files");
    }

    #[test]
    fn test_found_lines() {
        let found = render_found((2, 3, Path::new("/a")), (1, 1, Path::new("/b")));
        assert_eq!(found, "\nFound 2 of 3 files in /a\nFound 1 of 1 files in /b\n");
    }

    #[test]
    fn test_reporter_counts_only_shown_lines() {
        let mut buf = Vec::new();
        let mut reporter = Reporter::new(&mut buf, options(VerbosityMask::only(Status::ContentMismatch), 80));

        let shown = reporter
            .pairing(&pairing("/a/x", Some("/b/x"), Status::Match), Path::new("/a"), Path::new("/b"))
            .unwrap();
        assert!(!shown);
        let shown = reporter
            .pairing(&pairing("/a/y", Some("/b/y"), Status::ContentMismatch), Path::new("/a"), Path::new("/b"))
            .unwrap();
        assert!(shown);

        let text = String::from_utf8(buf).unwrap();
        assert_eq!(text.lines().count(), 1);
        assert!(text.starts_with("MISMATCH -> ../y"));
    }
}
