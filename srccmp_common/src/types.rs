use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Content digest size in bytes (256 bits)
pub const DIGEST_LEN: usize = 32;

/// BLAKE3 content digest (32 bytes)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Digest(pub [u8; DIGEST_LEN]);

impl Digest {
    pub fn as_bytes(&self) -> &[u8; DIGEST_LEN] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl From<blake3::Hash> for Digest {
    fn from(hash: blake3::Hash) -> Self {
        Self(*hash.as_bytes())
    }
}

/// Whether a file's content has been hashed yet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DigestState {
    #[default]
    NotComputed,
    Computed(Digest),
}

/// A candidate file discovered on one side of a comparison.
///
/// Entries are immutable: hashing produces a new entry through
/// [`FileEntry::with_digest`] rather than filling in a field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    path: PathBuf,
    name: String,
    digest: DigestState,
}

impl FileEntry {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self {
            path,
            name,
            digest: DigestState::NotComputed,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Basename used for matching across roots
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn digest_state(&self) -> DigestState {
        self.digest
    }

    /// The computed digest, or `None` before hashing (or after a failed read)
    pub fn digest(&self) -> Option<&Digest> {
        match &self.digest {
            DigestState::Computed(digest) => Some(digest),
            DigestState::NotComputed => None,
        }
    }

    pub fn with_digest(&self, digest: Digest) -> Self {
        Self {
            path: self.path.clone(),
            name: self.name.clone(),
            digest: DigestState::Computed(digest),
        }
    }
}

/// Outcome of comparing one primary file against its counterpart
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Status {
    /// Both files exist and their digests are equal
    Match,
    /// Both files exist but content differs (or one could not be read)
    ContentMismatch,
    /// No file with the same name exists on the secondary side
    Missing,
}

impl Status {
    /// Fixed-width report label
    pub fn label(&self) -> &'static str {
        match self {
            Status::Match => "MATCH    ",
            Status::ContentMismatch => "MISMATCH ",
            Status::Missing => "NOT FOUND",
        }
    }

    /// ANSI foreground color code for the label
    pub fn ansi_color(&self) -> &'static str {
        match self {
            Status::Match => "\x1b[32m",           // Green
            Status::ContentMismatch => "\x1b[33m", // Yellow
            Status::Missing => "\x1b[31m",         // Red
        }
    }
}

/// A primary entry and its same-named secondary entry, before classification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub primary: FileEntry,
    pub secondary: Option<FileEntry>,
}

/// A classified pairing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pairing {
    pub primary: FileEntry,
    pub secondary: Option<FileEntry>,
    pub status: Status,
}

/// Which statuses produce per-file report lines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VerbosityMask {
    pub matched: bool,
    pub mismatched: bool,
    pub missing: bool,
}

impl VerbosityMask {
    pub const ALL: VerbosityMask = VerbosityMask {
        matched: true,
        mismatched: true,
        missing: true,
    };

    pub const OFF: VerbosityMask = VerbosityMask {
        matched: false,
        mismatched: false,
        missing: false,
    };

    pub fn only(status: Status) -> Self {
        Self::OFF.with(status)
    }

    pub fn with(mut self, status: Status) -> Self {
        match status {
            Status::Match => self.matched = true,
            Status::ContentMismatch => self.mismatched = true,
            Status::Missing => self.missing = true,
        }
        self
    }

    pub fn union(self, other: VerbosityMask) -> Self {
        Self {
            matched: self.matched || other.matched,
            mismatched: self.mismatched || other.mismatched,
            missing: self.missing || other.missing,
        }
    }

    pub fn shows(&self, status: Status) -> bool {
        match status {
            Status::Match => self.matched,
            Status::ContentMismatch => self.mismatched,
            Status::Missing => self.missing,
        }
    }

    pub fn is_off(&self) -> bool {
        *self == Self::OFF
    }

    /// Exactly one status is selected
    pub fn is_single(&self) -> bool {
        [self.matched, self.mismatched, self.missing]
            .iter()
            .filter(|flag| **flag)
            .count()
            == 1
    }

    /// Human readable name used in the "Listing ... files" header
    pub fn describe(&self) -> &'static str {
        match (self.matched, self.mismatched, self.missing) {
            (false, false, false) => "off",
            (true, false, false) => "matched",
            (false, true, false) => "hash mismatched",
            (false, false, true) => "missing",
            (true, true, false) => "matched or mismatched",
            (false, true, true) => "different",
            (true, false, true) => "matched or missing",
            (true, true, true) => "all",
        }
    }
}

impl Default for VerbosityMask {
    fn default() -> Self {
        Self::ALL
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CompareMode {
    Files,
    Directories,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SearchScope {
    TopLevelOnly,
    #[default]
    Recursive,
}

/// Validated configuration for one comparison run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompareConfig {
    pub mode: CompareMode,
    pub scope: SearchScope,
    pub verbosity: VerbosityMask,
    /// Lower-case extensions with leading dot; `None` means no filter
    pub include_extensions: Option<Vec<String>>,
    pub exclude_extensions: Option<Vec<String>>,
    pub color: bool,
    pub path1: PathBuf,
    pub path2: PathBuf,
}

impl CompareConfig {
    pub fn new(mode: CompareMode, path1: impl Into<PathBuf>, path2: impl Into<PathBuf>) -> Self {
        Self {
            mode,
            scope: SearchScope::default(),
            verbosity: VerbosityMask::default(),
            include_extensions: None,
            exclude_extensions: None,
            color: false,
            path1: path1.into(),
            path2: path2.into(),
        }
    }
}

/// Persistent defaults read from `srccmp.toml`
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct AppConfig {
    /// Colorize status labels
    #[serde(default)]
    pub color: bool,

    /// Search only the top directory of each root
    #[serde(default)]
    pub top_directory_only: bool,

    /// Extensions to include (e.g. "*.h", ".cpp")
    #[serde(default)]
    pub include_extensions: Option<Vec<String>>,

    /// Extensions to exclude (e.g. "*.obj")
    #[serde(default)]
    pub exclude_extensions: Option<Vec<String>>,

    /// Report width used instead of the terminal width
    #[serde(default)]
    pub width: Option<u16>,

    /// Enable portable mode (config alongside binary)
    #[serde(default)]
    pub portable_mode: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_entry_name_is_basename() {
        let entry = FileEntry::new("/src/inc/header.h");
        assert_eq!(entry.name(), "header.h");
        assert_eq!(entry.path(), Path::new("/src/inc/header.h"));
        assert_eq!(entry.digest_state(), DigestState::NotComputed);
        assert!(entry.digest().is_none());
    }

    #[test]
    fn test_with_digest_leaves_receiver_untouched() {
        let entry = FileEntry::new("a.txt");
        let hashed = entry.with_digest(Digest([7; 32]));

        assert!(entry.digest().is_none());
        assert_eq!(hashed.digest(), Some(&Digest([7; 32])));
        assert_eq!(hashed.name(), "a.txt");
    }

    #[test]
    fn test_verbosity_mask_flags() {
        let mask = VerbosityMask::only(Status::ContentMismatch);
        assert!(mask.shows(Status::ContentMismatch));
        assert!(!mask.shows(Status::Match));
        assert!(!mask.shows(Status::Missing));
        assert!(mask.is_single());
        assert!(!mask.is_off());

        let both = mask.with(Status::Missing);
        assert!(!both.is_single());
        assert_eq!(both.describe(), "different");

        assert!(VerbosityMask::OFF.is_off());
        assert!(!VerbosityMask::OFF.is_single());
        assert_eq!(VerbosityMask::default(), VerbosityMask::ALL);
    }

    #[test]
    fn test_verbosity_mask_describe() {
        assert_eq!(VerbosityMask::ALL.describe(), "all");
        assert_eq!(VerbosityMask::only(Status::Match).describe(), "matched");
        assert_eq!(
            VerbosityMask::only(Status::Match)
                .union(VerbosityMask::only(Status::ContentMismatch))
                .describe(),
            "matched or mismatched"
        );
        assert_eq!(
            VerbosityMask::only(Status::Match).with(Status::Missing).describe(),
            "matched or missing"
        );
    }

    #[test]
    fn test_status_labels_are_fixed_width() {
        for status in [Status::Match, Status::ContentMismatch, Status::Missing] {
            assert_eq!(status.label().len(), 9);
        }
    }

    #[test]
    fn test_digest_hex() {
        let digest = Digest([0xab; 32]);
        assert_eq!(digest.to_hex().len(), 64);
        assert!(digest.to_hex().starts_with("abab"));
    }
}
