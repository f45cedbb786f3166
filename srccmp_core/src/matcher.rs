use srccmp_common::{Candidate, FileEntry};
use std::path::PathBuf;
use tracing::debug;

/// One root and the raw candidate files found under it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RootListing {
    pub root: PathBuf,
    pub files: Vec<PathBuf>,
}

/// The two roots after the swap rule has been applied
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrientedRoots {
    pub primary: RootListing,
    pub secondary: RootListing,
    pub swapped: bool,
}

/// The root with strictly more raw files becomes primary; ties keep the
/// caller's order.
pub fn orient(first: RootListing, second: RootListing) -> OrientedRoots {
    if first.files.len() < second.files.len() {
        debug!(
            "Swapping roots: {:?} has {} files, {:?} has {}",
            second.root,
            second.files.len(),
            first.root,
            first.files.len()
        );
        OrientedRoots {
            primary: second,
            secondary: first,
            swapped: true,
        }
    } else {
        OrientedRoots {
            primary: first,
            secondary: second,
            swapped: false,
        }
    }
}

/// Pair every primary entry with the first secondary entry of the same name.
///
/// Secondary entries without a primary counterpart are not reported.
pub fn match_entries(primary: Vec<FileEntry>, secondary: &[FileEntry]) -> Vec<Candidate> {
    primary
        .into_iter()
        .map(|entry| {
            let counterpart = secondary
                .iter()
                .find(|other| other.name() == entry.name())
                .cloned();
            Candidate {
                primary: entry,
                secondary: counterpart,
            }
        })
        .collect()
}
