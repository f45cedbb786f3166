use crate::{SearchScope, SourceError};
use std::path::{Path, PathBuf};

/// Abstraction over the filesystem primitives the comparison engine needs.
///
/// The engine never touches `std::fs` directly, which lets a run be driven
/// from the local disk or from an in-memory tree in tests.
pub trait FileSource: Send + Sync {
    /// Lists the regular files under `root` as full paths, in a stable order
    fn list_files(&self, root: &Path, scope: SearchScope) -> Result<Vec<PathBuf>, SourceError>;

    /// Reads the whole file into memory
    fn read_all(&self, path: &Path) -> Result<Vec<u8>, SourceError>;

    /// Checks if a regular file exists at `path`
    fn exists(&self, path: &Path) -> bool;

    /// Checks if a directory exists at `path`
    fn is_dir(&self, path: &Path) -> bool;
}
