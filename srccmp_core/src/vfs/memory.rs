//! In-memory file source
//!
//! Holds a fixed tree of files in memory and records every read, so a
//! comparison can be checked for which files it actually opened. Files can
//! be marked unreadable to exercise the per-file read failure path.

use srccmp_common::{FileSource, SearchScope, SourceError};
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

enum MemoryFile {
    Contents(Vec<u8>),
    Unreadable,
}

pub struct MemorySource {
    files: BTreeMap<PathBuf, MemoryFile>,
    dirs: BTreeSet<PathBuf>,
    reads: Mutex<Vec<PathBuf>>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self {
            files: BTreeMap::new(),
            dirs: BTreeSet::new(),
            reads: Mutex::new(Vec::new()),
        }
    }

    /// Add a file; its parent directories are created implicitly
    pub fn with_file(mut self, path: impl Into<PathBuf>, contents: impl AsRef<[u8]>) -> Self {
        let path = path.into();
        self.add_parents(&path);
        self.files
            .insert(path, MemoryFile::Contents(contents.as_ref().to_vec()));
        self
    }

    /// Add a file that is listed but fails every read
    pub fn with_unreadable(mut self, path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        self.add_parents(&path);
        self.files.insert(path, MemoryFile::Unreadable);
        self
    }

    /// Add an empty directory
    pub fn with_dir(mut self, path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        self.add_parents(&path);
        self.dirs.insert(path);
        self
    }

    /// Paths read so far, in order
    pub fn reads(&self) -> Vec<PathBuf> {
        self.reads.lock().map(|r| r.clone()).unwrap_or_default()
    }

    fn add_parents(&mut self, path: &Path) {
        let mut current = path.parent();
        while let Some(parent) = current {
            if parent.as_os_str().is_empty() {
                break;
            }
            self.dirs.insert(parent.to_path_buf());
            current = parent.parent();
        }
    }
}

impl Default for MemorySource {
    fn default() -> Self {
        Self::new()
    }
}

impl FileSource for MemorySource {
    fn list_files(&self, root: &Path, scope: SearchScope) -> Result<Vec<PathBuf>, SourceError> {
        if !self.dirs.contains(root) {
            return Err(SourceError::NotFound(root.display().to_string()));
        }

        let files = self
            .files
            .keys()
            .filter(|path| match scope {
                SearchScope::Recursive => path.starts_with(root),
                SearchScope::TopLevelOnly => path.parent() == Some(root),
            })
            .cloned()
            .collect();
        Ok(files)
    }

    fn read_all(&self, path: &Path) -> Result<Vec<u8>, SourceError> {
        if let Ok(mut reads) = self.reads.lock() {
            reads.push(path.to_path_buf());
        }

        match self.files.get(path) {
            Some(MemoryFile::Contents(bytes)) => Ok(bytes.clone()),
            Some(MemoryFile::Unreadable) => Err(SourceError::Io(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                format!("unreadable: {}", path.display()),
            ))),
            None => Err(SourceError::NotFound(path.display().to_string())),
        }
    }

    fn exists(&self, path: &Path) -> bool {
        self.files.contains_key(path)
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.dirs.contains(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_listing_scopes() {
        let source = MemorySource::new()
            .with_file("/r/a.txt", "a")
            .with_file("/r/sub/b.txt", "b")
            .with_file("/other/c.txt", "c");

        let all = source.list_files(Path::new("/r"), SearchScope::Recursive).unwrap();
        assert_eq!(all, vec![PathBuf::from("/r/a.txt"), PathBuf::from("/r/sub/b.txt")]);

        let top = source.list_files(Path::new("/r"), SearchScope::TopLevelOnly).unwrap();
        assert_eq!(top, vec![PathBuf::from("/r/a.txt")]);

        assert!(source.is_dir(Path::new("/r/sub")));
        assert!(source.list_files(Path::new("/missing"), SearchScope::Recursive).is_err());
    }

    #[test]
    fn test_memory_reads_are_recorded() {
        let source = MemorySource::new()
            .with_file("/r/a.txt", "a")
            .with_unreadable("/r/b.txt");

        assert_eq!(source.read_all(Path::new("/r/a.txt")).unwrap(), b"a");
        assert!(source.read_all(Path::new("/r/b.txt")).is_err());
        assert_eq!(
            source.reads(),
            vec![PathBuf::from("/r/a.txt"), PathBuf::from("/r/b.txt")]
        );
    }

    #[test]
    fn test_memory_empty_dir() {
        let source = MemorySource::new().with_dir("/empty");
        let files = source.list_files(Path::new("/empty"), SearchScope::Recursive).unwrap();
        assert!(files.is_empty());
    }
}
