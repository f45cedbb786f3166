use jwalk::WalkDir;
use srccmp_common::{FileSource, SearchScope, SourceError};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Local filesystem source
pub struct LocalSource {
    follow_symlinks: bool,
}

impl LocalSource {
    pub fn new() -> Self {
        Self {
            follow_symlinks: false,
        }
    }

    /// Descend into symlinked directories. Symlinked files are listed
    /// either way.
    pub fn with_follow_symlinks(mut self, enabled: bool) -> Self {
        self.follow_symlinks = enabled;
        self
    }
}

impl Default for LocalSource {
    fn default() -> Self {
        Self::new()
    }
}

impl FileSource for LocalSource {
    fn list_files(&self, root: &Path, scope: SearchScope) -> Result<Vec<PathBuf>, SourceError> {
        if !root.exists() {
            return Err(SourceError::NotFound(root.display().to_string()));
        }
        if !root.is_dir() {
            return Err(SourceError::NotADirectory(root.display().to_string()));
        }

        let mut walker = WalkDir::new(root)
            .follow_links(self.follow_symlinks)
            .skip_hidden(false)
            .sort(true);
        if scope == SearchScope::TopLevelOnly {
            walker = walker.max_depth(1);
        }

        let mut files = Vec::new();
        for entry in walker {
            let entry = entry.map_err(|e| SourceError::Walk(e.to_string()))?;
            let path = entry.path();
            // Symlinked files count as files, like a plain directory listing
            if entry.file_type().is_file() || (entry.file_type().is_symlink() && path.is_file()) {
                files.push(path);
            }
        }

        debug!("Listed {} files under {:?}", files.len(), root);
        Ok(files)
    }

    fn read_all(&self, path: &Path) -> Result<Vec<u8>, SourceError> {
        if !path.is_file() {
            return Err(SourceError::NotAFile(path.display().to_string()));
        }
        Ok(fs::read(path)?)
    }

    fn exists(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }
}
