use srccmp_common::{CompareConfig, CompareError, FileEntry, FileSource, SearchScope};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Include/exclude filter on lower-cased file extensions
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtensionFilter {
    include: Option<Vec<String>>,
    exclude: Option<Vec<String>>,
}

impl ExtensionFilter {
    pub fn new(include: Option<Vec<String>>, exclude: Option<Vec<String>>) -> Self {
        Self { include, exclude }
    }

    pub fn from_config(config: &CompareConfig) -> Self {
        Self::new(
            config.include_extensions.clone(),
            config.exclude_extensions.clone(),
        )
    }

    /// Include list is checked first, then the exclude list
    pub fn allows(&self, path: &Path) -> bool {
        let ext = extension_of(path);

        if let Some(ref include) = self.include {
            if !include.iter().any(|e| *e == ext) {
                return false;
            }
        }
        if let Some(ref exclude) = self.exclude {
            if exclude.iter().any(|e| *e == ext) {
                return false;
            }
        }
        true
    }
}

/// Lower-cased extension including the leading dot, or "" when there is none.
///
/// Dot files such as `.gitignore` count as having an extension.
pub fn extension_of(path: &Path) -> String {
    let name = match path.file_name() {
        Some(name) => name.to_string_lossy(),
        None => return String::new(),
    };
    match name.rfind('.') {
        Some(idx) if idx + 1 < name.len() => name[idx..].to_lowercase(),
        _ => String::new(),
    }
}

/// Enumerates candidate files of one root through a [`FileSource`]
pub struct FolderScanner<'a> {
    source: &'a dyn FileSource,
    scope: SearchScope,
}

impl<'a> FolderScanner<'a> {
    pub fn new(source: &'a dyn FileSource, scope: SearchScope) -> Self {
        Self { source, scope }
    }

    /// Raw candidate paths under `root`; an empty root is a setup error
    pub fn scan(&self, root: &Path) -> Result<Vec<PathBuf>, CompareError> {
        let files = self.source.list_files(root, self.scope)?;
        if files.is_empty() {
            return Err(CompareError::NoFilesFound(root.to_path_buf()));
        }
        debug!("Scanned {} files from {:?}", files.len(), root);
        Ok(files)
    }
}

/// Build primary entries from raw paths, keeping only allowed extensions
pub fn filter_entries(paths: &[PathBuf], filter: &ExtensionFilter) -> Vec<FileEntry> {
    paths
        .iter()
        .filter(|path| filter.allows(path))
        .map(|path| FileEntry::new(path.clone()))
        .collect()
}
