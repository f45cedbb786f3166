use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CompareError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Source error: {0}")]
    Source(#[from] SourceError),

    #[error("Error, dir1 doesn't exist, {}", .0.display())]
    MissingDir1(PathBuf),

    #[error("Error, dir2 doesn't exist, {}", .0.display())]
    MissingDir2(PathBuf),

    #[error("file1 doesn't exist, {}", .0.display())]
    MissingFile1(PathBuf),

    #[error("file2 doesn't exist, {}", .0.display())]
    MissingFile2(PathBuf),

    #[error("Error, cannot compare the same directory")]
    SameDirectory,

    #[error("No files found")]
    NoFilesFound(PathBuf),

    #[error("No files to compare")]
    NothingToCompare,

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl CompareError {
    /// Errors that abort a run before the first pairing is classified.
    pub fn is_setup(&self) -> bool {
        matches!(
            self,
            CompareError::MissingDir1(_)
                | CompareError::MissingDir2(_)
                | CompareError::MissingFile1(_)
                | CompareError::MissingFile2(_)
                | CompareError::SameDirectory
                | CompareError::NoFilesFound(_)
                | CompareError::NothingToCompare
        )
    }
}

#[derive(Error, Debug)]
pub enum SourceError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Path not found: {0}")]
    NotFound(String),

    #[error("Not a directory: {0}")]
    NotADirectory(String),

    #[error("Not a file: {0}")]
    NotAFile(String),

    #[error("Walk error: {0}")]
    Walk(String),
}
