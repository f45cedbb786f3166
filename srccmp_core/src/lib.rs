pub mod vfs;
pub mod digest;
pub mod scanner;
pub mod matcher;
pub mod classifier;
pub mod stats;
pub mod report;
pub mod comparison;

pub use vfs::{LocalSource, MemorySource};
pub use digest::{digest, digests_equal, hash_entry};
pub use scanner::{ExtensionFilter, FolderScanner};
pub use matcher::{match_entries, orient, OrientedRoots, RootListing};
pub use classifier::Classifier;
pub use stats::RunStatistics;
pub use report::{ReportOptions, Reporter};
pub use comparison::{ComparisonEngine, DirectoryOutcome};
