use srccmp_common::{Digest, DigestState, FileEntry, FileSource};
use tracing::{debug, warn};

/// Hash a whole buffer in one call
pub fn digest(bytes: &[u8]) -> Digest {
    blake3::hash(bytes).into()
}

/// Two digest states are equal only when both are computed and identical.
/// A side that was never hashed (or failed to read) never compares equal.
pub fn digests_equal(a: &DigestState, b: &DigestState) -> bool {
    match (a, b) {
        (DigestState::Computed(a), DigestState::Computed(b)) => a.as_bytes() == b.as_bytes(),
        _ => false,
    }
}

/// Read an entry's full contents and return a hashed copy of it.
///
/// On a read failure the returned entry is still `NotComputed`.
pub fn hash_entry(source: &dyn FileSource, entry: &FileEntry) -> FileEntry {
    match source.read_all(entry.path()) {
        Ok(bytes) => {
            let hashed = entry.with_digest(digest(&bytes));
            debug!("Hashed {:?} ({} bytes)", entry.path(), bytes.len());
            hashed
        }
        Err(e) => {
            warn!("Failed to read {:?}: {}", entry.path(), e);
            entry.clone()
        }
    }
}
