use crate::digest::{digests_equal, hash_entry};
use srccmp_common::{Candidate, FileSource, Pairing, Status};
use tracing::debug;

/// Reads and hashes both sides of a candidate and assigns its status
pub struct Classifier<'a> {
    source: &'a dyn FileSource,
}

impl<'a> Classifier<'a> {
    pub fn new(source: &'a dyn FileSource) -> Self {
        Self { source }
    }

    /// A missing counterpart is classified without any I/O. A side that
    /// cannot be read stays unhashed, which classifies as a mismatch.
    pub fn classify(&self, candidate: Candidate) -> Pairing {
        let Candidate { primary, secondary } = candidate;

        let Some(secondary) = secondary else {
            debug!("{:?}: no counterpart", primary.path());
            return Pairing {
                primary,
                secondary: None,
                status: Status::Missing,
            };
        };

        let primary = hash_entry(self.source, &primary);
        let secondary = hash_entry(self.source, &secondary);

        let status = if digests_equal(&primary.digest_state(), &secondary.digest_state()) {
            Status::Match
        } else {
            Status::ContentMismatch
        };
        debug!("{:?} vs {:?}: {:?}", primary.path(), secondary.path(), status);

        Pairing {
            primary,
            secondary: Some(secondary),
            status,
        }
    }
}
