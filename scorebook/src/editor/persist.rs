use std::path::PathBuf;

use crate::codec::{self, CodecError};
use crate::store::EventStore;

/// Where committed edits get written. The editor persists synchronously on
/// every commit; a failure is surfaced and the in-memory store keeps the
/// mutation so the same save can be retried.
pub trait Persister {
    fn persist(&mut self, store: &EventStore) -> Result<(), CodecError>;
}

/// Writes the encoded store into an output directory (created if absent),
/// keeping the original filename.
#[derive(Debug, Clone)]
pub struct DirPersister {
    out_dir: PathBuf,
}

impl DirPersister {
    pub fn new(out_dir: impl Into<PathBuf>) -> DirPersister {
        DirPersister {
            out_dir: out_dir.into(),
        }
    }
}

impl Persister for DirPersister {
    fn persist(&mut self, store: &EventStore) -> Result<(), CodecError> {
        codec::write_file(store, &self.out_dir).map(|_| ())
    }
}
