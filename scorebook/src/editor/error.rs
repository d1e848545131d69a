use thiserror::Error;

use crate::codec::CodecError;

use super::Mode;

#[derive(Error, Debug)]
pub enum EditorError {
    #[error("Key {key:?} does nothing in {mode} mode")]
    IgnoredKey {
        mode: Mode,
        key: char,
    },

    #[error("Cannot commit yet: missing {missing}")]
    IncompleteDetail {
        missing: &'static str,
    },

    #[error("Cursor is already at the {boundary}")]
    CursorAtBoundary {
        boundary: &'static str,
    },

    #[error("Failed to persist the event file: {source}")]
    Persistence {
        #[source]
        source: CodecError,
    },
}
