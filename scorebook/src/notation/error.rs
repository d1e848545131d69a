use thiserror::Error;

#[derive(Error, Debug)]
pub enum NotationError {
    #[error("Unrecognized pitch character {ch:?}")]
    InvalidPitchChar {
        ch: char,
    },

    #[error("Invalid play descriptor {text:?}: {reason}")]
    InvalidDescriptor {
        text: String,
        reason: String,
    },

    #[error("Invalid game identifier {text:?} (expected TTTYYYYMMDDN)")]
    InvalidGameId {
        text: String,
    },
}
