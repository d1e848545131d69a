pub mod error;
mod descriptor;
mod parsers;
mod pitch;

pub use descriptor::{
    format_play_descriptor, parse_play_descriptor, BattedBall, PlayDescriptor, Position,
    ResultKind,
};
pub use error::NotationError;
pub use pitch::{
    format_pitch_sequence, parse_pitch_char, parse_pitch_sequence, Count, PitchEvent,
};
