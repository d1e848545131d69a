pub mod codec;
pub mod editor;
pub mod notation;
pub mod store;

pub use codec::{decode, encode, read_file, write_file, CodecError};
pub use editor::{
    DetailStage, DirPersister, Editor, EditorError, InputEvent, KeyBinding, Mode, Outcome,
    Persister, Snapshot,
};
pub use notation::{
    format_pitch_sequence, format_play_descriptor, parse_pitch_char, parse_pitch_sequence,
    parse_play_descriptor, BattedBall, Count, NotationError, PitchEvent, PlayDescriptor, Position,
    ResultKind,
};
pub use store::{Cursor, EditAction, EventStore, Game, GameId, Half, Play, Record, RosterEntry};
