//! The interactive annotation state machine.
//!
//! Keystrokes arrive from the terminal layer as [`InputEvent`]s and
//! accumulate in a pending edit; the store is only touched when a play
//! commits, and every commit writes straight through to disk. The render
//! layer pulls a [`Snapshot`] per tick and never gets called back.

mod error;
mod keymap;
mod persist;

use std::fmt::{Display, Formatter};
use std::path::Path;

use serde::Serialize;

pub use error::EditorError;
pub use keymap::KeyBinding;
pub use persist::{DirPersister, Persister};

use crate::codec::{self, CodecError};
use crate::notation::{
    format_pitch_sequence, format_play_descriptor, parse_pitch_sequence, BattedBall, Count,
    PitchEvent, PlayDescriptor, Position, ResultKind,
};
use crate::store::{Cursor, EditAction, EventStore, Play};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DetailStage {
    HitOrOutType,
    Fielders,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Mode {
    Pitch,
    Play,
    Detail(DetailStage),
}

impl Display for Mode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Mode::Pitch => "PITCH",
            Mode::Play => "PLAY",
            Mode::Detail(_) => "DETAIL",
        })
    }
}

/// One input event from the terminal layer. Character keys carry the raw
/// key; everything else is pre-classified by the terminal's own bindings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    PitchKey(char),
    PlayResultKey(char),
    DetailKey(char),
    Tab,
    Undo,
    Clear,
    Commit,
    NavPrevPlay,
    NavNextPlay,
    NavPrevGame,
    NavNextGame,
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Continue,
    /// A play was committed (or a pending save retried) and written through.
    Committed,
    Quit,
}

/// Read-only view for the render layer.
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub mode: Mode,
    pub game_id: String,
    pub pitches: String,
    pub descriptor: String,
    pub count: Count,
    pub undo_available: bool,
    pub keys: Vec<KeyBinding>,
}

#[derive(Debug, Clone, Default)]
struct PendingEdit {
    pitches: Vec<PitchEvent>,
    result: Option<ResultKind>,
    batted: Option<BattedBall>,
    fielders: Vec<Position>,
}

impl PendingEdit {
    fn seeded(play: Option<&Play>) -> PendingEdit {
        PendingEdit {
            pitches: play
                .map(|play| parse_pitch_sequence(&play.pitches).unwrap_or_default())
                .unwrap_or_default(),
            ..PendingEdit::default()
        }
    }

    fn discard_detail(&mut self) {
        self.result = None;
        self.batted = None;
        self.fielders.clear();
    }

    /// Best-effort notation text for the in-progress descriptor, shown while
    /// the entry is still incomplete.
    fn preview(&self) -> String {
        let Some(result) = self.result else {
            return String::new();
        };
        let sequence: String = self.fielders.iter().map(|f| f.to_string()).collect();
        let mut text = String::new();
        if result.is_hit_style() {
            text.push_str(result.code());
            if let Some(first) = self.fielders.first() {
                text.push_str(&first.to_string());
            }
            if let Some(batted) = self.batted {
                text.push('/');
                text.push(batted.code());
                text.push_str(&sequence);
            }
        } else {
            text.push_str(&sequence);
            if let Some(batted) = self.batted {
                text.push('/');
                text.push(batted.code());
            }
            if let Some(modifier) = result.out_modifier() {
                text.push('/');
                text.push_str(modifier);
            }
        }
        text
    }
}

enum NavDirection {
    PrevPlay,
    NextPlay,
    PrevGame,
    NextGame,
}

/// The annotation state machine: a cursor into the store plus the pending
/// edit, one keystroke processed at a time.
pub struct Editor<P> {
    store: EventStore,
    cursor: Cursor,
    mode: Mode,
    pending: Option<PendingEdit>,
    persister: P,
}

impl Editor<DirPersister> {
    /// Opens `input` for annotation, writing committed edits into `out_dir`
    /// under the same filename.
    pub fn open(input: &Path, out_dir: &Path) -> Result<Self, CodecError> {
        let store = codec::read_file(input)?;
        Ok(Editor::new(store, DirPersister::new(out_dir)))
    }
}

impl<P: Persister> Editor<P> {
    pub fn new(store: EventStore, persister: P) -> Editor<P> {
        Editor {
            store,
            cursor: Cursor { game: 0, play: 0 },
            mode: Mode::Pitch,
            pending: None,
            persister,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    pub fn store(&self) -> &EventStore {
        &self.store
    }

    pub fn handle(&mut self, event: InputEvent) -> Result<Outcome, EditorError> {
        match event {
            InputEvent::Quit => Ok(Outcome::Quit),
            InputEvent::Tab => self.cycle_mode(),
            InputEvent::Undo => self.undo(),
            InputEvent::Clear => self.clear(),
            InputEvent::Commit => self.explicit_commit(),
            InputEvent::PitchKey(key) => self.pitch_key(key),
            InputEvent::PlayResultKey(key) => self.result_key(key),
            InputEvent::DetailKey(key) => self.detail_key(key),
            InputEvent::NavPrevPlay => self.navigate(NavDirection::PrevPlay),
            InputEvent::NavNextPlay => self.navigate(NavDirection::NextPlay),
            InputEvent::NavPrevGame => self.navigate(NavDirection::PrevGame),
            InputEvent::NavNextGame => self.navigate(NavDirection::NextGame),
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        let play = self.store.play_at(self.cursor);
        let (pitches, descriptor, count) = match &self.pending {
            Some(pending) => (
                format_pitch_sequence(&pending.pitches),
                pending.preview(),
                Count::from_sequence(&pending.pitches),
            ),
            None => (
                play.map(|play| play.pitches.clone()).unwrap_or_default(),
                play.map(|play| play.descriptor.clone()).unwrap_or_default(),
                play.map(|play| play.count()).unwrap_or_default(),
            ),
        };
        Snapshot {
            mode: self.mode,
            game_id: self
                .store
                .game(self.cursor.game)
                .map(|game| game.id.to_string())
                .unwrap_or_default(),
            pitches,
            descriptor,
            count,
            undo_available: self.store.undo_available(),
            keys: keymap::bindings(self.mode),
        }
    }

    fn pending_mut(&mut self) -> &mut PendingEdit {
        if self.pending.is_none() {
            let seeded = PendingEdit::seeded(self.store.play_at(self.cursor));
            self.pending = Some(seeded);
        }
        self.pending.get_or_insert_with(PendingEdit::default)
    }

    fn ignored(&self, key: char) -> EditorError {
        EditorError::IgnoredKey {
            mode: self.mode,
            key,
        }
    }

    fn pitch_key(&mut self, key: char) -> Result<Outcome, EditorError> {
        if self.mode != Mode::Pitch {
            return Err(self.ignored(key));
        }
        let Some(pitch) = keymap::pitch_for_key(key) else {
            return Err(self.ignored(key));
        };

        let pending = self.pending_mut();
        pending.pitches.push(pitch);
        let count = Count::from_sequence(&pending.pitches);

        // Automatic outcomes carry no batted-ball or fielder information,
        // so they skip DETAIL and commit on the spot.
        if pitch == PitchEvent::HitBatter {
            return self.commit(PlayDescriptor::bare(ResultKind::HitByPitch));
        }
        if count.is_walk() {
            return self.commit(PlayDescriptor::bare(ResultKind::Walk));
        }
        if count.is_strikeout() {
            return self.commit(PlayDescriptor::bare(ResultKind::Strikeout));
        }
        Ok(Outcome::Continue)
    }

    fn result_key(&mut self, key: char) -> Result<Outcome, EditorError> {
        if self.mode != Mode::Play {
            return Err(self.ignored(key));
        }
        let Some(result) = keymap::result_for_key(key) else {
            return Err(self.ignored(key));
        };
        if result.needs_detail() {
            let pending = self.pending_mut();
            pending.discard_detail();
            pending.result = Some(result);
            self.mode = Mode::Detail(DetailStage::HitOrOutType);
            Ok(Outcome::Continue)
        } else {
            self.commit(PlayDescriptor::bare(result))
        }
    }

    fn detail_key(&mut self, key: char) -> Result<Outcome, EditorError> {
        match self.mode {
            Mode::Detail(DetailStage::HitOrOutType) => {
                let Some(batted) = keymap::batted_for_key(key) else {
                    return Err(self.ignored(key));
                };
                self.pending_mut().batted = Some(batted);
                self.mode = Mode::Detail(DetailStage::Fielders);
                Ok(Outcome::Continue)
            }
            Mode::Detail(DetailStage::Fielders) => {
                let Some(position) = keymap::position_for_key(key) else {
                    return Err(self.ignored(key));
                };
                let pending = self.pending_mut();
                pending.fielders.push(position);

                // Hit-style entries finish themselves; out-style chains like
                // 643 have no detectable end and wait for an explicit commit.
                match pending.result {
                    Some(result)
                        if result.is_hit_style()
                            && pending.fielders.len() >= result.min_fielders() =>
                    {
                        let descriptor = PlayDescriptor {
                            result,
                            batted: pending.batted,
                            fielders: pending.fielders.clone(),
                        };
                        self.commit(descriptor)
                    }
                    _ => Ok(Outcome::Continue),
                }
            }
            _ => Err(self.ignored(key)),
        }
    }

    fn cycle_mode(&mut self) -> Result<Outcome, EditorError> {
        self.mode = match self.mode {
            Mode::Pitch => Mode::Play,
            Mode::Play => match self.pending.as_ref().and_then(|pending| pending.result) {
                Some(result) if result.needs_detail() => Mode::Detail(DetailStage::HitOrOutType),
                _ => Mode::Pitch,
            },
            Mode::Detail(_) => {
                // early exit throws away the half-entered detail
                if let Some(pending) = self.pending.as_mut() {
                    pending.discard_detail();
                }
                Mode::Pitch
            }
        };
        Ok(Outcome::Continue)
    }

    fn clear(&mut self) -> Result<Outcome, EditorError> {
        match self.mode {
            Mode::Pitch => {
                self.pending_mut().pitches.clear();
            }
            Mode::Play => {
                if let Some(pending) = self.pending.as_mut() {
                    pending.result = None;
                }
            }
            Mode::Detail(_) => {}
        }
        Ok(Outcome::Continue)
    }

    fn undo(&mut self) -> Result<Outcome, EditorError> {
        let Some(action) = self.store.pop_undo() else {
            return Ok(Outcome::Continue);
        };
        self.store.set_pitch_sequence(action.cursor, &action.pitches);
        self.store.set_descriptor(action.cursor, &action.descriptor);
        self.cursor = action.cursor;
        self.pending = None;
        self.mode = Mode::Pitch;
        self.persist_store()?;
        Ok(Outcome::Continue)
    }

    fn navigate(&mut self, direction: NavDirection) -> Result<Outcome, EditorError> {
        let mut cursor = self.cursor;
        let (moved, boundary) = match direction {
            NavDirection::PrevPlay => (self.store.prev_play(&mut cursor), "first play of the game"),
            NavDirection::NextPlay => (self.store.next_play(&mut cursor), "last play of the game"),
            NavDirection::PrevGame => (self.store.prev_game(&mut cursor), "first game of the file"),
            NavDirection::NextGame => (self.store.next_game(&mut cursor), "last game of the file"),
        };
        if !moved {
            return Err(EditorError::CursorAtBoundary { boundary });
        }
        // never auto-saves: whatever was pending here is gone
        self.cursor = cursor;
        self.pending = None;
        self.mode = Mode::Pitch;
        Ok(Outcome::Continue)
    }

    fn explicit_commit(&mut self) -> Result<Outcome, EditorError> {
        match self.mode {
            Mode::Detail(DetailStage::HitOrOutType) => Err(EditorError::IncompleteDetail {
                missing: "batted-ball type",
            }),
            Mode::Detail(DetailStage::Fielders) => {
                let descriptor = {
                    let Some(pending) = self.pending.as_ref() else {
                        return Err(EditorError::IncompleteDetail {
                            missing: "play result",
                        });
                    };
                    let Some(result) = pending.result else {
                        return Err(EditorError::IncompleteDetail {
                            missing: "play result",
                        });
                    };
                    if pending.batted.is_none() {
                        return Err(EditorError::IncompleteDetail {
                            missing: "batted-ball type",
                        });
                    }
                    if pending.fielders.is_empty() {
                        return Err(EditorError::IncompleteDetail {
                            missing: "fielder sequence",
                        });
                    }
                    PlayDescriptor {
                        result,
                        batted: pending.batted,
                        fielders: pending.fielders.clone(),
                    }
                };
                self.commit(descriptor)
            }
            Mode::Pitch | Mode::Play => {
                if self.pending.is_some() {
                    return Err(EditorError::IncompleteDetail {
                        missing: "play result",
                    });
                }
                if self.store.is_dirty() {
                    // a commit whose write failed earlier; try the save again
                    self.persist_store()?;
                    return Ok(Outcome::Committed);
                }
                Ok(Outcome::Continue)
            }
        }
    }

    /// Writes the pending edit into the store, snapshots the prior state for
    /// undo, advances to the next batter and persists. On a persistence
    /// failure everything stays in memory for a retry.
    fn commit(&mut self, descriptor: PlayDescriptor) -> Result<Outcome, EditorError> {
        let (prior_pitches, prior_descriptor) = match self.store.play_at(self.cursor) {
            Some(play) => (play.pitches.clone(), play.descriptor.clone()),
            None => {
                self.pending = None;
                self.mode = Mode::Pitch;
                return Ok(Outcome::Continue);
            }
        };
        let pitches = match self.pending.take() {
            Some(pending) => format_pitch_sequence(&pending.pitches),
            None => prior_pitches.clone(),
        };
        self.store.push_undo(EditAction {
            cursor: self.cursor,
            pitches: prior_pitches,
            descriptor: prior_descriptor,
        });
        self.store.set_pitch_sequence(self.cursor, &pitches);
        self.store
            .set_descriptor(self.cursor, &format_play_descriptor(&descriptor));
        log::debug!(
            "committed {} at game {} play {}",
            descriptor,
            self.cursor.game,
            self.cursor.play
        );
        self.mode = Mode::Pitch;
        self.store.next_play(&mut self.cursor);
        self.persist_store()?;
        Ok(Outcome::Committed)
    }

    fn persist_store(&mut self) -> Result<(), EditorError> {
        self.persister
            .persist(&self.store)
            .map_err(|source| EditorError::Persistence { source })?;
        self.store.mark_clean();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_names_for_messages() {
        assert_eq!(Mode::Pitch.to_string(), "PITCH");
        assert_eq!(Mode::Play.to_string(), "PLAY");
        assert_eq!(Mode::Detail(DetailStage::Fielders).to_string(), "DETAIL");
    }

    #[test]
    fn preview_tracks_partial_entry() {
        let mut pending = PendingEdit::default();
        assert_eq!(pending.preview(), "");

        pending.result = Some(ResultKind::Single);
        assert_eq!(pending.preview(), "S");
        pending.batted = Some(BattedBall::Grounder);
        assert_eq!(pending.preview(), "S/G");

        let mut pending = PendingEdit {
            result: Some(ResultKind::GroundedIntoDP),
            batted: Some(BattedBall::Grounder),
            ..PendingEdit::default()
        };
        pending.fielders.push(Position::Shortstop);
        pending.fielders.push(Position::SecondBase);
        assert_eq!(pending.preview(), "64/G/GDP");
    }
}
