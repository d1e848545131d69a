mod game;

use serde::Serialize;

pub use game::{Game, GameId, Half, Play, Record, RosterEntry};

/// Position of the annotation cursor: a game index and a play index within
/// that game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Cursor {
    pub game: usize,
    pub play: usize,
}

/// Snapshot of a play taken before a committed mutation, for undo.
#[derive(Debug, Clone)]
pub struct EditAction {
    pub cursor: Cursor,
    pub pitches: String,
    pub descriptor: String,
}

/// In-memory model of one event file: every game in order, every record of
/// every game verbatim, plus the undo stack and a dirty flag tracking
/// whether the file on disk is behind the model.
#[derive(Debug)]
pub struct EventStore {
    file_name: String,
    games: Vec<Game>,
    trailing_newline: bool,
    undo: Vec<EditAction>,
    dirty: bool,
}

impl EventStore {
    pub(crate) fn new(file_name: String, games: Vec<Game>, trailing_newline: bool) -> EventStore {
        EventStore {
            file_name,
            games,
            trailing_newline,
            undo: Vec::new(),
            dirty: false,
        }
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn games(&self) -> &[Game] {
        &self.games
    }

    pub fn game(&self, index: usize) -> Option<&Game> {
        self.games.get(index)
    }

    pub fn game_by_id(&self, id: &str) -> Option<&Game> {
        self.games.iter().find(|game| game.id.to_string() == id)
    }

    pub fn play_at(&self, cursor: Cursor) -> Option<&Play> {
        self.games.get(cursor.game)?.play(cursor.play)
    }

    pub(crate) fn trailing_newline(&self) -> bool {
        self.trailing_newline
    }

    pub fn set_pitch_sequence(&mut self, cursor: Cursor, pitches: &str) -> bool {
        self.with_play_mut(cursor, |play| play.pitches = pitches.to_string())
    }

    pub fn set_descriptor(&mut self, cursor: Cursor, descriptor: &str) -> bool {
        self.with_play_mut(cursor, |play| play.descriptor = descriptor.to_string())
    }

    fn with_play_mut(&mut self, cursor: Cursor, mutate: impl FnOnce(&mut Play)) -> bool {
        let Some(record) = self
            .games
            .get_mut(cursor.game)
            .and_then(|game| game.play_record_mut(cursor.play))
        else {
            return false;
        };
        if let Record::Play { play, edited, .. } = record {
            mutate(play);
            *edited = true;
            self.dirty = true;
            true
        } else {
            false
        }
    }

    /// Inserts an empty play after the cursor, inheriting the cursor play's
    /// inning and half. For plate appearances the source file missed.
    pub fn insert_play_after(&mut self, cursor: Cursor) -> bool {
        let Some(at) = self.play_at(cursor) else {
            return false;
        };
        let play = Play {
            inning: at.inning,
            half: at.half,
            batter: String::new(),
            count_field: "??".to_string(),
            pitches: String::new(),
            descriptor: String::new(),
            advances: Vec::new(),
        };
        let inserted = self.games[cursor.game].insert_play_after(cursor.play, play);
        if inserted {
            self.dirty = true;
        }
        inserted
    }

    pub fn next_play(&self, cursor: &mut Cursor) -> bool {
        let Some(game) = self.games.get(cursor.game) else {
            return false;
        };
        if cursor.play + 1 < game.play_count() {
            cursor.play += 1;
            true
        } else {
            false
        }
    }

    pub fn prev_play(&self, cursor: &mut Cursor) -> bool {
        if cursor.play > 0 {
            cursor.play -= 1;
            true
        } else {
            false
        }
    }

    pub fn next_game(&self, cursor: &mut Cursor) -> bool {
        if cursor.game + 1 < self.games.len() {
            cursor.game += 1;
            cursor.play = 0;
            true
        } else {
            false
        }
    }

    pub fn prev_game(&self, cursor: &mut Cursor) -> bool {
        if cursor.game > 0 {
            cursor.game -= 1;
            cursor.play = 0;
            true
        } else {
            false
        }
    }

    pub fn push_undo(&mut self, action: EditAction) {
        self.undo.push(action);
    }

    pub fn pop_undo(&mut self) -> Option<EditAction> {
        self.undo.pop()
    }

    pub fn undo_available(&self) -> bool {
        !self.undo.is_empty()
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn mark_clean(&mut self) {
        self.dirty = false;
    }
}
