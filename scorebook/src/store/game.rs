use std::fmt::{Display, Formatter};
use std::str::FromStr;

use chrono::NaiveDate;
use num_enum::{IntoPrimitive, TryFromPrimitive};
use serde::{Deserialize, Serialize};

use crate::notation::{parse_pitch_sequence, Count, NotationError, PitchEvent};

/// Game identifier in `TTTYYYYMMDDN` form: home team code, date, game number
/// (0 for a single game, 1/2 for a doubleheader).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameId {
    pub team: String,
    pub date: NaiveDate,
    pub number: u8,
}

impl FromStr for GameId {
    type Err = NotationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || NotationError::InvalidGameId { text: s.to_string() };
        if s.len() != 12 || !s.is_ascii() {
            return Err(malformed());
        }
        let team = &s[..3];
        if !team.chars().all(|ch| ch.is_ascii_alphanumeric()) {
            return Err(malformed());
        }
        let date = NaiveDate::parse_from_str(&s[3..11], "%Y%m%d").map_err(|_| malformed())?;
        let number = s[11..].parse().map_err(|_| malformed())?;
        Ok(GameId {
            team: team.to_string(),
            date,
            number,
        })
    }
}

impl Display for GameId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}{}", self.team, self.date.format("%Y%m%d"), self.number)
    }
}

/// Which half of the inning is batting, by the file format's numeric code.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, IntoPrimitive, TryFromPrimitive,
)]
#[repr(u8)]
pub enum Half {
    Visiting = 0,
    Home = 1,
}

/// One plate appearance. `count_field` is the count column exactly as it
/// appeared in the file (`??` when the source never recorded it); the real
/// count is always derived from the pitch sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Play {
    pub inning: u32,
    pub half: Half,
    pub batter: String,
    pub count_field: String,
    pub pitches: String,
    pub descriptor: String,
    pub advances: Vec<String>,
}

impl Play {
    pub fn is_complete(&self) -> bool {
        !self.descriptor.is_empty()
    }

    pub fn count(&self) -> Count {
        let sequence: Vec<PitchEvent> = parse_pitch_sequence(&self.pitches).unwrap_or_default();
        Count::from_sequence(&sequence)
    }

    /// Count column to write back: a play that was loaded with an unknown
    /// count and has since been concluded gets its derived count (displayed
    /// the scoreboard way, at most 3 balls and 2 strikes); everything else
    /// keeps the original column.
    fn count_for_write(&self) -> String {
        if self.count_field == "??" && self.is_complete() {
            let count = self.count();
            format!("{}{}", count.balls.min(3), count.strikes.min(2))
        } else {
            self.count_field.clone()
        }
    }

    fn descriptor_field(&self) -> String {
        let mut field = self.descriptor.clone();
        if !self.advances.is_empty() {
            field.push('.');
            field.push_str(&self.advances.join(";"));
        }
        field
    }

    pub(crate) fn to_line(&self) -> String {
        format!(
            "play,{},{},{},{},{},{}",
            self.inning,
            u8::from(self.half),
            self.batter,
            self.count_for_write(),
            self.pitches,
            self.descriptor_field(),
        )
    }
}

/// One line of a game, in file order. Anything that is not a play record is
/// kept verbatim and re-emitted untouched.
#[derive(Debug, Clone, Serialize)]
pub enum Record {
    Play {
        play: Play,
        raw: String,
        edited: bool,
    },
    Passthrough {
        raw: String,
    },
}

/// A roster entry from a `start` or `sub` record.
#[derive(Debug, Clone, Serialize)]
pub struct RosterEntry {
    pub player_id: String,
    pub name: String,
    pub team: Half,
    pub slot: u8,
    pub position: u8,
}

#[derive(Debug, Clone, Serialize)]
pub struct Game {
    pub id: GameId,
    /// Info key/value pairs in file order, nothing dropped.
    pub info: Vec<(String, String)>,
    pub roster: Vec<RosterEntry>,
    pub(crate) records: Vec<Record>,
    #[serde(skip)]
    play_index: Vec<usize>,
}

impl Game {
    pub(crate) fn new(id: GameId) -> Game {
        Game {
            id,
            info: Vec::new(),
            roster: Vec::new(),
            records: Vec::new(),
            play_index: Vec::new(),
        }
    }

    pub(crate) fn push_record(&mut self, record: Record) {
        if matches!(record, Record::Play { .. }) {
            self.play_index.push(self.records.len());
        }
        self.records.push(record);
    }

    pub fn play_count(&self) -> usize {
        self.play_index.len()
    }

    pub fn play(&self, index: usize) -> Option<&Play> {
        let record_index = *self.play_index.get(index)?;
        match &self.records[record_index] {
            Record::Play { play, .. } => Some(play),
            Record::Passthrough { .. } => None,
        }
    }

    pub fn plays(&self) -> impl Iterator<Item = &Play> + '_ {
        self.records.iter().filter_map(|record| match record {
            Record::Play { play, .. } => Some(play),
            Record::Passthrough { .. } => None,
        })
    }

    pub fn player_name(&self, player_id: &str) -> Option<&str> {
        self.roster
            .iter()
            .find(|entry| entry.player_id == player_id)
            .map(|entry| entry.name.as_str())
    }

    pub(crate) fn play_record_mut(&mut self, index: usize) -> Option<&mut Record> {
        let record_index = *self.play_index.get(index)?;
        self.records.get_mut(record_index)
    }

    /// Splices a play record immediately after the play at `index` and
    /// renumbers the play index.
    pub(crate) fn insert_play_after(&mut self, index: usize, play: Play) -> bool {
        let Some(&record_index) = self.play_index.get(index) else {
            return false;
        };
        self.records.insert(
            record_index + 1,
            Record::Play {
                play,
                raw: String::new(),
                edited: true,
            },
        );
        self.play_index = self
            .records
            .iter()
            .enumerate()
            .filter(|(_, record)| matches!(record, Record::Play { .. }))
            .map(|(position, _)| position)
            .collect();
        true
    }
}
