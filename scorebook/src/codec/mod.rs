//! Streams the line-oriented event notation into an [`EventStore`] and back.
//!
//! Decoding is strict about the record types it understands (`id`, `play`,
//! `info`, `start`, `sub`) and keeps everything else — `version`, `com`,
//! `data`, blanks, record types it has never heard of — verbatim, so that
//! encoding an untouched store reproduces the input byte for byte.

mod error;

use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

pub use error::CodecError;

use crate::notation::{parse_pitch_sequence, parse_play_descriptor};
use crate::store::{EventStore, Game, GameId, Half, Play, Record, RosterEntry};

pub fn decode(input: &str, file_name: &str) -> Result<EventStore, CodecError> {
    let trailing_newline = input.is_empty() || input.ends_with('\n');
    let mut chunks: Vec<&str> = input.split('\n').collect();
    if trailing_newline {
        chunks.pop();
    }

    let mut games: Vec<Game> = Vec::new();
    for (index, raw) in chunks.into_iter().enumerate() {
        let line_no = index + 1;
        // CRLF input: the \r stays with the raw line so re-emission is exact
        let line = raw.strip_suffix('\r').unwrap_or(raw);
        let kind = line.split(',').next().unwrap_or("");

        if kind == "id" {
            let token = line.split(',').nth(1).unwrap_or("");
            let id = GameId::from_str(token).map_err(|err| CodecError::MalformedLine {
                line_no,
                reason: err.to_string(),
            })?;
            if games.iter().any(|game| game.id == id) {
                return Err(CodecError::MalformedLine {
                    line_no,
                    reason: format!("duplicate game identifier {id}"),
                });
            }
            let mut game = Game::new(id);
            game.push_record(Record::Passthrough {
                raw: raw.to_string(),
            });
            games.push(game);
            continue;
        }

        let Some(game) = games.last_mut() else {
            return Err(CodecError::MalformedLine {
                line_no,
                reason: "record appears before any id record".to_string(),
            });
        };

        match kind {
            "play" => {
                let play = parse_play_line(line, line_no)?;
                game.push_record(Record::Play {
                    play,
                    raw: raw.to_string(),
                    edited: false,
                });
            }
            "info" => {
                let (key, value) = parse_info_line(line, line_no)?;
                game.info.push((key, value));
                game.push_record(Record::Passthrough {
                    raw: raw.to_string(),
                });
            }
            "start" | "sub" => {
                game.roster.push(parse_roster_line(line, line_no)?);
                game.push_record(Record::Passthrough {
                    raw: raw.to_string(),
                });
            }
            _ => {
                game.push_record(Record::Passthrough {
                    raw: raw.to_string(),
                });
            }
        }
    }

    log::debug!("decoded {} with {} game(s)", file_name, games.len());
    Ok(EventStore::new(
        file_name.to_string(),
        games,
        trailing_newline,
    ))
}

fn parse_play_line(line: &str, line_no: usize) -> Result<Play, CodecError> {
    let malformed = |reason: String| CodecError::MalformedLine { line_no, reason };

    let fields: Vec<&str> = line.splitn(7, ',').collect();
    if fields.len() < 7 {
        return Err(malformed(format!(
            "play record has {} field(s), expected 7",
            fields.len()
        )));
    }

    let inning: u32 = fields[1]
        .parse()
        .map_err(|_| malformed(format!("bad inning number {:?}", fields[1])))?;
    if inning < 1 {
        return Err(malformed("inning number must be at least 1".to_string()));
    }
    let half_code: u8 = fields[2]
        .parse()
        .map_err(|_| malformed(format!("bad half-inning code {:?}", fields[2])))?;
    let half = Half::try_from(half_code)
        .map_err(|_| malformed(format!("bad half-inning code {:?}", fields[2])))?;

    parse_pitch_sequence(fields[5]).map_err(|err| malformed(err.to_string()))?;

    let (descriptor, advances) = split_descriptor_field(fields[6]);
    if !descriptor.is_empty() && parse_play_descriptor(&descriptor).is_err() {
        // Hand-scored files carry richer descriptors than the editor can
        // construct; keep them verbatim rather than refusing the file.
        log::debug!(
            "line {}: descriptor {:?} kept verbatim",
            line_no,
            descriptor
        );
    }

    Ok(Play {
        inning,
        half,
        batter: fields[3].to_string(),
        count_field: fields[4].to_string(),
        pitches: fields[5].to_string(),
        descriptor,
        advances,
    })
}

/// Splits a descriptor field into the descriptor proper and the
/// runner-advance annotations after the first `.`. A bare `.` (or nothing)
/// means the play has not been recorded yet.
fn split_descriptor_field(field: &str) -> (String, Vec<String>) {
    if field.is_empty() || field == "." {
        return (String::new(), Vec::new());
    }
    match field.split_once('.') {
        Some((descriptor, advances)) => (
            descriptor.to_string(),
            advances.split(';').map(str::to_string).collect(),
        ),
        None => (field.to_string(), Vec::new()),
    }
}

fn parse_info_line(line: &str, line_no: usize) -> Result<(String, String), CodecError> {
    let fields: Vec<&str> = line.splitn(3, ',').collect();
    if fields.len() < 3 {
        return Err(CodecError::MalformedLine {
            line_no,
            reason: "info record is missing its value field".to_string(),
        });
    }
    let value = fields[2].trim_matches('"');
    Ok((fields[1].to_string(), value.to_string()))
}

fn parse_roster_line(line: &str, line_no: usize) -> Result<RosterEntry, CodecError> {
    let malformed = |reason: String| CodecError::MalformedLine { line_no, reason };

    let fields: Vec<&str> = line.split(',').collect();
    if fields.len() < 6 {
        return Err(malformed(format!(
            "{} record has {} field(s), expected 6",
            fields[0],
            fields.len()
        )));
    }
    let team_code: u8 = fields[3]
        .parse()
        .map_err(|_| malformed(format!("bad team code {:?}", fields[3])))?;
    let team = Half::try_from(team_code)
        .map_err(|_| malformed(format!("bad team code {:?}", fields[3])))?;
    Ok(RosterEntry {
        player_id: fields[1].to_string(),
        name: fields[2].trim_matches('"').to_string(),
        team,
        slot: fields[4]
            .parse()
            .map_err(|_| malformed(format!("bad batting slot {:?}", fields[4])))?,
        position: fields[5]
            .parse()
            .map_err(|_| malformed(format!("bad fielding position {:?}", fields[5])))?,
    })
}

pub fn encode(store: &EventStore) -> String {
    let mut out = String::new();
    for game in store.games() {
        for record in &game.records {
            match record {
                Record::Passthrough { raw } => out.push_str(raw),
                Record::Play { play, raw, edited } => {
                    if *edited {
                        out.push_str(&play.to_line());
                    } else {
                        out.push_str(raw);
                    }
                }
            }
            out.push('\n');
        }
    }
    if !store.trailing_newline() {
        out.pop();
    }
    out
}

pub fn read_file(path: &Path) -> Result<EventStore, CodecError> {
    let text = fs::read_to_string(path).map_err(|source| CodecError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("game.EVN");
    decode(&text, file_name)
}

/// Writes the store to `out_dir` (created if absent), keeping the original
/// filename. Returns the path written.
pub fn write_file(store: &EventStore, out_dir: &Path) -> Result<PathBuf, CodecError> {
    fs::create_dir_all(out_dir).map_err(|source| CodecError::Write {
        path: out_dir.to_path_buf(),
        source,
    })?;
    let path = out_dir.join(store.file_name());
    fs::write(&path, encode(store)).map_err(|source| CodecError::Write {
        path: path.clone(),
        source,
    })?;
    log::info!("wrote {}", path.display());
    Ok(path)
}
