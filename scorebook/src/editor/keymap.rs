//! Key tables for the three annotation modes. Navigation, tab, undo, clear
//! and commit arrive as their own [`InputEvent`](super::InputEvent) variants,
//! so these tables only cover the per-mode character alphabets.

use serde::Serialize;

use crate::notation::{BattedBall, PitchEvent, Position, ResultKind};

use super::{DetailStage, Mode};

pub(crate) const PITCH_KEYS: [(char, PitchEvent); 17] = [
    ('b', PitchEvent::Ball),
    ('s', PitchEvent::SwingingStrike),
    ('f', PitchEvent::Foul),
    ('c', PitchEvent::CalledStrike),
    ('t', PitchEvent::FoulTip),
    ('m', PitchEvent::MissedBunt),
    ('p', PitchEvent::Pitchout),
    ('i', PitchEvent::IntentionalBall),
    ('h', PitchEvent::HitBatter),
    ('v', PitchEvent::WildPitch),
    ('a', PitchEvent::PassedBall),
    ('*', PitchEvent::SwingingOnPitchout),
    ('r', PitchEvent::FoulOnPitchout),
    ('e', PitchEvent::FoulBunt),
    ('n', PitchEvent::NoPitch),
    ('o', PitchEvent::FoulOnBunt),
    ('u', PitchEvent::Unknown),
];

pub(crate) const RESULT_KEYS: [(char, ResultKind); 22] = [
    ('1', ResultKind::Single),
    ('2', ResultKind::Double),
    ('3', ResultKind::Triple),
    ('4', ResultKind::HomeRun),
    ('o', ResultKind::GenericOut),
    ('s', ResultKind::Strikeout),
    ('l', ResultKind::Walk),
    ('h', ResultKind::HitByPitch),
    ('e', ResultKind::Error),
    ('c', ResultKind::FieldersChoice),
    ('d', ResultKind::DoublePlay),
    ('w', ResultKind::GroundedIntoDP),
    ('!', ResultKind::LinedIntoDP),
    ('y', ResultKind::TriplePlay),
    ('z', ResultKind::ForceOut),
    ('[', ResultKind::UnassistedOut),
    ('f', ResultKind::SacFly),
    ('k', ResultKind::SacBunt),
    ('i', ResultKind::IntentionalWalk),
    ('j', ResultKind::CatcherInterference),
    ('0', ResultKind::OutAdvancing),
    (';', ResultKind::NoPlay),
];

pub(crate) const BATTED_KEYS: [(char, BattedBall); 5] = [
    ('g', BattedBall::Grounder),
    ('l', BattedBall::LineDrive),
    ('f', BattedBall::FlyBall),
    ('p', BattedBall::PopUp),
    ('b', BattedBall::Bunt),
];

pub(crate) fn pitch_for_key(key: char) -> Option<PitchEvent> {
    PITCH_KEYS
        .iter()
        .find(|(bound, _)| *bound == key)
        .map(|(_, pitch)| *pitch)
}

pub(crate) fn result_for_key(key: char) -> Option<ResultKind> {
    RESULT_KEYS
        .iter()
        .find(|(bound, _)| *bound == key)
        .map(|(_, result)| *result)
}

pub(crate) fn batted_for_key(key: char) -> Option<BattedBall> {
    BATTED_KEYS
        .iter()
        .find(|(bound, _)| *bound == key)
        .map(|(_, batted)| *batted)
}

pub(crate) fn position_for_key(key: char) -> Option<Position> {
    let digit = key.to_digit(10)?;
    Position::try_from(digit as u8).ok()
}

/// A key meaningful in the active mode, for the help panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct KeyBinding {
    pub key: char,
    pub action: &'static str,
}

pub(crate) fn bindings(mode: Mode) -> Vec<KeyBinding> {
    match mode {
        Mode::Pitch => PITCH_KEYS
            .iter()
            .map(|&(key, pitch)| KeyBinding {
                key,
                action: pitch.label(),
            })
            .collect(),
        Mode::Play => RESULT_KEYS
            .iter()
            .map(|&(key, result)| KeyBinding {
                key,
                action: result.label(),
            })
            .collect(),
        Mode::Detail(DetailStage::HitOrOutType) => BATTED_KEYS
            .iter()
            .map(|&(key, batted)| KeyBinding {
                key,
                action: batted.label(),
            })
            .collect(),
        Mode::Detail(DetailStage::Fielders) => ('1'..='9')
            .filter_map(|key| {
                position_for_key(key).map(|position| KeyBinding {
                    key,
                    action: position.label(),
                })
            })
            .collect(),
    }
}
