use serde::{Deserialize, Serialize};

use crate::notation::error::NotationError;

/// One pitch-sequence character from a play record.
///
/// `BallInPlay` never changes the count and is never produced by the editor,
/// but real event files carry it on almost every concluded plate appearance,
/// so the decoder has to accept it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PitchEvent {
    Ball,
    CalledStrike,
    SwingingStrike,
    Foul,
    FoulTip,
    MissedBunt,
    Pitchout,
    IntentionalBall,
    HitBatter,
    WildPitch,
    PassedBall,
    SwingingOnPitchout,
    FoulOnPitchout,
    FoulBunt,
    NoPitch,
    FoulOnBunt,
    Unknown,
    BallInPlay,
}

impl PitchEvent {
    pub const ALPHABET: [PitchEvent; 18] = [
        PitchEvent::Ball,
        PitchEvent::CalledStrike,
        PitchEvent::SwingingStrike,
        PitchEvent::Foul,
        PitchEvent::FoulTip,
        PitchEvent::MissedBunt,
        PitchEvent::Pitchout,
        PitchEvent::IntentionalBall,
        PitchEvent::HitBatter,
        PitchEvent::WildPitch,
        PitchEvent::PassedBall,
        PitchEvent::SwingingOnPitchout,
        PitchEvent::FoulOnPitchout,
        PitchEvent::FoulBunt,
        PitchEvent::NoPitch,
        PitchEvent::FoulOnBunt,
        PitchEvent::Unknown,
        PitchEvent::BallInPlay,
    ];

    pub fn from_char(ch: char) -> Result<PitchEvent, NotationError> {
        Ok(match ch {
            'B' => PitchEvent::Ball,
            'C' => PitchEvent::CalledStrike,
            'S' => PitchEvent::SwingingStrike,
            'F' => PitchEvent::Foul,
            'T' => PitchEvent::FoulTip,
            'M' => PitchEvent::MissedBunt,
            'P' => PitchEvent::Pitchout,
            'I' => PitchEvent::IntentionalBall,
            'H' => PitchEvent::HitBatter,
            'V' => PitchEvent::WildPitch,
            'A' => PitchEvent::PassedBall,
            'Q' => PitchEvent::SwingingOnPitchout,
            'R' => PitchEvent::FoulOnPitchout,
            'E' => PitchEvent::FoulBunt,
            'N' => PitchEvent::NoPitch,
            'O' => PitchEvent::FoulOnBunt,
            'U' => PitchEvent::Unknown,
            'X' => PitchEvent::BallInPlay,
            _ => return Err(NotationError::InvalidPitchChar { ch }),
        })
    }

    pub fn as_char(self) -> char {
        match self {
            PitchEvent::Ball => 'B',
            PitchEvent::CalledStrike => 'C',
            PitchEvent::SwingingStrike => 'S',
            PitchEvent::Foul => 'F',
            PitchEvent::FoulTip => 'T',
            PitchEvent::MissedBunt => 'M',
            PitchEvent::Pitchout => 'P',
            PitchEvent::IntentionalBall => 'I',
            PitchEvent::HitBatter => 'H',
            PitchEvent::WildPitch => 'V',
            PitchEvent::PassedBall => 'A',
            PitchEvent::SwingingOnPitchout => 'Q',
            PitchEvent::FoulOnPitchout => 'R',
            PitchEvent::FoulBunt => 'E',
            PitchEvent::NoPitch => 'N',
            PitchEvent::FoulOnBunt => 'O',
            PitchEvent::Unknown => 'U',
            PitchEvent::BallInPlay => 'X',
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PitchEvent::Ball => "Ball",
            PitchEvent::CalledStrike => "Called strike",
            PitchEvent::SwingingStrike => "Swinging strike",
            PitchEvent::Foul => "Foul",
            PitchEvent::FoulTip => "Foul tip",
            PitchEvent::MissedBunt => "Missed bunt",
            PitchEvent::Pitchout => "Pitchout",
            PitchEvent::IntentionalBall => "Intentional ball",
            PitchEvent::HitBatter => "Hit batter",
            PitchEvent::WildPitch => "Wild pitch",
            PitchEvent::PassedBall => "Passed ball",
            PitchEvent::SwingingOnPitchout => "Swinging on pitchout",
            PitchEvent::FoulOnPitchout => "Foul on pitchout",
            PitchEvent::FoulBunt => "Foul bunt",
            PitchEvent::NoPitch => "No pitch",
            PitchEvent::FoulOnBunt => "Foul on bunt",
            PitchEvent::Unknown => "Unknown pitch",
            PitchEvent::BallInPlay => "Ball in play",
        }
    }
}

/// Ball-strike count, always derived by folding a pitch sequence. Balls cap
/// at 4 and strikes at 3; reaching either cap is an automatic outcome, not a
/// displayable count.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Count {
    pub balls: u8,
    pub strikes: u8,
}

impl Count {
    pub fn from_sequence(sequence: &[PitchEvent]) -> Count {
        let mut count = Count::default();
        for &pitch in sequence {
            count.apply(pitch);
        }
        count
    }

    fn apply(&mut self, pitch: PitchEvent) {
        match pitch {
            PitchEvent::Ball => {
                self.balls = (self.balls + 1).min(4);
            }
            PitchEvent::CalledStrike
            | PitchEvent::SwingingStrike
            | PitchEvent::MissedBunt
            | PitchEvent::SwingingOnPitchout => {
                self.strikes = (self.strikes + 1).min(3);
            }
            // Foul-type events never supply strike three
            PitchEvent::Foul
            | PitchEvent::FoulTip
            | PitchEvent::FoulOnPitchout
            | PitchEvent::FoulBunt
            | PitchEvent::FoulOnBunt => {
                if self.strikes < 2 {
                    self.strikes += 1;
                }
            }
            _ => {}
        }
    }

    pub fn is_walk(self) -> bool {
        self.balls >= 4
    }

    pub fn is_strikeout(self) -> bool {
        self.strikes >= 3
    }
}

impl std::fmt::Display for Count {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.balls, self.strikes)
    }
}

pub fn parse_pitch_char(ch: char) -> Result<PitchEvent, NotationError> {
    PitchEvent::from_char(ch)
}

pub fn parse_pitch_sequence(text: &str) -> Result<Vec<PitchEvent>, NotationError> {
    text.chars().map(PitchEvent::from_char).collect()
}

pub fn format_pitch_sequence(sequence: &[PitchEvent]) -> String {
    sequence.iter().map(|pitch| pitch.as_char()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pitch_alphabet_round_trips() {
        for &pitch in &PitchEvent::ALPHABET {
            assert_eq!(PitchEvent::from_char(pitch.as_char()).unwrap(), pitch);
        }
    }

    #[test]
    fn unrecognized_pitch_char_is_rejected() {
        assert!(matches!(
            PitchEvent::from_char('Z'),
            Err(NotationError::InvalidPitchChar { ch: 'Z' })
        ));
    }

    #[test]
    fn sequence_round_trips_through_text() {
        let text = "BSFBX";
        let parsed = parse_pitch_sequence(text).unwrap();
        assert_eq!(format_pitch_sequence(&parsed), text);
    }

    fn count_of(text: &str) -> Count {
        Count::from_sequence(&parse_pitch_sequence(text).unwrap())
    }

    #[test]
    fn four_balls_is_a_walk() {
        let count = count_of("BBBB");
        assert_eq!(count, Count { balls: 4, strikes: 0 });
        assert!(count.is_walk());
    }

    #[test]
    fn three_strikes_is_a_strikeout() {
        let count = count_of("CCS");
        assert_eq!(count, Count { balls: 0, strikes: 3 });
        assert!(count.is_strikeout());
    }

    #[test]
    fn full_at_two_and_two_stays_open() {
        let count = count_of("BSFB");
        assert_eq!(count, Count { balls: 2, strikes: 2 });
        assert!(!count.is_walk());
        assert!(!count.is_strikeout());
    }

    #[test]
    fn fouls_never_supply_strike_three() {
        // includes a foul tip and a foul bunt at two strikes
        let count = count_of("CCFFTEO");
        assert_eq!(count.strikes, 2);
        assert!(!count.is_strikeout());
    }

    #[test]
    fn pitchouts_and_no_pitches_leave_the_count_alone() {
        let count = count_of("PINUXVA");
        assert_eq!(count, Count { balls: 0, strikes: 0 });
    }
}
